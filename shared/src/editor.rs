//! Builders for the payloads the editor, comment form and moderation screens
//! dispatch. Ids and timestamps always come from the caller so the reducer
//! never reads a clock.

use chrono::{DateTime, Utc};

use crate::models::{Article, Author, Comment, SiteConfig};

/// Hero image used when the editor leaves the field blank.
pub const DEFAULT_FEATURED_IMAGE: &str = "/images/tech-article.webp";
const READ_CHARS_PER_MINUTE: usize = 200;
const ANONYMOUS_AUTHOR: &str = "Anonymous";
const ANONYMOUS_EMAIL: &str = "anonymous@email.com";

/// A form that cannot become an article or comment yet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    /// Articles need a non-blank title.
    #[error("article title is required")]
    MissingTitle,
    /// A required comment field was blank.
    #[error("`{0}` is required")]
    MissingField(&'static str),
}

/// URL slug derived from a title: lowercase, punctuation dropped,
/// whitespace runs collapsed to `-`.
pub fn generate_slug(title: &str) -> String {
    let kept: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join("-")
}

/// Reading time in whole minutes, rounded up.
pub fn estimate_read_time(content: &str) -> u32 {
    let chars = content.chars().count();
    u32::try_from(chars.div_ceil(READ_CHARS_PER_MINUTE)).unwrap_or(u32::MAX)
}

/// Comma-separated tag input, blanks removed.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Millisecond timestamp used as a fresh entity id.
pub fn timestamp_id(now: DateTime<Utc>) -> String {
    now.timestamp_millis().to_string()
}

/// Editor form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleDraft {
    /// Required.
    pub title: String,
    /// Derived from the title while empty.
    pub slug: String,
    /// Card summary.
    pub excerpt: String,
    /// Markdown body.
    pub content: String,
    /// Blank means [`DEFAULT_FEATURED_IMAGE`].
    pub featured_image: String,
    /// Category name.
    pub category: String,
    /// Parsed tags.
    pub tags: Vec<String>,
    /// Publish on save.
    pub is_published: bool,
}

impl ArticleDraft {
    /// Prefill the form from an existing article.
    pub fn from_article(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            slug: article.slug.clone(),
            excerpt: article.excerpt.clone(),
            content: article.content.clone(),
            featured_image: article.featured_image.clone(),
            category: article.category.clone(),
            tags: article.tags.clone(),
            is_published: article.is_published,
        }
    }

    /// Update the title; the slug follows it until one is set explicitly.
    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
        if self.slug.is_empty() {
            self.slug = generate_slug(title);
        }
    }

    /// Build the article to dispatch.
    ///
    /// With `existing` this is an edit: id, `publishedAt`, views and likes
    /// are carried over. Otherwise `id` is used and the counters start at
    /// zero.
    pub fn into_article(
        self,
        existing: Option<&Article>,
        author: Author,
        id: String,
        now: DateTime<Utc>,
    ) -> Result<Article, DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::MissingTitle);
        }
        let slug = if self.slug.trim().is_empty() {
            generate_slug(&self.title)
        } else {
            self.slug
        };
        let featured_image = if self.featured_image.trim().is_empty() {
            DEFAULT_FEATURED_IMAGE.to_string()
        } else {
            self.featured_image
        };
        let read_time = estimate_read_time(&self.content);
        let (id, published_at, views, likes) = match existing {
            Some(prev) => (prev.id.clone(), prev.published_at, prev.views, prev.likes),
            None => (id, now, 0, 0),
        };

        Ok(Article {
            id,
            title: self.title,
            slug,
            excerpt: self.excerpt,
            content: self.content,
            featured_image,
            category: self.category,
            tags: self.tags,
            author,
            published_at,
            updated_at: now,
            is_published: self.is_published,
            read_time,
            views,
            likes,
        })
    }
}

/// Flip the publish flag; payload for `UPDATE_ARTICLE`.
pub fn toggle_publish(article: &Article, now: DateTime<Utc>) -> Article {
    Article {
        is_published: !article.is_published,
        updated_at: now,
        ..article.clone()
    }
}

/// Public comment form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentDraft {
    /// Commenter name.
    pub author: String,
    /// Commenter email.
    pub email: String,
    /// Comment body.
    pub content: String,
}

impl CommentDraft {
    /// New top-level comment. Comments go live immediately; moderation
    /// happens afterwards.
    pub fn into_comment(
        self,
        id: String,
        article_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Comment, DraftError> {
        for (name, value) in [
            ("author", &self.author),
            ("email", &self.email),
            ("content", &self.content),
        ] {
            if value.trim().is_empty() {
                return Err(DraftError::MissingField(name));
            }
        }
        Ok(Comment {
            id,
            article_id: article_id.to_string(),
            author: self.author,
            email: self.email,
            content: self.content,
            created_at: now,
            is_approved: true,
            replies: Vec::new(),
        })
    }
}

/// The parent with an anonymous reply appended; payload for
/// `UPDATE_COMMENT`.
pub fn reply_to(
    parent: &Comment,
    content: &str,
    id: String,
    now: DateTime<Utc>,
) -> Result<Comment, DraftError> {
    if content.trim().is_empty() {
        return Err(DraftError::MissingField("content"));
    }
    let reply = Comment {
        id,
        article_id: parent.article_id.clone(),
        author: ANONYMOUS_AUTHOR.to_string(),
        email: ANONYMOUS_EMAIL.to_string(),
        content: content.to_string(),
        created_at: now,
        is_approved: true,
        replies: Vec::new(),
    };
    let mut updated = parent.clone();
    updated.replies.push(reply);
    Ok(updated)
}

/// Moderation payload for `UPDATE_COMMENT`.
pub fn set_approval(comment: &Comment, approved: bool) -> Comment {
    Comment {
        is_approved: approved,
        ..comment.clone()
    }
}

/// Key outside [`SiteConfig::SETTING_KEYS`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown setting `{0}`")]
pub struct ConfigKeyError(pub String);

impl SiteConfig {
    /// Setting keys accepted by [`SiteConfig::apply_setting`].
    pub const SETTING_KEYS: [&'static str; 14] = [
        "site.title",
        "site.subtitle",
        "site.description",
        "site.author",
        "site.email",
        "site.url",
        "site.logo",
        "site.heroImage",
        "theme.primaryColor",
        "theme.secondaryColor",
        "theme.accentColor",
        "social.github",
        "social.twitter",
        "social.linkedin",
    ];

    fn field_mut(&mut self, key: &str) -> Option<&mut String> {
        let site = &mut self.site;
        let field = match key {
            "site.title" => &mut site.title,
            "site.subtitle" => &mut site.subtitle,
            "site.description" => &mut site.description,
            "site.author" => &mut site.author,
            "site.email" => &mut site.email,
            "site.url" => &mut site.url,
            "site.logo" => &mut site.logo,
            "site.heroImage" => &mut site.hero_image,
            "theme.primaryColor" => &mut site.theme.primary_color,
            "theme.secondaryColor" => &mut site.theme.secondary_color,
            "theme.accentColor" => &mut site.theme.accent_color,
            "social.github" => &mut self.social.github,
            "social.twitter" => &mut self.social.twitter,
            "social.linkedin" => &mut self.social.linkedin,
            _ => return None,
        };
        Some(field)
    }

    /// Current value of a setting key.
    pub fn setting(&self, key: &str) -> Option<&str> {
        let site = &self.site;
        let value = match key {
            "site.title" => &site.title,
            "site.subtitle" => &site.subtitle,
            "site.description" => &site.description,
            "site.author" => &site.author,
            "site.email" => &site.email,
            "site.url" => &site.url,
            "site.logo" => &site.logo,
            "site.heroImage" => &site.hero_image,
            "theme.primaryColor" => &site.theme.primary_color,
            "theme.secondaryColor" => &site.theme.secondary_color,
            "theme.accentColor" => &site.theme.accent_color,
            "social.github" => &self.social.github,
            "social.twitter" => &self.social.twitter,
            "social.linkedin" => &self.social.linkedin,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Set one dotted setting key (`site.title`, `theme.primaryColor`, ...).
    pub fn apply_setting(&mut self, key: &str, value: &str) -> Result<(), ConfigKeyError> {
        let field = self
            .field_mut(key)
            .ok_or_else(|| ConfigKeyError(key.to_string()))?;
        *field = value.to_string();
        Ok(())
    }
}
