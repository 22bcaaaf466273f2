//! Serde records for the five blog documents and the in-memory state that
//! holds them.

use std::rc::Rc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author snapshot embedded in an article. Copied by value, not a user
/// reference, so later profile edits do not rewrite old articles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Display name.
    pub name: String,
    /// Avatar image path.
    pub avatar: String,
    /// Short biography shown under the article.
    pub bio: String,
}

impl Author {
    /// Snapshot used by the editor when nobody is logged in.
    pub fn fallback() -> Self {
        Self {
            name: "Administrator".to_string(),
            avatar: "/images/admin-avatar.jpg".to_string(),
            bio: "Blog administrator".to_string(),
        }
    }
}

impl From<&User> for Author {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            avatar: user.avatar.clone(),
            bio: user.bio.clone(),
        }
    }
}

// 完整文章数据模型
/// A blog post, published or draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Unique id.
    pub id: String,
    /// Headline.
    pub title: String,
    /// URL segment under `/posts/`; unique among published articles.
    pub slug: String,
    /// Summary shown on cards.
    pub excerpt: String,
    /// Markdown body.
    pub content: String, // Markdown 文本
    /// Hero image path.
    pub featured_image: String,
    /// Single category name.
    pub category: String,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// Author snapshot taken at creation.
    pub author: Author,
    /// First publication time, or creation time for drafts.
    pub published_at: DateTime<Utc>,
    /// Last edit time.
    pub updated_at: DateTime<Utc>,
    /// Drafts are hidden from every public view.
    pub is_published: bool,
    /// Estimated minutes to read.
    pub read_time: u32, // 单位：分钟
    /// View counter.
    pub views: u64,
    /// Like counter.
    pub likes: u64,
}

/// A reader comment. Replies nest one level and share the shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Unique id.
    pub id: String,
    /// Soft reference; the article may no longer exist.
    pub article_id: String,
    /// Name given by the commenter.
    pub author: String,
    /// Email given by the commenter; never shown publicly.
    pub email: String,
    /// Plain-text body.
    pub content: String,
    /// Submission time.
    pub created_at: DateTime<Utc>,
    /// Only approved comments appear on article pages.
    pub is_approved: bool,
    /// Replies, oldest first.
    #[serde(default)]
    pub replies: Vec<Comment>,
}

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May use the admin pages.
    Admin,
    /// Regular account.
    User,
}

/// An account record from the users document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique id.
    pub id: String,
    /// Login name.
    pub username: String,
    /// Contact address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Account role.
    pub role: Role,
    /// Avatar image path.
    pub avatar: String,
    /// Profile text, copied into [`Author`] snapshots.
    pub bio: String,
    /// Registration time.
    pub created_at: DateTime<Utc>,
    /// Inactive accounts are kept but unused.
    pub is_active: bool,
}

/// Site colour palette as CSS colour strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    /// Main brand colour.
    pub primary_color: String,
    /// Secondary colour for muted surfaces.
    pub secondary_color: String,
    /// Highlight colour for links and buttons.
    pub accent_color: String,
}

/// Site identity shown in the header, footer and about page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteInfo {
    /// Site name.
    pub title: String,
    /// Tagline under the title.
    pub subtitle: String,
    /// About text.
    pub description: String,
    /// Owner name.
    pub author: String,
    /// Contact address.
    pub email: String,
    /// Canonical site URL.
    pub url: String,
    /// Logo image path.
    pub logo: String,
    /// Home page hero image path.
    pub hero_image: String,
    /// Colour palette.
    pub theme: Theme,
}

/// Profile links shown in the footer. Empty strings are hidden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    /// GitHub profile URL.
    pub github: String,
    /// Twitter profile URL.
    pub twitter: String,
    /// LinkedIn profile URL.
    pub linkedin: String,
}

/// One header navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    /// Link label.
    pub name: String,
    /// In-app path such as `/categories`.
    pub path: String,
}

/// Singleton site configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Identity and theme.
    pub site: SiteInfo,
    /// Footer links.
    pub social: SocialLinks,
    /// Header navigation, in display order.
    pub navigation: Vec<NavItem>,
}

/// Views for one weekday label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyViews {
    /// Label such as `Mon`.
    pub day: String,
    /// View count for that day.
    pub views: u64,
}

/// One row of the most-viewed list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopArticle {
    /// Article id at snapshot time.
    pub id: String,
    /// Article title at snapshot time.
    pub title: String,
    /// Views at snapshot time.
    pub views: u64,
}

/// Share of articles in one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStat {
    /// Category name.
    pub name: String,
    /// Article count.
    pub count: u32,
    /// Share of all articles, 0 to 100.
    pub percentage: f64,
}

/// Numbers shown on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Article count, drafts included.
    pub total_articles: u64,
    /// Published article count.
    pub published_articles: u64,
    /// Draft article count.
    pub draft_articles: u64,
    /// Views across all articles.
    pub total_views: u64,
    /// Likes across all articles.
    pub total_likes: u64,
    /// Top-level comment count.
    pub total_comments: u64,
    /// Comments awaiting moderation.
    pub pending_comments: u64,
    /// Seven daily buckets, oldest first.
    pub weekly_views: Vec<DailyViews>,
    /// Most viewed articles, best first.
    pub top_articles: Vec<TopArticle>,
    /// Category breakdown.
    pub category_stats: Vec<CategoryStat>,
}

/// Dashboard snapshot. Edited on its own and never recomputed from the
/// article or comment slices, so the numbers can drift from the real counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// The only section of the document.
    pub dashboard: DashboardStats,
}

/// Who is signed in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Signed-in user record.
    pub current_user: Option<User>,
    /// Set only by a successful admin login.
    pub is_authenticated: bool,
}

/// The whole application state.
///
/// Every slice sits behind an `Rc`: a transition clones the outer struct
/// (pointer copies) and rebuilds only the slices it touches.
#[derive(Debug, Clone, PartialEq)]
pub struct BlogState {
    /// Newest first.
    pub articles: Rc<Vec<Article>>,
    /// Top-level comments in submission order.
    pub comments: Rc<Vec<Comment>>,
    /// Account records.
    pub users: Rc<Vec<User>>,
    /// `None` until the config document loads.
    pub config: Option<Rc<SiteConfig>>,
    /// `None` until the stats document loads.
    pub stats: Option<Rc<Stats>>,
    /// Current login.
    pub session: Rc<Session>,
    /// A load is in flight.
    pub loading: bool,
    /// Last load failure shown to the reader.
    pub error: Option<String>,
}

impl Default for BlogState {
    fn default() -> Self {
        Self {
            articles: Rc::new(Vec::new()),
            comments: Rc::new(Vec::new()),
            users: Rc::new(Vec::new()),
            config: None,
            stats: None,
            session: Rc::new(Session::default()),
            loading: false,
            error: None,
        }
    }
}

impl BlogState {
    /// Signed-in user, if any.
    pub fn current_user(&self) -> Option<&User> {
        self.session.current_user.as_ref()
    }

    /// Whether the admin pages are unlocked.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated
    }
}

/// The five persisted/seeded documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// `articles.json`
    Articles,
    /// `comments.json`
    Comments,
    /// `users.json`
    Users,
    /// `config.json`
    Config,
    /// `stats.json`
    Stats,
}

impl DocumentKind {
    /// Every kind, in load order.
    pub const ALL: [DocumentKind; 5] = [
        DocumentKind::Articles,
        DocumentKind::Comments,
        DocumentKind::Users,
        DocumentKind::Config,
        DocumentKind::Stats,
    ];

    /// Lowercase name used in keys, file names and logs.
    pub fn name(self) -> &'static str {
        match self {
            DocumentKind::Articles => "articles",
            DocumentKind::Comments => "comments",
            DocumentKind::Users => "users",
            DocumentKind::Config => "config",
            DocumentKind::Stats => "stats",
        }
    }

    /// Namespaced key in the persistent store.
    pub fn storage_key(self) -> String {
        format!("blog_{}", self.name())
    }

    /// File name of the seed document, relative to the `data/` directory.
    pub fn seed_file(self) -> String {
        format!("{}.json", self.name())
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_without_replies_field_deserializes_empty() {
        let json = r#"{
            "id": "c1",
            "articleId": "1",
            "author": "Ada",
            "email": "ada@example.com",
            "content": "Nice",
            "createdAt": "2024-01-15T10:30:00Z",
            "isApproved": false
        }"#;
        let comment: Comment = serde_json::from_str(json).expect("parse comment");
        assert!(comment.replies.is_empty());
        assert_eq!(comment.article_id, "1");
        assert!(!comment.is_approved);
    }

    #[test]
    fn user_role_uses_lowercase_names() {
        let role: Role = serde_json::from_str("\"admin\"").expect("parse role");
        assert_eq!(role, Role::Admin);
        assert_eq!(serde_json::to_string(&Role::User).expect("encode role"), "\"user\"");
    }

    #[test]
    fn document_kind_keys_are_namespaced() {
        assert_eq!(DocumentKind::Articles.storage_key(), "blog_articles");
        assert_eq!(DocumentKind::Stats.seed_file(), "stats.json");
        assert_eq!(DocumentKind::Config.to_string(), "config");
    }
}
