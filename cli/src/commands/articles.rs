//! Article commands.

use std::{fs, io::Write, path::Path};

use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;
use localflow_shared::{
    editor::{self, ArticleDraft},
    query::{self, AdminArticleQuery, ArticleFilter, ArticleSort, ArticleTotals, PublishStatus},
    Author, BlogAction,
};

use super::{require_admin, Store};
use crate::utils::{article_row, comment_row, parse_markdown, reply_row};

const RELATED_LIMIT: usize = 3;

/// Public listing, as a visitor sees it.
pub fn list(
    store: &Store,
    search: Option<String>,
    category: Option<String>,
    out: &mut dyn Write,
) -> Result<()> {
    let state = store.state();
    let rows = query::published_articles(&state.articles, &ArticleFilter {
        search,
        category,
    });
    if rows.is_empty() {
        writeln!(out, "no articles found")?;
        return Ok(());
    }
    for article in &rows {
        writeln!(out, "{}", article_row(article))?;
    }
    Ok(())
}

/// Admin table with its totals line.
pub fn admin_list(
    store: &Store,
    search: Option<String>,
    category: Option<String>,
    status: PublishStatus,
    sort: ArticleSort,
    out: &mut dyn Write,
) -> Result<()> {
    let state = store.state();
    let rows = query::admin_articles(&state.articles, &AdminArticleQuery {
        search: search.unwrap_or_default(),
        category,
        status,
        sort,
    });
    for article in &rows {
        writeln!(out, "{}", article_row(article))?;
    }
    let totals = ArticleTotals::of(&state.articles);
    writeln!(
        out,
        "{} shown | {} published, {} drafts, {} views, {} likes",
        rows.len(),
        totals.published,
        totals.drafts,
        totals.views,
        totals.likes
    )?;
    Ok(())
}

/// Categories with published counts.
pub fn categories(store: &Store, out: &mut dyn Write) -> Result<()> {
    let state = store.state();
    for (name, count) in query::category_counts(&state.articles) {
        writeln!(out, "{name:<20} {count}")?;
    }
    Ok(())
}

/// Article page: body, approved comments and related articles.
pub fn show(store: &Store, slug: &str, out: &mut dyn Write) -> Result<()> {
    let state = store.state();
    let article = query::find_published_by_slug(&state.articles, slug)
        .ok_or_else(|| anyhow!("article `{slug}` not found"))?;

    writeln!(out, "# {}", article.title)?;
    writeln!(
        out,
        "{} | {} | {} min read | {} views | {} likes",
        article.author.name,
        article.published_at.format("%Y-%m-%d"),
        article.read_time,
        article.views,
        article.likes
    )?;
    if !article.tags.is_empty() {
        writeln!(out, "tags: {}", article.tags.join(", "))?;
    }
    writeln!(out)?;
    writeln!(out, "{}", article.content)?;

    let comments = query::approved_comments_for(&state.comments, &article.id);
    writeln!(out)?;
    writeln!(out, "comments ({}):", comments.len())?;
    for comment in comments {
        writeln!(out, "{}", comment_row(comment))?;
        for reply in &comment.replies {
            writeln!(out, "{}", reply_row(reply))?;
        }
    }

    let related = query::related_articles(&state.articles, article, RELATED_LIMIT);
    if !related.is_empty() {
        writeln!(out)?;
        writeln!(out, "related:")?;
        for other in related {
            writeln!(out, "  {} ({})", other.title, other.slug)?;
        }
    }
    Ok(())
}

/// Add one like.
pub fn like(store: &Store, id: &str, out: &mut dyn Write) -> Result<()> {
    if query::find_article(&store.state().articles, id).is_none() {
        bail!("article `{id}` not found");
    }
    store.dispatch(BlogAction::LikeArticle(id.to_string()));
    let state = store.state();
    let likes = query::find_article(&state.articles, id).map_or(0, |a| a.likes);
    writeln!(out, "liked {id} ({likes} likes)")?;
    Ok(())
}

/// Flip between published and draft.
pub fn toggle_publish(store: &Store, id: &str, out: &mut dyn Write) -> Result<()> {
    require_admin(store)?;
    let state = store.state();
    let article =
        query::find_article(&state.articles, id).ok_or_else(|| anyhow!("article `{id}` not found"))?;
    let updated = editor::toggle_publish(article, Utc::now());
    let label = if updated.is_published { "published" } else { "draft" };
    store.dispatch(BlogAction::UpdateArticle(updated));
    writeln!(out, "{id} is now {label}")?;
    Ok(())
}

/// Delete an article; its comments stay.
pub fn delete(store: &Store, id: &str, out: &mut dyn Write) -> Result<()> {
    require_admin(store)?;
    if query::find_article(&store.state().articles, id).is_none() {
        bail!("article `{id}` not found");
    }
    store.dispatch(BlogAction::DeleteArticle(id.to_string()));
    writeln!(out, "deleted article {id}")?;
    Ok(())
}

/// Command-line values that win over the Markdown frontmatter.
#[derive(Debug, Default)]
pub struct WriteOverrides {
    /// Update this article instead of creating one.
    pub id: Option<String>,
    /// Overrides frontmatter `title`.
    pub title: Option<String>,
    /// Overrides frontmatter `slug`.
    pub slug: Option<String>,
    /// Overrides frontmatter `excerpt`.
    pub excerpt: Option<String>,
    /// Overrides frontmatter `category`.
    pub category: Option<String>,
    /// Comma-separated.
    pub tags: Option<String>,
    /// Overrides frontmatter `featured_image`.
    pub featured_image: Option<String>,
    /// Force publishing.
    pub publish: bool,
}

/// Create or update an article from a Markdown file.
pub fn write(
    store: &Store,
    file: &Path,
    overrides: WriteOverrides,
    out: &mut dyn Write,
) -> Result<()> {
    let user = require_admin(store)?;
    let content = fs::read_to_string(file)
        .with_context(|| format!("failed to read markdown file: {}", file.display()))?;
    let (frontmatter, body) = parse_markdown(&content)?;

    let state = store.state();
    let existing = match &overrides.id {
        Some(id) => Some(
            query::find_article(&state.articles, id)
                .ok_or_else(|| anyhow!("article `{id}` not found"))?,
        ),
        None => None,
    };

    let mut draft = existing.map(ArticleDraft::from_article).unwrap_or_default();
    if let Some(slug) = overrides.slug.or(frontmatter.slug) {
        draft.slug = slug;
    }
    if let Some(title) = overrides.title.or(frontmatter.title) {
        draft.set_title(&title);
    }
    if let Some(excerpt) = overrides.excerpt.or(frontmatter.excerpt) {
        draft.excerpt = excerpt;
    }
    if let Some(category) = overrides.category.or(frontmatter.category) {
        draft.category = category;
    }
    if let Some(tags) = overrides.tags.as_deref().map(editor::parse_tags).or(frontmatter.tags) {
        draft.tags = tags;
    }
    if let Some(image) = overrides.featured_image.or(frontmatter.featured_image) {
        draft.featured_image = image;
    }
    if overrides.publish {
        draft.is_published = true;
    } else if let Some(published) = frontmatter.published {
        draft.is_published = published;
    }
    draft.content = body.trim().to_string();

    let now = Utc::now();
    let article = draft.into_article(
        existing,
        Author::from(&user),
        editor::timestamp_id(now),
        now,
    )?;
    let (id, slug) = (article.id.clone(), article.slug.clone());
    let action = if existing.is_some() {
        BlogAction::UpdateArticle(article)
    } else {
        BlogAction::AddArticle(article)
    };
    store.dispatch(action);

    let verb = if existing.is_some() { "updated" } else { "created" };
    writeln!(out, "{verb} article {id} ({slug})")?;
    Ok(())
}
