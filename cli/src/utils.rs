//! Markdown input parsing and listing formatters.

use anyhow::Result;
use gray_matter::{engine::YAML, Matter};
use localflow_shared::{Article, Comment};
use serde::Deserialize;

/// YAML header of an article file. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct Frontmatter {
    /// Article title.
    pub title: Option<String>,
    /// URL slug; derived from the title when absent.
    pub slug: Option<String>,
    /// Card summary.
    pub excerpt: Option<String>,
    /// Category name.
    pub category: Option<String>,
    /// Tag list.
    pub tags: Option<Vec<String>>,
    /// Hero image path.
    pub featured_image: Option<String>,
    /// Publish on write.
    pub published: Option<bool>,
}

/// Split a Markdown file into its frontmatter and body.
pub fn parse_markdown(content: &str) -> Result<(Frontmatter, String)> {
    let matter = Matter::<YAML>::new();
    let parsed = matter.parse(content);

    let frontmatter = parsed
        .data
        .map(|data| data.deserialize::<Frontmatter>())
        .transpose()?
        .unwrap_or_default();

    Ok((frontmatter, parsed.content))
}

/// One line of an article listing.
pub fn article_row(article: &Article) -> String {
    let status = if article.is_published { "" } else { " [draft]" };
    format!(
        "{:<14} {}  {}{} ({}) views={} likes={}",
        article.id,
        article.published_at.format("%Y-%m-%d"),
        article.title,
        status,
        article.category,
        article.views,
        article.likes
    )
}

/// One line of a comment listing; replies are indented under it by the
/// caller.
pub fn comment_row(comment: &Comment) -> String {
    let status = if comment.is_approved { "approved" } else { "pending" };
    format!(
        "{:<14} {} [{}] {} <{}> on {}: {}",
        comment.id,
        comment.created_at.format("%Y-%m-%d %H:%M"),
        status,
        comment.author,
        comment.email,
        comment.article_id,
        comment.content
    )
}

/// One indented reply line.
pub fn reply_row(reply: &Comment) -> String {
    format!(
        "    ↳ {} {} {}: {}",
        reply.id,
        reply.created_at.format("%m-%d %H:%M"),
        reply.author,
        reply.content
    )
}
