//! Read-only selectors over the state slices, shared by the public pages,
//! the admin console and the CLI.

use std::cmp::Reverse;

use crate::models::{Article, Comment};

/// Case-insensitive substring match. An empty needle matches everything.
fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    needle_lower.is_empty() || haystack.to_lowercase().contains(needle_lower)
}

fn newest_first(articles: &mut [Article]) {
    articles.sort_by_key(|a| Reverse(a.published_at));
}

/// Filter for the public article list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    /// Case-insensitive needle; blank matches everything.
    pub search: Option<String>,
    /// Exact category name.
    pub category: Option<String>,
}

/// Published articles matching `filter`, newest first. The search looks at
/// title, excerpt and tags.
pub fn published_articles(articles: &[Article], filter: &ArticleFilter) -> Vec<Article> {
    let needle = filter
        .search
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_lowercase();
    let category = filter.category.as_deref().filter(|c| !c.is_empty());

    let mut matched: Vec<Article> = articles
        .iter()
        .filter(|a| a.is_published)
        .filter(|a| {
            contains_ci(&a.title, &needle)
                || contains_ci(&a.excerpt, &needle)
                || a.tags.iter().any(|tag| contains_ci(tag, &needle))
        })
        .filter(|a| category.map_or(true, |c| a.category == c))
        .cloned()
        .collect();
    newest_first(&mut matched);
    matched
}

/// Distinct categories in first-seen order, drafts included.
pub fn categories(articles: &[Article]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for article in articles {
        if !seen.iter().any(|c| *c == article.category) {
            seen.push(article.category.clone());
        }
    }
    seen
}

/// Published article count per category, in first-seen order.
pub fn category_counts(articles: &[Article]) -> Vec<(String, usize)> {
    categories(articles)
        .into_iter()
        .map(|name| {
            let count = articles
                .iter()
                .filter(|a| a.is_published && a.category == name)
                .count();
            (name, count)
        })
        .collect()
}

/// Any article by id, drafts included.
pub fn find_article<'a>(articles: &'a [Article], id: &str) -> Option<&'a Article> {
    articles.iter().find(|a| a.id == id)
}

/// Article page lookup. Drafts are not reachable by slug.
pub fn find_published_by_slug<'a>(articles: &'a [Article], slug: &str) -> Option<&'a Article> {
    articles.iter().find(|a| a.slug == slug && a.is_published)
}

/// Other published articles sharing the category or a tag, in list order.
pub fn related_articles<'a>(
    articles: &'a [Article],
    article: &Article,
    limit: usize,
) -> Vec<&'a Article> {
    articles
        .iter()
        .filter(|a| a.id != article.id && a.is_published)
        .filter(|a| a.category == article.category || a.tags.iter().any(|t| article.tags.contains(t)))
        .take(limit)
        .collect()
}

/// Published articles with the most views.
pub fn popular_articles(articles: &[Article], limit: usize) -> Vec<&Article> {
    let mut published: Vec<&Article> = articles.iter().filter(|a| a.is_published).collect();
    published.sort_by_key(|a| Reverse(a.views));
    published.truncate(limit);
    published
}

/// Latest articles for the dashboard, drafts included.
pub fn recent_articles(articles: &[Article], limit: usize) -> Vec<Article> {
    let mut all = articles.to_vec();
    newest_first(&mut all);
    all.truncate(limit);
    all
}

/// Comments shown under an article, in submission order.
pub fn approved_comments_for<'a>(comments: &'a [Comment], article_id: &str) -> Vec<&'a Comment> {
    comments
        .iter()
        .filter(|c| c.article_id == article_id && c.is_approved)
        .collect()
}

/// Comments awaiting moderation.
pub fn pending_comments(comments: &[Comment]) -> Vec<&Comment> {
    comments.iter().filter(|c| !c.is_approved).collect()
}

/// Status filter of the admin article table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PublishStatus {
    /// No filtering.
    #[default]
    All,
    /// Published only.
    Published,
    /// Drafts only.
    Draft,
}

impl PublishStatus {
    fn matches(self, article: &Article) -> bool {
        match self {
            PublishStatus::All => true,
            PublishStatus::Published => article.is_published,
            PublishStatus::Draft => !article.is_published,
        }
    }
}

/// Ordering of the admin article table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArticleSort {
    /// Newest first.
    #[default]
    PublishedAt,
    /// Alphabetical.
    Title,
    /// Most viewed first.
    Views,
    /// Most liked first.
    Likes,
}

/// Filters of the admin article table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminArticleQuery {
    /// Matched against title and excerpt.
    pub search: String,
    /// Exact category name.
    pub category: Option<String>,
    /// Published/draft filter.
    pub status: PublishStatus,
    /// Row order.
    pub sort: ArticleSort,
}

/// Admin table rows: search over title and excerpt, then status/category
/// filters and the chosen ordering.
pub fn admin_articles(articles: &[Article], query: &AdminArticleQuery) -> Vec<Article> {
    let needle = query.search.trim().to_lowercase();
    let category = query.category.as_deref().filter(|c| !c.is_empty());
    let mut rows: Vec<Article> = articles
        .iter()
        .filter(|a| contains_ci(&a.title, &needle) || contains_ci(&a.excerpt, &needle))
        .filter(|a| category.map_or(true, |c| a.category == c))
        .filter(|a| query.status.matches(a))
        .cloned()
        .collect();
    match query.sort {
        ArticleSort::PublishedAt => newest_first(&mut rows),
        ArticleSort::Title => rows.sort_by(|a, b| a.title.cmp(&b.title)),
        ArticleSort::Views => rows.sort_by_key(|a| Reverse(a.views)),
        ArticleSort::Likes => rows.sort_by_key(|a| Reverse(a.likes)),
    }
    rows
}

/// Summary row under the admin article table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArticleTotals {
    /// Published article count.
    pub published: usize,
    /// Draft count.
    pub drafts: usize,
    /// Views summed over every article.
    pub views: u64,
    /// Likes summed over every article.
    pub likes: u64,
}

impl ArticleTotals {
    /// Totals over the whole slice, ignoring table filters.
    pub fn of(articles: &[Article]) -> Self {
        articles.iter().fold(Self::default(), |mut acc, a| {
            if a.is_published {
                acc.published += 1;
            } else {
                acc.drafts += 1;
            }
            acc.views += a.views;
            acc.likes += a.likes;
            acc
        })
    }
}

/// Status filter of the moderation queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModerationStatus {
    /// No filtering.
    #[default]
    All,
    /// Approved only.
    Approved,
    /// Pending only.
    Pending,
}

/// Filters of the moderation queue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentQuery {
    /// Matched against content and author.
    pub search: String,
    /// Approval filter.
    pub status: ModerationStatus,
}

/// Moderation queue: search over content and author, newest first.
pub fn admin_comments(comments: &[Comment], query: &CommentQuery) -> Vec<Comment> {
    let needle = query.search.trim().to_lowercase();
    let mut rows: Vec<Comment> = comments
        .iter()
        .filter(|c| contains_ci(&c.content, &needle) || contains_ci(&c.author, &needle))
        .filter(|c| match query.status {
            ModerationStatus::All => true,
            ModerationStatus::Approved => c.is_approved,
            ModerationStatus::Pending => !c.is_approved,
        })
        .cloned()
        .collect();
    rows.sort_by_key(|c| Reverse(c.created_at));
    rows
}

/// Summary row under the moderation queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommentCounts {
    /// Top-level comments.
    pub total: usize,
    /// Approved comments.
    pub approved: usize,
    /// Comments awaiting moderation.
    pub pending: usize,
}

impl CommentCounts {
    /// Top-level comments only; replies are not moderated separately.
    pub fn of(comments: &[Comment]) -> Self {
        let approved = comments.iter().filter(|c| c.is_approved).count();
        Self {
            total: comments.len(),
            approved,
            pending: comments.len() - approved,
        }
    }
}
