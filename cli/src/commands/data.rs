//! Whole-store commands: load summary, reset, stats and raw dispatch.

use std::io::Write;

use anyhow::{Context, Result};
use localflow_shared::{
    query::{ArticleTotals, CommentCounts},
    BlogAction,
};

use super::{require_admin, Store};

/// Document sizes and the current session.
pub fn summary(store: &Store, out: &mut dyn Write) -> Result<()> {
    let state = store.state();
    let totals = ArticleTotals::of(&state.articles);
    let comments = CommentCounts::of(&state.comments);
    writeln!(
        out,
        "articles: {} ({} published, {} drafts)",
        state.articles.len(),
        totals.published,
        totals.drafts
    )?;
    writeln!(out, "comments: {} ({} pending)", comments.total, comments.pending)?;
    writeln!(out, "users: {}", state.users.len())?;
    if let Some(config) = &state.config {
        writeln!(out, "site: {} - {}", config.site.title, config.site.subtitle)?;
    }
    match state.current_user() {
        Some(user) => writeln!(out, "session: {} ({})", user.username, user.name)?,
        None => writeln!(out, "session: none")?,
    }
    Ok(())
}

/// Reseed every document, keeping the login.
pub async fn reset(store: &Store, out: &mut dyn Write) -> Result<()> {
    require_admin(store)?;
    store
        .reset_data()
        .await
        .context("failed to reload seed documents")?;
    writeln!(out, "data reset to seed documents")?;
    summary(store, out)
}

/// The stored dashboard snapshot beside the counts derived from the live
/// slices. The snapshot is never rewritten from them.
pub fn stats(store: &Store, out: &mut dyn Write) -> Result<()> {
    let state = store.state();
    let totals = ArticleTotals::of(&state.articles);
    let comments = CommentCounts::of(&state.comments);

    writeln!(out, "{:<20} {:>10} {:>10}", "metric", "snapshot", "live")?;
    let live = [
        ("articles", state.articles.len() as u64),
        ("published", totals.published as u64),
        ("drafts", totals.drafts as u64),
        ("views", totals.views),
        ("likes", totals.likes),
        ("comments", comments.total as u64),
        ("pending comments", comments.pending as u64),
    ];
    let snapshot = state.stats.as_ref().map(|stats| {
        let d = &stats.dashboard;
        [
            d.total_articles,
            d.published_articles,
            d.draft_articles,
            d.total_views,
            d.total_likes,
            d.total_comments,
            d.pending_comments,
        ]
    });
    for (idx, (name, value)) in live.iter().enumerate() {
        let stored = snapshot
            .map(|values| values[idx].to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(out, "{name:<20} {stored:>10} {value:>10}")?;
    }

    if let Some(stats) = &state.stats {
        writeln!(out)?;
        writeln!(out, "weekly views:")?;
        for day in &stats.dashboard.weekly_views {
            writeln!(out, "  {:<5} {}", day.day, day.views)?;
        }
        writeln!(out, "categories:")?;
        for category in &stats.dashboard.category_stats {
            writeln!(
                out,
                "  {:<16} {:>3} {:>5.1}%",
                category.name, category.count, category.percentage
            )?;
        }
    }
    Ok(())
}

/// Apply a raw JSON action.
pub fn dispatch(store: &Store, raw: &str, out: &mut dyn Write) -> Result<()> {
    require_admin(store)?;
    let action: BlogAction = serde_json::from_str(raw).context("invalid action JSON")?;
    if action == BlogAction::Unknown {
        writeln!(out, "unknown action kind; state unchanged")?;
        return Ok(());
    }
    let kind = action.kind();
    store.dispatch(action);
    writeln!(out, "dispatched {kind}")?;
    Ok(())
}
