//! Comment commands.

use std::io::Write;

use anyhow::{anyhow, bail, Result};
use chrono::Utc;
use localflow_shared::{
    editor::{self, CommentDraft},
    query::{self, CommentCounts, CommentQuery, ModerationStatus},
    BlogAction,
};

use super::{require_admin, Store};
use crate::utils::{comment_row, reply_row};

/// Moderation queue with its totals line.
pub fn list(
    store: &Store,
    search: Option<String>,
    status: ModerationStatus,
    out: &mut dyn Write,
) -> Result<()> {
    let state = store.state();
    let rows = query::admin_comments(&state.comments, &CommentQuery {
        search: search.unwrap_or_default(),
        status,
    });
    for comment in &rows {
        writeln!(out, "{}", comment_row(comment))?;
        for reply in &comment.replies {
            writeln!(out, "{}", reply_row(reply))?;
        }
    }
    let counts = CommentCounts::of(&state.comments);
    writeln!(
        out,
        "{} shown | {} total, {} approved, {} pending",
        rows.len(),
        counts.total,
        counts.approved,
        counts.pending
    )?;
    Ok(())
}

/// New comment on a published article.
pub fn post(
    store: &Store,
    article_id: &str,
    author: String,
    email: String,
    content: String,
    out: &mut dyn Write,
) -> Result<()> {
    let state = store.state();
    match query::find_article(&state.articles, article_id) {
        Some(article) if article.is_published => {},
        _ => bail!("article `{article_id}` not found"),
    }
    let now = Utc::now();
    let comment = CommentDraft {
        author,
        email,
        content,
    }
    .into_comment(editor::timestamp_id(now), article_id, now)?;
    let id = comment.id.clone();
    store.dispatch(BlogAction::AddComment(comment));
    writeln!(out, "posted comment {id}")?;
    Ok(())
}

/// Append an anonymous reply to a comment.
pub fn reply(store: &Store, comment_id: &str, content: &str, out: &mut dyn Write) -> Result<()> {
    let state = store.state();
    let parent = state
        .comments
        .iter()
        .find(|c| c.id == comment_id)
        .ok_or_else(|| anyhow!("comment `{comment_id}` not found"))?;
    let now = Utc::now();
    let updated = editor::reply_to(parent, content, editor::timestamp_id(now), now)?;
    store.dispatch(BlogAction::UpdateComment(updated));
    writeln!(out, "replied to {comment_id}")?;
    Ok(())
}

/// Approve or hide a comment.
pub fn moderate(store: &Store, id: &str, approved: bool, out: &mut dyn Write) -> Result<()> {
    require_admin(store)?;
    let state = store.state();
    let comment = state
        .comments
        .iter()
        .find(|c| c.id == id)
        .ok_or_else(|| anyhow!("comment `{id}` not found"))?;
    store.dispatch(BlogAction::UpdateComment(editor::set_approval(comment, approved)));
    let label = if approved { "approved" } else { "rejected" };
    writeln!(out, "{label} comment {id}")?;
    Ok(())
}

/// Delete a comment with its replies.
pub fn delete(store: &Store, id: &str, out: &mut dyn Write) -> Result<()> {
    require_admin(store)?;
    if !store.state().comments.iter().any(|c| c.id == id) {
        bail!("comment `{id}` not found");
    }
    store.dispatch(BlogAction::DeleteComment(id.to_string()));
    writeln!(out, "deleted comment {id}")?;
    Ok(())
}
