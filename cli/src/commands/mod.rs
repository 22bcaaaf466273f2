//! Command implementations. Each writes its report to the given output.

pub mod articles;
pub mod comments;
pub mod data;
pub mod session;
pub mod settings;

use std::io::Write;

use anyhow::{bail, Context, Result};
use localflow_shared::{storage::FileBackend, BlogStore, User};

use crate::{
    cli::{Cli, Commands},
    seeds::SeedChoice,
};

/// The store every command works against.
pub type Store = BlogStore<FileBackend, SeedChoice>;

/// Run one command, writing its report to stdout.
pub async fn run(cli: Cli) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with_output(cli, &mut out).await
}

/// Run one command, writing its report to `out`.
pub async fn run_with_output(cli: Cli, out: &mut dyn Write) -> Result<()> {
    let seeds = SeedChoice::from_args(cli.seed_dir, cli.seed_url.as_deref())?;
    tracing::debug!(store_dir = %cli.store_dir.display(), "opening store");
    let store = BlogStore::new(FileBackend::new(&cli.store_dir), seeds);

    // reset clears the documents before loading, so it must not load first
    if let Commands::Reset = cli.command {
        return data::reset(&store, out).await;
    }
    store
        .load()
        .await
        .context("failed to load blog data")?;

    match cli.command {
        Commands::Load => data::summary(&store, out),
        Commands::Reset => Ok(()),
        Commands::Login {
            username,
            password,
        } => session::login(&store, &username, &password, out),
        Commands::Logout => session::logout(&store, out),
        Commands::Whoami => session::whoami(&store, out),
        Commands::Articles {
            search,
            category,
            admin,
            status,
            sort,
        } => {
            if admin {
                require_admin(&store)?;
                articles::admin_list(&store, search, category, status.into(), sort.into(), out)
            } else {
                articles::list(&store, search, category, out)
            }
        },
        Commands::Categories => articles::categories(&store, out),
        Commands::Show {
            slug,
        } => articles::show(&store, &slug, out),
        Commands::Like {
            id,
        } => articles::like(&store, &id, out),
        Commands::Publish {
            id,
        } => articles::toggle_publish(&store, &id, out),
        Commands::DeleteArticle {
            id,
        } => articles::delete(&store, &id, out),
        Commands::WriteArticle {
            file,
            id,
            title,
            slug,
            excerpt,
            category,
            tags,
            featured_image,
            publish,
        } => articles::write(
            &store,
            &file,
            articles::WriteOverrides {
                id,
                title,
                slug,
                excerpt,
                category,
                tags,
                featured_image,
                publish,
            },
            out,
        ),
        Commands::Comments {
            search,
            status,
        } => {
            require_admin(&store)?;
            comments::list(&store, search, status.into(), out)
        },
        Commands::Comment {
            article_id,
            author,
            email,
            content,
        } => comments::post(&store, &article_id, author, email, content, out),
        Commands::Reply {
            comment_id,
            content,
        } => comments::reply(&store, &comment_id, &content, out),
        Commands::Approve {
            id,
        } => comments::moderate(&store, &id, true, out),
        Commands::Reject {
            id,
        } => comments::moderate(&store, &id, false, out),
        Commands::DeleteComment {
            id,
        } => comments::delete(&store, &id, out),
        Commands::Config {
            action,
        } => settings::run(&store, action, out),
        Commands::Stats => data::stats(&store, out),
        Commands::Dispatch {
            action,
        } => data::dispatch(&store, &action, out),
    }
}

/// The logged-in administrator. Mirrors the console's route guard; it is a
/// convenience check, not a security boundary.
pub(crate) fn require_admin(store: &Store) -> Result<User> {
    let state = store.state();
    match state.current_user() {
        Some(user) if state.is_authenticated() => Ok(user.clone()),
        _ => bail!("not logged in; run `lf-cli login --password <password>` first"),
    }
}
