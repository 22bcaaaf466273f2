//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use localflow_shared::query::{ArticleSort, ModerationStatus, PublishStatus};

/// Top-level arguments.
#[derive(Parser)]
#[command(name = "lf-cli", version, about = "LocalFlow blog console")]
pub struct Cli {
    /// Directory holding the persisted blog documents and session.
    #[arg(long, global = true, env = "LOCALFLOW_STORE_DIR", default_value = "./.localflow")]
    pub store_dir: PathBuf,
    /// Read seed documents from this directory instead of the bundled ones.
    #[arg(long, global = true, env = "LOCALFLOW_SEED_DIR", conflicts_with = "seed_url")]
    pub seed_dir: Option<PathBuf>,
    /// Fetch seed documents from a running seed server (`<url>/data/*.json`).
    #[arg(long, global = true, env = "LOCALFLOW_SEED_URL")]
    pub seed_url: Option<String>,
    /// What to do.
    #[command(subcommand)]
    pub command: Commands,
}

/// `--status` of the admin article table.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    /// Every article.
    All,
    /// Published only.
    Published,
    /// Drafts only.
    Draft,
}

impl From<StatusArg> for PublishStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::All => PublishStatus::All,
            StatusArg::Published => PublishStatus::Published,
            StatusArg::Draft => PublishStatus::Draft,
        }
    }
}

/// `--sort` of the admin article table.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    /// Newest first.
    Date,
    /// Alphabetical.
    Title,
    /// Most viewed first.
    Views,
    /// Most liked first.
    Likes,
}

impl From<SortArg> for ArticleSort {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Date => ArticleSort::PublishedAt,
            SortArg::Title => ArticleSort::Title,
            SortArg::Views => ArticleSort::Views,
            SortArg::Likes => ArticleSort::Likes,
        }
    }
}

/// `--status` of the moderation queue.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModerationArg {
    /// Every comment.
    All,
    /// Approved only.
    Approved,
    /// Awaiting moderation.
    Pending,
}

impl From<ModerationArg> for ModerationStatus {
    fn from(value: ModerationArg) -> Self {
        match value {
            ModerationArg::All => ModerationStatus::All,
            ModerationArg::Approved => ModerationStatus::Approved,
            ModerationArg::Pending => ModerationStatus::Pending,
        }
    }
}

/// Subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Load persisted data, seeding any missing document, and print a summary.
    Load,
    /// Drop persisted documents (login is kept) and reload the seeds.
    Reset,
    /// Log in as the administrator.
    Login {
        /// Account name.
        #[arg(long, default_value = "admin")]
        username: String,
        /// Account password.
        #[arg(long)]
        password: String,
    },
    /// Forget the persisted login.
    Logout,
    /// Show the logged-in user.
    Whoami,
    /// List articles. Without `--admin` only published ones, as visitors see them.
    Articles {
        /// Match title or excerpt (and tags in the public list).
        #[arg(long)]
        search: Option<String>,
        /// Exact category name.
        #[arg(long)]
        category: Option<String>,
        /// Admin table view: drafts included, status filter and sorting.
        #[arg(long)]
        admin: bool,
        /// Publication filter (admin view only).
        #[arg(long, value_enum, default_value_t = StatusArg::All)]
        status: StatusArg,
        /// Row order (admin view only).
        #[arg(long, value_enum, default_value_t = SortArg::Date)]
        sort: SortArg,
    },
    /// List categories with their published article counts.
    Categories,
    /// Show a published article by slug, with comments and related articles.
    Show {
        /// Article slug.
        slug: String,
    },
    /// Like an article.
    Like {
        /// Article id.
        id: String,
    },
    /// Toggle an article between published and draft.
    Publish {
        /// Article id.
        id: String,
    },
    /// Delete an article. Its comments are kept.
    DeleteArticle {
        /// Article id.
        id: String,
    },
    /// Create or update an article from a Markdown file with YAML frontmatter.
    WriteArticle {
        /// Markdown file path.
        #[arg(long)]
        file: PathBuf,
        /// Existing article id to update; a new id is generated otherwise.
        #[arg(long)]
        id: Option<String>,
        /// Overrides frontmatter `title`.
        #[arg(long)]
        title: Option<String>,
        /// Overrides frontmatter `slug`.
        #[arg(long)]
        slug: Option<String>,
        /// Overrides frontmatter `excerpt`.
        #[arg(long)]
        excerpt: Option<String>,
        /// Overrides frontmatter `category`.
        #[arg(long)]
        category: Option<String>,
        /// Comma-separated tags; overrides frontmatter `tags`.
        #[arg(long)]
        tags: Option<String>,
        /// Overrides frontmatter `featured_image`.
        #[arg(long)]
        featured_image: Option<String>,
        /// Publish immediately (frontmatter `published` otherwise).
        #[arg(long)]
        publish: bool,
    },
    /// Moderation queue.
    Comments {
        /// Match content or author.
        #[arg(long)]
        search: Option<String>,
        /// Approval filter.
        #[arg(long, value_enum, default_value_t = ModerationArg::All)]
        status: ModerationArg,
    },
    /// Post a comment on an article.
    Comment {
        /// Published article id.
        article_id: String,
        /// Commenter name.
        #[arg(long)]
        author: String,
        /// Commenter email.
        #[arg(long)]
        email: String,
        /// Comment text.
        #[arg(long)]
        content: String,
    },
    /// Reply to a comment.
    Reply {
        /// Top-level comment id.
        comment_id: String,
        /// Reply text.
        #[arg(long)]
        content: String,
    },
    /// Approve a comment.
    Approve {
        /// Comment id.
        id: String,
    },
    /// Hide a comment.
    Reject {
        /// Comment id.
        id: String,
    },
    /// Delete a comment and its replies.
    DeleteComment {
        /// Comment id.
        id: String,
    },
    /// Read or edit site settings.
    Config {
        /// Read or write.
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Dashboard snapshot next to the live counts.
    Stats,
    /// Dispatch a raw JSON action, e.g. `{"type":"LIKE_ARTICLE","payload":"1"}`.
    Dispatch {
        /// Action JSON.
        action: String,
    },
}

/// `config` subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one setting, or all of them.
    Get {
        /// Setting key; omit to list everything.
        key: Option<String>,
    },
    /// Change one setting (`site.title`, `theme.primaryColor`, `social.github`, ...).
    Set {
        /// Setting key.
        key: String,
        /// New value.
        value: String,
    },
}
