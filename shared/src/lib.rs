//! Domain model and state container for LocalFlow.
//!
//! Shared by the Yew frontend (compiled to `wasm32`) and the native CLI and
//! seed server. Everything wasm-incompatible is behind
//! `cfg(not(target_arch = "wasm32"))`.

pub mod editor;
pub mod models;
pub mod query;
pub mod reducer;
pub mod seed;
pub mod storage;
pub mod store;

pub use models::{
    Article, Author, BlogState, CategoryStat, Comment, DailyViews, DashboardStats, DocumentKind,
    NavItem, Role, Session, SiteConfig, SiteInfo, SocialLinks, Stats, Theme, TopArticle, User,
};
pub use reducer::{reduce, AuthPayload, BlogAction};
pub use seed::{BundledSeeds, SeedError, SeedSource};
pub use storage::{MemoryBackend, PersistentStore, StorageBackend, StorageError};
pub use store::{BlogStore, SubscriptionId, LOAD_ERROR_MESSAGE};
