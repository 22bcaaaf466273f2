//! The store controller: owns the state, runs every action through the
//! reducer and mirrors the affected slice into the persistent store.
//!
//! Single-threaded by construction. State lives in a `RefCell` and no
//! borrow is ever held across an `.await`, so a consumer may dispatch while
//! a `load()` is still waiting on seed documents.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use serde::de::DeserializeOwned;

use crate::{
    models::{Article, BlogState, Comment, DocumentKind, SiteConfig, Stats, User},
    reducer::{reduce, BlogAction},
    seed::{fetch_document, SeedError, SeedSource},
    storage::{PersistentStore, StorageBackend},
};

/// User-facing message shown when bootstrap fails.
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load blog data";

/// The only account that can log in.
pub const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "admin123";

/// Handle returned by [`BlogStore::subscribe`].
pub type SubscriptionId = u64;

type Listener = Rc<dyn Fn(&Rc<BlogState>)>;

struct LoadedDocuments {
    articles: Vec<Article>,
    comments: Vec<Comment>,
    users: Vec<User>,
    config: SiteConfig,
    stats: Stats,
}

/// Owns the [`BlogState`] of one application instance.
///
/// `B` is where slices are mirrored, `S` is where missing documents are
/// fetched from. Instances are independent: two stores over separate
/// backends never see each other's changes.
pub struct BlogStore<B, S> {
    state: RefCell<Rc<BlogState>>,
    persistence: PersistentStore<B>,
    seeds: S,
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
    next_subscription: Cell<SubscriptionId>,
}

impl<B: StorageBackend, S: SeedSource> BlogStore<B, S> {
    /// Build an isolated store and restore any persisted login.
    pub fn new(backend: B, seeds: S) -> Self {
        let store = Self {
            state: RefCell::new(Rc::new(BlogState::default())),
            persistence: PersistentStore::new(backend),
            seeds,
            listeners: RefCell::new(Vec::new()),
            next_subscription: Cell::new(0),
        };
        store.restore_session();
        store
    }

    /// Current state snapshot.
    pub fn state(&self) -> Rc<BlogState> {
        Rc::clone(&self.state.borrow())
    }

    /// The typed storage view the store mirrors into.
    pub fn persistence(&self) -> &PersistentStore<B> {
        &self.persistence
    }

    /// Reduce `action`, persist the slice it touched and notify listeners.
    pub fn dispatch(&self, action: BlogAction) {
        let persisted = action.persisted_kind();
        tracing::trace!(action = action.kind(), "dispatch");
        let next = {
            let current = self.state.borrow();
            Rc::new(reduce(&current, action))
        };
        *self.state.borrow_mut() = Rc::clone(&next);

        if let Some(kind) = persisted {
            self.replicate(kind, &next);
        }
        self.notify(&next);
    }

    /// Register a listener called with every new state. Listeners may
    /// dispatch; they run after the state has been swapped.
    pub fn subscribe(&self, listener: impl Fn(&Rc<BlogState>) + 'static) -> SubscriptionId {
        let id = self.next_subscription.get();
        self.next_subscription.set(id + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Remove a listener. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners
            .borrow_mut()
            .retain(|(existing, _)| *existing != id);
    }

    /// Re-apply a persisted login, if any. Returns whether one was found.
    pub fn restore_session(&self) -> bool {
        match self.persistence.read_session() {
            Some(user) => {
                tracing::info!(username = %user.username, "restored persisted session");
                self.dispatch(BlogAction::set_auth(Some(user), true));
                true
            },
            None => false,
        }
    }

    /// Fill every slice from the persistent store, fetching seed documents
    /// for the ones that were never persisted.
    ///
    /// The state ends with `loading == false` either way; on failure it
    /// carries [`LOAD_ERROR_MESSAGE`] and no slice is replaced. The error is
    /// also returned so native callers can report the cause.
    pub async fn load(&self) -> Result<(), SeedError> {
        self.dispatch(BlogAction::SetError(None));
        self.dispatch(BlogAction::SetLoading(true));

        let outcome = match self.resolve_all().await {
            Ok(docs) => {
                tracing::info!(
                    articles = docs.articles.len(),
                    comments = docs.comments.len(),
                    users = docs.users.len(),
                    "blog data loaded"
                );
                self.dispatch(BlogAction::SetArticles(docs.articles));
                self.dispatch(BlogAction::SetComments(docs.comments));
                self.dispatch(BlogAction::SetUsers(docs.users));
                self.dispatch(BlogAction::SetConfig(docs.config));
                self.dispatch(BlogAction::SetStats(docs.stats));
                Ok(())
            },
            Err(err) => {
                tracing::warn!("failed to load blog data: {err}");
                self.dispatch(BlogAction::SetError(Some(LOAD_ERROR_MESSAGE.to_string())));
                Err(err)
            },
        };

        self.dispatch(BlogAction::SetLoading(false));
        outcome
    }

    /// Accepts only the built-in administrator credentials, and only when an
    /// `admin` user record is loaded.
    pub fn login(&self, username: &str, password: &str) -> bool {
        if username != ADMIN_USERNAME || password != ADMIN_PASSWORD {
            tracing::info!(username, "login rejected");
            return false;
        }
        let admin = self
            .state
            .borrow()
            .users
            .iter()
            .find(|user| user.username == ADMIN_USERNAME)
            .cloned();
        let Some(admin) = admin else {
            tracing::warn!("login rejected: no `{ADMIN_USERNAME}` user record loaded");
            return false;
        };

        self.dispatch(BlogAction::set_auth(Some(admin.clone()), true));
        self.persistence.write_session(&admin);
        tracing::info!(username, "logged in");
        true
    }

    /// Clear the session in state and in storage.
    pub fn logout(&self) {
        self.dispatch(BlogAction::set_auth(None, false));
        self.persistence.clear_session();
        tracing::info!("logged out");
    }

    /// Drop every persisted document (the session survives) and load again
    /// from the seeds.
    pub async fn reset_data(&self) -> Result<(), SeedError> {
        for kind in DocumentKind::ALL {
            self.persistence.clear(kind);
        }
        tracing::info!("persisted blog data cleared, reloading seeds");
        self.load().await
    }

    async fn resolve_all(&self) -> Result<LoadedDocuments, SeedError> {
        // join, not try_join: every request that started is awaited
        let (articles, comments, users, config, stats) = futures::join!(
            self.resolve::<Vec<Article>>(DocumentKind::Articles),
            self.resolve::<Vec<Comment>>(DocumentKind::Comments),
            self.resolve::<Vec<User>>(DocumentKind::Users),
            self.resolve::<SiteConfig>(DocumentKind::Config),
            self.resolve::<Stats>(DocumentKind::Stats),
        );
        Ok(LoadedDocuments {
            articles: articles?,
            comments: comments?,
            users: users?,
            config: config?,
            stats: stats?,
        })
    }

    async fn resolve<T: DeserializeOwned>(&self, kind: DocumentKind) -> Result<T, SeedError> {
        if let Some(value) = self.persistence.read(kind) {
            tracing::debug!(%kind, "using persisted copy");
            return Ok(value);
        }
        tracing::debug!(%kind, "no persisted copy, fetching seed");
        fetch_document(&self.seeds, kind).await
    }

    fn replicate(&self, kind: DocumentKind, state: &BlogState) {
        match kind {
            DocumentKind::Articles => {
                self.persistence.write(kind, state.articles.as_slice());
            },
            DocumentKind::Comments => {
                self.persistence.write(kind, state.comments.as_slice());
            },
            DocumentKind::Users => {
                self.persistence.write(kind, state.users.as_slice());
            },
            DocumentKind::Config => {
                if let Some(config) = &state.config {
                    self.persistence.write(kind, config.as_ref());
                }
            },
            DocumentKind::Stats => {
                if let Some(stats) = &state.stats {
                    self.persistence.write(kind, stats.as_ref());
                }
            },
        }
    }

    fn notify(&self, state: &Rc<BlogState>) {
        // snapshot so listeners can (un)subscribe or dispatch
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::{
        reducer::tests::{sample_article, sample_user},
        seed::BundledSeeds,
        storage::{MemoryBackend, SESSION_FLAG_KEY, SESSION_USER_KEY},
    };

    /// Bundled seeds that record every request and can fail one kind.
    #[derive(Default)]
    struct RecordingSeeds {
        fail: Option<DocumentKind>,
        fetched: RefCell<Vec<DocumentKind>>,
    }

    impl RecordingSeeds {
        fn failing(kind: DocumentKind) -> Self {
            Self {
                fail: Some(kind),
                ..Self::default()
            }
        }

        fn fetched(&self) -> Vec<DocumentKind> {
            self.fetched.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl SeedSource for RecordingSeeds {
        async fn fetch(&self, kind: DocumentKind) -> Result<String, SeedError> {
            self.fetched.borrow_mut().push(kind);
            if self.fail == Some(kind) {
                return Err(SeedError::Status {
                    kind,
                    status: 404,
                });
            }
            BundledSeeds.fetch(kind).await
        }
    }

    fn seeded_articles() -> Vec<Article> {
        serde_json::from_str(BundledSeeds::text(DocumentKind::Articles)).expect("seed articles")
    }

    fn store_with(
        backend: &MemoryBackend,
        seeds: RecordingSeeds,
    ) -> BlogStore<MemoryBackend, Rc<RecordingSeeds>> {
        BlogStore::new(backend.clone(), Rc::new(seeds))
    }

    #[tokio::test]
    async fn first_load_fetches_and_persists_every_document_once() {
        let backend = MemoryBackend::new();
        let seeds = Rc::new(RecordingSeeds::default());
        let store = BlogStore::new(backend.clone(), Rc::clone(&seeds));

        store.load().await.expect("load seeds");

        assert_eq!(seeds.fetched().len(), 5);
        for kind in DocumentKind::ALL {
            assert_eq!(backend.writes_to(&kind.storage_key()), 1, "{kind}");
        }
        let state = store.state();
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(*state.articles, seeded_articles());
        assert!(state.config.is_some());
        assert!(state.stats.is_some());
    }

    #[tokio::test]
    async fn persisted_documents_win_over_seeds() {
        let backend = MemoryBackend::new();
        let first = store_with(&backend, RecordingSeeds::default());
        first.load().await.expect("initial load");
        first.dispatch(BlogAction::AddArticle(sample_article("local")));

        let seeds = Rc::new(RecordingSeeds::default());
        let second = BlogStore::new(backend.clone(), Rc::clone(&seeds));
        second.load().await.expect("reload");

        assert!(seeds.fetched().is_empty());
        assert_eq!(second.state().articles[0].id, "local");
    }

    #[tokio::test]
    async fn corrupt_persisted_document_is_refetched() {
        let backend = MemoryBackend::new();
        backend
            .set_item("blog_comments", "not json")
            .expect("raw write");
        let seeds = Rc::new(RecordingSeeds::default());
        let store = BlogStore::new(backend.clone(), Rc::clone(&seeds));
        store.load().await.expect("load");
        assert!(seeds.fetched().contains(&DocumentKind::Comments));
        assert!(backend
            .raw("blog_comments")
            .is_some_and(|text| text.starts_with('[')));
    }

    #[tokio::test]
    async fn failed_seed_sets_error_and_clears_loading() {
        let backend = MemoryBackend::new();
        let seeds = Rc::new(RecordingSeeds::failing(DocumentKind::Stats));
        let store = BlogStore::new(backend.clone(), Rc::clone(&seeds));

        let err = store.load().await.expect_err("stats seed fails");
        assert_eq!(err.kind(), DocumentKind::Stats);

        // every request still ran to completion
        assert_eq!(seeds.fetched().len(), 5);
        let state = store.state();
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some(LOAD_ERROR_MESSAGE));
        assert!(state.articles.is_empty());
        assert!(backend.keys().is_empty());
    }

    #[tokio::test]
    async fn successful_retry_clears_previous_error() {
        let backend = MemoryBackend::new();
        let broken = store_with(&backend, RecordingSeeds::failing(DocumentKind::Users));
        broken.load().await.expect_err("users seed fails");
        assert!(broken.state().error.is_some());

        let store = store_with(&backend, RecordingSeeds::default());
        store.dispatch(BlogAction::SetError(Some("stale".to_string())));
        store.load().await.expect("retry");
        assert!(store.state().error.is_none());
    }

    #[tokio::test]
    async fn loading_flag_is_visible_to_subscribers() {
        let store = store_with(&MemoryBackend::new(), RecordingSeeds::default());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = store.subscribe(move |state| sink.borrow_mut().push(state.loading));

        store.load().await.expect("load");
        let flags = seen.borrow().clone();
        assert_eq!(flags.first(), Some(&false)); // SET_ERROR(null)
        assert!(flags.contains(&true));
        assert_eq!(flags.last(), Some(&false));

        store.unsubscribe(id);
        store.dispatch(BlogAction::SetLoading(true));
        assert_eq!(seen.borrow().len(), flags.len());
    }

    #[tokio::test]
    async fn add_then_like_is_persisted() {
        let backend = MemoryBackend::new();
        let store = store_with(&backend, RecordingSeeds::default());
        store.dispatch(BlogAction::AddArticle(Article {
            title: "Hello".to_string(),
            likes: 0,
            ..sample_article("1")
        }));
        store.dispatch(BlogAction::LikeArticle("1".to_string()));

        assert_eq!(store.state().articles[0].likes, 1);
        let persisted: Vec<Article> = store
            .persistence()
            .read(DocumentKind::Articles)
            .expect("persisted articles");
        assert_eq!(persisted[0].likes, 1);
    }

    #[tokio::test]
    async fn write_failures_leave_memory_authoritative() {
        let backend = MemoryBackend::with_quota(16);
        let store = store_with(&backend, RecordingSeeds::default());
        store.dispatch(BlogAction::AddArticle(sample_article("1")));
        assert_eq!(store.state().articles.len(), 1);
        assert!(backend.raw("blog_articles").is_none());
    }

    #[tokio::test]
    async fn login_accepts_only_the_admin_credentials() {
        let backend = MemoryBackend::new();
        let store = store_with(&backend, RecordingSeeds::default());
        store.dispatch(BlogAction::SetUsers(vec![sample_user("admin")]));

        let before = store.state();
        assert!(!store.login("admin", "wrong"));
        assert_eq!(*store.state(), *before);
        assert!(backend.raw(SESSION_FLAG_KEY).is_none());

        assert!(store.login("admin", "admin123"));
        let state = store.state();
        assert!(state.is_authenticated());
        assert_eq!(state.current_user().map(|u| u.username.as_str()), Some("admin"));
        assert_eq!(backend.raw(SESSION_FLAG_KEY).as_deref(), Some("true"));
        assert!(backend.raw(SESSION_USER_KEY).is_some());
    }

    #[tokio::test]
    async fn login_needs_an_admin_record() {
        let store = store_with(&MemoryBackend::new(), RecordingSeeds::default());
        store.dispatch(BlogAction::SetUsers(vec![sample_user("guest")]));
        assert!(!store.login("admin", "admin123"));
        assert!(!store.state().is_authenticated());
    }

    #[tokio::test]
    async fn session_survives_a_new_store_and_logout_clears_it() {
        let backend = MemoryBackend::new();
        let store = store_with(&backend, RecordingSeeds::default());
        store.load().await.expect("load");
        assert!(store.login("admin", "admin123"));

        let reopened = store_with(&backend, RecordingSeeds::default());
        assert!(reopened.state().is_authenticated());

        reopened.logout();
        assert!(!reopened.state().is_authenticated());
        assert!(backend.raw(SESSION_FLAG_KEY).is_none());
        assert!(backend.raw(SESSION_USER_KEY).is_none());
        assert!(!store_with(&backend, RecordingSeeds::default())
            .state()
            .is_authenticated());
    }

    #[tokio::test]
    async fn reset_restores_seed_articles_and_keeps_session() {
        let backend = MemoryBackend::new();
        let store = store_with(&backend, RecordingSeeds::default());
        store.load().await.expect("load");
        assert!(store.login("admin", "admin123"));
        store.dispatch(BlogAction::AddArticle(sample_article("draft-1")));
        assert_eq!(store.state().articles.len(), seeded_articles().len() + 1);

        store.reset_data().await.expect("reset");

        assert_eq!(*store.state().articles, seeded_articles());
        assert!(store.state().is_authenticated());
        assert_eq!(backend.raw(SESSION_FLAG_KEY).as_deref(), Some("true"));
        let persisted: Vec<Article> = store
            .persistence()
            .read(DocumentKind::Articles)
            .expect("persisted articles");
        assert_eq!(persisted, seeded_articles());
    }
}
