use std::rc::Rc;

use localflow_shared::{BlogAction, BlogState, BlogStore};
use yew::prelude::*;

use crate::{api::FetchSeedSource, storage::LocalStorageBackend};

pub type AppStore = BlogStore<LocalStorageBackend, FetchSeedSource>;

/// What components get from [`use_blog`]: the store plus the snapshot of
/// the render that produced it.
#[derive(Clone)]
pub struct BlogContext {
    store: Rc<AppStore>,
    state: Rc<BlogState>,
}

impl PartialEq for BlogContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.store, &other.store) && Rc::ptr_eq(&self.state, &other.state)
    }
}

impl BlogContext {
    pub fn state(&self) -> &BlogState {
        &self.state
    }

    pub fn dispatch(&self, action: BlogAction) {
        self.store.dispatch(action);
    }

    pub fn login(&self, username: &str, password: &str) -> bool {
        self.store.login(username, password)
    }

    pub fn logout(&self) {
        self.store.logout();
    }

    /// Retry after a failed load.
    pub fn reload(&self) {
        spawn_load(self.store.clone(), false);
    }

    /// Drop the persisted documents and load the seeds again.
    pub fn reset(&self) {
        spawn_load(self.store.clone(), true);
    }
}

fn spawn_load(store: Rc<AppStore>, reset: bool) {
    wasm_bindgen_futures::spawn_local(async move {
        let result = if reset { store.reset_data().await } else { store.load().await };
        if let Err(e) = result {
            web_sys::console::error_1(&format!("Failed to load blog data: {}", e).into());
        }
    });
}

#[derive(Properties, PartialEq)]
pub struct BlogProviderProps {
    pub children: Html,
}

/// Owns the store for the whole app and starts the initial load on mount.
#[function_component(BlogProvider)]
pub fn blog_provider(props: &BlogProviderProps) -> Html {
    let store = use_memo((), |_| {
        BlogStore::new(LocalStorageBackend, FetchSeedSource::new())
    });
    let state = use_state(|| store.state());

    {
        let store = store.clone();
        let state = state.clone();
        use_effect_with((), move |_| {
            let id = store.subscribe(move |next| state.set(next.clone()));
            spawn_load(store.clone(), false);
            move || store.unsubscribe(id)
        });
    }

    let context = BlogContext {
        store,
        state: (*state).clone(),
    };

    html! {
        <ContextProvider<BlogContext> context={context}>
            {props.children.clone()}
        </ContextProvider<BlogContext>>
    }
}

#[hook]
pub fn use_blog() -> BlogContext {
    use_context::<BlogContext>().expect("use_blog called outside <BlogProvider>")
}
