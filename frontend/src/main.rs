//! LocalFlow browser app: the shared blog store backed by `localStorage`,
//! seeded from the static JSON documents served next to the bundle.

mod api;
mod blog_context;
mod components;
mod config;
mod pages;
mod router;
mod storage;
mod utils;

use yew::prelude::*;

use crate::{
    blog_context::{use_blog, BlogProvider},
    components::error_banner::ErrorBanner,
};

#[function_component(LoadStatus)]
fn load_status() -> Html {
    let blog = use_blog();
    let Some(message) = blog.state().error.clone() else {
        return Html::default();
    };
    let on_retry = {
        let blog = blog.clone();
        Callback::from(move |_| blog.reload())
    };
    html! {
        <div class="load-status">
            <ErrorBanner message={message} on_retry={on_retry} />
        </div>
    }
}

#[function_component(App)]
fn app() -> Html {
    html! {
        <BlogProvider>
            <LoadStatus />
            <router::AppRouter />
        </BlogProvider>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
