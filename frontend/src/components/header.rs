use yew::prelude::*;
use yew_router::prelude::*;

use crate::{blog_context::use_blog, router::Route};

#[function_component(Header)]
pub fn header() -> Html {
    let blog = use_blog();
    let navigator = use_navigator();
    let state = blog.state();

    let title = state
        .config
        .as_ref()
        .map(|config| config.site.title.clone())
        .unwrap_or_else(|| "LocalFlow".to_string());

    let nav_items = state
        .config
        .as_ref()
        .map(|config| config.navigation.clone())
        .unwrap_or_default();

    let on_logout = {
        let blog = blog.clone();
        Callback::from(move |_| {
            blog.logout();
            if let Some(navigator) = navigator.as_ref() {
                navigator.push(&Route::Home);
            }
        })
    };

    let session = match state.current_user() {
        Some(user) if state.is_authenticated() => html! {
            <div class="header-session">
                <Link<Route> to={Route::Dashboard} classes={classes!("header-link")}>
                    { format!("Dashboard ({})", user.name) }
                </Link<Route>>
                <button type="button" class="header-link" onclick={on_logout}>{ "Log out" }</button>
            </div>
        },
        _ => html! {
            <Link<Route> to={Route::Login} classes={classes!("header-link")}>{ "Admin" }</Link<Route>>
        },
    };

    html! {
        <header class="site-header">
            <Link<Route> to={Route::Home} classes={classes!("site-title")}>{ title }</Link<Route>>
            <nav class="site-nav" aria-label="Main">
                { for nav_items.iter().map(|item| {
                    // 配置里的路径不一定对应路由，认不出来的走普通链接
                    match Route::recognize(&item.path) {
                        Some(route) if route != Route::NotFound => html! {
                            <Link<Route> to={route} classes={classes!("header-link")}>
                                { &item.name }
                            </Link<Route>>
                        },
                        _ => html! {
                            <a class="header-link" href={item.path.clone()}>{ &item.name }</a>
                        },
                    }
                }) }
                <Link<Route> to={Route::Categories} classes={classes!("header-link")}>{ "Categories" }</Link<Route>>
            </nav>
            { session }
        </header>
    }
}
