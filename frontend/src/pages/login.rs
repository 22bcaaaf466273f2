use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{blog_context::use_blog, router::Route};

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let blog = use_blog();
    let navigator = use_navigator();
    let username = use_state(|| "admin".to_string());
    let password = use_state(String::new);
    let failed = use_state(|| false);

    let on_username = {
        let username = username.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(target) = event.target_dyn_into::<HtmlInputElement>() {
                username.set(target.value());
            }
        })
    };
    let on_password = {
        let password = password.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(target) = event.target_dyn_into::<HtmlInputElement>() {
                password.set(target.value());
            }
        })
    };

    let on_submit = {
        let username = username.clone();
        let password = password.clone();
        let failed = failed.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if blog.login(&username, &password) {
                failed.set(false);
                if let Some(navigator) = navigator.as_ref() {
                    navigator.push(&Route::Dashboard);
                }
            } else {
                failed.set(true);
            }
        })
    };

    html! {
        <main class="main login-page">
            <form class="login-form" onsubmit={on_submit}>
                <h1>{ "Admin login" }</h1>
                <input type="text" autocomplete="username" value={(*username).clone()} oninput={on_username} />
                <input type="password" autocomplete="current-password" value={(*password).clone()} oninput={on_password} />
                {
                    if *failed {
                        html! { <p class="form-error">{ "Invalid username or password" }</p> }
                    } else {
                        html! {}
                    }
                }
                <button type="submit">{ "Log in" }</button>
            </form>
        </main>
    }
}

#[derive(Properties, PartialEq)]
pub struct RequireAdminProps {
    pub children: Html,
}

/// Route guard for the admin pages.
#[function_component(RequireAdmin)]
pub fn require_admin(props: &RequireAdminProps) -> Html {
    let blog = use_blog();
    if blog.state().is_authenticated() {
        props.children.clone()
    } else {
        html! { <Redirect<Route> to={Route::Login} /> }
    }
}
