use yew::prelude::*;
use yew_router::prelude::Link;

use crate::router::Route;

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    html! {
        <main>
            <h2>{"404 - Page not found"}</h2>
            <Link<Route> to={Route::Home}>{ "Back to the blog" }</Link<Route>>
        </main>
    }
}
