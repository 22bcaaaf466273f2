use yew::prelude::*;

use crate::{blog_context::use_blog, config::asset_path};

#[function_component(AboutPage)]
pub fn about_page() -> Html {
    let blog = use_blog();
    let Some(config) = blog.state().config.clone() else {
        return html! { <main class="main about-page" /> };
    };
    let site = &config.site;

    html! {
        <main class="main about-page">
            <img class="about-hero" src={asset_path(&site.hero_image)} alt={site.title.clone()} />
            <h1>{ &site.title }</h1>
            <p>{ &site.description }</p>
            <p>{ format!("Written by {} · ", site.author) }<a href={format!("mailto:{}", site.email)}>{ &site.email }</a></p>
        </main>
    }
}
