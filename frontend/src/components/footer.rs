use yew::prelude::*;

use crate::blog_context::use_blog;

#[function_component(Footer)]
pub fn footer() -> Html {
    let blog = use_blog();
    let Some(config) = blog.state().config.clone() else {
        return html! { <footer class="site-footer" /> };
    };

    let links = [
        ("GitHub", &config.social.github),
        ("Twitter", &config.social.twitter),
        ("LinkedIn", &config.social.linkedin),
    ];

    html! {
        <footer class="site-footer">
            <p>{ format!("© {} · {}", config.site.author, config.site.description) }</p>
            <ul class="social-links">
                { for links.iter().filter(|(_, url)| !url.is_empty()).map(|(name, url)| html! {
                    <li>
                        <a href={(*url).clone()} target="_blank" rel="noopener noreferrer">{ *name }</a>
                    </li>
                }) }
            </ul>
        </footer>
    }
}
