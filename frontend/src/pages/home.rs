use localflow_shared::query::{self, ArticleFilter};
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::Link;

use crate::{
    blog_context::use_blog,
    components::{article_card::ArticleCard, loading_spinner::LoadingSpinner},
    router::Route,
};

const POPULAR_LIMIT: usize = 3;

#[derive(Properties, PartialEq)]
pub struct HomePageProps {
    #[prop_or_default]
    pub category: Option<String>,
}

#[function_component(HomePage)]
pub fn home_page(props: &HomePageProps) -> Html {
    let blog = use_blog();
    let search = use_state(String::new);
    let state = blog.state();

    let on_search = {
        let search = search.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(target) = event.target_dyn_into::<HtmlInputElement>() {
                search.set(target.value());
            }
        })
    };

    let filter = ArticleFilter {
        search: Some((*search).clone()),
        category: props.category.clone(),
    };
    let articles = query::published_articles(&state.articles, &filter);
    let popular = query::popular_articles(&state.articles, POPULAR_LIMIT);

    let heading = match &props.category {
        Some(category) => format!("Category: {}", category),
        None => state
            .config
            .as_ref()
            .map(|config| config.site.subtitle.clone())
            .unwrap_or_default(),
    };

    html! {
        <main class="main home-page">
            <div class="container">
                <section class="page-section">
                    <h1 class="page-title">{ heading }</h1>
                    <input
                        type="search"
                        class="search-input"
                        placeholder="Search articles"
                        value={(*search).clone()}
                        oninput={on_search}
                    />
                </section>
                {
                    if state.loading && state.articles.is_empty() {
                        html! { <LoadingSpinner /> }
                    } else if articles.is_empty() {
                        html! { <p class="empty-hint">{ "No articles found." }</p> }
                    } else {
                        html! {
                            <section class="article-list">
                                { for articles.into_iter().map(|article| html! {
                                    <ArticleCard key={article.id.clone()} article={article.clone()} />
                                }) }
                            </section>
                        }
                    }
                }
                <aside class="sidebar" aria-label="Popular">
                    <h2>{ "Popular" }</h2>
                    <ol>
                        { for popular.iter().map(|article| html! {
                            <li>
                                <Link<Route> to={Route::ArticleDetail { slug: article.slug.clone() }}>
                                    { &article.title }
                                </Link<Route>>
                            </li>
                        }) }
                    </ol>
                </aside>
            </div>
        </main>
    }
}
