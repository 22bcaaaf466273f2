use localflow_shared::Article;
use yew::prelude::*;
use yew_router::prelude::Link;

use crate::{config::asset_path, router::Route, utils::format_date};

#[derive(Properties, PartialEq, Clone)]
pub struct ArticleCardProps {
    pub article: Article,
}

#[function_component(ArticleCard)]
pub fn article_card(props: &ArticleCardProps) -> Html {
    let article = &props.article;
    let detail_route = Route::ArticleDetail {
        slug: article.slug.clone(),
    };

    html! {
        <article class="article-card">
            {
                if article.featured_image.is_empty() {
                    html! {}
                } else {
                    html! {
                        <Link<Route> to={detail_route.clone()} classes={classes!("featured-image")}>
                            <img src={asset_path(&article.featured_image)} alt={article.title.clone()} loading="lazy" />
                        </Link<Route>>
                    }
                }
            }
            <h3 class="article-title">
                <Link<Route> to={detail_route.clone()} classes={classes!("article-title-link")}>
                    { &article.title }
                </Link<Route>>
            </h3>
            <div class="post-meta">
                <span class="post-meta-item">{ &article.author.name }</span>
                <span class="post-meta-item">{ format_date(&article.published_at) }</span>
                <Link<Route>
                    to={Route::CategoryDetail { category: article.category.clone() }}
                    classes={classes!("post-meta-item", "post-category")}
                >
                    { &article.category }
                </Link<Route>>
                <span class="post-meta-item">{ format!("{} min read", article.read_time) }</span>
            </div>
            <p class="article-excerpt">{ &article.excerpt }</p>
            <div class="post-footer">
                <ul class="post-tags">
                    { for article.tags.iter().map(|tag| html! {
                        <li><span class="tag-pill">{ format!("#{}", tag) }</span></li>
                    }) }
                </ul>
                <span class="post-stats">{ format!("{} views · {} likes", article.views, article.likes) }</span>
            </div>
        </article>
    }
}
