use localflow_shared::{query, BlogAction};
use yew::prelude::*;
use yew_router::prelude::Link;

use crate::{
    blog_context::use_blog,
    components::{
        comment_section::CommentSection, loading_spinner::LoadingSpinner,
        markdown_view::MarkdownView,
    },
    config::asset_path,
    pages::not_found::NotFoundPage,
    router::Route,
    utils::{format_date, like_once},
};

const RELATED_LIMIT: usize = 3;

#[derive(Properties, Clone, PartialEq)]
pub struct ArticleDetailProps {
    pub slug: String,
}

#[function_component(ArticleDetailPage)]
pub fn article_detail_page(props: &ArticleDetailProps) -> Html {
    let blog = use_blog();
    let state = blog.state();
    // one like per visit
    let liked = use_state(|| false);
    {
        let liked = liked.clone();
        use_effect_with(props.slug.clone(), move |_| liked.set(false));
    }

    let Some(article) = query::find_published_by_slug(&state.articles, &props.slug) else {
        if state.loading {
            return html! { <LoadingSpinner /> };
        }
        return html! { <NotFoundPage /> };
    };

    let on_like = {
        let blog = blog.clone();
        let id = article.id.clone();
        let liked = liked.clone();
        Callback::from(move |_| {
            liked.set(like_once(*liked, || blog.dispatch(BlogAction::LikeArticle(id.clone()))));
        })
    };

    let related = query::related_articles(&state.articles, article, RELATED_LIMIT);

    html! {
        <main class="main article-detail">
            <article class="container">
                <img class="article-hero" src={asset_path(&article.featured_image)} alt={article.title.clone()} />
                <h1 class="article-title">{ &article.title }</h1>
                <div class="post-meta">
                    <img class="author-avatar" src={asset_path(&article.author.avatar)} alt={article.author.name.clone()} />
                    <span>{ &article.author.name }</span>
                    <span>{ format_date(&article.published_at) }</span>
                    <span>{ format!("{} min read", article.read_time) }</span>
                    <span>{ format!("{} views", article.views) }</span>
                </div>
                <MarkdownView source={article.content.clone()} />
                <div class="article-actions">
                    <button
                        type="button"
                        class={classes!("like-button", (*liked).then_some("liked"))}
                        disabled={*liked}
                        onclick={on_like}
                    >
                        { format!("♥ {}", article.likes) }
                    </button>
                    <ul class="post-tags">
                        { for article.tags.iter().map(|tag| html! { <li class="tag-pill">{ format!("#{}", tag) }</li> }) }
                    </ul>
                </div>
                <p class="author-bio">{ &article.author.bio }</p>
            </article>
            <CommentSection article_id={article.id.clone()} />
            {
                if related.is_empty() {
                    html! {}
                } else {
                    html! {
                        <aside class="related-articles" aria-label="Related">
                            <h2>{ "Related" }</h2>
                            <ul>
                                { for related.iter().map(|other| html! {
                                    <li>
                                        <Link<Route> to={Route::ArticleDetail { slug: other.slug.clone() }}>
                                            { &other.title }
                                        </Link<Route>>
                                    </li>
                                }) }
                            </ul>
                        </aside>
                    }
                }
            }
        </main>
    }
}
