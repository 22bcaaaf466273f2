use localflow_shared::{
    editor,
    query::{
        self, AdminArticleQuery, ArticleSort, ArticleTotals, CommentCounts, CommentQuery,
        ModerationStatus, PublishStatus,
    },
    BlogAction,
};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;
use yew_router::prelude::Link;

use crate::{
    blog_context::use_blog,
    components::stats_card::StatsCard,
    router::Route,
    utils::{format_date, now},
};

const RECENT_LIMIT: usize = 5;

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let blog = use_blog();
    let state = blog.state();
    let totals = ArticleTotals::of(&state.articles);
    let counts = CommentCounts::of(&state.comments);
    let recent = query::recent_articles(&state.articles, RECENT_LIMIT);
    let pending = query::pending_comments(&state.comments);

    // 仪表盘数字来自独立的 stats 文档，live 值只做对照
    let cards = state
        .stats
        .as_ref()
        .map(|stats| {
            let d = &stats.dashboard;
            vec![
                ("Articles", d.total_articles, state.articles.len() as u64, Some(Route::AdminArticles)),
                ("Published", d.published_articles, totals.published as u64, None),
                ("Drafts", d.draft_articles, totals.drafts as u64, None),
                ("Views", d.total_views, totals.views, None),
                ("Likes", d.total_likes, totals.likes, None),
                ("Comments", d.total_comments, counts.total as u64, Some(Route::AdminComments)),
                ("Pending", d.pending_comments, counts.pending as u64, Some(Route::AdminComments)),
            ]
        })
        .unwrap_or_default();

    let on_reset = {
        let blog = blog.clone();
        Callback::from(move |_| blog.reset())
    };

    html! {
        <main class="main admin-page">
            <AdminNav />
            <section class="stats-grid">
                { for cards.into_iter().map(|(label, stored, live, route)| html! {
                    <StatsCard label={label} value={stored.to_string()} live={live.to_string()} route={route} />
                }) }
            </section>
            {
                if let Some(stats) = state.stats.as_ref() {
                    html! {
                        <section class="weekly-views" aria-label="Weekly views">
                            <h2>{ "This week" }</h2>
                            <ul>
                                { for stats.dashboard.weekly_views.iter().map(|day| html! {
                                    <li><span>{ &day.day }</span><strong>{ day.views }</strong></li>
                                }) }
                            </ul>
                            <h2>{ "Top articles" }</h2>
                            <ol>
                                { for stats.dashboard.top_articles.iter().map(|top| html! {
                                    <li>{ format!("{} ({} views)", top.title, top.views) }</li>
                                }) }
                            </ol>
                        </section>
                    }
                } else {
                    html! {}
                }
            }
            <section class="recent-articles">
                <h2>{ "Recent articles" }</h2>
                <ul>
                    { for recent.iter().map(|article| html! {
                        <li>
                            <Link<Route> to={Route::EditArticle { id: article.id.clone() }}>{ &article.title }</Link<Route>>
                            { if article.is_published { "" } else { " (draft)" } }
                        </li>
                    }) }
                </ul>
            </section>
            <section class="pending-comments">
                <h2>{ format!("Awaiting moderation ({})", pending.len()) }</h2>
                <ul>
                    { for pending.iter().map(|comment| html! {
                        <li>{ format!("{}: {}", comment.author, comment.content) }</li>
                    }) }
                </ul>
            </section>
            <button type="button" class="danger-button" onclick={on_reset}>{ "Reset demo data" }</button>
        </main>
    }
}

#[function_component(AdminNav)]
fn admin_nav() -> Html {
    html! {
        <nav class="admin-nav" aria-label="Admin">
            <Link<Route> to={Route::Dashboard}>{ "Dashboard" }</Link<Route>>
            <Link<Route> to={Route::AdminArticles}>{ "Articles" }</Link<Route>>
            <Link<Route> to={Route::NewArticle}>{ "New article" }</Link<Route>>
            <Link<Route> to={Route::AdminComments}>{ "Comments" }</Link<Route>>
            <Link<Route> to={Route::Settings}>{ "Settings" }</Link<Route>>
        </nav>
    }
}

fn parse_status(value: &str) -> PublishStatus {
    match value {
        "published" => PublishStatus::Published,
        "draft" => PublishStatus::Draft,
        _ => PublishStatus::All,
    }
}

fn parse_sort(value: &str) -> ArticleSort {
    match value {
        "title" => ArticleSort::Title,
        "views" => ArticleSort::Views,
        "likes" => ArticleSort::Likes,
        _ => ArticleSort::PublishedAt,
    }
}

#[function_component(ArticlesPage)]
pub fn articles_page() -> Html {
    let blog = use_blog();
    let filters = use_state(AdminArticleQuery::default);
    let state = blog.state();

    let on_search = {
        let filters = filters.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(target) = event.target_dyn_into::<HtmlInputElement>() {
                let mut next = (*filters).clone();
                next.search = target.value();
                filters.set(next);
            }
        })
    };
    let on_category = {
        let filters = filters.clone();
        Callback::from(move |event: Event| {
            if let Some(target) = event.target_dyn_into::<HtmlSelectElement>() {
                let mut next = (*filters).clone();
                let value = target.value();
                next.category = if value.is_empty() { None } else { Some(value) };
                filters.set(next);
            }
        })
    };
    let on_status = {
        let filters = filters.clone();
        Callback::from(move |event: Event| {
            if let Some(target) = event.target_dyn_into::<HtmlSelectElement>() {
                let mut next = (*filters).clone();
                next.status = parse_status(&target.value());
                filters.set(next);
            }
        })
    };
    let on_sort = {
        let filters = filters.clone();
        Callback::from(move |event: Event| {
            if let Some(target) = event.target_dyn_into::<HtmlSelectElement>() {
                let mut next = (*filters).clone();
                next.sort = parse_sort(&target.value());
                filters.set(next);
            }
        })
    };

    let rows = query::admin_articles(&state.articles, &filters);
    let totals = ArticleTotals::of(&state.articles);
    let categories = query::categories(&state.articles);

    html! {
        <main class="main admin-page">
            <AdminNav />
            <div class="admin-filters">
                <input type="search" placeholder="Search title or excerpt" value={filters.search.clone()} oninput={on_search} />
                <select onchange={on_category}>
                    <option value="">{ "All categories" }</option>
                    { for categories.iter().map(|c| html! { <option value={c.clone()}>{ c }</option> }) }
                </select>
                <select onchange={on_status}>
                    <option value="all">{ "All" }</option>
                    <option value="published">{ "Published" }</option>
                    <option value="draft">{ "Drafts" }</option>
                </select>
                <select onchange={on_sort}>
                    <option value="date">{ "Newest" }</option>
                    <option value="title">{ "Title" }</option>
                    <option value="views">{ "Views" }</option>
                    <option value="likes">{ "Likes" }</option>
                </select>
            </div>
            <table class="admin-table">
                <thead>
                    <tr>
                        <th>{ "Title" }</th><th>{ "Category" }</th><th>{ "Date" }</th>
                        <th>{ "Views" }</th><th>{ "Likes" }</th><th>{ "Status" }</th><th />
                    </tr>
                </thead>
                <tbody>
                    { for rows.into_iter().map(|article| {
                        let on_toggle = {
                            let blog = blog.clone();
                            let article = article.clone();
                            Callback::from(move |_| {
                                blog.dispatch(BlogAction::UpdateArticle(editor::toggle_publish(&article, now())));
                            })
                        };
                        let on_delete = {
                            let blog = blog.clone();
                            let id = article.id.clone();
                            Callback::from(move |_| blog.dispatch(BlogAction::DeleteArticle(id.clone())))
                        };
                        html! {
                            <tr key={article.id.clone()}>
                                <td>{ &article.title }</td>
                                <td>{ &article.category }</td>
                                <td>{ format_date(&article.published_at) }</td>
                                <td>{ article.views }</td>
                                <td>{ article.likes }</td>
                                <td>
                                    <button type="button" onclick={on_toggle}>
                                        { if article.is_published { "Published" } else { "Draft" } }
                                    </button>
                                </td>
                                <td>
                                    <Link<Route> to={Route::EditArticle { id: article.id.clone() }}>{ "Edit" }</Link<Route>>
                                    <button type="button" class="danger-button" onclick={on_delete}>{ "Delete" }</button>
                                </td>
                            </tr>
                        }
                    }) }
                </tbody>
            </table>
            <p class="admin-totals">
                { format!(
                    "{} published · {} drafts · {} views · {} likes",
                    totals.published, totals.drafts, totals.views, totals.likes
                ) }
            </p>
        </main>
    }
}

#[function_component(CommentsPage)]
pub fn comments_page() -> Html {
    let blog = use_blog();
    let filters = use_state(CommentQuery::default);
    let state = blog.state();

    let on_search = {
        let filters = filters.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(target) = event.target_dyn_into::<HtmlInputElement>() {
                let mut next = (*filters).clone();
                next.search = target.value();
                filters.set(next);
            }
        })
    };
    let on_status = {
        let filters = filters.clone();
        Callback::from(move |event: Event| {
            if let Some(target) = event.target_dyn_into::<HtmlSelectElement>() {
                let mut next = (*filters).clone();
                next.status = match target.value().as_str() {
                    "approved" => ModerationStatus::Approved,
                    "pending" => ModerationStatus::Pending,
                    _ => ModerationStatus::All,
                };
                filters.set(next);
            }
        })
    };

    let rows = query::admin_comments(&state.comments, &filters);
    let counts = CommentCounts::of(&state.comments);

    html! {
        <main class="main admin-page">
            <AdminNav />
            <div class="admin-filters">
                <input type="search" placeholder="Search content or author" value={filters.search.clone()} oninput={on_search} />
                <select onchange={on_status}>
                    <option value="all">{ "All" }</option>
                    <option value="approved">{ "Approved" }</option>
                    <option value="pending">{ "Pending" }</option>
                </select>
                <span>{ format!("{} total · {} approved · {} pending", counts.total, counts.approved, counts.pending) }</span>
            </div>
            <ul class="moderation-list">
                { for rows.into_iter().map(|comment| {
                    let article_title = query::find_article(&state.articles, &comment.article_id)
                        .map(|a| a.title.clone())
                        .unwrap_or_else(|| "(deleted article)".to_string());
                    let on_toggle = {
                        let blog = blog.clone();
                        let comment = comment.clone();
                        Callback::from(move |_| {
                            blog.dispatch(BlogAction::UpdateComment(editor::set_approval(&comment, !comment.is_approved)));
                        })
                    };
                    let on_delete = {
                        let blog = blog.clone();
                        let id = comment.id.clone();
                        Callback::from(move |_| blog.dispatch(BlogAction::DeleteComment(id.clone())))
                    };
                    html! {
                        <li key={comment.id.clone()} class="moderation-item">
                            <p>
                                <strong>{ &comment.author }</strong>
                                { format!(" <{}> on {} · {}", comment.email, article_title, format_date(&comment.created_at)) }
                            </p>
                            <p>{ &comment.content }</p>
                            <p class="moderation-replies">{ format!("{} replies", comment.replies.len()) }</p>
                            <button type="button" onclick={on_toggle}>
                                { if comment.is_approved { "Reject" } else { "Approve" } }
                            </button>
                            <button type="button" class="danger-button" onclick={on_delete}>{ "Delete" }</button>
                        </li>
                    }
                }) }
            </ul>
        </main>
    }
}
