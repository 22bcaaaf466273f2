use localflow_shared::query;
use yew::prelude::*;
use yew_router::prelude::Link;

use crate::{blog_context::use_blog, router::Route};

#[function_component(CategoriesPage)]
pub fn categories_page() -> Html {
    let blog = use_blog();
    let categories = query::category_counts(&blog.state().articles);

    html! {
        <main class="main categories-page">
            <div class="container">
                <section class="page-section">
                    <h1 class="page-title">{ "Categories" }</h1>
                    <p class="page-description">
                        { format!("{} categories so far.", categories.len()) }
                    </p>
                </section>

                {
                    if categories.is_empty() {
                        html! {
                            <p class="empty-hint">{ "No categories yet." }</p>
                        }
                    } else {
                        html! {
                            <section class="category-grid" aria-label="Category list">
                                { for categories.into_iter().map(|(name, count)| {
                                    html! {
                                        <Link<Route>
                                            to={Route::CategoryDetail { category: name.clone() }}
                                            classes={classes!("category-card")}
                                        >
                                            <p class="category-name">{ name }</p>
                                            <span class="category-count">{ format!("{} articles", count) }</span>
                                        </Link<Route>>
                                    }
                                }) }
                            </section>
                        }
                    }
                }
            </div>
        </main>
    }
}
