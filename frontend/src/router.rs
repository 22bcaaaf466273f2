use yew::prelude::*;
use yew_router::prelude::*;

use crate::{
    components::{footer::Footer, header::Header},
    pages,
};

#[derive(Routable, Clone, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Home,

    #[at("/posts/:slug")]
    ArticleDetail { slug: String },

    #[at("/categories")]
    Categories,

    #[at("/category/:category")]
    CategoryDetail { category: String },

    #[at("/about")]
    About,

    #[at("/admin/login")]
    Login,

    #[at("/admin")]
    Dashboard,

    #[at("/admin/articles")]
    AdminArticles,

    #[at("/admin/articles/new")]
    NewArticle,

    #[at("/admin/articles/:id/edit")]
    EditArticle { id: String },

    #[at("/admin/comments")]
    AdminComments,

    #[at("/admin/settings")]
    Settings,

    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <pages::home::HomePage /> },
        Route::ArticleDetail {
            slug,
        } => {
            html! { <pages::article_detail::ArticleDetailPage slug={slug} /> }
        },
        Route::Categories => html! { <pages::categories::CategoriesPage /> },
        Route::CategoryDetail {
            category,
        } => {
            html! { <pages::home::HomePage category={category} /> }
        },
        Route::About => html! { <pages::about::AboutPage /> },
        Route::Login => html! { <pages::login::LoginPage /> },
        Route::Dashboard => admin(html! { <pages::admin::DashboardPage /> }),
        Route::AdminArticles => admin(html! { <pages::admin::ArticlesPage /> }),
        Route::NewArticle => admin(html! { <pages::editor::EditorPage /> }),
        Route::EditArticle {
            id,
        } => admin(html! { <pages::editor::EditorPage id={id} /> }),
        Route::AdminComments => admin(html! { <pages::admin::CommentsPage /> }),
        Route::Settings => admin(html! { <pages::settings::SettingsPage /> }),
        Route::NotFound => html! { <pages::not_found::NotFoundPage /> },
    }
}

fn admin(page: Html) -> Html {
    html! { <pages::login::RequireAdmin>{ page }</pages::login::RequireAdmin> }
}

#[function_component(AppRouter)]
pub fn app_router() -> Html {
    html! {
        <BrowserRouter>
            <div class="flex flex-col bg-[var(--bg)]" style="min-height: 100vh; min-height: 100svh;">
                <Header />
                <div class="flex-1 pt-[var(--space-sm)]">
                    <Switch<Route> render={switch} />
                </div>
                <Footer />
            </div>
        </BrowserRouter>
    }
}
