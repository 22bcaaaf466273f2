use localflow_shared::{
    editor::{self, ArticleDraft},
    query, Author, BlogAction,
};
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{
    blog_context::use_blog, components::loading_spinner::LoadingSpinner, router::Route,
    utils::now,
};

#[derive(Properties, PartialEq)]
pub struct EditorPageProps {
    /// Edit this article; a new one is written when absent.
    #[prop_or_default]
    pub id: Option<String>,
}

#[derive(Clone, Copy)]
enum Field {
    Slug,
    Excerpt,
    Category,
    FeaturedImage,
}

#[function_component(EditorPage)]
pub fn editor_page(props: &EditorPageProps) -> Html {
    let blog = use_blog();
    let navigator = use_navigator();

    let existing = props
        .id
        .as_deref()
        .and_then(|id| query::find_article(&blog.state().articles, id).cloned());

    let draft = {
        let existing = existing.clone();
        use_state(move || existing.as_ref().map(ArticleDraft::from_article).unwrap_or_default())
    };
    let tags_input = use_state(|| draft.tags.join(", "));
    let error = use_state(|| None::<String>);

    {
        // 直接打开编辑页时文章可能还没加载完
        let draft = draft.clone();
        let tags_input = tags_input.clone();
        use_effect_with(existing.clone(), move |existing| {
            if let Some(article) = existing {
                if *draft == ArticleDraft::default() {
                    draft.set(ArticleDraft::from_article(article));
                    tags_input.set(article.tags.join(", "));
                }
            }
            || ()
        });
    }

    if props.id.is_some() && existing.is_none() {
        if blog.state().loading {
            return html! { <LoadingSpinner /> };
        }
        return html! { <Redirect<Route> to={Route::AdminArticles} /> };
    }
    let is_edit = existing.is_some();

    let on_title = {
        let draft = draft.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(target) = event.target_dyn_into::<HtmlInputElement>() {
                let mut next = (*draft).clone();
                next.set_title(&target.value());
                draft.set(next);
            }
        })
    };

    let on_field = |field: Field| {
        let draft = draft.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(target) = event.target_dyn_into::<HtmlInputElement>() {
                let mut next = (*draft).clone();
                let value = target.value();
                match field {
                    Field::Slug => next.slug = value,
                    Field::Excerpt => next.excerpt = value,
                    Field::Category => next.category = value,
                    Field::FeaturedImage => next.featured_image = value,
                }
                draft.set(next);
            }
        })
    };

    let on_content = {
        let draft = draft.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(target) = event.target_dyn_into::<HtmlTextAreaElement>() {
                let mut next = (*draft).clone();
                next.content = target.value();
                draft.set(next);
            }
        })
    };

    let on_tags = {
        let tags_input = tags_input.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(target) = event.target_dyn_into::<HtmlInputElement>() {
                tags_input.set(target.value());
            }
        })
    };

    let on_published = {
        let draft = draft.clone();
        Callback::from(move |event: Event| {
            if let Some(target) = event.target_dyn_into::<HtmlInputElement>() {
                let mut next = (*draft).clone();
                next.is_published = target.checked();
                draft.set(next);
            }
        })
    };

    let on_save = {
        let blog = blog.clone();
        let draft = draft.clone();
        let tags_input = tags_input.clone();
        let error = error.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let author = blog
                .state()
                .current_user()
                .map(Author::from)
                .unwrap_or_else(Author::fallback);
            let mut next = (*draft).clone();
            next.tags = editor::parse_tags(&tags_input);
            let at = now();
            match next.into_article(existing.as_ref(), author, editor::timestamp_id(at), at) {
                Ok(article) => {
                    let action = if is_edit {
                        BlogAction::UpdateArticle(article)
                    } else {
                        BlogAction::AddArticle(article)
                    };
                    blog.dispatch(action);
                    if let Some(navigator) = navigator.as_ref() {
                        navigator.push(&Route::AdminArticles);
                    }
                },
                Err(err) => error.set(Some(err.to_string())),
            }
        })
    };

    html! {
        <main class="main editor-page">
            <form class="editor-form" onsubmit={on_save}>
                <label>{ "Title" }<input type="text" value={draft.title.clone()} oninput={on_title} /></label>
                <label>{ "Slug" }<input type="text" value={draft.slug.clone()} oninput={on_field(Field::Slug)} /></label>
                <label>{ "Excerpt" }<input type="text" value={draft.excerpt.clone()} oninput={on_field(Field::Excerpt)} /></label>
                <label>{ "Category" }<input type="text" value={draft.category.clone()} oninput={on_field(Field::Category)} /></label>
                <label>{ "Tags" }<input type="text" placeholder="rust, wasm" value={(*tags_input).clone()} oninput={on_tags} /></label>
                <label>
                    { "Featured image" }
                    <input
                        type="text"
                        placeholder={editor::DEFAULT_FEATURED_IMAGE}
                        value={draft.featured_image.clone()}
                        oninput={on_field(Field::FeaturedImage)}
                    />
                </label>
                <label>{ "Content" }<textarea rows="20" value={draft.content.clone()} oninput={on_content} /></label>
                <p class="editor-hint">{ format!("{} min read", editor::estimate_read_time(&draft.content)) }</p>
                <label class="checkbox">
                    <input type="checkbox" checked={draft.is_published} onchange={on_published} />
                    { "Published" }
                </label>
                {
                    if let Some(message) = (*error).clone() {
                        html! { <p class="form-error">{ message }</p> }
                    } else {
                        html! {}
                    }
                }
                <button type="submit">{ if is_edit { "Save changes" } else { "Create article" } }</button>
            </form>
        </main>
    }
}
