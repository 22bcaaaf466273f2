use localflow_shared::{
    editor::{self, CommentDraft},
    query, BlogAction, Comment,
};
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::{
    blog_context::use_blog,
    utils::{format_date, now},
};

#[derive(Properties, PartialEq)]
pub struct CommentSectionProps {
    pub article_id: AttrValue,
}

#[function_component(CommentSection)]
pub fn comment_section(props: &CommentSectionProps) -> Html {
    let blog = use_blog();
    let draft = use_state(CommentDraft::default);
    let form_error = use_state(|| None::<String>);

    let comments: Vec<Comment> = query::approved_comments_for(&blog.state().comments, &props.article_id)
        .into_iter()
        .cloned()
        .collect();

    let on_author = {
        let draft = draft.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(target) = event.target_dyn_into::<HtmlInputElement>() {
                let mut next = (*draft).clone();
                next.author = target.value();
                draft.set(next);
            }
        })
    };
    let on_email = {
        let draft = draft.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(target) = event.target_dyn_into::<HtmlInputElement>() {
                let mut next = (*draft).clone();
                next.email = target.value();
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

    let on_submit = {
        let blog = blog.clone();
        let draft = draft.clone();
        let form_error = form_error.clone();
        let article_id = props.article_id.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let at = now();
            match (*draft).clone().into_comment(editor::timestamp_id(at), &article_id, at) {
                Ok(comment) => {
                    blog.dispatch(BlogAction::AddComment(comment));
                    draft.set(CommentDraft::default());
                    form_error.set(None);
                },
                Err(err) => form_error.set(Some(err.to_string())),
            }
        })
    };

    html! {
        <section class="comment-section" aria-label="Comments">
            <h2>{ format!("Comments ({})", comments.len()) }</h2>
            <ul class="comment-list">
                { for comments.iter().map(|comment| html! {
                    <CommentItem comment={comment.clone()} />
                }) }
            </ul>
            <form class="comment-form" onsubmit={on_submit}>
                <input type="text" placeholder="Name" value={draft.author.clone()} oninput={on_author} />
                <input type="email" placeholder="Email" value={draft.email.clone()} oninput={on_email} />
                <textarea placeholder="Leave a comment" value={draft.content.clone()} oninput={on_content} />
                {
                    if let Some(message) = (*form_error).clone() {
                        html! { <p class="form-error">{ message }</p> }
                    } else {
                        html! {}
                    }
                }
                <button type="submit">{ "Post comment" }</button>
            </form>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct CommentItemProps {
    comment: Comment,
}

#[function_component(CommentItem)]
fn comment_item(props: &CommentItemProps) -> Html {
    let blog = use_blog();
    let reply_text = use_state(String::new);
    let comment = &props.comment;

    let on_reply_input = {
        let reply_text = reply_text.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(target) = event.target_dyn_into::<HtmlInputElement>() {
                reply_text.set(target.value());
            }
        })
    };

    let on_reply = {
        let reply_text = reply_text.clone();
        let parent = comment.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let at = now();
            // 空回复直接忽略
            if let Ok(updated) = editor::reply_to(&parent, &reply_text, editor::timestamp_id(at), at) {
                blog.dispatch(BlogAction::UpdateComment(updated));
                reply_text.set(String::new());
            }
        })
    };

    html! {
        <li class="comment-item">
            <p class="comment-meta">
                <strong>{ &comment.author }</strong>
                { format!(" · {}", format_date(&comment.created_at)) }
            </p>
            <p class="comment-content">{ &comment.content }</p>
            <ul class="comment-replies">
                { for comment.replies.iter().map(|reply| html! {
                    <li class="comment-reply">
                        <strong>{ &reply.author }</strong>
                        { format!(": {}", reply.content) }
                    </li>
                }) }
            </ul>
            <form class="reply-form" onsubmit={on_reply}>
                <input type="text" placeholder="Reply" value={(*reply_text).clone()} oninput={on_reply_input} />
                <button type="submit">{ "Reply" }</button>
            </form>
        </li>
    }
}
