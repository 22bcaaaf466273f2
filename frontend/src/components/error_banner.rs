use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ErrorBannerProps {
    pub message: String,
    #[prop_or_default]
    pub on_retry: Option<Callback<()>>,
}

/// Store-level error with an optional retry. Dismissing only hides it; the
/// error stays in the store until the next successful load.
#[function_component(ErrorBanner)]
pub fn error_banner(props: &ErrorBannerProps) -> Html {
    let is_open = use_state(|| true);

    {
        let is_open = is_open.clone();
        use_effect_with(props.message.clone(), move |_| {
            is_open.set(true);
        });
    }

    if props.message.trim().is_empty() || !*is_open {
        return Html::default();
    }

    let close_button = {
        let is_open = is_open.clone();
        Callback::from(move |_| is_open.set(false))
    };

    let retry_button = props.on_retry.clone().map(|on_retry| {
        let onclick = Callback::from(move |_| on_retry.emit(()));
        html! {
            <button type="button" class="error-banner-retry" onclick={onclick}>{ "Retry" }</button>
        }
    });

    html! {
        <div
            class={classes!("error-banner", "flex", "items-start", "gap-3", "rounded-2xl", "px-5", "py-4")}
            role="alert"
            aria-live="assertive"
        >
            <span class="text-2xl" aria-hidden="true">{"⚠️"}</span>
            <div class="flex-1 space-y-1">
                <p class="font-semibold text-base">{ "Something went wrong" }</p>
                <p>{ props.message.clone() }</p>
            </div>
            { for retry_button }
            <button type="button" class="error-banner-close" aria-label="Dismiss error" onclick={close_button}>
                {"×"}
            </button>
        </div>
    }
}
