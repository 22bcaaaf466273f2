use localflow_shared::{BlogAction, SiteConfig};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::blog_context::use_blog;

#[function_component(SettingsPage)]
pub fn settings_page() -> Html {
    let blog = use_blog();
    let config = blog.state().config.clone();
    let form = use_state(|| config.as_deref().cloned());
    let saved = use_state(|| false);

    {
        // 配置异步加载完成后再填充表单
        let form = form.clone();
        use_effect_with(config.clone(), move |config| {
            if form.is_none() {
                form.set(config.as_deref().cloned());
            }
            || ()
        });
    }

    let Some(current) = (*form).clone() else {
        return html! { <main class="main settings-page" /> };
    };

    let on_input = |key: &'static str| {
        let form = form.clone();
        let saved = saved.clone();
        Callback::from(move |event: InputEvent| {
            let Some(target) = event.target_dyn_into::<HtmlInputElement>() else {
                return;
            };
            if let Some(mut next) = (*form).clone() {
                if next.apply_setting(key, &target.value()).is_ok() {
                    form.set(Some(next));
                    saved.set(false);
                }
            }
        })
    };

    let on_save = {
        let saved = saved.clone();
        let current = current.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            blog.dispatch(BlogAction::SetConfig(current.clone()));
            saved.set(true);
        })
    };

    html! {
        <main class="main settings-page">
            <form class="settings-form" onsubmit={on_save}>
                { for SiteConfig::SETTING_KEYS.into_iter().map(|key| html! {
                    <label>
                        { key }
                        <input type="text" value={current.setting(key).unwrap_or_default().to_string()} oninput={on_input(key)} />
                    </label>
                }) }
                <button type="submit">{ "Save settings" }</button>
                { if *saved { html! { <p class="form-success">{ "Saved." }</p> } } else { html! {} } }
            </form>
        </main>
    }
}
