use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LoadingSpinnerProps {
    #[prop_or(40)]
    pub size: u32,
    #[prop_or(AttrValue::Static("Loading..."))]
    pub label: AttrValue,
}

#[function_component(LoadingSpinner)]
pub fn loading_spinner(props: &LoadingSpinnerProps) -> Html {
    let spinner_style = format!("--spinner-size:{}px;", props.size);

    html! {
        <div class="loading-spinner" role="status" aria-live="polite" aria-busy="true">
            <div style={spinner_style} class="loading-spinner-ring" />
            <span class="sr-only">{ props.label.clone() }</span>
        </div>
    }
}
