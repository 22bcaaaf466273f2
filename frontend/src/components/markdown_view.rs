use web_sys::Element;
use yew::prelude::*;

use crate::utils::markdown_to_html;

#[derive(Properties, Clone, PartialEq)]
pub struct MarkdownViewProps {
    pub source: AttrValue,
    #[prop_or_default]
    pub class: Classes,
}

/// Article body. The rendered HTML goes straight into the host element so
/// Yew never diffs its children.
#[function_component(MarkdownView)]
pub fn markdown_view(props: &MarkdownViewProps) -> Html {
    let host_ref = use_node_ref();

    {
        let host_ref = host_ref.clone();
        use_effect_with(props.source.clone(), move |source| {
            if let Some(host) = host_ref.cast::<Element>() {
                host.set_inner_html(&markdown_to_html(source));
            }
            || ()
        });
    }

    html! {
        <div ref={host_ref} class={classes!("markdown-body", props.class.clone())} />
    }
}
