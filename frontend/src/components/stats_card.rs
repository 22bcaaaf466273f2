use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

#[derive(Properties, PartialEq, Clone)]
pub struct StatsCardProps {
    pub label: AttrValue,
    pub value: String,
    /// Live value shown under the stored one when they differ.
    #[prop_or_default]
    pub live: Option<String>,
    #[prop_or_default]
    pub route: Option<Route>,
}

#[function_component(StatsCard)]
pub fn stats_card(props: &StatsCardProps) -> Html {
    let drift = props
        .live
        .as_ref()
        .filter(|live| **live != props.value)
        .map(|live| html! { <span class="stats-card-live">{ format!("now {}", live) }</span> });

    let content = html! {
        <>
            <span class="stats-card-label">{ props.label.clone() }</span>
            <strong class="stats-card-value">{ props.value.clone() }</strong>
            { for drift }
        </>
    };

    if let Some(route) = &props.route {
        html! {
            <Link<Route> to={route.clone()} classes={classes!("stats-card")}>
                { content }
            </Link<Route>>
        }
    } else {
        html! {
            <div class="stats-card" role="status">
                { content }
            </div>
        }
    }
}
