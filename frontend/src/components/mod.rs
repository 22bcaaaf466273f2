// Reusable components live here.

pub mod article_card;
pub mod comment_section;
pub mod error_banner;
pub mod footer;
pub mod header;
pub mod loading_spinner;
pub mod markdown_view;
pub mod stats_card;
