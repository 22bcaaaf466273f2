pub mod about;
pub mod admin;
pub mod article_detail;
pub mod categories;
pub mod editor;
pub mod home;
pub mod login;
pub mod not_found;
pub mod settings;
