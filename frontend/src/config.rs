/// Configuration for the frontend application

/// Base URL the app is served under.
/// - Local development: "/"
/// - Sub-path deployments set `LOCALFLOW_BASE_URL` at build time
pub const BASE_URL: &str = match option_env!("LOCALFLOW_BASE_URL") {
    Some(url) => url,
    None => "/",
};

/// Where the seed documents live; `<SEED_BASE>data/<kind>.json`.
pub const SEED_BASE: &str = match option_env!("LOCALFLOW_SEED_BASE") {
    Some(url) => url,
    None => BASE_URL,
};

/// Helper function to construct asset paths
pub fn asset_path(path: &str) -> String {
    // Remove leading slash if present
    let path = path.strip_prefix('/').unwrap_or(path);
    format!("{}{}", BASE_URL, path)
}
