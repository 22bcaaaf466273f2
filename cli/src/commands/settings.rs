//! Site configuration commands.

use std::io::Write;

use anyhow::{anyhow, Result};
use localflow_shared::{BlogAction, SiteConfig};

use super::{require_admin, Store};
use crate::cli::ConfigAction;

/// `config get` / `config set`.
pub fn run(store: &Store, action: ConfigAction, out: &mut dyn Write) -> Result<()> {
    let state = store.state();
    let config = state
        .config
        .as_deref()
        .ok_or_else(|| anyhow!("site configuration is not loaded"))?;

    match action {
        ConfigAction::Get {
            key: Some(key),
        } => {
            let value = config
                .setting(&key)
                .ok_or_else(|| anyhow!("unknown setting `{key}`"))?;
            writeln!(out, "{value}")?;
        },
        ConfigAction::Get {
            key: None,
        } => {
            for key in SiteConfig::SETTING_KEYS {
                writeln!(out, "{key:<22} {}", config.setting(key).unwrap_or_default())?;
            }
            for item in &config.navigation {
                writeln!(out, "nav                    {} -> {}", item.name, item.path)?;
            }
        },
        ConfigAction::Set {
            key,
            value,
        } => {
            require_admin(store)?;
            let mut updated = config.clone();
            updated.apply_setting(&key, &value)?;
            store.dispatch(BlogAction::SetConfig(updated));
            writeln!(out, "{key} = {value}")?;
        },
    }
    Ok(())
}
