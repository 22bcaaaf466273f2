//! Login state commands.

use std::io::Write;

use anyhow::{bail, Result};

use super::Store;

/// Log in and persist the session.
pub fn login(store: &Store, username: &str, password: &str, out: &mut dyn Write) -> Result<()> {
    if !store.login(username, password) {
        bail!("invalid username or password");
    }
    writeln!(out, "logged in as {username}")?;
    Ok(())
}

/// Forget the session.
pub fn logout(store: &Store, out: &mut dyn Write) -> Result<()> {
    store.logout();
    writeln!(out, "logged out")?;
    Ok(())
}

/// Print the logged-in user.
pub fn whoami(store: &Store, out: &mut dyn Write) -> Result<()> {
    let state = store.state();
    match state.current_user() {
        Some(user) if state.is_authenticated() => {
            writeln!(out, "{} <{}> ({:?})", user.username, user.email, user.role)?;
        },
        _ => writeln!(out, "not logged in")?,
    }
    Ok(())
}
