//! Interactive credential acquisition
//!
//! Convenience for external API-calling collaborators; not part of the
//! analysis core.

use std::io;

/// Prompt (masked) for the value of `var` and set it in the process
/// environment, unless the variable is already set to a non-empty value.
pub fn ensure_env(var: &str) -> io::Result<()> {
    if std::env::var(var).map(|v| !v.is_empty()).unwrap_or(false) {
        return Ok(());
    }

    let value = rpassword::prompt_password(format!("{}: ", var))?;
    std::env::set_var(var, value);
    Ok(())
}
