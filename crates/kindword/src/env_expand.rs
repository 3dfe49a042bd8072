//! Environment variable expansion for catalog files.
//!
//! Runs over the raw TOML text before parsing:
//!
//! - `${VAR}` is replaced with the value of `VAR` and errors when unset
//! - `${VAR:-default}` falls back to `default` when `VAR` is unset or empty
//!
//! A `$` not followed by `{` is kept as is.

use std::borrow::Cow;

use anyhow::{bail, Result};
use tracing::debug;

/// Expand references against the process environment.
pub fn expand_env_vars(text: &str) -> Result<Cow<'_, str>> {
    expand_with(text, |name| std::env::var(name).ok())
}

/// Expand references, resolving variables through `lookup`.
pub fn expand_with<F>(text: &str, lookup: F) -> Result<Cow<'_, str>>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(first) = text.find("${") else {
        return Ok(Cow::Borrowed(text));
    };

    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..first]);
    let mut rest = &text[first..];

    while let Some(open) = rest.find("${") {
        out.push_str(&rest[..open]);
        let body_start = open + 2;

        let Some(close) = rest[body_start..].find('}') else {
            let preview: String = rest[body_start..].chars().take(20).collect();
            bail!("Unclosed environment variable reference: ${{{preview}...");
        };

        let body = &rest[body_start..body_start + close];
        out.push_str(&expand_reference(body, &lookup)?);
        rest = &rest[body_start + close + 1..];
    }

    out.push_str(rest);
    Ok(Cow::Owned(out))
}

/// Resolve the text between `${` and `}`.
fn expand_reference<F>(body: &str, lookup: &F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match body.split_once(":-") {
        Some((name, default)) => {
            validate_var_name(name)?;
            match lookup(name) {
                Some(value) if !value.is_empty() => Ok(value),
                _ => {
                    debug!("env var ${{{name}}} not set, using default");
                    Ok(default.to_string())
                }
            }
        }
        None => {
            validate_var_name(body)?;
            match lookup(body) {
                Some(value) => Ok(value),
                None => bail!(
                    "Environment variable '{body}' is not set. \
                     Use ${{{body}:-default}} to provide a default value."
                ),
            }
        }
    }
}

fn validate_var_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        bail!("Empty environment variable name in ${{}}");
    };

    if !first.is_ascii_alphabetic() && first != '_' {
        bail!("Invalid environment variable name '{name}': must start with a letter or underscore");
    }

    if let Some(c) = chars.find(|c| !c.is_ascii_alphanumeric() && *c != '_') {
        bail!("Invalid environment variable name '{name}': contains invalid character '{c}'");
    }

    Ok(())
}
