#![doc = include_str!("../README.md")]

use anyhow::{Context, anyhow};
use std::error::Error;
use std::str::FromStr;

/// Reads an environment variable, returning `Ok(None)` if it is not set.
///
/// The lookup goes through [dotenvy], which loads the `.env` file from the
/// current or parent directories first.
#[track_caller]
pub fn var(key: &str) -> anyhow::Result<Option<String>> {
    match dotenvy::var(key) {
        Ok(content) => Ok(Some(content)),
        Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => Ok(None),
        Err(error) => Err(error.into()),
    }
}

/// Reads an environment variable and fails if it is not set.
#[track_caller]
pub fn required_var(key: &str) -> anyhow::Result<String> {
    var(key)?.ok_or_else(|| anyhow!("Failed to find required {key} environment variable"))
}

/// Reads an environment variable and parses it with [FromStr] if it is set.
#[track_caller]
pub fn var_parsed<R>(key: &str) -> anyhow::Result<Option<R>>
where
    R: FromStr,
    R::Err: Error + Send + Sync + 'static,
{
    let Some(content) = var(key)? else {
        return Ok(None);
    };

    let value = content
        .parse()
        .with_context(|| format!("Failed to parse {key} environment variable"))?;

    Ok(Some(value))
}

/// Reads a boolean switch.
///
/// Only the value `true` (in any letter case) turns the switch on. Any other
/// value, including one with surrounding whitespace, or an unset variable
/// reads as `false`.
#[track_caller]
pub fn flag(key: &str) -> anyhow::Result<bool> {
    let enabled = var(key)?.is_some_and(|value| value.eq_ignore_ascii_case("true"));
    Ok(enabled)
}
