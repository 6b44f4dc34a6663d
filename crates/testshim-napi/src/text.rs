//! Replace bindings.

use crate::config::shim;
use napi::bindgen_prelude::*;
use napi_derive::napi;
use testshim_core::substitution::{Flags, Pattern, TextTransform};

/// `subject.replace(new RegExp(source, flags), replacement)` through the shim.
///
/// Calls other than the reserved pair behave like a plain regex replace.
///
/// @throws Error if the regex source or flags are invalid
#[napi]
pub fn replace(
    subject: String,
    source: String,
    flags: Option<String>,
    replacement: String,
) -> Result<String> {
    let flags = Flags::parse(flags.as_deref().unwrap_or_default())
        .map_err(|e| Error::from_reason(e.to_string()))?;
    shim()?
        .substitution()
        .replace(&subject, &Pattern::regex(source, flags), &replacement)
        .map_err(|e| Error::from_reason(e.to_string()))
}

/// Whether `replace(source, flags, replacement)` would be intercepted.
#[napi]
pub fn is_reserved(source: String, flags: Option<String>, replacement: String) -> Result<bool> {
    let Ok(flags) = Flags::parse(flags.as_deref().unwrap_or_default()) else {
        return Ok(false);
    };
    Ok(shim()?
        .substitution()
        .policy()
        .recognizes(&Pattern::regex(source, flags), &replacement)
        .is_some())
}
