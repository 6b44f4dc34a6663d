//! Reserved-pattern substitution.
//!
//! - [`TextTransform`]: the replace operation being intercepted
//! - [`RegexTransform`]: regex-backed replace with JavaScript `String.replace` semantics
//! - [`SubstitutionInterceptor`]: wraps any transform and applies the reserved policy

mod casing;
mod interceptor;
mod pattern;
mod transform;

pub use casing::CaseTable;
pub use interceptor::{ReservedSubstitution, SubstitutionInterceptor};
pub use pattern::{Flags, Pattern};
pub use transform::{RegexTransform, TextTransform, TransformError};
