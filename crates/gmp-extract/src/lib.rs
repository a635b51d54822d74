//! # GMP Field Extractor
//!
//! Maps canonical field names to validated, typed values taken from an
//! untyped JSON request body. Extraction never fails: every field resolves
//! to a typed value or to absent, and callers decide which absences block an
//! operation via [`FieldSet::ensure_present`].
//!
//! ## Validation Rules
//!
//! | Kind | Accepted input | Absent when |
//! |------|----------------|-------------|
//! | Text | non-empty JSON string, unchanged | missing, empty, not a string |
//! | Flag | exactly `"True"` or `"False"` | anything else, JSON booleans included |
//! | Port | integer or integer string in `0..=65535` | unparseable or out of range |
//! | List | array; non-empty string elements kept in order | not an array, or nothing survives |
//!
//! ## Usage
//!
//! ```rust
//! use gmp_extract::ArgumentSet;
//! use gmp_registry::EntityField;
//! use serde_json::json;
//!
//! let body = json!({"name": "prod-scan", "hosts": ["10.0.0.1", ""]});
//! let args = ArgumentSet::extract_all(&body);
//!
//! assert_eq!(args.text(EntityField::Name), Some("prod-scan"));
//! assert_eq!(args.list(EntityField::Hosts), ["10.0.0.1".to_string()]);
//! assert!(args.text(EntityField::Comment).is_none());
//! ```

mod arguments;
mod error;
mod extract;
mod value;

pub use arguments::{ArgumentSet, EventData, FieldSet, MethodData};
pub use error::{Result, ValidationError};
pub use extract::{extract, extract_flag, extract_list, extract_port, extract_text, FieldSpec};
pub use value::{FieldKind, FieldValue, Port, WireBool};

#[cfg(test)]
mod tests;
