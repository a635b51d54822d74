//! # GMP Keyword Registry
//!
//! The closed vocabulary shared by the field extractor and the gateway
//! connector. Every JSON field the gateway understands is a variant of one
//! of the enums below, and every variant knows its protocol spelling.
//!
//! ## Namespaces
//!
//! | Enum | Namespace | Examples |
//! |------|-----------|----------|
//! | [`EntityField`] | entity fields | `name`, `filter`, `ssh_credential_id` |
//! | [`MethodDataField`] | alert method data | `send_host`, `scp_path` |
//! | [`EventDataField`] | alert event data | `status` |
//! | [`ResponseField`] | JSON response keys | `status`, `id`, `data` |
//!
//! Canonical names are unique within a namespace. Because the vocabulary is
//! a set of enums, referencing a field outside it fails to compile; the
//! string parser ([`std::str::FromStr`]) exists only for diagnostics and
//! configuration tooling.
//!
//! ## Usage
//!
//! ```rust
//! use gmp_registry::{EntityField, Keyword, MethodDataField};
//!
//! assert_eq!(EntityField::SshCredentialPort.canonical_name(), "ssh_credential_port");
//! assert_eq!(MethodDataField::SendReportFormat.wire_name(), "send_repot_format");
//! ```

mod error;
mod keywords;

pub use error::{KeywordError, Result};
pub use keywords::{EntityField, EventDataField, Keyword, MethodDataField, Namespace, ResponseField};
