//! # GMP Response Normalizer
//!
//! Reduces the XML documents returned by the administration daemon to a
//! small, stable JSON shape, and provides the element tree the connector
//! uses to build commands.
//!
//! ## Record Shapes
//!
//! | Operation kind | Function | JSON |
//! |----------------|----------|------|
//! | list | [`extract_collection`] | `{"status", "data": [{"name", "id"}]}` |
//! | get by id | [`extract_entity`] | `{"status", "name", "id"}` |
//! | create | [`extract_created`] | `{"status", "name": null, "id"}` |
//! | start task | [`extract_task_start`] | `{"status", "report_id"}` |
//!
//! ## Element Convention
//!
//! An entity element carries its identifier in an `id` attribute and its
//! name in a `<name>` child. For single-entity responses the entity element
//! is always the root's first child element; the root itself is never
//! consulted for `id` or `name`. Create responses are the exception by
//! construction: the daemon reports the new identifier on the root.
//!
//! ```text
//! <get_targets_response status="200" status_text="OK">
//!   <target id="b493b7a8-...">        <- entity element
//!     <name>prod-scan</name>
//!   </target>
//! </get_targets_response>
//! ```
//!
//! Normalization is a pure single pass; nothing is retained between calls.

mod error;
mod models;
mod normalize;
pub mod xml;

pub use error::{NormalizeError, Result};
pub use models::{CollectionRecord, EntityRecord, EntityRef, TaskStartRecord};
pub use normalize::{
    extract_collection, extract_created, extract_entity, extract_status, extract_status_text,
    extract_task_start, parse_response,
};
pub use xml::Element;
