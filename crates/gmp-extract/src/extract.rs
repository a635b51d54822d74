//! Per-kind extraction functions.
//!
//! All functions read the field by its canonical name and return `None`
//! whenever the input is missing or fails validation. Nothing here trims,
//! case-folds, or substitutes a default.

use crate::value::{FieldKind, FieldValue, Port, WireBool};
use gmp_registry::{EntityField, EventDataField, Keyword, MethodDataField};
use serde_json::Value;
use tracing::{debug, warn};

/// A keyword with a known validation rule.
pub trait FieldSpec: Keyword + Ord {
    fn kind(self) -> FieldKind;
}

impl FieldSpec for EntityField {
    fn kind(self) -> FieldKind {
        match self {
            Self::Trash
            | Self::Details
            | Self::AllowInsecure
            | Self::MakeUnique
            | Self::ReverseLookupOnly
            | Self::ReverseLookupUnify => FieldKind::Flag,
            Self::SshCredentialPort => FieldKind::Port,
            Self::AlertIds | Self::Hosts | Self::ExcludeHosts => FieldKind::List,
            _ => FieldKind::Text,
        }
    }
}

impl FieldSpec for MethodDataField {
    fn kind(self) -> FieldKind {
        match self {
            Self::SendPort => FieldKind::Port,
            _ => FieldKind::Text,
        }
    }
}

impl FieldSpec for EventDataField {
    fn kind(self) -> FieldKind {
        FieldKind::Text
    }
}

/// Extract a field according to its registered kind.
pub fn extract<K: FieldSpec>(body: &Value, field: K) -> Option<FieldValue> {
    match field.kind() {
        FieldKind::Text => extract_text(body, field).map(FieldValue::Text),
        FieldKind::Flag => extract_flag(body, field).map(FieldValue::Flag),
        FieldKind::Port => extract_port(body, field).map(FieldValue::Port),
        FieldKind::List => extract_list(body, field).map(FieldValue::List),
    }
}

/// A non-empty string, returned unchanged.
pub fn extract_text<K: Keyword>(body: &Value, field: K) -> Option<String> {
    body.get(field.canonical_name())
        .and_then(non_empty_string)
        .map(str::to_owned)
}

/// One of the literal strings `"True"` or `"False"`.
pub fn extract_flag<K: Keyword>(body: &Value, field: K) -> Option<WireBool> {
    match body.get(field.canonical_name())? {
        Value::String(s) => WireBool::from_wire(s),
        Value::Bool(_) => {
            warn!(
                field = field.canonical_name(),
                "JSON boolean ignored; flag fields take the strings \"True\" or \"False\""
            );
            None
        }
        _ => None,
    }
}

/// A port in `0..=65535`.
pub fn extract_port<K: Keyword>(body: &Value, field: K) -> Option<Port> {
    let raw = body.get(field.canonical_name())?;
    let port = Port::parse(raw);
    if port.is_none() {
        debug!(field = field.canonical_name(), "rejected port value {}", raw);
    }
    port
}

/// Non-empty string elements of a list, in their original order.
///
/// Bad elements are dropped individually. A list with no surviving element
/// is reported as absent rather than as an empty list.
pub fn extract_list<K: Keyword>(body: &Value, field: K) -> Option<Vec<String>> {
    let items = body.get(field.canonical_name())?.as_array()?;
    let kept: Vec<String> = items
        .iter()
        .filter_map(non_empty_string)
        .map(str::to_owned)
        .collect();

    if kept.len() < items.len() {
        debug!(
            field = field.canonical_name(),
            "dropped {} invalid list elements",
            items.len() - kept.len()
        );
    }

    (!kept.is_empty()).then_some(kept)
}

fn non_empty_string(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}
