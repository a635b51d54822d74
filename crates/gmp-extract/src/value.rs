//! Typed field values.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// The validation rule applied to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Non-empty string, passed through unchanged.
    Text,
    /// One of the literal strings `"True"` / `"False"`.
    Flag,
    /// Integer in `0..=65535`, sent to the daemon as a decimal string.
    Port,
    /// Ordered list of non-empty strings.
    List,
}

/// A two-valued flag spelled the way clients must send it.
///
/// Only the exact strings `"True"` and `"False"` are accepted as input.
/// This mirrors a quirk of the original wire contract rather than a choice
/// about JSON booleans; real booleans are rejected so existing clients keep
/// getting the behavior they were written against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireBool {
    True,
    False,
}

impl WireBool {
    /// Parse one of the two accepted spellings.
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "True" => Some(Self::True),
            "False" => Some(Self::False),
            _ => None,
        }
    }

    /// The client-facing spelling, equal to what was extracted.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::True => "True",
            Self::False => "False",
        }
    }

    pub fn as_bool(self) -> bool {
        matches!(self, Self::True)
    }
}

impl fmt::Display for WireBool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for WireBool {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A network port in the inclusive range `0..=65535`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Port(u16);

impl Port {
    pub fn new(port: u16) -> Self {
        Self(port)
    }

    /// Parse a JSON integer or integer string.
    ///
    /// Floats, negative numbers and values above 65535 are rejected.
    pub fn parse(value: &Value) -> Option<Self> {
        let number = match value {
            Value::String(s) => s.parse::<i64>().ok()?,
            Value::Number(n) => n.as_i64()?,
            _ => return None,
        };
        u16::try_from(number).ok().map(Self)
    }

    pub fn get(self) -> u16 {
        self.0
    }

    /// The decimal string form the daemon expects.
    pub fn to_wire(self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(WireBool),
    Port(Port),
    List(Vec<String>),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Text(_) => FieldKind::Text,
            Self::Flag(_) => FieldKind::Flag,
            Self::Port(_) => FieldKind::Port,
            Self::List(_) => FieldKind::List,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<WireBool> {
        match self {
            Self::Flag(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_port(&self) -> Option<Port> {
        match self {
            Self::Port(port) => Some(*port),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}
