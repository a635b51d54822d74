//! Keyword enums and the [`Keyword`] trait.
//!
//! Each enum is generated by the `keywords!` macro from a table of
//! `Variant => "canonical"` or `Variant => "canonical" as "wire"` rows. The
//! wire column only appears where the protocol spelling differs.

use crate::error::{KeywordError, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The disjoint keyword namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Fields describing an entity or a query over entities.
    Entity,
    /// Data attached to an alert's delivery method.
    MethodData,
    /// Data attached to an alert's triggering event.
    EventData,
    /// Keys of the JSON responses produced by the normalizer.
    Response,
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Entity => "entity",
            Self::MethodData => "method-data",
            Self::EventData => "event-data",
            Self::Response => "response",
        };
        f.write_str(label)
    }
}

/// A member of one of the closed keyword sets.
pub trait Keyword: Copy + Eq + fmt::Debug + 'static {
    /// Namespace this keyword belongs to.
    const NAMESPACE: Namespace;

    /// Every keyword of the namespace, in declaration order.
    const ALL: &'static [Self];

    /// The JSON-facing name.
    fn canonical_name(self) -> &'static str;

    /// The name the administration protocol expects.
    fn wire_name(self) -> &'static str;

    /// Resolve a canonical name. Linear over a small closed set.
    fn from_canonical(name: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|keyword| keyword.canonical_name() == name)
            .ok_or_else(|| KeywordError::Unknown {
                namespace: Self::NAMESPACE,
                name: name.to_string(),
            })
    }
}

macro_rules! keywords {
    (@wire $canonical:literal) => { $canonical };
    (@wire $canonical:literal, $wire:literal) => { $wire };
    (
        $(#[$meta:meta])*
        $name:ident in $namespace:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $canonical:literal $(as $wire:literal)? ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl Keyword for $name {
            const NAMESPACE: Namespace = Namespace::$namespace;
            const ALL: &'static [Self] = &[ $( Self::$variant ),+ ];

            fn canonical_name(self) -> &'static str {
                match self {
                    $( Self::$variant => $canonical ),+
                }
            }

            fn wire_name(self) -> &'static str {
                match self {
                    $( Self::$variant => keywords!(@wire $canonical $(, $wire)?) ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.canonical_name())
            }
        }

        impl FromStr for $name {
            type Err = KeywordError;

            fn from_str(s: &str) -> Result<Self> {
                <Self as Keyword>::from_canonical(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.canonical_name())
            }
        }
    };
}

keywords! {
    /// Fields a client may send to describe an entity or a query.
    EntityField in Entity {
        Filter => "filter",
        /// Sent as the `filt_id` attribute on list commands.
        FilterId => "filter_id" as "filt_id",
        Trash => "trash",
        Details => "details",
        ScannerId => "scanner_id",
        Name => "name",
        Comment => "comment",
        Login => "login",
        Password => "password",
        AllowInsecure => "allow_insecure",
        ConfigId => "config_id",
        TargetId => "target_id",
        AlertIds => "alert_ids",
        MakeUnique => "make_unique",
        /// Sent as the `filter` attribute of `<asset_hosts>`.
        AssetHostsFilter => "asset_hosts_filter",
        Hosts => "hosts",
        ExcludeHosts => "exclude_hosts",
        SshCredentialId => "ssh_credential_id",
        SshCredentialPort => "ssh_credential_port",
        /// The protocol element is plural.
        AliveTest => "alive_test" as "alive_tests",
        ReverseLookupOnly => "reverse_lookup_only",
        ReverseLookupUnify => "reverse_lookup_unify",
        PortRange => "port_range",
        PortListId => "port_list_id",
        TaskId => "task_id",
        ReportId => "report_id",
        /// Sent as the `format_id` attribute on report fetches.
        ReportFormatId => "report_format_id" as "format_id",
    }
}

keywords! {
    /// Data for an alert's delivery method.
    MethodDataField in MethodData {
        SendHost => "send_host",
        SendPort => "send_port",
        /// The daemon-side name carries an upstream misspelling that must be
        /// reproduced on the wire.
        SendReportFormat => "send_report_format" as "send_repot_format",
        ScpReportFormat => "scp_report_format",
        ScpPath => "scp_path",
        ScpKnownHosts => "scp_known_hosts",
        ScpHost => "scp_host",
        ScpCredential => "scp_credential",
    }
}

keywords! {
    /// Data for an alert's triggering event.
    EventDataField in EventData {
        Status => "status",
    }
}

keywords! {
    /// Keys of normalized JSON responses.
    ResponseField in Response {
        Name => "name",
        Id => "id",
        Status => "status",
        StatusText => "status_text",
        Data => "data",
    }
}
