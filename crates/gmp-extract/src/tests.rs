//! Unit tests for the field extractor.

use crate::{
    extract, extract_flag, extract_list, extract_port, extract_text, ArgumentSet, EventData,
    FieldKind, FieldSpec, FieldValue, MethodData, Port, ValidationError, WireBool,
};
use gmp_registry::{EntityField, EventDataField, Keyword, MethodDataField};
use serde_json::json;

fn fields_of_kind(kind: FieldKind) -> Vec<EntityField> {
    EntityField::ALL
        .iter()
        .copied()
        .filter(|field| field.kind() == kind)
        .collect()
}

// =============================================================================
// Text fields
// =============================================================================

#[test]
fn test_text_fields_absent_or_empty() {
    for field in fields_of_kind(FieldKind::Text) {
        assert_eq!(extract_text(&json!({}), field), None, "{field}");
        let body = json!({ field.canonical_name(): "" });
        assert_eq!(extract_text(&body, field), None, "{field}");
    }
}

#[test]
fn test_text_fields_returned_unchanged() {
    for field in fields_of_kind(FieldKind::Text) {
        let body = json!({ field.canonical_name(): "  Mixed Case  " });
        assert_eq!(
            extract_text(&body, field).as_deref(),
            Some("  Mixed Case  "),
            "{field}"
        );
    }
}

#[test]
fn test_text_rejects_non_strings() {
    let body = json!({"name": 42, "comment": null, "filter": ["a"]});
    assert_eq!(extract_text(&body, EntityField::Name), None);
    assert_eq!(extract_text(&body, EntityField::Comment), None);
    assert_eq!(extract_text(&body, EntityField::Filter), None);
}

#[test]
fn test_non_object_body_yields_nothing() {
    let body = json!(["name", "value"]);
    assert_eq!(extract_text(&body, EntityField::Name), None);
    assert!(ArgumentSet::extract_all(&body).is_empty());
}

// =============================================================================
// Flag fields
// =============================================================================

#[test]
fn test_flag_fields_accept_only_literal_spellings() {
    for field in fields_of_kind(FieldKind::Flag) {
        let name = field.canonical_name();
        assert_eq!(extract_flag(&json!({ name: "True" }), field), Some(WireBool::True));
        assert_eq!(extract_flag(&json!({ name: "False" }), field), Some(WireBool::False));

        for rejected in [json!(true), json!(false), json!(1), json!("true"), json!(""), json!("TRUE")] {
            assert_eq!(extract_flag(&json!({ name: rejected }), field), None, "{field}");
        }
        assert_eq!(extract_flag(&json!({}), field), None);
    }
}

#[test]
fn test_flag_value_equals_input() {
    let body = json!({"trash": "False"});
    let flag = extract_flag(&body, EntityField::Trash).unwrap();
    assert_eq!(flag.as_str(), "False");
    assert!(!flag.as_bool());
}

// =============================================================================
// Port fields
// =============================================================================

#[test]
fn test_port_bounds() {
    let ports = [EntityField::SshCredentialPort];
    for field in ports {
        let name = field.canonical_name();
        assert_eq!(extract_port(&json!({ name: "0" }), field), Some(Port::new(0)));
        assert_eq!(extract_port(&json!({ name: "65535" }), field), Some(Port::new(65535)));

        for rejected in ["-1", "65536", "abc", "", "22.5"] {
            assert_eq!(extract_port(&json!({ name: rejected }), field), None, "{rejected}");
        }
        assert_eq!(extract_port(&json!({}), field), None);
    }
}

#[test]
fn test_method_data_send_port_is_a_port() {
    assert_eq!(MethodDataField::SendPort.kind(), FieldKind::Port);
    let body = json!({"send_port": "9390"});
    assert_eq!(extract_port(&body, MethodDataField::SendPort), Some(Port::new(9390)));
    assert_eq!(extract_port(&json!({"send_port": "70000"}), MethodDataField::SendPort), None);
}

#[test]
fn test_port_round_trips_to_string() {
    for raw in ["0", "22", "443", "65535"] {
        let port = extract_port(&json!({ "ssh_credential_port": raw }), EntityField::SshCredentialPort)
            .unwrap();
        assert_eq!(port.to_wire(), raw);
    }
}

#[test]
fn test_port_accepts_json_integers() {
    let body = json!({"ssh_credential_port": 22});
    assert_eq!(extract_port(&body, EntityField::SshCredentialPort), Some(Port::new(22)));
    let body = json!({"ssh_credential_port": 22.0});
    assert_eq!(extract_port(&body, EntityField::SshCredentialPort), None);
}

// =============================================================================
// List fields
// =============================================================================

#[test]
fn test_list_fields_keep_good_elements_in_order() {
    for field in fields_of_kind(FieldKind::List) {
        let body = json!({ field.canonical_name(): ["a", "", "b", 7, null, "c", ""] });
        assert_eq!(
            extract_list(&body, field),
            Some(vec!["a".to_string(), "b".to_string(), "c".to_string()]),
            "{field}"
        );
    }
}

#[test]
fn test_list_absent_cases() {
    assert_eq!(extract_list(&json!({}), EntityField::Hosts), None);
    assert_eq!(extract_list(&json!({"hosts": "10.0.0.1"}), EntityField::Hosts), None);
    assert_eq!(extract_list(&json!({"hosts": ["", ""]}), EntityField::Hosts), None);
    assert_eq!(extract_list(&json!({"hosts": []}), EntityField::Hosts), None);
}

// =============================================================================
// Dispatch and argument sets
// =============================================================================

#[test]
fn test_extract_dispatches_on_kind() {
    let body = json!({
        "name": "n",
        "trash": "True",
        "ssh_credential_port": "22",
        "alert_ids": ["x"]
    });
    assert_eq!(extract(&body, EntityField::Name), Some(FieldValue::Text("n".into())));
    assert_eq!(extract(&body, EntityField::Trash), Some(FieldValue::Flag(WireBool::True)));
    assert_eq!(
        extract(&body, EntityField::SshCredentialPort),
        Some(FieldValue::Port(Port::new(22)))
    );
    assert_eq!(
        extract(&body, EntityField::AlertIds),
        Some(FieldValue::List(vec!["x".into()]))
    );
}

#[test]
fn test_create_target_body_scenario() {
    let body = json!({"name": "prod-scan", "hosts": ["10.0.0.1", ""], "port_range": "T:1-1000"});
    let args = ArgumentSet::extract_all(&body);

    assert_eq!(args.len(), 3);
    assert_eq!(args.field_names(), vec!["name", "hosts", "port_range"]);
    assert_eq!(args.text(EntityField::Name), Some("prod-scan"));
    assert_eq!(args.list(EntityField::Hosts), ["10.0.0.1".to_string()]);
    assert_eq!(args.text(EntityField::PortRange), Some("T:1-1000"));

    for field in EntityField::ALL {
        if !matches!(field, EntityField::Name | EntityField::Hosts | EntityField::PortRange) {
            assert!(!args.contains(*field), "{field} should be absent");
        }
    }
}

#[test]
fn test_partial_input_never_fabricates_defaults() {
    let body = json!({"make_unique": true, "ssh_credential_port": "x", "comment": ""});
    let args = ArgumentSet::extract_all(&body);
    assert!(args.is_empty());
    assert_eq!(args.flag(EntityField::MakeUnique), None);
    assert_eq!(args.port(EntityField::SshCredentialPort), None);
    assert!(args.list(EntityField::Hosts).is_empty());
}

#[test]
fn test_extract_subset_only() {
    let body = json!({"name": "n", "comment": "c"});
    let args = ArgumentSet::extract(&body, &[EntityField::Name]);
    assert_eq!(args.text(EntityField::Name), Some("n"));
    assert!(!args.contains(EntityField::Comment));
}

#[test]
fn test_ensure_present_reports_all_missing() {
    let body = json!({"name": "task", "target_id": ""});
    let args = ArgumentSet::extract_all(&body);
    let err = args
        .ensure_present(&[
            EntityField::Name,
            EntityField::ConfigId,
            EntityField::TargetId,
            EntityField::ScannerId,
        ])
        .unwrap_err();

    assert_eq!(
        err,
        ValidationError::Missing {
            fields: vec!["config_id", "target_id", "scanner_id"],
        }
    );
    assert_eq!(
        err.to_string(),
        "missing or invalid required fields: config_id, target_id, scanner_id"
    );
}

#[test]
fn test_require_text() {
    let args = ArgumentSet::extract_all(&json!({"report_id": "r-1"}));
    assert_eq!(args.require_text(EntityField::ReportId), Ok("r-1"));
    assert!(args.require_text(EntityField::TaskId).is_err());
}

#[test]
fn test_method_and_event_data() {
    let body = json!({
        "send_host": "collector.local",
        "send_port": "9999",
        "send_report_format": "a994b278-1f62-11e1-96ac-406186ea4fc5",
        "send_repot_format": "ignored",
        "status": "Done"
    });
    let method = MethodData::extract_all(&body);
    assert_eq!(method.text(MethodDataField::SendHost), Some("collector.local"));
    assert_eq!(method.port(MethodDataField::SendPort), Some(Port::new(9999)));
    assert_eq!(
        method.text(MethodDataField::SendReportFormat),
        Some("a994b278-1f62-11e1-96ac-406186ea4fc5")
    );
    assert!(!method.contains(MethodDataField::ScpPath));

    let event = EventData::extract_all(&body);
    assert_eq!(event.text(EventDataField::Status), Some("Done"));
}
