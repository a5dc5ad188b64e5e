//! Integration tests for protocol message serialization.
//!
//! Tests all client and server message types for correct JSON serialization.

use salesdash_core::{FilterCriteria, Summary, WidgetValue};
use salesdash_server::protocol::*;

#[test]
fn test_all_client_messages_serialize() {
    let messages = vec![
        ClientMessage::GetState,
        ClientMessage::WidgetUpdate {
            widget_id: "region".to_string(),
            value: WidgetValue::Selection(vec!["East".to_string()]),
        },
        ClientMessage::WidgetUpdate {
            widget_id: "start_date".to_string(),
            value: WidgetValue::Date(Some("2023-01-01".to_string())),
        },
        ClientMessage::ResetFilters,
    ];

    for msg in messages {
        let json = serde_json::to_string(&msg).expect("Failed to serialize");
        let parsed: ClientMessage = serde_json::from_str(&json).expect("Failed to deserialize");

        let msg_type = match &msg {
            ClientMessage::GetState => "get_state",
            ClientMessage::WidgetUpdate { .. } => "widget_update",
            ClientMessage::ResetFilters => "reset_filters",
        };

        assert!(
            json.contains(msg_type),
            "Message type '{}' not found in JSON: {}",
            msg_type,
            json
        );
        assert_eq!(
            std::mem::discriminant(&msg),
            std::mem::discriminant(&parsed),
            "Message variant mismatch for {}",
            msg_type
        );
    }
}

#[test]
fn test_all_server_messages_serialize() {
    let messages = vec![
        ServerMessage::DashboardState {
            title: "Sales".to_string(),
            widgets: vec![],
            criteria: FilterCriteria::new(),
            total_rows: 3,
            filtered_rows: 0,
            summary: Summary::NoData,
        },
        ServerMessage::Error {
            message: "Test error".to_string(),
        },
    ];

    for msg in messages {
        let json = serde_json::to_string(&msg).expect("Failed to serialize");
        let parsed: ServerMessage = serde_json::from_str(&json).expect("Failed to deserialize");
        assert_eq!(std::mem::discriminant(&msg), std::mem::discriminant(&parsed));
    }
}

#[test]
fn test_widget_update_from_browser_json() {
    // Shapes produced by app.js.
    let selection = r#"{"type":"widget_update","widget_id":"city","value":["Austin","Dallas"]}"#;
    match serde_json::from_str::<ClientMessage>(selection).unwrap() {
        ClientMessage::WidgetUpdate { widget_id, value } => {
            assert_eq!(widget_id, "city");
            assert_eq!(
                value,
                WidgetValue::Selection(vec!["Austin".to_string(), "Dallas".to_string()])
            );
        }
        other => panic!("Expected widget_update, got {other:?}"),
    }

    let cleared = r#"{"type":"widget_update","widget_id":"end_date","value":null}"#;
    match serde_json::from_str::<ClientMessage>(cleared).unwrap() {
        ClientMessage::WidgetUpdate { value, .. } => assert_eq!(value, WidgetValue::Date(None)),
        other => panic!("Expected widget_update, got {other:?}"),
    }
}

#[test]
fn test_no_data_state_json() {
    let msg = ServerMessage::DashboardState {
        title: "Sales".to_string(),
        widgets: vec![],
        criteria: FilterCriteria::new(),
        total_rows: 3,
        filtered_rows: 0,
        summary: Summary::NoData,
    };
    let json = serde_json::to_value(&msg).unwrap();
    assert_eq!(json["type"], "dashboard_state");
    assert_eq!(json["summary"]["status"], "no_data");
}

#[test]
fn test_invalid_client_message() {
    assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"execute_all"}"#).is_err());
    assert!(serde_json::from_str::<ClientMessage>("not json").is_err());
}
