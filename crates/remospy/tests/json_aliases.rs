//! Deserializing capture records from JSON.

use pretty_assertions::assert_eq;
use remospy::{
    Caller, CapturedCall, CapturedValue, GenerationSettings, InstanceRole, RemoteFilter, RemoteKind, Vector3,
};

#[test]
fn lowercase_value_aliases() {
    let string: CapturedValue = serde_json::from_str(r#"{"string":"hello"}"#).unwrap();
    let number: CapturedValue = serde_json::from_str(r#"{"number":2.5}"#).unwrap();
    let boolean: CapturedValue = serde_json::from_str(r#"{"boolean":true}"#).unwrap();
    let nil: CapturedValue = serde_json::from_str(r#""nil""#).unwrap();
    let canonical: CapturedValue = serde_json::from_str(r#""Nil""#).unwrap();

    assert_eq!(string, CapturedValue::from("hello"));
    assert_eq!(number, CapturedValue::from(2.5));
    assert_eq!(boolean, CapturedValue::from(true));
    assert_eq!(nil, CapturedValue::Nil);
    assert_eq!(canonical, CapturedValue::Nil);
}

#[test]
fn tables_and_host_values() {
    let table: CapturedValue =
        serde_json::from_str(r#"{"table":[[{"string":"k"},{"number":3}],[{"number":1},"nil"]]}"#).unwrap();
    assert_eq!(
        table,
        CapturedValue::table([
            (CapturedValue::from("k"), CapturedValue::from(3)),
            (CapturedValue::from(1), CapturedValue::Nil),
        ])
    );

    let ray: CapturedValue = serde_json::from_str(
        r#"{"Ray":{"origin":{"x":0,"y":1,"z":0},"direction":{"x":0,"y":-1,"z":0}}}"#,
    )
    .unwrap();
    assert_eq!(
        ray,
        CapturedValue::Ray {
            origin: Vector3::new(0.0, 1.0, 0.0),
            direction: Vector3::new(0.0, -1.0, 0.0),
        }
    );
}

#[test]
fn captured_call_with_defaults() {
    let json = r#"{
        "remote": {
            "debug_id": "0x2a",
            "name": "MyRemote",
            "class_name": "RemoteFunction",
            "parent": {"debug_id": "game", "name": "Game", "class_name": "DataModel", "role": "DataModel"}
        },
        "remote_kind": "RemoteFunction",
        "arguments": [{"string": "hi"}]
    }"#;
    let call: CapturedCall = serde_json::from_str(json).unwrap();

    assert_eq!(call.remote_kind, RemoteKind::RemoteFunction);
    assert_eq!(call.caller, Caller::Game);
    assert_eq!(call.script, None);
    assert_eq!(call.return_value, None);
    assert_eq!(call.arguments, vec![CapturedValue::from("hi")]);
    let parent = call.remote.parent.as_deref().unwrap();
    assert_eq!(parent.role, InstanceRole::DataModel);
    assert_eq!(call.remote.role, InstanceRole::Plain);
}

#[test]
fn partial_settings_and_filter() {
    let settings: GenerationSettings = serde_json::from_str(r#"{"sort_table_keys": true}"#).unwrap();
    assert_eq!(
        settings,
        GenerationSettings {
            sort_table_keys: true,
            ..GenerationSettings::default()
        }
    );

    let filter: RemoteFilter = serde_json::from_str(r#"{"bindable_event": true}"#).unwrap();
    assert!(filter.remote_event);
    assert!(filter.bindable_event);
    assert!(!filter.bindable_function);
}
