use super::*;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, PartialEq, Deserialize)]
struct Row {
    id: i64,
}

fn ids(result: ListResult<Row>) -> Vec<i64> {
    result.into_vec().into_iter().map(|r| r.id).collect()
}

// =============================================================
// list shapes
// =============================================================

#[test]
fn all_three_list_shapes_keep_server_order() {
    let rows = json!([{"id": 3}, {"id": 1}, {"id": 2}]);
    for body in [
        json!({"success": true, "data": rows.clone()}),
        json!({"data": rows.clone()}),
        rows.clone(),
    ] {
        assert_eq!(ids(ListResult::from_value(body)), vec![3, 1, 2]);
    }
}

#[test]
fn unrecognized_shapes_are_empty() {
    for body in [
        json!({"success": true, "data": {"id": 1}}),
        json!({"items": [{"id": 1}]}),
        json!("nope"),
        json!(null),
        json!(42),
        json!({"success": false, "data": [{"id": 1}], "message": "sin permisos"}),
    ] {
        assert_eq!(ListResult::<Row>::from_value(body), ListResult::ListEmpty);
    }
}

#[test]
fn empty_array_is_an_ok_empty_list() {
    assert_eq!(ListResult::<Row>::from_value(json!([])), ListResult::ListOk(vec![]));
}

#[test]
fn undecodable_rows_are_dropped_not_fatal() {
    let body = json!([{"id": 1}, {"id": "x"}, {"id": 2}]);
    assert_eq!(ids(ListResult::from_value(body)), vec![1, 2]);
}

// =============================================================
// record envelope
// =============================================================

#[test]
fn record_payload_unwraps_data() {
    assert_eq!(record_payload(json!({"success": true, "data": {"a": 1}})), json!({"a": 1}));
    assert_eq!(record_payload(json!({"a": 1})), json!({"a": 1}));
    assert_eq!(
        record_payload(json!({"success": true, "data": null})),
        json!({"success": true})
    );
}

#[test]
fn rejection_reads_success_false() {
    assert_eq!(rejection(&json!({"success": true})), None);
    assert_eq!(rejection(&json!({"a": 1})), None);
    assert_eq!(
        rejection(&json!({"success": false, "message": "Duplicado"})),
        Some(Rejection { message: Some("Duplicado".to_owned()) })
    );
    assert_eq!(rejection(&json!({"success": false})), Some(Rejection { message: None }));
}

#[test]
fn server_message_checks_common_keys() {
    assert_eq!(server_message(&json!({"message": " Falta nombre "})).as_deref(), Some("Falta nombre"));
    assert_eq!(server_message(&json!({"error": "boom"})).as_deref(), Some("boom"));
    assert_eq!(server_message(&json!({"error": {"message": "nested"}})).as_deref(), Some("nested"));
    assert_eq!(server_message(&json!({"message": ""})), None);
}
