use super::*;

#[test]
fn list_request_uses_collection_without_animal_filter() {
    let (path, query) = HorarioAlimentacion::list_request(vec![]);
    assert_eq!(path, "/api/dietas");
    assert!(query.is_empty());
}

#[test]
fn list_request_switches_to_per_animal_endpoint() {
    let (path, query) = HorarioAlimentacion::list_request(vec![("animal_id".to_owned(), "12".to_owned())]);
    assert_eq!(path, "/api/dietas/animal/12");
    assert!(query.is_empty());
}

#[test]
fn boolean_activo_accepts_numeric_flags() {
    let horario: HorarioAlimentacion = serde_json::from_value(serde_json::json!({
        "id": 1, "animal_id": 2, "alimento_id": 3, "cantidad": "4.5", "hora": "08:00:00", "activo": 1
    }))
    .expect("horario");
    assert!(horario.activo);
    assert_eq!(horario.cantidad, Some(4.5));
    assert_eq!(horario.animal_id.as_str(), "2");
}
