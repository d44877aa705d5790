use super::*;
use crate::models::Resource;
use crate::models::alimento::Alimento;
use serde_json::json;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("nombre", "Nombre", FieldKind::Text),
    FieldSpec::required("peso", "Peso", FieldKind::Number),
    FieldSpec::optional("animal_id", "Animal", FieldKind::Reference),
    FieldSpec::optional("fecha", "Fecha", FieldKind::Date),
    FieldSpec::optional("estado", "Estado", FieldKind::Select(&[("activo", "Activo"), ("baja", "Baja")])),
    FieldSpec::optional("vigente", "Vigente", FieldKind::Flag),
    FieldSpec::optional("clave", "Clave", FieldKind::Secret),
];

fn filled() -> FormBuffer {
    let mut form = FormBuffer::blank(FIELDS);
    form.set("nombre", "Heno");
    form.set("peso", "12,5");
    form
}

// =============================================================
// body building
// =============================================================

#[test]
fn create_body_omits_blank_optionals() {
    let body = filled().to_body(FIELDS, BodyMode::Create).expect("body");
    assert_eq!(body, json!({"nombre": "Heno", "peso": 12.5, "vigente": true}));
}

#[test]
fn update_body_nulls_blank_optionals_but_not_secrets() {
    let body = filled().to_body(FIELDS, BodyMode::Update).expect("body");
    assert_eq!(
        body,
        json!({"nombre": "Heno", "peso": 12.5, "animal_id": null, "fecha": null, "estado": null, "vigente": true})
    );
}

#[test]
fn integral_numbers_and_numeric_references_are_integers() {
    let mut form = filled();
    form.set("peso", "50");
    form.set("animal_id", "7");
    let body = form.to_body(FIELDS, BodyMode::Create).expect("body");
    assert_eq!(body["peso"], json!(50));
    assert_eq!(body["animal_id"], json!(7));

    form.set("animal_id", "A-7");
    let body = form.to_body(FIELDS, BodyMode::Create).expect("body");
    assert_eq!(body["animal_id"], json!("A-7"));
}

#[test]
fn alimento_create_body_matches_inputs_exactly() {
    let mut form = FormBuffer::blank(Alimento::fields());
    form.set("nombre", "Heno");
    form.set("stock_actual", "50");
    form.set("stock_minimo", "10");
    let body = form.to_body(Alimento::fields(), BodyMode::Create).expect("body");
    assert_eq!(body, json!({"nombre": "Heno", "stock_actual": 50, "stock_minimo": 10}));
}

// =============================================================
// validation
// =============================================================

#[test]
fn missing_required_field_is_reported_by_label() {
    let mut form = filled();
    form.set("nombre", "  ");
    assert_eq!(form.validate(FIELDS), Err(FormError::Missing("Nombre")));
    assert_eq!(
        FormError::Missing("Nombre").to_string(),
        "El campo Nombre es obligatorio"
    );
}

#[test]
fn non_numeric_number_is_rejected() {
    let mut form = filled();
    form.set("peso", "doce");
    assert_eq!(form.to_body(FIELDS, BodyMode::Create), Err(FormError::NotANumber("Peso")));
}

#[test]
fn unknown_select_option_is_rejected() {
    let mut form = filled();
    form.set("estado", "perdido");
    assert_eq!(form.validate(FIELDS), Err(FormError::InvalidOption("Estado")));
}

// =============================================================
// prefill + query
// =============================================================

#[test]
fn from_record_prefills_text_inputs() {
    #[derive(Serialize)]
    struct Row {
        nombre: &'static str,
        peso: f64,
        animal_id: i64,
        fecha: &'static str,
        vigente: bool,
        clave: &'static str,
    }
    let row = Row { nombre: "Leo", peso: 190.0, animal_id: 3, fecha: "2024-02-01T00:00:00.000Z", vigente: false, clave: "hash" };
    let form = FormBuffer::from_record(&row, FIELDS);
    assert_eq!(form.get("nombre"), "Leo");
    assert_eq!(form.get("peso"), "190");
    assert_eq!(form.get("animal_id"), "3");
    assert_eq!(form.get("fecha"), "2024-02-01");
    assert_eq!(form.get("vigente"), "false");
    assert_eq!(form.get("clave"), "");
    assert_eq!(form.get("estado"), "");
}

#[test]
fn query_keeps_only_non_blank_filters_in_order() {
    let mut filters = FormBuffer::default();
    filters.set("estado", "activo");
    filters.set("nombre", " Leo ");
    let query = filters.to_query(FIELDS);
    assert_eq!(
        query,
        vec![("nombre".to_owned(), "Leo".to_owned()), ("estado".to_owned(), "activo".to_owned())]
    );
}

#[test]
fn clear_blanks_every_input() {
    let mut form = filled();
    form.clear();
    assert_eq!(form.get("nombre"), "");
    assert_eq!(form.get("vigente"), "");
}
