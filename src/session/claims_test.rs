use super::*;
use crate::testing::make_token;

// =============================================================
// decode
// =============================================================

#[test]
fn decode_reads_payload_claims() {
    let token = make_token(&serde_json::json!({
        "id": 7,
        "email": "ana@zoo.test",
        "rol": "veterinario",
        "nombre": "Ana",
        "exp": 2_000_000_000
    }));
    let claims = UntrustedClaims::decode(&token).expect("claims");
    assert_eq!(claims.rol.as_deref(), Some("veterinario"));
    assert_eq!(claims.email.as_deref(), Some("ana@zoo.test"));
    assert_eq!(claims.subject().as_deref(), Some("7"));
    assert_eq!(claims.exp, Some(2_000_000_000.0));
}

#[test]
fn decode_accepts_padded_payload() {
    let bare = "h.eyJyb2wiOiJ2ZXQifQ.s";
    let padded = "h.eyJyb2wiOiJ2ZXQifQ==.s";
    let claims = UntrustedClaims::decode(padded).expect("claims");
    assert_eq!(claims.rol.as_deref(), Some("vet"));
    assert_eq!(UntrustedClaims::decode(bare), Ok(claims));
}

#[test]
fn decode_rejects_missing_segment() {
    assert_eq!(UntrustedClaims::decode("opaque"), Err(ClaimsError::MissingPayload));
    assert_eq!(UntrustedClaims::decode("a..c"), Err(ClaimsError::MissingPayload));
}

#[test]
fn decode_rejects_bad_base64() {
    assert_eq!(UntrustedClaims::decode("a.$$$.c"), Err(ClaimsError::Base64));
}

#[test]
fn decode_rejects_non_json_payload() {
    // "not json" base64url-encoded.
    let err = UntrustedClaims::decode("a.bm90IGpzb24.c").expect_err("should fail");
    assert!(matches!(err, ClaimsError::Json(_)));
}

#[test]
fn decode_rejects_payloads_that_are_not_objects() {
    for payload in [
        serde_json::json!([9_999_999_999i64, "admin"]),
        serde_json::json!("admin"),
        serde_json::json!(9_999_999_999i64),
    ] {
        let err = UntrustedClaims::decode(&make_token(&payload)).expect_err("should fail");
        assert!(matches!(err, ClaimsError::Json(_)), "{payload} decoded");
    }
}

// =============================================================
// expiry
// =============================================================

#[test]
fn expiry_compares_seconds_against_millis() {
    let claims = UntrustedClaims { exp: Some(100.0), ..UntrustedClaims::default() };
    assert!(!claims.is_expired_at(99_000));
    assert!(!claims.is_expired_at(100_000));
    assert!(claims.is_expired_at(100_001));
}

#[test]
fn missing_exp_counts_as_expired() {
    let claims = UntrustedClaims::default();
    assert!(claims.is_expired_at(0));
}

// =============================================================
// identity
// =============================================================

#[test]
fn subject_falls_back_through_user_id_and_sub() {
    let claims = UntrustedClaims {
        user_id: Some(serde_json::json!("u-9")),
        sub: Some(serde_json::json!("ignored")),
        ..UntrustedClaims::default()
    };
    assert_eq!(claims.subject().as_deref(), Some("u-9"));

    let only_sub = UntrustedClaims { sub: Some(serde_json::json!(42)), ..UntrustedClaims::default() };
    assert_eq!(only_sub.subject().as_deref(), Some("42"));
}

#[test]
fn display_identity_defaults_name() {
    let claims = UntrustedClaims { rol: Some("admin".to_owned()), ..UntrustedClaims::default() };
    let identity = claims.display_identity();
    assert_eq!(identity.nombre, DEFAULT_DISPLAY_NAME);
    assert_eq!(identity.rol, Some(RoleHint::new("admin")));
    assert_eq!(identity.id, None);
}

#[test]
fn blank_role_is_no_hint() {
    let claims = UntrustedClaims { rol: Some("   ".to_owned()), ..UntrustedClaims::default() };
    assert_eq!(claims.role_hint(), None);
}

#[test]
fn role_kind_parses_aliases() {
    assert_eq!(RoleKind::parse("ADMIN"), RoleKind::Admin);
    assert_eq!(RoleKind::parse("taquillero"), RoleKind::Taquilla);
    assert_eq!(RoleKind::parse("recursos_humanos"), RoleKind::Rrhh);
    assert_eq!(RoleKind::parse("visitante"), RoleKind::Other);
    assert_eq!(RoleHint::new("veterinaria").kind(), RoleKind::Veterinario);
}
