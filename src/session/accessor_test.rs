use super::*;
use crate::session::store::MemoryStore;
use crate::testing::{FixedClock, make_token, token_expiring_at};

const NOW_MS: i64 = 1_700_000_000_000;

fn session_at(now_ms: i64) -> (Session, MemoryStore, FixedClock) {
    let store = MemoryStore::new();
    let clock = FixedClock::new(now_ms);
    let session = Session::new(Rc::new(store.clone()), Rc::new(clock.clone()));
    (session, store, clock)
}

// =============================================================
// token lifecycle
// =============================================================

#[test]
fn absent_token_reads_as_none() {
    let (session, _, _) = session_at(NOW_MS);
    assert_eq!(session.token(), None);
    assert!(!session.is_authenticated());
    assert_eq!(session.user_role(), None);
    assert_eq!(session.current_user(), None);
}

#[test]
fn valid_token_round_trips_unchanged() {
    let (session, _, _) = session_at(NOW_MS);
    let token = token_expiring_at(NOW_MS / 1000 + 3600, "admin");
    session.set_token(&token);
    assert_eq!(session.token(), Some(token));
    assert!(session.is_authenticated());
}

#[test]
fn expired_token_is_purged_and_stays_purged() {
    let (session, store, _) = session_at(NOW_MS);
    session.set_token(&token_expiring_at(NOW_MS / 1000 - 1, "admin"));

    assert_eq!(session.token(), None);
    assert_eq!(store.get(TOKEN_KEY), None);
    assert_eq!(session.token(), None);
    assert_eq!(store.get(TOKEN_KEY), None);
}

#[test]
fn token_expires_as_time_passes() {
    let (session, store, clock) = session_at(NOW_MS);
    session.set_token(&token_expiring_at(NOW_MS / 1000 + 60, "cuidador"));
    assert!(session.is_authenticated());

    clock.advance_ms(61_000);
    assert!(!session.is_authenticated());
    assert!(store.is_empty());
}

#[test]
fn malformed_token_is_purged_without_panicking() {
    for raw in ["garbage", "a.%%%.c", "a.bm90IGpzb24.c"] {
        let (session, store, _) = session_at(NOW_MS);
        session.set_token(raw);
        assert_eq!(session.user_role(), None);
        assert_eq!(session.current_user(), None);
        assert_eq!(store.get(TOKEN_KEY), None);
    }
}

#[test]
fn remove_token_is_idempotent() {
    let (session, store, _) = session_at(NOW_MS);
    session.remove_token();
    session.set_token("anything");
    session.remove_token();
    session.remove_token();
    assert!(store.is_empty());
}

// =============================================================
// claims
// =============================================================

#[test]
fn user_role_reads_rol_claim() {
    let (session, _, _) = session_at(NOW_MS);
    session.set_token(&token_expiring_at(NOW_MS / 1000 + 60, "veterinario"));
    assert_eq!(session.user_role(), Some(RoleHint::new("veterinario")));
}

#[test]
fn current_user_assembles_identity_with_default_name() {
    let (session, _, _) = session_at(NOW_MS);
    let token = make_token(&serde_json::json!({
        "userId": 12,
        "email": "luis@zoo.test",
        "rol": "rrhh",
        "exp": NOW_MS / 1000 + 60
    }));
    session.set_token(&token);

    let user = session.current_user().expect("user");
    assert_eq!(user.id.as_deref(), Some("12"));
    assert_eq!(user.email.as_deref(), Some("luis@zoo.test"));
    assert_eq!(user.rol, Some(RoleHint::new("rrhh")));
    assert_eq!(user.nombre, "Usuario");
}

// =============================================================
// profile blob
// =============================================================

#[test]
fn profile_is_available_only_with_valid_token() {
    let (session, store, clock) = session_at(NOW_MS);
    let profile = UserProfile {
        id: "3".into(),
        nombre: "Marta".to_owned(),
        email: "marta@zoo.test".to_owned(),
        rol: "admin".to_owned(),
    };
    session.set_token(&token_expiring_at(NOW_MS / 1000 + 10, "admin"));
    session.store_profile(&profile);
    assert_eq!(session.profile(), Some(profile));

    clock.advance_ms(20_000);
    assert_eq!(session.profile(), None);
    assert_eq!(store.get(PROFILE_KEY), None);
}

#[test]
fn clear_removes_token_and_profile() {
    let (session, store, _) = session_at(NOW_MS);
    session.set_token("t");
    store.set(PROFILE_KEY, "{}");
    session.clear();
    assert!(store.is_empty());
}
