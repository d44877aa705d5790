use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::net::api::{LOGIN_PATH as API_LOGIN_PATH, ME_PATH};
use crate::net::http::Method;
use crate::session::{MemoryStore, Session};
use crate::state::notify::Notices;
use crate::testing::{
    FakeTransport, FixedClock, NOW_MS, RecordingNavigator, api_client, logged_in_session, token_expiring_at,
};
use crate::util::route::{RouteAccess, protected_access};
use futures::executor::block_on;
use serde_json::json;

struct Harness {
    services: PageServices,
    session: Session,
    transport: FakeTransport,
    navigator: RecordingNavigator,
    notices: Rc<RefCell<Notices>>,
}

fn harness_with(session: Session) -> Harness {
    let transport = FakeTransport::new();
    let navigator = RecordingNavigator::default();
    let notices = Rc::new(RefCell::new(Notices::default()));
    let services = PageServices::new(
        api_client(&session, &transport),
        Rc::new(notices.clone()),
        Rc::new(navigator.clone()),
    );
    Harness { services, session, transport, navigator, notices }
}

fn signed_out() -> Harness {
    harness_with(Session::new(Rc::new(MemoryStore::new()), Rc::new(FixedClock::new(NOW_MS))))
}

fn valid_token() -> String {
    token_expiring_at(NOW_MS / 1000 + 3600, "veterinario")
}

// =============================================================
// sign in
// =============================================================

#[test]
fn sign_in_stores_session_and_opens_protected_routes() {
    let h = signed_out();
    assert_eq!(protected_access(&h.session), RouteAccess::Redirect(LOGIN_PATH));
    h.transport.respond(
        Method::Post,
        API_LOGIN_PATH,
        200,
        &json!({"success": true, "data": {"token": valid_token(), "user": {"id": 1, "nombre": "Ana", "rol": "veterinario"}}}),
    );

    block_on(sign_in(&h.services, " ana@zoo.test ", "secreto")).expect("signed in");

    assert!(h.session.is_authenticated());
    assert_eq!(protected_access(&h.session), RouteAccess::Render);
    assert_eq!(h.session.profile().map(|p| p.nombre), Some("Ana".to_owned()));
    assert_eq!(h.navigator.last().as_deref(), Some(HOME_PATH));
    let body = h.transport.last(Method::Post, API_LOGIN_PATH).and_then(|r| r.body);
    assert_eq!(body.and_then(|b| b.get("email").cloned()), Some(json!("ana@zoo.test")));
    assert_eq!(
        h.notices.borrow().latest().map(|n| n.message.clone()).as_deref(),
        Some("Bienvenido, Ana")
    );
}

#[test]
fn sign_in_without_user_fetches_profile() {
    let h = signed_out();
    h.transport.respond(Method::Post, API_LOGIN_PATH, 200, &json!({"success": true, "data": {"token": valid_token()}}));
    h.transport.respond(Method::Get, ME_PATH, 200, &json!({"user": {"id": 1, "nombre": "Ana"}}));

    block_on(sign_in(&h.services, "ana@zoo.test", "secreto")).expect("signed in");
    assert_eq!(h.transport.count(Method::Get, ME_PATH), 1);
    assert_eq!(h.session.profile().map(|p| p.nombre), Some("Ana".to_owned()));
}

#[test]
fn blank_credentials_send_nothing() {
    let h = signed_out();
    let err = block_on(sign_in(&h.services, "  ", "x")).expect_err("blank");
    assert_eq!(err, MISSING_CREDENTIALS_MESSAGE);
    assert!(h.transport.requests().is_empty());
}

#[test]
fn bare_401_reads_as_invalid_credentials() {
    let h = signed_out();
    h.transport.respond_bytes(Method::Post, API_LOGIN_PATH, 401, b"");
    let err = block_on(sign_in(&h.services, "a@b.c", "bad")).expect_err("rejected");
    assert_eq!(err, INVALID_CREDENTIALS_MESSAGE);
    assert!(!h.session.is_authenticated());
    assert!(h.navigator.paths().is_empty());
}

#[test]
fn server_rejection_message_is_shown() {
    let h = signed_out();
    h.transport.respond(Method::Post, API_LOGIN_PATH, 400, &json!({"success": false, "message": "Usuario inactivo"}));
    let err = block_on(sign_in(&h.services, "a@b.c", "x")).expect_err("rejected");
    assert_eq!(err, "Usuario inactivo");
}

// =============================================================
// sign out
// =============================================================

#[test]
fn sign_out_clears_session_and_redirects() {
    let h = harness_with(logged_in_session().0);
    sign_out(&h.services);
    assert!(!h.session.is_authenticated());
    assert_eq!(h.navigator.last().as_deref(), Some(LOGIN_PATH));
    assert_eq!(protected_access(&h.session), RouteAccess::Redirect(LOGIN_PATH));
}
