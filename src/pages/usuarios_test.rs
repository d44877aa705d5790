use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::net::http::Method;
use crate::pages::PageServices;
use crate::state::notify::Notices;
use crate::testing::{FakeTransport, RecordingNavigator, api_client, logged_in_session};
use futures::executor::block_on;
use serde_json::json;

type Page = CrudPage<Usuario, Rc<RefCell<CrudState<Usuario>>>>;

fn page() -> (Page, FakeTransport, Rc<RefCell<Notices>>) {
    let (session, _) = logged_in_session();
    let transport = FakeTransport::new();
    let notices = Rc::new(RefCell::new(Notices::default()));
    let services = PageServices::new(
        api_client(&session, &transport),
        Rc::new(notices.clone()),
        Rc::new(RecordingNavigator::default()),
    );
    (CrudPage::new(services, Rc::default()), transport, notices)
}

#[test]
fn role_change_puts_and_refetches() {
    let (page, transport, _) = page();
    transport.respond(Method::Put, "/api/usuarios/9/role", 200, &json!({"success": true}));
    transport.respond(
        Method::Get,
        "/api/usuarios",
        200,
        &json!({"success": true, "data": [{"id": 9, "nombre": "Eva", "rol": "taquilla"}]}),
    );

    assert!(block_on(cambiar_rol(&page, &RecordId::from(9), "taquilla")));
    let put = transport.last(Method::Put, "/api/usuarios/9/role").expect("put");
    assert_eq!(put.body, Some(json!({"rol": "taquilla"})));
    assert_eq!(page.state().borrow().items[0].rol, "taquilla");
}

#[test]
fn blank_role_is_rejected_locally() {
    let (page, transport, notices) = page();
    assert!(!block_on(cambiar_rol(&page, &RecordId::from(9), " ")));
    assert!(transport.requests().is_empty());
    assert_eq!(notices.borrow().latest().map(|n| n.severity), Some(Severity::Error));
}
