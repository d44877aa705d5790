use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::models::RecordId;
use crate::net::http::Method;
use crate::pages::PageServices;
use crate::state::notify::Notices;
use crate::testing::{FakeTransport, RecordingNavigator, api_client, logged_in_session};
use futures::executor::block_on;
use serde_json::json;

type Page = CrudPage<HorarioAlimentacion, Rc<RefCell<CrudState<HorarioAlimentacion>>>>;

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

fn horario() -> HorarioAlimentacion {
    HorarioAlimentacion { id: RecordId::from(3), cantidad: Some(2.5), ..HorarioAlimentacion::default() }
}

#[test]
fn ejecutar_posts_quantity_and_refetches() {
    let (page, transport, notices) = page();
    transport.respond(Method::Post, "/api/dietas/3/ejecutar", 201, &json!({"success": true}));
    transport.respond(Method::Get, "/api/dietas", 200, &json!([]));

    assert!(block_on(ejecutar(&page, &horario())));
    let post = transport.last(Method::Post, "/api/dietas/3/ejecutar").expect("post");
    assert_eq!(post.body, Some(json!({"cantidad_suministrada": 2.5})));
    assert_eq!(transport.count(Method::Get, "/api/dietas"), 1);
    assert_eq!(notices.borrow().latest().map(|n| n.message.clone()).as_deref(), Some(EJECUTADA_MESSAGE));
}

#[test]
fn failed_ejecutar_skips_refetch() {
    let (page, transport, notices) = page();
    transport.respond(Method::Post, "/api/dietas/3/ejecutar", 409, &json!({"message": "Ya ejecutada hoy"}));

    assert!(!block_on(ejecutar(&page, &horario())));
    assert_eq!(transport.count(Method::Get, "/api/dietas"), 0);
    assert_eq!(notices.borrow().latest().map(|n| n.message.clone()).as_deref(), Some("Ya ejecutada hoy"));
}
