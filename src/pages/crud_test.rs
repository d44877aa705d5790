use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::error::SESSION_EXPIRED_MESSAGE;
use crate::models::alimento::Alimento;
use crate::models::dieta::HorarioAlimentacion;
use crate::net::http::{Method, TransportError};
use crate::session::{MemoryStore, Session};
use crate::state::notify::Notices;
use crate::testing::{
    FakeTransport, FixedClock, NOW_MS, RecordingNavigator, api_client, logged_in_session, path_of, query_of,
};
use crate::util::route::LOGIN_PATH;
use futures::executor::{LocalPool, block_on};
use futures::task::LocalSpawnExt;
use serde_json::json;

type State<R> = Rc<RefCell<CrudState<R>>>;

struct Harness<R> {
    page: CrudPage<R, State<R>>,
    state: State<R>,
    transport: FakeTransport,
    notices: Rc<RefCell<Notices>>,
    navigator: RecordingNavigator,
    session: Session,
}

fn harness_with<R: Resource>(session: Session) -> Harness<R> {
    let transport = FakeTransport::new();
    let notices = Rc::new(RefCell::new(Notices::default()));
    let navigator = RecordingNavigator::default();
    let services = PageServices::new(
        api_client(&session, &transport),
        Rc::new(notices.clone()),
        Rc::new(navigator.clone()),
    );
    let state: State<R> = Rc::new(RefCell::new(CrudState::default()));
    Harness {
        page: CrudPage::new(services, state.clone()),
        state,
        transport,
        notices,
        navigator,
        session,
    }
}

fn harness<R: Resource>() -> Harness<R> {
    harness_with(logged_in_session().0)
}

fn latest_notice(notices: &Rc<RefCell<Notices>>) -> Option<String> {
    notices.borrow().latest().map(|n| n.message.clone())
}

const ALIMENTOS: &str = "/api/alimentos";

// =============================================================
// mount + fetch
// =============================================================

#[test]
fn mount_without_session_redirects_and_sends_nothing() {
    let session = Session::new(Rc::new(MemoryStore::new()), Rc::new(FixedClock::new(NOW_MS)));
    let h = harness_with::<Alimento>(session);
    block_on(h.page.mount());
    assert!(h.transport.requests().is_empty());
    assert_eq!(h.navigator.last().as_deref(), Some(LOGIN_PATH));
}

#[test]
fn mount_accepts_every_list_shape() {
    let shapes = [
        json!([{"id": 1, "nombre": "Heno"}]),
        json!({"data": [{"id": 1, "nombre": "Heno"}]}),
        json!({"success": true, "data": [{"id": 1, "nombre": "Heno"}]}),
    ];
    for shape in shapes {
        let h = harness::<Alimento>();
        h.transport.respond(Method::Get, ALIMENTOS, 200, &shape);
        block_on(h.page.mount());
        let state = h.state.borrow();
        assert_eq!(state.items.len(), 1, "shape {shape}");
        assert_eq!(state.items[0].nombre, "Heno");
        assert!(state.loaded);
        assert!(!state.loading);
    }
}

#[test]
fn unexpected_list_shape_renders_empty() {
    let h = harness::<Alimento>();
    h.transport.respond(Method::Get, ALIMENTOS, 200, &json!({"success": false, "message": "x"}));
    block_on(h.page.mount());
    assert!(h.state.borrow().items.is_empty());
    assert!(h.state.borrow().loaded);
}

#[test]
fn unauthorized_fetch_ends_the_session() {
    let h = harness::<Alimento>();
    h.transport.respond(Method::Get, ALIMENTOS, 401, &json!({"message": "jwt expired"}));
    block_on(h.page.mount());

    assert_eq!(h.session.token(), None);
    assert_eq!(h.navigator.last().as_deref(), Some(LOGIN_PATH));
    assert_eq!(latest_notice(&h.notices).as_deref(), Some(SESSION_EXPIRED_MESSAGE));
}

#[test]
fn failed_refresh_keeps_previous_rows() {
    let h = harness::<Alimento>();
    h.transport
        .respond(Method::Get, ALIMENTOS, 200, &json!([{"id": 1, "nombre": "Heno"}]))
        .respond(Method::Get, ALIMENTOS, 500, &json!({"message": "Error interno"}));
    block_on(h.page.mount());
    block_on(h.page.refresh());

    assert_eq!(h.state.borrow().items.len(), 1);
    assert_eq!(latest_notice(&h.notices).as_deref(), Some("Error interno"));
    assert!(h.navigator.paths().is_empty());
}

#[test]
fn network_failure_shows_connection_notice() {
    let h = harness::<Alimento>();
    h.transport.fail(Method::Get, ALIMENTOS, TransportError::Network("refused".to_owned()));
    block_on(h.page.mount());
    assert_eq!(
        latest_notice(&h.notices).as_deref(),
        Some(crate::error::CONNECTION_ERROR_MESSAGE)
    );
}

#[test]
fn filters_become_the_query_string() {
    let h = harness::<Alimento>();
    h.transport.respond(Method::Get, ALIMENTOS, 200, &json!([]));
    h.page.set_filter("tipo", "fruta".to_owned());
    block_on(h.page.refresh());

    let request = h.transport.last(Method::Get, ALIMENTOS).expect("request");
    assert_eq!(query_of(&request.url), Some("tipo=fruta"));

    block_on(h.page.clear_filters());
    let request = h.transport.last(Method::Get, ALIMENTOS).expect("request");
    assert_eq!(query_of(&request.url), None);
}

#[test]
fn animal_filter_switches_dietas_endpoint() {
    let h = harness::<HorarioAlimentacion>();
    h.transport.respond(Method::Get, "/api/dietas/animal/7", 200, &json!([{"id": 2, "hora": "08:00"}]));
    h.page.set_filter("animal_id", "7".to_owned());
    block_on(h.page.refresh());

    assert_eq!(h.transport.count(Method::Get, "/api/dietas/animal/7"), 1);
    assert_eq!(h.state.borrow().items.len(), 1);
}

#[test]
fn animal_filter_is_escaped_into_one_path_segment() {
    let h = harness::<HorarioAlimentacion>();
    h.page.set_filter("animal_id", "7/../../usuarios?x=1".to_owned());
    block_on(h.page.refresh());

    let request = h.transport.requests().pop().expect("request");
    assert_eq!(path_of(&request.url), "/api/dietas/animal/7%2F..%2F..%2Fusuarios%3Fx%3D1");
    assert_eq!(query_of(&request.url), None);
    assert_eq!(h.transport.count(Method::Get, "/api/usuarios"), 0);
}

// =============================================================
// create / edit
// =============================================================

#[test]
fn create_posts_body_closes_dialog_and_refetches() {
    let h = harness::<Alimento>();
    h.transport
        .respond(Method::Get, ALIMENTOS, 200, &json!([]))
        .respond(Method::Get, ALIMENTOS, 200, &json!([{"id": 9, "nombre": "Heno"}]));
    h.transport.respond(Method::Post, ALIMENTOS, 201, &json!({"success": true, "data": {"id": 9}}));
    block_on(h.page.mount());

    h.page.open_create();
    h.page.set_field("nombre", "Heno".to_owned());
    h.page.set_field("stock_actual", "50".to_owned());
    h.page.set_field("stock_minimo", "10".to_owned());
    assert!(block_on(h.page.submit()));

    let post = h.transport.last(Method::Post, ALIMENTOS).expect("post");
    assert_eq!(post.body, Some(json!({"nombre": "Heno", "stock_actual": 50, "stock_minimo": 10})));
    assert_eq!(h.transport.count(Method::Get, ALIMENTOS), 2);
    assert_eq!(h.state.borrow().dialog, Dialog::Closed);
    assert_eq!(h.state.borrow().items.len(), 1);
    assert_eq!(latest_notice(&h.notices).as_deref(), Some(CREATED_MESSAGE));
}

#[test]
fn invalid_form_sends_nothing() {
    let h = harness::<Alimento>();
    h.page.open_create();
    h.page.set_field("stock_actual", "50".to_owned());
    assert!(!block_on(h.page.submit()));

    assert!(h.transport.requests().is_empty());
    let state = h.state.borrow();
    assert_eq!(state.dialog, Dialog::Create);
    assert!(state.form_error.as_deref().is_some_and(|e| e.contains("Nombre")));
}

#[test]
fn rejected_create_keeps_dialog_open() {
    let h = harness::<Alimento>();
    h.transport.respond(Method::Post, ALIMENTOS, 400, &json!({"message": "Nombre duplicado"}));
    h.page.open_create();
    h.page.set_field("nombre", "Heno".to_owned());
    h.page.set_field("stock_actual", "1".to_owned());
    h.page.set_field("stock_minimo", "1".to_owned());
    assert!(!block_on(h.page.submit()));

    assert_eq!(h.state.borrow().dialog, Dialog::Create);
    assert!(!h.state.borrow().saving);
    assert_eq!(latest_notice(&h.notices).as_deref(), Some("Nombre duplicado"));
    assert_eq!(h.transport.count(Method::Get, ALIMENTOS), 0);
}

#[test]
fn edit_puts_to_item_path() {
    let h = harness::<Alimento>();
    h.transport.respond(
        Method::Get,
        ALIMENTOS,
        200,
        &json!([{"id": 3, "nombre": "Manzana", "stock_actual": 5, "stock_minimo": 2}]),
    );
    h.transport.respond(Method::Put, "/api/alimentos/3", 200, &json!({"success": true}));
    block_on(h.page.mount());

    h.page.open_edit(&RecordId::from(3));
    assert_eq!(h.state.borrow().form.get("nombre"), "Manzana");
    h.page.set_field("stock_actual", "8".to_owned());
    assert!(block_on(h.page.submit()));

    let put = h.transport.last(Method::Put, "/api/alimentos/3").expect("put");
    let body = put.body.expect("body");
    assert_eq!(body["stock_actual"], json!(8));
    assert_eq!(latest_notice(&h.notices).as_deref(), Some(UPDATED_MESSAGE));
}

// =============================================================
// delete
// =============================================================

#[test]
fn cancelled_delete_sends_nothing() {
    let h = harness::<Alimento>();
    h.page.request_delete(&RecordId::from(4));
    h.page.cancel_delete();
    assert!(!block_on(h.page.confirm_delete()));
    assert_eq!(h.transport.count(Method::Delete, "/api/alimentos/4"), 0);
}

#[test]
fn confirmed_delete_sends_one_request_then_refetches() {
    let h = harness::<Alimento>();
    h.transport.respond(Method::Get, ALIMENTOS, 200, &json!([]));
    h.transport.respond(Method::Delete, "/api/alimentos/4", 200, &json!({"success": true}));
    h.page.request_delete(&RecordId::from(4));
    assert!(block_on(h.page.confirm_delete()));

    assert_eq!(h.transport.count(Method::Delete, "/api/alimentos/4"), 1);
    assert_eq!(h.transport.count(Method::Get, ALIMENTOS), 1);
    assert_eq!(h.state.borrow().dialog, Dialog::Closed);
    assert_eq!(latest_notice(&h.notices).as_deref(), Some(DELETED_MESSAGE));
}

// =============================================================
// single flight + unmount
// =============================================================

#[test]
fn response_after_unmount_is_discarded() {
    let h = harness::<Alimento>();
    h.transport.respond(Method::Get, ALIMENTOS, 200, &json!([{"id": 1, "nombre": "Heno"}]));
    let mount = h.page.mount_flag().clone();
    h.transport.on_send(move |_| mount.unmount());
    block_on(h.page.mount());

    assert!(h.state.borrow().items.is_empty());
    assert!(!h.state.borrow().loaded);
}

#[test]
fn refreshes_during_a_flight_collapse_into_one_rerun() {
    let h = harness::<Alimento>();
    h.transport.respond(Method::Get, ALIMENTOS, 200, &json!([]));
    let release = h.transport.hold_next();

    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    for _ in 0..3 {
        let page = h.page.clone();
        spawner.spawn_local(async move { page.refresh().await }).expect("spawn");
    }
    pool.run_until_stalled();
    assert_eq!(h.transport.count(Method::Get, ALIMENTOS), 1);
    assert!(h.page.is_busy());

    release.send(()).expect("release");
    pool.run();
    assert_eq!(h.transport.count(Method::Get, ALIMENTOS), 2);
    assert!(!h.page.is_busy());
}

#[test]
fn poll_tick_skips_while_busy() {
    let h = harness::<Alimento>();
    h.transport.respond(Method::Get, ALIMENTOS, 200, &json!([]));
    let release = h.transport.hold_next();

    let mut pool = LocalPool::new();
    let page = h.page.clone();
    pool.spawner().spawn_local(async move { page.refresh().await }).expect("spawn");
    pool.run_until_stalled();

    assert_eq!(block_on(h.page.poll_tick()), TickDecision::DeferBusy);
    release.send(()).expect("release");
    pool.run();
    assert_eq!(h.transport.count(Method::Get, ALIMENTOS), 1);
}

#[test]
fn poll_tick_waits_for_dialog_to_close() {
    let h = harness::<Alimento>();
    h.transport.respond(Method::Get, ALIMENTOS, 200, &json!([]));
    h.page.open_create();
    assert_eq!(block_on(h.page.poll_tick()), TickDecision::DeferDialog);
    assert_eq!(h.transport.count(Method::Get, ALIMENTOS), 0);

    h.page.close_dialog();
    assert_eq!(block_on(h.page.poll_tick()), TickDecision::Run);
    assert_eq!(h.transport.count(Method::Get, ALIMENTOS), 1);
}
