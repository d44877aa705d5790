//! Test doubles shared by unit tests: clock, token builder, scripted
//! transport and a recording navigator.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use serde_json::Value;

use crate::net::api::ApiClient;
use crate::net::http::{ApiRequest, ApiResponse, Method, Transport, TransportError};
use crate::session::{MemoryStore, Session};
use crate::session::clock::Clock;
use crate::util::route::Navigator;

pub const TEST_BASE_URL: &str = "http://api.test";
pub const NOW_MS: i64 = 1_700_000_000_000;

// =============================================================
// clock + tokens
// =============================================================

#[derive(Clone, Debug)]
pub struct FixedClock {
    now_ms: Rc<Cell<i64>>,
}

impl FixedClock {
    pub fn new(now_ms: i64) -> Self {
        Self { now_ms: Rc::new(Cell::new(now_ms)) }
    }

    pub fn advance_ms(&self, delta: i64) {
        self.now_ms.set(self.now_ms.get() + delta);
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.get()
    }
}

/// Unsigned JWT-shaped token carrying `claims` as its payload.
pub fn make_token(claims: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.signature")
}

pub fn token_expiring_at(exp_secs: i64, rol: &str) -> String {
    make_token(&serde_json::json!({
        "id": 1,
        "email": "admin@zoo.test",
        "rol": rol,
        "nombre": "Admin",
        "exp": exp_secs
    }))
}

/// Session holding a token valid for an hour past [`NOW_MS`].
pub fn logged_in_session() -> (Session, MemoryStore) {
    let store = MemoryStore::new();
    let session = Session::new(Rc::new(store.clone()), Rc::new(FixedClock::new(NOW_MS)));
    session.set_token(&token_expiring_at(NOW_MS / 1000 + 3600, "admin"));
    (session, store)
}

// =============================================================
// transport
// =============================================================

type Scripted = Result<ApiResponse, TransportError>;

#[derive(Default)]
struct FakeInner {
    requests: RefCell<Vec<ApiRequest>>,
    routes: RefCell<HashMap<(Method, String), VecDeque<Scripted>>>,
    held: RefCell<VecDeque<oneshot::Receiver<()>>>,
    on_send: RefCell<Option<Box<dyn Fn(&ApiRequest)>>>,
}

/// Scripted transport. Responses queue per `(method, path)`; the last one
/// queued for a route keeps answering. Unscripted routes answer 404.
#[derive(Clone, Default)]
pub struct FakeTransport {
    inner: Rc<FakeInner>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: Method, path: &str, status: u16, body: &Value) -> &Self {
        self.script(method, path, Ok(ApiResponse::new(status, body.to_string())));
        self
    }

    pub fn respond_bytes(&self, method: Method, path: &str, status: u16, body: &[u8]) -> &Self {
        self.script(method, path, Ok(ApiResponse::new(status, body)));
        self
    }

    pub fn fail(&self, method: Method, path: &str, err: TransportError) -> &Self {
        self.script(method, path, Err(err));
        self
    }

    /// The next request stays pending until the returned sender fires.
    pub fn hold_next(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.inner.held.borrow_mut().push_back(rx);
        tx
    }

    /// Run `hook` synchronously as each request is sent.
    pub fn on_send(&self, hook: impl Fn(&ApiRequest) + 'static) {
        *self.inner.on_send.borrow_mut() = Some(Box::new(hook));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.inner.requests.borrow().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.inner
            .requests
            .borrow()
            .iter()
            .filter(|r| r.method == method && path_of(&r.url) == path)
            .count()
    }

    pub fn last(&self, method: Method, path: &str) -> Option<ApiRequest> {
        self.inner
            .requests
            .borrow()
            .iter()
            .rev()
            .find(|r| r.method == method && path_of(&r.url) == path)
            .cloned()
    }

    fn script(&self, method: Method, path: &str, response: Scripted) {
        self.inner
            .routes
            .borrow_mut()
            .entry((method, path.to_owned()))
            .or_default()
            .push_back(response);
    }

    fn next_response(&self, method: Method, path: &str) -> Scripted {
        let mut routes = self.inner.routes.borrow_mut();
        match routes.get_mut(&(method, path.to_owned())) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_else(not_found),
            Some(queue) => queue.front().cloned().unwrap_or_else(not_found),
            None => not_found(),
        }
    }
}

fn not_found() -> Scripted {
    Ok(ApiResponse::new(404, r#"{"message":"no route"}"#))
}

/// Path portion of a test URL, without base or query string.
pub fn path_of(url: &str) -> &str {
    let rest = url.strip_prefix(TEST_BASE_URL).unwrap_or(url);
    rest.split('?').next().unwrap_or(rest)
}

/// Query string of a test URL.
pub fn query_of(url: &str) -> Option<&str> {
    url.split_once('?').map(|(_, q)| q)
}

impl Transport for FakeTransport {
    fn send(&self, request: ApiRequest) -> LocalBoxFuture<'_, Result<ApiResponse, TransportError>> {
        if let Some(hook) = self.inner.on_send.borrow().as_ref() {
            hook(&request);
        }
        let response = self.next_response(request.method, path_of(&request.url));
        self.inner.requests.borrow_mut().push(request);
        let held = self.inner.held.borrow_mut().pop_front();
        Box::pin(async move {
            if let Some(gate) = held {
                let _ = gate.await;
            }
            response
        })
    }
}

pub fn api_client(session: &Session, transport: &FakeTransport) -> ApiClient {
    ApiClient::new(TEST_BASE_URL, session.clone(), Rc::new(transport.clone()))
}

// =============================================================
// navigation
// =============================================================

#[derive(Clone, Debug, Default)]
pub struct RecordingNavigator {
    paths: Rc<RefCell<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn paths(&self) -> Vec<String> {
        self.paths.borrow().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.paths.borrow().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.paths.borrow_mut().push(path.to_owned());
    }
}
