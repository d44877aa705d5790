//! The single long-lived push-channel connection.
//!
//! Pages never touch the socket. They [`subscribe`](LiveFeed::subscribe) and
//! keep the returned [`Subscription`]; cancelling it (typically from
//! `on_cleanup`) stops delivery immediately, even if packets are already
//! queued. Under `csr` the first subscription opens the WebSocket, the
//! feed reconnects with exponential backoff while anyone is subscribed, and
//! the socket is closed as soon as the last subscription is cancelled.

#[cfg(test)]
#[path = "live_feed_test.rs"]
mod live_feed_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};

use super::push::{self, CONNECT, PONG, Packet, PushEvent};

/// Handle on one subscriber. Cancelling is idempotent.
#[derive(Clone, Debug)]
pub struct Subscription {
    alive: Arc<AtomicBool>,
    cancelled: UnboundedSender<()>,
}

impl Subscription {
    /// Stop delivery and wake the connection so it can prune and idle.
    pub fn cancel(&self) {
        if self.alive.swap(false, Ordering::Relaxed) {
            let _ = self.cancelled.unbounded_send(());
        }
    }

    #[cfg(test)]
    pub(crate) fn is_active(&self) -> bool {
        self.alive.load(Ordering::Relaxed)
    }
}

struct Subscriber {
    alive: Arc<AtomicBool>,
    handler: Rc<dyn Fn(&PushEvent)>,
}

struct FeedInner {
    url: String,
    subscribers: RefCell<Vec<Subscriber>>,
    connected: Cell<bool>,
    #[cfg_attr(not(feature = "csr"), allow(dead_code))]
    running: Cell<bool>,
    cancel_tx: UnboundedSender<()>,
    /// Taken by the connection loop while it runs.
    #[cfg_attr(not(feature = "csr"), allow(dead_code))]
    cancel_rx: RefCell<Option<UnboundedReceiver<()>>>,
}

/// Push-channel service. Clones share one connection and subscriber list.
#[derive(Clone)]
pub struct LiveFeed {
    inner: Rc<FeedInner>,
}

impl std::fmt::Debug for LiveFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveFeed")
            .field("url", &self.inner.url)
            .field("connected", &self.inner.connected.get())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl LiveFeed {
    pub fn new(url: impl Into<String>) -> Self {
        let (cancel_tx, cancel_rx) = unbounded();
        Self {
            inner: Rc::new(FeedInner {
                url: url.into(),
                subscribers: RefCell::new(Vec::new()),
                connected: Cell::new(false),
                running: Cell::new(false),
                cancel_tx,
                cancel_rx: RefCell::new(Some(cancel_rx)),
            }),
        }
    }

    #[cfg(test)]
    pub(crate) fn is_connected(&self) -> bool {
        self.inner.connected.get()
    }

    /// Register `handler` for every subsequent push event.
    pub fn subscribe(&self, handler: impl Fn(&PushEvent) + 'static) -> Subscription {
        let alive = Arc::new(AtomicBool::new(true));
        {
            let mut subscribers = self.inner.subscribers.borrow_mut();
            subscribers.retain(|s| s.alive.load(Ordering::Relaxed));
            subscribers.push(Subscriber {
                alive: Arc::clone(&alive),
                handler: Rc::new(handler),
            });
        }
        #[cfg(feature = "csr")]
        self.ensure_running();
        Subscription { alive, cancelled: self.inner.cancel_tx.clone() }
    }

    /// Drop cancelled subscribers. Returns `true` when none remain.
    pub(crate) fn prune(&self) -> bool {
        let mut subscribers = self.inner.subscribers.borrow_mut();
        subscribers.retain(|s| s.alive.load(Ordering::Relaxed));
        subscribers.is_empty()
    }

    /// Number of subscriptions not yet cancelled.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .subscribers
            .borrow()
            .iter()
            .filter(|s| s.alive.load(Ordering::Relaxed))
            .count()
    }

    /// Deliver `event` to every live subscriber.
    pub fn dispatch(&self, event: &PushEvent) {
        self.prune();
        let targets: Vec<(Arc<AtomicBool>, Rc<dyn Fn(&PushEvent)>)> = {
            self.inner
                .subscribers
                .borrow()
                .iter()
                .map(|s| (Arc::clone(&s.alive), Rc::clone(&s.handler)))
                .collect()
        };
        for (alive, handler) in targets {
            // A handler may cancel another subscription mid-dispatch.
            if alive.load(Ordering::Relaxed) {
                handler(event);
            }
        }
    }

    /// Process one inbound text frame. Returns the frame to send back, if any.
    pub fn handle_text(&self, text: &str) -> Option<&'static str> {
        match push::decode(text) {
            Ok(Packet::Open) => Some(CONNECT),
            Ok(Packet::Ping) => Some(PONG),
            Ok(Packet::Connect) => {
                log::info!("push channel connected");
                self.inner.connected.set(true);
                None
            }
            Ok(Packet::Disconnect | Packet::Close) => {
                log::info!("push channel disconnected by server");
                self.inner.connected.set(false);
                None
            }
            Ok(Packet::ConnectError(message)) => {
                log::warn!("push channel refused connection: {message}");
                None
            }
            Ok(Packet::Event { name, data }) => {
                match PushEvent::from_event(&name, &data) {
                    Some(event) => {
                        log::debug!("push event {name}");
                        self.dispatch(&event);
                    }
                    None => log::debug!("ignoring push event {name}"),
                }
                None
            }
            Ok(Packet::Pong | Packet::Noop | Packet::Ignored) => None,
            Err(e) => {
                log::warn!("dropping push frame: {e}");
                None
            }
        }
    }

    #[cfg(feature = "csr")]
    fn ensure_running(&self) {
        if self.inner.running.replace(true) {
            return;
        }
        let feed = self.clone();
        leptos::task::spawn_local(async move { feed.run().await });
    }

    /// Reconnect loop. Ends once nobody is subscribed.
    #[cfg(feature = "csr")]
    async fn run(self) {
        const INITIAL_BACKOFF_MS: u32 = 1000;
        const MAX_BACKOFF_MS: u32 = 10_000;

        let Some(mut cancels) = self.inner.cancel_rx.borrow_mut().take() else {
            self.inner.running.set(false);
            return;
        };
        let mut backoff_ms = INITIAL_BACKOFF_MS;
        loop {
            match self.connect_and_run(&mut cancels).await {
                Ok(()) => log::info!("push channel closed"),
                Err(e) => log::warn!("push channel error: {e}"),
            }
            if self.inner.connected.replace(false) {
                backoff_ms = INITIAL_BACKOFF_MS;
            }
            if self.prune() {
                break;
            }
            gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(backoff_ms))).await;
            backoff_ms = (backoff_ms * 2).min(MAX_BACKOFF_MS);
        }
        *self.inner.cancel_rx.borrow_mut() = Some(cancels);
        self.inner.running.set(false);
    }

    /// Pump one socket until it drops or the last subscriber cancels.
    #[cfg(feature = "csr")]
    async fn connect_and_run(&self, cancels: &mut UnboundedReceiver<()>) -> Result<(), String> {
        use futures::{SinkExt, StreamExt};
        use gloo_net::websocket::futures::WebSocket;
        use gloo_net::websocket::{Message, WebSocketError};

        enum Inbound {
            Frame(Result<Message, WebSocketError>),
            Cancelled,
        }

        if self.prune() {
            return Ok(());
        }
        let ws = WebSocket::open(&self.inner.url).map_err(|e| e.to_string())?;
        let (mut ws_write, ws_read) = ws.split();
        let mut inbound = futures::stream::select(ws_read.map(Inbound::Frame), cancels.map(|()| Inbound::Cancelled));

        while let Some(next) = inbound.next().await {
            let msg = match next {
                Inbound::Cancelled if self.prune() => {
                    log::info!("no push subscribers left, closing channel");
                    let _ = ws_write.close().await;
                    return Ok(());
                }
                Inbound::Cancelled => continue,
                Inbound::Frame(msg) => msg,
            };
            match msg {
                Ok(Message::Text(text)) => {
                    if let Some(reply) = self.handle_text(&text) {
                        ws_write
                            .send(Message::Text(reply.to_owned()))
                            .await
                            .map_err(|e| e.to_string())?;
                    }
                }
                Ok(Message::Bytes(_)) => {}
                Err(e) => return Err(e.to_string()),
            }
        }
        Ok(())
    }
}
