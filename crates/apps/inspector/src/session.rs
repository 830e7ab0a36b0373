use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use futures_util::Stream;
use network::NetworkState;
use parking_lot::{Mutex, RwLock};
use streaming::{EventKind, IngestMetrics, MatcherId};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::ingester::{self, Inbound};

/// Handle for one live matcher connection.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form is enough to tell connections apart in logs.
        write!(f, "{}", &self.0.simple().to_string()[..8])
    }
}

struct Connection {
    endpoint: String,
    task: JoinHandle<()>,
    metrics: Arc<Mutex<IngestMetrics>>,
}

/// Owns the store task and every matcher connection.
///
/// All connections feed one channel; the store task drains it and is the
/// only writer of the shared state.
pub struct Session {
    http: reqwest::Client,
    state: Arc<RwLock<NetworkState>>,
    tx: mpsc::UnboundedSender<Inbound>,
    store: JoinHandle<()>,
    connections: Mutex<BTreeMap<ConnectionId, Connection>>,
    /// Which connections announced which matcher.
    announced: Arc<RwLock<BTreeMap<MatcherId, BTreeSet<ConnectionId>>>>,
    /// Metrics of connections that are already gone.
    retired: Mutex<IngestMetrics>,
}

impl Session {
    /// Must be called inside a tokio runtime.
    pub fn new(http: reqwest::Client) -> Self {
        let state = Arc::new(RwLock::new(NetworkState::new()));
        let announced = Arc::new(RwLock::new(BTreeMap::new()));
        let (tx, rx) = mpsc::unbounded_channel();
        let store = tokio::spawn(store_loop(rx, state.clone(), announced.clone()));
        Self {
            http,
            state,
            tx,
            store,
            connections: Mutex::new(BTreeMap::new()),
            announced,
            retired: Mutex::new(IngestMetrics::new()),
        }
    }

    pub fn state(&self) -> Arc<RwLock<NetworkState>> {
        self.state.clone()
    }

    /// Open a server-sent event stream to a matcher.
    pub fn connect(&self, endpoint: impl Into<String>) -> ConnectionId {
        let endpoint = endpoint.into();
        let id = ConnectionId::new();
        let metrics = Arc::new(Mutex::new(IngestMetrics::new()));
        let task = tokio::spawn(ingester::run(
            self.http.clone(),
            endpoint.clone(),
            id,
            self.tx.clone(),
            metrics.clone(),
        ));
        self.register(id, endpoint, task, metrics);
        id
    }

    /// Feed an already-open byte stream, e.g. one read from a file.
    pub fn connect_stream<S, E>(&self, label: impl Into<String>, stream: S) -> ConnectionId
    where
        S: Stream<Item = Result<Bytes, E>> + Send + 'static,
        E: std::error::Error + Send + Sync + 'static,
    {
        let endpoint = label.into();
        let id = ConnectionId::new();
        let metrics = Arc::new(Mutex::new(IngestMetrics::new()));
        let tx = self.tx.clone();
        let task_metrics = metrics.clone();
        let task = tokio::spawn(async move {
            if let Err(err) = ingester::pump(stream, id, &tx, &task_metrics).await {
                tracing::warn!(connection = %id, "stream failed: {err}");
            }
        });
        self.register(id, endpoint, task, metrics);
        id
    }

    fn register(
        &self,
        id: ConnectionId,
        endpoint: String,
        task: JoinHandle<()>,
        metrics: Arc<Mutex<IngestMetrics>>,
    ) {
        self.connections.lock().insert(
            id,
            Connection {
                endpoint,
                task,
                metrics,
            },
        );
    }

    /// Retire connections whose task ended on its own (EOF, HTTP error).
    fn reap(&self) {
        let ended: Vec<(ConnectionId, Connection)> = {
            let mut live = self.connections.lock();
            let ids: Vec<ConnectionId> = live
                .iter()
                .filter(|(_, c)| c.task.is_finished())
                .map(|(id, _)| *id)
                .collect();
            ids.into_iter()
                .filter_map(|id| live.remove(&id).map(|c| (id, c)))
                .collect()
        };
        for (id, conn) in ended {
            self.retired.lock().merge(&conn.metrics.lock());
            debug!(connection = %id, endpoint = %conn.endpoint, "retired ended connection");
        }
    }

    /// Stop one live connection. Already-applied events stay in the state.
    /// Returns `false` when `id` is unknown or already ended.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.reap();
        let Some(conn) = self.connections.lock().remove(&id) else {
            return false;
        };
        conn.task.abort();
        self.retired.lock().merge(&conn.metrics.lock());
        info!(connection = %id, endpoint = %conn.endpoint, "disconnected");
        true
    }

    /// Stop every connection that announced `matcher`. Returns how many
    /// were live.
    pub fn disconnect_matcher(&self, matcher: MatcherId) -> usize {
        let ids: Vec<ConnectionId> = self
            .announced
            .read()
            .get(&matcher)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        ids.into_iter().filter(|id| self.disconnect(*id)).count()
    }

    /// Connections whose task is still running.
    pub fn connections(&self) -> Vec<(ConnectionId, String)> {
        self.reap();
        self.connections
            .lock()
            .iter()
            .map(|(id, c)| (*id, c.endpoint.clone()))
            .collect()
    }

    /// Wait for a connection to end on its own, then for its events to be
    /// applied.
    pub async fn finished(&self, id: ConnectionId) {
        let conn = self.connections.lock().remove(&id);
        if let Some(conn) = conn {
            // A panicked or aborted task still counts as finished.
            let _ = conn.task.await;
            self.retired.lock().merge(&conn.metrics.lock());
        }
        self.flush().await;
    }

    /// Resolves once every event queued so far has been applied.
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        if self.tx.send(Inbound::Flush(ack)).is_ok() {
            let _ = done.await;
        }
    }

    /// Totals across live and finished connections.
    pub fn metrics(&self) -> IngestMetrics {
        let mut total = self.retired.lock().clone();
        for conn in self.connections.lock().values() {
            total.merge(&conn.metrics.lock());
        }
        total
    }

    /// Abort every connection and the store task.
    pub fn shutdown(self) {
        for (_, conn) in std::mem::take(&mut *self.connections.lock()) {
            conn.task.abort();
        }
        self.store.abort();
    }
}

async fn store_loop(
    mut rx: mpsc::UnboundedReceiver<Inbound>,
    state: Arc<RwLock<NetworkState>>,
    announced: Arc<RwLock<BTreeMap<MatcherId, BTreeSet<ConnectionId>>>>,
) {
    while let Some(msg) = rx.recv().await {
        match msg {
            Inbound::Event { connection, event } => {
                if let EventKind::Info(info) = &event.kind {
                    debug!(%connection, matcher = %info.id, "matcher announced");
                    announced.write().entry(info.id).or_default().insert(connection);
                }
                state.write().apply(event);
            }
            Inbound::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Session;
    use bytes::Bytes;
    use streaming::MatcherId;

    const HELLO: &str = r#"{"event": -1, "id": 1, "time": 0, "alias": "m1", "pos": {"x": 0, "y": 0}, "aoi": {"isPolygon": false, "center": {"x": 0, "y": 0}, "radius": 100}, "clientList": [], "subscriptions": []}"#;
    const JOIN_A: &str = r#"{"event": 2, "id": 2, "time": 0, "client": {"id": "A", "pos": {"x": 5, "y": 5}, "matcherID": 1}}"#;
    const SUB_S1: &str = r#"{"event": 5, "id": 3, "time": 0, "sub": {"subID": "s1", "channel": "c", "aoi": {"isPolygon": false, "center": {"x": 5, "y": 5}, "radius": 10}, "followClient": true, "clientID": "A", "hostID": 1}}"#;
    const LEAVE_A: &str = r#"{"event": 4, "id": 4, "time": 0, "client": {"id": "A", "pos": {"x": 5, "y": 5}, "matcherID": 1}}"#;

    fn sse(messages: &[&str]) -> impl futures_util::Stream<Item = Result<Bytes, std::io::Error>> {
        let chunks: Vec<Result<Bytes, std::io::Error>> = messages
            .iter()
            .map(|m| Ok(Bytes::from(format!("data: {m}\n\n"))))
            .collect();
        futures_util::stream::iter(chunks)
    }

    #[tokio::test]
    async fn end_to_end_session() {
        let session = Session::new(reqwest::Client::new());
        let id = session.connect_stream("memory", sse(&[HELLO, JOIN_A, SUB_S1, LEAVE_A]));
        session.finished(id).await;

        let state = session.state();
        let state = state.read();
        assert_eq!(state.matchers.len(), 1);
        assert!(state.clients.is_empty());
        assert!(state.subscriptions.is_empty());
        assert_eq!(state.log.len(), 4);
        assert_eq!(session.metrics().counter("messages.decoded"), 4);
    }

    #[tokio::test]
    async fn two_sources_share_one_store() {
        let session = Session::new(reqwest::Client::new());
        let a = session.connect_stream("a", sse(&[HELLO, JOIN_A]));
        let b = session.connect_stream("b", sse(&[SUB_S1, "garbage"]));
        session.finished(a).await;
        session.finished(b).await;

        let state = session.state();
        let state = state.read();
        assert_eq!(state.clients.len(), 1);
        assert_eq!(state.subscriptions.len(), 1);
        assert_eq!(state.log.len(), 3);

        let m = session.metrics();
        assert_eq!(m.counter("messages.received"), 4);
        assert_eq!(m.counter("messages.malformed"), 1);
    }

    #[tokio::test]
    async fn ended_streams_leave_the_live_set() {
        let session = Session::new(reqwest::Client::new());
        let id = session.connect_stream("short", sse(&[HELLO, JOIN_A]));

        for _ in 0..100 {
            if session.connections().is_empty() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        assert!(session.connections().is_empty());
        assert!(!session.disconnect(id));

        session.flush().await;
        assert_eq!(session.state().read().log.len(), 2);
        assert_eq!(session.metrics().counter("messages.decoded"), 2);
    }

    #[tokio::test]
    async fn disconnect_keeps_applied_state() {
        let session = Session::new(reqwest::Client::new());
        // A stream that never ends after its first messages.
        let first = sse(&[HELLO, JOIN_A]);
        let endless = futures_util::StreamExt::chain(first, futures_util::stream::pending());
        let id = session.connect_stream("live", endless);

        // Wait until the hello has been applied.
        for _ in 0..100 {
            session.flush().await;
            if session.state().read().log.len() == 2 {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(session.connections().len(), 1);

        assert_eq!(session.disconnect_matcher(MatcherId(1)), 1);
        assert!(session.connections().is_empty());
        assert!(!session.disconnect(id));

        session.flush().await;
        let state = session.state();
        assert_eq!(state.read().clients.len(), 1);
        assert_eq!(state.read().matchers.len(), 1);
        session.shutdown();
    }
}
