mod config;
mod export;
mod ingester;
mod session;

use std::time::Duration;

use bytes::Bytes;
use clap::Parser;
use network::{
    describe_publication, hover_labels, log_line, map_elements, overview, Inspection, LogFilter,
    NetworkState,
};
use streaming::EventKind;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::export::ImageOptions;
use crate::session::Session;

/// How often freshly applied log entries are printed.
const LOG_TICK: Duration = Duration::from_millis(250);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = Config::parse();
    let filter = cfg.log_filter();
    let session = Session::new(reqwest::Client::new());

    let mut replays = Vec::new();
    for path in &cfg.replay {
        match tokio::fs::read(path).await {
            Ok(data) => {
                let chunk: Result<Bytes, std::io::Error> = Ok(Bytes::from(data));
                let id = session
                    .connect_stream(path.display().to_string(), futures_util::stream::iter([chunk]));
                info!(connection = %id, path = %path.display(), "replaying capture");
                replays.push(id);
            }
            Err(err) => error!(path = %path.display(), "cannot read capture: {err}"),
        }
    }
    for endpoint in &cfg.matchers {
        let id = session.connect(endpoint.clone());
        info!(connection = %id, %endpoint, "matcher added");
    }

    let stop = async {
        match cfg.duration_secs {
            Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
            None => {
                if let Err(err) = tokio::signal::ctrl_c().await {
                    error!("cannot listen for Ctrl-C: {err}");
                    std::future::pending::<()>().await;
                }
            }
        }
    };
    tokio::pin!(stop);

    let mut log_tick = tokio::time::interval(LOG_TICK);
    let mut summary_tick = tokio::time::interval(Duration::from_secs(cfg.summary_secs.max(1)));
    let mut next_seq = 0u64;

    // Without live matchers there is nothing to wait for past the captures.
    if cfg.matchers.is_empty() {
        for id in replays {
            session.finished(id).await;
        }
    }

    while !cfg.matchers.is_empty() {
        tokio::select! {
            _ = &mut stop => break,
            _ = log_tick.tick() => {
                next_seq = print_new_entries(&session.state().read(), &filter, next_seq);
            }
            _ = summary_tick.tick(), if cfg.summary_secs > 0 => {
                summarize(&session);
            }
        }
    }

    info!("shutting down");
    session.flush().await;
    print_new_entries(&session.state().read(), &filter, next_seq);
    summarize(&session);

    let state = session.state();
    let (elements, labels, inspection) = {
        let state = state.read();
        let inspection = inspection_for(&state, cfg.inspect.as_deref());
        (
            map_elements(&state, &inspection),
            hover_labels(&state, &inspection),
            inspection,
        )
    };

    for line in overview(&state.read()) {
        println!("{line}");
    }
    if let Some(p) = inspection.current() {
        for line in describe_publication(p) {
            println!("{line}");
        }
    }
    info!(elements = elements.len(), labels = ?labels, "final map");

    if let Some(path) = &cfg.snapshot {
        match export::write_snapshot(path, &elements).await {
            Ok(()) => info!(path = %path.display(), "snapshot written"),
            Err(err) => error!(path = %path.display(), "snapshot failed: {err}"),
        }
    }
    if let Some(path) = &cfg.svg {
        let opts = ImageOptions {
            width: cfg.width,
            height: cfg.height,
            grid_interval: cfg.grid,
            crosshair: !cfg.no_crosshair,
        };
        match export::write_svg(path, &elements, opts).await {
            Ok(()) => info!(path = %path.display(), "image written"),
            Err(err) => error!(path = %path.display(), "image failed: {err}"),
        }
    }

    session.shutdown();
}

/// Print entries with `seq >= next_seq` that pass `filter`, oldest first.
/// Returns the next unseen sequence number.
fn print_new_entries(state: &NetworkState, filter: &LogFilter, next_seq: u64) -> u64 {
    let fresh: Vec<_> = state
        .log
        .iter()
        .take_while(|e| e.seq >= next_seq)
        .collect();
    for entry in fresh.iter().rev() {
        if filter.matches(&entry.event) {
            println!("{}", log_line(entry));
        }
    }
    state.log.latest().map_or(next_seq, |e| e.seq + 1)
}

fn summarize(session: &Session) {
    {
        let state = session.state();
        let state = state.read();
        info!(
            matchers = state.matchers.len(),
            clients = state.clients.len(),
            subscriptions = state.subscriptions.len(),
            log = state.log.len(),
            "network state"
        );
    }
    let snapshot = session.metrics().snapshot();
    info!(counters = ?snapshot.counters, bytes = ?snapshot.message_bytes, "ingest");
    for (id, endpoint) in session.connections() {
        info!(connection = %id, %endpoint, "live");
    }
}

/// Newest publication in the log carrying `pub_id`.
fn inspection_for(state: &NetworkState, pub_id: Option<&str>) -> Inspection {
    let mut inspection = Inspection::new();
    let Some(pub_id) = pub_id else {
        return inspection;
    };
    let found = state.log.iter().find(|e| match &e.event.kind {
        EventKind::Publication(p) => p.pub_id == pub_id,
        _ => false,
    });
    match found {
        Some(entry) => {
            inspection.inspect_entry(entry);
        }
        None => warn!(pub_id, "no such publication in the log"),
    }
    inspection
}
