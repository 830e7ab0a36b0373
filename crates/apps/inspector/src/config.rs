use std::path::PathBuf;

use clap::Parser;
use streaming::EventType;

/// Live inspector for a location-aware publish/subscribe network.
#[derive(Debug, Clone, Parser)]
#[command(name = "inspector", version)]
pub struct Config {
    /// Matcher event-stream URLs (server-sent events).
    #[arg(
        env = "INSPECTOR_MATCHERS",
        value_delimiter = ',',
        required_unless_present = "replay"
    )]
    pub matchers: Vec<String>,

    /// Recorded `text/event-stream` captures to fold in before anything else.
    #[arg(long)]
    pub replay: Vec<PathBuf>,

    /// Write the map element list as JSON on shutdown.
    #[arg(long, env = "INSPECTOR_SNAPSHOT")]
    pub snapshot: Option<PathBuf>,

    /// Write the fitted map as SVG on shutdown.
    #[arg(long, env = "INSPECTOR_SVG")]
    pub svg: Option<PathBuf>,

    #[arg(long, env = "INSPECTOR_WIDTH", default_value_t = 1280.0)]
    pub width: f64,

    #[arg(long, env = "INSPECTOR_HEIGHT", default_value_t = 720.0)]
    pub height: f64,

    /// Grid interval in logical units; 0 disables the grid.
    #[arg(long, env = "INSPECTOR_GRID", default_value_t = map::DEFAULT_GRID_INTERVAL)]
    pub grid: f64,

    /// Hide the center crosshair in image exports.
    #[arg(long)]
    pub no_crosshair: bool,

    /// Seconds between state summaries; 0 disables them.
    #[arg(long, env = "INSPECTOR_SUMMARY_SECS", default_value_t = 5)]
    pub summary_secs: u64,

    /// Stop after this many seconds instead of waiting for Ctrl-C.
    #[arg(long, env = "INSPECTOR_DURATION_SECS")]
    pub duration_secs: Option<u64>,

    /// Event types to leave out of the printed log (e.g. `client-move`).
    #[arg(long = "hide-type", value_parser = parse_event_type)]
    pub hide_types: Vec<EventType>,

    #[arg(long = "hide-client")]
    pub hide_clients: Vec<String>,

    #[arg(long = "hide-channel")]
    pub hide_channels: Vec<String>,

    /// Publication id to highlight in exports.
    #[arg(long)]
    pub inspect: Option<String>,
}

fn parse_event_type(s: &str) -> Result<EventType, String> {
    EventType::parse(s).ok_or_else(|| {
        let known: Vec<&str> = EventType::ALL.iter().map(|t| t.as_str()).collect();
        format!("unknown event type `{s}` (expected one of: {})", known.join(", "))
    })
}

impl Config {
    pub fn log_filter(&self) -> network::LogFilter {
        let mut filter = network::LogFilter::new();
        for tag in &self.hide_types {
            filter.set_type(*tag, false);
        }
        for client in &self.hide_clients {
            filter.set_client_hidden(client.clone(), true);
        }
        for channel in &self.hide_channels {
            filter.set_channel_hidden(channel.clone(), true);
        }
        filter
    }
}
