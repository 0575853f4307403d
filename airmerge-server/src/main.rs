//! airmerge: poller CLI for flight-feed fusion.
//!
//! Fetches a commercial tracker feed (A) and a local surveillance feed
//! (B) each tick, runs one fusion cycle, prints the result, and
//! dispatches appeared/disappeared watch-list events. All blocking I/O
//! happens here, before the core engine is invoked; a failed fetch
//! skips the whole cycle including the delta.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::{Args, Parser, Subcommand};
use comfy_table::{Cell, Table};

use airmerge_core::config::{self, Config};
use airmerge_core::delta::DeltaTracker;
use airmerge_core::engine;
use airmerge_core::types::{AirmergeError, FeedARecord, FusedFlight, Result};

mod ingest;
mod notification;

use notification::WebhookDispatcher;

#[derive(Parser)]
#[command(name = "airmerge", version, about = "Flight-feed fusion and watch-list tracker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll both feeds and watch for tracked aircraft
    Watch(WatchArgs),

    /// One-shot merge of two feed documents from local files
    Merge(MergeArgs),

    /// Show or initialize the config file
    Config {
        /// Write a default config file to ~/.airmerge/config.yaml
        #[arg(long)]
        init: bool,
    },
}

#[derive(Args)]
struct WatchArgs {
    /// Feed A (commercial tracker) JSON URL
    #[arg(long, env = "AIRMERGE_FEED_A_URL")]
    feed_a_url: Option<String>,

    /// Feed B (surveillance receiver) aircraft.json URL
    #[arg(long, env = "AIRMERGE_FEED_B_URL")]
    feed_b_url: Option<String>,

    /// Poll interval in seconds
    #[arg(long)]
    interval: Option<u64>,

    #[command(flatten)]
    watch_list: WatchListArgs,

    /// Webhook URL for tracking events
    #[arg(long)]
    webhook: Option<String>,
}

#[derive(Args)]
struct MergeArgs {
    /// Path to a feed A JSON document
    #[arg(long)]
    feed_a: Option<PathBuf>,

    /// Path to a feed B aircraft.json document
    #[arg(long)]
    feed_b: Option<PathBuf>,

    #[command(flatten)]
    watch_list: WatchListArgs,
}

#[derive(Args)]
struct WatchListArgs {
    /// Enable watch-list tracking
    #[arg(long)]
    track: bool,

    /// Match mode: callsign, registration, or both
    #[arg(long)]
    mode: Option<String>,

    /// Comma-separated watched callsigns
    #[arg(long)]
    callsigns: Option<String>,

    /// Comma-separated watched registrations
    #[arg(long)]
    registrations: Option<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Watch(args) => cmd_watch(args).await,
        Commands::Merge(args) => cmd_merge(args),
        Commands::Config { init } => cmd_config(init),
    }
}

// ---------------------------------------------------------------------------
// watch
// ---------------------------------------------------------------------------

async fn cmd_watch(args: WatchArgs) {
    let mut cfg = config::load_config();
    if let Some(u) = args.feed_a_url {
        cfg.feed_a.url = Some(u);
    }
    if let Some(u) = args.feed_b_url {
        cfg.feed_b.url = Some(u);
    }
    if let Some(i) = args.interval {
        cfg.poll.interval_secs = i;
    }
    if let Some(w) = args.webhook {
        cfg.webhook = Some(w);
    }
    apply_watch_list_args(&mut cfg, &args.watch_list);

    let feed_b_url = match cfg.feed_b.url.clone() {
        Some(u) => u,
        None => {
            eprintln!("No feed B URL configured (use --feed-b-url or `airmerge config --init`)");
            std::process::exit(1);
        }
    };

    let watch = cfg.tracking.to_watch_config();
    let mode = watch.mode;
    let interval = cfg.poll.interval_secs.max(1);

    let client = reqwest::Client::new();
    let dispatcher = cfg.webhook.as_deref().map(WebhookDispatcher::new);
    let mut tracker = DeltaTracker::new();
    let mut ticker = tokio::time::interval(Duration::from_secs(interval));

    println!("Polling every {interval}s — Ctrl-C to stop");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!("\nStopping.");
                break;
            }
            _ = ticker.tick() => {
                let (feed_a, doc) =
                    match poll_once(&client, cfg.feed_a.url.as_deref(), &feed_b_url).await {
                        Ok(v) => v,
                        Err(e) => {
                            // Skip the whole cycle, delta included, so a
                            // transient outage never fires "disappeared".
                            eprintln!("[watch] {e} — skipping cycle");
                            continue;
                        }
                    };

                let timestamp = doc.now.unwrap_or_else(unix_now);
                let messages = doc.messages.unwrap_or(0);
                let feed_b = doc.into_records();
                let out = engine::run_cycle(&feed_a, &feed_b, &watch, &mut tracker);

                println!(
                    "{} flights ({} feed A, {} feed B, {messages} msgs), {} tracked",
                    out.flights.len(),
                    out.feed_a_count,
                    out.feed_b_count,
                    out.active_targets.len()
                );

                for target in &out.delta.appeared {
                    println!("  [tracked] appeared: {target}");
                    if let Some(d) = &dispatcher {
                        d.notify("appeared", target, timestamp, mode);
                    }
                }
                for target in &out.delta.disappeared {
                    println!("  [tracked] disappeared: {target}");
                    if let Some(d) = &dispatcher {
                        d.notify("disappeared", target, timestamp, mode);
                    }
                }
            }
        }
    }
}

/// Fetch and parse both feeds for one cycle. Feed A is optional by
/// configuration; feed B is not. Any failure aborts the cycle.
async fn poll_once(
    client: &reqwest::Client,
    feed_a_url: Option<&str>,
    feed_b_url: &str,
) -> Result<(Vec<FeedARecord>, ingest::FeedBDoc)> {
    let feed_a = match feed_a_url {
        Some(url) => {
            let text = fetch_text(client, url).await?;
            ingest::parse_feed_a(&text)?.into_records()
        }
        None => Vec::new(),
    };

    let text = fetch_text(client, feed_b_url).await?;
    let doc = ingest::parse_feed_b(&text)?;

    Ok((feed_a, doc))
}

async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String> {
    let resp = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| AirmergeError::Feed(format!("GET {url}: {e}")))?;
    resp.text()
        .await
        .map_err(|e| AirmergeError::Feed(format!("read {url}: {e}")))
}

fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// merge
// ---------------------------------------------------------------------------

fn cmd_merge(args: MergeArgs) {
    let feed_a = match &args.feed_a {
        Some(path) => {
            let text = read_file(path);
            ingest::parse_feed_a(&text)
                .unwrap_or_else(|e| fatal(&e))
                .into_records()
        }
        None => Vec::new(),
    };
    let feed_b = match &args.feed_b {
        Some(path) => {
            let text = read_file(path);
            ingest::parse_feed_b(&text)
                .unwrap_or_else(|e| fatal(&e))
                .into_records()
        }
        None => Vec::new(),
    };

    let mut cfg = Config::default();
    apply_watch_list_args(&mut cfg, &args.watch_list);
    let watch = cfg.tracking.to_watch_config();

    let flights = engine::fuse(&feed_a, &feed_b, &watch);

    print_table(&flights);
    println!(
        "{} flights ({} feed A, {} feed B)",
        flights.len(),
        feed_a.len(),
        feed_b.len()
    );
}

fn read_file(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {e}", path.display());
        std::process::exit(1);
    })
}

fn fatal<T>(e: &AirmergeError) -> T {
    eprintln!("Error: {e}");
    std::process::exit(1)
}

fn print_table(flights: &[FusedFlight]) {
    let mut table = Table::new();
    table.set_header(vec![
        "Callsign", "Reg", "Hex", "Source", "Alt m", "Spd km/h", "Dist km", "Brg", "Airline",
        "Model", "Watch",
    ]);

    for f in flights {
        table.add_row(vec![
            Cell::new(&f.callsign),
            Cell::new(dash_if_empty(&f.registration)),
            Cell::new(dash_if_empty(&f.hex)),
            Cell::new(f.source.to_string()),
            Cell::new(fmt_opt(f.altitude_m)),
            Cell::new(fmt_opt(f.speed_kmh)),
            Cell::new(fmt_opt(f.distance_km)),
            Cell::new(fmt_opt(f.bearing_deg)),
            Cell::new(dash_if_empty(&f.airline)),
            Cell::new(dash_if_empty(&f.model)),
            Cell::new(if f.tracked {
                format!("{} ({})", f.tracked_target, f.tracked_by)
            } else {
                "-".to_string()
            }),
        ]);
    }

    println!("{table}");
}

fn dash_if_empty(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{v}"),
        None => "-".to_string(),
    }
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

fn cmd_config(init: bool) {
    if init {
        match config::save_config(&Config::default()) {
            Ok(path) => println!("Wrote {}", path.display()),
            Err(e) => fatal(&e),
        }
        return;
    }

    let path = config::config_file();
    let cfg = config::load_config();
    let status = if path.exists() { "present" } else { "missing, using defaults" };

    println!("Config file: {} ({status})", path.display());
    println!("  feed_a.url: {}", cfg.feed_a.url.as_deref().unwrap_or("null"));
    println!("  feed_b.url: {}", cfg.feed_b.url.as_deref().unwrap_or("null"));
    println!("  poll.interval_secs: {}", cfg.poll.interval_secs);
    println!("  tracking.enabled: {}", cfg.tracking.enabled);
    println!("  tracking.mode: {}", cfg.tracking.mode);
    println!("  tracking.callsigns: \"{}\"", cfg.tracking.callsigns);
    println!("  tracking.registrations: \"{}\"", cfg.tracking.registrations);
    println!("  webhook: {}", cfg.webhook.as_deref().unwrap_or("null"));
}

// ---------------------------------------------------------------------------
// shared override layering
// ---------------------------------------------------------------------------

fn apply_watch_list_args(cfg: &mut Config, args: &WatchListArgs) {
    if args.track {
        cfg.tracking.enabled = true;
    }
    if let Some(m) = &args.mode {
        cfg.tracking.mode = m.clone();
    }
    if let Some(c) = &args.callsigns {
        cfg.tracking.callsigns = c.clone();
    }
    if let Some(r) = &args.registrations {
        cfg.tracking.registrations = r.clone();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use airmerge_core::watchlist::TrackMode;

    #[test]
    fn test_watch_list_args_override_config() {
        let mut cfg = Config::default();
        let args = WatchListArgs {
            track: true,
            mode: Some("both".into()),
            callsigns: Some("LH123".into()),
            registrations: None,
        };
        apply_watch_list_args(&mut cfg, &args);

        assert!(cfg.tracking.enabled);
        let watch = cfg.tracking.to_watch_config();
        assert_eq!(watch.mode, TrackMode::Both);
        assert!(watch.callsigns.contains("LH123"));
        assert!(watch.registrations.is_empty());
    }

    #[test]
    fn test_fmt_opt() {
        assert_eq!(fmt_opt(Some(12.3)), "12.3");
        assert_eq!(fmt_opt(Some(3048.0)), "3048");
        assert_eq!(fmt_opt(None), "-");
    }

    #[test]
    fn test_dash_if_empty() {
        assert_eq!(dash_if_empty(""), "-");
        assert_eq!(dash_if_empty("D-ABCD"), "D-ABCD");
    }
}
