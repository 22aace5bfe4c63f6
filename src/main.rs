#[macro_use]
extern crate log;

use chrono::FixedOffset;
use clap::Parser;
use etaboard::{Engine, EtaClient, Location, Snapshot};
use std::time::Duration;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Opts {
    #[clap(long, arg_enum, default_value = "tsuen-wan-garden")]
    location: Location,
    #[clap(long, env = "ETABOARD_API_URL", default_value = "https://data.etabus.gov.hk")]
    api_url: String,
    #[clap(long, default_value = "30")]
    refresh_seconds: u64,
    /// Render one refresh cycle and exit.
    #[clap(long)]
    once: bool,
}

#[tokio::main]
async fn main() {
    pretty_env_logger::formatted_timed_builder()
        .parse_filters(&std::env::var("RUST_LOG").unwrap_or("info".to_string()))
        .init();
    let opts = Opts::parse();

    let client = match EtaClient::new(&opts.api_url) {
        Ok(client) => client,
        Err(e) => {
            error!("failed to build http client with error: '{}'", e);
            return;
        }
    };

    let (engine, handle) = Engine::new(
        client,
        opts.location,
        Duration::from_secs(opts.refresh_seconds),
    );
    tokio::spawn(engine.run());

    let mut snapshots = handle.subscribe();
    while snapshots.changed().await.is_ok() {
        let snapshot = snapshots.borrow().clone();
        render(handle.location(), &snapshot);
        if opts.once {
            return;
        }
    }
}

fn render(location: Location, snapshot: &Snapshot) {
    println!();
    println!("{}", location.name());
    for (route, _) in location.route_set().iter() {
        match snapshot.routes.get(route) {
            Some(countdowns) if !countdowns.is_empty() => {
                let line = countdowns
                    .iter()
                    .map(|c| {
                        if c.remark.is_empty() {
                            format!("{} 分鐘", c.minutes)
                        } else {
                            format!("{} 分鐘 ({})", c.minutes, c.remark)
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("  {:>4}  {}", route, line);
            }
            _ => println!("  {:>4}  -", route),
        }
    }
    if let Some(updated) = snapshot.last_updated {
        let hkt = FixedOffset::east_opt(8 * 3600).unwrap();
        println!(
            "最後更新: {}",
            updated.with_timezone(&hkt).format("%Y-%m-%d %H:%M:%S")
        );
    }
}
