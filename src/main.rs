use assocq::level::Level;
use assocq::priority_queue::PriorityQueue;
use assocq::shell::Shell;

use serde::Deserialize;
use std::io::{self, BufRead, Write};
use tracing::{debug, subscriber};
use tracing_subscriber::FmtSubscriber;

#[derive(Deserialize, Debug)]
struct Config {
    order: Option<String>,
    levels: Option<Vec<i64>>,
    log_level: Option<String>,
}

pub fn main() -> anyhow::Result<()> {
    let config = envy::prefixed("ASSOCQ_").from_env::<Config>()?;

    let max_level = config
        .log_level
        .as_deref()
        .unwrap_or("info")
        .parse::<tracing::Level>()?;
    let subscriber = FmtSubscriber::builder()
        .with_max_level(max_level)
        .with_writer(io::stderr)
        .finish();
    subscriber::set_global_default(subscriber)?;

    // Out-of-range entries become 0, which the queue drops from its fixed set.
    let levels: Vec<u32> = config
        .levels
        .unwrap_or_default()
        .into_iter()
        .map(|raw| Level::from_raw(raw).value().unwrap_or(0))
        .collect();
    let queue = PriorityQueue::with_order_name(config.order.as_deref().unwrap_or_default(), &levels);
    debug!(order = %queue.order(), fixed = ?queue.fixed_levels(), "queue ready");

    let mut shell = Shell::new(queue);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match shell.process_line(&line) {
            Ok(reply) => writeln!(out, "{}", reply)?,
            Err(err) => writeln!(out, "ERR {}", err)?,
        }
    }

    Ok(())
}
