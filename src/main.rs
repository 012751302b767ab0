//! Policy Cache - command driver
//!
//! Reads cache commands from stdin, one per line, and runs them against a
//! cache built from environment configuration.
//!
//! # Commands
//! - `put <key> <value>` - Store a value (prints `DISCARD: <key>` on eviction)
//! - `get <key>` - Print the value, or `None`
//! - `print` - Print every entry, sorted by key
//! - `stats` - Print cache statistics as JSON

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use policy_cache::{BoundedCache, Config};

/// A parsed input line.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Put {
        key: Option<String>,
        value: Option<String>,
    },
    Get {
        key: Option<String>,
    },
    Print,
    Stats,
}

impl Command {
    /// Parses one line. Blank lines and `#` comments yield `None`.
    fn parse(line: &str) -> anyhow::Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };
        let (first, second) = match rest.split_once(char::is_whitespace) {
            Some((first, second)) => (first, second.trim()),
            None => (rest, ""),
        };
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());

        let command = match verb.to_ascii_lowercase().as_str() {
            "put" => Command::Put {
                key: non_empty(first),
                value: non_empty(second),
            },
            "get" => Command::Get {
                key: non_empty(first),
            },
            "print" => Command::Print,
            "stats" => Command::Stats,
            other => bail!("unknown command '{}'", other),
        };
        Ok(Some(command))
    }
}

fn run_command(
    cache: &mut BoundedCache<String, String>,
    command: Command,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Command::Put { key, value } => {
            if let Some(evicted) = cache.put(key, value) {
                writeln!(out, "DISCARD: {}", evicted)?;
            }
        }
        Command::Get { key } => match cache.get(key.as_ref()) {
            Ok(value) => writeln!(out, "{}", value)?,
            Err(_) => writeln!(out, "None")?,
        },
        Command::Print => {
            writeln!(out, "Current cache:")?;
            for (key, value) in cache.snapshot() {
                writeln!(out, "{}: {}", key, value)?;
            }
        }
        Command::Stats => {
            let json = serde_json::to_string_pretty(&cache.stats())?;
            writeln!(out, "{}", json)?;
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "policy_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: max_items={}, policy={}, heap_factor={}",
        config.max_items, config.policy, config.heap_factor
    );

    let mut cache: BoundedCache<String, String> =
        BoundedCache::from_config(&config).context("invalid cache configuration")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for (number, line) in stdin.lock().lines().enumerate() {
        let line = line.context("failed to read stdin")?;
        match Command::parse(&line) {
            Ok(Some(command)) => run_command(&mut cache, command, &mut out)?,
            Ok(None) => {}
            Err(err) => warn!("line {}: {}", number + 1, err),
        }
    }

    out.flush()?;
    info!("Processed input, {} entries resident", cache.len());
    Ok(())
}
