//! `butil` CLI — run the browser-utils helpers from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Deep-clone a JSON document (stdin → stdout, pretty-printed)
//! echo '[1,[2,3],{"a":4}]' | butil clone
//!
//! # Parse a URL's query string
//! butil query 'https://example.com/?q=rust&page=2'
//!
//! # Format a timestamp (template 2 = date only) in a fixed timezone
//! butil date 0 --format 2 --tz UTC
//!
//! # Numbers
//! butil thousands 1234567
//! butil filter-numeric '-12a.3b4'
//! butil divide 12345            # 123.45 (divisor defaults to 100)
//! butil keep-decimals 5 --by 4   # 1.25
//!
//! # File-backed local/session storage
//! butil storage --store ./.butil set user '{"name":"Alice"}'
//! butil storage --store ./.butil get user
//! butil storage --store ./.butil --session remove user
//! ```
//!
//! Logs go to stderr; set `RUST_LOG` or pass `-v` for debug output.

use anyhow::{Context, Result};
use browser_utils::{
    BrowserStorage, DateFormat, FileStore, StorageArea, DEFAULT_DIGITS, DEFAULT_FACTOR,
};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "butil", version, about = "Browser-oriented utility functions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Deep-clone a JSON array or object
    Clone {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Parse the query string of a URL into a JSON object
    Query {
        url: String,
    },
    /// Count the bytes of a string (reads stdin if omitted)
    Bytes {
        text: Option<String>,
    },
    /// Generate random UUIDs
    Uuid {
        /// How many to print, one per line
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },
    /// Format an epoch-millisecond timestamp
    Date {
        /// Milliseconds since the epoch (returned unchanged if not numeric)
        #[arg(allow_hyphen_values = true)]
        input: String,
        /// Template selector 0-5; omitted or any other number prints the
        /// full date and time
        #[arg(short, long)]
        format: Option<u8>,
        /// Date separator
        #[arg(short, long, default_value = "-")]
        sep: String,
        /// IANA timezone
        #[arg(long, env = "BUTIL_TZ", default_value = "UTC")]
        tz: String,
    },
    /// Whole days between a Y-M-D date and now, in either direction
    Days {
        date: String,
        /// IANA timezone
        #[arg(long, env = "BUTIL_TZ", default_value = "UTC")]
        tz: String,
    },
    /// Insert thousands separators into a number
    Thousands {
        #[arg(allow_negative_numbers = true)]
        number: f64,
    },
    /// Keep digits and '.', plus '-' when the text starts with one
    FilterNumeric {
        #[arg(allow_hyphen_values = true)]
        text: String,
    },
    /// Detect the IE version from a user-agent string (prints 6-11, "edge" or -1)
    Ie {
        user_agent: String,
    },
    /// Remove objects with a repeated key from a JSON array
    Dedup {
        /// Key field to compare
        #[arg(short, long)]
        key: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Divide a value and print the plain quotient ("" for zero or non-numeric input)
    Divide {
        #[arg(allow_hyphen_values = true)]
        value: String,
        #[arg(long, allow_negative_numbers = true, default_value_t = DEFAULT_FACTOR)]
        by: f64,
    },
    /// Multiply a value and print it with fixed decimals
    Multiply {
        #[arg(allow_hyphen_values = true)]
        value: String,
        #[arg(long, allow_negative_numbers = true, default_value_t = DEFAULT_FACTOR)]
        by: f64,
        #[arg(short, long, default_value_t = DEFAULT_DIGITS)]
        digits: usize,
    },
    /// Divide a value and print it with fixed decimals
    KeepDecimals {
        #[arg(allow_hyphen_values = true)]
        value: String,
        #[arg(long, allow_negative_numbers = true, default_value_t = DEFAULT_FACTOR)]
        by: f64,
        #[arg(short, long, default_value_t = DEFAULT_DIGITS)]
        digits: usize,
    },
    /// File-backed local/session storage
    Storage {
        /// Directory holding local.json and session.json
        #[arg(long, env = "BUTIL_STORE", default_value = ".butil")]
        store: PathBuf,
        /// Target session storage instead of local storage
        #[arg(long)]
        session: bool,
        #[command(subcommand)]
        action: StorageAction,
    },
}

#[derive(Subcommand)]
enum StorageAction {
    /// Print the JSON value stored under a key ("" when missing)
    Get { key: String },
    /// Store a JSON value under a key
    Set {
        key: String,
        /// JSON text; plain text that is not JSON is stored as a string
        value: String,
    },
    /// Remove a key
    Remove { key: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Clone { input, output } => {
            let json = read_input(input.as_deref())?;
            let value: Value = serde_json::from_str(&json).context("Input is not valid JSON")?;
            let copy = browser_utils::deep_clone(&value).context("Failed to clone value")?;
            write_output(output.as_deref(), &serde_json::to_string_pretty(&copy)?)?;
        }
        Commands::Query { url } => {
            let params = browser_utils::query_object(&url);
            println!("{}", serde_json::to_string_pretty(&params)?);
        }
        Commands::Bytes { text } => {
            let text = match text {
                Some(text) => text,
                None => {
                    let mut buf = read_input(None)?;
                    if buf.ends_with('\n') {
                        buf.pop();
                    }
                    buf
                }
            };
            println!("{}", browser_utils::byte_length(&text));
        }
        Commands::Uuid { count } => {
            for _ in 0..count {
                println!("{}", browser_utils::uuid());
            }
        }
        Commands::Date {
            input,
            format,
            sep,
            tz,
        } => {
            let tz = parse_timezone(&tz)?;
            let formatted =
                browser_utils::format_date(&input, DateFormat::from_optional(format), &sep, &tz);
            println!("{}", formatted);
        }
        Commands::Days { date, tz } => {
            let tz = parse_timezone(&tz)?;
            let days = browser_utils::date_diff_now(&date, &tz)
                .with_context(|| format!("Not a valid Y-M-D date: '{}'", date))?;
            println!("{}", days);
        }
        Commands::Thousands { number } => {
            println!("{}", browser_utils::thousands(number));
        }
        Commands::FilterNumeric { text } => {
            println!("{}", browser_utils::filter_numeric(&text));
        }
        Commands::Ie { user_agent } => {
            println!("{}", browser_utils::ie_version(&user_agent).sentinel());
        }
        Commands::Dedup { key, input } => {
            let json = read_input(input.as_deref())?;
            let items: Vec<Value> =
                serde_json::from_str(&json).context("Input is not a JSON array")?;
            let unique = browser_utils::dedup_by_key(&items, &key);
            println!("{}", serde_json::to_string_pretty(&unique)?);
        }
        Commands::Divide { value, by } => {
            println!("{}", browser_utils::divide(&value, by));
        }
        Commands::Multiply { value, by, digits } => {
            println!("{}", browser_utils::multiply(&value, by, digits));
        }
        Commands::KeepDecimals { value, by, digits } => {
            println!("{}", browser_utils::keep_decimals(&value, by, digits));
        }
        Commands::Storage {
            store,
            session,
            action,
        } => {
            let storage = BrowserStorage::new(
                FileStore::open(store.join("local.json")),
                FileStore::open(store.join("session.json")),
            );
            let area = if session {
                StorageArea::Session
            } else {
                StorageArea::Local
            };
            run_storage(&storage, area, action)?;
        }
    }

    Ok(())
}

fn run_storage(storage: &BrowserStorage<FileStore>, area: StorageArea, action: StorageAction) -> Result<()> {
    match action {
        StorageAction::Get { key } => {
            let value = storage
                .get(area, &key)
                .with_context(|| format!("Failed to read key '{}'", key))?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        StorageAction::Set { key, value } => {
            let parsed = serde_json::from_str::<Value>(&value).unwrap_or(Value::String(value));
            storage
                .set(area, &key, &parsed)
                .with_context(|| format!("Failed to write key '{}'", key))?;
        }
        StorageAction::Remove { key } => {
            storage
                .remove(area, &key)
                .with_context(|| format!("Failed to remove key '{}'", key))?;
        }
    }
    Ok(())
}

/// Install the stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "browser_utils=debug,butil=debug"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| anyhow::anyhow!("Unknown timezone: '{}'", name))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
