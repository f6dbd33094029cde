//! Command-line driver for `folio_core`.
//!
//! # Responsibility
//! - Exercise the guestbook against a SQLite-backed slot from a terminal.
//! - Run the particle simulation headless and print a deterministic summary.
//!
//! # Invariants
//! - Failures print one `error:` line to stderr and exit non-zero.
//! - Output is stable for a given seed and database state.

use clap::{Parser, Subcommand};
use folio_core::db::open_db;
use folio_core::{
    core_version, default_log_level, format_relative_time, init_logging, Clock, FieldConfig,
    GuestbookStore, ParticleField, SqliteKvStore, SystemClock, Viewport, STORAGE_KEY,
};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_DB_FILE_NAME: &str = "folio_guestbook.sqlite3";

#[derive(Parser)]
#[command(name = "folio", version)]
#[command(about = "Guestbook and particle-field driver for the folio site core")]
#[command(
    after_help = "Environment:\n  FOLIO_DB_PATH   Guestbook database file\n  FOLIO_LOG_DIR   Enables rolling file logs in this directory"
)]
struct Cli {
    #[arg(long, global = true, env = "FOLIO_DB_PATH")]
    db: Option<PathBuf>,
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[arg(long, global = true, env = "FOLIO_LOG_DIR")]
    log_dir: Option<PathBuf>,
    #[arg(long, global = true, default_value = STORAGE_KEY)]
    key: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Post a message.
    Post {
        #[arg(long)]
        name: String,
        #[arg(long)]
        message: String,
    },
    /// List messages newest-first.
    List,
    /// Delete every message.
    Clear,
    /// Simulate the particle field without a screen.
    Particles {
        #[arg(long, default_value_t = 600)]
        frames: u32,
        #[arg(long, default_value_t = 1280.0)]
        width: f64,
        #[arg(long, default_value_t = 720.0)]
        height: f64,
        #[arg(long, default_value_t = 7)]
        seed: u64,
        #[arg(long, default_value_t = 50)]
        count: usize,
    },
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, &log_dir.to_string_lossy()).map_err(|err| err.to_string())?;
    }

    match cli.command {
        Command::Post { name, message } => {
            with_store(cli.db, &cli.key, |store| {
                let count = store
                    .submit(&name, &message)
                    .map_err(|err| err.to_string())?
                    .len();
                println!("posted count={count}");
                Ok(())
            })
        }
        Command::List => with_store(cli.db, &cli.key, |store| {
            if store.is_empty() {
                println!("no messages");
            }
            let now_ms = store.clock().now_ms();
            for message in store.messages() {
                println!(
                    "{}  {} ({}): {}",
                    message.id,
                    message.author,
                    format_relative_time(message, now_ms),
                    message.body
                );
            }
            Ok(())
        }),
        Command::Clear => with_store(cli.db, &cli.key, |store| {
            let removed = store.len();
            store.clear();
            println!("cleared removed={removed}");
            Ok(())
        }),
        Command::Particles {
            frames,
            width,
            height,
            seed,
            count,
        } => {
            simulate(frames, Viewport::new(width, height), seed, count);
            Ok(())
        }
        Command::Version => {
            println!("folio_core version={}", core_version());
            Ok(())
        }
    }
}

fn with_store(
    db: Option<PathBuf>,
    key: &str,
    action: impl FnOnce(&mut GuestbookStore<SqliteKvStore<'_>, SystemClock>) -> Result<(), String>,
) -> Result<(), String> {
    let path = db.unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));
    let conn = open_db(&path).map_err(|err| format!("{}: {err}", path.display()))?;

    let mut store = GuestbookStore::with_key(SqliteKvStore::new(&conn), SystemClock, key);
    store.load();
    info!(
        "event=cli_open module=cli status=ok key={} count={}",
        key,
        store.len()
    );
    action(&mut store)?;
    if !store.persistence_available() {
        return Err(format!("storage at {} rejected a write", path.display()));
    }
    Ok(())
}

fn simulate(frames: u32, viewport: Viewport, seed: u64, count: usize) {
    let mut rng = StdRng::seed_from_u64(seed);
    let config = FieldConfig {
        count,
        ..FieldConfig::default()
    };
    let mut field = ParticleField::spawn(config, viewport, &mut rng);

    let mut visible_sum = 0.0;
    for _ in 0..frames {
        visible_sum += field.step().iter().map(|p| p.opacity).sum::<f64>();
    }

    let samples = (frames as usize * field.len()).max(1);
    let (near, far) = field
        .particles()
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(near, far), particle| {
            (near.min(particle.position.z), far.max(particle.position.z))
        });
    println!(
        "particles={} frames={} viewport={}x{} mean_opacity={:.4} depth_range={:.1}..{:.1}",
        field.len(),
        frames,
        viewport.width,
        viewport.height,
        visible_sum / samples as f64,
        near,
        far
    );
}
