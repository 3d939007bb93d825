mod bank;
mod budget;
mod config;
mod db;
mod error;
mod models;
mod notify;
mod report;
mod run;
mod store;
mod ui;
mod validate;

use anyhow::Result;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use bank::Bank;
use budget::TemplateCatalog;
use config::{Config, Storage};
use notify::DepositNotifier;
use store::{AccountStore, MemoryStore};

fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let config = Config::from_args(
        args.get(1..).unwrap_or_default(),
        std::env::var(config::DB_PATH_ENV).ok(),
    )?;
    tracing::debug!(?config, "starting");

    match &config.storage {
        Storage::Memory => {
            let mut bank = Bank::new(MemoryStore::new(), TemplateCatalog::standard());
            dispatch(&config.command, &mut bank)
        }
        Storage::Sqlite(path) => {
            let db = db::Database::open(path)?;
            let mut bank = Bank::new(db, TemplateCatalog::standard());
            dispatch(&config.command, &mut bank)
        }
    }
}

fn dispatch<S: AccountStore>(command: &[String], bank: &mut Bank<S>) -> Result<()> {
    bank.install_notifier(DepositNotifier::new())?;
    if command.is_empty() {
        run::as_menu(bank)
    } else {
        run::as_cli(command, bank)
    }
}

/// Log to stderr so menu output on stdout stays clean. `RUST_LOG` overrides
/// the default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .init();
}
