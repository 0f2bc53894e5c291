#[macro_use]
extern crate log;

mod cli;
mod config;

use anyhow::Result;
use clap::Parser as _;

use endb_db_sqlite::Connections;

fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();
    let args = cli::Args::parse();
    if let Err(err) = run(args) {
        error!("{err}");
        std::process::exit(1);
    }
}

fn run(args: cli::Args) -> Result<()> {
    let cfg = config::Config::try_load_from_file_or_default(args.config.as_deref())?;

    let db_url = args.db_url.unwrap_or(cfg.db.conn_sqlite);
    let pool_size = cfg.db.conn_pool_size;
    info!("Connecting to SQLite database '{db_url}' (pool size {pool_size})");
    let connections = Connections::init(&db_url, pool_size.into())?;
    endb_db_sqlite::run_embedded_database_migrations(connections.exclusive()?);

    let enable_cors = args.enable_cors || cfg.webserver.enable_cors;
    if enable_cors {
        warn!("CORS is enabled, requests from any origin are accepted");
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(endb_webserver::run(connections, args.port, enable_cors));
    Ok(())
}
