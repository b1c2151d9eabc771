#[macro_use]
extern crate diesel_migrations;

use crate::db::error::DbError::UnknownDbType;
use crate::db::migration;
use crate::opt::{Cli, Commands, Db, Run};
use anketo_db::sea_orm::{ConnectOptions, Database};
use anketo_utils::net::create_listener;
use anyhow::{Result, anyhow};
use axum::serve;
use clap::Parser;
use std::env;
use std::net::{IpAddr, Ipv4Addr};
use url::Url;

mod app;
mod db;
mod opt;
mod routes;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
const DEFAULT_PORT: u16 = 3030;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run(run) => run_server(run).await,
    }
}

async fn run_server(opt: Run) -> Result<()> {
    let _guard = anketo_utils::tracing::setup(
        anketo_utils::tracing::TracingConfig::builder()
            .package(env!("CARGO_PKG_NAME"))
            .version(env!("CARGO_PKG_VERSION"))
            .sentry_dsn(opt.sentry_dsn.clone())
            .env(opt.env.clone())
            .build(),
    )?;

    let db_engine_type = env::var("ENGINE_DB_TYPE").map_err(|e| anyhow!("Cant find env: \"ENGINE_DB_TYPE\" {e:?}"))?;
    let db_url_string = match db_engine_type.as_str() {
        #[cfg(feature = "sqlite")]
        "sqlite" => env::var("SQLITE_URL")?,

        #[cfg(feature = "postgres")]
        "postgresql" => env::var("POSTGRESQL_URL")?,

        _ => return Err(UnknownDbType(db_engine_type).into()),
    };
    let db_url = Url::parse(&db_url_string)?;
    migration(&db_url)
        .await
        .inspect_err(|error| tracing::error!(error = error as &dyn std::error::Error, "failed to run migrations"))?;

    let pool = Database::connect(build_connect_options(&opt.db, db_url)).await?;

    let app = app::create_app(&opt, pool)?;
    let listener = create_listener((opt.host, opt.port), (DEFAULT_HOST, DEFAULT_PORT)).await?;

    tracing::info!(local_addr = %listener.local_addr()?, "starting app");
    serve(listener, app.into_make_service()).await?;
    Ok(())
}

fn build_connect_options(db: &Db, url: Url) -> ConnectOptions {
    let mut options = ConnectOptions::new(url.to_string());
    if let Some(min_connections) = db.db_min_connections {
        options.min_connections(min_connections);
    }
    if let Some(max_connections) = db.db_max_connections {
        options.max_connections(max_connections);
    }
    options
}
