#![deny(missing_docs)]
//! Tablecheck server executable.
//!
//! Hosts HTTP endpoints that parse inspection report texts into violations
//! and star ratings.

mod config;
mod openapi;
mod routes;

#[cfg(not(test))]
use actix_cors::Cors;
#[cfg(not(test))]
use actix_web::{App, HttpServer, http::header, web};
#[cfg(not(test))]
use dotenvy::dotenv;

#[cfg(not(test))]
use crate::config::ServerConfig;
#[cfg(not(test))]
use crate::routes::{
    AppState, inspect, inspect_batch, openapi_json, replace_severity_table, severity_table,
};

#[cfg(not(test))]
fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env().map_err(std::io::Error::other)?;
    let table = config
        .load_severity_table()
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    log::info!(
        "severity table ready: {} severe, {} major, {} moderate, {} minor code(s)",
        table.severe.len(),
        table.major.len(),
        table.moderate.len(),
        table.minor.len()
    );
    let state = web::Data::new(AppState::new(table));

    let allowed_origins = config.ui_origins.clone();
    let listen_addr = config.host.clone();
    let listen_port = config.port;
    log::info!("listening on {listen_addr}:{listen_port}");

    actix_web::rt::System::new().block_on(async move {
        HttpServer::new(move || {
            let mut cors = Cors::default()
                .allowed_methods(vec!["GET", "POST", "PUT", "OPTIONS"])
                .allowed_headers(vec![header::CONTENT_TYPE])
                .max_age(3600);
            for origin in &allowed_origins {
                cors = cors.allowed_origin(origin);
            }
            App::new()
                .wrap(actix_web::middleware::Logger::default())
                .wrap(cors)
                .app_data(state.clone())
                .app_data(web::JsonConfig::default().limit(4 * 1024 * 1024))
                .service(inspect)
                .service(inspect_batch)
                .service(severity_table)
                .service(replace_severity_table)
                .service(openapi_json)
        })
        .bind((listen_addr, listen_port))?
        .run()
        .await
    })
}

#[cfg(test)]
fn main() {}
