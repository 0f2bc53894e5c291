#[macro_use]
extern crate log;

use endb_db_sqlite::Connections;

mod adapters;
mod web;

pub async fn run(connections: Connections, port: Option<u16>, enable_cors: bool) {
    web::run(connections.into(), port, enable_cors).await;
}
