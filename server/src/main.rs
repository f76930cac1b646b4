use actix_web::{web, App, HttpServer};
use clap::Parser;

use drawing_server::config::Config;
use drawing_server::handlers;
use drawing_server::server::spawn_server;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = Config::parse();
    config.init_logging();

    let srv_tx = spawn_server();
    log::info!("Listening on {}", config.bind);

    let bind = config.bind.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(config.cors())
            .app_data(web::Data::new(srv_tx.clone()))
            .configure(handlers::root)
    })
    .bind(bind)?
    .run()
    .await
}
