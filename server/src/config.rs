//! Command line and environment configuration.

use actix_cors::Cors;
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "drawing-server")]
#[command(about = "Realtime collaborative drawing room server")]
#[command(version)]
pub struct Config {
    /// Address the HTTP/websocket listener binds to
    #[arg(long, env = "DRAWING_BIND", default_value = "127.0.0.1:8080")]
    pub bind: String,

    /// Origin allowed by CORS. Any origin is allowed when unset.
    #[arg(long, env = "DRAWING_ALLOWED_ORIGIN")]
    pub allowed_origin: Option<String>,

    /// env_logger filter directives, e.g. "info" or "server=debug"
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_filter: String,
}

impl Config {
    pub fn cors(&self) -> Cors {
        match &self.allowed_origin {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allow_any_method()
                .allow_any_header(),
            None => Cors::permissive(),
        }
    }

    pub fn init_logging(&self) {
        env_logger::Builder::new()
            .parse_filters(&self.log_filter)
            .init();
    }
}
