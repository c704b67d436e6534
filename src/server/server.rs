//! HTTP server core implementation

use actix_cors::Cors;
use actix_web::{App, HttpServer as ActixHttpServer, middleware::Logger, web};
use tracing::info;

use crate::config::{Config, ServerConfig};
use crate::server::middleware::RequestIdMiddleware;
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::Result;

/// HTTP server
pub struct HttpServer {
    config: ServerConfig,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server, wiring all shared services
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");
        let state = AppState::from_config(config.clone()).await?;
        Ok(Self {
            config: config.server.clone(),
            state,
        })
    }

    /// Bind and run until shutdown
    pub async fn start(self) -> Result<()> {
        let state = self.state.clone();
        let cors_enabled = self.config.cors.enabled;
        let cors_origins = self.config.cors.allowed_origins.clone();

        let server = ActixHttpServer::new(move || {
            let cors = if !cors_enabled {
                Cors::default()
            } else if cors_origins.is_empty() {
                Cors::permissive()
            } else {
                let mut cors = Cors::default()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600);
                for origin in &cors_origins {
                    cors = cors.allowed_origin(origin);
                }
                cors
            };

            let state = state.clone();
            App::new()
                .app_data(web::Data::new(state.clone()))
                .wrap(cors)
                .wrap(Logger::default())
                .wrap(RequestIdMiddleware)
                .configure(|cfg| routes::configure(cfg, &state))
        });

        info!(
            "Gateway listening on {}:{}",
            self.config.host, self.config.port
        );
        server
            .bind((self.config.host.as_str(), self.config.port))?
            .run()
            .await?;
        Ok(())
    }
}

/// Load configuration and run the gateway.
///
/// `config/gateway.yaml` wins when present; otherwise environment
/// variables configure everything.
pub async fn run_server() -> Result<()> {
    let config_path = "config/gateway.yaml";
    let config = match Config::from_file(config_path).await {
        Ok(config) => {
            info!("Loaded configuration from {}", config_path);
            config
        }
        Err(e) => {
            info!(
                "No usable {} ({}), using environment configuration",
                config_path, e
            );
            Config::from_env()?
        }
    };

    let server = HttpServer::new(&config).await?;
    server.start().await
}
