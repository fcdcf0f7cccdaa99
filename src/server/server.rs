//! HTTP server core implementation

use crate::config::ServerConfig;
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_web::{
    App, HttpServer as ActixHttpServer,
    middleware::{DefaultHeaders, Logger},
    web,
};
use tracing::info;

/// Admin HTTP server
pub struct HttpServer {
    config: ServerConfig,
    state: AppState,
}

impl HttpServer {
    pub fn new(state: AppState) -> Self {
        Self {
            config: state.config.server().clone(),
            state,
        }
    }

    /// Override the configured bind address
    pub fn with_address(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.config.host = host;
        }
        if let Some(port) = port {
            self.config.port = port;
        }
        self
    }

    /// Create the Actix-web application
    pub fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(state)
            .wrap(Logger::default())
            .wrap(DefaultHeaders::new().add(("Server", "llm-gateway-recovery")))
            .configure(routes::configure_routes)
    }

    /// Start the HTTP server and run until it is stopped
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        info!("Starting admin server on {}", bind_addr);

        let state = web::Data::new(self.state);
        let mut server = ActixHttpServer::new(move || Self::create_app(state.clone()));
        if let Some(workers) = self.config.workers {
            server = server.workers(workers);
        }

        let server = server
            .bind(&bind_addr)
            .map_err(|e| format_bind_error(e, &bind_addr))?
            .run();

        info!("Admin server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| GatewayError::server(format!("Server error: {}", e)))?;

        info!("Admin server stopped");
        Ok(())
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

fn format_bind_error(error: std::io::Error, bind_addr: &str) -> GatewayError {
    if error.kind() == std::io::ErrorKind::AddrInUse {
        GatewayError::server(format!(
            "Address {} is already in use; pick another with --port or GATEWAY_PORT",
            bind_addr
        ))
    } else {
        GatewayError::server(format!("Failed to bind to {}: {}", bind_addr, error))
    }
}
