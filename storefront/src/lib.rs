//! # storefront: a minimal web client for a product backend
//!
//! `storefront` puts two screens in front of a product API and an image service:
//!
//! - **Menu**: a read-only table of products fetched from `GET {products_url}/products`
//! - **Admin**: a form that uploads an image for a product ID to
//!   `POST {images_url}/images/{id}/{filename}` and reports the outcome in a short-lived toast
//!
//! ## Architecture
//!
//! Screen state lives in [`screens`] and knows nothing about HTML or terminals. The backends are
//! reached through the [`client::ProductSource`] and [`client::ImageUploader`] traits, with
//! reqwest implementations for production and in-memory fakes for tests.
//!
//! Two surfaces draw the screens. The web surface ([`api`]) is an [Axum](https://github.com/tokio-rs/axum)
//! server rendering minijinja templates: `GET /` for the menu, `GET /admin` and `POST /admin` for
//! the upload form. The command line ([`cli`]) runs either screen once and prints the result.
//!
//! The admin form is shared by every browser hitting the server. It sits behind an async mutex
//! that is released for the duration of the upload, so a page load during an upload sees the
//! submit button disabled, and a second submission is refused with 409.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use storefront::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = storefront::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     storefront::telemetry::init_telemetry("info")?;
//!
//!     let app = Application::new(config)?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await
//! }
//! ```
pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod errors;
pub mod screens;
mod static_assets;
pub mod telemetry;
mod templates;
pub mod types;

#[cfg(test)]
pub mod test_utils;

use crate::client::{ImageUploader, ImagesReqwest, ProductSource, ProductsReqwest};
use crate::screens::AdminForm;
use crate::templates::Templates;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::get,
};
use bon::Builder;
pub use config::Config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{Level, debug, info, instrument};

/// Room for multipart boundaries and the `id` field on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Application state shared across all request handlers.
///
/// - `products`: where the menu comes from
/// - `images`: where admin uploads go
/// - `admin`: the one admin form, shared by every browser
/// - `templates`: compiled page templates
#[derive(Clone, Builder)]
pub struct AppState {
    pub config: Config,
    pub products: Arc<dyn ProductSource>,
    pub images: Arc<dyn ImageUploader>,
    pub admin: Arc<Mutex<AdminForm>>,
    templates: Arc<Templates>,
}

impl AppState {
    pub fn new(config: Config, products: Arc<dyn ProductSource>, images: Arc<dyn ImageUploader>) -> errors::Result<Self> {
        let admin = Arc::new(Mutex::new(AdminForm::new(config.toast_delay)));
        Ok(Self::builder()
            .config(config)
            .products(products)
            .images(images)
            .admin(admin)
            .templates(Arc::new(Templates::new()?))
            .build())
    }
}

/// Build the router for both screens, static assets and the health check.
#[instrument(skip_all)]
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .route("/", get(api::handlers::catalog::menu_page))
        .route(
            "/admin",
            get(api::handlers::admin::admin_page).post(api::handlers::admin::submit_upload),
        )
        .route("/static/{*path}", get(api::handlers::static_assets::serve_static_asset))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

/// The web surface, ready to serve.
pub struct Application {
    router: Router,
    config: Config,
}

impl Application {
    /// Create the backend clients and the router.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting storefront with configuration: {:#?}", config);

        let products = ProductsReqwest::new(config.products_url.clone(), config.request_timeout)?;
        let images = ImagesReqwest::new(config.images_url.clone(), config.request_timeout)?;

        let state = AppState::new(config.clone(), Arc::new(products), Arc::new(images))?;
        let router = build_router(state);

        Ok(Self { router, config })
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "Storefront listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );
        info!(
            products_url = %self.config.products_url,
            images_url = %self.config.images_url,
            "Using backends"
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Storefront stopped");
        Ok(())
    }
}
