//! Application configuration management.
//!
//! Configuration is loaded from a YAML file with environment variable overrides. The configuration
//! file path defaults to `config.yaml` but can be specified via `-f` flag or `STOREFRONT_CONFIG`
//! environment variable. A missing file is not an error: every field has a default.
//!
//! ## Loading Priority
//!
//! 1. **YAML config file** - Base configuration (default: `config.yaml`)
//! 2. **Environment variables** - Variables prefixed with `STOREFRONT_` override YAML values
//!
//! ## Environment Variable Examples
//!
//! ```bash
//! # Serve on another port
//! STOREFRONT_PORT=8080
//!
//! # Point at the backends
//! STOREFRONT_PRODUCTS_URL=http://product-api:9090
//! STOREFRONT_IMAGES_URL=http://product-images:9091
//!
//! # Give up on a backend after ten seconds
//! STOREFRONT_REQUEST_TIMEOUT=10s
//! ```

use clap::{Parser, Subcommand};
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};
use url::Url;

use crate::errors::Error;

/// The image service refuses files larger than this.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 1024 * 1000 * 5;

/// CLI args: config file location plus the screen to run
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "STOREFRONT_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Validate configuration and exit without running anything.
    #[arg(long)]
    pub validate: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Serve the menu and admin screens over HTTP (the default)
    Serve,
    /// Fetch the product menu once and print it as a table
    Products,
    /// Upload an image for a product and print the outcome
    Upload {
        /// Product ID to associate the image with
        #[arg(long)]
        id: String,
        /// Image file to upload
        #[arg(long)]
        file: PathBuf,
    },
}

/// Main application configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server host to bind to (e.g., "0.0.0.0" for all interfaces)
    pub host: String,
    /// HTTP server port to bind to
    pub port: u16,
    /// Base URL of the product API, which serves `GET /products`
    pub products_url: Url,
    /// Base URL of the image service, which accepts `POST /images/{id}/{filename}`
    pub images_url: Url,
    /// Per-request timeout for backend calls. Unset means wait indefinitely.
    #[serde(with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<Duration>,
    /// How long the upload toast stays visible
    #[serde(with = "humantime_serde")]
    pub toast_delay: Duration,
    /// Largest image the admin form accepts, in bytes
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            products_url: Url::parse("http://localhost:9090").expect("static URL is valid"),
            images_url: Url::parse("http://localhost:9091").expect("static URL is valid"),
            request_timeout: None,
            toast_delay: Duration::from_secs(3),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        let config: Self = Self::figment(args).extract()?;
        config.validate().map_err(|e| figment::Error::from(e.to_string()))?;
        Ok(config)
    }

    /// Validate the configuration for consistency
    pub fn validate(&self) -> Result<(), Error> {
        for (name, url) in [("products_url", &self.products_url), ("images_url", &self.images_url)] {
            if url.cannot_be_a_base() {
                return Err(Error::Internal {
                    operation: format!("Config validation: {name} ({url}) cannot be used as a base URL"),
                });
            }
        }

        if self.max_upload_bytes == 0 {
            return Err(Error::Internal {
                operation: "Config validation: max_upload_bytes must be greater than 0".to_string(),
            });
        }

        if self.toast_delay.is_zero() {
            return Err(Error::Internal {
                operation: "Config validation: toast_delay must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    pub fn figment(args: &Args) -> Figment {
        Figment::new()
            .merge(Yaml::file(&args.config))
            // STOREFRONT_CONFIG names the file above, not a field
            .merge(Env::prefixed("STOREFRONT_").ignore(&["config"]).split("__"))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
