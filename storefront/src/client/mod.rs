//! HTTP access to the product API and the image service.
//!
//! Screens talk to the backends through the [`ProductSource`] and [`ImageUploader`] traits so
//! they can be driven by in-memory fakes in tests. The reqwest implementations live in
//! [`products`] and [`images`].

pub mod images;
pub mod products;

use crate::errors::{Error, Result};
use crate::types::{Product, UploadRequest};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

pub use images::ImagesReqwest;
pub use products::ProductsReqwest;

/// Something that can list the products on the menu.
#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn fetch_products(&self) -> Result<Vec<Product>>;
}

/// Something that can store an image against a product.
///
/// Returns the success status the backend answered with. Non-success statuses and transport
/// failures are errors.
#[async_trait]
pub trait ImageUploader: Send + Sync {
    async fn upload(&self, request: &UploadRequest) -> Result<StatusCode>;
}

/// Build a reqwest client, applying the timeout only when one is configured.
pub(crate) fn build_http_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Append path segments to a base URL.
///
/// Each segment is percent-encoded on its own, so a product ID containing `/` stays one segment.
/// A trailing slash on the base is ignored: `http://host/api` and `http://host/api/` give the
/// same result.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| Error::Internal {
            operation: format!("build request URL from {base}"),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
