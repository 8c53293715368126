//! Test utilities: in-memory backends and a ready-made test server.

use crate::client::{ImageUploader, ProductSource};
use crate::config::Config;
use crate::errors::{Error, Result};
use crate::types::{Product, UploadRequest};
use crate::{AppState, build_router};
use async_trait::async_trait;
use axum_test::TestServer;
use reqwest::StatusCode;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use tokio::sync::Notify;

pub fn sample_products() -> Vec<Product> {
    vec![
        Product {
            name: "Latte".to_string(),
            price: 2.45,
            description: "Frothy milky coffee".to_string(),
        },
        Product {
            name: "Espresso".to_string(),
            price: 1.99,
            description: "Short and strong coffee without milk".to_string(),
        },
        Product {
            name: "Mocha".to_string(),
            price: 3.0,
            description: "Chocolate and coffee".to_string(),
        },
    ]
}

pub fn create_test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        max_upload_bytes: 1024,
        ..Default::default()
    }
}

/// Serves a fixed product list and counts fetches.
#[derive(Clone, Default)]
pub struct StaticProducts {
    products: Vec<Product>,
    calls: Arc<AtomicUsize>,
}

impl StaticProducts {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductSource for StaticProducts {
    async fn fetch_products(&self) -> Result<Vec<Product>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.products.clone())
    }
}

/// Always answers like a broken product API.
pub struct FailingProducts;

#[async_trait]
impl ProductSource for FailingProducts {
    async fn fetch_products(&self) -> Result<Vec<Product>> {
        Err(Error::UpstreamStatus {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "Unable to retrieve products".to_string(),
        })
    }
}

/// Answers every upload with a fixed status and records the requests.
#[derive(Clone)]
pub struct RecordingUploader {
    status: StatusCode,
    calls: Arc<Mutex<Vec<UploadRequest>>>,
}

impl RecordingUploader {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<UploadRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageUploader for RecordingUploader {
    async fn upload(&self, request: &UploadRequest) -> Result<StatusCode> {
        self.calls.lock().unwrap().push(request.clone());
        Ok(self.status)
    }
}

/// Always answers like an image service that could not save the file.
pub struct FailingUploader;

#[async_trait]
impl ImageUploader for FailingUploader {
    async fn upload(&self, _request: &UploadRequest) -> Result<StatusCode> {
        Err(Error::UpstreamStatus {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "Unable to save file".to_string(),
        })
    }
}

/// Panics mid-upload, like a bug in the upload path would.
pub struct PanickingUploader;

#[async_trait]
impl ImageUploader for PanickingUploader {
    async fn upload(&self, _request: &UploadRequest) -> Result<StatusCode> {
        panic!("upload crashed");
    }
}

/// Holds each upload open until the test releases it.
#[derive(Clone)]
pub struct GatedUploader {
    status: StatusCode,
    started: Arc<Notify>,
    release: Arc<Notify>,
}

impl GatedUploader {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            started: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
        }
    }

    /// Wait until an upload is in flight.
    pub async fn wait_started(&self) {
        self.started.notified().await;
    }

    /// Let the in-flight upload complete.
    pub fn release(&self) {
        self.release.notify_one();
    }
}

#[async_trait]
impl ImageUploader for GatedUploader {
    async fn upload(&self, _request: &UploadRequest) -> Result<StatusCode> {
        self.started.notify_one();
        self.release.notified().await;
        Ok(self.status)
    }
}

pub fn create_test_server(products: impl ProductSource + 'static, images: impl ImageUploader + 'static) -> TestServer {
    let state = AppState::new(create_test_config(), Arc::new(products), Arc::new(images)).expect("Failed to create app state");
    let router = build_router(state);
    TestServer::new(router).expect("Failed to create test server")
}
