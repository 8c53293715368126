//! Image upload to the image service.

use super::{ImageUploader, build_http_client, endpoint};
use crate::errors::{Error, Result};
use crate::types::UploadRequest;
use async_trait::async_trait;
use reqwest::{
    Client, StatusCode,
    multipart::{Form, Part},
};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Posts images to `{base_url}/images/{id}/{filename}` as multipart form data.
#[derive(Debug, Clone)]
pub struct ImagesReqwest {
    client: Client,
    base_url: Url,
}

impl ImagesReqwest {
    pub fn new(base_url: Url, request_timeout: Option<Duration>) -> Result<Self> {
        Ok(Self {
            client: build_http_client(request_timeout)?,
            base_url,
        })
    }
}

/// The multipart body: the file under `file`, the product ID under `id`.
fn upload_form(request: &UploadRequest) -> Result<Form> {
    let file = Part::bytes(request.file.bytes.to_vec())
        .file_name(request.file.file_name.clone())
        .mime_str(request.file.content_type.as_ref())?;

    Ok(Form::new().part("file", file).text("id", request.product_id.clone()))
}

#[async_trait]
impl ImageUploader for ImagesReqwest {
    #[instrument(skip(self, request), fields(product_id = %request.product_id, file_name = %request.file.file_name, len = request.file.bytes.len()))]
    async fn upload(&self, request: &UploadRequest) -> Result<StatusCode> {
        let url = endpoint(&self.base_url, &["images", &request.product_id, &request.file.file_name])?;
        debug!("Uploading image to URL: {}", url);

        let response = self
            .client
            .post(url.clone())
            .multipart(upload_form(request)?)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(url = %url, error = %e, "Image upload request failed");
                e
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(url = %url, status = %status, body = %body, "Image service rejected the upload");
            return Err(Error::UpstreamStatus { status, body });
        }

        tracing::info!(status = %status, "Image uploaded");
        Ok(status)
    }
}
