//! Product listing from the product API.

use super::{ProductSource, build_http_client, endpoint};
use crate::errors::{Error, Result};
use crate::types::Product;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Fetches `GET {base_url}/products` over HTTP.
#[derive(Debug, Clone)]
pub struct ProductsReqwest {
    client: Client,
    base_url: Url,
}

impl ProductsReqwest {
    pub fn new(base_url: Url, request_timeout: Option<Duration>) -> Result<Self> {
        Ok(Self {
            client: build_http_client(request_timeout)?,
            base_url,
        })
    }
}

#[async_trait]
impl ProductSource for ProductsReqwest {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_products(&self) -> Result<Vec<Product>> {
        let url = endpoint(&self.base_url, &["products"])?;
        debug!("Fetching products from URL: {}", url);

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            tracing::error!(url = %url, error = %e, "Product request failed");
            e
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(url = %url, status = %status, "Product API returned an error");
            return Err(Error::UpstreamStatus { status, body });
        }

        let body_text = response.text().await?;
        debug!("Products response body: {}", body_text);

        match serde_json::from_str::<Vec<Product>>(&body_text) {
            Ok(products) => {
                debug!(count = products.len(), "Fetched products");
                Ok(products)
            }
            Err(e) => {
                tracing::error!("Failed to parse products response as JSON. Error: {}", e);
                tracing::error!("Response body was: {}", body_text);
                Err(Error::Decode { message: e.to_string() })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn source_for(server: &MockServer) -> ProductsReqwest {
        ProductsReqwest::new(Url::parse(&server.uri()).unwrap(), None).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_products_in_backend_order() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "name": "Latte", "description": "Frothy milky coffee", "price": 2.45, "sku": "abc-abc-abc"},
                {"id": 2, "name": "Espresso", "description": "Short and strong coffee without milk", "price": 1.99, "sku": "fjd-jfd-jfd"},
                {"id": 3, "name": "Mocha", "description": "Chocolate and coffee", "price": 3.0}
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let products = source_for(&mock_server).await.fetch_products().await.unwrap();

        let names: Vec<_> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Latte", "Espresso", "Mocha"]);
        assert_eq!(products[1].price, 1.99);
    }

    #[tokio::test]
    async fn test_fetch_products_empty_list() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&mock_server)
            .await;

        let products = source_for(&mock_server).await.fetch_products().await.unwrap();
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_products_under_base_path() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let base = Url::parse(&format!("{}/api", mock_server.uri())).unwrap();
        let source = ProductsReqwest::new(base, None).unwrap();
        source.fetch_products().await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_products_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Unable to retrieve products"))
            .mount(&mock_server)
            .await;

        let err = source_for(&mock_server).await.fetch_products().await.unwrap_err();

        match err {
            Error::UpstreamStatus { status, body } => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(body, "Unable to retrieve products");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_products_invalid_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"name":"not a list"}"#))
            .mount(&mock_server)
            .await;

        let err = source_for(&mock_server).await.fetch_products().await.unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
        assert!(err.to_string().starts_with("error decoding response body"));
    }

    #[tokio::test]
    async fn test_fetch_products_times_out() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([]))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let source = ProductsReqwest::new(Url::parse(&mock_server.uri()).unwrap(), Some(Duration::from_millis(50))).unwrap();
        let err = source.fetch_products().await.unwrap_err();

        match err {
            Error::Http(e) => assert!(e.is_timeout()),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
