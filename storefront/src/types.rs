//! Shapes exchanged with the product and image backends.
//!
//! - [`Product`]: one entry of `GET /products`, rendered read-only
//! - [`ImageFile`]: a file picked in the admin form
//! - [`UploadRequest`]: what a single submission sends to the image service

use bytes::Bytes;
use mime_guess::Mime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A product as returned by the product API.
///
/// Only `name`, `price` and `description` are read. Anything else the backend sends (`id`, `sku`)
/// is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
}

/// A file selected for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: Mime,
    pub bytes: Bytes,
}

impl ImageFile {
    /// Build a file, guessing the content type from its name.
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name).first_or_octet_stream();
        Self {
            file_name,
            content_type,
            bytes: bytes.into(),
        }
    }

}

// File contents stay out of logs
impl fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type.essence_str())
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// A single upload submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub product_id: String,
    pub file: ImageFile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_tolerates_extra_backend_fields() {
        let product: Product = serde_json::from_str(
            r#"{"id":"5b3c7a9e-1c52-4a43-8b5a-1f3a8b0e9d11","name":"Latte","description":"Frothy milky coffee","price":2.45,"sku":"abc-abc-abc"}"#,
        )
        .unwrap();

        assert_eq!(product.name, "Latte");
        assert_eq!(product.price, 2.45);
        assert_eq!(product.description, "Frothy milky coffee");
    }

    #[test]
    fn product_list_with_numeric_ids_decodes() {
        let products: Vec<Product> = serde_json::from_str(
            r#"[{"id":1,"name":"Latte","price":2.45,"sku":"abc323"},{"id":2,"name":"Espresso","price":1.99}]"#,
        )
        .unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Latte");
        assert_eq!(products[1].price, 1.99);
    }

    #[test]
    fn product_description_defaults_to_empty() {
        let product: Product = serde_json::from_str(r#"{"name":"Espresso","price":1.99}"#).unwrap();
        assert_eq!(product.description, "");
    }

    #[test]
    fn image_file_guesses_content_type() {
        assert_eq!(ImageFile::new("latte.png", vec![1, 2, 3]).content_type.essence_str(), "image/png");
        assert_eq!(
            ImageFile::new("mystery", vec![1]).content_type.essence_str(),
            "application/octet-stream"
        );
    }

    #[test]
    fn image_file_debug_hides_contents() {
        let file = ImageFile::new("latte.png", b"secret-bytes".to_vec());
        let debug = format!("{file:?}");
        assert!(debug.contains("latte.png"));
        assert!(!debug.contains("secret"));
    }
}
