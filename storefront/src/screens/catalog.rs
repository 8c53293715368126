//! The menu screen: a read-only table of products.

use crate::client::ProductSource;
use crate::types::Product;
use serde::Serialize;
use tracing::{info, instrument, warn};

/// One table row, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRow {
    pub name: String,
    pub price: String,
    pub description: String,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            // Shortest round-trip form: 2.0 prints as "2", 2.45 as "2.45"
            price: product.price.to_string(),
            description: product.description.clone(),
        }
    }
}

/// Products fetched for one mount of the menu screen.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    load_error: Option<String>,
}

impl Catalog {
    /// Fetch the product list once. A failed fetch leaves the table empty.
    #[instrument(skip_all)]
    pub async fn mount(source: &dyn ProductSource) -> Self {
        match source.fetch_products().await {
            Ok(products) => {
                info!(count = products.len(), "Loaded product menu");
                Self {
                    products,
                    load_error: None,
                }
            }
            Err(e) => {
                warn!(error = %e, "Failed to load product menu");
                Self {
                    products: Vec::new(),
                    load_error: Some(e.to_string()),
                }
            }
        }
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// One row per product, in fetch order.
    pub fn rows(&self) -> Vec<ProductRow> {
        self.products.iter().map(ProductRow::from).collect()
    }

    /// Plain-text table with a header row and aligned columns.
    pub fn render_text(&self) -> String {
        const HEADERS: [&str; 3] = ["Name", "Price", "Description"];

        let rows = self.rows();
        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip([&row.name, &row.price, &row.description]) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let line = |cells: [&str; 3]| -> String {
            let text = format!(
                "{:<w0$}  {:<w1$}  {}",
                cells[0],
                cells[1],
                cells[2],
                w0 = widths[0],
                w1 = widths[1]
            );
            text.trim_end().to_string()
        };

        let mut out = String::new();
        out.push_str(&line(HEADERS));
        out.push('\n');
        out.push_str(&line([
            &"-".repeat(widths[0]),
            &"-".repeat(widths[1]),
            &"-".repeat(widths[2]),
        ]));
        out.push('\n');
        for row in &rows {
            out.push_str(&line([&row.name, &row.price, &row.description]));
            out.push('\n');
        }
        out
    }
}
