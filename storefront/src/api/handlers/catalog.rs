//! HTTP handler for the menu page.

use crate::AppState;
use crate::errors::Result;
use crate::screens::Catalog;
use axum::{extract::State, response::Html};
use minijinja::context;
use tracing::instrument;

/// Render the product menu. Every page load mounts the catalog, which fetches once.
#[instrument(skip_all)]
pub async fn menu_page(State(state): State<AppState>) -> Result<Html<String>> {
    let catalog = Catalog::mount(state.products.as_ref()).await;

    let html = state.templates.render(
        "menu.html",
        context! {
            active => "menu",
            rows => catalog.rows(),
        },
    )?;

    Ok(Html(html))
}
