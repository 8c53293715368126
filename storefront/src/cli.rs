//! One-shot command line renditions of the two screens.

use crate::client::{ImageUploader, ProductSource};
use crate::config::Config;
use crate::screens::{AdminForm, Catalog, admin::UPLOADED_FILE};
use crate::types::ImageFile;
use anyhow::{Context, anyhow, bail};
use std::io::Write;
use std::path::Path;

/// Mount the menu once and print it as a table.
pub async fn print_products<W: Write>(source: &dyn ProductSource, out: &mut W) -> anyhow::Result<()> {
    let catalog = Catalog::mount(source).await;
    out.write_all(catalog.render_text().as_bytes())?;

    if let Some(err) = catalog.load_error() {
        bail!("Failed to load products: {err}");
    }
    Ok(())
}

/// Submit the admin form once with the file at `path` and print the toast.
pub async fn upload_file<W: Write>(
    config: &Config,
    uploader: &dyn ImageUploader,
    product_id: &str,
    path: &Path,
    out: &mut W,
) -> anyhow::Result<()> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("{} has no usable file name", path.display()))?;

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    if bytes.len() > config.max_upload_bytes {
        bail!(
            "{} is {} bytes, larger than the maximum of {} bytes",
            path.display(),
            bytes.len(),
            config.max_upload_bytes
        );
    }

    let mut form = AdminForm::new(config.toast_delay);
    form.set_product_id(product_id);
    form.select_file(Some(ImageFile::new(file_name, bytes)));
    form.submit(uploader).await?;

    let toast = form.toast();
    writeln!(out, "{}: {}", toast.title(), toast.message())?;

    if toast.message() != UPLOADED_FILE {
        bail!("{}", toast.message());
    }
    Ok(())
}
