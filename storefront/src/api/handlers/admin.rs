//! HTTP handlers for the admin upload form.

use crate::AppState;
use crate::errors::{Error, Result};
use crate::screens::AdminForm;
use crate::types::ImageFile;
use axum::{
    extract::{Multipart, State, multipart::MultipartError},
    http::StatusCode,
    response::Html,
};
use minijinja::context;
use tracing::{debug, instrument};

/// Fields read from the browser's multipart form.
#[derive(Debug, Default)]
struct UploadForm {
    id: Option<String>,
    file: Option<ImageFile>,
}

fn multipart_error(e: MultipartError) -> Error {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        Error::PayloadTooLarge {
            message: "Upload exceeds the maximum allowed size".to_string(),
        }
    } else {
        Error::BadRequest {
            message: format!("Failed to parse multipart data: {e}"),
        }
    }
}

async fn read_upload_form(multipart: &mut Multipart, max_upload_bytes: usize) -> Result<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "id" => {
                form.id = Some(field.text().await.map_err(multipart_error)?);
            }
            "file" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;

                if bytes.len() > max_upload_bytes {
                    tracing::warn!(
                        file_name = %file_name,
                        size = bytes.len(),
                        max_upload_bytes = max_upload_bytes,
                        "Upload exceeds size limit"
                    );
                    return Err(Error::PayloadTooLarge {
                        message: format!("File size exceeds maximum allowed size of {max_upload_bytes} bytes"),
                    });
                }

                form.file = Some(ImageFile::new(file_name, bytes));
            }
            other => debug!(field = other, "Ignoring unexpected form field"),
        }
    }

    Ok(form)
}

fn render_admin(state: &AppState, form: &AdminForm) -> Result<Html<String>> {
    let html = state.templates.render(
        "admin.html",
        context! {
            active => "admin",
            form => form.view(),
        },
    )?;
    Ok(Html(html))
}

/// Render the admin form as it currently stands.
#[instrument(skip_all)]
pub async fn admin_page(State(state): State<AppState>) -> Result<Html<String>> {
    let form = state.admin.lock().await;
    render_admin(&state, &form)
}

/// Take the browser's form submission and upload the file.
///
/// - 400 re-renders the page with validation feedback
/// - 409 means another submission is still outstanding
/// - 200 re-renders the page with the outcome in the toast
#[instrument(skip_all)]
pub async fn submit_upload(State(state): State<AppState>, mut multipart: Multipart) -> Result<(StatusCode, Html<String>)> {
    let upload = read_upload_form(&mut multipart, state.config.max_upload_bytes).await?;

    let request = {
        let mut form = state.admin.lock().await;
        if form.is_submit_disabled() {
            return Err(Error::UploadInProgress);
        }

        form.set_product_id(upload.id.unwrap_or_default());
        form.select_file(upload.file);

        match form.begin_submit() {
            Ok(request) => request,
            Err(e @ Error::BadRequest { .. }) => {
                debug!(error = %e, "Admin form failed validation");
                form.discard_file();
                return Ok((StatusCode::BAD_REQUEST, render_admin(&state, &form)?));
            }
            Err(e) => return Err(e),
        }
    };

    // Detached so a dropped connection cannot leave the form stuck in Submitting
    let upload_task = tokio::spawn({
        let images = state.images.clone();
        let admin = state.admin.clone();
        async move {
            let outcome = images.upload(&request).await;
            let mut form = admin.lock().await;
            form.finish_submit(outcome);
            form.discard_file();
        }
    });
    if let Err(e) = upload_task.await {
        // The task died before finishing, so release the form here
        let mut form = state.admin.lock().await;
        form.finish_submit(Err(Error::Internal {
            operation: "complete upload".to_string(),
        }));
        form.discard_file();
        return Err(Error::Other(anyhow::Error::new(e).context("Upload task did not complete")));
    }

    let form = state.admin.lock().await;
    Ok((StatusCode::OK, render_admin(&state, &form)?))
}
