//! The admin screen: attach an image to a product.
//!
//! [`AdminForm`] is a two-state machine. A submission moves it from [`Phase::Idle`] to
//! [`Phase::Submitting`] and the response moves it back, showing the outcome in a [`Toast`]. The
//! submit control is disabled exactly while a submission is outstanding, and a second submission
//! in that window is refused rather than queued.

use crate::client::ImageUploader;
use crate::errors::{Error, Result};
use crate::screens::toast::{Toast, ToastView};
use crate::types::{ImageFile, UploadRequest};
use reqwest::StatusCode;
use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{info, instrument, warn};

pub const UPLOADED_FILE: &str = "Uploaded file";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ProductId,
    File,
}

impl Field {
    pub fn feedback(self) -> &'static str {
        match self {
            Field::ProductId => "Please provide a product ID.",
            Field::File => "Please select a file to upload.",
        }
    }
}

/// Per-field messages for the page, filled in only after a failed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub product_id: Option<&'static str>,
    pub file: Option<&'static str>,
}

/// Everything the admin page template reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminView {
    pub product_id: String,
    pub submit_disabled: bool,
    pub validated: bool,
    pub feedback: Feedback,
    pub toast: Option<ToastView>,
}

#[derive(Debug)]
pub struct AdminForm {
    product_id: String,
    file: Option<ImageFile>,
    validated: bool,
    /// Fields that failed the last validation
    invalid: Vec<Field>,
    phase: Phase,
    toast: Toast,
}

/// Toast text for an upload outcome.
pub fn outcome_message(outcome: &Result<StatusCode>) -> String {
    match outcome {
        Ok(status) if *status == StatusCode::OK => UPLOADED_FILE.to_string(),
        Ok(status) => format!(
            "Unable to upload file. Error: {}",
            status.canonical_reason().unwrap_or(status.as_str())
        ),
        Err(e) => format!("Unable to upload file. {e}"),
    }
}

impl AdminForm {
    pub fn new(toast_delay: Duration) -> Self {
        Self {
            product_id: String::new(),
            file: None,
            validated: false,
            invalid: Vec::new(),
            phase: Phase::Idle,
            toast: Toast::new(toast_delay),
        }
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn file(&self) -> Option<&ImageFile> {
        self.file.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn toast(&self) -> &Toast {
        &self.toast
    }

    pub fn is_submit_disabled(&self) -> bool {
        self.phase == Phase::Submitting
    }

    pub fn set_product_id(&mut self, value: impl Into<String>) {
        self.product_id = value.into();
        self.toast.hide();
    }

    /// Select a file. A file without a name counts as no selection.
    pub fn select_file(&mut self, file: Option<ImageFile>) {
        self.file = file.filter(|f| !f.file_name.is_empty());
        self.toast.hide();
    }

    /// Forget the selected file without touching the toast.
    pub fn discard_file(&mut self) {
        self.file = None;
    }

    pub fn missing_fields(&self) -> Vec<Field> {
        let mut missing = Vec::new();
        if self.product_id.trim().is_empty() {
            missing.push(Field::ProductId);
        }
        if self.file.is_none() {
            missing.push(Field::File);
        }
        missing
    }

    /// Messages for the fields rejected by the last submission attempt.
    pub fn feedback(&self) -> Feedback {
        if !self.validated {
            return Feedback::default();
        }
        Feedback {
            product_id: self.invalid.contains(&Field::ProductId).then(|| Field::ProductId.feedback()),
            file: self.invalid.contains(&Field::File).then(|| Field::File.feedback()),
        }
    }

    /// Validate and enter `Submitting`, returning the request to send.
    pub fn begin_submit(&mut self) -> Result<UploadRequest> {
        if self.phase == Phase::Submitting {
            return Err(Error::UploadInProgress);
        }

        let missing = self.missing_fields();
        if let Some(first) = missing.first() {
            let message = first.feedback().to_string();
            self.validated = true;
            self.invalid = missing;
            return Err(Error::BadRequest { message });
        }

        let file = self.file.clone().ok_or_else(|| Error::BadRequest {
            message: Field::File.feedback().to_string(),
        })?;

        self.validated = false;
        self.invalid.clear();
        self.phase = Phase::Submitting;
        self.toast.hide();

        Ok(UploadRequest {
            product_id: self.product_id.trim().to_string(),
            file,
        })
    }

    /// Leave `Submitting` and show the outcome.
    pub fn finish_submit(&mut self, outcome: Result<StatusCode>) {
        match &outcome {
            Ok(status) => info!(product_id = %self.product_id, status = %status, "Upload finished"),
            Err(e) => warn!(product_id = %self.product_id, error = %e, "Upload failed"),
        }
        self.phase = Phase::Idle;
        self.toast.show(outcome_message(&outcome));
    }

    /// Run a whole submission against `uploader`.
    ///
    /// Validation and in-progress errors are returned. The upload outcome itself lands in the
    /// toast.
    #[instrument(skip_all, fields(product_id = %self.product_id))]
    pub async fn submit(&mut self, uploader: &dyn ImageUploader) -> Result<()> {
        let request = self.begin_submit()?;
        let outcome = uploader.upload(&request).await;
        self.finish_submit(outcome);
        Ok(())
    }

    pub fn view_at(&self, now: Instant) -> AdminView {
        AdminView {
            product_id: self.product_id.clone(),
            submit_disabled: self.is_submit_disabled(),
            validated: self.validated,
            feedback: self.feedback(),
            toast: self.toast.view_at(now),
        }
    }

    pub fn view(&self) -> AdminView {
        self.view_at(Instant::now())
    }
}
