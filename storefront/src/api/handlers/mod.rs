//! HTTP request handlers for the rendered screens.

pub mod admin;
pub mod catalog;
pub mod static_assets;
