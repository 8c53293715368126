//! The web surface: one page per screen plus its static assets.

pub mod handlers;
