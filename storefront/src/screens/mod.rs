//! Screen state, independent of how a screen is drawn.
//!
//! The web surface renders these as HTML pages and the command line prints them as text.

pub mod admin;
pub mod catalog;
pub mod toast;

pub use admin::AdminForm;
pub use catalog::Catalog;
pub use toast::Toast;
