//! Observer hooks and cross-chart view linking.
//!
//! Extensions only see events; they never mutate engine state directly.

mod listeners;
mod view_link;

pub use listeners::{ZoomEvent, ZoomListener};
pub use view_link::{LinkedViewUpdate, ViewLink, ViewLinkListener};
