//! tracks-rs: headless Gantt-style tracks view engine.
//!
//! Interval items are packed onto non-overlapping lines inside named tracks,
//! validated against each other while being dragged, and projected through a
//! virtualized point axis whose label strip scrolls with inertia. Rendering is
//! delegated to an [`render::ItemPresenter`] supplied by the host.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{TrackView, TrackViewConfig};
pub use error::{TrackError, TrackResult};
