//! ticker-chart: headless price chart for daily stock series.
//!
//! The crate turns a series of daily sessions (close, volume and optional
//! 20/50-day moving averages) into a backend-agnostic frame of draw
//! primitives, with hover lookup, host resize handling and an SVG backend.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig};
pub use error::{ChartError, ChartResult};
