// ABOUTME: Shared types and configuration for the split pane widget.
// ABOUTME: Defines pane sizes, container geometry, and config file handling.

pub mod config;
pub mod geometry;
pub mod size;

pub use config::{ClassNames, ConfigError, SplitConfig};
pub use geometry::Rect;
pub use size::{Size, SizeError, SizeInput};
