//! Data layer - Pure values without UI coupling
//!
//! Colors, validated progress values, configs and attribute resolution.
//! NO imports from frontend/ or any rendering code.

pub mod attributes;
pub mod color;
pub mod progress_config;
pub mod progress_value;

pub use attributes::{AttributeSource, ResolvedAttributes};
pub use color::{Color, ParseColorError};
pub use progress_config::ProgressConfig;
pub use progress_value::{ProgressError, ProgressValue, MAX_PROGRESS, MIN_PROGRESS};
