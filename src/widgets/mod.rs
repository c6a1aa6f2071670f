//! Widget state structs (rendering-agnostic)
//!
//! This module contains the progress widgets and the shapes that lay them out.
//! Widgets hold an animator and produce plain geometry; frontends turn that
//! geometry into terminal cells (or anything else).

pub mod circular_ring;
pub mod horizontal_bar;
pub mod progress_widget;
pub mod shape;

pub use circular_ring::{RingGeometry, RingShape};
pub use horizontal_bar::{BarGeometry, BarShape, RoundedRect};
pub use progress_widget::{CircularProgressBar, HorizontalProgressBar, ProgressWidget};
pub use shape::{Bounds, ProgressView, Shape};
