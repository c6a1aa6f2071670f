//! progress-gauge - animated progress widgets
//!
//! A horizontal bar and a circular ring that share one time-based progress
//! animator, plus the ratatui frontend and demo dashboard built on them.

pub mod config;
pub mod core;
pub mod data;
pub mod frontend;
pub mod widgets;
