//! Grid generation and the editor lifecycle
//!
//! This module contains:
//! - The generator that owns, builds, loads and saves a grid
//! - Fill order for procedural generation
//! - The editor mode state

/// Generator orchestration
pub mod engine;
/// Fill direction and cell ordering
pub mod fill;
/// Editor lifecycle state
pub mod mode;

pub use engine::{GeneratorSettings, GridGenerator};
pub use fill::FillDirection;
pub use mode::EditorMode;
