//! Square tile grid generation with a versioned binary map format
//!
//! A [`GridGenerator`] owns at most one [`GridSystem`] of square cells. In
//! editor mode it can fill a fresh grid with one element kind in a chosen
//! order, edit individual cells, and save or load the grid through
//! [`io::serializer::GridSystemSerializer`].

#![forbid(unsafe_code)]

/// Grid generation and the editor lifecycle
pub mod generator;
/// Grid storage, coordinates and element variants
pub mod grid;
/// Persistence, errors and command-line plumbing
pub mod io;

pub use generator::{EditorMode, FillDirection, GeneratorSettings, GridGenerator};
pub use grid::{GridCoordinate, GridSystem};
pub use io::error::{GridError, Result};
