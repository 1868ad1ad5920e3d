//! Grid data model
//!
//! This module contains the in-memory side of the engine:
//! - Cell coordinates and neighbourhood shapes
//! - Element variants and their construction
//! - The registry that maps element kinds to constructors and decoders
//! - Dense grid storage
//! - Mapping between cells and layout space

/// Cell coordinates and connectivity
pub mod coordinate;
/// Element variants, build context and the element trait
pub mod element;
/// Coordinate mapping to and from layout space
pub mod mapping;
/// Element kind registry
pub mod registry;
/// Dense grid storage
pub mod system;

pub use coordinate::{Connectivity, GridCoordinate};
pub use element::{BasicElement, Element, ElementKind, GridElement, MarkerElement, TerrainElement};
pub use mapping::CoordinateMapper;
pub use registry::ElementRegistry;
pub use system::GridSystem;
