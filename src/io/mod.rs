//! Persistence, configuration and host plumbing

/// Atomic file replacement
pub mod atomic;
/// Command-line interface and command processing
pub mod cli;
/// Little-endian byte cursors for the map format
pub mod codec;
/// Format constants and default values
pub mod configuration;
/// Error types
pub mod error;
/// Logger setup
pub mod logging;
/// Progress bar display
pub mod progress;
/// Map file reading and writing
pub mod serializer;
