//! Format constants and runtime configuration defaults

// Map file layout
/// Fixed tag at the start of every map file
pub const MAP_FILE_MAGIC: [u8; 4] = *b"SQGM";
/// Highest map format version this build reads and the version it writes
pub const MAP_FORMAT_VERSION: u32 = 1;
/// Size of the fixed header: magic, version, width, height, element count
pub const MAP_HEADER_SIZE: usize = 20;
/// Size of the fixed part of an element record: column, row, kind, payload length
pub const RECORD_HEADER_SIZE: usize = 14;
/// Size of the trailing checksum
pub const CHECKSUM_SIZE: usize = 4;
/// Seed for the xxHash32 checksum trailer
pub const CHECKSUM_SEED: u32 = 0;

// File naming
/// Extension used for map files
pub const MAP_FILE_EXTENSION: &str = "map";
/// Stem proposed for maps that have never been saved
pub const DEFAULT_MAP_NAME: &str = "Untitled_map";
/// Suffix of the staging file used for atomic writes
pub const TEMP_FILE_SUFFIX: &str = "tmp";

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: u32 = 10_000;
/// Maximum number of cells in one grid, empty or not
pub const MAX_GRID_CELLS: u64 = 1 << 22;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;
/// Default spacing between cell origins in world units
pub const DEFAULT_SCALE: f64 = 1.0;

// Element payload limits
/// Highest elevation a generated terrain cell may receive
pub const TERRAIN_MAX_ELEVATION: u8 = 100;
/// Terrain at or above this elevation is passable
pub const TERRAIN_SEA_LEVEL: u8 = 30;
/// Longest marker label, in bytes, that fits the payload length prefix
pub const MAX_MARKER_LABEL_LEN: usize = u16::MAX as usize;
/// Prefix of labels given to markers built by generation
pub const MARKER_LABEL_PREFIX: &str = "marker-";

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 50;
/// Minimum cell count before a progress bar is worth drawing
pub const PROGRESS_MIN_CELLS: u64 = 4_096;
