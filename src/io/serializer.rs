//! Versioned binary map file format
//!
//! Layout (all integers little-endian):
//!
//! ```text
//! magic          [u8; 4]   "SQGM"
//! version        u32
//! width, height  u32, u32
//! element_count  u32
//! records        element_count × {
//!                  column u32, row u32, kind u16, payload_len u32, payload
//!                }
//! checksum       u32       xxHash32 of every preceding byte
//! ```
//!
//! Records are written in row-major order, which makes output byte-identical
//! for equal grids. Readers check the version before anything else and
//! refuse files from newer revisions outright.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use xxhash_rust::xxh32::xxh32;

use crate::grid::coordinate::{Connectivity, GridCoordinate};
use crate::grid::registry::ElementRegistry;
use crate::grid::system::GridSystem;
use crate::io::atomic::atomic_write;
use crate::io::codec::{ByteReader, ByteWriter};
use crate::io::configuration::{
    CHECKSUM_SEED, CHECKSUM_SIZE, MAP_FILE_MAGIC, MAP_FORMAT_VERSION, MAP_HEADER_SIZE,
    RECORD_HEADER_SIZE,
};
use crate::io::error::{GridError, IN_MEMORY_PATH, Result, WithPath, format_error, io_error};

/// Fixed-size fields at the start of a map file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapHeader {
    /// Format revision the file was written with
    pub version: u32,
    /// Number of columns
    pub width: u32,
    /// Number of rows
    pub height: u32,
    /// Number of element records that follow
    pub element_count: u32,
}

/// Reads and writes [`GridSystem`]s as map files
///
/// Writing needs nothing but the grid. Reading reconstructs element variants
/// through an [`ElementRegistry`] and gives the rebuilt grid the configured
/// connectivity, which the file does not record.
#[derive(Debug, Clone, Default)]
pub struct GridSystemSerializer {
    registry: ElementRegistry,
    connectivity: Connectivity,
}

impl GridSystemSerializer {
    /// Create a serializer that decodes with `registry`
    pub fn new(registry: ElementRegistry, connectivity: Connectivity) -> Self {
        Self {
            registry,
            connectivity,
        }
    }

    /// Element kinds this serializer can read
    pub const fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    /// Connectivity given to deserialized grids
    pub const fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    /// Write `grid` to `path`, replacing any existing file
    ///
    /// The whole file is encoded in memory and written atomically, so a
    /// failure never truncates or corrupts what was at `path` before.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if `path` is empty or the file cannot be written
    pub fn serialize(grid: &GridSystem, path: &Path) -> Result<()> {
        check_path(path, "write")?;

        let bytes = Self::encode(grid);
        atomic_write(path, &bytes).map_err(|e| io_error(path, "write", e))?;

        log::info!(
            "Saved {}x{} map with {} elements to '{}' ({} bytes)",
            grid.width(),
            grid.height(),
            grid.occupied_count(),
            path.display(),
            bytes.len()
        );
        Ok(())
    }

    /// Read a grid from `path`
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `FileNotFound` if nothing exists at `path`
    /// - An I/O error if `path` is empty or cannot be read
    /// - `UnsupportedVersion` if the file is newer than this reader
    /// - A format error if the file is malformed
    pub fn deserialize(&self, path: &Path) -> Result<GridSystem> {
        self.deserialize_with_header(path).map(|(_, grid)| grid)
    }

    /// Read a grid from `path` together with the header it was stored under
    ///
    /// # Errors
    ///
    /// Same as [`Self::deserialize`]
    pub fn deserialize_with_header(&self, path: &Path) -> Result<(MapHeader, GridSystem)> {
        let bytes = read_file(path)?;

        let (header, grid) = self.decode_with_header(&bytes).at_path(path)?;
        log::info!(
            "Loaded {}x{} map with {} elements from '{}'",
            grid.width(),
            grid.height(),
            grid.occupied_count(),
            path.display()
        );
        Ok((header, grid))
    }

    /// Encode `grid` into map file bytes
    pub fn encode(grid: &GridSystem) -> Vec<u8> {
        let estimate = MAP_HEADER_SIZE
            + CHECKSUM_SIZE
            + grid.occupied_count() * (RECORD_HEADER_SIZE + 8);
        let mut bytes = Vec::with_capacity(estimate);
        let mut out = ByteWriter::new(&mut bytes);

        out.put_bytes(&MAP_FILE_MAGIC);
        out.put_u32(MAP_FORMAT_VERSION);
        out.put_u32(grid.width());
        out.put_u32(grid.height());
        let count = u32::try_from(grid.occupied_count()).unwrap_or(u32::MAX);
        out.put_u32(count);

        let mut payload = Vec::new();
        for (coordinate, element) in grid.all_occupied() {
            payload.clear();
            element.encode_payload(&mut ByteWriter::new(&mut payload));

            out.put_u32(coordinate.column);
            out.put_u32(coordinate.row);
            out.put_u16(element.kind().tag());
            out.put_u32(u32::try_from(payload.len()).unwrap_or(u32::MAX));
            out.put_bytes(&payload);
        }

        let checksum = xxh32(&bytes, CHECKSUM_SEED);
        bytes.extend_from_slice(&checksum.to_le_bytes());
        bytes
    }

    /// Decode map file bytes into a grid
    ///
    /// Errors carry a placeholder path; [`Self::deserialize`] replaces it with
    /// the real one.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedVersion` for newer files and a format error for
    /// anything structurally invalid
    pub fn decode(&self, bytes: &[u8]) -> Result<GridSystem> {
        self.decode_with_header(bytes).map(|(_, grid)| grid)
    }

    /// Decode map file bytes into their header and grid
    ///
    /// # Errors
    ///
    /// Same as [`Self::decode`]
    pub fn decode_with_header(&self, bytes: &[u8]) -> Result<(MapHeader, GridSystem)> {
        let body = verified_body(bytes)?;
        let mut reader = ByteReader::new(body);
        let header = read_header(&mut reader)?;

        let mut grid = GridSystem::new(header.width, header.height, self.connectivity)
            .map_err(|e| format_error(&e))?;

        let capacity = u64::from(header.width) * u64::from(header.height);
        if u64::from(header.element_count) > capacity {
            return Err(format_error(&format!(
                "element count {} exceeds the {} cells of a {}x{} grid",
                header.element_count, capacity, header.width, header.height
            )));
        }

        let mut previous: Option<GridCoordinate> = None;
        for index in 0..header.element_count {
            if reader.remaining() < RECORD_HEADER_SIZE {
                return Err(format_error(&format!(
                    "element count mismatch: header declares {}, data ends after {index}",
                    header.element_count
                )));
            }

            let column = reader.u32("record column")?;
            let row = reader.u32("record row")?;
            let coordinate = GridCoordinate::new(column, row);
            let tag = reader.u16("record kind")?;
            let payload_len = reader.u32("record payload length")?;

            if !grid.contains(coordinate) {
                return Err(format_error(&format!(
                    "record {index} at {coordinate} lies outside the {}x{} grid",
                    header.width, header.height
                )));
            }
            if previous.is_some_and(|prev| coordinate <= prev) {
                return Err(format_error(&format!(
                    "record {index} at {coordinate} is duplicated or out of row-major order"
                )));
            }
            previous = Some(coordinate);

            let payload = reader.take(payload_len as usize, "record payload")?;
            let mut payload_reader = ByteReader::new(payload);
            let element = self.registry.decode(tag, &mut payload_reader, coordinate)?;
            payload_reader.finish(&format!("payload of record {index}"))?;

            grid.set(coordinate, element)?;
        }
        reader.finish("last element record")?;

        log::debug!(
            "Decoded {} records for a {}x{} grid",
            header.element_count,
            header.width,
            header.height
        );
        Ok((header, grid))
    }

    /// Read only the header of the map file at `path`
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::deserialize`], limited to the header and
    /// checksum
    pub fn read_header(path: &Path) -> Result<MapHeader> {
        let bytes = read_file(path)?;
        verified_body(&bytes)
            .and_then(|body| read_header(&mut ByteReader::new(body)))
            .at_path(path)
    }
}

/// Check magic, version and checksum; return the bytes the checksum covers
fn verified_body(bytes: &[u8]) -> Result<&[u8]> {
    let mut reader = ByteReader::new(bytes);

    let magic: [u8; 4] = reader.array("magic")?;
    if magic != MAP_FILE_MAGIC {
        return Err(format_error(&format!(
            "bad magic {magic:02x?}, expected {MAP_FILE_MAGIC:02x?}"
        )));
    }

    let version = reader.u32("version")?;
    check_version(version)?;

    let (body, stored) = bytes
        .split_last_chunk::<CHECKSUM_SIZE>()
        .filter(|(body, _)| body.len() >= MAP_HEADER_SIZE)
        .ok_or_else(|| format_error(&"truncated before checksum"))?;
    let stored = u32::from_le_bytes(*stored);
    let computed = xxh32(body, CHECKSUM_SEED);
    if stored != computed {
        return Err(format_error(&format!(
            "checksum mismatch: stored {stored:#010x}, computed {computed:#010x}"
        )));
    }
    Ok(body)
}

fn read_header(reader: &mut ByteReader<'_>) -> Result<MapHeader> {
    let _magic: [u8; 4] = reader.array("magic")?;
    let version = reader.u32("version")?;
    check_version(version)?;

    Ok(MapHeader {
        version,
        width: reader.u32("width")?,
        height: reader.u32("height")?,
        element_count: reader.u32("element count")?,
    })
}

fn check_version(version: u32) -> Result<()> {
    if version == 0 {
        return Err(format_error(&"version 0 is not a valid format revision"));
    }
    if version > MAP_FORMAT_VERSION {
        return Err(GridError::UnsupportedVersion {
            path: PathBuf::from(IN_MEMORY_PATH),
            found: version,
            supported: MAP_FORMAT_VERSION,
        });
    }
    Ok(())
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    check_path(path, "read")?;
    fs::read(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            GridError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            io_error(path, "read", e)
        }
    })
}

fn check_path(path: &Path, operation: &'static str) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(io_error(
            path,
            operation,
            io::Error::new(io::ErrorKind::InvalidInput, "map file path is empty"),
        ));
    }
    Ok(())
}
