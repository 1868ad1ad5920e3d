//! Order in which procedural generation visits cells

use std::fmt;
use std::str::FromStr;

use crate::grid::coordinate::GridCoordinate;
use crate::io::error::{GridError, invalid_parameter};

/// Cell visiting order during generation
///
/// Only the sequence of element construction changes; the finished grid
/// holds one element per cell either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FillDirection {
    /// Row by row: every column of row 0, then row 1, and so on
    #[default]
    Horizontal,
    /// Column by column: every row of column 0, then column 1, and so on
    Vertical,
}

impl FillDirection {
    /// Every coordinate of a `width × height` grid in this direction's order
    pub const fn cells(self, width: u32, height: u32) -> FillOrder {
        FillOrder {
            direction: self,
            width,
            height,
            major: 0,
            minor: 0,
        }
    }
}

impl FromStr for FillDirection {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "horizontal" | "h" => Ok(Self::Horizontal),
            "vertical" | "v" => Ok(Self::Vertical),
            _ => Err(invalid_parameter(
                "direction",
                &s,
                &"expected horizontal or vertical",
            )),
        }
    }
}

impl fmt::Display for FillDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => f.write_str("horizontal"),
            Self::Vertical => f.write_str("vertical"),
        }
    }
}

/// Iterator over grid coordinates in fill order
#[derive(Debug, Clone)]
pub struct FillOrder {
    direction: FillDirection,
    width: u32,
    height: u32,
    major: u32,
    minor: u32,
}

impl FillOrder {
    const fn extents(&self) -> (u32, u32) {
        match self.direction {
            FillDirection::Horizontal => (self.height, self.width),
            FillDirection::Vertical => (self.width, self.height),
        }
    }
}

impl Iterator for FillOrder {
    type Item = GridCoordinate;

    fn next(&mut self) -> Option<Self::Item> {
        let (major_len, minor_len) = self.extents();
        if minor_len == 0 || self.major >= major_len {
            return None;
        }

        let coordinate = match self.direction {
            FillDirection::Horizontal => GridCoordinate::new(self.minor, self.major),
            FillDirection::Vertical => GridCoordinate::new(self.major, self.minor),
        };

        self.minor += 1;
        if self.minor >= minor_len {
            self.minor = 0;
            self.major += 1;
        }
        Some(coordinate)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (major_len, minor_len) = self.extents();
        let total = u64::from(major_len) * u64::from(minor_len);
        let done = u64::from(self.major) * u64::from(minor_len) + u64::from(self.minor);
        let left = usize::try_from(total.saturating_sub(done)).unwrap_or(usize::MAX);
        (left, Some(left))
    }
}

impl ExactSizeIterator for FillOrder {}
