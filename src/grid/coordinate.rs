//! Integer cell addressing and neighbourhood shapes

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::io::error::{GridError, invalid_parameter};

/// Address of one cell as (column, row)
///
/// Ordering is row-major: rows compare first, then columns. This is the
/// order in which occupied cells are iterated and persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridCoordinate {
    /// Horizontal index, growing to the right
    pub column: u32,
    /// Vertical index, growing downward
    pub row: u32,
}

impl GridCoordinate {
    /// Create a coordinate from column and row
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Whether the coordinate lies in `[0, width) × [0, height)`
    pub const fn is_within(self, width: u32, height: u32) -> bool {
        self.column < width && self.row < height
    }

    /// Offset by a signed delta, or `None` if either axis would go negative
    /// or overflow
    pub fn offset(self, delta_column: i64, delta_row: i64) -> Option<Self> {
        let column = u32::try_from(i64::from(self.column) + delta_column).ok()?;
        let row = u32::try_from(i64::from(self.row) + delta_row).ok()?;
        Some(Self { column, row })
    }

    /// Index pair into a `[row, column]` array
    pub const fn to_index(self) -> (usize, usize) {
        (self.row as usize, self.column as usize)
    }
}

impl Ord for GridCoordinate {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.row, self.column).cmp(&(other.row, other.column))
    }
}

impl PartialOrd for GridCoordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

impl From<(u32, u32)> for GridCoordinate {
    fn from((column, row): (u32, u32)) -> Self {
        Self { column, row }
    }
}

/// Parses `COLUMN,ROW`, the form accepted on the command line
impl FromStr for GridCoordinate {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (column, row) = s
            .split_once(',')
            .ok_or_else(|| invalid_parameter("coordinate", &s, &"expected COLUMN,ROW"))?;
        let column = column
            .trim()
            .parse()
            .map_err(|e| invalid_parameter("coordinate", &s, &e))?;
        let row = row
            .trim()
            .parse()
            .map_err(|e| invalid_parameter("coordinate", &s, &e))?;
        Ok(Self { column, row })
    }
}

/// Which cells count as adjacent, fixed when a grid is constructed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Connectivity {
    /// Edge-sharing cells; reach is measured as Manhattan distance
    #[default]
    FourWay,
    /// Edge- and corner-sharing cells; reach is measured as Chebyshev distance
    EightWay,
}

impl Connectivity {
    /// Whether a delta lies within `within` steps under this connectivity
    pub const fn reaches(self, delta_column: i64, delta_row: i64, within: u32) -> bool {
        let within = within as i64;
        match self {
            Self::FourWay => delta_column.abs() + delta_row.abs() <= within,
            Self::EightWay => delta_column.abs() <= within && delta_row.abs() <= within,
        }
    }
}

impl FromStr for Connectivity {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "4" | "four" | "four-way" => Ok(Self::FourWay),
            "8" | "eight" | "eight-way" => Ok(Self::EightWay),
            _ => Err(invalid_parameter(
                "connectivity",
                &s,
                &"expected four-way or eight-way",
            )),
        }
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FourWay => f.write_str("four-way"),
            Self::EightWay => f.write_str("eight-way"),
        }
    }
}
