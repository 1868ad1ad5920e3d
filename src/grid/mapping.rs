//! Conversion between grid coordinates and continuous layout space
//!
//! The mapper only knows a uniform cell spacing and an origin, so it has no
//! dependency on any rendering transform. Scale is a layout hint and never
//! changes grid topology.

use num_traits::{Float, NumCast, ToPrimitive};

use crate::grid::coordinate::GridCoordinate;
use crate::grid::system::GridSystem;
use crate::io::error::{GridError, Result, invalid_parameter};

/// Uniform spacing layout anchored at an origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper<T: Float> {
    scale: T,
    origin: [T; 2],
}

impl<T: Float> Default for CoordinateMapper<T> {
    fn default() -> Self {
        Self {
            scale: T::one(),
            origin: [T::zero(); 2],
        }
    }
}

impl<T: Float + ToString> CoordinateMapper<T> {
    /// Create a mapper with the given spacing and an origin at zero
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error unless `scale` is positive and finite
    pub fn new(scale: T) -> Result<Self> {
        Self::with_origin(scale, [T::zero(); 2])
    }

    /// Create a mapper with the given spacing and origin
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error unless `scale` is positive and
    /// finite and both origin components are finite
    pub fn with_origin(scale: T, origin: [T; 2]) -> Result<Self> {
        if !scale.is_finite() || scale <= T::zero() {
            return Err(invalid_parameter(
                "scale",
                &scale,
                &"must be a positive finite number",
            ));
        }
        if !origin.iter().all(|component| component.is_finite()) {
            return Err(invalid_parameter(
                "origin",
                &format!("[{}, {}]", origin[0].to_string(), origin[1].to_string()),
                &"must be finite",
            ));
        }
        Ok(Self { scale, origin })
    }
}

impl<T: Float> CoordinateMapper<T> {
    /// Spacing between neighbouring cell origins
    pub const fn scale(&self) -> T {
        self.scale
    }

    /// Layout position of cell (0, 0)
    pub const fn origin(&self) -> [T; 2] {
        self.origin
    }

    /// Layout position of the corner of `coordinate` nearest the origin
    pub fn to_world(&self, coordinate: GridCoordinate) -> [T; 2] {
        [
            self.origin[0] + Self::lift(coordinate.column) * self.scale,
            self.origin[1] + Self::lift(coordinate.row) * self.scale,
        ]
    }

    /// Layout position of the centre of `coordinate`
    pub fn cell_center(&self, coordinate: GridCoordinate) -> [T; 2] {
        let half = self.scale / (T::one() + T::one());
        let [x, y] = self.to_world(coordinate);
        [x + half, y + half]
    }

    /// Cell containing a layout point, ignoring grid extent
    ///
    /// Returns `None` for points before the origin on either axis, beyond
    /// the coordinate range, or with non-finite components.
    pub fn to_grid(&self, point: [T; 2]) -> Option<GridCoordinate> {
        let column = ((point[0] - self.origin[0]) / self.scale).floor();
        let row = ((point[1] - self.origin[1]) / self.scale).floor();
        Some(GridCoordinate::new(
            ToPrimitive::to_u32(&column)?,
            ToPrimitive::to_u32(&row)?,
        ))
    }

    /// Cell of `grid` containing a layout point
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the point falls outside the grid's extent
    pub fn to_grid_in(&self, point: [T; 2], grid: &GridSystem) -> Result<GridCoordinate> {
        let out_of_bounds = |coordinate| GridError::OutOfBounds {
            coordinate,
            width: grid.width(),
            height: grid.height(),
        };
        let coordinate = self
            .to_grid(point)
            .ok_or_else(|| out_of_bounds(GridCoordinate::new(u32::MAX, u32::MAX)))?;
        if grid.contains(coordinate) {
            Ok(coordinate)
        } else {
            Err(out_of_bounds(coordinate))
        }
    }

    /// Layout size covered by a `width × height` grid
    pub fn extent(&self, width: u32, height: u32) -> [T; 2] {
        [Self::lift(width) * self.scale, Self::lift(height) * self.scale]
    }

    fn lift(value: u32) -> T {
        <T as NumCast>::from(value).unwrap_or_else(T::max_value)
    }
}
