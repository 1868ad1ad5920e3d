//! Dense grid storage with bounds-checked access
//!
//! Cells are held in a `[row, column]` array of optional elements, so the
//! array's standard layout is exactly the row-major order used for iteration
//! and persistence. Dimensions are fixed per instance; resizing means building
//! a new grid.

use ndarray::Array2;

use crate::grid::coordinate::{Connectivity, GridCoordinate};
use crate::grid::element::GridElement;
use crate::io::configuration::{MAX_GRID_CELLS, MAX_GRID_DIMENSION};
use crate::io::error::{GridError, Result, invalid_parameter};

/// Square-cell grid of optional elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSystem {
    cells: Array2<Option<GridElement>>,
    width: u32,
    height: u32,
    connectivity: Connectivity,
}

impl Default for GridSystem {
    fn default() -> Self {
        Self::empty(Connectivity::default())
    }
}

impl GridSystem {
    /// Create an empty grid of the given dimensions
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error if either dimension exceeds
    /// [`MAX_GRID_DIMENSION`] or the cell count exceeds [`MAX_GRID_CELLS`]
    pub fn new(width: u32, height: u32, connectivity: Connectivity) -> Result<Self> {
        check_dimension("width", width)?;
        check_dimension("height", height)?;
        let cells = u64::from(width) * u64::from(height);
        if cells > MAX_GRID_CELLS {
            return Err(invalid_parameter(
                "size",
                &format!("{width}x{height}"),
                &format!("{cells} cells exceeds the limit of {MAX_GRID_CELLS}"),
            ));
        }

        Ok(Self {
            cells: Array2::default((height as usize, width as usize)),
            width,
            height,
            connectivity,
        })
    }

    /// A 0×0 grid
    pub fn empty(connectivity: Connectivity) -> Self {
        Self {
            cells: Array2::default((0, 0)),
            width: 0,
            height: 0,
            connectivity,
        }
    }

    /// Number of columns
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Neighbourhood shape used by [`Self::neighbors`]
    pub const fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    /// Whether `coordinate` lies inside the grid
    pub const fn contains(&self, coordinate: GridCoordinate) -> bool {
        coordinate.is_within(self.width, self.height)
    }

    /// Element at `coordinate`, or `None` if the cell is empty
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `coordinate` lies outside the grid
    pub fn get(&self, coordinate: GridCoordinate) -> Result<Option<&GridElement>> {
        self.check_bounds(coordinate)?;
        Ok(self
            .cells
            .get(coordinate.to_index())
            .and_then(Option::as_ref))
    }

    /// Mutable element at `coordinate`, or `None` if the cell is empty
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `coordinate` lies outside the grid
    pub fn get_mut(&mut self, coordinate: GridCoordinate) -> Result<Option<&mut GridElement>> {
        self.check_bounds(coordinate)?;
        Ok(self
            .cells
            .get_mut(coordinate.to_index())
            .and_then(Option::as_mut))
    }

    /// Place `element` at `coordinate`, returning the element it replaced
    ///
    /// The element's own coordinate is rewritten to `coordinate` so the two
    /// can never disagree.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `coordinate` lies outside the grid
    pub fn set(
        &mut self,
        coordinate: GridCoordinate,
        mut element: GridElement,
    ) -> Result<Option<GridElement>> {
        let cell = self.cell_mut(coordinate)?;
        element.relocate(coordinate);
        Ok(cell.replace(element))
    }

    /// Empty the cell at `coordinate`, returning what it held
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `coordinate` lies outside the grid
    pub fn remove(&mut self, coordinate: GridCoordinate) -> Result<Option<GridElement>> {
        Ok(self.cell_mut(coordinate)?.take())
    }

    /// Empty every cell, keeping the dimensions
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    /// Whether no cell is occupied
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Occupied cells in row-major order: row ascending, then column ascending
    pub fn all_occupied(&self) -> impl Iterator<Item = (GridCoordinate, &GridElement)> + '_ {
        self.cells
            .indexed_iter()
            .filter_map(|((row, column), cell)| {
                cell.as_ref()
                    .map(|element| (GridCoordinate::new(column as u32, row as u32), element))
            })
    }

    /// In-bounds coordinates within `within` steps of `coordinate`
    ///
    /// The centre cell itself is excluded. The returned iterator is lazy and
    /// can be cloned to restart it.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if `coordinate` lies outside the grid
    pub fn neighbors(&self, coordinate: GridCoordinate, within: u32) -> Result<Neighbors> {
        self.check_bounds(coordinate)?;
        Ok(Neighbors::new(
            coordinate,
            within,
            self.connectivity,
            self.width,
            self.height,
        ))
    }

    /// Largest build counter value recoverable from any element
    ///
    /// See [`GridElement::sequence_id`].
    pub fn max_element_id(&self) -> Option<u64> {
        self.all_occupied()
            .filter_map(|(_, element)| element.sequence_id())
            .max()
    }

    fn cell_mut(&mut self, coordinate: GridCoordinate) -> Result<&mut Option<GridElement>> {
        self.check_bounds(coordinate)?;
        let (width, height) = (self.width, self.height);
        self.cells
            .get_mut(coordinate.to_index())
            .ok_or(GridError::OutOfBounds {
                coordinate,
                width,
                height,
            })
    }

    fn check_bounds(&self, coordinate: GridCoordinate) -> Result<()> {
        if self.contains(coordinate) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                coordinate,
                width: self.width,
                height: self.height,
            })
        }
    }
}

fn check_dimension(parameter: &'static str, value: u32) -> Result<()> {
    if value > MAX_GRID_DIMENSION {
        return Err(invalid_parameter(
            parameter,
            &value,
            &format!("must not exceed {MAX_GRID_DIMENSION}"),
        ));
    }
    Ok(())
}

/// Lazy walk over the in-bounds neighbourhood of one cell
///
/// Visits offsets row by row inside the bounding square of `within`, clipped
/// to the grid, keeping those the connectivity reaches.
#[derive(Debug, Clone)]
pub struct Neighbors {
    center: GridCoordinate,
    within: u32,
    connectivity: Connectivity,
    column_span: (i64, i64),
    row_end: i64,
    delta_column: i64,
    delta_row: i64,
}

impl Neighbors {
    fn new(
        center: GridCoordinate,
        within: u32,
        connectivity: Connectivity,
        width: u32,
        height: u32,
    ) -> Self {
        let reach = i64::from(within);
        let column = i64::from(center.column);
        let row = i64::from(center.row);

        let column_span = (
            (-reach).max(-column),
            reach.min(i64::from(width) - 1 - column),
        );
        let row_start = (-reach).max(-row);
        let row_end = reach.min(i64::from(height) - 1 - row);

        Self {
            center,
            within,
            connectivity,
            column_span,
            row_end,
            delta_column: column_span.0,
            delta_row: row_start,
        }
    }
}

impl Iterator for Neighbors {
    type Item = GridCoordinate;

    fn next(&mut self) -> Option<Self::Item> {
        while self.delta_row <= self.row_end {
            let (delta_column, delta_row) = (self.delta_column, self.delta_row);

            self.delta_column += 1;
            if self.delta_column > self.column_span.1 {
                self.delta_column = self.column_span.0;
                self.delta_row += 1;
            }

            let is_center = delta_column == 0 && delta_row == 0;
            if is_center
                || !self
                    .connectivity
                    .reaches(delta_column, delta_row, self.within)
            {
                continue;
            }
            if let Some(candidate) = self.center.offset(delta_column, delta_row) {
                return Some(candidate);
            }
        }
        None
    }
}
