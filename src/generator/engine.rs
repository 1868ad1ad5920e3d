//! Grid generation orchestrator and editor mode state machine
//!
//! [`GridGenerator`] is the only component that creates, replaces or
//! destroys the grid it owns. Hosts hold the generator directly and call into
//! it; every mutating operation requires [`EditorMode::Enabled`].
//!
//! ```text
//! Disabled --editor_initialize--> Enabled
//! Enabled  --editor_tear_down---> Disabled   (clears grid)
//! Enabled  --clear_map----------> Enabled    (no grid)
//! Enabled  --generate_map*------> Enabled    (new or loaded grid)
//! ```

use std::io;
use std::path::{Path, PathBuf};

use crate::generator::fill::FillDirection;
use crate::generator::mode::EditorMode;
use crate::grid::coordinate::{Connectivity, GridCoordinate};
use crate::grid::element::{BuildContext, Element, ElementKind, GridElement};
use crate::grid::mapping::CoordinateMapper;
use crate::grid::registry::{ElementConstructor, ElementRegistry};
use crate::grid::system::GridSystem;
use crate::io::configuration::DEFAULT_SEED;
use crate::io::error::{GridError, Result, invalid_parameter, io_error};
use crate::io::serializer::GridSystemSerializer;

/// Construction-time configuration of a generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorSettings {
    /// Seed for the random draws made while constructing elements
    pub seed: u64,
    /// Neighbourhood shape given to every grid the generator builds or loads
    pub connectivity: Connectivity,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            connectivity: Connectivity::default(),
        }
    }
}

/// Owner of zero or one live grid, mediating generation and persistence
#[derive(Debug)]
pub struct GridGenerator {
    mode: EditorMode,
    grid: Option<GridSystem>,
    mapper: CoordinateMapper<f64>,
    settings: GeneratorSettings,
    serializer: GridSystemSerializer,
    context: BuildContext,
    map_file_path: Option<PathBuf>,
}

impl Default for GridGenerator {
    fn default() -> Self {
        Self::new(GeneratorSettings::default())
    }
}

impl GridGenerator {
    /// Create a disabled generator holding every built-in element kind
    pub fn new(settings: GeneratorSettings) -> Self {
        Self::with_registry(settings, ElementRegistry::with_builtin())
    }

    /// Create a disabled generator restricted to the kinds in `registry`
    pub fn with_registry(settings: GeneratorSettings, registry: ElementRegistry) -> Self {
        Self {
            mode: EditorMode::Disabled,
            grid: None,
            mapper: CoordinateMapper::default(),
            settings,
            serializer: GridSystemSerializer::new(registry, settings.connectivity),
            context: BuildContext::new(settings.seed),
            map_file_path: None,
        }
    }

    /// Create a generator that starts enabled, for runtime embedding
    pub fn runtime(settings: GeneratorSettings) -> Self {
        let mut generator = Self::new(settings);
        generator.mode = EditorMode::Enabled;
        generator
    }

    /// Current lifecycle state
    pub const fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Whether generation and editing are currently allowed
    pub const fn is_editor_mode_active(&self) -> bool {
        self.mode.is_enabled()
    }

    /// Configuration the generator was built with
    pub const fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Element kinds this generator can build and load
    pub const fn registry(&self) -> &ElementRegistry {
        self.serializer.registry()
    }

    /// The owned grid, if any
    pub const fn grid(&self) -> Option<&GridSystem> {
        self.grid.as_ref()
    }

    /// Layout mapping for the owned grid
    ///
    /// Carries the scale of the last procedural generation; loading, clearing
    /// and changing mode reset it to the default scale.
    pub const fn mapper(&self) -> &CoordinateMapper<f64> {
        &self.mapper
    }

    /// Last known map file location; may be stale
    pub fn map_file_path(&self) -> Option<&Path> {
        self.map_file_path.as_deref()
    }

    /// Replace the last known map file location
    pub fn set_map_file_path(&mut self, path: Option<PathBuf>) {
        self.map_file_path = path;
    }

    /// Enter editor mode with no grid; does nothing if already enabled
    pub fn editor_initialize(&mut self) {
        if self.mode.is_enabled() {
            log::debug!("Editor mode already enabled");
            return;
        }
        self.grid = None;
        self.mapper = CoordinateMapper::default();
        self.mode = EditorMode::Enabled;
        log::info!("Editor mode enabled");
    }

    /// Discard the owned grid and leave editor mode; does nothing if disabled
    pub fn editor_tear_down(&mut self) {
        if !self.mode.is_enabled() {
            log::debug!("Editor mode already disabled");
            return;
        }
        self.grid = None;
        self.mapper = CoordinateMapper::default();
        self.mode = EditorMode::Disabled;
        log::info!("Editor mode disabled");
    }

    /// Discard the owned grid
    ///
    /// # Errors
    ///
    /// Returns `NotInitialized` while disabled
    pub fn clear_map(&mut self) -> Result<()> {
        self.require_enabled("clear map")?;
        if let Some(grid) = self.grid.take() {
            log::info!("Cleared {}x{} map", grid.width(), grid.height());
        }
        self.mapper = CoordinateMapper::default();
        Ok(())
    }

    /// Build a `width × height` grid with an `E` in every cell and adopt it
    ///
    /// `direction` decides the order in which elements are constructed;
    /// `scale` only feeds the layout mapper. Any owned grid is replaced once
    /// the new one is complete.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `NotInitialized` while disabled
    /// - An invalid parameter error if `E` is not registered, `scale` is not
    ///   positive and finite, or a dimension exceeds the grid size limit
    pub fn generate_map<E: Element>(
        &mut self,
        width: u32,
        height: u32,
        scale: f64,
        direction: FillDirection,
    ) -> Result<&GridSystem> {
        self.require_enabled("generate map")?;
        let construct = self.serializer.registry().constructor(E::KIND)?;
        self.generate_with(E::KIND, construct, width, height, scale, direction, &mut |_| {})
    }

    /// Build a grid of a kind chosen at runtime and adopt it
    ///
    /// `observer` is called once per constructed cell, in fill order.
    ///
    /// # Errors
    ///
    /// Same as [`Self::generate_map`]
    pub fn generate_map_of_kind(
        &mut self,
        kind: ElementKind,
        width: u32,
        height: u32,
        scale: f64,
        direction: FillDirection,
        observer: &mut dyn FnMut(GridCoordinate),
    ) -> Result<&GridSystem> {
        self.require_enabled("generate map")?;
        let construct = self.serializer.registry().constructor(kind)?;
        self.generate_with(kind, construct, width, height, scale, direction, observer)
    }

    /// Load the grid stored at `path` and adopt it
    ///
    /// `direction` is accepted for symmetry with procedural generation and
    /// has no effect: dimensions and contents come from the file. On failure
    /// the owned grid is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns `NotInitialized` while disabled, or any error from
    /// [`GridSystemSerializer::deserialize`]
    pub fn generate_map_from_file(
        &mut self,
        path: impl AsRef<Path>,
        direction: FillDirection,
    ) -> Result<&GridSystem> {
        self.require_enabled("load map")?;
        let path = path.as_ref();
        log::debug!("Fill direction {direction} has no effect on a loaded map");

        let grid = self.serializer.deserialize(path)?;

        let next_id = grid.max_element_id().map_or(Some(1), |id| id.checked_add(1));
        if next_id.is_none() {
            log::warn!("'{}' uses the last element identifier", path.display());
        }
        self.context = BuildContext::resuming(self.settings.seed, next_id);
        self.mapper = CoordinateMapper::default();
        self.map_file_path = Some(path.to_path_buf());
        Ok(self.grid.insert(grid))
    }

    /// Construct a fresh element of `kind` at `coordinate`
    ///
    /// Identifiers continue from the last generation or load. After a load
    /// they resume past the largest basic id or generated marker number.
    ///
    /// # Errors
    ///
    /// Returns `NotInitialized` while disabled, an invalid parameter error if
    /// `kind` is not registered, `OutOfBounds` if the coordinate is outside
    /// the owned grid (any coordinate, when no grid is owned), or
    /// `IdentifiersExhausted` if no identifier is left
    pub fn place_element(
        &mut self,
        kind: ElementKind,
        coordinate: GridCoordinate,
    ) -> Result<Option<GridElement>> {
        self.require_enabled("place element")?;
        let construct = self.serializer.registry().constructor(kind)?;
        let grid = self
            .grid
            .as_mut()
            .ok_or_else(|| absent_grid(coordinate))?;
        let element = construct(&mut self.context, coordinate)?;
        grid.set(coordinate, element)
    }

    /// Put `element` at `coordinate` in the owned grid
    ///
    /// # Errors
    ///
    /// Returns `NotInitialized` while disabled, an invalid parameter error if
    /// the element's kind is not registered, or `OutOfBounds`
    pub fn set_element(
        &mut self,
        coordinate: GridCoordinate,
        element: GridElement,
    ) -> Result<Option<GridElement>> {
        self.require_enabled("set element")?;
        let kind = element.kind();
        if !self.serializer.registry().contains(kind) {
            return Err(invalid_parameter(
                "element",
                &kind,
                &"element kind is not registered",
            ));
        }
        self.owned_grid_mut(coordinate)?.set(coordinate, element)
    }

    /// Empty the cell at `coordinate` in the owned grid
    ///
    /// # Errors
    ///
    /// Returns `NotInitialized` while disabled or `OutOfBounds`
    pub fn remove_element(&mut self, coordinate: GridCoordinate) -> Result<Option<GridElement>> {
        self.require_enabled("remove element")?;
        self.owned_grid_mut(coordinate)?.remove(coordinate)
    }

    /// Write the owned grid to `path` and remember `path`
    ///
    /// With no grid owned, an empty 0×0 map is written.
    ///
    /// # Errors
    ///
    /// Returns `NotInitialized` while disabled, or any error from
    /// [`GridSystemSerializer::serialize`]
    pub fn save_map(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.require_enabled("save map")?;
        let path = path.as_ref();
        self.write_owned_grid(path)?;
        self.map_file_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Write the owned grid to the last known map file location
    ///
    /// # Errors
    ///
    /// Returns `NotInitialized` while disabled, an I/O error if no location
    /// is known, or any error from [`GridSystemSerializer::serialize`]
    pub fn save_map_to_last_path(&self) -> Result<()> {
        self.require_enabled("save map")?;
        let path = self.map_file_path.as_deref().ok_or_else(|| {
            io_error(
                Path::new(""),
                "write",
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "no map file path has been set",
                ),
            )
        })?;
        self.write_owned_grid(path)
    }

    fn write_owned_grid(&self, path: &Path) -> Result<()> {
        match &self.grid {
            Some(grid) => GridSystemSerializer::serialize(grid, path),
            None => {
                let empty = GridSystem::empty(self.settings.connectivity);
                GridSystemSerializer::serialize(&empty, path)
            }
        }
    }

    fn generate_with(
        &mut self,
        kind: ElementKind,
        construct: ElementConstructor,
        width: u32,
        height: u32,
        scale: f64,
        direction: FillDirection,
        observer: &mut dyn FnMut(GridCoordinate),
    ) -> Result<&GridSystem> {
        let mapper = CoordinateMapper::new(scale)?;
        let mut grid = GridSystem::new(width, height, self.settings.connectivity)?;
        let mut context = BuildContext::new(self.settings.seed);

        for coordinate in direction.cells(width, height) {
            let element = construct(&mut context, coordinate)?;
            grid.set(coordinate, element)?;
            observer(coordinate);
        }

        log::info!(
            "Generated {width}x{height} {kind} map ({direction}, scale {scale})"
        );
        self.mapper = mapper;
        self.context = context;
        Ok(self.grid.insert(grid))
    }

    fn owned_grid_mut(&mut self, coordinate: GridCoordinate) -> Result<&mut GridSystem> {
        self.grid
            .as_mut()
            .ok_or_else(|| absent_grid(coordinate))
    }

    fn require_enabled(&self, operation: &'static str) -> Result<()> {
        if self.mode.is_enabled() {
            Ok(())
        } else {
            Err(GridError::NotInitialized { operation })
        }
    }
}

/// With no grid owned, every coordinate is outside a 0×0 extent
const fn absent_grid(coordinate: GridCoordinate) -> GridError {
    GridError::OutOfBounds {
        coordinate,
        width: 0,
        height: 0,
    }
}
