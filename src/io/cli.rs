//! Command-line host driving the generator through its public operations

use crate::generator::{FillDirection, GeneratorSettings, GridGenerator};
use crate::grid::coordinate::{Connectivity, GridCoordinate};
use crate::grid::element::{ElementKind, GridElement, MarkerElement};
use crate::grid::mapping::CoordinateMapper;
use crate::io::configuration::{DEFAULT_MAP_NAME, DEFAULT_SCALE, DEFAULT_SEED, MAP_FILE_EXTENSION};
use crate::io::error::{Result, invalid_parameter};
use crate::io::progress::ProgressManager;
use crate::io::serializer::GridSystemSerializer;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "squaregrid")]
#[command(
    author,
    version,
    about = "Generate, inspect and edit square grid map files"
)]
/// Command-line arguments for the map tool
pub struct Cli {
    /// Operation to run
    #[command(subcommand)]
    pub command: Command,

    /// Suppress progress output and summaries
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl Cli {
    /// Check if progress and summaries should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Map operations offered by the tool
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a new map and save it
    Generate(GenerateArgs),
    /// Print the contents of a map file
    Inspect(InspectArgs),
    /// Place or remove elements in an existing map file
    Edit(EditArgs),
}

/// Arguments for `generate`
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Number of columns
    #[arg(short = 'w', long)]
    pub width: u32,

    /// Number of rows
    #[arg(short = 'H', long)]
    pub height: u32,

    /// Spacing between cells in layout units
    #[arg(long, default_value_t = DEFAULT_SCALE)]
    pub scale: f64,

    /// Order in which cells are filled (horizontal or vertical)
    #[arg(short, long, default_value_t = FillDirection::Horizontal)]
    pub direction: FillDirection,

    /// Element kind placed in every cell (basic, terrain or marker)
    #[arg(short, long, default_value_t = ElementKind::Basic)]
    pub kind: ElementKind,

    /// Random seed for reproducible element construction
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Neighbourhood shape (four-way or eight-way)
    #[arg(short, long, default_value_t = Connectivity::FourWay)]
    pub connectivity: Connectivity,

    /// Output map file (defaults to Untitled_map.map)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `inspect`
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Map file to read
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// List every occupied cell
    #[arg(long)]
    pub cells: bool,

    /// Spacing used to report layout positions of cells
    #[arg(long, default_value_t = DEFAULT_SCALE)]
    pub scale: f64,
}

/// Arguments for `edit`
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Map file to load
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Cells to fill with a new element
    #[arg(long = "set", value_name = "COL,ROW")]
    pub set: Vec<GridCoordinate>,

    /// Cells to empty, applied before `--set`
    #[arg(long = "remove", value_name = "COL,ROW")]
    pub remove: Vec<GridCoordinate>,

    /// Element kind used by `--set`
    #[arg(short, long, default_value_t = ElementKind::Basic)]
    pub kind: ElementKind,

    /// Label for markers placed by `--set` (requires `--kind marker`)
    #[arg(short, long)]
    pub label: Option<String>,

    /// Random seed for newly constructed elements
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Save to this path instead of overwriting FILE
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Runs one parsed command against a freshly created generator
pub struct MapCommandProcessor {
    cli: Cli,
    progress: ProgressManager,
}

impl MapCommandProcessor {
    /// Create a processor for the given arguments
    pub const fn new(cli: Cli) -> Self {
        let progress = if cli.should_show_progress() {
            ProgressManager::new()
        } else {
            ProgressManager::hidden()
        };
        Self { cli, progress }
    }

    /// Run the command, writing reports to stdout
    ///
    /// # Errors
    ///
    /// Returns any error raised by the generator or serializer
    pub fn process(&mut self) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.process_to(&mut out)
    }

    /// Run the command, writing reports to `out`
    ///
    /// # Errors
    ///
    /// Returns any error raised by the generator or serializer, or an I/O
    /// error if `out` cannot be written
    pub fn process_to(&mut self, out: &mut dyn Write) -> Result<()> {
        match &self.cli.command {
            Command::Generate(args) => {
                Self::generate(args, &mut self.progress, self.cli.quiet, out)
            }
            Command::Inspect(args) => Self::inspect(args, out),
            Command::Edit(args) => Self::edit(args, self.cli.quiet, out),
        }
    }

    fn generate(
        args: &GenerateArgs,
        progress: &mut ProgressManager,
        quiet: bool,
        out: &mut dyn Write,
    ) -> Result<()> {
        let settings = GeneratorSettings {
            seed: args.seed,
            connectivity: args.connectivity,
        };
        let mut generator = GridGenerator::new(settings);
        generator.editor_initialize();
        generator.clear_map()?;

        progress.start("generate", u64::from(args.width) * u64::from(args.height));
        {
            let progress = &*progress;
            generator.generate_map_of_kind(
                args.kind,
                args.width,
                args.height,
                args.scale,
                args.direction,
                &mut |_| progress.tick(),
            )?;
        }
        progress.finish("done");

        let output = args.output.clone().unwrap_or_else(default_output_path);
        generator.save_map(&output)?;

        if !quiet {
            let occupied = generator.grid().map_or(0, |grid| grid.occupied_count());
            writeln!(
                out,
                "Wrote {}x{} {} map ({occupied} elements) to {}",
                args.width,
                args.height,
                args.kind,
                output.display()
            )?;
        }
        generator.editor_tear_down();
        Ok(())
    }

    fn inspect(args: &InspectArgs, out: &mut dyn Write) -> Result<()> {
        let serializer = GridSystemSerializer::default();
        let (header, grid) = serializer.deserialize_with_header(&args.file)?;
        let mapper = CoordinateMapper::new(args.scale)?;

        let mut counts: BTreeMap<ElementKind, usize> = BTreeMap::new();
        for (_, element) in grid.all_occupied() {
            *counts.entry(element.kind()).or_default() += 1;
        }

        writeln!(out, "File: {}", args.file.display())?;
        writeln!(out, "Format version: {}", header.version)?;
        writeln!(
            out,
            "Size: {}x{} ({} of {} cells occupied)",
            grid.width(),
            grid.height(),
            grid.occupied_count(),
            u64::from(grid.width()) * u64::from(grid.height())
        )?;
        let summary = ElementKind::ALL
            .iter()
            .map(|kind| format!("{kind}={}", counts.get(kind).copied().unwrap_or(0)))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(out, "Kinds: {summary}")?;

        if args.cells {
            for (coordinate, element) in grid.all_occupied() {
                let [x, y] = mapper.cell_center(coordinate);
                writeln!(
                    out,
                    "{coordinate} {} at ({x:.2}, {y:.2}) {}",
                    element.kind(),
                    describe(element)
                )?;
            }
        }
        Ok(())
    }

    fn edit(args: &EditArgs, quiet: bool, out: &mut dyn Write) -> Result<()> {
        if args.label.is_some() && args.kind != ElementKind::Marker {
            return Err(invalid_parameter(
                "label",
                &args.kind,
                &"a label requires --kind marker",
            ));
        }

        let mut generator = GridGenerator::new(GeneratorSettings {
            seed: args.seed,
            ..GeneratorSettings::default()
        });
        generator.editor_initialize();
        generator.generate_map_from_file(&args.file, FillDirection::Horizontal)?;

        let mut removed = 0;
        for &coordinate in &args.remove {
            if generator.remove_element(coordinate)?.is_some() {
                removed += 1;
            }
        }

        for &coordinate in &args.set {
            match &args.label {
                Some(label) => {
                    let marker = MarkerElement::labelled(coordinate, label.clone())?;
                    generator.set_element(coordinate, GridElement::from(marker))?;
                }
                None => {
                    generator.place_element(args.kind, coordinate)?;
                }
            }
        }

        match &args.output {
            Some(path) => generator.save_map(path)?,
            None => generator.save_map_to_last_path()?,
        }

        if !quiet {
            let target = generator
                .map_file_path()
                .map(|path| path.display().to_string())
                .unwrap_or_default();
            writeln!(
                out,
                "Placed {} and removed {removed} elements; saved to {target}",
                args.set.len()
            )?;
        }
        generator.editor_tear_down();
        Ok(())
    }
}

fn describe(element: &GridElement) -> String {
    match element {
        GridElement::Basic(basic) => format!("id={}", basic.id),
        GridElement::Terrain(terrain) => format!(
            "elevation={} passable={}",
            terrain.elevation, terrain.passable
        ),
        GridElement::Marker(marker) => format!("label={:?}", marker.label()),
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from(format!("{DEFAULT_MAP_NAME}.{MAP_FILE_EXTENSION}"))
}
