//! Cell payloads: the element variants a grid can hold and how they are built
//!
//! Each concrete element type implements [`Element`], which ties it to a
//! stable on-disk [`ElementKind`] tag and supplies its constructor and payload
//! codec. [`GridElement`] is the tagged union stored in grid cells.

use std::fmt;
use std::str::FromStr;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::grid::coordinate::GridCoordinate;
use crate::io::codec::{ByteReader, ByteWriter};
use crate::io::configuration::{
    MARKER_LABEL_PREFIX, MAX_MARKER_LABEL_LEN, TERRAIN_MAX_ELEVATION, TERRAIN_SEA_LEVEL,
};
use crate::io::error::{GridError, Result, format_error, invalid_parameter};

/// Stable tag identifying a concrete element variant in map files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum ElementKind {
    /// Plain cell carrying only an identifier
    Basic = 1,
    /// Cell with a random elevation and derived passability
    Terrain = 2,
    /// Cell carrying a free-form text label
    Marker = 3,
}

impl ElementKind {
    /// All kinds known to this build, in tag order
    pub const ALL: [Self; 3] = [Self::Basic, Self::Terrain, Self::Marker];

    /// Numeric tag written to map files
    pub const fn tag(self) -> u16 {
        self as u16
    }

    /// Look up a kind by its numeric tag
    pub const fn from_tag(tag: u16) -> Option<Self> {
        match tag {
            1 => Some(Self::Basic),
            2 => Some(Self::Terrain),
            3 => Some(Self::Marker),
            _ => None,
        }
    }

    /// Lowercase name used on the command line and in messages
    pub const fn name(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Terrain => "terrain",
            Self::Marker => "marker",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementKind {
    type Err = GridError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| invalid_parameter("kind", &s, &"expected basic, terrain or marker"))
    }
}

/// Shared state threaded through element construction during one generation
///
/// Identifiers and random draws are handed out in the order cells are
/// constructed, so the fill direction is observable through them.
#[derive(Debug, Clone)]
pub struct BuildContext {
    // None once u64::MAX has been issued
    next_id: Option<u64>,
    rng: StdRng,
}

impl BuildContext {
    /// Start a context whose identifiers begin at 1
    pub fn new(seed: u64) -> Self {
        Self::resuming(seed, Some(1))
    }

    /// Start a context whose next identifier is `next_id`
    ///
    /// `None` yields a context with no identifiers left.
    pub fn resuming(seed: u64, next_id: Option<u64>) -> Self {
        Self {
            next_id: next_id.map(|id| id.max(1)),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Hand out the next identifier
    ///
    /// # Errors
    ///
    /// Returns `IdentifiersExhausted` once `u64::MAX` has been issued
    pub fn next_id(&mut self) -> Result<u64> {
        let id = self
            .next_id
            .ok_or(GridError::IdentifiersExhausted { last: u64::MAX })?;
        self.next_id = id.checked_add(1);
        Ok(id)
    }

    /// Identifier the next call to [`Self::next_id`] will return
    pub const fn peek_id(&self) -> Option<u64> {
        self.next_id
    }

    /// Random source for element construction
    pub const fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

/// Behaviour every concrete element type provides
pub trait Element: Into<GridElement> + Sized {
    /// Tag under which this type is registered and persisted
    const KIND: ElementKind;

    /// Build a fresh element for `coordinate`
    ///
    /// # Errors
    ///
    /// Returns `IdentifiersExhausted` if the element needs an identifier and
    /// none remain
    fn construct(context: &mut BuildContext, coordinate: GridCoordinate) -> Result<Self>;

    /// Append the variant-specific payload
    fn encode(&self, out: &mut ByteWriter<'_>);

    /// Rebuild an element from its payload
    ///
    /// # Errors
    ///
    /// Returns a format error if the payload is truncated or holds invalid values
    fn decode(reader: &mut ByteReader<'_>, coordinate: GridCoordinate) -> Result<Self>;
}

/// Plain element identified by an incrementing id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicElement {
    /// Cell this element occupies
    pub coordinate: GridCoordinate,
    /// Identifier assigned in construction order
    pub id: u64,
}

impl Element for BasicElement {
    const KIND: ElementKind = ElementKind::Basic;

    fn construct(context: &mut BuildContext, coordinate: GridCoordinate) -> Result<Self> {
        Ok(Self {
            coordinate,
            id: context.next_id()?,
        })
    }

    fn encode(&self, out: &mut ByteWriter<'_>) {
        out.put_u64(self.id);
    }

    fn decode(reader: &mut ByteReader<'_>, coordinate: GridCoordinate) -> Result<Self> {
        Ok(Self {
            coordinate,
            id: reader.u64("basic id")?,
        })
    }
}

/// Terrain cell with an elevation drawn at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainElement {
    /// Cell this element occupies
    pub coordinate: GridCoordinate,
    /// Height in `[0, TERRAIN_MAX_ELEVATION]`
    pub elevation: u8,
    /// Whether units may stand here
    pub passable: bool,
}

impl Element for TerrainElement {
    const KIND: ElementKind = ElementKind::Terrain;

    fn construct(context: &mut BuildContext, coordinate: GridCoordinate) -> Result<Self> {
        let elevation = context.rng().random_range(0..=TERRAIN_MAX_ELEVATION);
        Ok(Self {
            coordinate,
            elevation,
            passable: elevation >= TERRAIN_SEA_LEVEL,
        })
    }

    fn encode(&self, out: &mut ByteWriter<'_>) {
        out.put_u8(self.elevation);
        out.put_u8(u8::from(self.passable));
    }

    fn decode(reader: &mut ByteReader<'_>, coordinate: GridCoordinate) -> Result<Self> {
        let elevation = reader.u8("terrain elevation")?;
        let passable = match reader.u8("terrain passable flag")? {
            0 => false,
            1 => true,
            other => {
                return Err(format_error(&format!(
                    "terrain passable flag at {coordinate} must be 0 or 1, found {other}"
                )));
            }
        };
        Ok(Self {
            coordinate,
            elevation,
            passable,
        })
    }
}

const _: () = assert!(MAX_MARKER_LABEL_LEN <= u16::MAX as usize);

/// Labelled cell, typically a spawn point or waypoint placed in the editor
///
/// The label is kept private so its length always fits the on-disk prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerElement {
    /// Cell this element occupies
    pub coordinate: GridCoordinate,
    label: String,
}

impl MarkerElement {
    /// Create a marker with an explicit label
    ///
    /// # Errors
    ///
    /// Returns an error if the label exceeds [`MAX_MARKER_LABEL_LEN`] bytes
    pub fn labelled(coordinate: GridCoordinate, label: impl Into<String>) -> Result<Self> {
        let label = label.into();
        check_label(&label)?;
        Ok(Self { coordinate, label })
    }

    /// UTF-8 label, at most [`MAX_MARKER_LABEL_LEN`] bytes
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replace the label; on error the old label is kept
    ///
    /// # Errors
    ///
    /// Returns an error if the label exceeds [`MAX_MARKER_LABEL_LEN`] bytes
    pub fn set_label(&mut self, label: impl Into<String>) -> Result<()> {
        let label = label.into();
        check_label(&label)?;
        self.label = label;
        Ok(())
    }

    /// Counter value embedded in a generated `marker-N` label
    pub fn generated_id(&self) -> Option<u64> {
        self.label.strip_prefix(MARKER_LABEL_PREFIX)?.parse().ok()
    }
}

fn check_label(label: &str) -> Result<()> {
    if label.len() > MAX_MARKER_LABEL_LEN {
        return Err(invalid_parameter(
            "label",
            &format!("{} bytes", label.len()),
            &format!("must be at most {MAX_MARKER_LABEL_LEN} bytes"),
        ));
    }
    Ok(())
}

impl Element for MarkerElement {
    const KIND: ElementKind = ElementKind::Marker;

    fn construct(context: &mut BuildContext, coordinate: GridCoordinate) -> Result<Self> {
        Ok(Self {
            coordinate,
            label: format!("{MARKER_LABEL_PREFIX}{}", context.next_id()?),
        })
    }

    fn encode(&self, out: &mut ByteWriter<'_>) {
        // Every constructor bounds the label by MAX_MARKER_LABEL_LEN
        let bytes = self.label.as_bytes();
        out.put_u16(u16::try_from(bytes.len()).unwrap_or(u16::MAX));
        out.put_bytes(bytes);
    }

    fn decode(reader: &mut ByteReader<'_>, coordinate: GridCoordinate) -> Result<Self> {
        let len = reader.u16("marker label length")?;
        let bytes = reader.take(usize::from(len), "marker label")?;
        let label = std::str::from_utf8(bytes)
            .map_err(|e| format_error(&format!("marker label at {coordinate}: {e}")))?
            .to_string();
        Ok(Self { coordinate, label })
    }
}

/// Tagged union of every element variant a cell can hold
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridElement {
    /// See [`BasicElement`]
    Basic(BasicElement),
    /// See [`TerrainElement`]
    Terrain(TerrainElement),
    /// See [`MarkerElement`]
    Marker(MarkerElement),
}

impl GridElement {
    /// Variant tag of this element
    pub const fn kind(&self) -> ElementKind {
        match self {
            Self::Basic(_) => ElementKind::Basic,
            Self::Terrain(_) => ElementKind::Terrain,
            Self::Marker(_) => ElementKind::Marker,
        }
    }

    /// Cell this element records as its own
    pub const fn coordinate(&self) -> GridCoordinate {
        match self {
            Self::Basic(e) => e.coordinate,
            Self::Terrain(e) => e.coordinate,
            Self::Marker(e) => e.coordinate,
        }
    }

    /// Identifier, for variants that carry one
    pub const fn id(&self) -> Option<u64> {
        match self {
            Self::Basic(e) => Some(e.id),
            Self::Terrain(_) | Self::Marker(_) => None,
        }
    }

    /// Value this element took from the build counter, if recoverable
    ///
    /// Covers basic ids and markers whose label still has the generated form.
    pub fn sequence_id(&self) -> Option<u64> {
        match self {
            Self::Basic(e) => Some(e.id),
            Self::Marker(e) => e.generated_id(),
            Self::Terrain(_) => None,
        }
    }

    /// Append the variant-specific payload
    pub fn encode_payload(&self, out: &mut ByteWriter<'_>) {
        match self {
            Self::Basic(e) => e.encode(out),
            Self::Terrain(e) => e.encode(out),
            Self::Marker(e) => e.encode(out),
        }
    }

    pub(crate) const fn relocate(&mut self, coordinate: GridCoordinate) {
        match self {
            Self::Basic(e) => e.coordinate = coordinate,
            Self::Terrain(e) => e.coordinate = coordinate,
            Self::Marker(e) => e.coordinate = coordinate,
        }
    }
}

impl From<BasicElement> for GridElement {
    fn from(element: BasicElement) -> Self {
        Self::Basic(element)
    }
}

impl From<TerrainElement> for GridElement {
    fn from(element: TerrainElement) -> Self {
        Self::Terrain(element)
    }
}

impl From<MarkerElement> for GridElement {
    fn from(element: MarkerElement) -> Self {
        Self::Marker(element)
    }
}
