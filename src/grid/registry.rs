//! Constructor and decoder table keyed by element kind

use std::collections::BTreeMap;

use crate::grid::coordinate::GridCoordinate;
use crate::grid::element::{
    BasicElement, BuildContext, Element, ElementKind, GridElement, MarkerElement, TerrainElement,
};
use crate::io::codec::ByteReader;
use crate::io::error::{Result, format_error, invalid_parameter};

/// Builds a fresh element of one kind
pub type ElementConstructor = fn(&mut BuildContext, GridCoordinate) -> Result<GridElement>;

/// Rebuilds an element of one kind from its payload
pub type PayloadDecoder = fn(&mut ByteReader<'_>, GridCoordinate) -> Result<GridElement>;

/// Entry for one registered element kind
#[derive(Debug, Clone, Copy)]
pub struct ElementDescriptor {
    /// Kind this entry serves
    pub kind: ElementKind,
    /// Constructor used by procedural generation
    pub construct: ElementConstructor,
    /// Decoder used by deserialization
    pub decode: PayloadDecoder,
}

/// Set of element kinds a generator may build and a serializer may read
///
/// Deserialization reconstructs variants through this table, so a map that
/// holds a kind missing from the registry is rejected instead of guessed at.
#[derive(Debug, Clone)]
pub struct ElementRegistry {
    descriptors: BTreeMap<ElementKind, ElementDescriptor>,
}

impl Default for ElementRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl ElementRegistry {
    /// Registry with no kinds
    pub const fn empty() -> Self {
        Self {
            descriptors: BTreeMap::new(),
        }
    }

    /// Registry holding every built-in element kind
    pub fn with_builtin() -> Self {
        let mut registry = Self::empty();
        registry.register::<BasicElement>();
        registry.register::<TerrainElement>();
        registry.register::<MarkerElement>();
        registry
    }

    /// Register `E`, replacing any previous entry for its kind
    pub fn register<E: Element>(&mut self) -> &mut Self {
        let construct: ElementConstructor =
            |context, coordinate| E::construct(context, coordinate).map(Into::into);
        let decode: PayloadDecoder =
            |reader, coordinate| E::decode(reader, coordinate).map(Into::into);
        self.descriptors.insert(
            E::KIND,
            ElementDescriptor {
                kind: E::KIND,
                construct,
                decode,
            },
        );
        self
    }

    /// Whether `kind` is registered
    pub fn contains(&self, kind: ElementKind) -> bool {
        self.descriptors.contains_key(&kind)
    }

    /// Registered kinds in tag order
    pub fn kinds(&self) -> impl Iterator<Item = ElementKind> + '_ {
        self.descriptors.keys().copied()
    }

    /// Entry for `kind`, if registered
    pub fn descriptor(&self, kind: ElementKind) -> Option<&ElementDescriptor> {
        self.descriptors.get(&kind)
    }

    /// Constructor for `kind`
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error if `kind` is not registered
    pub fn constructor(&self, kind: ElementKind) -> Result<ElementConstructor> {
        self.descriptor(kind)
            .map(|descriptor| descriptor.construct)
            .ok_or_else(|| invalid_parameter("kind", &kind, &"element kind is not registered"))
    }

    /// Decode one payload tagged with the raw on-disk `tag`
    ///
    /// # Errors
    ///
    /// Returns a format error if the tag is unknown, its kind is not
    /// registered, or the payload itself is malformed
    pub fn decode(
        &self,
        tag: u16,
        reader: &mut ByteReader<'_>,
        coordinate: GridCoordinate,
    ) -> Result<GridElement> {
        let kind = ElementKind::from_tag(tag).ok_or_else(|| {
            format_error(&format!("unknown element kind tag {tag} at {coordinate}"))
        })?;
        let descriptor = self.descriptor(kind).ok_or_else(|| {
            format_error(&format!(
                "element kind '{kind}' at {coordinate} is not registered"
            ))
        })?;
        (descriptor.decode)(reader, coordinate)
    }
}
