//! Editor lifecycle states

use std::fmt;

/// Whether the generator currently owns the editing workflow
///
/// Only [`GridGenerator::editor_initialize`] and
/// [`GridGenerator::editor_tear_down`] move between states.
///
/// [`GridGenerator::editor_initialize`]: crate::generator::GridGenerator::editor_initialize
/// [`GridGenerator::editor_tear_down`]: crate::generator::GridGenerator::editor_tear_down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditorMode {
    /// No grid may be generated, edited or cleared
    #[default]
    Disabled,
    /// Generation, editing and persistence are available
    Enabled,
}

impl EditorMode {
    /// Whether the generator accepts mutating operations
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("DISABLED"),
            Self::Enabled => f.write_str("ENABLED"),
        }
    }
}
