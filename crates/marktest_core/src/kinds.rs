//! Parameter kind vocabulary.
//!
//! Every test method declares the kinds of its parameters when it is registered. The coercer is keyed on
//! these kinds instead of inspecting live values.
//!
//! ## Notes
//! - The registry is **registry-first**: canonical spellings and aliases live in [`PARAM_KINDS`], and
//!   [`from_str`]/[`as_str`] are the only lookups.
//! - Kinds outside the registry are carried as [`ParamKind::Other`]; the coercer passes literals through for
//!   them unchanged.

use std::fmt;

/// Declared kind of a test method parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    Str,
    Int,
    Float,
    Bool,
    /// A kind the coercer does not recognize (for example a user-defined type name).
    Other(&'static str),
}

/// Metadata for a recognized parameter kind.
#[derive(Debug, Clone, Copy)]
pub struct ParamKindInfo {
    pub id: ParamKind,
    /// Canonical spelling, used in diagnostics.
    pub canonical: &'static str,
    /// Accepted alternative spellings.
    pub aliases: &'static [&'static str],
    pub description: &'static str,
}

/// Registry of recognized parameter kinds.
pub const PARAM_KINDS: &[ParamKindInfo] = &[
    ParamKindInfo {
        id: ParamKind::Str,
        canonical: "string",
        aliases: &["str", "String"],
        description: "Passed through unchanged.",
    },
    ParamKindInfo {
        id: ParamKind::Int,
        canonical: "int",
        aliases: &["integer", "i64"],
        description: "Parsed as a base-10 signed 64-bit integer.",
    },
    ParamKindInfo {
        id: ParamKind::Float,
        canonical: "float",
        aliases: &["double", "f64"],
        description: "Parsed as a decimal floating point number.",
    },
    ParamKindInfo {
        id: ParamKind::Bool,
        canonical: "bool",
        aliases: &["boolean"],
        description: "Case-insensitive `true` is true; every other literal is false.",
    },
];

/// Resolve a spelling (canonical or alias) to a recognized kind.
///
/// ## Returns
/// - `Some(kind)` for a registered spelling, `None` otherwise.
pub fn from_str(name: &str) -> Option<ParamKind> {
    if let Some(info) = PARAM_KINDS.iter().find(|k| k.canonical == name) {
        return Some(info.id);
    }
    PARAM_KINDS.iter().find(|k| k.aliases.contains(&name)).map(|k| k.id)
}

/// Return the canonical spelling for a kind.
///
/// [`ParamKind::Other`] kinds render as the name they were declared with.
pub fn as_str(kind: ParamKind) -> &'static str {
    match kind {
        ParamKind::Other(name) => name,
        known => info_for(known).map_or("unknown", |info| info.canonical),
    }
}

/// Return registry metadata for a recognized kind.
pub fn info_for(kind: ParamKind) -> Option<&'static ParamKindInfo> {
    PARAM_KINDS.iter().find(|k| k.id == kind)
}

impl ParamKind {
    /// Resolve a declared type name, falling back to [`ParamKind::Other`] for unrecognized names.
    pub fn resolve(name: &'static str) -> Self {
        from_str(name).unwrap_or(ParamKind::Other(name))
    }

    /// Whether the coercer has a dedicated conversion for this kind.
    pub fn is_recognized(self) -> bool {
        !matches!(self, ParamKind::Other(_))
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(as_str(*self))
    }
}
