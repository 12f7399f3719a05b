use serde::{Deserialize, Serialize};

/// Physical element type of a column.
///
/// Variants are declared in promotion order: a mixed binary operation
/// resolves to the greater of the two kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Kind {
    Bool,
    Int32,
    Int64,
    Float32,
    Float64,
    Text,
}

impl Kind {
    pub const ALL: [Kind; 6] = [
        Kind::Bool,
        Kind::Int32,
        Kind::Int64,
        Kind::Float32,
        Kind::Float64,
        Kind::Text,
    ];

    /// Common kind of two operands.
    pub fn promote(self, other: Kind) -> Kind {
        self.max(other)
    }

    /// Common kind of any number of operands, `None` for an empty input.
    pub fn promote_all<I: IntoIterator<Item = Kind>>(kinds: I) -> Option<Kind> {
        kinds.into_iter().reduce(Kind::promote)
    }

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Kind::Int32 | Kind::Int64 | Kind::Float32 | Kind::Float64
        )
    }

    pub fn is_integer(self) -> bool {
        matches!(self, Kind::Int32 | Kind::Int64)
    }

    pub fn is_float(self) -> bool {
        matches!(self, Kind::Float32 | Kind::Float64)
    }
}
