use std::fmt::{self, Display};

use crate::{expression::ValueKind, projection::ContainerShape};

#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionError {
    /// A paged property's value is not a sequence.
    InvalidShape { property: String, found: ValueKind },
    /// A range value without a page size.
    UnboundedRange { property: String },
    /// A null check produced something other than a boolean or null.
    InvalidNullCheck { property: String, found: ValueKind },
    /// Slot count does not match the shape capacity. Compiler bug.
    ShapeOverflowInconsistency { shape: ContainerShape, expected: usize, actual: usize },
    Other(String),
}

impl Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionError::InvalidShape { property, found } => {
                write!(f, "InvalidShape: property '{}' has a page size but its value is {}, not a sequence", property, found)
            }
            ProjectionError::UnboundedRange { property } => {
                write!(f, "UnboundedRange: property '{}' projects a range without a page size", property)
            }
            ProjectionError::InvalidNullCheck { property, found } => {
                write!(f, "InvalidNullCheck: null check of property '{}' produced {}, expected bool", property, found)
            }
            ProjectionError::ShapeOverflowInconsistency { shape, expected, actual } => {
                write!(f, "ShapeOverflowInconsistency: shape {} expects {} slots, got {}", shape, expected, actual)
            }
            ProjectionError::Other(message) => write!(f, "ProjectionError: {}", message),
        }
    }
}

impl std::error::Error for ProjectionError {}
