pub mod expression;
pub use expression::{Literal, NameExpr, NamedProperty, PropertyPath, ValueExpr, ValueKind};

pub mod executor;
pub use executor::Row;

pub mod projection;
pub use projection::{
    ContainerShape, ProjectedValue, ProjectionCache, ProjectionCompiler, ProjectionConfig,
    ProjectionError, ProjectionPlan, PropertyContainer, TruncatedCollection,
};

pub mod routing;
