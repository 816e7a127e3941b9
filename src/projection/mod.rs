pub mod projection_error;
pub use projection_error::*;

pub mod projection_config;
pub use projection_config::*;

pub mod container_shape;
pub use container_shape::*;

pub mod truncated_collection;
pub use truncated_collection::*;

pub mod projected_value;
pub use projected_value::*;

pub mod property_container;
pub use property_container::*;

pub mod projection_plan;
pub use projection_plan::*;

pub mod projection_compiler;
pub use projection_compiler::*;

pub mod projection_cache;
pub use projection_cache::*;

#[cfg(test)]
mod _tests;
