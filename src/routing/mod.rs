pub mod action_descriptor;
pub use action_descriptor::*;

pub mod route_value;
pub use route_value::*;

pub mod route_data;
pub use route_data::*;
