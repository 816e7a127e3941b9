pub mod literal;
pub use literal::Literal;

pub mod property_path;
pub use property_path::*;

pub mod value_kind;
pub use value_kind::*;

pub mod value_expr;
pub use value_expr::*;

pub mod name_expr;
pub use name_expr::*;

pub mod named_property;
pub use named_property::*;
