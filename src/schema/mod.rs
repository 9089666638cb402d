//! Runtime schema introspection.

mod column_info;
mod introspector;

pub use column_info::ColumnInfo;
pub use introspector::{column_names_for, columns_for};
