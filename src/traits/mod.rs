mod column;
mod driver;
mod model;

pub use column::{Column, ColumnRef};
pub use driver::DatabaseDriver;
pub use model::Model;
