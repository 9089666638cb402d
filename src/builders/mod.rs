mod insert;
mod select;
mod update;

pub use insert::Insert as InsertBuilder;
pub use select::Select as SelectBuilder;
pub use select::{SelectWithColumns, SelectWithTable};
pub use update::Update as UpdateBuilder;
