mod dialect;
mod row;
mod sql_value;

pub use dialect::{quote_ident, Dialect};
pub use row::{QueryResult, RawQueryResult, Row};
pub use sql_value::SqlValue;
