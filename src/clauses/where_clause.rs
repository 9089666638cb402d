use crate::traits::{Column, ColumnRef};
use crate::types::SqlValue;

/// Represents a WHERE clause condition.
/// Supports equality and logical combinations; values are always bound.
#[derive(Debug, Clone)]
pub enum WhereClause {
    /// column = value, or column IS NULL for a NULL value
    Eq(ColumnRef, SqlValue),
    /// clause AND clause
    And(Box<WhereClause>, Box<WhereClause>),
    /// clause OR clause
    Or(Box<WhereClause>, Box<WhereClause>),
}

impl WhereClause {
    /// Creates an equality condition: column = value
    pub fn eq<C: Column + ?Sized, V: Into<SqlValue>>(column: &C, value: V) -> Self {
        WhereClause::Eq(ColumnRef::from_column(column), value.into())
    }

    /// Combines this clause with another using AND
    pub fn and(self, other: WhereClause) -> Self {
        WhereClause::And(Box::new(self), Box::new(other))
    }

    /// Combines this clause with another using OR
    pub fn or(self, other: WhereClause) -> Self {
        WhereClause::Or(Box::new(self), Box::new(other))
    }

    /// Builds the SQL string and collects parameters.
    /// Returns the SQL fragment and updates the params vector.
    /// `param_offset` is the number of placeholders already used by the statement.
    pub fn build_sql(&self, param_offset: usize, params: &mut Vec<SqlValue>) -> String {
        match self {
            // `= NULL` never matches
            WhereClause::Eq(col, SqlValue::Null) => format!("{} IS NULL", col.quoted_name()),
            WhereClause::Eq(col, value) => {
                params.push(value.clone());
                format!("{} = ${}", col.quoted_name(), param_offset + params.len())
            }
            WhereClause::And(left, right) => {
                let left_sql = left.build_sql(param_offset, params);
                let right_sql = right.build_sql(param_offset, params);
                format!("({}) AND ({})", left_sql, right_sql)
            }
            WhereClause::Or(left, right) => {
                let left_sql = left.build_sql(param_offset, params);
                let right_sql = right.build_sql(param_offset, params);
                format!("({}) OR ({})", left_sql, right_sql)
            }
        }
    }
}
