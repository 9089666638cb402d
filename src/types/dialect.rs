/// SQL flavor spoken by a driver.
///
/// Both flavors accept `$N` positional placeholders and double-quoted
/// identifiers, so statement builders are shared. The dialect only supplies
/// the engine-specific metadata queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sqlite,
    Postgres,
}

impl Dialect {
    /// Query returning one row per column of the table bound to `$1`, in
    /// ordinal order, with the columns `cid, name, type, notnull, dflt_value, pk`.
    pub fn table_info_query(&self) -> &'static str {
        match self {
            Dialect::Sqlite => {
                "SELECT cid, name, type, \"notnull\", dflt_value, pk \
                 FROM pragma_table_info($1) ORDER BY cid"
            }
            Dialect::Postgres => {
                "SELECT (c.ordinal_position - 1)::text AS cid, \
                 c.column_name::text AS name, \
                 c.data_type::text AS type, \
                 CASE WHEN c.is_nullable = 'NO' THEN '1' ELSE '0' END AS \"notnull\", \
                 c.column_default::text AS dflt_value, \
                 CASE WHEN EXISTS ( \
                   SELECT 1 FROM information_schema.table_constraints tc \
                   JOIN information_schema.key_column_usage kcu \
                     ON tc.constraint_name = kcu.constraint_name \
                    AND tc.table_schema = kcu.table_schema \
                   WHERE tc.constraint_type = 'PRIMARY KEY' \
                     AND kcu.table_schema = c.table_schema \
                     AND kcu.table_name = c.table_name \
                     AND kcu.column_name = c.column_name \
                 ) THEN '1' ELSE '0' END AS pk \
                 FROM information_schema.columns c \
                 WHERE c.table_name::text = $1 AND c.table_schema = current_schema() \
                 ORDER BY c.ordinal_position"
            }
        }
    }

    /// Query returning the identity generated by the last insert on this connection.
    pub fn last_insert_id_query(&self) -> &'static str {
        match self {
            Dialect::Sqlite => "SELECT last_insert_rowid()",
            Dialect::Postgres => "SELECT lastval()",
        }
    }
}

/// Quotes a schema-derived identifier for interpolation into SQL text.
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_ident() {
        assert_eq!(quote_ident("songs"), "\"songs\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_table_info_query_binds_table_name() {
        assert!(Dialect::Sqlite.table_info_query().contains("pragma_table_info($1)"));
        assert!(Dialect::Postgres.table_info_query().contains("c.table_name::text = $1"));
    }
}
