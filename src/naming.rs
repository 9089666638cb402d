//! Table naming convention: a model identifier maps to its lower-cased plural.

/// Derives the table name for a model identifier.
///
/// Never fails; an identifier with no backing table is reported later, when
/// the schema is introspected.
pub fn table_name_for(class_identifier: &str) -> String {
    let lowered = class_identifier.trim().to_lowercase();
    if lowered.is_empty() {
        return lowered;
    }
    pluralizer::pluralize(&lowered, 2, false)
}
