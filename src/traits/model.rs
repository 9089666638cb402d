use crate::naming::table_name_for;

/// Trait for marker types standing in for a mapped model.
///
/// Only the identifier is declared; the table name follows the naming
/// convention and the columns come from the live schema.
pub trait Model {
    /// The model identifier, e.g. `"Song"`.
    fn model_name() -> &'static str;

    /// Returns the table name derived from the model identifier.
    fn table_name() -> String {
        table_name_for(Self::model_name())
    }
}
