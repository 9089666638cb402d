//! Accessor registry, model descriptors and record construction.

mod accessor;
mod descriptor;
mod record;

pub use accessor::{install_accessors, Accessor, AccessorRegistry};
pub use descriptor::{ModelDescriptor, DEFAULT_IDENTITY_COLUMN};
pub use record::{construct, Record, RecordState};
