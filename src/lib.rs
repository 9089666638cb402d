//! dynorm - a schema-driven dynamic mapping layer
//!
//! Models are not declared field by field. The table name is derived from the
//! model identifier, the columns are read from the live schema, and records,
//! inserts and lookups are generated from that.
//!
//! # Example
//! ```ignore
//! use dynorm::DynOrmClient;
//!
//! let client = DynOrmClient::connect("sqlite::memory:").await?;
//! client
//!     .execute("CREATE TABLE songs (id INTEGER PRIMARY KEY, name TEXT, album TEXT)")
//!     .await?;
//!
//! let songs = client.repository("Song").await?;
//! let mut song = songs.construct([("name", "Hello"), ("album", "25")])?;
//! songs.save(&mut song).await?;
//!
//! let found = songs.find_by("name", "Hello").await?;
//! let album = found[0].get("album")?;
//! ```

pub mod builders;
pub mod clauses;
pub mod config;
pub mod drivers;
pub mod error;
pub mod mapper;
pub mod naming;
pub mod querier;
pub mod repository;
pub mod schema;
pub mod traits;
pub mod types;

mod client;

// Re-export main types for convenient access
pub use clauses::WhereClause;
pub use client::DynOrmClient;
pub use config::ClientConfig;
pub use error::{DynOrmError, Result};
pub use mapper::{construct, ModelDescriptor, Record, RecordState};
pub use naming::table_name_for;
pub use querier::Querier;
pub use repository::Repository;
pub use schema::{column_names_for, ColumnInfo};
pub use traits::{Column, ColumnRef, DatabaseDriver, Model};
pub use types::{QueryResult, RawQueryResult, Row, SqlValue};
