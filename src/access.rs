//! Access layer: where feature rows come from.
//!
//! This module provides abstractions over feature storage:
//!
//! - **FeatureSource**: the narrow interface the engine consumes (schema,
//!   dataset bounds and a lazy stream of raw rows)
//! - **MemorySource**: rows held in memory, validated on insert
//! - **DumpSource / DumpWriter**: a streaming on-disk feature dump
//! - **BoundsPruner**: the envelope pre-filter applied to raw rows
//!
//! Raw rows carry positional values only; turning them into `Feature`s is left
//! to the scan executor so that rows rejected by the pruner are never
//! materialised.

pub mod bounds;
pub mod dump;
pub mod error;
pub mod memory;
pub mod source;

pub use bounds::{geometry_overlaps, overlaps, BoundsPruner};
pub use dump::{write_dump, DumpSource, DumpWriter};
pub use error::{SourceError, SourceResult};
pub use memory::MemorySource;
pub use source::{FeatureSource, RawRow, RowStream};
