pub mod access;
pub mod cursor;
pub mod dataset;
pub mod executor;
pub mod expression;
pub mod feature;
pub mod filter;
pub mod planner;
pub mod query;

pub use cursor::Cursor;
pub use dataset::VectorDataset;
pub use query::{Query, QueryError, QueryResult};
