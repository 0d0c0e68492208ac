//! Storage-neutral query model
//!
//! Services describe what they want (filter, sort, page) in terms of API
//! field names. Each storage adapter translates a [`ListQuery`] for its
//! backend: SQL for PostgreSQL, direct evaluation for the in-memory store.

mod filter;
mod page;

pub use filter::{Filter, FilterOp, FilterValue, Record};
pub use page::{ListQuery, Page, PageRequest, Sort, SortDirection};
