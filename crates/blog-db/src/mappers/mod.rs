//! Entity to model mappers
//!
//! - `From<Model> for Entity`: convert database rows to domain objects
//! - reaction rows are folded into a `ReactionSet` by entity id

mod content;
mod reaction;
mod session;
mod user;

pub use reaction::group_reactions;
