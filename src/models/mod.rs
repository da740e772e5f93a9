//! Domain models for Launchpad.
//!
//! # Core Concepts
//!
//! ## Server Entities
//!
//! - [`Launch`]: A rocket launch as returned by the query protocol. Carries
//!   server fields only; virtual fields such as `isInCart` are resolved
//!   locally by [`crate::resolvers`].
//! - [`Page`]: One page of a cursor-paginated query, exactly as it arrived.
//!
//! ## Client State
//!
//! - [`Accumulated`]: Every page fetched so far for one logical query,
//!   produced by [`crate::pagination::merge_page`].
//! - [`PageRequest`]: What the client asks the server for next.

mod launch;
mod page;

pub use launch::*;
pub use page::*;
