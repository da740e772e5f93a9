//! Client-side local state for a launch browsing and booking app.
//!
//! - [`store`]: the local store and the credential check that seeds it.
//! - [`resolvers`]: virtual fields and client mutations over the store.
//! - [`pagination`]: cursor-based merging of fetched pages.

pub mod config;
pub mod models;
pub mod pagination;
pub mod render;
pub mod resolvers;
pub mod store;
