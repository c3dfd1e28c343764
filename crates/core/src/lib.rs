//! Domain types and pure logic shared by the db and api crates.
//!
//! Nothing here touches the database or HTTP; the ordering rules in
//! [`ordering`] are plain functions over in-memory slices.

pub mod error;
pub mod ordering;
pub mod pagination;
pub mod roles;
pub mod status;
pub mod types;
