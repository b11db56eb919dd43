//! Core types and pure logic for the gradebook.
//!
//! No HTTP or database dependencies live here: only the per-user domain
//! model, the weighted-average aggregation, and the validated mutations over a
//! user's weights, subjects and grades. Storage backends implement
//! [`store::UserStore`].

// Store backends implement the trait with plain `async fn`.
#![allow(async_fn_in_trait)]

#[macro_use]
mod id;

pub mod account;
pub mod aggregate;
pub mod error;
pub mod grade;
pub mod mutation;
pub mod session;
pub mod store;
pub mod subject;
pub mod user;
pub mod weight;

pub use error::{Error, Result};
