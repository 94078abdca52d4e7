//! Core types for sharecal.
//!
//! This crate holds everything that does not touch the terminal:
//! - `Event` and the lenient `EventRecord` used for external data
//! - `store` with the explicit calendar state and its persistence
//! - `grid` for the 42-cell month view
//! - `form` for turning user input into events
//! - `share`, `ics` and `invite` exporters
//!
//! Access to the outside world goes through the traits in `storage` and `ports`.

pub mod config;
pub mod constants;
pub mod datetime;
pub mod error;
pub mod event;
pub mod form;
pub mod grid;
pub mod ics;
pub mod invite;
pub mod ports;
pub mod share;
pub mod storage;
pub mod store;

pub use error::{ShareCalError, ShareCalResult};
pub use event::{Event, EventRecord};
