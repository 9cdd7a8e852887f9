//! Selection session orchestration.
//!
//! The controller owns the one live [`SelectionState`] per loaded product
//! and drives the asynchronous resolution chain (variant lookup ->
//! pricing) in response to user actions.

pub mod controller;


pub use controller::SessionController;
