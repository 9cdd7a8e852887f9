//! Selection state and variant resolution.
//!
//! - [`model`] - The selection value owned by the session controller
//! - [`resolver`] - Pure repair operations keeping color/size consistent
//! - [`lookup`] - Remote-first/local-fallback variant lookup chain

pub mod lookup;
pub mod model;
pub mod resolver;

pub use lookup::{LocalVariantSource, RemoteVariantSource, VariantLookupChain, VariantSource};
pub use model::{clamp_quantity, SelectionState};
