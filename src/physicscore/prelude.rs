//! Prelude module: `physicscore::prelude` re-exports all `ggphysics::physicscore` items.
//!
//! # Examples
//! Import all the exports.
//!
//! ```rust
//! use ggphysics::physicscore::prelude::*;
//! ```
//!

// re-exports
pub use crate::physicscore::bodies::*;
pub use crate::physicscore::collisions::*;
pub use crate::physicscore::shapes::*;
pub use crate::physicscore::world::*;
