//! `ggphysics::mathcore` module is a core that implements all math functionality for physics
//! engine.
//!
//! # Prelude
//! `ggphysics::mathcore` prelude can be imported with `use ggphysics::mathcore::prelude::*`.
//!
//! # Model
//! Vectors represent directions, coordinates, forces and velocities.
//! Transformations of objects are implemented as matrices, and the
//! [`Transformable`](transforms::Transformable) capability exposes position, rotation and scale
//! of an object to the physics core.
//!

// submodules and public re-exports
mod ext;
pub use ext::*;

pub mod floats;
pub mod matrices;
pub mod transforms;
pub mod vectors;

// prelude
pub mod prelude;
