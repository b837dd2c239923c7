//! `ggphysics::physicscore` module is a core that implements rigid body simulation:
//! convex shapes, physical bodies, collision detection and impulse resolution.
//!
//! # Prelude
//! `ggphysics::physicscore` prelude can be imported with `use ggphysics::physicscore::prelude::*`.
//!
//! # Model
//! [`ConvexPolygon`](shapes::ConvexPolygon) carries local-frame geometry with derived
//! separating axes. [`Body`](bodies::Body) owns shapes and physical state and binds to a
//! transform supplied by the surrounding composition layer.
//! [`World`](world::World) registers bodies and drains accumulated frame time in fixed steps;
//! each step's contacts are held by value in a [`CollisionArena`](collisions::CollisionArena)
//! that bodies reference and gameplay code queries.
//!

// submodules
pub mod bodies;
pub mod collisions;
pub mod shapes;
pub mod world;

// prelude
pub mod prelude;
