//! # GGPhysics
//!
//! **GGPhysics** - 2d impulse-based rigid body physics engine written in pure Rust.
//!
//! The engine is split into two cores: `mathcore` supplies vectors, matrices and the transform
//! capability, and `physicscore` implements convex shapes, physical bodies, separating axis
//! collision detection and sequential impulse resolution driven by a fixed-step world.
//!

#![warn(missing_docs, clippy::missing_docs_in_private_items)] // `missing_docs`
#![warn(unused_import_braces, unused_qualifications, unused_results)] // `unused_*`
#![warn(trivial_casts, trivial_numeric_casts)] // `casts`
#![warn(missing_copy_implementations, missing_debug_implementations)] // `missing_*_implementations`
#![warn(variant_size_differences, unreachable_pub)]

// crates
extern crate bitflags;

extern crate log;

extern crate serde;

// cores
pub mod mathcore;
pub mod physicscore;
