//! Q10 fixed-point procedural noise for FPU-less animation targets.
//!
//! The kernel ([`fx`], [`rng`], [`lattice`], [`simplex`]) uses integer math
//! only and allocates nothing. [`field`] and the optional [`graphics`]
//! adapter turn it into dithered 1-bit frames for e-ink panels.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod error;
pub mod field;
pub mod fx;
#[cfg(feature = "graphics")]
pub mod graphics;
pub mod lattice;
pub mod rng;
pub mod simplex;

pub use config::FieldConfig;
pub use error::NoiseError;
pub use field::NoiseField;
pub use fx::{checked_sqrt, sqrt_fixed, sqrt_fixed_with, to_fixed, to_float_debug, to_int, Fx};
pub use rng::GameRand;
pub use simplex::{in_domain, snoise2, snoise2_checked};
