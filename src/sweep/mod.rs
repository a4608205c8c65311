//! Two-parameter sensitivity sweeps.
//!
//! A sweep prices every point of the Cartesian product of two linearly spaced
//! axes and keeps one selected output per point, giving a matrix ready for a
//! heatmap. Cells are independent, so the sweep can also run on the rayon pool
//! with identical results.

#[cfg(feature = "serde")]
pub mod config;
pub mod export;
pub mod grid;
pub mod types;

pub use export::*;
pub use grid::*;
pub use types::*;
