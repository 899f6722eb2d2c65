//! Core types for marga-core.
//!
//! This module provides the fundamental grid types:
//! - [`GridCoord`]: signed cell coordinate
//! - [`CellId`]: dense row-major cell index
//! - [`Direction`]: the fixed 8-direction move table
//!
//! The grid uses a row-major coordinate system where (0, 0) is the bottom-left
//! cell, positive X is to the right and positive Y is up.

pub mod cell;
pub mod direction;

pub use cell::{CellId, GridCoord};
pub use direction::Direction;
