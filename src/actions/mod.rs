//! Action-cube subsystem: which action kinds may be taken this turn.

pub mod cubes;

pub use cubes::{ActionCubes, ActionKind, SLOT_ACTIONS};
