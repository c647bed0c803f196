//! The procedural build pipeline.
//!
//! Features layer on top of each other through the mesh alone: a floorplan
//! leaves a footprint, floors sweep it into walls, windows and doors carve
//! selected wall faces, fills populate the openings.

pub mod door;
pub mod fill;
pub mod floor;
pub mod floorplan;
pub mod split;
pub mod window;

pub use fill::apply as apply_fill;
pub use floor::FloorResult;
pub use split::split;
