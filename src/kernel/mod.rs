//! Mesh-edit operations.
//!
//! This module is the crate's stand-in for the host application's mesh
//! kernel: primitive creation, edge subdivision, inset, extrusion,
//! duplication, pivot transforms and cleanup passes. The building pipeline in
//! [`crate::algo`] mutates the mesh exclusively through these operations.
//!
//! Every operation returns a strongly-typed result describing the geometry it
//! created, consumed immediately by the caller to drive the next operation
//! and never retained. Operations fail fast with a typed error when handed an
//! empty input set instead of propagating a cryptic downstream fault.

mod cleanup;
mod extrude;
mod inset;
mod primitives;
mod subdivide;
mod transform;

pub use cleanup::{contextual_create, delete_faces, recalc_face_normals, remove_doubles};
pub use extrude::{
    duplicate_faces, extrude_discrete_faces, extrude_edges, DuplicateResult, ExtrudeResult,
};
pub use inset::{inset_individual, inset_region, InsetResult};
pub use primitives::{
    create_circle, create_cone, create_cube, create_cylinder, create_plane, PrimitiveResult,
};
pub use subdivide::{connect_verts, edge_split, subdivide_edges, SubdivideResult};
pub use transform::{scale, translate};
