//! Core mesh data structures and queries.
//!
//! # Overview
//!
//! The primary type is [`PolyMesh`], a face-vertex polygon mesh with explicit
//! edges, stable typed ids and host-style selection flags. The building
//! pipeline never touches element stores directly; it mutates the mesh
//! through the operations in [`crate::kernel`] and reads it through the
//! classification queries in this module.
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe index wrappers:
//! - [`VertexId`] - Identifies a vertex
//! - [`EdgeId`] - Identifies an edge
//! - [`FaceId`] - Identifies a face
//!
//! Ids stay stable across topology edits; deleted elements are tombstoned and
//! skipped by iteration.

mod index;
mod polymesh;
mod query;

pub use index::{EdgeId, FaceId, VertexId};
pub use polymesh::{Edge, Face, PolyMesh, Vertex};
pub use query::{
    face_dimensions, face_with_verts, filter_horizontal_edges, filter_vertical_edges,
};
