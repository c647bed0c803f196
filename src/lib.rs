//! # Cornice
//!
//! Procedural building geometry built from scripted polygon-mesh edit
//! operations.
//!
//! Cornice generates architectural shells — footprints, multi-story walls
//! with slab overhangs, windows, doors and their fills — by composing a
//! small kernel of mesh-edit operations over a polygon mesh. Every feature
//! is an ordinary function that mutates a [`mesh::PolyMesh`] in place, so
//! builds are scriptable and reproducible.
//!
//! ## Features
//!
//! - **Polygon mesh**: arbitrary n-gon faces with type-safe indices and
//!   stable ids across edits
//! - **Mesh-edit kernel**: subdivision, inset, extrusion, duplication and
//!   cleanup passes with strongly-typed results
//! - **Floorplans**: rectangular, circular, composite, H-shaped and
//!   seeded-random outlines
//! - **Floors**: alternating slab/story extrusion with outset slab plates
//! - **Openings**: window and door assemblies with panel, glass, bar and
//!   louver fills
//!
//! ## Quick Start
//!
//! ```
//! use cornice::prelude::*;
//! use cornice::algo;
//!
//! // A rectangular footprint swept into a two-story shell.
//! let mut mesh = PolyMesh::new();
//! algo::floorplan::build(
//!     &mut mesh,
//!     &FloorplanStyle::Rectangular { width: 2.0, length: 2.0 },
//! )
//! .unwrap();
//!
//! let floors = FloorParams { floor_count: 2, ..Default::default() };
//! let mut ctx = BuildContext::new(&mut mesh);
//! algo::floor::build(&mut ctx, &floors).unwrap();
//!
//! // Carve a window into the first story band of the south wall.
//! let wall = mesh
//!     .face_ids()
//!     .find(|&f| {
//!         let c = mesh.face_center(f);
//!         mesh.face_normal(f).y < -0.9 && c.z > 0.3 && c.z < 2.0
//!     })
//!     .unwrap();
//! mesh.select_faces(&[wall], true);
//! let mut ctx = BuildContext::new(&mut mesh);
//! algo::window::build(&mut ctx, &WindowParams::default()).unwrap();
//!
//! assert!(mesh.num_faces() > 10);
//! ```
//!
//! ## Editing Meshes Directly
//!
//! The kernel operations compose on their own:
//!
//! ```
//! use cornice::kernel::{create_plane, extrude_edges, translate};
//! use cornice::mesh::PolyMesh;
//! use nalgebra::Vector3;
//!
//! let mut mesh = PolyMesh::new();
//! let plane = create_plane(&mut mesh, 1.0, 1.0).unwrap();
//! let boundary = mesh.face_edges(plane.faces[0]);
//! let ext = extrude_edges(&mut mesh, &boundary).unwrap();
//! translate(&mut mesh, &ext.verts, Vector3::new(0.0, 0.0, 2.0)).unwrap();
//!
//! assert_eq!(mesh.num_faces(), 5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod kernel;
pub mod mesh;
pub mod param;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use cornice::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{BuildError, Result};
    pub use crate::mesh::{Edge, EdgeId, Face, FaceId, PolyMesh, Vertex, VertexId};
    pub use crate::param::{
        BuildContext, DoorParams, FillStyle, FloorParams, FloorplanStyle, WindowParams,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::algo;
    use super::prelude::*;
    use crate::param::{LouverParams, PaneParams};
    use nalgebra::{Vector2, Vector3};

    fn shell(style: &FloorplanStyle, floors: &FloorParams) -> PolyMesh {
        let mut mesh = PolyMesh::new();
        algo::floorplan::build(&mut mesh, style).unwrap();
        let mut ctx = BuildContext::new(&mut mesh);
        algo::floor::build(&mut ctx, floors).unwrap();
        mesh
    }

    #[test]
    fn test_full_building_pipeline() {
        let mut mesh = shell(
            &FloorplanStyle::Rectangular {
                width: 3.0,
                length: 2.0,
            },
            &FloorParams {
                floor_count: 2,
                floor_height: 2.8,
                slab_thickness: 0.2,
                slab_outset: 0.1,
            },
        );

        // Two windows on the south wall faces, a door on the north wall.
        // Story bands are the tall south-facing faces; slab bands are short.
        let south: Vec<FaceId> = mesh
            .face_ids()
            .filter(|&f| mesh.face_normal(f).y < -0.9 && {
                let zs: Vec<f64> = mesh
                    .face(f)
                    .verts
                    .iter()
                    .map(|&v| mesh.position(v).z)
                    .collect();
                let lo = zs.iter().cloned().fold(f64::INFINITY, f64::min);
                let hi = zs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                hi - lo > 1.0
            })
            .collect();
        assert_eq!(south.len(), 2, "story bands on the south wall");
        mesh.select_faces(&south, true);
        let mut ctx = BuildContext::new(&mut mesh);
        algo::window::build(
            &mut ctx,
            &WindowParams {
                size: Vector2::new(0.4, 0.4),
                fill: FillStyle::GlassPanes(PaneParams::default()),
                ..Default::default()
            },
        )
        .unwrap();

        let north = mesh
            .face_ids()
            .find(|&f| mesh.face_normal(f).y > 0.9 && mesh.face_center(f).z < 3.0
                && mesh.face_center(f).z > 0.2)
            .unwrap();
        mesh.select_faces(&[north], true);
        let mut ctx = BuildContext::new(&mut mesh);
        algo::door::build(
            &mut ctx,
            &DoorParams {
                size: Vector2::new(0.3, 0.8),
                ..Default::default()
            },
        )
        .unwrap();

        let (min, max) = mesh.bounding_box().unwrap();
        assert!((max.z - 6.0).abs() < 1e-9);
        assert!(min.z.abs() < 1e-9);
        assert!(mesh.selected_faces().is_empty());
    }

    #[test]
    fn test_louvered_circular_tower() {
        let mut mesh = shell(
            &FloorplanStyle::Circular {
                radius: 2.0,
                segments: 4,
                cap_tris: false,
            },
            &FloorParams {
                floor_count: 1,
                floor_height: 3.0,
                slab_thickness: 0.0,
                slab_outset: 0.0,
            },
        );

        let wall = mesh
            .face_ids()
            .find(|&f| mesh.face_normal(f).z.abs() < 1e-6)
            .unwrap();
        mesh.select_faces(&[wall], true);
        let mut ctx = BuildContext::new(&mut mesh);
        algo::window::build(
            &mut ctx,
            &WindowParams {
                size: Vector2::new(0.5, 0.5),
                off: Vector3::zeros(),
                frame_thickness: 0.05,
                frame_depth: 0.05,
                fill: FillStyle::Louver(LouverParams::default()),
            },
        )
        .unwrap();
        assert!(mesh.num_faces() > 10);
    }

    #[test]
    fn test_same_seed_same_building() {
        let style = FloorplanStyle::Random {
            seed: 11,
            width: 4.0,
            length: 4.0,
        };
        let floors = FloorParams::default();
        let a = shell(&style, &floors);
        let b = shell(&style, &floors);

        assert_eq!(a.num_vertices(), b.num_vertices());
        assert_eq!(a.num_faces(), b.num_faces());
        let pa: Vec<_> = a.vertex_ids().map(|v| *a.position(v)).collect();
        let pb: Vec<_> = b.vertex_ids().map(|v| *b.position(v)).collect();
        assert_eq!(pa, pb);
    }
}
