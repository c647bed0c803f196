//! Multi-story floor extrusion.
//!
//! Sweeps a footprint boundary upward in alternating slab and story steps,
//! outsets the slab rings into overhanging plates, and caps the roof loop.

use std::collections::HashMap;

use log::debug;
use nalgebra::Vector3;

use crate::error::{BuildError, Result};
use crate::kernel::{
    contextual_create, delete_faces, extrude_edges, inset_region, recalc_face_normals, translate,
};
use crate::mesh::{EdgeId, FaceId, PolyMesh};
use crate::param::{BuildContext, FloorParams};

/// Geometry summary of a floor build.
#[derive(Debug, Clone)]
pub struct FloorResult {
    /// Slab rings created, one per story with a nonzero slab thickness.
    pub slab_rings: usize,
    /// The roof cap face.
    pub cap: FaceId,
}

/// Extrude stories from the current footprint or face selection.
///
/// With faces selected, their region boundary seeds the walls and the seed
/// faces are deleted afterwards; otherwise the mesh must be a flat footprint
/// and its open boundary is used.
pub fn build(ctx: &mut BuildContext, params: &FloorParams) -> Result<FloorResult> {
    params.validate()?;
    let selected = ctx.selected_faces();
    if !selected.is_empty() {
        let edges = region_boundary(ctx.mesh, &selected);
        let result = extrude_stories(ctx.mesh, edges, params)?;
        delete_faces(ctx.mesh, &selected)?;
        ctx.deselect_all();
        return Ok(result);
    }

    if !is_flat(ctx.mesh) {
        return Err(BuildError::InvalidSelection {
            reason: "floors need a flat footprint or a face selection",
        });
    }
    let boundary = ctx.boundary_edges();
    if boundary.is_empty() {
        return Err(BuildError::EmptyInput { operation: "floor" });
    }
    extrude_stories(ctx.mesh, boundary, params)
}

/// All live vertices share one z level (to the kernel's rounding).
fn is_flat(mesh: &PolyMesh) -> bool {
    let mut level = None;
    for v in mesh.vertex_ids() {
        let z = (mesh.position(v).z * 1000.0).round();
        match level {
            None => level = Some(z),
            Some(l) if l != z => return false,
            Some(_) => {}
        }
    }
    level.is_some()
}

/// Edges used by exactly one face of the region.
fn region_boundary(mesh: &PolyMesh, faces: &[FaceId]) -> Vec<EdgeId> {
    let mut uses: HashMap<EdgeId, usize> = HashMap::new();
    for &f in faces {
        for e in mesh.face_edges(f) {
            *uses.entry(e).or_insert(0) += 1;
        }
    }
    let mut boundary: Vec<EdgeId> = uses
        .into_iter()
        .filter_map(|(e, n)| (n == 1).then_some(e))
        .collect();
    boundary.sort();
    boundary
}

fn extrude_stories(
    mesh: &mut PolyMesh,
    mut edges: Vec<EdgeId>,
    params: &FloorParams,
) -> Result<FloorResult> {
    debug!(
        "extruding {} stories from {} boundary edges",
        params.floor_count,
        edges.len()
    );

    let mut slab_faces: Vec<FaceId> = Vec::new();
    let mut slab_rings = 0;
    for step in 0..params.floor_count * 2 {
        let is_slab = step % 2 == 0;
        let offset = if is_slab {
            params.slab_thickness
        } else {
            params.floor_height
        };
        if offset == 0.0 {
            continue;
        }
        let ext = extrude_edges(mesh, &edges)?;
        translate(mesh, &ext.verts, Vector3::new(0.0, 0.0, offset))?;
        edges = ext.edges;
        if is_slab {
            slab_faces.extend(ext.faces);
            slab_rings += 1;
        }
    }

    // Slab rings face outward, so a positive depth pushes them out into an
    // overhanging plate.
    if !slab_faces.is_empty() && params.slab_outset != 0.0 {
        inset_region(mesh, &slab_faces, params.slab_outset)?;
    }
    let cap = contextual_create(mesh, &edges)?;
    recalc_face_normals(mesh)?;
    Ok(FloorResult { slab_rings, cap })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::floorplan;
    use crate::param::FloorplanStyle;

    fn footprint(mesh: &mut PolyMesh) {
        floorplan::build(
            mesh,
            &FloorplanStyle::Rectangular {
                width: 1.0,
                length: 1.0,
            },
        )
        .unwrap();
    }

    #[test]
    fn test_three_stories_height_and_slabs() {
        let mut mesh = PolyMesh::new();
        footprint(&mut mesh);
        let params = FloorParams {
            floor_count: 3,
            floor_height: 2.8,
            slab_thickness: 0.2,
            slab_outset: 0.1,
        };
        let mut ctx = BuildContext::new(&mut mesh);
        let res = build(&mut ctx, &params).unwrap();

        assert_eq!(res.slab_rings, 3);
        let (min, max) = mesh.bounding_box().unwrap();
        assert!((max.z - 3.0 * (2.8 + 0.2)).abs() < 1e-9, "max.z {}", max.z);
        assert!(min.z.abs() < 1e-9);
        // Slabs overhang the footprint.
        assert!((max.x - 1.1).abs() < 1e-9, "max.x {}", max.x);
    }

    #[test]
    fn test_zero_slab_thickness_skips_slab_steps() {
        let mut mesh = PolyMesh::new();
        footprint(&mut mesh);
        let params = FloorParams {
            floor_count: 2,
            floor_height: 3.0,
            slab_thickness: 0.0,
            slab_outset: 0.1,
        };
        let mut ctx = BuildContext::new(&mut mesh);
        let res = build(&mut ctx, &params).unwrap();

        assert_eq!(res.slab_rings, 0);
        let (_, max) = mesh.bounding_box().unwrap();
        assert!((max.z - 6.0).abs() < 1e-9);
        // No slab geometry: footprint width unchanged.
        assert!((max.x - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cap_closes_roof() {
        let mut mesh = PolyMesh::new();
        footprint(&mut mesh);
        let params = FloorParams {
            floor_count: 1,
            floor_height: 2.0,
            slab_thickness: 0.1,
            slab_outset: 0.0,
        };
        let mut ctx = BuildContext::new(&mut mesh);
        let res = build(&mut ctx, &params).unwrap();

        assert!((mesh.face_center(res.cap).z - 2.1).abs() < 1e-9);
        // Closed solid after capping: no boundary edges left.
        assert!(mesh.boundary_edges().is_empty());
    }

    #[test]
    fn test_selected_region_seeds_and_is_deleted() {
        let mut mesh = PolyMesh::new();
        footprint(&mut mesh);
        let base: Vec<FaceId> = mesh.face_ids().collect();
        mesh.select_faces(&base, true);
        let params = FloorParams {
            floor_count: 1,
            floor_height: 2.0,
            slab_thickness: 0.1,
            slab_outset: 0.0,
        };
        let mut ctx = BuildContext::new(&mut mesh);
        build(&mut ctx, &params).unwrap();

        // Seed face gone, selection cleared, walls built from its boundary.
        assert!(!mesh.face_alive(base[0]));
        assert!(mesh.selected_faces().is_empty());
        let (_, max) = mesh.bounding_box().unwrap();
        assert!((max.z - 2.1).abs() < 1e-9);
    }

    #[test]
    fn test_sloped_mesh_without_selection_rejected() {
        let mut mesh = PolyMesh::new();
        use nalgebra::Point3;
        let v0 = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        let v1 = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        let v2 = mesh.add_vertex(Point3::new(1.0, 1.0, 0.5));
        let v3 = mesh.add_vertex(Point3::new(0.0, 1.0, 0.5));
        mesh.add_face(&[v0, v1, v2, v3]);

        let params = FloorParams::default();
        let mut ctx = BuildContext::new(&mut mesh);
        assert!(matches!(
            build(&mut ctx, &params),
            Err(BuildError::InvalidSelection { .. })
        ));
    }
}
