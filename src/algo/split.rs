//! Wall face splitting.
//!
//! Carves an offset inner rectangle out of a quad wall face by subdividing
//! each axis with two cuts and pulling the cut vertices toward the face
//! center. Window and door assemblies run on the face this returns.

use log::debug;
use nalgebra::Vector3;

use crate::error::{BuildError, Result};
use crate::kernel::{remove_doubles, scale, subdivide_edges, translate};
use crate::mesh::{
    face_with_verts, filter_horizontal_edges, EdgeId, FaceId, PolyMesh, VertexId,
};

/// Merge distance for seams left by repeated splits on the same wall.
const MERGE_DIST: f64 = 1e-4;

/// Two cuts per axis leave a middle third, so the scale applied to the cut
/// vertices is three times the requested size ratio.
const CUT_SCALE: f64 = 3.0;

/// Split `face` into a grid and return the inner face.
///
/// `size_v` and `size_h` are the inner face's share of the wall's height and
/// width; a ratio at or above 1.0 skips that axis entirely, so `(1, 1)`
/// returns the input face unchanged. `offset` moves the inner face in the
/// wall plane (x, y) and vertically (z).
pub fn split(
    mesh: &mut PolyMesh,
    face: FaceId,
    size_v: f64,
    size_h: f64,
    offset: Vector3<f64>,
) -> Result<FaceId> {
    if size_v <= 0.0 {
        return Err(BuildError::invalid_param("size_v", size_v, "must be positive"));
    }
    if size_h <= 0.0 {
        return Err(BuildError::invalid_param("size_h", size_h, "must be positive"));
    }
    if !mesh.face_alive(face) {
        return Err(BuildError::StaleReference(format!("{:?}", face)));
    }

    let scale_v = size_v * CUT_SCALE;
    let scale_h = size_h * CUT_SCALE;
    let do_vertical = scale_v < CUT_SCALE;
    let do_horizontal = scale_h < CUT_SCALE;

    mesh.face_mut(face).select = false;
    if !do_vertical && !do_horizontal {
        debug!("split skipped for {:?}: full-size ratios", face);
        return Ok(face);
    }

    let median = mesh.face_center(face);
    let mut face = face;
    let mut inner_verts: Vec<VertexId> = Vec::new();

    if do_horizontal {
        // Two cuts across the top and bottom edges, pulled toward the
        // center so the middle strip takes `size_h` of the width.
        let normal = mesh.face_normal(face);
        let edges = mesh.face_edges(face);
        let horizontal = filter_horizontal_edges(mesh, &edges, &normal);
        if horizontal.is_empty() {
            return Err(BuildError::degenerate("wall face has no horizontal edges"));
        }
        let res = subdivide_edges(mesh, &horizontal, 2)?;
        inner_verts = res.inner_verts;
        scale(
            mesh,
            &inner_verts,
            Vector3::new(scale_h, scale_h, 1.0),
            median,
        )?;
    }

    if do_vertical {
        remove_doubles(mesh, MERGE_DIST)?;
        if do_horizontal {
            face = face_with_verts(mesh, &inner_verts).ok_or(BuildError::FaceLost {
                operation: "split",
            })?;
        }
        let normal = mesh.face_normal(face);
        let edges = mesh.face_edges(face);
        let horizontal = filter_horizontal_edges(mesh, &edges, &normal);
        let vertical: Vec<EdgeId> = edges
            .into_iter()
            .filter(|e| !horizontal.contains(e))
            .collect();
        if vertical.is_empty() {
            return Err(BuildError::degenerate("wall face has no vertical edges"));
        }
        let res = subdivide_edges(mesh, &vertical, 2)?;
        inner_verts = res.inner_verts;
        scale(
            mesh,
            &inner_verts,
            Vector3::new(1.0, 1.0, scale_v),
            median,
        )?;
    }

    // In-plane offset: when both axes were split the whole inner column
    // moves, otherwise only the strip's own vertices.
    if do_horizontal && do_vertical {
        let mut column: Vec<VertexId> = Vec::new();
        for &v in &inner_verts {
            for e in mesh.vertex_edges(v) {
                column.extend(mesh.edge(e).verts);
            }
        }
        column.sort();
        column.dedup();
        translate(mesh, &column, Vector3::new(offset.x, offset.y, 0.0))?;
    } else if do_horizontal {
        translate(mesh, &inner_verts, Vector3::new(offset.x, offset.y, 0.0))?;
    }
    translate(mesh, &inner_verts, Vector3::new(0.0, 0.0, offset.z))?;

    face_with_verts(mesh, &inner_verts).ok_or(BuildError::FaceLost { operation: "split" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::face_dimensions;
    use nalgebra::Point3;

    /// A 1x1 wall quad in the xz plane facing +y.
    fn unit_wall(mesh: &mut PolyMesh) -> FaceId {
        let v0 = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        let v1 = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        let v2 = mesh.add_vertex(Point3::new(1.0, 0.0, 1.0));
        let v3 = mesh.add_vertex(Point3::new(0.0, 0.0, 1.0));
        mesh.add_face(&[v0, v3, v2, v1])
    }

    #[test]
    fn test_full_size_is_noop() {
        let mut mesh = PolyMesh::new();
        let f = unit_wall(&mut mesh);
        let inner = split(&mut mesh, f, 1.0, 1.0, Vector3::zeros()).unwrap();
        assert_eq!(inner, f);
        assert_eq!(mesh.num_faces(), 1);
        assert_eq!(mesh.num_vertices(), 4);
    }

    #[test]
    fn test_half_split_centers_inner_face() {
        let mut mesh = PolyMesh::new();
        let f = unit_wall(&mut mesh);
        let inner = split(&mut mesh, f, 0.5, 0.5, Vector3::zeros()).unwrap();

        let (w, h) = face_dimensions(&mesh, inner);
        assert!((w - 0.5).abs() < 1e-9, "width {}", w);
        assert!((h - 0.5).abs() < 1e-9, "height {}", h);

        let c = mesh.face_center(inner);
        assert!((c.x - 0.5).abs() < 1e-9);
        assert!((c.z - 0.5).abs() < 1e-9);

        // Three columns, with the middle column split into three rows. The
        // outer columns absorb the row cuts into their loops.
        assert_eq!(mesh.num_faces(), 5);
    }

    #[test]
    fn test_offset_moves_inner_face() {
        let mut mesh = PolyMesh::new();
        let f = unit_wall(&mut mesh);
        let inner = split(&mut mesh, f, 0.4, 0.4, Vector3::new(0.1, 0.0, 0.2)).unwrap();

        let c = mesh.face_center(inner);
        assert!((c.x - 0.6).abs() < 1e-9);
        assert!((c.z - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_horizontal_only_strip() {
        let mut mesh = PolyMesh::new();
        let f = unit_wall(&mut mesh);
        let inner = split(&mut mesh, f, 1.0, 0.5, Vector3::zeros()).unwrap();

        // Middle strip of a 3-column split, full height.
        let (w, h) = face_dimensions(&mesh, inner);
        assert!((w - 0.5).abs() < 1e-9);
        assert!((h - 1.0).abs() < 1e-9);
        assert_eq!(mesh.num_faces(), 3);
    }

    #[test]
    fn test_zero_ratio_rejected() {
        let mut mesh = PolyMesh::new();
        let f = unit_wall(&mut mesh);
        assert!(split(&mut mesh, f, 0.0, 0.5, Vector3::zeros()).is_err());
    }
}
