//! Classification and measurement queries.
//!
//! Edge orientation (vertical vs horizontal) is never a stored attribute. It
//! is recomputed at every use relative to the normal of the face currently
//! being processed: a wall facing +x classifies differently from one facing
//! +y. Endpoint coordinates are compared after rounding to 3 decimal places,
//! so vertices that drifted within kernel tolerance still classify together.

use nalgebra::Vector3;

use super::index::{EdgeId, FaceId, VertexId};
use super::polymesh::PolyMesh;

/// Rounding used before coordinate comparison, 3 decimal places.
fn rnd(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

/// Whether both endpoints of an edge agree on one coordinate after rounding.
fn endpoints_agree(mesh: &PolyMesh, e: EdgeId, axis: usize) -> bool {
    let [a, b] = mesh.edge(e).verts;
    rnd(mesh.position(a)[axis]) == rnd(mesh.position(b)[axis])
}

/// Filter edges that run vertically relative to a face normal.
///
/// For a face whose normal has a nonzero x component the endpoints must agree
/// on y; otherwise they must agree on x. An empty result is a valid state.
pub fn filter_vertical_edges(mesh: &PolyMesh, edges: &[EdgeId], normal: &Vector3<f64>) -> Vec<EdgeId> {
    let axis = if normal.x.abs() > 1e-6 { 1 } else { 0 };
    edges
        .iter()
        .copied()
        .filter(|&e| endpoints_agree(mesh, e, axis))
        .collect()
}

/// Filter edges that run horizontally relative to a face normal.
///
/// For a face whose normal has a nonzero z component the endpoints must agree
/// on y; otherwise they must agree on z.
pub fn filter_horizontal_edges(
    mesh: &PolyMesh,
    edges: &[EdgeId],
    normal: &Vector3<f64>,
) -> Vec<EdgeId> {
    let axis = if normal.z.abs() > 1e-6 { 1 } else { 2 };
    edges
        .iter()
        .copied()
        .filter(|&e| endpoints_agree(mesh, e, axis))
        .collect()
}

/// Compute (horizontal_length, vertical_length) of a face.
///
/// Takes the length of the last horizontal and last vertical edge found by
/// the orientation filters. Only meaningful for regular quads; the
/// precondition is not validated.
pub fn face_dimensions(mesh: &PolyMesh, face: FaceId) -> (f64, f64) {
    let n = mesh.face_normal(face);
    let edges = mesh.face_edges(face);
    let horizontal = filter_horizontal_edges(mesh, &edges, &n);
    let vertical = filter_vertical_edges(mesh, &edges, &n);
    let h = horizontal.last().map(|&e| mesh.edge_length(e)).unwrap_or(0.0);
    let v = vertical.last().map(|&e| mesh.edge_length(e)).unwrap_or(0.0);
    (h, v)
}

/// Find the face whose vertex loop is contained in the given vertex set.
///
/// Used to re-acquire a face reference after a topology-changing operation
/// invalidates the previous one.
pub fn face_with_verts(mesh: &PolyMesh, verts: &[VertexId]) -> Option<FaceId> {
    mesh.face_ids()
        .find(|&f| mesh.face(f).verts.iter().all(|v| verts.contains(v)))
}
