//! Extrusion and duplication.
//!
//! New geometry is created coincident with the source and left for the
//! caller to translate, matching the host kernel's extrude-then-translate
//! convention. Side faces start out zero-area until that translation
//! happens.

use std::collections::HashMap;

use crate::error::{BuildError, Result};
use crate::mesh::{EdgeId, FaceId, PolyMesh, VertexId};

/// Geometry created by an extrude operation.
///
/// For [`extrude_edges`], `faces` holds the swept side quads and
/// `side_faces` is empty. For [`extrude_discrete_faces`], `faces` holds the
/// new cap faces and `side_faces` the connecting ring.
#[derive(Debug, Clone, Default)]
pub struct ExtrudeResult {
    /// Vertices created by the operation.
    pub verts: Vec<VertexId>,
    /// Edges created by the operation (the new loop for edge extrusion).
    pub edges: Vec<EdgeId>,
    /// Primary faces created by the operation.
    pub faces: Vec<FaceId>,
    /// Ring faces connecting old and new boundaries (discrete extrude only).
    pub side_faces: Vec<FaceId>,
}

/// Geometry created by [`duplicate_faces`].
#[derive(Debug, Clone, Default)]
pub struct DuplicateResult {
    /// Copied vertices.
    pub verts: Vec<VertexId>,
    /// Copied edges.
    pub edges: Vec<EdgeId>,
    /// Copied faces.
    pub faces: Vec<FaceId>,
}

/// Extrude a set of edges into side quads, leaving the new geometry
/// coincident with the old.
///
/// Endpoint vertices shared between input edges are duplicated once, so a
/// closed loop extrudes into a ring with a matching closed loop on top.
pub fn extrude_edges(mesh: &mut PolyMesh, edges: &[EdgeId]) -> Result<ExtrudeResult> {
    if edges.is_empty() {
        return Err(BuildError::EmptyInput {
            operation: "extrude_edges",
        });
    }

    let mut result = ExtrudeResult::default();
    let mut dup: HashMap<VertexId, VertexId> = HashMap::new();

    for &e in edges {
        if !mesh.edge_alive(e) {
            return Err(BuildError::StaleReference(format!("{:?}", e)));
        }
        let [a, b] = mesh.edge(e).verts;
        for v in [a, b] {
            if !dup.contains_key(&v) {
                let copy = mesh.add_vertex(*mesh.position(v));
                dup.insert(v, copy);
                result.verts.push(copy);
            }
        }
        let (na, nb) = (dup[&a], dup[&b]);
        let face = mesh.add_face(&[a, b, nb, na]);
        result.faces.push(face);
        result.edges.push(
            mesh.find_edge(na, nb)
                .expect("edge created by add_face above"),
        );
    }
    Ok(result)
}

/// Extrude each face discretely.
///
/// Every input face gets its own duplicated boundary (no sharing between
/// faces); the face id survives as the new cap and the returned `faces` list
/// the caps in input order.
pub fn extrude_discrete_faces(mesh: &mut PolyMesh, faces: &[FaceId]) -> Result<ExtrudeResult> {
    if faces.is_empty() {
        return Err(BuildError::EmptyInput {
            operation: "extrude_discrete_faces",
        });
    }

    let mut result = ExtrudeResult::default();
    for &f in faces {
        if !mesh.face_alive(f) {
            return Err(BuildError::StaleReference(format!("{:?}", f)));
        }
        let outer = mesh.face(f).verts.clone();
        let cap: Vec<VertexId> = outer
            .iter()
            .map(|&v| mesh.add_vertex(*mesh.position(v)))
            .collect();
        result.verts.extend(&cap);

        let len = outer.len();
        for i in 0..len {
            let j = (i + 1) % len;
            let side = mesh.add_face(&[outer[i], outer[j], cap[j], cap[i]]);
            result.side_faces.push(side);
        }
        mesh.replace_face_loop(f, &cap);
        result.faces.push(f);
    }
    Ok(result)
}

/// Duplicate a set of faces, copying vertices, edges and loops.
///
/// Vertices shared between input faces are copied once so the duplicate
/// preserves the region's connectivity.
pub fn duplicate_faces(mesh: &mut PolyMesh, faces: &[FaceId]) -> Result<DuplicateResult> {
    if faces.is_empty() {
        return Err(BuildError::EmptyInput {
            operation: "duplicate_faces",
        });
    }

    let mut result = DuplicateResult::default();
    let mut dup: HashMap<VertexId, VertexId> = HashMap::new();

    for &f in faces {
        if !mesh.face_alive(f) {
            return Err(BuildError::StaleReference(format!("{:?}", f)));
        }
        let outer = mesh.face(f).verts.clone();
        let copy_loop: Vec<VertexId> = outer
            .iter()
            .map(|&v| {
                *dup.entry(v).or_insert_with(|| {
                    let copy = mesh.add_vertex(*mesh.position(v));
                    result.verts.push(copy);
                    copy
                })
            })
            .collect();
        let nf = mesh.add_face(&copy_loop);
        result.faces.push(nf);
        result.edges.extend(mesh.face_edges(nf));
    }
    result.edges.sort();
    result.edges.dedup();
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::translate;
    use nalgebra::{Point3, Vector3};

    fn unit_quad(mesh: &mut PolyMesh) -> FaceId {
        let v0 = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        let v1 = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        let v2 = mesh.add_vertex(Point3::new(1.0, 1.0, 0.0));
        let v3 = mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
        mesh.add_face(&[v0, v1, v2, v3])
    }

    #[test]
    fn test_extrude_closed_loop() {
        let mut mesh = PolyMesh::new();
        let f = unit_quad(&mut mesh);
        let boundary = mesh.face_edges(f);

        let res = extrude_edges(&mut mesh, &boundary).unwrap();
        assert_eq!(res.verts.len(), 4);
        assert_eq!(res.edges.len(), 4);
        assert_eq!(res.faces.len(), 4);

        translate(&mut mesh, &res.verts, Vector3::new(0.0, 0.0, 2.0)).unwrap();
        let (_, max) = mesh.bounding_box().unwrap();
        assert!((max.z - 2.0).abs() < 1e-12);

        // The new loop is closed: each new vertex appears in two new edges.
        for &v in &res.verts {
            let count = res
                .edges
                .iter()
                .filter(|&&e| mesh.edge(e).verts.contains(&v))
                .count();
            assert_eq!(count, 2);
        }
    }

    #[test]
    fn test_extrude_discrete_replaces_cap() {
        let mut mesh = PolyMesh::new();
        let f = unit_quad(&mut mesh);
        let res = extrude_discrete_faces(&mut mesh, &[f]).unwrap();

        assert_eq!(res.faces, vec![f]);
        assert_eq!(res.side_faces.len(), 4);
        assert_eq!(res.verts.len(), 4);

        // Cap keeps the original orientation after translation.
        let cap_verts = mesh.face(f).verts.clone();
        translate(&mut mesh, &cap_verts, Vector3::new(0.0, 0.0, 1.0)).unwrap();
        let n = mesh.face_normal(f);
        assert!((n.z - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_preserves_shape() {
        let mut mesh = PolyMesh::new();
        let f = unit_quad(&mut mesh);
        let res = duplicate_faces(&mut mesh, &[f]).unwrap();

        assert_eq!(res.faces.len(), 1);
        assert_eq!(res.verts.len(), 4);
        assert_eq!(mesh.num_faces(), 2);

        let nf = res.faces[0];
        assert!((mesh.face_center(nf) - mesh.face_center(f)).norm() < 1e-12);
        assert!((mesh.face_normal(nf) - mesh.face_normal(f)).norm() < 1e-12);
    }

    #[test]
    fn test_empty_inputs_fail() {
        let mut mesh = PolyMesh::new();
        assert!(extrude_edges(&mut mesh, &[]).is_err());
        assert!(extrude_discrete_faces(&mut mesh, &[]).is_err());
        assert!(duplicate_faces(&mut mesh, &[]).is_err());
    }
}
