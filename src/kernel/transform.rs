//! Vertex transforms.

use nalgebra::{Point3, Vector3};

use crate::error::{BuildError, Result};
use crate::mesh::{PolyMesh, VertexId};

/// Translate a set of vertices by an offset vector.
pub fn translate(mesh: &mut PolyMesh, verts: &[VertexId], offset: Vector3<f64>) -> Result<()> {
    if verts.is_empty() {
        return Err(BuildError::EmptyInput {
            operation: "translate",
        });
    }
    for &v in verts {
        let p = *mesh.position(v);
        mesh.set_position(v, p + offset);
    }
    Ok(())
}

/// Scale a set of vertices componentwise about a pivot point.
///
/// Equivalent to the host kernel's scale with a `Translation(-pivot)` space
/// matrix: each vertex offset from the pivot is multiplied per component.
pub fn scale(
    mesh: &mut PolyMesh,
    verts: &[VertexId],
    factors: Vector3<f64>,
    pivot: Point3<f64>,
) -> Result<()> {
    if verts.is_empty() {
        return Err(BuildError::EmptyInput { operation: "scale" });
    }
    for &v in verts {
        let offset = mesh.position(v) - pivot;
        mesh.set_position(v, pivot + offset.component_mul(&factors));
    }
    Ok(())
}
