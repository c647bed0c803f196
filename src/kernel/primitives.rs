//! Primitive shape creation.
//!
//! Base shapes are emitted straight into an existing mesh, matching the host
//! kernel convention of the original tool: a plane is a single quad spanning
//! `±width × ±length`, a cube spans `±width × ±length × ±height`, and the
//! radial primitives are centered on the origin.

use std::f64::consts::TAU;

use nalgebra::{Point3, Vector3};

use crate::error::{BuildError, Result};
use crate::mesh::{FaceId, PolyMesh, VertexId};

use super::{extrude_discrete_faces, translate};

/// Geometry created by a primitive operation.
#[derive(Debug, Clone, Default)]
pub struct PrimitiveResult {
    /// Vertices created by the operation.
    pub verts: Vec<VertexId>,
    /// Faces created by the operation.
    pub faces: Vec<FaceId>,
}

fn check_positive(name: &'static str, value: f64) -> Result<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(BuildError::invalid_param(name, value, "must be positive"))
    }
}

fn check_segments(segments: usize) -> Result<()> {
    if segments >= 3 {
        Ok(())
    } else {
        Err(BuildError::invalid_param(
            "segments",
            segments,
            "must be at least 3",
        ))
    }
}

/// Create a single quad in the xy plane spanning `±width × ±length`.
pub fn create_plane(mesh: &mut PolyMesh, width: f64, length: f64) -> Result<PrimitiveResult> {
    check_positive("width", width)?;
    check_positive("length", length)?;

    let verts = vec![
        mesh.add_vertex(Point3::new(-width, -length, 0.0)),
        mesh.add_vertex(Point3::new(width, -length, 0.0)),
        mesh.add_vertex(Point3::new(width, length, 0.0)),
        mesh.add_vertex(Point3::new(-width, length, 0.0)),
    ];
    let face = mesh.add_face(&verts);
    Ok(PrimitiveResult {
        verts,
        faces: vec![face],
    })
}

/// Create a filled circle in the xy plane.
///
/// With `cap_tris` the cap is a triangle fan around a center vertex;
/// otherwise it is a single n-gon.
pub fn create_circle(
    mesh: &mut PolyMesh,
    radius: f64,
    segments: usize,
    cap_tris: bool,
) -> Result<PrimitiveResult> {
    check_positive("radius", radius)?;
    check_segments(segments)?;

    let ring: Vec<VertexId> = (0..segments)
        .map(|i| {
            let a = i as f64 / segments as f64 * TAU;
            mesh.add_vertex(Point3::new(radius * a.cos(), radius * a.sin(), 0.0))
        })
        .collect();

    let mut result = PrimitiveResult {
        verts: ring.clone(),
        faces: Vec::new(),
    };

    if cap_tris {
        let center = mesh.add_vertex(Point3::origin());
        result.verts.push(center);
        for i in 0..segments {
            let f = mesh.add_face(&[center, ring[i], ring[(i + 1) % segments]]);
            result.faces.push(f);
        }
    } else {
        result.faces.push(mesh.add_face(&ring));
    }
    Ok(result)
}

/// Create a cube spanning `±width × ±length × ±height`.
pub fn create_cube(
    mesh: &mut PolyMesh,
    width: f64,
    length: f64,
    height: f64,
) -> Result<PrimitiveResult> {
    check_positive("width", width)?;
    check_positive("length", length)?;
    check_positive("height", height)?;

    let mut corners = Vec::with_capacity(8);
    for &z in &[-height, height] {
        for &(x, y) in &[
            (-width, -length),
            (width, -length),
            (width, length),
            (-width, length),
        ] {
            corners.push(mesh.add_vertex(Point3::new(x, y, z)));
        }
    }
    let c = &corners;

    // Outward-facing winding per side.
    let loops: [[VertexId; 4]; 6] = [
        [c[0], c[3], c[2], c[1]], // bottom (-z)
        [c[4], c[5], c[6], c[7]], // top (+z)
        [c[0], c[1], c[5], c[4]], // front (-y)
        [c[2], c[3], c[7], c[6]], // back (+y)
        [c[3], c[0], c[4], c[7]], // left (-x)
        [c[1], c[2], c[6], c[5]], // right (+x)
    ];
    let faces = loops.iter().map(|l| mesh.add_face(l)).collect();
    Ok(PrimitiveResult {
        verts: corners,
        faces,
    })
}

/// Create a capped cone with base radius `r1` and top radius `r2`.
pub fn create_cone(
    mesh: &mut PolyMesh,
    r1: f64,
    r2: f64,
    height: f64,
    segments: usize,
) -> Result<PrimitiveResult> {
    check_positive("r1", r1)?;
    check_positive("r2", r2)?;
    check_positive("height", height)?;
    check_segments(segments)?;

    let ring = |mesh: &mut PolyMesh, r: f64, z: f64| -> Vec<VertexId> {
        (0..segments)
            .map(|i| {
                let a = i as f64 / segments as f64 * TAU;
                mesh.add_vertex(Point3::new(r * a.cos(), r * a.sin(), z))
            })
            .collect()
    };

    let bottom = ring(mesh, r1, -height / 2.0);
    let top = ring(mesh, r2, height / 2.0);

    let mut result = PrimitiveResult::default();
    result.verts.extend(&bottom);
    result.verts.extend(&top);

    for i in 0..segments {
        let j = (i + 1) % segments;
        let f = mesh.add_face(&[bottom[i], bottom[j], top[j], top[i]]);
        result.faces.push(f);
    }

    // Triangle-fan caps, wound to face away from the body.
    let bc = mesh.add_vertex(Point3::new(0.0, 0.0, -height / 2.0));
    let tc = mesh.add_vertex(Point3::new(0.0, 0.0, height / 2.0));
    result.verts.push(bc);
    result.verts.push(tc);
    for i in 0..segments {
        let j = (i + 1) % segments;
        result.faces.push(mesh.add_face(&[bc, bottom[j], bottom[i]]));
        result.faces.push(mesh.add_face(&[tc, top[i], top[j]]));
    }
    Ok(result)
}

/// Create a cylinder by extruding a circle cap, the way the original tool
/// composes it from kernel calls.
pub fn create_cylinder(
    mesh: &mut PolyMesh,
    radius: f64,
    height: f64,
    segments: usize,
) -> Result<PrimitiveResult> {
    check_positive("height", height)?;
    let circle = create_circle(mesh, radius, segments, false)?;

    let ext = extrude_discrete_faces(mesh, &circle.faces)?;
    let top_face = *ext.faces.last().ok_or(BuildError::FaceLost {
        operation: "create_cylinder",
    })?;
    let top_verts = mesh.face(top_face).verts.clone();
    translate(mesh, &top_verts, Vector3::new(0.0, 0.0, height))?;

    let mut verts = circle.verts.clone();
    verts.extend(&top_verts);
    translate(mesh, &verts, Vector3::new(0.0, 0.0, -height / 2.0))?;

    let mut faces = ext.faces.clone();
    faces.extend(ext.side_faces);
    Ok(PrimitiveResult { verts, faces })
}
