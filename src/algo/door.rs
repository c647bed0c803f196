//! Door assemblies.
//!
//! Doors reuse the window pipeline but are anchored to the bottom edge of
//! the wall face: the vertical offset is derived from the face height so
//! the opening always reaches the floor.

use log::debug;
use nalgebra::Vector3;

use crate::algo::window::{make_frame, wall_selection};
use crate::algo::{fill, split::split};
use crate::error::Result;
use crate::mesh::face_dimensions;
use crate::param::{BuildContext, DoorParams};

/// Build a door into every selected wall face.
pub fn build(ctx: &mut BuildContext, params: &DoorParams) -> Result<()> {
    params.validate()?;
    let faces = wall_selection(ctx.mesh, "door")?;
    debug!("building doors on {} faces", faces.len());
    for face in faces {
        // Drop the opening so its bottom lands on the face bottom.
        let (_, height) = face_dimensions(ctx.mesh, face);
        let sink = if params.size.y < 1.0 {
            -height * (1.0 - params.size.y) / 2.0
        } else {
            0.0
        };
        let offset = Vector3::new(params.off.x, params.off.y, params.off.z + sink);

        let opening = split(ctx.mesh, face, params.size.y, params.size.x, offset)?;
        let inner = make_frame(
            ctx.mesh,
            opening,
            params.frame_thickness,
            params.frame_depth,
        )?;
        fill::apply(ctx.mesh, inner, &params.fill)?;
    }
    ctx.deselect_all();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{FaceId, PolyMesh};
    use crate::param::FillStyle;
    use nalgebra::{Point3, Vector2};

    /// A 2x2 wall quad in the xz plane facing +y, base at z = 0.
    fn wall(mesh: &mut PolyMesh) -> FaceId {
        let v0 = mesh.add_vertex(Point3::new(-1.0, 0.0, 0.0));
        let v1 = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        let v2 = mesh.add_vertex(Point3::new(1.0, 0.0, 2.0));
        let v3 = mesh.add_vertex(Point3::new(-1.0, 0.0, 2.0));
        let f = mesh.add_face(&[v0, v1, v2, v3]);
        if mesh.face_normal(f).y < 0.0 {
            mesh.flip_face(f);
        }
        f
    }

    #[test]
    fn test_door_reaches_floor() {
        let mut mesh = PolyMesh::new();
        let f = wall(&mut mesh);
        mesh.select_faces(&[f], true);
        let params = DoorParams {
            size: Vector2::new(0.5, 0.5),
            frame_thickness: 0.0,
            frame_depth: 0.0,
            fill: FillStyle::None,
            ..Default::default()
        };
        let mut ctx = BuildContext::new(&mut mesh);
        build(&mut ctx, &params).unwrap();

        // A half-height opening sits in [0, 1], not centered on the wall.
        // With no frame the inner face is the split face itself; find it by
        // extent: some face must span exactly z in [0, 1].
        let found = mesh.face_ids().any(|f| {
            let zs: Vec<f64> = mesh.face(f).verts.iter().map(|&v| mesh.position(v).z).collect();
            let lo = zs.iter().cloned().fold(f64::INFINITY, f64::min);
            let hi = zs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            lo.abs() < 1e-9 && (hi - 1.0).abs() < 1e-9 && zs.len() == 4
        });
        assert!(found, "no floor-anchored opening face");
    }

    #[test]
    fn test_full_height_door_keeps_center() {
        let mut mesh = PolyMesh::new();
        let f = wall(&mut mesh);
        mesh.select_faces(&[f], true);
        let params = DoorParams {
            size: Vector2::new(0.5, 1.0),
            frame_thickness: 0.0,
            frame_depth: 0.0,
            fill: FillStyle::None,
            ..Default::default()
        };
        let mut ctx = BuildContext::new(&mut mesh);
        build(&mut ctx, &params).unwrap();

        // Full-height split leaves a middle strip spanning the whole wall;
        // the frame pass still rings it with four flat side faces.
        let strip = mesh.face_ids().find(|&f| {
            let c = mesh.face_center(f);
            c.x.abs() < 1e-9
        });
        assert!(strip.is_some());
        assert_eq!(mesh.num_faces(), 3 + 4);
    }
}
