//! Window assemblies.
//!
//! A window is carved into each selected wall face in three stages: split
//! the wall to get the opening, sink a frame into it, then fill the inner
//! face with the configured style.

use log::debug;

use crate::algo::{fill, split::split};
use crate::error::{BuildError, Result};
use crate::kernel::{
    extrude_discrete_faces, inset_individual, recalc_face_normals, remove_doubles, translate,
};
use crate::mesh::{FaceId, PolyMesh};
use crate::param::{BuildContext, WindowParams};

/// Merge distance for seams between neighboring openings on one wall.
const MERGE_DIST: f64 = 1e-4;

/// Build a window into every selected wall face.
pub fn build(ctx: &mut BuildContext, params: &WindowParams) -> Result<()> {
    params.validate()?;
    let faces = wall_selection(ctx.mesh, "window")?;
    debug!("building windows on {} faces", faces.len());
    for face in faces {
        let opening = split(ctx.mesh, face, params.size.y, params.size.x, params.off)?;
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

/// The selected faces, checked to be vertical walls.
pub(crate) fn wall_selection(mesh: &PolyMesh, what: &'static str) -> Result<Vec<FaceId>> {
    let faces = mesh.selected_faces();
    if faces.is_empty() {
        return Err(BuildError::EmptyInput { operation: what });
    }
    for &f in &faces {
        if mesh.face_normal(f).z.abs() > 1e-6 {
            return Err(BuildError::InvalidSelection {
                reason: "selection includes a non-wall face",
            });
        }
    }
    Ok(faces)
}

/// Sink a frame into `face` and return the recessed inner face.
pub(crate) fn make_frame(
    mesh: &mut PolyMesh,
    face: FaceId,
    thickness: f64,
    depth: f64,
) -> Result<FaceId> {
    remove_doubles(mesh, MERGE_DIST)?;
    if !mesh.face_alive(face) {
        return Err(BuildError::FaceLost { operation: "frame" });
    }

    // Raise the frame proud of the wall by half its depth.
    let ext = extrude_discrete_faces(mesh, &[face])?;
    let cap = *ext.faces.last().ok_or(BuildError::FaceLost { operation: "frame" })?;
    let normal = mesh.face_normal(cap);
    let cap_verts = mesh.face(cap).verts.clone();
    translate(mesh, &cap_verts, normal * (depth / 2.0))?;

    if thickness > 0.0 {
        inset_individual(mesh, &[cap], thickness)?;
    }
    recalc_face_normals(mesh)?;

    if depth > 0.0 {
        let ext = extrude_discrete_faces(mesh, &[cap])?;
        let inner = *ext.faces.last().ok_or(BuildError::FaceLost { operation: "frame" })?;
        let inner_normal = mesh.face_normal(inner);
        let inner_verts = mesh.face(inner).verts.clone();
        translate(mesh, &inner_verts, -inner_normal * depth)?;
        return Ok(inner);
    }
    Ok(cap)
}
