//! Ground-plan outline generators.
//!
//! Every generator leaves a flat footprint at z = 0 for the floor extruder
//! to sweep upward. The random generator is deterministic per seed.

use log::debug;
use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::error::{BuildError, Result};
use crate::kernel::{create_circle, create_plane, extrude_edges, scale, subdivide_edges, translate};
use crate::mesh::{
    filter_horizontal_edges, filter_vertical_edges, EdgeId, PolyMesh, VertexId,
};
use crate::param::FloorplanStyle;

/// Generate a footprint into `mesh`.
pub fn build(mesh: &mut PolyMesh, style: &FloorplanStyle) -> Result<()> {
    style.validate()?;
    match *style {
        FloorplanStyle::Rectangular { width, length } => {
            debug!("rectangular footprint {}x{}", width, length);
            create_plane(mesh, width, length)?;
            Ok(())
        }
        FloorplanStyle::Circular {
            radius,
            segments,
            cap_tris,
        } => {
            debug!("circular footprint r={} segs={}", radius, segments);
            create_circle(mesh, radius, segments, cap_tris)?;
            Ok(())
        }
        FloorplanStyle::Composite {
            width,
            length,
            extensions,
        } => composite(mesh, width, length, extensions),
        FloorplanStyle::HShaped {
            width,
            length,
            lengths,
            widths,
        } => h_shaped(mesh, width, length, lengths, widths),
        FloorplanStyle::Random {
            seed,
            width,
            length,
        } => random(mesh, seed, width, length),
    }
}

fn sorted_by_median<F>(mesh: &PolyMesh, edges: &mut [EdgeId], key: F)
where
    F: Fn(&nalgebra::Point3<f64>) -> f64,
{
    edges.sort_by(|&a, &b| key(&mesh.edge_median(a)).total_cmp(&key(&mesh.edge_median(b))));
}

/// A cross of arms extruded off each side of a base rectangle.
///
/// Arm order is bottom, left, right, top; a zero extension skips its arm.
fn composite(
    mesh: &mut PolyMesh,
    width: f64,
    length: f64,
    extensions: [f64; 4],
) -> Result<()> {
    debug!("composite footprint {}x{} + {:?}", width, length, extensions);
    let plane = create_plane(mesh, width, length)?;
    let center = mesh.face_center(plane.faces[0]);

    let mut edges: Vec<EdgeId> = mesh.edge_ids().collect();
    sorted_by_median(mesh, &mut edges, |m| m.x);
    sorted_by_median(mesh, &mut edges, |m| m.y);

    for (&e, &ext) in edges.iter().zip(extensions.iter()) {
        if ext > 0.0 {
            let dir = (mesh.edge_median(e) - center).normalize();
            let res = extrude_edges(mesh, &[e])?;
            translate(mesh, &res.verts, dir * ext)?;
        }
    }
    Ok(())
}

/// An H/I outline: unit wings off both sides, then four independently
/// sized tips off the wing corners.
fn h_shaped(
    mesh: &mut PolyMesh,
    width: f64,
    length: f64,
    lengths: [f64; 4],
    widths: [f64; 4],
) -> Result<()> {
    debug!("h-shaped footprint {}x{}", width, length);
    let plane = create_plane(mesh, width, length)?;
    let base = plane.faces[0];
    let center = mesh.face_center(base);
    let normal = mesh.face_normal(base);

    // Unit wings off the left and right sides.
    let all_edges: Vec<EdgeId> = mesh.edge_ids().collect();
    for e in filter_vertical_edges(mesh, &all_edges, &normal) {
        let dir = (mesh.edge_median(e) - center).normalize();
        let res = extrude_edges(mesh, &[e])?;
        translate(mesh, &res.verts, dir)?;
    }

    // The wing connector edges, ordered bottom-left, bottom-right,
    // top-left, top-right. The base rectangle's own top and bottom sit in
    // the middle of the x ordering and drop out.
    let all_edges: Vec<EdgeId> = mesh.edge_ids().collect();
    let mut connectors = filter_horizontal_edges(mesh, &all_edges, &normal);
    sorted_by_median(mesh, &mut connectors, |m| m.x);
    let mut tips: Vec<EdgeId> = Vec::new();
    tips.extend(&connectors[..2]);
    tips.extend(&connectors[4..]);
    sorted_by_median(mesh, &mut tips, |m| m.y);

    for (idx, &e) in tips.iter().enumerate() {
        if lengths[idx] <= 0.0 {
            continue;
        }
        let dir = (mesh.edge_median(e) - center).normalize();
        let pick = |mesh: &PolyMesh, vs: &[VertexId]| -> VertexId {
            let cmp = |&&a: &&VertexId, &&b: &&VertexId| {
                mesh.position(a).x.total_cmp(&mesh.position(b).x)
            };
            if dir.x > 0.0 {
                *vs.iter().min_by(cmp).unwrap_or(&vs[0])
            } else {
                *vs.iter().max_by(cmp).unwrap_or(&vs[0])
            }
        };
        let old_verts = mesh.edge(e).verts;
        let res = extrude_edges(mesh, &[e])?;
        let inner_old = pick(mesh, &old_verts);
        let inner_new = pick(mesh, &res.verts);
        translate(mesh, &res.verts, Vector3::new(0.0, dir.y, 0.0) * lengths[idx])?;
        translate(
            mesh,
            &[inner_old, inner_new],
            Vector3::new(-dir.x, 0.0, 0.0) * widths[idx],
        )?;
    }
    Ok(())
}

/// A reproducible irregular outline: bumps grown off a random subset of
/// the base rectangle's sides.
fn random(mesh: &mut PolyMesh, seed: u64, width: f64, length: f64) -> Result<()> {
    debug!("random footprint seed={}", seed);
    let mut rng = StdRng::seed_from_u64(seed);
    let plane = create_plane(mesh, width, length)?;
    let center = mesh.face_center(plane.faces[0]);

    let all_edges: Vec<EdgeId> = mesh.edge_ids().collect();
    let picks = rng.random_range(1..all_edges.len());
    let sample: Vec<EdgeId> = all_edges
        .choose_multiple(&mut rng, picks)
        .copied()
        .collect();

    for edge in sample {
        let edge_center = mesh.edge_median(edge);
        let edge_len = mesh.edge_length(edge);

        let res = subdivide_edges(mesh, &[edge], 2)?;
        let cut_verts = res.inner_verts.clone();
        let segment = mesh
            .find_edge(cut_verts[0], cut_verts[1])
            .ok_or(BuildError::FaceLost {
                operation: "random floorplan",
            })?;

        // Stretch the middle segment along the side's axis.
        let along_x =
            (mesh.position(cut_verts[0]).y - mesh.position(cut_verts[1]).y).abs() < 1e-9;
        let factor = (rng.random::<f64>() * edge_len / mesh.edge_length(segment)).clamp(1.0, 2.95);
        let factors = if along_x {
            Vector3::new(factor, 1.0, 1.0)
        } else {
            Vector3::new(1.0, factor, 1.0)
        };
        scale(mesh, &cut_verts, factors, edge_center)?;

        if rng.random_bool(0.5) {
            // Slide the segment off-center, then grow a bump off it.
            let max_offset = (edge_len - mesh.edge_length(segment)) / 2.0;
            let slide = rng.random::<f64>() * max_offset;
            let axis = if along_x {
                Vector3::x()
            } else {
                Vector3::y()
            };
            translate(mesh, &cut_verts, axis * slide)?;

            let upper = ((edge_len / 2.0) as i64).max(2);
            let reach = rng.random_range(1..upper) as f64;
            let dir = (edge_center - center).normalize();
            let ext = extrude_edges(mesh, &[segment])?;
            translate(mesh, &ext.verts, dir * reach)?;
        }
    }
    Ok(())
}
