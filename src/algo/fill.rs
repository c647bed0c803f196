//! Opening fills: panels, glass panes, bars and louvers.
//!
//! Each strategy takes the inner face a frame build left behind and
//! populates it with repeating detail. Dispatch happens once, at
//! [`apply`], off the typed [`FillStyle`] union.

use log::debug;
use nalgebra::Vector3;

use crate::error::{BuildError, Result};
use crate::kernel::{
    duplicate_faces, extrude_discrete_faces, extrude_edges, inset_individual, recalc_face_normals,
    remove_doubles, scale, subdivide_edges, translate,
};
use crate::mesh::{
    face_dimensions, filter_horizontal_edges, filter_vertical_edges, EdgeId, FaceId, PolyMesh,
    VertexId,
};
use crate::param::{BarParams, FillStyle, LouverParams, PaneParams, PanelParams};

/// Merge distance for louver blade seams.
const LOUVER_MERGE_DIST: f64 = 0.01;

/// Gap that keeps vertical bars clear of horizontal ones.
const BAR_EPS: f64 = 0.015;

/// Apply a fill style to `face`.
pub fn apply(mesh: &mut PolyMesh, face: FaceId, style: &FillStyle) -> Result<()> {
    match style {
        FillStyle::None => Ok(()),
        FillStyle::Panel(p) => fill_panel(mesh, face, p),
        FillStyle::GlassPanes(p) => fill_glass_panes(mesh, face, p),
        FillStyle::Bar(p) => fill_bar(mesh, face, p),
        FillStyle::Louver(p) => fill_louver(mesh, face, p),
    }
}

fn dedup_verts(mut verts: Vec<VertexId>) -> Vec<VertexId> {
    verts.sort();
    verts.dedup();
    verts
}

/// Split `face` into a grid and raise each cell as a flat panel.
pub fn fill_panel(mesh: &mut PolyMesh, face: FaceId, params: &PanelParams) -> Result<()> {
    params.validate()?;
    debug!("panel fill on {:?}: {}x{}", face, params.count_x, params.count_y);
    inset_individual(mesh, &[face], params.border)?;

    let normal = mesh.face_normal(face);
    let edges = mesh.face_edges(face);
    let v_edges = filter_vertical_edges(mesh, &edges, &normal);
    let h_edges: Vec<EdgeId> = edges
        .into_iter()
        .filter(|e| !v_edges.contains(e))
        .collect();

    let mut grid_verts: Vec<VertexId> = Vec::new();
    let mut row_chords: Vec<EdgeId> = Vec::new();
    if params.count_x > 0 {
        if v_edges.is_empty() {
            return Err(BuildError::degenerate("panel face has no vertical edges"));
        }
        let res = subdivide_edges(mesh, &v_edges, params.count_x)?;
        grid_verts = res.inner_verts;
        row_chords = res.inner_edges;
    }
    if params.count_y > 0 {
        let mut targets = h_edges;
        targets.extend(&row_chords);
        if targets.is_empty() {
            return Err(BuildError::degenerate("panel face has no horizontal edges"));
        }
        let res = subdivide_edges(mesh, &targets, params.count_y)?;
        grid_verts = res.inner_verts;
    }

    if grid_verts.is_empty() {
        return Ok(());
    }

    // Grid cells: quads around the grid vertices that still face the
    // original direction.
    let mut cells: Vec<FaceId> = Vec::new();
    for &v in &grid_verts {
        for f in mesh.vertex_faces(v) {
            if mesh.face(f).verts.len() == 4
                && mesh.face_normal(f).dot(&normal) > 0.999
                && !cells.contains(&f)
            {
                cells.push(f);
            }
        }
    }
    inset_individual(mesh, &cells, params.thickness / 2.0)?;

    let mut cell_verts: Vec<VertexId> = Vec::new();
    for &f in &cells {
        cell_verts.extend(&mesh.face(f).verts);
    }
    let cell_verts = dedup_verts(cell_verts);
    translate(mesh, &cell_verts, normal * params.depth)?;
    recalc_face_normals(mesh)
}

/// Split `face` into a grid of recessed glass panes.
pub fn fill_glass_panes(mesh: &mut PolyMesh, face: FaceId, params: &PaneParams) -> Result<()> {
    params.validate()?;
    debug!("glass fill on {:?}: {}x{}", face, params.count_x, params.count_y);

    let normal = mesh.face_normal(face);
    let edges = mesh.face_edges(face);
    let v_edges = filter_vertical_edges(mesh, &edges, &normal);
    let h_edges = filter_horizontal_edges(mesh, &edges, &normal);

    let mut chords: Vec<EdgeId> = Vec::new();
    let mut row_chords: Vec<EdgeId> = Vec::new();
    if params.count_x > 0 {
        if v_edges.is_empty() {
            return Err(BuildError::degenerate("pane face has no vertical edges"));
        }
        let res = subdivide_edges(mesh, &v_edges, params.count_x)?;
        row_chords = res.inner_edges.clone();
        chords.extend(res.inner_edges);
    }
    if params.count_y > 0 {
        let mut targets = h_edges;
        targets.extend(&row_chords);
        if targets.is_empty() {
            return Err(BuildError::degenerate("pane face has no horizontal edges"));
        }
        let res = subdivide_edges(mesh, &targets, params.count_y)?;
        chords.extend(res.inner_edges);
    }

    if chords.is_empty() {
        return Ok(());
    }

    // Row chords subdivided by the second pass are gone; panes hang off the
    // chords that survived.
    let mut panes: Vec<FaceId> = Vec::new();
    for &e in &chords {
        if !mesh.edge_alive(e) {
            continue;
        }
        for f in mesh.edge_faces(e) {
            if !panes.contains(&f) {
                panes.push(f);
            }
        }
    }
    inset_individual(mesh, &panes, params.thickness)?;
    for &f in &panes {
        let pane_normal = mesh.face_normal(f);
        let verts = mesh.face(f).verts.clone();
        translate(mesh, &verts, -pane_normal * params.depth)?;
    }
    Ok(())
}

/// Build a grid of free-standing bars over `face`.
pub fn fill_bar(mesh: &mut PolyMesh, face: FaceId, params: &BarParams) -> Result<()> {
    params.validate()?;
    let (width, height) = face_dimensions(mesh, face);
    if width <= 0.0 || height <= 0.0 {
        return Err(BuildError::degenerate("bar fill on a zero-area face"));
    }
    debug!("bar fill on {:?}: {}x{}", face, params.count_x, params.count_y);
    let center = mesh.face_center(face);
    let normal = mesh.face_normal(face);

    // Horizontal bars: squashed copies of the face, swept back to depth.
    let step = height / (params.count_x + 1) as f64;
    for i in 0..params.count_x {
        let dup = duplicate_faces(mesh, &[face])?;
        let squash = params.thickness / height;
        scale(mesh, &dup.verts, Vector3::new(1.0, 1.0, squash), center)?;
        let lift = -height / 2.0 + (i + 1) as f64 * step;
        translate(
            mesh,
            &dup.verts,
            normal * (params.depth / 2.0) + Vector3::new(0.0, 0.0, lift),
        )?;

        let rails = filter_horizontal_edges(mesh, &dup.edges, &normal);
        let ext = extrude_edges(mesh, &rails)?;
        translate(mesh, &ext.verts, -normal * (params.depth / 2.0))?;
    }

    // Vertical bars sit slightly behind the horizontal ones.
    let step = width / (params.count_y + 1) as f64;
    let perp = normal.cross(&Vector3::z());
    for i in 0..params.count_y {
        let dup = duplicate_faces(mesh, &[face])?;
        let squash = params.thickness / width;
        scale(mesh, &dup.verts, Vector3::new(squash, squash, 1.0), center)?;
        let shift = -width / 2.0 + (i + 1) as f64 * step;
        translate(
            mesh,
            &dup.verts,
            normal * (params.depth / 2.0 - BAR_EPS) + perp * shift,
        )?;

        let rails = filter_vertical_edges(mesh, &dup.edges, &normal);
        let ext = extrude_edges(mesh, &rails)?;
        translate(mesh, &ext.verts, -normal * (params.depth / 2.0 - BAR_EPS))?;
    }
    Ok(())
}

/// Build angled louver slats across `face`.
pub fn fill_louver(mesh: &mut PolyMesh, face: FaceId, params: &LouverParams) -> Result<()> {
    params.validate()?;
    debug!("louver fill on {:?}: {} blades", face, params.count);
    let normal = mesh.face_normal(face);
    if params.margin > 0.0 {
        inset_individual(mesh, &[face], params.margin)?;
    }

    // One strip per blade plus one per gap, rounded up to an even cut count
    // so blades land on the odd strips.
    let mut cuts = 2 * params.count - 1;
    if cuts % 2 != 0 {
        cuts += 1;
    }

    let edges = mesh.face_edges(face);
    let v_edges = filter_vertical_edges(mesh, &edges, &normal);
    if v_edges.is_empty() {
        return Err(BuildError::degenerate("louver face has no vertical edges"));
    }
    let res = subdivide_edges(mesh, &v_edges, cuts)?;

    let mut strips: Vec<FaceId> = Vec::new();
    for &e in &res.inner_edges {
        for f in mesh.edge_faces(e) {
            if !strips.contains(&f) {
                strips.push(f);
            }
        }
    }
    strips.sort_by(|&a, &b| mesh.face_center(a).z.total_cmp(&mesh.face_center(b).z));
    let blades: Vec<FaceId> = strips.iter().copied().skip(1).step_by(2).collect();

    // Overlap each blade past its strip before extruding.
    for &b in &blades {
        let verts = mesh.face(b).verts.clone();
        let blade_center = mesh.face_center(b);
        scale(
            mesh,
            &verts,
            Vector3::new(1.0, 1.0, 1.0 + params.border),
            blade_center,
        )?;
    }

    let ext = extrude_discrete_faces(mesh, &blades)?;
    let mut cap_verts: Vec<VertexId> = Vec::new();
    for &f in &ext.faces {
        cap_verts.extend(&mesh.face(f).verts);
    }
    let cap_verts = dedup_verts(cap_verts);
    translate(mesh, &cap_verts, normal * params.depth)?;

    // Tilt: pull each blade's top edge back to the wall plane.
    for &f in &ext.faces {
        let blade_normal = mesh.face_normal(f);
        let blade_edges = mesh.face_edges(f);
        let horizontal = filter_horizontal_edges(mesh, &blade_edges, &blade_normal);
        let top = horizontal
            .into_iter()
            .max_by(|&a, &b| mesh.edge_median(a).z.total_cmp(&mesh.edge_median(b).z))
            .ok_or(BuildError::FaceLost {
                operation: "fill_louver",
            })?;
        let top_verts = mesh.edge(top).verts;
        translate(mesh, &top_verts, -blade_normal * params.depth)?;
    }

    remove_doubles(mesh, LOUVER_MERGE_DIST)?;
    Ok(())
}
