//! Edge subdivision and face splitting.
//!
//! `subdivide_edges` mirrors the host kernel's behavior: each input edge gets
//! `cuts` evenly spaced vertices, and when exactly two *opposite* edges of a
//! quad are subdivided the new vertices are connected across the face,
//! splitting it into `cuts + 1` quads. Faces where the subdivided edges do
//! not form an opposite quad pair simply grow their boundary loop — that is
//! how the random floorplan turns a rectangle into an irregular polygon.

use std::collections::HashMap;

use crate::error::{BuildError, Result};
use crate::mesh::{EdgeId, FaceId, PolyMesh, VertexId};

/// Geometry created by [`subdivide_edges`].
#[derive(Debug, Clone, Default)]
pub struct SubdivideResult {
    /// All vertices inserted on the subdivided edges.
    pub inner_verts: Vec<VertexId>,
    /// Edges connecting cut vertices across split quads.
    pub inner_edges: Vec<EdgeId>,
    /// The boundary segments that replaced the input edges.
    pub split_edges: Vec<EdgeId>,
}

struct Chain {
    a: VertexId,
    cut: Vec<VertexId>,
}

fn pair_key(a: VertexId, b: VertexId) -> (VertexId, VertexId) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Subdivide a set of edges with `cuts` evenly spaced vertices each.
pub fn subdivide_edges(
    mesh: &mut PolyMesh,
    edges: &[EdgeId],
    cuts: usize,
) -> Result<SubdivideResult> {
    if edges.is_empty() {
        return Err(BuildError::EmptyInput {
            operation: "subdivide_edges",
        });
    }
    if cuts == 0 {
        return Err(BuildError::invalid_param("cuts", cuts, "must be at least 1"));
    }

    let mut result = SubdivideResult::default();

    // Capture affected faces and their loops before any mutation.
    let mut affected: Vec<(FaceId, Vec<VertexId>)> = Vec::new();
    for &e in edges {
        if !mesh.edge_alive(e) {
            return Err(BuildError::StaleReference(format!("{:?}", e)));
        }
        for f in mesh.edge_faces(e) {
            if !affected.iter().any(|(af, _)| *af == f) {
                affected.push((f, mesh.face(f).verts.clone()));
            }
        }
    }

    // Insert cut vertices and replace each input edge by its segments.
    let mut chains: Vec<Chain> = Vec::with_capacity(edges.len());
    let mut chain_map: HashMap<(VertexId, VertexId), usize> = HashMap::new();
    for &e in edges {
        if chain_map.contains_key(&pair_key(mesh.edge(e).verts[0], mesh.edge(e).verts[1])) {
            continue; // same edge passed twice
        }
        let [a, b] = mesh.edge(e).verts;
        let pa = *mesh.position(a);
        let pb = *mesh.position(b);
        let cut: Vec<VertexId> = (1..=cuts)
            .map(|i| {
                let t = i as f64 / (cuts + 1) as f64;
                mesh.add_vertex(pa + (pb - pa) * t)
            })
            .collect();
        result.inner_verts.extend(&cut);

        mesh.kill_edge(e);
        let mut prev = a;
        for &m in &cut {
            result.split_edges.push(mesh.add_edge(prev, m));
            prev = m;
        }
        result.split_edges.push(mesh.add_edge(prev, b));

        chain_map.insert(pair_key(a, b), chains.len());
        chains.push(Chain { a, cut });
    }

    // Rewrite each affected face.
    for (f, old_loop) in affected {
        let n = old_loop.len();
        let subs: Vec<(usize, usize)> = (0..n)
            .filter_map(|i| {
                let p = old_loop[i];
                let q = old_loop[(i + 1) % n];
                chain_map.get(&pair_key(p, q)).map(|&ci| (i, ci))
            })
            .collect();

        let opposite_quad_pair = n == 4 && subs.len() == 2 && subs[1].0 == subs[0].0 + 2;
        if opposite_quad_pair {
            connect_quad(mesh, f, &old_loop, &subs, &chains, cuts, &mut result.inner_edges);
        } else {
            // Grow the boundary loop in place.
            let mut new_loop = Vec::with_capacity(n + subs.len() * cuts);
            for i in 0..n {
                new_loop.push(old_loop[i]);
                if let Some(&(_, ci)) = subs.iter().find(|&&(pos, _)| pos == i) {
                    extend_with_chain(&mut new_loop, &chains[ci], old_loop[i]);
                }
            }
            mesh.replace_face_loop(f, &new_loop);
        }
    }

    Ok(result)
}

/// Append a chain's cut vertices in the loop's travel direction.
fn extend_with_chain(loop_verts: &mut Vec<VertexId>, chain: &Chain, from: VertexId) {
    if chain.a == from {
        loop_verts.extend(&chain.cut);
    } else {
        loop_verts.extend(chain.cut.iter().rev());
    }
}

/// Split a quad whose two opposite edges were subdivided into `cuts + 1`
/// strips, connecting corresponding cut vertices.
fn connect_quad(
    mesh: &mut PolyMesh,
    f: FaceId,
    old_loop: &[VertexId],
    subs: &[(usize, usize)],
    chains: &[Chain],
    cuts: usize,
    inner_edges: &mut Vec<EdgeId>,
) {
    // Rotate the loop so the first subdivided edge sits at position 0.
    let i0 = subs[0].0;
    let w: Vec<VertexId> = (0..4).map(|k| old_loop[(i0 + k) % 4]).collect();

    let dir = |chain: &Chain, from: VertexId| -> Vec<VertexId> {
        if chain.a == from {
            chain.cut.clone()
        } else {
            chain.cut.iter().rev().copied().collect()
        }
    };
    let m = dir(&chains[subs[0].1], w[0]); // along w0 -> w1
    let k = dir(&chains[subs[1].1], w[2]); // along w2 -> w3
    let c = cuts;

    let select = mesh.face(f).select;

    // First strip keeps the original face id.
    mesh.replace_face_loop(f, &[w[0], m[0], k[c - 1], w[3]]);

    let mut new_faces = Vec::with_capacity(c);
    for i in 0..c.saturating_sub(1) {
        new_faces.push(mesh.add_face(&[m[i], m[i + 1], k[c - 2 - i], k[c - 1 - i]]));
    }
    new_faces.push(mesh.add_face(&[m[c - 1], w[1], w[2], k[0]]));
    mesh.select_faces(&new_faces, select);

    for i in 0..c {
        inner_edges.push(mesh.add_edge(m[i], k[c - 1 - i]));
    }
}

/// Split a single edge at a parametric offset `t`, returning the new segment
/// toward the second endpoint and the inserted vertex.
pub fn edge_split(mesh: &mut PolyMesh, e: EdgeId, t: f64) -> Result<(EdgeId, VertexId)> {
    if !mesh.edge_alive(e) {
        return Err(BuildError::StaleReference(format!("{:?}", e)));
    }
    if !(0.0..=1.0).contains(&t) {
        return Err(BuildError::invalid_param("t", t, "must be within [0, 1]"));
    }

    let [a, b] = mesh.edge(e).verts;
    let pa = *mesh.position(a);
    let pb = *mesh.position(b);
    let v = mesh.add_vertex(pa + (pb - pa) * t);

    let affected: Vec<(FaceId, Vec<VertexId>)> = mesh
        .edge_faces(e)
        .into_iter()
        .map(|f| (f, mesh.face(f).verts.clone()))
        .collect();

    mesh.kill_edge(e);
    mesh.add_edge(a, v);
    let tail = mesh.add_edge(v, b);

    for (f, old_loop) in affected {
        let n = old_loop.len();
        let mut new_loop = Vec::with_capacity(n + 1);
        for i in 0..n {
            new_loop.push(old_loop[i]);
            let q = old_loop[(i + 1) % n];
            if (old_loop[i] == a && q == b) || (old_loop[i] == b && q == a) {
                new_loop.push(v);
            }
        }
        mesh.replace_face_loop(f, &new_loop);
    }
    Ok((tail, v))
}

/// Split a face along a chord between two of its non-adjacent loop vertices.
pub fn connect_verts(mesh: &mut PolyMesh, face: FaceId, a: VertexId, b: VertexId) -> Result<EdgeId> {
    let loop_verts = mesh.face(face).verts.clone();
    let ia = loop_verts.iter().position(|&v| v == a);
    let ib = loop_verts.iter().position(|&v| v == b);
    let (Some(ia), Some(ib)) = (ia, ib) else {
        return Err(BuildError::degenerate(
            "connect_verts endpoints not on the face loop",
        ));
    };
    let n = loop_verts.len();
    if (ia + 1) % n == ib || (ib + 1) % n == ia {
        return Err(BuildError::degenerate("connect_verts endpoints are adjacent"));
    }

    let (i, j) = if ia < ib { (ia, ib) } else { (ib, ia) };
    let first: Vec<VertexId> = loop_verts[i..=j].to_vec();
    let mut second: Vec<VertexId> = loop_verts[j..].to_vec();
    second.extend(&loop_verts[..=i]);

    let select = mesh.face(face).select;
    mesh.replace_face_loop(face, &first);
    let nf = mesh.add_face(&second);
    mesh.select_faces(&[nf], select);

    mesh.find_edge(a, b).ok_or(BuildError::FaceLost {
        operation: "connect_verts",
    })
}
