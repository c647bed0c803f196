//! Mesh cleanup and repair passes.

use std::collections::{HashMap, VecDeque};

use crate::error::{BuildError, Result};
use crate::mesh::{EdgeId, FaceId, PolyMesh, VertexId};

/// Merge vertices that lie within `dist` of each other.
///
/// Edges and face loops are rewritten to the surviving vertex of each
/// cluster; edges and faces that collapse in the process are removed.
/// Returns the number of vertices merged away.
pub fn remove_doubles(mesh: &mut PolyMesh, dist: f64) -> Result<usize> {
    if dist < 0.0 {
        return Err(BuildError::invalid_param("dist", dist, "must be non-negative"));
    }

    let ids: Vec<VertexId> = mesh.vertex_ids().collect();
    let mut rep: HashMap<VertexId, VertexId> = HashMap::new();

    // Greedy clustering seeded in id order; the seed survives.
    for (i, &v) in ids.iter().enumerate() {
        if rep.contains_key(&v) {
            continue;
        }
        let pv = *mesh.position(v);
        for &w in &ids[i + 1..] {
            if rep.contains_key(&w) {
                continue;
            }
            if (mesh.position(w) - pv).norm() <= dist {
                rep.insert(w, v);
            }
        }
    }

    if rep.is_empty() {
        return Ok(0);
    }
    Ok(mesh.weld(&rep))
}

fn pair_key(a: VertexId, b: VertexId) -> (VertexId, VertexId) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Recalculate face windings so normals are consistent and outward.
///
/// Orientation is propagated across manifold shared edges (two faces must
/// traverse a shared edge in opposite directions); a signed-volume check
/// then flips the whole mesh if the majority of faces point inward. Flat
/// open sheets with no enclosed volume are left as they are.
pub fn recalc_face_normals(mesh: &mut PolyMesh) -> Result<()> {
    let faces: Vec<FaceId> = mesh.face_ids().collect();
    if faces.is_empty() {
        return Err(BuildError::EmptyInput {
            operation: "recalc_face_normals",
        });
    }

    // Directed traversal per face per edge.
    let mut edge_users: HashMap<(VertexId, VertexId), Vec<(FaceId, bool)>> = HashMap::new();
    for &f in &faces {
        let vs = mesh.face(f).verts.clone();
        for i in 0..vs.len() {
            let (a, b) = (vs[i], vs[(i + 1) % vs.len()]);
            edge_users
                .entry(pair_key(a, b))
                .or_default()
                .push((f, a < b));
        }
    }

    // Flood orientation over manifold edges.
    let mut flip: HashMap<FaceId, bool> = HashMap::new();
    for &start in &faces {
        if flip.contains_key(&start) {
            continue;
        }
        flip.insert(start, false);
        let mut queue = VecDeque::from([start]);
        while let Some(f) = queue.pop_front() {
            let f_flip = flip[&f];
            let vs = mesh.face(f).verts.clone();
            for i in 0..vs.len() {
                let (a, b) = (vs[i], vs[(i + 1) % vs.len()]);
                let users = &edge_users[&pair_key(a, b)];
                if users.len() != 2 {
                    continue;
                }
                for &(g, g_dir) in users {
                    if g == f || flip.contains_key(&g) {
                        continue;
                    }
                    let f_dir = users
                        .iter()
                        .find(|&&(h, _)| h == f)
                        .map(|&(_, d)| d)
                        .unwrap_or(a < b);
                    // Consistent neighbors traverse the edge oppositely.
                    flip.insert(g, (f_dir == g_dir) != f_flip);
                    queue.push_back(g);
                }
            }
        }
    }

    for (&f, &do_flip) in &flip {
        if do_flip {
            mesh.flip_face(f);
        }
    }

    // Outward check via signed volume (divergence theorem over fan
    // triangles). Near-zero volume means an open sheet; leave it alone.
    let mut volume = 0.0;
    for &f in &faces {
        let vs = &mesh.face(f).verts;
        let p0 = mesh.position(vs[0]).coords;
        for i in 1..vs.len() - 1 {
            let p1 = mesh.position(vs[i]).coords;
            let p2 = mesh.position(vs[i + 1]).coords;
            volume += p0.dot(&p1.cross(&p2)) / 6.0;
        }
    }
    if volume < -1e-9 {
        for &f in &faces {
            mesh.flip_face(f);
        }
    }
    Ok(())
}

/// Delete faces plus any edges and vertices left wholly unused by them,
/// the host kernel's faces delete context.
pub fn delete_faces(mesh: &mut PolyMesh, faces: &[FaceId]) -> Result<()> {
    if faces.is_empty() {
        return Err(BuildError::EmptyInput {
            operation: "delete_faces",
        });
    }

    let mut candidate_edges: Vec<EdgeId> = Vec::new();
    let mut candidate_verts: Vec<VertexId> = Vec::new();
    for &f in faces {
        if !mesh.face_alive(f) {
            return Err(BuildError::StaleReference(format!("{:?}", f)));
        }
        candidate_edges.extend(mesh.face_edges(f));
        candidate_verts.extend(&mesh.face(f).verts);
        mesh.kill_face(f);
    }
    candidate_edges.sort();
    candidate_edges.dedup();
    candidate_verts.sort();
    candidate_verts.dedup();

    for e in candidate_edges {
        if mesh.edge_alive(e) && mesh.edge_faces(e).is_empty() {
            mesh.kill_edge(e);
        }
    }
    for v in candidate_verts {
        if mesh.vertex_edges(v).is_empty() && mesh.vertex_faces(v).is_empty() {
            mesh.kill_vertex(v);
        }
    }
    Ok(())
}

/// Create a face capping a closed edge loop.
pub fn contextual_create(mesh: &mut PolyMesh, edges: &[EdgeId]) -> Result<FaceId> {
    if edges.is_empty() {
        return Err(BuildError::EmptyInput {
            operation: "contextual_create",
        });
    }

    let mut neighbors: HashMap<VertexId, Vec<VertexId>> = HashMap::new();
    for &e in edges {
        if !mesh.edge_alive(e) {
            return Err(BuildError::StaleReference(format!("{:?}", e)));
        }
        let [a, b] = mesh.edge(e).verts;
        neighbors.entry(a).or_default().push(b);
        neighbors.entry(b).or_default().push(a);
    }
    if neighbors.values().any(|n| n.len() != 2) {
        return Err(BuildError::degenerate("edges do not form a closed loop"));
    }

    let start = mesh.edge(edges[0]).verts[0];
    let mut loop_verts = vec![start];
    let mut prev = start;
    let mut cur = neighbors[&start][0];
    while cur != start {
        loop_verts.push(cur);
        let next = if neighbors[&cur][0] == prev {
            neighbors[&cur][1]
        } else {
            neighbors[&cur][0]
        };
        prev = cur;
        cur = next;
    }
    if loop_verts.len() != edges.len() {
        return Err(BuildError::degenerate("edge loop is not a single cycle"));
    }
    Ok(mesh.add_face(&loop_verts))
}
