//! Polygon mesh data structure.
//!
//! This module provides a face-vertex polygon mesh used as the substrate for
//! all building-generation operations. Faces are stored as ordered
//! counter-clockwise vertex loops; edges are explicit so that edit operations
//! can address them directly (subdivide, extrude-edge-only), the way the host
//! mesh kernel of the original tool does.
//!
//! # Element lifetime
//!
//! Topology edits never reuse or renumber ids. Deleted elements are
//! tombstoned (`alive = false`) and skipped by all iterators, so ids held
//! across an edit either stay valid or become observably dead — there is no
//! silent aliasing. Algorithms that need to survive a topology change
//! re-acquire faces by vertex-set lookup instead of trusting stale ids.
//!
//! # Selection
//!
//! Vertices, edges and faces carry a selection flag. The building pipeline
//! reads face selection to choose its input geometry and clears it when a
//! feature consumes the selected faces, mirroring the host's edit-mode
//! selection state.

use std::collections::HashMap;

use nalgebra::{Point3, Vector3};

use super::index::{EdgeId, FaceId, VertexId};

/// A vertex in the polygon mesh.
#[derive(Debug, Clone)]
pub struct Vertex {
    /// The 3D position of this vertex.
    pub position: Point3<f64>,

    /// Host-style selection flag.
    pub select: bool,

    pub(crate) alive: bool,
}

impl Vertex {
    /// Create a new vertex at the given position.
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            select: false,
            alive: true,
        }
    }
}

/// An edge connecting two vertices.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    /// The two endpoint vertices.
    pub verts: [VertexId; 2],

    /// Host-style selection flag.
    pub select: bool,

    pub(crate) alive: bool,
}

/// A face stored as an ordered (counter-clockwise) vertex loop.
#[derive(Debug, Clone)]
pub struct Face {
    /// The boundary loop of this face.
    pub verts: Vec<VertexId>,

    /// Host-style selection flag.
    pub select: bool,

    pub(crate) alive: bool,
}

/// A mutable polygon mesh with stable element ids.
#[derive(Debug, Clone, Default)]
pub struct PolyMesh {
    pub(crate) verts: Vec<Vertex>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) faces: Vec<Face>,

    /// Canonical (lo, hi) vertex pair to edge id, live edges only.
    edge_map: HashMap<(VertexId, VertexId), EdgeId>,
}

fn edge_key(a: VertexId, b: VertexId) -> (VertexId, VertexId) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

impl PolyMesh {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Accessors ====================

    /// Number of live vertices.
    pub fn num_vertices(&self) -> usize {
        self.verts.iter().filter(|v| v.alive).count()
    }

    /// Number of live edges.
    pub fn num_edges(&self) -> usize {
        self.edges.iter().filter(|e| e.alive).count()
    }

    /// Number of live faces.
    pub fn num_faces(&self) -> usize {
        self.faces.iter().filter(|f| f.alive).count()
    }

    /// Get a vertex by id.
    #[inline]
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.verts[id.index()]
    }

    /// Get a mutable vertex by id.
    #[inline]
    pub fn vertex_mut(&mut self, id: VertexId) -> &mut Vertex {
        &mut self.verts[id.index()]
    }

    /// Get an edge by id.
    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    /// Get a mutable edge by id.
    #[inline]
    pub fn edge_mut(&mut self, id: EdgeId) -> &mut Edge {
        &mut self.edges[id.index()]
    }

    /// Get a face by id.
    #[inline]
    pub fn face(&self, id: FaceId) -> &Face {
        &self.faces[id.index()]
    }

    /// Get a mutable face by id.
    #[inline]
    pub fn face_mut(&mut self, id: FaceId) -> &mut Face {
        &mut self.faces[id.index()]
    }

    /// Whether a vertex id refers to live geometry.
    #[inline]
    pub fn vertex_alive(&self, id: VertexId) -> bool {
        id.index() < self.verts.len() && self.verts[id.index()].alive
    }

    /// Whether an edge id refers to live geometry.
    #[inline]
    pub fn edge_alive(&self, id: EdgeId) -> bool {
        id.index() < self.edges.len() && self.edges[id.index()].alive
    }

    /// Whether a face id refers to live geometry.
    #[inline]
    pub fn face_alive(&self, id: FaceId) -> bool {
        id.index() < self.faces.len() && self.faces[id.index()].alive
    }

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId) -> &Point3<f64> {
        &self.vertex(v).position
    }

    /// Set the position of a vertex.
    #[inline]
    pub fn set_position(&mut self, v: VertexId, pos: Point3<f64>) {
        self.vertex_mut(v).position = pos;
    }

    // ==================== Iteration ====================

    /// Iterate over all live vertex ids.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.verts
            .iter()
            .enumerate()
            .filter(|(_, v)| v.alive)
            .map(|(i, _)| VertexId::new(i))
    }

    /// Iterate over all live edge ids.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.alive)
            .map(|(i, _)| EdgeId::new(i))
    }

    /// Iterate over all live face ids.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.alive)
            .map(|(i, _)| FaceId::new(i))
    }

    // ==================== Construction ====================

    /// Add a new vertex and return its id.
    pub fn add_vertex(&mut self, position: Point3<f64>) -> VertexId {
        let id = VertexId::new(self.verts.len());
        self.verts.push(Vertex::new(position));
        id
    }

    /// Get the edge between two vertices, creating it if absent.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId) -> EdgeId {
        debug_assert_ne!(a, b, "degenerate edge");
        let key = edge_key(a, b);
        if let Some(&e) = self.edge_map.get(&key) {
            return e;
        }
        let id = EdgeId::new(self.edges.len());
        self.edges.push(Edge {
            verts: [a, b],
            select: false,
            alive: true,
        });
        self.edge_map.insert(key, id);
        id
    }

    /// Look up the edge between two vertices.
    pub fn find_edge(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        self.edge_map.get(&edge_key(a, b)).copied()
    }

    /// Add a face from an ordered vertex loop, creating boundary edges as
    /// needed.
    pub fn add_face(&mut self, verts: &[VertexId]) -> FaceId {
        debug_assert!(verts.len() >= 3, "face needs at least 3 vertices");
        for i in 0..verts.len() {
            let a = verts[i];
            let b = verts[(i + 1) % verts.len()];
            self.add_edge(a, b);
        }
        let id = FaceId::new(self.faces.len());
        self.faces.push(Face {
            verts: verts.to_vec(),
            select: false,
            alive: true,
        });
        id
    }

    /// Replace a face's boundary loop in place, creating any missing edges.
    ///
    /// The face id survives; this is how inset and subdivision keep a caller's
    /// face reference pointing at the shrunk/split interior face.
    pub fn replace_face_loop(&mut self, f: FaceId, verts: &[VertexId]) {
        debug_assert!(verts.len() >= 3, "face needs at least 3 vertices");
        for i in 0..verts.len() {
            let a = verts[i];
            let b = verts[(i + 1) % verts.len()];
            self.add_edge(a, b);
        }
        self.faces[f.index()].verts = verts.to_vec();
    }

    /// Tombstone a face. Its edges and vertices are untouched.
    pub fn kill_face(&mut self, f: FaceId) {
        self.faces[f.index()].alive = false;
    }

    /// Tombstone an edge.
    pub fn kill_edge(&mut self, e: EdgeId) {
        let edge = self.edges[e.index()];
        if edge.alive {
            self.edge_map.remove(&edge_key(edge.verts[0], edge.verts[1]));
            self.edges[e.index()].alive = false;
        }
    }

    /// Tombstone a vertex.
    pub fn kill_vertex(&mut self, v: VertexId) {
        self.verts[v.index()].alive = false;
    }

    /// Reverse a face's winding (flips its normal).
    pub fn flip_face(&mut self, f: FaceId) {
        self.faces[f.index()].verts.reverse();
    }

    /// Merge vertices into their representatives, rewriting edges and face
    /// loops and tombstoning anything that collapses.
    ///
    /// Returns the number of vertices removed. Used by the kernel's
    /// remove-doubles pass; `rep` maps a vertex to its cluster
    /// representative (identity entries may be omitted).
    pub(crate) fn weld(&mut self, rep: &HashMap<VertexId, VertexId>) -> usize {
        let resolve = |v: VertexId| *rep.get(&v).unwrap_or(&v);

        let edge_ids: Vec<EdgeId> = self.edge_ids().collect();
        for e in edge_ids {
            let [a, b] = self.edges[e.index()].verts;
            let (ra, rb) = (resolve(a), resolve(b));
            if ra == a && rb == b {
                continue;
            }
            self.edge_map.remove(&edge_key(a, b));
            if ra == rb {
                self.edges[e.index()].alive = false;
                continue;
            }
            let key = edge_key(ra, rb);
            if self.edge_map.contains_key(&key) {
                // Another edge already spans the merged endpoints.
                self.edges[e.index()].alive = false;
            } else {
                self.edges[e.index()].verts = [ra, rb];
                self.edge_map.insert(key, e);
            }
        }

        let face_ids: Vec<FaceId> = self.face_ids().collect();
        for f in face_ids {
            let old = self.faces[f.index()].verts.clone();
            let mut new_loop: Vec<VertexId> = Vec::with_capacity(old.len());
            for v in old {
                let rv = resolve(v);
                if new_loop.last() != Some(&rv) {
                    new_loop.push(rv);
                }
            }
            while new_loop.len() > 1 && new_loop.first() == new_loop.last() {
                new_loop.pop();
            }
            if new_loop.len() < 3 {
                self.faces[f.index()].alive = false;
            } else {
                self.faces[f.index()].verts = new_loop;
            }
        }

        let mut removed = 0;
        for (&v, &r) in rep {
            if v != r && self.verts[v.index()].alive {
                self.verts[v.index()].alive = false;
                removed += 1;
            }
        }
        removed
    }

    // ==================== Adjacency ====================

    /// The edges bounding a face, in loop order.
    pub fn face_edges(&self, f: FaceId) -> Vec<EdgeId> {
        let loop_verts = &self.face(f).verts;
        let mut result = Vec::with_capacity(loop_verts.len());
        for i in 0..loop_verts.len() {
            let a = loop_verts[i];
            let b = loop_verts[(i + 1) % loop_verts.len()];
            if let Some(e) = self.find_edge(a, b) {
                result.push(e);
            }
        }
        result
    }

    /// Edges incident to a vertex.
    pub fn vertex_edges(&self, v: VertexId) -> Vec<EdgeId> {
        self.edge_ids()
            .filter(|&e| self.edge(e).verts.contains(&v))
            .collect()
    }

    /// Faces incident to a vertex.
    pub fn vertex_faces(&self, v: VertexId) -> Vec<FaceId> {
        self.face_ids()
            .filter(|&f| self.face(f).verts.contains(&v))
            .collect()
    }

    /// Faces incident to an edge.
    pub fn edge_faces(&self, e: EdgeId) -> Vec<FaceId> {
        let [a, b] = self.edge(e).verts;
        self.face_ids()
            .filter(|&f| {
                let vs = &self.face(f).verts;
                let n = vs.len();
                (0..n).any(|i| {
                    let (p, q) = (vs[i], vs[(i + 1) % n]);
                    (p == a && q == b) || (p == b && q == a)
                })
            })
            .collect()
    }

    /// Whether an edge borders fewer than two live faces.
    pub fn is_boundary_edge(&self, e: EdgeId) -> bool {
        self.edge_faces(e).len() < 2
    }

    // ==================== Geometry ====================

    /// Compute the normal of a face using Newell's method.
    ///
    /// Robust for any planar simple polygon; the sign follows the winding of
    /// the stored loop.
    pub fn face_normal(&self, f: FaceId) -> Vector3<f64> {
        let vs = &self.face(f).verts;
        let mut n = Vector3::zeros();
        for i in 0..vs.len() {
            let p = self.position(vs[i]);
            let q = self.position(vs[(i + 1) % vs.len()]);
            n.x += (p.y - q.y) * (p.z + q.z);
            n.y += (p.z - q.z) * (p.x + q.x);
            n.z += (p.x - q.x) * (p.y + q.y);
        }
        let norm = n.norm();
        if norm > 0.0 {
            n / norm
        } else {
            n
        }
    }

    /// The median (arithmetic mean) of a face's vertex positions.
    pub fn face_center(&self, f: FaceId) -> Point3<f64> {
        self.verts_median(&self.face(f).verts)
    }

    /// The median of an arbitrary vertex set.
    pub fn verts_median(&self, verts: &[VertexId]) -> Point3<f64> {
        let mut sum = Vector3::zeros();
        for &v in verts {
            sum += self.position(v).coords;
        }
        Point3::from(sum / verts.len() as f64)
    }

    /// The midpoint of an edge.
    pub fn edge_median(&self, e: EdgeId) -> Point3<f64> {
        let [a, b] = self.edge(e).verts;
        Point3::from((self.position(a).coords + self.position(b).coords) * 0.5)
    }

    /// The length of an edge.
    pub fn edge_length(&self, e: EdgeId) -> f64 {
        let [a, b] = self.edge(e).verts;
        (self.position(b) - self.position(a)).norm()
    }

    /// The axis-aligned bounding box of all live vertices.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let mut ids = self.vertex_ids();
        let first = ids.next()?;
        let mut min = *self.position(first);
        let mut max = min;
        for v in ids {
            let p = self.position(v);
            for i in 0..3 {
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        }
        Some((min, max))
    }

    // ==================== Selection ====================

    /// Ids of all selected live faces.
    pub fn selected_faces(&self) -> Vec<FaceId> {
        self.face_ids().filter(|&f| self.face(f).select).collect()
    }

    /// Set the selection flag on a set of faces.
    pub fn select_faces(&mut self, faces: &[FaceId], select: bool) {
        for &f in faces {
            self.faces[f.index()].select = select;
        }
    }

    /// Edges with fewer than two incident live faces.
    pub fn boundary_edges(&self) -> Vec<EdgeId> {
        self.edge_ids().filter(|&e| self.is_boundary_edge(e)).collect()
    }

    /// Clear every selection flag in the mesh.
    pub fn deselect_all(&mut self) {
        for v in &mut self.verts {
            v.select = false;
        }
        for e in &mut self.edges {
            e.select = false;
        }
        for f in &mut self.faces {
            f.select = false;
        }
    }
}
