// Copyright 2024 Mikael Lund
//
// Licensed under the Apache license, version 2.0 (the "license");
// you may not use this file except in compliance with the license.
// You may obtain a copy of the license at
//
//     http://www.apache.org/licenses/license-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the license is distributed on an "as is" basis,
// without warranties or conditions of any kind, either express or implied.
// See the license for the specific language governing permissions and
// limitations under the license.

//! Regular unit icosahedron used as the base of all subdivisions.
//!
//! Vertices are grouped by the three orthogonal golden rectangles. Vertices 0..6 are
//! `(0, 1, φ)`, `(0, -1, φ)`, `(1, φ, 0)`, `(-1, φ, 0)`, `(φ, 0, 1)`, `(-φ, 0, 1)`, scaled to
//! unit length, and vertex _k_ + 6 is the antipode of vertex _k_.

use crate::{mesh::Mesh, Face, Vector3};
use itertools::Itertools;

/// Number of icosahedron vertices
pub const BASE_VERTEX_COUNT: usize = 12;

/// Number of icosahedron faces
pub const BASE_FACE_COUNT: usize = 20;

/// Number of icosahedron edges
pub const BASE_EDGE_COUNT: usize = 30;

/// Golden ratio, φ = (1 + √5) / 2
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// The 20 faces, each wound counter-clockwise when seen from outside
#[rustfmt::skip]
pub const BASE_FACES: [Face; BASE_FACE_COUNT] = [
    [0, 5, 1], [0, 3, 5], [0, 2, 3], [0, 4, 2], [0, 1, 4],
    [1, 5, 8], [5, 3, 10], [3, 2, 7], [2, 4, 11], [4, 1, 9],
    [7, 11, 6], [11, 9, 6], [9, 8, 6], [8, 10, 6], [10, 7, 6],
    [2, 11, 7], [4, 9, 11], [1, 8, 9], [5, 10, 8], [3, 7, 10],
];

/// The 12 unit length vertices
pub fn base_vertices() -> [Vector3; BASE_VERTEX_COUNT] {
    const PHI: f64 = GOLDEN_RATIO;
    let upper = [
        Vector3::new(0.0, 1.0, PHI),
        Vector3::new(0.0, -1.0, PHI),
        Vector3::new(1.0, PHI, 0.0),
        Vector3::new(-1.0, PHI, 0.0),
        Vector3::new(PHI, 0.0, 1.0),
        Vector3::new(-PHI, 0.0, 1.0),
    ];
    let scale = PHI.mul_add(PHI, 1.0).sqrt().recip();
    std::array::from_fn(|i| match i {
        0..=5 => upper[i] * scale,
        _ => -upper[i - 6] * scale,
    })
}

/// Undirected icosahedron edges with a stable numbering.
///
/// Edges are stored as `[lo, hi]` vertex pairs sorted lexicographically,
/// and an edge id is the position in that list.
#[derive(Clone, Debug)]
pub struct BaseEdges {
    edges: Vec<[usize; 2]>,
}

impl BaseEdges {
    /// Collect the unique edges of [`BASE_FACES`]
    pub fn new() -> Self {
        let edges = BASE_FACES
            .iter()
            .flat_map(|&[a, b, c]| [[a, b], [b, c], [c, a]])
            .map(|[u, v]| [u.min(v), u.max(v)])
            .sorted()
            .dedup()
            .collect_vec();
        debug_assert_eq!(edges.len(), BASE_EDGE_COUNT);
        Self { edges }
    }

    /// Id of the edge joining `u` and `v`, in either order
    pub fn id(&self, u: usize, v: usize) -> Option<usize> {
        self.edges.binary_search(&[u.min(v), u.max(v)]).ok()
    }

    /// Endpoints `[lo, hi]` of edge `id`
    pub fn endpoints(&self, id: usize) -> [usize; 2] {
        self.edges[id]
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[usize; 2]> {
        self.edges.iter()
    }
}

impl Default for BaseEdges {
    fn default() -> Self {
        Self::new()
    }
}

/// Regular unit icosahedron as a mesh.
///
/// Identical to a subdivision with frequency one.
///
/// ## Examples
/// ~~~
/// let mesh = icosphere::icosahedron();
/// assert_eq!(mesh.vertices().len(), 12);
/// assert_eq!(mesh.faces().len(), 20);
/// ~~~
pub fn icosahedron() -> Mesh {
    Mesh::from_parts(base_vertices().to_vec(), BASE_FACES.to_vec())
}
