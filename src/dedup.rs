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

//! Merging of lattice points shared between neighbouring faces.
//!
//! A lattice point on the boundary of a base face is identified by *where on the
//! icosahedron* it lies, not by its coordinates: either a base vertex, or an
//! (edge, offset) pair where the offset counts lattice steps from the edge's
//! lower-indexed endpoint. Two faces sharing an edge walk it in opposite
//! directions, and the offset convention maps both walks onto the same key.

use crate::{
    icosahedron::{BaseEdges, BASE_VERTEX_COUNT},
    lattice::LatticePoint,
    Face, Frequency, Vector3,
};
use std::collections::HashMap;

/// Canonical identity of a lattice point
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LatticeKey {
    /// Coincides with a base vertex
    Corner(usize),
    /// Strictly inside base edge `edge`, `offset` steps from its lower endpoint
    Edge { edge: usize, offset: u32 },
    /// Strictly inside base face `face`; never shared
    Interior { face: usize, i: u32, j: u32 },
}

impl LatticeKey {
    /// Classify lattice point (i, j) on base face `face` with corners `[a, b, c]`
    pub fn classify(
        face: usize,
        [a, b, c]: Face,
        i: u32,
        j: u32,
        nu: Frequency,
        edges: &BaseEdges,
    ) -> Self {
        let n = nu.get();
        debug_assert!(i + j <= n);
        // (from, to, steps from `from`)
        let on_edge = match (i, j) {
            (0, 0) => return Self::Corner(a),
            (i, 0) if i == n => return Self::Corner(b),
            (0, j) if j == n => return Self::Corner(c),
            (i, 0) => (a, b, i),
            (0, j) => (a, c, j),
            (i, j) if i + j == n => (b, c, j),
            (i, j) => return Self::Interior { face, i, j },
        };
        let (from, to, steps) = on_edge;
        let edge = edges
            .id(from, to)
            .unwrap_or_else(|| panic!("face {face} side {from}-{to} is not an icosahedron edge"));
        let offset = if from < to { steps } else { n - steps };
        Self::Edge { edge, offset }
    }
}

/// Assigns global vertex indices to lattice points.
///
/// Base vertices keep indices 0..12. Every other vertex is numbered on first sight, so
/// feeding faces and their lattice points in a fixed order gives a fixed numbering.
/// The key map lives only as long as the deduplicator.
pub struct VertexDeduplicator<'a> {
    nu: Frequency,
    edges: &'a BaseEdges,
    shared: HashMap<LatticeKey, usize>,
    positions: Vec<Vector3>,
}

impl<'a> VertexDeduplicator<'a> {
    /// Start from the unit base vertices, which keep their indices
    pub fn new(nu: Frequency, base_vertices: &[Vector3], edges: &'a BaseEdges) -> Self {
        assert_eq!(base_vertices.len(), BASE_VERTEX_COUNT);
        let mut positions = Vec::with_capacity(nu.vertex_count());
        positions.extend_from_slice(base_vertices);
        // Only (ν-1) points per edge ever go into the map
        let shared = HashMap::with_capacity(edges.len() * (nu.get() as usize - 1));
        Self {
            nu,
            edges,
            shared,
            positions,
        }
    }

    /// Global index of `point` on base face `face`.
    ///
    /// New vertices take the position of the first sighting.
    pub fn resolve(&mut self, face: usize, corners: Face, point: &LatticePoint) -> usize {
        let key = LatticeKey::classify(face, corners, point.i, point.j, self.nu, self.edges);
        match key {
            LatticeKey::Corner(vertex) => vertex,
            LatticeKey::Interior { .. } => self.push(point.position),
            LatticeKey::Edge { .. } => match self.shared.get(&key) {
                Some(&index) => index,
                None => {
                    let index = self.push(point.position);
                    self.shared.insert(key, index);
                    index
                }
            },
        }
    }

    /// Number of unique vertices seen so far
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Unique vertex positions, indexed by global vertex index.
    ///
    /// # Panics
    ///
    /// If the number of unique vertices differs from 12 + 10(ν+1)(ν-1), which means
    /// the faces fed in did not cover the icosahedron exactly once.
    pub fn finish(self) -> Vec<Vector3> {
        assert_eq!(
            self.positions.len(),
            self.nu.vertex_count(),
            "vertex deduplication produced a wrong number of vertices for {}",
            self.nu
        );
        trace!(
            "Deduplicated {} vertices, {} shared edge points",
            self.positions.len(),
            self.shared.len()
        );
        self.positions
    }

    fn push(&mut self, position: Vector3) -> usize {
        self.positions.push(position);
        self.positions.len() - 1
    }
}
