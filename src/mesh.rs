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

use crate::{
    error::{IcoError, Result},
    lattice, Face, Frequency, Vector3,
};
use get_size::GetSize;
use itertools::Itertools;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Surface area of a unit sphere.
pub const UNIT_SPHERE_AREA: f64 = 4.0 * PI;

/// Triangle mesh: unique vertices and faces indexing into them.
///
/// Faces are wound counter-clockwise when seen from outside the sphere.
/// Deserialization goes through [`Mesh::new`] and rejects invalid face lists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, GetSize)]
#[serde(try_from = "RawMesh")]
pub struct Mesh {
    #[get_size(size_fn = vec_heap_size)]
    vertices: Vec<Vector3>,
    #[get_size(size_fn = vec_heap_size)]
    faces: Vec<Face>,
}

/// Unchecked serde representation of [`Mesh`]
#[derive(Deserialize)]
struct RawMesh {
    vertices: Vec<Vector3>,
    faces: Vec<Face>,
}

impl TryFrom<RawMesh> for Mesh {
    type Error = IcoError;
    fn try_from(raw: RawMesh) -> Result<Self> {
        Self::new(raw.vertices, raw.faces)
    }
}

fn vec_heap_size<T>(values: &Vec<T>) -> usize {
    values.capacity() * std::mem::size_of::<T>()
}

impl Mesh {
    /// Mesh from arbitrary vertices and faces.
    ///
    /// Every face must reference three distinct vertices within `vertices`.
    pub fn new(vertices: Vec<Vector3>, faces: Vec<Face>) -> Result<Self> {
        for (face, &[a, b, c]) in faces.iter().enumerate() {
            if [a, b, c].iter().any(|&v| v >= vertices.len()) {
                return Err(IcoError::InvalidMesh {
                    face,
                    reason: "vertex index out of range",
                });
            }
            if a == b || b == c || a == c {
                return Err(IcoError::InvalidMesh {
                    face,
                    reason: "repeated vertex index",
                });
            }
        }
        Ok(Self::from_parts(vertices, faces))
    }

    pub(crate) fn from_parts(vertices: Vec<Vector3>, faces: Vec<Face>) -> Self {
        Self { vertices, faces }
    }

    pub fn vertices(&self) -> &[Vector3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Split into (vertices, faces)
    pub fn into_parts(self) -> (Vec<Vector3>, Vec<Face>) {
        (self.vertices, self.faces)
    }

    /// Corner positions of face `index`
    pub fn triangle(&self, index: usize) -> [Vector3; 3] {
        self.faces[index].map(|v| self.vertices[v])
    }

    /// Unique undirected edges as sorted `[lo, hi]` pairs.
    ///
    /// Useful for drawing a wireframe on top of the surface.
    pub fn edges(&self) -> Vec<[usize; 2]> {
        self.directed_edges()
            .map(|[u, v]| [u.min(v), u.max(v)])
            .sorted_unstable()
            .dedup()
            .collect()
    }

    /// True if every face has three distinct, valid indices and every
    /// undirected edge is shared by exactly two faces.
    pub fn is_closed_manifold(&self) -> bool {
        let valid_faces = self.faces.iter().all(|&[a, b, c]| {
            a != b && b != c && a != c && [a, b, c].iter().all(|&v| v < self.vertices.len())
        });
        valid_faces
            && self
                .directed_edges()
                .map(|[u, v]| (u.min(v), u.max(v)))
                .counts()
                .values()
                .all(|&count| count == 2)
    }

    /// Unit normal of each face, from the cross product of its edges
    pub fn face_normals(&self) -> Vec<Vector3> {
        (0..self.faces.len())
            .map(|index| {
                let [a, b, c] = self.triangle(index);
                (b - a).cross(&(c - a)).normalize()
            })
            .collect()
    }

    /// Area of each face taken as a spherical triangle on the unit sphere
    pub fn spherical_face_areas(&self) -> Vec<f64> {
        self.faces
            .par_iter()
            .map(|face| {
                let [a, b, c] = face.map(|v| self.vertices[v]);
                spherical_face_area(&a, &b, &c)
            })
            .collect()
    }

    /// Weight of each vertex based on the area of adjacent faces.
    ///
    /// Every face contributes a third of its spherical area to each of its corners.
    /// The weights are normalized so that they fluctuate around 1.
    pub fn vertex_weights(&self) -> Vec<f64> {
        let mut weights = vec![0.0; self.vertices.len()];
        for (face, area) in self.faces.iter().zip(self.spherical_face_areas()) {
            face.iter().for_each(|&v| weights[v] += area / 3.0);
        }

        // The sum of all vertex contributions should add up to 4π,
        // the surface area of a unit sphere
        let total_area = weights.iter().sum::<f64>();
        if !approx::relative_eq!(total_area, UNIT_SPHERE_AREA, epsilon = 1e-6) {
            warn!("Mesh does not cover the unit sphere: total area {total_area:.6}");
        }

        let ideal_vertex_area = UNIT_SPHERE_AREA / self.vertices.len() as f64;
        weights.iter_mut().for_each(|w| *w /= ideal_vertex_area);
        weights
    }

    /// Serialize to a JSON object with `vertices` and `faces` arrays
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    fn directed_edges(&self) -> impl Iterator<Item = [usize; 2]> + '_ {
        self.faces
            .iter()
            .flat_map(|&[a, b, c]| [[a, b], [b, c], [c, a]])
    }
}

/// Join per-face index maps into the final mesh.
///
/// `face_maps[f][k]` is the global vertex index of lattice point `k` (row-major) on base
/// face `f`. Output faces are grouped by base face: base face `f` owns faces
/// `f·ν² .. (f+1)·ν²`, ordered as in [`lattice::sub_triangles`].
pub fn assemble(vertices: Vec<Vector3>, face_maps: &[Vec<usize>], nu: Frequency) -> Mesh {
    let template = lattice::sub_triangles(nu)
        .into_iter()
        .map(|corners| corners.map(|(i, j)| lattice::local_index(nu, i, j)))
        .collect_vec();

    let faces: Vec<Face> = face_maps
        .par_iter()
        .flat_map_iter(|to_global| {
            debug_assert_eq!(to_global.len(), nu.points_per_face());
            template
                .iter()
                .map(move |local| local.map(|k| to_global[k]))
        })
        .collect();

    debug_assert_eq!(faces.len(), face_maps.len() * template.len());
    Mesh::from_parts(vertices, faces)
}

/// Calculate the spherical face area of a triangle defined by three vertices
/// See <https://en.wikipedia.org/wiki/Spherical_trigonometry>
#[allow(non_snake_case)]
fn spherical_face_area(a: &Vector3, b: &Vector3, c: &Vector3) -> f64 {
    // Angle at corner v between the great circles towards u and w
    let angle = |u: &Vector3, v: &Vector3, w: &Vector3| {
        let vu = u - v * v.dot(u);
        let vw = w - v * v.dot(w);
        vu.angle(&vw)
    };
    let A = angle(b, a, c);
    let B = angle(c, b, a);
    let C = angle(a, c, b);
    A + B + C - PI // Spherical excess
}
