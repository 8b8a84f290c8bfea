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

//! Barycentric lattice on a single triangle.
//!
//! With corners (A, B, C) and frequency ν, lattice point (i, j) sits at
//! barycentric weights (1 - (i+j)/ν, i/ν, j/ν):
//! ~~~text
//!        C (0,ν)
//!        | \
//!        |   \
//!      j |  ◺ ◸ \
//!        |  ◺ ◸ ◺ \
//!        A ------- B (ν,0)
//!            i
//! ~~~
//! Points are stored row by row (i = 0..=ν, then j = 0..=ν-i).

use crate::{Frequency, Vector3};

/// Lattice coordinates (i, j) of a sample point
pub type LatticeCoord = (u32, u32);

/// Sample point on a face lattice
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatticePoint {
    pub i: u32,
    pub j: u32,
    /// Position on the flat face (not yet projected)
    pub position: Vector3,
}

/// All lattice points of one base face, in row-major order
#[derive(Clone, Debug)]
pub struct FaceLattice {
    nu: Frequency,
    points: Vec<LatticePoint>,
}

impl FaceLattice {
    /// Sample the lattice on the triangle with corners `[a, b, c]`.
    pub fn sample(corners: [Vector3; 3], nu: Frequency) -> Self {
        let [a, b, c] = corners;
        let n = nu.get();
        let weight = |k: u32| k as f64 / n as f64;
        let mut points = Vec::with_capacity(nu.points_per_face());
        for i in 0..=n {
            for j in 0..=n - i {
                // k/ν is exact for k = 0 and k = ν, so corners are reproduced bit for bit
                let (wa, wb, wc) = (weight(n - i - j), weight(i), weight(j));
                points.push(LatticePoint {
                    i,
                    j,
                    position: a * wa + b * wb + c * wc,
                });
            }
        }
        debug_assert_eq!(points.len(), nu.points_per_face());
        Self { nu, points }
    }

    pub fn frequency(&self) -> Frequency {
        self.nu
    }

    pub fn points(&self) -> &[LatticePoint] {
        &self.points
    }

    /// Point at lattice coordinate (i, j)
    pub fn get(&self, i: u32, j: u32) -> Option<&LatticePoint> {
        (i + j <= self.nu.get()).then(|| &self.points[local_index(self.nu, i, j)])
    }
}

/// Position of (i, j) in the row-major lattice enumeration.
///
/// Row _i_ holds ν + 1 - _i_ points, so rows before _i_ hold _i_(ν+1) - _i_(_i_-1)/2.
pub fn local_index(nu: Frequency, i: u32, j: u32) -> usize {
    let (n, i, j) = (nu.get() as usize, i as usize, j as usize);
    debug_assert!(i + j <= n);
    i * (n + 1) - i * i.saturating_sub(1) / 2 + j
}

/// Corners of the ν² sub-triangles of a face, in lattice coordinates.
///
/// Every triangle has the same winding as the parent (A, B, C). Triangles are listed
/// row by row; at each (i, j) the "up" triangle `(i,j) (i+1,j) (i,j+1)` comes first,
/// followed by the "down" triangle `(i+1,j) (i+1,j+1) (i,j+1)` when it exists.
pub fn sub_triangles(nu: Frequency) -> Vec<[LatticeCoord; 3]> {
    let n = nu.get();
    let mut triangles = Vec::with_capacity(nu.face_count() / 20);
    for i in 0..n {
        for j in 0..n - i {
            triangles.push([(i, j), (i + 1, j), (i, j + 1)]);
            if i + j + 1 < n {
                triangles.push([(i + 1, j), (i + 1, j + 1), (i, j + 1)]);
            }
        }
    }
    debug_assert_eq!(triangles.len(), nu.face_count() / 20);
    triangles
}
