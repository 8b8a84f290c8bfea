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

use crate::Vector3;
use rayon::prelude::*;

/// Project vertices radially onto the unit sphere, in place.
///
/// Positions on the icosahedron surface are never zero, so the norm is always positive.
pub fn project_to_unit_sphere(vertices: &mut [Vector3]) {
    vertices.par_iter_mut().for_each(|v| {
        debug_assert!(v.norm_squared() > 0.0);
        v.normalize_mut();
    });
}
