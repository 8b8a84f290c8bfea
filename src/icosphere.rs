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
    dedup::VertexDeduplicator,
    error::{IcoError, Result},
    icosahedron::{base_vertices, BaseEdges, BASE_FACES, BASE_VERTEX_COUNT},
    lattice::FaceLattice,
    mesh::{self, Mesh},
    projection::project_to_unit_sphere,
    Frequency,
};
use get_size::GetSize;
use rayon::prelude::*;

/// Make a geodesic icosahedron with subdivision frequency `nu`.
///
/// Each edge of a regular icosahedron is split into ν segments and each face into ν²
/// triangles, whereafter all vertices are projected onto the unit sphere.
/// The number of vertices is _N_ = 12 + 10(ν+1)(ν-1) whereby ν = 1, 2, 3, ... give
/// 12, 42, 92, ... vertices, and the number of faces is 20ν².
/// In contrast to recursive subdivision, which quadruples the face count in each step,
/// any mesh resolution in between is reachable.
///
/// `nu` may be any integer or float type; zero, negative, fractional and non-finite values
/// fail with [`IcoError::InvalidArgument`] before anything is allocated.
///
/// ## Ordering
///
/// - Vertices 0..12 are the base icosahedron vertices (see [`crate::icosahedron`]).
/// - Remaining vertices are numbered on first sight, walking base faces in order and
///   each face lattice row by row.
/// - Faces are grouped by base face, ν² per base face, wound like the parent face.
///
/// ## Further reading
///
/// - <https://en.wikipedia.org/wiki/Geodesic_polyhedron>
/// - <https://danielsieger.com/blog/2021/03/27/generating-spheres.html>
///
/// ## Examples
/// ~~~
/// let mesh = icosphere::icosphere(2).unwrap();
/// assert_eq!(mesh.vertices().len(), 42);
/// assert_eq!(mesh.faces().len(), 80);
/// assert!(icosphere::icosphere(0).is_err());
/// ~~~
pub fn icosphere<F>(nu: F) -> Result<Mesh>
where
    F: TryInto<Frequency>,
    IcoError: From<F::Error>,
{
    let nu: Frequency = nu.try_into()?;
    Ok(subdivide(nu))
}

/// Make icosphere with at least `min_vertices` surface points (vertices).
///
/// The frequency `nu` is raised to the smallest value giving at least `min_vertices`
/// vertices; it is never lowered.
///
/// ## Examples
/// ~~~
/// let mesh = icosphere::icosphere_with_min_vertices(1, 1000).unwrap();
/// assert_eq!(mesh.vertices().len(), 1002);
/// let mesh = icosphere::icosphere_with_min_vertices(3, 20).unwrap();
/// assert_eq!(mesh.vertices().len(), 92);
/// ~~~
pub fn icosphere_with_min_vertices<F>(nu: F, min_vertices: usize) -> Result<Mesh>
where
    F: TryInto<Frequency>,
    IcoError: From<F::Error>,
{
    let nu: Frequency = nu.try_into()?;
    let nu = nu.max(Frequency::for_min_vertices(min_vertices)?);
    Ok(subdivide(nu))
}

/// Run the subdivision pipeline for a validated frequency
pub fn subdivide(nu: Frequency) -> Mesh {
    debug!(
        "Creating icosphere with {}, {} vertices, {} faces",
        nu,
        nu.vertex_count(),
        nu.face_count()
    );
    let base = base_vertices();
    let edges = BaseEdges::new();

    // Faces are independent until their boundaries are merged
    let lattices: Vec<FaceLattice> = BASE_FACES
        .par_iter()
        .map(|face| FaceLattice::sample(face.map(|v| base[v]), nu))
        .collect();

    // Sequential so that index assignment follows the fixed face/lattice order
    let mut dedup = VertexDeduplicator::new(nu, &base, &edges);
    let face_maps: Vec<Vec<usize>> = BASE_FACES
        .iter()
        .zip(&lattices)
        .enumerate()
        .map(|(face, (corners, lattice))| {
            lattice
                .points()
                .iter()
                .map(|point| dedup.resolve(face, *corners, point))
                .collect()
        })
        .collect();
    drop(lattices);

    // Base vertices are unit length already
    let mut vertices = dedup.finish();
    project_to_unit_sphere(&mut vertices[BASE_VERTEX_COUNT..]);

    let mesh = mesh::assemble(vertices, &face_maps, nu);
    trace!(
        "Icosphere {} occupies {:.1} kB",
        nu,
        mesh.get_size() as f64 / 1024.0
    );
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{icosahedron, mesh::UNIT_SPHERE_AREA};
    use approx::assert_relative_eq;
    use itertools::Itertools;
    use lazy_static::lazy_static;

    lazy_static! {
        /// Frequency 32 is shared by several tests
        static ref NU32: Mesh = icosphere(32).unwrap();
    }

    #[test]
    fn test_counts() {
        for nu in 1..=12usize {
            let mesh = icosphere(nu).unwrap();
            assert_eq!(mesh.vertices().len(), 12 + 10 * (nu + 1) * (nu - 1));
            assert_eq!(mesh.faces().len(), 20 * nu * nu);
            assert_eq!(mesh.edges().len(), 30 * nu * nu);
        }
        let mesh = icosphere(2).unwrap();
        assert_eq!((mesh.vertices().len(), mesh.faces().len()), (42, 80));
        assert_eq!((NU32.vertices().len(), NU32.faces().len()), (10242, 20480));
    }

    #[test]
    fn test_unit_norm() {
        for nu in [1, 2, 3, 5, 10] {
            let mesh = icosphere(nu).unwrap();
            for v in mesh.vertices() {
                assert_relative_eq!(v.norm(), 1.0, epsilon = 1e-9);
            }
        }
        for v in NU32.vertices() {
            assert_relative_eq!(v.norm(), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_closed_manifold() {
        for nu in [1, 2, 3, 4, 7] {
            assert!(icosphere(nu).unwrap().is_closed_manifold());
        }
        assert!(NU32.is_closed_manifold());
    }

    #[test]
    fn test_no_coincident_vertices() {
        // Nearest neighbour distance is about 1.1/ν; rounding to 1e-6 must keep all apart
        for nu in [2, 3, 8] {
            let mesh = icosphere(nu).unwrap();
            let unique = mesh
                .vertices()
                .iter()
                .map(|v| v.map(|x| (x * 1e6).round() as i64))
                .map(|v| (v.x, v.y, v.z))
                .unique()
                .count();
            assert_eq!(unique, mesh.vertices().len());
        }
    }

    #[test]
    fn test_outward_winding() {
        for mesh in [icosphere(3).unwrap(), NU32.clone()] {
            for (index, normal) in mesh.face_normals().iter().enumerate() {
                let [a, b, c] = mesh.triangle(index);
                assert!(normal.dot(&(a + b + c)) > 0.0);
            }
        }
    }

    #[test]
    fn test_base_icosahedron() {
        assert_eq!(icosphere(1).unwrap(), icosahedron());
        // Base vertices keep their index at any frequency
        let base = icosahedron();
        let mesh = icosphere(5).unwrap();
        for (v, w) in base.vertices().iter().zip(mesh.vertices()) {
            assert_relative_eq!(*v, *w, epsilon = 1e-15);
        }
        // The corner sub-triangles of each base face touch the base corners
        for (f, [a, _, _]) in base.faces().iter().enumerate() {
            assert_eq!(mesh.faces()[f * 25][0], *a);
        }
    }

    #[test]
    fn test_frequency_two() {
        // Each new vertex is the projected midpoint of a base edge
        let base = icosahedron();
        let mesh = icosphere(2).unwrap();
        let midpoints = base
            .edges()
            .iter()
            .map(|[u, v]| (base.vertices()[*u] + base.vertices()[*v]).normalize())
            .collect_vec();
        for vertex in &mesh.vertices()[12..] {
            let matches = midpoints
                .iter()
                .filter(|m| (*m - vertex).norm() < 1e-12)
                .count();
            assert_eq!(matches, 1);
        }
        // Centre triangle of base face 0 = [0, 5, 1] joins the three edge midpoints
        let [a, b, c] = mesh.faces()[1];
        let expected = [[0, 5], [1, 5], [0, 1]]
            .map(|[u, v]| (base.vertices()[u] + base.vertices()[v]).normalize());
        assert_relative_eq!(mesh.vertices()[a], expected[0], epsilon = 1e-12);
        assert_relative_eq!(mesh.vertices()[b], expected[1], epsilon = 1e-12);
        assert_relative_eq!(mesh.vertices()[c], expected[2], epsilon = 1e-12);
    }

    #[test]
    fn test_deterministic() {
        for nu in [1, 4, 9] {
            assert_eq!(icosphere(nu).unwrap(), icosphere(nu).unwrap());
        }
        assert_eq!(*NU32, icosphere(32).unwrap());
    }

    #[test]
    fn test_invalid_argument() {
        assert!(icosphere(0).unwrap_err().is_invalid_argument());
        assert!(icosphere(-3).unwrap_err().is_invalid_argument());
        assert!(icosphere(2.5).unwrap_err().is_invalid_argument());
        assert!(icosphere(f64::NAN).is_err());
        assert!(icosphere_with_min_vertices(0, 100).is_err());
        assert!(icosphere_with_min_vertices(1, usize::MAX).is_err());
        assert_eq!(icosphere(3.0).unwrap(), icosphere(3).unwrap());
        assert_eq!(
            icosphere(Frequency::new(4).unwrap()).unwrap(),
            icosphere(4u64).unwrap()
        );
    }

    #[test]
    fn test_min_vertices() {
        let mesh = icosphere_with_min_vertices(1, 2562).unwrap();
        assert_eq!(mesh.vertices().len(), 2562);
        let mesh = icosphere_with_min_vertices(1, 2563).unwrap();
        assert_eq!(mesh.vertices().len(), 2892);
        let mesh = icosphere_with_min_vertices(10, 12).unwrap();
        assert_eq!(mesh.vertices().len(), 1002);
    }

    #[test]
    fn test_areas() {
        let mesh = icosphere(4).unwrap();
        let total_area: f64 = mesh.spherical_face_areas().iter().sum();
        assert_relative_eq!(total_area, UNIT_SPHERE_AREA, epsilon = 1e-9);

        // Five faces meet at a base vertex, six elsewhere
        let weights = icosphere(2).unwrap().vertex_weights();
        let (min_weight, max_weight) = weights.iter().copied().minmax().into_option().unwrap();
        assert_relative_eq!(min_weight, 0.8327133088825825, epsilon = 1e-9);
        assert_relative_eq!(max_weight, 1.0669146764469692, epsilon = 1e-9);

        let weights = NU32.vertex_weights();
        let mean_weight = weights.iter().sum::<f64>() / weights.len() as f64;
        let (min_weight, max_weight) = weights.iter().copied().minmax().into_option().unwrap();
        assert_relative_eq!(mean_weight, 1.0, epsilon = 1e-9);
        // Pentagonal base vertices get the smallest weight
        assert!(min_weight > 0.5 && max_weight < 1.5);
        assert!(weights[..12].iter().all(|w| (w - min_weight).abs() < 1e-9));
    }

    #[test]
    fn test_hexasphere_counts() {
        // hexasphere counts subdivisions as ν - 1
        for subdivisions in 0..6 {
            let reference = hexasphere::Subdivided::<(), hexasphere::shapes::IcoSphereBase>::new(
                subdivisions,
                |_| (),
            );
            let mesh = icosphere(subdivisions + 1).unwrap();
            assert_eq!(mesh.vertices().len(), reference.raw_points().len());
            assert_eq!(mesh.faces().len() * 3, reference.get_all_indices().len());
        }
    }
}
