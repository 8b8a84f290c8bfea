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

//! Geodesic icosahedra with integer subdivision frequency.
//!
//! Every face of a regular icosahedron is split into ν² triangles on a barycentric
//! lattice, points shared between faces are merged, and the result is projected onto
//! the unit sphere:
//!
//! 1. [icosahedron](mod@icosahedron): base vertices, faces and edges
//! 2. [`lattice`]: sample points and sub-triangles of a single face
//! 3. [`dedup`]: global vertex indices for points on shared edges and corners
//! 4. [`projection`]: normalization onto the unit sphere
//! 5. [`mesh`]: assembly of the final face list
//!
//! ~~~
//! let mesh = icosphere::icosphere(3).unwrap();
//! assert_eq!(mesh.vertices().len(), 92);
//! assert_eq!(mesh.faces().len(), 180);
//! assert!(mesh.is_closed_manifold());
//! ~~~

pub mod config;
pub mod dedup;
mod error;
mod frequency;
pub mod icosahedron;
mod icosphere;
pub mod lattice;
pub mod mesh;
pub mod projection;
pub use config::IcosphereConfig;
pub use error::{IcoError, Result};
pub use frequency::{Frequency, MAX_FREQUENCY};
pub use icosahedron::icosahedron;
pub use mesh::Mesh;
extern crate pretty_env_logger;
#[macro_use]
extern crate log;

pub type Vector3 = nalgebra::Vector3<f64>;

/// Triangle as three vertex indices
pub type Face = [usize; 3];

pub use icosphere::*;
