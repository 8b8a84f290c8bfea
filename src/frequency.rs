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
    Face, Vector3,
};
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest accepted subdivision frequency.
///
/// Frequencies are further limited to meshes whose vertex and face arrays are
/// addressable on the target, see [`Frequency::mesh_bytes`].
pub const MAX_FREQUENCY: u32 = 1 << 16;

/// Validated subdivision frequency, ν ≥ 1.
///
/// Each icosahedron edge is split into ν segments and each face into ν² triangles.
/// Conversion from plain numbers rejects zero, negative, non-integral and
/// non-finite values with [`IcoError::InvalidArgument`].
///
/// ## Examples
/// ~~~
/// use icosphere::Frequency;
/// let nu = Frequency::try_from(4i32).unwrap();
/// assert_eq!(nu.vertex_count(), 162);
/// assert_eq!(nu.face_count(), 320);
/// assert!(Frequency::try_from(0i32).is_err());
/// assert!(Frequency::try_from(2.5f64).is_err());
/// ~~~
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Frequency(u32);

impl Frequency {
    /// Frequency one, i.e. the plain icosahedron
    pub const ONE: Self = Self(1);

    /// Validates `nu` and wraps it
    pub fn new(nu: u32) -> Result<Self> {
        match nu {
            0 => Err(IcoError::invalid(nu, "must be a positive integer")),
            nu if nu > MAX_FREQUENCY => Err(IcoError::invalid(nu, "exceeds maximum frequency")),
            nu if Self::mesh_bytes(nu).is_none() => {
                Err(IcoError::invalid(nu, "mesh does not fit in the address space"))
            }
            nu => Ok(Self(nu)),
        }
    }

    /// Heap bytes of the vertex and face arrays at frequency `nu`.
    ///
    /// `None` if the size overflows `usize` or exceeds `isize::MAX`, the allocation limit.
    /// All counts of a valid [`Frequency`] are therefore computed without overflow.
    pub fn mesh_bytes(nu: u32) -> Option<usize> {
        let nu = usize::try_from(nu).ok()?;
        let squared = nu.checked_mul(nu)?;
        let vertices = squared.checked_mul(10)?.checked_add(2)?;
        let faces = squared.checked_mul(20)?;
        vertices
            .checked_mul(std::mem::size_of::<Vector3>())?
            .checked_add(faces.checked_mul(std::mem::size_of::<Face>())?)
            .filter(|&bytes| bytes <= isize::MAX as usize)
    }

    /// Smallest frequency giving at least `min_vertices` vertices.
    ///
    /// The vertex count is _N_ = 12 + 10(ν+1)(ν-1), so 1, 2, 3, ... give
    /// 12, 42, 92, ... vertices.
    pub fn for_min_vertices(min_vertices: usize) -> Result<Self> {
        let unreachable = || {
            IcoError::invalid(
                min_vertices,
                "requested vertex count exceeds maximum frequency",
            )
        };
        // Initial guess from N = 10ν² + 2, corrected below for rounding
        let guess = (min_vertices.saturating_sub(2) as f64 / 10.0).sqrt().ceil();
        let guess = guess.to_u32().unwrap_or(u32::MAX).clamp(1, MAX_FREQUENCY);
        let mut nu = Self::new(guess).map_err(|_| unreachable())?;
        while nu.0 > 1 && Self(nu.0 - 1).vertex_count() >= min_vertices {
            nu = Self(nu.0 - 1);
        }
        while nu.vertex_count() < min_vertices {
            nu = Self::new(nu.0 + 1).map_err(|_| unreachable())?;
        }
        Ok(nu)
    }

    /// The raw value of ν
    pub fn get(self) -> u32 {
        self.0
    }

    /// Number of unique vertices, 12 + 10(ν+1)(ν-1)
    pub fn vertex_count(self) -> usize {
        let nu = self.0 as usize;
        12 + 10 * (nu + 1) * (nu - 1)
    }

    /// Number of triangular faces, 20ν²
    pub fn face_count(self) -> usize {
        20 * self.squared()
    }

    /// Number of undirected edges, 30ν²
    pub fn edge_count(self) -> usize {
        30 * self.squared()
    }

    /// Number of lattice points sampled on a single base face, (ν+1)(ν+2)/2
    pub fn points_per_face(self) -> usize {
        let nu = self.0 as usize;
        (nu + 1) * (nu + 2) / 2
    }

    fn squared(self) -> usize {
        let nu = self.0 as usize;
        nu * nu
    }
}

impl Default for Frequency {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ν={}", self.0)
    }
}

impl From<Frequency> for u32 {
    fn from(nu: Frequency) -> u32 {
        nu.0
    }
}

macro_rules! impl_try_from_integer {
    ($($t:ty),*) => {
        $(
            impl TryFrom<$t> for Frequency {
                type Error = IcoError;
                fn try_from(nu: $t) -> Result<Self> {
                    if nu <= 0 as $t {
                        return Err(IcoError::invalid(nu, "must be a positive integer"));
                    }
                    let nu = nu
                        .to_u32()
                        .ok_or_else(|| IcoError::invalid(nu, "exceeds maximum frequency"))?;
                    Self::new(nu)
                }
            }
        )*
    };
}

impl_try_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_try_from_float {
    ($($t:ty),*) => {
        $(
            impl TryFrom<$t> for Frequency {
                type Error = IcoError;
                fn try_from(nu: $t) -> Result<Self> {
                    if !nu.is_finite() {
                        return Err(IcoError::invalid(nu, "must be finite"));
                    }
                    if nu.fract() != 0.0 {
                        return Err(IcoError::invalid(nu, "must be an integer"));
                    }
                    if nu <= 0.0 {
                        return Err(IcoError::invalid(nu, "must be a positive integer"));
                    }
                    let nu = nu
                        .to_u32()
                        .ok_or_else(|| IcoError::invalid(nu, "exceeds maximum frequency"))?;
                    Self::new(nu)
                }
            }
        )*
    };
}

impl_try_from_float!(f32, f64);
