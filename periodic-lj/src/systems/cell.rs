//! The `UnitCell` type represents the periodically repeated box enclosing a
//! configuration.
use std::convert::TryFrom;

use crate::{Error, Matrix3, Vector3D};

/// Relative tolerance on the determinant of the cell matrix below which a
/// cell is considered to be singular.
const SINGULAR_TOLERANCE: f64 = 1e-10;

/// An `UnitCell` defines the periodic boundaries of a configuration.
///
/// The cell is stored as a matrix where each row is one of the lattice
/// vectors `a`, `b` and `c`. Any invertible matrix is accepted, including
/// left-handed ones.
#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub struct UnitCell {
    /// Unit cell matrix
    matrix: Matrix3,
    /// Transpose of the unit cell matrix, cached from matrix
    transpose: Matrix3,
    /// Inverse of the transpose of the unit cell matrix, cached from matrix
    inverse: Matrix3,
}

impl TryFrom<Matrix3> for UnitCell {
    type Error = Error;

    fn try_from(matrix: Matrix3) -> Result<UnitCell, Error> {
        UnitCell::new(matrix)
    }
}

impl UnitCell {
    /// Create a new unit cell from the given `matrix`, containing one lattice
    /// vector per row. This fails if the matrix is singular (or nearly
    /// singular) or contains non-finite values.
    pub fn new(matrix: Matrix3) -> Result<UnitCell, Error> {
        let [a, b, c] = matrix.rows();
        let scale = a.norm() * b.norm() * c.norm();
        let determinant = matrix.determinant();

        // also catches NaN
        if !(determinant.abs() > SINGULAR_TOLERANCE * scale) {
            return Err(Error::LinearAlgebra(format!(
                "the unit cell matrix is singular (determinant = {})", determinant
            )));
        }

        let transpose = matrix.transposed();
        return Ok(UnitCell {
            matrix: matrix,
            transpose: transpose,
            inverse: transpose.inverse(),
        });
    }

    /// Create an orthorhombic unit cell, with side lengths `a, b, c`.
    pub fn orthorhombic(a: f64, b: f64, c: f64) -> Result<UnitCell, Error> {
        if !(a > 0.0 && b > 0.0 && c > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "cell lengths must be positive, got {}, {}, {}", a, b, c
            )));
        }

        UnitCell::new(Matrix3::new([
            [a, 0.0, 0.0],
            [0.0, b, 0.0],
            [0.0, 0.0, c]
        ]))
    }

    /// Create a cubic unit cell, with side lengths `length, length, length`.
    pub fn cubic(length: f64) -> Result<UnitCell, Error> {
        UnitCell::orthorhombic(length, length, length)
    }

    /// Create a triclinic unit cell, with side lengths `a, b, c` and angles
    /// `alpha, beta, gamma` (in degrees).
    pub fn triclinic(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Result<UnitCell, Error> {
        if !(a > 0.0 && b > 0.0 && c > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "cell lengths must be positive, got {}, {}, {}", a, b, c
            )));
        }

        let cos_alpha = alpha.to_radians().cos();
        let cos_beta = beta.to_radians().cos();
        let (sin_gamma, cos_gamma) = gamma.to_radians().sin_cos();

        let b_x = b * cos_gamma;
        let b_y = b * sin_gamma;

        let c_x = c * cos_beta;
        let c_y = c * (cos_alpha - cos_beta * cos_gamma) / sin_gamma;
        let c_z = f64::sqrt(c * c - c_y * c_y - c_x * c_x);

        return UnitCell::new(Matrix3::new([
            [a,   0.0, 0.0],
            [b_x, b_y, 0.0],
            [c_x, c_y, c_z],
        ]));
    }

    /// Get the matricial representation of the unit cell
    pub fn matrix(&self) -> Matrix3 {
        self.matrix
    }

    /// Get the volume of the cell
    pub fn volume(&self) -> f64 {
        self.matrix.determinant().abs()
    }

    /// Get the distances between opposite faces of the unit cell. Along each
    /// lattice direction, this is the inverse of the norm of the
    /// corresponding column of the inverse cell matrix.
    pub fn distances_between_faces(&self) -> Vector3D {
        let [a, b, c] = self.matrix.rows();
        // Plans normal vectors
        let na = (b ^ c).normalized();
        let nb = (c ^ a).normalized();
        let nc = (a ^ b).normalized();

        Vector3D::new(f64::abs(na * a), f64::abs(nb * b), f64::abs(nc * c))
    }

    /// Get the cell deformed by the given `strain`: each lattice vector `v`
    /// becomes `(I + strain) v`.
    pub fn strained(&self, strain: &Matrix3) -> Result<UnitCell, Error> {
        let deformation = Matrix3::one() + strain;
        UnitCell::new(self.matrix * deformation.transposed())
    }
}

/// Geometric operations using periodic boundary conditions
impl UnitCell {
    /// Get the fractional representation of the `vector` in this cell
    pub fn fractional(&self, vector: Vector3D) -> Vector3D {
        // this needs to use the inverse of the transpose of the matrix, since
        // we only have code to multiply a vector by a matrix on the left
        return self.inverse * vector;
    }

    /// Get the Cartesian representation of the `fractional` vector in this
    /// cell
    pub fn cartesian(&self, fractional: Vector3D) -> Vector3D {
        return self.transpose * fractional;
    }
}
