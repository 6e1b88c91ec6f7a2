use std::ops::{Add, Sub, Mul, Div};
use std::ops::{AddAssign, SubAssign};
use std::ops::{Deref, DerefMut};

use super::Vector3D;

/// A 3x3 matrix type, stored in row major order.
///
/// Unit cells are stored in this type with one lattice vector per row.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Matrix3([[f64; 3]; 3]);

impl Matrix3 {
    /// Create a new `Matrix3` from the given `data`
    pub const fn new(data: [[f64; 3]; 3]) -> Matrix3 {
        Matrix3(data)
    }

    /// Create a new `Matrix3` with all components set to 0
    pub const fn zero() -> Matrix3 {
        Matrix3([[0.0; 3]; 3])
    }

    /// Create the identity matrix
    pub const fn one() -> Matrix3 {
        Matrix3([
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ])
    }

    /// Get the transposed matrix
    pub fn transposed(&self) -> Matrix3 {
        let m = self;
        Matrix3([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }

    /// Compute the determinant of this matrix
    pub fn determinant(&self) -> f64 {
        let m = self;
        m[0][0] * (m[1][1] * m[2][2] - m[2][1] * m[1][2])
      - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
      + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Compute the inverse of this matrix. The matrix must be invertible,
    /// which should be checked beforehand with `determinant`.
    pub fn inverse(&self) -> Matrix3 {
        let m = self;
        let determinant = self.determinant();
        debug_assert!(determinant != 0.0, "the matrix is not invertible");
        let inv_det = 1.0 / determinant;

        let mut inverse = Matrix3::zero();
        inverse[0][0] = (m[1][1] * m[2][2] - m[2][1] * m[1][2]) * inv_det;
        inverse[0][1] = (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv_det;
        inverse[0][2] = (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv_det;
        inverse[1][0] = (m[1][2] * m[2][0] - m[1][0] * m[2][2]) * inv_det;
        inverse[1][1] = (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv_det;
        inverse[1][2] = (m[1][0] * m[0][2] - m[0][0] * m[1][2]) * inv_det;
        inverse[2][0] = (m[1][0] * m[2][1] - m[2][0] * m[1][1]) * inv_det;
        inverse[2][1] = (m[2][0] * m[0][1] - m[0][0] * m[2][1]) * inv_det;
        inverse[2][2] = (m[0][0] * m[1][1] - m[1][0] * m[0][1]) * inv_det;
        return inverse;
    }

    /// Get the symmetric part of this matrix, `(M + M^T) / 2`
    pub fn symmetrized(&self) -> Matrix3 {
        (self + self.transposed()) / 2.0
    }

    /// Get the rows of this matrix as vectors
    pub fn rows(&self) -> [Vector3D; 3] {
        [self[0].into(), self[1].into(), self[2].into()]
    }
}

impl Deref for Matrix3 {
    type Target = [[f64; 3]; 3];

    #[inline]
    fn deref(&self) -> &[[f64; 3]; 3] {
        &self.0
    }
}

impl DerefMut for Matrix3 {
    #[inline]
    fn deref_mut(&mut self) -> &mut [[f64; 3]; 3] {
        &mut self.0
    }
}

impl From<[[f64; 3]; 3]> for Matrix3 {
    fn from(data: [[f64; 3]; 3]) -> Matrix3 {
        Matrix3(data)
    }
}

impl_arithmetic!(
    Matrix3, Matrix3, Add, add, Matrix3,
    self, other,
    {
        let mut result = Matrix3::zero();
        for i in 0..3 {
            for j in 0..3 {
                result[i][j] = self[i][j] + other[i][j];
            }
        }
        result
    }
);

impl_arithmetic!(
    Matrix3, Matrix3, Sub, sub, Matrix3,
    self, other,
    {
        let mut result = Matrix3::zero();
        for i in 0..3 {
            for j in 0..3 {
                result[i][j] = self[i][j] - other[i][j];
            }
        }
        result
    }
);

// matrix-matrix product
impl_arithmetic!(
    Matrix3, Matrix3, Mul, mul, Matrix3,
    self, other,
    {
        let mut result = Matrix3::zero();
        for i in 0..3 {
            for j in 0..3 {
                for k in 0..3 {
                    result[i][j] += self[i][k] * other[k][j];
                }
            }
        }
        result
    }
);

// matrix-vector product
impl_arithmetic!(
    Matrix3, Vector3D, Mul, mul, Vector3D,
    self, other,
    Vector3D::new(
        self[0][0] * other[0] + self[0][1] * other[1] + self[0][2] * other[2],
        self[1][0] * other[0] + self[1][1] * other[1] + self[1][2] * other[2],
        self[2][0] * other[0] + self[2][1] * other[1] + self[2][2] * other[2],
    )
);

lsh_scal_arithmetic!(
    Matrix3, Mul, mul, Matrix3,
    self, other,
    {
        let mut result = Matrix3::zero();
        for i in 0..3 {
            for j in 0..3 {
                result[i][j] = self[i][j] * other;
            }
        }
        result
    }
);

lsh_scal_arithmetic!(
    Matrix3, Div, div, Matrix3,
    self, other,
    {
        let mut result = Matrix3::zero();
        for i in 0..3 {
            for j in 0..3 {
                result[i][j] = self[i][j] / other;
            }
        }
        result
    }
);

rhs_scal_arithmetic!(
    Matrix3, Mul, mul, Matrix3,
    self, other,
    other * self
);

impl_inplace_arithmetic!(
    Matrix3, Matrix3, AddAssign, add_assign,
    self, other,
    {
        for i in 0..3 {
            for j in 0..3 {
                self[i][j] += other[i][j];
            }
        }
    }
);

impl_inplace_arithmetic!(
    Matrix3, Matrix3, SubAssign, sub_assign,
    self, other,
    {
        for i in 0..3 {
            for j in 0..3 {
                self[i][j] -= other[i][j];
            }
        }
    }
);
