//! `mathcore::matrices` submodule implements 3x3 matrices which can be used to apply
//! transformations on vectors.
//!

use crate::mathcore::{
    floats::{almost_equal, FloatOperations},
    vectors::Vector2,
};
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut, Mul, MulAssign};

/// [`Matrix3x3`] struct implements linear algebra functions that are needed to combine and apply
/// plane transformations.
///
/// 3x3 matrices operate on homogeneous coordinates - two-dimensional vectors are extended with
/// third `1.0` component, which allows translation to be expressed as matrix multiplication.
///
#[derive(Serialize, Deserialize, Copy, Clone, Debug)]
pub struct Matrix3x3 {
    /// Underlying array.
    ///
    arr: [[f32; 3]; 3],
}
impl Matrix3x3 {
    /// Initializes matrix with zeroes.
    ///
    /// # Example
    /// ```rust
    /// # use ggphysics::mathcore::matrices::Matrix3x3;
    /// let matrix: Matrix3x3 = Matrix3x3::zero();
    /// assert_eq!(matrix.as_array(), [[0.0; 3]; 3]);
    /// ```
    ///
    pub fn zero() -> Self {
        Matrix3x3 { arr: [[0.0; 3]; 3] }
    }
    /// Initializes identity matrix.
    ///
    /// # Example
    /// ```rust
    /// # use ggphysics::mathcore::matrices::Matrix3x3;
    /// let matrix: Matrix3x3 = Matrix3x3::identity();
    /// assert_eq!(matrix.as_array(),
    ///     [[1.0, 0.0, 0.0],
    ///      [0.0, 1.0, 0.0],
    ///      [0.0, 0.0, 1.0]]
    /// );
    /// ```
    ///
    pub fn identity() -> Self {
        let mut matrix: Matrix3x3 = Matrix3x3::zero();
        for i in 0..3 {
            matrix[i][i] = 1.0;
        }
        matrix
    }

    /// Returns matrix as an array.
    ///
    pub fn as_array(&self) -> [[f32; 3]; 3] {
        self.arr
    }

    /// Applies function to every matrix element and returns changed matrix.
    ///
    /// Allows to perform custom operations on each matrix element.
    ///
    pub fn map(self, f: impl Fn(f32) -> f32) -> Matrix3x3 {
        let mut matrix: Matrix3x3 = Matrix3x3::zero();
        for r in 0..3 {
            for c in 0..3 {
                matrix[r][c] = f(self[r][c]);
            }
        }
        matrix
    }

    /// Applies transformation that is encoded in this matrix to a vector.
    ///
    /// Vector is treated as a point in homogeneous coordinates (third component is `1.0`).
    ///
    /// # Example
    /// ```rust
    /// # use ggphysics::mathcore::matrices::Matrix3x3;
    /// # use ggphysics::mathcore::vectors::Vector2;
    /// let matrix: Matrix3x3 = Matrix3x3::identity();
    /// let point: Vector2 = Vector2 { x: 1.0, y: 2.0 };
    /// assert_eq!(matrix.apply_to(point), point);
    /// ```
    ///
    pub fn apply_to(&self, vector: Vector2) -> Vector2 {
        Vector2 {
            x: self[0][0] * vector.x + self[0][1] * vector.y + self[0][2],
            y: self[1][0] * vector.x + self[1][1] * vector.y + self[1][2],
        }
    }
}
impl From<[[f32; 3]; 3]> for Matrix3x3 {
    fn from(arr: [[f32; 3]; 3]) -> Self {
        Matrix3x3 { arr }
    }
}
impl Index<usize> for Matrix3x3 {
    type Output = [f32; 3];

    fn index(&self, index: usize) -> &Self::Output {
        &self.arr[index]
    }
}
impl IndexMut<usize> for Matrix3x3 {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.arr[index]
    }
}
impl Mul<Self> for Matrix3x3 {
    type Output = Self;

    /// Performs matrix multiplication.
    ///
    /// # Example
    /// ```rust
    /// # use ggphysics::mathcore::matrices::Matrix3x3;
    /// let matrix: Matrix3x3 = Matrix3x3::from([
    ///     [1.0, 2.0, 0.0],
    ///     [3.0, 4.0, 0.0],
    ///     [0.0, 0.0, 1.0],
    /// ]);
    /// assert_eq!((Matrix3x3::identity() * matrix).as_array(), matrix.as_array());
    /// ```
    ///
    fn mul(self, rhs: Self) -> Self::Output {
        let mut matrix: Matrix3x3 = Matrix3x3::zero();
        for r in 0..3 {
            for c in 0..3 {
                for (k, row) in rhs.arr.iter().enumerate() {
                    matrix[r][c] += self[r][k] * row[c];
                }
            }
        }
        matrix
    }
}
impl MulAssign<Self> for Matrix3x3 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}
impl FloatOperations for Matrix3x3 {
    fn correct_to(self, digits: i32) -> Self {
        self.map(|elem| elem.correct_to(digits))
    }

    fn round_up_to(self, digits: i32) -> Self {
        self.map(|elem| elem.round_up_to(digits))
    }
}
impl PartialEq for Matrix3x3 {
    fn eq(&self, other: &Self) -> bool {
        (0..3).all(|r| (0..3).all(|c| almost_equal(self[r][c], other[r][c])))
    }
}
impl Eq for Matrix3x3 {}
