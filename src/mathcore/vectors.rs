//! `mathcore::vectors` submodule implements two-dimensional vectors on a plane which can be used
//! to represent force, speed, acceleration and other things.
//!

use crate::mathcore::floats::{almost_equal, FloatOperations};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, BitXor, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// [`Vector2`] struct represents two-dimensional vector and two-dimensional point with `f32`
/// coordinates on a plane.
///
#[derive(Serialize, Deserialize, Copy, Clone, Debug, Default)]
pub struct Vector2 {
    /// X component of vector.
    ///
    pub x: f32,

    /// Y component of vector.
    ///
    pub y: f32,
}
impl Vector2 {
    /// Initializes vector with zeroes.
    ///
    pub fn zero() -> Self {
        Vector2 { x: 0.0, y: 0.0 }
    }
    /// Initializes vector with ones.
    ///
    pub fn one() -> Self {
        Vector2 { x: 1.0, y: 1.0 }
    }

    /// Returns elements of vector.
    ///
    pub fn elements(&self) -> [f32; 2] {
        [self.x, self.y]
    }
    /// Sets from values to elements of vector.
    ///
    pub fn set(&mut self, elements: [f32; 2]) {
        self.x = elements[0];
        self.y = elements[1];
    }

    /// Applies function to every vector element and returns changed vector.
    ///
    /// Allows to perform custom operations on each vector element.
    ///
    pub fn map(self, f: impl Fn(f32) -> f32) -> Self {
        Vector2 {
            x: f(self.x),
            y: f(self.y),
        }
    }
    /// Combines vectors by applying function on their elements.
    ///
    /// Allows performing operations with 2 vectors.
    ///
    pub fn combine(self, other: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        Vector2 {
            x: f(self.x, other.x),
            y: f(self.y, other.y),
        }
    }

    /// Returns squared magnitude of a vector (vector length).
    ///
    pub fn sqr_magnitude(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }
    /// Returns magnitude of vector.
    ///
    pub fn magnitude(&self) -> f32 {
        self.sqr_magnitude().sqrt()
    }

    /// Returns new vector that is normalized.
    ///
    /// # Example
    /// ```rust
    /// # use ggphysics::mathcore::vectors::Vector2;
    /// let vector: Vector2 = Vector2 { x: 3.0, y: 4.0 }.normalized();
    /// assert_eq!(vector, Vector2 { x: 0.6, y: 0.8 });
    /// ```
    ///
    pub fn normalized(self) -> Self {
        self / self.magnitude()
    }
    /// Returns new vector, which magnitude is clamped to max_magnitude.
    ///
    pub fn clamped_magnitude(self, max_magnitude: f32) -> Self {
        let magnitude: f32 = self.magnitude();
        self * magnitude.min(max_magnitude) / magnitude
    }

    /// Linearly interpolates between vectors a and b by t.
    ///
    /// t will be clamped between [0.0; 1.0].
    ///
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t: f32 = t.clamp(0.0, 1.0);
        self * t + other * (1.0 - t)
    }

    /// Returns vector that is made from the largest components of two vectors.
    ///
    pub fn max(self, other: Self) -> Self {
        self.combine(other, |a, b| a.max(b))
    }
    /// Returns vector that is made from the smallest components of two vectors.
    ///
    pub fn min(self, other: Self) -> Self {
        self.combine(other, |a, b| a.min(b))
    }

    /// Multiplies two vectors component-wise.
    ///
    pub fn scale(self, other: Self) -> Self {
        self.combine(other, |a, b| a * b)
    }

    /// Performs dot product operation on two vectors.
    ///
    /// # Example
    /// ```rust
    /// # use ggphysics::mathcore::vectors::Vector2;
    /// let (a, b): (Vector2, Vector2) = (Vector2 { x: 1.0, y: 2.0 }, Vector2 { x: 3.0, y: 4.0 });
    /// assert_eq!(a.dot_product(b), 11.0);
    /// ```
    ///
    pub fn dot_product(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }
    /// Returns scalar that represents cross product of two-dimensional vectors.
    ///
    pub fn cross_product(self, other: Self) -> f32 {
        (self.x * other.y) - (self.y * other.x)
    }

    /// Returns vector that is perpendicular to this one, obtained by counterclockwise rotation
    /// for 90 degrees.
    ///
    /// Perpendicular of a polygon edge that is traversed clockwise is its outward normal.
    ///
    /// # Example
    /// ```rust
    /// # use ggphysics::mathcore::vectors::Vector2;
    /// let vector: Vector2 = Vector2 { x: 1.0, y: 0.0 };
    /// assert_eq!(vector.perpendicular(), Vector2 { x: 0.0, y: 1.0 });
    /// ```
    ///
    pub fn perpendicular(self) -> Self {
        Vector2 {
            x: -self.y,
            y: self.x,
        }
    }
}
impl FloatOperations for Vector2 {
    /// Constructs new vector by correcting every vector component that may be wronged by float
    /// operations.
    ///
    fn correct_to(self, digits: i32) -> Self {
        self.map(|elem| elem.correct_to(digits))
    }

    /// Constructs new vector by rounding every vector component to given amount of digits after
    /// floating point.
    ///
    fn round_up_to(self, digits: i32) -> Self {
        self.map(|elem| elem.round_up_to(digits))
    }
}
impl PartialEq for Vector2 {
    fn eq(&self, other: &Self) -> bool {
        almost_equal(self.x, other.x) && almost_equal(self.y, other.y)
    }
}
impl Eq for Vector2 {}
impl From<[f32; 2]> for Vector2 {
    fn from(arr: [f32; 2]) -> Self {
        Vector2 {
            x: arr[0],
            y: arr[1],
        }
    }
}
impl Neg for Vector2 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.map(|a| -a)
    }
}
impl Add<Self> for Vector2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.combine(rhs, |a, b| a + b)
    }
}
impl Sub<Self> for Vector2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.combine(rhs, |a, b| a - b)
    }
}
impl Mul<Self> for Vector2 {
    type Output = f32;

    /// Performs dot product operation on two vectors.
    ///
    fn mul(self, other: Self) -> Self::Output {
        self.dot_product(other)
    }
}
impl BitXor for Vector2 {
    type Output = f32;

    /// Returns scalar that represents cross product of two-dimensional vectors.
    ///
    fn bitxor(self, rhs: Self) -> Self::Output {
        self.cross_product(rhs)
    }
}
impl Mul<f32> for Vector2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        self.map(|a| a * rhs)
    }
}
impl Div<f32> for Vector2 {
    type Output = Self;

    fn div(self, rhs: f32) -> Self::Output {
        self.map(|a| a / rhs)
    }
}
impl AddAssign<Self> for Vector2 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}
impl SubAssign<Self> for Vector2 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}
impl MulAssign<f32> for Vector2 {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}
impl DivAssign<f32> for Vector2 {
    fn div_assign(&mut self, rhs: f32) {
        *self = *self / rhs;
    }
}

/// `Point` type alias conveys point-on-a-plane meaning of [`Vector2`].
///
pub type Point = Vector2;
/// `Vertex` type alias conveys polygon-corner meaning of [`Vector2`].
///
pub type Vertex = Vector2;

#[cfg(test)]
mod tests {
    use super::Vector2;

    #[test]
    fn vector_algebra() {
        let (a, b): (Vector2, Vector2) = (Vector2 { x: 1.0, y: 2.0 }, Vector2 { x: 3.0, y: -1.0 });

        assert_eq!(a + b, Vector2 { x: 4.0, y: 1.0 });
        assert_eq!(a - b, Vector2 { x: -2.0, y: 3.0 });
        assert_eq!(-a, Vector2 { x: -1.0, y: -2.0 });
        assert_eq!(a * 2.0, Vector2 { x: 2.0, y: 4.0 });
        assert_eq!(a / 2.0, Vector2 { x: 0.5, y: 1.0 });

        assert_eq!(a * b, 1.0);
        assert_eq!(a ^ b, -7.0);
    }

    #[test]
    fn vector_geometry() {
        let vector: Vector2 = Vector2 { x: 3.0, y: 4.0 };

        assert_eq!(vector.sqr_magnitude(), 25.0);
        assert_eq!(vector.magnitude(), 5.0);
        assert_eq!(vector.normalized().magnitude(), 1.0);
        assert_eq!(vector.clamped_magnitude(2.5), Vector2 { x: 1.5, y: 2.0 });

        let perpendicular: Vector2 = vector.perpendicular();
        assert_eq!(perpendicular, Vector2 { x: -4.0, y: 3.0 });
        assert_eq!(vector.dot_product(perpendicular), 0.0);
    }
}
