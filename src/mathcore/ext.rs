//! `mathcore::ext` hidden submodule supplies helper newtypes, enums, structs and etc. that are
//! used throughout `ggphysics` crate.
//!

use crate::mathcore::floats::{almost_equal, FloatOperations};
use serde::{Deserialize, Serialize};
use std::{
    f32::consts::{FRAC_PI_2, FRAC_PI_4, TAU},
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

/// [`Angle`] is a newtype that restricts angle values to [0.0; TAU).
/// If given value is not finite, 0.0 will be set as angle value.
///
/// Underlying value is stored in radians, so it is the most precise mode.
///
/// # Example
/// ```rust
/// # use ggphysics::mathcore::Angle;
/// # use std::f32::consts::FRAC_PI_2;
/// let angle: Angle = Angle::from_radians(-FRAC_PI_2);
/// assert_eq!(angle, Angle::from_degrees(270.0));
/// assert_eq!(angle.degrees(), 270.0);
/// assert_eq!(angle.radians(), 3.0 * FRAC_PI_2);
/// ```
///
#[derive(Serialize, Deserialize, Copy, Clone, Debug, Default, PartialOrd)]
pub struct Angle(f32);
impl Angle {
    /// Angle that corresponds to zero.
    ///
    pub const ZERO: Angle = Angle(0.0);
    /// Angle that corresponds to 45 degree angle.
    ///
    pub const DEG45: Angle = Angle(FRAC_PI_4);
    /// Angle that corresponds to 90 degree angle.
    ///
    pub const DEG90: Angle = Angle(FRAC_PI_2);
    /// Angle that corresponds to 180 degree angle.
    ///
    pub const DEG180: Angle = Angle(2.0 * FRAC_PI_2);
    /// Angle that corresponds to 270 degree angle.
    ///
    pub const DEG270: Angle = Angle(3.0 * FRAC_PI_2);

    /// Normalizes given angle (in radians) to [0.0; 2 * PI).
    ///
    fn normalize(angle: f32) -> f32 {
        if angle.is_finite() {
            angle - ((angle / TAU).floor() * TAU)
        } else {
            0.0
        }
    }

    /// Returns angle value in radians.
    ///
    pub fn radians(&self) -> f32 {
        self.0
    }
    /// Returns angle value in degrees.
    ///
    pub fn degrees(&self) -> f32 {
        self.0.to_degrees()
    }

    /// Initializes zeroed angle.
    ///
    pub const fn zero() -> Self {
        Self::ZERO
    }
    /// Initializes angle from radians.
    ///
    /// # Example
    /// ```rust
    /// # use ggphysics::mathcore::Angle;
    /// # use std::f32::consts::FRAC_PI_2;
    /// let angle: Angle = Angle::from_radians(FRAC_PI_2);
    /// assert_eq!(angle.degrees(), 90.0);
    /// ```
    ///
    pub fn from_radians(radians: f32) -> Self {
        Angle(Self::normalize(radians))
    }
    /// Initializes angle from degrees.
    ///
    /// # Example
    /// ```rust
    /// # use ggphysics::mathcore::Angle;
    /// # use std::f32::consts::FRAC_PI_2;
    /// let angle: Angle = Angle::from_degrees(90.0);
    /// assert_eq!(angle.radians(), FRAC_PI_2);
    /// ```
    ///
    pub fn from_degrees(degrees: f32) -> Self {
        Angle::from_radians(degrees.to_radians())
    }

    /// Returns sine of angle.
    ///
    pub fn sin(&self) -> f32 {
        self.0.sin()
    }
    /// Returns cosine of angle.
    ///
    pub fn cos(&self) -> f32 {
        self.0.cos()
    }
    /// Returns sine and cosine of angle packed in tuple.
    ///
    /// # Example
    /// ```rust
    /// # use ggphysics::mathcore::Angle;
    /// let angle: Angle = Angle::from_degrees(90.0);
    /// assert_eq!(angle.sin_cos(), (angle.sin(), angle.cos()));
    /// ```
    ///
    pub fn sin_cos(&self) -> (f32, f32) {
        self.0.sin_cos()
    }
}
impl FloatOperations for Angle {
    fn correct_to(self, digits: i32) -> Self {
        Angle(self.0.correct_to(digits))
    }

    fn round_up_to(self, digits: i32) -> Self {
        Angle(self.0.round_up_to(digits))
    }
}
impl Neg for Angle {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Angle::from_radians(-self.0)
    }
}
impl Add<Self> for Angle {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Angle::from_radians(self.0 + rhs.0)
    }
}
impl Sub<Self> for Angle {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Angle::from_radians(self.0 - rhs.0)
    }
}
impl Mul<f32> for Angle {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self::from_radians(self.0 * rhs)
    }
}
impl Div<f32> for Angle {
    type Output = Self;

    fn div(self, rhs: f32) -> Self::Output {
        Self::from_radians(self.0 / rhs)
    }
}
impl AddAssign<Self> for Angle {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}
impl SubAssign<Self> for Angle {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}
impl MulAssign<f32> for Angle {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}
impl DivAssign<f32> for Angle {
    fn div_assign(&mut self, rhs: f32) {
        *self = *self / rhs;
    }
}
impl PartialEq for Angle {
    fn eq(&self, other: &Self) -> bool {
        almost_equal(self.0, other.0)
    }
}
impl Eq for Angle {}

/// [`Size`] is a newtype that restricts size's value to (0.0; +inf).
/// If given value is not finite or equal to zero, 1.0 will be set as size value.
///
/// # Example
/// ```rust
/// # use ggphysics::mathcore::Size;
/// assert_eq!(Size::from_value(-10.0).get(), 10.0);
/// assert_eq!(Size::from_value(0.0).get(), 1.0);
/// assert_eq!(Size::from_value(0.1).get(), 0.1);
/// ```
///
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialOrd)]
pub struct Size(f32);
impl Size {
    /// Normalizes given size to (0.0; +inf).
    ///
    fn normalize(size: f32) -> f32 {
        if !size.is_finite() || size == 0.0 || size == -0.0 {
            return 1.0;
        }
        size.abs()
    }

    /// Initializes [`Size`] from `f32` value.
    ///
    pub fn from_value(value: f32) -> Self {
        Size(Self::normalize(value))
    }

    /// Returns size value.
    ///
    /// # Example
    /// ```rust
    /// # use ggphysics::mathcore::Size;
    /// let size: Size = Size::from_value(-10.0);
    /// assert_eq!(size.get(), 10.0);
    /// ```
    ///
    pub fn get(&self) -> f32 {
        self.0
    }
}
impl Default for Size {
    /// Default size is the identity scale factor.
    ///
    fn default() -> Self {
        Size(1.0)
    }
}
impl FloatOperations for Size {
    fn correct_to(self, digits: i32) -> Self {
        Size::from_value(self.0.correct_to(digits))
    }

    fn round_up_to(self, digits: i32) -> Self {
        Size::from_value(self.0.round_up_to(digits))
    }
}
impl Add<Self> for Size {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Size::from_value(self.0 + rhs.0)
    }
}
impl Sub<Self> for Size {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Size::from_value(self.0 - rhs.0)
    }
}
impl Mul<Self> for Size {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Size::from_value(self.0 * rhs.0)
    }
}
impl Div<Self> for Size {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Size::from_value(self.0 / rhs.0)
    }
}
impl AddAssign<Self> for Size {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}
impl SubAssign<Self> for Size {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}
impl MulAssign<Self> for Size {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}
impl DivAssign<Self> for Size {
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}
impl PartialEq for Size {
    fn eq(&self, other: &Self) -> bool {
        almost_equal(self.0, other.0)
    }
}
impl Eq for Size {}
