//! `mathcore::transforms` submodule implements enums and functions which use transformation
//! matrices to perform translation, rotation and scaling operations on objects. This module
//! also defines traits that provide transforming interfaces to objects.
//!
//! The [`Transformable`] super-trait is the capability which physics bodies require from the
//! surrounding composition layer - position, scalar rotation and two-dimensional scale.
//! [`Transform2D`] is the plain implementor of that capability.
//!

use crate::mathcore::{
    matrices::Matrix3x3,
    vectors::{Point, Vector2},
    {Angle, Size},
};
use serde::{Deserialize, Serialize};

/// [`Transform`] struct-like enum represents 3 basic matrix transformations.
///
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transform {
    /// Translation moves an object along given vector.
    ///
    Translation {
        /// Vector along which object will be translated.
        ///
        vector: Vector2,
    },

    /// Rotation operation rotates the original object's coordinate system for the given angle.
    ///
    Rotation {
        /// Angle for which coordinate system will be rotated.
        ///
        angle: Angle,
    },

    /// Scaling transform changes the size of an object by expanding or contracting all vertices
    /// along axes by given scalar values.
    ///
    Scaling {
        /// Size scaling factor.
        ///
        size_scale: (Size, Size),
    },
}
impl Transform {
    /// Constructs corresponding transformation matrix by using values.
    ///
    /// # Example
    /// ```rust
    /// # use ggphysics::mathcore::transforms::Transform;
    /// # use ggphysics::mathcore::matrices::Matrix3x3;
    /// # use ggphysics::mathcore::vectors::Vector2;
    /// let transform: Transform = Transform::Translation { vector: Vector2 { x: 2.0, y: 3.0 } };
    /// let matrix: Matrix3x3 = transform.matrix();
    /// assert_eq!(matrix.as_array(),
    ///     [[1.0, 0.0, 2.0],
    ///      [0.0, 1.0, 3.0],
    ///      [0.0, 0.0, 1.0]]
    /// );
    /// let point: Vector2 = Vector2 { x: 0.0, y: 2.0 };
    /// assert_eq!(matrix.apply_to(point), Vector2 { x: 2.0, y: 5.0 });
    /// ```
    ///
    pub fn matrix(self) -> Matrix3x3 {
        let mut matrix: Matrix3x3 = Matrix3x3::identity();
        match self {
            Self::Translation { vector } => {
                matrix[0][2] = vector.x;
                matrix[1][2] = vector.y;
            }
            Self::Rotation { angle } => {
                let (sin, cos): (f32, f32) = angle.sin_cos();
                matrix[0][0] = cos;
                matrix[0][1] = -sin;
                matrix[1][0] = sin;
                matrix[1][1] = cos;
            }
            Self::Scaling { size_scale } => {
                matrix[0][0] = size_scale.0.get();
                matrix[1][1] = size_scale.1.get();
            }
        };
        matrix
    }

    /// Combines given transforms by using dot product.
    ///
    /// This function automatically reverses the order, so if you need to combine transforms
    /// `A -> B -> C` just pass them in that order (matrices multiplication will be performed in
    /// order `C * B * A`).
    ///
    /// # Example
    /// ```rust
    /// # use ggphysics::mathcore::{Angle, Size, vectors::Vector2, transforms::Transform, matrices::Matrix3x3};
    /// let scaling: Transform = Transform::Scaling {
    ///     size_scale: (Size::from_value(2.0), Size::from_value(2.0)),
    /// };
    /// let translation: Transform = Transform::Translation { vector: Vector2 { x: 3.0, y: 2.0 } };
    ///
    /// let matrix: Matrix3x3 = Transform::combine([scaling, translation].into_iter());
    /// assert_eq!(matrix.apply_to(Vector2 { x: 1.0, y: 1.0 }), Vector2 { x: 5.0, y: 4.0 });
    /// ```
    ///
    pub fn combine(transforms: impl DoubleEndedIterator<Item = Transform>) -> Matrix3x3 {
        transforms
            .rev()
            .fold(Matrix3x3::identity(), |acc, transform| {
                acc * transform.matrix()
            })
    }
}

/// [`Translatable`] trait defines properties of translatable objects (objects that can be moved
/// across plane).
///
pub trait Translatable {
    /// Returns origin point (position of object).
    ///
    fn origin(&self) -> Point;

    /// Translates object by a given vector.
    ///
    fn translate_on(&mut self, vector: Vector2);
    /// Translates object to a given point in place.
    ///
    fn translate_to(&mut self, point: Point) {
        self.translate_on(point - self.origin());
    }
}
/// [`Rotatable`] trait defines properties of rotating objects.
///
/// Rotation should be performed on counterclockwise direction (`Transform::Rotation` matrix
/// supplies it), although on screen it would appear as clockwise (since y-axis is directed down).
///
pub trait Rotatable {
    /// Returns current angle.
    ///
    fn angle(&self) -> Angle;

    /// Rotates object by a given angle counting from current rotation.
    ///
    fn rotate_on(&mut self, angle: Angle);
    /// Rotates object by a given angle counting from zero rotation (from zero).
    ///
    fn rotate_to(&mut self, angle: Angle) {
        self.rotate_on(angle - self.angle());
    }
}
/// [`Scalable`] trait defines properties of scalable objects (objects that can be resized).
///
pub trait Scalable {
    /// Returns current size.
    ///
    fn size(&self) -> (Size, Size);

    /// Scales object's size by a factor of `size_scale`.
    ///
    fn scale(&mut self, size_scale: (Size, Size));
    /// Sets object's size to given values.
    ///
    fn set_size(&mut self, size: (Size, Size)) {
        let (x, y): (Size, Size) = self.size();
        self.scale((size.0 / x, size.1 / y));
    }

    /// Returns the largest of the axis scale factors.
    ///
    /// Scaling a circle of broad-phase radius `r` by this value yields a circle that encloses the
    /// non-uniformly scaled object.
    ///
    fn max_scale(&self) -> f32 {
        let (x, y): (Size, Size) = self.size();
        x.get().max(y.get())
    }
}
/// [`Transformable`] super-trait defines properties of transformable object.
///
/// This trait requires [`Translatable`], [`Rotatable`] and [`Scalable`] traits to be implemented.
/// This trait is automatically implemented if possible.
///
pub trait Transformable: Translatable + Rotatable + Scalable {}
impl<T: Translatable + Rotatable + Scalable> Transformable for T {}

/// [`Transform2D`] struct is the plain carrier of position, rotation and scale on a plane.
///
/// Composition layers that have their own spatial component should implement [`Translatable`],
/// [`Rotatable`] and [`Scalable`] on it instead; [`Transform2D`] covers standalone usage and
/// tests.
///
/// # Example
/// ```rust
/// # use ggphysics::mathcore::transforms::{Transform2D, Translatable, Rotatable, Scalable};
/// # use ggphysics::mathcore::vectors::{Point, Vector2};
/// # use ggphysics::mathcore::{Angle, Size};
/// let mut transform: Transform2D = Transform2D::default();
/// transform.translate_on(Vector2 { x: 1.0, y: 2.0 });
/// transform.rotate_to(Angle::DEG90);
/// transform.scale((Size::from_value(2.0), Size::from_value(1.0)));
///
/// assert_eq!(transform.origin(), Point { x: 1.0, y: 2.0 });
/// assert_eq!(transform.angle(), Angle::DEG90);
/// assert_eq!(transform.max_scale(), 2.0);
/// ```
///
#[derive(Serialize, Deserialize, Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Transform2D {
    /// Position of object on a plane.
    ///
    position: Point,
    /// Counterclockwise rotation of object.
    ///
    angle: Angle,
    /// Scale factors along both axes.
    ///
    scale: (Size, Size),
}
impl Transform2D {
    /// Constructs transform from given position, angle and scale.
    ///
    pub fn new(position: Point, angle: Angle, scale: (Size, Size)) -> Self {
        Transform2D {
            position,
            angle,
            scale,
        }
    }
    /// Constructs transform that only carries position (zero rotation, identity scale).
    ///
    pub fn from_position(position: Point) -> Self {
        Transform2D {
            position,
            ..Transform2D::default()
        }
    }
}
impl Translatable for Transform2D {
    fn origin(&self) -> Point {
        self.position
    }

    fn translate_on(&mut self, vector: Vector2) {
        self.position += vector;
    }
}
impl Rotatable for Transform2D {
    fn angle(&self) -> Angle {
        self.angle
    }

    fn rotate_on(&mut self, angle: Angle) {
        self.angle += angle;
    }
}
impl Scalable for Transform2D {
    fn size(&self) -> (Size, Size) {
        self.scale
    }

    fn scale(&mut self, size_scale: (Size, Size)) {
        self.scale.0 *= size_scale.0;
        self.scale.1 *= size_scale.1;
    }
}

#[cfg(test)]
mod tests {
    use super::{Rotatable, Scalable, Transform, Transform2D, Translatable};
    use crate::mathcore::{
        matrices::Matrix3x3,
        vectors::{Point, Vector2},
        {Angle, Size},
    };

    #[test]
    fn transform_combination() {
        let matrix: Matrix3x3 = Transform::combine(
            [
                Transform::Scaling {
                    size_scale: (Size::from_value(2.0), Size::from_value(3.0)),
                },
                Transform::Rotation {
                    angle: Angle::DEG90,
                },
            ]
            .into_iter(),
        );

        // (1, 0) scales to (2, 0), then rotates to (0, 2)
        assert_eq!(
            matrix.apply_to(Vector2 { x: 1.0, y: 0.0 }),
            Vector2 { x: 0.0, y: 2.0 }
        );
    }

    #[test]
    fn transform2d_mutation() {
        let mut transform: Transform2D = Transform2D::from_position(Point { x: 1.0, y: 1.0 });

        transform.translate_to(Point { x: -1.0, y: 0.5 });
        assert_eq!(transform.origin(), Point { x: -1.0, y: 0.5 });

        transform.rotate_on(Angle::DEG45);
        transform.rotate_on(Angle::DEG45);
        assert_eq!(transform.angle(), Angle::DEG90);

        transform.set_size((Size::from_value(4.0), Size::from_value(0.5)));
        assert_eq!(transform.max_scale(), 4.0);
    }
}
