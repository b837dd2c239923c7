//! `physicscore::shapes` submodule implements convex polygon geometry that collision detection
//! operates on.
//!

use crate::mathcore::{
    floats::almost_equal,
    matrices::Matrix3x3,
    transforms::{Rotatable, Scalable, Transform, Transformable},
    vectors::{Vector2, Vertex},
    Size,
};
use serde::{Deserialize, Serialize};

/// [`ConvexPolygon`] struct represents convex polygon geometry in local frame of its owning body.
///
/// Points are an ordered, clockwise, convex sequence - construction trusts the caller on that.
/// Unique outward unit normals and the broad-phase radius are derived once; after construction
/// the polygon is immutable and can be shared by reference (`Rc<ConvexPolygon>`) across any
/// number of bodies.
///
/// # Example
/// ```rust
/// # use ggphysics::physicscore::shapes::ConvexPolygon;
/// # use ggphysics::mathcore::vectors::{Vector2, Vertex};
/// let square: ConvexPolygon = ConvexPolygon::new(vec![
///     Vertex { x: -0.5, y: 0.5 },
///     Vertex { x: 0.5, y: 0.5 },
///     Vertex { x: 0.5, y: -0.5 },
///     Vertex { x: -0.5, y: -0.5 },
/// ]);
/// // parallel and anti-parallel edge normals are merged into one axis
/// assert_eq!(square.normals(), [Vector2 { x: 0.0, y: 1.0 }, Vector2 { x: 1.0, y: 0.0 }]);
/// assert_eq!(square.broad_radius(), 0.5_f32.sqrt());
/// ```
///
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ConvexPolygon {
    /// Local-frame polygon points in clockwise order.
    ///
    points: Vec<Vertex>,
    /// Unique outward unit normals of polygon edges.
    ///
    normals: Vec<Vector2>,
    /// Radius of the smallest local-frame circle around the origin that contains all points.
    ///
    broad_radius: f32,
}
impl ConvexPolygon {
    /// Returns the largest distance from local origin to a point.
    ///
    fn radius_of(points: &[Vertex]) -> f32 {
        points
            .iter()
            .fold(0.0, |radius, point| radius.max(point.magnitude()))
    }

    /// Constructs polygon from an ordered, clockwise, convex sequence of local-frame points,
    /// deriving edge normals and the broad-phase radius.
    ///
    /// A normal joins the set only if no axis that is parallel or anti-parallel to it is already
    /// present, which leaves exactly one axis per direction for the separating axis test.
    ///
    pub fn new(points: Vec<Vertex>) -> Self {
        let n: usize = points.len();

        let mut normals: Vec<Vector2> = Vec::with_capacity(n);
        for i in 0..n {
            let edge: Vector2 = points[(i + 1) % n] - points[i];
            let normal: Vector2 = edge.perpendicular().normalized();
            if normals
                .iter()
                .all(|axis| !almost_equal(axis.dot_product(normal).abs(), 1.0))
            {
                normals.push(normal);
            }
        }

        let broad_radius: f32 = Self::radius_of(&points);
        ConvexPolygon {
            points,
            normals,
            broad_radius,
        }
    }

    /// Constructs polygon from precomputed points and normals, bypassing normal derivation.
    ///
    /// This is a performance escape hatch: the caller is trusted to supply outward unit normals
    /// with no parallel or anti-parallel duplicates. The broad-phase radius is still a cheap
    /// single scan and is computed here.
    ///
    /// # Example
    /// ```rust
    /// # use ggphysics::physicscore::shapes::ConvexPolygon;
    /// # use ggphysics::mathcore::vectors::{Vector2, Vertex};
    /// let square: ConvexPolygon = ConvexPolygon::from_parts(
    ///     vec![
    ///         Vertex { x: -0.5, y: 0.5 },
    ///         Vertex { x: 0.5, y: 0.5 },
    ///         Vertex { x: 0.5, y: -0.5 },
    ///         Vertex { x: -0.5, y: -0.5 },
    ///     ],
    ///     vec![Vector2 { x: 0.0, y: 1.0 }, Vector2 { x: 1.0, y: 0.0 }],
    /// );
    /// assert_eq!(square, ConvexPolygon::new(square.points().to_vec()));
    /// ```
    ///
    pub fn from_parts(points: Vec<Vertex>, normals: Vec<Vector2>) -> Self {
        let broad_radius: f32 = Self::radius_of(&points);
        ConvexPolygon {
            points,
            normals,
            broad_radius,
        }
    }

    /// Constructs axis-aligned rectangle with given width and height, centered at local origin.
    ///
    pub fn rectangle(width: Size, height: Size) -> Self {
        let matrix: Matrix3x3 = Transform::Scaling {
            size_scale: (width, height),
        }
        .matrix();
        let model: [Vertex; 4] = [
            Vertex { x: -0.5, y: 0.5 },
            Vertex { x: 0.5, y: 0.5 },
            Vertex { x: 0.5, y: -0.5 },
            Vertex { x: -0.5, y: -0.5 },
        ];
        ConvexPolygon::new(model.map(|vertex| matrix.apply_to(vertex)).to_vec())
    }

    /// Returns shared slice with polygon's points.
    ///
    pub fn points(&self) -> &[Vertex] {
        &self.points
    }
    /// Returns shared slice with polygon's unique outward unit normals.
    ///
    pub fn normals(&self) -> &[Vector2] {
        &self.normals
    }
    /// Returns broad-phase radius of the polygon.
    ///
    /// The radius is expressed in local frame; callers must scale it by the max axis scale of
    /// the owning transform before use.
    ///
    pub fn broad_radius(&self) -> f32 {
        self.broad_radius
    }

    /// Returns matrix that carries polygon points into the frame of given transform, with
    /// translation excluded.
    ///
    /// Translation cancels out in relative separating axis math, so casts work on scaled and
    /// rotated points only.
    ///
    fn cast_matrix(transform: &dyn Transformable) -> Matrix3x3 {
        Transform::combine(
            [
                Transform::Scaling {
                    size_scale: transform.size(),
                },
                Transform::Rotation {
                    angle: transform.angle(),
                },
            ]
            .into_iter(),
        )
    }

    /// Projects every point, scaled and rotated by given transform, onto `axis` and returns the
    /// largest dot product.
    ///
    /// # Example
    /// ```rust
    /// # use ggphysics::physicscore::shapes::ConvexPolygon;
    /// # use ggphysics::mathcore::transforms::Transform2D;
    /// # use ggphysics::mathcore::vectors::Vector2;
    /// # use ggphysics::mathcore::Size;
    /// let square: ConvexPolygon = ConvexPolygon::rectangle(Size::from_value(1.0), Size::from_value(1.0));
    /// let axis: Vector2 = Vector2 { x: 1.0, y: 0.0 };
    /// assert_eq!(square.cast_along_max(axis, &Transform2D::default()), 0.5);
    /// ```
    ///
    pub fn cast_along_max(&self, axis: Vector2, transform: &dyn Transformable) -> f32 {
        let matrix: Matrix3x3 = Self::cast_matrix(transform);
        self.points
            .iter()
            .map(|point| matrix.apply_to(*point).dot_product(axis))
            .fold(f32::NEG_INFINITY, f32::max)
    }
    /// Projects every point, scaled and rotated by given transform, onto `axis` and returns the
    /// smallest dot product.
    ///
    pub fn cast_along_min(&self, axis: Vector2, transform: &dyn Transformable) -> f32 {
        let matrix: Matrix3x3 = Self::cast_matrix(transform);
        self.points
            .iter()
            .map(|point| matrix.apply_to(*point).dot_product(axis))
            .fold(f32::INFINITY, f32::min)
    }
}

#[cfg(test)]
mod tests {
    use super::ConvexPolygon;
    use crate::mathcore::{
        floats::almost_equal,
        transforms::Transform2D,
        vectors::{Point, Vector2, Vertex},
        {Angle, Size},
    };

    /// Clockwise regular hexagon with given circumradius.
    ///
    fn hexagon(radius: f32) -> ConvexPolygon {
        ConvexPolygon::new(
            (0..6)
                .map(|i| {
                    let (sin, cos): (f32, f32) = Angle::from_degrees(90.0 - 60.0 * i as f32).sin_cos();
                    Vertex {
                        x: cos * radius,
                        y: sin * radius,
                    }
                })
                .collect(),
        )
    }

    #[test]
    fn normals_are_unique_unit_axes() {
        let polygon: ConvexPolygon = hexagon(2.0);

        // opposite hexagon edges merge into one axis
        assert_eq!(polygon.normals().len(), 3);
        for (i, a) in polygon.normals().iter().enumerate() {
            assert!(almost_equal(a.magnitude(), 1.0));
            for b in polygon.normals().iter().skip(i + 1) {
                assert!(!almost_equal(a.dot_product(*b).abs(), 1.0));
            }
        }
    }

    #[test]
    fn broad_radius_is_max_distance() {
        assert!(almost_equal(hexagon(2.0).broad_radius(), 2.0));
        assert_eq!(
            ConvexPolygon::rectangle(Size::from_value(3.0), Size::from_value(4.0)).broad_radius(),
            2.5
        );
    }

    #[test]
    fn casts_follow_scale_and_rotation() {
        let square: ConvexPolygon =
            ConvexPolygon::rectangle(Size::from_value(1.0), Size::from_value(1.0));
        let axis: Vector2 = Vector2 { x: 1.0, y: 0.0 };

        let plain: Transform2D = Transform2D::default();
        assert_eq!(square.cast_along_max(axis, &plain), 0.5);
        assert_eq!(square.cast_along_min(axis, &plain), -0.5);

        let scaled: Transform2D = Transform2D::new(
            Point::zero(),
            Angle::zero(),
            (Size::from_value(4.0), Size::from_value(1.0)),
        );
        assert_eq!(square.cast_along_max(axis, &scaled), 2.0);

        // at 45 degrees the square projects its diagonal
        let rotated: Transform2D = Transform2D::new(
            Point::zero(),
            Angle::DEG45,
            (Size::default(), Size::default()),
        );
        assert!(almost_equal(
            square.cast_along_max(axis, &rotated),
            0.5_f32.sqrt()
        ));
    }

    #[test]
    fn translation_does_not_affect_casts() {
        let square: ConvexPolygon =
            ConvexPolygon::rectangle(Size::from_value(1.0), Size::from_value(1.0));
        let axis: Vector2 = Vector2 { x: 0.0, y: 1.0 };

        let moved: Transform2D = Transform2D::from_position(Point { x: 100.0, y: -3.0 });
        assert_eq!(square.cast_along_max(axis, &moved), 0.5);
        assert_eq!(square.cast_along_min(axis, &moved), -0.5);
    }
}
