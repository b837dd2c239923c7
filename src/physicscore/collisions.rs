//! `physicscore::collisions` submodule implements the separating axis overlap test and the
//! sequential impulse solver, together with the per-step arena that collision records live in.
//!

use crate::mathcore::{
    floats::almost_equal,
    matrices::Matrix3x3,
    transforms::{Rotatable, Transform, Transformable, Translatable},
    vectors::Vector2,
};
use crate::physicscore::{bodies::SharedBody, shapes::ConvexPolygon};

/// Fraction of penetration depth that positional correction leaves in place.
///
/// Under-correcting keeps resting pairs from oscillating across the contact boundary between
/// steps.
///
pub const PENETRATION_SLOP: f32 = 0.001;

/// [`AxisOwner`] enum names the transform whose rotation produced the resolved separating axis.
///
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AxisOwner {
    /// Axis comes from the first shape's normals.
    ///
    A,
    /// Axis comes from the second shape's normals.
    ///
    B,
}

/// [`Overlap`] struct is the result of a positive separating axis test: the axis of least
/// penetration, the depth along it and the transform that owns the axis.
///
/// The normal always points from the first tested shape towards the second.
///
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Overlap {
    /// Contact normal, oriented from shape A to shape B.
    ///
    pub normal: Vector2,
    /// Penetration depth along the normal.
    ///
    pub depth: f32,
    /// Which transform owns the resolved axis.
    ///
    pub owner: AxisOwner,
}

/// [`CollisionRef`] struct is a lightweight handle into the [`CollisionArena`] that bodies keep
/// for one step.
///
/// `flipped` records which slot the owning body occupies, so queries can resolve the opposing
/// body without back-references.
///
#[derive(Copy, Clone, Debug)]
pub struct CollisionRef {
    /// Index of the record in the arena.
    ///
    index: usize,
    /// Whether the body that holds this reference is slot B of the record.
    ///
    flipped: bool,
}
impl CollisionRef {
    /// Constructs reference to record `index`, held by the body in slot B if `flipped`.
    ///
    pub(crate) fn new(index: usize, flipped: bool) -> CollisionRef {
        CollisionRef { index, flipped }
    }
}

/// [`CollisionArena`] struct owns all [`CollisionData`] of the current world step by value.
///
/// The arena is dropped wholesale at the start of every fixed step; bodies only hold
/// [`CollisionRef`] handles into it. Records never outlive the step that produced them.
///
#[derive(Debug, Default)]
pub struct CollisionArena {
    /// Records of the current step.
    ///
    collisions: Vec<CollisionData>,
}
impl CollisionArena {
    /// Initializes empty arena.
    ///
    pub fn new() -> Self {
        CollisionArena {
            collisions: Vec::new(),
        }
    }

    /// Returns record behind given reference.
    ///
    pub fn get(&self, reference: CollisionRef) -> &CollisionData {
        &self.collisions[reference.index]
    }
    /// Returns amount of records in the arena.
    ///
    pub fn len(&self) -> usize {
        self.collisions.len()
    }
    /// Returns whether the current step produced no collisions.
    ///
    pub fn is_empty(&self) -> bool {
        self.collisions.is_empty()
    }
    /// Returns iterator over this step's records.
    ///
    pub fn iter(&self) -> impl Iterator<Item = &CollisionData> {
        self.collisions.iter()
    }

    /// Stores a record and returns its index.
    ///
    pub(crate) fn insert(&mut self, collision: CollisionData) -> usize {
        self.collisions.push(collision);
        self.collisions.len() - 1
    }
    /// Drops all records of the finished step.
    ///
    pub(crate) fn clear(&mut self) {
        self.collisions.clear();
    }
}

/// [`CollisionData`] struct is the transient record of one colliding body pair: contact normal
/// (pointing from body A to body B), penetration depth, axis owner and both participants.
///
/// Records live only within one world step; they host the separating axis test that produces
/// them and the impulse solver that consumes them.
///
#[derive(Debug)]
pub struct CollisionData {
    /// Contact normal, oriented from body A to body B.
    ///
    normal: Vector2,
    /// Penetration depth along the normal.
    ///
    depth: f32,
    /// Which transform owns the resolved axis.
    ///
    owner: AxisOwner,
    /// First body of the pair; the world puts a non-dynamic participant in this slot.
    ///
    a: SharedBody,
    /// Second body of the pair.
    ///
    b: SharedBody,
}
impl CollisionData {
    /// Constructs record from an overlap and the colliding pair.
    ///
    pub(crate) fn new(overlap: Overlap, a: SharedBody, b: SharedBody) -> CollisionData {
        CollisionData {
            normal: overlap.normal,
            depth: overlap.depth,
            owner: overlap.owner,
            a,
            b,
        }
    }

    /// Returns contact normal, oriented from body A to body B.
    ///
    pub fn normal(&self) -> Vector2 {
        self.normal
    }
    /// Returns penetration depth along the normal.
    ///
    pub fn depth(&self) -> f32 {
        self.depth
    }
    /// Returns which transform owns the resolved axis.
    ///
    pub fn owner(&self) -> AxisOwner {
        self.owner
    }
    /// Returns body in slot A.
    ///
    pub fn body_a(&self) -> &SharedBody {
        &self.a
    }
    /// Returns body in slot B.
    ///
    pub fn body_b(&self) -> &SharedBody {
        &self.b
    }
    /// Returns the participant that is not the holder of given reference.
    ///
    pub fn other(&self, reference: CollisionRef) -> &SharedBody {
        if reference.flipped {
            &self.a
        } else {
            &self.b
        }
    }

    /// Performs separating axis test of two shapes under their transforms.
    ///
    /// Candidate axes are shape A's normals rotated by A's rotation, then shape B's normals
    /// rotated by B's rotation - rotation only, since scale affects point projection but not
    /// normal direction. Every axis measures penetration as the combined cast reach minus the
    /// center distance along the axis; the first axis with no penetration proves separation.
    /// Otherwise the axis of least depth wins; comparison is strict, so on an exact depth tie
    /// the earliest axis in scan order is kept. The returned normal is oriented from A to B.
    ///
    /// # Example
    /// ```rust
    /// # use ggphysics::physicscore::collisions::{CollisionData, Overlap};
    /// # use ggphysics::physicscore::shapes::ConvexPolygon;
    /// # use ggphysics::mathcore::transforms::Transform2D;
    /// # use ggphysics::mathcore::vectors::{Point, Vector2};
    /// # use ggphysics::mathcore::Size;
    /// let square: ConvexPolygon = ConvexPolygon::rectangle(Size::from_value(1.0), Size::from_value(1.0));
    /// let at_origin: Transform2D = Transform2D::default();
    /// let beside: Transform2D = Transform2D::from_position(Point { x: 0.5, y: 0.0 });
    ///
    /// let overlap: Overlap = CollisionData::sat_test(&square, &at_origin, &square, &beside)
    ///     .expect("Half-overlapping squares collide");
    /// assert_eq!(overlap.normal, Vector2 { x: 1.0, y: 0.0 });
    /// assert_eq!(overlap.depth, 0.5);
    ///
    /// let apart: Transform2D = Transform2D::from_position(Point { x: 2.0, y: 0.0 });
    /// assert!(CollisionData::sat_test(&square, &at_origin, &square, &apart).is_none());
    /// ```
    ///
    pub fn sat_test(
        shape_a: &ConvexPolygon,
        transform_a: &dyn Transformable,
        shape_b: &ConvexPolygon,
        transform_b: &dyn Transformable,
    ) -> Option<Overlap> {
        let distance: Vector2 = transform_a.origin() - transform_b.origin();

        let rotation_a: Matrix3x3 = Transform::Rotation {
            angle: transform_a.angle(),
        }
        .matrix();
        let rotation_b: Matrix3x3 = Transform::Rotation {
            angle: transform_b.angle(),
        }
        .matrix();

        let axes = shape_a
            .normals()
            .iter()
            .map(|normal| (rotation_a.apply_to(*normal), AxisOwner::A))
            .chain(
                shape_b
                    .normals()
                    .iter()
                    .map(|normal| (rotation_b.apply_to(*normal), AxisOwner::B)),
            );

        let mut best: Option<Overlap> = None;
        for (axis, owner) in axes {
            let offset: f32 = distance.dot_product(axis);
            // the offset sign picks which shape is cast towards the other, saving one pass
            let reach: f32 = if offset > 0.0 {
                shape_b.cast_along_max(axis, transform_b)
                    - shape_a.cast_along_min(axis, transform_a)
            } else {
                shape_a.cast_along_max(axis, transform_a)
                    - shape_b.cast_along_min(axis, transform_b)
            };
            let depth: f32 = reach - offset.abs();
            if depth <= 0.0 {
                return None;
            }
            if best.map_or(true, |overlap| depth < overlap.depth) {
                best = Some(Overlap {
                    normal: axis,
                    depth,
                    owner,
                });
            }
        }

        best.map(|mut overlap| {
            if overlap.normal.dot_product(distance) > 0.0 {
                overlap.normal = -overlap.normal;
            }
            overlap
        })
    }

    /// Resolves the collision with one sequential impulse pass.
    ///
    /// Positional correction separates the pair along the normal, leaving
    /// [`PENETRATION_SLOP`] of depth in place; it is split between two dynamic participants and
    /// applied fully to a single dynamic one. A restitution impulse then cancels and reflects
    /// the approach velocity, and a friction impulse removes tangential slip up to the Coulomb
    /// limit of the restitution impulse. Separating contacts and slip-free contacts return
    /// early; nothing here can fail.
    ///
    pub fn solve(&self) {
        let (mut a, mut b) = (self.a.borrow_mut(), self.b.borrow_mut());
        let (dynamic_a, dynamic_b): (bool, bool) = (a.is_dynamic(), b.is_dynamic());

        let correction: Vector2 = self.normal * (self.depth - PENETRATION_SLOP);
        if dynamic_a && dynamic_b {
            a.transform().borrow_mut().translate_on(-(correction * 0.5));
            b.transform().borrow_mut().translate_on(correction * 0.5);
        } else if dynamic_a {
            a.transform().borrow_mut().translate_on(-correction);
        } else if dynamic_b {
            b.transform().borrow_mut().translate_on(correction);
        }

        let relative: Vector2 = b.velocity() - a.velocity();
        let approach: f32 = relative.dot_product(self.normal);
        if approach > 0.0 {
            return;
        }

        let impulse: f32 = approach * (a.bounce().min(b.bounce()) + 1.0);
        let (inverse_a, inverse_b): (f32, f32) = (a.inverse_mass(), b.inverse_mass());
        if dynamic_a && dynamic_b {
            let shared: f32 = impulse / (inverse_a + inverse_b);
            a.add_velocity(self.normal * (shared * inverse_a));
            b.add_velocity(-(self.normal * (shared * inverse_b)));
        } else if dynamic_a {
            a.add_velocity(self.normal * impulse);
        } else if dynamic_b {
            b.add_velocity(-(self.normal * impulse));
        }

        let tangent: Vector2 = self.normal.perpendicular();
        let slip: f32 = relative.dot_product(tangent);
        if almost_equal(slip, 0.0) {
            return;
        }
        let limit: f32 = impulse.abs() * a.friction().min(b.friction());
        let friction: f32 = slip.abs().min(limit) * slip.signum();
        if dynamic_a && dynamic_b {
            let shared: f32 = friction / (inverse_a + inverse_b);
            a.add_velocity(tangent * (shared * inverse_a));
            b.add_velocity(-(tangent * (shared * inverse_b)));
        } else if dynamic_a {
            a.add_velocity(tangent * friction);
        } else if dynamic_b {
            b.add_velocity(-(tangent * friction));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisOwner, CollisionData, Overlap, PENETRATION_SLOP};
    use crate::mathcore::{
        floats::almost_equal,
        transforms::{Transform2D, Translatable},
        vectors::{Point, Vector2},
        {Angle, Size},
    };
    use crate::physicscore::{
        bodies::{Body, BodyKind, SharedBody, SharedTransform},
        shapes::ConvexPolygon,
    };
    use approx::assert_relative_eq;
    use std::{cell::RefCell, rc::Rc};

    fn unit_square() -> ConvexPolygon {
        ConvexPolygon::rectangle(Size::from_value(1.0), Size::from_value(1.0))
    }

    fn body_at(kind: BodyKind, position: Point) -> SharedBody {
        let transform: SharedTransform =
            Rc::new(RefCell::new(Transform2D::from_position(position)));
        let mut body: Body = Body::new(kind, transform);
        let _ = body.add_shape(Rc::new(unit_square()));
        Rc::new(RefCell::new(body))
    }

    #[test]
    fn sat_is_symmetric() {
        let square: ConvexPolygon = unit_square();
        let first: Transform2D = Transform2D::from_position(Point { x: 0.1, y: -0.2 });
        let second: Transform2D = Transform2D::new(
            Point { x: 0.4, y: 0.3 },
            Angle::from_degrees(30.0),
            (Size::default(), Size::default()),
        );

        let forward: Overlap = CollisionData::sat_test(&square, &first, &square, &second)
            .expect("Squares this close collide");
        let backward: Overlap = CollisionData::sat_test(&square, &second, &square, &first)
            .expect("Overlap does not depend on argument order");

        assert!(almost_equal(forward.depth, backward.depth));
        assert_eq!(forward.normal, -backward.normal);
    }

    #[test]
    fn sat_separated_squares() {
        let square: ConvexPolygon = unit_square();
        let at_origin: Transform2D = Transform2D::default();

        for x in [2.0, -2.0, 1.001] {
            let apart: Transform2D = Transform2D::from_position(Point { x, y: 0.0 });
            assert!(CollisionData::sat_test(&square, &at_origin, &square, &apart).is_none());
        }
    }

    #[test]
    fn sat_reports_least_depth_axis() {
        let square: ConvexPolygon = unit_square();
        let at_origin: Transform2D = Transform2D::default();
        // deeper along y than along x, so the x axis must win
        let corner: Transform2D = Transform2D::from_position(Point { x: 0.75, y: 0.5 });

        let overlap: Overlap = CollisionData::sat_test(&square, &at_origin, &square, &corner)
            .expect("Corner-overlapping squares collide");
        assert_eq!(overlap.normal, Vector2 { x: 1.0, y: 0.0 });
        assert!(almost_equal(overlap.depth, 0.25));
        assert_eq!(overlap.owner, AxisOwner::A);
    }

    #[test]
    fn solve_reflects_approach_velocity_with_full_bounce() {
        let floor: SharedBody = body_at(BodyKind::Static, Point { x: 0.0, y: 0.0 });
        let ball: SharedBody = body_at(BodyKind::Dynamic, Point { x: 0.0, y: 0.9 });
        assert!(ball.borrow_mut().set_bounce(1.0));
        assert!(floor.borrow_mut().set_bounce(1.0));
        ball.borrow_mut().set_velocity(Vector2 { x: 0.0, y: -3.0 });

        let overlap: Overlap = {
            let (floor, ball) = (floor.borrow(), ball.borrow());
            let overlap = CollisionData::sat_test(
                &floor.shapes()[0],
                &*floor.transform().borrow(),
                &ball.shapes()[0],
                &*ball.transform().borrow(),
            )
            .expect("Ball penetrates the floor");
            overlap
        };
        let collision: CollisionData =
            CollisionData::new(overlap, Rc::clone(&floor), Rc::clone(&ball));
        collision.solve();

        // pre-impact normal velocity is reversed, static floor does not move
        assert_eq!(ball.borrow().velocity(), Vector2 { x: 0.0, y: 3.0 });
        assert_eq!(floor.borrow().velocity(), Vector2::zero());
        assert_eq!(
            floor.borrow().transform().borrow().origin(),
            Point::zero()
        );
    }

    #[test]
    fn solve_kills_approach_velocity_without_bounce() {
        let floor: SharedBody = body_at(BodyKind::Static, Point { x: 0.0, y: 0.0 });
        let ball: SharedBody = body_at(BodyKind::Dynamic, Point { x: 0.0, y: 0.9 });
        ball.borrow_mut().set_velocity(Vector2 { x: 0.0, y: -3.0 });

        let overlap: Overlap = Overlap {
            normal: Vector2 { x: 0.0, y: 1.0 },
            depth: 0.1,
            owner: AxisOwner::A,
        };
        let collision: CollisionData =
            CollisionData::new(overlap, Rc::clone(&floor), Rc::clone(&ball));
        collision.solve();

        assert_eq!(ball.borrow().velocity(), Vector2::zero());
    }

    #[test]
    fn solve_corrects_positions_up_to_slop() {
        let floor: SharedBody = body_at(BodyKind::Static, Point { x: 0.0, y: 0.0 });
        let ball: SharedBody = body_at(BodyKind::Dynamic, Point { x: 0.0, y: 0.9 });

        let overlap: Overlap = Overlap {
            normal: Vector2 { x: 0.0, y: 1.0 },
            depth: 0.1,
            owner: AxisOwner::A,
        };
        CollisionData::new(overlap, Rc::clone(&floor), Rc::clone(&ball)).solve();

        // the dynamic side takes the whole correction
        let lifted: Point = ball.borrow().transform().borrow().origin();
        assert_relative_eq!(lifted.y, 0.9 + 0.1 - PENETRATION_SLOP, epsilon = 1e-6);
        assert_eq!(floor.borrow().transform().borrow().origin(), Point::zero());
    }

    #[test]
    fn solve_splits_impulse_between_dynamic_pair() {
        let left: SharedBody = body_at(BodyKind::Dynamic, Point { x: -0.4, y: 0.0 });
        let right: SharedBody = body_at(BodyKind::Dynamic, Point { x: 0.4, y: 0.0 });
        assert!(left.borrow_mut().set_bounce(1.0));
        assert!(right.borrow_mut().set_bounce(1.0));
        left.borrow_mut().set_velocity(Vector2 { x: 2.0, y: 0.0 });
        right.borrow_mut().set_velocity(Vector2 { x: -2.0, y: 0.0 });

        let overlap: Overlap = Overlap {
            normal: Vector2 { x: 1.0, y: 0.0 },
            depth: 0.2,
            owner: AxisOwner::A,
        };
        CollisionData::new(overlap, Rc::clone(&left), Rc::clone(&right)).solve();

        // equal masses and full restitution swap the head-on velocities
        assert_eq!(left.borrow().velocity(), Vector2 { x: -2.0, y: 0.0 });
        assert_eq!(right.borrow().velocity(), Vector2 { x: 2.0, y: 0.0 });
    }

    #[test]
    fn solve_leaves_separating_contact_alone() {
        let floor: SharedBody = body_at(BodyKind::Static, Point { x: 0.0, y: 0.0 });
        let ball: SharedBody = body_at(BodyKind::Dynamic, Point { x: 0.0, y: 0.9 });
        ball.borrow_mut().set_velocity(Vector2 { x: 0.0, y: 5.0 });

        let overlap: Overlap = Overlap {
            normal: Vector2 { x: 0.0, y: 1.0 },
            depth: 0.1,
            owner: AxisOwner::A,
        };
        CollisionData::new(overlap, Rc::clone(&floor), Rc::clone(&ball)).solve();

        // position is still corrected, velocity is not touched
        assert_eq!(ball.borrow().velocity(), Vector2 { x: 0.0, y: 5.0 });
    }

    #[test]
    fn solve_friction_slows_tangential_slide() {
        let floor: SharedBody = body_at(BodyKind::Static, Point { x: 0.0, y: 0.0 });
        let puck: SharedBody = body_at(BodyKind::Dynamic, Point { x: 0.0, y: 0.9 });
        puck.borrow_mut().set_velocity(Vector2 { x: 4.0, y: -1.0 });

        let overlap: Overlap = Overlap {
            normal: Vector2 { x: 0.0, y: 1.0 },
            depth: 0.05,
            owner: AxisOwner::A,
        };
        CollisionData::new(overlap, Rc::clone(&floor), Rc::clone(&puck)).solve();

        let velocity: Vector2 = puck.borrow().velocity();
        // friction is capped by the Coulomb limit of the normal impulse
        assert_relative_eq!(velocity.y, 0.0, epsilon = 1e-6);
        assert!(velocity.x < 4.0 && velocity.x > 0.0);
    }
}
