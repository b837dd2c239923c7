//! `physicscore::world` submodule implements the simulation world - the registry of bodies and
//! the fixed-step loop that integrates, detects and resolves.
//!

use crate::mathcore::{
    transforms::{Scalable, Translatable},
    vectors::Vector2,
};
use crate::physicscore::{
    bodies::{Body, SharedBody},
    collisions::{CollisionArena, CollisionData, CollisionRef, Overlap},
};
use log::{debug, trace};
use std::rc::Rc;

/// [`World`] struct owns the body registry and drives the fixed-step simulation.
///
/// `update` accumulates frame time and drains it in steps of exactly `step_length`: per step,
/// gravity and forces are integrated, every pair of registered bodies is tested
/// (circular broad phase, then separating axis narrow phase) and overlapping non-trigger pairs
/// are resolved with one impulse pass. Iteration follows registration order everywhere, so
/// outcomes are deterministic for a fixed registration sequence.
///
/// Worlds are explicit values - there is no implicit or global instance; every system that
/// steps or queries physics receives its world handle.
///
/// The world never clamps `delta`; callers that can stall (debugger pauses, window drags)
/// should clamp before calling `update`, or the drain loop will run once per accumulated step.
///
/// # Example
/// ```rust
/// # use ggphysics::physicscore::world::World;
/// # use ggphysics::physicscore::bodies::{Body, BodyKind, SharedBody, SharedTransform};
/// # use ggphysics::physicscore::shapes::ConvexPolygon;
/// # use ggphysics::mathcore::transforms::{Transform2D, Translatable};
/// # use ggphysics::mathcore::vectors::{Point, Vector2};
/// # use ggphysics::mathcore::Size;
/// # use std::{cell::RefCell, rc::Rc};
/// let mut world: World = World::new(Vector2 { x: 0.0, y: -10.0 }, 0.05);
///
/// let transform: SharedTransform = Rc::new(RefCell::new(Transform2D::default()));
/// let mut body: Body = Body::new(BodyKind::Dynamic, transform);
/// body.add_shape(Rc::new(ConvexPolygon::rectangle(Size::from_value(1.0), Size::from_value(1.0))));
/// let body: SharedBody = Rc::new(RefCell::new(body));
///
/// world.add_body(&body);
/// world.add_body(&body);  // re-adding is a no-op
/// assert_eq!(world.len(), 1);
///
/// world.update(0.05 * 1.5);  // drains exactly one fixed step
/// let position: Point = body.borrow().transform().borrow().origin();
/// assert_eq!(position, Point { x: 0.0, y: -10.0 * 0.05 * 0.05 });
/// ```
///
#[derive(Debug)]
pub struct World {
    /// Gravity acceleration applied to dynamic bodies.
    ///
    gravity: Vector2,
    /// Length of one fixed simulation step in seconds.
    ///
    step_length: f32,
    /// Frame time accumulated towards the next fixed step.
    ///
    accumulator: f32,
    /// Registered bodies in registration order; no duplicates.
    ///
    bodies: Vec<SharedBody>,
    /// Arena with this step's collision records.
    ///
    collisions: CollisionArena,
}
impl World {
    /// Constructs world with given gravity and fixed step length.
    ///
    /// `step_length` must be positive; the drain loop never terminates a step early.
    ///
    pub fn new(gravity: Vector2, step_length: f32) -> World {
        World {
            gravity,
            step_length,
            accumulator: 0.0,
            bodies: Vec::new(),
            collisions: CollisionArena::new(),
        }
    }

    /// Returns gravity acceleration of this world.
    ///
    pub fn gravity(&self) -> Vector2 {
        self.gravity
    }
    /// Sets gravity acceleration of this world.
    ///
    pub fn set_gravity(&mut self, gravity: Vector2) {
        self.gravity = gravity;
    }
    /// Returns length of one fixed simulation step.
    ///
    pub fn step_length(&self) -> f32 {
        self.step_length
    }

    /// Returns arena with the most recent step's collision records.
    ///
    /// Body collision queries borrow from here.
    ///
    pub fn collisions(&self) -> &CollisionArena {
        &self.collisions
    }

    /// Registers body in this world; re-adding an already-registered body is a no-op.
    ///
    pub fn add_body(&mut self, body: &SharedBody) {
        if self.contains(body) {
            return;
        }
        debug!("body registered: {:?}", body.borrow());
        self.bodies.push(Rc::clone(body));
    }
    /// Deregisters body from this world; removing an absent body is a no-op.
    ///
    /// The removed body's per-step collision references are dropped with it.
    ///
    pub fn remove_body(&mut self, body: &SharedBody) {
        let before: usize = self.bodies.len();
        self.bodies
            .retain(|registered| !Rc::ptr_eq(registered, body));
        if self.bodies.len() < before {
            debug!("body deregistered: {:?}", body.borrow());
            body.borrow_mut().clear_collisions();
        }
    }
    /// Returns whether given body is registered in this world.
    ///
    pub fn contains(&self, body: &SharedBody) -> bool {
        self.bodies
            .iter()
            .any(|registered| Rc::ptr_eq(registered, body))
    }
    /// Returns shared slice with registered bodies in registration order.
    ///
    pub fn bodies(&self) -> &[SharedBody] {
        &self.bodies
    }
    /// Returns amount of registered bodies.
    ///
    pub fn len(&self) -> usize {
        self.bodies.len()
    }
    /// Returns whether no bodies are registered.
    ///
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Accumulates frame time and drains it in fixed steps.
    ///
    /// Deltas smaller than the step length only accumulate; once the accumulator exceeds the
    /// step length, one fixed step runs per contained multiple. Nothing but the accumulator and
    /// body state survives between calls.
    ///
    pub fn update(&mut self, delta: f32) {
        self.accumulator += delta;
        while self.accumulator > self.step_length {
            self.accumulator -= self.step_length;
            self.advance();
        }
    }

    /// Runs one fixed simulation step: integration, then the pairwise collision pass.
    ///
    fn advance(&mut self) {
        self.collisions.clear();

        let gravity_velocity: Vector2 = self.gravity * self.step_length;
        for body in &self.bodies {
            let mut body = body.borrow_mut();
            if body.is_dynamic() {
                body.add_velocity(gravity_velocity);
            }
            body.step(self.step_length);
        }

        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                let (mut first, mut second): (SharedBody, SharedBody) =
                    (Rc::clone(&self.bodies[i]), Rc::clone(&self.bodies[j]));
                // a non-dynamic participant always occupies slot A
                if first.borrow().is_dynamic() && !second.borrow().is_dynamic() {
                    std::mem::swap(&mut first, &mut second);
                }

                let (overlap, trigger): (Option<Overlap>, bool) = {
                    let (a, b) = (first.borrow(), second.borrow());
                    (World::test_pair(&a, &b), a.is_trigger() || b.is_trigger())
                };
                let Some(overlap) = overlap else {
                    continue;
                };

                let index: usize = self.collisions.insert(CollisionData::new(
                    overlap,
                    Rc::clone(&first),
                    Rc::clone(&second),
                ));
                first
                    .borrow_mut()
                    .record_collision(CollisionRef::new(index, false));
                second
                    .borrow_mut()
                    .record_collision(CollisionRef::new(index, true));

                if !trigger {
                    self.collisions.get(CollisionRef::new(index, false)).solve();
                }
            }
        }

        trace!(
            "fixed step: {len} bodies, {collisions} collisions",
            len = self.bodies.len(),
            collisions = self.collisions.len()
        );
    }

    /// Tests a body pair: layer gate, dynamics gate, trigger-trigger gate, circular broad
    /// phase, then the separating axis test over the shape cross product, keeping the deepest
    /// contact.
    ///
    fn test_pair(a: &Body, b: &Body) -> Option<Overlap> {
        if !a.shares_layer(b) {
            return None;
        }
        if !a.is_dynamic() && !b.is_dynamic() {
            return None;
        }
        if a.is_trigger() && b.is_trigger() {
            return None;
        }

        // a shapeless body cannot collide
        let (radius_a, radius_b): (f32, f32) = (a.broad_radius()?, b.broad_radius()?);
        let (transform_a, transform_b) = (a.transform().borrow(), b.transform().borrow());
        let gap: f32 = (transform_a.origin() - transform_b.origin()).magnitude();
        if gap > radius_a * transform_a.max_scale() + radius_b * transform_b.max_scale() {
            return None;
        }

        let mut best: Option<Overlap> = None;
        for shape_a in a.shapes() {
            for shape_b in b.shapes() {
                if let Some(overlap) =
                    CollisionData::sat_test(shape_a, &*transform_a, shape_b, &*transform_b)
                {
                    if best.map_or(true, |deepest| overlap.depth > deepest.depth) {
                        best = Some(overlap);
                    }
                }
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::World;
    use crate::mathcore::{
        floats::almost_equal,
        transforms::{Transform2D, Translatable},
        vectors::{Point, Vector2},
        Size,
    };
    use crate::physicscore::{
        bodies::{Body, BodyKind, Layers, SharedBody, SharedTransform},
        shapes::ConvexPolygon,
    };
    use std::{cell::RefCell, rc::Rc};

    /// Body with a unit square shape at given position.
    ///
    fn boxed_body(kind: BodyKind, position: Point) -> SharedBody {
        let transform: SharedTransform =
            Rc::new(RefCell::new(Transform2D::from_position(position)));
        let mut body: Body = Body::new(kind, transform);
        assert!(body.add_shape(Rc::new(ConvexPolygon::rectangle(
            Size::from_value(1.0),
            Size::from_value(1.0),
        ))));
        Rc::new(RefCell::new(body))
    }

    fn position_of(body: &SharedBody) -> Point {
        body.borrow().transform().borrow().origin()
    }

    #[test]
    fn update_accumulates_before_stepping() {
        let mut world: World = World::new(Vector2::zero(), 0.1);
        let mover: SharedBody = boxed_body(BodyKind::Kinematic, Point::zero());
        mover.borrow_mut().set_velocity(Vector2 { x: 1.0, y: 0.0 });
        world.add_body(&mover);

        world.update(0.04);
        world.update(0.04);
        assert_eq!(position_of(&mover), Point::zero());

        // the accumulator crosses one step length - exactly one step runs
        world.update(0.04);
        assert_eq!(position_of(&mover), Point { x: 0.1, y: 0.0 });

        world.update(0.04);
        assert_eq!(position_of(&mover), Point { x: 0.1, y: 0.0 });
    }

    #[test]
    fn falling_body_comes_to_rest_on_floor() {
        let mut world: World = World::new(Vector2 { x: 0.0, y: -10.0 }, 0.05);
        let floor: SharedBody = boxed_body(BodyKind::Static, Point::zero());
        let ball: SharedBody = boxed_body(BodyKind::Dynamic, Point { x: 0.0, y: 1.04 });
        world.add_body(&floor);
        world.add_body(&ball);

        // two fixed steps bring the ball into the floor; the impulse pass absorbs the fall
        world.update(0.11);

        assert_eq!(ball.borrow().velocity(), Vector2::zero());
        assert!(ball
            .borrow()
            .dot_collision_normals(world.collisions(), Vector2 { x: 0.0, y: 1.0 })
            .is_some_and(|dot| almost_equal(dot, 1.0)));
        assert!(ball
            .borrow()
            .max_collision_depth(world.collisions())
            .is_some_and(|depth| almost_equal(depth, 0.035)));
        assert!(ball.borrow().has_collision_deeper_than(world.collisions(), 0.01));

        // both sides of the pair hold the record
        assert!(floor
            .borrow()
            .collision_with(world.collisions(), &ball)
            .is_some());
    }

    #[test]
    fn trigger_overlap_is_recorded_but_not_resolved() {
        let mut world: World = World::new(Vector2::zero(), 0.1);
        let zone: SharedBody = boxed_body(BodyKind::Static, Point { x: 0.5, y: 0.0 });
        zone.borrow_mut().set_trigger(true);
        zone.borrow_mut().set_tag(Some(String::from("checkpoint")));
        let ball: SharedBody = boxed_body(BodyKind::Dynamic, Point::zero());
        world.add_body(&zone);
        world.add_body(&ball);

        world.update(0.15);

        assert!(ball
            .borrow()
            .has_collision_with_tag(world.collisions(), "checkpoint"));
        assert!(zone
            .borrow()
            .collision_with(world.collisions(), &ball)
            .is_some());
        // neither position nor velocity changed
        assert_eq!(position_of(&ball), Point::zero());
        assert_eq!(ball.borrow().velocity(), Vector2::zero());
        assert_eq!(position_of(&zone), Point { x: 0.5, y: 0.0 });
    }

    #[test]
    fn disjoint_layers_never_collide() {
        let mut world: World = World::new(Vector2::zero(), 0.1);
        let first: SharedBody = boxed_body(BodyKind::Dynamic, Point::zero());
        let second: SharedBody = boxed_body(BodyKind::Dynamic, Point { x: 0.25, y: 0.0 });
        first.borrow_mut().set_layers(Layers::LAYER_0);
        second.borrow_mut().set_layers(Layers::LAYER_1);
        world.add_body(&first);
        world.add_body(&second);

        world.update(0.15);

        // geometrically overlapping, but the masks are disjoint
        assert!(world.collisions().is_empty());
        assert!(first
            .borrow()
            .max_collision_depth(world.collisions())
            .is_none());
        assert_eq!(position_of(&first), Point::zero());
    }

    #[test]
    fn registration_is_idempotent() {
        let mut world: World = World::new(Vector2::zero(), 0.1);
        let body: SharedBody = boxed_body(BodyKind::Dynamic, Point::zero());
        let absent: SharedBody = boxed_body(BodyKind::Dynamic, Point::zero());

        world.add_body(&body);
        world.add_body(&body);
        assert_eq!(world.len(), 1);

        world.remove_body(&absent);
        assert_eq!(world.len(), 1);

        world.remove_body(&body);
        assert!(world.is_empty());
        assert!(!world.contains(&body));
    }

    #[test]
    fn removed_body_drops_its_collision_references() {
        let mut world: World = World::new(Vector2::zero(), 0.1);
        let floor: SharedBody = boxed_body(BodyKind::Static, Point::zero());
        let ball: SharedBody = boxed_body(BodyKind::Dynamic, Point { x: 0.0, y: 0.9 });
        world.add_body(&floor);
        world.add_body(&ball);

        world.update(0.15);
        assert!(ball
            .borrow()
            .max_collision_depth(world.collisions())
            .is_some());

        world.remove_body(&ball);
        assert!(ball
            .borrow()
            .max_collision_depth(world.collisions())
            .is_none());
    }

    #[test]
    fn kinematic_mover_pushes_but_is_never_pushed() {
        let mut world: World = World::new(Vector2::zero(), 0.1);
        let platform: SharedBody = boxed_body(BodyKind::Kinematic, Point::zero());
        platform
            .borrow_mut()
            .set_velocity(Vector2 { x: 0.3, y: 0.0 });
        let ball: SharedBody = boxed_body(BodyKind::Dynamic, Point { x: 0.0, y: 0.9 });
        world.add_body(&platform);
        world.add_body(&ball);

        world.update(0.15);

        // the mover translated by exactly one step of its velocity
        assert_eq!(
            position_of(&platform),
            Point {
                x: 0.3 * 0.1,
                y: 0.0
            }
        );
        assert_eq!(
            platform.borrow().velocity(),
            Vector2 { x: 0.3, y: 0.0 }
        );
        // the dynamic side took the whole positional correction
        assert!(position_of(&ball).y > 0.9);
    }
}
