//! `physicscore::bodies` submodule implements physical bodies - the carriers of mass, friction,
//! restitution, velocity and collision shapes that [`World`](super::world::World) simulates.
//!

use crate::mathcore::{transforms::Transformable, vectors::Vector2};
use crate::physicscore::{
    collisions::{CollisionArena, CollisionData, CollisionRef},
    shapes::ConvexPolygon,
};
use bitflags::bitflags;
use std::{cell::RefCell, fmt, rc::Rc};

/// `SharedTransform` type alias names the transform capability a body binds to.
///
/// The transform is owned by the surrounding composition layer; the body only holds a handle and
/// resolves it once at construction. Requiring the handle in [`Body::new`] is the static
/// counterpart of a runtime "has transform" check.
///
pub type SharedTransform = Rc<RefCell<dyn Transformable>>;
/// `SharedBody` type alias names the shared handle under which bodies are registered in a world.
///
pub type SharedBody = Rc<RefCell<Body>>;

bitflags!(
    /// [`Layers`] bitflag struct is a 16-bit mask that gates which body pairs may collide.
    ///
    /// Two bodies are allowed to collide only if their masks intersect.
    ///
    /// # Example
    /// ```rust
    /// # use ggphysics::physicscore::bodies::Layers;
    /// let scenery: Layers = Layers::LAYER_0 | Layers::LAYER_1;
    /// let actors: Layers = Layers::LAYER_1;
    /// assert!(scenery.intersects(actors));
    /// assert!(!(Layers::LAYER_2).intersects(actors));
    /// ```
    ///
    pub struct Layers : u16 {
        /// Collision layer 0.
        ///
        const LAYER_0 = 1 << 0;
        /// Collision layer 1.
        ///
        const LAYER_1 = 1 << 1;
        /// Collision layer 2.
        ///
        const LAYER_2 = 1 << 2;
        /// Collision layer 3.
        ///
        const LAYER_3 = 1 << 3;
        /// Collision layer 4.
        ///
        const LAYER_4 = 1 << 4;
        /// Collision layer 5.
        ///
        const LAYER_5 = 1 << 5;
        /// Collision layer 6.
        ///
        const LAYER_6 = 1 << 6;
        /// Collision layer 7.
        ///
        const LAYER_7 = 1 << 7;
        /// Collision layer 8.
        ///
        const LAYER_8 = 1 << 8;
        /// Collision layer 9.
        ///
        const LAYER_9 = 1 << 9;
        /// Collision layer 10.
        ///
        const LAYER_10 = 1 << 10;
        /// Collision layer 11.
        ///
        const LAYER_11 = 1 << 11;
        /// Collision layer 12.
        ///
        const LAYER_12 = 1 << 12;
        /// Collision layer 13.
        ///
        const LAYER_13 = 1 << 13;
        /// Collision layer 14.
        ///
        const LAYER_14 = 1 << 14;
        /// Collision layer 15.
        ///
        const LAYER_15 = 1 << 15;
    }
);
impl Default for Layers {
    /// New bodies start on every layer and collide with everything until narrowed down.
    ///
    fn default() -> Self {
        Layers::all()
    }
}

/// [`BodyKind`] enum lists categories of physical bodies by how simulation moves them.
///
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BodyKind {
    /// Static bodies never move; they are the immovable side of collisions.
    ///
    Static,
    /// Kinematic bodies integrate position from velocity but ignore forces and are never pushed
    /// by the impulse solver (moving platforms, scripted movers).
    ///
    Kinematic,
    /// Dynamic bodies integrate forces and respond to impulses.
    ///
    Dynamic,
}

/// [`Body`] struct represents a physical body: mass, friction, restitution, velocity, collision
/// layers, a set of convex shapes, and a handle to the externally-owned transform it moves.
///
/// Per step, the body carries lightweight references into the world's
/// [`CollisionArena`] which gameplay code queries for grounding checks, tag lookups and
/// penetration depths.
///
/// # Example
/// ```rust
/// # use ggphysics::physicscore::bodies::{Body, BodyKind, SharedTransform};
/// # use ggphysics::physicscore::shapes::ConvexPolygon;
/// # use ggphysics::mathcore::transforms::Transform2D;
/// # use ggphysics::mathcore::Size;
/// # use std::{cell::RefCell, rc::Rc};
/// let transform: SharedTransform = Rc::new(RefCell::new(Transform2D::default()));
/// let mut body: Body = Body::new(BodyKind::Dynamic, transform);
/// assert!(body.set_mass(10.0));
/// assert!(!body.set_mass(-1.0));  // rejected, state intact
/// assert_eq!(body.mass(), 10.0);
///
/// let shape = Rc::new(ConvexPolygon::rectangle(Size::from_value(1.0), Size::from_value(1.0)));
/// assert!(body.add_shape(Rc::clone(&shape)));
/// assert!(!body.add_shape(shape));  // duplicates are rejected
/// ```
///
pub struct Body {
    /// Category by which simulation moves this body.
    ///
    kind: BodyKind,
    /// Trigger bodies record overlaps but never get a physical response.
    ///
    trigger: bool,

    /// Mass of a body; always positive.
    ///
    mass: f32,
    /// Cached inverse of mass.
    ///
    inverse_mass: f32,
    /// Friction coefficient of body's surface; always positive.
    ///
    friction: f32,
    /// Cached inverse of friction.
    ///
    inverse_friction: f32,
    /// Restitution of a body - fraction of normal-direction kinetic energy that collisions
    /// preserve; never negative.
    ///
    bounce: f32,

    /// Collision layer mask.
    ///
    layers: Layers,
    /// Optional tag for gameplay-side collision filtering.
    ///
    tag: Option<String>,

    /// Current velocity.
    ///
    velocity: Vector2,
    /// Force accumulator; drained into velocity on each dynamic step.
    ///
    force: Vector2,

    /// Shapes owned by this body; no duplicates.
    ///
    shapes: Vec<Rc<ConvexPolygon>>,
    /// References into the collision arena for the current step.
    ///
    collisions: Vec<CollisionRef>,

    /// Handle to the externally-owned transform.
    ///
    transform: SharedTransform,
}
impl Body {
    /// Constructs body of given kind bound to given transform.
    ///
    /// Defaults: mass 1, friction 1, bounce 0, all layers, no trigger, no tag, no shapes.
    ///
    pub fn new(kind: BodyKind, transform: SharedTransform) -> Body {
        Body {
            kind,
            trigger: false,
            mass: 1.0,
            inverse_mass: 1.0,
            friction: 1.0,
            inverse_friction: 1.0,
            bounce: 0.0,
            layers: Layers::default(),
            tag: None,
            velocity: Vector2::zero(),
            force: Vector2::zero(),
            shapes: Vec::new(),
            collisions: Vec::new(),
            transform,
        }
    }

    /// Returns category of this body.
    ///
    pub fn kind(&self) -> BodyKind {
        self.kind
    }
    /// Returns whether this body is dynamic.
    ///
    pub fn is_dynamic(&self) -> bool {
        self.kind == BodyKind::Dynamic
    }
    /// Returns whether this body is a trigger.
    ///
    pub fn is_trigger(&self) -> bool {
        self.trigger
    }
    /// Makes this body a trigger or a regular body.
    ///
    pub fn set_trigger(&mut self, trigger: bool) {
        self.trigger = trigger;
    }

    /// Returns mass of a body.
    ///
    pub fn mass(&self) -> f32 {
        self.mass
    }
    /// Returns cached inverse of body's mass.
    ///
    pub fn inverse_mass(&self) -> f32 {
        self.inverse_mass
    }
    /// Sets mass of a body; values that are not strictly positive are rejected with `false` and
    /// leave state unchanged.
    ///
    pub fn set_mass(&mut self, mass: f32) -> bool {
        if !(mass > 0.0) {
            return false;
        }
        self.mass = mass;
        self.inverse_mass = 1.0 / mass;
        true
    }

    /// Returns friction coefficient of a body.
    ///
    pub fn friction(&self) -> f32 {
        self.friction
    }
    /// Returns cached inverse of body's friction.
    ///
    pub fn inverse_friction(&self) -> f32 {
        self.inverse_friction
    }
    /// Sets friction of a body; values that are not strictly positive are rejected with `false`
    /// and leave state unchanged.
    ///
    pub fn set_friction(&mut self, friction: f32) -> bool {
        if !(friction > 0.0) {
            return false;
        }
        self.friction = friction;
        self.inverse_friction = 1.0 / friction;
        true
    }

    /// Returns restitution of a body.
    ///
    pub fn bounce(&self) -> f32 {
        self.bounce
    }
    /// Sets restitution of a body; negative values are rejected with `false` and leave state
    /// unchanged.
    ///
    pub fn set_bounce(&mut self, bounce: f32) -> bool {
        if !(bounce >= 0.0) {
            return false;
        }
        self.bounce = bounce;
        true
    }

    /// Returns collision layer mask of a body.
    ///
    pub fn layers(&self) -> Layers {
        self.layers
    }
    /// Sets collision layer mask of a body.
    ///
    pub fn set_layers(&mut self, layers: Layers) {
        self.layers = layers;
    }
    /// Returns whether layer masks of two bodies intersect.
    ///
    /// Only pairs that share a layer may collide.
    ///
    pub fn shares_layer(&self, other: &Body) -> bool {
        self.layers.intersects(other.layers)
    }

    /// Returns tag of a body.
    ///
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }
    /// Sets or clears tag of a body.
    ///
    pub fn set_tag(&mut self, tag: Option<String>) {
        self.tag = tag;
    }

    /// Returns current velocity of a body.
    ///
    pub fn velocity(&self) -> Vector2 {
        self.velocity
    }
    /// Overwrites velocity of a body.
    ///
    /// This bypasses physical accuracy and exists for gameplay resets.
    ///
    pub fn set_velocity(&mut self, velocity: Vector2) {
        self.velocity = velocity;
    }
    /// Adds given velocity to body's current velocity.
    ///
    pub fn add_velocity(&mut self, velocity: Vector2) {
        self.velocity += velocity;
    }
    /// Accumulates force that the next dynamic step will integrate into velocity.
    ///
    pub fn add_force(&mut self, force: Vector2) {
        self.force += force;
    }

    /// Returns handle to the transform this body moves.
    ///
    pub fn transform(&self) -> &SharedTransform {
        &self.transform
    }

    /// Adds a shape to a body; the same shape instance is rejected with `false`.
    ///
    pub fn add_shape(&mut self, shape: Rc<ConvexPolygon>) -> bool {
        if self.shapes.iter().any(|owned| Rc::ptr_eq(owned, &shape)) {
            return false;
        }
        self.shapes.push(shape);
        true
    }
    /// Returns shared slice with body's shapes.
    ///
    pub fn shapes(&self) -> &[Rc<ConvexPolygon>] {
        &self.shapes
    }
    /// Returns local-frame broad-phase radius of a body - the largest of its shapes' radii -
    /// or `None` for a shapeless body, which cannot collide.
    ///
    /// Callers must scale the radius by the max axis scale of body's transform before use.
    ///
    pub fn broad_radius(&self) -> Option<f32> {
        self.shapes
            .iter()
            .map(|shape| shape.broad_radius())
            .fold(None, |radius, r| Some(radius.unwrap_or(0.0).max(r)))
    }

    /// Advances body state by one fixed step.
    ///
    /// Dynamic non-trigger bodies integrate the force accumulator into velocity and drain it;
    /// dynamic and kinematic bodies translate their transform by `velocity * delta`; the
    /// per-step collision list is dropped for the step to come.
    ///
    pub fn step(&mut self, delta: f32) {
        if self.kind == BodyKind::Dynamic && !self.trigger {
            self.velocity += self.force * self.inverse_mass;
            self.force = Vector2::zero();
        }
        if self.kind != BodyKind::Static {
            self.transform
                .borrow_mut()
                .translate_on(self.velocity * delta);
        }
        self.collisions.clear();
    }

    /// Stores reference to a collision this body participated in during the current step.
    ///
    pub(crate) fn record_collision(&mut self, reference: CollisionRef) {
        self.collisions.push(reference);
    }
    /// Drops all per-step collision references.
    ///
    /// Called when a body leaves its world, so no reference outlives the arena records it
    /// points into.
    ///
    pub(crate) fn clear_collisions(&mut self) {
        self.collisions.clear();
    }

    /// Returns this step's collision with given body, or `None` if the two did not collide.
    ///
    pub fn collision_with<'a>(
        &self,
        collisions: &'a CollisionArena,
        other: &SharedBody,
    ) -> Option<&'a CollisionData> {
        self.collisions.iter().find_map(|&reference| {
            let collision: &CollisionData = collisions.get(reference);
            Rc::ptr_eq(collision.other(reference), other).then_some(collision)
        })
    }
    /// Returns this step's collision with a body that carries given tag, or `None` if there is
    /// no such collision.
    ///
    pub fn collision_with_tag<'a>(
        &self,
        collisions: &'a CollisionArena,
        tag: &str,
    ) -> Option<&'a CollisionData> {
        self.collisions.iter().find_map(|&reference| {
            let collision: &CollisionData = collisions.get(reference);
            (collision.other(reference).borrow().tag() == Some(tag)).then_some(collision)
        })
    }
    /// Returns whether this step produced a collision with a body that carries given tag.
    ///
    pub fn has_collision_with_tag(&self, collisions: &CollisionArena, tag: &str) -> bool {
        self.collision_with_tag(collisions, tag).is_some()
    }

    /// Returns the largest dot product of this step's collision normals with given axis, or
    /// `None` if the body did not collide.
    ///
    /// Grounding checks dot against the world up axis: a result close to one means the body
    /// rests on a surface below it.
    ///
    pub fn dot_collision_normals(&self, collisions: &CollisionArena, axis: Vector2) -> Option<f32> {
        self.collisions
            .iter()
            .map(|reference| collisions.get(*reference).normal().dot_product(axis))
            .fold(None, |max, dot| Some(max.unwrap_or(f32::NEG_INFINITY).max(dot)))
    }
    /// Returns the largest penetration depth among this step's collisions, or `None` if the body
    /// did not collide.
    ///
    pub fn max_collision_depth(&self, collisions: &CollisionArena) -> Option<f32> {
        self.collisions
            .iter()
            .map(|reference| collisions.get(*reference).depth())
            .fold(None, |max, depth| {
                Some(max.unwrap_or(f32::NEG_INFINITY).max(depth))
            })
    }
    /// Returns whether any of this step's collisions penetrates deeper than given depth.
    ///
    pub fn has_collision_deeper_than(&self, collisions: &CollisionArena, depth: f32) -> bool {
        self.max_collision_depth(collisions)
            .is_some_and(|max| max > depth)
    }
}
impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Body")
            .field("kind", &self.kind)
            .field("trigger", &self.trigger)
            .field("mass", &self.mass)
            .field("friction", &self.friction)
            .field("bounce", &self.bounce)
            .field("layers", &self.layers)
            .field("tag", &self.tag)
            .field("velocity", &self.velocity)
            .field("shapes", &self.shapes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{Body, BodyKind, Layers};
    use crate::mathcore::{
        transforms::{Transform2D, Translatable},
        vectors::{Point, Vector2},
        Size,
    };
    use crate::physicscore::shapes::ConvexPolygon;
    use std::{cell::RefCell, rc::Rc};

    fn body(kind: BodyKind) -> Body {
        Body::new(kind, Rc::new(RefCell::new(Transform2D::default())))
    }

    #[test]
    fn mutators_reject_invalid_configuration() {
        let mut subject: Body = body(BodyKind::Dynamic);

        assert!(!subject.set_mass(0.0));
        assert!(!subject.set_mass(-2.0));
        assert!(!subject.set_mass(f32::NAN));
        assert_eq!((subject.mass(), subject.inverse_mass()), (1.0, 1.0));
        assert!(subject.set_mass(4.0));
        assert_eq!((subject.mass(), subject.inverse_mass()), (4.0, 0.25));

        assert!(!subject.set_friction(0.0));
        assert_eq!(subject.friction(), 1.0);
        assert!(subject.set_friction(0.5));
        assert_eq!(subject.inverse_friction(), 2.0);

        assert!(!subject.set_bounce(-0.1));
        assert_eq!(subject.bounce(), 0.0);
        assert!(subject.set_bounce(0.0));
        assert!(subject.set_bounce(1.5));
        assert_eq!(subject.bounce(), 1.5);
    }

    #[test]
    fn step_integrates_and_drains_forces() {
        let mut subject: Body = body(BodyKind::Dynamic);
        assert!(subject.set_mass(2.0));

        subject.add_force(Vector2 { x: 2.0, y: 0.0 });
        subject.step(0.5);
        assert_eq!(subject.velocity(), Vector2 { x: 1.0, y: 0.0 });
        assert_eq!(
            subject.transform().borrow().origin(),
            Point { x: 0.5, y: 0.0 }
        );

        // the force buffer was drained, velocity carries over
        subject.step(0.5);
        assert_eq!(subject.velocity(), Vector2 { x: 1.0, y: 0.0 });
        assert_eq!(
            subject.transform().borrow().origin(),
            Point { x: 1.0, y: 0.0 }
        );
    }

    #[test]
    fn dynamic_trigger_ignores_forces_but_moves() {
        let mut subject: Body = body(BodyKind::Dynamic);
        subject.set_trigger(true);
        subject.set_velocity(Vector2 { x: 1.0, y: 0.0 });

        subject.add_force(Vector2 { x: 100.0, y: 0.0 });
        subject.step(1.0);

        assert_eq!(subject.velocity(), Vector2 { x: 1.0, y: 0.0 });
        assert_eq!(
            subject.transform().borrow().origin(),
            Point { x: 1.0, y: 0.0 }
        );
    }

    #[test]
    fn static_body_never_translates() {
        let mut subject: Body = body(BodyKind::Static);
        subject.set_velocity(Vector2 { x: 5.0, y: 5.0 });

        subject.step(1.0);
        assert_eq!(subject.transform().borrow().origin(), Point::zero());
    }

    #[test]
    fn shapes_are_deduplicated_by_identity() {
        let mut subject: Body = body(BodyKind::Dynamic);
        assert!(subject.broad_radius().is_none());

        let small = Rc::new(ConvexPolygon::rectangle(
            Size::from_value(1.0),
            Size::from_value(1.0),
        ));
        let wide = Rc::new(ConvexPolygon::rectangle(
            Size::from_value(4.0),
            Size::from_value(1.0),
        ));

        assert!(subject.add_shape(Rc::clone(&small)));
        assert!(!subject.add_shape(Rc::clone(&small)));
        // an equal but distinct polygon is a different shape
        assert!(subject.add_shape(Rc::new(ConvexPolygon::rectangle(
            Size::from_value(1.0),
            Size::from_value(1.0),
        ))));
        assert!(subject.add_shape(wide));
        assert_eq!(subject.shapes().len(), 3);

        // body radius is the largest of its shapes' radii
        assert_eq!(subject.broad_radius(), Some(4.25_f32.sqrt()));
    }

    #[test]
    fn layer_masks_gate_pairs() {
        let mut first: Body = body(BodyKind::Dynamic);
        let mut second: Body = body(BodyKind::Static);

        assert!(first.shares_layer(&second));

        first.set_layers(Layers::LAYER_0 | Layers::LAYER_3);
        second.set_layers(Layers::LAYER_3 | Layers::LAYER_8);
        assert!(first.shares_layer(&second));
        assert!(second.shares_layer(&first));

        second.set_layers(Layers::LAYER_1);
        assert!(!first.shares_layer(&second));
    }
}
