//! Static scene bodies and the registry gravity queries read from.
//!
//! Bodies carry a per-axis scale measured against a unit sphere mesh of
//! radius [`UNIT_SPHERE_RADIUS`], so a planet of radius 5000 has scale 100.

use bevy_ecs::prelude::Resource;
use glam::Vec3;
use rapier3d::prelude::*;

use crate::PhysicsWorld;

/// Radius of the reference mesh at scale one.
pub const UNIT_SPHERE_RADIUS: f32 = 50.0;

/// A static body known to the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneBody {
    pub body: RigidBodyHandle,
    pub collider: ColliderHandle,
    /// Per-axis scale against the reference mesh.
    pub scale: Vec3,
    /// Explicitly marked as a gravity source.
    pub gravity_source: bool,
}

/// Registry of scene bodies, in insertion order.
#[derive(Resource, Clone, Debug, Default)]
pub struct SceneBodies {
    bodies: Vec<SceneBody>,
}

impl SceneBodies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, body: SceneBody) {
        self.bodies.push(body);
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneBody> {
        self.bodies.iter()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Marks or unmarks the body as a gravity source. Returns `false` if it
    /// is not registered.
    pub fn set_gravity_source(&mut self, body: RigidBodyHandle, tagged: bool) -> bool {
        match self.bodies.iter_mut().find(|b| b.body == body) {
            Some(entry) => {
                entry.gravity_source = tagged;
                true
            }
            None => false,
        }
    }

    /// Drops the body from the registry and from `physics`.
    pub fn remove(&mut self, physics: &mut PhysicsWorld, body: RigidBodyHandle) -> bool {
        let Some(index) = self.bodies.iter().position(|b| b.body == body) else {
            return false;
        };
        self.bodies.remove(index);
        physics.rigid_body_set.remove(
            body,
            &mut physics.island_manager,
            &mut physics.collider_set,
            &mut physics.impulse_joint_set,
            &mut physics.multibody_joint_set,
            true,
        );
        true
    }
}

fn insert_fixed(
    physics: &mut PhysicsWorld,
    center: Vec3,
    collider: Collider,
) -> (RigidBodyHandle, ColliderHandle) {
    let body = RigidBodyBuilder::fixed()
        .translation(Vector::new(center.x, center.y, center.z))
        .build();
    let body = physics.rigid_body_set.insert(body);
    let collider =
        physics
            .collider_set
            .insert_with_parent(collider, body, &mut physics.rigid_body_set);
    (body, collider)
}

/// Spawns a static sphere planet and registers it.
pub fn spawn_planet(
    physics: &mut PhysicsWorld,
    scene: &mut SceneBodies,
    center: Vec3,
    radius: f32,
    gravity_source: bool,
) -> SceneBody {
    let (body, collider) = insert_fixed(physics, center, ColliderBuilder::ball(radius).build());
    let entry = SceneBody {
        body,
        collider,
        scale: Vec3::splat(radius / UNIT_SPHERE_RADIUS),
        gravity_source,
    };
    scene.register(entry);
    tracing::debug!(?center, radius, gravity_source, "planet spawned");
    entry
}

/// Spawns a static box, such as a floor slab, and registers it untagged.
pub fn spawn_floor(
    physics: &mut PhysicsWorld,
    scene: &mut SceneBodies,
    center: Vec3,
    half_extents: Vec3,
) -> SceneBody {
    let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z).build();
    let (body, collider) = insert_fixed(physics, center, collider);
    let entry = SceneBody {
        body,
        collider,
        scale: half_extents / UNIT_SPHERE_RADIUS,
        gravity_source: false,
    };
    scene.register(entry);
    entry
}

/// Spawns a small static ball and registers it untagged.
pub fn spawn_prop(
    physics: &mut PhysicsWorld,
    scene: &mut SceneBodies,
    center: Vec3,
    radius: f32,
) -> SceneBody {
    let (body, collider) = insert_fixed(physics, center, ColliderBuilder::ball(radius).build());
    let entry = SceneBody {
        body,
        collider,
        scale: Vec3::splat(radius / UNIT_SPHERE_RADIUS),
        gravity_source: false,
    };
    scene.register(entry);
    entry
}
