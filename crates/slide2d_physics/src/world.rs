//! Physics world holding the static obstacles that sweeps are tested against

use crate::body::{ColliderKey, StaticCollider};
use crate::collision::{sweep_collider, CollisionFilter, SweepContact};
use crate::query::ShapeQuery;
use crate::shapes::Collider;
use slide2d_math::Vec2;
use slotmap::SlotMap;

/// Brute-force collection of static colliders
///
/// Every sweep tests every collider. There is no broad phase; worlds are
/// expected to be small enough that a linear scan per sweep is fine.
#[derive(Clone, Debug, Default)]
pub struct PhysicsWorld {
    colliders: SlotMap<ColliderKey, StaticCollider>,
}

impl PhysicsWorld {
    /// Create an empty world
    pub fn new() -> Self {
        Self {
            colliders: SlotMap::with_key(),
        }
    }

    /// Add a static collider and return its key
    pub fn add_collider(&mut self, collider: StaticCollider) -> ColliderKey {
        self.colliders.insert(collider)
    }

    /// Remove a collider and return it
    pub fn remove_collider(&mut self, key: ColliderKey) -> Option<StaticCollider> {
        self.colliders.remove(key)
    }

    pub fn get_collider(&self, key: ColliderKey) -> Option<&StaticCollider> {
        self.colliders.get(key)
    }

    pub fn get_collider_mut(&mut self, key: ColliderKey) -> Option<&mut StaticCollider> {
        self.colliders.get_mut(key)
    }

    /// Number of colliders in the world
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// Iterate over all colliders with their keys
    pub fn colliders(&self) -> impl Iterator<Item = (ColliderKey, &StaticCollider)> + '_ {
        self.colliders.iter()
    }

    /// Sweep `shape` through every collider that agrees with `filter`
    ///
    /// Returns all contacts within `max_distance`, nearest first. A zero
    /// direction or a non-positive distance yields no contacts.
    pub fn sweep_filtered(
        &self,
        shape: &Collider,
        direction: Vec2,
        max_distance: f32,
        filter: CollisionFilter,
    ) -> Vec<SweepContact> {
        let direction = direction.normalized();
        if direction == Vec2::ZERO || max_distance.is_nan() || max_distance <= 0.0 {
            return Vec::new();
        }

        let mut contacts: Vec<SweepContact> = self
            .colliders
            .values()
            .filter(|obstacle| filter.collides_with(&obstacle.filter))
            .filter_map(|obstacle| sweep_collider(shape, &obstacle.collider, direction, max_distance))
            .collect();

        contacts.sort_by(|a, b| a.travel_distance.total_cmp(&b.travel_distance));
        contacts
    }

    /// View of this world that sweeps with `filter`
    pub fn query(&self, filter: CollisionFilter) -> FilteredQuery<'_> {
        FilteredQuery { world: self, filter }
    }
}

/// Sweeps the default filter; use [`PhysicsWorld::query`] for anything else
impl ShapeQuery for PhysicsWorld {
    fn sweep(&self, shape: &Collider, direction: Vec2, max_distance: f32) -> Vec<SweepContact> {
        self.sweep_filtered(shape, direction, max_distance, CollisionFilter::default())
    }
}

/// A [`PhysicsWorld`] paired with the filter of the body doing the sweeping
#[derive(Clone, Copy, Debug)]
pub struct FilteredQuery<'w> {
    world: &'w PhysicsWorld,
    filter: CollisionFilter,
}

impl FilteredQuery<'_> {
    pub fn filter(&self) -> CollisionFilter {
        self.filter
    }
}

impl ShapeQuery for FilteredQuery<'_> {
    fn sweep(&self, shape: &Collider, direction: Vec2, max_distance: f32) -> Vec<SweepContact> {
        self.world.sweep_filtered(shape, direction, max_distance, self.filter)
    }
}
