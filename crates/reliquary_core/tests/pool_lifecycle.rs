//! # Pool Lifecycle Tests
//!
//! Drives the registry through a host that tracks every live object, and
//! checks that the registry's view and the host's view never disagree.
//!
//! Run with: cargo test --package reliquary_core --test pool_lifecycle

use std::collections::HashMap;

use reliquary_core::{Lifecycle, PoolRegistry, PrototypeKey, SpawnHost};
use reliquary_shared::{Quaternion, Vec3};

#[derive(Debug, Clone, PartialEq)]
struct WorldObject {
    prototype: PrototypeKey,
    active: bool,
    position: Vec3,
}

/// Minimal world: a map of objects keyed by entity id.
#[derive(Default)]
struct World {
    next_id: u64,
    objects: HashMap<u64, WorldObject>,
}

impl SpawnHost for World {
    type Handle = u64;

    fn create_instance(&mut self, key: &PrototypeKey) -> u64 {
        self.next_id += 1;
        self.objects.insert(
            self.next_id,
            WorldObject {
                prototype: key.clone(),
                active: false,
                position: Vec3::ZERO,
            },
        );
        self.next_id
    }

    fn set_active(&mut self, handle: u64, active: bool) {
        if let Some(obj) = self.objects.get_mut(&handle) {
            obj.active = active;
        }
    }

    fn set_placement(&mut self, handle: u64, position: Vec3, _rotation: Quaternion) {
        if let Some(obj) = self.objects.get_mut(&handle) {
            obj.position = position;
        }
    }

    fn apply_impulse(&mut self, _handle: u64, _impulse: Vec3) {}
}

#[test]
fn registry_and_world_agree_after_churn() {
    let mut world = World::default();
    let mut registry = PoolRegistry::new();
    let keys = [PrototypeKey::new("exp-small"), PrototypeKey::new("health-small")];
    let mut live: Vec<u64> = Vec::new();

    // Deterministic churn: spawn in waves, release every other survivor
    for wave in 0..20u32 {
        for i in 0..5u32 {
            let key = &keys[((wave + i) % 2) as usize];
            let pos = Vec3::new(wave as f32, i as f32, 0.0);
            live.push(registry.acquire(&mut world, key, pos, Quaternion::IDENTITY));
        }
        let mut keep = Vec::new();
        for (i, handle) in live.drain(..).enumerate() {
            if i % 2 == 0 {
                assert!(registry.release(&mut world, handle));
            } else {
                keep.push(handle);
            }
        }
        live = keep;
    }

    for (id, obj) in &world.objects {
        let state = registry.state(*id).expect("every world object came from the registry");
        assert_eq!(obj.active, state == Lifecycle::Active);
        assert_eq!(registry.key_of(*id), Some(&obj.prototype));

        let pool = registry.pool(obj.prototype.as_str()).unwrap();
        assert_eq!(pool.contains(*id), !obj.active);
    }

    let active_in_world = world.objects.values().filter(|o| o.active).count();
    assert_eq!(active_in_world, live.len());
    assert_eq!(registry.instance_count(), world.objects.len());
}

#[test]
fn reacquired_instance_moves_to_new_position() {
    let mut world = World::default();
    let mut registry = PoolRegistry::new();
    let key = PrototypeKey::new("exp-medium");

    let h = registry.acquire(&mut world, &key, Vec3::new(1.0, 0.0, 0.0), Quaternion::IDENTITY);
    registry.release(&mut world, h);
    let again = registry.acquire(&mut world, &key, Vec3::new(0.0, 9.0, 0.0), Quaternion::IDENTITY);

    assert_eq!(h, again);
    let obj = &world.objects[&again];
    assert!(obj.active);
    assert_eq!(obj.position, Vec3::new(0.0, 9.0, 0.0));
}
