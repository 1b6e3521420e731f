//! Identity-keyed entity store
//!
//! Two parallel structures: a generation-checked arena owning every entity,
//! and a flat draw list of keys the dispatcher iterates each frame. Entries
//! are only ever removed from both together, so the draw list cannot hold a
//! key that resolves to a dead or recycled arena slot.

use slotmap::{new_key_type, SlotMap};

use super::game_object::GameObject;
use crate::render::backend::RenderBackend;

new_key_type! {
    /// Stable, generation-checked entity key
    pub struct ObjectKey;
}

/// Arena of game objects plus the flat per-frame iteration list
#[derive(Default)]
pub struct SceneRegistry {
    objects: SlotMap<ObjectKey, GameObject>,
    draw_list: Vec<ObjectKey>,
    next_id: u32,
}

impl SceneRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity, assigning its registry-unique numeric id.
    ///
    /// The entity is appended to the draw list immediately.
    pub fn spawn(&mut self, mut object: GameObject) -> ObjectKey {
        self.next_id += 1;
        object.set_id(self.next_id);

        log::info!("Registered game object '{}'.", object.name());

        let key = self.objects.insert(object);
        self.draw_list.push(key);
        key
    }

    /// Remove an entity by key, releasing its owned GPU buffers.
    ///
    /// Removes from the arena and the draw list together. Returns false for
    /// keys that are no longer (or never were) live.
    pub fn despawn(&mut self, key: ObjectKey, backend: &mut dyn RenderBackend) -> bool {
        let Some(mut object) = self.objects.remove(key) else {
            return false;
        };
        object.release_gpu_resources(backend);
        self.draw_list.retain(|k| *k != key);

        log::info!("Destroyed game object '{}'!", object.name());
        true
    }

    /// Look up an entity by key
    pub fn get(&self, key: ObjectKey) -> Option<&GameObject> {
        self.objects.get(key)
    }

    /// Mutable lookup by key
    pub fn get_mut(&mut self, key: ObjectKey) -> Option<&mut GameObject> {
        self.objects.get_mut(key)
    }

    /// Find the key of the first entity with the given name
    pub fn find_by_name(&self, name: &str) -> Option<ObjectKey> {
        self.draw_list
            .iter()
            .copied()
            .find(|key| self.objects.get(*key).is_some_and(|o| o.name() == name))
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True when no entities are registered
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// The flat iteration list of live entity keys
    pub fn draw_list(&self) -> &[ObjectKey] {
        &self.draw_list
    }

    /// Iterate the draw list in insertion order
    pub fn iter_draw_list(&self) -> impl Iterator<Item = &GameObject> {
        self.draw_list
            .iter()
            .filter_map(move |key| self.objects.get(*key))
    }

    /// Remove every entity, releasing owned GPU buffers (shutdown path)
    pub fn clear(&mut self, backend: &mut dyn RenderBackend) {
        for (_, object) in &mut self.objects {
            object.release_gpu_resources(backend);
        }
        self.objects.clear();
        self.draw_list.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::backend::RecordingBackend;
    use crate::render::CUBE_VERTICES;
    use crate::scene::ObjectKind;

    fn spawn_cube(
        registry: &mut SceneRegistry,
        backend: &mut RecordingBackend,
        name: &str,
    ) -> ObjectKey {
        let mesh = backend.create_mesh(&CUBE_VERTICES).unwrap();
        registry.spawn(GameObject::new(name, ObjectKind::Cube).with_mesh(mesh))
    }

    #[test]
    fn despawn_removes_from_arena_and_draw_list_together() {
        let mut backend = RecordingBackend::new();
        let mut registry = SceneRegistry::new();

        let keys: Vec<_> = (0..4)
            .map(|i| spawn_cube(&mut registry, &mut backend, &format!("cube{i}")))
            .collect();
        assert_eq!(registry.draw_list().len(), 4);

        assert!(registry.despawn(keys[1], &mut backend));

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.draw_list().len(), 3);
        assert!(!registry.draw_list().contains(&keys[1]));
        assert!(registry.get(keys[1]).is_none());
        // the destroyed entity's buffers were released
        assert_eq!(backend.live_mesh_count(), 3);
    }

    #[test]
    fn despawning_a_stale_key_is_rejected() {
        let mut backend = RecordingBackend::new();
        let mut registry = SceneRegistry::new();

        let key = spawn_cube(&mut registry, &mut backend, "cube");
        assert!(registry.despawn(key, &mut backend));
        assert!(!registry.despawn(key, &mut backend));
    }

    #[test]
    fn numeric_ids_are_unique() {
        let mut backend = RecordingBackend::new();
        let mut registry = SceneRegistry::new();

        let a = spawn_cube(&mut registry, &mut backend, "a");
        let b = spawn_cube(&mut registry, &mut backend, "b");
        assert_ne!(registry.get(a).unwrap().id(), registry.get(b).unwrap().id());
    }

    #[test]
    fn lookup_by_name_resolves_to_the_live_entity() {
        let mut backend = RecordingBackend::new();
        let mut registry = SceneRegistry::new();

        let key = spawn_cube(&mut registry, &mut backend, "target");
        spawn_cube(&mut registry, &mut backend, "other");

        assert_eq!(registry.find_by_name("target"), Some(key));
        assert_eq!(registry.find_by_name("missing"), None);
    }

    #[test]
    fn clear_releases_every_owned_buffer() {
        let mut backend = RecordingBackend::new();
        let mut registry = SceneRegistry::new();

        for i in 0..3 {
            spawn_cube(&mut registry, &mut backend, &format!("cube{i}"));
        }
        registry.clear(&mut backend);

        assert!(registry.is_empty());
        assert!(registry.draw_list().is_empty());
        assert_eq!(backend.live_mesh_count(), 0);
    }
}
