use crate::{Entity, EntityKey, EntityRecord};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Loads entities referenced by other entities.
pub trait EntityStore: Send + Sync {
    fn load(&self, key: &EntityKey) -> Option<Arc<dyn EntityRecord>>;
}

/// The route being rendered, e.g. `entity.node.canonical` with `{node: 1}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteMatch {
    pub route_name: String,
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
}

impl RouteMatch {
    pub fn new(route_name: &str) -> Self {
        Self {
            route_name: route_name.to_string(),
            parameters: BTreeMap::new(),
        }
    }

    pub fn with_parameter(mut self, name: &str, value: &str) -> Self {
        self.parameters.insert(name.to_string(), value.to_string());
        self
    }

    /// The canonical route of an entity.
    pub fn canonical(key: &EntityKey) -> Self {
        Self::new(&format!("entity.{}.canonical", key.entity_type))
            .with_parameter(&key.entity_type, &key.id)
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    /// The entity addressed by an `entity.{type}.canonical` route.
    pub fn canonical_entity_key(&self) -> Option<EntityKey> {
        let entity_type = self
            .route_name
            .strip_prefix("entity.")?
            .strip_suffix(".canonical")?;
        let id = self.parameter(entity_type)?;
        Some(EntityKey::new(entity_type, id))
    }
}

/// Resolves the primary entity shown on a route.
pub trait RouteEntityResolver: Send + Sync {
    fn entity_for_route(&self, route: &RouteMatch) -> Option<Arc<dyn EntityRecord>>;
}

/// In-memory entity storage.
#[derive(Default, Clone)]
pub struct MemoryEntityStore {
    entities: HashMap<EntityKey, Arc<Entity>>,
}

impl MemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entity: Entity) {
        self.entities.insert(entity.key.clone(), Arc::new(entity));
    }

    pub fn get(&self, key: &EntityKey) -> Option<&Entity> {
        self.entities.get(key).map(Arc::as_ref)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl FromIterator<Entity> for MemoryEntityStore {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        let mut store = Self::new();
        for entity in iter {
            store.insert(entity);
        }
        store
    }
}

impl EntityStore for MemoryEntityStore {
    fn load(&self, key: &EntityKey) -> Option<Arc<dyn EntityRecord>> {
        self.entities
            .get(key)
            .map(|e| Arc::clone(e) as Arc<dyn EntityRecord>)
    }
}

impl RouteEntityResolver for MemoryEntityStore {
    fn entity_for_route(&self, route: &RouteMatch) -> Option<Arc<dyn EntityRecord>> {
        self.load(&route.canonical_entity_key()?)
    }
}
