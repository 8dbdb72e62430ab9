// repository.rs — typed entity store over the cache abstraction.
//
// Each entity type gets its own namespace on the backing cache, so mixed
// types on one backend never collide. Ids are caller-assigned strings; an
// empty id on save gets a fresh UUID v4.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::cache::Cache;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("failed to serialize entity `{id}`: {source}")]
    Serialize { id: String, source: serde_json::Error },
    #[error("stored value for `{id}` is not a valid entity: {source}")]
    Deserialize { id: String, source: serde_json::Error },
}

/// A storable entity. `id` is the primary key; `with_id` lets the
/// repository assign one when it is empty.
pub trait Entity: Serialize + DeserializeOwned {
    fn id(&self) -> &str;
    fn with_id(self, id: String) -> Self;
}

pub struct Repository<T: Entity> {
    cache: Cache,
    _marker: PhantomData<T>,
}

impl<T: Entity> Repository<T> {
    /// Wrap a cache. Callers usually pass one namespaced per entity type:
    /// `Cache::new(backend).with_namespace("user")`.
    pub fn new(cache: Cache) -> Self {
        Self { cache, _marker: PhantomData }
    }

    /// Insert or update. An empty id gets a UUID v4. Returns the entity as
    /// stored, id included.
    pub fn save(&mut self, entity: T) -> Result<T, RepositoryError> {
        let entity = if entity.id().is_empty() {
            entity.with_id(Uuid::new_v4().to_string())
        } else {
            entity
        };
        let id = entity.id().to_string();
        let value = serde_json::to_value(&entity)
            .map_err(|source| RepositoryError::Serialize { id: id.clone(), source })?;
        self.cache.set(&id, value);
        Ok(entity)
    }

    pub fn find(&mut self, id: &str) -> Result<Option<T>, RepositoryError> {
        match self.cache.get(id) {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|source| RepositoryError::Deserialize { id: id.to_string(), source }),
            None => Ok(None),
        }
    }

    /// Every stored entity. Undecodable values are reported, not skipped.
    pub fn all(&mut self) -> Result<Vec<T>, RepositoryError> {
        let ids = self.cache.keys();
        let mut out = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(entity) = self.find(&id)? {
                out.push(entity);
            }
        }
        Ok(out)
    }

    /// Entities matching a predicate.
    pub fn find_where<F>(&mut self, predicate: F) -> Result<Vec<T>, RepositoryError>
    where
        F: Fn(&T) -> bool,
    {
        Ok(self.all()?.into_iter().filter(|e| predicate(e)).collect())
    }

    /// Returns true when the entity existed.
    pub fn remove(&mut self, id: &str) -> bool {
        self.cache.delete(id)
    }

    pub fn count(&self) -> usize {
        self.cache.len()
    }

    /// Persist the backing cache, where its backend has anything to persist.
    pub fn flush(&mut self) -> Result<(), crate::cache::CacheError> {
        self.cache.flush()
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryBackend;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct User {
        id: String,
        name: String,
        active: bool,
    }

    impl Entity for User {
        fn id(&self) -> &str {
            &self.id
        }
        fn with_id(mut self, id: String) -> Self {
            self.id = id;
            self
        }
    }

    fn repo() -> Repository<User> {
        Repository::new(Cache::new(Box::new(MemoryBackend::unbounded())).with_namespace("user"))
    }

    fn user(id: &str, name: &str) -> User {
        User { id: id.to_string(), name: name.to_string(), active: true }
    }

    #[test]
    fn save_and_find() {
        let mut r = repo();
        r.save(user("u1", "Ada")).unwrap();
        let found = r.find("u1").unwrap().unwrap();
        assert_eq!(found.name, "Ada");
        assert_eq!(r.find("u2").unwrap(), None);
    }

    #[test]
    fn empty_id_gets_uuid() {
        let mut r = repo();
        let stored = r.save(user("", "Ada")).unwrap();
        assert!(!stored.id.is_empty());
        assert!(Uuid::parse_str(&stored.id).is_ok());
        assert_eq!(r.find(&stored.id).unwrap().unwrap().name, "Ada");
    }

    #[test]
    fn save_updates_in_place() {
        let mut r = repo();
        r.save(user("u1", "Ada")).unwrap();
        r.save(user("u1", "Grace")).unwrap();
        assert_eq!(r.count(), 1);
        assert_eq!(r.find("u1").unwrap().unwrap().name, "Grace");
    }

    #[test]
    fn all_and_find_where() {
        let mut r = repo();
        r.save(user("u1", "Ada")).unwrap();
        let mut inactive = user("u2", "Bob");
        inactive.active = false;
        r.save(inactive).unwrap();

        assert_eq!(r.all().unwrap().len(), 2);
        let active = r.find_where(|u| u.active).unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Ada");
    }

    #[test]
    fn remove() {
        let mut r = repo();
        r.save(user("u1", "Ada")).unwrap();
        assert!(r.remove("u1"));
        assert!(!r.remove("u1"));
        assert_eq!(r.count(), 0);
    }
}
