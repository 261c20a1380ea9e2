//! Typed access to the stored collections

use domain::entities::{ChatMessage, Community, OwnerProfile, Post, Product, PurchaseRecord};
use domain::fixtures;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::errors::{StorageError, StorageResult};
use crate::keys;
use crate::kv::{InMemoryStore, KeyValueStore};

/// Conversations keyed by peer (direct) or community id (group)
pub type ChatLog = BTreeMap<String, Vec<ChatMessage>>;

#[derive(Clone)]
pub struct LocalDb {
    store: Arc<dyn KeyValueStore>,
}

impl LocalDb {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Backed by a fresh [`InMemoryStore`]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStore::new()))
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Seed posts, users and communities from fixtures when absent
    pub fn init(&self) -> StorageResult<()> {
        let mut seeded = Vec::new();
        if !self.store.contains(keys::POSTS)? {
            self.write(keys::POSTS, &fixtures::posts())?;
            seeded.push(keys::POSTS);
        }
        if !self.store.contains(keys::USERS)? {
            self.write(keys::USERS, &fixtures::owners())?;
            seeded.push(keys::USERS);
        }
        if !self.store.contains(keys::COMMUNITIES)? {
            self.write(keys::COMMUNITIES, &fixtures::communities())?;
            seeded.push(keys::COMMUNITIES);
        }
        if !seeded.is_empty() {
            info!(collections = ?seeded, "Seeded local database from fixtures");
        }
        Ok(())
    }

    // Session

    pub fn current_user_id(&self) -> StorageResult<Option<String>> {
        self.store.get(keys::SESSION)
    }

    /// `None` signs the session out
    pub fn set_current_user_id(&self, id: Option<&str>) -> StorageResult<()> {
        match id {
            Some(id) => self.store.set(keys::SESSION, id),
            None => self.store.remove(keys::SESSION),
        }
    }

    pub fn token(&self) -> StorageResult<Option<String>> {
        self.store.get(keys::TOKEN)
    }

    pub fn set_token(&self, token: Option<&str>) -> StorageResult<()> {
        match token {
            Some(token) => self.store.set(keys::TOKEN, token),
            None => self.store.remove(keys::TOKEN),
        }
    }

    // Users

    pub fn users(&self) -> StorageResult<Vec<OwnerProfile>> {
        Ok(self.read(keys::USERS)?.unwrap_or_else(fixtures::owners))
    }

    pub fn user(&self, id: &str) -> StorageResult<Option<OwnerProfile>> {
        Ok(self.users()?.into_iter().find(|u| u.id == id))
    }

    /// Replace the record with the same id, or append
    pub fn save_user(&self, user: &OwnerProfile) -> StorageResult<()> {
        let mut users = self.users()?;
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user.clone(),
            None => users.push(user.clone()),
        }
        debug!(user_id = %user.id, "Saving user");
        self.write(keys::USERS, &users)
    }

    // Posts

    pub fn posts(&self) -> StorageResult<Vec<Post>> {
        Ok(self.read(keys::POSTS)?.unwrap_or_default())
    }

    pub fn save_posts(&self, posts: &[Post]) -> StorageResult<()> {
        self.write(keys::POSTS, posts)
    }

    // Communities

    pub fn communities(&self) -> StorageResult<Vec<Community>> {
        Ok(self
            .read(keys::COMMUNITIES)?
            .unwrap_or_else(fixtures::communities))
    }

    pub fn save_communities(&self, communities: &[Community]) -> StorageResult<()> {
        self.write(keys::COMMUNITIES, communities)
    }

    /// Mall catalogue; reviews are stored inline with each product
    pub fn products(&self) -> StorageResult<Vec<Product>> {
        Ok(self
            .read(keys::PRODUCTS)?
            .unwrap_or_else(fixtures::products))
    }

    pub fn save_products(&self, products: &[Product]) -> StorageResult<()> {
        self.write(keys::PRODUCTS, products)
    }

    // Per-user collections

    pub fn purchases(&self, user_id: &str) -> StorageResult<Vec<PurchaseRecord>> {
        Ok(self.read(&keys::purchases(user_id))?.unwrap_or_default())
    }

    pub fn save_purchases(&self, user_id: &str, purchases: &[PurchaseRecord]) -> StorageResult<()> {
        self.write(&keys::purchases(user_id), purchases)
    }

    pub fn following(&self, user_id: &str) -> StorageResult<Vec<String>> {
        Ok(self.read(&keys::following(user_id))?.unwrap_or_default())
    }

    pub fn save_following(&self, user_id: &str, ids: &[String]) -> StorageResult<()> {
        self.write(&keys::following(user_id), ids)
    }

    pub fn direct_messages(&self, user_id: &str) -> StorageResult<ChatLog> {
        Ok(self.read(&keys::chats(user_id))?.unwrap_or_default())
    }

    pub fn save_direct_messages(&self, user_id: &str, messages: &ChatLog) -> StorageResult<()> {
        self.write(&keys::chats(user_id), messages)
    }

    pub fn group_messages(&self) -> StorageResult<ChatLog> {
        Ok(self.read(keys::GROUP_CHATS)?.unwrap_or_default())
    }

    pub fn save_group_messages(&self, messages: &ChatLog) -> StorageResult<()> {
        self.write(keys::GROUP_CHATS, messages)
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        match self.store.get(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StorageError::Corrupted {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StorageResult<()> {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.store.set(key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_seeds_once() {
        let db = LocalDb::in_memory();
        db.init().unwrap();
        assert_eq!(db.posts().unwrap().len(), fixtures::posts().len());

        db.save_posts(&[]).unwrap();
        db.init().unwrap();
        assert!(db.posts().unwrap().is_empty());
    }

    #[test]
    fn test_missing_collections_fall_back() {
        let db = LocalDb::in_memory();
        assert_eq!(db.users().unwrap().len(), fixtures::owners().len());
        assert_eq!(db.communities().unwrap().len(), fixtures::communities().len());
        assert_eq!(db.products().unwrap().len(), fixtures::products().len());
        assert!(db.posts().unwrap().is_empty());
        assert!(db.purchases("owner_me").unwrap().is_empty());
        assert!(db.direct_messages("owner_me").unwrap().is_empty());
    }

    #[test]
    fn test_save_user_upserts() {
        let db = LocalDb::in_memory();
        db.init().unwrap();

        let mut me = db.user(fixtures::OWNER_ME_ID).unwrap().unwrap();
        me.coin_balance = 1;
        db.save_user(&me).unwrap();

        let users = db.users().unwrap();
        assert_eq!(users.len(), fixtures::owners().len());
        assert_eq!(db.user(fixtures::OWNER_ME_ID).unwrap().unwrap().coin_balance, 1);
    }

    #[test]
    fn test_session_roundtrip() {
        let db = LocalDb::in_memory();
        assert_eq!(db.current_user_id().unwrap(), None);

        db.set_current_user_id(Some("owner_me")).unwrap();
        assert_eq!(db.current_user_id().unwrap().as_deref(), Some("owner_me"));

        db.set_current_user_id(None).unwrap();
        assert_eq!(db.current_user_id().unwrap(), None);
    }

    #[test]
    fn test_corrupted_blob_is_reported() {
        let db = LocalDb::in_memory();
        db.store().set(keys::POSTS, "{not json").unwrap();

        let err = db.posts().unwrap_err();
        assert!(matches!(err, StorageError::Corrupted { .. }));
    }
}
