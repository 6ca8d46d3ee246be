use crate::common::User;
use crate::error::StorageError;

use super::local_store::LocalStore;

/// Key under which the signed-in user is stored.
pub const USER_KEY: &str = "w2w_user";

/// Where the signed-in user lives between launches.
pub trait UserStore {
    fn load_user(&self) -> Result<Option<User>, StorageError>;
    fn save_user(&self, user: &User) -> Result<(), StorageError>;
    fn clear_user(&self) -> Result<(), StorageError>;
}

/// `UserStore` backed by the local key/value table.
pub struct SessionStore {
    store: LocalStore,
}

impl SessionStore {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Result<Self, StorageError> {
        Ok(Self::new(LocalStore::in_memory()?))
    }
}

impl UserStore for SessionStore {
    fn load_user(&self) -> Result<Option<User>, StorageError> {
        match self.store.get_item(USER_KEY)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn save_user(&self, user: &User) -> Result<(), StorageError> {
        let json = serde_json::to_string(user)?;
        self.store.set_item(USER_KEY, &json)?;
        Ok(())
    }

    fn clear_user(&self) -> Result<(), StorageError> {
        self.store.remove_item(USER_KEY)?;
        Ok(())
    }
}

/// Keeps nothing. Used when no database can be opened at all.
pub struct NullStore;

impl UserStore for NullStore {
    fn load_user(&self) -> Result<Option<User>, StorageError> {
        Ok(None)
    }

    fn save_user(&self, _user: &User) -> Result<(), StorageError> {
        Ok(())
    }

    fn clear_user(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Role;

    fn sample_user() -> User {
        User {
            full_name: "Jane Smith".into(),
            organization: "Oakwood Mill".into(),
            email: "jane@oakwood.example".into(),
            phone: Some("555-0100".into()),
            location: "Portland, OR".into(),
            field_type: "Agriculture".into(),
            user_category: "Industry".into(),
            role: Role::Provider,
            waste_type: Some("Agricultural".into()),
        }
    }

    #[test]
    fn save_load_clear() {
        let store = SessionStore::in_memory().unwrap();
        assert_eq!(store.load_user().unwrap(), None);

        store.save_user(&sample_user()).unwrap();
        assert_eq!(store.load_user().unwrap(), Some(sample_user()));

        store.clear_user().unwrap();
        assert_eq!(store.load_user().unwrap(), None);
    }

    #[test]
    fn corrupt_value_is_a_json_error() {
        let local = LocalStore::in_memory().unwrap();
        local.set_item(USER_KEY, "{not json").unwrap();
        let store = SessionStore::new(local);

        assert!(matches!(store.load_user(), Err(StorageError::Json(_))));
    }

    #[test]
    fn null_store_forgets_everything() {
        NullStore.save_user(&sample_user()).unwrap();
        assert_eq!(NullStore.load_user().unwrap(), None);
    }
}
