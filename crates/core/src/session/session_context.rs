use std::sync::{Arc, RwLock};

use log::{debug, warn};

use super::{SessionStoreTrait, UserSession};
use crate::constants::SESSION_STORAGE_KEY;
use crate::errors::{Error, Result};

/// The signed-in user, held in memory and mirrored to a store.
///
/// Lifecycle is explicit: [`load`](Self::load) at start-up,
/// [`save`](Self::save) after login, [`clear`](Self::clear) on logout.
pub struct SessionContext {
    store: Arc<dyn SessionStoreTrait>,
    current: RwLock<Option<UserSession>>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn SessionStoreTrait>) -> Self {
        Self {
            store,
            current: RwLock::new(None),
        }
    }

    /// Restores the persisted session, if any. A corrupt entry is discarded.
    pub fn load(&self) -> Result<Option<UserSession>> {
        let restored = match self.store.get(SESSION_STORAGE_KEY)? {
            Some(raw) => match serde_json::from_str::<UserSession>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!("Discarding unreadable session entry: {}", e);
                    self.store.remove(SESSION_STORAGE_KEY)?;
                    None
                }
            },
            None => None,
        };
        debug!("Session restored: {}", restored.is_some());
        *self.write_lock()? = restored.clone();
        Ok(restored)
    }

    pub fn save(&self, user: UserSession) -> Result<()> {
        let raw = serde_json::to_string(&user)?;
        self.store.set(SESSION_STORAGE_KEY, &raw)?;
        *self.write_lock()? = Some(user);
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(SESSION_STORAGE_KEY)?;
        *self.write_lock()? = None;
        Ok(())
    }

    pub fn current(&self) -> Option<UserSession> {
        self.current.read().ok().and_then(|guard| guard.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }

    fn write_lock(&self) -> Result<std::sync::RwLockWriteGuard<'_, Option<UserSession>>> {
        self.current
            .write()
            .map_err(|_| Error::Session("session lock poisoned".to_string()))
    }
}
