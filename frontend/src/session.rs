//! Client-side authentication state.
//!
//! [`SessionStore`] owns the current [`Session`], persists it after every
//! mutation and tells registered observers about each change. It is created
//! once by the application root and shared through [`SessionContext`].

use std::cell::{Cell, RefCell};
use std::ops::Deref;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::models::{User, UserPatch};
use crate::storage::{BrowserStorage, KeyValueStore};

pub const SESSION_STORAGE_KEY: &str = "auth-storage";
pub const TOKEN_STORAGE_KEY: &str = "token";
const SNAPSHOT_VERSION: u32 = 0;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_authenticated: bool,
}

#[derive(Serialize, Deserialize)]
struct Snapshot {
    state: Session,
    #[serde(default)]
    version: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Rc<dyn Fn(&Session)>;

pub struct SessionStore<S: KeyValueStore = BrowserStorage> {
    storage: S,
    session: RefCell<Session>,
    observers: RefCell<Vec<(SubscriptionId, Observer)>>,
    next_subscription: Cell<u64>,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Rehydrates from `storage`, falling back to a signed-out session when
    /// nothing usable is stored.
    pub fn restore(storage: S) -> Self {
        let session = storage
            .read(SESSION_STORAGE_KEY)
            .and_then(|raw| match serde_json::from_str::<Snapshot>(&raw) {
                Ok(snapshot) => Some(snapshot.state),
                Err(err) => {
                    log::warn!("discarding unreadable session snapshot: {}", err);
                    None
                }
            })
            .map(normalize)
            .unwrap_or_default();

        Self {
            storage,
            session: RefCell::new(session),
            observers: RefCell::new(Vec::new()),
            next_subscription: Cell::new(0),
        }
    }

    pub fn snapshot(&self) -> Session {
        self.session.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.borrow().is_authenticated
    }

    pub fn token(&self) -> Option<String> {
        self.session.borrow().token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.session.borrow().user.clone()
    }

    /// Records a provisional token between the credential check and OTP
    /// verification. User and authenticated flag are left alone.
    pub fn set_token(&self, token: impl Into<String>) {
        let token = token.into();
        self.storage.write(TOKEN_STORAGE_KEY, &token);
        self.commit(|session| session.token = Some(token));
    }

    pub fn login(&self, user: User, token: Option<String>) {
        if let Some(token) = &token {
            self.storage.write(TOKEN_STORAGE_KEY, token);
        }
        self.commit(|session| {
            session.user = Some(user);
            session.token = token;
            session.is_authenticated = true;
        });
    }

    pub fn logout(&self) {
        self.storage.delete(TOKEN_STORAGE_KEY);
        self.commit(|session| *session = Session::default());
    }

    /// Shallow-merges `patch` into the signed-in user. Does nothing, not even
    /// persist or notify, when nobody is signed in.
    pub fn update_user(&self, patch: UserPatch) {
        if self.session.borrow().user.is_none() {
            return;
        }
        self.commit(|session| {
            if let Some(user) = session.user.as_mut() {
                user.merge(patch);
            }
        });
    }

    pub fn subscribe(&self, observer: impl Fn(&Session) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.get());
        self.next_subscription.set(id.0 + 1);
        self.observers.borrow_mut().push((id, Rc::new(observer)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.observers.borrow_mut().retain(|(other, _)| *other != id);
    }

    #[cfg(test)]
    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }

    // No borrow is held while observers run, so they may read the store or
    // (un)subscribe.
    fn commit(&self, mutate: impl FnOnce(&mut Session)) {
        let snapshot = {
            let mut session = self.session.borrow_mut();
            mutate(&mut session);
            session.clone()
        };
        self.persist(&snapshot);

        let observers: Vec<Observer> = self
            .observers
            .borrow()
            .iter()
            .map(|(_, observer)| observer.clone())
            .collect();
        for observer in observers {
            observer(&snapshot);
        }
    }

    fn persist(&self, session: &Session) {
        let snapshot = Snapshot {
            state: session.clone(),
            version: SNAPSHOT_VERSION,
        };
        match serde_json::to_string(&snapshot) {
            Ok(raw) => self.storage.write(SESSION_STORAGE_KEY, &raw),
            Err(err) => log::error!("could not serialize session: {}", err),
        }
    }
}

fn normalize(mut session: Session) -> Session {
    if session.is_authenticated && session.user.is_none() {
        log::warn!("stored session claims authentication without a user; signing out");
        session.is_authenticated = false;
    }
    session
}

/// Handle to the root-owned store, handed down through a Yew context.
#[derive(Clone)]
pub struct SessionContext(Rc<SessionStore>);

impl SessionContext {
    pub fn new(store: SessionStore) -> Self {
        Self(Rc::new(store))
    }

    pub fn restore() -> Self {
        Self::new(SessionStore::restore(BrowserStorage))
    }
}

impl PartialEq for SessionContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for SessionContext {
    type Target = SessionStore;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn user(id: i64, name: &str) -> User {
        serde_json::from_value(json!({"id": id, "name": name})).unwrap()
    }

    #[test]
    fn starts_signed_out_on_empty_storage() {
        let store = SessionStore::restore(MemoryStorage::new());
        assert_eq!(store.snapshot(), Session::default());
    }

    #[test]
    fn login_then_logout_restores_initial_state() {
        let storage = MemoryStorage::new();
        let store = SessionStore::restore(storage.clone());
        let initial = store.snapshot();

        store.set_token("T1");
        store.login(user(7, "A"), Some("T1".into()));
        assert!(store.is_authenticated());

        store.logout();
        assert_eq!(store.snapshot(), initial);
        assert!(!storage.contains(TOKEN_STORAGE_KEY));

        let persisted: serde_json::Value =
            serde_json::from_str(&storage.read(SESSION_STORAGE_KEY).unwrap()).unwrap();
        assert_eq!(
            persisted,
            json!({"state": {"user": null, "token": null, "isAuthenticated": false}, "version": 0})
        );
    }

    #[test]
    fn logout_is_idempotent() {
        let store = SessionStore::restore(MemoryStorage::new());
        store.logout();
        store.logout();
        assert_eq!(store.snapshot(), Session::default());
    }

    #[test]
    fn set_token_leaves_identity_alone() {
        let storage = MemoryStorage::new();
        let store = SessionStore::restore(storage.clone());
        store.set_token("T1");
        let session = store.snapshot();
        assert_eq!(session.token.as_deref(), Some("T1"));
        assert_eq!(session.user, None);
        assert!(!session.is_authenticated);
        assert_eq!(storage.read(TOKEN_STORAGE_KEY).as_deref(), Some("T1"));
    }

    #[test]
    fn update_user_without_user_is_a_no_op() {
        let storage = MemoryStorage::new();
        let store = SessionStore::restore(storage.clone());
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        store.subscribe(move |_| seen.set(seen.get() + 1));

        store.update_user(UserPatch::image("me.png"));

        assert_eq!(store.snapshot(), Session::default());
        assert_eq!(calls.get(), 0);
        assert!(storage.is_empty());
    }

    #[test]
    fn update_user_merges_shallowly() {
        let store = SessionStore::restore(MemoryStorage::new());
        let mut original = user(7, "A");
        original.email = Some("a@b.com".into());
        store.login(original, Some("T1".into()));

        store.update_user(UserPatch::image("me.png"));

        let updated = store.user().unwrap();
        assert_eq!(updated.name.as_deref(), Some("A"));
        assert_eq!(updated.email.as_deref(), Some("a@b.com"));
        assert_eq!(updated.image.as_deref(), Some("me.png"));
        assert!(store.is_authenticated());
    }

    #[test]
    fn survives_reload() {
        let storage = MemoryStorage::new();
        {
            let store = SessionStore::restore(storage.clone());
            store.login(user(7, "A"), Some("T1".into()));
        }
        let reloaded = SessionStore::restore(storage);
        assert_eq!(
            reloaded.snapshot(),
            Session {
                user: Some(user(7, "A")),
                token: Some("T1".into()),
                is_authenticated: true,
            }
        );
    }

    #[test]
    fn inconsistent_snapshot_is_signed_out() {
        let storage = MemoryStorage::new();
        storage.write(
            SESSION_STORAGE_KEY,
            r#"{"state":{"user":null,"token":"T1","isAuthenticated":true},"version":0}"#,
        );
        let store = SessionStore::restore(storage);
        assert!(!store.is_authenticated());
        assert_eq!(store.token().as_deref(), Some("T1"));
    }

    #[test]
    fn corrupt_snapshot_is_discarded() {
        let storage = MemoryStorage::new();
        storage.write(SESSION_STORAGE_KEY, "{not json");
        let store = SessionStore::restore(storage);
        assert_eq!(store.snapshot(), Session::default());
    }

    #[test]
    fn observers_see_every_mutation_until_unsubscribed() {
        let store = Rc::new(SessionStore::restore(MemoryStorage::new()));
        let seen = Rc::new(RefCell::new(Vec::new()));

        let log = seen.clone();
        let reader = store.clone();
        let id = store.subscribe(move |session| {
            // Reading the store from inside a notification must not panic.
            assert_eq!(reader.is_authenticated(), session.is_authenticated);
            log.borrow_mut().push(session.is_authenticated);
        });

        store.set_token("T1");
        store.login(user(1, "A"), Some("T1".into()));
        store.unsubscribe(id);
        store.logout();

        assert_eq!(*seen.borrow(), vec![false, true]);
        assert_eq!(store.observer_count(), 0);
    }
}
