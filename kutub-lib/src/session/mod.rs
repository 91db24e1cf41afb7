//! client side session state.
//!
//! the auth token, its absolute expiry and the group memberships handed out
//! at login are kept in a [`Storage`]. expiry is checked lazily whenever the
//! token is requested, there is no background timer.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::ids::GroupId;

mod storage;
mod clock;

pub use storage::{Storage, StorageError, MemoryStorage, FileStorage};
pub use clock::{Clock, SystemClock, FixedClock};

pub const TOKEN_KEY: &str = "token";
pub const EXPIRY_KEY: &str = "token_expiry";
pub const MEMBERSHIP_KEY: &str = "isRoles";
pub const SELECTED_ROLE_KEY: &str = "selectedRole";

pub const DEFAULT_TTL_HOURS: i64 = 24;

pub fn default_ttl() -> Duration {
    Duration::hours(DEFAULT_TTL_HOURS)
}

/// parses the stored membership list.
///
/// anything that is not a json array yields an empty list. entries that are
/// neither strings nor integers are skipped.
pub fn parse_memberships(raw: Option<&str>) -> Vec<GroupId> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    let Ok(serde_json::Value::Array(list)) = serde_json::from_str(raw) else {
        return Vec::new();
    };

    let mut rtn = Vec::with_capacity(list.len());

    for value in list {
        match value {
            serde_json::Value::String(s) => rtn.push(GroupId::from(s)),
            serde_json::Value::Number(n) => rtn.push(GroupId::new(n.to_string())),
            _ => {}
        }
    }

    rtn
}

pub struct SessionStore<S, C = SystemClock> {
    storage: S,
    clock: C,
}

impl<S> SessionStore<S, SystemClock>
where
    S: Storage
{
    pub fn new(storage: S) -> Self {
        SessionStore {
            storage,
            clock: SystemClock,
        }
    }
}

impl<S, C> SessionStore<S, C>
where
    S: Storage,
    C: Clock,
{
    pub fn with_clock(storage: S, clock: C) -> Self {
        SessionStore { storage, clock }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// stores the token along with `now + ttl` as its expiry. nothing is
    /// stored when the expiry cannot be represented
    pub fn save_session<T>(&mut self, token: T, ttl: Duration) -> Result<DateTime<Utc>, StorageError>
    where
        T: Into<String>
    {
        let expiry = self.clock.now()
            .checked_add_signed(ttl)
            .ok_or(StorageError::ExpiryOverflow)?;

        self.storage.set(TOKEN_KEY, token.into())?;
        self.storage.set(EXPIRY_KEY, expiry.timestamp_millis().to_string())?;

        Ok(expiry)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.storage.get(EXPIRY_KEY)?;
        let millis: i64 = raw.trim().parse().ok()?;

        Utc.timestamp_millis_opt(millis).single()
    }

    /// the stored token if the current time is strictly before its expiry.
    ///
    /// a missing token, a missing or unparsable expiry, or an expired token
    /// clears both values and returns `None`.
    pub fn get_valid_token(&mut self) -> Option<String> {
        let token = self.storage.get(TOKEN_KEY);
        let expiry = self.expires_at();

        match (token, expiry) {
            (Some(token), Some(expiry)) if self.clock.now() < expiry => Some(token),
            (token, _) => {
                if token.is_some() {
                    tracing::debug!("stored session is expired or has no valid expiry");
                }

                self.drop_token();

                None
            }
        }
    }

    pub fn is_authenticated(&mut self) -> bool {
        self.get_valid_token().is_some()
    }

    fn drop_token(&mut self) {
        for key in [TOKEN_KEY, EXPIRY_KEY] {
            if let Err(err) = self.storage.remove(key) {
                tracing::warn!("failed to remove \"{}\" from session storage: {}", key, err);
            }
        }
    }

    /// removes the token, its expiry and the cached memberships
    pub fn clear_session(&mut self) -> Result<(), StorageError> {
        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(EXPIRY_KEY)?;
        self.storage.remove(MEMBERSHIP_KEY)?;

        Ok(())
    }

    pub fn save_memberships<I>(&mut self, groups: I) -> Result<(), StorageError>
    where
        I: IntoIterator<Item = GroupId>
    {
        let list: Vec<GroupId> = groups.into_iter().collect();
        let serialized = serde_json::to_string(&list)?;

        self.storage.set(MEMBERSHIP_KEY, serialized)
    }

    pub fn memberships(&self) -> Vec<GroupId> {
        parse_memberships(self.storage.get(MEMBERSHIP_KEY).as_deref())
    }

    pub fn selected_role(&self) -> Option<String> {
        self.storage.get(SELECTED_ROLE_KEY)
    }

    pub fn set_selected_role<R>(&mut self, role: R) -> Result<(), StorageError>
    where
        R: Into<String>
    {
        self.storage.set(SELECTED_ROLE_KEY, role.into())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn store() -> SessionStore<MemoryStorage, FixedClock> {
        SessionStore::with_clock(MemoryStorage::new(), FixedClock::new(start()))
    }

    #[test]
    fn token_valid_before_expiry() {
        let mut store = store();
        let expiry = store.save_session("abc", Duration::hours(1)).unwrap();

        assert_eq!(expiry, start() + Duration::hours(1));

        store.clock_mut().advance(Duration::minutes(59));

        assert_eq!(store.get_valid_token().as_deref(), Some("abc"));
        assert!(store.is_authenticated());
    }

    #[test]
    fn unrepresentable_expiry_is_an_error() {
        let mut store = store();
        let ttl = Duration::try_hours(2_500_000_000).unwrap();

        assert!(matches!(
            store.save_session("abc", ttl),
            Err(StorageError::ExpiryOverflow)
        ));
        assert_eq!(store.storage().get(TOKEN_KEY), None);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn token_invalid_at_expiry() {
        let mut store = store();
        store.save_session("abc", Duration::hours(1)).unwrap();

        store.clock_mut().advance(Duration::hours(1));

        assert_eq!(store.get_valid_token(), None);
        assert_eq!(store.storage().get(TOKEN_KEY), None);
        assert_eq!(store.storage().get(EXPIRY_KEY), None);
    }

    #[test]
    fn expiry_is_idempotent() {
        let mut store = store();
        store.save_session("abc", Duration::hours(1)).unwrap();

        store.clock_mut().advance(Duration::hours(2));
        assert_eq!(store.get_valid_token(), None);

        // rewinding the clock cannot bring the cleared token back
        store.clock_mut().set(start());
        assert_eq!(store.get_valid_token(), None);
    }

    #[test]
    fn corrupt_expiry_fails_closed() {
        let mut storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "abc".into()).unwrap();
        storage.set(EXPIRY_KEY, "tomorrow".into()).unwrap();

        let mut store = SessionStore::with_clock(storage, FixedClock::new(start()));

        assert_eq!(store.get_valid_token(), None);
        assert_eq!(store.storage().get(TOKEN_KEY), None);
    }

    #[test]
    fn missing_expiry_fails_closed() {
        let mut storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "abc".into()).unwrap();

        let mut store = SessionStore::with_clock(storage, FixedClock::new(start()));

        assert_eq!(store.get_valid_token(), None);
        assert!(store.storage().is_empty());
    }

    #[test]
    fn clear_removes_memberships() {
        let mut store = store();
        store.save_session("abc", default_ttl()).unwrap();
        store.save_memberships(vec![GroupId::from("1"), GroupId::from("2")]).unwrap();
        store.set_selected_role("books").unwrap();

        assert_eq!(store.memberships(), vec![GroupId::from("1"), GroupId::from("2")]);

        store.clear_session().unwrap();

        assert_eq!(store.get_valid_token(), None);
        assert!(store.memberships().is_empty());
        assert_eq!(store.selected_role().as_deref(), Some("books"));
    }

    #[test]
    fn memberships_parse_defensively() {
        assert!(parse_memberships(None).is_empty());
        assert!(parse_memberships(Some("undefined")).is_empty());
        assert!(parse_memberships(Some("{\"a\":1}")).is_empty());
        assert_eq!(
            parse_memberships(Some(r#"["1", 2, null, true]"#)),
            vec![GroupId::from("1"), GroupId::from("2")]
        );
    }
}
