// Copyright (c) 2026 Inventory Dashboard Developers. All Rights Reserved.

//! Client-side session bookkeeping: an access token paired with the time it
//! stops being honored locally.

mod clock;
mod store;

pub use self::clock::{Clock, SystemClock};
#[cfg(test)]
pub use self::clock::ManualClock;
pub use self::store::{FileStore, MemoryStore, SessionStore};

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::inv;
use crate::inv::model::AccessToken;

/// Storage key of the access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Storage key of the expiration, in milliseconds since the epoch.
pub const TOKEN_EXPIRATION_KEY: &str = "token_expiration";

/// Sessions last a fixed ten minutes from login and are never extended.
pub fn session_lifetime() -> Duration {
    Duration::minutes(10)
}

/// An access token and its client-computed expiration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    token: AccessToken,
    expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: AccessToken, expires_at: DateTime<Utc>) -> Self {
        Self { token, expires_at }
    }

    /// A session for a token issued at `now`.
    pub fn starting_at(token: AccessToken, now: DateTime<Utc>) -> Self {
        Self::new(token, now + session_lifetime())
    }

    pub fn token(&self) -> &AccessToken {
        &self.token
    }

    pub fn expires_at(&self) -> &DateTime<Utc> {
        &self.expires_at
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Read the session from storage. Both keys must be present and the
    /// expiration must parse; anything less counts as no session.
    pub fn load(store: &dyn SessionStore) -> Option<Self> {
        let token = store.get(ACCESS_TOKEN_KEY);
        let expiration = store.get(TOKEN_EXPIRATION_KEY);
        debug!(
            "inv:session:load token present = {}, expiration = {:?}",
            token.is_some(),
            expiration
        );

        let token = token.filter(|t| !t.is_empty())?;
        let millis = expiration?.trim().parse::<i64>().ok()?;
        let expires_at = Utc.timestamp_millis_opt(millis).single()?;
        Some(Self::new(AccessToken::new(token), expires_at))
    }

    /// Persist both halves of the session.
    pub fn save(&self, store: &mut dyn SessionStore) -> inv::Result<()> {
        store.set(ACCESS_TOKEN_KEY, AsRef::<str>::as_ref(&self.token))?;
        store.set(
            TOKEN_EXPIRATION_KEY,
            &self.expires_at.timestamp_millis().to_string(),
        )
    }

    /// Remove both halves of any stored session.
    pub fn clear(store: &mut dyn SessionStore) -> inv::Result<()> {
        store.clear(ACCESS_TOKEN_KEY)?;
        store.clear(TOKEN_EXPIRATION_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).single().unwrap()
    }

    #[test]
    fn sessions_last_ten_minutes() {
        let session = Session::starting_at(AccessToken::new("t"), at(0));
        assert_eq!(session.expires_at().timestamp_millis(), 600_000);
        assert!(!session.is_expired_at(at(599_999)));
        assert!(session.is_expired_at(at(600_000)));
    }

    #[test]
    fn saved_sessions_use_the_storage_layout() {
        let mut store = MemoryStore::new();
        Session::new(AccessToken::new("abc"), at(1_700_000_000_000))
            .save(&mut store)
            .unwrap();
        assert_eq!(store.get(ACCESS_TOKEN_KEY), Some("abc".to_string()));
        assert_eq!(
            store.get(TOKEN_EXPIRATION_KEY),
            Some("1700000000000".to_string())
        );
        assert_eq!(
            Session::load(&store),
            Some(Session::new(AccessToken::new("abc"), at(1_700_000_000_000)))
        );
    }

    #[test]
    fn half_a_session_is_no_session() {
        let mut store = MemoryStore::new();
        store.set(ACCESS_TOKEN_KEY, "abc").unwrap();
        assert_eq!(Session::load(&store), None);

        let mut store = MemoryStore::new();
        store.set(TOKEN_EXPIRATION_KEY, "1700000000000").unwrap();
        assert_eq!(Session::load(&store), None);
    }

    #[test]
    fn unparseable_expirations_are_no_session() {
        let mut store = MemoryStore::new();
        store.set(ACCESS_TOKEN_KEY, "abc").unwrap();
        store.set(TOKEN_EXPIRATION_KEY, "soon").unwrap();
        assert_eq!(Session::load(&store), None);
    }

    #[test]
    fn clearing_removes_both_keys() {
        let mut store = MemoryStore::new();
        Session::starting_at(AccessToken::new("abc"), at(0))
            .save(&mut store)
            .unwrap();
        Session::clear(&mut store).unwrap();
        assert!(store.is_empty());
    }
}
