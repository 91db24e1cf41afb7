use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};

use kutub_lib::ids::GroupId;
use kutub_lib::nav;
use kutub_lib::session::{SessionStore, Storage, FileStorage, Clock, SystemClock};
use kutub_api::{ApiError, AuthKind};
use kutub_api::client::ApiClient;
use kutub_api::client::auth::Login;
use kutub_api::client::permissions::PermissionResolver;

use crate::error::{self, Context};

/// everything a command needs: the http client, the persisted session and
/// the permissions resolved for it
pub struct AppState<S = FileStorage, C = SystemClock> {
    pub client: ApiClient,
    pub session: SessionStore<S, C>,
    pub resolver: PermissionResolver,
    pub ttl: Duration,
}

impl AppState {
    pub fn load(client: ApiClient, session_file: PathBuf, ttl: Duration) -> error::Result<Self> {
        let storage = FileStorage::load(&session_file)
            .context(format!("failed to load session file {}", session_file.display()))?;

        Ok(AppState {
            client,
            session: SessionStore::new(storage),
            resolver: PermissionResolver::new(),
            ttl,
        })
    }
}

impl<S, C> AppState<S, C>
where
    S: Storage,
    C: Clock,
{
    /// posts the credentials and persists the issued token and memberships
    pub fn login(&mut self, passport_id: String, password: String) -> error::Result<DateTime<Utc>> {
        let data = Login::passport(passport_id, password).send(&self.client)?;
        let expiry = self.session.save_session(data.token.clone(), self.ttl)?;
        self.session.save_memberships(data.memberships())?;

        self.client.set_token(Some(data.token));

        tracing::info!("logged in, session valid until {}", expiry);

        Ok(expiry)
    }

    pub fn logout(&mut self) -> error::Result {
        self.session.clear_session()?;
        self.client.set_token(None);
        self.client.set_permission(None);
        self.resolver = PermissionResolver::new();

        Ok(())
    }

    pub fn memberships(&self) -> Vec<GroupId> {
        self.session.memberships()
    }

    /// loads a valid token into the client. an expired or missing session
    /// clears the client credentials and fails
    pub fn check_session(&mut self) -> error::Result {
        match self.session.get_valid_token() {
            Some(token) => {
                self.client.set_token(Some(token));

                Ok(())
            },
            None => {
                self.client.set_token(None);
                self.client.set_permission(None);

                Err(ApiError::from(AuthKind::SessionExpired)
                    .with_message("not logged in or the session has expired, run `login` first")
                    .into())
            }
        }
    }

    /// re-resolves permissions. a failure keeps the previous set
    pub fn refresh_permissions(&mut self) {
        let memberships = self.session.memberships();

        if let Err(err) = self.resolver.refresh(&mut self.client, &memberships) {
            println!("warning: permissions could not be refreshed: {}", err.display_message());
        }
    }

    /// session check followed by a permission refresh, run before every
    /// authenticated request
    pub fn authorize(&mut self) -> error::Result {
        self.check_session()?;
        self.refresh_permissions();

        Ok(())
    }

    /// fails closed when the given menu route is not visible
    pub fn require_route(&self, path: &str) -> error::Result {
        let tables = self.resolver.tables();
        let memberships = self.session.memberships();

        if nav::route_allowed(path, &tables, &memberships) {
            Ok(())
        } else {
            Err(error::Error::from(format!("you do not have access to {}", path)))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use kutub_lib::session::{MemoryStorage, FixedClock};

    fn state() -> AppState<MemoryStorage, FixedClock> {
        let client = ApiClient::builder()
            .host("127.0.0.1")
            .port(Some(9))
            .build()
            .unwrap();

        AppState {
            client,
            session: SessionStore::with_clock(MemoryStorage::new(), FixedClock::new(Utc::now())),
            resolver: PermissionResolver::new(),
            ttl: Duration::hours(24),
        }
    }

    #[test]
    fn missing_session_is_rejected() {
        let mut state = state();
        state.client.set_token(Some("old".into()));

        let err = state.check_session().unwrap_err();

        assert!(err.to_string().contains("run `login` first"));
        assert_eq!(state.client.token(), None);
    }

    #[test]
    fn valid_session_sets_token() {
        let mut state = state();
        state.session.save_session("abc", Duration::hours(1)).unwrap();

        state.check_session().unwrap();

        assert_eq!(state.client.token(), Some("abc"));
    }

    #[test]
    fn expired_session_is_rejected() {
        let mut state = state();
        state.session.save_session("abc", Duration::hours(1)).unwrap();
        state.session.clock_mut().advance(Duration::hours(1));

        assert!(state.check_session().is_err());
        assert!(!state.session.is_authenticated());
    }

    #[test]
    fn roles_route_needs_admin() {
        let mut state = state();

        assert!(state.require_route(nav::ROLES_PATH).is_err());

        state.session.save_memberships([GroupId::from("1")]).unwrap();

        assert!(state.require_route(nav::ROLES_PATH).is_ok());
    }

    #[test]
    fn logout_clears_everything() {
        let mut state = state();
        state.session.save_session("abc", Duration::hours(1)).unwrap();
        state.client.set_permission(Some("books_view".into()));

        state.logout().unwrap();

        assert!(!state.session.is_authenticated());
        assert_eq!(state.client.permission(), None);
    }
}
