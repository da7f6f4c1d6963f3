//! Mock account and session service.
//!
//! Stands in for a real authentication server: accounts live in the same
//! local key-value store as everything else, and the active session is
//! whatever user was last signed in on this profile. Password handling is
//! deliberately naive; this service exists to supply "who is signed in"
//! and to raise the session-ended signal, nothing more.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crosspost_core::StorageError;
use crosspost_core::domain::{NotificationKind, PlatformName, User};
use crosspost_core::ports::{KeyValueStore, Notifier};

use crate::session::{SessionBus, SessionEvent};

const USER_DB_KEY: &str = "mockUserDB";
const ACTIVE_USER_KEY: &str = "authUser";

/// Account operation errors.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("An account with this email already exists")]
    EmailTaken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredAccount {
    id: Uuid,
    password: String,
}

/// The authentication collaborator: owns the current user and the set of
/// connected platforms, and publishes the session boundary on logout.
pub struct AccountService {
    store: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn Notifier>,
    session: SessionBus,
    current: RwLock<Option<User>>,
    connected: RwLock<Vec<PlatformName>>,
}

impl AccountService {
    /// Open the service, restoring the signed-in user (and their platform
    /// connections) from the local store when present.
    pub async fn open(
        store: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
        session: SessionBus,
    ) -> Self {
        let current: Option<User> = match store.get(ACTIVE_USER_KEY).await {
            Some(raw) => serde_json::from_str(&raw).ok(),
            None => None,
        };

        let connected = match &current {
            Some(user) => load_connections(store.as_ref(), user.id).await,
            None => Vec::new(),
        };

        if let Some(user) = &current {
            tracing::info!(email = %user.email, "Restored active session");
        }

        Self {
            store,
            notifier,
            session,
            current: RwLock::new(current),
            connected: RwLock::new(connected),
        }
    }

    /// Register a new account and sign it in.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<User, AccountError> {
        let mut db = self.load_db().await;
        if db.contains_key(email) {
            self.notifier.notify(
                NotificationKind::Error,
                "Signup Failed",
                "An account with this email already exists.",
            );
            return Err(AccountError::EmailTaken);
        }

        let user = User::new(email);
        db.insert(
            email.to_owned(),
            StoredAccount {
                id: user.id,
                password: password.to_owned(),
            },
        );
        self.save_db(&db).await?;
        self.set_current(user.clone()).await?;

        self.notifier.notify(
            NotificationKind::Success,
            "Account Created",
            "Welcome to Crosspost!",
        );
        Ok(user)
    }

    /// Sign in with existing credentials.
    pub async fn log_in(&self, email: &str, password: &str) -> Result<User, AccountError> {
        let db = self.load_db().await;
        match db.get(email) {
            Some(account) if account.password == password => {
                let user = User {
                    id: account.id,
                    email: email.to_owned(),
                };
                self.set_current(user.clone()).await?;
                self.notifier.notify(
                    NotificationKind::Success,
                    "Login Successful",
                    "Welcome back!",
                );
                Ok(user)
            }
            _ => {
                self.notifier.notify(
                    NotificationKind::Error,
                    "Login Failed",
                    "Invalid email or password.",
                );
                Err(AccountError::InvalidCredentials)
            }
        }
    }

    /// End the active session. Raises the session boundary so session-scoped
    /// state (the post store) is discarded. Platform connections stay
    /// persisted for the next sign-in.
    pub async fn log_out(&self) {
        *self.current.write().await = None;
        self.connected.write().await.clear();

        if let Err(e) = self.store.remove(ACTIVE_USER_KEY).await {
            tracing::warn!(error = %e, "Failed to clear stored session");
        }

        self.session.publish(SessionEvent::Ended);
        self.notifier.notify(
            NotificationKind::Info,
            "Logged Out",
            "You have been successfully logged out.",
        );
    }

    /// Link a platform account for the signed-in user.
    pub async fn connect_platform(&self, platform: PlatformName) -> Result<(), AccountError> {
        {
            let mut connected = self.connected.write().await;
            if !connected.contains(&platform) {
                connected.push(platform);
            }
        }
        self.persist_connections().await?;

        self.notifier.notify(
            NotificationKind::Success,
            &format!("{platform} Connected"),
            &format!("Your {platform} account has been linked."),
        );
        Ok(())
    }

    /// Unlink a platform account.
    pub async fn disconnect_platform(&self, platform: PlatformName) -> Result<(), AccountError> {
        self.connected.write().await.retain(|p| *p != platform);
        self.persist_connections().await?;

        self.notifier.notify(
            NotificationKind::Info,
            &format!("{platform} Disconnected"),
            &format!("Your {platform} account has been unlinked."),
        );
        Ok(())
    }

    pub async fn current_user(&self) -> Option<User> {
        self.current.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    pub async fn connected_platforms(&self) -> Vec<PlatformName> {
        self.connected.read().await.clone()
    }

    async fn set_current(&self, user: User) -> Result<(), AccountError> {
        let raw = serde_json::to_string(&user)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.store.set(ACTIVE_USER_KEY, &raw).await?;

        *self.connected.write().await = load_connections(self.store.as_ref(), user.id).await;
        *self.current.write().await = Some(user);
        Ok(())
    }

    async fn load_db(&self) -> HashMap<String, StoredAccount> {
        match self.store.get(USER_DB_KEY).await {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            None => HashMap::new(),
        }
    }

    async fn save_db(&self, db: &HashMap<String, StoredAccount>) -> Result<(), AccountError> {
        let raw = serde_json::to_string(db)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.store.set(USER_DB_KEY, &raw).await?;
        Ok(())
    }

    async fn persist_connections(&self) -> Result<(), AccountError> {
        let Some(user) = self.current.read().await.clone() else {
            return Ok(());
        };
        let connected = self.connected.read().await.clone();
        let raw = serde_json::to_string(&connected)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.store.set(&connections_key(user.id), &raw).await?;
        Ok(())
    }
}

fn connections_key(user_id: Uuid) -> String {
    format!("connections_{user_id}")
}

async fn load_connections(store: &dyn KeyValueStore, user_id: Uuid) -> Vec<PlatformName> {
    match store.get(&connections_key(user_id)).await {
        Some(raw) => serde_json::from_str(&raw).unwrap_or_default(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use crosspost_infra::InMemoryStore;

    use super::*;

    struct SilentNotifier;

    impl Notifier for SilentNotifier {
        fn notify(&self, _kind: NotificationKind, _title: &str, _message: &str) {}
    }

    async fn open_service(kv: Arc<InMemoryStore>) -> (AccountService, SessionBus) {
        let bus = SessionBus::default();
        let service =
            AccountService::open(kv, Arc::new(SilentNotifier), bus.clone()).await;
        (service, bus)
    }

    #[tokio::test]
    async fn sign_up_rejects_duplicate_email() {
        let (service, _) = open_service(Arc::new(InMemoryStore::new())).await;

        service.sign_up("a@example.com", "pw").await.unwrap();
        let err = service.sign_up("a@example.com", "other").await.unwrap_err();

        assert!(matches!(err, AccountError::EmailTaken));
    }

    #[tokio::test]
    async fn log_in_verifies_credentials() {
        let kv = Arc::new(InMemoryStore::new());
        let (service, _) = open_service(kv.clone()).await;
        let user = service.sign_up("a@example.com", "pw").await.unwrap();
        service.log_out().await;

        assert!(matches!(
            service.log_in("a@example.com", "wrong").await.unwrap_err(),
            AccountError::InvalidCredentials
        ));
        assert!(!service.is_authenticated().await);

        let logged_in = service.log_in("a@example.com", "pw").await.unwrap();
        assert_eq!(logged_in.id, user.id);
        assert!(service.is_authenticated().await);
    }

    #[tokio::test]
    async fn log_out_publishes_the_session_boundary() {
        let (service, bus) = open_service(Arc::new(InMemoryStore::new())).await;
        service.sign_up("a@example.com", "pw").await.unwrap();

        let mut events = bus.subscribe();
        service.log_out().await;

        assert_eq!(events.try_recv().unwrap(), SessionEvent::Ended);
        assert_eq!(service.current_user().await, None);
    }

    #[tokio::test]
    async fn connections_survive_logout_and_login() {
        let kv = Arc::new(InMemoryStore::new());
        let (service, _) = open_service(kv.clone()).await;
        service.sign_up("a@example.com", "pw").await.unwrap();

        service.connect_platform(PlatformName::X).await.unwrap();
        service
            .connect_platform(PlatformName::Instagram)
            .await
            .unwrap();
        service.connect_platform(PlatformName::X).await.unwrap();
        assert_eq!(
            service.connected_platforms().await,
            vec![PlatformName::X, PlatformName::Instagram]
        );

        service.log_out().await;
        assert!(service.connected_platforms().await.is_empty());

        service.log_in("a@example.com", "pw").await.unwrap();
        assert_eq!(
            service.connected_platforms().await,
            vec![PlatformName::X, PlatformName::Instagram]
        );

        service.disconnect_platform(PlatformName::X).await.unwrap();
        assert_eq!(
            service.connected_platforms().await,
            vec![PlatformName::Instagram]
        );
    }

    #[tokio::test]
    async fn active_session_is_restored_on_reopen() {
        let kv = Arc::new(InMemoryStore::new());
        let (service, _) = open_service(kv.clone()).await;
        let user = service.sign_up("a@example.com", "pw").await.unwrap();
        service.connect_platform(PlatformName::TikTok).await.unwrap();

        let (reopened, _) = open_service(kv).await;
        assert_eq!(reopened.current_user().await, Some(user));
        assert_eq!(
            reopened.connected_platforms().await,
            vec![PlatformName::TikTok]
        );
    }
}
