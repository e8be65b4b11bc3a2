//! Session controller: the state machine behind the authenticated surface.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use credo_core::clock::{self, DEFAULT_EXPIRY_SKEW_SECS};
use credo_core::{
    ApiKey, BearerToken, CredentialKind, CredentialStore, Identity, LoginMode, ProfileLoader,
    ProviderBridge,
};

use crate::events::{ExpirationBus, SessionEvent};
use crate::state::SessionSnapshot;

/// Outcome of attempting to establish a bearer session.
enum Establish {
    /// Session committed, timer scheduled.
    Done,
    /// Profile fetch failed; credential cleared, state unauthenticated.
    Failed,
    /// A later operation superseded this one; nothing was applied.
    Superseded,
}

/// The session controller.
///
/// Reconciles the credential store with a fetched identity and exposes
/// a consistent [`SessionSnapshot`] to consumers. All collaborators are
/// injected at construction; there is no process-wide instance.
///
/// Controllers are cheap to clone (internal `Arc`). Call
/// [`SessionController::bootstrap`] once after construction to restore
/// any persisted session, and [`SessionController::dispose`] when the
/// controller is retired.
///
/// State transitions are serialized: every mutating operation takes a
/// fresh epoch, and the result of a network call is applied only while
/// its epoch is still current. A login whose profile fetch resolves
/// after a logout is discarded rather than resurrecting the session.
#[derive(Clone)]
pub struct SessionController {
    inner: Arc<Inner>,
}

struct Inner {
    store: Arc<dyn CredentialStore>,
    profiles: Arc<dyn ProfileLoader>,
    bridge: Arc<dyn ProviderBridge>,
    state: RwLock<SessionSnapshot>,
    epoch: AtomicU64,
    expiry_task: Mutex<Option<JoinHandle<()>>>,
    events: ExpirationBus,
    skew_secs: i64,
}

impl SessionController {
    /// Create a controller over the given collaborators.
    ///
    /// The controller starts unauthenticated; call
    /// [`bootstrap`](Self::bootstrap) to restore a persisted session.
    pub fn new(
        store: Arc<dyn CredentialStore>,
        profiles: Arc<dyn ProfileLoader>,
        bridge: Arc<dyn ProviderBridge>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                profiles,
                bridge,
                state: RwLock::new(SessionSnapshot::default()),
                epoch: AtomicU64::new(0),
                expiry_task: Mutex::new(None),
                events: ExpirationBus::default(),
                skew_secs: DEFAULT_EXPIRY_SKEW_SECS,
            }),
        }
    }

    /// The last-committed session state.
    pub async fn snapshot(&self) -> SessionSnapshot {
        self.inner.state.read().await.clone()
    }

    /// Subscribe to expiration events.
    ///
    /// Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    /// Record which login method the UI intends to use.
    pub async fn set_login_mode(&self, mode: LoginMode) {
        self.inner.state.write().await.login_mode = mode;
    }

    /// Clear the last error message.
    pub async fn clear_error(&self) {
        self.inner.state.write().await.last_error = None;
    }

    /// Reconcile the stored credential into a session.
    ///
    /// A stored bearer token that is expired, or whose profile fetch
    /// fails, is cleared; a stored API key yields the synthesized
    /// placeholder identity without any network call.
    #[instrument(skip(self))]
    pub async fn bootstrap(&self) {
        let inner = &self.inner;
        let epoch = inner.next_epoch();
        {
            let mut state = inner.state.write().await;
            if !inner.is_current(epoch) {
                return;
            }
            state.loading = true;
            state.last_error = None;
        }

        if let Some(token) = inner.store.bearer() {
            if clock::is_expired(&token, inner.skew_secs) {
                info!("stored bearer token is expired, clearing");
                let mut state = inner.state.write().await;
                if !inner.is_current(epoch) {
                    return;
                }
                inner.store.clear_all();
                Inner::reset_unauthenticated(&mut state);
                drop(state);
                inner.publish_expired();
                return;
            }

            match inner.establish_bearer(token, epoch).await {
                Establish::Done | Establish::Superseded => return,
                // Bootstrap is silent about profile failures; fall
                // through to the API-key check (empty by mutual
                // exclusion) and end cleanly unauthenticated.
                Establish::Failed => {}
            }
        }

        if inner.store.api_key().is_some() {
            let mut state = inner.state.write().await;
            if !inner.is_current(epoch) {
                return;
            }
            state.is_authenticated = true;
            state.identity = Some(Identity::api_key_placeholder());
            state.credential_kind = CredentialKind::ApiKey;
            state.loading = false;
            state.last_error = None;
            info!("restored api-key session");
            return;
        }

        let mut state = inner.state.write().await;
        if !inner.is_current(epoch) {
            return;
        }
        Inner::reset_unauthenticated(&mut state);
    }

    /// Establish a bearer session from a freshly issued token.
    ///
    /// Stores the token, fetches the profile, and schedules auto-logout
    /// at the token's expiry. Returns false when the profile fetch
    /// fails (the token is cleared rather than retried) or when a later
    /// operation superseded this one.
    #[instrument(skip(self, token))]
    pub async fn login(&self, token: BearerToken) -> bool {
        let inner = &self.inner;
        let epoch = inner.next_epoch();
        inner.cancel_expiry();
        {
            let mut state = inner.state.write().await;
            if !inner.is_current(epoch) {
                return false;
            }
            state.loading = true;
            state.last_error = None;
        }

        matches!(inner.establish_bearer(token, epoch).await, Establish::Done)
    }

    /// Establish an API-key session.
    ///
    /// Synchronous in effect and always succeeds: the key is stored and
    /// a fully privileged placeholder identity is synthesized without
    /// server confirmation. Callers that want validation must probe a
    /// protected endpoint themselves first.
    #[instrument(skip(self, key))]
    pub async fn login_with_api_key(&self, key: ApiKey) {
        let inner = &self.inner;
        let mut state = inner.state.write().await;
        inner.next_epoch();
        inner.cancel_expiry();
        inner.store.set_api_key(&key);
        state.is_authenticated = true;
        state.identity = Some(Identity::api_key_placeholder());
        state.credential_kind = CredentialKind::ApiKey;
        state.loading = false;
        state.last_error = None;
        info!("api-key session established");
    }

    /// Exchange an identity-provider authorization code and log in with
    /// the resulting bearer token.
    ///
    /// On failure the reason is recorded in the snapshot's last error
    /// and the session ends unauthenticated.
    #[instrument(skip(self, code))]
    pub async fn exchange_provider_code(&self, code: &str, redirect_uri: &str) -> bool {
        let inner = &self.inner;
        let epoch = inner.next_epoch();
        inner.cancel_expiry();
        {
            let mut state = inner.state.write().await;
            if !inner.is_current(epoch) {
                return false;
            }
            state.loading = true;
            state.last_error = None;
        }

        info!("exchanging authorization code");
        match inner.bridge.exchange_code(code, redirect_uri).await {
            Ok(token) => matches!(inner.establish_bearer(token, epoch).await, Establish::Done),
            Err(err) => {
                let mut state = inner.state.write().await;
                if !inner.is_current(epoch) {
                    return false;
                }
                warn!(error = %err, "code exchange failed");
                Inner::reset_unauthenticated(&mut state);
                state.last_error = Some(err.to_string());
                false
            }
        }
    }

    /// Clear the credential store and end the session.
    ///
    /// Unconditionally succeeds and is idempotent.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        let inner = &self.inner;
        let mut state = inner.state.write().await;
        inner.next_epoch();
        inner.cancel_expiry();
        inner.store.clear_all();
        Inner::reset_unauthenticated(&mut state);
        info!("logged out");
    }

    /// Signal that some API call elsewhere got a 401.
    ///
    /// Treated identically to the expiration timer firing: the session
    /// ends and one expiration event is broadcast. Redundant signals on
    /// an already logged-out session are ignored.
    #[instrument(skip(self))]
    pub async fn notify_unauthorized(&self) {
        Inner::expire(&self.inner).await;
    }

    /// Retire the controller: cancel any pending expiration timer.
    pub fn dispose(&self) {
        self.inner.cancel_expiry();
    }
}

impl Inner {
    fn next_epoch(&self) -> u64 {
        self.epoch.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.epoch.load(Ordering::SeqCst) == epoch
    }

    fn cancel_expiry(&self) {
        if let Ok(mut slot) = self.expiry_task.lock() {
            if let Some(task) = slot.take() {
                task.abort();
            }
        }
    }

    fn reset_unauthenticated(state: &mut SessionSnapshot) {
        state.is_authenticated = false;
        state.identity = None;
        state.credential_kind = CredentialKind::None;
        state.loading = false;
        state.last_error = None;
    }

    fn publish_expired(&self) {
        self.events.publish(SessionEvent::Expired { at: Utc::now() });
    }

    /// Store a bearer token, resolve its identity, and commit.
    ///
    /// The caller has already taken `epoch` and marked the state as
    /// loading; both write points re-check that the epoch is current.
    async fn establish_bearer(self: &Arc<Self>, token: BearerToken, epoch: u64) -> Establish {
        {
            let mut state = self.state.write().await;
            if !self.is_current(epoch) {
                return Establish::Superseded;
            }
            self.store.set_bearer(&token);
            state.loading = true;
        }

        debug!("fetching profile for bearer session");
        let fetched = self.profiles.fetch_profile(&token).await;

        let mut state = self.state.write().await;
        if !self.is_current(epoch) {
            debug!("discarding superseded profile result");
            return Establish::Superseded;
        }

        match fetched {
            Ok(identity) => {
                state.is_authenticated = true;
                state.identity = Some(identity);
                state.credential_kind = CredentialKind::Bearer;
                state.loading = false;
                state.last_error = None;
                // Commit and timer scheduling stay under the same guard
                // so a concurrent logout observes both or neither.
                self.schedule_expiry(&token);
                info!("bearer session established");
                Establish::Done
            }
            Err(err) => {
                warn!(error = %err, "profile fetch failed, invalidating token");
                self.store.clear_all();
                Self::reset_unauthenticated(&mut state);
                state.last_error = Some("failed to load profile".to_string());
                Establish::Failed
            }
        }
    }

    /// Schedule the one-shot auto-logout at the token's expiry.
    ///
    /// Replaces any pending timer, keeping at most one alive. A token
    /// with no decodable expiry never auto-logs-out.
    fn schedule_expiry(self: &Arc<Self>, token: &BearerToken) {
        if clock::decode_expiry(token).is_none() {
            debug!("token has no decodable expiry, not scheduling auto-logout");
            return;
        }

        let ttl = clock::time_to_live(token);
        debug!(ttl_secs = ttl.as_secs(), "scheduling auto-logout");

        let weak = Arc::downgrade(self);
        let task = tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            if let Some(inner) = weak.upgrade() {
                debug!("bearer token expired, forcing logout");
                Inner::expire(&inner).await;
            }
        });

        if let Ok(mut slot) = self.expiry_task.lock() {
            if let Some(old) = slot.replace(task) {
                old.abort();
            }
        }
    }

    /// End the session and broadcast one expiration event.
    ///
    /// No-op when already logged out, so redundant expiration signals
    /// are safe to deliver.
    async fn expire(self: &Arc<Self>) {
        let mut state = self.state.write().await;
        if !state.is_authenticated && self.store.current_kind() == CredentialKind::None {
            debug!("redundant expiration signal ignored");
            return;
        }
        self.next_epoch();
        self.cancel_expiry();
        self.store.clear_all();
        Self::reset_unauthenticated(&mut state);
        drop(state);
        self.publish_expired();
        info!("session expired");
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Ok(mut slot) = self.expiry_task.lock() {
            if let Some(task) = slot.take() {
                task.abort();
            }
        }
    }
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("epoch", &self.inner.epoch.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}
