//! Per-session request serialization.
//!
//! The session layer loads a visitor's record before the handler runs and
//! writes the whole record back after the response is built. This layer wraps
//! the session layer so that requests carrying the same session cookie run one
//! at a time, from load to save. Requests without a cookie start a fresh
//! session and are never blocked.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tokio::sync::Mutex;

use super::session::SESSION_COOKIE_NAME;

/// Registry of per-session locks, keyed by session cookie value.
///
/// Entries hold weak references, so a lock lives only while some request
/// holds or waits on it. Dead entries are pruned when a new lock is created.
#[derive(Clone, Default)]
pub struct SessionLocks {
    locks: Arc<Mutex<HashMap<String, Weak<Mutex<()>>>>>,
}

impl SessionLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The lock for `session`, shared with every in-flight request on it.
    async fn lock_for(&self, session: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        if let Some(lock) = locks.get(session).and_then(Weak::upgrade) {
            return lock;
        }

        locks.retain(|_, lock| lock.strong_count() > 0);
        let lock = Arc::new(Mutex::new(()));
        locks.insert(session.to_owned(), Arc::downgrade(&lock));
        lock
    }
}

/// Middleware that runs one request at a time per session cookie.
///
/// Must be layered outside the session layer.
pub async fn session_lock_middleware(
    State(locks): State<SessionLocks>,
    request: Request,
    next: Next,
) -> Response {
    let Some(session) = session_cookie(&request) else {
        return next.run(request).await;
    };

    let _guard = locks.lock_for(&session).await.lock_owned().await;
    next.run(request).await
}

/// Value of the session cookie, if the request carries one.
fn session_cookie(request: &Request) -> Option<String> {
    request
        .headers()
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            pair.trim()
                .strip_prefix(SESSION_COOKIE_NAME)?
                .strip_prefix('=')
        })
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}
