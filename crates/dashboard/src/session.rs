use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Mutex;
use std::time::Instant;

use axum::{extract::FromRequestParts, http::request::Parts};
use hyper::header::COOKIE;
use log::{debug, info};
use uuid::Uuid;

use crate::selection::{SelectionDefaults, SelectionState};
use crate::stations::StationIndex;

pub const SESSION_COOKIE: &str = "obsnet_session";

/// Oldest sessions are dropped past this many
const MAX_SESSIONS: usize = 10_000;

/// Session id carried by the request cookie, if any
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionCookie(pub Option<Uuid>);

impl<S: Send + Sync> FromRequestParts<S> for SessionCookie {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok());
        Ok(SessionCookie(id))
    }
}

/// `Set-Cookie` value binding the browser to `id`
pub fn session_cookie_header(id: Uuid) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id)
}

struct SessionEntry {
    selection: SelectionState,
    last_seen: Instant,
}

/// Selection state for every browser session, never shared between them
pub struct SessionStore {
    defaults: SelectionDefaults,
    sessions: Mutex<HashMap<Uuid, SessionEntry>>,
}

impl SessionStore {
    pub fn new(defaults: SelectionDefaults) -> Self {
        Self {
            defaults,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run `f` against the session's selection, creating the session when the
    /// id is absent or unknown. Returns the id the browser should keep.
    pub fn with_session<R>(
        &self,
        id: Option<Uuid>,
        index: &StationIndex,
        f: impl FnOnce(&mut SelectionState) -> R,
    ) -> (Uuid, R) {
        let mut sessions = self.lock();

        let id = match id.filter(|id| sessions.contains_key(id)) {
            Some(id) => id,
            None => {
                if sessions.len() >= MAX_SESSIONS {
                    evict_oldest(&mut sessions);
                }
                let id = Uuid::now_v7();
                debug!("new session {}", id);
                id
            }
        };

        let defaults = &self.defaults;
        let entry = sessions.entry(id).or_insert_with(|| SessionEntry {
            selection: SelectionState::new(index, defaults),
            last_seen: Instant::now(),
        });
        entry.last_seen = Instant::now();
        entry.selection.refresh(index);
        (id, f(&mut entry.selection))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, SessionEntry>> {
        match self.sessions.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn evict_oldest(sessions: &mut HashMap<Uuid, SessionEntry>) {
    let oldest = sessions
        .iter()
        .min_by_key(|(_, entry)| entry.last_seen)
        .map(|(id, _)| *id);
    if let Some(id) = oldest {
        info!("session limit reached, dropping session {}", id);
        sessions.remove(&id);
    }
}
