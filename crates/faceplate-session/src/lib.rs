#![warn(missing_docs)]

//! Session storage for parsed face sets.
//!
//! The transport layer hands each upload to the core as a face set keyed
//! by a session identifier. This crate holds those sets in a
//! process-wide store: the map itself is guarded by one lock, each
//! session by its own, so concurrent requests against different keys
//! never contend and requests against the same key serialize instead of
//! racing. TTL-based eviction bounds memory growth.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use faceplate_brep::FaceData;
use faceplate_flatten::{flatten_face, write_drawing, DrawingRenderer, FlattenError};
use thiserror::Error;
use uuid::Uuid;

/// Errors raised by the session store.
#[derive(Error, Debug)]
pub enum SessionError {
    /// No session under the given key.
    #[error("session not found: {0}")]
    NotFound(SessionId),
}

/// Opaque session key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a fresh random key.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a key from its string form.
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// One upload's parsed state, owned by the store for its TTL.
#[derive(Debug)]
pub struct Session {
    /// Original upload file name.
    pub filename: String,
    /// Parsed faces, immutable for the session's lifetime.
    pub faces: Vec<FaceData>,
    created: Instant,
}

impl Session {
    /// Look up a face by index.
    pub fn face(&self, index: usize) -> Result<&FaceData, FlattenError> {
        self.faces.get(index).ok_or(FlattenError::InvalidFaceId {
            index,
            count: self.faces.len(),
        })
    }

    /// Number of faces in the session.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Download name for an exported face: `{stem}_face_{id+1}.{ext}`.
    pub fn artifact_name(&self, face_index: usize, extension: &str) -> String {
        let stem = Path::new(&self.filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("export");
        format!("{stem}_face_{}.{extension}", face_index + 1)
    }
}

/// Process-wide keyed store of sessions.
pub struct SessionStore {
    sessions: Mutex<HashMap<SessionId, Arc<Mutex<Session>>>>,
    ttl: Duration,
}

impl SessionStore {
    /// Create a store whose sessions expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Insert a parsed face set and return its key.
    pub fn insert(&self, filename: String, faces: Vec<FaceData>) -> SessionId {
        let id = SessionId::new();
        let session = Session {
            filename,
            faces,
            created: Instant::now(),
        };
        let mut sessions = self.sessions.lock().expect("session map poisoned");
        sessions.insert(id, Arc::new(Mutex::new(session)));
        id
    }

    /// Fetch a session's per-key handle.
    pub fn get(&self, id: SessionId) -> Result<Arc<Mutex<Session>>, SessionError> {
        let sessions = self.sessions.lock().expect("session map poisoned");
        sessions
            .get(&id)
            .cloned()
            .ok_or(SessionError::NotFound(id))
    }

    /// Remove a session. Returns true when it existed.
    pub fn remove(&self, id: SessionId) -> bool {
        let mut sessions = self.sessions.lock().expect("session map poisoned");
        sessions.remove(&id).is_some()
    }

    /// Drop sessions older than the TTL. Returns how many were evicted.
    pub fn evict_expired(&self) -> usize {
        let mut sessions = self.sessions.lock().expect("session map poisoned");
        let ttl = self.ttl;
        let before = sessions.len();
        sessions.retain(|id, session| {
            let keep = match session.lock() {
                Ok(s) => s.created.elapsed() < ttl,
                Err(_) => false,
            };
            if !keep {
                log::debug!("evicting expired session {id}");
            }
            keep
        });
        before - sessions.len()
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.lock().expect("session map poisoned").len()
    }

    /// True when no session is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Flatten one session face and write it to a temporary artifact file.
///
/// Returns the artifact path plus its entity count — the per-face
/// contract handed back to the transport layer. The caller owns the
/// file and deletes it after the response via [`remove_artifact`].
pub fn export_face_artifact(
    session: &Session,
    face_index: usize,
    renderer: &dyn DrawingRenderer,
) -> Result<(PathBuf, usize), FlattenError> {
    let face = session.face(face_index)?;
    let drawing = flatten_face(face);
    let path = std::env::temp_dir().join(format!(
        "faceplate-{}-{}",
        Uuid::new_v4(),
        session.artifact_name(face_index, renderer.extension())
    ));
    write_drawing(&drawing, renderer, &path)?;
    Ok((path, drawing.entity_count()))
}

/// Delete a temporary artifact after its response is sent.
///
/// Failures are logged, never retried or propagated — exactly the
/// completion-hook semantics of the transport layer.
pub fn remove_artifact(path: &PathBuf) {
    if let Err(err) = std::fs::remove_file(path) {
        log::warn!("could not delete temp artifact {}: {err}", path.display());
    }
}
