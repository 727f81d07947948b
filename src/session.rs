// Captured sessions - the records Launchpad organizes
//
// Sessions belong to the host. The host keeps them in a `SessionStore` as
// `Arc<Session>`; the bookmark tree only ever holds `Weak` references, so a
// session the host throws away simply stops resolving in the tree.
//
// The only mutable part of a session is its flag map. Launchpad writes a
// single flag into it (see `alias.rs`).

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Host-assigned session identifier
pub type SessionId = u64;

/// String-keyed flag map attached to a session
///
/// Guarded by a mutex because the host feed hands sessions across tasks.
#[derive(Debug, Default)]
pub struct Flags {
    entries: Mutex<HashMap<String, String>>,
}

impl Flags {
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    pub fn set(&self, key: &str, value: impl Into<String>) {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.to_string(), value.into());
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

impl From<HashMap<String, String>> for Flags {
    fn from(entries: HashMap<String, String>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }
}

/// A captured request/response pair, as seen by Launchpad
#[derive(Debug, Deserialize)]
pub struct Session {
    /// Unique id assigned by the host
    pub id: SessionId,

    /// Short URL (host + path) used for display
    pub url: String,

    /// Absolute URL including scheme, used when launching a browser
    pub full_url: String,

    /// HTTP method, as captured (case is not normalized)
    #[serde(rename = "method")]
    pub request_method: String,

    #[serde(default, deserialize_with = "deserialize_flags")]
    flags: Flags,
}

fn deserialize_flags<'de, D>(deserializer: D) -> std::result::Result<Flags, D::Error>
where
    D: serde::Deserializer<'de>,
{
    HashMap::<String, String>::deserialize(deserializer).map(Flags::from)
}

impl Session {
    #[cfg(test)]
    pub fn new(
        id: SessionId,
        url: impl Into<String>,
        full_url: impl Into<String>,
        request_method: impl Into<String>,
    ) -> Self {
        Self {
            id,
            url: url.into(),
            full_url: full_url.into(),
            request_method: request_method.into(),
            flags: Flags::default(),
        }
    }

    /// Read a flag by key
    pub fn flag(&self, key: &str) -> Option<String> {
        self.flags.get(key)
    }

    /// Write a flag, replacing any previous value
    pub fn set_flag(&self, key: &str, value: impl Into<String>) {
        self.flags.set(key, value);
    }

    #[cfg(test)]
    pub fn flags(&self) -> &Flags {
        &self.flags
    }
}

/// Sessions captured by the host, in capture order
///
/// This is the owning side of every session the tree refers to.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Vec<Arc<Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a session; returns the shared handle, or `None` if the id is taken
    pub fn push(&mut self, session: Session) -> Option<Arc<Session>> {
        if self.sessions.iter().any(|s| s.id == session.id) {
            tracing::debug!(id = session.id, "Ignoring duplicate session id");
            return None;
        }
        let session = Arc::new(session);
        self.sessions.push(Arc::clone(&session));
        Some(session)
    }

    /// Drop the host's handle to a session
    ///
    /// Tree nodes that referenced it stop resolving once the last strong
    /// reference (e.g. an in-flight drag payload) is gone.
    pub fn remove(&mut self, id: SessionId) -> Option<Arc<Session>> {
        let index = self.sessions.iter().position(|s| s.id == id)?;
        Some(self.sessions.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&Arc<Session>> {
        self.sessions.get(index)
    }

    #[cfg(test)]
    pub fn find(&self, id: SessionId) -> Option<&Arc<Session>> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Session>> {
        self.sessions.iter()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Load every session from a JSON Lines capture file into the store
    ///
    /// Returns how many sessions were added (duplicates are skipped).
    pub fn load_jsonl(&mut self, path: &Path) -> Result<usize> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read capture file {}", path.display()))?;

        let mut added = 0;
        for session in parse_jsonl(&contents)
            .with_context(|| format!("Failed to parse capture file {}", path.display()))?
        {
            if self.push(session).is_some() {
                added += 1;
            }
        }

        tracing::info!(path = %path.display(), added, "Loaded captured sessions");
        Ok(added)
    }
}

/// Parse JSON Lines into sessions; blank lines are ignored
pub fn parse_jsonl(contents: &str) -> Result<Vec<Session>> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str::<Session>(line)
                .with_context(|| format!("line {}: invalid session record", index + 1))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_jsonl_reads_fields_and_flags() {
        let input = r#"
{"id": 7, "url": "api.example.com/users", "full_url": "https://api.example.com/users", "method": "GET"}

{"id": 8, "url": "api.example.com/login", "full_url": "https://api.example.com/login", "method": "POST", "flags": {"launchpad.alias": "Login"}}
"#;
        let sessions = parse_jsonl(input).unwrap();
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].id, 7);
        assert_eq!(sessions[0].request_method, "GET");
        assert_eq!(sessions[0].flags().len(), 0);
        assert_eq!(sessions[1].flag("launchpad.alias").as_deref(), Some("Login"));
    }

    #[test]
    fn test_parse_jsonl_reports_line_number() {
        let input = "{\"id\": 1, \"url\": \"a\", \"full_url\": \"http://a\", \"method\": \"GET\"}\nnot json";
        let err = parse_jsonl(input).unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));
    }

    #[test]
    fn test_store_rejects_duplicate_ids() {
        let mut store = SessionStore::new();
        assert!(store.push(Session::new(1, "a", "http://a", "GET")).is_some());
        assert!(store.push(Session::new(1, "b", "http://b", "GET")).is_none());
        assert_eq!(store.len(), 1);
        assert_eq!(store.find(1).unwrap().url, "a");
    }

    #[test]
    fn test_store_remove_releases_handle() {
        let mut store = SessionStore::new();
        let handle = store.push(Session::new(3, "a", "http://a", "GET")).unwrap();
        let weak = Arc::downgrade(&handle);
        drop(handle);

        assert!(weak.upgrade().is_some());
        store.remove(3);
        assert!(weak.upgrade().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_flags_overwrite() {
        let session = Session::new(1, "a", "http://a", "GET");
        session.set_flag("k", "one");
        session.set_flag("k", "two");
        assert_eq!(session.flag("k").as_deref(), Some("two"));
        assert_eq!(session.flag("missing"), None);
    }
}
