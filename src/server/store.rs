//! In-memory stores for notes, accounts and sessions.

use chrono::Utc;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::models::{NewNote, Note};

/// Notes in insertion order
#[derive(Default)]
pub struct NoteStore {
    notes: RwLock<Vec<Note>>,
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list(&self) -> Vec<Note> {
        self.notes.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.notes.read().await.len()
    }

    pub async fn get(&self, id: &str) -> Option<Note> {
        self.notes.read().await.iter().find(|n| n.id == id).cloned()
    }

    pub async fn insert(&self, new: NewNote) -> Note {
        let now = Utc::now().to_rfc3339();
        let note = Note {
            id: uuid::Uuid::new_v4().to_string(),
            title: new.title,
            content: new.content,
            created_at: Some(now.clone()),
            updated_at: Some(now),
        };
        self.notes.write().await.push(note.clone());
        note
    }

    pub async fn update(&self, id: &str, new: NewNote) -> Option<Note> {
        let mut notes = self.notes.write().await;
        let note = notes.iter_mut().find(|n| n.id == id)?;
        note.title = new.title;
        note.content = new.content;
        note.updated_at = Some(Utc::now().to_rfc3339());
        Some(note.clone())
    }

    /// Returns whether a note was removed
    pub async fn remove(&self, id: &str) -> bool {
        let mut notes = self.notes.write().await;
        let before = notes.len();
        notes.retain(|n| n.id != id);
        notes.len() != before
    }
}

struct Account {
    user_id: String,
    salt: String,
    digest: String,
}

/// Registered users and open sessions
#[derive(Default)]
pub struct UserStore {
    accounts: RwLock<HashMap<String, Account>>,
    sessions: RwLock<HashMap<String, String>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the username is taken
    pub async fn register(&self, username: &str, password: &str) -> bool {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(username) {
            return false;
        }

        let salt = uuid::Uuid::new_v4().simple().to_string();
        let digest = password_digest(&salt, password);
        accounts.insert(
            username.to_string(),
            Account {
                user_id: uuid::Uuid::new_v4().to_string(),
                salt,
                digest,
            },
        );
        true
    }

    /// The user id for valid credentials
    pub async fn authenticate(&self, username: &str, password: &str) -> Option<String> {
        let accounts = self.accounts.read().await;
        let account = accounts.get(username)?;
        (password_digest(&account.salt, password) == account.digest).then(|| account.user_id.clone())
    }

    /// Open a session and return its token
    pub async fn open_session(&self, user_id: &str) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        self.sessions
            .write()
            .await
            .insert(token.clone(), user_id.to_string());
        token
    }

    pub async fn session_user(&self, token: &str) -> Option<String> {
        self.sessions.read().await.get(token).cloned()
    }

    pub async fn close_session(&self, token: &str) {
        self.sessions.write().await.remove(token);
    }
}

fn password_digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}
