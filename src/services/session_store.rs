// src/services/session_store.rs

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::auth::Session;

// Sessões em memória. Reiniciar o servidor derruba todo mundo.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, username: &str, ttl: Duration, now: DateTime<Utc>) -> Session {
        let session = Session {
            id: Uuid::new_v4(),
            username: username.to_string(),
            created_at: now,
            expires_at: now + ttl,
        };

        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());
        session
    }

    /// Sessão ativa, ou `None` se não existe ou já expirou (e nesse caso é removida).
    pub async fn get(&self, id: Uuid, now: DateTime<Utc>) -> Option<Session> {
        let session = self.sessions.read().await.get(&id).cloned()?;

        if session.is_expired_at(now) {
            self.sessions.write().await.remove(&id);
            return None;
        }
        Some(session)
    }

    pub async fn destroy(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    pub async fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired_at(now));
        before - sessions.len()
    }
}
