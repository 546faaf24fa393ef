// src/services/auth.rs

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{AuthResponse, Claims, Session},
    services::{credentials::CredentialVerifier, session_store::SessionStore},
};

#[derive(Clone)]
pub struct AuthService {
    verifier: Arc<dyn CredentialVerifier>,
    sessions: SessionStore,
    jwt_secret: String,
    session_ttl: Duration,
}

impl AuthService {
    pub fn new(
        verifier: Arc<dyn CredentialVerifier>,
        sessions: SessionStore,
        jwt_secret: String,
        session_ttl: Duration,
    ) -> Self {
        Self { verifier, sessions, jwt_secret, session_ttl }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub async fn login_user(&self, username: &str, password: &str) -> Result<AuthResponse, AppError> {
        if !self.verifier.verify(username, password).await? {
            tracing::warn!("Tentativa de login recusada para '{}'", username);
            return Err(AppError::InvalidCredentials);
        }

        let session = self.sessions.create(username, self.session_ttl, Utc::now()).await;
        let token = self.create_token(&session)?;
        tracing::info!("🔑 Sessão {} aberta para '{}'", session.id, username);

        Ok(AuthResponse { token, expires_at: session.expires_at })
    }

    pub async fn validate_token(&self, token: &str) -> Result<Session, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        self.sessions
            .get(token_data.claims.sid, Utc::now())
            .await
            .ok_or(AppError::SessionExpired)
    }

    pub async fn logout(&self, session_id: Uuid) {
        if self.sessions.destroy(session_id).await {
            tracing::info!("🚪 Sessão {} encerrada", session_id);
        }
    }

    fn create_token(&self, session: &Session) -> Result<String, AppError> {
        let claims = Claims {
            sub: session.username.clone(),
            sid: session.id,
            exp: session.expires_at.timestamp() as usize,
            iat: session.created_at.timestamp() as usize,
        };

        // Usa '?' para um tratamento de erro mais limpo
        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::credentials::StaticCredentialVerifier;

    fn service() -> AuthService {
        let verifier = StaticCredentialVerifier::from_plain("admin", "password", 4).unwrap();
        AuthService::new(
            Arc::new(verifier),
            SessionStore::new(),
            "segredo-de-teste".into(),
            Duration::hours(1),
        )
    }

    #[tokio::test]
    async fn login_validate_logout() {
        let auth = service();
        let response = auth.login_user("admin", "password").await.unwrap();

        let session = auth.validate_token(&response.token).await.unwrap();
        assert_eq!(session.username, "admin");
        assert_eq!(session.expires_at, response.expires_at);

        auth.logout(session.id).await;
        let err = auth.validate_token(&response.token).await.unwrap_err();
        assert!(matches!(err, AppError::SessionExpired));
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let err = service().login_user("admin", "admin").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn garbage_or_foreign_tokens_are_invalid() {
        let auth = service();
        assert!(matches!(
            auth.validate_token("não.é.jwt").await.unwrap_err(),
            AppError::InvalidToken
        ));

        let other = AuthService::new(
            Arc::new(StaticCredentialVerifier::from_plain("admin", "password", 4).unwrap()),
            SessionStore::new(),
            "outro-segredo".into(),
            Duration::hours(1),
        );
        let foreign = other.login_user("admin", "password").await.unwrap();
        assert!(matches!(
            auth.validate_token(&foreign.token).await.unwrap_err(),
            AppError::InvalidToken
        ));
    }
}
