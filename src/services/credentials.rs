// src/services/credentials.rs

use async_trait::async_trait;
use bcrypt::{hash, verify};

use crate::common::error::AppError;

// Quem decide se usuário/senha são válidos.
// Trocar por um backend real não muda nenhum ponto de chamada.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, username: &str, password: &str) -> Result<bool, AppError>;
}

// Um único usuário administrador, com a senha guardada como hash bcrypt
#[derive(Debug, Clone)]
pub struct StaticCredentialVerifier {
    username: String,
    password_hash: String,
}

impl StaticCredentialVerifier {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }

    /// Gera o hash na inicialização, quando só a senha em texto foi configurada.
    pub fn from_plain(
        username: impl Into<String>,
        password: &str,
        cost: u32,
    ) -> Result<Self, AppError> {
        let password_hash = hash(password, cost)?;
        Ok(Self::new(username, password_hash))
    }
}

#[async_trait]
impl CredentialVerifier for StaticCredentialVerifier {
    async fn verify(&self, username: &str, password: &str) -> Result<bool, AppError> {
        if username != self.username {
            return Ok(false);
        }

        let password_clone = password.to_owned();
        let password_hash_clone = self.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        Ok(is_password_valid)
    }
}
