// src/config.rs

use std::{env, sync::Arc};

use anyhow::Context;
use chrono::Duration;

use crate::{
    client::{HttpWarehouseClient, WarehouseClient},
    common::i18n::I18nStore,
    services::{
        analytics_service::AnalyticsService,
        auth::AuthService,
        credentials::{CredentialVerifier, StaticCredentialVerifier},
        dashboard_service::DashboardService,
        session_store::SessionStore,
    },
};

#[derive(Debug, Clone)]
pub struct WarehouseApiSettings {
    pub base_url: String,
    pub prefix: String,
    pub timeout_secs: u64,
}

// Credenciais do administrador: hash pronto ou senha em texto (hash gerado na subida)
#[derive(Debug, Clone)]
pub enum AdminPassword {
    Hash(String),
    Plain(String),
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_addr: String,
    pub warehouse_api: WarehouseApiSettings,
    pub jwt_secret: String,
    pub session_ttl: Duration,
    pub admin_username: String,
    pub admin_password: AdminPassword,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{} inválida ({}): {}", key, raw, e)),
        Err(_) => Ok(default),
    }
}

// Horas de sessão: precisa ser positivo e caber em `chrono::Duration`
fn session_ttl_from_hours(hours: i64) -> anyhow::Result<Duration> {
    Duration::try_hours(hours)
        .filter(|ttl| *ttl > Duration::zero())
        .with_context(|| format!("SESSION_TTL_HOURS fora do intervalo: {}", hours))
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        let admin_password = match env::var("ADMIN_PASSWORD_HASH") {
            Ok(hash) => AdminPassword::Hash(hash),
            Err(_) => AdminPassword::Plain(env_or("ADMIN_PASSWORD", "password")),
        };

        Ok(Self {
            server_addr: env_or("SERVER_ADDR", "0.0.0.0:3000"),
            warehouse_api: WarehouseApiSettings {
                base_url: env_or("WAREHOUSE_API_URL", "http://localhost:8000"),
                prefix: env_or("WAREHOUSE_API_PREFIX", "/get"),
                timeout_secs: env_parse("WAREHOUSE_API_TIMEOUT_SECS", 30)?,
            },
            jwt_secret,
            session_ttl: session_ttl_from_hours(env_parse("SESSION_TTL_HOURS", 8)?)?,
            admin_username: env_or("ADMIN_USERNAME", "admin"),
            admin_password,
        })
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub analytics_service: AnalyticsService,
    pub dashboard_service: DashboardService,
    pub auth_service: AuthService,
    pub i18n_store: Arc<I18nStore>,
}

impl AppState {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let client = HttpWarehouseClient::new(&settings.warehouse_api)?;
        tracing::info!(
            "✅ API do armazém configurada em {}{}",
            settings.warehouse_api.base_url,
            settings.warehouse_api.prefix
        );

        let verifier = match &settings.admin_password {
            AdminPassword::Hash(hash) => {
                StaticCredentialVerifier::new(settings.admin_username.clone(), hash.clone())
            }
            AdminPassword::Plain(password) => {
                tracing::warn!("ADMIN_PASSWORD_HASH não definido, gerando hash da senha em texto");
                StaticCredentialVerifier::from_plain(
                    settings.admin_username.clone(),
                    password,
                    bcrypt::DEFAULT_COST,
                )?
            }
        };

        Ok(Self::with_dependencies(
            settings,
            Arc::new(client),
            Arc::new(verifier),
        ))
    }

    // --- Monta o gráfico de dependências ---
    pub fn with_dependencies(
        settings: &Settings,
        client: Arc<dyn WarehouseClient>,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> Self {
        let analytics_service = AnalyticsService::new(client.clone());
        let dashboard_service = DashboardService::new(client);
        let auth_service = AuthService::new(
            verifier,
            SessionStore::new(),
            settings.jwt_secret.clone(),
            settings.session_ttl,
        );

        Self {
            analytics_service,
            dashboard_service,
            auth_service,
            i18n_store: Arc::new(I18nStore::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ttl_accepts_sane_hours() {
        assert_eq!(session_ttl_from_hours(8).unwrap(), Duration::hours(8));
    }

    #[test]
    fn session_ttl_out_of_range_is_an_error_not_a_panic() {
        for hours in [i64::MAX, i64::MIN, 0, -1] {
            let err = session_ttl_from_hours(hours).unwrap_err();
            assert!(err.to_string().contains("SESSION_TTL_HOURS"), "{}", err);
        }
    }
}
