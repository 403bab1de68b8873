// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::{
    common::i18n::I18nStore,
    db::{InMemoryReceivableStore, PgReceivableStore, ReceivableStore},
    services::ReceivableService,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(value: &str) -> anyhow::Result<Self> {
        match value.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => anyhow::bail!("APP_ENV inválido: '{}' (use development ou production)", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    // Sem DATABASE_URL o serviço sobe com o store em memória
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub bind_address: String,
    pub environment: Environment,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty());

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .map(|v| v.parse::<u32>())
            .unwrap_or(Ok(5))
            .context("DATABASE_MAX_CONNECTIONS deve ser um número inteiro")?;

        let acquire_timeout_secs = env::var("DATABASE_ACQUIRE_TIMEOUT_SECS")
            .map(|v| v.parse::<u64>())
            .unwrap_or(Ok(3))
            .context("DATABASE_ACQUIRE_TIMEOUT_SECS deve ser um número inteiro")?;

        let bind_address = env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let environment = match env::var("APP_ENV") {
            Ok(value) => Environment::parse(&value)?,
            Err(_) => Environment::Development,
        };

        Ok(Self {
            database_url,
            max_connections,
            acquire_timeout: Duration::from_secs(acquire_timeout_secs),
            bind_address,
            environment,
        })
    }

    pub fn swagger_enabled(&self) -> bool {
        self.environment == Environment::Development
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub receivable_service: ReceivableService,
    pub i18n_store: Arc<I18nStore>,
}

impl AppState {
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn ReceivableStore> = match &config.database_url {
            Some(database_url) => {
                let db_pool = PgPoolOptions::new()
                    .max_connections(config.max_connections)
                    .acquire_timeout(config.acquire_timeout)
                    .connect(database_url)
                    .await
                    .context("Falha ao conectar ao banco de dados")?;

                tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

                sqlx::migrate!()
                    .run(&db_pool)
                    .await
                    .context("Falha ao rodar as migrações do banco de dados")?;

                tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

                Arc::new(PgReceivableStore::new(db_pool))
            }
            None => {
                tracing::warn!("DATABASE_URL não definida, usando store em memória");
                Arc::new(InMemoryReceivableStore::new())
            }
        };

        Ok(Self::with_store(store))
    }

    // --- Monta o gráfico de dependências ---
    pub fn with_store(store: Arc<dyn ReceivableStore>) -> Self {
        Self {
            receivable_service: ReceivableService::new(store),
            i18n_store: Arc::new(I18nStore::new()),
        }
    }

    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(InMemoryReceivableStore::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_environment_names() {
        assert_eq!(Environment::parse("Development").unwrap(), Environment::Development);
        assert_eq!(Environment::parse("prod").unwrap(), Environment::Production);
        assert!(Environment::parse("staging").is_err());
    }
}
