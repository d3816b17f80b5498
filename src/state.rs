use std::sync::{Arc, Mutex};

use anyhow::Context;

use crate::config::AppConfig;
use crate::db::{self, MemoryKv, SqliteKv};
use crate::errors::AppError;
use crate::services::booking_store::{BookingStore, KvBookingStore};
use crate::services::id_gen::{IdGenerator, RandomIdGenerator, SequentialIdGenerator};
use crate::services::lifecycle::TransitionPolicy;
use crate::services::seed;
use crate::services::users::UserDirectory;

pub struct AppState {
    pub store: Arc<dyn BookingStore>,
    pub users: UserDirectory,
    pub config: AppConfig,
}

impl AppState {
    pub fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let store = build_store(&config)?;

        if config.seed_fixtures {
            seed::seed_if_empty(store.as_ref()).context("failed to seed fixture bookings")?;
        }

        Ok(Self {
            store,
            users: UserDirectory::with_fixtures(),
            config,
        })
    }
}

pub fn build_store(config: &AppConfig) -> anyhow::Result<Arc<dyn BookingStore>> {
    let ids: Box<dyn IdGenerator> = match config.id_scheme.as_str() {
        "sequential" => Box::new(SequentialIdGenerator::new(config.id_prefix.clone())),
        "random" => Box::new(RandomIdGenerator::new(config.id_prefix.clone())),
        other => {
            return Err(AppError::Config(format!("unknown ID_SCHEME: {other}")).into());
        }
    };

    let policy = TransitionPolicy::parse(&config.transition_policy).ok_or_else(|| {
        AppError::Config(format!(
            "unknown TRANSITION_POLICY: {}",
            config.transition_policy
        ))
    })?;

    let store: Arc<dyn BookingStore> = match config.store_backend.as_str() {
        "sqlite" => {
            let conn = db::init_db(&config.database_url)?;
            tracing::info!(
                "using sqlite booking store (path: {}, policy: {})",
                config.database_url,
                policy.as_str()
            );
            Arc::new(KvBookingStore::new(
                SqliteKv::new(Arc::new(Mutex::new(conn))),
                ids,
                policy,
            ))
        }
        "memory" => {
            tracing::info!("using in-memory booking store (policy: {})", policy.as_str());
            Arc::new(KvBookingStore::new(MemoryKv::new(), ids, policy))
        }
        other => {
            return Err(AppError::Config(format!("unknown STORE_BACKEND: {other}")).into());
        }
    };

    Ok(store)
}
