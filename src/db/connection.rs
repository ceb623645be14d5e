use std::sync::Arc;

use anyhow::Context;
use sea_orm::DatabaseConnection;
use tracing::{info, warn};

use super::{MemoryTodoStore, TodoStore, dao::TodoDao, providers};
use crate::config::{AppConfig, DatabaseConfig};

pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let registry = providers::default_registry()?;
    let provider = registry.provider_for_url(&cfg.url)?;

    info!(
        provider = provider.id().as_str(),
        url = %providers::redact_url(&cfg.url),
        "connecting to todo database"
    );
    let options = providers::connect_options(provider.as_ref(), cfg);
    let db = provider
        .connect(options)
        .await
        .context("failed to connect to database")?;
    provider
        .post_connect(&db)
        .await
        .context("failed to prepare database connection")?;

    info!("syncing todo schema from entities");
    db.get_schema_registry("todos_api::db::entities::*")
        .sync(&db)
        .await
        .context("failed to sync todo schema")?;
    Ok(db)
}

/// Picks the todo backend: the configured database, or memory when none is set.
pub async fn open_store(cfg: &AppConfig) -> anyhow::Result<Arc<dyn TodoStore>> {
    match cfg.database.as_ref() {
        Some(database) => {
            let db = connect(database).await?;
            Ok(Arc::new(TodoDao::new(&db)))
        }
        None => {
            warn!("no database configured; todos are kept in memory and lost on restart");
            Ok(Arc::new(MemoryTodoStore::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use super::open_store;
    use crate::{
        config::{AppConfig, DatabaseConfig},
        db::TodoStore,
        models::{NewTodo, Priority, TodoPatch},
    };

    async fn sqlite_store() -> Arc<dyn TodoStore> {
        let cfg = AppConfig {
            database: Some(DatabaseConfig::new("sqlite::memory:")),
            ..Default::default()
        };
        open_store(&cfg).await.expect("sqlite store opens")
    }

    fn new_todo(text: &str) -> NewTodo {
        NewTodo {
            text: text.to_string(),
            priority: Priority::High,
            deadline: "2025-01-01".parse().expect("valid date"),
        }
    }

    #[tokio::test]
    async fn in_memory_sqlite_round_trips_todos() {
        let store = sqlite_store().await;

        let first = store.insert(new_todo("Buy milk")).await.expect("insert");
        let patch = TodoPatch {
            complete: Some(true),
            ..Default::default()
        };
        let updated = store
            .update(first.id, patch)
            .await
            .expect("update")
            .expect("todo exists");

        assert!(updated.complete);
        assert_eq!(store.find_all().await.expect("list"), vec![updated]);
        assert!(store.delete(first.id).await.expect("delete"));
        assert!(store.find_by_id(first.id).await.expect("find").is_none());
    }

    #[tokio::test]
    async fn sqlite_lists_todos_in_insertion_order() {
        let store = sqlite_store().await;

        let mut inserted = Vec::new();
        for text in ["Water plants", "Buy milk", "Answer email"] {
            inserted.push(store.insert(new_todo(text)).await.expect("insert"));
            // Distinct created_at stamps.
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        assert_eq!(store.find_all().await.expect("list"), inserted);
    }

    #[tokio::test]
    async fn no_database_falls_back_to_memory() {
        let store = open_store(&AppConfig::default()).await.expect("store opens");
        assert!(store.find_all().await.expect("list").is_empty());
    }
}
