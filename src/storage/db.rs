use log::{debug, warn};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;

use crate::entities::kv_entry;
use crate::repositories::KvRepository;

/// Failures of the underlying database or of encoding a value for it.
///
/// Decoding stored values never produces an error; see [`LocalStorage::read`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to prepare storage directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Local storage manager for routine data
#[derive(Clone)]
pub struct LocalStorage {
    pub(crate) conn: DatabaseConnection,
}

impl LocalStorage {
    /// Open (or create) the SQLite database at `path`
    pub async fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let url = format!("sqlite://{}?mode=rwc", path.display());
        let mut options = ConnectOptions::new(url);
        // single control flow, one writer
        options.max_connections(1).min_connections(1).sqlx_logging(false);

        let conn = Database::connect(options).await?;
        let storage = LocalStorage { conn };
        storage.init_schema().await?;

        debug!("Opened routine database at {}", path.display());
        Ok(storage)
    }

    /// Create the key/value table if it does not exist yet
    async fn init_schema(&self) -> Result<(), StoreError> {
        let backend = self.conn.get_database_backend();
        let schema = Schema::new(backend);

        let mut statement = schema.create_table_from_entity(kv_entry::Entity);
        statement.if_not_exists();
        self.conn.execute(backend.build(&statement)).await?;

        Ok(())
    }

    /// Read a namespace, falling back to the type's default when the value is
    /// absent or cannot be decoded.
    pub async fn read<T>(&self, namespace: &str) -> Result<T, StoreError>
    where
        T: DeserializeOwned + Default,
    {
        let Some(raw) = KvRepository::get(&self.conn, namespace).await? else {
            return Ok(T::default());
        };

        match serde_json::from_str::<Option<T>>(&raw) {
            Ok(Some(value)) => Ok(value),
            Ok(None) => Ok(T::default()),
            Err(e) => {
                warn!("Discarding undecodable value in '{}': {}", namespace, e);
                Ok(T::default())
            }
        }
    }

    /// Replace a namespace with a new value. The write is committed before returning.
    pub async fn write<T>(&self, namespace: &str, value: &T) -> Result<(), StoreError>
    where
        T: Serialize + ?Sized,
    {
        let encoded = serde_json::to_string(value)?;
        KvRepository::put(&self.conn, namespace, encoded).await?;
        Ok(())
    }

    /// Store raw text without encoding, as another writer might have left it
    pub async fn write_raw(&self, namespace: &str, raw: &str) -> Result<(), StoreError> {
        KvRepository::put(&self.conn, namespace, raw.to_string()).await?;
        Ok(())
    }
}
