//! Key/value repository for database operations.

use chrono::Utc;
use sea_orm::{sea_query::OnConflict, ActiveValue, ConnectionTrait, DbErr, EntityTrait};

use crate::entities::kv_entry;

/// Repository for namespace-keyed raw values.
pub struct KvRepository;

impl KvRepository {
    /// Get the raw stored text for a namespace.
    pub async fn get<C>(conn: &C, namespace: &str) -> Result<Option<String>, DbErr>
    where
        C: ConnectionTrait,
    {
        Ok(kv_entry::Entity::find_by_id(namespace.to_string())
            .one(conn)
            .await?
            .map(|entry| entry.value))
    }

    /// Replace the raw stored text for a namespace.
    pub async fn put<C>(conn: &C, namespace: &str, value: String) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        let entry = kv_entry::ActiveModel {
            namespace: ActiveValue::Set(namespace.to_string()),
            value: ActiveValue::Set(value),
            updated_at: ActiveValue::Set(Utc::now().to_rfc3339()),
        };

        kv_entry::Entity::insert(entry)
            .on_conflict(
                OnConflict::column(kv_entry::Column::Namespace)
                    .update_columns([kv_entry::Column::Value, kv_entry::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec(conn)
            .await?;

        Ok(())
    }
}
