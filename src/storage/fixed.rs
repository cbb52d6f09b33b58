use super::db::{LocalStorage, StoreError};
use crate::constants::NAMESPACE_FIXED;
use crate::entities::FixedTask;

impl LocalStorage {
    /// Get the fixed task templates in user order
    pub async fn fixed_tasks(&self) -> Result<Vec<FixedTask>, StoreError> {
        self.read(NAMESPACE_FIXED).await
    }

    /// Replace the fixed task templates
    pub async fn save_fixed_tasks(&self, tasks: &[FixedTask]) -> Result<(), StoreError> {
        self.write(NAMESPACE_FIXED, tasks).await
    }
}
