//! Resource ownership guard

use crate::error::AppError;
use uuid::Uuid;

/// Compare a resource's recorded owner against the acting user.
///
/// Pure check with no side effects. Callers must run it after the
/// resource is fetched and before any write, with no intervening
/// mutation of the record.
pub fn authorize_owner(resource_owner_id: Uuid, actor_id: Uuid) -> Result<(), AppError> {
    if resource_owner_id == actor_id {
        Ok(())
    } else {
        Err(AppError::OwnershipDenied)
    }
}
