use uuid::Uuid;
use crate::shared::errors::AuthError;

/// 소유자가 기록된 리소스
/// A resource with a recorded owner
pub trait Owned {
    fn owner_id(&self) -> Uuid;
}

/// 소유권 검사
/// Ownership guard for mutating endpoints
///
/// 반드시 변경 작업 전에 호출: 리소스 로드 → check → 통과 시에만 변경
pub struct OwnershipGuard;

impl OwnershipGuard {
    pub fn check(principal: Uuid, resource_owner: Uuid) -> Result<(), AuthError> {
        if principal == resource_owner {
            Ok(())
        } else {
            tracing::debug!(%principal, %resource_owner, "ownership check failed");
            Err(AuthError::Forbidden)
        }
    }

    pub fn check_resource<R: Owned>(principal: Uuid, resource: &R) -> Result<(), AuthError> {
        Self::check(principal, resource.owner_id())
    }
}
