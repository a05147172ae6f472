//! 所有权校验单元测试

use notes_service::auth::ownership::authorize_owner;
use notes_service::error::AppError;
use uuid::Uuid;

#[test]
fn test_owner_may_mutate_own_resource() {
    let owner = Uuid::new_v4();
    assert!(authorize_owner(owner, owner).is_ok());
}

#[test]
fn test_every_other_actor_is_denied() {
    // 任何 actor_id != owner_id 都必须被拒绝
    let owner = Uuid::new_v4();

    for _ in 0..200 {
        let actor = Uuid::new_v4();
        assert_ne!(actor, owner);

        let result = authorize_owner(owner, actor);
        assert!(matches!(result, Err(AppError::OwnershipDenied)));
    }
}

#[test]
fn test_denial_maps_to_401() {
    let err = authorize_owner(Uuid::new_v4(), Uuid::new_v4()).unwrap_err();
    assert_eq!(err.code(), 401);
}

#[test]
fn test_guard_is_symmetric_between_two_users() {
    // A 不能动 B 的资源，B 也不能动 A 的
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();

    assert!(authorize_owner(a, b).is_err());
    assert!(authorize_owner(b, a).is_err());
    assert!(authorize_owner(a, a).is_ok());
    assert!(authorize_owner(b, b).is_ok());
}
