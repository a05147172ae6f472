//! 认证服务：注册、登录、当前用户

use crate::{
    auth::jwt::JwtService,
    auth::password::PasswordHasher,
    error::AppError,
    models::auth::{AuthResponse, LoginRequest, RegisterRequest},
    models::user::UserResponse,
    repository::user_repo::UserRepository,
};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

pub struct AuthService {
    db: PgPool,
    jwt_service: Arc<JwtService>,
}

impl AuthService {
    pub fn new(db: PgPool, jwt_service: Arc<JwtService>) -> Self {
        Self { db, jwt_service }
    }

    /// 用户注册
    /// 校验邮箱唯一性 → 哈希密码 → 落库 → 签发令牌
    pub async fn register(&self, req: RegisterRequest) -> Result<AuthResponse, AppError> {
        let user_repo = UserRepository::new(self.db.clone());

        // 检查邮箱是否已被占用
        if user_repo.find_by_email(&req.email).await?.is_some() {
            return Err(AppError::duplicate("user with this email already exists"));
        }

        let hasher = PasswordHasher::new();
        let password_hash = hasher.hash(&req.password)?;

        let user = user_repo.create(&req, &password_hash).await?;

        let token = self.jwt_service.issue(&user.id)?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(AuthResponse { success: true, token })
    }

    /// 用户登录
    /// 查无此人和密码错误返回同一个错误，避免用户枚举
    pub async fn login(&self, req: LoginRequest) -> Result<AuthResponse, AppError> {
        let user_repo = UserRepository::new(self.db.clone());

        let user = user_repo
            .find_by_email(&req.email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let hasher = PasswordHasher::new();
        if !hasher.verify(&req.password, &user.password_hash)? {
            tracing::debug!(user_id = %user.id, "Password mismatch on login");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.jwt_service.issue(&user.id)?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(AuthResponse { success: true, token })
    }

    /// 获取当前用户信息（不含密码哈希）
    pub async fn current_user(&self, user_id: Uuid) -> Result<UserResponse, AppError> {
        let user = UserRepository::new(self.db.clone())
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| AppError::not_found("user not found"))?;

        Ok(UserResponse::from(user))
    }
}
