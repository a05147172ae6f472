//! 统一错误模型
//! 定义所有错误类型和错误响应格式

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;

/// 结果类型别名
pub type Result<T> = std::result::Result<T, AppError>;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication failed")]
    Unauthorized,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Ownership violation")]
    OwnershipDenied,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource already exists: {0}")]
    DuplicateResource(String),

    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// 获取 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::OwnershipDenied => StatusCode::UNAUTHORIZED,
            // 缺失的笔记 ID 按约定返回 400 而不是 404
            AppError::InvalidCredentials
            | AppError::NotFound(_)
            | AppError::DuplicateResource(_)
            | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 获取用户友好的错误消息（不包含敏感信息）
    pub fn user_message(&self) -> String {
        match self {
            AppError::Unauthorized => "please authenticate using a valid token".to_string(),
            AppError::InvalidCredentials => "invalid credentials".to_string(),
            AppError::OwnershipDenied => "change not allowed".to_string(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::DuplicateResource(msg) => msg.clone(),
            AppError::Validation(msgs) => msgs.join(", "),
            AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
                "internal server error".to_string()
            }
        }
    }

    /// 获取错误码
    pub fn code(&self) -> u16 {
        self.status_code().as_u16()
    }

    // 便捷方法
    pub fn not_found(msg: &str) -> Self {
        AppError::NotFound(msg.to_string())
    }

    pub fn validation(msg: &str) -> Self {
        AppError::Validation(vec![msg.to_string()])
    }

    pub fn duplicate(msg: &str) -> Self {
        AppError::DuplicateResource(msg.to_string())
    }

    pub fn internal_error(msg: &str) -> Self {
        AppError::Internal(msg.to_string())
    }
}

/// 错误响应 DTO
/// 统一信封：{success:false, error} 或字段校验时 {success:false, errors:[...]}
#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ErrorResponse {
    fn from_error(err: &AppError) -> Self {
        match err {
            AppError::Validation(msgs) => ErrorResponse {
                success: false,
                error: None,
                errors: Some(msgs.clone()),
            },
            _ => ErrorResponse {
                success: false,
                error: Some(err.user_message()),
                errors: None,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_response = ErrorResponse::from_error(&self);

        // 记录错误日志（服务端保留完整错误，客户端只拿到脱敏消息）
        if status.is_server_error() {
            tracing::error!(code = self.code(), message = %self, "Application error");
        } else {
            tracing::debug!(code = self.code(), message = %self, "Request rejected");
        }

        (status, Json(error_response)).into_response()
    }
}

/// 从 config::ConfigError 转换
impl From<config::ConfigError> for AppError {
    fn from(e: config::ConfigError) -> Self {
        AppError::Config(e.to_string())
    }
}

/// 从 validator 校验错误转换为字段错误列表
impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = e
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |err| match &err.message {
                    Some(msg) => msg.to_string(),
                    None => format!("invalid value for field '{}'", field),
                })
            })
            .collect();
        messages.sort();
        AppError::Validation(messages)
    }
}
