//! 请求处理错误类型

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::s3::SignError;

/// 请求级别的错误，只影响当前请求。
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 查询参数中缺少 `fileName`
    #[error("fileName is required")]
    MissingFileName,
    /// 生成预签名 URL 失败
    #[error("Failed to generate pre-signed URL: {0}")]
    Sign(#[from] SignError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::MissingFileName => StatusCode::BAD_REQUEST,
            AppError::Sign(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}
