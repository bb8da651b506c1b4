use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::AppState;
use crate::error::AppError;

/// 上传对象键的固定前缀
pub const UPLOAD_PREFIX: &str = "uploads/";

/// 上传预签名 URL 的有效期（15 分钟）
pub const UPLOAD_URL_TTL: Duration = Duration::from_secs(15 * 60);

/// 文件名查询参数
pub const FILE_NAME_PARAM: &str = "fileName";

/// 预签名 URL 响应体
#[derive(Debug, Serialize, Deserialize)]
pub struct PresignedUrlResponse {
    pub url: String,
}

/// 根据文件名构建对象键。
///
/// 文件名原样拼接在前缀之后，不做任何清理，路径分隔符也会保留。
///
/// # 示例
///
/// ```
/// use upload_signer::handlers::presigned_url::object_key;
///
/// assert_eq!(object_key("photo.png"), "uploads/photo.png");
/// assert_eq!(object_key("a/../b.txt"), "uploads/a/../b.txt");
/// ```
pub fn object_key(file_name: &str) -> String {
    format!("{UPLOAD_PREFIX}{file_name}")
}

/// 取查询参数中第一个 `fileName` 的值。
///
/// 参数重复时只使用第一个，其余的忽略。
pub fn first_file_name(params: &[(String, String)]) -> Option<&str> {
    params
        .iter()
        .find(|(name, _)| name == FILE_NAME_PARAM)
        .map(|(_, value)| value.as_str())
}

/// 生成上传用的预签名 URL
///
/// # 请求方法
///
/// GET /generate-presigned-url?fileName=<文件名>
///
/// # 返回值
///
/// * `Ok(Json)` - `{"url": "<预签名 URL>"}`
/// * `Err(AppError)` - 缺少 `fileName` 时返回 400，签名失败时返回 500，均为纯文本
pub async fn handle_generate_presigned_url(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<PresignedUrlResponse>, AppError> {
    let file_name = first_file_name(&params)
        .filter(|name| !name.is_empty())
        .ok_or(AppError::MissingFileName)?;

    let key = object_key(file_name);

    let url = state
        .signer
        .sign_put(&state.config.bucket_name, &key, UPLOAD_URL_TTL)
        .await
        .map_err(|e| {
            tracing::error!(key = %key, error = %e, "生成预签名 URL 失败");
            AppError::from(e)
        })?;

    Ok(Json(PresignedUrlResponse { url }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_is_plain_concatenation() {
        for name in ["photo.png", "dir/photo.png", "../etc/passwd", " spaced name ", "中文.txt"] {
            assert_eq!(object_key(name), format!("uploads/{name}"));
        }
    }

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_first_file_name_wins() {
        let repeated = params(&[("fileName", "a.png"), ("other", "1"), ("fileName", "b.png")]);
        assert_eq!(first_file_name(&repeated), Some("a.png"));

        // 第一个为空时不会回退到后面的值
        let empty_first = params(&[("fileName", ""), ("fileName", "b.png")]);
        assert_eq!(first_file_name(&empty_first), Some(""));

        assert_eq!(first_file_name(&params(&[("filename", "a.png")])), None);
        assert_eq!(first_file_name(&[]), None);
    }

    #[test]
    fn test_upload_url_ttl_is_fifteen_minutes() {
        assert_eq!(UPLOAD_URL_TTL.as_secs(), 900);
    }
}
