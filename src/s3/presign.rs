//! S3预签名URL模块
//!
//! 该模块负责生成上传用（PUT）的预签名URL。签名在本地完成，不会访问存储服务。

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use mockall::automock;
use std::sync::Arc;
use std::time::Duration;

/// 签名失败的错误类型
#[derive(Debug, thiserror::Error)]
pub enum SignError {
    /// 预签名配置无效（例如有效期超出上限）
    #[error("invalid presigning config: {0}")]
    Config(String),
    /// SDK 生成预签名请求失败
    #[error("{0}")]
    Presign(String),
}

/// 预签名上传URL的生成接口。
///
/// 处理器只依赖这个接口，测试时可以替换为 `MockUrlSigner`。
#[automock]
#[async_trait]
pub trait UrlSigner: Send + Sync {
    /// 为指定存储桶和键生成 PUT 预签名 URL。
    ///
    /// # 参数
    ///
    /// * `bucket` - 存储桶名称。
    /// * `key` - 对象键。
    /// * `ttl` - URL 的有效期，从签名时刻开始计算。
    ///
    /// # 返回值
    ///
    /// 预签名 URL 的字符串表示。
    async fn sign_put(&self, bucket: &str, key: &str, ttl: Duration) -> Result<String, SignError>;
}

/// 基于 `aws-sdk-s3` 的签名实现
pub struct S3UrlSigner {
    s3_client: Arc<Client>,
}

impl S3UrlSigner {
    pub fn new(s3_client: Arc<Client>) -> Self {
        Self { s3_client }
    }
}

#[async_trait]
impl UrlSigner for S3UrlSigner {
    async fn sign_put(&self, bucket: &str, key: &str, ttl: Duration) -> Result<String, SignError> {
        let presigning_config =
            PresigningConfig::expires_in(ttl).map_err(|e| SignError::Config(e.to_string()))?;

        // 使用客户端已配置的凭证和区域在本地计算签名
        let presigned_request = self
            .s3_client
            .put_object()
            .bucket(bucket)
            .key(key)
            .presigned(presigning_config)
            .await
            .map_err(|e| SignError::Presign(DisplayErrorContext(&e).to_string()))?;

        Ok(presigned_request.uri().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};

    fn test_client() -> Arc<Client> {
        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new(
                "AKIDEXAMPLE",
                "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
                None,
                None,
                "test-credentials",
            ))
            .build();
        Arc::new(Client::from_conf(config))
    }

    #[tokio::test]
    /// 测试生成有效的上传预签名URL
    ///
    /// URL 应包含存储桶、对象键、900 秒的有效期以及签名参数。
    async fn test_sign_put_returns_valid_url() {
        let signer = S3UrlSigner::new(test_client());

        let url = signer
            .sign_put("my-bucket", "uploads/photo.png", Duration::from_secs(900))
            .await
            .unwrap();

        assert!(url.starts_with("https://"));
        assert!(url.contains("my-bucket"));
        assert!(url.contains("uploads/photo.png"));
        assert!(url.contains("X-Amz-Expires=900"));
        assert!(url.contains("X-Amz-Signature="));
    }

    #[tokio::test]
    /// 测试有效期超过 7 天时签名失败
    async fn test_sign_put_rejects_too_long_ttl() {
        let signer = S3UrlSigner::new(test_client());

        let result = signer
            .sign_put(
                "my-bucket",
                "uploads/photo.png",
                Duration::from_secs(8 * 24 * 3600),
            )
            .await;

        assert!(matches!(result, Err(SignError::Config(_))));
    }
}
