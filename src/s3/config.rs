//! S3配置模块
//!
//! 该模块负责S3客户端的配置和初始化。

use aws_config::BehaviorVersion;
use aws_config::Region;
use aws_config::meta::region::RegionProviderChain;
use aws_sdk_s3::Client;

/// 创建绑定到指定区域的 S3 客户端。
///
/// 凭证通过 AWS 标准凭证链获取（环境变量、配置文件、实例角色等），
/// `AWS_ENDPOINT_URL` 也会被 SDK 自动读取，用于 S3 兼容服务。
///
/// # 参数
///
/// * `region` - 目标区域，例如 `us-east-1`。
///
/// # 返回值
///
/// 配置好的 `aws_sdk_s3::Client`。
pub async fn create_s3_client(region: &str) -> Client {
    let region_provider = RegionProviderChain::first_try(Some(Region::new(region.to_owned())));

    let aws_config = aws_config::defaults(BehaviorVersion::latest())
        .region(region_provider)
        .load()
        .await;

    Client::new(&aws_config)
}
