//! 上传签名服务的配置模块。
//!
//! 该模块负责在启动时从环境变量加载配置。配置只读取一次，
//! 之后以不可变值的形式注入到各个处理器中。

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

/// 存储桶名称的环境变量
pub const BUCKET_ENV: &str = "AWS_S3_BUCKET";

/// 区域的环境变量
pub const REGION_ENV: &str = "AWS_REGION";

/// 监听地址的环境变量（可选）
pub const SERVER_ADDR_ENV: &str = "SERVER_ADDR";

/// 默认监听端口
pub const DEFAULT_PORT: u16 = 8080;

/// 配置加载错误
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 必需的环境变量未设置或为空
    #[error("{0} environment variable is required")]
    Missing(&'static str),
    /// 监听地址无法解析
    #[error("invalid SERVER_ADDR value {0:?}")]
    InvalidAddr(String),
}

/// 服务配置。
///
/// 启动时创建，进程生命周期内不可变。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// 目标存储桶名称
    pub bucket_name: String,
    /// 目标存储区域
    pub region: String,
    /// HTTP 服务器配置
    pub server: ServerConfig,
}

/// HTTP 服务器配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// 读取请求体的超时时间
    pub read_timeout: Duration,
    /// 处理并写出响应的超时时间
    pub write_timeout: Duration,
}

impl ServerConfig {
    fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            read_timeout: Duration::from_secs(10),
            write_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    /// 从进程环境变量加载配置。
    ///
    /// # Errors
    ///
    /// 当 `AWS_S3_BUCKET` 或 `AWS_REGION` 未设置或为空时返回错误。
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 通过给定的查找函数加载配置。
    ///
    /// # 参数
    ///
    /// * `lookup` - 根据变量名返回变量值的函数，测试时可以传入固定的映射。
    ///
    /// # 返回值
    ///
    /// 校验通过的配置，或者第一个缺失字段对应的错误。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let bucket_name = required(BUCKET_ENV)?;
        let region = required(REGION_ENV)?;

        let addr = match lookup(SERVER_ADDR_ENV).filter(|value| !value.is_empty()) {
            Some(raw) => raw
                .parse::<SocketAddr>()
                .map_err(|_| ConfigError::InvalidAddr(raw))?,
            None => SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
        };

        Ok(Self {
            bucket_name,
            region,
            server: ServerConfig::new(addr),
        })
    }
}
