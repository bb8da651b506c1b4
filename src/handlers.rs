//! HTTP请求处理模块
//!
//! 此模块包含了服务提供的所有处理器：
//! - 上传预签名URL处理器
//! - 健康检查处理器

pub mod health;
pub mod presigned_url;

// 重新导出主要的公共接口
pub use health::handle_health;
pub use presigned_url::handle_generate_presigned_url;
