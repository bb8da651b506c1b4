//! S3模块
//!
//! 该模块负责与对象存储交互，包括客户端的创建和上传预签名URL的生成。

pub mod config;
pub mod presign;

pub use config::create_s3_client;
pub use presign::{S3UrlSigner, SignError, UrlSigner};
