//! 上传签名服务库
//!
//! 这是一个基于Axum的小型服务，主要功能包括：
//! - 为对象存储签发限时的上传预签名URL
//! - 提供存活探针
//! - 支持CORS跨域请求

pub mod config;
pub mod error;
pub mod handlers;
pub mod s3;

use anyhow::Context;
use axum::routing::get;
use http::{Method, StatusCode};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, CorsLayer};
use tower_http::timeout::{RequestBodyTimeoutLayer, TimeoutLayer};
use tower_http::trace::TraceLayer;

use crate::config::{Config, ConfigError};
use crate::s3::{S3UrlSigner, UrlSigner};

/// 所有处理器共享的只读状态
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub signer: Arc<dyn UrlSigner>,
}

impl AppState {
    pub fn new(config: Config, signer: Arc<dyn UrlSigner>) -> Self {
        Self {
            config: Arc::new(config),
            signer,
        }
    }
}

/// 创建并配置Axum应用程序
///
/// 此函数设置了路由和中间件，包括：
/// - CORS配置，允许GET、HEAD和OPTIONS请求
/// - 请求追踪中间件
/// - 请求体读取超时和处理超时
///
/// # 参数
///
/// * `state` - 共享状态，包含配置和签名器
///
/// # Returns
///
/// 返回配置好的Axum Router实例
pub fn app(state: AppState) -> axum::Router {
    // 配置 CORS
    let cors = CorsLayer::permissive()
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers(AllowHeaders::any());

    let read_timeout = state.config.server.read_timeout;
    let write_timeout = state.config.server.write_timeout;

    axum::Router::new()
        .route(
            "/generate-presigned-url",
            get(handlers::handle_generate_presigned_url),
        )
        .route("/health", get(handlers::handle_health))
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyTimeoutLayer::new(read_timeout))
        // 超时返回 408 响应，而不是直接关闭连接
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            write_timeout,
        ))
        .layer(cors)
        .with_state(state)
}

/// 从环境变量加载配置并启动 HTTP 服务器。
///
/// # Errors
///
/// 配置缺失、端口绑定失败或服务器运行出错时返回错误。
pub async fn run() -> anyhow::Result<()> {
    let state = prepare(Config::from_env()).await?;
    serve(state).await
}

/// 校验配置并创建共享状态（包括 S3 客户端）。
///
/// 只有这里返回的 `AppState` 才能交给 [`serve`] 绑定端口，
/// 因此配置无效时不会开始监听。
///
/// # Errors
///
/// 配置加载失败时返回错误，底层错误为 [`ConfigError`]。
pub async fn prepare(config: Result<Config, ConfigError>) -> anyhow::Result<AppState> {
    let config = config.context("加载配置失败")?;
    tracing::info!(
        bucket = %config.bucket_name,
        region = %config.region,
        "配置加载完成"
    );

    // 初始化 S3 客户端
    let s3_client = Arc::new(s3::create_s3_client(&config.region).await);
    let signer: Arc<dyn UrlSigner> = Arc::new(S3UrlSigner::new(s3_client));

    Ok(AppState::new(config, signer))
}

/// 绑定监听地址并运行服务器，直到收到关闭信号。
///
/// # Errors
///
/// 端口绑定失败或服务器运行出错时返回错误。
pub async fn serve(state: AppState) -> anyhow::Result<()> {
    let addr = state.config.server.addr;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("绑定地址 {addr} 失败"))?;
    tracing::info!("服务器运行在 http://{}", addr);

    // axum::serve 没有空闲连接超时的配置项，空闲的 keep-alive 连接不会在 30 秒后被关闭
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("服务器运行出错")?;

    tracing::info!("服务器已关闭");
    Ok(())
}

/// 等待 Ctrl-C 或 SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "无法监听 Ctrl-C 信号");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "无法监听 SIGTERM 信号");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("收到关闭信号，开始优雅关闭");
}
