use axum::http::StatusCode;

/// 健康检查
///
/// 进程运行时始终返回 200，不检查存储或其他下游依赖。
pub async fn handle_health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}
