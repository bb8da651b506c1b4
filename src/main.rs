use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::LocalTime;

#[tokio::main]
async fn main() {
    // 加载 .env 文件
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("upload_signer=info,tower_http=info")),
        )
        .with_timer(LocalTime::rfc_3339())
        .init();

    if let Err(e) = upload_signer::run().await {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
}
