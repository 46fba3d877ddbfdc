use pos_server::{Config, Server, ServerState, init_logger_with_file, print_banner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 环境变量 (.env 可选)
    dotenv::dotenv().ok();

    // 2. 加载配置并初始化日志
    let config = Config::from_env();
    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir).ok();
    init_logger_with_file(Some(&config.log_level), log_dir.to_str());

    print_banner();
    tracing::info!("Skillet POS server starting...");

    // 3. 初始化服务器状态 (选择存储后端)
    let state = ServerState::initialize(&config).await?;

    // 4. 启动 HTTP 服务器
    let server = Server::with_state(config, state);
    server.run().await?;

    Ok(())
}
