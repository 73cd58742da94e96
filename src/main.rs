use ai_studio_client::cli::Args;
use ai_studio_client::{logger, App, Config};
use anyhow::Result;
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 初始化日志（先按命令行参数，读完配置后再调整）
    let log = logger::init(args.verbose);

    // 加载配置
    let config = Config::load(args.config.as_deref())?;
    if config.verbose_logging && !args.verbose {
        log.set_verbose(true);
    }
    match args.config.as_deref() {
        Some(path) => info!("配置来源: {} + 环境变量", path.display()),
        None => info!("配置来源: 默认值 + 环境变量"),
    }

    // 初始化并运行应用
    App::initialize(config, &args.command)?
        .run(&args.command)
        .await?;

    Ok(())
}
