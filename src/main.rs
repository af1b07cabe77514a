use dramatik::{
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 遥测初始化
    let subscriber = get_subscriber("dramatik", "info", std::io::stdout);
    init_subscriber(subscriber);

    let config = dramatik::config::try_config()?;
    let application = Application::build(config)?;
    application.run_until_stopped().await?;

    Ok(())
}
