use checkin_bot::{init_tracing, shutdown_signal, Config};
use message_listener::{MessageProcessor, ProcessorConfig, TelegramMessenger};
use telegram_client::TelegramClient;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = Config::from_env()?;
    info!(db_path = %config.db_path.display(), "Starting check-in bot");

    let client = TelegramClient::connect(config.client_config()).await?;
    let updates = telegram_client::subscribe(&client);

    let processor = MessageProcessor::new(
        config.store(),
        TelegramMessenger::new(client),
        ProcessorConfig::with_engine(config.engine.clone()),
    );
    processor.run_with_shutdown(updates, shutdown_signal()).await?;

    info!("Check-in bot stopped");
    Ok(())
}
