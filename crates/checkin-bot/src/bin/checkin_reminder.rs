use checkin_bot::{init_tracing, Config};
use message_listener::TelegramMessenger;
use reminder::ReminderSweep;
use telegram_client::TelegramClient;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = Config::from_env()?;
    info!(db_path = %config.db_path.display(), "Starting daily reminder run");

    let client = TelegramClient::connect(config.client_config()).await?;
    let sweep = ReminderSweep::new(config.store(), TelegramMessenger::new(client))
        .with_enabled(config.engine.daily_reminders);

    let report = sweep.run().await;
    info!(sent = report.sent, failed = report.failed, "Daily reminder run finished");

    Ok(())
}
