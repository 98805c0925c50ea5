use anyhow::Result;
use tracing::{error, info};

use linkedin_watch::config::AppConfig;
use linkedin_watch::email::{EmailMonitor, ImapSource};
use linkedin_watch::{report, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init();

    info!("Loading configuration...");
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            print_guide(&format!("❌ Configuration error: {:#}", e));
            return Ok(());
        }
    };

    if let Err(e) = config.email.validate() {
        print_guide(&format!("❌ Configuration error: {}", e));
        return Ok(());
    }

    if !config.email.has_credentials() {
        print_guide("❌ Email credentials not found");
        return Ok(());
    }

    if let Err(e) = run(&config).await {
        error!("Email monitor failed: {:#}", e);
        print_guide(&format!("❌ Error: {:#}", e));
    }

    Ok(())
}

async fn run(config: &AppConfig) -> Result<()> {
    let source = ImapSource::new(&config.email);
    let mut monitor = EmailMonitor::new(source, config);

    let notifications = monitor.new_notifications(config.email.lookback_days).await?;
    println!("{}", report::render_notifications(&notifications));
    println!();
    println!(
        "💾 Processed notifications saved to {}",
        monitor.state_file().path().display()
    );
    Ok(())
}

fn print_guide(reason: &str) {
    println!("{}", reason);
    println!();
    println!("{}", report::email_setup_guide());
}
