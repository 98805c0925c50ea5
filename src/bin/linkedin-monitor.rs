use anyhow::Result;
use tracing::{error, info};

use linkedin_watch::config::AppConfig;
use linkedin_watch::linkedin::{LinkedInClient, LinkedInMonitor};
use linkedin_watch::{report, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init();

    info!("Loading configuration...");
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            println!("❌ Configuration error: {:#}", e);
            println!();
            println!("{}", report::api_setup_guide());
            return Ok(());
        }
    };

    if config.linkedin.access_token.is_none() {
        println!("❌ LinkedIn credentials not found");
        println!();
        println!("{}", report::api_setup_guide());
        println!("{}", report::alternative_approaches());
        return Ok(());
    }

    if let Err(e) = run(&config).await {
        error!("LinkedIn monitor failed: {:#}", e);
        println!("❌ Error: {:#}", e);
        println!();
        println!("{}", report::alternative_approaches());
    }

    Ok(())
}

async fn run(config: &AppConfig) -> Result<()> {
    let client = LinkedInClient::new(&config.linkedin);
    let mut monitor = LinkedInMonitor::new(client, config);

    let profile = match monitor.check_credentials().await {
        Ok(profile) => profile,
        Err(e) => {
            error!("LinkedIn API connection failed: {:#}", e);
            println!("❌ Could not connect to the LinkedIn API: {}", e);
            println!();
            println!("{}", report::alternative_approaches());
            return Ok(());
        }
    };
    println!("👤 Monitoring posts for: {}", profile.display_name());

    let days = config.linkedin.lookback_days;
    let posts = monitor.recent_posts(&profile, days).await?;
    let new_comments = monitor.find_new_comments(&posts).await?;

    println!("{}", report::render_comments(&posts, &new_comments, days));
    Ok(())
}
