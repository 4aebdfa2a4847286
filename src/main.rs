//! Cartwright - Automated Storefront Checkout Runner
//!
//! Main entry point for the CLI application.

use clap::Parser;
use cartwright::{CheckoutConfig, CheckoutRunner, RunnerConfig};

/// Cartwright - Automated Storefront Checkout Runner
#[derive(Parser, Debug)]
#[command(name = "cartwright")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Storefront landing page URL
    #[arg(long, short = 'u')]
    storefront_url: Option<String>,

    /// Visible product title to locate on the storefront
    #[arg(long, short = 't')]
    product_title: Option<String>,

    /// WebDriver endpoint (geckodriver / Selenium)
    #[arg(long, short = 'w')]
    webdriver_url: Option<String>,

    /// Run the browser headless
    #[arg(long)]
    headless: bool,

    /// Pause between card-field keystrokes in milliseconds
    #[arg(long)]
    typing_interval_ms: Option<u64>,

    /// Seconds the browser stays open after the run
    #[arg(long)]
    observation_secs: Option<u64>,

    /// Write the effective runner configuration to the config file and exit
    #[arg(long)]
    save_config: bool,

    /// Validate configuration and exit without launching a browser
    #[arg(long)]
    dry_run: bool,

    /// Print the run report as JSON when the run finishes
    #[arg(long)]
    report_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Build configuration
    let mut config = RunnerConfig::load();

    // Apply CLI overrides
    if let Some(url) = args.storefront_url {
        config.storefront_url = url;
    }

    if let Some(title) = args.product_title {
        config.product_title = title;
    }

    if let Some(url) = args.webdriver_url {
        config.webdriver_url = url;
    }

    if args.headless {
        config.headless = true;
    }

    if let Some(interval) = args.typing_interval_ms {
        config.typing_interval_ms = interval;
    }

    if let Some(secs) = args.observation_secs {
        config.timeouts.observation_secs = secs;
    }

    if args.save_config {
        config.save()?;
        println!("Configuration written to {}", RunnerConfig::config_file().display());
        return Ok(());
    }

    // Checkout data must be complete before any browser action
    let checkout = CheckoutConfig::from_env()?;

    if args.dry_run {
        println!("Configuration valid; all required variables present.");
        println!("Storefront: {}", config.storefront_url);
        println!("Product:    {}", config.product_title);
        return Ok(());
    }

    let runner = CheckoutRunner::launch(checkout, config).await?;
    let report = runner.run().await;

    if args.report_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.summary());
    }

    Ok(())
}
