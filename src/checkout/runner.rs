//! Checkout runner - owns the browser session and drives the pipeline
//!
//! Strictly sequential, single session. Whatever happens in the stages,
//! the observation window elapses and the session is closed at the end.

use std::time::Duration;

use tokio::time::sleep;

use crate::browser::BrowserSession;
use crate::checkout::{payment, storefront};
use crate::core::{CheckoutConfig, Result, RunReport, RunnerConfig};

/// Drives one deterministic checkout sequence against a live browser
pub struct CheckoutRunner {
    session: BrowserSession,
    checkout: CheckoutConfig,
    config: RunnerConfig,
}

impl CheckoutRunner {
    /// Launch a browser session for the configured WebDriver endpoint
    pub async fn launch(checkout: CheckoutConfig, config: RunnerConfig) -> Result<Self> {
        let session = BrowserSession::launch(&config).await?;
        Ok(Self {
            session,
            checkout,
            config,
        })
    }

    /// Run the whole workflow and return the per-step report.
    ///
    /// Stage failures abort the remaining stages but never the cleanup:
    /// the browser stays open for the observation window so the page can
    /// be inspected, then the session is closed unconditionally.
    pub async fn run(self) -> RunReport {
        let mut report = RunReport::new();

        if let Err(e) = self.run_stages(&mut report).await {
            eprintln!("Run aborted: {}", e);
        } else if report.submitted() {
            println!("Checkout process completed");
        }

        let observation = self.config.timeouts.observation_secs;
        println!("Keeping browser open for {}s before closing...", observation);
        sleep(Duration::from_secs(observation)).await;

        if let Err(e) = self.session.quit().await {
            eprintln!("Failed to close browser session: {}", e);
        }

        report
    }

    async fn run_stages(&self, report: &mut RunReport) -> Result<()> {
        storefront::reach_checkout(&self.session, &self.config, report).await?;
        payment::fill_and_submit(&self.session, &self.checkout, &self.config, report).await
    }
}
