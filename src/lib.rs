//! Cartwright - Automated Storefront Checkout Runner
//!
//! Drives a single e-commerce checkout flow through a live WebDriver
//! browser session: locate the product on the storefront, reach the hosted
//! payment form, fill contact/shipping/card fields from configuration, and
//! submit payment.
//!
//! # Architecture
//!
//! - **Core**: Configuration, error handling, and the run report
//! - **Browser**: Thin wrapper over a thirtyfour WebDriver session
//! - **Checkout**: The staged workflow (storefront stages, payment stages)
//!
//! # Usage
//!
//! ```rust,no_run
//! use cartwright::{CheckoutConfig, CheckoutRunner, RunnerConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let checkout = CheckoutConfig::from_env().unwrap();
//!     let runner = RunnerConfig::load();
//!
//!     let report = CheckoutRunner::launch(checkout, runner).await.unwrap().run().await;
//!     println!("{}", report.summary());
//! }
//! ```

pub mod browser;
pub mod checkout;
pub mod core;

// Re-export commonly used items
pub use browser::BrowserSession;
pub use checkout::CheckoutRunner;
pub use core::{CartwrightError, CheckoutConfig, Result, RunReport, RunnerConfig, StepOutcome};
