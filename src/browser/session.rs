//! Browser session - thin wrapper over a thirtyfour WebDriver
//!
//! Provides the bounded-wait, hover, and paced-typing primitives the
//! checkout workflow is written against. Every wait polls until the
//! condition holds or the timeout elapses; there are no retries beyond
//! that polling.

use std::time::Duration;

use thirtyfour::components::SelectElement;
use thirtyfour::prelude::*;

use crate::core::{CartwrightError, Result, RunnerConfig};

/// Exclusive owner of one WebDriver browser session
pub struct BrowserSession {
    driver: WebDriver,
    /// Polling interval for all bounded waits
    poll_interval: Duration,
}

impl BrowserSession {
    /// Launch a Firefox session against the configured WebDriver endpoint
    pub async fn launch(config: &RunnerConfig) -> Result<Self> {
        let mut caps = DesiredCapabilities::firefox();

        if config.accept_insecure_certs {
            caps.accept_insecure_certs(true)?;
        }

        if config.headless {
            caps.add_arg("-headless")?;
        }

        let driver = WebDriver::new(&config.webdriver_url, caps)
            .await
            .map_err(|e| {
                CartwrightError::browser(format!(
                    "Failed to connect to WebDriver at {}: {}",
                    config.webdriver_url, e
                ))
            })?;

        Ok(Self {
            driver,
            poll_interval: config.timeouts.poll_interval(),
        })
    }

    /// Access the underlying driver for script execution
    pub fn driver(&self) -> &WebDriver {
        &self.driver
    }

    /// Navigate to a URL
    pub async fn goto(&self, url: &str) -> Result<()> {
        self.driver.goto(url).await?;
        Ok(())
    }

    /// Wait until an element is present in the DOM
    pub async fn wait_present(&self, by: By, timeout: Duration) -> Result<WebElement> {
        let locator = format!("{:?}", by);
        self.driver
            .query(by)
            .wait(timeout, self.poll_interval)
            .first()
            .await
            .map_err(|_| CartwrightError::timeout(locator))
    }

    /// Wait until an element is present and clickable
    pub async fn wait_clickable(&self, by: By, timeout: Duration) -> Result<WebElement> {
        let locator = format!("{:?}", by);
        let elem = self
            .driver
            .query(by)
            .wait(timeout, self.poll_interval)
            .first()
            .await
            .map_err(|_| CartwrightError::timeout(locator.clone()))?;

        elem.wait_until()
            .wait(timeout, self.poll_interval)
            .clickable()
            .await
            .map_err(|_| CartwrightError::timeout(locator))?;

        Ok(elem)
    }

    /// Scroll an element into view
    pub async fn scroll_into_view(&self, elem: &WebElement) -> Result<()> {
        self.driver
            .execute("arguments[0].scrollIntoView(true);", vec![elem.to_json()?])
            .await?;
        Ok(())
    }

    /// Move the pointer over an element to trigger hover affordances
    pub async fn hover(&self, elem: &WebElement) -> Result<()> {
        self.driver
            .action_chain()
            .move_to_element_center(elem)
            .perform()
            .await?;
        Ok(())
    }

    /// Move the pointer over an element and click it
    pub async fn hover_click(&self, elem: &WebElement) -> Result<()> {
        self.driver
            .action_chain()
            .move_to_element_center(elem)
            .click()
            .perform()
            .await?;
        Ok(())
    }

    /// Clear a field and type its value in one write
    pub async fn fill(&self, elem: &WebElement, value: &str) -> Result<()> {
        elem.clear().await?;
        elem.send_keys(value).await?;
        Ok(())
    }

    /// Clear a field and type its value one character at a time
    ///
    /// Pauses for `interval` between keystrokes. The hosted payment form
    /// rejects values inserted as a single atomic write, so card fields
    /// always go through this path. The final field value equals `value`
    /// exactly.
    pub async fn fill_paced(&self, elem: &WebElement, value: &str, interval: Duration) -> Result<()> {
        elem.clear().await?;
        for key in keystrokes(value) {
            elem.send_keys(&key).await?;
            tokio::time::sleep(interval).await;
        }
        Ok(())
    }

    /// Send an Enter keystroke to an element
    pub async fn press_enter(&self, elem: &WebElement) -> Result<()> {
        elem.send_keys(Key::Enter + "").await?;
        Ok(())
    }

    /// Select a dropdown option by its exact visible text
    pub async fn select_exact(&self, elem: &WebElement, text: &str) -> Result<()> {
        let select = SelectElement::new(elem).await?;
        select.select_by_exact_text(text).await?;
        Ok(())
    }

    /// Read the `checked` DOM property of an input element
    pub async fn is_checked(&self, elem: &WebElement) -> Result<bool> {
        let ret = self
            .driver
            .execute("return arguments[0].checked;", vec![elem.to_json()?])
            .await?;
        Ok(ret.json().as_bool().unwrap_or(false))
    }

    /// Close the browser session
    pub async fn quit(self) -> Result<()> {
        self.driver.quit().await?;
        Ok(())
    }
}

/// Decompose a value into the per-character keystrokes used by paced typing.
///
/// Concatenating the keystrokes reproduces the value exactly.
pub fn keystrokes(value: &str) -> Vec<String> {
    value.chars().map(|c| c.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keystrokes_rejoin_to_value() {
        let value = "4242 4242 4242 4242";
        assert_eq!(keystrokes(value).concat(), value);
    }

    #[test]
    fn test_keystrokes_handle_multibyte() {
        let value = "12/34·ü";
        let keys = keystrokes(value);
        assert_eq!(keys.len(), value.chars().count());
        assert_eq!(keys.concat(), value);
    }

    #[test]
    fn test_keystrokes_empty_value() {
        assert!(keystrokes("").is_empty());
    }
}
