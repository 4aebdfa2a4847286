//! Storefront stages - from landing page to the hosted payment page
//!
//! Locates the product card, reveals its hover overlay, and clicks through
//! to checkout. The direct checkout button is preferred; if it never
//! becomes clickable the product detail page is the only fallback.

use thirtyfour::prelude::*;
use tokio::time::sleep;

use crate::browser::BrowserSession;
use crate::core::{CartwrightError, Result, RunReport, RunnerConfig};

/// Drive the storefront from landing page to the purchase click.
///
/// On success the browser is navigating to the hosted payment form.
pub(crate) async fn reach_checkout(
    session: &BrowserSession,
    config: &RunnerConfig,
    report: &mut RunReport,
) -> Result<()> {
    let timeouts = &config.timeouts;

    // Stage 2: open the storefront and let it settle
    println!("Opening storefront {}", config.storefront_url);
    session.goto(&config.storefront_url).await?;
    report.completed("open storefront");
    sleep(std::time::Duration::from_secs(timeouts.page_settle_secs)).await;

    // Stage 3: locate the product by its visible heading text
    let title_xpath = format!("//h6[contains(text(), '{}')]", config.product_title);
    let product_title = match session
        .wait_present(By::XPath(title_xpath), timeouts.element_wait())
        .await
    {
        Ok(elem) => elem,
        Err(e) => {
            report.failed("locate product", e.to_string());
            return Err(e);
        }
    };
    println!("Product found: {}", product_title.text().await.unwrap_or_default());
    report.completed("locate product");

    // Stage 4: resolve the containing product card via ancestor traversal
    let product_card = product_title
        .find(By::XPath("./ancestor::div[contains(@class, 'product')]"))
        .await
        .map_err(|e| {
            report.failed("resolve product card", e.to_string());
            CartwrightError::browser(format!("Product card not found: {}", e))
        })?;
    report.completed("resolve product card");

    // Stage 5: bring the card into view and reveal the hover overlay
    session.scroll_into_view(&product_card).await?;
    session.hover(&product_card).await?;
    report.completed("hover product card");
    sleep(std::time::Duration::from_secs(timeouts.hover_settle_secs)).await;

    // Stage 6: try the direct checkout button on the overlay
    let checkout_xpath = "//a[contains(@class, 'btn-light') and .//div[text()='CHECKOUT']]";
    match session
        .wait_clickable(By::XPath(checkout_xpath), timeouts.element_wait())
        .await
    {
        Ok(button) => match button.click().await {
            Ok(()) => {
                println!("Checkout button clicked");
                report.completed("click checkout button");
                return Ok(());
            }
            Err(e) => {
                println!("Checkout button click failed ({}), falling back to product detail page", e);
                report.skipped("click checkout button", e.to_string());
            }
        },
        Err(e) => {
            println!("Checkout button unavailable ({}), falling back to product detail page", e);
            report.skipped("click checkout button", e.to_string());
        }
    }

    // Stage 7: fallback, navigate to the product detail page. No further
    // fallback exists past this link.
    let link_xpath = format!(".//a[contains(@href, '{}')]", config.product_detail_href);
    let product_link = match product_card.find(By::XPath(link_xpath)).await {
        Ok(link) => link,
        Err(e) => {
            report.failed("open product detail page", e.to_string());
            return Err(CartwrightError::browser(format!(
                "Product detail link not found: {}",
                e
            )));
        }
    };
    if let Err(e) = product_link.click().await {
        report.failed("open product detail page", e.to_string());
        return Err(e.into());
    }
    println!("Navigated to product detail page");
    report.completed("open product detail page");
    sleep(std::time::Duration::from_secs(timeouts.page_settle_secs)).await;

    // Stage 8: the purchase action on the detail page
    match session
        .wait_clickable(By::Id("purchaseBtn"), timeouts.element_wait())
        .await
    {
        Ok(button) => {
            if let Err(e) = button.click().await {
                report.failed("click purchase button", e.to_string());
                return Err(e.into());
            }
            println!("Purchase button clicked");
            report.completed("click purchase button");
            Ok(())
        }
        Err(e) => {
            report.failed("click purchase button", e.to_string());
            Err(e)
        }
    }
}
