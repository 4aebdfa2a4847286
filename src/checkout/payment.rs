//! Payment stages - filling and submitting the hosted payment form
//!
//! The form's element ids are fixed by the payment provider; any change to
//! them breaks the corresponding step. Contact and shipping fields fill in
//! a fixed order. City, state, postal code, and phone are individually
//! optional: if one never becomes clickable it is skipped and the run
//! continues. Card fields are always typed one character at a time.

use std::time::Duration;

use thirtyfour::prelude::*;
use tokio::time::sleep;

use crate::browser::BrowserSession;
use crate::core::{CheckoutConfig, Result, RunReport, RunnerConfig};

/// Fill the hosted payment form and click the submit button.
///
/// Precondition: the purchase click has happened and the browser is on or
/// navigating to the payment page.
pub(crate) async fn fill_and_submit(
    session: &BrowserSession,
    checkout: &CheckoutConfig,
    config: &RunnerConfig,
    report: &mut RunReport,
) -> Result<()> {
    let timeouts = &config.timeouts;

    // Stage 9: wait for the form to appear, then let it settle
    match session
        .wait_present(By::Id("email"), timeouts.element_wait())
        .await
    {
        Ok(_) => report.completed("payment form visible"),
        Err(e) => {
            report.failed("payment form visible", e.to_string());
            return Err(e);
        }
    }
    sleep(Duration::from_secs(timeouts.form_settle_secs)).await;
    println!("Filling payment form...");

    // Stage 10: required contact and shipping fields, in form order
    fill_required(session, config, report, "email", "fill email", &checkout.email).await?;
    fill_required(
        session,
        config,
        report,
        "individualName",
        "fill full name",
        &checkout.full_name,
    )
    .await?;
    fill_required(
        session,
        config,
        report,
        "shippingName",
        "fill shipping name",
        &checkout.full_name,
    )
    .await?;

    // Country is an exact-text select. The variable is optional; when it is
    // not configured the provider's default country stands.
    match &checkout.country {
        Some(country) => {
            let elem = match session
                .wait_clickable(By::Id("shippingCountry"), timeouts.element_wait())
                .await
            {
                Ok(elem) => elem,
                Err(e) => {
                    report.failed("select country", e.to_string());
                    return Err(e);
                }
            };
            if let Err(e) = session.select_exact(&elem, country).await {
                report.failed("select country", e.to_string());
                return Err(e);
            }
            println!("Country selected: {}", country);
            report.completed("select country");
            // Country choice reloads the state/postal fields
            sleep(Duration::from_secs(1)).await;
        }
        None => {
            println!("COUNTRY not configured, keeping the form default");
            report.skipped("select country", "COUNTRY not configured");
        }
    }

    // Address triggers a suggestion auto-complete; let it settle and
    // dismiss it with Enter so it cannot swallow later clicks.
    let address_field = match session
        .wait_clickable(By::Id("shippingAddressLine1"), timeouts.element_wait())
        .await
    {
        Ok(elem) => elem,
        Err(e) => {
            report.failed("fill address", e.to_string());
            return Err(e);
        }
    };
    if let Err(e) = session.fill(&address_field, &checkout.address).await {
        report.failed("fill address", e.to_string());
        return Err(e);
    }
    sleep(Duration::from_secs(timeouts.suggestion_settle_secs)).await;
    if let Err(e) = session.press_enter(&address_field).await {
        report.failed("fill address", e.to_string());
        return Err(e);
    }
    println!("Address filled");
    report.completed("fill address");

    // Optional fields: skipped individually when absent from the DOM
    fill_optional(session, config, report, "shippingLocality", "fill city", &checkout.city).await;
    select_optional(
        session,
        config,
        report,
        "shippingAdministrativeArea",
        "select state",
        &checkout.state,
    )
    .await;
    fill_optional(
        session,
        config,
        report,
        "shippingPostalCode",
        "fill postal code",
        &checkout.zip_code,
    )
    .await;
    match &checkout.phone {
        Some(phone) => {
            fill_optional(session, config, report, "phoneNumber", "fill phone", phone).await;
        }
        None => {
            report.skipped("fill phone", "PHONE not configured");
        }
    }

    // Stage 11: make sure the card payment method is active. When the
    // card radio is missing entirely the whole card block is skipped.
    let card_available = select_card_payment(session, config, report).await;

    // Stage 12: card fields, typed with human pacing. A failure here ends
    // the card block only; the submit below is still attempted.
    if card_available {
        sleep(Duration::from_secs(timeouts.form_settle_secs)).await;
        if let Err(e) = fill_card_fields(session, checkout, config, report).await {
            println!("Card filling failed: {}", e);
        }
    } else {
        for step in ["fill card number", "fill card expiry", "fill card cvc"] {
            report.skipped(step, "card payment method unavailable");
        }
    }

    // Stage 13: informational read of the billing checkbox
    match session.driver().find(By::Id("cardUseShippingAsBilling")).await {
        Ok(checkbox) => {
            let selected = checkbox.is_selected().await.unwrap_or(false);
            println!("Billing same as shipping: {}", selected);
            report.completed("check billing checkbox");
        }
        Err(_) => {
            report.skipped("check billing checkbox", "checkbox not found");
        }
    }
    sleep(Duration::from_secs(timeouts.submit_settle_secs)).await;

    // Stage 14: submit. The only step where failure fails nothing but itself.
    match session
        .wait_clickable(By::Css("button[type='submit']"), timeouts.element_wait())
        .await
    {
        Ok(button) => {
            if let Err(e) = button.click().await {
                report.failed("submit payment", e.to_string());
                return Err(e.into());
            }
            println!("Payment submitted");
            report.completed("submit payment");
            Ok(())
        }
        Err(e) => {
            report.failed("submit payment", e.to_string());
            Err(e)
        }
    }
}

/// Fill a required field; failure aborts the payment stage.
async fn fill_required(
    session: &BrowserSession,
    config: &RunnerConfig,
    report: &mut RunReport,
    id: &str,
    step: &str,
    value: &str,
) -> Result<()> {
    let elem = match session
        .wait_clickable(By::Id(id), config.timeouts.element_wait())
        .await
    {
        Ok(elem) => elem,
        Err(e) => {
            report.failed(step, e.to_string());
            return Err(e);
        }
    };
    if let Err(e) = session.fill(&elem, value).await {
        report.failed(step, e.to_string());
        return Err(e);
    }
    println!("{} done", step);
    report.completed(step);
    Ok(())
}

/// Fill an optional field; any failure records a skip and continues.
async fn fill_optional(
    session: &BrowserSession,
    config: &RunnerConfig,
    report: &mut RunReport,
    id: &str,
    step: &str,
    value: &str,
) {
    match session
        .wait_clickable(By::Id(id), config.timeouts.optional_wait())
        .await
    {
        Ok(elem) => match session.fill(&elem, value).await {
            Ok(()) => {
                println!("{} done", step);
                report.completed(step);
            }
            Err(e) => {
                println!("{} skipped: {}", step, e);
                report.skipped(step, e.to_string());
            }
        },
        Err(e) => {
            println!("{} skipped: field not visible or not required", step);
            report.skipped(step, e.to_string());
        }
    }
}

/// Select an optional dropdown by exact text; failures skip and continue.
async fn select_optional(
    session: &BrowserSession,
    config: &RunnerConfig,
    report: &mut RunReport,
    id: &str,
    step: &str,
    value: &str,
) {
    match session
        .wait_clickable(By::Id(id), config.timeouts.optional_wait())
        .await
    {
        Ok(elem) => match session.select_exact(&elem, value).await {
            Ok(()) => {
                println!("{} done", step);
                report.completed(step);
            }
            Err(e) => {
                println!("{} skipped: {}", step, e);
                report.skipped(step, e.to_string());
            }
        },
        Err(e) => {
            println!("{} skipped: field not visible or not required", step);
            report.skipped(step, e.to_string());
        }
    }
}

/// Activate the card payment accordion if its radio is not already checked.
///
/// Best effort: a failed activation is recorded but never aborts the run.
/// The radio state is re-read afterwards for diagnostics only.
///
/// Returns whether the card block is available at all: when the radio is
/// missing (or unreadable) the card fields are skipped wholesale and the
/// run proceeds to the submit.
async fn select_card_payment(
    session: &BrowserSession,
    config: &RunnerConfig,
    report: &mut RunReport,
) -> bool {
    let radio = match session
        .wait_present(
            By::Id("payment-method-accordion-item-title-card"),
            config.timeouts.element_wait(),
        )
        .await
    {
        Ok(elem) => elem,
        Err(e) => {
            println!("Card payment radio not found: {}", e);
            report.skipped("select card payment", e.to_string());
            return false;
        }
    };

    match session.is_checked(&radio).await {
        Ok(true) => {
            println!("Card payment already selected");
            report.completed("select card payment");
            return true;
        }
        Ok(false) => {}
        Err(e) => {
            println!("Could not read card radio state: {}", e);
            report.skipped("select card payment", e.to_string());
            return false;
        }
    }

    match session
        .driver()
        .find(By::Css("[data-testid='card-accordion-item']"))
        .await
    {
        Ok(accordion) => match session.hover_click(&accordion).await {
            Ok(()) => {
                println!("Card accordion clicked");
                sleep(Duration::from_secs(1)).await;
                // Diagnostic read only; the outcome is not enforced
                let checked = session.is_checked(&radio).await.unwrap_or(false);
                println!("Card radio checked after click: {}", checked);
                report.completed("select card payment");
            }
            Err(e) => {
                println!("Card accordion click failed: {}", e);
                report.skipped("select card payment", e.to_string());
            }
        },
        Err(e) => {
            println!("Card accordion item not found: {}", e);
            report.skipped("select card payment", e.to_string());
        }
    }

    true
}

/// Fill the three card fields in order, stopping at the first failure.
///
/// The failed field is recorded; remaining card fields are not attempted.
/// The caller continues to the submit either way.
async fn fill_card_fields(
    session: &BrowserSession,
    checkout: &CheckoutConfig,
    config: &RunnerConfig,
    report: &mut RunReport,
) -> Result<()> {
    let interval = config.typing_interval();
    fill_card_field(session, config, report, "cardNumber", "fill card number", &checkout.card_number, interval).await?;
    sleep(Duration::from_secs(1)).await;
    fill_card_field(session, config, report, "cardExpiry", "fill card expiry", &checkout.card_expiry, interval).await?;
    sleep(Duration::from_secs(1)).await;
    fill_card_field(session, config, report, "cardCvc", "fill card cvc", &checkout.card_cvc, interval).await?;
    Ok(())
}

/// Type a card field one character at a time; failure ends the card block.
async fn fill_card_field(
    session: &BrowserSession,
    config: &RunnerConfig,
    report: &mut RunReport,
    id: &str,
    step: &str,
    value: &str,
    interval: Duration,
) -> Result<()> {
    let elem = match session
        .wait_clickable(By::Id(id), config.timeouts.element_wait())
        .await
    {
        Ok(elem) => elem,
        Err(e) => {
            report.failed(step, e.to_string());
            return Err(e);
        }
    };
    if let Err(e) = session.fill_paced(&elem, value, interval).await {
        report.failed(step, e.to_string());
        return Err(e);
    }
    println!("{} done", step);
    report.completed(step);
    Ok(())
}
