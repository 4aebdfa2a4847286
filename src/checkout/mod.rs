//! Checkout workflow module
//!
//! A linear pipeline of browser stages: reach the checkout on the
//! storefront, then fill and submit the hosted payment form. Stages record
//! explicit outcomes in a run report; required-stage failures abort the
//! remainder of the pipeline, optional steps skip and continue.

mod payment;
mod runner;
mod storefront;

pub use runner::CheckoutRunner;
