//! Browser automation module
//!
//! Wraps a thirtyfour WebDriver session with the capability set the
//! checkout workflow needs: navigate, bounded waits, hover, paced typing,
//! select-by-text, and property reads.

mod session;

pub use session::{keystrokes, BrowserSession};
