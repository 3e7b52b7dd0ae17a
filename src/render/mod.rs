//! Presentation of payroll results.
//!
//! Parsing and formatting of money text for a [`Locale`], and the
//! plain-text breakdown printed by the command-line front end. The locale is
//! always passed in; nothing here reads process-wide settings.

mod locale;
mod money;
mod report;

pub use locale::Locale;
pub use money::{format_money, parse_money};
pub use report::render_text;
