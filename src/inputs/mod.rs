//! Turning user input into projection configs

mod form;
pub mod loader;

pub use form::{parse_amount, parse_percent, parse_years, FormInput};
pub use loader::{load_default_scenarios, load_scenarios, load_scenarios_from_reader};
