pub mod error;
pub mod format;
pub mod output;

pub use output::{DisplayFormatter, OutputStyle, print_success, print_warning};
