/// Formatter adapters - plain-text rendering of catalog entities
mod text_formatter;

pub use text_formatter::{no_results, TextFormatter};
