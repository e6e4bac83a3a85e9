/// Application layer - Use cases and DTOs
///
/// This layer orchestrates catalog requests, schema validation and
/// rendering, and owns the error-to-text boundary of every tool.
pub mod dto;
pub mod use_cases;
