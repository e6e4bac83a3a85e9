/// Type alias for Result with anyhow::Error as the error type.
/// Typed failures are raised as `PyxisError` and recovered with `downcast_ref`.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
