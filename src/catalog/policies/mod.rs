/// Display policies - ordering and truncation rules for rendered output
mod display_limits;
mod severity_order;

pub use display_limits::{truncate, DisplayLimits};
pub use severity_order::{group_by_severity, SeverityGroup, SEVERITY_DISPLAY_ORDER};
