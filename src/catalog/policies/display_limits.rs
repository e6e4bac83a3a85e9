/// Caps applied when rendering lists, so output stays bounded whatever the
/// service returns.
#[derive(Debug, Clone, Copy)]
pub struct DisplayLimits;

impl DisplayLimits {
    /// Repositories in an image one-line summary
    pub const SUMMARY_REPOSITORIES: usize = 3;
    /// Tags per repository, in image details and repository listings
    pub const TAGS: usize = 5;
    pub const CPE_IDS: usize = 3;
    pub const VULNERABILITIES_PER_SEVERITY: usize = 10;
    /// Default number of vulnerabilities rendered for an image
    pub const DEFAULT_VULNERABILITIES: i64 = 50;
}

/// Splits a list into the displayed head and the number of hidden items
pub fn truncate<T>(items: &[T], cap: usize) -> (&[T], usize) {
    let shown = items.len().min(cap);
    (&items[..shown], items.len() - shown)
}
