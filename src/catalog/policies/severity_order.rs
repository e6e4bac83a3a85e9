use crate::catalog::domain::Vulnerability;

/// Fixed display order for severity groups.
///
/// Groups are keyed by the literal label found in the data. Only these
/// labels are ever displayed, so a vulnerability carrying any other label
/// (e.g. "Important", "moderate") is left out of the rendered listing.
pub const SEVERITY_DISPLAY_ORDER: [&str; 5] = ["Critical", "High", "Medium", "Low", "Unknown"];

#[derive(Debug, Clone, PartialEq)]
pub struct SeverityGroup<'a> {
    pub label: &'static str,
    pub vulnerabilities: Vec<&'a Vulnerability>,
}

/// Groups vulnerabilities by severity in display order, keeping input order
/// within each group. Empty groups are not returned.
pub fn group_by_severity(vulnerabilities: &[Vulnerability]) -> Vec<SeverityGroup<'_>> {
    SEVERITY_DISPLAY_ORDER
        .iter()
        .map(|&label| SeverityGroup {
            label,
            vulnerabilities: vulnerabilities
                .iter()
                .filter(|vuln| vuln.severity_label() == label)
                .collect(),
        })
        .filter(|group| !group.vulnerabilities.is_empty())
        .collect()
}
