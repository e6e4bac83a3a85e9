use crate::catalog::domain::{
    CertificationProject, ContainerImage, OperatorBundle, SearchResults, Vulnerability,
};
use crate::catalog::policies::{group_by_severity, truncate, DisplayLimits};
use serde_json::Value;

const CERTIFIED_MARKER: &str = "✓ Certified";
const NOT_CERTIFIED_MARKER: &str = "⚠ Not Certified";
const BULLET: &str = "•";

/// Heading underline widths
const IMAGE_RULE_WIDTH: usize = 50;
const REPORT_RULE_WIDTH: usize = 60;

/// TextFormatter renders catalog entities as bounded plain text
///
/// Every list is truncated according to [`DisplayLimits`], so output size
/// does not grow with the payload. Lines are joined with `\n` and carry no
/// trailing newline.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormatter;

/// Fixed sentence for an empty search
pub fn no_results(kind: &str) -> String {
    format!("No {} found matching the specified criteria.", kind)
}

fn certified_marker(certified: bool) -> &'static str {
    if certified {
        CERTIFIED_MARKER
    } else {
        NOT_CERTIFIED_MARKER
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn rule(width: usize) -> String {
    "=".repeat(width)
}

/// CVSS scores always keep one decimal for whole numbers ("7.0", "9.8")
fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{:.1}", score)
    } else {
        score.to_string()
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl TextFormatter {
    pub fn new() -> Self {
        Self
    }
}

/// Container images
impl TextFormatter {
    /// `<id> (reg/repo, ...) +N more [arch] - <certified marker>`
    pub fn image_summary(&self, image: &ContainerImage) -> String {
        let repositories = image.repositories();
        let (head, hidden) = truncate(repositories, DisplayLimits::SUMMARY_REPOSITORIES);
        let locations: Vec<String> = head.iter().filter_map(|repo| repo.location()).collect();

        let mut repos = String::new();
        if !locations.is_empty() {
            repos = format!(" ({})", locations.join(", "));
            if hidden > 0 {
                repos.push_str(&format!(" +{} more", hidden));
            }
        }

        let arch = present(&image.architecture)
            .map(|arch| format!(" [{}]", arch))
            .unwrap_or_default();

        format!(
            "{}{}{} - {}",
            image.id,
            repos,
            arch,
            certified_marker(image.is_certified())
        )
    }

    pub fn image_details(&self, image: &ContainerImage) -> String {
        let mut lines = vec![
            format!("Container Image Details: {}", image.id),
            rule(IMAGE_RULE_WIDTH),
        ];

        self.render_image_repositories(&mut lines, image);

        lines.push(String::new());
        lines.push(format!(
            "Architecture: {}",
            present(&image.architecture).unwrap_or("Unknown")
        ));
        lines.push(format!("Certified: {}", yes_no(image.is_certified())));

        if let Some(created) = image.creation_date {
            lines.push(format!("Created: {}", created));
        }
        if let Some(updated) = image.last_update_date {
            lines.push(format!("Last Updated: {}", updated));
        }
        if let Some(size) = image.size_mib() {
            lines.push(format!("Size: {:.1} MB", size));
        }
        if let Some(digest) = present(&image.docker_image_digest) {
            lines.push(format!("Digest: {}", digest));
        }
        if let Some(cpe_ids) = image.cpe_ids.as_deref().filter(|ids| !ids.is_empty()) {
            let (head, hidden) = truncate(cpe_ids, DisplayLimits::CPE_IDS);
            lines.push(format!("CPE IDs: {}", head.join(", ")));
            if hidden > 0 {
                lines.push(format!("... and {} more", hidden));
            }
        }
        if let Some(content_sets) = image.content_sets.as_deref().filter(|s| !s.is_empty()) {
            lines.push(format!("Content Sets: {} available", content_sets.len()));
        }
        if let Some(grades) = image.freshness_grades.as_deref().filter(|g| !g.is_empty()) {
            lines.push(format!("Freshness Grades: {} available", grades.len()));
        }

        lines.join("\n")
    }

    fn render_image_repositories(&self, lines: &mut Vec<String>, image: &ContainerImage) {
        let repositories = image.repositories();
        if repositories.is_empty() {
            return;
        }

        lines.push("Repositories:".to_string());
        for repo in repositories {
            let Some(location) = repo.location() else {
                continue;
            };
            lines.push(format!("  {} {}", BULLET, location));

            if let Some(tags) = repo.tags.as_deref().filter(|tags| !tags.is_empty()) {
                let (head, hidden) = truncate(tags, DisplayLimits::TAGS);
                lines.push(format!("    Tags: {}", head.join(", ")));
                if hidden > 0 {
                    lines.push(format!("    ... and {} more tags", hidden));
                }
            }
        }
    }

    pub fn image_results(&self, results: &SearchResults<ContainerImage>) -> String {
        self.render_search_results("images", results, false, |image, lines| {
            lines.push(format!("{} {}", BULLET, self.image_summary(image)));
        })
    }
}

/// Vulnerabilities
impl TextFormatter {
    /// `<cve> - <severity> (CVSS: <score>) in <package>`
    pub fn vulnerability_summary(&self, vuln: &Vulnerability) -> String {
        let cve = present(&vuln.cve).unwrap_or("Unknown CVE");
        let severity = present(&vuln.severity).unwrap_or("Unknown");
        let score = vuln
            .cvss_score
            .filter(|score| *score != 0.0)
            .map(|score| format!(" (CVSS: {})", format_score(score)))
            .unwrap_or_default();
        let package = present(&vuln.package_name)
            .map(|name| format!(" in {}", name))
            .unwrap_or_default();

        format!("{} - {}{}{}", cve, severity, score, package)
    }

    /// Severity-grouped listing of at most `display_cap` vulnerabilities
    pub fn vulnerability_report(
        &self,
        image_id: &str,
        results: &SearchResults<Vulnerability>,
        display_cap: usize,
    ) -> String {
        if results.is_empty() {
            return format!("No vulnerabilities found for image {}", image_id);
        }

        let (shown, _) = truncate(&results.data, display_cap);
        let mut lines = vec![
            format!("Security Vulnerabilities for Image {}", image_id),
            rule(REPORT_RULE_WIDTH),
            format!(
                "Found {} vulnerabilities (showing {}):",
                results.total,
                shown.len()
            ),
            String::new(),
        ];

        for group in group_by_severity(shown) {
            lines.push(format!(
                "{} Severity ({}):",
                group.label,
                group.vulnerabilities.len()
            ));
            let (head, hidden) = truncate(
                &group.vulnerabilities,
                DisplayLimits::VULNERABILITIES_PER_SEVERITY,
            );
            for vuln in head {
                lines.push(format!("  {} {}", BULLET, self.vulnerability_summary(vuln)));
            }
            if hidden > 0 {
                lines.push(format!(
                    "  ... and {} more {} vulnerabilities",
                    hidden,
                    group.label.to_lowercase()
                ));
            }
            lines.push(String::new());
        }

        if results.total > display_cap as u64 {
            lines.push(format!(
                "... and {} more vulnerabilities available",
                results.total - display_cap as u64
            ));
        }

        lines.join("\n")
    }
}

/// Certification projects
impl TextFormatter {
    /// `<name> (<type>) - Status: <certification status>`
    pub fn project_summary(&self, project: &CertificationProject) -> String {
        format!(
            "{} ({}) - Status: {}",
            present(&project.name).unwrap_or("Unnamed Project"),
            present(&project.project_type).unwrap_or("Unknown Type"),
            present(&project.certification_status).unwrap_or("Unknown")
        )
    }

    pub fn project_details(&self, project: &CertificationProject) -> String {
        let mut lines = vec![
            format!(
                "Certification Project Details: {}",
                present(&project.name).unwrap_or("Unnamed Project")
            ),
            rule(REPORT_RULE_WIDTH),
            format!("ID: {}", project.id),
            format!(
                "Type: {}",
                present(&project.project_type).unwrap_or("Unknown")
            ),
            format!(
                "Application Type: {}",
                present(&project.application_type).unwrap_or("Unknown")
            ),
            format!(
                "Project Status: {}",
                present(&project.project_status).unwrap_or("Unknown")
            ),
            format!(
                "Certification Status: {}",
                present(&project.certification_status).unwrap_or("Unknown")
            ),
        ];

        if let Some(vendor) = present(&project.vendor_label) {
            lines.push(format!("Vendor: {}", vendor));
        }
        if let Some(created) = project.creation_date {
            lines.push(format!("Created: {}", created));
        }
        if let Some(updated) = project.last_update_date {
            lines.push(format!("Last Updated: {}", updated));
        }

        let sections = [
            ("Short Description:", &project.short_description),
            ("Description:", &project.long_description),
            (
                "Registry Override Instructions:",
                &project.registry_override_instruct,
            ),
        ];
        for (heading, body) in sections {
            if let Some(body) = present(body) {
                lines.push(String::new());
                lines.push(heading.to_string());
                lines.push(body.to_string());
            }
        }

        if let Some(container) = project.container.as_ref().filter(|c| !c.is_empty()) {
            lines.push(String::new());
            lines.push("Container Information:".to_string());
            // nested objects and arrays are skipped
            for (key, value) in container {
                let rendered = match value {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    _ => continue,
                };
                lines.push(format!("  {}: {}", key, rendered));
            }
        }

        lines.join("\n")
    }

    pub fn project_results(&self, results: &SearchResults<CertificationProject>) -> String {
        self.render_search_results("certification projects", results, true, |project, lines| {
            lines.push(format!("{} {}", BULLET, self.project_summary(project)));
            if let Some(description) = present(&project.short_description) {
                lines.push(format!("  {}", description));
            }
        })
    }
}

/// Operator bundles
impl TextFormatter {
    /// `<csv or package name> v<version> - <certified marker>`
    pub fn operator_summary(&self, operator: &OperatorBundle) -> String {
        let version = present(&operator.version)
            .map(|v| format!(" v{}", v))
            .unwrap_or_default();
        format!(
            "{}{} - {}",
            operator.display_name().unwrap_or("Unknown Operator"),
            version,
            certified_marker(operator.is_certified())
        )
    }

    pub fn operator_details(&self, operator: &OperatorBundle) -> String {
        let mut lines = vec![
            format!(
                "Operator Bundle Details: {}",
                operator.display_name().unwrap_or("Unknown")
            ),
            rule(REPORT_RULE_WIDTH),
            format!("ID: {}", operator.id),
        ];

        let optional = [
            ("CSV Name", &operator.csv_name),
            ("Package", &operator.package_name),
            ("Version", &operator.version),
            ("Channel", &operator.channel_name),
            ("OCP Version", &operator.ocp_version),
            ("Organization", &operator.organization),
        ];
        for (label, value) in optional {
            if let Some(value) = present(value) {
                lines.push(format!("{}: {}", label, value));
            }
        }

        lines.push(format!("Certified: {}", yes_no(operator.is_certified())));

        if let (Some(registry), Some(repository)) =
            (present(&operator.registry), present(&operator.repository))
        {
            lines.push(format!("Registry: {}/{}", registry, repository));
        }
        if let Some(bundle_path) = present(&operator.bundle_path) {
            lines.push(format!("Bundle Path: {}", bundle_path));
        }
        if let Some(created) = operator.creation_date {
            lines.push(format!("Created: {}", created));
        }
        if let Some(updated) = operator.last_update_date {
            lines.push(format!("Last Updated: {}", updated));
        }

        lines.join("\n")
    }

    pub fn operator_results(&self, results: &SearchResults<OperatorBundle>) -> String {
        self.render_search_results("operators", results, true, |operator, lines| {
            lines.push(format!("{} {}", BULLET, self.operator_summary(operator)));
            if let Some(organization) = present(&operator.organization) {
                lines.push(format!("  Organization: {}", organization));
            }
            if let Some(bundle_path) = present(&operator.bundle_path) {
                lines.push(format!("  Bundle Path: {}", bundle_path));
            }
        })
    }
}

/// Repositories (rendered straight from the raw payload)
impl TextFormatter {
    pub fn repository_results(&self, raw: &Value) -> String {
        let data = raw
            .get("data")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        if data.is_empty() {
            return no_results("repositories");
        }
        let total = raw.get("total").and_then(Value::as_u64).unwrap_or(0);

        let mut lines = vec![
            format!("Found {} repositories (showing {}):", total, data.len()),
            String::new(),
        ];

        for repo in data {
            self.render_raw_repository(&mut lines, repo);
        }

        if total > data.len() as u64 {
            lines.push(format!(
                "... and {} more results available",
                total - data.len() as u64
            ));
        }

        lines.join("\n")
    }

    fn render_raw_repository(&self, lines: &mut Vec<String>, repo: &Value) {
        let text = |key: &str| repo.get(key).and_then(Value::as_str).filter(|v| !v.is_empty());
        let published = repo.get("published").and_then(Value::as_bool).unwrap_or(false);

        lines.push(format!(
            "{} {}/{} - {}",
            BULLET,
            text("registry").unwrap_or("unknown"),
            text("repository").unwrap_or("unknown"),
            if published { "Published" } else { "Not Published" }
        ));

        if let Some(push_date) = text("push_date") {
            lines.push(format!("  Last Push: {}", push_date));
        }

        let tags: Vec<&str> = repo
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(|tag| tag.as_str().or_else(|| tag.get("name")?.as_str()))
                    .collect()
            })
            .unwrap_or_default();
        if !tags.is_empty() {
            let (head, hidden) = truncate(&tags, DisplayLimits::TAGS);
            let mut display = head.join(", ");
            if hidden > 0 {
                display.push_str(&format!(" +{} more", hidden));
            }
            lines.push(format!("  Tags: {}", display));
        }

        lines.push(String::new());
    }
}

/// Shared search-result layout
impl TextFormatter {
    /// Header, one entry per item, and a footer when more pages exist.
    ///
    /// With `separated`, every entry is followed by a blank line. The footer
    /// is always preceded by exactly one blank line.
    fn render_search_results<T, F>(
        &self,
        kind: &str,
        results: &SearchResults<T>,
        separated: bool,
        render_entry: F,
    ) -> String
    where
        F: Fn(&T, &mut Vec<String>),
    {
        if results.is_empty() {
            return no_results(kind);
        }

        let mut lines = vec![
            format!(
                "Found {} {} (showing {}):",
                results.total,
                kind,
                results.data.len()
            ),
            String::new(),
        ];

        for item in &results.data {
            render_entry(item, &mut lines);
            if separated {
                lines.push(String::new());
            }
        }

        if results.has_more() {
            if !separated {
                lines.push(String::new());
            }
            lines.push(format!(
                "... and {} more results available",
                results.remaining()
            ));
        }

        lines.join("\n")
    }
}
