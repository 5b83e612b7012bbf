//! Markdown fragments for the pull request comment.
//!
//! Each section is a `Display` wrapper over a decoded tool report so the
//! rendered text is a pure function of the report.

use std::fmt;

use crate::npm::{AuditReport, DependencyHygieneReport, OutdatedReport};

pub struct AuditSection<'a> {
    pub report: &'a AuditReport,
    /// 0 renders every advisory.
    pub max_rows: usize,
}

impl fmt::Display for AuditSection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        writeln!(f, "Total Dependencies: **{}**", report.total_dependencies)?;
        writeln!(f, "<details>")?;
        writeln!(f, "<summary>Vulnerabilities: {}</summary>", report.vulnerability_count())?;
        writeln!(f)?;

        if report.advisories.is_empty() {
            writeln!(f, "No vulnerability disclosures found :smile:")?;
        } else {
            writeln!(f, "| Root Cause | Path | Severity | Vulnerability |")?;
            writeln!(f, "|--|--|--|--|")?;
            let shown = visible_rows(report.advisories.len(), self.max_rows);
            for adv in &report.advisories[..shown] {
                writeln!(
                    f,
                    "| {} | {} | {} | {} |",
                    cell(&adv.module_name),
                    cell(&adv.path),
                    cell(&adv.severity),
                    cell(&adv.title)
                )?;
            }
            write_elided(f, report.advisories.len() - shown)?;
            writeln!(f, "> to observe and fix vulnerabilities, run `npm audit`")?;
        }

        writeln!(f, "</details>")
    }
}

pub struct OutdatedSection<'a> {
    pub report: &'a OutdatedReport,
    /// 0 renders every package.
    pub max_rows: usize,
}

impl fmt::Display for OutdatedSection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let packages = &self.report.packages;
        writeln!(f, "<details>")?;
        writeln!(f, "<summary>Outdated Packages: {}</summary>", packages.len())?;
        writeln!(f)?;

        if packages.is_empty() {
            writeln!(f, "No outdated packages found :smile:")?;
        } else {
            writeln!(f, "| Package | Current | Wanted | Latest |")?;
            writeln!(f, "|--|--|--|--|")?;
            let shown = visible_rows(packages.len(), self.max_rows);
            for pkg in &packages[..shown] {
                writeln!(
                    f,
                    "| {} | {} | {} | {} |",
                    cell(&pkg.name),
                    cell(pkg.current.as_deref().unwrap_or("-")),
                    cell(&pkg.wanted),
                    cell(&pkg.latest)
                )?;
            }
            write_elided(f, packages.len() - shown)?;
            writeln!(f, "> to observe and update outdated packages, run `npm outdated`")?;
        }

        writeln!(f, "</details>")
    }
}

pub struct HygieneSection<'a> {
    pub report: &'a DependencyHygieneReport,
}

impl fmt::Display for HygieneSection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        write_name_list(
            f,
            "Unused Production Dependencies",
            &report.unused_production,
            "No unused packages in production :smile:",
        )?;
        write_name_list(
            f,
            "Unused Dev Dependencies",
            &report.unused_development,
            "No unused packages in development :smile:",
        )?;
        write_name_list(f, "Missing Dependencies", &report.missing, "No missing packages :smile:")
    }
}

fn write_name_list(f: &mut fmt::Formatter<'_>, title: &str, names: &[String], empty: &str) -> fmt::Result {
    writeln!(f, "<details>")?;
    writeln!(f, "<summary>{title}: {}</summary>", names.len())?;
    writeln!(f)?;

    if names.is_empty() {
        writeln!(f, "{empty}")?;
    } else {
        let mut sorted: Vec<&str> = names.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        for name in sorted {
            writeln!(f, "* `{name}`")?;
        }
        writeln!(f, "> to generate this list locally, run `npx depcheck`")?;
    }

    writeln!(f, "</details>")
}

/// Footer crediting the tool and naming the commit the report was built from.
pub struct Attribution<'a> {
    pub sha: Option<&'a str>,
}

impl fmt::Display for Attribution<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "<p align=\"right\">")?;
        writeln!(
            f,
            "Generated by :robot: `depreport` against {}",
            self.sha.unwrap_or("an unknown commit")
        )?;
        writeln!(f, "</p>")
    }
}

fn visible_rows(total: usize, max_rows: usize) -> usize {
    if max_rows == 0 { total } else { total.min(max_rows) }
}

fn write_elided(f: &mut fmt::Formatter<'_>, hidden: usize) -> fmt::Result {
    if hidden > 0 {
        writeln!(f, "| _...and {hidden} more_ | | | |")?;
    }
    Ok(())
}

/// Keep table cells on one row: pipes would open a new column.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}
