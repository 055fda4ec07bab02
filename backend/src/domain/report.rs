//! Supplier ESG report formatting.
//!
//! Pure functions: one supplier record in, a sectioned document out. The
//! HTTP adapter decides delivery (attachment headers); nothing here touches
//! I/O. Rendered as self-contained HTML; the section layout, header colours,
//! and literal `Yes`/`No`/`N/A` placeholders are part of the export
//! contract.

use chrono::{DateTime, Utc};

use crate::domain::supplier::SupplierRecord;

/// Title printed at the top of every report.
pub const REPORT_TITLE: &str = "Supplier ESG Risk Report";
/// Prefix of the download filename, completed by the sanitised supplier name.
pub const REPORT_FILENAME_PREFIX: &str = "GreenChain_ESG_Report_";

const ENVIRONMENTAL_HEADER_COLOUR: &str = "#16A34A";
const SOCIAL_HEADER_COLOUR: &str = "#2563EB";
const GOVERNANCE_HEADER_COLOUR: &str = "#6B7280";

/// One titled metric table within the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    pub heading: &'static str,
    pub header_colour: &'static str,
    pub rows: Vec<(&'static str, String)>,
}

/// Fully formatted report, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDocument {
    pub supplier_name: String,
    pub generated_on: String,
    pub overall_risk: String,
    pub sections: Vec<ReportSection>,
}

fn yes_no(value: bool) -> String {
    if value { "Yes" } else { "No" }.to_owned()
}

/// Build the report document for one supplier record.
pub fn build_report(record: &SupplierRecord, generated_at: DateTime<Utc>) -> ReportDocument {
    let attrs = &record.attributes;
    let overall_risk = record
        .predicted_risk
        .map_or_else(|| "N/A".to_owned(), |band| band.as_str().to_owned());

    let environmental = ReportSection {
        heading: "Environmental Metrics",
        header_colour: ENVIRONMENTAL_HEADER_COLOUR,
        rows: vec![
            (
                "Total Emissions (kg CO₂e)",
                attrs.total_emissions_kg_co2e.to_string(),
            ),
            ("Annual Water Usage (m³)", attrs.water_usage_m3.to_string()),
            ("ISO 14001 Certified", yes_no(attrs.is_iso14001_certified)),
        ],
    };
    let social = ReportSection {
        heading: "Social Metrics",
        header_colour: SOCIAL_HEADER_COLOUR,
        rows: vec![
            ("Number of Workers", attrs.number_of_workers.to_string()),
            (
                "Employee Turnover Rate",
                format!("{}%", attrs.turnover_rate_percent),
            ),
            (
                "Workplace Accidents (Yearly)",
                attrs.workplace_accidents_last_year.to_string(),
            ),
            ("SA8000 Certified", yes_no(attrs.is_sa8000_certified)),
        ],
    };
    let governance = ReportSection {
        heading: "Governance Metrics",
        header_colour: GOVERNANCE_HEADER_COLOUR,
        rows: vec![
            (
                "Has Anti-Corruption Policy",
                yes_no(attrs.has_anti_corruption_policy),
            ),
            ("Publishes ESG Report", yes_no(attrs.publishes_esg_report)),
        ],
    };

    ReportDocument {
        supplier_name: attrs.name.clone(),
        generated_on: generated_at.format("%Y-%m-%d").to_string(),
        overall_risk,
        sections: vec![environmental, social, governance],
    }
}

/// Render the document as a self-contained HTML page.
pub fn render_html(document: &ReportDocument) -> String {
    let mut out = String::with_capacity(2048);
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>");
    out.push_str(&escape_html(REPORT_TITLE));
    out.push_str("</title>\n<style>\nbody { font-family: sans-serif; margin: 2rem; }\ntable { border-collapse: collapse; width: 100%; margin-bottom: 1.5rem; }\nth { color: white; text-align: left; padding: 0.5rem; }\ntd { border-bottom: 1px solid #E5E7EB; padding: 0.5rem; }\ntr:nth-child(even) td { background: #F9FAFB; }\n</style>\n</head>\n<body>\n");
    out.push_str(&format!("<h1>{}</h1>\n", escape_html(REPORT_TITLE)));
    out.push_str(&format!(
        "<p>Supplier: {}</p>\n<p>Date: {}</p>\n<h2>Overall Predicted Risk: {}</h2>\n",
        escape_html(&document.supplier_name),
        escape_html(&document.generated_on),
        escape_html(&document.overall_risk),
    ));
    for section in &document.sections {
        out.push_str(&format!(
            "<table>\n<tr><th colspan=\"2\" style=\"background-color: {}\">{}</th></tr>\n",
            section.header_colour,
            escape_html(section.heading),
        ));
        for (label, value) in &section.rows {
            out.push_str(&format!(
                "<tr><td>{}</td><td>{}</td></tr>\n",
                escape_html(label),
                escape_html(value),
            ));
        }
        out.push_str("</table>\n");
    }
    out.push_str("</body>\n</html>\n");
    out
}

/// Download filename for a supplier's report.
///
/// Supplier names are user-supplied and unsafe as filenames; anything
/// outside `[A-Za-z0-9._-]` becomes an underscore. The in-document name
/// stays verbatim.
pub fn report_filename(supplier_name: &str) -> String {
    let sanitised: String = supplier_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{REPORT_FILENAME_PREFIX}{sanitised}.html")
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
