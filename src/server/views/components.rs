//! Reusable HTML fragments.

use super::escape::escape;
use crate::catalog::{OperationOutcome, OperationStatus};
use crate::db::{Column, CountryCurrencyRecord};
use std::fmt::Write as _;

pub const APP_TITLE: &str = "Country and Currency Database";
const APP_SUBTITLE: &str =
    "A comprehensive management system for country and currency information";

pub fn app_header() -> String {
    format!(
        r#"<header class="app-header">
  <h1><span class="globe">&#127758;</span> {APP_TITLE}</h1>
  <p class="subtitle">{APP_SUBTITLE}</p>
</header>"#
    )
}

pub fn section_header(icon: &str, title: &str) -> String {
    format!(
        r#"<div class="section-header"><div class="section-header-icon">{icon}</div><h2>{}</h2></div>"#,
        escape(title)
    )
}

pub fn card(body: &str) -> String {
    format!(r#"<div class="card">{body}</div>"#)
}

pub fn field_label(label: &str, help: Option<&str>) -> String {
    let mut out = format!(r#"<div class="field-label">{}</div>"#, escape(label));
    if let Some(help) = help {
        let _ = write!(out, r#"<div class="field-help">{}</div>"#, escape(help));
    }
    out
}

pub fn feedback_banner(outcome: &OperationOutcome) -> String {
    let (class, lead) = match outcome.status {
        OperationStatus::Success => ("success-message", "Success!"),
        OperationStatus::Error => ("error-message", "Error!"),
    };
    format!(
        r#"<div class="{class}" role="status"><strong>{lead}</strong> {}</div>"#,
        escape(&outcome.message)
    )
}

pub fn record_table(records: &[CountryCurrencyRecord], accent: Option<&str>) -> String {
    let mut out = String::new();
    match accent {
        Some(color) => {
            let _ = write!(
                out,
                r#"<div class="dataframe-container" style="border: 2px solid {color};">"#
            );
        }
        None => out.push_str(r#"<div class="dataframe-container">"#),
    }
    out.push_str("<table><thead><tr>");
    for column in Column::ALL {
        let _ = write!(out, "<th>{}</th>", column.as_str());
    }
    out.push_str("</tr></thead><tbody>");
    if records.is_empty() {
        let _ = write!(
            out,
            r#"<tr><td class="empty" colspan="{}">No entries.</td></tr>"#,
            Column::ALL.len()
        );
    }
    for record in records {
        out.push_str("<tr>");
        for column in Column::ALL {
            let _ = write!(out, "<td>{}</td>", escape(record.get(column)));
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table></div>");
    out
}

pub fn delete_warning() -> &'static str {
    r#"<div class="delete-warning"><strong>Warning:</strong> Deleting an entry is permanent and cannot be undone.</div>"#
}

pub fn delete_confirmation() -> &'static str {
    r#"<div class="delete-confirmation"><strong>Confirmation Required</strong><p>Please confirm that you want to permanently delete this entry.</p></div>"#
}

pub fn footer() -> String {
    format!(
        r#"<footer class="app-footer"><p>Country Currency Database &copy; 2023 | Built with Rust <span class="version">v{}</span></p></footer>"#,
        env!("CARGO_PKG_VERSION")
    )
}
