//! Server-rendered HTML for the admin page.

mod components;
mod escape;
mod tabs;

pub use components::APP_TITLE;
pub use escape::escape;

use crate::catalog::{ListQuery, OperationOutcome};
use crate::db::CountryCurrencyRecord;
use std::fmt::Write as _;
use std::str::FromStr;

pub const STYLESHEET: &str = include_str!("styles.css");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    View,
    Add,
    Edit,
    Delete,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::View, Tab::Add, Tab::Edit, Tab::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::View => "view",
            Tab::Add => "add",
            Tab::Edit => "edit",
            Tab::Delete => "delete",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Tab::View => "&#128202; View Data",
            Tab::Add => "&#10133; Add Entry",
            Tab::Edit => "&#9999;&#65039; Edit Entry",
            Tab::Delete => "&#128465;&#65039; Delete Entry",
        }
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown tab `{s}`"))
    }
}

/// Everything one render of the page needs.
#[derive(Debug, Default)]
pub struct Page<'a> {
    pub tab: Tab,
    pub records: &'a [CountryCurrencyRecord],
    pub query: ListQuery,
    /// `country_code` picked in the edit/delete selector.
    pub selected_code: Option<&'a str>,
    /// One-shot banner from the previous mutation.
    pub feedback: Option<OperationOutcome>,
    /// Set when the table could not be loaded for this render.
    pub load_error: Option<String>,
}

impl Page<'_> {
    /// The requested record, or the first loaded one.
    fn selected(&self) -> Option<&CountryCurrencyRecord> {
        self.selected_code
            .and_then(|code| self.records.iter().find(|r| r.country_code == code))
            .or_else(|| self.records.first())
    }
}

pub fn render_page(page: &Page<'_>) -> String {
    let mut body = components::app_header();

    if let Some(outcome) = &page.feedback {
        body.push_str(&components::feedback_banner(outcome));
    }
    if let Some(message) = &page.load_error {
        let _ = write!(
            body,
            r#"<div class="error-message" role="alert"><strong>Error!</strong> {}</div>"#,
            escape(message)
        );
    }

    body.push_str(r#"<nav class="tabs">"#);
    for tab in Tab::ALL {
        let active = if tab == page.tab { " active" } else { "" };
        let _ = write!(
            body,
            r#"<a class="tab{active}" href="/?tab={}">{}</a>"#,
            tab.as_str(),
            tab.title()
        );
    }
    body.push_str("</nav><main>");

    let content = match page.tab {
        Tab::View => tabs::view_tab(page.records, &page.query),
        Tab::Add => tabs::add_tab(),
        Tab::Edit => tabs::edit_tab(page.records, page.selected()),
        Tab::Delete => tabs::delete_tab(page.records, page.selected()),
    };
    body.push_str(&content);
    body.push_str("</main>");
    body.push_str(&components::footer());

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{APP_TITLE}</title>
<link rel="stylesheet" href="/assets/styles.css">
</head>
<body>
{body}
</body>
</html>"#
    )
}
