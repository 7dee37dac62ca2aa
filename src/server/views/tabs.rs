use super::components::{
    card, delete_confirmation, delete_warning, field_label, record_table, section_header,
};
use super::escape::escape;
use crate::catalog::{ListQuery, RecordForm, SortOrder};
use crate::db::{Column, CountryCurrencyRecord};
use std::fmt::Write as _;

/// Placeholder and tooltip for each form input.
fn field_hint(column: Column) -> (&'static str, &'static str) {
    match column {
        Column::CountryCode => ("e.g. USA", "Three-letter country code (e.g., USA, GBR)"),
        Column::CountryNumber => ("e.g. 840", "Numeric code assigned to the country"),
        Column::Country => ("e.g. UNITED STATES", "Full official name of the country"),
        Column::CurrencyName => ("e.g. US Dollar", "Full name of the country's currency"),
        Column::CurrencyCode => ("e.g. USD", "Three-letter currency code (e.g., USD, EUR)"),
        Column::CurrencyNumber => ("e.g. 840", "Numeric code assigned to the currency"),
    }
}

fn input_field(column: Column, value: &str) -> String {
    let (placeholder, tooltip) = field_hint(column);
    let maxlength = if column.is_code() { r#" maxlength="3""# } else { "" };
    format!(
        r#"<label class="tooltip" for="{name}">{label}<span class="tooltiptext">{tooltip}</span></label>
<input type="text" id="{name}" name="{name}" value="{value}" placeholder="{placeholder}"{maxlength} required>"#,
        name = column.as_str(),
        label = column.label(),
        value = escape(value),
    )
}

fn record_fields(form: &RecordForm) -> String {
    let mut out = String::from(r#"<div class="columns"><div class="column">"#);
    out.push_str(&field_label("Country Information", None));
    for column in [Column::CountryCode, Column::CountryNumber, Column::Country] {
        out.push_str(&input_field(column, form.get(column)));
    }
    out.push_str(r#"</div><div class="column">"#);
    out.push_str(&field_label("Currency Information", None));
    for column in [
        Column::CurrencyName,
        Column::CurrencyCode,
        Column::CurrencyNumber,
    ] {
        out.push_str(&input_field(column, form.get(column)));
    }
    out.push_str("</div></div>");
    out
}

fn record_selector(tab: &str, records: &[CountryCurrencyRecord], selected: &str) -> String {
    let mut out = format!(
        r#"<form method="get" action="/" class="selector"><input type="hidden" name="tab" value="{tab}"><select name="code" onchange="this.form.submit()">"#
    );
    for record in records {
        let is_selected = if record.country_code == selected { " selected" } else { "" };
        let _ = write!(
            out,
            r#"<option value="{code}"{is_selected}>{country}</option>"#,
            code = escape(&record.country_code),
            country = escape(&record.country),
        );
    }
    out.push_str(r#"</select> <button type="submit" class="secondary">Select</button></form>"#);
    out
}

fn empty_notice() -> String {
    card(r#"<p class="empty">The table is empty. Add an entry first.</p>"#)
}

pub fn view_tab(records: &[CountryCurrencyRecord], query: &ListQuery) -> String {
    let mut out = section_header("&#128202;", "View Countries and Currencies");

    let mut search = field_label(
        "Search by Country Name",
        Some("Enter a partial or full country name to filter the data."),
    );
    let _ = write!(
        search,
        r#"<form method="get" action="/" class="inline-form">
<input type="hidden" name="tab" value="view">
<input type="hidden" name="sort" value="{sort}">
<input type="hidden" name="order" value="{order}">
<input type="text" name="q" value="{q}" placeholder="Type country name here...">
<button type="submit">Search</button>
</form>"#,
        sort = query.sort.as_str(),
        order = query.order.as_str(),
        q = escape(&query.q),
    );
    let rows = query.apply(records.to_vec());
    if !query.q.is_empty() {
        let _ = write!(
            search,
            r#"<div class="result-count">Found <span class="badge">{}</span> results for '{}'</div>"#,
            rows.len(),
            escape(&query.q)
        );
    }
    out.push_str(&card(&search));

    let mut sort = field_label(
        "Sort Data",
        Some("Choose a column and sort direction to organize the data."),
    );
    let _ = write!(
        sort,
        r#"<form method="get" action="/" class="inline-form"><input type="hidden" name="tab" value="view"><input type="hidden" name="q" value="{}"><label>Column <select name="sort">"#,
        escape(&query.q)
    );
    for column in Column::ALL {
        let selected = if column == query.sort { " selected" } else { "" };
        let _ = write!(
            sort,
            r#"<option value="{name}"{selected}>{name}</option>"#,
            name = column.as_str()
        );
    }
    sort.push_str("</select></label> <span>Order</span>");
    for order in [SortOrder::Asc, SortOrder::Desc] {
        let checked = if order == query.order { " checked" } else { "" };
        let _ = write!(
            sort,
            r#"<label><input type="radio" name="order" value="{}"{checked}> {}</label>"#,
            order.as_str(),
            order.label()
        );
    }
    sort.push_str(r#" <button type="submit">Apply</button></form>"#);
    sort.push_str(&record_table(&rows, None));
    out.push_str(&card(&sort));
    out
}

pub fn add_tab() -> String {
    let mut out = section_header("&#10133;", "Add New Country/Currency Entry");
    let body = format!(
        r#"<form method="post" action="/records">{}<button type="submit">&#10133; Add New Entry</button></form>"#,
        record_fields(&RecordForm::default())
    );
    out.push_str(&card(&body));
    out
}

pub fn edit_tab(
    records: &[CountryCurrencyRecord],
    selected: Option<&CountryCurrencyRecord>,
) -> String {
    let mut out = section_header("&#9999;&#65039;", "Edit Existing Entry");
    let Some(record) = selected else {
        out.push_str(&empty_notice());
        return out;
    };

    let mut body = field_label(
        "Select Country to Edit",
        Some("Choose the country record you want to modify."),
    );
    body.push_str(&record_selector("edit", records, &record.country_code));
    body.push_str(&field_label("Current Data:", None));
    body.push_str(&record_table(std::slice::from_ref(record), None));
    let _ = write!(
        body,
        r#"<form method="post" action="/records/update"><input type="hidden" name="original_country_code" value="{}">{}<button type="submit">&#9989; Update Entry</button></form>"#,
        escape(&record.country_code),
        record_fields(&RecordForm::from_record(record))
    );
    out.push_str(&card(&body));
    out
}

pub fn delete_tab(
    records: &[CountryCurrencyRecord],
    selected: Option<&CountryCurrencyRecord>,
) -> String {
    let mut out = section_header("&#128465;&#65039;", "Delete Entry");
    out.push_str(delete_warning());
    let Some(record) = selected else {
        out.push_str(&empty_notice());
        return out;
    };

    let mut body = field_label(
        "Select Country to Delete",
        Some("Choose the country record you want to remove from the database."),
    );
    body.push_str(&record_selector("delete", records, &record.country_code));
    body.push_str(&field_label("Entry to delete:", None));
    body.push_str(&record_table(std::slice::from_ref(record), Some("#e74c3c")));
    let _ = write!(
        body,
        r#"<form method="post" action="/records/delete" class="delete-form">
<input type="hidden" name="country_code" value="{code}">
{confirmation}
<label><input type="checkbox" name="confirm" value="on" onchange="this.form.querySelector('button').disabled = !this.checked"> I confirm that I want to delete this entry</label>
<div class="delete-actions">
<button type="submit" class="danger" disabled>&#128465;&#65039; Delete Entry</button>
<p class="hint">Please confirm deletion by checking the box above</p>
</div>
</form>"#,
        code = escape(&record.country_code),
        confirmation = delete_confirmation(),
    );
    out.push_str(&card(&body));
    out
}
