//! Browser-facing routes: the tabbed page and its form posts.
//!
//! Every form post answers with a `303` back to the page and leaves its outcome in the
//! feedback cookie, so a reload never resubmits.

use crate::catalog::{
    ListQuery, Operation, OperationOutcome, RecordForm, SortOrder, deserialize_or_default,
};
use crate::db::Column;
use crate::server::feedback;
use crate::server::router::AppState;
use crate::server::views::{self, Page, STYLESHEET, Tab};
use axum::{
    Form,
    extract::{Query, State},
    http::header::CONTENT_TYPE,
    response::{Html, IntoResponse, Redirect},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::Deserialize;
use tracing::error;
use url::form_urlencoded;

const LOAD_FAILED: &str = "Failed to load data from the database. Please try again.";

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default, deserialize_with = "deserialize_or_default")]
    pub tab: Tab,
    #[serde(default)]
    pub q: String,
    #[serde(default, deserialize_with = "deserialize_or_default")]
    pub sort: Column,
    #[serde(default, deserialize_with = "deserialize_or_default")]
    pub order: SortOrder,
    pub code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSubmission {
    #[serde(default)]
    pub original_country_code: String,
    #[serde(flatten)]
    pub record: RecordForm,
}

#[derive(Debug, Deserialize)]
pub struct DeleteSubmission {
    #[serde(default)]
    pub country_code: String,
    /// Present only when the acknowledgment box was checked.
    pub confirm: Option<String>,
}

/// GET /
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    jar: PrivateCookieJar,
) -> impl IntoResponse {
    let (jar, outcome) = feedback::take(jar);

    let (records, load_error) = match state.catalog.load().await {
        Ok(records) => (records, None),
        Err(e) => {
            error!("initial table load failed: {}", e);
            (Vec::new(), Some(e.user_message(LOAD_FAILED)))
        }
    };

    let page = Page {
        tab: query.tab,
        records: &records,
        query: ListQuery {
            q: query.q,
            sort: query.sort,
            order: query.order,
        },
        selected_code: query.code.as_deref(),
        feedback: outcome,
        load_error,
    };
    (jar, Html(views::render_page(&page)))
}

/// POST /records
pub async fn create_record(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Form(form): Form<RecordForm>,
) -> impl IntoResponse {
    let result = state.catalog.create(&form).await;
    let outcome = OperationOutcome::from_result(Operation::Add, &result);
    let jar = feedback::store(jar, &outcome, state.insecure_cookie);
    (jar, Redirect::to(&page_url(Tab::Add, None)))
}

/// POST /records/update
pub async fn update_record(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Form(submission): Form<UpdateSubmission>,
) -> impl IntoResponse {
    let result = state
        .catalog
        .update(&submission.original_country_code, &submission.record)
        .await;
    let outcome = OperationOutcome::from_result(Operation::Update, &result);
    let code = match &result {
        Ok(record) => record.country_code.as_str(),
        Err(_) => submission.original_country_code.trim(),
    };
    let jar = feedback::store(jar, &outcome, state.insecure_cookie);
    (jar, Redirect::to(&page_url(Tab::Edit, Some(code))))
}

/// POST /records/delete
pub async fn delete_record(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Form(submission): Form<DeleteSubmission>,
) -> impl IntoResponse {
    let result = state
        .catalog
        .delete(&submission.country_code, submission.confirm.is_some())
        .await;
    let outcome = OperationOutcome::from_result(Operation::Delete, &result);
    let jar = feedback::store(jar, &outcome, state.insecure_cookie);
    (jar, Redirect::to(&page_url(Tab::Delete, None)))
}

/// GET /assets/styles.css
pub async fn stylesheet() -> impl IntoResponse {
    ([(CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET)
}

fn page_url(tab: Tab, code: Option<&str>) -> String {
    let mut query = form_urlencoded::Serializer::new(String::from("/?"));
    query.append_pair("tab", tab.as_str());
    if let Some(code) = code.filter(|c| !c.is_empty()) {
        query.append_pair("code", code);
    }
    query.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_urls_encode_the_selected_code() {
        assert_eq!(page_url(Tab::Add, None), "/?tab=add");
        assert_eq!(page_url(Tab::Edit, Some("CAN")), "/?tab=edit&code=CAN");
        assert_eq!(page_url(Tab::Edit, Some("A&B")), "/?tab=edit&code=A%26B");
        assert_eq!(page_url(Tab::Delete, Some("")), "/?tab=delete");
    }
}
