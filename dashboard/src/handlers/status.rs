use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    Form,
};
use serde::Deserialize;

use crate::{
    error::AppError,
    models::manager::StatusAction,
    pages::manager_status::{
        build_status_page, render_status_page, Notice, StatusPage, StatusQuery,
    },
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct StatusChangeForm {
    pub manager_id: String,
    pub action: StatusAction,
}

/// `GET /`: fetches the roster (only when a manager id was supplied) and
/// renders the manager's status page.
pub async fn show_status(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Html<String> {
    let query = StatusQuery::from_pairs(pairs);
    let roster = match query.manager_id() {
        Some(_) => state.api.fetch_managers().await,
        None => None,
    };

    let page = build_status_page(&query, roster.as_deref(), &state.config, state.now());
    match &page {
        StatusPage::MissingManagerId => {
            tracing::debug!("Status page requested without manager_id")
        }
        StatusPage::UnknownManager => tracing::warn!(
            manager_id = query.manager_id().unwrap_or_default(),
            roster_loaded = roster.is_some(),
            "No manager matches the requested id"
        ),
        StatusPage::Manager(_) => {}
    }

    Html(render_status_page(page))
}

/// `POST /status`: forwards one status change to the manager API and sends
/// the browser back to the page, flagging a failure in the query string.
pub async fn change_status(
    State(state): State<AppState>,
    Form(form): Form<StatusChangeForm>,
) -> Result<Redirect, AppError> {
    let manager_id = form.manager_id.trim();
    if manager_id.is_empty() {
        return Err(AppError::BadRequest("manager_id is required".into()));
    }

    let notice = if state.api.set_status(manager_id, form.action).await {
        None
    } else {
        Some(Notice::StatusChangeFailed)
    };

    Ok(Redirect::to(&status_page_location(manager_id, notice)))
}

pub fn status_page_location(manager_id: &str, notice: Option<Notice>) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    query.append_pair("manager_id", manager_id);
    if let Some(notice) = notice {
        query.append_pair("notice", notice.as_query());
    }
    format!("/?{}", query.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_encodes_manager_id() {
        assert_eq!(status_page_location("12", None), "/?manager_id=12");
        assert_eq!(status_page_location("a b&c", None), "/?manager_id=a+b%26c");
    }

    #[test]
    fn location_carries_failure_notice() {
        assert_eq!(
            status_page_location("12", Some(Notice::StatusChangeFailed)),
            "/?manager_id=12&notice=status_failed"
        );
    }
}
