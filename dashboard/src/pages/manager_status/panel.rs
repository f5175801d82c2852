use leptos::*;

use crate::pages::manager_status::view_model::{
    ActionButton, ActionRow, ManagerPanel, MetricView, StatusPage, MISSING_MANAGER_ID_MESSAGE,
    PAGE_TITLE, SHIFT_COMPLETED_MESSAGE, TODAY_LABEL, UNKNOWN_MANAGER_MESSAGE,
};

const STYLES: &str = "\
body{font-family:system-ui,sans-serif;margin:0;background:#f5f6f8;color:#1f2328}\
main{max-width:720px;margin:0 auto;padding:24px}\
.metrics{display:flex;gap:16px;flex-wrap:wrap;margin:16px 0}\
.metric{background:#fff;border-radius:8px;padding:12px 16px;box-shadow:0 1px 2px rgba(0,0,0,.08)}\
.metric-label{font-size:14px;color:#59636e}\
.metric-value{font-size:24px;font-weight:600}\
.action{margin:12px 0}\
.action button{font-size:16px;padding:8px 16px;border-radius:6px;border:1px solid #d0d7de;background:#fff;cursor:pointer}\
.alert{padding:10px 14px;border-radius:6px;margin:8px 0}\
.alert-info{background:#ddf4ff}\
.alert-warning{background:#fff8c5}\
.alert-error{background:#ffebe9}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Info,
    Warning,
    Error,
}

impl AlertLevel {
    fn class(self) -> &'static str {
        match self {
            AlertLevel::Info => "alert alert-info",
            AlertLevel::Warning => "alert alert-warning",
            AlertLevel::Error => "alert alert-error",
        }
    }

    fn role(self) -> &'static str {
        match self {
            AlertLevel::Info => "status",
            AlertLevel::Warning | AlertLevel::Error => "alert",
        }
    }
}

/// Renders a full HTML document for the status page.
pub fn render_status_page(page: StatusPage) -> String {
    let body = render_to_string(move || view! { <StatusPanel page=page /> });
    format!(
        "<!DOCTYPE html>\
<html lang=\"ru\">\
<head>\
<meta charset=\"utf-8\">\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
<title>{title}</title>\
<style>{styles}</style>\
</head>\
<body>{body}</body>\
</html>",
        title = PAGE_TITLE,
        styles = STYLES,
        body = body
    )
}

/// Renders a view inside a short-lived reactive runtime.
pub fn render_to_string<F, N>(view: F) -> String
where
    F: FnOnce() -> N + 'static,
    N: IntoView + 'static,
{
    let runtime = create_runtime();
    let html = view().into_view().render_to_string().to_string();
    runtime.dispose();
    html
}

#[component]
pub fn StatusPanel(page: StatusPage) -> impl IntoView {
    let content = match page {
        StatusPage::MissingManagerId => view! {
            <AlertBox level={AlertLevel::Error} message={MISSING_MANAGER_ID_MESSAGE.to_string()} />
        }
        .into_view(),
        StatusPage::UnknownManager => view! {
            <AlertBox level={AlertLevel::Error} message={UNKNOWN_MANAGER_MESSAGE.to_string()} />
        }
        .into_view(),
        StatusPage::Manager(panel) => view! { <ManagerSection panel=panel /> }.into_view(),
    };

    view! {
        <main>
            <h1>{PAGE_TITLE}</h1>
            {content}
        </main>
    }
}

#[component]
fn ManagerSection(panel: ManagerPanel) -> impl IntoView {
    let ManagerPanel {
        manager_id,
        manager_name,
        today,
        metric,
        actions,
        notice,
    } = panel;

    let notice = notice.map(|notice| {
        view! { <AlertBox level={AlertLevel::Error} message={notice.message().to_string()} /> }
    });
    let metric = metric.map(|MetricView { label, value }| {
        view! { <MetricCard label=label value=value /> }
    });

    view! {
        <section class="manager">
            <h2>{format!("Менеджер: {}", manager_name)}</h2>
            {notice}
            <div class="metrics">
                <MetricCard label=TODAY_LABEL value=today />
                {metric}
            </div>
            <ActionRowView manager_id=manager_id actions=actions />
        </section>
    }
}

#[component]
fn MetricCard(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="metric">
            <div class="metric-label">{label}</div>
            <div class="metric-value">{value}</div>
        </div>
    }
}

#[component]
fn ActionRowView(manager_id: String, actions: ActionRow) -> impl IntoView {
    match actions {
        ActionRow::OutsideWorkingHours { message } => {
            view! { <AlertBox level={AlertLevel::Warning} message=message /> }.into_view()
        }
        ActionRow::ShiftCompleted => view! {
            <AlertBox level={AlertLevel::Warning} message={SHIFT_COMPLETED_MESSAGE.to_string()} />
        }
        .into_view(),
        ActionRow::UnrecognizedStatus { status } => {
            let message = format!(
                "Неизвестный статус «{}». Обратитесь к руководителю.",
                status
            );
            view! { <AlertBox level={AlertLevel::Warning} message=message /> }.into_view()
        }
        ActionRow::Buttons(buttons) => {
            let forms = buttons
                .into_iter()
                .map(|button| view! { <StatusButton manager_id={manager_id.clone()} button=button /> })
                .collect_view();
            view! { <div class="actions">{forms}</div> }.into_view()
        }
    }
}

/// One button per form so that a click posts exactly one status change.
#[component]
fn StatusButton(manager_id: String, button: ActionButton) -> impl IntoView {
    view! {
        <form class="action" method="post" action="/status">
            <input type="hidden" name="manager_id" value=manager_id />
            <button type="submit" name="action" value={button.action.as_str()}>
                {button.label}
            </button>
            <AlertBox level={AlertLevel::Info} message={button.hint.to_string()} />
        </form>
    }
}

#[component]
fn AlertBox(level: AlertLevel, message: String) -> impl IntoView {
    view! { <div class={level.class()} role={level.role()}>{message}</div> }
}
