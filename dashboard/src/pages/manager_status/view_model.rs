use chrono::{DateTime, Utc};

use crate::{
    config::Config,
    models::manager::{ManagerRecord, ShiftState, StatusAction},
    utils::time::{elapsed_at, format_duration, format_today, is_outside_working_hours},
};

pub const PAGE_TITLE: &str = "Управление рабочим днём менеджера";
pub const MISSING_MANAGER_ID_MESSAGE: &str =
    "Пожалуйста, перейдите по уникальной ссылке с вашим ID менеджера.";
pub const UNKNOWN_MANAGER_MESSAGE: &str = "Такого ID менеджера нет";
pub const SHIFT_COMPLETED_MESSAGE: &str = "Сегодня больше нельзя встать на смену";
pub const TODAY_LABEL: &str = "Текущая дата";

/// Query string of the status page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusQuery {
    pub manager_id: Option<String>,
    pub notice: Option<String>,
}

impl StatusQuery {
    /// Builds the query from raw pairs. A repeated key keeps its first value
    /// and unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "manager_id" => &mut query.manager_id,
                "notice" => &mut query.notice,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }

    pub fn manager_id(&self) -> Option<&str> {
        self.manager_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
    }

    /// Unrecognized notice values are ignored.
    pub fn notice(&self) -> Option<Notice> {
        self.notice.as_deref().and_then(Notice::from_query)
    }
}

/// One-shot banner passed back through the redirect after a button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    StatusChangeFailed,
}

impl Notice {
    pub fn as_query(self) -> &'static str {
        match self {
            Notice::StatusChangeFailed => "status_failed",
        }
    }

    pub fn from_query(value: &str) -> Option<Self> {
        match value {
            "status_failed" => Some(Notice::StatusChangeFailed),
            _ => None,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Notice::StatusChangeFailed => "Не удалось изменить статус. Попробуйте ещё раз.",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatusPage {
    MissingManagerId,
    UnknownManager,
    Manager(ManagerPanel),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ManagerPanel {
    pub manager_id: String,
    pub manager_name: String,
    pub today: String,
    pub metric: Option<MetricView>,
    pub actions: ActionRow,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricView {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionRow {
    /// Overrides every status outside the working window.
    OutsideWorkingHours { message: String },
    Buttons(Vec<ActionButton>),
    ShiftCompleted,
    UnrecognizedStatus { status: String },
}

impl ActionRow {
    pub fn buttons(&self) -> &[ActionButton] {
        match self {
            ActionRow::Buttons(buttons) => buttons,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionButton {
    pub action: StatusAction,
    pub label: &'static str,
    pub hint: &'static str,
}

impl ActionButton {
    pub fn for_action(action: StatusAction) -> Self {
        let (label, hint) = match action {
            StatusAction::EndDay => (
                "⛔ Завершить рабочий день",
                "Завершить рабочий день можно только 1 раз",
            ),
            StatusAction::StartBreak => (
                "▶️ Перерыв",
                "Когда вы уходите на перерыв, лиды на вас не распределяются",
            ),
            StatusAction::EndBreak => (
                "⏸️ Закончить перерыв",
                "Пока вы на перерыве, лиды на вас не распределяются",
            ),
            StatusAction::StartDay => (
                "🌟 Начать день",
                "В течении 10 минут после нажатия на вас начнут распределяться лиды",
            ),
        };
        Self {
            action,
            label,
            hint,
        }
    }
}

pub fn select_manager<'a>(
    roster: &'a [ManagerRecord],
    manager_id: &str,
) -> Option<&'a ManagerRecord> {
    roster.iter().find(|manager| manager.matches_id(manager_id))
}

/// Builds the render model for one page load. `roster` is `None` when the
/// fetch failed or was skipped; both cases and a missing record collapse
/// into [`StatusPage::UnknownManager`].
pub fn build_status_page(
    query: &StatusQuery,
    roster: Option<&[ManagerRecord]>,
    config: &Config,
    now: DateTime<Utc>,
) -> StatusPage {
    let Some(manager_id) = query.manager_id() else {
        return StatusPage::MissingManagerId;
    };

    match roster.and_then(|roster| select_manager(roster, manager_id)) {
        Some(manager) => {
            StatusPage::Manager(build_manager_panel(manager, query.notice(), config, now))
        }
        None => StatusPage::UnknownManager,
    }
}

pub fn build_manager_panel(
    manager: &ManagerRecord,
    notice: Option<Notice>,
    config: &Config,
    now: DateTime<Utc>,
) -> ManagerPanel {
    let state = manager.shift_state();

    ManagerPanel {
        manager_id: manager.manager_id.clone(),
        manager_name: manager.manager_name.clone(),
        today: format_today(now, &config.time_zone),
        metric: elapsed_metric(manager, state, config, now),
        actions: action_row(state, manager, config, now),
        notice,
    }
}

fn elapsed_metric(
    manager: &ManagerRecord,
    state: ShiftState,
    config: &Config,
    now: DateTime<Utc>,
) -> Option<MetricView> {
    let metric = state.metric()?;
    let start_at = manager.start_at.as_deref()?;

    match elapsed_at(start_at, &config.time_zone, now) {
        Ok(elapsed) => Some(MetricView {
            label: metric.label(),
            value: format_duration(elapsed),
        }),
        Err(err) => {
            tracing::warn!(
                manager_id = %manager.manager_id,
                error = %err,
                "Skipping elapsed time metric"
            );
            None
        }
    }
}

fn action_row(
    state: ShiftState,
    manager: &ManagerRecord,
    config: &Config,
    now: DateTime<Utc>,
) -> ActionRow {
    if is_outside_working_hours(now, &config.time_zone, &config.working_hours) {
        return ActionRow::OutsideWorkingHours {
            message: format!(
                "Рабочий день завершён. Перезагрузите страницу в {} по {}",
                config.working_hours.start.format("%H:%M"),
                config.time_zone_label
            ),
        };
    }

    match state {
        ShiftState::DayCompleted => ActionRow::ShiftCompleted,
        ShiftState::Unrecognized => ActionRow::UnrecognizedStatus {
            status: manager
                .working_status
                .as_ref()
                .map(|status| status.as_str().to_string())
                .unwrap_or_default(),
        },
        ShiftState::OnShift | ShiftState::OnBreak | ShiftState::DayNotStarted => {
            ActionRow::Buttons(
                state
                    .actions()
                    .iter()
                    .copied()
                    .map(ActionButton::for_action)
                    .collect(),
            )
        }
    }
}
