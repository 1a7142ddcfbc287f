use taskboard_core::model::{
    EodOutcome, MiddayStatus, PendingTask, Priority, Task, TaskId, TaskStatus,
};
use taskboard_core::review::{ReviewMode, TaskCardState};

use crate::vm::time_fmt::format_date;

/// UI-ready task card.
#[derive(Clone, Debug, PartialEq)]
pub struct TaskCardVm {
    pub id: TaskId,
    pub title: String,
    pub project_name: String,
    pub goal: String,
    pub status: TaskStatus,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub priority_label: &'static str,
    pub priority_class: &'static str,
    pub effort_letter: &'static str,
    pub effort_label: &'static str,
    pub difficulty_label: Option<&'static str>,
    pub due_label: Option<String>,
    pub deliverable: String,
    pub bottleneck: String,
    pub progress: Option<String>,
    pub continue_tomorrow: bool,
    pub midday_status: Option<MiddayStatus>,
    pub eod_outcome: Option<EodOutcome>,
}

impl From<&Task> for TaskCardVm {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            project_name: task.project_name.clone(),
            goal: task.goal.clone(),
            status: task.status,
            status_label: task.status.label(),
            status_class: status_class(task.status),
            priority_label: task.priority.short_label(),
            priority_class: priority_class(task.priority),
            effort_letter: task.effort.letter(),
            effort_label: task.effort.label(),
            difficulty_label: task.difficulty_level.map(|level| level.label()),
            due_label: task.due_date.map(format_date),
            deliverable: task.deliverable_or_placeholder().to_owned(),
            bottleneck: task.bottleneck_or_placeholder().to_owned(),
            progress: task.progress.clone().filter(|note| !note.is_empty()),
            continue_tomorrow: task.continue_tomorrow,
            midday_status: task.midday_status,
            eod_outcome: task.eod_outcome,
        }
    }
}

/// What a card shows under the current mode.
#[derive(Clone, Debug, PartialEq)]
pub struct CardPanelsVm {
    pub details_open: bool,
    pub progress_open: bool,
    pub offers_carryover: bool,
    pub carryover_label: &'static str,
    pub shows_midday: bool,
    pub shows_eod: bool,
}

impl CardPanelsVm {
    #[must_use]
    pub fn new(task: &Task, card: &TaskCardState, mode: ReviewMode) -> Self {
        Self {
            details_open: card.details_visible(mode),
            progress_open: card.progress_field_visible(mode),
            offers_carryover: mode.allows_continue_tomorrow(),
            carryover_label: TaskCardState::continue_button_label(task),
            shows_midday: mode == ReviewMode::Midday,
            shows_eod: mode == ReviewMode::EndOfDay,
        }
    }
}

/// Row in the pending (overdue) list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingTaskVm {
    pub id: TaskId,
    pub title: String,
    pub project_name: String,
    pub due_label: String,
    pub priority_label: &'static str,
    pub effort_label: &'static str,
}

impl From<&PendingTask> for PendingTaskVm {
    fn from(task: &PendingTask) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            project_name: task.project_name.clone(),
            due_label: task
                .due_date
                .map_or_else(|| "No due date".to_owned(), format_date),
            priority_label: task.priority.short_label(),
            effort_label: task.effort.label(),
        }
    }
}

#[must_use]
pub fn map_task_cards(tasks: &[Task]) -> Vec<TaskCardVm> {
    tasks.iter().map(TaskCardVm::from).collect()
}

#[must_use]
pub fn map_pending(tasks: &[PendingTask]) -> Vec<PendingTaskVm> {
    tasks.iter().map(PendingTaskVm::from).collect()
}

fn status_class(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Todo => "status-todo",
        TaskStatus::InProgress => "status-in-progress",
        TaskStatus::Completed => "status-completed",
        TaskStatus::Blocked => "status-blocked",
    }
}

fn priority_class(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "priority-low",
        Priority::Medium => "priority-med",
        Priority::High => "priority-high",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_core::model::{Effort, ProjectId};

    #[test]
    fn card_uses_placeholders_and_short_labels() {
        let mut task = Task::new(TaskId::new("t1"), ProjectId::new("p1"), "Ship");
        task.effort = Effort::Small;
        task.priority = Priority::High;
        let vm = TaskCardVm::from(&task);
        assert_eq!(vm.effort_letter, "S");
        assert_eq!(vm.effort_label, "30m");
        assert_eq!(vm.priority_label, "High");
        assert_eq!(vm.deliverable, "No deliverable specified");
        assert_eq!(vm.bottleneck, "No bottlenecks reported");
        assert!(vm.progress.is_none());
    }

    #[test]
    fn panels_follow_mode() {
        let mut task = Task::new(TaskId::new("t1"), ProjectId::new("p1"), "Ship");
        task.mark_continue_tomorrow("half");
        let card = TaskCardState::from_task(&task);

        let overview = CardPanelsVm::new(&task, &card, ReviewMode::Overview);
        assert!(!overview.details_open);
        assert!(!overview.offers_carryover);

        let midday = CardPanelsVm::new(&task, &card, ReviewMode::Midday);
        assert!(midday.details_open);
        assert!(midday.offers_carryover);
        assert!(midday.shows_midday);
        assert_eq!(midday.carryover_label, "Edit Progress");
    }
}
