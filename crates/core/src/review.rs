use crate::model::Task;

/// Presentation mode for the whole task list. Switched by a single toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReviewMode {
    #[default]
    Overview,
    Midday,
    EndOfDay,
    Carryover,
}

impl ReviewMode {
    pub const ALL: [ReviewMode; 4] = [
        ReviewMode::Overview,
        ReviewMode::Midday,
        ReviewMode::EndOfDay,
        ReviewMode::Carryover,
    ];

    /// Modes offered on the daily tracker page.
    pub const DAILY: [ReviewMode; 3] =
        [ReviewMode::Midday, ReviewMode::EndOfDay, ReviewMode::Carryover];

    #[must_use]
    pub fn toggle_label(self) -> &'static str {
        match self {
            ReviewMode::Overview => "Overview",
            ReviewMode::Midday => "MD (09:00 - 13:00)",
            ReviewMode::EndOfDay => "EOD (13:00 - 17:00)",
            ReviewMode::Carryover => "Continue Tomorrow",
        }
    }

    #[must_use]
    pub fn heading(self) -> &'static str {
        match self {
            ReviewMode::Overview => "Today's tasks",
            ReviewMode::Midday => "Midday Check",
            ReviewMode::EndOfDay => "Victory lap",
            ReviewMode::Carryover => "Continue Tomorrow",
        }
    }

    /// Cosmetic time window; nothing is gated on it.
    #[must_use]
    pub fn time_window(self) -> Option<&'static str> {
        match self {
            ReviewMode::Midday => Some("09:00 - 13:00"),
            ReviewMode::EndOfDay => Some("13:00 - 17:00"),
            ReviewMode::Overview | ReviewMode::Carryover => None,
        }
    }

    /// Midday and end-of-day cards offer the "continue tomorrow" action.
    #[must_use]
    pub fn allows_continue_tomorrow(self) -> bool {
        matches!(self, ReviewMode::Midday | ReviewMode::EndOfDay)
    }

    /// Every mode except overview always shows the details section.
    #[must_use]
    pub fn shows_details(self) -> bool {
        self != ReviewMode::Overview
    }

    #[must_use]
    pub fn includes(self, task: &Task) -> bool {
        match self {
            ReviewMode::Carryover => task.continue_tomorrow,
            ReviewMode::Overview | ReviewMode::Midday | ReviewMode::EndOfDay => true,
        }
    }

    /// Tasks listed in this mode, in their original order.
    #[must_use]
    pub fn visible_tasks<'a>(self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|task| self.includes(task)).collect()
    }
}

/// Per-card UI state: which panels are open and the local drafts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskCardState {
    pub show_details: bool,
    pub show_progress_field: bool,
    pub deliverable: String,
    pub bottleneck: String,
    pub progress: String,
}

impl TaskCardState {
    /// Seed drafts from the task's saved notes.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            show_details: false,
            show_progress_field: false,
            deliverable: task.deliverable.clone().unwrap_or_default(),
            bottleneck: task.bottleneck.clone().unwrap_or_default(),
            progress: task.progress.clone().unwrap_or_default(),
        }
    }

    /// The progress field only appears in modes that allow carryover.
    #[must_use]
    pub fn progress_field_visible(&self, mode: ReviewMode) -> bool {
        self.show_progress_field && mode.allows_continue_tomorrow()
    }

    #[must_use]
    pub fn details_visible(&self, mode: ReviewMode) -> bool {
        self.show_details || mode.shows_details()
    }

    /// Label of the carryover button: first mark, or edit an existing note.
    #[must_use]
    pub fn continue_button_label(task: &Task) -> &'static str {
        if task.continue_tomorrow {
            "Edit Progress"
        } else {
            "Continue Tomorrow"
        }
    }
}
