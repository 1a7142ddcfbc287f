use chrono::{DateTime, NaiveDate, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::model::ids::{ProjectId, TaskId};
use crate::model::tiers::{Effort, Priority};

//
// ─── STATUS ENUMS ─────────────────────────────────────────────────────────────
//

/// Lifecycle status of a task: todo -> in-progress -> completed, plus blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Completed,
    Blocked,
}

impl TaskStatus {
    /// Statuses offered by the status selector on a task card.
    pub const SELECTABLE: [TaskStatus; 3] =
        [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Completed];

    #[must_use]
    pub fn as_wire(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Blocked => "blocked",
        }
    }

    #[must_use]
    pub fn from_wire(raw: &str) -> Option<Self> {
        [Self::Todo, Self::InProgress, Self::Completed, Self::Blocked]
            .into_iter()
            .find(|status| status.as_wire() == raw)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Todo => "Todo",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
            TaskStatus::Blocked => "Blocked",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Self-reported status at the midday checkpoint. Local only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MiddayStatus {
    OnTrack,
    AtRisk,
    Blocked,
}

impl MiddayStatus {
    pub const ALL: [MiddayStatus; 3] =
        [MiddayStatus::OnTrack, MiddayStatus::AtRisk, MiddayStatus::Blocked];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MiddayStatus::OnTrack => "On track",
            MiddayStatus::AtRisk => "At risk",
            MiddayStatus::Blocked => "Blocked",
        }
    }
}

/// Outcome recorded during the end-of-day review. Local only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EodOutcome {
    Done,
    Partial,
    NotStarted,
}

impl EodOutcome {
    pub const ALL: [EodOutcome; 3] = [EodOutcome::Done, EodOutcome::Partial, EodOutcome::NotStarted];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            EodOutcome::Done => "Done",
            EodOutcome::Partial => "Partial",
            EodOutcome::NotStarted => "Not started",
        }
    }
}

/// Difficulty picked in the quick-add form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Moderate,
    Challenging,
    Hard,
    SuperHard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Easy,
        Difficulty::Moderate,
        Difficulty::Challenging,
        Difficulty::Hard,
        Difficulty::SuperHard,
    ];

    #[must_use]
    pub fn as_wire(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Moderate => "moderate",
            Difficulty::Challenging => "challenging",
            Difficulty::Hard => "hard",
            Difficulty::SuperHard => "super_hard",
        }
    }

    #[must_use]
    pub fn from_wire(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_wire() == raw)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Moderate => "Moderate",
            Difficulty::Challenging => "Challenging",
            Difficulty::Hard => "Hard",
            Difficulty::SuperHard => "Super Hard",
        }
    }
}

//
// ─── TASK ─────────────────────────────────────────────────────────────────────
//

/// A task as the client sees it.
///
/// The serialized fields mirror the backend payload. `project_name`, `goal`,
/// `midday_status` and `eod_outcome` are client-side annotations and never
/// travel over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub project_id: ProjectId,
    pub title: String,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: TaskStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: Priority,
    #[serde(default, deserialize_with = "lenient_effort")]
    pub effort: Effort,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_difficulty"
    )]
    pub difficulty_level: Option<Difficulty>,
    #[serde(default)]
    pub deliverable: Option<String>,
    #[serde(default)]
    pub bottleneck: Option<String>,
    #[serde(default)]
    pub progress: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub continue_tomorrow: bool,
    #[serde(default, deserialize_with = "lenient_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(skip)]
    pub project_name: String,
    #[serde(skip)]
    pub goal: String,
    #[serde(skip)]
    pub midday_status: Option<MiddayStatus>,
    #[serde(skip)]
    pub eod_outcome: Option<EodOutcome>,
}

impl Task {
    /// Minimal task with defaults for every optional field.
    #[must_use]
    pub fn new(id: TaskId, project_id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            id,
            project_id,
            title: title.into(),
            status: TaskStatus::Todo,
            priority: Priority::Medium,
            effort: Effort::Medium,
            difficulty_level: None,
            deliverable: None,
            bottleneck: None,
            progress: None,
            continue_tomorrow: false,
            due_date: None,
            created_at: None,
            updated_at: None,
            project_name: String::new(),
            goal: String::new(),
            midday_status: None,
            eod_outcome: None,
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Flag the task to roll over to tomorrow with the given progress note.
    ///
    /// Re-marking overwrites the note; the flag stays set.
    pub fn mark_continue_tomorrow(&mut self, progress: impl Into<String>) {
        self.continue_tomorrow = true;
        self.progress = Some(progress.into());
    }

    /// Store deliverable and bottleneck notes; blank input clears the field.
    pub fn set_details(&mut self, deliverable: &str, bottleneck: &str) {
        self.deliverable = non_blank(deliverable);
        self.bottleneck = non_blank(bottleneck);
    }

    #[must_use]
    pub fn deliverable_or_placeholder(&self) -> &str {
        self.deliverable
            .as_deref()
            .filter(|value| !value.is_empty())
            .unwrap_or("No deliverable specified")
    }

    #[must_use]
    pub fn bottleneck_or_placeholder(&self) -> &str {
        self.bottleneck
            .as_deref()
            .filter(|value| !value.is_empty())
            .unwrap_or("No bottlenecks reported")
    }
}

/// Fields sent when creating a task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTask {
    pub title: String,
    pub project_id: ProjectId,
    pub effort: Effort,
    pub priority: Priority,
    pub status: TaskStatus,
    pub difficulty_level: Difficulty,
    pub due_date: NaiveDate,
}

/// Overdue task as returned by the pending-tasks query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingTask {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub project_name: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: Priority,
    #[serde(default, deserialize_with = "null_as_default")]
    pub effort: Effort,
    // Kept as text: the pending query reports statuses outside `TaskStatus`.
    #[serde(default)]
    pub status: String,
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| value.to_owned())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Scalar as the backend may send it for an enum-like field.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Int(i64),
    Text(String),
    Other(IgnoredAny),
}

/// Level 1 is small, 2 is medium, anything else is large. Null keeps the default.
fn lenient_effort<'de, D>(deserializer: D) -> Result<Effort, D::Error>
where
    D: Deserializer<'de>,
{
    let effort = match Option::<RawScalar>::deserialize(deserializer)? {
        None => Effort::default(),
        Some(RawScalar::Int(level)) => effort_for_level(level),
        Some(RawScalar::Text(raw)) => match raw.trim().parse::<i64>() {
            Ok(level) => effort_for_level(level),
            Err(_) => Effort::from_letter(raw.trim()).unwrap_or(Effort::Large),
        },
        Some(RawScalar::Other(_)) => Effort::Large,
    };
    Ok(effort)
}

fn effort_for_level(level: i64) -> Effort {
    match level {
        1 => Effort::Small,
        2 => Effort::Medium,
        _ => Effort::Large,
    }
}

/// Unknown statuses (such as `pending`) read as `Todo`.
fn lenient_status<'de, D>(deserializer: D) -> Result<TaskStatus, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawScalar>::deserialize(deserializer)? {
        Some(RawScalar::Text(raw)) => TaskStatus::from_wire(raw.trim()).unwrap_or_default(),
        _ => TaskStatus::default(),
    })
}

fn lenient_difficulty<'de, D>(deserializer: D) -> Result<Option<Difficulty>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawScalar>::deserialize(deserializer)? {
        Some(RawScalar::Text(raw)) => Difficulty::from_wire(raw.trim()),
        _ => None,
    })
}

/// Accepts `YYYY-MM-DD`, a full RFC 3339 timestamp, or null.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| {
        NaiveDate::parse_from_str(&value, "%Y-%m-%d")
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(&value)
                    .ok()
                    .map(|at| at.date_naive())
            })
    }))
}
