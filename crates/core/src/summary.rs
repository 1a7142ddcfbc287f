//! Aggregates shown on the dashboard and roster: task totals, capacity,
//! weekly goals, per-member workload.

use chrono::{DateTime, Utc};

use crate::model::{Project, Task, TaskStatus, Trend, User, UserId, projects_of_user};

/// Task counts across all projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskTotals {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
}

impl TaskTotals {
    #[must_use]
    pub fn from_projects(projects: &[Project]) -> Self {
        projects.iter().fold(Self::default(), |acc, project| Self {
            total: acc.total + project.tasks.len(),
            completed: acc.completed + project.count_with_status(TaskStatus::Completed),
            in_progress: acc.in_progress + project.count_with_status(TaskStatus::InProgress),
        })
    }
}

/// Planned load for the day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capacity {
    pub planned_tasks: usize,
    pub completed_tasks: usize,
    pub task_capacity: usize,
    pub planned_hours: f64,
    pub available_hours: f64,
}

impl Capacity {
    pub const TASK_CAPACITY: usize = 8;
    pub const WORKDAY_HOURS: f64 = 8.0;

    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        Self {
            planned_tasks: tasks.len(),
            completed_tasks: tasks.iter().filter(|task| task.is_completed()).count(),
            task_capacity: Self::TASK_CAPACITY,
            planned_hours: tasks.iter().map(|task| task.effort.hours()).sum(),
            available_hours: Self::WORKDAY_HOURS,
        }
    }

    /// Planned tasks as a percentage of capacity; may exceed 100.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent_planned(&self) -> f64 {
        if self.task_capacity == 0 {
            return 0.0;
        }
        self.planned_tasks as f64 / self.task_capacity as f64 * 100.0
    }

    #[must_use]
    pub fn load_label(&self) -> &'static str {
        if self.planned_tasks > self.task_capacity {
            "Over capacity"
        } else {
            "Comfortable load"
        }
    }
}

/// One entry of the weekly goals strip.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyGoal {
    pub name: String,
    pub confidence: f64,
    pub trend: Trend,
}

/// Goals are the first three projects, labelled by description when present.
#[must_use]
pub fn weekly_goals(projects: &[Project]) -> Vec<WeeklyGoal> {
    projects
        .iter()
        .take(3)
        .map(|project| WeeklyGoal {
            name: project.goal_label().to_owned(),
            confidence: project.confidence,
            trend: project.trend,
        })
        .collect()
}

/// Projects a member owns and every task inside them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserWorkload {
    pub projects: usize,
    pub tasks: Vec<Task>,
}

impl UserWorkload {
    /// Tasks carry the name of the project they came from.
    #[must_use]
    pub fn of(projects: &[Project], user_id: &UserId) -> Self {
        let owned = projects_of_user(projects, user_id);
        let tasks = owned
            .iter()
            .flat_map(|project| {
                project.tasks.iter().cloned().map(|mut task| {
                    task.project_name.clone_from(&project.name);
                    task
                })
            })
            .collect();
        Self {
            projects: owned.len(),
            tasks,
        }
    }

    #[must_use]
    pub fn completed(&self) -> usize {
        self.tasks.iter().filter(|task| task.is_completed()).count()
    }
}

/// Users created in the last seven days.
#[must_use]
pub fn new_this_week(users: &[User], now: DateTime<Utc>) -> usize {
    users.iter().filter(|user| user.is_new_since(now)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Effort, ProjectId, TaskId};

    fn project_with(statuses: &[TaskStatus]) -> Project {
        let mut project = Project::new(ProjectId::new("p"), "P");
        project.tasks = statuses
            .iter()
            .enumerate()
            .map(|(idx, status)| {
                let mut task = Task::new(TaskId::new(format!("t{idx}")), ProjectId::new("p"), "x");
                task.status = *status;
                task
            })
            .collect();
        project
    }

    #[test]
    fn totals_sum_across_projects() {
        let projects = vec![
            project_with(&[TaskStatus::Completed, TaskStatus::Todo]),
            project_with(&[TaskStatus::InProgress, TaskStatus::Completed]),
        ];
        let totals = TaskTotals::from_projects(&projects);
        assert_eq!(
            totals,
            TaskTotals {
                total: 4,
                completed: 2,
                in_progress: 1
            }
        );
    }

    #[test]
    fn capacity_counts_hours_by_effort() {
        let mut small = Task::new(TaskId::new("a"), ProjectId::new("p"), "a");
        small.effort = Effort::Small;
        let mut large = Task::new(TaskId::new("b"), ProjectId::new("p"), "b");
        large.effort = Effort::Large;
        let capacity = Capacity::from_tasks(&[small, large]);
        assert!((capacity.planned_hours - 2.5).abs() < f64::EPSILON);
        assert!((capacity.percent_planned() - 25.0).abs() < f64::EPSILON);
        assert_eq!(capacity.load_label(), "Comfortable load");
    }

    #[test]
    fn weekly_goals_take_first_three() {
        let mut projects: Vec<Project> = (0..5)
            .map(|idx| Project::new(ProjectId::new(format!("p{idx}")), format!("Project {idx}")))
            .collect();
        projects[0].description = "Ship v2".into();
        let goals = weekly_goals(&projects);
        assert_eq!(goals.len(), 3);
        assert_eq!(goals[0].name, "Ship v2");
        assert_eq!(goals[2].name, "Project 2");
    }

    #[test]
    fn workload_covers_owned_projects_only() {
        let owner = UserId::new("u1");
        let mut mine = project_with(&[TaskStatus::Completed, TaskStatus::Todo]);
        mine.name = "Website".into();
        mine.user_id = Some(owner.clone());
        let mut theirs = project_with(&[TaskStatus::Completed]);
        theirs.user_id = Some(UserId::new("u2"));
        let unowned = project_with(&[TaskStatus::Todo]);

        let workload = UserWorkload::of(&[mine, theirs, unowned], &owner);
        assert_eq!(workload.projects, 1);
        assert_eq!(workload.tasks.len(), 2);
        assert_eq!(workload.completed(), 1);
        assert!(workload.tasks.iter().all(|task| task.project_name == "Website"));

        let nobody = UserWorkload::of(&[], &owner);
        assert_eq!(nobody, UserWorkload::default());
    }
}
