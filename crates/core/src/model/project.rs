use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::model::ids::{ProjectId, UserId};
use crate::model::task::{Task, TaskStatus};

/// Direction of a project's confidence over the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    #[default]
    Stable,
}

/// A project and the tasks that belong to it.
///
/// The backend returns projects and tasks from separate endpoints; `tasks`
/// is filled in by [`attach_tasks`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub trend: Trend,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Project {
    #[must_use]
    pub fn new(id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            progress: 0.0,
            confidence: 0.0,
            trend: Trend::Stable,
            user_id: None,
            created_at: None,
            updated_at: None,
            tasks: Vec::new(),
        }
    }

    #[must_use]
    pub fn count_with_status(&self, status: TaskStatus) -> usize {
        self.tasks.iter().filter(|task| task.status == status).count()
    }

    /// Weekly-goal label: the description when present, else the name.
    #[must_use]
    pub fn goal_label(&self) -> &str {
        if self.description.is_empty() {
            &self.name
        } else {
            &self.description
        }
    }
}

/// Fields sent when a project is created implicitly by quick-add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

impl NewProject {
    /// Description falls back to `Project for <name>` when no goal is given.
    #[must_use]
    pub fn named(name: impl Into<String>, goal: &str, user_id: Option<UserId>) -> Self {
        let name = name.into();
        let description = if goal.trim().is_empty() {
            format!("Project for {name}")
        } else {
            goal.to_owned()
        };
        Self {
            name,
            description,
            user_id,
        }
    }
}

/// Distribute `tasks` into their projects by `project_id`.
///
/// Each project's previous task list is replaced. Tasks keep their backend
/// order and receive the owning project's name. Orphan tasks are dropped.
#[must_use]
pub fn attach_tasks(projects: Vec<Project>, tasks: &[Task]) -> Vec<Project> {
    projects
        .into_iter()
        .map(|mut project| {
            project.tasks = tasks
                .iter()
                .filter(|task| task.project_id == project.id)
                .cloned()
                .map(|mut task| {
                    task.project_name.clone_from(&project.name);
                    task
                })
                .collect();
            project
        })
        .collect()
}

/// Flatten projects into one task list, annotating each task with its project name.
#[must_use]
pub fn flatten_tasks(projects: &[Project]) -> Vec<Task> {
    projects
        .iter()
        .flat_map(|project| {
            project.tasks.iter().cloned().map(|mut task| {
                task.project_name.clone_from(&project.name);
                task
            })
        })
        .collect()
}

/// Projects owned by `user_id`.
#[must_use]
pub fn projects_of_user<'a>(projects: &'a [Project], user_id: &UserId) -> Vec<&'a Project> {
    projects
        .iter()
        .filter(|project| project.user_id.as_ref() == Some(user_id))
        .collect()
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ids::TaskId;

    #[test]
    fn attach_tasks_groups_by_project_and_names_them() {
        let projects = vec![
            Project::new(ProjectId::new("p1"), "Alpha"),
            Project::new(ProjectId::new("p2"), "Beta"),
        ];
        let tasks = vec![
            Task::new(TaskId::new("t1"), ProjectId::new("p2"), "one"),
            Task::new(TaskId::new("t2"), ProjectId::new("p1"), "two"),
            Task::new(TaskId::new("t3"), ProjectId::new("p2"), "three"),
            Task::new(TaskId::new("t4"), ProjectId::new("gone"), "orphan"),
        ];

        let merged = attach_tasks(projects, &tasks);
        assert_eq!(merged[0].tasks.len(), 1);
        assert_eq!(merged[1].tasks.len(), 2);
        assert_eq!(merged[1].tasks[0].title, "one");
        assert_eq!(merged[1].tasks[1].project_name, "Beta");

        let flat = flatten_tasks(&merged);
        assert_eq!(flat.len(), 3);
        assert!(flat.iter().all(|task| task.id != TaskId::new("t4")));
    }

    #[test]
    fn null_description_decodes_as_empty() {
        let json = r#"{"id":"p1","name":"Alpha","description":null,"trend":"up"}"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.description, "");
        assert_eq!(project.trend, Trend::Up);
        assert_eq!(project.goal_label(), "Alpha");
    }

    #[test]
    fn new_project_description_fallback() {
        let project = NewProject::named("ops", "", None);
        assert_eq!(project.description, "Project for ops");
        let project = NewProject::named("ops", "launch", None);
        assert_eq!(project.description, "launch");
    }
}
