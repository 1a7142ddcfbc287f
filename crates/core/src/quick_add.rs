//! Free-text quick entry: `title #project @goal ^effort`.

use crate::model::{Difficulty, Effort, Priority, Project};

/// Values used for fields the input line does not mention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickAddDefaults {
    pub project: String,
    pub goal: String,
    pub effort: Effort,
    pub priority: Priority,
    pub difficulty: Difficulty,
}

impl Default for QuickAddDefaults {
    fn default() -> Self {
        Self {
            project: "Personal".to_owned(),
            goal: "Complete task".to_owned(),
            effort: Effort::Medium,
            priority: Priority::Medium,
            difficulty: Difficulty::Moderate,
        }
    }
}

impl QuickAddDefaults {
    /// Default project is the first known project, else the local part of the
    /// user's email, else `Personal`.
    #[must_use]
    pub fn for_context(projects: &[Project], user_email: Option<&str>) -> Self {
        let project = projects
            .first()
            .map(|project| project.name.clone())
            .or_else(|| {
                user_email
                    .and_then(|email| email.split('@').next())
                    .filter(|local| !local.is_empty())
                    .map(str::to_owned)
            });

        let mut defaults = Self::default();
        if let Some(project) = project {
            defaults.project = project;
        }
        defaults
    }
}

/// A task extracted from one quick-add line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickAdd {
    pub title: String,
    pub project: String,
    pub goal: String,
    pub effort: Effort,
    pub priority: Priority,
    pub difficulty: Difficulty,
}

/// Parse one line of quick-add input.
///
/// Tokens are whitespace separated and scanned once, left to right:
/// - `#name` sets the project
/// - `@label` sets the goal, dashes become spaces
/// - `^S`, `^M`, `^L` (any case) set the effort; other `^` tokens are ignored
/// - everything else is appended to the title
///
/// A repeated prefix overwrites the earlier value. With no plain tokens the
/// raw input becomes the title. Blank input yields `None`.
#[must_use]
pub fn parse_quick_add(input: &str, defaults: &QuickAddDefaults) -> Option<QuickAdd> {
    if input.trim().is_empty() {
        return None;
    }

    let mut title_parts: Vec<&str> = Vec::new();
    let mut project = defaults.project.clone();
    let mut goal = defaults.goal.clone();
    let mut effort = defaults.effort;

    for token in input.split_whitespace() {
        if let Some(name) = token.strip_prefix('#') {
            project = name.to_owned();
        } else if let Some(label) = token.strip_prefix('@') {
            goal = label.replace('-', " ");
        } else if let Some(letter) = token.strip_prefix('^') {
            if let Ok(parsed) = Effort::from_letter(letter) {
                effort = parsed;
            }
        } else {
            title_parts.push(token);
        }
    }

    let title = if title_parts.is_empty() {
        input.to_owned()
    } else {
        title_parts.join(" ")
    };

    Some(QuickAdd {
        title,
        project,
        goal,
        effort,
        priority: defaults.priority,
        difficulty: defaults.difficulty,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProjectId;

    #[test]
    fn parses_all_modifiers() {
        let parsed = parse_quick_add("Draft deck #marketing @launch ^L", &QuickAddDefaults::default())
            .unwrap();
        assert_eq!(parsed.title, "Draft deck");
        assert_eq!(parsed.project, "marketing");
        assert_eq!(parsed.goal, "launch");
        assert_eq!(parsed.effort, Effort::Large);
        assert_eq!(parsed.priority, Priority::Medium);
    }

    #[test]
    fn modifier_order_does_not_matter() {
        let defaults = QuickAddDefaults::default();
        let a = parse_quick_add("^s #ops fix login @q3-launch-prep", &defaults).unwrap();
        assert_eq!(a.title, "fix login");
        assert_eq!(a.project, "ops");
        assert_eq!(a.goal, "q3 launch prep");
        assert_eq!(a.effort, Effort::Small);
    }

    #[test]
    fn falls_back_to_raw_input_without_title_tokens() {
        let raw = "#ops @goal ^L";
        let parsed = parse_quick_add(raw, &QuickAddDefaults::default()).unwrap();
        assert_eq!(parsed.title, raw);
        assert_eq!(parsed.project, "ops");
    }

    #[test]
    fn later_prefix_wins() {
        let parsed =
            parse_quick_add("task #one #two ^S ^L", &QuickAddDefaults::default()).unwrap();
        assert_eq!(parsed.project, "two");
        assert_eq!(parsed.effort, Effort::Large);
    }

    #[test]
    fn unknown_effort_is_ignored() {
        let parsed = parse_quick_add("task ^XL", &QuickAddDefaults::default()).unwrap();
        assert_eq!(parsed.effort, Effort::Medium);
        assert_eq!(parsed.title, "task");
    }

    #[test]
    fn blank_input_is_rejected() {
        assert!(parse_quick_add("   ", &QuickAddDefaults::default()).is_none());
    }

    #[test]
    fn defaults_follow_context() {
        let defaults = QuickAddDefaults::for_context(&[], Some("rina@corp.io"));
        assert_eq!(defaults.project, "rina");

        let projects = vec![Project::new(ProjectId::new("p1"), "Website")];
        let defaults = QuickAddDefaults::for_context(&projects, Some("rina@corp.io"));
        assert_eq!(defaults.project, "Website");

        assert_eq!(QuickAddDefaults::for_context(&[], None).project, "Personal");
    }
}
