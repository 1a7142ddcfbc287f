use dioxus::prelude::*;
use taskboard_core::model::Trend;
use taskboard_core::summary::WeeklyGoal;

#[component]
pub fn WeeklyGoals(goals: Vec<WeeklyGoal>) -> Element {
    rsx! {
        section { class: "weekly-goals",
            h3 { "Weekly goals" }
            if goals.is_empty() {
                p { class: "muted", "No projects yet. Add a task to start one." }
            } else {
                ul {
                    for goal in goals {
                        li { class: "weekly-goal",
                            span { class: "weekly-goal__name", "{goal.name}" }
                            span { class: "weekly-goal__confidence", "{goal.confidence:.0}%" }
                            span { class: "trend", "{trend_arrow(goal.trend)}" }
                        }
                    }
                }
            }
        }
    }
}

fn trend_arrow(trend: Trend) -> &'static str {
    match trend {
        Trend::Up => "↑",
        Trend::Down => "↓",
        Trend::Stable => "→",
    }
}
