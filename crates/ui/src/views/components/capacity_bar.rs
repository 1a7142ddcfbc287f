use dioxus::prelude::*;
use taskboard_core::summary::Capacity;

#[component]
pub fn CapacityBar(capacity: Capacity) -> Element {
    let percent = capacity.percent_planned();
    let width = percent.min(100.0);
    let fill_class = if capacity.planned_tasks > capacity.task_capacity {
        "capacity__fill over"
    } else {
        "capacity__fill"
    };

    rsx! {
        section { class: "capacity",
            header { class: "capacity__header",
                h3 { "Today's capacity" }
                span { class: "capacity__load", "{capacity.load_label()}" }
            }
            div { class: "capacity__track",
                div { class: "{fill_class}", style: "width: {width:.0}%" }
            }
            p { class: "capacity__numbers",
                "{capacity.planned_tasks} / {capacity.task_capacity} tasks · "
                "{capacity.planned_hours:.1}h of {capacity.available_hours:.0}h · "
                "{capacity.completed_tasks} done"
            }
        }
    }
}
