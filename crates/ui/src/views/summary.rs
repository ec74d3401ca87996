use dioxus::prelude::*;

use crate::vm::SummaryVm;

#[component]
pub fn SummaryPanel(summary: SummaryVm, on_restart: EventHandler<()>) -> Element {
    rsx! {
        section { class: "results", id: "results",
            h2 { class: "results__title", "{summary.title}" }
            p { class: "results__message", "{summary.message}" }

            dl { class: "summary",
                dt { "Final score" }
                dd { id: "final-score", "{summary.score}" }

                dt { "Percentage" }
                dd { id: "percentage", "{summary.percentage_label}" }

                dt { "Correct answers" }
                dd { id: "correct-answers", "{summary.correct_count} / {summary.total}" }

                dt { "Time taken" }
                dd { "{summary.elapsed_label}" }
            }

            button {
                class: "btn btn-primary",
                id: "restart-btn",
                r#type: "button",
                onclick: move |_| on_restart.call(()),
                "Restart Quiz"
            }
        }
    }
}
