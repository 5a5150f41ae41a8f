use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::{FeedbackVm, ResultRowVm, ResultVm, map_attempt};

#[component]
pub fn ResultView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let result = use_hook(|| ctx.latest_report().as_ref().map(map_attempt));

    rsx! {
        div { class: "page result",
            h2 { "Test Results" }
            match result {
                Some(vm) => rsx! {
                    ResultSummary { vm: vm.clone() }
                    Breakdown { rows: vm.rows.clone() }
                    Feedback { feedback: vm.feedback.clone() }
                },
                None => rsx! {
                    p { "No results yet. Complete a reading test to see your score." }
                },
            }
            button {
                class: "result__again",
                r#type: "button",
                onclick: move |_| {
                    let _ = navigator.push(Route::Test {});
                },
                "Take Another Test"
            }
        }
    }
}

#[component]
fn ResultSummary(vm: ResultVm) -> Element {
    rsx! {
        section { class: "result__summary",
            div { class: "result__score",
                span { class: "result__score-value", "{vm.score_label}" }
                span { class: "result__accuracy", "{vm.accuracy_label}" }
            }
            div { class: "{vm.tier_class}",
                span { class: "band__value", "{vm.band_label}" }
                span { class: "band__tier", "{vm.tier_label}" }
            }
            dl { class: "result__facts",
                dt { "Time taken" }
                dd { "{vm.time_label}" }

                dt { "Questions" }
                dd { "{vm.answered_label}" }

                dt { "Correct" }
                dd { "{vm.correct}" }

                dt { "Incorrect" }
                dd { "{vm.incorrect}" }

                dt { "Unanswered" }
                dd { "{vm.unanswered}" }
            }
        }
    }
}

#[component]
fn Breakdown(rows: Vec<ResultRowVm>) -> Element {
    if rows.is_empty() {
        return rsx! {};
    }
    rsx! {
        table { class: "result__breakdown",
            thead {
                tr {
                    th { "#" }
                    th { "Question" }
                    th { "Your answer" }
                    th { "Correct answer" }
                    th { "Result" }
                }
            }
            tbody {
                for row in rows {
                    tr { key: "{row.number}",
                        td { "{row.number}" }
                        td { "{row.question}" }
                        td { "{row.given}" }
                        td { "{row.expected}" }
                        td {
                            span { class: "{row.status_class}", "{row.status_label}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn Feedback(feedback: FeedbackVm) -> Element {
    rsx! {
        section { class: "result__feedback",
            h3 { "Performance Feedback" }
            div { class: "{feedback.class}",
                h4 { "{feedback.title}" }
                p { "{feedback.message}" }
                if !feedback.focus.is_empty() {
                    ul {
                        for point in feedback.focus.iter() {
                            li { "{point}" }
                        }
                    }
                }
            }
        }
    }
}
