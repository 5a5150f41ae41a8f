use dioxus::prelude::*;
use dioxus_router::use_navigator;

use reading_core::model::QuestionId;
use reading_core::{Countdown, Remaining};
use services::{CountdownTimer, SubmitOutcome, TimerEvent};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;
use crate::vm::{AnswerInput, QuestionVm, ReadingVm, TestIntent, TestPhase};

const LOW_TIME_SECS: u32 = 5 * 60;

#[component]
pub fn ReadingTestView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let controller = use_hook(|| ctx.new_attempt());
    let minutes = controller.test_minutes();
    let countdown = controller.countdown();

    let snapshot = use_signal(|| controller.snapshot());
    let starting = use_signal(|| false);
    let pending = use_signal(|| false);
    let alert = use_signal(|| None::<ViewError>);

    let dispatch = {
        let controller = controller.clone();
        let ctx = ctx.clone();
        use_callback(move |intent: TestIntent| {
            let mut snapshot = snapshot;
            let mut starting = starting;
            let mut pending = pending;
            let mut alert = alert;

            match intent {
                TestIntent::RequestStart => {
                    if controller.request_start().is_ok() {
                        snapshot.set(controller.snapshot());
                    }
                }
                TestIntent::CancelStart => {
                    if controller.cancel_start().is_ok() {
                        snapshot.set(controller.snapshot());
                    }
                }
                TestIntent::ConfirmStart => {
                    if starting() {
                        return;
                    }
                    starting.set(true);
                    let controller = controller.clone();
                    spawn(async move {
                        let result = controller.confirm_start().await;
                        starting.set(false);
                        if let Err(err) = result {
                            alert.set(Some(ViewError::from_session(&err)));
                        }
                        snapshot.set(controller.snapshot());
                    });
                }
                TestIntent::Answer(question_id, value) => {
                    // Rejected answers (locked form, unknown id) are ignored input.
                    if controller.record_answer(question_id, value).is_ok() {
                        snapshot.set(controller.snapshot());
                    }
                }
                TestIntent::Submit | TestIntent::TimeExpired => {
                    let forced = matches!(intent, TestIntent::TimeExpired);
                    let controller = controller.clone();
                    let ctx = ctx.clone();
                    pending.set(true);
                    spawn(async move {
                        let outcome = if forced {
                            controller.expire_time().await
                        } else {
                            controller.submit().await
                        };
                        pending.set(false);
                        snapshot.set(controller.snapshot());
                        if let Ok(SubmitOutcome::Completed(attempt)) = outcome {
                            ctx.store_report(attempt);
                            let _ = navigator.push(Route::Report {});
                        }
                    });
                }
                TestIntent::DismissAlert => alert.set(None),
            }
        })
    };

    let vm = ReadingVm::from_snapshot(&snapshot.read(), pending());

    rsx! {
        div { class: "page reading",
            match vm.phase {
                TestPhase::Welcome | TestPhase::Confirm => rsx! {
                    Welcome { minutes, on_intent: dispatch }
                },
                TestPhase::Running => rsx! {
                    RunningTest { vm: vm.clone(), countdown: countdown.clone(), on_intent: dispatch }
                },
                TestPhase::Finished => rsx! {
                    p { "Loading results..." }
                },
            }
            if vm.phase == TestPhase::Confirm {
                ConfirmDialog { minutes, starting: starting(), on_intent: dispatch }
            }
            if let Some(err) = alert() {
                AlertDialog { message: err.message(), on_intent: dispatch }
            }
        }
    }
}

#[component]
fn Welcome(minutes: u32, on_intent: EventHandler<TestIntent>) -> Element {
    rsx! {
        section { class: "welcome",
            h2 { "Academic Reading Practice" }
            p { "Read the passage and answer every question before the timer runs out." }
            ul { class: "welcome__rules",
                li { "Time limit: {minutes} minutes" }
                li { "Answers are submitted automatically when time is up." }
                li { "You can change an answer until you submit." }
            }
            button {
                class: "welcome__start",
                r#type: "button",
                onclick: move |_| on_intent.call(TestIntent::RequestStart),
                "Start Test"
            }
        }
    }
}

#[component]
fn ConfirmDialog(minutes: u32, starting: bool, on_intent: EventHandler<TestIntent>) -> Element {
    rsx! {
        div { class: "modal-backdrop",
            div { class: "modal", role: "dialog",
                h3 { "Ready to begin?" }
                p { "The {minutes} minute timer starts as soon as the passage loads and cannot be paused." }
                div { class: "modal__actions",
                    button {
                        class: "modal__secondary",
                        r#type: "button",
                        disabled: starting,
                        onclick: move |_| on_intent.call(TestIntent::CancelStart),
                        "Cancel"
                    }
                    button {
                        class: "modal__primary",
                        r#type: "button",
                        disabled: starting,
                        onclick: move |_| on_intent.call(TestIntent::ConfirmStart),
                        if starting { "Starting..." } else { "Start Test" }
                    }
                }
            }
        }
    }
}

#[component]
fn AlertDialog(message: &'static str, on_intent: EventHandler<TestIntent>) -> Element {
    rsx! {
        div { class: "modal-backdrop",
            div { class: "modal modal--alert", role: "alertdialog",
                p { "{message}" }
                div { class: "modal__actions",
                    button {
                        class: "modal__primary",
                        r#type: "button",
                        onclick: move |_| on_intent.call(TestIntent::DismissAlert),
                        "OK"
                    }
                }
            }
        }
    }
}

#[component]
fn RunningTest(vm: ReadingVm, countdown: Countdown, on_intent: EventHandler<TestIntent>) -> Element {
    let locked = vm.inputs_locked;
    let failure_message = ViewError::SubmitFailed.message();
    rsx! {
        div { class: "reading__toolbar",
            TimerBadge { countdown, on_intent }
            span { class: "reading__progress", "{vm.progress_label}" }
        }
        div { class: "progress",
            div { class: "progress__bar", style: "width: {vm.progress_percent}%" }
        }
        if vm.time_expired {
            p { class: "reading__notice", "Time is up. Your answers have been sent for scoring." }
        }
        div { class: "reading__panes",
            article { class: "reading__passage",
                h2 { "{vm.title}" }
                for paragraph in vm.paragraphs.iter() {
                    p { "{paragraph}" }
                }
            }
            section { class: "reading__questions",
                for question in vm.questions.iter() {
                    QuestionCard {
                        key: "{question.id}",
                        question: question.clone(),
                        locked,
                        on_intent,
                    }
                }
                div { class: "reading__submit",
                    if let Some(failure) = vm.failure.as_ref() {
                        p { class: "reading__error", "{failure_message}" }
                        p { class: "reading__error-detail", "{failure}" }
                    }
                    button {
                        class: "reading__submit-button",
                        r#type: "button",
                        disabled: vm.submit_disabled,
                        onclick: move |_| on_intent.call(TestIntent::Submit),
                        "{vm.submit_label}"
                    }
                }
            }
        }
    }
}

#[component]
fn TimerBadge(countdown: Countdown, on_intent: EventHandler<TestIntent>) -> Element {
    let mut remaining = use_signal(|| countdown.remaining());

    // Dropped with the component, which stops the ticking task.
    use_future(move || {
        let countdown = countdown.clone();
        async move {
            let (timer, mut events) = CountdownTimer::start(countdown);
            while let Some(event) = events.recv().await {
                match event {
                    TimerEvent::Tick(left) => remaining.set(left),
                    TimerEvent::Expired => {
                        remaining.set(Remaining::from_secs(0));
                        on_intent.call(TestIntent::TimeExpired);
                    }
                }
            }
            timer.stop();
        }
    });

    let left = remaining();
    let class = if left.secs() <= LOW_TIME_SECS {
        "timer timer--low"
    } else {
        "timer"
    };
    rsx! {
        div { class, "Time left: {left}" }
    }
}

#[component]
fn QuestionCard(question: QuestionVm, locked: bool, on_intent: EventHandler<TestIntent>) -> Element {
    let class = if question.answered {
        "question question--answered"
    } else {
        "question"
    };
    rsx! {
        div { class,
            div { class: "question__header",
                span { class: "question__number", "Question {question.number}" }
                span { class: "question__type", "{question.type_label}" }
            }
            p { class: "question__text", "{question.text}" }
            AnswerField {
                id: question.id,
                input: question.input.clone(),
                value: question.value.clone(),
                locked,
                on_intent,
            }
            if question.answered {
                p { class: "question__saved", "Answer saved: {question.value}" }
            }
        }
    }
}

#[component]
fn AnswerField(
    id: QuestionId,
    input: AnswerInput,
    value: String,
    locked: bool,
    on_intent: EventHandler<TestIntent>,
) -> Element {
    match input {
        AnswerInput::Choice(choices) => rsx! {
            div { class: "question__choices",
                for choice in choices {
                    label { class: "question__choice",
                        input {
                            r#type: "radio",
                            name: "question-{id}",
                            value: choice.value,
                            checked: value == choice.value,
                            disabled: locked,
                            onchange: move |_| {
                                on_intent.call(TestIntent::Answer(id, choice.value.to_string()));
                            },
                        }
                        span { "{choice.label}" }
                    }
                }
            }
        },
        AnswerInput::Line { placeholder } => rsx! {
            input {
                class: "question__input",
                r#type: "text",
                placeholder,
                value: "{value}",
                disabled: locked,
                oninput: move |evt: FormEvent| on_intent.call(TestIntent::Answer(id, evt.value())),
            }
        },
        AnswerInput::Paragraph => rsx! {
            textarea {
                class: "question__textarea",
                rows: 4,
                placeholder: "Write your answer",
                value: "{value}",
                disabled: locked,
                oninput: move |evt: FormEvent| on_intent.call(TestIntent::Answer(id, evt.value())),
            }
        },
        AnswerInput::Unsupported { tag } => rsx! {
            p { class: "question__unsupported", "Unsupported question type: {tag}" }
        },
    }
}
