use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use dioxus::prelude::*;
use quiz_core::model::Theme;
use services::{ChannelObserver, QuizEvent};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::context::AppContext;
use crate::views::{SummaryPanel, ViewError, ViewState, view_state_from_resource};
use crate::vm::QuizScreenVm;

type EventInbox = Rc<RefCell<Option<UnboundedReceiver<QuizEvent>>>>;

fn theme_icon(theme: Theme) -> &'static str {
    if theme.is_dark() { "☀" } else { "☾" }
}

#[component]
pub fn QuizScreen() -> Element {
    let ctx = use_context::<AppContext>();
    let vm = use_signal(QuizScreenVm::new);
    let theme = use_signal(Theme::default);

    let (controller, inbox) = use_hook(|| {
        let (observer, rx) = ChannelObserver::channel();
        let controller = ctx.new_controller(Arc::new(observer));
        let inbox: EventInbox = Rc::new(RefCell::new(Some(rx)));
        (controller, inbox)
    });

    // Controller events arrive from the countdown task; fold them into the view model here.
    use_hook(move || {
        let mut vm = vm;
        spawn(async move {
            let receiver = inbox.borrow_mut().take();
            let Some(mut rx) = receiver else {
                return;
            };
            while let Some(event) = rx.recv().await {
                vm.write().apply(&event);
            }
        })
    });

    let settings = ctx.settings();
    {
        let settings = settings.clone();
        use_hook(move || {
            let mut theme = theme;
            spawn(async move {
                theme.set(settings.theme().await);
            })
        });
    }

    let resource = {
        let controller = controller.clone();
        let ctx = ctx.clone();
        use_resource(move || {
            let controller = controller.clone();
            let source = ctx.question_source();
            let resume = ctx.take_resume_on_launch();
            async move {
                controller
                    .load(source.as_ref(), resume)
                    .await
                    .map(|_| ())
                    .map_err(|_| ViewError::LoadFailed)
            }
        })
    };

    let on_select = {
        let controller = controller.clone();
        use_callback(move |option: usize| {
            let controller = controller.clone();
            spawn(async move {
                controller.select_answer(option).await;
            });
        })
    };
    let on_next = {
        let controller = controller.clone();
        use_callback(move |()| {
            let controller = controller.clone();
            spawn(async move {
                controller.advance().await;
            });
        })
    };
    let on_restart = {
        let controller = controller.clone();
        use_callback(move |()| {
            let controller = controller.clone();
            spawn(async move {
                controller.restart().await;
            });
        })
    };
    let on_toggle_theme = use_callback(move |()| {
        let settings = settings.clone();
        let mut theme = theme;
        spawn(async move {
            let next = settings.toggle_theme(theme()).await;
            theme.set(next);
        });
    });

    let state = view_state_from_resource(&resource);
    let current_theme = theme();
    let icon = theme_icon(current_theme);
    let vm_guard = vm.read();

    rsx! {
        div { class: "quiz-app", "data-theme": "{current_theme}",
            header { class: "quiz-header",
                h1 { class: "quiz-header__title", "Quiz" }
                button {
                    class: "theme-toggle",
                    id: "theme-toggle",
                    r#type: "button",
                    aria_label: "Toggle theme",
                    onclick: move |_| on_toggle_theme.call(()),
                    "{icon}"
                }
            }
            main { class: "quiz-body",
                match state {
                    ViewState::Idle | ViewState::Loading => rsx! {
                        div { class: "loading", id: "loading",
                            p { "Loading questions..." }
                        }
                    },
                    ViewState::Error(err) => rsx! {
                        div { class: "alert alert-danger", id: "load-error", "{err.message()}" }
                    },
                    ViewState::Ready(()) => rsx! {
                        if let Some(summary) = vm_guard.summary() {
                            SummaryPanel { summary: summary.clone(), on_restart }
                        } else {
                            QuestionPanel { vm: (*vm_guard).clone(), on_select, on_next }
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn QuestionPanel(
    vm: QuizScreenVm,
    on_select: EventHandler<usize>,
    on_next: EventHandler<()>,
) -> Element {
    let percent = vm.progress_percent();
    let progress_label = vm.progress_label();
    let score_label = vm.score_label();
    let timer_label = vm.timer_label();

    rsx! {
        section { class: "quiz-container", id: "quiz-container",
            div { class: "quiz-meta",
                span { class: "question-counter", id: "question-counter", "{progress_label}" }
                span { class: "score", id: "score", "{score_label}" }
                span { class: vm.timer_class(), id: "timer", "{timer_label}" }
            }
            div { class: "progress",
                div { class: "progress-bar", style: "width: {percent}%" }
            }
            if let Some(prompt) = vm.prompt() {
                h2 { class: "question-text", id: "question-text", "{prompt}" }
            }
            div { class: "options", id: "options",
                for option in vm.options().iter().cloned() {
                    button {
                        key: "{option.index}",
                        class: option.class(),
                        r#type: "button",
                        disabled: option.disabled,
                        onclick: move |_| on_select.call(option.index),
                        "{option.label}"
                    }
                }
            }
            if let Some(feedback) = vm.feedback() {
                div { class: "feedback", id: "feedback",
                    div { class: feedback.class(), "{feedback.message}" }
                }
            }
            if vm.can_advance() {
                button {
                    class: "btn btn-primary",
                    id: "next-btn",
                    r#type: "button",
                    onclick: move |_| on_next.call(()),
                    "{vm.next_label()}"
                }
            }
        }
    }
}
