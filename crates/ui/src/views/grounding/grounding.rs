use std::sync::Arc;
use std::time::{Duration, Instant};

use dioxus::document::eval;
use dioxus::prelude::*;

use services::{GroundingSession, LifecycleSignal, ResetReason};
use tokio::sync::Notify;

use crate::context::AppContext;
use crate::vm::map_grounding_frame;
use super::scripts::{
    LIFECYCLE_DETACH_SCRIPT, MESSAGE_ACTIVE, MESSAGE_INACTIVE, ROOT_ID, focus_root_script,
    lifecycle_subscribe_script,
};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroundingIntent {
    Tap,
    Reset,
    Lifecycle(LifecycleSignal),
}

/// Parks on `wake` while nothing is moving, then waits one frame.
async fn wait_for_frame(wake: &Notify, idle: bool) {
    if idle {
        wake.notified().await;
    }
    tokio::time::sleep(FRAME_INTERVAL).await;
}

fn lifecycle_signal(message: &str) -> Option<LifecycleSignal> {
    match message {
        MESSAGE_ACTIVE => Some(LifecycleSignal::Active),
        MESSAGE_INACTIVE => Some(LifecycleSignal::Inactive),
        _ => None,
    }
}

#[component]
pub fn GroundingView() -> Element {
    let ctx = use_context::<AppContext>();
    let exercise = ctx.exercise();
    let reset_on_inactive = exercise.settings().reset_on_inactive();
    let session = use_signal(|| exercise.start_session());
    let wake = use_hook(|| Arc::new(Notify::new()));

    let wake_for_dispatch = Arc::clone(&wake);
    let dispatch_intent = use_callback(move |intent: GroundingIntent| {
        let mut session = session;
        match intent {
            GroundingIntent::Tap => {
                let outcome = session.write().tap();
                tracing::trace!(?outcome, "tap");
            }
            GroundingIntent::Reset => {
                session.write().reset(ResetReason::Manual);
            }
            GroundingIntent::Lifecycle(signal) => {
                if !session.write().on_lifecycle(signal) {
                    tracing::debug!(?signal, "lifecycle signal ignored");
                }
            }
        }
        if session.peek().is_animating() {
            wake_for_dispatch.notify_one();
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<GroundingTestHandles>() {
                handles.register(dispatch_intent, session);
            }
        }
    }

    // Frame loop. Sleeps on `wake` between transitions.
    use_future(move || {
        let wake = Arc::clone(&wake);
        async move {
            let mut session = session;
            let mut last = Instant::now();
            loop {
                let idle = !session.peek().is_animating();
                wait_for_frame(&wake, idle).await;
                let now = Instant::now();
                let dt = if idle {
                    FRAME_INTERVAL
                } else {
                    now.duration_since(last)
                };
                last = now;
                if !session.peek().is_animating() {
                    continue;
                }
                for event in session.write().tick(dt) {
                    tracing::trace!(?event, "sequencer event");
                }
            }
        }
    });

    use_future(move || async move {
        if !reset_on_inactive {
            return;
        }
        let mut channel = eval(&lifecycle_subscribe_script());
        while let Ok(message) = channel.recv::<String>().await {
            match lifecycle_signal(&message) {
                Some(signal) => dispatch_intent.call(GroundingIntent::Lifecycle(signal)),
                None => tracing::warn!(%message, "unexpected lifecycle message"),
            }
        }
        tracing::debug!("lifecycle subscription closed");
    });

    use_drop(move || {
        if reset_on_inactive {
            let _ = eval(LIFECYCLE_DETACH_SCRIPT);
        }
    });

    use_effect(move || {
        let _ = eval(&focus_root_script());
    });

    let on_key = use_callback(move |evt: KeyboardEvent| {
        if evt.data.code() == Code::Space || evt.data.key() == Key::Enter {
            evt.prevent_default();
            dispatch_intent.call(GroundingIntent::Tap);
            return;
        }
        if let Key::Character(value) = evt.data.key() {
            if value.eq_ignore_ascii_case("r") {
                evt.prevent_default();
                dispatch_intent.call(GroundingIntent::Reset);
            }
        }
    });

    let vm = map_grounding_frame(&session.read());

    rsx! {
        div {
            class: "grounding-root",
            id: ROOT_ID,
            tabindex: "0",
            style: "{vm.root_style}",
            onclick: move |_| dispatch_intent.call(GroundingIntent::Tap),
            onkeydown: on_key,
            div {
                class: "grounding-progress",
                role: "progressbar",
                "aria-valuemin": "0",
                "aria-valuemax": "100",
                "aria-valuenow": "{vm.progress_percent}",
                div { class: "grounding-progress-fill", style: "{vm.progress_style}" }
            }
            div { class: "grounding-body",
                div { class: "grounding-count", id: "grounding-count", style: "{vm.number_style}",
                    "{vm.count_label}"
                }
                div { class: "grounding-label", id: "grounding-label", style: "{vm.label_style}",
                    if let Some(emoji) = vm.emoji.as_ref() {
                        span { class: "grounding-emoji", "{emoji}" }
                    }
                    span { "{vm.label}" }
                }
                p { class: "grounding-step", style: "{vm.label_style}", "{vm.step_position}" }
                if let Some(message) = vm.completion.as_ref() {
                    p { class: "grounding-complete", role: "status", "{message}" }
                }
            }
            footer { class: "grounding-footer",
                span { class: "grounding-hint", "{vm.hint}" }
                button {
                    id: "grounding-reset",
                    class: "grounding-reset",
                    r#type: "button",
                    onclick: move |evt: MouseEvent| {
                        evt.stop_propagation();
                        dispatch_intent.call(GroundingIntent::Reset);
                    },
                    onkeydown: move |evt: KeyboardEvent| evt.stop_propagation(),
                    "Reset"
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct GroundingTestHandles {
    dispatch: Rc<RefCell<Option<Callback<GroundingIntent>>>>,
    session: Rc<RefCell<Option<Signal<GroundingSession>>>>,
}

#[cfg(test)]
impl GroundingTestHandles {
    pub(crate) fn register(
        &self,
        dispatch: Callback<GroundingIntent>,
        session: Signal<GroundingSession>,
    ) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.session.borrow_mut() = Some(session);
    }

    pub(crate) fn dispatch(&self) -> Callback<GroundingIntent> {
        (*self.dispatch.borrow()).expect("grounding dispatch registered")
    }

    pub(crate) fn session(&self) -> Signal<GroundingSession> {
        (*self.session.borrow()).expect("grounding session registered")
    }
}
