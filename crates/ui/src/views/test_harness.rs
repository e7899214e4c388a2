use std::sync::Arc;
use std::time::Duration;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use grounding_core::model::{ExerciseSettings, Palette};
use grounding_core::time::fixed_clock;
use services::ExerciseService;

use crate::context::{UiApp, build_app_context};
use crate::views::GroundingView;
use crate::views::grounding::GroundingTestHandles;

use super::GroundingIntent;

struct TestApp {
    exercise: Arc<ExerciseService>,
}

impl UiApp for TestApp {
    fn exercise(&self) -> Arc<ExerciseService> {
        Arc::clone(&self.exercise)
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    handles: GroundingTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn GroundingHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    let handles = props.handles.clone();
    use_context_provider(|| handles);
    rsx! { GroundingView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub handles: GroundingTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    pub fn send(&mut self, intent: GroundingIntent) {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
    }

    /// Tick the session until its animations stop.
    pub fn settle(&mut self) {
        let mut session = self.handles.session();
        self.dom.in_runtime(|| {
            for _ in 0..1_000 {
                if !session.peek().is_animating() {
                    return;
                }
                session.write().tick(Duration::from_millis(16));
            }
            panic!("grounding session never settled");
        });
        drive_dom(&mut self.dom);
    }

    pub fn read<T>(&self, f: impl FnOnce(&services::GroundingSession) -> T) -> T {
        let session = self.handles.session();
        self.dom.in_runtime(|| f(&session.peek()))
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(palette: Palette, reset_on_inactive: bool) -> ViewHarness {
    let settings = ExerciseSettings::for_palette(palette)
        .expect("palette steps")
        .with_reset_on_inactive(reset_on_inactive);
    let exercise = Arc::new(ExerciseService::new(fixed_clock(), settings));
    let handles = GroundingTestHandles::default();

    let dom = VirtualDom::new_with_props(
        GroundingHarness,
        ViewHarnessProps {
            app: Arc::new(TestApp { exercise }),
            handles: handles.clone(),
        },
    );

    let mut harness = ViewHarness { dom, handles };
    harness.rebuild();
    harness
}
