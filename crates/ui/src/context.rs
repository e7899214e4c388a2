use std::sync::Arc;

use services::ExerciseService;

pub trait UiApp: Send + Sync {
    fn exercise(&self) -> Arc<ExerciseService>;
}

#[derive(Clone)]
pub struct AppContext {
    exercise: Arc<ExerciseService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            exercise: app.exercise(),
        }
    }

    #[must_use]
    pub fn exercise(&self) -> Arc<ExerciseService> {
        Arc::clone(&self.exercise)
    }
}

// Provided by the composition root in `crates/app`.

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
