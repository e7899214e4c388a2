use grounding_core::VisibleFrame;
use grounding_core::model::{Palette, Rgb};
use grounding_core::time::format_span;
use services::GroundingSession;

pub const TAP_HINT: &str = "Tap anywhere to count a thing";
pub const DONE_HINT: &str = "Press reset to begin again";

/// Display-ready values for one rendered frame of the grounding screen.
#[derive(Clone, Debug, PartialEq)]
pub struct GroundingFrameVm {
    pub count_label: String,
    pub label: String,
    pub emoji: Option<String>,
    pub step_position: String,
    pub hint: &'static str,
    pub completion: Option<String>,
    pub root_style: String,
    pub number_style: String,
    pub label_style: String,
    pub progress_style: String,
    pub progress_percent: u8,
}

#[must_use]
pub fn map_grounding_frame(session: &GroundingSession) -> GroundingFrameVm {
    let frame = session.frame();
    let steps = session.steps();
    let step = session.visible_step();
    let palette = session.settings().palette();

    let completion = frame.finished.then(|| {
        session.elapsed().map_or_else(
            || "All steps completed".to_string(),
            |elapsed| format!("All steps completed in {}", format_span(elapsed)),
        )
    });
    let hint = if frame.finished { DONE_HINT } else { TAP_HINT };

    GroundingFrameVm {
        count_label: frame.count.to_string(),
        label: step.label().to_string(),
        emoji: step.emoji().map(str::to_string),
        step_position: format!("Step {} of {}", frame.step_index + 1, steps.len()),
        hint,
        completion,
        root_style: root_style(frame.background, palette),
        number_style: number_style(&frame, palette.accent()),
        label_style: opacity_style(frame.label_opacity),
        progress_style: progress_style(frame.progress, palette.accent()),
        progress_percent: progress_percent(frame.progress),
    }
}

fn root_style(background: Rgb, palette: Palette) -> String {
    format!("background-color: {background}; color: {};", palette.text())
}

fn number_style(frame: &VisibleFrame, accent: Rgb) -> String {
    format!("color: {accent}; opacity: {:.3};", frame.number_opacity)
}

fn opacity_style(opacity: f32) -> String {
    format!("opacity: {:.3};", opacity.clamp(0.0, 1.0))
}

fn progress_style(progress: f32, accent: Rgb) -> String {
    let percent = progress.clamp(0.0, 1.0) * 100.0;
    format!("width: {percent:.1}%; background-color: {accent};")
}

fn progress_percent(progress: f32) -> u8 {
    let percent = (progress.clamp(0.0, 1.0) * 100.0).round();
    // Clamped to 0..=100 above.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let percent = percent as u8;
    percent
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use grounding_core::model::ExerciseSettings;
    use grounding_core::time::fixed_clock;

    use super::*;

    fn session(palette: Palette) -> GroundingSession {
        let settings = ExerciseSettings::for_palette(palette).unwrap();
        GroundingSession::new(Arc::new(settings), fixed_clock())
    }

    fn settle(session: &mut GroundingSession) {
        while session.is_animating() {
            session.tick(Duration::from_millis(16));
        }
    }

    #[test]
    fn initial_frame_maps_first_step() {
        let vm = map_grounding_frame(&session(Palette::Midnight));
        assert_eq!(vm.count_label, "5");
        assert_eq!(vm.label, "things you can see");
        assert_eq!(vm.step_position, "Step 1 of 5");
        assert_eq!(vm.hint, TAP_HINT);
        assert_eq!(vm.emoji, None);
        assert_eq!(vm.completion, None);
        assert_eq!(vm.progress_percent, 0);
        assert!(vm.root_style.contains("background-color: #111111"));
        assert!(vm.progress_style.starts_with("width: 0.0%"));
    }

    #[test]
    fn emoji_palettes_expose_glyphs() {
        let vm = map_grounding_frame(&session(Palette::Dawn));
        assert_eq!(vm.emoji.as_deref(), Some("👀"));
    }

    #[test]
    fn progress_follows_counted_items() {
        let mut session = session(Palette::Midnight);
        session.tap();
        session.tap();
        settle(&mut session);
        let vm = map_grounding_frame(&session);
        assert_eq!(vm.count_label, "3");
        assert_eq!(vm.progress_percent, 40);
        assert!(vm.progress_style.starts_with("width: 40.0%"));
    }

    #[test]
    fn finished_frame_shows_completion() {
        let mut session = session(Palette::Ocean);
        for _ in 0..15 {
            session.tap();
            settle(&mut session);
        }
        let vm = map_grounding_frame(&session);
        assert_eq!(vm.completion.as_deref(), Some("All steps completed in 0s"));
        assert_eq!(vm.hint, DONE_HINT);
        assert_eq!(vm.count_label, "0");
        assert_eq!(vm.step_position, "Step 5 of 5");
        assert_eq!(vm.progress_percent, 100);
    }

    #[test]
    fn opacity_is_clamped() {
        assert_eq!(opacity_style(1.4), "opacity: 1.000;");
        assert_eq!(opacity_style(0.25), "opacity: 0.250;");
    }
}
