use crate::controller::{Controller, Layer, UpdateState};
use crate::ui;

use eframe::egui::{self, Color32};
use eframe::{App, Frame};
use smote_lab::DistanceMetric;

/// What the "Neighbors" slider reported in one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SliderInput {
    pub changed: bool,
    pub dragging: bool,
    pub released: bool,
}

impl SliderInput {
    pub fn from_response(response: &egui::Response) -> Self {
        Self {
            changed: response.changed(),
            dragging: response.dragged(),
            released: response.drag_stopped(),
        }
    }

    /// A drag settles when it is released; clicks and key presses settle at once.
    pub fn settled(self) -> bool {
        self.released || (self.changed && !self.dragging)
    }
}

/// The main application struct.
/// It holds the widget state and delegates all data handling to the controller.
pub struct SmoteApp {
    pub controller: Controller,
    /// Value bound to the "Neighbors" slider.
    pub slider_k: usize,
    /// Metric bound to the radio buttons.
    pub selected_metric: DistanceMetric,
}

impl SmoteApp {
    pub fn new(controller: Controller) -> Self {
        Self {
            slider_k: controller.k(),
            selected_metric: controller.metric(),
            controller,
        }
    }

    /// Reacts to a slider response. Only settled, new values reach the controller.
    pub fn handle_slider(&mut self, ctx: &egui::Context, input: SliderInput) {
        if input.settled() && self.controller.slider_moved(self.slider_k) {
            ctx.request_repaint();
        }
    }

    pub fn handle_metric(&mut self, ctx: &egui::Context) {
        if self.selected_metric != self.controller.metric() {
            self.controller.set_metric(self.selected_metric);
            ctx.request_repaint();
        }
    }

    /// Lays out one frame and settles a pending update.
    pub fn show(&mut self, ctx: &egui::Context) {
        ui::draw_controls_panel(self, ctx);
        ui::draw_plot_panel(self, ctx);

        // The new layer was just laid out for painting.
        if self.controller.state() == UpdateState::Updating {
            self.controller.finish_redraw();
        }
    }

    /// Colour used for a layer's markers and its legend entry (matplotlib's default cycle).
    pub fn layer_color(layer: Layer) -> Color32 {
        match layer {
            Layer::Majority => Color32::from_rgb(31, 119, 180),
            Layer::Minority => Color32::from_rgb(255, 127, 14),
            Layer::Synthesized => Color32::from_rgba_unmultiplied(44, 160, 44, 128),
        }
    }
}

impl App for SmoteApp {
    /// Called by eframe on every frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.show(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::RawInput;
    use rstest::rstest;
    use smote_lab::DemoConfig;

    fn app() -> SmoteApp {
        SmoteApp::new(Controller::initialize(DemoConfig::default()).unwrap())
    }

    fn drag_frame() -> SliderInput {
        SliderInput {
            changed: true,
            dragging: true,
            released: false,
        }
    }

    fn click() -> SliderInput {
        SliderInput {
            changed: true,
            ..Default::default()
        }
    }

    fn release() -> SliderInput {
        SliderInput {
            dragging: true,
            released: true,
            ..Default::default()
        }
    }

    #[rstest]
    #[case(SliderInput::default(), false)]
    #[case(drag_frame(), false)]
    #[case(click(), true)]
    #[case(release(), true)]
    fn test_settled(#[case] input: SliderInput, #[case] expected: bool) {
        assert_eq!(input.settled(), expected);
    }

    #[test]
    fn test_drag_resamples_once_on_release() {
        let ctx = egui::Context::default();
        let mut app = app();

        for k in 6..=15 {
            app.slider_k = k;
            app.handle_slider(&ctx, drag_frame());
            assert_eq!(app.controller.k(), 5);
            assert!(app.controller.layer(Layer::Synthesized).is_empty());
            assert_eq!(app.controller.state(), UpdateState::Idle);
        }

        app.handle_slider(&ctx, release());
        assert_eq!(app.controller.k(), 15);
        assert_eq!(app.controller.layer(Layer::Synthesized).len(), 180);
        assert_eq!(app.controller.state(), UpdateState::Updating);
    }

    #[test]
    fn test_click_then_frame_returns_to_idle() {
        let ctx = egui::Context::default();
        let mut app = app();

        app.slider_k = 3;
        app.handle_slider(&ctx, click());
        assert_eq!(app.controller.state(), UpdateState::Updating);
        assert_eq!(app.controller.layer(Layer::Synthesized).len(), 180);

        let _ = ctx.run(RawInput::default(), |ctx| app.show(ctx));
        assert_eq!(app.controller.state(), UpdateState::Idle);
        assert_eq!(app.controller.k(), 3);
        assert_eq!(app.slider_k, 3);
        assert_eq!(app.controller.layer(Layer::Synthesized).len(), 180);
    }

    #[test]
    fn test_frame_without_input_stays_idle() {
        let ctx = egui::Context::default();
        let mut app = app();

        let _ = ctx.run(RawInput::default(), |ctx| app.show(ctx));
        assert_eq!(app.controller.state(), UpdateState::Idle);
        assert!(app.controller.layer(Layer::Synthesized).is_empty());
    }

    #[test]
    fn test_metric_selection_reaches_controller() {
        let ctx = egui::Context::default();
        let mut app = app();

        app.selected_metric = DistanceMetric::L1;
        app.handle_metric(&ctx);
        assert_eq!(app.controller.metric(), DistanceMetric::L1);
        assert_eq!(app.controller.state(), UpdateState::Idle);

        app.slider_k = 4;
        app.handle_slider(&ctx, click());
        let _ = ctx.run(RawInput::default(), |ctx| app.show(ctx));

        app.selected_metric = DistanceMetric::LInf;
        app.handle_metric(&ctx);
        assert_eq!(app.controller.metric(), DistanceMetric::LInf);
        assert_eq!(app.controller.state(), UpdateState::Updating);
        assert_eq!(app.controller.layer(Layer::Synthesized).len(), 180);

        let _ = ctx.run(RawInput::default(), |ctx| app.show(ctx));
        assert_eq!(app.controller.state(), UpdateState::Idle);
    }
}
