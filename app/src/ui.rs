use crate::app::{SliderInput, SmoteApp};
use crate::controller::{Layer, PlotBounds};

use eframe::egui::{
    self, emath::RectTransform, Align2, Color32, FontId, Painter, Pos2, Rect, Sense, Shape, Stroke,
};
use smote_lab::{DataPoint, DistanceMetric};

const TITLE: &str = "Resampled Data using SMOTE";
const MARKER_SIZE: f32 = 3.5;

/// Draws the bottom panel: the "Neighbors" slider, the metric selector and
/// the status line.
pub fn draw_controls_panel(app: &mut SmoteApp, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("controls_panel").show(ctx, |ui| {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.label("Neighbors");
            ui.spacing_mut().slider_width = ui.available_width() * 0.65;
            let response = ui.add(
                egui::Slider::new(&mut app.slider_k, app.controller.neighbor_range()).step_by(1.0),
            );
            app.handle_slider(ctx, SliderInput::from_response(&response));
        });

        ui.horizontal(|ui| {
            ui.label("Distance Metric:");
            for metric in DistanceMetric::ALL {
                ui.radio_value(&mut app.selected_metric, metric, metric.description());
            }
        });
        app.handle_metric(ctx);

        ui.horizontal(|ui| {
            for layer in Layer::ALL {
                ui.colored_label(SmoteApp::layer_color(layer), app.controller.legend_entry(layer));
            }
        });
        if let Some(err) = app.controller.last_error() {
            ui.colored_label(Color32::RED, format!("Error: {err}"));
        }
        ui.add_space(4.0);
    });
}

/// Draws the central panel containing the scatter plot.
pub fn draw_plot_panel(app: &SmoteApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let text_color = ui.visuals().text_color();
        let legend_fill = ui.visuals().window_fill;
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
        let outer = response.rect;
        let plot_rect = Rect::from_min_max(
            Pos2::new(outer.left() + 56.0, outer.top() + 34.0),
            Pos2::new(outer.right() - 16.0, outer.bottom() - 42.0),
        );

        // Flipped vertically so larger y values are drawn higher up.
        let bounds = app.controller.bounds();
        let data_rect = Rect::from_min_max(
            Pos2::new(bounds.min_x as f32, bounds.max_y as f32),
            Pos2::new(bounds.max_x as f32, bounds.min_y as f32),
        );
        let to_screen = RectTransform::from_to(data_rect, plot_rect);

        painter.text(
            Pos2::new(plot_rect.center().x, outer.top() + 8.0),
            Align2::CENTER_TOP,
            TITLE,
            FontId::proportional(16.0),
            text_color,
        );
        draw_axes(&painter, plot_rect, &bounds, &to_screen, text_color);

        for layer in Layer::ALL {
            let color = SmoteApp::layer_color(layer);
            for (x, y) in app.controller.layer(layer).iter().filter_map(DataPoint::xy) {
                if !bounds.contains(x, y) {
                    continue;
                }
                let center = to_screen * Pos2::new(x as f32, y as f32);
                draw_marker(&painter, layer, center, color);
            }
        }

        draw_legend(app, &painter, plot_rect, text_color, legend_fill);
    });
}

fn draw_marker(painter: &Painter, layer: Layer, center: Pos2, color: Color32) {
    match layer {
        Layer::Majority | Layer::Minority => {
            painter.circle_filled(center, MARKER_SIZE, color);
        }
        Layer::Synthesized => {
            let stroke = Stroke::new(1.5, color);
            let s = MARKER_SIZE;
            painter.line_segment(
                [Pos2::new(center.x - s, center.y - s), Pos2::new(center.x + s, center.y + s)],
                stroke,
            );
            painter.line_segment(
                [Pos2::new(center.x - s, center.y + s), Pos2::new(center.x + s, center.y - s)],
                stroke,
            );
        }
    }
}

fn draw_axes(
    painter: &Painter,
    plot_rect: Rect,
    bounds: &PlotBounds,
    to_screen: &RectTransform,
    color: Color32,
) {
    let stroke = Stroke::new(1.0, color);
    let corners = [
        plot_rect.left_top(),
        plot_rect.right_top(),
        plot_rect.right_bottom(),
        plot_rect.left_bottom(),
    ];
    for i in 0..corners.len() {
        painter.line_segment([corners[i], corners[(i + 1) % corners.len()]], stroke);
    }

    let font = FontId::proportional(12.0);
    let x_step = tick_step(bounds.max_x - bounds.min_x);
    for x in ticks(bounds.min_x, bounds.max_x, x_step) {
        let at = *to_screen * Pos2::new(x as f32, bounds.min_y as f32);
        painter.line_segment([at, Pos2::new(at.x, at.y + 4.0)], stroke);
        painter.text(
            Pos2::new(at.x, at.y + 6.0),
            Align2::CENTER_TOP,
            format_tick(x, x_step),
            font.clone(),
            color,
        );
    }
    let y_step = tick_step(bounds.max_y - bounds.min_y);
    for y in ticks(bounds.min_y, bounds.max_y, y_step) {
        let at = *to_screen * Pos2::new(bounds.min_x as f32, y as f32);
        painter.line_segment([at, Pos2::new(at.x - 4.0, at.y)], stroke);
        painter.text(
            Pos2::new(at.x - 6.0, at.y),
            Align2::RIGHT_CENTER,
            format_tick(y, y_step),
            font.clone(),
            color,
        );
    }

    painter.text(
        Pos2::new(plot_rect.center().x, plot_rect.bottom() + 22.0),
        Align2::CENTER_TOP,
        "X1",
        FontId::proportional(14.0),
        color,
    );
    painter.text(
        Pos2::new(plot_rect.left() - 52.0, plot_rect.center().y),
        Align2::LEFT_CENTER,
        "X2",
        FontId::proportional(14.0),
        color,
    );
}

/// Legend in the upper-left corner of the plot, one row per layer.
fn draw_legend(app: &SmoteApp, painter: &Painter, plot_rect: Rect, text_color: Color32, fill: Color32) {
    let row_height = 20.0;
    let origin = plot_rect.left_top() + egui::vec2(8.0, 8.0);
    let size = egui::vec2(180.0, row_height * Layer::ALL.len() as f32 + 8.0);
    let frame = [
        origin,
        origin + egui::vec2(size.x, 0.0),
        origin + size,
        origin + egui::vec2(0.0, size.y),
    ];
    painter.add(Shape::convex_polygon(
        frame.to_vec(),
        fill,
        Stroke::new(1.0, text_color.linear_multiply(0.4)),
    ));

    for (row, layer) in Layer::ALL.into_iter().enumerate() {
        let y = origin.y + 4.0 + row_height * (row as f32 + 0.5);
        draw_marker(painter, layer, Pos2::new(origin.x + 14.0, y), SmoteApp::layer_color(layer));
        painter.text(
            Pos2::new(origin.x + 28.0, y),
            Align2::LEFT_CENTER,
            app.controller.legend_entry(layer),
            FontId::proportional(13.0),
            text_color,
        );
    }
}

/// A "nice" tick spacing (1, 2 or 5 times a power of ten) giving about eight ticks.
fn tick_step(span: f64) -> f64 {
    if !span.is_finite() || span <= 0.0 {
        return 1.0;
    }
    let raw = span / 8.0;
    let magnitude = 10_f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized < 1.5 {
        1.0
    } else if normalized < 3.0 {
        2.0
    } else if normalized < 7.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Multiples of `step` inside `[min, max]`.
fn ticks(min: f64, max: f64, step: f64) -> Vec<f64> {
    if !(min.is_finite() && max.is_finite()) || step <= 0.0 || min > max {
        return Vec::new();
    }
    let first = (min / step).ceil();
    let last = (max / step).floor();
    let mut ticks = Vec::new();
    let mut i = first;
    while i <= last {
        ticks.push(i * step);
        i += 1.0;
    }
    ticks
}

fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 {
        0
    } else {
        (-step.log10()).ceil() as usize
    };
    // Avoid printing "-0".
    let value = if value.abs() < step * 1e-9 { 0.0 } else { value };
    format!("{value:.decimals$}")
}
