// ui.rs - egui rendering and input for the simulation driver

use std::time::Instant;

use conway::schedule::{MAX_SPEED, MIN_SPEED};
use conway::{Driver, TickOutcome};
use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use tracing::{debug, warn};

use crate::LifeApp;

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Space)) {
            self.sim.on_start_stop();
        }

        // Auto-update if running
        if let Some(outcome) = self.sim.tick_if_due(Instant::now()) {
            if let TickOutcome::Settled(t) = outcome {
                debug!(generation = t.generation, "run settled");
            }
            ctx.request_repaint();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");

            // Controls
            ui.horizontal(|ui| {
                let button_text = if self.sim.is_running() { "⏸ Pause" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    self.sim.on_start_stop();
                }

                if ui.button("⏹ Clear").clicked() {
                    self.sim.clear();
                }

                if ui.button("🎲 Random").clicked() {
                    self.sim.randomize(self.next_seed, self.density);
                    self.next_seed = self.next_seed.wrapping_add(1);
                }

                ui.separator();

                let engine = self.sim.engine();
                ui.label(format!("Generation: {}", engine.generation()));
                ui.separator();
                ui.label(format!("Edges: {}", engine.edge_policy()));
            });

            ui.separator();

            // Speed control
            ui.horizontal(|ui| {
                ui.label("Speed:");
                let mut speed = self.sim.schedule().speed();
                let slider = egui::Slider::new(&mut speed, MIN_SPEED..=MAX_SPEED)
                    .logarithmic(true)
                    .suffix("x");
                if ui.add(slider).changed() {
                    self.sim.set_speed(speed);
                }
                let per_sec = 1.0 / self.sim.schedule().interval().as_secs_f64();
                ui.label(format!("{per_sec:.1} gen/sec"));

                ui.separator();

                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);
            });

            ui.separator();

            ui.label("Click cells to toggle them while paused.");
            ui.label("Space or Start/Pause runs the simulation.");

            ui.separator();

            let cell = self.sim.cell_size() as f32;
            let spacing = if cell > 3.0 { 1.0 } else { 0.0 };
            let (width, height) = self.sim.engine().dimensions();
            let total_size = Vec2::new(width as f32 * cell, height as f32 * cell);

            let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());
            let start_pos = response.rect.min;

            painter.rect_filled(response.rect, 0.0, Color32::BLACK);

            for (row, cells) in self.sim.engine().grid().rows().enumerate() {
                for (col, state) in cells.iter().enumerate() {
                    let rect = Rect::from_min_size(
                        start_pos + Vec2::new(col as f32 * cell, row as f32 * cell),
                        Vec2::splat(cell - spacing),
                    );
                    let color = if state.is_alive() { self.live_color } else { self.dead_color };
                    painter.rect_filled(rect, 1.0, color);
                    if spacing > 0.0 {
                        painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
                    }
                }
            }

            // Clicks while running are dropped by the driver
            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let local = pos - start_pos;
                    let (x, y) = (local.x.floor() as i32, local.y.floor() as i32);
                    if let Err(err) = self.sim.on_pixel_click(x, y) {
                        warn!(%err, x, y, "click outside the grid");
                    }
                }
            }

            ui.separator();

            // Statistics
            let total = self.sim.engine().grid().len();
            let live = self.sim.engine().population();
            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {live}"));
                ui.label(format!("Dead cells: {}", total - live));
                ui.label(format!("Population: {:.1}%", live as f32 / total as f32 * 100.0));
            });
        });

        if self.sim.is_running() {
            ctx.request_repaint();
        }
    }
}
