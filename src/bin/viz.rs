use std::collections::VecDeque;

use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints, Points};
use nalgebra::Vector3;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use dock_sim::input::{Key, KeyDisposition};
use dock_sim::sim::{KeyboardPilot, Pilot, Session, SessionConfig};
use dock_sim::telemetry::{HudReadout, Telemetry};
use dock_sim::vehicle::presets;

const TRAIL_LEN: usize = 2000;
const TRAIL_EVERY: u64 = 6;

fn main() -> eframe::Result {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dock_sim=info")))
        .init();

    let app = DockViz::new(Session::new(presets::tug(), SessionConfig::default()));
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    tracing::info!("controls: WASD/RF translate, IJKL/QE rotate, SPACE kill rot, X kill vel, SHIFT precision");
    eframe::run_native("DOCK - Space Docking Simulator", options, Box::new(|_| Ok(Box::new(app))))
        .inspect_err(|e| tracing::error!("Fatal error: {e}"))
}

/// egui key → flight key. Shift arrives as modifier state, not as a key.
fn map_key(key: egui::Key) -> Option<Key> {
    let k = match key {
        egui::Key::W => Key::W,
        egui::Key::S => Key::S,
        egui::Key::A => Key::A,
        egui::Key::D => Key::D,
        egui::Key::R => Key::R,
        egui::Key::F => Key::F,
        egui::Key::I => Key::I,
        egui::Key::K => Key::K,
        egui::Key::J => Key::J,
        egui::Key::L => Key::L,
        egui::Key::Q => Key::Q,
        egui::Key::E => Key::E,
        egui::Key::Space => Key::Space,
        egui::Key::X => Key::X,
        _ => return None,
    };
    Some(k)
}

fn tier_color(t: &Telemetry) -> egui::Color32 {
    let [r, g, b] = t.closure_tier().rgb();
    egui::Color32::from_rgb(r, g, b)
}

struct DockViz {
    session: Session,
    pilot: KeyboardPilot,
    trail: VecDeque<[f64; 2]>,
}

impl DockViz {
    fn new(session: Session) -> Self {
        Self { session, pilot: KeyboardPilot::new(), trail: VecDeque::with_capacity(TRAIL_LEN) }
    }

    fn record_trail(&mut self, t: &Telemetry) {
        if self.session.frames() % TRAIL_EVERY != 0 {
            return;
        }
        if self.trail.len() == TRAIL_LEN {
            self.trail.pop_front();
        }
        self.trail.push_back([t.position.x, t.position.z]);
    }
}

impl eframe::App for DockViz {
    fn raw_input_hook(&mut self, _ctx: &egui::Context, raw_input: &mut egui::RawInput) {
        if !raw_input.focused {
            // Key-up events are lost while unfocused.
            self.pilot.reset();
        }
        let sampler = self.pilot.sampler_mut();
        // Flight keys never reach egui widgets.
        raw_input.events.retain(|event| match event {
            egui::Event::Key { key, pressed, .. } => match map_key(*key) {
                Some(k) => sampler.handle_key(k, *pressed) == KeyDisposition::PassThrough,
                None => true,
            },
            _ => true,
        });
        sampler.handle_key(Key::ShiftLeft, raw_input.modifiers.shift);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.viewport().close_requested()) {
            self.pilot.sampler_mut().teardown();
        }

        let dt = ctx.input(|i| i.unstable_dt) as f64;
        let controls = self.pilot.control(&self.session.telemetry(), dt);
        let t = self.session.step(&controls, dt);
        self.record_trail(&t);
        let hud = HudReadout::from(&t);

        egui::TopBottomPanel::top("hud").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("DIST");
                ui.monospace(format!("{} m", hud.distance));
                ui.separator();
                ui.label("CLOSURE");
                ui.colored_label(tier_color(&t), egui::RichText::new(format!("{} m/s", hud.closure)).monospace());
                ui.separator();
                ui.label("VEL");
                ui.monospace(format!("{} m/s", hud.velocity));
                ui.separator();
                ui.label("ROT");
                ui.monospace(&hud.angular);
                if controls.precision {
                    ui.separator();
                    ui.colored_label(egui::Color32::LIGHT_BLUE, "PRECISION");
                }
            });
        });

        egui::SidePanel::right("help").show(ctx, |ui| {
            ui.heading("Controls");
            ui.label("W / S    forward / back");
            ui.label("A / D    left / right");
            ui.label("R / F    up / down");
            ui.label("I / K    pitch");
            ui.label("J / L    yaw");
            ui.label("Q / E    roll");
            ui.label("SPACE    kill rotation");
            ui.label("X        kill velocity");
            ui.label("SHIFT    precision (10%)");
            ui.separator();
            ui.label(format!("t = {:.1} s", self.session.elapsed()));
            ui.label(format!("speed {:.2} m/s", self.session.dynamics().speed()));
            ui.label(format!("spin {:.1} deg/s", self.session.dynamics().angular_speed_deg()));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label("Top-down (x, z), m");
            let station = self.session.station_position();
            let nose = t.position + t.orientation * -Vector3::z() * 10.0;
            let trail: PlotPoints = self.trail.iter().copied().collect();
            Plot::new("top_down")
                .data_aspect(1.0)
                .x_axis_label("x (m)")
                .show(ui, |plot_ui| {
                    plot_ui.line(Line::new("Trail", trail));
                    plot_ui.line(
                        Line::new("Heading", vec![[t.position.x, t.position.z], [nose.x, nose.z]])
                            .color(tier_color(&t)),
                    );
                    plot_ui.points(
                        Points::new("Station", vec![[station.x, station.z]])
                            .radius(6.0)
                            .color(egui::Color32::GRAY),
                    );
                    plot_ui.points(
                        Points::new("Ship", vec![[t.position.x, t.position.z]])
                            .radius(4.0)
                            .color(tier_color(&t)),
                    );
                });
        });

        ctx.request_repaint();
    }
}
