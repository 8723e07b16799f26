// app.rs - egui front end: paints the BoardView and feeds input to the session

use eframe::egui;
use egui::{Color32, Key, Pos2, Rect, Stroke, Vec2};
use std::time::{Duration, Instant};

use conway_core::patterns::PATTERNS;
use conway_core::{AppConfig, CellCoord, Command, DisplayConfig, InputEvent, InputMapper, Outcome, Session};

use crate::view::BoardView;

const KEY_BINDINGS: &[(Key, char)] = &[
    (Key::Space, ' '),
    (Key::C, 'c'),
    (Key::R, 'r'),
    (Key::N, 'n'),
    (Key::G, 'g'),
];

pub fn run(config: AppConfig) -> anyhow::Result<()> {
    let pitch = config.display.cell_size + config.display.spacing;
    let width = (config.session.cols as f32 * pitch + 40.0).max(640.0);
    let height = config.session.rows as f32 * pitch + 260.0;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width, height]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |_cc| Box::new(LifeApp::new(config))),
    )
    .map_err(|err| anyhow::anyhow!("window closed with error: {err}"))
}

/// Cell under `pos` on a board drawn from `origin`, or `None` when the
/// pointer is off the board.
fn cell_at(origin: Pos2, pos: Pos2, display: &DisplayConfig, rows: usize, cols: usize) -> Option<CellCoord> {
    let pitch = display.cell_size + display.spacing;
    let size = Vec2::new(pitch * cols as f32 - display.spacing, pitch * rows as f32 - display.spacing);
    if !Rect::from_min_size(origin, size).contains(pos) {
        return None;
    }
    let row = (((pos.y - origin.y) / pitch).floor() as usize).min(rows - 1);
    let col = (((pos.x - origin.x) / pitch).floor() as usize).min(cols - 1);
    Some(CellCoord::new(row, col))
}

pub struct LifeApp {
    session: Session<BoardView>,
    input: InputMapper,
    display: DisplayConfig,
    live_color: Color32,
    dead_color: Color32,
    selected_pattern: usize,
}

impl LifeApp {
    pub fn new(config: AppConfig) -> Self {
        let view = BoardView::new(config.session.rows, config.session.cols);
        let [lr, lg, lb] = config.display.live_color;
        let [dr, dg, db] = config.display.dead_color;
        Self {
            session: Session::new(&config.session, view),
            input: InputMapper::new(),
            live_color: Color32::from_rgb(lr, lg, lb),
            dead_color: Color32::from_rgb(dr, dg, db),
            display: config.display,
            selected_pattern: 0,
        }
    }

    fn dispatch(&mut self, event: InputEvent) {
        if self.input.handle(&mut self.session, event) == Outcome::ToggleGridLines {
            self.display.grid_lines = !self.display.grid_lines;
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let button_text = if self.session.is_running() { "⏸ Pause" } else { "▶ Start" };
            if ui.button(button_text).clicked() {
                self.dispatch(InputEvent::Command(Command::ToggleRun));
            }

            if ui.add_enabled(!self.session.is_running(), egui::Button::new("⏭ Step")).clicked() {
                self.dispatch(InputEvent::Command(Command::Step));
            }

            if ui.button("⏹ Clear").clicked() {
                self.dispatch(InputEvent::Command(Command::Clear));
            }

            if ui.button("🎲 Random").clicked() {
                self.dispatch(InputEvent::Command(Command::Randomize));
            }

            ui.separator();

            ui.label("Pattern:");
            egui::ComboBox::from_id_source("pattern_selector")
                .selected_text(PATTERNS[self.selected_pattern].name)
                .show_ui(ui, |ui| {
                    for (i, pattern) in PATTERNS.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                    }
                });

            if ui.button("Apply Pattern").clicked() {
                self.session.load_pattern(&PATTERNS[self.selected_pattern]);
            }

            ui.separator();

            ui.label(format!("Generation: {}", self.session.generation()));
        });

        ui.separator();

        ui.horizontal(|ui| {
            ui.label("Speed:");
            let mut speed = 1000.0 / self.session.interval().as_millis().max(1) as f32;
            if ui.add(egui::Slider::new(&mut speed, 0.5..=90.0).suffix(" gen/sec")).changed() {
                let millis = ((1000.0 / speed) as u64).max(1);
                self.session.set_interval(Duration::from_millis(millis));
            }

            ui.separator();

            ui.label("Live:");
            ui.color_edit_button_srgba(&mut self.live_color);
            ui.label("Dead:");
            ui.color_edit_button_srgba(&mut self.dead_color);
            ui.checkbox(&mut self.display.grid_lines, "Grid lines");
        });
    }

    fn board(&mut self, ui: &mut egui::Ui) {
        let box_size = self.display.cell_size;
        let spacing = self.display.spacing;
        let (rows, cols) = {
            let view = self.session.renderer();
            (view.rows(), view.cols())
        };

        let start_pos = ui.cursor().min;
        let total_size = Vec2::new(
            (box_size + spacing) * cols as f32 - spacing,
            (box_size + spacing) * rows as f32 - spacing,
        );

        let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click_and_drag());

        painter.rect_filled(
            Rect::from_min_size(start_pos, total_size),
            0.0,
            Color32::BLACK,
        );

        let view = self.session.renderer();
        for row in 0..rows {
            for col in 0..cols {
                let x = start_pos.x + col as f32 * (box_size + spacing);
                let y = start_pos.y + row as f32 * (box_size + spacing);
                let rect = Rect::from_min_size(egui::pos2(x, y), Vec2::splat(box_size));

                let cell_color = if view.is_alive(row, col) { self.live_color } else { self.dead_color };
                painter.rect_filled(rect, 1.0, cell_color);

                if self.display.grid_lines {
                    painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
                }
            }
        }

        // Pointer: click flips, drag paints alive. Off-board positions hit nothing.
        let display = &self.display;
        let to_cell = |pos: Pos2| cell_at(start_pos, pos, display, rows, cols);
        let hovered = response.interact_pointer_pos().and_then(to_cell);
        // drag_started fires past the movement threshold; paint from where the button went down.
        let pressed = ui
            .ctx()
            .input(|i| i.pointer.press_origin())
            .and_then(to_cell)
            .or(hovered);

        let event = if response.clicked() {
            hovered.map(InputEvent::Click)
        } else if response.drag_started() {
            pressed.map(InputEvent::Press)
        } else if response.dragged() {
            hovered.map(InputEvent::Hover)
        } else {
            None
        };
        if let Some(event) = event {
            self.dispatch(event);
        }
        if response.drag_released() {
            self.dispatch(InputEvent::Release);
        }
    }
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.session.poll(Instant::now());

        let commands: Vec<Command> = ctx.input(|i| {
            KEY_BINDINGS
                .iter()
                .filter(|(key, _)| i.key_pressed(*key))
                .filter_map(|&(_, ch)| Command::from_key(ch))
                .collect()
        });
        for command in commands {
            self.dispatch(InputEvent::Command(command));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");

            self.controls(ui);

            ui.separator();

            ui.label("Click cells to toggle them, drag to paint. Space: start/pause, N: step, R: random, C: clear, G: grid lines.");

            ui.separator();

            self.board(ui);

            ui.separator();

            let view = self.session.renderer();
            let total = view.rows() * view.cols();
            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {}", view.live_count()));
                ui.label(format!("Dead cells: {}", total - view.live_count()));
                ui.label(format!("Population: {:.1}%", view.population() * 100.0));
                if self.session.cycle_detected() {
                    ui.label("(repeating)");
                }
            });
        });

        // Wake up for the next step while running.
        if let Some(due) = self.session.next_due() {
            ctx.request_repaint_after(due.saturating_duration_since(Instant::now()));
        }
    }
}
