// input.rs - Device events to session calls

use crate::grid::CellCoord;
use crate::render::Renderer;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleRun,
    Clear,
    Randomize,
    Step,
    ToggleGridLines,
}

impl Command {
    /// Keyboard bindings.
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            ' ' => Some(Self::ToggleRun),
            'c' => Some(Self::Clear),
            'r' => Some(Self::Randomize),
            'n' => Some(Self::Step),
            'g' => Some(Self::ToggleGridLines),
            _ => None,
        }
    }
}

/// Pointer positions arrive already wrapped onto the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Button went down over a cell; starts drag-painting.
    Press(CellCoord),
    /// Pointer moved over a cell.
    Hover(CellCoord),
    /// Button released.
    Release,
    /// Press and release on the same cell without dragging.
    Click(CellCoord),
    Command(Command),
}

/// What the caller has to act on after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Handled,
    Ignored,
    /// Cosmetic; the view owns grid lines.
    ToggleGridLines,
}

/// Tracks the held pointer button so drags paint cells alive instead of
/// toggling them.
#[derive(Debug, Default, Clone)]
pub struct InputMapper {
    painting: bool,
    last_painted: Option<CellCoord>,
    density: Option<f64>,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `death_probability` for the randomize command instead of the
    /// session's configured density.
    pub fn with_density(death_probability: f64) -> Self {
        Self { density: Some(death_probability), ..Self::default() }
    }

    pub fn is_painting(&self) -> bool {
        self.painting
    }

    pub fn handle<R: Renderer>(&mut self, session: &mut Session<R>, event: InputEvent) -> Outcome {
        match event {
            InputEvent::Press(coord) => {
                self.painting = true;
                self.paint(session, coord);
                Outcome::Handled
            }
            InputEvent::Hover(coord) if self.painting => {
                if self.last_painted == Some(coord) {
                    return Outcome::Ignored;
                }
                self.paint(session, coord);
                Outcome::Handled
            }
            InputEvent::Hover(_) => Outcome::Ignored,
            InputEvent::Release => {
                self.painting = false;
                self.last_painted = None;
                Outcome::Handled
            }
            InputEvent::Click(coord) => {
                session.flip_cell(coord.row, coord.col);
                Outcome::Handled
            }
            InputEvent::Command(command) => self.command(session, command),
        }
    }

    fn paint<R: Renderer>(&mut self, session: &mut Session<R>, coord: CellCoord) {
        session.set_cell(coord.row, coord.col, true);
        self.last_painted = Some(coord);
    }

    fn command<R: Renderer>(&mut self, session: &mut Session<R>, command: Command) -> Outcome {
        match command {
            Command::ToggleRun => session.toggle(),
            Command::Clear => session.clear(),
            Command::Randomize => {
                let density = self.density.unwrap_or_else(|| session.seed_density());
                session.randomize(density);
            }
            Command::Step => {
                if !session.step_once() {
                    return Outcome::Ignored;
                }
            }
            Command::ToggleGridLines => return Outcome::ToggleGridLines,
        }
        Outcome::Handled
    }
}
