//! Conway's Game of Life on a toroidal grid.
//!
//! [`engine`] computes generations, [`session::Session`] runs them on a
//! timer and takes edits, and a [`render::Renderer`] supplied by the host
//! is told about every change.

pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod history;
pub mod input;
pub mod patterns;
pub mod render;
pub mod session;

pub use config::{AppConfig, DisplayConfig, SessionConfig};
pub use error::{LifeError, Result};
pub use grid::{CellCoord, Grid};
pub use input::{Command, InputEvent, InputMapper, Outcome};
pub use render::{CellChange, Renderer};
pub use session::{RunState, Session};
