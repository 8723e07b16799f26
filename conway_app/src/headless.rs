// headless.rs - Run a session on a tokio timer with no window

use std::fmt::Write as _;
use std::time::Instant;

use conway_core::{CellChange, Grid, Renderer, Session, SessionConfig};

/// Logs each generation and remembers the latest board.
#[derive(Debug, Default)]
pub struct TraceRenderer {
    pub frames: u64,
    pub last_live: usize,
    pub last_grid: Option<Grid>,
}

impl Renderer for TraceRenderer {
    fn on_cells_changed(&mut self, cells: &[CellChange]) {
        tracing::trace!(changed = cells.len(), "cells edited");
    }

    fn on_generation_computed(&mut self, grid: &Grid, live_count: usize) {
        self.frames += 1;
        self.last_live = live_count;
        self.last_grid = Some(grid.clone());
        tracing::debug!(frame = self.frames, live = live_count, "frame");
    }
}

#[derive(Debug)]
pub struct Summary {
    pub generation: u64,
    pub live: usize,
    pub extinct: bool,
    pub board: Option<Grid>,
}

/// `#` for live cells, `.` for dead, one line per row.
pub fn board_to_text(grid: &Grid) -> String {
    let mut out = String::with_capacity(grid.rows() * (grid.cols() + 1));
    for row in 0..grid.rows() {
        for &alive in grid.row(row) {
            out.push(if alive { '#' } else { '.' });
        }
        let _ = writeln!(out);
    }
    out
}

/// Step until the board dies, `limit` generations have run, or Ctrl-C.
pub async fn run(config: SessionConfig, limit: Option<u64>, concurrent: bool) -> anyhow::Result<Summary> {
    let session = Session::new(&config, TraceRenderer::default());
    tracing::info!(rows = config.rows, cols = config.cols, live = session.grid().live_count(), "headless run started");
    drive(session, limit, concurrent).await
}

async fn drive(
    mut session: Session<TraceRenderer>,
    limit: Option<u64>,
    concurrent: bool,
) -> anyhow::Result<Summary> {
    session.start();

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    while let Some(due) = session.next_due() {
        if limit.is_some_and(|limit| session.generation() >= limit) {
            session.stop();
            break;
        }
        tokio::select! {
            _ = tokio::time::sleep_until(tokio::time::Instant::from_std(due)) => {
                let now = Instant::now();
                if concurrent {
                    session.poll_concurrent(now).await;
                } else {
                    session.poll(now);
                }
            }
            res = &mut shutdown => {
                res?;
                tracing::info!("interrupted");
                session.stop();
            }
        }
    }

    let live = session.grid().live_count();
    let generation = session.generation();
    tracing::info!(generation, live, "headless run finished");
    let renderer = session.into_renderer();
    Ok(Summary { generation, live, extinct: live == 0, board: renderer.last_grid })
}
