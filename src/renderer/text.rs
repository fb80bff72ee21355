//! Terminal rendering
//!
//! Projects the arena onto a fixed grid of character cells. `draw` is a pure
//! function of the frame; `render` only writes its output.

use std::io::Write;

use crate::host::{Frame, Renderer};
use crate::sim::Config;

pub struct TextRenderer<W: Write> {
    out: W,
    cols: usize,
    rows: usize,
    arena_width: f32,
    arena_height: f32,
    paddle_height: f32,
    ball_size: f32,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, config: &Config, cols: usize, rows: usize) -> Self {
        Self {
            out,
            cols: cols.max(8),
            rows: rows.max(4),
            arena_width: config.arena_width,
            arena_height: config.arena_height,
            paddle_height: config.paddle_height,
            ball_size: config.ball_size,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn col(&self, x: f32) -> usize {
        let c = (x / self.arena_width * self.cols as f32).floor();
        (c.max(0.0) as usize).min(self.cols - 1)
    }

    fn row(&self, y: f32) -> usize {
        let r = (y / self.arena_height * self.rows as f32).floor();
        (r.max(0.0) as usize).min(self.rows - 1)
    }

    /// Last row touched by a span ending at `y`
    fn row_end(&self, y: f32) -> usize {
        let r = (y / self.arena_height * self.rows as f32).ceil();
        (r.max(1.0) as usize - 1).min(self.rows - 1)
    }

    /// Paint the frame: a status line, then the arena between two rules
    pub fn draw(&self, frame: &Frame) -> String {
        let mut grid = vec![vec![' '; self.cols]; self.rows];

        let net = self.cols / 2;
        for (r, row) in grid.iter_mut().enumerate() {
            if r % 2 == 0 {
                row[net] = ':';
            }
        }

        for (y, col) in [(frame.left_y, 0), (frame.right_y, self.cols - 1)] {
            let top = self.row(y);
            let bottom = self.row_end(y + self.paddle_height).max(top);
            for row in grid.iter_mut().take(bottom + 1).skip(top) {
                row[col] = '|';
            }
        }

        // Ball is only drawn while it is inside the arena
        let center_x = frame.ball.x + self.ball_size / 2.0;
        let center_y = frame.ball.y + self.ball_size / 2.0;
        if (0.0..self.arena_width).contains(&center_x) {
            grid[self.row(center_y)][self.col(center_x)] = 'o';
        }

        let rule = "-".repeat(self.cols);
        let mut out = String::with_capacity((self.cols + 1) * (self.rows + 3));
        out.push_str(&format!(
            "{:>w$} : {:<w$}  {}\n",
            frame.score.left,
            frame.score.right,
            frame.status(),
            w = net.saturating_sub(2).max(1)
        ));
        out.push_str(&rule);
        out.push('\n');
        for row in grid {
            out.extend(row);
            out.push('\n');
        }
        out.push_str(&rule);
        out.push('\n');
        out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, frame: &Frame) {
        let text = self.draw(frame);
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            log::warn!("Render error: {:?}", e);
        }
    }
}
