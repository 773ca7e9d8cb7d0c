use rand::Rng;
use rand::seq::SliceRandom;

use crate::geometry::{Point, Segment};

// Up, down, left, right as (row, col) steps.
const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Row-major wall/open grid. Odd cells are rooms, even cells the walls
/// between them; carving starts in the room at (1, 1).
pub struct Maze {
    rows: usize,
    cols: usize,
    open: Vec<bool>,
}

struct Visit {
    row: usize,
    col: usize,
    dirs: [(isize, isize); 4],
    next: usize,
}

impl Maze {
    /// Carves a fresh maze with a randomized depth-first backtracker.
    ///
    /// The traversal is the recursive one (shuffle the four directions, carve
    /// into each unvisited room two cells away, descend before trying the next
    /// direction) run on an explicit stack, so grid size never touches the
    /// call stack.
    pub fn generate<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Self {
        let mut maze = Self {
            rows,
            cols,
            open: vec![false; rows * cols],
        };
        if rows < 3 || cols < 3 {
            return maze;
        }

        maze.set_open(1, 1);
        let mut stack = vec![Visit::new(1, 1, &mut *rng)];
        while let Some(top) = stack.last_mut() {
            if top.next == top.dirs.len() {
                stack.pop();
                continue;
            }
            let (dr, dc) = top.dirs[top.next];
            top.next += 1;
            let (row, col) = (top.row, top.col);

            let Some((nr, nc)) = maze.offset(row, col, 2 * dr, 2 * dc) else {
                continue;
            };
            if maze.is_open(nr, nc) {
                continue;
            }

            let (wr, wc) = ((row as isize + dr) as usize, (col as isize + dc) as usize);
            maze.set_open(wr, wc);
            maze.set_open(nr, nc);
            stack.push(Visit::new(nr, nc, &mut *rng));
        }

        maze
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn is_open(&self, row: usize, col: usize) -> bool {
        self.open[row * self.cols + col]
    }

    pub fn open_count(&self) -> usize {
        self.open.iter().filter(|&&o| o).count()
    }

    #[inline]
    fn set_open(&mut self, row: usize, col: usize) {
        self.open[row * self.cols + col] = true;
    }

    fn offset(&self, row: usize, col: usize, dr: isize, dc: isize) -> Option<(usize, usize)> {
        let r = row as isize + dr;
        let c = col as isize + dc;
        if r < 0 || c < 0 || r >= self.rows as isize || c >= self.cols as isize {
            return None;
        }
        Some((r as usize, c as usize))
    }

    /// Wall segments scaled to a `width x height` canvas.
    ///
    /// Only the faces of walled cells that border an open cell are emitted
    /// (top, left, right, bottom), so a wall shared by two solid cells is
    /// never drawn or tested.
    pub fn segments(&self, width: f32, height: f32) -> Vec<Segment> {
        let mut out = Vec::new();
        if self.rows == 0 || self.cols == 0 {
            return out;
        }
        let cw = width / self.cols as f32;
        let ch = height / self.rows as f32;

        for i in 0..self.rows {
            for j in 0..self.cols {
                if self.is_open(i, j) {
                    continue;
                }
                let x1 = j as f32 * cw;
                let y1 = i as f32 * ch;
                let x2 = (j + 1) as f32 * cw;
                let y2 = (i + 1) as f32 * ch;

                if i > 0 && self.is_open(i - 1, j) {
                    out.push(Segment::new(Point::new(x1, y1), Point::new(x2, y1)));
                }
                if j > 0 && self.is_open(i, j - 1) {
                    out.push(Segment::new(Point::new(x1, y1), Point::new(x1, y2)));
                }
                if j + 1 < self.cols && self.is_open(i, j + 1) {
                    out.push(Segment::new(Point::new(x2, y1), Point::new(x2, y2)));
                }
                if i + 1 < self.rows && self.is_open(i + 1, j) {
                    out.push(Segment::new(Point::new(x1, y2), Point::new(x2, y2)));
                }
            }
        }
        out
    }
}

impl Visit {
    fn new<R: Rng + ?Sized>(row: usize, col: usize, rng: &mut R) -> Self {
        let mut dirs = DIRECTIONS;
        dirs.shuffle(rng);
        Self {
            row,
            col,
            dirs,
            next: 0,
        }
    }
}
