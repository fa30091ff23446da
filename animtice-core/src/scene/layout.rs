use kurbo::{Point, Rect, Vec2};

use crate::scene::visual::Visual;

/// Where lesson titles and step prompts sit, just under the top edge.
pub const BANNER_POINT: Point = Point::new(0.0, 3.4);

/// Default gap between an object and its neighbor.
pub const DEFAULT_BUFF: f64 = 0.25;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn unit(self) -> Vec2 {
        match self {
            Self::Up => Vec2::new(0.0, 1.0),
            Self::Down => Vec2::new(0.0, -1.0),
            Self::Left => Vec2::new(-1.0, 0.0),
            Self::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// Place `visual` beside `anchor` in `dir`, `buff` units away, centered on the other axis.
pub fn next_to(visual: Visual, anchor: Rect, dir: Direction, buff: f64) -> Visual {
    let b = visual.bounds();
    let c = anchor.center();
    let to = match dir {
        Direction::Up => Point::new(c.x, anchor.y1 + buff + b.height() / 2.0),
        Direction::Down => Point::new(c.x, anchor.y0 - buff - b.height() / 2.0),
        Direction::Left => Point::new(anchor.x0 - buff - b.width() / 2.0, c.y),
        Direction::Right => Point::new(anchor.x1 + buff + b.width() / 2.0, c.y),
    };
    visual.moved_to(to)
}

pub fn union_bounds(items: &[Visual]) -> Option<Rect> {
    items
        .iter()
        .map(Visual::bounds)
        .reduce(|acc, r| acc.union(r))
}

/// Lay items out left to right with `gap` between bounding boxes, the row centered on `center`.
pub fn arrange_row(items: Vec<Visual>, center: Point, gap: f64) -> Vec<Visual> {
    let widths: Vec<f64> = items.iter().map(|v| v.bounds().width()).collect();
    let total = widths.iter().sum::<f64>() + gap * (items.len().saturating_sub(1)) as f64;
    let mut x = center.x - total / 2.0;
    items
        .into_iter()
        .zip(widths)
        .map(|(v, w)| {
            let placed = v.moved_to(Point::new(x + w / 2.0, center.y));
            x += w + gap;
            placed
        })
        .collect()
}

/// Lay items out top to bottom with `gap` between bounding boxes, the column centered on `center`.
pub fn arrange_column(items: Vec<Visual>, center: Point, gap: f64) -> Vec<Visual> {
    let heights: Vec<f64> = items.iter().map(|v| v.bounds().height()).collect();
    let total = heights.iter().sum::<f64>() + gap * (items.len().saturating_sub(1)) as f64;
    let mut y = center.y + total / 2.0;
    items
        .into_iter()
        .zip(heights)
        .map(|(v, h)| {
            let placed = v.moved_to(Point::new(center.x, y - h / 2.0));
            y -= h + gap;
            placed
        })
        .collect()
}

/// Cell centers of a `rows x cols` grid, row-major from the top-left cell.
pub fn grid_points(rows: usize, cols: usize, center: Point, dx: f64, dy: f64) -> Vec<Point> {
    let x0 = center.x - dx * (cols.saturating_sub(1)) as f64 / 2.0;
    let y0 = center.y + dy * (rows.saturating_sub(1)) as f64 / 2.0;
    (0..rows)
        .flat_map(|r| {
            (0..cols).map(move |c| Point::new(x0 + dx * c as f64, y0 - dy * r as f64))
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/scene/layout.rs"]
mod tests;
