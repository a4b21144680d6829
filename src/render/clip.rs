//! Guard-band clipping ahead of rasterization.
//!
//! raqote converts edges to 16.16 fixed point, so an edge spanning more than about
//! 32k pixels overflows. Ways routinely reach far beyond the extract bounds, and
//! export scaling stretches them further, so every outline is cut down to a window
//! around the canvas first. Fills are clipped as polygons (Sutherland-Hodgman),
//! strokes segment by segment (Liang-Barsky).

use super::surface::Outline;

/// Widest span the rasterizer's fixed-point edge arithmetic holds, with some slack
/// for stroke widths.
const MAX_RASTER_SPAN: f64 = 32_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipWindow {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

#[derive(Debug, Clone, Copy)]
enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl ClipWindow {
    /// The canvas grown by its longest side on every edge, capped to what raqote can
    /// rasterize.
    pub fn guard_band(width: u32, height: u32) -> Self {
        let (width, height) = (f64::from(width), f64::from(height));
        let side = width.max(height);
        let guard = side.min((MAX_RASTER_SPAN - side) / 2.0).max(1.0);
        ClipWindow {
            min_x: -guard,
            min_y: -guard,
            max_x: width + guard,
            max_y: height + guard,
        }
    }

    pub fn contains(&self, (x, y): (f64, f64)) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }

    /// Clips every subpath as a closed polygon. The fill rule is kept, which holds
    /// for even-odd as well since the window is convex.
    pub fn clip_fill(&self, outline: &Outline) -> Outline {
        let mut clipped = Outline::new(outline.fill_rule());
        for subpath in outline.subpaths() {
            let points = finite(subpath.points);
            let polygon = if points.iter().all(|&point| self.contains(point)) {
                points
            } else {
                self.clip_polygon(&points)
            };
            if polygon.len() >= 3 {
                clipped.trace(&polygon);
                clipped.close();
            }
        }
        clipped
    }

    /// Clips every subpath as a polyline. A subpath that leaves and re-enters the window
    /// becomes several.
    pub fn clip_stroke(&self, outline: &Outline) -> Outline {
        let mut clipped = Outline::new(outline.fill_rule());
        for subpath in outline.subpaths() {
            let mut points = finite(subpath.points);
            if points.iter().all(|&point| self.contains(point)) {
                clipped.trace(&points);
                if subpath.closed {
                    clipped.close();
                }
                continue;
            }
            if subpath.closed {
                if let Some(&first) = points.first() {
                    points.push(first);
                }
            }
            for run in self.clip_polyline(&points) {
                clipped.trace(&run);
            }
        }
        clipped
    }

    fn clip_polygon(&self, points: &[(f64, f64)]) -> Vec<(f64, f64)> {
        let mut polygon = points.to_vec();
        for edge in [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom] {
            let Some(&last) = polygon.last() else {
                break;
            };
            let input = std::mem::take(&mut polygon);
            let mut previous = last;
            for current in input {
                match (self.inside(edge, previous), self.inside(edge, current)) {
                    (true, true) => polygon.push(current),
                    (true, false) => polygon.push(self.intersect(edge, previous, current)),
                    (false, true) => {
                        polygon.push(self.intersect(edge, previous, current));
                        polygon.push(current);
                    }
                    (false, false) => (),
                }
                previous = current;
            }
        }
        polygon
    }

    fn clip_polyline(&self, points: &[(f64, f64)]) -> Vec<Vec<(f64, f64)>> {
        let mut runs = Vec::new();
        let mut run: Vec<(f64, f64)> = Vec::new();
        for pair in points.windows(2) {
            let Some((start, end)) = self.clip_segment(pair[0], pair[1]) else {
                continue;
            };
            if run.last() != Some(&start) {
                if run.len() >= 2 {
                    runs.push(std::mem::take(&mut run));
                }
                run = vec![start];
            }
            run.push(end);
        }
        if run.len() >= 2 {
            runs.push(run);
        }
        runs
    }

    /// Liang-Barsky: the part of `a`..`b` inside the window, if any.
    fn clip_segment(&self, a: (f64, f64), b: (f64, f64)) -> Option<((f64, f64), (f64, f64))> {
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
        let limits = [
            (-dx, a.0 - self.min_x),
            (dx, self.max_x - a.0),
            (-dy, a.1 - self.min_y),
            (dy, self.max_y - a.1),
        ];
        for (p, q) in limits {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let t = q / p;
            if p < 0.0 {
                t0 = t0.max(t);
            } else {
                t1 = t1.min(t);
            }
            if t0 > t1 {
                return None;
            }
        }

        let at = |t: f64| {
            if t == 0.0 {
                a
            } else if t == 1.0 {
                b
            } else {
                (a.0 + t * dx, a.1 + t * dy)
            }
        };
        Some((at(t0), at(t1)))
    }

    fn inside(&self, edge: Edge, (x, y): (f64, f64)) -> bool {
        match edge {
            Edge::Left => x >= self.min_x,
            Edge::Right => x <= self.max_x,
            Edge::Top => y >= self.min_y,
            Edge::Bottom => y <= self.max_y,
        }
    }

    /// Where `a`..`b` crosses `edge`. Only called with one end on each side.
    fn intersect(&self, edge: Edge, a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
        let across_x = |x: f64| (x, a.1 + (x - a.0) / (b.0 - a.0) * (b.1 - a.1));
        let across_y = |y: f64| (a.0 + (y - a.1) / (b.1 - a.1) * (b.0 - a.0), y);
        match edge {
            Edge::Left => across_x(self.min_x),
            Edge::Right => across_x(self.max_x),
            Edge::Top => across_y(self.min_y),
            Edge::Bottom => across_y(self.max_y),
        }
    }
}

fn finite(mut points: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    points.retain(|(x, y)| x.is_finite() && y.is_finite());
    points
}
