use raqote::{
    DrawOptions, DrawTarget, LineCap, LineJoin, Path, PathBuilder, SolidSource, Source, StrokeStyle,
    Winding,
};

use super::clip::ClipWindow;
use crate::errors::{Error, Result};
use crate::style::{CapStyle, Color, JoinStyle, StrokeEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(f32, f32),
    LineTo(f32, f32),
    Close,
}

/// One subpath of an [`Outline`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Subpath {
    pub points: Vec<(f64, f64)>,
    pub closed: bool,
}

/// Surface-independent path made of one or more subpaths.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outline {
    commands: Vec<PathCommand>,
    fill_rule: FillRule,
}

impl Outline {
    pub fn new(fill_rule: FillRule) -> Self {
        Outline {
            commands: Vec::new(),
            fill_rule,
        }
    }

    /// Open polyline through `points`.
    pub fn polyline(points: &[(f64, f64)]) -> Self {
        let mut outline = Outline::default();
        outline.trace(points);
        outline
    }

    /// Closed polygon through `points`.
    pub fn polygon(points: &[(f64, f64)]) -> Self {
        let mut outline = Outline::polyline(points);
        outline.close();
        outline
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::MoveTo(x as f32, y as f32));
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::LineTo(x as f32, y as f32));
    }

    pub fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }

    /// Starts a new subpath at the first point and draws lines through the rest.
    pub fn trace(&mut self, points: &[(f64, f64)]) {
        let Some((&(x0, y0), rest)) = points.split_first() else {
            return;
        };
        self.move_to(x0, y0);
        for &(x, y) in rest {
            self.line_to(x, y);
        }
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    pub fn subpath_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, PathCommand::MoveTo(..)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn subpaths(&self) -> Vec<Subpath> {
        let mut subpaths: Vec<Subpath> = Vec::new();
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(x, y) => subpaths.push(Subpath {
                    points: vec![(x.into(), y.into())],
                    closed: false,
                }),
                PathCommand::LineTo(x, y) => match subpaths.last_mut() {
                    Some(subpath) if !subpath.closed => subpath.points.push((x.into(), y.into())),
                    _ => subpaths.push(Subpath {
                        points: vec![(x.into(), y.into())],
                        closed: false,
                    }),
                },
                PathCommand::Close => {
                    if let Some(subpath) = subpaths.last_mut() {
                        subpath.closed = true;
                    }
                }
            }
        }
        subpaths
    }
}

/// What the compositor draws on.
pub trait RenderSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);
    fn fill_path(&mut self, outline: &Outline, color: Color);
    /// `stroke.width` is already in device pixels.
    fn stroke_path(&mut self, outline: &Outline, stroke: &StrokeEntry);
}

/// Offscreen raster surface, used for previews and exports alike.
pub struct RasterSurface {
    target: DrawTarget,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let invalid = || Error::InvalidCanvas {
            width: width.into(),
            height: height.into(),
        };
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        let target = DrawTarget::new(
            i32::try_from(width).map_err(|_| invalid())?,
            i32::try_from(height).map_err(|_| invalid())?,
        );
        Ok(RasterSurface { target })
    }

    /// Un-premultiplied color of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let index = y as usize * self.width() as usize + x as usize;
        self.target.get_data().get(index).copied().map(unpremultiply)
    }

    /// Pixels as tightly packed RGBA rows.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.target
            .get_data()
            .iter()
            .flat_map(|&argb| {
                let color = unpremultiply(argb);
                [color.r, color.g, color.b, color.a]
            })
            .collect()
    }

    /// Pixels as tightly packed RGB rows, alpha dropped.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.target
            .get_data()
            .iter()
            .flat_map(|&argb| {
                let color = unpremultiply(argb);
                [color.r, color.g, color.b]
            })
            .collect()
    }

    fn clip_window(&self) -> ClipWindow {
        ClipWindow::guard_band(self.width(), self.height())
    }

    /// Expects an outline already clipped to [`RasterSurface::clip_window`].
    fn to_path(outline: &Outline) -> Path {
        let mut builder = PathBuilder::new();
        for command in outline.commands() {
            match *command {
                PathCommand::MoveTo(x, y) => builder.move_to(x, y),
                PathCommand::LineTo(x, y) => builder.line_to(x, y),
                PathCommand::Close => builder.close(),
            }
        }
        let mut path = builder.finish();
        path.winding = match outline.fill_rule() {
            FillRule::NonZero => Winding::NonZero,
            FillRule::EvenOdd => Winding::EvenOdd,
        };
        path
    }

    fn stroke_style(stroke: &StrokeEntry) -> StrokeStyle {
        StrokeStyle {
            cap: match stroke.cap {
                CapStyle::Flat => LineCap::Butt,
                CapStyle::Square => LineCap::Square,
                CapStyle::Round => LineCap::Round,
            },
            join: match stroke.join {
                JoinStyle::Miter => LineJoin::Miter,
                JoinStyle::Bevel => LineJoin::Bevel,
                JoinStyle::Round => LineJoin::Round,
            },
            width: stroke.width,
            miter_limit: 2.0,
            dash_array: stroke.dash.intervals(stroke.width),
            dash_offset: 0.0,
        }
    }
}

fn source(color: Color) -> Source<'static> {
    Source::Solid(SolidSource::from_unpremultiplied_argb(
        color.a, color.r, color.g, color.b,
    ))
}

fn unpremultiply(argb: u32) -> Color {
    let a = (argb >> 24) as u8;
    if a == 0 {
        return Color::rgba(0, 0, 0, 0);
    }
    let channel = |shift: u32| {
        let premultiplied = (argb >> shift) & 0xff;
        ((premultiplied * 255 + u32::from(a) / 2) / u32::from(a)).min(255) as u8
    };
    Color::rgba(channel(16), channel(8), channel(0), a)
}

impl RenderSurface for RasterSurface {
    fn width(&self) -> u32 {
        self.target.width().unsigned_abs()
    }

    fn height(&self) -> u32 {
        self.target.height().unsigned_abs()
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        self.target.fill_rect(
            x as f32,
            y as f32,
            width as f32,
            height as f32,
            &source(color),
            &DrawOptions::new(),
        );
    }

    fn fill_path(&mut self, outline: &Outline, color: Color) {
        let outline = self.clip_window().clip_fill(outline);
        if outline.is_empty() {
            return;
        }
        self.target
            .fill(&Self::to_path(&outline), &source(color), &DrawOptions::new());
    }

    fn stroke_path(&mut self, outline: &Outline, stroke: &StrokeEntry) {
        let outline = self.clip_window().clip_stroke(outline);
        if outline.is_empty() {
            return;
        }
        self.target.stroke(
            &Self::to_path(&outline),
            &source(stroke.color),
            &Self::stroke_style(stroke),
            &DrawOptions::new(),
        );
    }
}
