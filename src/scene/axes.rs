use crate::{
    foundation::core::{Point, Rect, Rgba8Premul, Vec2, palette},
    foundation::error::{BellcurveError, BellcurveResult},
    foundation::math::{arange_inclusive, decimal_places_for_step, remap},
    scene::mobject::{
        Align, DEFAULT_NEXT_TO_BUFF, Direction, Mobject, Primitive, UNITS_PER_STROKE_WIDTH,
    },
};

/// Curve samples per unit of x range in [`Axes::plot`].
pub const PLOT_SAMPLES_PER_UNIT: f64 = 20.0;

/// `[min, max]` with tick spacing `step`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AxisRange {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
    /// Tick spacing.
    pub step: f64,
}

impl AxisRange {
    /// Range from its three parts.
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    fn validate(&self, axis: &str) -> BellcurveResult<()> {
        if !(self.min.is_finite() && self.max.is_finite() && self.step.is_finite()) {
            return Err(BellcurveError::validation(format!(
                "{axis} range must be finite"
            )));
        }
        if self.max <= self.min {
            return Err(BellcurveError::validation(format!(
                "{axis} range max must be > min"
            )));
        }
        if self.step <= 0.0 {
            return Err(BellcurveError::validation(format!(
                "{axis} range step must be > 0"
            )));
        }
        Ok(())
    }

    /// Value where the perpendicular axis crosses: zero, clamped into the range.
    pub fn crossing(&self) -> f64 {
        0.0f64.clamp(self.min, self.max)
    }

    /// Tick values from `min` to `max`.
    pub fn ticks(&self) -> Vec<f64> {
        arange_inclusive(self.min, self.max, self.step)
    }
}

/// Construction options for [`Axes`].
#[derive(Clone, Debug, PartialEq)]
pub struct AxesConfig {
    /// Horizontal data range.
    pub x_range: AxisRange,
    /// Vertical data range.
    pub y_range: AxisRange,
    /// Drawn width of the x axis in scene units.
    pub x_length: f64,
    /// Drawn height of the y axis in scene units.
    pub y_length: f64,
    /// Draw numeric labels at the ticks.
    pub include_numbers: bool,
    /// Draw arrow tips at the positive ends.
    pub include_tips: bool,
    /// Font size of tick numbers.
    pub number_font_size: f64,
    /// Axis line color.
    pub color: Rgba8Premul,
    /// Axis stroke width (1 = 0.01 scene units).
    pub stroke_width: f64,
    /// Total tick length in scene units.
    pub tick_size: f64,
    /// Arrow tip length in scene units.
    pub tip_length: f64,
}

impl Default for AxesConfig {
    fn default() -> Self {
        Self {
            x_range: AxisRange::new(-7.0, 7.0, 1.0),
            y_range: AxisRange::new(-4.0, 4.0, 1.0),
            x_length: 12.0,
            y_length: 6.0,
            include_numbers: false,
            include_tips: true,
            number_font_size: 24.0,
            color: palette::LIGHT_GREY,
            stroke_width: 2.0,
            tick_size: 0.2,
            tip_length: 0.25,
        }
    }
}

/// Coordinate system centred on the scene origin.
#[derive(Clone, Debug)]
pub struct Axes {
    cfg: AxesConfig,
}

impl Axes {
    /// Validate `cfg` and build the mapping.
    pub fn new(cfg: AxesConfig) -> BellcurveResult<Self> {
        cfg.x_range.validate("x")?;
        cfg.y_range.validate("y")?;
        if !(cfg.x_length > 0.0 && cfg.y_length > 0.0) {
            return Err(BellcurveError::validation("axis lengths must be > 0"));
        }
        Ok(Self { cfg })
    }

    /// Options the axes were built with.
    pub fn config(&self) -> &AxesConfig {
        &self.cfg
    }

    /// Map data coordinates to a scene point.
    pub fn coords_to_point(&self, x: f64, y: f64) -> Point {
        let (xr, yr) = (self.cfg.x_range, self.cfg.y_range);
        let hx = self.cfg.x_length / 2.0;
        let hy = self.cfg.y_length / 2.0;
        Point::new(
            remap(x, xr.min, xr.max, -hx, hx),
            remap(y, yr.min, yr.max, -hy, hy),
        )
    }

    /// Map a scene point back to data coordinates.
    pub fn point_to_coords(&self, p: Point) -> (f64, f64) {
        let (xr, yr) = (self.cfg.x_range, self.cfg.y_range);
        let hx = self.cfg.x_length / 2.0;
        let hy = self.cfg.y_length / 2.0;
        (
            remap(p.x, -hx, hx, xr.min, xr.max),
            remap(p.y, -hy, hy, yr.min, yr.max),
        )
    }

    fn stroke(&self) -> f64 {
        self.cfg.stroke_width * UNITS_PER_STROKE_WIDTH
    }

    fn x_axis_ends(&self) -> (Point, Point) {
        let y = self.cfg.y_range.crossing();
        (
            self.coords_to_point(self.cfg.x_range.min, y),
            self.coords_to_point(self.cfg.x_range.max, y),
        )
    }

    fn y_axis_ends(&self) -> (Point, Point) {
        let x = self.cfg.x_range.crossing();
        (
            self.coords_to_point(x, self.cfg.y_range.min),
            self.coords_to_point(x, self.cfg.y_range.max),
        )
    }

    fn axis_with_tip(&self, start: Point, end: Point, dir: Vec2) -> Vec<Primitive> {
        let mut out = Vec::with_capacity(2);
        let tip = self.cfg.tip_length;
        let line_end = if self.cfg.include_tips {
            end - dir * tip
        } else {
            end
        };
        out.push(Primitive::Polyline {
            points: vec![start, line_end],
            color: self.cfg.color,
            width: self.stroke(),
        });
        if self.cfg.include_tips {
            let normal = Vec2::new(-dir.y, dir.x) * (tip * 0.5);
            let base = end - dir * tip;
            out.push(Primitive::Polygon {
                points: vec![end, base + normal, base - normal],
                color: self.cfg.color,
            });
        }
        out
    }

    /// Axis lines, tips, ticks, and (optionally) tick numbers.
    pub fn mobject(&self) -> BellcurveResult<Mobject> {
        let mut m = Mobject::new();
        let (x0, x1) = self.x_axis_ends();
        let (y0, y1) = self.y_axis_ends();
        for p in self.axis_with_tip(x0, x1, Vec2::new(1.0, 0.0)) {
            m.push(p);
        }
        for p in self.axis_with_tip(y0, y1, Vec2::new(0.0, 1.0)) {
            m.push(p);
        }

        let half_tick = self.cfg.tick_size / 2.0;
        let y_cross = self.cfg.y_range.crossing();
        let x_cross = self.cfg.x_range.crossing();
        for x in self.cfg.x_range.ticks() {
            let c = self.coords_to_point(x, y_cross);
            m.push(Primitive::Polyline {
                points: vec![
                    c - Vec2::new(0.0, half_tick),
                    c + Vec2::new(0.0, half_tick),
                ],
                color: self.cfg.color,
                width: self.stroke(),
            });
        }
        for y in self.cfg.y_range.ticks() {
            let c = self.coords_to_point(x_cross, y);
            m.push(Primitive::Polyline {
                points: vec![
                    c - Vec2::new(half_tick, 0.0),
                    c + Vec2::new(half_tick, 0.0),
                ],
                color: self.cfg.color,
                width: self.stroke(),
            });
        }

        if self.cfg.include_numbers {
            m.extend(self.numbers()?);
        }
        Ok(m)
    }

    /// Tick numbers; the value where the other axis crosses is skipped.
    pub fn numbers(&self) -> BellcurveResult<Mobject> {
        let mut m = Mobject::new();
        let size = self.cfg.number_font_size;
        let half_tick = self.cfg.tick_size / 2.0;

        let x_places = decimal_places_for_step(self.cfg.x_range.step);
        let x_cross = self.cfg.x_range.crossing();
        let y_cross = self.cfg.y_range.crossing();
        for x in self.cfg.x_range.ticks() {
            if (x - x_cross).abs() < 1e-9 {
                continue;
            }
            let c = self.coords_to_point(x, y_cross);
            let anchor = Rect::from_center_size(c, (0.0, 2.0 * half_tick));
            let label = Mobject::math(&format_number(x, x_places), size)?.next_to(
                anchor,
                Direction::Down,
                Align::Center,
                DEFAULT_NEXT_TO_BUFF,
            );
            m.extend(label);
        }

        let y_places = decimal_places_for_step(self.cfg.y_range.step);
        for y in self.cfg.y_range.ticks() {
            if (y - y_cross).abs() < 1e-9 {
                continue;
            }
            let c = self.coords_to_point(x_cross, y);
            let anchor = Rect::from_center_size(c, (2.0 * half_tick, 0.0));
            let label = Mobject::math(&format_number(y, y_places), size)?.next_to(
                anchor,
                Direction::Left,
                Align::Center,
                DEFAULT_NEXT_TO_BUFF,
            );
            m.extend(label);
        }
        Ok(m)
    }

    /// Labels placed up and to the right of each axis' positive end.
    pub fn axis_labels(&self, x_tex: &str, y_tex: &str) -> BellcurveResult<Mobject> {
        const LABEL_FONT_SIZE: f64 = 48.0;
        const LABEL_BUFF: f64 = 0.1;

        let (_, x_end) = self.x_axis_ends();
        let (_, y_end) = self.y_axis_ends();

        let x_label = Mobject::math(x_tex, LABEL_FONT_SIZE)?;
        let b = x_label.bounds();
        let x_label = x_label.shift(Vec2::new(
            x_end.x + LABEL_BUFF - b.x0,
            x_end.y + LABEL_BUFF - b.y0,
        ));

        let y_label = Mobject::math(y_tex, LABEL_FONT_SIZE)?;
        let b = y_label.bounds();
        let y_label = y_label.shift(Vec2::new(
            y_end.x + LABEL_BUFF - b.x0,
            y_end.y + LABEL_BUFF - b.y0,
        ));

        let mut m = x_label;
        m.extend(y_label);
        Ok(m)
    }

    /// Graph of `f` over the x range.
    ///
    /// Non-finite samples split the graph into separate segments.
    pub fn plot(&self, f: impl Fn(f64) -> f64, color: Rgba8Premul) -> Mobject {
        const CURVE_STROKE_WIDTH: f64 = 4.0;

        let xr = self.cfg.x_range;
        let samples = (((xr.max - xr.min) * PLOT_SAMPLES_PER_UNIT).ceil() as usize).max(1);
        let width = CURVE_STROKE_WIDTH * UNITS_PER_STROKE_WIDTH;

        let mut m = Mobject::new();
        let mut segment: Vec<Point> = Vec::with_capacity(samples + 1);
        for i in 0..=samples {
            let x = xr.min + (xr.max - xr.min) * (i as f64) / (samples as f64);
            let y = f(x);
            if y.is_finite() {
                segment.push(self.coords_to_point(x, y));
                continue;
            }
            if segment.len() >= 2 {
                m.push(Primitive::Polyline {
                    points: std::mem::take(&mut segment),
                    color,
                    width,
                });
            }
            segment.clear();
        }
        if segment.len() >= 2 {
            m.push(Primitive::Polyline {
                points: segment,
                color,
                width,
            });
        }
        m
    }
}

/// Tick number text with `places` decimals.
pub fn format_number(v: f64, places: usize) -> String {
    let s = format!("{v:.places$}");
    // `-0` and `-0.0` print with a sign; ticks never want it.
    if s.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        s.trim_start_matches('-').to_string()
    } else {
        s
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/axes.rs"]
mod tests;
