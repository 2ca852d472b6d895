use crate::foundation::core::{Affine, Canvas, Point};

/// Height of the visible frame in scene units; width follows the canvas aspect ratio.
pub const FRAME_HEIGHT: f64 = 8.0;

/// Visible region of the scene, centred on the origin with y pointing up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneFrame {
    /// Width in scene units.
    pub width: f64,
    /// Height in scene units.
    pub height: f64,
}

impl SceneFrame {
    /// Frame matching the aspect ratio of `canvas`.
    pub fn for_canvas(canvas: Canvas) -> Self {
        Self {
            width: FRAME_HEIGHT * canvas.aspect(),
            height: FRAME_HEIGHT,
        }
    }

    /// Rightmost visible x.
    pub fn right(self) -> f64 {
        self.width / 2.0
    }

    /// Topmost visible y.
    pub fn top(self) -> f64 {
        self.height / 2.0
    }
}

/// Maps scene units onto canvas pixels.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    canvas: Canvas,
    frame: SceneFrame,
}

impl Camera {
    /// Camera filling `canvas`.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            frame: SceneFrame::for_canvas(canvas),
        }
    }

    /// Canvas in pixels.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Visible scene region.
    pub fn frame(&self) -> SceneFrame {
        self.frame
    }

    /// Pixels per scene unit.
    pub fn px_per_unit(&self) -> f64 {
        f64::from(self.canvas.height) / self.frame.height
    }

    /// Scene-to-pixel transform (y flipped, origin at canvas centre).
    pub fn to_pixel(&self) -> Affine {
        let s = self.px_per_unit();
        Affine::new([
            s,
            0.0,
            0.0,
            -s,
            f64::from(self.canvas.width) / 2.0,
            f64::from(self.canvas.height) / 2.0,
        ])
    }

    /// Map one point into pixel space.
    pub fn project(&self, p: Point) -> Point {
        self.to_pixel() * p
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/camera.rs"]
mod tests;
