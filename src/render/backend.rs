use crate::{
    foundation::{core::Rgba8Premul, error::BellcurveResult},
    render::camera::Camera,
    scene::mobject::Primitive,
};

/// A rendered frame as RGBA8 pixels.
///
/// Frames are premultiplied alpha; the flag makes that explicit at sink boundaries.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// One primitive as it should appear in the current frame.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawItem {
    /// Geometry in scene units.
    pub prim: Primitive,
    /// Opacity multiplier in `[0, 1]`.
    pub opacity: f64,
    /// Visible fraction of text, measured from the left edge.
    pub wipe: f64,
}

impl DrawItem {
    /// Fully visible item.
    pub fn full(prim: Primitive) -> Self {
        Self {
            prim,
            opacity: 1.0,
            wipe: 1.0,
        }
    }
}

/// Everything on stage for one frame, in drawing order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameSnapshot {
    /// Items back to front.
    pub items: Vec<DrawItem>,
}

/// A renderer that rasterizes a [`FrameSnapshot`] into a [`FrameRGBA`].
pub trait RenderBackend {
    /// Rasterize `snapshot` as seen through `camera`.
    fn render(&mut self, camera: &Camera, snapshot: &FrameSnapshot) -> BellcurveResult<FrameRGBA>;
}

/// Available backend kinds.
#[derive(Clone, Copy, Debug, Default)]
pub enum BackendKind {
    /// CPU raster backend powered by `vello_cpu`.
    #[default]
    Cpu,
}

/// Backend-agnostic settings.
#[derive(Clone, Copy, Debug)]
pub struct RenderSettings {
    /// Fill under everything drawn.
    pub background: Rgba8Premul,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            background: Rgba8Premul::opaque(0, 0, 0),
        }
    }
}

/// Create a rendering backend implementation.
pub fn create_backend(kind: BackendKind, settings: RenderSettings) -> Box<dyn RenderBackend> {
    match kind {
        BackendKind::Cpu => Box::new(crate::render::cpu::CpuBackend::new(settings)),
    }
}
