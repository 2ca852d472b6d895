use std::{collections::HashMap, sync::Arc};

use crate::{
    foundation::{
        core::{Affine, Point, Rgba8Premul},
        error::{BellcurveError, BellcurveResult},
    },
    render::{
        backend::{DrawItem, FrameRGBA, FrameSnapshot, RenderBackend, RenderSettings},
        camera::Camera,
        text::{TextRasterizer, TextSvg, text_svg},
    },
    scene::mobject::{Primitive, TextPrimitive},
};

/// Text rasters kept between frames before the cache is dropped.
const TEXT_CACHE_CAPACITY: usize = 512;

#[derive(Clone)]
struct TextPaint {
    paint: vello_cpu::Image,
    w: u32,
    h: u32,
    baseline: Point,
}

/// CPU raster backend powered by `vello_cpu`.
pub struct CpuBackend {
    settings: RenderSettings,
    ctx: Option<vello_cpu::RenderContext>,
    text: TextRasterizer,
    text_cache: HashMap<String, TextPaint>,
}

impl CpuBackend {
    /// Create a backend with its own font database.
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            ctx: None,
            text: TextRasterizer::new(),
            text_cache: HashMap::new(),
        }
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> BellcurveResult<R>,
    ) -> BellcurveResult<R> {
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    fn text_paint_for(&mut self, svg: TextSvg) -> BellcurveResult<TextPaint> {
        if let Some(p) = self.text_cache.get(&svg.svg) {
            return Ok(p.clone());
        }
        let rgba = self.text.rasterize(&svg)?;
        let paint = rgba_premul_to_image(&rgba, svg.width, svg.height)?;
        let out = TextPaint {
            paint,
            w: svg.width,
            h: svg.height,
            baseline: svg.baseline,
        };
        if self.text_cache.len() >= TEXT_CACHE_CAPACITY {
            tracing::debug!(entries = self.text_cache.len(), "text cache full, clearing");
            self.text_cache.clear();
        }
        self.text_cache.insert(svg.svg, out.clone());
        Ok(out)
    }

    fn draw_item(
        &mut self,
        camera: &Camera,
        item: &DrawItem,
        ctx: &mut vello_cpu::RenderContext,
    ) -> BellcurveResult<()> {
        let opacity = item.opacity.clamp(0.0, 1.0) as f32;
        if opacity <= 0.0 {
            return Ok(());
        }

        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        match &item.prim {
            Primitive::Polyline {
                points,
                color,
                width,
            } => {
                if points.len() < 2 {
                    return Ok(());
                }
                ctx.set_transform(affine_to_cpu(camera.to_pixel()));
                ctx.set_paint(color_to_cpu(*color));
                ctx.set_stroke(
                    vello_cpu::kurbo::Stroke::new(*width)
                        .with_caps(vello_cpu::kurbo::Cap::Round)
                        .with_join(vello_cpu::kurbo::Join::Round),
                );
                if opacity < 1.0 {
                    ctx.push_opacity_layer(opacity);
                }
                ctx.stroke_path(&polyline_to_cpu(points, false));
                if opacity < 1.0 {
                    ctx.pop_layer();
                }
            }
            Primitive::Polygon { points, color } => {
                if points.len() < 3 {
                    return Ok(());
                }
                ctx.set_transform(affine_to_cpu(camera.to_pixel()));
                ctx.set_paint(color_to_cpu(*color));
                if opacity < 1.0 {
                    ctx.push_opacity_layer(opacity);
                }
                ctx.fill_path(&polyline_to_cpu(points, true));
                if opacity < 1.0 {
                    ctx.pop_layer();
                }
            }
            Primitive::Text(text) => {
                self.draw_text(camera, text, opacity, item.wipe, ctx)?;
            }
        }
        Ok(())
    }

    fn draw_text(
        &mut self,
        camera: &Camera,
        text: &TextPrimitive,
        opacity: f32,
        wipe: f64,
        ctx: &mut vello_cpu::RenderContext,
    ) -> BellcurveResult<()> {
        let wipe = wipe.clamp(0.0, 1.0);
        if wipe <= 0.0 {
            return Ok(());
        }
        let Some(svg) = text_svg(text, camera.px_per_unit()) else {
            return Ok(());
        };
        let p = self.text_paint_for(svg)?;

        let anchor = camera.project(text.origin);
        let tr = Affine::translate((
            (anchor.x - p.baseline.x).round(),
            (anchor.y - p.baseline.y).round(),
        ));
        ctx.set_transform(affine_to_cpu(tr));
        ctx.set_paint(p.paint);
        if opacity < 1.0 {
            ctx.push_opacity_layer(opacity);
        }
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(p.w) * wipe,
            f64::from(p.h),
        ));
        if opacity < 1.0 {
            ctx.pop_layer();
        }
        Ok(())
    }
}

impl RenderBackend for CpuBackend {
    #[tracing::instrument(level = "trace", skip_all, fields(items = snapshot.items.len()))]
    fn render(&mut self, camera: &Camera, snapshot: &FrameSnapshot) -> BellcurveResult<FrameRGBA> {
        let canvas = camera.canvas();
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| BellcurveError::render("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| BellcurveError::render("canvas height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(BellcurveError::render("canvas must be non-empty"));
        }

        let background = self.settings.background;
        self.with_ctx_mut(width, height, |this, ctx| {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(color_to_cpu(background));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(width),
                f64::from(height),
            ));
            for item in &snapshot.items {
                this.draw_item(camera, item, ctx)?;
            }

            let mut pixmap = vello_cpu::Pixmap::new(width, height);
            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            Ok(FrameRGBA {
                width: canvas.width,
                height: canvas.height,
                data: pixmap.data_as_u8_slice().to_vec(),
                premultiplied: true,
            })
        })
    }
}

fn color_to_cpu(c: Rgba8Premul) -> vello_cpu::peniko::Color {
    let [r, g, b, a] = c.to_straight_rgba();
    vello_cpu::peniko::Color::from_rgba8(r, g, b, a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn polyline_to_cpu(points: &[Point], close: bool) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        out.move_to(vello_cpu::kurbo::Point::new(first.x, first.y));
    }
    for p in iter {
        out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y));
    }
    if close {
        out.close_path();
    }
    out
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> BellcurveResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| BellcurveError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| BellcurveError::render("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(BellcurveError::render("pixmap byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

fn rgba_premul_to_image(
    bytes_premul: &[u8],
    width: u32,
    height: u32,
) -> BellcurveResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
