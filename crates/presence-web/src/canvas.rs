use glam::Vec4;
use presence_core::color::css_rgba;
use presence_core::{BlendMode, Dot, PresenceError, PresenceSurface, Scene, SurfaceSize};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

use crate::dom;

/// 2D-canvas painter. Dots are filled discs; the halo pass supplies the glow
/// that the GPU path gets from per-fragment softness.
pub struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

fn js_err(e: JsValue) -> PresenceError {
    PresenceError::Surface(format!("{e:?}"))
}

impl CanvasSurface {
    pub fn new(canvas: web::HtmlCanvasElement) -> Result<Self, PresenceError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| PresenceError::SurfaceUnavailable(format!("{e:?}")))?
            .ok_or_else(|| PresenceError::SurfaceUnavailable("no 2d context".into()))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|_| PresenceError::SurfaceUnavailable("unexpected context type".into()))?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &web::HtmlCanvasElement {
        &self.canvas
    }

    #[allow(deprecated)]
    fn fill_dots(&self, dots: &[Dot]) -> Result<(), PresenceError> {
        for d in dots {
            if d.radius <= 0.0 || d.color[3] <= 0.0 {
                continue;
            }
            self.ctx
                .set_fill_style(&JsValue::from_str(&css_rgba(Vec4::from_array(d.color))));
            self.ctx.begin_path();
            self.ctx
                .arc(
                    d.center[0] as f64,
                    d.center[1] as f64,
                    d.radius as f64,
                    0.0,
                    std::f64::consts::TAU,
                )
                .map_err(js_err)?;
            self.ctx.fill();
        }
        Ok(())
    }
}

impl PresenceSurface for CanvasSurface {
    fn size(&self) -> SurfaceSize {
        SurfaceSize::new(
            self.canvas.width(),
            self.canvas.height(),
            dom::device_pixel_ratio() as f32,
        )
    }

    #[allow(deprecated)]
    fn present(&mut self, scene: &Scene<'_>) -> Result<(), PresenceError> {
        let w = scene.size.width as f64;
        let h = scene.size.height as f64;
        let bg = &scene.background;

        self.ctx
            .set_global_composite_operation("source-over")
            .map_err(js_err)?;
        let gradient = self
            .ctx
            .create_radial_gradient(
                bg.center.x as f64,
                bg.center.y as f64,
                0.0,
                bg.center.x as f64,
                bg.center.y as f64,
                bg.radius as f64,
            )
            .map_err(js_err)?;
        for stop in &bg.stops {
            gradient
                .add_color_stop(stop.offset, &css_rgba(stop.color))
                .map_err(js_err)?;
        }
        self.ctx.set_fill_style(&gradient);
        self.ctx.fill_rect(0.0, 0.0, w, h);

        let op = match scene.blend {
            BlendMode::Additive => "lighter",
        };
        self.ctx
            .set_global_composite_operation(op)
            .map_err(js_err)?;
        self.fill_dots(scene.halo)?;
        self.fill_dots(scene.core)?;
        self.ctx
            .set_global_composite_operation("source-over")
            .map_err(js_err)?;
        Ok(())
    }
}
