//! Canvas 2D painter for draw command lists

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::scene::{DrawCmd, Rect, TextStyle};
use super::viewport::Viewport;
use crate::assets::{AssetId, AssetNotifier};

pub struct CanvasPainter {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    images: HashMap<AssetId, HtmlImageElement>,
}

impl CanvasPainter {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            canvas,
            ctx,
            images: HashMap::new(),
        })
    }

    /// Start loading every sprite. Completion is reported through `notifier`;
    /// `on_settled` runs after each image loads or fails.
    pub fn load_images(
        &mut self,
        notifier: &AssetNotifier,
        on_settled: impl Fn() + Clone + 'static,
    ) -> Result<(), JsValue> {
        for id in AssetId::ALL {
            let img = HtmlImageElement::new()?;

            let onload = {
                let img = img.clone();
                let notifier = notifier.clone();
                let on_settled = on_settled.clone();
                Closure::<dyn FnMut()>::new(move || {
                    notifier.loaded(id, img.natural_width(), img.natural_height());
                    on_settled();
                })
            };
            let onerror = {
                let notifier = notifier.clone();
                let on_settled = on_settled.clone();
                Closure::<dyn FnMut()>::new(move || {
                    notifier.failed(id);
                    on_settled();
                })
            };
            img.set_onload(Some(onload.as_ref().unchecked_ref()));
            img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
            onload.forget();
            onerror.forget();

            img.set_src(id.url());
            self.images.insert(id, img);
        }
        Ok(())
    }

    /// Size the backing store for the viewport and scale drawing to logical units
    pub fn resize(&self, viewport: &Viewport, display: (f32, f32)) -> Result<(), JsValue> {
        let (w, h) = viewport.backing_size();
        self.canvas.set_width(w);
        self.canvas.set_height(h);

        let style = self.canvas.style();
        style.set_property("width", &format!("{}px", display.0))?;
        style.set_property("height", &format!("{}px", display.1))?;

        let dpr = viewport.dpr();
        self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
        self.ctx.set_image_smoothing_enabled(true);
        log::debug!("Canvas resized to {}x{} (dpr {})", w, h, dpr);
        Ok(())
    }

    pub fn paint(&self, cmds: &[DrawCmd]) {
        for cmd in cmds {
            if let Err(e) = self.paint_one(cmd) {
                log::warn!("Draw failed: {:?}", e);
            }
        }
    }

    fn paint_one(&self, cmd: &DrawCmd) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match cmd {
            DrawCmd::Clear { width, height } => {
                ctx.clear_rect(0.0, 0.0, *width as f64, *height as f64);
            }
            DrawCmd::Gradient { rect, top, bottom } => {
                let gradient = ctx.create_linear_gradient(
                    0.0,
                    rect.y as f64,
                    0.0,
                    (rect.y + rect.h) as f64,
                );
                gradient.add_color_stop(0.0, &top.to_css())?;
                gradient.add_color_stop(1.0, &bottom.to_css())?;
                ctx.set_fill_style_canvas_gradient(&gradient);
                fill(ctx, rect);
            }
            DrawCmd::FillRect { rect, color } => {
                ctx.set_fill_style_str(&color.to_css());
                fill(ctx, rect);
            }
            DrawCmd::Image {
                asset,
                dest,
                rotation_deg,
                flip_y,
                filter,
            } => {
                let Some(img) = self.images.get(asset) else {
                    return Ok(());
                };
                let (cx, cy) = dest.center();
                ctx.save();
                ctx.translate(cx as f64, cy as f64)?;
                if *rotation_deg != 0.0 {
                    ctx.rotate((*rotation_deg as f64).to_radians())?;
                }
                if *flip_y {
                    ctx.scale(1.0, -1.0)?;
                }
                ctx.set_filter(filter.css());
                let drawn = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    img,
                    -(dest.w as f64) / 2.0,
                    -(dest.h as f64) / 2.0,
                    dest.w as f64,
                    dest.h as f64,
                );
                ctx.restore();
                drawn?;
            }
            DrawCmd::Text { text, x, y, style } => {
                ctx.save();
                let drawn = draw_text(ctx, text, *x, *y, style);
                ctx.restore();
                drawn?;
            }
        }
        Ok(())
    }
}

fn fill(ctx: &CanvasRenderingContext2d, rect: &Rect) {
    ctx.fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
}

fn draw_text(
    ctx: &CanvasRenderingContext2d,
    text: &str,
    x: f32,
    y: f32,
    style: &TextStyle,
) -> Result<(), JsValue> {
    ctx.set_font(style.font);
    ctx.set_text_align("center");
    ctx.set_line_width(style.stroke_width as f64);
    ctx.set_stroke_style_str(&style.stroke.to_css());
    ctx.set_fill_style_str(&style.fill.to_css());
    ctx.stroke_text(text, x as f64, y as f64)?;
    ctx.fill_text(text, x as f64, y as f64)
}
