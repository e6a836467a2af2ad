//! Scene projection: session state to an ordered list of draw commands
//!
//! Building a frame has no side effects and does not depend on the platform;
//! the canvas painter (or a test) consumes the list.

use crate::assets::{AssetId, Assets, ImageSize};
use crate::settings::BackgroundFit;
use crate::sim::{Phase, Session};

/// Rectangle in logical units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Opaque RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub fn to_css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const SKY_TOP: Color = Color(0x87, 0xce, 0xeb);
    pub const SKY_BOTTOM: Color = Color(0xe0, 0xf7, 0xfa);
    pub const PIPE: Color = Color(100, 170, 40);
    pub const GROUND: Color = Color(210, 185, 110);
    pub const BIRD: Color = Color(245, 245, 240);
    pub const SCORE_FILL: Color = Color(255, 255, 255);
    pub const SCORE_STROKE: Color = Color(0, 0, 0);
}

/// CSS filter applied to a sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFilter {
    None,
    /// Turns the chick sprite into a white hen
    Whiten,
}

impl ImageFilter {
    pub fn css(&self) -> &'static str {
        match self {
            ImageFilter::None => "none",
            ImageFilter::Whiten => "grayscale(100%) brightness(1.5)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: &'static str,
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f32,
}

pub const SCORE_STYLE: TextStyle = TextStyle {
    font: "900 42px Poppins, sans-serif",
    fill: colors::SCORE_FILL,
    stroke: colors::SCORE_STROKE,
    stroke_width: 3.0,
};

/// Baseline of the in-canvas score
pub const SCORE_Y: f32 = 55.0;
/// Pipe sprites extend past their visible end so caps never show a seam
pub const PIPE_OVERDRAW: f32 = 20.0;

/// One drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear {
        width: f32,
        height: f32,
    },
    Gradient {
        rect: Rect,
        top: Color,
        bottom: Color,
    },
    FillRect {
        rect: Rect,
        color: Color,
    },
    /// Sprite drawn into `dest`, rotated about the centre of `dest` and
    /// optionally flipped vertically
    Image {
        asset: AssetId,
        dest: Rect,
        rotation_deg: f32,
        flip_y: bool,
        filter: ImageFilter,
    },
    /// Text centred horizontally on `x`
    Text {
        text: String,
        x: f32,
        y: f32,
        style: TextStyle,
    },
}

/// Destination rect that covers the view while keeping the image's aspect ratio
pub fn cover_rect(image: ImageSize, view_width: f32, view_height: f32) -> Rect {
    let iw = image.width.max(1) as f32;
    let ih = image.height.max(1) as f32;
    let scale = (view_width / iw).max(view_height / ih);
    let w = iw * scale;
    let h = ih * scale;
    Rect::new((view_width - w) / 2.0, (view_height - h) / 2.0, w, h)
}

/// Project the session into draw commands for one frame
pub fn build(session: &Session, assets: &Assets, fit: BackgroundFit) -> Vec<DrawCmd> {
    let tuning = &session.tuning;
    let (w, h) = (tuning.view_width, tuning.view_height);
    let mut cmds = Vec::with_capacity(32);

    cmds.push(DrawCmd::Clear {
        width: w,
        height: h,
    });
    background(&mut cmds, assets, fit, w, h);

    let in_play = matches!(session.phase, Phase::Running | Phase::Over);
    if in_play {
        pipes(&mut cmds, session, assets);
    }
    ground(&mut cmds, session, assets);
    bird(&mut cmds, session, assets);
    if in_play {
        cmds.push(DrawCmd::Text {
            text: session.score.to_string(),
            x: w / 2.0,
            y: SCORE_Y,
            style: SCORE_STYLE,
        });
    }

    cmds
}

fn background(cmds: &mut Vec<DrawCmd>, assets: &Assets, fit: BackgroundFit, w: f32, h: f32) {
    let Some(size) = assets.natural_size(AssetId::Background) else {
        cmds.push(DrawCmd::Gradient {
            rect: Rect::new(0.0, 0.0, w, h),
            top: colors::SKY_TOP,
            bottom: colors::SKY_BOTTOM,
        });
        return;
    };
    let dest = match fit {
        BackgroundFit::Cover => cover_rect(size, w, h),
        BackgroundFit::Stretch => Rect::new(0.0, 0.0, w, h),
    };
    cmds.push(DrawCmd::Image {
        asset: AssetId::Background,
        dest,
        rotation_deg: 0.0,
        flip_y: false,
        filter: ImageFilter::None,
    });
}

fn pipes(cmds: &mut Vec<DrawCmd>, session: &Session, assets: &Assets) {
    let tuning = &session.tuning;
    let pw = tuning.pipe_width;
    for pipe in session.pipes.pipes() {
        // Top pipe grows upward from the gap, drawn flipped
        let top = Rect::new(pipe.x, -PIPE_OVERDRAW, pw, pipe.gap_y + PIPE_OVERDRAW);
        let bottom_y = pipe.gap_y + tuning.pipe_gap;
        let bottom = Rect::new(pipe.x, bottom_y, pw, tuning.view_height - bottom_y + PIPE_OVERDRAW);

        sprite_or_fill(cmds, assets, AssetId::PipeTop, top, true, colors::PIPE);
        sprite_or_fill(cmds, assets, AssetId::PipeBottom, bottom, false, colors::PIPE);
    }
}

fn sprite_or_fill(
    cmds: &mut Vec<DrawCmd>,
    assets: &Assets,
    asset: AssetId,
    dest: Rect,
    flip_y: bool,
    fallback: Color,
) {
    if assets.is_ready(asset) {
        cmds.push(DrawCmd::Image {
            asset,
            dest,
            rotation_deg: 0.0,
            flip_y,
            filter: ImageFilter::None,
        });
    } else {
        cmds.push(DrawCmd::FillRect {
            rect: dest,
            color: fallback,
        });
    }
}

fn ground(cmds: &mut Vec<DrawCmd>, session: &Session, assets: &Assets) {
    let tuning = &session.tuning;
    let gh = tuning.ground_height;
    let y = tuning.view_height - gh;

    if !assets.is_ready(AssetId::Ground) {
        cmds.push(DrawCmd::FillRect {
            rect: Rect::new(0.0, y, tuning.view_width, gh),
            color: colors::GROUND,
        });
        return;
    }

    let gw = session.ground.tile_width.max(1.0);
    // One unit of overlap each side hides hairline seams between tiles
    let mut x = session.ground.offset;
    while x < tuning.view_width + gw {
        cmds.push(DrawCmd::Image {
            asset: AssetId::Ground,
            dest: Rect::new(x - 1.0, y, gw + 2.0, gh),
            rotation_deg: 0.0,
            flip_y: false,
            filter: ImageFilter::None,
        });
        x += gw;
    }
}

fn bird(cmds: &mut Vec<DrawCmd>, session: &Session, assets: &Assets) {
    let bird = &session.bird;
    let dest = Rect::new(bird.pos.x, bird.pos.y, bird.width(), bird.height());
    let rotation_deg = match session.phase {
        Phase::Idle => 0.0,
        Phase::Running | Phase::Over => bird.angle,
    };

    if assets.is_ready(AssetId::Bird) {
        cmds.push(DrawCmd::Image {
            asset: AssetId::Bird,
            dest,
            rotation_deg,
            flip_y: false,
            filter: ImageFilter::Whiten,
        });
    } else {
        cmds.push(DrawCmd::FillRect {
            rect: dest,
            color: colors::BIRD,
        });
    }
}
