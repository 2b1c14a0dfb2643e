//! UI Module
//!
//! 2D overlay rendering: pixel-font text primitives and the HUD composer.

pub mod hud;
pub mod text;

pub use hud::{Hud, HudAction};
pub use text::{add_disc, add_rect, draw_text, glyph, text_width};
