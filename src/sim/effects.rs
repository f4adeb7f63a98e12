//! Cosmetic effect triggers
//!
//! The simulation fires these and forgets them. A renderer drains the
//! queue each frame and animates the effects on its own clock.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;

/// Colouring hint for floating text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextTone {
    Positive,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    Explosion {
        pos: Vec2,
        size: f32,
    },
    /// Fade out whatever occupied `rect`
    Fade {
        rect: Rect,
        seconds: f32,
    },
    FloatingText {
        pos: Vec2,
        text: String,
        tone: TextTone,
        font_size: Option<u32>,
    },
}

/// Receiver for cosmetic triggers
pub trait EffectSink {
    fn explosion(&mut self, pos: Vec2, size: f32);
    fn fade(&mut self, rect: Rect, seconds: f32);
    fn text(&mut self, pos: Vec2, text: String, tone: TextTone, font_size: Option<u32>);
}

/// Effects raised since the renderer last drained them
#[derive(Debug, Clone, Default)]
pub struct EffectQueue {
    pending: Vec<Effect>,
}

impl EffectQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &[Effect] {
        &self.pending
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, Effect> {
        self.pending.drain(..)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Texts currently queued, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pending.iter().filter_map(|e| match e {
            Effect::FloatingText { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl EffectSink for EffectQueue {
    fn explosion(&mut self, pos: Vec2, size: f32) {
        self.pending.push(Effect::Explosion { pos, size });
    }

    fn fade(&mut self, rect: Rect, seconds: f32) {
        self.pending.push(Effect::Fade { rect, seconds });
    }

    fn text(&mut self, pos: Vec2, text: String, tone: TextTone, font_size: Option<u32>) {
        self.pending.push(Effect::FloatingText {
            pos,
            text,
            tone,
            font_size,
        });
    }
}
