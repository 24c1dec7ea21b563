//! On-screen playback controls.
//!
//! A small overlay in the bottom-right corner with play/pause and mute
//! buttons plus a volume readout for the background track. Hit testing is
//! separate from drawing so the click handler stays pure geometry.

use nannou::prelude::*;

use crate::audio::BackgroundTrack;

const BUTTON: f32 = 44.0;
const GAP: f32 = 12.0;
const MARGIN: f32 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlHit {
    PlayPause,
    Mute,
}

fn play_rect(bounds: Rect) -> Rect {
    Rect::from_x_y_w_h(
        bounds.right() - MARGIN - BUTTON - GAP - BUTTON / 2.0,
        bounds.bottom() + MARGIN + BUTTON / 2.0,
        BUTTON,
        BUTTON,
    )
}

fn mute_rect(bounds: Rect) -> Rect {
    Rect::from_x_y_w_h(
        bounds.right() - MARGIN - BUTTON / 2.0,
        bounds.bottom() + MARGIN + BUTTON / 2.0,
        BUTTON,
        BUTTON,
    )
}

pub fn hit(pos: Point2, bounds: Rect) -> Option<ControlHit> {
    if play_rect(bounds).contains(pos) {
        Some(ControlHit::PlayPause)
    } else if mute_rect(bounds).contains(pos) {
        Some(ControlHit::Mute)
    } else {
        None
    }
}

pub fn draw(draw: &Draw, bounds: Rect, track: &BackgroundTrack) {
    let play = play_rect(bounds);
    let mute = mute_rect(bounds);

    for rect in [play, mute] {
        draw.rect()
            .xy(rect.xy())
            .wh(rect.wh())
            .color(rgba(0.0, 0.0, 0.0, 0.6))
            .stroke(rgba(1.0, 1.0, 1.0, 0.4))
            .stroke_weight(1.0);
    }

    let play_label = if track.is_playing() { "||" } else { ">" };
    draw.text(play_label)
        .xy(play.xy())
        .color(rgb(1.0, 1.0, 1.0))
        .font_size(18);

    let mute_label = if track.effective_muted() { "mx" } else { "m" };
    draw.text(mute_label)
        .xy(mute.xy())
        .color(if track.effective_muted() {
            rgba(1.0, 1.0, 1.0, 0.5)
        } else {
            rgba(1.0, 1.0, 1.0, 1.0)
        })
        .font_size(18);

    let volume_text = format!("vol {:.0}%", track.volume() * 100.0);
    draw.text(&volume_text)
        .xy(pt2(play.left() + (mute.right() - play.left()) / 2.0, play.top() + 14.0))
        .color(rgba(1.0, 1.0, 1.0, 0.6))
        .font_size(12);
}
