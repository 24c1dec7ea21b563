//! Emblem renderer.
//!
//! Draws the studio emblem in the hero area: a ring of petals around a core,
//! scaled by the reactive transform and foreshortened by the pointer-driven
//! yaw/pitch. On top of the reactive motion it carries a slow idle float so
//! the hero never looks frozen while the track is still locked.

use nannou::prelude::*;

use crate::viz::reactive::VisualState;

const PETALS: usize = 8;
const EMBLEM_RADIUS: f32 = 140.0;
const CORE_RADIUS: f32 = 34.0;
const FLOAT_SPEED: f32 = 1.5;
const FLOAT_AMPLITUDE: f32 = 8.0;

/// Draw the emblem centered on `center`, with `time` driving the idle float.
pub fn draw(draw: &Draw, state: &VisualState, center: Point2, time: f32) {
    let bob = (time * FLOAT_SPEED).sin() * FLOAT_AMPLITUDE;
    let sway = (time * FLOAT_SPEED * 0.6).cos() * 0.05;

    // Foreshorten instead of projecting: a tilt reads as an ellipse
    let squash_x = state.yaw.cos().abs().max(0.2);
    let squash_y = state.pitch.cos().abs().max(0.2);

    let draw = draw
        .x_y(center.x, center.y + bob)
        .scale(state.scale)
        .z_radians(state.yaw * 0.4 + sway);

    for i in 0..PETALS {
        let angle = i as f32 / PETALS as f32 * TAU;
        let hue = i as f32 / PETALS as f32;
        let x = angle.cos() * EMBLEM_RADIUS * squash_x;
        let y = angle.sin() * EMBLEM_RADIUS * squash_y;

        draw.ellipse()
            .x_y(x, y)
            .w_h(70.0 * squash_x, 70.0 * squash_y)
            .color(hsla(hue, 0.6, 0.55, 0.85))
            .stroke(hsla(hue, 0.7, 0.75, 1.0))
            .stroke_weight(2.0);
    }

    draw.ellipse()
        .x_y(0.0, 0.0)
        .radius(CORE_RADIUS)
        .color(rgb(0.95, 0.95, 0.97))
        .stroke(rgba(1.0, 1.0, 1.0, 0.4))
        .stroke_weight(3.0);
}
