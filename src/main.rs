mod audio;
mod media;
mod ui;
mod utils;
mod viz;

use nannou::prelude::*;
use rodio::{OutputStream, OutputStreamHandle};

use audio::{AudioSession, BackgroundTrack, ClipId, ForegroundAudio};
use media::SampleClip;
use ui::bindings::{self, Action, GestureGate};
use ui::controls::{self, ControlHit};
use utils::Config;
use viz::reactive::VisualState;
use viz::showcase::Showcase;
use viz::{logo, reactive};

fn main() {
    nannou::app(model).update(update).run();
}

struct Model {
    // Held only to keep the output device open
    _stream: Option<OutputStream>,
    session: AudioSession,
    track: BackgroundTrack,
    clips: Vec<SampleClip>,
    floor: ForegroundAudio,
    gate: GestureGate,
    visual: VisualState,
    showcase: Showcase,
    config: Config,
}

fn model(app: &App) -> Model {
    let config = Config::load();

    app.new_window()
        .title("showreel")
        .size(1280, 720)
        .view(view)
        .key_pressed(key_pressed)
        .mouse_pressed(mouse_pressed)
        .mouse_wheel(mouse_wheel)
        .touch(touched)
        .build()
        .unwrap();

    let (stream, handle): (Option<OutputStream>, Option<OutputStreamHandle>) =
        match OutputStream::try_default() {
            Ok((stream, handle)) => (Some(stream), Some(handle)),
            Err(e) => {
                eprintln!("No audio output device: {}", e);
                (None, None)
            }
        };

    let track = BackgroundTrack::new(handle.as_ref(), &config.track_path(), config.volume());

    let showcase = Showcase::with_default_cards();
    println!("Showcase wall: {} cards", showcase.cards().len());
    let clips = showcase
        .clip_paths()
        .enumerate()
        .map(|(i, path)| SampleClip::new(ClipId(i), handle.as_ref(), path))
        .collect();

    Model {
        _stream: stream,
        session: AudioSession::new(),
        track,
        clips,
        floor: ForegroundAudio::new(),
        gate: GestureGate::new(),
        visual: VisualState::new(),
        showcase,
        config,
    }
}

fn update(app: &App, model: &mut Model, _update: Update) {
    let bounds = app.window_rect();

    // Visibility-gated clip playback
    let threshold = model.config.visibility_threshold();
    for i in 0..model.clips.len() {
        let ratio = model.showcase.visibility(i, bounds);
        model.clips[i].set_visibility(ratio, threshold);
    }

    // Duck the background track while any clip holds the floor
    model.track.set_suppressed(model.floor.is_audible());

    let pointer = normalized_pointer(app);
    reactive::tick(&mut model.visual, model.session.snapshot(), pointer);
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let bounds = app.window_rect();
    draw.background().color(rgb(0.02, 0.02, 0.05));

    if model.showcase.hero_visible(bounds) {
        let hero_center = pt2(0.0, model.showcase.scroll());
        logo::draw(&draw, &model.visual, hero_center, app.time);
    }

    let clip_muted: Vec<bool> = model.clips.iter().map(|c| c.is_muted()).collect();
    model.showcase.draw(&draw, bounds, &clip_muted);

    controls::draw(&draw, bounds, &model.track);

    draw.to_frame(app, &frame).unwrap();
}

fn key_pressed(app: &App, model: &mut Model, key: Key) {
    if model.gate.fire() {
        model.track.unlock(&mut model.session);
    }

    let bounds = app.window_rect();
    let page = bounds.h() * 0.9;

    match bindings::action_for_key(key) {
        Some(Action::Quit) => {
            for clip in model.clips.drain(..) {
                clip.teardown(&mut model.floor);
            }
            app.quit();
        }
        Some(Action::TogglePlayback) => model.track.toggle_play(),
        Some(Action::ToggleMute) => model.track.toggle_mute(),
        Some(Action::VolumeUp) => model.track.nudge_volume(0.05),
        Some(Action::VolumeDown) => model.track.nudge_volume(-0.05),
        Some(Action::ScrollDown) => model.showcase.scroll_by(model.config.scroll_speed(), bounds),
        Some(Action::ScrollUp) => model.showcase.scroll_by(-model.config.scroll_speed(), bounds),
        Some(Action::PageDown) => model.showcase.scroll_by(page, bounds),
        Some(Action::PageUp) => model.showcase.scroll_by(-page, bounds),
        None => {}
    }
}

fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    if model.gate.fire() {
        model.track.unlock(&mut model.session);
    }
    if button != MouseButton::Left {
        return;
    }

    let bounds = app.window_rect();
    let pos = pt2(app.mouse.x, app.mouse.y);

    match controls::hit(pos, bounds) {
        Some(ControlHit::PlayPause) => {
            model.track.toggle_play();
            return;
        }
        Some(ControlHit::Mute) => {
            model.track.toggle_mute();
            return;
        }
        None => {}
    }

    if let Some(idx) = model.showcase.mute_button_hit(pos, bounds) {
        if let Some(clip) = model.clips.get_mut(idx) {
            clip.toggle_mute(&mut model.floor);
        }
    }
}

fn mouse_wheel(app: &App, model: &mut Model, delta: MouseScrollDelta, _phase: TouchPhase) {
    let bounds = app.window_rect();
    let amount = match delta {
        MouseScrollDelta::LineDelta(_, y) => -y * model.config.scroll_speed(),
        MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
    };
    model.showcase.scroll_by(amount, bounds);
}

fn touched(_app: &App, model: &mut Model, touch: TouchEvent) {
    // A touch counts as the unlocking gesture, same as a click or key press
    if touch.phase == TouchPhase::Started && model.gate.fire() {
        model.track.unlock(&mut model.session);
    }
}

/// Mouse position normalized to [-1, 1] on each axis.
fn normalized_pointer(app: &App) -> [f32; 2] {
    let bounds = app.window_rect();
    let half_w = (bounds.w() / 2.0).max(1.0);
    let half_h = (bounds.h() / 2.0).max(1.0);
    [
        (app.mouse.x / half_w).clamp(-1.0, 1.0),
        (app.mouse.y / half_h).clamp(-1.0, 1.0),
    ]
}
