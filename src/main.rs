mod cli;

use clap::Parser;
use drop_radio::analysis::{BeatDetector, SpectrumAnalyzer};
use drop_radio::audio::{self, AudioData, Loader, Player};
use drop_radio::effect::{ActiveLineSet, BeatFrame, Canvas};
use drop_radio::ui::{Hud, HudAction, Pointer, TransportState, text};
use drop_radio::visual::{HudRenderer, LineLayer, to_screen};
use nannou::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use std::sync::Arc;

use cli::Args;

/// Everything tied to the currently loaded file.
struct Track {
    player: Player,
    analyzer: SpectrumAnalyzer,
    beat: BeatDetector,
}

struct Model {
    args: Args,
    lines: ActiveLineSet,
    rng: ChaCha8Rng,
    hud: Hud,
    layer: LineLayer,
    loader: Option<Loader>,
    track: Option<Track>,
    scratch_window: Vec<f32>,
    // kept across tracks
    volume: f32,
    pan: f32,
    screenshots: u32,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    nannou::app(model).update(update).exit(exit).run();
}

fn model(app: &App) -> Model {
    let args = Args::parse();

    let window_id = app
        .new_window()
        .size(args.width, args.height)
        .title("drop radio")
        .view(view)
        .dropped_file(dropped_file)
        .key_released(key_released)
        .mouse_pressed(mouse_pressed)
        .mouse_released(mouse_released)
        .resized(resized)
        .build()
        .expect("Failed to build window");

    let rng = match args.seed {
        Some(seed) => {
            log::info!("line effect seed {seed}");
            ChaCha8Rng::seed_from_u64(seed)
        }
        None => ChaCha8Rng::from_entropy(),
    };

    let layer = {
        let window = app.window(window_id).expect("Window closed during setup");
        LineLayer::new(&window, args.trail_fade)
    };

    let win = app.window_rect();
    let mut model = Model {
        hud: Hud::new(win.w(), win.h()),
        layer,
        scratch_window: Vec::with_capacity(args.fft_size),
        lines: ActiveLineSet::new(),
        rng,
        loader: None,
        track: None,
        volume: 1.0,
        pan: 0.0,
        screenshots: 0,
        args,
    };

    if let Some(path) = model.args.file.clone() {
        start_loading(&mut model, path);
    }
    model
}

fn start_loading(model: &mut Model, path: PathBuf) {
    if !audio::is_supported(&path) {
        log::warn!("ignoring {}: not a supported audio file", path.display());
        return;
    }
    unload(model);
    // replacing a loader cancels its decode
    model.loader = Some(Loader::spawn(path));
}

fn on_loaded(model: &mut Model, data: AudioData) {
    let data = Arc::new(data);
    match Player::start(data.clone(), model.volume, model.pan) {
        Ok(player) => {
            model.track = Some(Track {
                player,
                analyzer: SpectrumAnalyzer::new(data.sample_rate, model.args.fft_size),
                beat: BeatDetector::new(),
            });
            model.lines.clear();
            model.layer.clear();
            model.hud.on_loaded();
        }
        Err(e) => log::error!("{e:#}"),
    }
}

/// Stops playback and wipes the screen.
fn unload(model: &mut Model) {
    if model.track.take().is_some() {
        log::info!("track unloaded");
    }
    model.lines.clear();
    model.layer.clear();
}

fn transport_state(model: &Model) -> TransportState {
    match &model.track {
        Some(track) => TransportState {
            loaded: true,
            playing: track.player.is_playing(),
            current_time: track.player.current_time(),
            duration: track.player.duration(),
            volume: model.volume,
        },
        None => TransportState {
            volume: model.volume,
            ..TransportState::default()
        },
    }
}

fn apply(model: &mut Model, action: HudAction) {
    match action {
        HudAction::Stop => unload(model),
        HudAction::Volume(v) => model.volume = v,
        HudAction::Pan(p) => model.pan = p,
        _ => {}
    }

    let Some(track) = &model.track else {
        return;
    };
    match action {
        HudAction::TogglePlayback => track.player.toggle(),
        HudAction::Seek(t) => track.player.seek(t),
        HudAction::Volume(v) => track.player.set_volume(v),
        HudAction::Pan(p) => track.player.set_pan(p),
        HudAction::Stop => {}
    }
}

fn pointer(app: &App) -> Pointer {
    Pointer {
        position: to_screen(app.window_rect(), pt2(app.mouse.x, app.mouse.y)),
        left_down: app.mouse.buttons.left().is_down(),
    }
}

fn update(app: &App, model: &mut Model, _update: Update) {
    let frame = app.elapsed_frames();

    if let Some(loader) = model.loader.as_mut() {
        if let Some(result) = loader.poll() {
            let path = loader.path().to_path_buf();
            model.loader = None;
            match result {
                Ok(data) => on_loaded(model, data),
                Err(e) => log::error!("failed to load {}: {e:#}", path.display()),
            }
        }
    }

    let transport = transport_state(model);
    for action in model.hud.update(&pointer(app), &transport) {
        apply(model, action);
    }

    let ended = model.track.as_ref().is_some_and(|t| t.player.has_ended());
    if ended {
        log::info!("track finished");
        unload(model);
    }

    let Some(track) = model.track.as_mut() else {
        return;
    };

    track.player.data().window_ending_at(
        track.player.position(),
        model.args.fft_size,
        &mut model.scratch_window,
    );
    track.analyzer.analyze(&model.scratch_window);
    let beat = track.beat.update(&track.analyzer);

    let win = app.window_rect();
    let input = BeatFrame::new(beat, track.analyzer.bands(), Canvas::new(win.w(), win.h()));
    let report = model.lines.advance(&input, &mut model.rng);
    if report.spawned > 0 || report.retired > 0 {
        log::debug!(
            "frame {frame}: +{} -{} lines ({} live)",
            report.spawned,
            report.retired,
            model.lines.len()
        );
    }

    model.layer.render(&app.main_window(), &model.lines);
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let win = app.window_rect();

    if model.track.is_some() {
        model.layer.blit(&frame);
        HudRenderer.draw(&draw, win, &model.hud, &transport_state(model));
    } else {
        frame.clear(BLACK);
        let message = match &model.loader {
            Some(loader) => text::loading_text(loader.progress()),
            None => text::PROMPT.to_string(),
        };
        HudRenderer.draw_center_text(&draw, win, &model.hud.layout, &message);
    }

    if let Err(e) = draw.to_frame(app, &frame) {
        log::error!("failed to draw frame: {e:?}");
    }
}

fn exit(app: &App, model: Model) {
    model.layer.finish(&app.main_window());
}

fn dropped_file(_app: &App, model: &mut Model, path: PathBuf) {
    start_loading(model, path);
}

fn key_released(app: &App, model: &mut Model, key: Key) {
    match key {
        Key::Return => model.hud.toggle_visible(model.track.is_some()),
        Key::Space => {
            if let Some(track) = &model.track {
                track.player.toggle();
            }
        }
        Key::LShift | Key::RShift => save_screenshot(model),
        _ => {}
    }
}

// Saves the line layer only, without the HUD.
fn save_screenshot(model: &mut Model) {
    if model.track.is_none() {
        log::warn!("no track playing, nothing to capture");
        return;
    }
    let path = model
        .args
        .screenshot_dir
        .join(format!("drop-radio_screenshot_{:03}.png", model.screenshots));
    model.screenshots += 1;
    model.layer.request_screenshot(path);
}

fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        model.hud.mouse_pressed(pointer(app).position);
    }
}

fn mouse_released(app: &App, model: &mut Model, button: MouseButton) {
    let duration = transport_state(model).duration;
    if let Some(action) = model.hud.mouse_released(duration) {
        apply(model, action);
    }
    if button == MouseButton::Left {
        for action in model.hud.mouse_clicked(pointer(app).position) {
            apply(model, action);
        }
    }
}

fn resized(app: &App, model: &mut Model, size: Vec2) {
    model.hud.resize(size.x, size.y);
    model.layer.resize(&app.main_window());
}
