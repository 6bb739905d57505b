use std::path::PathBuf;

use nannou::draw::{Renderer, RendererBuilder};
use nannou::prelude::*;
use nannou::wgpu;
use nannou::window::Window;

use super::lines::LineRenderer;
use crate::effect::ActiveLineSet;

/// Offscreen texture the lines are painted into.
///
/// The texture is only cleared on request, so trails build up across frames
/// underneath a HUD that is redrawn from scratch every frame.
pub struct LineLayer {
    texture: wgpu::Texture,
    renderer: Renderer,
    reshaper: wgpu::TextureReshaper,
    capturer: wgpu::TextureCapturer,
    draw: Draw,
    lines: LineRenderer,
    pending: Pending,
}

/// Work queued for the next render.
#[derive(Debug, PartialEq)]
struct Pending {
    clear: bool,
    screenshot: Option<PathBuf>,
}

impl Default for Pending {
    // a fresh texture holds garbage until cleared
    fn default() -> Self {
        Self {
            clear: true,
            screenshot: None,
        }
    }
}

impl Pending {
    fn take(&mut self) -> Self {
        std::mem::replace(
            self,
            Self {
                clear: false,
                screenshot: None,
            },
        )
    }
}

impl LineLayer {
    pub fn new(window: &Window, fade_alpha: f32) -> Self {
        let (texture, renderer, reshaper) = build_target(window);
        Self {
            texture,
            renderer,
            reshaper,
            capturer: wgpu::TextureCapturer::default(),
            draw: Draw::new(),
            lines: LineRenderer::new(fade_alpha),
            pending: Pending::default(),
        }
    }

    pub fn size(&self) -> [u32; 2] {
        self.texture.size()
    }

    /// Rebuilds the texture when the window size changed. Trails are lost.
    pub fn resize(&mut self, window: &Window) {
        if texture_size(window.inner_size_points()) == self.size() {
            return;
        }
        let (texture, renderer, reshaper) = build_target(window);
        self.texture = texture;
        self.renderer = renderer;
        self.reshaper = reshaper;
        self.pending.clear = true;
    }

    /// The next render starts from black.
    pub fn clear(&mut self) {
        self.pending.clear = true;
    }

    /// Saves the layer as a PNG after the next render.
    pub fn request_screenshot(&mut self, path: PathBuf) {
        self.pending.screenshot = Some(path);
    }

    pub fn render(&mut self, window: &Window, lines: &ActiveLineSet) {
        let [w, h] = self.size();
        let rect = Rect::from_w_h(w as f32, h as f32);

        let pending = self.pending.take();
        self.draw.reset();
        if pending.clear {
            self.draw.background().color(BLACK);
        }
        self.lines.draw(&self.draw, rect, lines);

        let device = window.device();
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("line layer"),
        });
        self.renderer
            .render_to_texture(device, &mut encoder, &self.draw, &self.texture);
        let snapshot = pending
            .screenshot
            .map(|path| (path, self.capturer.capture(device, &mut encoder, &self.texture)));
        window.queue().submit(Some(encoder.finish()));

        if let Some((path, snapshot)) = snapshot {
            let queued = snapshot.read(move |result| match result {
                Ok(image) => match image.to_owned().save(&path) {
                    Ok(()) => log::info!("saved screenshot to {}", path.display()),
                    Err(e) => log::error!("failed to save {}: {e}", path.display()),
                },
                Err(e) => log::error!("failed to read back line layer: {e:?}"),
            });
            if queued.is_err() {
                log::error!("screenshot dropped: capture queue timed out");
            }
        }
    }

    /// Stretches the layer over the whole frame.
    pub fn blit(&self, frame: &Frame) {
        let mut encoder = frame.command_encoder();
        self.reshaper
            .encode_render_pass(frame.texture_view(), &mut *encoder);
    }

    /// Blocks until pending screenshots are on disk.
    pub fn finish(&self, window: &Window) {
        if self.capturer.await_active_snapshots(window.device()).is_err() {
            log::error!("timed out writing screenshots");
        }
    }
}

fn texture_size((w, h): (f32, f32)) -> [u32; 2] {
    [(w as u32).max(1), (h as u32).max(1)]
}

fn build_target(window: &Window) -> (wgpu::Texture, Renderer, wgpu::TextureReshaper) {
    let device = window.device();
    let sample_count = window.msaa_samples();
    let texture = wgpu::TextureBuilder::new()
        .size(texture_size(window.inner_size_points()))
        .usage(wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING)
        .sample_count(sample_count)
        .format(Frame::TEXTURE_FORMAT)
        .build(device);

    let renderer =
        RendererBuilder::new().build_from_texture_descriptor(device, texture.descriptor());

    let view = texture.view().build();
    let reshaper = wgpu::TextureReshaper::new(
        device,
        &view,
        sample_count,
        texture.sample_type(),
        sample_count,
        Frame::TEXTURE_FORMAT,
    );
    (texture, renderer, reshaper)
}
