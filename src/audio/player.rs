use anyhow::Context;
use rodio::{OutputStream, Sink, Source};
use std::f32::consts::FRAC_PI_4;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::time::Duration;

use super::track::AudioData;

/// Playback state shared with the output callback. Atomics only, so the
/// frame loop never waits on the audio thread.
#[derive(Debug)]
struct Transport {
    position: AtomicUsize,
    playing: AtomicBool,
    stopped: AtomicBool,
    volume: AtomicU32,
    pan: AtomicU32,
}

impl Transport {
    fn new(volume: f32, pan: f32) -> Self {
        Self {
            position: AtomicUsize::new(0),
            playing: AtomicBool::new(false),
            stopped: AtomicBool::new(false),
            volume: AtomicU32::new(volume.clamp(0.0, 1.0).to_bits()),
            pan: AtomicU32::new(pan.clamp(-1.0, 1.0).to_bits()),
        }
    }

    fn volume(&self) -> f32 {
        f32::from_bits(self.volume.load(Ordering::Relaxed))
    }

    fn pan(&self) -> f32 {
        f32::from_bits(self.pan.load(Ordering::Relaxed))
    }
}

/// Equal-power left/right gains for a pan in `[-1, 1]`.
pub fn pan_gains(pan: f32) -> (f32, f32) {
    let angle = (pan.clamp(-1.0, 1.0) + 1.0) * FRAC_PI_4;
    (angle.cos(), angle.sin())
}

/// Streams an [`AudioData`] as interleaved stereo, reading position, pause,
/// volume and pan from the shared transport on every frame.
///
/// Paused or finished playback yields silence rather than ending the source;
/// only a stop ends it.
struct TrackSource {
    data: Arc<AudioData>,
    transport: Arc<Transport>,
    right: Option<f32>,
}

impl TrackSource {
    fn new(data: Arc<AudioData>, transport: Arc<Transport>) -> Self {
        Self {
            data,
            transport,
            right: None,
        }
    }
}

impl Iterator for TrackSource {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if let Some(s) = self.right.take() {
            return Some(s);
        }
        if self.transport.stopped.load(Ordering::Relaxed) {
            return None;
        }

        let len = self.data.samples_mono.len();
        let frame = if self.transport.playing.load(Ordering::Relaxed) {
            self.transport
                .position
                .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |p| {
                    (p < len).then_some(p + 1)
                })
                .ok()
        } else {
            None
        };

        let (left, right) = match frame {
            Some(p) => {
                let s = self.data.samples_mono[p] * self.transport.volume();
                let (gl, gr) = pan_gains(self.transport.pan());
                (s * gl, s * gr)
            }
            None => (0.0, 0.0),
        };

        self.right = Some(right);
        Some(left)
    }
}

impl Source for TrackSource {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }
    fn channels(&self) -> u16 {
        2
    }
    fn sample_rate(&self) -> u32 {
        self.data.sample_rate
    }
    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

/// Owns the output device for one loaded track.
pub struct Player {
    _stream: OutputStream, // must stay alive for audio to keep playing
    sink: Sink,
    transport: Arc<Transport>,
    data: Arc<AudioData>,
}

impl Player {
    /// Opens the default output and starts playing from the beginning.
    pub fn start(data: Arc<AudioData>, volume: f32, pan: f32) -> anyhow::Result<Self> {
        let (_stream, handle) =
            OutputStream::try_default().context("Failed to open audio output device")?;
        let sink = Sink::try_new(&handle).context("Failed to create audio sink")?;

        let transport = Arc::new(Transport::new(volume, pan));
        sink.append(TrackSource::new(data.clone(), transport.clone()));
        transport.playing.store(true, Ordering::Relaxed);

        log::info!(
            "playing {:.1}s of audio at {} Hz",
            data.duration_sec,
            data.sample_rate
        );

        Ok(Self {
            _stream,
            sink,
            transport,
            data,
        })
    }

    pub fn data(&self) -> &Arc<AudioData> {
        &self.data
    }

    pub fn play(&self) {
        self.transport.playing.store(true, Ordering::Relaxed);
    }

    pub fn pause(&self) {
        self.transport.playing.store(false, Ordering::Relaxed);
    }

    pub fn toggle(&self) {
        self.transport.playing.fetch_xor(true, Ordering::Relaxed);
    }

    pub fn is_playing(&self) -> bool {
        self.transport.playing.load(Ordering::Relaxed)
    }

    /// Jumps to `seconds`, clamped to the track.
    pub fn seek(&self, seconds: f32) {
        let frame = self.data.frame_at(seconds);
        log::debug!("seek to {seconds:.2}s (frame {frame})");
        self.transport.position.store(frame, Ordering::Relaxed);
    }

    pub fn position(&self) -> usize {
        self.transport
            .position
            .load(Ordering::Relaxed)
            .min(self.data.samples_mono.len())
    }

    pub fn current_time(&self) -> f32 {
        self.position() as f32 / self.data.sample_rate.max(1) as f32
    }

    pub fn duration(&self) -> f32 {
        self.data.duration_sec
    }

    pub fn has_ended(&self) -> bool {
        self.position() >= self.data.samples_mono.len()
    }

    pub fn set_volume(&self, volume: f32) {
        let v = volume.clamp(0.0, 1.0);
        self.transport.volume.store(v.to_bits(), Ordering::Relaxed);
    }

    pub fn volume(&self) -> f32 {
        self.transport.volume()
    }

    pub fn set_pan(&self, pan: f32) {
        let p = pan.clamp(-1.0, 1.0);
        self.transport.pan.store(p.to_bits(), Ordering::Relaxed);
    }

    pub fn pan(&self) -> f32 {
        self.transport.pan()
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.transport.stopped.store(true, Ordering::Relaxed);
        self.sink.stop();
    }
}
