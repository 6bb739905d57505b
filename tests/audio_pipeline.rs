use drop_radio::analysis::{BeatDetector, SpectrumAnalyzer};
use drop_radio::audio::AudioData;
use drop_radio::effect::{ActiveLineSet, BeatFrame, Canvas};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const RATE: u32 = 44_100;
const FPS: usize = 60;
const FFT_SIZE: usize = 2048;

/// Silence with a 100 ms burst of white noise starting every second at +0.25 s.
fn bursts(seconds: usize) -> AudioData {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let samples = (0..RATE as usize * seconds)
        .map(|i| {
            let t = (i % RATE as usize) as f32 / RATE as f32;
            if (0.25..0.35).contains(&t) {
                rng.gen_range(-0.5f32..0.5)
            } else {
                0.0
            }
        })
        .collect();
    AudioData::from_samples(RATE, samples)
}

struct Run {
    beat_frames: Vec<usize>,
    spawned: usize,
    live_at_end: usize,
}

fn play(audio: &AudioData, seed: u64) -> Run {
    let mut analyzer = SpectrumAnalyzer::new(audio.sample_rate, FFT_SIZE);
    let mut detector = BeatDetector::new();
    let mut lines = ActiveLineSet::new();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut window = Vec::new();

    let frames = (audio.duration_sec * FPS as f32) as usize;
    let mut beat_frames = Vec::new();
    let mut spawned = 0;
    for frame in 0..frames {
        let end = frame * RATE as usize / FPS;
        audio.window_ending_at(end, FFT_SIZE, &mut window);
        analyzer.analyze(&window);
        let beat = detector.update(&analyzer);
        if beat {
            beat_frames.push(frame);
        }
        let input = BeatFrame::new(beat, analyzer.bands(), Canvas::new(800.0, 600.0));
        spawned += lines.advance(&input, &mut rng).spawned;
    }

    Run {
        beat_frames,
        spawned,
        live_at_end: lines.len(),
    }
}

#[test]
fn noise_bursts_trigger_beats_and_lines() {
    let audio = bursts(4);
    let run = play(&audio, 1);

    assert!(run.beat_frames.len() >= 3, "{:?}", run.beat_frames);
    assert!(run.beat_frames.len() <= 8, "{:?}", run.beat_frames);
    // nothing fires during the silent lead-in
    assert!(run.beat_frames.iter().all(|&f| f >= FPS / 4), "{:?}", run.beat_frames);
    assert!(run.spawned > 0);
}

#[test]
fn silence_spawns_nothing() {
    let audio = AudioData::from_samples(RATE, vec![0.0; RATE as usize * 2]);
    let run = play(&audio, 1);
    assert!(run.beat_frames.is_empty());
    assert_eq!(run.spawned, 0);
    assert_eq!(run.live_at_end, 0);
}

#[test]
fn same_audio_and_seed_replays_identically() {
    let audio = bursts(3);
    let a = play(&audio, 7);
    let b = play(&audio, 7);
    assert_eq!(a.beat_frames, b.beat_frames);
    assert_eq!(a.spawned, b.spawned);
    assert_eq!(a.live_at_end, b.live_at_end);
}
