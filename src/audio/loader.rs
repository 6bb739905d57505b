use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use super::track::AudioData;

pub enum LoadEvent {
    Progress(f32),
    Loaded(AudioData),
    Failed(anyhow::Error),
}

/// Decodes one file on a background thread. Poll it once per frame.
///
/// Dropping the loader cancels the decode at its next progress report.
pub struct Loader {
    path: PathBuf,
    events: Receiver<LoadEvent>,
    progress: f32,
    cancel: Arc<AtomicBool>,
    _worker: thread::JoinHandle<()>,
}

impl Loader {
    pub fn spawn(path: PathBuf) -> Self {
        Self::spawn_with(path, Arc::new(AtomicBool::new(false)))
    }

    fn spawn_with(path: PathBuf, cancel: Arc<AtomicBool>) -> Self {
        let (tx, events) = mpsc::channel();
        let worker_path = path.clone();
        let worker_cancel = cancel.clone();
        let _worker = thread::spawn(move || {
            let progress_tx = tx.clone();
            let result = AudioData::load(&worker_path, |p| {
                if worker_cancel.load(Ordering::Relaxed) {
                    anyhow::bail!("Loading {} cancelled", worker_path.display());
                }
                let _ = progress_tx.send(LoadEvent::Progress(p));
                Ok(())
            });
            if worker_cancel.load(Ordering::Relaxed) {
                log::debug!("stopped decoding {}", worker_path.display());
            }
            let _ = tx.send(match result {
                Ok(data) => LoadEvent::Loaded(data),
                Err(e) => LoadEvent::Failed(e),
            });
        });

        log::info!("loading {}", path.display());
        Self {
            path,
            events,
            progress: 0.0,
            cancel,
            _worker,
        }
    }

    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Drains pending events. Returns the final outcome once there is one.
    pub fn poll(&mut self) -> Option<anyhow::Result<AudioData>> {
        loop {
            match self.events.try_recv() {
                Ok(LoadEvent::Progress(p)) => self.progress = p,
                Ok(LoadEvent::Loaded(data)) => return Some(Ok(data)),
                Ok(LoadEvent::Failed(e)) => return Some(Err(e)),
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => {
                    return Some(Err(anyhow::anyhow!(
                        "Loader for {} exited without a result",
                        self.path.display()
                    )));
                }
            }
        }
    }
}

impl Drop for Loader {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait(loader: &mut Loader) -> anyhow::Result<AudioData> {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            if let Some(result) = loader.poll() {
                return result;
            }
            assert!(Instant::now() < deadline, "loader timed out");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn missing_file_reports_failure() {
        let mut loader = Loader::spawn(PathBuf::from("/definitely/not/here.wav"));
        assert!(wait(&mut loader).is_err());
    }

    fn one_second_wav(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "drop_radio_loader_{}_{name}.wav",
            std::process::id()
        ));
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 22_050,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut w = hound::WavWriter::create(&path, spec).unwrap();
        for i in 0..22_050 {
            w.write_sample(((i % 100) as i16 - 50) * 100).unwrap();
        }
        w.finalize().unwrap();
        path
    }

    #[test]
    fn cancelled_loader_stops_without_a_track() {
        let path = one_second_wav("cancelled");
        let mut loader = Loader::spawn_with(path.clone(), Arc::new(AtomicBool::new(true)));
        let err = wait(&mut loader).err().unwrap();
        std::fs::remove_file(&path).ok();

        assert!(err.to_string().contains("cancelled"), "{err:#}");
    }

    #[test]
    fn wav_loads_in_background() {
        let path = one_second_wav("ok");
        let mut loader = Loader::spawn(path.clone());
        let data = wait(&mut loader).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(data.samples_mono.len(), 22_050);
        assert!((data.duration_sec - 1.0).abs() < 1e-6);
    }
}
