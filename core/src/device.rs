// Default output device sink built on cpal.
//
// cpal pulls samples from a callback while the playback worker pushes
// blocks; a small bounded channel between them makes `write` block at
// roughly the rate the device consumes audio.
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use crate::error::{MorseError, Result};
use crate::playback::SampleSink;

const QUEUED_BLOCKS: usize = 2;
const DRAIN_POLL: Duration = Duration::from_millis(5);
const DRAIN_MARGIN: Duration = Duration::from_millis(250);

pub struct CpalSink {
    stream: Option<cpal::Stream>,
    tx: Option<SyncSender<Vec<f32>>>,
    pending: Arc<AtomicUsize>,
    sample_rate: u32,
}

impl CpalSink {
    /// Open the default output device as a mono-fed stream at `sample_rate`.
    pub fn open(sample_rate: u32) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| MorseError::unavailable("no output device on the default audio host"))?;
        let supported = device
            .default_output_config()
            .map_err(MorseError::unavailable)?;

        let channels = supported.channels();
        let config = cpal::StreamConfig {
            channels,
            sample_rate: cpal::SampleRate(sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let (tx, rx) = sync_channel::<Vec<f32>>(QUEUED_BLOCKS);
        let pending = Arc::new(AtomicUsize::new(0));
        let mut feeder = Feeder {
            rx,
            current: Vec::new(),
            pos: 0,
            pending: Arc::clone(&pending),
        };

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    feeder.fill(data, channels as usize)
                },
                |err| log::warn!("output stream error: {err}"),
                None,
            )
            .map_err(MorseError::unavailable)?;
        stream.play().map_err(MorseError::unavailable)?;

        log::debug!("opened output device at {sample_rate} Hz, {channels} channel(s)");

        Ok(Self {
            stream: Some(stream),
            tx: Some(tx),
            pending,
            sample_rate,
        })
    }
}

struct Feeder {
    rx: Receiver<Vec<f32>>,
    current: Vec<f32>,
    pos: usize,
    pending: Arc<AtomicUsize>,
}

impl Feeder {
    fn next_sample(&mut self) -> f32 {
        while self.pos >= self.current.len() {
            match self.rx.try_recv() {
                Ok(block) => {
                    self.current = block;
                    self.pos = 0;
                }
                Err(_) => return 0.0,
            }
        }
        let sample = self.current[self.pos];
        self.pos += 1;
        self.pending.fetch_sub(1, Ordering::AcqRel);
        sample
    }

    // Mono source copied to every output channel.
    fn fill(&mut self, data: &mut [f32], channels: usize) {
        for frame in data.chunks_mut(channels.max(1)) {
            let sample = self.next_sample();
            frame.fill(sample);
        }
    }
}

impl SampleSink for CpalSink {
    fn write(&mut self, block: &[f32]) -> Result<()> {
        let tx = self
            .tx
            .as_ref()
            .ok_or_else(|| MorseError::write_failure("output stream already closed"))?;
        self.pending.fetch_add(block.len(), Ordering::AcqRel);
        tx.send(block.to_vec()).map_err(MorseError::write_failure)
    }

    fn close(&mut self) -> Result<()> {
        self.tx.take();

        let queued = self.pending.load(Ordering::Acquire);
        let deadline = Instant::now()
            + Duration::from_secs_f64(queued as f64 / self.sample_rate.max(1) as f64)
            + DRAIN_MARGIN;
        while self.pending.load(Ordering::Acquire) > 0 && Instant::now() < deadline {
            thread::sleep(DRAIN_POLL);
        }

        if let Some(stream) = self.stream.take() {
            stream.pause().map_err(MorseError::write_failure)?;
        }
        Ok(())
    }
}

impl Drop for CpalSink {
    fn drop(&mut self) {
        if self.stream.is_some() {
            let _ = self.close();
        }
    }
}
