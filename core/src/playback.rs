// Background playback of a synthesized buffer in fixed-size blocks.
//
// The worker thread owns both the buffer and the sink. Cancellation is a
// message on a channel, polled before every block, so a stop takes effect
// within one block of audio.
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::error::{MorseError, Result};
use crate::types::SampleBuffer;

pub const BLOCK_SIZE: usize = 1024;

/// Destination for played samples, typically an output device.
pub trait SampleSink {
    fn write(&mut self, block: &[f32]) -> Result<()>;
    fn close(&mut self) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    Completed { blocks_written: usize },
    Cancelled { blocks_written: usize },
}

impl PlaybackOutcome {
    pub fn blocks_written(&self) -> usize {
        match *self {
            PlaybackOutcome::Completed { blocks_written }
            | PlaybackOutcome::Cancelled { blocks_written } => blocks_written,
        }
    }
}

/// Handle to one running playback. Dropping it stops the playback.
pub struct PlaybackSession {
    stop_tx: Sender<()>,
    worker: Option<JoinHandle<Result<PlaybackOutcome>>>,
}

/// Start playing `buffer` on a background thread.
///
/// `open_sink` runs on that thread, so the sink it returns never has to be
/// `Send`. The sink is closed however the session ends.
pub fn start<F, S>(buffer: SampleBuffer, open_sink: F) -> Result<PlaybackSession>
where
    F: FnOnce(u32) -> Result<S> + Send + 'static,
    S: SampleSink,
{
    let (stop_tx, stop_rx) = mpsc::channel();

    let worker = thread::Builder::new()
        .name("morse-playback".into())
        .spawn(move || {
            let mut sink = open_sink(buffer.sample_rate).map_err(|e| match e {
                MorseError::DeviceUnavailable(_) => e,
                other => MorseError::unavailable(other),
            })?;
            log::debug!(
                "playback started: {} samples in blocks of {}",
                buffer.len(),
                BLOCK_SIZE
            );

            let outcome = write_blocks(&buffer, &mut sink, &stop_rx);
            let closed = sink.close();

            match (outcome, closed) {
                (Err(e), _) | (Ok(_), Err(e)) => {
                    log::warn!("playback aborted: {e}");
                    Err(e)
                }
                (Ok(outcome), Ok(())) => {
                    log::debug!("playback finished: {outcome:?}");
                    Ok(outcome)
                }
            }
        })
        .map_err(MorseError::unavailable)?;

    Ok(PlaybackSession {
        stop_tx,
        worker: Some(worker),
    })
}

fn write_blocks<S: SampleSink>(
    buffer: &SampleBuffer,
    sink: &mut S,
    stop_rx: &Receiver<()>,
) -> Result<PlaybackOutcome> {
    let mut blocks_written = 0;
    for block in buffer.blocks(BLOCK_SIZE) {
        if stop_requested(stop_rx) {
            return Ok(PlaybackOutcome::Cancelled { blocks_written });
        }
        sink.write(block).map_err(|e| match e {
            MorseError::DeviceWriteFailure(_) => e,
            other => MorseError::write_failure(other),
        })?;
        blocks_written += 1;
    }
    Ok(PlaybackOutcome::Completed { blocks_written })
}

// A dropped handle counts as a stop request.
fn stop_requested(stop_rx: &Receiver<()>) -> bool {
    match stop_rx.try_recv() {
        Ok(()) | Err(TryRecvError::Disconnected) => true,
        Err(TryRecvError::Empty) => false,
    }
}

impl PlaybackSession {
    /// Ask the worker to stop and wait for it. Once this returns no more
    /// blocks reach the sink and the sink has been closed.
    pub fn stop(mut self) -> Result<PlaybackOutcome> {
        let _ = self.stop_tx.send(());
        self.join()
    }

    /// Wait for playback to run to its end.
    pub fn wait(mut self) -> Result<PlaybackOutcome> {
        self.join()
    }

    pub fn is_finished(&self) -> bool {
        self.worker.as_ref().map_or(true, |w| w.is_finished())
    }

    fn join(&mut self) -> Result<PlaybackOutcome> {
        match self.worker.take() {
            Some(worker) => worker
                .join()
                .unwrap_or_else(|_| Err(MorseError::write_failure("playback thread panicked"))),
            None => Ok(PlaybackOutcome::Cancelled { blocks_written: 0 }),
        }
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        if self.worker.is_some() {
            let _ = self.stop_tx.send(());
            let _ = self.join();
        }
    }
}

/// Keeps at most one session alive: starting a new playback stops the
/// previous one first.
pub struct Player<F> {
    open_sink: F,
    current: Option<PlaybackSession>,
}

impl<F, S> Player<F>
where
    F: Fn(u32) -> Result<S> + Clone + Send + 'static,
    S: SampleSink,
{
    pub fn new(open_sink: F) -> Self {
        Self {
            open_sink,
            current: None,
        }
    }

    pub fn play(&mut self, buffer: SampleBuffer) -> Result<()> {
        if let Some(Err(e)) = self.stop() {
            log::warn!("previous playback ended with an error: {e}");
        }
        self.current = Some(start(buffer, self.open_sink.clone())?);
        Ok(())
    }

    /// Stop the active session, if any, and report how it ended.
    pub fn stop(&mut self) -> Option<Result<PlaybackOutcome>> {
        self.current.take().map(PlaybackSession::stop)
    }

    pub fn is_playing(&self) -> bool {
        self.current.as_ref().is_some_and(|s| !s.is_finished())
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    blocks: Vec<Vec<f32>>,
    closed: bool,
}

/// Sink that keeps every written block in memory. Clones share the same
/// storage, so a clone handed to a session can be inspected afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    state: Arc<Mutex<MemoryState>>,
    pace: Option<Duration>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep for `pace` on every write, imitating a device that blocks
    /// while it plays.
    pub fn paced(pace: Duration) -> Self {
        Self {
            pace: Some(pace),
            ..Self::default()
        }
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn blocks_written(&self) -> usize {
        self.state().blocks.len()
    }

    pub fn samples(&self) -> Vec<f32> {
        self.state().blocks.concat()
    }

    pub fn is_closed(&self) -> bool {
        self.state().closed
    }
}

impl SampleSink for MemorySink {
    fn write(&mut self, block: &[f32]) -> Result<()> {
        if let Some(pace) = self.pace {
            thread::sleep(pace);
        }
        let mut state = self.state();
        if state.closed {
            return Err(MorseError::write_failure("sink is closed"));
        }
        state.blocks.push(block.to_vec());
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.state().closed = true;
        Ok(())
    }
}
