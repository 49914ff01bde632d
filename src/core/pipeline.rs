//! Concurrent match dispatch and result assembly
//!
//! One dispatcher (the calling thread) enumerates grid cells into a bounded
//! job queue, a fixed pool of matcher workers resolves each cell against the
//! candidate index, and a single assembler thread pastes results into the
//! output canvas. The two channels are the only shared mutable state; the
//! candidate index is shared read-only.
//!
//! Termination is an explicit countdown: after the last job the dispatcher
//! sends exactly one [`JobMessage::Stop`] per worker, each worker forwards one
//! [`ResultMessage::WorkerDone`], and the assembler finalizes once it has seen
//! as many as there are workers. Channel disconnection is treated as an
//! implicit stop so a failing stage cannot strand the others on a blocking
//! wait.

use crate::core::canvas::{Canvas, CellLocation};
use crate::core::index::CandidateIndex;
use crate::core::profile::ColorProfile;
use crate::io::configuration::MosaicConfig;
use crate::io::error::{Result, pipeline_failure};
use crate::io::progress::ProgressTracker;
use image::RgbImage;
use std::sync::mpsc::{Receiver, Sender, SyncSender};
use std::sync::{Arc, Mutex, mpsc};
use std::thread;

/// One unit of matching work: a grid cell's profile and where it lives
#[derive(Debug, Clone)]
pub struct MatchJob {
    /// Downsampled profile of the cell, cropped from the small target
    pub profile: ColorProfile,
    /// Full-resolution destination rectangle on the canvas
    pub location: CellLocation,
}

/// Outcome of one match: which tile to paste at which cell
#[derive(Debug, Clone, Copy)]
pub struct MatchResult {
    /// Full-resolution destination rectangle on the canvas
    pub location: CellLocation,
    /// Index of the winning tile in the candidate index
    pub tile_index: usize,
}

/// Message on the job queue, dispatcher to workers
#[derive(Debug)]
pub enum JobMessage {
    /// A grid cell to match
    Cell(MatchJob),
    /// No more jobs; each worker consumes exactly one
    Stop,
}

/// Message on the result channel, workers to assembler
#[derive(Debug)]
pub enum ResultMessage {
    /// A resolved cell ready to paste
    Matched(MatchResult),
    /// One worker has stopped
    WorkerDone,
}

/// Runs the dispatcher, worker pool, and assembler for one mosaic
#[derive(Debug)]
pub struct MosaicPipeline {
    config: MosaicConfig,
    index: Arc<CandidateIndex>,
}

impl MosaicPipeline {
    /// Create a pipeline over an immutable candidate index
    pub fn new(config: MosaicConfig, index: Arc<CandidateIndex>) -> Self {
        Self { config, index }
    }

    /// Match every grid cell and assemble the mosaic canvas
    ///
    /// `target_width`/`target_height` are the upscaled target's dimensions and
    /// define the grid; `small_target` is the downsampled rendition cropped
    /// per cell into match profiles. Results may arrive at the assembler in
    /// any order; each carries its own location so pasting is
    /// order-independent.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MosaicError::PipelineFailure`] if a worker or the
    /// assembler thread panics. No partial canvas is produced on failure.
    pub fn run(
        &self,
        small_target: &RgbImage,
        target_width: u32,
        target_height: u32,
        progress: Option<&ProgressTracker>,
    ) -> Result<Canvas> {
        let canvas = Canvas::new(target_width, target_height, self.config.tile_dim);
        let (x_count, y_count) = (canvas.x_count(), canvas.y_count());
        let worker_count = self.config.workers.max(1);

        // Bounded queue: a full queue blocks the dispatcher, limiting how far
        // dispatch can run ahead of the workers.
        let (job_tx, job_rx) = mpsc::sync_channel::<JobMessage>(self.config.job_queue_bound());
        let (result_tx, result_rx) = mpsc::channel::<ResultMessage>();

        let shared_jobs = Arc::new(Mutex::new(job_rx));
        let mut workers = Vec::with_capacity(worker_count);
        for _ in 0..worker_count {
            let jobs = Arc::clone(&shared_jobs);
            let results = result_tx.clone();
            let index = Arc::clone(&self.index);
            workers.push(thread::spawn(move || match_worker(&jobs, &results, &index)));
        }
        // Workers hold the only queue receiver and the only result senders, so
        // both channels disconnect once every worker has exited. This keeps
        // the dispatcher's bounded send and the assembler's recv from blocking
        // forever if the pool dies without consuming its stop messages.
        drop(shared_jobs);
        drop(result_tx);

        let assembler_index = Arc::clone(&self.index);
        let assembler =
            thread::spawn(move || assemble(canvas, &result_rx, &assembler_index, worker_count));

        self.dispatch(
            &job_tx,
            small_target,
            x_count,
            y_count,
            worker_count,
            progress,
        );
        drop(job_tx);

        for worker in workers {
            worker
                .join()
                .map_err(|_| pipeline_failure("matcher worker", &"worker thread panicked"))?;
        }
        assembler
            .join()
            .map_err(|_| pipeline_failure("assembler", &"assembler thread panicked"))
    }

    /// Enumerate the grid into the job queue, then stop every worker
    ///
    /// Cells are enumerated column-major (outer loop over x), one job per
    /// cell. The trailing stop loop runs on every exit path, including an
    /// early break when the pool has disappeared, so workers can always reach
    /// their stop message.
    fn dispatch(
        &self,
        job_tx: &SyncSender<JobMessage>,
        small_target: &RgbImage,
        x_count: u32,
        y_count: u32,
        worker_count: usize,
        progress: Option<&ProgressTracker>,
    ) {
        let tile_dim = self.config.tile_dim;
        let profile_dim = self.config.profile_dim();

        'enumerate: for x in 0..x_count {
            for y in 0..y_count {
                let job = MatchJob {
                    profile: cell_profile(small_target, x, y, profile_dim),
                    location: CellLocation::at_grid(x, y, tile_dim),
                };
                // A send error means every worker is gone; nothing is left to
                // consume jobs, so fall through to the stop messages.
                if job_tx.send(JobMessage::Cell(job)).is_err() {
                    break 'enumerate;
                }
                if let Some(tracker) = progress {
                    tracker.update();
                }
            }
        }

        for _ in 0..worker_count {
            let _ = job_tx.send(JobMessage::Stop);
        }
    }
}

/// Crop one grid cell's profile out of the downsampled target
///
/// The cell rectangle is the full-resolution cell scaled by the profile ratio:
/// `profile_dim` pixels per side starting at the proportional offset. Pixels
/// that fall outside the small image due to rounding read as black.
fn cell_profile(small_target: &RgbImage, grid_x: u32, grid_y: u32, profile_dim: u32) -> ColorProfile {
    let x0 = grid_x * profile_dim;
    let y0 = grid_y * profile_dim;

    let mut pixels = Vec::with_capacity((profile_dim * profile_dim) as usize);
    for row in 0..profile_dim {
        for col in 0..profile_dim {
            let pixel = small_target
                .get_pixel_checked(x0 + col, y0 + row)
                .map_or([0, 0, 0], |p| p.0);
            pixels.push(pixel);
        }
    }
    ColorProfile::new(pixels)
}

/// Worker loop: pop a job, match it, send the result
///
/// A `Stop` message, a disconnected queue, or a poisoned queue lock all end
/// the loop; exactly one `WorkerDone` is sent on the way out.
fn match_worker(
    jobs: &Arc<Mutex<Receiver<JobMessage>>>,
    results: &Sender<ResultMessage>,
    index: &CandidateIndex,
) {
    loop {
        let message = {
            let Ok(queue) = jobs.lock() else { break };
            queue.recv()
        };

        match message {
            Ok(JobMessage::Cell(job)) => {
                let tile_index = index.find_best_match(&job.profile);
                let result = MatchResult {
                    location: job.location,
                    tile_index,
                };
                if results.send(ResultMessage::Matched(result)).is_err() {
                    break;
                }
            }
            Ok(JobMessage::Stop) | Err(_) => break,
        }
    }

    let _ = results.send(ResultMessage::WorkerDone);
}

/// Assembler loop: paste results until every worker has reported done
///
/// The canvas is owned here exclusively; no other thread ever touches it, so
/// pasting needs no synchronization. Disconnection before the countdown
/// completes means workers died without their stop message; the canvas is
/// still returned and the joining side surfaces the failure.
fn assemble(
    mut canvas: Canvas,
    results: &Receiver<ResultMessage>,
    index: &CandidateIndex,
    worker_count: usize,
) -> Canvas {
    let mut live_workers = worker_count;
    while live_workers > 0 {
        match results.recv() {
            Ok(ResultMessage::Matched(result)) => {
                if let Some(tile) = index.tile(result.tile_index) {
                    canvas.paste(&tile.pixels, result.location);
                }
            }
            Ok(ResultMessage::WorkerDone) => live_workers -= 1,
            Err(_) => break,
        }
    }
    canvas
}
