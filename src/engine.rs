use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use crate::blur::strategy::BlurExecutor;
use crate::cache::{BlurCache, CacheKey, CacheStats};
use crate::foundation::error::{FrostpaneError, FrostpaneResult};
use crate::foundation::pixels::PixelBuffer;
use crate::optimize::optimize_for_blur;

/// Result delivered to a request's continuation: blurred pixels, or `None`
/// when the request failed end to end.
pub type BlurOutcome = Option<Arc<PixelBuffer>>;

type BlurContinuation = Box<dyn FnOnce(BlurOutcome) + Send + 'static>;

/// Immutable description of one blur job.
///
/// `style` is an opaque tag; the engine only folds it into the cache key.
#[derive(Clone, Debug)]
pub struct BlurRequest {
    pub pixels: PixelBuffer,
    pub radius: f32,
    pub style: String,
}

impl BlurRequest {
    pub fn new(pixels: PixelBuffer, radius: f32, style: impl Into<String>) -> Self {
        Self {
            pixels,
            radius,
            style: style.into(),
        }
    }
}

struct BlurJob {
    request: BlurRequest,
    continuation: BlurContinuation,
}

struct Completion {
    continuation: BlurContinuation,
    outcome: BlurOutcome,
}

/// Asynchronous blur service: one dedicated worker thread, FIFO job queue,
/// shared result cache.
///
/// Jobs run strictly in submission order; there is no priority lane and no
/// cancellation. Completed results cross back over a channel and their
/// continuations fire on whichever thread calls [`drain_completions`] — the
/// interactive thread, by contract. Construct one engine per process scope
/// that needs blurring and shut it down explicitly (or let `Drop` do it).
///
/// [`drain_completions`]: BlurEngine::drain_completions
pub struct BlurEngine {
    jobs: Option<Sender<BlurJob>>,
    worker: Option<JoinHandle<()>>,
    completions: Receiver<Completion>,
    cache: Arc<BlurCache>,
    executor: Arc<BlurExecutor>,
}

impl BlurEngine {
    /// Engine with the probed blur strategy and default cache capacity.
    pub fn new() -> FrostpaneResult<Self> {
        Self::with_parts(BlurExecutor::new(), crate::cache::DEFAULT_CACHE_CAPACITY)
    }

    /// Engine with an explicit executor and cache capacity.
    pub fn with_parts(executor: BlurExecutor, cache_capacity: usize) -> FrostpaneResult<Self> {
        let cache = Arc::new(BlurCache::new(cache_capacity));
        let executor = Arc::new(executor);
        let (job_tx, job_rx) = mpsc::channel::<BlurJob>();
        let (done_tx, done_rx) = mpsc::channel::<Completion>();

        let worker_cache = Arc::clone(&cache);
        let worker_executor = Arc::clone(&executor);
        let worker = thread::Builder::new()
            .name("frostpane-blur".to_owned())
            .spawn(move || {
                for job in job_rx {
                    let outcome = match process(&worker_cache, &worker_executor, job.request) {
                        Ok(pixels) => Some(pixels),
                        Err(err) => {
                            tracing::warn!(error = %err, "blur request failed");
                            None
                        }
                    };
                    let done = Completion {
                        continuation: job.continuation,
                        outcome,
                    };
                    if done_tx.send(done).is_err() {
                        // Engine gone; nobody left to deliver to.
                        break;
                    }
                }
            })
            .map_err(|e| {
                FrostpaneError::allocation(format!("failed to spawn blur worker: {e}"))
            })?;

        Ok(Self {
            jobs: Some(job_tx),
            worker: Some(worker),
            completions: done_rx,
            cache,
            executor,
        })
    }

    /// Enqueue a blur job and return immediately.
    ///
    /// The continuation is invoked exactly once — with pixels on success,
    /// `None` on failure — the next time the interactive thread drains
    /// completions. Fails only when the engine has been shut down.
    pub fn request_blur(
        &self,
        request: BlurRequest,
        continuation: impl FnOnce(BlurOutcome) + Send + 'static,
    ) -> FrostpaneResult<()> {
        let Some(jobs) = &self.jobs else {
            return Err(FrostpaneError::validation(
                "blur engine has been shut down",
            ));
        };
        jobs.send(BlurJob {
            request,
            continuation: Box::new(continuation),
        })
        .map_err(|_| FrostpaneError::validation("blur worker is no longer running"))
    }

    /// Invoke pending continuations on the calling thread.
    ///
    /// Non-blocking; returns how many were delivered. Results come back in
    /// submission order since there is a single worker.
    pub fn drain_completions(&self) -> usize {
        let mut delivered = 0;
        while let Ok(done) = self.completions.try_recv() {
            (done.continuation)(done.outcome);
            delivered += 1;
        }
        delivered
    }

    /// Run the blur pipeline inline, skipping the async hop. For callers
    /// already off the interactive thread.
    pub fn blur_sync(&self, request: BlurRequest) -> FrostpaneResult<Arc<PixelBuffer>> {
        process(&self.cache, &self.executor, request)
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cache_statistics(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Tear the engine down: close the queue (the worker finishes whatever is
    /// already enqueued), join the worker and clear the cache. Safe to call
    /// more than once.
    pub fn shutdown(&mut self) {
        drop(self.jobs.take());
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::warn!("blur worker panicked before shutdown");
            }
            self.cache.clear();
        }
    }
}

impl Drop for BlurEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Shared pipeline behind both the async and sync entry points:
/// cache lookup -> size optimization -> blur -> cache insert.
#[tracing::instrument(
    skip(cache, executor, request),
    fields(
        width = request.pixels.width(),
        height = request.pixels.height(),
        radius = request.radius,
        style = %request.style,
    )
)]
fn process(
    cache: &BlurCache,
    executor: &BlurExecutor,
    request: BlurRequest,
) -> FrostpaneResult<Arc<PixelBuffer>> {
    // Keyed on the source dimensions, before any downscaling.
    let key = CacheKey::new(
        request.pixels.width(),
        request.pixels.height(),
        request.radius,
        &request.style,
    );
    if let Some(hit) = cache.get(&key) {
        return Ok(hit);
    }

    let optimized = optimize_for_blur(request.pixels)?;
    let blurred = Arc::new(executor.execute(&optimized, request.radius)?);
    cache.put(key, Arc::clone(&blurred));
    Ok(blurred)
}
