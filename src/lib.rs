//! Frostpane renders the pixel-processing half of a "frosted glass" material
//! effect: it captures a region of already-rendered pixels, blurs it, and hands
//! the result back to a view layer that composites a tint overlay on top.
//!
//! # Pipeline overview
//!
//! 1. **Capture**: [`capture_region`] snapshots a region of the composited root
//!    frame into a [`PixelBuffer`].
//! 2. **Optimize**: [`optimize_for_blur`] downscales oversized buffers so blur
//!    cost stays bounded regardless of source size.
//! 3. **Blur**: [`BlurExecutor`] runs the filtered primitive when available and
//!    falls back to the software box kernel ([`box_blur`]) on any failure.
//! 4. **Cache**: [`BlurCache`] keeps recent results under a fixed capacity with
//!    least-recently-used eviction.
//! 5. **Deliver**: [`BlurEngine`] serializes blur jobs on one dedicated worker
//!    thread and delivers each result through a completion channel drained on
//!    the interactive thread.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **One worker**: blur jobs run strictly in submission order on a single
//!   background thread, bounding peak working memory.
//! - **Continuations fire exactly once**: every request completes with either
//!   blurred pixels or `None`; failures never cross the async boundary as
//!   panics or errors.
//! - **Immutable cached buffers**: the cache hands out `Arc<PixelBuffer>`
//!   handles, so callers cannot corrupt cached state.
#![forbid(unsafe_code)]

mod blur;
mod cache;
mod capture;
mod engine;
mod foundation;
mod optimize;
mod style;
mod tint;

pub use blur::kernel::{SOFTWARE_MAX_RADIUS, SOFTWARE_MIN_RADIUS, box_blur};
pub use blur::strategy::{
    BlurExecutor, BlurStrategy, FILTERED_MAX_RADIUS, FILTERED_MIN_RADIUS, FilteredBlur,
    SoftwareBlur,
};
pub use cache::{BlurCache, CacheKey, CacheStats, DEFAULT_CACHE_CAPACITY};
pub use capture::{CaptureRegion, FrameSource, capture_region};
pub use engine::{BlurEngine, BlurOutcome, BlurRequest};
pub use foundation::error::{FrostpaneError, FrostpaneResult};
pub use foundation::pixels::{Argb8, PixelBuffer};
pub use optimize::{MAX_BLUR_PIXELS, SOFT_DOWNSCALE, SOFT_MAX_DIMENSION, optimize_for_blur};
pub use style::{
    BlurStyle, MAX_STYLE_RADIUS, MIN_STYLE_RADIUS, StyleParameters, style_parameters,
};
pub use tint::apply_tint;
