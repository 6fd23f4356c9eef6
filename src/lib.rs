//! # img-rescale
//!
//! Shrinks every JPEG and PNG in a directory whose longer edge exceeds a
//! pixel threshold, writing a proportionally scaled copy next to the
//! original (or into a separate output directory).
//!
//! # Pipeline
//!
//! ```text
//! list dir → filter by extension → decode → compare to threshold
//!          → floor-scale dimensions → resample → encode → write
//! ```
//!
//! One pass, one file at a time, no recursion. A file that cannot be read or
//! written is reported and skipped; the rest of the batch still runs.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Immutable run configuration, defaults, validation |
//! | [`naming`] | Stem/extension split and output filename construction |
//! | [`scan`] | Top-level directory listing filtered by extension |
//! | [`imaging`] | Dimension math, backend trait, `image`-crate backend, area resampler |
//! | [`process`] | The per-file loop, events and run summary |
//! | [`output`] | Console formatting of events and summary |
//!
//! # Design Decisions
//!
//! ## Area averaging by default
//!
//! Downscaling by large factors with point or small-kernel filters drops
//! most source pixels and aliases fine detail. Area averaging blends every
//! source pixel into exactly one place in the output, weighted by coverage.
//! The other `image` filters stay available through
//! [`config::Interpolation`].
//!
//! ## Exact integer scaling
//!
//! Target dimensions are `floor(axis * threshold / longer_edge)` in integer
//! arithmetic, so the longer edge is always exactly the threshold and the
//! result never depends on float rounding.
//!
//! ## Stable reruns
//!
//! Outputs land exactly on the threshold, which does not trigger rescaling
//! (the comparison is strictly greater-than). Running the tool again over a
//! directory that already holds its outputs reports them as below threshold
//! instead of shrinking them further.

pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod process;
pub mod scan;
