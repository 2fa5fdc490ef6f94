//! Folio Core
//!
//! Foundational primitives shared by the Folio portfolio crates:
//!
//! - **Color**: RGBA colors with hex conversion, used by theme palettes
//! - **Geometry**: Rectangles for viewport intersection math
//! - **Timers**: An injected scheduling capability with a deterministic
//!   virtual clock for tests and a tokio-backed adapter for real time
//!
//! # Example
//!
//! ```rust
//! use folio_core::timer::{TimerScheduler, VirtualTimers};
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let timers = VirtualTimers::new();
//! let fired = Arc::new(AtomicBool::new(false));
//! let flag = fired.clone();
//!
//! timers.schedule(
//!     Duration::from_millis(150),
//!     Box::new(move || flag.store(true, Ordering::SeqCst)),
//! );
//!
//! timers.advance(Duration::from_millis(149));
//! assert!(!fired.load(Ordering::SeqCst));
//! timers.advance(Duration::from_millis(1));
//! assert!(fired.load(Ordering::SeqCst));
//! ```

pub mod color;
pub mod geometry;
pub mod sync;
pub mod timer;

pub use color::Color;
pub use geometry::{Point, Rect, Size};
pub use timer::{SharedScheduler, TimerCallback, TimerGuard, TimerId, TimerScheduler, VirtualTimers};

#[cfg(feature = "tokio-timers")]
pub use timer::TokioTimers;
