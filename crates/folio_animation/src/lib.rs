//! Folio Animation System
//!
//! Time- and scroll-driven effects of the portfolio page.
//!
//! # Features
//!
//! - **Typewriter**: types, pauses on, deletes, and cycles through a fixed
//!   list of phrases forever ([`Typewriter`], driven by [`TypewriterDriver`])
//! - **Reveal**: flips content blocks from hidden to visible exactly once when
//!   enough of them scrolls into view ([`RevealTrigger`])
//! - **Viewport**: a geometry-driven [`IntersectionHost`] for headless runs
//!   and tests ([`SimulatedViewport`])
//! - **Transitions**: eased fade/slide-in values for revealed blocks
//!
//! Nothing here sleeps or reads a clock. Time comes from an injected
//! [`folio_core::TimerScheduler`] and scroll position from an injected
//! [`IntersectionHost`], so every effect can be tested deterministically.

pub mod reveal;
pub mod transition;
pub mod typewriter;
pub mod viewport;

pub use reveal::{
    ElementId, IntersectionCallback, IntersectionEntry, IntersectionHost, NoopIntersectionHost,
    ObserverId, RevealError, RevealListener, RevealTrigger, Visibility, DEFAULT_REVEAL_THRESHOLD,
};
pub use transition::{Easing, RevealFrame, RevealTransition};
pub use typewriter::{
    CyclerState, TextSink, Typewriter, TypewriterDriver, TypewriterError, TypewriterFrame,
    TypewriterStep, TypewriterTimings,
};
pub use viewport::SimulatedViewport;
