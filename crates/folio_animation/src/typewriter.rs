//! Typewriter text cycler
//!
//! [`Typewriter`] is a pure state machine: each [`step`](Typewriter::step)
//! processes the current [`CyclerState`], optionally emits a new display
//! string, and reports how long to wait before the next step.
//! [`TypewriterDriver`] runs it on a [`TimerScheduler`] and pushes every
//! emitted string to a sink.
//!
//! ```text
//!             c < len: emit phrase[..c+1]
//!            ┌──────────────┐
//!            ▼              │
//!   ──► Typing(i, c) ───────┘
//!            │ c == len
//!            ▼
//!   PausedAfterType(i)
//!            │
//!            ▼        c > 0: emit phrase[..c-1]
//!   Deleting(i, c) ◄──────┐
//!            │ └──────────┘
//!            │ c == 0
//!            ▼
//!   Typing((i + 1) % n, 0)
//! ```

use folio_core::sync::lock;
use folio_core::timer::{SharedScheduler, TimerId};
use smallvec::SmallVec;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;
use thiserror::Error;

/// Errors building a [`Typewriter`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypewriterError {
    #[error("typewriter needs at least one phrase")]
    EmptyPhrases,

    #[error("phrase {0} is empty")]
    EmptyPhrase(usize),
}

/// Cycler state; `chars` counts characters, not bytes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CyclerState {
    Typing { phrase: usize, chars: usize },
    PausedAfterType { phrase: usize },
    Deleting { phrase: usize, chars: usize },
}

impl CyclerState {
    pub fn phrase(&self) -> usize {
        match *self {
            CyclerState::Typing { phrase, .. }
            | CyclerState::PausedAfterType { phrase }
            | CyclerState::Deleting { phrase, .. } => phrase,
        }
    }
}

impl Default for CyclerState {
    fn default() -> Self {
        CyclerState::Typing {
            phrase: 0,
            chars: 0,
        }
    }
}

/// Wait before each kind of state is processed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypewriterTimings {
    pub type_delay: Duration,
    pub delete_delay: Duration,
    pub pause: Duration,
}

impl Default for TypewriterTimings {
    fn default() -> Self {
        Self {
            type_delay: Duration::from_millis(150),
            delete_delay: Duration::from_millis(50),
            pause: Duration::from_millis(2000),
        }
    }
}

/// Outcome of one [`Typewriter::step`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypewriterStep {
    /// New display string, if this step changed it
    pub display: Option<String>,
    /// Wait before the next step
    pub next_delay: Duration,
}

/// An emitted display string and when it appeared
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypewriterFrame {
    /// Time since the cycler started
    pub at: Duration,
    pub display: String,
}

/// Types, pauses on, deletes and cycles through phrases forever
#[derive(Clone, Debug)]
pub struct Typewriter {
    phrases: SmallVec<[String; 4]>,
    timings: TypewriterTimings,
    state: CyclerState,
    display: String,
    completed_phrase: bool,
}

impl Typewriter {
    pub fn new<I, S>(phrases: I, timings: TypewriterTimings) -> Result<Self, TypewriterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let phrases: SmallVec<[String; 4]> = phrases.into_iter().map(Into::into).collect();
        if phrases.is_empty() {
            return Err(TypewriterError::EmptyPhrases);
        }
        if let Some(index) = phrases.iter().position(|p| p.is_empty()) {
            return Err(TypewriterError::EmptyPhrase(index));
        }

        Ok(Self {
            phrases,
            timings,
            state: CyclerState::default(),
            display: String::new(),
            completed_phrase: false,
        })
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn timings(&self) -> TypewriterTimings {
        self.timings
    }

    pub fn state(&self) -> CyclerState {
        self.state
    }

    /// Currently displayed text
    pub fn display(&self) -> &str {
        &self.display
    }

    /// True once any phrase has been typed out completely
    pub fn has_completed_phrase(&self) -> bool {
        self.completed_phrase
    }

    /// Wait before the first step
    pub fn initial_delay(&self) -> Duration {
        self.delay_for(CyclerState::default())
    }

    /// Back to `Typing(0, 0)` with an empty display
    pub fn reset(&mut self) {
        self.state = CyclerState::default();
        self.display.clear();
        self.completed_phrase = false;
    }

    /// Process the current state
    pub fn step(&mut self) -> TypewriterStep {
        let (next, display) = match self.state {
            CyclerState::Typing { phrase, chars } => {
                if chars < self.char_len(phrase) {
                    let text = self.prefix(phrase, chars + 1).to_string();
                    let next = CyclerState::Typing {
                        phrase,
                        chars: chars + 1,
                    };
                    (next, Some(text))
                } else {
                    self.completed_phrase = true;
                    (CyclerState::PausedAfterType { phrase }, None)
                }
            }
            CyclerState::PausedAfterType { phrase } => {
                let chars = self.char_len(phrase);
                (CyclerState::Deleting { phrase, chars }, None)
            }
            CyclerState::Deleting { phrase, chars } => {
                if chars > 0 {
                    let text = self.prefix(phrase, chars - 1).to_string();
                    let next = CyclerState::Deleting {
                        phrase,
                        chars: chars - 1,
                    };
                    (next, Some(text))
                } else {
                    let next = CyclerState::Typing {
                        phrase: (phrase + 1) % self.phrases.len(),
                        chars: 0,
                    };
                    (next, None)
                }
            }
        };

        tracing::trace!("Typewriter::step - {:?} -> {:?}", self.state, next);
        self.state = next;
        if let Some(text) = &display {
            self.display.clone_from(text);
        }

        TypewriterStep {
            display,
            next_delay: self.delay_for(next),
        }
    }

    /// Lazily replay the emitted strings of a fresh copy of this cycler
    ///
    /// The iterator never ends; bound it with `take` or `take_while`.
    pub fn frames(&self) -> impl Iterator<Item = TypewriterFrame> {
        let mut cycler = self.clone();
        cycler.reset();
        let mut at = cycler.initial_delay();
        std::iter::from_fn(move || loop {
            let step = cycler.step();
            let emitted_at = at;
            at += step.next_delay;
            if let Some(display) = step.display {
                return Some(TypewriterFrame {
                    at: emitted_at,
                    display,
                });
            }
        })
    }

    fn delay_for(&self, state: CyclerState) -> Duration {
        match state {
            CyclerState::Typing { .. } => self.timings.type_delay,
            CyclerState::PausedAfterType { .. } => self.timings.pause,
            CyclerState::Deleting { .. } => self.timings.delete_delay,
        }
    }

    fn char_len(&self, phrase: usize) -> usize {
        self.phrases[phrase].chars().count()
    }

    fn prefix(&self, phrase: usize, chars: usize) -> &str {
        let text = &self.phrases[phrase];
        match text.char_indices().nth(chars) {
            Some((end, _)) => &text[..end],
            None => text,
        }
    }
}

/// Receives every display string a driver emits
pub type TextSink = Arc<dyn Fn(&str) + Send + Sync>;

struct DriverState {
    typewriter: Typewriter,
    timer: Option<TimerId>,
    generation: u64,
    running: bool,
}

struct DriverInner {
    scheduler: SharedScheduler,
    sink: TextSink,
    state: Mutex<DriverState>,
}

/// Runs a [`Typewriter`] on a timer scheduler
///
/// At most one step is pending per driver. Stopping, restarting or dropping
/// the driver cancels it, and a step that was already in flight is discarded
/// by its generation.
pub struct TypewriterDriver {
    inner: Arc<DriverInner>,
}

impl TypewriterDriver {
    pub fn start(typewriter: Typewriter, scheduler: SharedScheduler, sink: TextSink) -> Self {
        let inner = Arc::new(DriverInner {
            scheduler,
            sink,
            state: Mutex::new(DriverState {
                typewriter,
                timer: None,
                generation: 0,
                running: true,
            }),
        });

        {
            let mut state = lock(&inner.state);
            let delay = state.typewriter.initial_delay();
            schedule_step(&inner, &mut state, delay);
        }
        tracing::debug!("TypewriterDriver::start - cycler started");
        Self { inner }
    }

    /// Cancel the pending step; the display keeps its last value
    pub fn stop(&self) {
        let timer = {
            let mut state = lock(&self.inner.state);
            if !state.running {
                return;
            }
            state.running = false;
            state.generation += 1;
            state.timer.take()
        };
        if let Some(id) = timer {
            self.inner.scheduler.cancel(id);
        }
        tracing::debug!("TypewriterDriver::stop - cycler stopped");
    }

    /// Start over from the first phrase with an empty display
    pub fn restart(&self) {
        {
            let mut state = lock(&self.inner.state);
            if let Some(id) = state.timer.take() {
                self.inner.scheduler.cancel(id);
            }
            state.generation += 1;
            state.running = true;
            state.typewriter.reset();
            let delay = state.typewriter.initial_delay();
            schedule_step(&self.inner, &mut state, delay);
        }
        (self.inner.sink)("");
    }

    pub fn display(&self) -> String {
        lock(&self.inner.state).typewriter.display().to_string()
    }

    pub fn state(&self) -> CyclerState {
        lock(&self.inner.state).typewriter.state()
    }

    pub fn has_completed_phrase(&self) -> bool {
        lock(&self.inner.state).typewriter.has_completed_phrase()
    }

    pub fn is_running(&self) -> bool {
        lock(&self.inner.state).running
    }
}

impl Drop for TypewriterDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

// Scheduling happens under the state lock so the recorded timer id is always
// the one that is actually pending.
fn schedule_step(inner: &Arc<DriverInner>, state: &mut DriverState, delay: Duration) {
    let weak: Weak<DriverInner> = Arc::downgrade(inner);
    let generation = state.generation;
    let id = inner.scheduler.schedule(
        delay,
        Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                run_step(&inner, generation);
            }
        }),
    );
    state.timer = Some(id);
}

fn run_step(inner: &Arc<DriverInner>, generation: u64) {
    let display = {
        let mut state = lock(&inner.state);
        if !state.running || state.generation != generation {
            tracing::trace!("TypewriterDriver - discarding stale step");
            return;
        }
        state.timer = None;
        let step = state.typewriter.step();
        schedule_step(inner, &mut state, step.next_delay);
        step.display
    };

    if let Some(text) = display {
        (inner.sink)(&text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::timer::{TimerScheduler, VirtualTimers};

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_rejects_empty_phrases() {
        let none: Vec<String> = Vec::new();
        assert_eq!(
            Typewriter::new(none, TypewriterTimings::default()).unwrap_err(),
            TypewriterError::EmptyPhrases
        );
        assert_eq!(
            Typewriter::new(["A", ""], TypewriterTimings::default()).unwrap_err(),
            TypewriterError::EmptyPhrase(1)
        );
    }

    #[test]
    fn test_typing_then_pause_emits_nothing() {
        let mut tw = Typewriter::new(["Hi"], TypewriterTimings::default()).unwrap();
        assert_eq!(tw.initial_delay(), ms(150));

        assert_eq!(tw.step().display.as_deref(), Some("H"));
        assert_eq!(tw.step().display.as_deref(), Some("Hi"));
        assert!(!tw.has_completed_phrase());

        let pause = tw.step();
        assert_eq!(pause.display, None);
        assert_eq!(pause.next_delay, ms(2000));
        assert_eq!(tw.state(), CyclerState::PausedAfterType { phrase: 0 });
        assert!(tw.has_completed_phrase());

        let delete = tw.step();
        assert_eq!(delete.display, None);
        assert_eq!(delete.next_delay, ms(50));
        assert_eq!(tw.state(), CyclerState::Deleting { phrase: 0, chars: 2 });
    }

    #[test]
    fn test_single_phrase_wraps_to_itself() {
        let mut tw = Typewriter::new(["X"], TypewriterTimings::default()).unwrap();
        for _ in 0..5 {
            tw.step();
        }
        assert_eq!(tw.state(), CyclerState::Typing { phrase: 0, chars: 0 });
        assert!(tw.has_completed_phrase());
    }

    #[test]
    fn test_prefixes_respect_char_boundaries() {
        let mut tw = Typewriter::new(["héllo ✨"], TypewriterTimings::default()).unwrap();
        let typed: Vec<String> = (0..7).filter_map(|_| tw.step().display).collect();
        assert_eq!(typed[1], "hé");
        assert_eq!(typed[6], "héllo ✨");
    }

    #[test]
    fn test_frames_are_timestamped() {
        let tw = Typewriter::new(["AB"], TypewriterTimings::default()).unwrap();
        let frames: Vec<(u64, String)> = tw
            .frames()
            .take(4)
            .map(|f| (f.at.as_millis() as u64, f.display))
            .collect();
        assert_eq!(
            frames,
            vec![
                (150, "A".to_string()),
                (300, "AB".to_string()),
                (2500, "A".to_string()),
                (2550, String::new()),
            ]
        );
    }

    #[test]
    fn test_driver_keeps_one_timer() {
        let timers = VirtualTimers::shared();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink_seen = seen.clone();
        let tw = Typewriter::new(["AB", "C"], TypewriterTimings::default()).unwrap();
        let driver = TypewriterDriver::start(
            tw,
            timers.clone(),
            Arc::new(move |text: &str| lock(&sink_seen).push(text.to_string())),
        );

        for _ in 0..50 {
            assert_eq!(timers.pending(), 1);
            timers.advance(ms(50));
        }
        assert!(!lock(&seen).is_empty());

        driver.stop();
        assert_eq!(timers.pending(), 0);
        assert!(!driver.is_running());
    }

    #[test]
    fn test_drop_cancels_pending_step() {
        let timers = VirtualTimers::shared();
        {
            let tw = Typewriter::new(["AB"], TypewriterTimings::default()).unwrap();
            let _driver = TypewriterDriver::start(tw, timers.clone(), Arc::new(|_: &str| {}));
            assert_eq!(timers.pending(), 1);
        }
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_restart_begins_again() {
        let timers = VirtualTimers::shared();
        let tw = Typewriter::new(["AB"], TypewriterTimings::default()).unwrap();
        let driver = TypewriterDriver::start(tw, timers.clone(), Arc::new(|_: &str| {}));

        timers.advance(ms(300));
        assert_eq!(driver.display(), "AB");

        driver.restart();
        assert_eq!(driver.display(), "");
        assert_eq!(timers.pending(), 1);
        timers.advance(ms(150));
        assert_eq!(driver.display(), "A");
    }
}
