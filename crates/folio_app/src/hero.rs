//! Hero section: typewriter headline and intro fade-in

use crate::config::FolioConfig;
use folio_animation::{
    RevealFrame, RevealTransition, TextSink, Typewriter, TypewriterDriver, TypewriterError,
    Visibility,
};
use folio_core::timer::{SharedScheduler, TimerGuard};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Caret animation after the headline
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorStyle {
    /// Until the first phrase is fully typed
    Blink,
    Pulse,
}

/// Mounted hero section
///
/// The photo is shown immediately and the text block follows after
/// `hero.text_delay_ms`. Dropping the hero cancels both the pending intro
/// timer and the typewriter.
pub struct Hero {
    driver: TypewriterDriver,
    text_revealed: Arc<AtomicBool>,
    intro: Option<TimerGuard>,
}

impl Hero {
    pub fn mount(
        config: &FolioConfig,
        scheduler: SharedScheduler,
        sink: Option<TextSink>,
    ) -> Result<Self, TypewriterError> {
        let typewriter = Typewriter::new(
            config.typewriter.phrases.iter().cloned(),
            config.typewriter.timings(),
        )?;
        let sink: TextSink = match sink {
            Some(sink) => sink,
            None => Arc::new(|text: &str| tracing::trace!("Hero - headline '{}'", text)),
        };
        let driver = TypewriterDriver::start(typewriter, scheduler.clone(), sink);

        let text_revealed = Arc::new(AtomicBool::new(false));
        let flag = text_revealed.clone();
        let id = scheduler.schedule(
            config.hero.text_delay(),
            Box::new(move || {
                flag.store(true, Ordering::SeqCst);
                tracing::debug!("Hero - intro text revealed");
            }),
        );

        Ok(Self {
            driver,
            text_revealed,
            intro: Some(TimerGuard::new(scheduler, id)),
        })
    }

    pub fn headline(&self) -> String {
        self.driver.display()
    }

    pub fn cursor(&self) -> CursorStyle {
        if self.driver.has_completed_phrase() {
            CursorStyle::Pulse
        } else {
            CursorStyle::Blink
        }
    }

    pub fn photo_visibility(&self) -> Visibility {
        Visibility::Visible
    }

    pub fn text_visibility(&self) -> Visibility {
        if self.text_revealed.load(Ordering::SeqCst) {
            Visibility::Visible
        } else {
            Visibility::Hidden
        }
    }

    /// Transition values for the text block `elapsed` after it revealed
    pub fn text_frame(&self, elapsed: Duration) -> RevealFrame {
        let transition = RevealTransition::HERO;
        match self.text_visibility() {
            Visibility::Visible => transition.sample(elapsed),
            Visibility::Hidden => transition.hidden(),
        }
    }

    pub fn restart_typewriter(&self) {
        self.driver.restart();
    }

    pub fn is_mounted(&self) -> bool {
        self.driver.is_running()
    }

    /// Stop the typewriter and drop the pending intro
    pub fn unmount(&mut self) {
        self.driver.stop();
        if let Some(mut intro) = self.intro.take() {
            intro.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::timer::{TimerScheduler, VirtualTimers};

    #[test]
    fn test_intro_reveals_text_after_delay() {
        let timers = VirtualTimers::shared();
        let hero = Hero::mount(&FolioConfig::default(), timers.clone(), None).unwrap();
        assert_eq!(hero.photo_visibility(), Visibility::Visible);
        assert_eq!(hero.text_visibility(), Visibility::Hidden);
        assert_eq!(hero.text_frame(Duration::ZERO), RevealTransition::HERO.hidden());

        timers.advance(Duration::from_millis(299));
        assert_eq!(hero.text_visibility(), Visibility::Hidden);
        timers.advance(Duration::from_millis(1));
        assert_eq!(hero.text_visibility(), Visibility::Visible);
        assert_eq!(hero.text_frame(Duration::from_secs(1)), RevealFrame::SETTLED);
    }

    #[test]
    fn test_cursor_switches_after_first_phrase() {
        let timers = VirtualTimers::shared();
        let hero = Hero::mount(&FolioConfig::default(), timers.clone(), None).unwrap();
        assert_eq!(hero.cursor(), CursorStyle::Blink);

        // "Frontend Developer" is 18 characters, then one more step to pause
        timers.advance(Duration::from_millis(150 * 19));
        assert_eq!(hero.headline(), "Frontend Developer");
        assert_eq!(hero.cursor(), CursorStyle::Pulse);
    }

    #[test]
    fn test_unmount_cancels_everything() {
        let timers = VirtualTimers::shared();
        let mut hero = Hero::mount(&FolioConfig::default(), timers.clone(), None).unwrap();
        assert_eq!(timers.pending(), 2);

        hero.unmount();
        assert_eq!(timers.pending(), 0);
        assert!(!hero.is_mounted());
        assert_eq!(hero.text_visibility(), Visibility::Hidden);
    }
}
