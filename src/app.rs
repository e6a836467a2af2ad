//! Frame driver
//!
//! `Game` ties the session to the frame clock, input, audio, storage and
//! asset readiness. The platform shell only forwards events and timestamps
//! and acts on the returned [`FrameStep`].

use crate::assets::{AssetEvent, AssetId, Assets};
use crate::audio::{Audio, AudioSink};
use crate::best_score::BestScore;
use crate::clock::FrameClock;
use crate::input::{Action, InputEvent, map_input};
use crate::persistence::KeyValueStore;
use crate::renderer::scene::{self, DrawCmd};
use crate::settings::{BackgroundFit, Settings};
use crate::sim::{GameEvent, Phase, Session, TickInput, autopilot, tick};
use crate::tuning::Tuning;

/// Result of one animation callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStep {
    /// Not running; do not schedule another callback
    Stopped,
    /// Clock baseline recorded; nothing simulated
    Baseline,
    /// Simulated one pass
    Advanced,
    /// This pass ended the run; paint once more and stop
    Ended,
}

impl FrameStep {
    pub fn reschedule(&self) -> bool {
        matches!(self, FrameStep::Baseline | FrameStep::Advanced)
    }

    pub fn repaint(&self) -> bool {
        matches!(self, FrameStep::Advanced | FrameStep::Ended)
    }
}

/// Values shown by the DOM overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub phase: Phase,
    pub score: u32,
    pub best: u32,
    pub sound_on: bool,
}

pub struct Game<S: KeyValueStore, A: AudioSink> {
    session: Session,
    clock: FrameClock,
    input: TickInput,
    store: S,
    audio: Audio<A>,
    settings: Settings,
    assets: Assets,
    autopilot: bool,
}

impl<S: KeyValueStore, A: AudioSink> Game<S, A> {
    /// Load the best score from `store` and wait in Idle
    pub fn new(tuning: Tuning, seed: u64, store: S, sink: A) -> Self {
        let best = BestScore::load(&store);
        let settings = Settings::default();
        let audio = Audio::new(sink, settings.sound_on);
        log::info!(
            "Game ready (seed {}, best {}, sound {})",
            seed,
            best.get(),
            if settings.sound_on { "on" } else { "off" }
        );
        Self {
            session: Session::new(tuning, seed, best),
            clock: FrameClock::new(),
            input: TickInput::default(),
            store,
            audio,
            settings,
            assets: Assets::new(),
            autopilot: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audio(&self) -> &Audio<A> {
        &self.audio
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    /// Let the gap-tracking controller flap for the player
    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
    }

    pub fn hud(&self) -> Hud {
        Hud {
            phase: self.session.phase,
            score: self.session.score,
            best: self.session.best.get(),
            sound_on: self.settings.sound_on,
        }
    }

    /// Apply an input. Jumps are latched for the next tick; everything else
    /// takes effect immediately.
    pub fn handle_input(&mut self, event: InputEvent) -> Action {
        let action = map_input(event, self.session.phase);
        match action {
            Action::Start => {
                self.session.start();
            }
            Action::Jump => self.input.jump = true,
            Action::ReturnToMenu => {
                self.session.return_to_menu();
            }
            Action::ToggleSound => self.toggle_sound(),
            Action::None => {}
        }
        self.process_events();
        action
    }

    /// Run one animation callback
    pub fn frame(&mut self, timestamp_ms: f64) -> FrameStep {
        if !self.session.is_running() {
            return FrameStep::Stopped;
        }
        self.poll_assets();

        let Some(dt) = self.clock.tick(timestamp_ms) else {
            return FrameStep::Baseline;
        };

        if self.autopilot && autopilot::should_jump(&self.session) {
            self.input.jump = true;
        }
        let input = std::mem::take(&mut self.input);
        let outcome = tick(&mut self.session, &input, dt);
        self.process_events();

        if outcome.crash.is_some() {
            FrameStep::Ended
        } else {
            FrameStep::Advanced
        }
    }

    /// Apply finished image loads. Returns true if anything changed.
    pub fn poll_assets(&mut self) -> bool {
        let events = self.assets.poll();
        for event in &events {
            if let AssetEvent::Loaded { id, size } = *event {
                match id {
                    AssetId::Bird => self.session.set_bird_sprite(size.width, size.height),
                    AssetId::Ground => self.session.set_ground_tile_width(size.width),
                    AssetId::PipeTop | AssetId::PipeBottom | AssetId::Background => {}
                }
            }
        }
        !events.is_empty()
    }

    /// Draw list for the current state
    pub fn scene(&self) -> Vec<DrawCmd> {
        scene::build(&self.session, &self.assets, self.settings.background_fit)
    }

    pub fn set_background_fit(&mut self, fit: BackgroundFit) {
        log::debug!("Background fit {}", fit.as_str());
        self.settings.background_fit = fit;
    }

    fn toggle_sound(&mut self) {
        self.settings.sound_on = !self.settings.sound_on;
        self.audio
            .set_enabled(self.settings.sound_on, self.session.is_running());
        log::info!("Sound {}", if self.settings.sound_on { "on" } else { "off" });
    }

    fn process_events(&mut self) {
        for event in self.session.drain_events() {
            match event {
                GameEvent::Started => {
                    self.clock.reset();
                    self.input = TickInput::default();
                    self.audio.start_music();
                }
                GameEvent::Scored { score } => log::debug!("Score {}", score),
                GameEvent::Crashed { .. } => self.audio.game_over(),
                GameEvent::NewBest { best } => {
                    log::info!("New best {}", best);
                    self.session.best.save(&mut self.store);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullAudio;
    use crate::input::Key;
    use crate::persistence::MemoryStore;

    fn game() -> Game<MemoryStore, NullAudio> {
        Game::new(Tuning::default(), 7, MemoryStore::new(), NullAudio)
    }

    #[test]
    fn test_frame_is_stopped_until_started() {
        let mut g = game();
        assert_eq!(g.frame(0.0), FrameStep::Stopped);
        assert!(!FrameStep::Stopped.reschedule());
        assert!(!FrameStep::Stopped.repaint());
    }

    #[test]
    fn test_first_frame_after_start_is_baseline() {
        let mut g = game();
        assert_eq!(g.handle_input(InputEvent::StartButton), Action::Start);
        let bird_y = g.session().bird.pos.y;

        assert_eq!(g.frame(1000.0), FrameStep::Baseline);
        assert_eq!(g.session().bird.pos.y, bird_y);

        assert_eq!(g.frame(1000.0 + 1000.0 / 60.0), FrameStep::Advanced);
        assert!(g.session().bird.pos.y > bird_y);
    }

    #[test]
    fn test_jump_is_latched_for_one_tick() {
        let mut g = game();
        g.handle_input(InputEvent::Key(Key::Space));
        g.frame(0.0);
        assert_eq!(g.handle_input(InputEvent::Touch), Action::Jump);
        g.frame(1000.0 / 60.0);
        // -6.5 then one step of gravity
        assert!((g.session().bird.vel_y - (-6.15)).abs() < 1e-4);
        g.frame(2000.0 / 60.0);
        assert!((g.session().bird.vel_y - (-5.8)).abs() < 1e-4);
    }

    #[test]
    fn test_toggle_sound() {
        let mut g = game();
        assert!(g.settings().sound_on);
        g.handle_input(InputEvent::SoundButton);
        assert!(!g.hud().sound_on);
        assert!(!g.audio().is_enabled());
        g.handle_input(InputEvent::SoundButton);
        assert!(g.hud().sound_on);
    }

    #[test]
    fn test_only_best_score_is_stored() {
        let mut g = game();
        g.handle_input(InputEvent::SoundButton);
        g.set_background_fit(BackgroundFit::Stretch);
        assert_eq!(g.settings().background_fit, BackgroundFit::Stretch);
        assert!(g.store().keys().is_empty());

        // A run that beats the best of 0 writes exactly one key
        g.handle_input(InputEvent::StartButton);
        g.session.score = 2;
        g.session.crash(crate::sim::Crash::Ground);
        g.process_events();
        assert_eq!(g.store().keys(), vec![BestScore::STORAGE_KEY]);
    }

    #[test]
    fn test_asset_loads_resize_bird_and_ground() {
        let mut g = game();
        let notifier = g.assets().notifier();
        notifier.loaded(AssetId::Bird, 200, 100);
        notifier.loaded(AssetId::Ground, 336, 112);
        assert!(g.poll_assets());
        assert_eq!(g.session().bird.width(), 76.0);
        assert_eq!(g.session().bird.height(), 38.0);
        assert_eq!(g.session().ground.tile_width, 336.0);
        assert!(!g.poll_assets());
    }
}
