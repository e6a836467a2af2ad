//! Audio: looping music and the one-shot game-over track
//!
//! Playback is best-effort. Browsers may refuse to play before a user gesture;
//! such rejections are logged and otherwise ignored.

use thiserror::Error;

/// Audio tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Track {
    /// Background music while running
    Music,
    /// Plays once when a run ends
    GameOver,
}

impl Track {
    /// DOM id of the `<audio>` element carrying the track
    pub fn element_id(&self) -> &'static str {
        match self {
            Track::Music => "backgroundMusic",
            Track::GameOver => "gameOverMusic",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AudioError {
    #[error("no audio source for {0:?}")]
    Unavailable(Track),
    #[error("playback rejected: {0}")]
    Rejected(String),
}

/// Playback backend
pub trait AudioSink {
    /// Play from the start, looping
    fn play_loop(&mut self, track: Track) -> Result<(), AudioError>;
    /// Play from the start, once
    fn play_once(&mut self, track: Track) -> Result<(), AudioError>;
    fn stop(&mut self, track: Track);
}

/// Backend that plays nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_loop(&mut self, _track: Track) -> Result<(), AudioError> {
        Ok(())
    }

    fn play_once(&mut self, _track: Track) -> Result<(), AudioError> {
        Ok(())
    }

    fn stop(&mut self, _track: Track) {}
}

/// Audio manager for the game
pub struct Audio<A: AudioSink> {
    sink: A,
    enabled: bool,
}

impl<A: AudioSink> Audio<A> {
    pub fn new(sink: A, enabled: bool) -> Self {
        Self { sink, enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn sink(&self) -> &A {
        &self.sink
    }

    /// Start the music loop from the top
    pub fn start_music(&mut self) {
        if self.enabled {
            swallow(self.sink.play_loop(Track::Music));
        }
    }

    pub fn stop_music(&mut self) {
        self.sink.stop(Track::Music);
    }

    /// Stop the music and play the game-over sting
    pub fn game_over(&mut self) {
        self.stop_music();
        if self.enabled {
            swallow(self.sink.play_once(Track::GameOver));
        }
    }

    /// Mute or unmute. Unmuting mid-run brings the music back.
    pub fn set_enabled(&mut self, enabled: bool, running: bool) {
        self.enabled = enabled;
        if !enabled {
            self.sink.stop(Track::Music);
            self.sink.stop(Track::GameOver);
        } else if running {
            swallow(self.sink.play_loop(Track::Music));
        }
    }
}

fn swallow(result: Result<(), AudioError>) {
    if let Err(e) = result {
        log::debug!("Audio: {}", e);
    }
}

/// `<audio>` element backend
#[cfg(target_arch = "wasm32")]
pub mod web {
    use std::collections::HashMap;

    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::HtmlAudioElement;

    use super::{AudioError, AudioSink, Track};

    pub struct HtmlAudio {
        elements: HashMap<Track, HtmlAudioElement>,
    }

    impl HtmlAudio {
        /// Look up the page's audio elements by id
        pub fn from_document(document: &web_sys::Document) -> Self {
            let mut elements = HashMap::new();
            for track in [Track::Music, Track::GameOver] {
                match document
                    .get_element_by_id(track.element_id())
                    .and_then(|el| el.dyn_into::<HtmlAudioElement>().ok())
                {
                    Some(el) => {
                        elements.insert(track, el);
                    }
                    None => log::warn!("No <audio id=\"{}\"> on page", track.element_id()),
                }
            }
            Self { elements }
        }

        fn play(&self, track: Track, looping: bool) -> Result<(), AudioError> {
            let el = self
                .elements
                .get(&track)
                .ok_or(AudioError::Unavailable(track))?;
            el.set_loop(looping);
            el.set_current_time(0.0);
            let promise = el
                .play()
                .map_err(|e| AudioError::Rejected(format!("{:?}", e)))?;
            // Autoplay refusals arrive as a rejected promise
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    log::debug!("Audio {:?} blocked: {:?}", track, e);
                }
            });
            Ok(())
        }
    }

    impl AudioSink for HtmlAudio {
        fn play_loop(&mut self, track: Track) -> Result<(), AudioError> {
            self.play(track, true)
        }

        fn play_once(&mut self, track: Track) -> Result<(), AudioError> {
            self.play(track, false)
        }

        fn stop(&mut self, track: Track) {
            if let Some(el) = self.elements.get(&track) {
                let _ = el.pause();
            }
        }
    }
}
