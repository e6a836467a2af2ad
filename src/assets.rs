//! Image asset readiness
//!
//! Images load asynchronously in the browser. Load callbacks post events
//! through an [`AssetNotifier`]; the game polls them on its own schedule, so
//! nothing ever waits on a download and drawing simply falls back until a
//! sprite is ready.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

/// Every image the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetId {
    Bird,
    PipeTop,
    PipeBottom,
    Ground,
    Background,
}

impl AssetId {
    pub const ALL: [AssetId; 5] = [
        AssetId::Bird,
        AssetId::PipeTop,
        AssetId::PipeBottom,
        AssetId::Ground,
        AssetId::Background,
    ];

    /// Source URL
    pub fn url(&self) -> &'static str {
        match self {
            AssetId::Bird => "https://i.postimg.cc/1X0cmd2D/icon.png",
            AssetId::PipeTop | AssetId::PipeBottom => "https://i.postimg.cc/Fz9Vr0Db/PIPee.png",
            AssetId::Ground => "https://i.postimg.cc/4yG2QpTF/bottom-bar.png",
            AssetId::Background => "https://i.postimg.cc/4NbhmVd8/FH-bg.png",
        }
    }
}

/// Natural pixel size of a loaded image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

/// Load completion notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetEvent {
    Loaded { id: AssetId, size: ImageSize },
    Failed { id: AssetId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AssetState {
    Pending,
    Ready(ImageSize),
    Failed,
}

type EventQueue = Rc<RefCell<VecDeque<AssetEvent>>>;

/// Handle given to load callbacks
#[derive(Debug, Clone)]
pub struct AssetNotifier {
    queue: EventQueue,
}

impl AssetNotifier {
    pub fn loaded(&self, id: AssetId, width: u32, height: u32) {
        let event = if width > 0 && height > 0 {
            AssetEvent::Loaded {
                id,
                size: ImageSize { width, height },
            }
        } else {
            // A decoded image with no pixels is as good as missing
            AssetEvent::Failed { id }
        };
        self.queue.borrow_mut().push_back(event);
    }

    pub fn failed(&self, id: AssetId) {
        self.queue.borrow_mut().push_back(AssetEvent::Failed { id });
    }
}

/// Readiness of all game images
#[derive(Debug)]
pub struct Assets {
    states: HashMap<AssetId, AssetState>,
    queue: EventQueue,
}

impl Default for Assets {
    fn default() -> Self {
        Self::new()
    }
}

impl Assets {
    pub fn new() -> Self {
        Self {
            states: AssetId::ALL
                .iter()
                .map(|&id| (id, AssetState::Pending))
                .collect(),
            queue: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    pub fn notifier(&self) -> AssetNotifier {
        AssetNotifier {
            queue: Rc::clone(&self.queue),
        }
    }

    /// Apply queued notifications, returning them in arrival order
    pub fn poll(&mut self) -> Vec<AssetEvent> {
        let events: Vec<AssetEvent> = self.queue.borrow_mut().drain(..).collect();
        for event in &events {
            match *event {
                AssetEvent::Loaded { id, size } => {
                    log::debug!("Asset {:?} ready ({}x{})", id, size.width, size.height);
                    self.states.insert(id, AssetState::Ready(size));
                }
                AssetEvent::Failed { id } => {
                    log::warn!("Asset {:?} failed to load, using fallback", id);
                    self.states.insert(id, AssetState::Failed);
                }
            }
        }
        events
    }

    pub fn is_ready(&self, id: AssetId) -> bool {
        self.natural_size(id).is_some()
    }

    pub fn natural_size(&self, id: AssetId) -> Option<ImageSize> {
        match self.states.get(&id) {
            Some(AssetState::Ready(size)) => Some(*size),
            _ => None,
        }
    }

    pub fn is_failed(&self, id: AssetId) -> bool {
        matches!(self.states.get(&id), Some(AssetState::Failed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_until_polled() {
        let mut assets = Assets::new();
        let notifier = assets.notifier();
        notifier.loaded(AssetId::Bird, 64, 48);
        assert!(!assets.is_ready(AssetId::Bird));

        let events = assets.poll();
        assert_eq!(events.len(), 1);
        assert_eq!(
            assets.natural_size(AssetId::Bird),
            Some(ImageSize {
                width: 64,
                height: 48
            })
        );
        assert!(assets.poll().is_empty());
    }

    #[test]
    fn test_empty_image_counts_as_failed() {
        let mut assets = Assets::new();
        assets.notifier().loaded(AssetId::Background, 0, 0);
        assets.poll();
        assert!(!assets.is_ready(AssetId::Background));
        assert!(assets.is_failed(AssetId::Background));
    }

    #[test]
    fn test_error_notification() {
        let mut assets = Assets::new();
        assets.notifier().failed(AssetId::Ground);
        assert_eq!(
            assets.poll(),
            vec![AssetEvent::Failed {
                id: AssetId::Ground
            }]
        );
        assert!(assets.is_failed(AssetId::Ground));
        assert!(!assets.is_failed(AssetId::Bird));
    }
}
