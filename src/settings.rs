//! Player preferences
//!
//! Held in memory for the page session; only the best score is ever stored.

/// How the background image is fitted to the view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackgroundFit {
    /// Uniform scale that covers the whole view, cropping the overflow
    #[default]
    Cover,
    /// Non-uniform stretch to the view size
    Stretch,
}

impl BackgroundFit {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackgroundFit::Cover => "Cover",
            BackgroundFit::Stretch => "Stretch",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cover" => Some(BackgroundFit::Cover),
            "stretch" | "fill" => Some(BackgroundFit::Stretch),
            _ => None,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Music and sound effects on
    pub sound_on: bool,
    /// Background image fitting
    pub background_fit: BackgroundFit,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_on: true,
            background_fit: BackgroundFit::Cover,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.sound_on);
        assert_eq!(settings.background_fit, BackgroundFit::Cover);
    }

    #[test]
    fn test_fit_names() {
        assert_eq!(BackgroundFit::from_str("COVER"), Some(BackgroundFit::Cover));
        assert_eq!(BackgroundFit::from_str("fill"), Some(BackgroundFit::Stretch));
        assert_eq!(BackgroundFit::from_str("tile"), None);
        assert_eq!(BackgroundFit::Stretch.as_str(), "Stretch");
    }
}
