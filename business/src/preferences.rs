use bizdesk_states::State;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub const ALL: [Self; 3] = [Self::Light, Self::Dark, Self::System];

    pub fn label(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
            Self::System => "System",
        }
    }
}

/// Look-and-feel settings owned by the front-end and persisted between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme: Theme,
    /// Sidebar background as sRGB.
    pub sidebar_color: [u8; 3],
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::System,
            sidebar_color: [0x1f, 0x29, 0x37],
        }
    }
}

impl State for Preferences {}

impl Preferences {
    /// Storage key used by front-ends.
    pub const STORAGE_KEY: &'static str = "bizdesk.preferences";

    pub fn from_json(text: &str) -> Self {
        serde_json::from_str(text).unwrap_or_else(|err| {
            log::warn!("ignoring unreadable preferences: {err}");
            Self::default()
        })
    }

    pub fn to_json(self) -> String {
        serde_json::to_string(&self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let prefs = Preferences::from_json(r#"{ "theme": "dark" }"#);
        assert_eq!(prefs.theme, Theme::Dark);
        assert_eq!(prefs.sidebar_color, Preferences::default().sidebar_color);
    }

    #[test]
    fn garbage_is_default() {
        assert_eq!(Preferences::from_json("not json"), Preferences::default());
    }

    #[test]
    fn survives_storage() {
        let prefs = Preferences {
            theme: Theme::Light,
            sidebar_color: [10, 20, 30],
        };
        assert_eq!(Preferences::from_json(&prefs.to_json()), prefs);
    }
}
