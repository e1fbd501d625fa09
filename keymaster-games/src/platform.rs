use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "AND")]
    Android,
    #[serde(rename = "GBA")]
    GameBoyAdvance,
    #[serde(rename = "IOS")]
    Ios,
    #[serde(rename = "SW")]
    Switch,
    #[serde(rename = "WIIU")]
    WiiU,
}

impl Platform {
    pub const ALL: [Self; 5] = [
        Self::Android,
        Self::GameBoyAdvance,
        Self::Ios,
        Self::Switch,
        Self::WiiU,
    ];

    /// Short code used by the host when persisting platform filters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Android => "AND",
            Self::GameBoyAdvance => "GBA",
            Self::Ios => "IOS",
            Self::Switch => "SW",
            Self::WiiU => "WIIU",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Android => "Android",
            Self::GameBoyAdvance => "Game Boy Advance",
            Self::Ios => "iOS",
            Self::Switch => "Nintendo Switch",
            Self::WiiU => "Wii U",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|platform| platform.as_str() == s)
            .ok_or(())
    }
}

impl From<Platform> for String {
    fn from(value: Platform) -> Self {
        value.as_str().to_string()
    }
}
