use std::fmt;

use serde::{Deserialize, Serialize};

/// Social platforms a post can target.
///
/// The serialized names double as the display names shown to users,
/// so they are stable wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlatformName {
    Facebook,
    X,
    Instagram,
    Youtube,
    LinkedIn,
    Pinterest,
    TikTok,
}

impl PlatformName {
    /// Every supported platform, in picker order.
    pub const ALL: [PlatformName; 7] = [
        PlatformName::Facebook,
        PlatformName::X,
        PlatformName::Instagram,
        PlatformName::Youtube,
        PlatformName::LinkedIn,
        PlatformName::Pinterest,
        PlatformName::TikTok,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformName::Facebook => "Facebook",
            PlatformName::X => "X",
            PlatformName::Instagram => "Instagram",
            PlatformName::Youtube => "Youtube",
            PlatformName::LinkedIn => "LinkedIn",
            PlatformName::Pinterest => "Pinterest",
            PlatformName::TikTok => "TikTok",
        }
    }
}

impl fmt::Display for PlatformName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
