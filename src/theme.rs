use std::fmt;

/// The two color presets offered by the theme toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    HotPink,
    BabyBlue,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::HotPink => "hot-pink",
            Theme::BabyBlue => "baby-blue",
        }
    }

    /// Unknown or missing values fall back to the default theme.
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value {
            Some("baby-blue") => Theme::BabyBlue,
            Some("hot-pink") | None => Theme::HotPink,
            Some(other) => {
                log::warn!("unknown theme {other:?}, using default");
                Theme::default()
            }
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Theme::HotPink => Theme::BabyBlue,
            Theme::BabyBlue => Theme::HotPink,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Theme::HotPink => "💗",
            Theme::BabyBlue => "💙",
        }
    }

    /// Tooltip for the toggle button, naming the theme it switches to.
    pub fn toggle_title(self) -> &'static str {
        match self {
            Theme::HotPink => "Switch to Baby Blue theme",
            Theme::BabyBlue => "Switch to Hot Pink theme",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
