use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Viewer preferences persisted outside the session (browser cookie).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct DisplayPreferences {
    #[serde(default)]
    pub abbreviate: bool,
}

impl DisplayPreferences {
    pub fn new(abbreviate: bool) -> Self {
        Self { abbreviate }
    }

    /// An unset cookie or "0" means off.
    pub fn from_cookie(value: &str) -> Self {
        let value = value.trim();
        Self {
            abbreviate: !(value.is_empty() || value == "0"),
        }
    }
}

/// Read on every formatted value, so a changed preference applies to the
/// next update without rebuilding the session.
pub trait PreferenceSource {
    fn abbreviate(&self) -> bool;
}

impl PreferenceSource for DisplayPreferences {
    fn abbreviate(&self) -> bool {
        self.abbreviate
    }
}

impl<T: PreferenceSource + ?Sized> PreferenceSource for &T {
    fn abbreviate(&self) -> bool {
        (**self).abbreviate()
    }
}

#[cfg(feature = "tokio")]
impl PreferenceSource for tokio::sync::watch::Receiver<DisplayPreferences> {
    fn abbreviate(&self) -> bool {
        self.borrow().abbreviate
    }
}
