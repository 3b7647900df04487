use serde::Deserialize;

/// An option that is either a plain on/off switch or a configuration tree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Toggle<T> {
    Enabled(bool),
    Config(T),
}

impl<T: Default> Toggle<T> {
    /// The effective configuration, `None` when switched off.
    pub fn into_config(self) -> Option<T> {
        match self {
            Toggle::Enabled(true) => Some(T::default()),
            Toggle::Enabled(false) => None,
            Toggle::Config(config) => Some(config),
        }
    }
}

impl<T> Toggle<T> {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Toggle::Enabled(false))
    }
}
