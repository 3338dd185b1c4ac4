use strum::EnumIter;
use strum::EnumString;
use strum::EnumVariantNames;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumString, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum KeySelectorName {
    Prompt,
    None,
}

/// Host capability for choosing the API key used by the generation clients.
pub trait KeySelector {
    fn name(&self) -> KeySelectorName;

    /// Whether a key is currently selected.
    fn has_key(&self) -> bool;

    /// Opens the key selection flow. Fire and forget, the selection is
    /// assumed to succeed.
    fn request_key(&self);
}

pub type KeySelectorBox = Box<dyn KeySelector + Send + Sync>;
