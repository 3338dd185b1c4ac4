#[cfg(test)]
#[path = "aspect_ratio_test.rs"]
mod tests;

use strum::EnumIter;
use strum::EnumString;
use strum::EnumVariantNames;

/// Width to height constraint applied to every image request made after it
/// is selected. Changing it never touches images that already exist.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, EnumString, EnumVariantNames, strum::Display)]
pub enum AspectRatio {
    #[strum(serialize = "1:1")]
    Square,
    #[default]
    #[strum(serialize = "16:9")]
    Widescreen,
    #[strum(serialize = "9:16")]
    Vertical,
    #[strum(serialize = "3:4")]
    Portrait,
    #[strum(serialize = "4:3")]
    Standard,
}

impl AspectRatio {
    /// File name safe form, `16:9` becomes `16x9`.
    pub fn slug(&self) -> String {
        return self.to_string().replace(':', "x");
    }
}
