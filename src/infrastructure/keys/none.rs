use crate::domain::models::KeySelector;
use crate::domain::models::KeySelectorName;

/// For environments where the key is injected out of band.
#[derive(Default)]
pub struct NoopKeySelector {}

impl KeySelector for NoopKeySelector {
    fn name(&self) -> KeySelectorName {
        return KeySelectorName::None;
    }

    fn has_key(&self) -> bool {
        return true;
    }

    fn request_key(&self) {}
}
