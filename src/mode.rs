/// Modifier flag shared by Modifier keys, the encoder button and the
/// encoder rotation mapping.
///
/// A Modifier key raises it when it fires and lowers it on release; a
/// single click of the encoder button toggles it under the wheel/pan policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Mode {
    modified: bool,
}

impl Mode {
    pub const fn new() -> Self {
        Self { modified: false }
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn set(&mut self) {
        self.modified = true;
    }

    pub fn clear(&mut self) {
        self.modified = false;
    }

    pub fn toggle(&mut self) {
        self.modified = !self.modified;
    }
}
