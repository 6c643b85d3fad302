use crate::FormError;

/// One address book entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address {
    pub(super) id: Option<u64>,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Street and house number.
    pub street: String,
    /// Five digit ZIP code.
    pub zip_code: String,
    /// City.
    pub city: String,
    /// Country key, e.g. `germany`.
    pub country: String,
    /// `male` or `female`.
    pub gender: String,
    /// Whether the entry is visible to others.
    pub public: bool,
}

impl Address {
    /// The identifier, once the address is stored.
    pub fn id(&self) -> Option<u64> {
        self.id
    }

    /// Assign the identifier. An address keeps its first identifier forever.
    pub fn set_id(&mut self, id: u64) -> Result<(), FormError> {
        if self.id.is_some() {
            return Err(FormError::IdAlreadyAssigned);
        }
        self.id = Some(id);
        Ok(())
    }
}
