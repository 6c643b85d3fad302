use std::collections::BTreeMap;

use super::Address;
use crate::FormError;

const KIND: &str = "address";

/// In-memory address storage for one session.
///
/// Identifiers start at 1, only grow and are never handed out twice, not even
/// after the highest entry was deleted.
#[derive(Debug, Clone, Default)]
pub struct AddressBook {
    addresses: BTreeMap<u64, Address>,
    last_id: u64,
}

impl AddressBook {
    /// An empty address book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new address and return its identifier.
    pub fn add(&mut self, mut address: Address) -> Result<u64, FormError> {
        let id = self.last_id + 1;
        address.set_id(id)?;
        self.last_id = id;
        self.addresses.insert(id, address);
        tracing::info!(id, "address added");
        Ok(id)
    }

    /// Replace the address stored under `id`.
    pub fn set(&mut self, id: u64, mut address: Address) -> Result<(), FormError> {
        let slot = self
            .addresses
            .get_mut(&id)
            .ok_or(FormError::UnknownRecord { kind: KIND, id })?;
        address.set_id(id)?;
        *slot = address;
        tracing::info!(id, "address changed");
        Ok(())
    }

    /// The address stored under `id`.
    pub fn get(&self, id: u64) -> Result<&Address, FormError> {
        self.addresses
            .get(&id)
            .ok_or(FormError::UnknownRecord { kind: KIND, id })
    }

    /// Remove and return the address stored under `id`.
    pub fn delete(&mut self, id: u64) -> Result<Address, FormError> {
        let address = self
            .addresses
            .remove(&id)
            .ok_or(FormError::UnknownRecord { kind: KIND, id })?;
        tracing::info!(id, "address deleted");
        Ok(address)
    }

    /// All addresses in identifier order.
    pub fn all(&self) -> impl Iterator<Item = &Address> {
        self.addresses.values()
    }

    /// Number of stored addresses.
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    /// True if no address is stored.
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tracing_test::traced_test;

    fn address(last_name: &str) -> Address {
        Address {
            last_name: last_name.to_string(),
            ..Address::default()
        }
    }

    #[test]
    #[traced_test]
    fn ids_are_never_reused() {
        let mut book = AddressBook::new();
        assert_eq!(book.add(address("a")).unwrap(), 1);
        assert_eq!(book.add(address("b")).unwrap(), 2);
        book.delete(2).unwrap();
        assert_eq!(book.add(address("c")).unwrap(), 3);
        assert!(logs_contain("address deleted"));
    }

    #[test]
    fn set_replaces_existing_entries_only() {
        let mut book = AddressBook::new();
        let id = book.add(address("Smith")).unwrap();
        book.set(id, address("Jones")).unwrap();
        assert_eq!(book.get(id).unwrap().last_name, "Jones");
        assert_eq!(book.get(id).unwrap().id(), Some(id));

        let err = book.set(9, address("Nobody")).unwrap_err();
        assert_eq!(err.to_string(), "No address with ID 9 found");
    }

    #[test]
    fn stored_addresses_cannot_be_added_again() {
        let mut book = AddressBook::new();
        let id = book.add(address("Smith")).unwrap();
        let copy = book.get(id).unwrap().clone();
        assert!(matches!(book.add(copy), Err(FormError::IdAlreadyAssigned)));
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn unknown_ids_are_errors() {
        let mut book = AddressBook::new();
        assert!(book.get(1).is_err());
        assert!(matches!(
            book.delete(1),
            Err(FormError::UnknownRecord { kind: "address", id: 1 })
        ));
    }

    proptest! {
        #[test]
        fn prop_ids_strictly_increase(ops in prop::collection::vec(any::<bool>(), 1..40)) {
            let mut book = AddressBook::new();
            let mut last = 0;
            for add in ops {
                if add || book.is_empty() {
                    let id = book.add(Address::default()).unwrap();
                    prop_assert!(id > last);
                    last = id;
                } else {
                    let first = book.all().next().and_then(Address::id).unwrap();
                    book.delete(first).unwrap();
                }
            }
        }
    }
}
