//! # Delivery Address
//!
//! The structured delivery address collected at checkout.
//!
//! ## Field Domains
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Field       Unset     Selectable values                                │
//! │  ─────────   ───────   ──────────────────────────                       │
//! │  tower       ""        "1" .. "18"                                      │
//! │  floor       ""        "1" .. "14"                                      │
//! │  apartment   ""        "001" .. "006"                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The domains are enforced by whatever populates the selection inputs.
//! [`Address::is_valid`] only checks that every field is filled in.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::{APARTMENTS_PER_FLOOR, FLOOR_COUNT, TOWER_COUNT};

// =============================================================================
// Address Field
// =============================================================================

/// One of the three address inputs, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum AddressField {
    Tower,
    Floor,
    Apartment,
}

impl AddressField {
    /// All fields in the order the form shows them.
    pub const ALL: [AddressField; 3] = [
        AddressField::Tower,
        AddressField::Floor,
        AddressField::Apartment,
    ];

    /// The values the selection input for this field offers.
    pub fn options(&self) -> Vec<String> {
        match self {
            AddressField::Tower => tower_options(),
            AddressField::Floor => floor_options(),
            AddressField::Apartment => apartment_options(),
        }
    }
}

impl fmt::Display for AddressField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressField::Tower => write!(f, "Tower"),
            AddressField::Floor => write!(f, "Floor"),
            AddressField::Apartment => write!(f, "Apartment"),
        }
    }
}

/// Towers `"1"` through `"18"`.
pub fn tower_options() -> Vec<String> {
    (1..=TOWER_COUNT).map(|t| t.to_string()).collect()
}

/// Floors `"1"` through `"14"`.
pub fn floor_options() -> Vec<String> {
    (1..=FLOOR_COUNT).map(|f| f.to_string()).collect()
}

/// Apartments `"001"` through `"006"`, zero padded to three digits.
pub fn apartment_options() -> Vec<String> {
    (1..=APARTMENTS_PER_FLOOR).map(|a| format!("{:03}", a)).collect()
}

// =============================================================================
// Address
// =============================================================================

/// A delivery address inside the residential complex.
///
/// Each field is either empty (unset) or a value picked from the field's
/// selection list. `Default` is the all-empty address a checkout starts with.
///
/// ## Wire Format
/// The order endpoint spells the third key `appartment`; `apartment` is also
/// accepted when reading.
///
/// ```rust
/// use canteen_core::Address;
///
/// let address = Address::new("3", "5", "002");
/// assert!(address.is_valid());
/// assert!(!Address::default().is_valid());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Address {
    pub tower: String,
    pub floor: String,
    #[serde(rename = "appartment", alias = "apartment")]
    pub apartment: String,
}

impl Address {
    /// Creates an address from its three fields.
    pub fn new(
        tower: impl Into<String>,
        floor: impl Into<String>,
        apartment: impl Into<String>,
    ) -> Self {
        Address {
            tower: tower.into(),
            floor: floor.into(),
            apartment: apartment.into(),
        }
    }

    /// True iff tower, floor and apartment are all non-empty.
    ///
    /// Values outside the selection lists still count as filled in.
    pub fn is_valid(&self) -> bool {
        !self.tower.is_empty() && !self.floor.is_empty() && !self.apartment.is_empty()
    }

    /// The empty fields, in form order.
    pub fn missing_fields(&self) -> Vec<AddressField> {
        AddressField::ALL
            .into_iter()
            .filter(|field| self.get(*field).is_empty())
            .collect()
    }

    /// Returns the value of one field.
    pub fn get(&self, field: AddressField) -> &str {
        match field {
            AddressField::Tower => &self.tower,
            AddressField::Floor => &self.floor,
            AddressField::Apartment => &self.apartment,
        }
    }

    /// Replaces the value of one field.
    pub fn set(&mut self, field: AddressField, value: impl Into<String>) {
        let value = value.into();
        match field {
            AddressField::Tower => self.tower = value,
            AddressField::Floor => self.floor = value,
            AddressField::Apartment => self.apartment = value,
        }
    }

    /// Returns a copy with one field replaced.
    pub fn with(mut self, field: AddressField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tower {}, Floor {}, Apartment {}",
            self.tower, self.floor, self.apartment
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity_requires_all_fields() {
        assert!(Address::new("3", "5", "002").is_valid());
        assert!(!Address::default().is_valid());
        assert!(!Address::new("3", "5", "").is_valid());
        assert!(!Address::new("", "5", "002").is_valid());
        assert!(!Address::new("3", "", "002").is_valid());
    }

    #[test]
    fn test_validity_ignores_domain_membership() {
        // Tower 99 and apartment "xyz" are not selectable, but are non-empty.
        assert!(Address::new("99", "0", "xyz").is_valid());
    }

    #[test]
    fn test_missing_fields_in_form_order() {
        let address = Address::default().with(AddressField::Floor, "4");
        assert_eq!(
            address.missing_fields(),
            vec![AddressField::Tower, AddressField::Apartment]
        );
        assert!(Address::new("1", "1", "001").missing_fields().is_empty());
    }

    #[test]
    fn test_set_and_get() {
        let mut address = Address::default();
        address.set(AddressField::Apartment, "006");
        assert_eq!(address.get(AddressField::Apartment), "006");
        assert_eq!(address.apartment, "006");
    }

    #[test]
    fn test_selection_options() {
        let towers = tower_options();
        assert_eq!(towers.len(), 18);
        assert_eq!(towers.first().map(String::as_str), Some("1"));
        assert_eq!(towers.last().map(String::as_str), Some("18"));

        assert_eq!(floor_options().len(), 14);

        assert_eq!(
            apartment_options(),
            vec!["001", "002", "003", "004", "005", "006"]
        );
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(Address::new("3", "5", "002")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "tower": "3", "floor": "5", "appartment": "002" })
        );

        let parsed: Address =
            serde_json::from_str(r#"{"tower":"1","floor":"2","apartment":"003"}"#).unwrap();
        assert_eq!(parsed.apartment, "003");
    }
}
