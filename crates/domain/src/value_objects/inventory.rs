//! Equipment categories, coin denominations and money operations.

use crate::error::DomainError;

fn unknown_category(name: &str) -> DomainError {
    DomainError::validation("category", format!("'{}' is not an equipment category", name))
}

fn unknown_denomination(name: &str) -> DomainError {
    DomainError::validation("denomination", format!("'{}' is not a coin", name))
}

fn unknown_operation(name: &str) -> DomainError {
    DomainError::validation("operation", format!("'{}' is not a money operation", name))
}

named_enum! {
    /// Equipment list a carried item belongs to.
    EquipmentCategory, unknown_category, {
        Weapons => "Weapons",
        Armor => "Armor",
        Items => "Items",
    }
}

named_enum! {
    /// Coin denomination. No automatic conversion between them.
    Denomination, unknown_denomination, {
        Platinum => "platinum",
        Gold => "gold",
        Silver => "silver",
        Copper => "copper",
    }
}

named_enum! {
    /// Direction of a purse adjustment.
    MoneyOperation, unknown_operation, {
        Credit => "credit",
        Debit => "debit",
    }
}
