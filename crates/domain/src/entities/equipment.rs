//! Carried equipment and the coin purse.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::{Denomination, EquipmentCategory, MoneyOperation};

/// Coin counts per denomination. Used both as a balance and as an amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coins {
    #[serde(default)]
    pub platinum: u32,
    #[serde(default)]
    pub gold: u32,
    #[serde(default)]
    pub silver: u32,
    #[serde(default)]
    pub copper: u32,
}

impl Coins {
    pub fn new(platinum: u32, gold: u32, silver: u32, copper: u32) -> Self {
        Self {
            platinum,
            gold,
            silver,
            copper,
        }
    }

    /// Amounts in platinum, gold, silver, copper order.
    pub fn from_slice(amounts: &[u32]) -> Result<Self, DomainError> {
        match amounts {
            [platinum, gold, silver, copper] => Ok(Self::new(*platinum, *gold, *silver, *copper)),
            _ => Err(DomainError::validation(
                "money",
                format!("expected 4 amounts, got {}", amounts.len()),
            )),
        }
    }

    pub fn get(&self, denomination: Denomination) -> u32 {
        match denomination {
            Denomination::Platinum => self.platinum,
            Denomination::Gold => self.gold,
            Denomination::Silver => self.silver,
            Denomination::Copper => self.copper,
        }
    }

    fn get_mut(&mut self, denomination: Denomination) -> &mut u32 {
        match denomination {
            Denomination::Platinum => &mut self.platinum,
            Denomination::Gold => &mut self.gold,
            Denomination::Silver => &mut self.silver,
            Denomination::Copper => &mut self.copper,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Denomination, u32)> + '_ {
        Denomination::ALL.iter().map(move |d| (*d, self.get(*d)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, n)| n == 0)
    }
}

/// Weapons, armor and general items plus money.
///
/// Each category is an insertion-ordered list without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentLedger {
    #[serde(default)]
    weapons: Vec<String>,
    #[serde(default)]
    armor: Vec<String>,
    #[serde(default)]
    items: Vec<String>,
    #[serde(default)]
    money: Coins,
}

impl EquipmentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self, category: EquipmentCategory) -> &[String] {
        match category {
            EquipmentCategory::Weapons => &self.weapons,
            EquipmentCategory::Armor => &self.armor,
            EquipmentCategory::Items => &self.items,
        }
    }

    fn items_mut(&mut self, category: EquipmentCategory) -> &mut Vec<String> {
        match category {
            EquipmentCategory::Weapons => &mut self.weapons,
            EquipmentCategory::Armor => &mut self.armor,
            EquipmentCategory::Items => &mut self.items,
        }
    }

    pub fn money(&self) -> Coins {
        self.money
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty() && self.armor.is_empty() && self.items.is_empty()
    }

    pub(crate) fn add_item(
        &mut self,
        category: EquipmentCategory,
        name: &str,
    ) -> Result<(), DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("item", "name cannot be empty"));
        }
        let list = self.items_mut(category);
        if list.iter().any(|existing| existing == name) {
            return Err(DomainError::DuplicateItem {
                category,
                item: name.to_string(),
            });
        }
        list.push(name.to_string());
        Ok(())
    }

    pub(crate) fn remove_item(
        &mut self,
        category: EquipmentCategory,
        name: &str,
    ) -> Result<(), DomainError> {
        let name = name.trim();
        let list = self.items_mut(category);
        let position = list
            .iter()
            .position(|existing| existing == name)
            .ok_or_else(|| DomainError::ItemNotFound {
                category,
                item: name.to_string(),
            })?;
        list.remove(position);
        Ok(())
    }

    /// Credit or debit all four denominations at once.
    ///
    /// A debit is checked against every denomination before any coin moves;
    /// denominations are never converted into each other.
    pub(crate) fn adjust_money(
        &mut self,
        operation: MoneyOperation,
        amounts: Coins,
    ) -> Result<Coins, DomainError> {
        let mut next = self.money;
        for (denomination, amount) in amounts.iter() {
            let slot = next.get_mut(denomination);
            *slot = match operation {
                MoneyOperation::Credit => slot.checked_add(amount).ok_or_else(|| {
                    DomainError::validation("money", format!("{} balance overflow", denomination))
                })?,
                MoneyOperation::Debit => {
                    slot.checked_sub(amount)
                        .ok_or(DomainError::InsufficientFunds {
                            denomination,
                            available: *slot,
                            requested: amount,
                        })?
                }
            };
        }
        self.money = next;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod items {
        use super::*;

        #[test]
        fn add_preserves_insertion_order() {
            let mut ledger = EquipmentLedger::new();
            ledger.add_item(EquipmentCategory::Weapons, "Longsword").unwrap();
            ledger.add_item(EquipmentCategory::Weapons, "Dagger").unwrap();
            ledger.add_item(EquipmentCategory::Weapons, "Axe").unwrap();
            assert_eq!(
                ledger.items(EquipmentCategory::Weapons),
                &["Longsword", "Dagger", "Axe"]
            );
        }

        #[test]
        fn duplicate_in_same_category_fails() {
            let mut ledger = EquipmentLedger::new();
            ledger.add_item(EquipmentCategory::Items, "Rope").unwrap();
            let err = ledger.add_item(EquipmentCategory::Items, "Rope").unwrap_err();
            assert!(matches!(err, DomainError::DuplicateItem { .. }));
            assert_eq!(ledger.items(EquipmentCategory::Items).len(), 1);
        }

        #[test]
        fn same_name_allowed_across_categories() {
            let mut ledger = EquipmentLedger::new();
            ledger.add_item(EquipmentCategory::Items, "Shield").unwrap();
            assert!(ledger.add_item(EquipmentCategory::Armor, "Shield").is_ok());
        }

        #[test]
        fn remove_missing_item_fails() {
            let mut ledger = EquipmentLedger::new();
            let err = ledger.remove_item(EquipmentCategory::Armor, "Plate").unwrap_err();
            assert!(matches!(err, DomainError::ItemNotFound { .. }));
        }

        #[test]
        fn remove_keeps_remaining_order() {
            let mut ledger = EquipmentLedger::new();
            for name in ["A1", "B2", "C3"] {
                ledger.add_item(EquipmentCategory::Items, name).unwrap();
            }
            ledger.remove_item(EquipmentCategory::Items, "B2").unwrap();
            assert_eq!(ledger.items(EquipmentCategory::Items), &["A1", "C3"]);
        }
    }

    mod money {
        use super::*;

        #[test]
        fn credit_adds_every_denomination() {
            let mut ledger = EquipmentLedger::new();
            ledger
                .adjust_money(MoneyOperation::Credit, Coins::new(1, 2, 3, 4))
                .unwrap();
            let balance = ledger
                .adjust_money(MoneyOperation::Credit, Coins::new(1, 1, 1, 1))
                .unwrap();
            assert_eq!(balance, Coins::new(2, 3, 4, 5));
        }

        #[test]
        fn debit_beyond_balance_fails_without_partial_application() {
            let mut ledger = EquipmentLedger::new();
            ledger
                .adjust_money(MoneyOperation::Credit, Coins::new(3, 5, 7, 9))
                .unwrap();
            let err = ledger
                .adjust_money(MoneyOperation::Debit, Coins::new(1, 10, 1, 1))
                .unwrap_err();
            assert_eq!(
                err,
                DomainError::InsufficientFunds {
                    denomination: Denomination::Gold,
                    available: 5,
                    requested: 10,
                }
            );
            assert_eq!(ledger.money(), Coins::new(3, 5, 7, 9));
        }

        #[test]
        fn debit_does_not_convert_denominations() {
            let mut ledger = EquipmentLedger::new();
            ledger
                .adjust_money(MoneyOperation::Credit, Coins::new(10, 0, 0, 0))
                .unwrap();
            assert!(ledger
                .adjust_money(MoneyOperation::Debit, Coins::new(0, 1, 0, 0))
                .is_err());
        }

        #[test]
        fn debit_to_exactly_zero() {
            let mut ledger = EquipmentLedger::new();
            ledger
                .adjust_money(MoneyOperation::Credit, Coins::new(0, 5, 0, 0))
                .unwrap();
            let balance = ledger
                .adjust_money(MoneyOperation::Debit, Coins::new(0, 5, 0, 0))
                .unwrap();
            assert!(balance.is_empty());
        }

        #[test]
        fn from_slice_requires_four_amounts() {
            assert_eq!(Coins::from_slice(&[0, 10, 5, 0]).unwrap(), Coins::new(0, 10, 5, 0));
            assert!(Coins::from_slice(&[1, 2, 3]).is_err());
        }
    }
}
