use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemCategory {
    Medication,
    Vaccine,
    Supply,
    Food,
}

impl std::fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ItemCategory::Medication => "Medication",
            ItemCategory::Vaccine => "Vaccine",
            ItemCategory::Supply => "Supply",
            ItemCategory::Food => "Food",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: u32,
    pub name: String,
    pub category: ItemCategory,
    pub stock: u32,
    pub reorder_level: u32,
    pub unit: String,
    pub unit_price: f64,
    pub supplier: Option<String>,
    pub expiry: Option<NaiveDate>,
    pub location: Option<String>,
}

impl InventoryItem {
    /// Stock at or below the reorder level needs a purchase order.
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.reorder_level
    }

    pub fn stock_str(&self) -> String {
        format!("{} {}", self.stock, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(stock: u32, reorder: u32) -> InventoryItem {
        InventoryItem {
            id: 1,
            name: "Rabies Vaccine".into(),
            category: ItemCategory::Vaccine,
            stock,
            reorder_level: reorder,
            unit: "vials".into(),
            unit_price: 350.0,
            supplier: Some("BioVet Labs".into()),
            expiry: NaiveDate::from_ymd_opt(2025, 3, 1),
            location: Some("Fridge B-2".into()),
        }
    }

    #[test]
    fn test_low_stock_boundary() {
        assert!(item(25, 30).is_low_stock());
        assert!(item(30, 30).is_low_stock());
        assert!(!item(31, 30).is_low_stock());
    }

    #[test]
    fn test_stock_str() {
        assert_eq!(item(25, 30).stock_str(), "25 vials");
    }
}
