use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Paid,
    Pending,
    Overdue,
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Pending => "Pending",
            InvoiceStatus::Overdue => "Overdue",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Card,
    Cash,
    Upi,
    BankTransfer,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PaymentMethod::Card => "Card",
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::BankTransfer => "Bank Transfer",
        };
        write!(f, "{}", name)
    }
}

/// One billed service on an invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceLine {
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: u32,
    pub number: String,
    pub patient_name: String,
    pub owner_name: String,
    pub date: NaiveDate,
    pub services: Vec<ServiceLine>,
    pub tax: f64,
    pub discount: f64,
    pub status: InvoiceStatus,
    pub payment_method: Option<PaymentMethod>,
    pub due_date: NaiveDate,
}

impl Invoice {
    pub fn subtotal(&self) -> f64 {
        self.services.iter().map(|s| s.price).sum()
    }

    pub fn total(&self) -> f64 {
        self.subtotal() + self.tax - self.discount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_totals() {
        let invoice = Invoice {
            id: 1,
            number: "INV-001".into(),
            patient_name: "Buddy".into(),
            owner_name: "John Smith".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            services: vec![
                ServiceLine { name: "Regular Checkup".into(), price: 800.0 },
                ServiceLine { name: "Vaccination - DHPP".into(), price: 600.0 },
                ServiceLine { name: "Deworming".into(), price: 200.0 },
            ],
            tax: 288.0,
            discount: 80.0,
            status: InvoiceStatus::Paid,
            payment_method: Some(PaymentMethod::Card),
            due_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        };
        assert_eq!(invoice.subtotal(), 1600.0);
        assert_eq!(invoice.total(), 1808.0);
    }
}
