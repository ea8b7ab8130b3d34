//! Aggregations for the dashboard and reports views.
//!
//! Plain reductions over repository contents; nothing here talks to the
//! backend.

use crate::models::{
    Appointment, AppointmentStatus, InventoryItem, Invoice, InvoiceStatus, Patient, Species,
};

/// One month of historical activity for the performance panel.
#[derive(Debug, Clone)]
pub struct MonthlyMetric {
    pub month: &'static str,
    pub patients: u32,
    pub revenue: f64,
}

/// Seeded six-month history rendered by the dashboard and reports tabs.
pub fn monthly_history() -> Vec<MonthlyMetric> {
    vec![
        MonthlyMetric { month: "Aug", patients: 65, revenue: 45000.0 },
        MonthlyMetric { month: "Sep", patients: 78, revenue: 52000.0 },
        MonthlyMetric { month: "Oct", patients: 82, revenue: 48000.0 },
        MonthlyMetric { month: "Nov", patients: 91, revenue: 58000.0 },
        MonthlyMetric { month: "Dec", patients: 88, revenue: 62000.0 },
        MonthlyMetric { month: "Jan", patients: 95, revenue: 67000.0 },
    ]
}

/// Patient counts per species, descending.
pub fn species_breakdown(patients: &[Patient]) -> Vec<(Species, usize)> {
    let mut counts: Vec<(Species, usize)> = Vec::new();
    for patient in patients {
        match counts.iter_mut().find(|(s, _)| *s == patient.species) {
            Some((_, n)) => *n += 1,
            None => counts.push((patient.species, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Sum of invoice totals in the given status.
pub fn revenue_by_status(invoices: &[Invoice], status: InvoiceStatus) -> f64 {
    invoices
        .iter()
        .filter(|i| i.status == status)
        .map(Invoice::total)
        .sum()
}

/// Outstanding amount: everything pending or overdue.
pub fn outstanding_revenue(invoices: &[Invoice]) -> f64 {
    revenue_by_status(invoices, InvoiceStatus::Pending)
        + revenue_by_status(invoices, InvoiceStatus::Overdue)
}

/// Appointment count in the given status.
pub fn appointments_by_status(appointments: &[Appointment], status: AppointmentStatus) -> usize {
    appointments.iter().filter(|a| a.status == status).count()
}

/// Items at or below their reorder level.
pub fn low_stock_items(items: &[InventoryItem]) -> Vec<InventoryItem> {
    items.iter().filter(|i| i.is_low_stock()).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::seed;

    #[test]
    fn test_species_breakdown_sorted_descending() {
        let breakdown = species_breakdown(&seed::patients());
        assert!(!breakdown.is_empty());
        for pair in breakdown.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
        // The demo set has two dogs
        assert!(breakdown.contains(&(Species::Dog, 2)));
    }

    #[test]
    fn test_revenue_by_status() {
        let invoices = seed::invoices();
        let paid = revenue_by_status(&invoices, InvoiceStatus::Paid);
        assert_eq!(paid, 1808.0);

        let outstanding = outstanding_revenue(&invoices);
        assert!(outstanding > 0.0);
        assert!(revenue_by_status(&invoices, InvoiceStatus::Overdue) > 0.0);
    }

    #[test]
    fn test_appointments_by_status() {
        let appointments = seed::appointments();
        assert_eq!(
            appointments_by_status(&appointments, AppointmentStatus::Confirmed),
            2
        );
        assert_eq!(
            appointments_by_status(&appointments, AppointmentStatus::Urgent),
            1
        );
    }

    #[test]
    fn test_low_stock_items() {
        let low = low_stock_items(&seed::inventory());
        assert!(low.iter().all(|i| i.is_low_stock()));
        assert!(low.iter().any(|i| i.name == "Rabies Vaccine"));
    }

    #[test]
    fn test_monthly_history_has_six_months() {
        assert_eq!(monthly_history().len(), 6);
    }
}
