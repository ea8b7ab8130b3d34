//! Demo data set for the in-memory repositories.

use chrono::{NaiveDate, NaiveTime};

use crate::models::{
    Appointment, AppointmentKind, AppointmentStatus, Channel, InventoryItem, Invoice,
    InvoiceStatus, ItemCategory, MedicalInfo, Message, MessageStatus, Owner, Patient,
    PatientStatus, PaymentMethod, Role, ServiceLine, Species, StaffMember, Visit,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date")
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid seed time")
}

pub fn patients() -> Vec<Patient> {
    vec![
        Patient {
            id: 1,
            name: "Buddy".into(),
            species: Species::Dog,
            breed: Some("Golden Retriever".into()),
            age_years: Some(3.0),
            gender: Some("Male".into()),
            weight_kg: Some(32.0),
            owner: Owner {
                name: "John Smith".into(),
                phone: "+91 98765 43210".into(),
                email: Some("john.smith@email.com".into()),
                address: Some("123 Park Street, Mumbai".into()),
            },
            status: PatientStatus::Healthy,
            last_visit: Some(date(2024, 1, 15)),
            next_vaccination: Some(date(2024, 2, 15)),
            microchip: Some("123456789".into()),
            medical: MedicalInfo {
                allergies: None,
                medications: None,
                conditions: None,
                notes: Some("Friendly, responds well to treats".into()),
            },
            visits: vec![
                Visit {
                    date: date(2024, 1, 15),
                    reason: "Annual checkup".into(),
                    doctor: "Dr. Sarah Wilson".into(),
                    notes: Some("All vitals normal".into()),
                },
                Visit {
                    date: date(2023, 7, 2),
                    reason: "DHPP booster".into(),
                    doctor: "Dr. Mike Brown".into(),
                    notes: None,
                },
            ],
        },
        Patient {
            id: 2,
            name: "Whiskers".into(),
            species: Species::Cat,
            breed: Some("Persian".into()),
            age_years: Some(2.0),
            gender: Some("Female".into()),
            weight_kg: Some(4.5),
            owner: Owner {
                name: "Sarah Johnson".into(),
                phone: "+91 87654 32109".into(),
                email: Some("sarah.j@email.com".into()),
                address: Some("456 Oak Avenue, Delhi".into()),
            },
            status: PatientStatus::Treatment,
            last_visit: Some(date(2024, 1, 14)),
            next_vaccination: Some(date(2024, 3, 1)),
            microchip: Some("987654321".into()),
            medical: MedicalInfo {
                allergies: None,
                medications: Some("Doxycycline 50mg daily".into()),
                conditions: Some("Upper respiratory infection".into()),
                notes: None,
            },
            visits: vec![Visit {
                date: date(2024, 1, 14),
                reason: "URI treatment".into(),
                doctor: "Dr. Mike Brown".into(),
                notes: Some("Recheck in two weeks".into()),
            }],
        },
        Patient {
            id: 3,
            name: "Rocky".into(),
            species: Species::Dog,
            breed: Some("German Shepherd".into()),
            age_years: Some(5.0),
            gender: Some("Female".into()),
            weight_kg: Some(28.0),
            owner: Owner {
                name: "Carol White".into(),
                phone: "+91 76543 21098".into(),
                email: Some("carol.w@email.com".into()),
                address: Some("789 Maple Road, Bangalore".into()),
            },
            status: PatientStatus::Treatment,
            last_visit: Some(date(2024, 1, 18)),
            next_vaccination: None,
            microchip: Some("456789123".into()),
            medical: MedicalInfo {
                allergies: Some("Penicillin".into()),
                medications: None,
                conditions: None,
                notes: Some("Spay surgery scheduled".into()),
            },
            visits: Vec::new(),
        },
        Patient {
            id: 4,
            name: "Milo".into(),
            species: Species::Bird,
            breed: Some("Cockatiel".into()),
            age_years: Some(1.0),
            gender: Some("Male".into()),
            weight_kg: Some(0.1),
            owner: Owner {
                name: "David Lee".into(),
                phone: "+91 65432 10987".into(),
                email: None,
                address: Some("12 Lake View, Chennai".into()),
            },
            status: PatientStatus::Critical,
            last_visit: Some(date(2024, 1, 18)),
            next_vaccination: None,
            microchip: None,
            medical: MedicalInfo {
                allergies: None,
                medications: None,
                conditions: Some("Wing injury from accident".into()),
                notes: None,
            },
            visits: Vec::new(),
        },
        Patient {
            id: 5,
            name: "Luna".into(),
            species: Species::Cat,
            breed: Some("Siamese".into()),
            age_years: Some(4.0),
            gender: Some("Female".into()),
            weight_kg: Some(3.8),
            owner: Owner {
                name: "Emma Davis".into(),
                phone: "+91 54321 09876".into(),
                email: Some("emma.d@email.com".into()),
                address: None,
            },
            status: PatientStatus::Healthy,
            last_visit: Some(date(2023, 12, 20)),
            next_vaccination: Some(date(2024, 6, 20)),
            microchip: Some("321654987".into()),
            medical: MedicalInfo::default(),
            visits: Vec::new(),
        },
    ]
}

pub fn appointments() -> Vec<Appointment> {
    vec![
        Appointment {
            id: 1,
            date: date(2024, 1, 18),
            time: time(9, 0),
            patient_name: "Buddy".into(),
            owner_name: "John Smith".into(),
            owner_phone: Some("+91 98765 43210".into()),
            kind: AppointmentKind::Checkup,
            doctor: "Dr. Sarah Wilson".into(),
            status: AppointmentStatus::Confirmed,
            duration_minutes: 30,
            notes: Some("Annual health checkup".into()),
        },
        Appointment {
            id: 2,
            date: date(2024, 1, 18),
            time: time(10, 30),
            patient_name: "Whiskers".into(),
            owner_name: "Sarah Johnson".into(),
            owner_phone: Some("+91 87654 32109".into()),
            kind: AppointmentKind::Vaccination,
            doctor: "Dr. Mike Brown".into(),
            status: AppointmentStatus::Confirmed,
            duration_minutes: 15,
            notes: Some("Rabies vaccination".into()),
        },
        Appointment {
            id: 3,
            date: date(2024, 1, 18),
            time: time(14, 0),
            patient_name: "Rocky".into(),
            owner_name: "Carol White".into(),
            owner_phone: Some("+91 76543 21098".into()),
            kind: AppointmentKind::Surgery,
            doctor: "Dr. Sarah Wilson".into(),
            status: AppointmentStatus::InProgress,
            duration_minutes: 120,
            notes: Some("Spay surgery".into()),
        },
        Appointment {
            id: 4,
            date: date(2024, 1, 18),
            time: time(15, 30),
            patient_name: "Milo".into(),
            owner_name: "David Lee".into(),
            owner_phone: Some("+91 65432 10987".into()),
            kind: AppointmentKind::Emergency,
            doctor: "Dr. Emergency Team".into(),
            status: AppointmentStatus::Urgent,
            duration_minutes: 45,
            notes: Some("Accident injury - immediate attention needed".into()),
        },
        Appointment {
            id: 5,
            date: date(2024, 1, 19),
            time: time(11, 0),
            patient_name: "Luna".into(),
            owner_name: "Emma Davis".into(),
            owner_phone: Some("+91 54321 09876".into()),
            kind: AppointmentKind::Grooming,
            doctor: "Dr. Mike Brown".into(),
            status: AppointmentStatus::Scheduled,
            duration_minutes: 60,
            notes: None,
        },
    ]
}

pub fn invoices() -> Vec<Invoice> {
    vec![
        Invoice {
            id: 1,
            number: "INV-001".into(),
            patient_name: "Buddy".into(),
            owner_name: "John Smith".into(),
            date: date(2024, 1, 15),
            services: vec![
                ServiceLine { name: "Regular Checkup".into(), price: 800.0 },
                ServiceLine { name: "Vaccination - DHPP".into(), price: 600.0 },
                ServiceLine { name: "Deworming".into(), price: 200.0 },
            ],
            tax: 288.0,
            discount: 80.0,
            status: InvoiceStatus::Paid,
            payment_method: Some(PaymentMethod::Card),
            due_date: date(2024, 1, 15),
        },
        Invoice {
            id: 2,
            number: "INV-002".into(),
            patient_name: "Whiskers".into(),
            owner_name: "Sarah Johnson".into(),
            date: date(2024, 1, 14),
            services: vec![
                ServiceLine { name: "Treatment - URI".into(), price: 1200.0 },
                ServiceLine { name: "Medication".into(), price: 450.0 },
            ],
            tax: 297.0,
            discount: 0.0,
            status: InvoiceStatus::Pending,
            payment_method: None,
            due_date: date(2024, 1, 28),
        },
        Invoice {
            id: 3,
            number: "INV-003".into(),
            patient_name: "Rocky".into(),
            owner_name: "Carol White".into(),
            date: date(2024, 1, 18),
            services: vec![
                ServiceLine { name: "Spay Surgery".into(), price: 8500.0 },
                ServiceLine { name: "Post-op Medication".into(), price: 650.0 },
            ],
            tax: 1647.0,
            discount: 500.0,
            status: InvoiceStatus::Pending,
            payment_method: None,
            due_date: date(2024, 2, 1),
        },
        Invoice {
            id: 4,
            number: "INV-004".into(),
            patient_name: "Luna".into(),
            owner_name: "Emma Davis".into(),
            date: date(2023, 12, 20),
            services: vec![ServiceLine { name: "Dental Cleaning".into(), price: 1500.0 }],
            tax: 270.0,
            discount: 0.0,
            status: InvoiceStatus::Overdue,
            payment_method: None,
            due_date: date(2024, 1, 3),
        },
    ]
}

pub fn inventory() -> Vec<InventoryItem> {
    vec![
        InventoryItem {
            id: 1,
            name: "Amoxicillin Tablets".into(),
            category: ItemCategory::Medication,
            stock: 150,
            reorder_level: 50,
            unit: "tablets".into(),
            unit_price: 5.50,
            supplier: Some("MedVet Pharmaceuticals".into()),
            expiry: Some(date(2025, 8, 15)),
            location: Some("Cabinet A-1".into()),
        },
        InventoryItem {
            id: 2,
            name: "Rabies Vaccine".into(),
            category: ItemCategory::Vaccine,
            stock: 25,
            reorder_level: 30,
            unit: "vials".into(),
            unit_price: 350.0,
            supplier: Some("BioVet Labs".into()),
            expiry: Some(date(2025, 3, 1)),
            location: Some("Fridge B-2".into()),
        },
        InventoryItem {
            id: 3,
            name: "Surgical Gloves".into(),
            category: ItemCategory::Supply,
            stock: 480,
            reorder_level: 200,
            unit: "pairs".into(),
            unit_price: 12.0,
            supplier: Some("SafeHands Medical".into()),
            expiry: None,
            location: Some("Store Room".into()),
        },
        InventoryItem {
            id: 4,
            name: "Recovery Diet (Canine)".into(),
            category: ItemCategory::Food,
            stock: 18,
            reorder_level: 20,
            unit: "cans".into(),
            unit_price: 95.0,
            supplier: Some("NutriPet".into()),
            expiry: Some(date(2024, 11, 30)),
            location: Some("Shelf C-4".into()),
        },
        InventoryItem {
            id: 5,
            name: "DHPP Vaccine".into(),
            category: ItemCategory::Vaccine,
            stock: 60,
            reorder_level: 25,
            unit: "vials".into(),
            unit_price: 280.0,
            supplier: Some("BioVet Labs".into()),
            expiry: Some(date(2025, 1, 10)),
            location: Some("Fridge B-2".into()),
        },
    ]
}

pub fn staff() -> Vec<StaffMember> {
    vec![
        StaffMember {
            id: 1,
            name: "Dr. Sarah Wilson".into(),
            role: Role::Doctor,
            department: Some("Surgery & General Care".into()),
            email: "sarah.wilson@vetcare.com".into(),
            phone: Some("+91 98765 43210".into()),
            specialization: Some("Small Animal Surgery".into()),
            schedule: Some("Mon-Fri 9:00-17:00".into()),
            on_duty: true,
        },
        StaffMember {
            id: 2,
            name: "Dr. Mike Brown".into(),
            role: Role::Doctor,
            department: Some("General Care".into()),
            email: "mike.brown@vetcare.com".into(),
            phone: Some("+91 87654 32100".into()),
            specialization: Some("Feline Medicine".into()),
            schedule: Some("Mon-Sat 10:00-18:00".into()),
            on_duty: true,
        },
        StaffMember {
            id: 3,
            name: "Priya Sharma".into(),
            role: Role::Receptionist,
            department: Some("Front Desk".into()),
            email: "priya.sharma@vetcare.com".into(),
            phone: Some("+91 76543 21000".into()),
            specialization: None,
            schedule: Some("Mon-Fri 8:30-16:30".into()),
            on_duty: true,
        },
        StaffMember {
            id: 4,
            name: "Rahul Verma".into(),
            role: Role::Accountant,
            department: Some("Billing".into()),
            email: "rahul.verma@vetcare.com".into(),
            phone: None,
            specialization: None,
            schedule: Some("Mon-Fri 9:00-17:00".into()),
            on_duty: false,
        },
        StaffMember {
            id: 5,
            name: "Anita Desai".into(),
            role: Role::Admin,
            department: Some("Administration".into()),
            email: "anita.desai@vetcare.com".into(),
            phone: Some("+91 54321 00000".into()),
            specialization: None,
            schedule: Some("Mon-Fri 9:00-18:00".into()),
            on_duty: true,
        },
    ]
}

pub fn messages() -> Vec<Message> {
    vec![
        Message {
            id: 1,
            recipient: "John Smith".into(),
            patient_name: Some("Buddy".into()),
            subject: "Appointment Reminder".into(),
            body: "Hi John, this is a reminder that Buddy has an appointment tomorrow at 2:00 PM for vaccination.".into(),
            channel: Channel::Sms,
            status: MessageStatus::Sent,
            date: date(2024, 1, 17),
        },
        Message {
            id: 2,
            recipient: "All Active Clients".into(),
            patient_name: None,
            subject: "New Year Health Checkup Offers".into(),
            body: "Start the year right with a full health checkup for your pet. 20% off all checkup packages through January.".into(),
            channel: Channel::Email,
            status: MessageStatus::Sent,
            date: date(2024, 1, 5),
        },
        Message {
            id: 3,
            recipient: "Sarah Johnson".into(),
            patient_name: Some("Whiskers".into()),
            subject: "Follow-up Care".into(),
            body: "Hi Sarah, we hope Whiskers is recovering well. Please contact us if you have any concerns.".into(),
            channel: Channel::Sms,
            status: MessageStatus::Scheduled,
            date: date(2024, 1, 21),
        },
        Message {
            id: 4,
            recipient: "Emma Davis".into(),
            patient_name: Some("Luna".into()),
            subject: "Vaccination Reminder for Luna".into(),
            body: "Dear Emma, Luna is due for vaccination. Please schedule an appointment at your earliest convenience.".into(),
            channel: Channel::Email,
            status: MessageStatus::Draft,
            date: date(2024, 1, 20),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_ids_are_unique() {
        let ids: Vec<u32> = patients().iter().map(|p| p.id).collect();
        let mut deduped = ids.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(ids.len(), deduped.len());
    }

    #[test]
    fn test_seed_has_low_stock_items() {
        // The inventory tab's low-stock counter needs at least one hit
        assert!(inventory().iter().any(|i| i.is_low_stock()));
    }

    #[test]
    fn test_seed_staff_covers_all_roles() {
        let staff = staff();
        for role in [Role::Admin, Role::Doctor, Role::Receptionist, Role::Accountant] {
            assert!(staff.iter().any(|s| s.role == role), "missing {}", role);
        }
    }
}
