//! Data models for clinic entities.
//!
//! This module contains the data structures the dashboard renders:
//!
//! - `Profile`, `Role`: staff identity and authorization labels
//! - `Patient`, `Owner`, `Visit`: animal records with owner contact info
//! - `Appointment`: the daily schedule
//! - `Invoice`, `ServiceLine`: billing
//! - `InventoryItem`: stock tracking
//! - `StaffMember`, `Message`: staff directory and client communications

pub mod appointment;
pub mod billing;
pub mod inventory;
pub mod message;
pub mod patient;
pub mod profile;
pub mod role;
pub mod staff;

pub use appointment::{Appointment, AppointmentKind, AppointmentStatus};
pub use billing::{Invoice, InvoiceStatus, PaymentMethod, ServiceLine};
pub use inventory::{InventoryItem, ItemCategory};
pub use message::{Channel, Message, MessageStatus};
pub use patient::{MedicalInfo, Owner, Patient, PatientStatus, Species, Visit};
pub use profile::Profile;
pub use role::Role;
pub use staff::StaffMember;
