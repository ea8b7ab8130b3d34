use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentKind {
    Checkup,
    Vaccination,
    Surgery,
    Grooming,
    Emergency,
}

impl std::fmt::Display for AppointmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AppointmentKind::Checkup => "Checkup",
            AppointmentKind::Vaccination => "Vaccination",
            AppointmentKind::Surgery => "Surgery",
            AppointmentKind::Grooming => "Grooming",
            AppointmentKind::Emergency => "Emergency",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    InProgress,
    Urgent,
    Completed,
    Cancelled,
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AppointmentStatus::Scheduled => "Scheduled",
            AppointmentStatus::Confirmed => "Confirmed",
            AppointmentStatus::InProgress => "In Progress",
            AppointmentStatus::Urgent => "Urgent",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: u32,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub patient_name: String,
    pub owner_name: String,
    pub owner_phone: Option<String>,
    pub kind: AppointmentKind,
    pub doctor: String,
    pub status: AppointmentStatus,
    pub duration_minutes: u32,
    pub notes: Option<String>,
}

impl Appointment {
    pub fn time_str(&self) -> String {
        self.time.format("%H:%M").to_string()
    }

    pub fn is_open(&self) -> bool {
        !matches!(
            self.status,
            AppointmentStatus::Completed | AppointmentStatus::Cancelled
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_str() {
        let appt = Appointment {
            id: 1,
            date: NaiveDate::from_ymd_opt(2024, 1, 18).unwrap(),
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            patient_name: "Buddy".into(),
            owner_name: "John Smith".into(),
            owner_phone: None,
            kind: AppointmentKind::Checkup,
            doctor: "Dr. Sarah Wilson".into(),
            status: AppointmentStatus::Confirmed,
            duration_minutes: 30,
            notes: None,
        };
        assert_eq!(appt.time_str(), "09:00");
        assert!(appt.is_open());
    }

    #[test]
    fn test_is_open_excludes_terminal_states() {
        let mut appt = Appointment {
            id: 1,
            date: NaiveDate::from_ymd_opt(2024, 1, 18).unwrap(),
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            patient_name: "Buddy".into(),
            owner_name: "John Smith".into(),
            owner_phone: None,
            kind: AppointmentKind::Checkup,
            doctor: "Dr. Sarah Wilson".into(),
            status: AppointmentStatus::Completed,
            duration_minutes: 30,
            notes: None,
        };
        assert!(!appt.is_open());
        appt.status = AppointmentStatus::Cancelled;
        assert!(!appt.is_open());
        appt.status = AppointmentStatus::Urgent;
        assert!(appt.is_open());
    }
}
