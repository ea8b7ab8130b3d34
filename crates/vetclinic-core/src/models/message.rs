use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    Email,
    Sms,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Channel::Email => "Email",
            Channel::Sms => "SMS",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageStatus {
    Draft,
    Scheduled,
    Sent,
    Failed,
}

impl std::fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MessageStatus::Draft => "Draft",
            MessageStatus::Scheduled => "Scheduled",
            MessageStatus::Sent => "Sent",
            MessageStatus::Failed => "Failed",
        };
        write!(f, "{}", name)
    }
}

/// One outbound client communication (reminder, campaign, follow-up).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: u32,
    pub recipient: String,
    pub patient_name: Option<String>,
    pub subject: String,
    pub body: String,
    pub channel: Channel,
    pub status: MessageStatus,
    pub date: NaiveDate,
}

impl Message {
    /// Body preview for list rows.
    pub fn preview(&self, max_len: usize) -> String {
        crate::utils::truncate(&self.body, max_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates() {
        let message = Message {
            id: 1,
            recipient: "John Smith".into(),
            patient_name: Some("Buddy".into()),
            subject: "Appointment Reminder".into(),
            body: "Hi John, this is a reminder that Buddy has an appointment tomorrow.".into(),
            channel: Channel::Sms,
            status: MessageStatus::Sent,
            date: NaiveDate::from_ymd_opt(2024, 1, 17).unwrap(),
        };
        let preview = message.preview(20);
        assert!(preview.len() <= 20);
        assert!(preview.ends_with("..."));
    }
}
