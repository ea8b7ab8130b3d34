use serde::{Deserialize, Serialize};

use super::Role;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: u32,
    pub name: String,
    pub role: Role,
    pub department: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub schedule: Option<String>,
    pub on_duty: bool,
}

impl StaffMember {
    pub fn status_str(&self) -> &'static str {
        if self.on_duty {
            "On duty"
        } else {
            "Off duty"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_str() {
        let mut member = StaffMember {
            id: 1,
            name: "Dr. Sarah Wilson".into(),
            role: Role::Doctor,
            department: Some("Surgery & General Care".into()),
            email: "sarah.wilson@vetcare.com".into(),
            phone: Some("+91 98765 43210".into()),
            specialization: Some("Small Animal Surgery".into()),
            schedule: Some("Mon-Fri 9:00-17:00".into()),
            on_duty: true,
        };
        assert_eq!(member.status_str(), "On duty");
        member.on_duty = false;
        assert_eq!(member.status_str(), "Off duty");
    }
}
