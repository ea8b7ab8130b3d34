use serde::{Deserialize, Serialize};

/// Staff profile row from the `profiles` table, keyed 1:1 with the auth user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl Profile {
    /// Short display name: first word of the full name, or the whole name.
    pub fn short_name(&self) -> &str {
        self.full_name
            .split_whitespace()
            .next()
            .unwrap_or(&self.full_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profile_row() {
        let json = r#"{"id":"6a1f","full_name":"Dr. Jane Doe","phone":null,"avatar_url":"https://cdn.example/ava.png"}"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.full_name, "Dr. Jane Doe");
        assert_eq!(profile.phone, None);
        assert!(profile.avatar_url.is_some());
    }

    #[test]
    fn test_parse_profile_row_missing_optionals() {
        let json = r#"{"id":"6a1f","full_name":"Dr. Jane Doe"}"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.phone, None);
        assert_eq!(profile.avatar_url, None);
    }

    #[test]
    fn test_short_name() {
        let profile = Profile {
            id: "u1".into(),
            full_name: "Dr. Jane Doe".into(),
            phone: None,
            avatar_url: None,
        };
        assert_eq!(profile.short_name(), "Dr.");
    }
}
