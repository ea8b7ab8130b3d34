use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Species {
    Dog,
    Cat,
    Bird,
    Rabbit,
    Other,
}

impl Species {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "dog" => Species::Dog,
            "cat" => Species::Cat,
            "bird" => Species::Bird,
            "rabbit" => Species::Rabbit,
            _ => Species::Other,
        }
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Species::Dog => "Dog",
            Species::Cat => "Cat",
            Species::Bird => "Bird",
            Species::Rabbit => "Rabbit",
            Species::Other => "Other",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatientStatus {
    Healthy,
    Treatment,
    Critical,
}

impl std::fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PatientStatus::Healthy => "Healthy",
            PatientStatus::Treatment => "Treatment",
            PatientStatus::Critical => "Critical",
        };
        write!(f, "{}", name)
    }
}

/// Contact block for the animal's owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Owner {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Free-text medical information captured at intake.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MedicalInfo {
    pub allergies: Option<String>,
    pub medications: Option<String>,
    pub conditions: Option<String>,
    pub notes: Option<String>,
}

/// One past consultation, kept with the patient record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visit {
    pub date: NaiveDate,
    pub reason: String,
    pub doctor: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: u32,
    pub name: String,
    pub species: Species,
    pub breed: Option<String>,
    pub age_years: Option<f32>,
    pub gender: Option<String>,
    pub weight_kg: Option<f32>,
    pub owner: Owner,
    pub status: PatientStatus,
    pub last_visit: Option<NaiveDate>,
    pub next_vaccination: Option<NaiveDate>,
    pub microchip: Option<String>,
    #[serde(default)]
    pub medical: MedicalInfo,
    #[serde(default)]
    pub visits: Vec<Visit>,
}

impl Patient {
    /// "Buddy (Dog)" style label for lists.
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.species)
    }

    pub fn breed_str(&self) -> &str {
        self.breed.as_deref().unwrap_or("-")
    }

    pub fn age_str(&self) -> String {
        match self.age_years {
            Some(age) => format!("{:.0}", age),
            None => "-".to_string(),
        }
    }

    pub fn weight_str(&self) -> String {
        match self.weight_kg {
            Some(w) => format!("{} kg", w),
            None => "-".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient() -> Patient {
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
            last_visit: NaiveDate::from_ymd_opt(2024, 1, 15),
            next_vaccination: NaiveDate::from_ymd_opt(2024, 2, 15),
            microchip: Some("123456789".into()),
            medical: MedicalInfo::default(),
            visits: Vec::new(),
        }
    }

    #[test]
    fn test_display_label() {
        assert_eq!(patient().display_label(), "Buddy (Dog)");
    }

    #[test]
    fn test_species_parse() {
        assert_eq!(Species::parse("dog"), Species::Dog);
        assert_eq!(Species::parse("Cat"), Species::Cat);
        assert_eq!(Species::parse("iguana"), Species::Other);
    }

    #[test]
    fn test_optional_field_displays() {
        let mut p = patient();
        p.breed = None;
        p.weight_kg = None;
        assert_eq!(p.breed_str(), "-");
        assert_eq!(p.weight_str(), "-");
        assert_eq!(p.age_str(), "3");
    }
}
