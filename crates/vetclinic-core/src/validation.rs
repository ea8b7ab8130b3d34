//! Field validation for user-submitted forms.
//!
//! The intake rules mirror what the clinic backend enforces on its side;
//! checking locally lets the form report problems before a round trip.

/// Minimum accepted password length for sign-up.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// One failed field check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// New-patient intake form as typed, before parsing.
#[derive(Debug, Clone, Default)]
pub struct PatientForm {
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age: String,
    pub gender: String,
    pub weight: String,
    pub color: String,
    pub microchip: String,
    pub owner_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub emergency_contact: String,
    pub allergies: String,
    pub medications: String,
    pub conditions: String,
    pub notes: String,
}

fn is_phone_like(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'))
}

fn is_email_like(s: &str) -> bool {
    let Some(at) = s.find('@') else {
        return false;
    };
    let (local, domain) = s.split_at(at);
    let domain = &domain[1..];
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

fn check_max(errors: &mut Vec<FieldError>, field: &'static str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.push(FieldError::new(
            field,
            format!("{} must be less than {} characters", field, max),
        ));
    }
}

fn check_range(errors: &mut Vec<FieldError>, field: &'static str, value: &str, min: f64, max: f64) {
    if value.is_empty() {
        return;
    }
    match value.parse::<f64>() {
        Ok(n) if (min..=max).contains(&n) => {}
        _ => errors.push(FieldError::new(
            field,
            format!("{} must be between {} and {}", field, min, max),
        )),
    }
}

/// Validate the intake form. An empty result means the form is acceptable.
pub fn validate_patient_form(form: &PatientForm) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if form.name.trim().is_empty() {
        errors.push(FieldError::new("name", "Patient name is required"));
    }
    check_max(&mut errors, "name", form.name.trim(), 100);

    if form.species.trim().is_empty() {
        errors.push(FieldError::new("species", "Species is required"));
    }

    check_max(&mut errors, "breed", &form.breed, 100);
    check_range(&mut errors, "age", &form.age, 0.0, 100.0);
    check_range(&mut errors, "weight", &form.weight, 0.0, 1000.0);
    check_max(&mut errors, "color", &form.color, 200);
    check_max(&mut errors, "microchip", &form.microchip, 50);

    if form.owner_name.trim().is_empty() {
        errors.push(FieldError::new("owner", "Owner name is required"));
    }
    check_max(&mut errors, "owner", form.owner_name.trim(), 100);

    let phone = form.phone.trim();
    if phone.is_empty() {
        errors.push(FieldError::new("phone", "Phone number is required"));
    } else if !is_phone_like(phone) {
        errors.push(FieldError::new("phone", "Invalid phone number format"));
    }
    check_max(&mut errors, "phone", phone, 20);

    let email = form.email.trim();
    if !email.is_empty() && !is_email_like(email) {
        errors.push(FieldError::new("email", "Invalid email address"));
    }
    check_max(&mut errors, "email", email, 255);

    check_max(&mut errors, "address", &form.address, 500);
    let emergency = form.emergency_contact.trim();
    if !emergency.is_empty() && !is_phone_like(emergency) {
        errors.push(FieldError::new("emergency", "Invalid phone number format"));
    }
    check_max(&mut errors, "emergency", emergency, 20);

    check_max(&mut errors, "allergies", &form.allergies, 1000);
    check_max(&mut errors, "medications", &form.medications, 1000);
    check_max(&mut errors, "conditions", &form.conditions, 1000);
    check_max(&mut errors, "notes", &form.notes, 2000);

    errors
}

/// Local checks before submitting a sign-in.
pub fn validate_sign_in(email: &str, password: &str) -> Result<(), String> {
    if email.trim().is_empty() || password.is_empty() {
        return Err("Email and password required".to_string());
    }
    if !is_email_like(email.trim()) {
        return Err("Invalid email address".to_string());
    }
    Ok(())
}

/// Local checks before submitting a sign-up.
pub fn validate_sign_up(email: &str, password: &str, full_name: &str) -> Result<(), String> {
    if full_name.trim().is_empty() {
        return Err("Full name is required".to_string());
    }
    if !is_email_like(email.trim()) {
        return Err("Invalid email address".to_string());
    }
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> PatientForm {
        PatientForm {
            name: "Buddy".into(),
            species: "Dog".into(),
            breed: "Golden Retriever".into(),
            age: "3".into(),
            weight: "32".into(),
            owner_name: "John Smith".into(),
            phone: "+91 98765 43210".into(),
            email: "john.smith@email.com".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(validate_patient_form(&valid_form()).is_empty());
    }

    #[test]
    fn test_required_fields() {
        let form = PatientForm::default();
        let errors = validate_patient_form(&form);
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert!(fields.contains(&"name"));
        assert!(fields.contains(&"species"));
        assert!(fields.contains(&"owner"));
        assert!(fields.contains(&"phone"));
    }

    #[test]
    fn test_numeric_ranges() {
        let mut form = valid_form();
        form.age = "150".into();
        form.weight = "-2".into();
        let errors = validate_patient_form(&form);
        assert!(errors.iter().any(|e| e.field == "age"));
        assert!(errors.iter().any(|e| e.field == "weight"));

        form.age = "not a number".into();
        form.weight = String::new(); // optional, empty is fine
        let errors = validate_patient_form(&form);
        assert!(errors.iter().any(|e| e.field == "age"));
        assert!(!errors.iter().any(|e| e.field == "weight"));
    }

    #[test]
    fn test_phone_charset() {
        let mut form = valid_form();
        form.phone = "call me".into();
        assert!(validate_patient_form(&form)
            .iter()
            .any(|e| e.field == "phone"));

        form.phone = "(555) 123-4567".into();
        assert!(validate_patient_form(&form).is_empty());
    }

    #[test]
    fn test_email_shape() {
        let mut form = valid_form();
        form.email = "not-an-email".into();
        assert!(validate_patient_form(&form)
            .iter()
            .any(|e| e.field == "email"));

        // Email is optional
        form.email = String::new();
        assert!(validate_patient_form(&form).is_empty());
    }

    #[test]
    fn test_length_caps() {
        let mut form = valid_form();
        form.notes = "x".repeat(2001);
        assert!(validate_patient_form(&form)
            .iter()
            .any(|e| e.field == "notes"));
        form.notes = "x".repeat(2000);
        assert!(validate_patient_form(&form).is_empty());
    }

    #[test]
    fn test_sign_up_password_minimum() {
        // Too short fails locally without touching the backend
        let err = validate_sign_up("jane@vetcare.com", "abc", "Dr. Jane Doe").unwrap_err();
        assert!(err.contains("at least 6"));
        assert!(validate_sign_up("jane@vetcare.com", "hunter22", "Dr. Jane Doe").is_ok());
    }

    #[test]
    fn test_sign_in_requires_both_fields() {
        assert!(validate_sign_in("", "secret").is_err());
        assert!(validate_sign_in("jane@vetcare.com", "").is_err());
        assert!(validate_sign_in("jane@vetcare.com", "secret").is_ok());
    }
}
