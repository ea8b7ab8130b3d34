use anyhow::{Context, Result};
use keyring::Entry;

const SERVICE_NAME: &str = "vetclinic";

/// OS keychain storage for the remembered sign-in password, keyed by email.
pub struct CredentialStore;

impl CredentialStore {
    /// Store email and password in the OS keychain
    pub fn store(email: &str, password: &str) -> Result<()> {
        let entry = Entry::new(SERVICE_NAME, email).context("Failed to create keyring entry")?;
        entry
            .set_password(password)
            .context("Failed to store password in keychain")?;
        Ok(())
    }

    /// Retrieve the stored password for an email from the OS keychain
    pub fn get_password(email: &str) -> Result<String> {
        let entry = Entry::new(SERVICE_NAME, email).context("Failed to create keyring entry")?;
        entry
            .get_password()
            .context("Failed to retrieve password from keychain")
    }

    /// Delete stored credentials for an email
    pub fn delete(email: &str) -> Result<()> {
        let entry = Entry::new(SERVICE_NAME, email).context("Failed to create keyring entry")?;
        entry
            .delete_credential()
            .context("Failed to delete credential from keychain")?;
        Ok(())
    }

    /// Check if credentials exist for an email
    pub fn has_credentials(email: &str) -> bool {
        if let Ok(entry) = Entry::new(SERVICE_NAME, email) {
            entry.get_password().is_ok()
        } else {
            false
        }
    }
}
