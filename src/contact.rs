use std::fmt;

use serde::Serialize;

/// A single entry in the contact directory.
///
/// Fields are fixed at construction; phone and email are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    name: String,
    phone: String,
    email: String,
}

impl Contact {
    pub fn new(name: impl Into<String>, phone: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }

    /// The name as it was entered, before any case folding.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}, Phone: {}, Email: {}",
            self.name(),
            self.phone(),
            self.email()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let contact = Contact::new("Alice", "555-0100", "alice@example.com");
        assert_eq!(
            contact.to_string(),
            "Name: Alice, Phone: 555-0100, Email: alice@example.com"
        );
    }

    #[test]
    fn test_fields_are_kept_verbatim() {
        let contact = Contact::new("McDonald", "  +1 (555) ", "");
        assert_eq!(contact.name(), "McDonald");
        assert_eq!(contact.phone(), "  +1 (555) ");
        assert_eq!(contact.email(), "");
        assert_eq!(contact.to_string(), "Name: McDonald, Phone:   +1 (555) , Email: ");
    }

    #[test]
    fn test_serialize() {
        let contact = Contact::new("Bob", "1", "b@x");
        let value = serde_json::to_value(&contact).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "name": "Bob", "phone": "1", "email": "b@x" })
        );
    }
}
