//! Domain DTOs for the user-management API.
//!
//! # Design
//! Rust field names are English; the wire names (`nome`, `senha`) are kept
//! through serde renames so the JSON matches the remote service exactly.
//! The mock-server crate defines its own copy of the schema and the
//! integration tests catch any drift between the two.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A user as stored by the remote service.
///
/// The password travels and is stored in plaintext on the remote side. It is
/// kept out of `Debug` output so it never reaches the logs.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "senha")]
    pub password: String,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Result of the fixed postal-code lookup. Every field is optional on the
/// wire and defaults to an empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Address {
    pub cep: String,
    pub logradouro: String,
    pub complemento: String,
    pub bairro: String,
    pub localidade: String,
    pub uf: String,
    pub ibge: String,
    pub gia: String,
    pub ddd: String,
    pub siafi: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_uses_wire_field_names() {
        let user = User::new("1", "Ana", "segredo");
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json, serde_json::json!({"id": "1", "nome": "Ana", "senha": "segredo"}));
    }

    #[test]
    fn user_rejects_missing_name() {
        let result: Result<User, _> = serde_json::from_str(r#"{"id":"1","senha":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn debug_hides_password() {
        let user = User::new("1", "Ana", "segredo");
        let out = format!("{user:?}");
        assert!(out.contains("Ana"));
        assert!(!out.contains("segredo"));
    }

    #[test]
    fn address_tolerates_missing_fields() {
        let address: Address =
            serde_json::from_str(r#"{"cep":"58013-240","uf":"PB"}"#).unwrap();
        assert_eq!(address.cep, "58013-240");
        assert_eq!(address.uf, "PB");
        assert!(address.logradouro.is_empty());
    }
}
