use std::fmt::Write;

use anyhow::{Context, Result};
use users_core::{Address, UserRepository};

/// Fetch the fixed address and render its non-empty fields.
/// # Errors
/// Returns an error if the lookup fails.
pub async fn execute<R: UserRepository>(repo: &R) -> Result<String> {
    let address = repo.get_address().await.context("address lookup failed")?;
    Ok(render(&address))
}

#[must_use]
pub fn render(address: &Address) -> String {
    let fields = [
        ("cep", &address.cep),
        ("logradouro", &address.logradouro),
        ("complemento", &address.complemento),
        ("bairro", &address.bairro),
        ("localidade", &address.localidade),
        ("uf", &address.uf),
        ("ibge", &address.ibge),
        ("gia", &address.gia),
        ("ddd", &address.ddd),
        ("siafi", &address.siafi),
    ];

    let mut out = String::new();
    for (label, value) in fields.iter().filter(|(_, value)| !value.is_empty()) {
        let _ = writeln!(out, "{label}: {value}");
    }
    out
}
