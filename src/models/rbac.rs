// src/models/rbac.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

// As áreas funcionais do painel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Customers,
    Payments,
    Banners,
    Settings,
    Users,
    Resellers,
    Plans,
}

impl Capability {
    pub const ALL: [Capability; 7] = [
        Capability::Customers,
        Capability::Payments,
        Capability::Banners,
        Capability::Settings,
        Capability::Users,
        Capability::Resellers,
        Capability::Plans,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Capability::Customers => "customers",
            Capability::Payments => "payments",
            Capability::Banners => "banners",
            Capability::Settings => "settings",
            Capability::Users => "users",
            Capability::Resellers => "resellers",
            Capability::Plans => "plans",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Concessões explícitas de uma revenda simples.
///
/// Registro fixo: chave ausente no JSON salvo vira `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Permissions {
    pub customers: bool,
    pub payments: bool,
    pub banners: bool,
    pub settings: bool,
    pub users: bool,
    pub resellers: bool,
    pub plans: bool,
}

impl Permissions {
    /// O que o formulário de nova revenda simples já vem marcando.
    pub fn simple_defaults() -> Self {
        Self {
            customers: true,
            payments: true,
            banners: true,
            ..Self::default()
        }
    }

    /// O mapa gravado para revendas master. Configurações nunca.
    pub fn master() -> Self {
        Self {
            customers: true,
            payments: true,
            banners: true,
            settings: false,
            users: true,
            resellers: true,
            plans: true,
        }
    }

    pub fn get(&self, capability: Capability) -> bool {
        match capability {
            Capability::Customers => self.customers,
            Capability::Payments => self.payments,
            Capability::Banners => self.banners,
            Capability::Settings => self.settings,
            Capability::Users => self.users,
            Capability::Resellers => self.resellers,
            Capability::Plans => self.plans,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_deserialize_as_denied() {
        let perms: Permissions = serde_json::from_str(r#"{"customers": true}"#).unwrap();
        assert!(perms.get(Capability::Customers));
        for cap in Capability::ALL.iter().filter(|c| **c != Capability::Customers) {
            assert!(!perms.get(*cap), "{cap} deveria ser false");
        }
    }

    #[test]
    fn master_map_never_grants_settings() {
        assert!(!Permissions::master().settings);
        assert!(Permissions::master().resellers);
    }
}
