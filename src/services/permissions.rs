// src/services/permissions.rs
//
// Quem pode o quê. Tudo é resolvido sobre um retrato do roster de revendas,
// sem ir ao armazenamento: a decisão é sempre a mesma para o mesmo retrato.

use crate::{
    common::error::AppError,
    models::{
        auth::Principal,
        rbac::Capability,
        reseller::{Reseller, ResellerTier},
    },
};

pub fn find_reseller<'a>(principal: &Principal, resellers: &'a [Reseller]) -> Option<&'a Reseller> {
    resellers.iter().find(|r| r.id == principal.id)
}

/// Administrador ou revenda master.
pub fn has_admin_standing(principal: &Principal, resellers: &[Reseller]) -> bool {
    if principal.is_administrator() {
        return true;
    }
    find_reseller(principal, resellers).is_some_and(|r| r.tier == ResellerTier::Master)
}

/// - administrador: tudo
/// - master: tudo menos configurações (o mapa gravado é ignorado)
/// - simples: exatamente o que está gravado
/// - revenda que não existe mais: nada
pub fn has_capability(principal: &Principal, resellers: &[Reseller], capability: Capability) -> bool {
    if principal.is_administrator() {
        return true;
    }
    match find_reseller(principal, resellers) {
        Some(r) if r.tier == ResellerTier::Master => capability != Capability::Settings,
        Some(r) => r.permissions.get(capability),
        None => false,
    }
}

pub fn effective_capabilities(principal: &Principal, resellers: &[Reseller]) -> Vec<Capability> {
    Capability::ALL
        .into_iter()
        .filter(|cap| has_capability(principal, resellers, *cap))
        .collect()
}

/// Principal autenticado + o roster lido no início da requisição.
#[derive(Debug, Clone)]
pub struct AccessContext {
    pub principal: Principal,
    resellers: Vec<Reseller>,
}

impl AccessContext {
    pub fn new(principal: Principal, resellers: Vec<Reseller>) -> Self {
        Self { principal, resellers }
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        has_capability(&self.principal, &self.resellers, capability)
    }

    pub fn require(&self, capability: Capability) -> Result<(), AppError> {
        if self.has_capability(capability) {
            Ok(())
        } else {
            Err(AppError::Forbidden(capability))
        }
    }

    pub fn has_admin_standing(&self) -> bool {
        has_admin_standing(&self.principal, &self.resellers)
    }

    pub fn capabilities(&self) -> Vec<Capability> {
        effective_capabilities(&self.principal, &self.resellers)
    }

    /// Admin/master enxergam tudo; os demais só o que cadastraram.
    pub fn can_see(&self, owner_id: &str) -> bool {
        self.has_admin_standing() || self.principal.id == owner_id
    }

    pub fn own_reseller(&self) -> Option<&Reseller> {
        find_reseller(&self.principal, &self.resellers)
    }

    pub fn resellers(&self) -> &[Reseller] {
        &self.resellers
    }
}
