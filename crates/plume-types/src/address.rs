//! Addresses, roles, and derivation paths.
//!
//! An address is an opaque string identifier tagged with the derivation
//! coordinate `(account, role, index)` it was derived at. Addresses are
//! immutable once created; uniqueness is enforced by the owning wallet's
//! address set.

use serde::{Deserialize, Serialize};

/// Network type identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    /// Human-readable prefix used when rendering addresses for this network.
    pub fn address_prefix(&self) -> &'static str {
        match self {
            Network::Mainnet => "pl",
            Network::Testnet => "tpl",
        }
    }
}

/// Role of an address within an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressRole {
    /// Receiving addresses, handed out to counterparties.
    External,
    /// Change addresses, only ever created by the wallet itself.
    Internal,
}

impl AddressRole {
    /// Stable numeric encoding used inside derivation info strings.
    pub fn as_u32(&self) -> u32 {
        match self {
            AddressRole::External => 0,
            AddressRole::Internal => 1,
        }
    }
}

/// The `(account, role, index)` coordinate an address was derived at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DerivationPath {
    pub account: u32,
    pub role: AddressRole,
    pub index: u32,
}

impl DerivationPath {
    pub fn new(account: u32, role: AddressRole, index: u32) -> Self {
        Self { account, role, index }
    }
}

impl std::fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.account, self.role.as_u32(), self.index)
    }
}

/// An owned wallet address: opaque id plus the path it was derived at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Opaque string identifier (what the backend and counterparties see).
    pub id: String,
    /// Derivation coordinate under the wallet's key scheme.
    pub path: DerivationPath,
}

impl Address {
    pub fn new(id: String, path: DerivationPath) -> Self {
        Self { id, path }
    }
}
