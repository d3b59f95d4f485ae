//! Marker-interface contracts and their gap detection.
//!
//! A contract pairs a marker interface name with the signature of the member
//! that proves the interface is implemented, and the block of members to
//! inject when it is not.
//!
//! # Example
//!
//! ```
//! use contractfill::contract::{ContractKind, SOFT_DELETE};
//!
//! let entity = "public class Cliente : ISoftDeletableEntity\n{\n}\n";
//! assert!(SOFT_DELETE.has_gap(entity));
//! assert_eq!(SOFT_DELETE.kind, ContractKind::SoftDelete);
//! ```

pub mod templates;

use serde::Serialize;
use std::fmt;

pub use templates::{ARCHIVABLE_TEMPLATE, SOFT_DELETE_TEMPLATE};

/// Identifies one of the supported contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractKind {
    /// `ISoftDeletableEntity`
    SoftDelete,
    /// `IArchivableEntity`
    Archivable,
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractKind::SoftDelete => write!(f, "soft-delete"),
            ContractKind::Archivable => write!(f, "archivable"),
        }
    }
}

/// A marker interface and the members it obligates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contract {
    /// Which contract this is.
    pub kind: ContractKind,
    /// Interface name looked up as a plain substring.
    pub marker: &'static str,
    /// Member signature whose presence means the contract is implemented.
    pub signature: &'static str,
    /// Block injected when the signature is missing.
    pub template: &'static str,
}

/// The soft-delete contract.
pub const SOFT_DELETE: Contract = Contract {
    kind: ContractKind::SoftDelete,
    marker: "ISoftDeletableEntity",
    signature: "public bool Excluido",
    template: SOFT_DELETE_TEMPLATE,
};

/// The archivable contract.
pub const ARCHIVABLE: Contract = Contract {
    kind: ContractKind::Archivable,
    marker: "IArchivableEntity",
    signature: "public DateTime UltimaMovimentacao",
    template: ARCHIVABLE_TEMPLATE,
};

/// All contracts, in the order they are applied.
pub const CONTRACTS: [Contract; 2] = [SOFT_DELETE, ARCHIVABLE];

impl Contract {
    /// Whether the text mentions the marker interface.
    pub fn is_referenced(&self, text: &str) -> bool {
        text.contains(self.marker)
    }

    /// Whether the text already carries the contract's signature member.
    pub fn is_implemented(&self, text: &str) -> bool {
        text.contains(self.signature)
    }

    /// A gap is a referenced marker without its signature member.
    pub fn has_gap(&self, text: &str) -> bool {
        self.is_referenced(text) && !self.is_implemented(text)
    }
}

/// Whether any contract's marker interface appears in the text.
pub fn references_any(text: &str) -> bool {
    CONTRACTS.iter().any(|c| c.is_referenced(text))
}
