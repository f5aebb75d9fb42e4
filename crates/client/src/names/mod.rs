// Path: crates/client/src/names/mod.rs
//! Reverse resolution of addresses to human-readable names, and registration
//! of names under `users.eth`.

pub mod register;

use crate::contracts::{read, IPublicResolver};
use crate::rpc::JsonRpcClient;
use alloy_primitives::{Address, B256};
use async_trait::async_trait;
use cfp_crypto::reverse_node;
use cfp_types::app::parse_address;
use cfp_types::error::RpcError;
use dashmap::DashMap;
use std::sync::Arc;

pub use register::{NameRegistrar, USERS_DOMAIN};

/// Looks up the reverse record stored for a node.
#[async_trait]
pub trait ReverseLookup: Send + Sync {
    /// The name recorded for `node`; empty when there is none.
    async fn name(&self, node: [u8; 32]) -> Result<String, RpcError>;
}

/// The public resolver contract as a [`ReverseLookup`].
#[derive(Debug, Clone)]
pub struct PublicResolver {
    rpc: Arc<JsonRpcClient>,
    address: Address,
}

impl PublicResolver {
    /// Binds the resolver at `address`.
    pub fn new(rpc: Arc<JsonRpcClient>, address: Address) -> Self {
        Self { rpc, address }
    }
}

#[async_trait]
impl ReverseLookup for PublicResolver {
    async fn name(&self, node: [u8; 32]) -> Result<String, RpcError> {
        let call = IPublicResolver::nameCall {
            node: B256::from(node),
        };
        Ok(read(&self.rpc, self.address, &call).await?._0)
    }
}

/// An unconfigured resolver knows no names.
#[async_trait]
impl<L: ReverseLookup> ReverseLookup for Option<L> {
    async fn name(&self, node: [u8; 32]) -> Result<String, RpcError> {
        match self {
            Some(lookup) => lookup.name(node).await,
            None => Ok(String::new()),
        }
    }
}

/// Resolves addresses to names, remembering every answer.
///
/// Resolution never fails from the caller's point of view: lookup errors and
/// empty records both mean "no name", and the caller shows the address instead.
pub struct NameResolver<L> {
    lookup: L,
    cache: DashMap<Address, Option<String>>,
}

impl<L: ReverseLookup> NameResolver<L> {
    /// Creates a resolver with an empty cache.
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            cache: DashMap::new(),
        }
    }

    /// The reverse name of `address`, if one is set.
    pub async fn lookup(&self, address: &Address) -> Option<String> {
        if let Some(hit) = self.cache.get(address) {
            return hit.value().clone();
        }
        let name = match self.fetch(address).await {
            Ok(n) if !n.is_empty() => Some(n),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!(target: "names", %address, error = %e, "reverse lookup failed");
                None
            }
        };
        self.cache.insert(*address, name.clone());
        name
    }

    /// The name for `raw`, or `raw` itself when it has none or is not an address.
    pub async fn display_name(&self, raw: &str) -> String {
        match parse_address(raw) {
            Ok(address) => self
                .lookup(&address)
                .await
                .unwrap_or_else(|| raw.to_string()),
            Err(_) => raw.to_string(),
        }
    }

    async fn fetch(&self, address: &Address) -> Result<String, RpcError> {
        let node = reverse_node(address.as_slice()).map_err(|e| RpcError::Abi(e.to_string()))?;
        self.lookup.name(node).await
    }
}

impl<L> std::fmt::Debug for NameResolver<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameResolver")
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
