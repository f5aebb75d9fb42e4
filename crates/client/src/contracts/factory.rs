// Path: crates/client/src/contracts/factory.rs
use super::{read, ICfpFactory};
use crate::api::ProposalChain;
use crate::rpc::{JsonRpcClient, TxReceipt};
use crate::wallet::Signer;
use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;
use cfp_types::app::ContentDigest;
use cfp_types::error::{RpcError, WalletError};

/// The CFP factory contract as seen from one signing account.
#[derive(Debug, Clone)]
pub struct CfpFactory {
    address: Address,
    signer: Signer,
}

impl CfpFactory {
    /// Binds the factory at `address` to `signer`.
    pub fn new(address: Address, signer: Signer) -> Self {
        Self { address, signer }
    }

    /// The factory address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// The signing account.
    pub fn account(&self) -> Address {
        self.signer.account()
    }

    /// Reads the factory owner from the chain.
    pub async fn owner(rpc: &JsonRpcClient, address: Address) -> Result<Address, RpcError> {
        Ok(read(rpc, address, &ICfpFactory::ownerCall {}).await?._0)
    }

    /// Creates a call with the given id, closing at `closing_time` (unix seconds).
    pub async fn create(
        &self,
        call_id: [u8; 32],
        closing_time: u64,
    ) -> Result<TxReceipt, WalletError> {
        let call = ICfpFactory::createCall {
            callId: B256::from(call_id),
            timestamp: U256::from(closing_time),
        };
        self.signer.send(self.address, &call).await
    }

    /// Asks to become a creator.
    pub async fn register(&self) -> Result<TxReceipt, WalletError> {
        self.signer
            .send(self.address, &ICfpFactory::registerCall {})
            .await
    }

    /// Authorizes `creator`. Only the owner may do this.
    pub async fn authorize(&self, creator: Address) -> Result<TxReceipt, WalletError> {
        self.signer
            .send(self.address, &ICfpFactory::authorizeCall { creator })
            .await
    }
}

#[async_trait]
impl ProposalChain for CfpFactory {
    async fn register_proposal(
        &self,
        call_id: [u8; 32],
        digest: &ContentDigest,
    ) -> Result<String, WalletError> {
        let call = ICfpFactory::registerProposalCall {
            callId: B256::from(call_id),
            proposal: B256::from(*digest.as_bytes()),
        };
        let receipt = self.signer.send(self.address, &call).await?;
        Ok(receipt.transaction_hash.to_string())
    }
}
