// Path: crates/client/src/contracts/mod.rs
//! ABI bindings for the registry and naming contracts.

pub mod factory;

use crate::rpc::JsonRpcClient;
use alloy_primitives::Address;
use alloy_sol_types::{sol, SolCall};
use cfp_types::error::RpcError;

pub use factory::CfpFactory;

sol! {
    /// The factory that creates calls and records proposals.
    interface ICfpFactory {
        function owner() external view returns (address);
        function create(bytes32 callId, uint256 timestamp) external;
        function registerProposal(bytes32 callId, bytes32 proposal) external;
        function register() external;
        function authorize(address creator) external;
    }

}

sol! {
    /// The ENS registry.
    interface IEnsRegistry {
        function resolver(bytes32 node) external view returns (address);
        function setResolver(bytes32 node, address resolver) external;
    }

}

sol! {
    /// The public resolver holding forward and reverse records.
    interface IPublicResolver {
        function addr(bytes32 node) external view returns (address);
        function name(bytes32 node) external view returns (string);
        function setAddr(bytes32 node, address account) external;
    }

}

sol! {
    /// Claims `addr.reverse` records for the sender.
    interface IReverseRegistrar {
        function setName(string name) external returns (bytes32);
    }

}

sol! {
    /// First-in-first-served registrar for `users.eth` subdomains.
    interface IFifsRegistrar {
        function register(bytes32 label, address owner) external;
    }
}

/// Runs a read-only contract call and decodes its return values.
pub async fn read<C: SolCall + Sync>(
    rpc: &JsonRpcClient,
    to: Address,
    call: &C,
) -> Result<C::Return, RpcError> {
    let out = rpc.call(to, call.abi_encode().into()).await?;
    C::abi_decode_returns(&out, true).map_err(|e| RpcError::Abi(e.to_string()))
}
