// Path: crates/client/src/context.rs
use crate::contracts::CfpFactory;
use crate::flow::RegistrationFlow;
use crate::gateway::RegistryGateway;
use crate::names::{NameRegistrar, NameResolver, PublicResolver};
use crate::rpc::JsonRpcClient;
use crate::wallet::WalletSession;
use cfp_types::app::CallId;
use cfp_types::config::ClientConfig;
use cfp_types::error::{ConfigError, RegistryError, WalletError};
use std::sync::Arc;

/// Everything a command needs, built once from the configuration and passed
/// explicitly to the components that use it.
#[derive(Debug)]
pub struct ClientContext {
    config: ClientConfig,
    api: Arc<RegistryGateway>,
    rpc: Arc<JsonRpcClient>,
    wallet: WalletSession,
}

impl ClientContext {
    /// Builds the backend gateway, the RPC client and a disconnected wallet session.
    pub fn from_config(config: ClientConfig) -> Result<Self, RegistryError> {
        let api = Arc::new(RegistryGateway::new(&config.api_url, config.http.clone())?);
        let rpc = Arc::new(JsonRpcClient::new(config.rpc_url.clone())?);
        let wallet = WalletSession::new(rpc.clone(), config.wallet.clone());
        Ok(Self {
            config,
            api,
            rpc,
            wallet,
        })
    }

    /// The configuration the context was built from.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The REST gateway.
    pub fn api(&self) -> &Arc<RegistryGateway> {
        &self.api
    }

    /// The JSON-RPC client.
    pub fn rpc(&self) -> &Arc<JsonRpcClient> {
        &self.rpc
    }

    /// The wallet session.
    pub fn wallet(&self) -> &WalletSession {
        &self.wallet
    }

    /// The wallet session, mutably, for connecting and disconnecting.
    pub fn wallet_mut(&mut self) -> &mut WalletSession {
        &mut self.wallet
    }

    /// A name resolver over the configured public resolver. Without one,
    /// every address displays as itself.
    pub fn names(&self) -> NameResolver<Option<PublicResolver>> {
        let lookup = self
            .config
            .contracts
            .public_resolver
            .map(|address| PublicResolver::new(self.rpc.clone(), address));
        if lookup.is_none() {
            tracing::debug!(target: "names", "no public resolver configured; names stay unresolved");
        }
        NameResolver::new(lookup)
    }

    /// The factory bound to the connected account, or `None` without a wallet.
    pub fn factory(&self) -> Result<Option<CfpFactory>, ConfigError> {
        match self.wallet.signer() {
            Some(signer) => Ok(Some(CfpFactory::new(
                self.config.contracts.cfp_factory()?,
                signer,
            ))),
            None => Ok(None),
        }
    }

    /// Like [`Self::factory`], but a wallet is required.
    pub fn require_factory(&self) -> Result<CfpFactory, RegistryError> {
        self.factory()?
            .ok_or(RegistryError::Wallet(WalletError::NotConnected))
    }

    /// A name registrar for the connected account.
    pub fn name_registrar(&self) -> Result<NameRegistrar, RegistryError> {
        let signer = self.wallet.require_signer()?;
        Ok(NameRegistrar::new(signer, &self.config.contracts)?)
    }

    /// A registration flow for proposals under `call_id`.
    pub fn flow(&self, call_id: CallId) -> RegistrationFlow<Arc<RegistryGateway>> {
        RegistrationFlow::new(self.api.clone(), call_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disconnected_context_has_no_factory() {
        let ctx = ClientContext::from_config(ClientConfig::default()).unwrap();
        assert!(ctx.factory().unwrap().is_none());
        assert!(matches!(
            ctx.require_factory(),
            Err(RegistryError::Wallet(WalletError::NotConnected))
        ));
        let raw = "0x00000000000000000000000000000000000000aA";
        assert_eq!(ctx.names().display_name(raw).await, raw);
        assert_eq!(ctx.flow("abc123".parse().unwrap()).state().name(), "idle");
    }

    #[test]
    fn bad_api_url_is_rejected() {
        let config = ClientConfig {
            api_url: "::".into(),
            ..Default::default()
        };
        assert!(matches!(
            ClientContext::from_config(config),
            Err(RegistryError::Api(_))
        ));
    }
}
