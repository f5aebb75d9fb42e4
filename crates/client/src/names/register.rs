// Path: crates/client/src/names/register.rs
use crate::contracts::{read, IEnsRegistry, IFifsRegistrar, IPublicResolver, IReverseRegistrar};
use crate::wallet::Signer;
use alloy_primitives::{Address, B256};
use cfp_crypto::{labelhash, namehash};
use cfp_types::config::ContractAddresses;
use cfp_types::error::{ConfigError, RegistryError};

/// The parent domain under which accounts claim names.
pub const USERS_DOMAIN: &str = "users.eth";

/// Claims `<label>.users.eth` for the signing account and points both the
/// forward and the reverse record at it.
#[derive(Debug, Clone)]
pub struct NameRegistrar {
    signer: Signer,
    ens_registry: Address,
    public_resolver: Address,
    reverse_registrar: Address,
    user_registrar: Address,
}

impl NameRegistrar {
    /// Binds the registrar to the configured naming contracts.
    pub fn new(signer: Signer, contracts: &ContractAddresses) -> Result<Self, ConfigError> {
        Ok(Self {
            signer,
            ens_registry: contracts.ens_registry()?,
            public_resolver: contracts.public_resolver()?,
            reverse_registrar: contracts.reverse_registrar()?,
            user_registrar: contracts.user_registrar()?,
        })
    }

    /// Normalizes `label` and appends the users domain.
    pub fn full_name(label: &str) -> Result<String, RegistryError> {
        Ok(format!("{}.{USERS_DOMAIN}", normalize_label(label)?))
    }

    /// Whether nobody has set a resolver for the name yet.
    pub async fn is_available(&self, label: &str) -> Result<bool, RegistryError> {
        let node = namehash(&Self::full_name(label)?)?;
        let resolver = read(
            self.signer.rpc(),
            self.ens_registry,
            &IEnsRegistry::resolverCall {
                node: B256::from(node),
            },
        )
        .await?
        ._0;
        Ok(resolver == Address::ZERO)
    }

    /// Registers the name and returns it in full.
    ///
    /// Sends four transactions in order: claim the label, set the address
    /// record, point the registry at the resolver, set the reverse record.
    /// Finally reads the address record back.
    pub async fn register(&self, label: &str) -> Result<String, RegistryError> {
        let bare = normalize_label(label)?;
        let name = format!("{bare}.{USERS_DOMAIN}");
        let node = B256::from(namehash(&name)?);
        let label_hash = B256::from(labelhash(&bare)?);
        let account = self.signer.account();

        if !self.is_available(label).await? {
            return Err(RegistryError::NameTaken(name));
        }

        tracing::info!(target: "names", %name, %account, "claiming name");
        self.signer
            .send(
                self.user_registrar,
                &IFifsRegistrar::registerCall {
                    label: label_hash,
                    owner: account,
                },
            )
            .await?;
        self.signer
            .send(
                self.public_resolver,
                &IPublicResolver::setAddrCall { node, account },
            )
            .await?;
        self.signer
            .send(
                self.ens_registry,
                &IEnsRegistry::setResolverCall {
                    node,
                    resolver: self.public_resolver,
                },
            )
            .await?;
        self.signer
            .send(
                self.reverse_registrar,
                &IReverseRegistrar::setNameCall { name: name.clone() },
            )
            .await?;

        let resolved = read(
            self.signer.rpc(),
            self.public_resolver,
            &IPublicResolver::addrCall { node },
        )
        .await?
        ._0;
        if resolved != account {
            return Err(RegistryError::NameMismatch {
                name,
                expected: account.to_string(),
                got: resolved.to_string(),
            });
        }
        tracing::info!(target: "names", %name, "name registered");
        Ok(name)
    }
}

fn normalize_label(label: &str) -> Result<String, RegistryError> {
    let label = label.trim().to_lowercase();
    if label.is_empty() || label.contains('.') || label.chars().any(char::is_whitespace) {
        return Err(RegistryError::InvalidName(label));
    }
    Ok(label)
}
