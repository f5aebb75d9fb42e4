// Path: crates/types/src/error/mod.rs
//! Core error types for the CFP registry client.

use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Errors raised while parsing identifiers exchanged with the backend or the chain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The call id is not a non-empty, even-length hex string.
    #[error("Invalid call id: {0}")]
    InvalidCallId(String),
    /// The digest is not 32 bytes of hex.
    #[error("Invalid content digest: {0}")]
    InvalidDigest(String),
    /// The address is not 20 bytes of hex.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    /// The value must be exactly 32 bytes to be passed as `bytes32`.
    #[error("Value is not 32 bytes wide: {0}")]
    NotBytes32(String),
}

impl ErrorCode for FormatError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidCallId(_) => "FORMAT_INVALID_CALL_ID",
            Self::InvalidDigest(_) => "FORMAT_INVALID_DIGEST",
            Self::InvalidAddress(_) => "FORMAT_INVALID_ADDRESS",
            Self::NotBytes32(_) => "FORMAT_NOT_BYTES32",
        }
    }
}

/// Errors returned by the registry REST backend.
///
/// 404 on point lookups and 403/409 on duplicate registrations are not errors;
/// the client maps them to semantic results before this type is built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced an HTTP response (connection refused, timeout, ...).
    #[error("Registry backend unreachable: {0}")]
    Transport(String),
    /// The backend answered with a non-success status that carries no semantic meaning.
    #[error("Registry backend returned HTTP {status}: {message}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The `message` field of the error body, or a snippet of the raw body.
        message: String,
    },
    /// The response body did not have the expected shape.
    #[error("Failed to decode registry response: {0}")]
    Decode(String),
    /// The configured base URL or a path segment could not form a URL.
    #[error("Invalid registry URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Whether retrying the same request could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => Self::transient_status(*status),
            Self::Decode(_) | Self::InvalidUrl(_) => false,
        }
    }

    /// Whether an HTTP status is worth retrying: 429 or any 5xx.
    pub fn transient_status(status: u16) -> bool {
        status == 429 || (500..600).contains(&status)
    }
}

impl ErrorCode for ApiError {
    fn code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "API_TRANSPORT",
            Self::Status { .. } => "API_STATUS",
            Self::Decode(_) => "API_DECODE",
            Self::InvalidUrl(_) => "API_INVALID_URL",
        }
    }
}

/// The JSON-RPC error code wallets use when the user rejects a request (EIP-1193).
pub const USER_REJECTED_CODE: i64 = 4001;

/// Errors from the Ethereum JSON-RPC endpoint.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RpcError {
    /// The request never reached the node.
    #[error("JSON-RPC transport error: {0}")]
    Transport(String),
    /// The node answered with a JSON-RPC error object.
    #[error("JSON-RPC error {code}: {message}")]
    Node {
        /// The JSON-RPC error code.
        code: i64,
        /// The error message.
        message: String,
    },
    /// The response could not be decoded.
    #[error("Failed to decode JSON-RPC response: {0}")]
    Decode(String),
    /// Contract call data or return data could not be encoded or decoded.
    #[error("ABI error: {0}")]
    Abi(String),
    /// The transaction was mined but reverted.
    #[error("Transaction {tx_hash} reverted")]
    Reverted {
        /// The hash of the reverted transaction.
        tx_hash: String,
    },
    /// No receipt appeared within the configured timeout.
    #[error("No receipt for transaction {tx_hash} after {waited_secs}s")]
    ReceiptTimeout {
        /// The hash of the pending transaction.
        tx_hash: String,
        /// How long the client waited.
        waited_secs: u64,
    },
}

impl RpcError {
    /// Whether the wallet reported that the user declined the request.
    pub fn is_user_rejection(&self) -> bool {
        matches!(self, Self::Node { code, .. } if *code == USER_REJECTED_CODE)
    }

    /// Whether the node refused the call because the contract reverted it.
    pub fn is_revert(&self) -> bool {
        match self {
            Self::Reverted { .. } => true,
            Self::Node { message, .. } => {
                let m = message.to_ascii_lowercase();
                m.contains("revert") || m.contains("call_exception")
            }
            _ => false,
        }
    }
}

impl ErrorCode for RpcError {
    fn code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "RPC_TRANSPORT",
            Self::Node { .. } => "RPC_NODE_ERROR",
            Self::Decode(_) => "RPC_DECODE",
            Self::Abi(_) => "RPC_ABI",
            Self::Reverted { .. } => "RPC_TX_REVERTED",
            Self::ReceiptTimeout { .. } => "RPC_RECEIPT_TIMEOUT",
        }
    }
}

/// Errors related to the wallet session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// No wallet session is connected, or it exposes no account.
    #[error("Wallet not connected")]
    NotConnected,
    /// The user declined the request in the wallet.
    #[error("The request was cancelled in the wallet")]
    UserRejected,
    /// The action is reserved to the factory owner.
    #[error("Account {account} is not the contract owner ({owner})")]
    NotOwner {
        /// The connected account.
        account: String,
        /// The owner reported by the backend.
        owner: String,
    },
    /// Any other failure reported by the wallet endpoint.
    #[error("Wallet RPC failure: {0}")]
    Rpc(RpcError),
}

impl From<RpcError> for WalletError {
    fn from(e: RpcError) -> Self {
        if e.is_user_rejection() {
            Self::UserRejected
        } else {
            Self::Rpc(e)
        }
    }
}

impl ErrorCode for WalletError {
    fn code(&self) -> &'static str {
        match self {
            Self::NotConnected => "WALLET_NOT_CONNECTED",
            Self::UserRejected => "WALLET_USER_REJECTED",
            Self::NotOwner { .. } => "WALLET_NOT_OWNER",
            Self::Rpc(_) => "WALLET_RPC_FAILURE",
        }
    }
}

/// Errors raised by the hash engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    /// No file was supplied.
    #[error("No file provided")]
    NoFile,
    /// The file could not be read.
    #[error("Failed to read {path}: {message}")]
    Io {
        /// The path that was being read.
        path: String,
        /// The underlying I/O error.
        message: String,
    },
    /// A hash function produced a digest of unexpected length.
    #[error("Invalid hash length: expected {expected}, got {got}")]
    InvalidHashLength {
        /// The expected digest length.
        expected: usize,
        /// The actual digest length.
        got: usize,
    },
}

impl ErrorCode for HashError {
    fn code(&self) -> &'static str {
        match self {
            Self::NoFile => "HASH_NO_FILE",
            Self::Io { .. } => "HASH_IO",
            Self::InvalidHashLength { .. } => "HASH_INVALID_LENGTH",
        }
    }
}

/// Errors raised by the proposal registration flow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// An action needs a content digest but no file was hashed yet.
    #[error("Please upload a file first")]
    NotHashed,
    /// Registration was attempted before the pair was checked.
    #[error("Check the proposal before registering it")]
    NotChecked,
    /// The pre-check found the pair already registered.
    #[error("The proposal is already registered")]
    AlreadyRegistered,
    /// The action is not valid in the current state.
    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        /// The name of the current state.
        state: &'static str,
        /// The attempted action.
        action: &'static str,
    },
    /// A malformed identifier.
    #[error(transparent)]
    Format(#[from] FormatError),
    /// The registry backend failed.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// The wallet failed.
    #[error(transparent)]
    Wallet(#[from] WalletError),
    /// The hash engine failed.
    #[error(transparent)]
    Hash(#[from] HashError),
}

impl ErrorCode for FlowError {
    fn code(&self) -> &'static str {
        match self {
            Self::NotHashed => "FLOW_NOT_HASHED",
            Self::NotChecked => "FLOW_NOT_CHECKED",
            Self::AlreadyRegistered => "FLOW_ALREADY_REGISTERED",
            Self::InvalidTransition { .. } => "FLOW_INVALID_TRANSITION",
            Self::Format(e) => e.code(),
            Self::Api(e) => e.code(),
            Self::Wallet(e) => e.code(),
            Self::Hash(e) => e.code(),
        }
    }
}

/// Errors raised by call creation, creator administration and name registration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The requested closing time is not in the future.
    #[error("Closing time {0} is not in the future")]
    ClosingTimeInPast(String),
    /// The name label is empty or contains a dot.
    #[error("Invalid name label: {0:?}")]
    InvalidName(String),
    /// The name already has a resolver set.
    #[error("The name {0} is already registered")]
    NameTaken(String),
    /// After registration, the resolver returned a different address.
    #[error("Name {name} resolves to {got}, expected {expected}")]
    NameMismatch {
        /// The full name that was registered.
        name: String,
        /// The wallet account.
        expected: String,
        /// The address read back from the resolver.
        got: String,
    },
    /// A malformed identifier.
    #[error(transparent)]
    Format(#[from] FormatError),
    /// The registry backend failed.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// The wallet failed.
    #[error(transparent)]
    Wallet(#[from] WalletError),
    /// A required setting is missing.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Hashing a name failed.
    #[error(transparent)]
    Hash(#[from] HashError),
}

impl From<RpcError> for RegistryError {
    fn from(e: RpcError) -> Self {
        Self::Wallet(e.into())
    }
}

impl ErrorCode for RegistryError {
    fn code(&self) -> &'static str {
        match self {
            Self::ClosingTimeInPast(_) => "REGISTRY_CLOSING_TIME_IN_PAST",
            Self::InvalidName(_) => "REGISTRY_INVALID_NAME",
            Self::NameTaken(_) => "REGISTRY_NAME_TAKEN",
            Self::NameMismatch { .. } => "REGISTRY_NAME_MISMATCH",
            Self::Format(e) => e.code(),
            Self::Api(e) => e.code(),
            Self::Wallet(e) => e.code(),
            Self::Config(e) => e.code(),
            Self::Hash(e) => e.code(),
        }
    }
}

/// Errors raised while loading the client configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config {path}: {message}")]
    Read {
        /// The configuration path.
        path: String,
        /// The underlying I/O error.
        message: String,
    },
    /// The configuration is not valid TOML for `ClientConfig`.
    #[error("Failed to parse config: {0}")]
    Parse(String),
    /// A URL setting is malformed.
    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
    /// A contract address needed by the requested action is not configured.
    #[error("Contract address `contracts.{0}` is not configured")]
    MissingContract(&'static str),
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::Read { .. } => "CONFIG_READ",
            Self::Parse(_) => "CONFIG_PARSE",
            Self::InvalidUrl(_) => "CONFIG_INVALID_URL",
            Self::MissingContract(_) => "CONFIG_MISSING_CONTRACT",
        }
    }
}
