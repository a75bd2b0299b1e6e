//! Error definitions for the fee vault contracts
use odra::prelude::*;

/// Errors raised by the vault wrapper
#[odra::odra_error]
pub enum VaultError {
    /// Amount argument is zero
    ZeroAmount = 1,

    /// Receiver, owner or new owner is the null address
    NullAddress = 2,

    /// Fee rate above `MAX_FEE_RATE_BPS`
    InvalidFeeRate = 3,

    /// Migration target is the active vault
    SameVault = 4,

    /// Vault holds a different base asset
    AssetMismatch = 5,

    /// Operation would mint or burn zero shares
    ZeroShares = 6,

    /// Operation would pay out zero assets
    ZeroAssets = 7,

    /// Principal holds fewer shares than requested
    InsufficientShares = 10,

    /// Fee pool holds fewer shares than requested
    InsufficientFeeShares = 11,

    /// Migration attempted while the wrapper holds no vault shares
    NoAssetsToMigrate = 20,

    /// Division by zero
    DivisionByZero = 21,

    /// Fee amount larger than the gross amount it was taken from
    InvalidFeeSplit = 22,

    /// Overflow error
    Overflow = 23,

    /// Underflow error
    Underflow = 24,

    /// Unit conversion factor would become zero
    InvalidConversionFactor = 25,

    /// Mint credited fewer shares than requested
    MintShortfall = 26,

    /// Locked - reentrancy guard
    ReentrantCall = 27,

    /// Ledger schema is already at the current version
    SchemaUpToDate = 28,

    /// Ledger schema is newer than this code understands
    UnsupportedSchemaVersion = 29,

    /// Ledger storage was never initialized
    NotInitialized = 32,

    /// Unauthorized access
    Unauthorized = 30,

    /// Caller's share allowance from the owner is too small
    InsufficientAllowance = 31,

    /// Token transfer returned false
    TransferFailed = 40,

    /// Underlying vault returned an unusable result
    VaultCallFailed = 41,

    /// Contract is paused
    Paused = 50,
}

/// Coarse classification of [`VaultError`] variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    InsufficientBalance,
    PreconditionFailed,
    Unauthorized,
    ExternalCallFailure,
    OperationPaused,
}

impl VaultError {
    /// Taxonomy kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            VaultError::ZeroAmount
            | VaultError::NullAddress
            | VaultError::InvalidFeeRate
            | VaultError::SameVault
            | VaultError::AssetMismatch
            | VaultError::ZeroShares
            | VaultError::ZeroAssets => ErrorKind::InvalidArgument,
            VaultError::InsufficientShares | VaultError::InsufficientFeeShares => {
                ErrorKind::InsufficientBalance
            }
            VaultError::NoAssetsToMigrate
            | VaultError::DivisionByZero
            | VaultError::InvalidFeeSplit
            | VaultError::Overflow
            | VaultError::Underflow
            | VaultError::InvalidConversionFactor
            | VaultError::MintShortfall
            | VaultError::ReentrantCall
            | VaultError::SchemaUpToDate
            | VaultError::UnsupportedSchemaVersion
            | VaultError::NotInitialized => ErrorKind::PreconditionFailed,
            VaultError::Unauthorized | VaultError::InsufficientAllowance => {
                ErrorKind::Unauthorized
            }
            VaultError::TransferFailed | VaultError::VaultCallFailed => {
                ErrorKind::ExternalCallFailure
            }
            VaultError::Paused => ErrorKind::OperationPaused,
        }
    }
}

/// Errors raised by the CEP-18 asset token
#[odra::odra_error]
pub enum TokenError {
    /// Insufficient allowance for transfer
    InsufficientAllowance = 100,

    /// Insufficient balance for operation
    InsufficientBalance = 101,

    /// Balance or supply would overflow
    Overflow = 102,
}

/// Errors raised by the reference yield vault
#[odra::odra_error]
pub enum YieldVaultError {
    /// Zero amount
    ZeroAmount = 300,

    /// Deposit would mint zero shares
    ZeroShares = 301,

    /// Owner holds fewer shares than requested
    InsufficientShares = 302,

    /// Caller may not spend the owner's shares
    InsufficientAllowance = 303,

    /// Vault has been halted by its admin
    Halted = 304,

    /// Unauthorized access
    Unauthorized = 305,

    /// Token transfer returned false
    TransferFailed = 306,

    /// Vault is missing its configuration
    InvalidConfiguration = 307,

    /// Overflow error
    Overflow = 308,

    /// Underflow error
    Underflow = 309,

    /// Division by zero
    DivisionByZero = 310,
}

impl From<VaultError> for YieldVaultError {
    /// Arithmetic failures from the shared math helpers, in this contract's range
    fn from(error: VaultError) -> Self {
        match error {
            VaultError::Underflow => YieldVaultError::Underflow,
            VaultError::DivisionByZero => YieldVaultError::DivisionByZero,
            _ => YieldVaultError::Overflow,
        }
    }
}
