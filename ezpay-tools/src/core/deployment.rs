// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Contract deployment.
//!
//! Deployment submits a contract-creation transaction and waits for a single
//! confirmation. It is not idempotent: every call consumes a nonce and lands a
//! new instance at a new address. Skipping a redeploy when a
//! [`DeploymentRecord`] already exists is the caller's job.

use std::time::{Duration, SystemTime};

use alloy::{
    network::TransactionBuilder,
    primitives::{Address, TxHash, U256},
    providers::{Provider, ProviderBuilder, WalletProvider},
    rpc::types::{TransactionReceipt, TransactionRequest},
};
use serde::Serialize;

use crate::core::{
    artifact::{Artifact, ConstructorError},
    network::{ConfigError, NetworkProfile},
};
use crate::utils::color::DebugColor;

/// How long to wait for the creation tx to be mined before giving up.
pub const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
pub struct DeploymentConfig {
    /// Overrides the profile's gas price when set.
    pub max_fee_per_gas_wei: Option<u128>,
    pub confirmation_timeout: Duration,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            max_fee_per_gas_wei: None,
            confirmation_timeout: DEFAULT_CONFIRMATION_TIMEOUT,
        }
    }
}

/// Outcome of a confirmed deployment. Not persisted here; returned to the
/// caller so it can be recorded alongside the release.
#[derive(Debug, Clone, Serialize)]
pub struct DeploymentRecord {
    pub contract_name: String,
    pub address: Address,
    pub network: String,
    pub chain_id: u64,
    pub constructor_args: Vec<String>,
    pub tx_hash: TxHash,
    pub submitted_at: SystemTime,
}

/// Gas and fee for one creation tx, resolved once per deployment.
#[derive(Debug, Clone, Copy)]
pub struct GasEstimate {
    pub gas: u64,
    pub max_fee_per_gas: u128,
}

impl GasEstimate {
    /// Worst-case wei spent if the tx consumes the full gas limit.
    pub fn cost(&self) -> U256 {
        U256::from(self.gas) * U256::from(self.max_fee_per_gas)
    }
}

#[derive(Debug)]
pub struct DeploymentRequest {
    tx: TransactionRequest,
    max_fee_per_gas_wei: Option<u128>,
    confirmation_timeout: Duration,
}

impl DeploymentRequest {
    pub fn new(
        sender: Address,
        initcode: Vec<u8>,
        max_fee_per_gas_wei: Option<u128>,
        confirmation_timeout: Duration,
    ) -> Self {
        Self {
            tx: TransactionRequest::default()
                .with_from(sender)
                .with_deploy_code(initcode),
            max_fee_per_gas_wei,
            confirmation_timeout,
        }
    }

    /// Estimates gas and resolves the fee in one round of RPC calls. The
    /// returned [`GasEstimate`] backs both the balance pre-check and the
    /// submitted tx, so the numbers cannot drift between the two.
    pub async fn estimate(&self, provider: &impl Provider) -> Result<GasEstimate, DeploymentError> {
        let gas = provider.estimate_gas(self.tx.clone()).await?;
        let max_fee_per_gas = match self.max_fee_per_gas_wei {
            Some(wei) => wei,
            None => provider.get_gas_price().await?,
        };
        Ok(GasEstimate { gas, max_fee_per_gas })
    }

    /// Submits the creation tx and suspends until it is mined or the
    /// confirmation timeout elapses. One confirmation is sufficient.
    pub async fn exec(
        self,
        estimate: &GasEstimate,
        provider: &impl Provider,
    ) -> Result<TransactionReceipt, DeploymentError> {
        let mut tx = self.tx;
        tx.gas = Some(estimate.gas);
        tx.max_fee_per_gas = Some(estimate.max_fee_per_gas);
        tx.max_priority_fee_per_gas = Some(0);

        let pending = provider.send_transaction(tx).await?;
        let tx_hash = *pending.tx_hash();
        debug!(@grey, "sent deploy tx: {}", tx_hash.debug_lavender());

        let receipt = tokio::time::timeout(self.confirmation_timeout, pending.get_receipt())
            .await
            .map_err(|_| DeploymentError::ConfirmationTimeout { tx_hash })?
            .or(Err(DeploymentError::FailedToComplete))?;
        if !receipt.status() {
            return Err(DeploymentError::Reverted { tx_hash });
        }

        Ok(receipt)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DeploymentError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Constructor(#[from] ConstructorError),

    #[error("rpc error: {0}")]
    Rpc(#[from] alloy::transports::RpcError<alloy::transports::TransportErrorKind>),

    #[error("failed to get balance")]
    FailedToGetBalance,
    #[error(
        "not enough funds in account {from_address} to pay for deployment: balance {balance} < {cost} wei"
    )]
    NotEnoughFunds {
        from_address: Address,
        balance: U256,
        cost: U256,
    },
    #[error("tx failed to complete")]
    FailedToComplete,
    #[error("no confirmation for {} before timeout; the tx may still land", .tx_hash.debug_red())]
    ConfirmationTimeout { tx_hash: TxHash },
    #[error("deploy tx reverted {}", .tx_hash.debug_red())]
    Reverted { tx_hash: TxHash },
    #[error("no contract address in receipt")]
    NoContractAddress,
}

/// Builds the initcode for a creation tx: artifact bytecode followed by the
/// ABI-encoded constructor arguments.
pub fn initcode(artifact: &Artifact, constructor_args: &[String]) -> Result<Vec<u8>, ConstructorError> {
    let mut code = artifact.bytecode.clone();
    code.extend(artifact.encode_constructor_args(constructor_args)?);
    Ok(code)
}

/// Deploys the contract to the profile's network and waits for confirmation.
///
/// Credentials are checked before anything touches the network, so a
/// misconfigured profile fails with [`ConfigError::MissingCredentials`] rather
/// than a rejected transaction.
pub async fn deploy(
    artifact: &Artifact,
    constructor_args: &[String],
    config: &DeploymentConfig,
    profile: &NetworkProfile,
) -> Result<DeploymentRecord, DeploymentError> {
    let wallet = profile.wallet()?;
    let provider = ProviderBuilder::new()
        .wallet(wallet)
        .connect(&profile.endpoint)
        .await?;
    deploy_with(artifact, constructor_args, config, profile, &provider).await
}

/// Deploys through an already-built provider. Callers that manage their own
/// provider (or wrap one for instrumentation) enter here.
pub async fn deploy_with(
    artifact: &Artifact,
    constructor_args: &[String],
    config: &DeploymentConfig,
    profile: &NetworkProfile,
    provider: &(impl Provider + WalletProvider),
) -> Result<DeploymentRecord, DeploymentError> {
    let code = initcode(artifact, constructor_args)?;
    let sender = provider.default_signer_address();
    debug!(@grey, "sender address: {}", sender.debug_lavender());

    let max_fee_per_gas_wei = config.max_fee_per_gas_wei.or(profile.gas_price_wei);
    let req = DeploymentRequest::new(sender, code, max_fee_per_gas_wei, config.confirmation_timeout);

    // one estimation round covers the balance check and the tx itself
    let estimate = req.estimate(provider).await?;
    let balance = provider
        .get_balance(sender)
        .await
        .map_err(|_| DeploymentError::FailedToGetBalance)?;
    if balance < estimate.cost() {
        return Err(DeploymentError::NotEnoughFunds {
            from_address: sender,
            balance,
            cost: estimate.cost(),
        });
    }

    let receipt = req.exec(&estimate, provider).await?;
    let address = receipt
        .contract_address
        .ok_or(DeploymentError::NoContractAddress)?;

    info!(@grey, "deployed code at address: {}", address.debug_lavender());
    info!(@grey, "deployment tx hash: {}", receipt.transaction_hash.debug_lavender());

    Ok(DeploymentRecord {
        contract_name: artifact.contract_name.clone(),
        address,
        network: profile.name.clone(),
        chain_id: profile.chain_id,
        constructor_args: constructor_args.to_vec(),
        tx_hash: receipt.transaction_hash,
        submitted_at: SystemTime::now(),
    })
}
