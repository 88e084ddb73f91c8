// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Network profiles.
//!
//! A [`NetworkProfile`] is an explicit value object selected once per release
//! run and handed to the pipeline. The pipeline never reads process-global
//! configuration, so independent releases against different networks can run
//! concurrently without coordination.

use alloy::{
    network::EthereumWallet,
    primitives::FixedBytes,
    signers::{
        local::{LocalSignerError, PrivateKeySigner},
        Signer,
    },
};

use crate::{manifest::NetworkSection, utils::decode0x};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown network profile: {0}")]
    UnknownNetwork(String),
    #[error("no signing credentials configured for network {network}")]
    MissingCredentials { network: String },
    #[error("private key is not valid hex: {0}")]
    KeyHex(#[from] hex::FromHexError),
    #[error("private key must be 32 bytes, got {0}")]
    KeyLength(usize),
    #[error("invalid private key: {0}")]
    KeyInvalid(#[from] LocalSignerError),
    #[error("explorer api key not set (env {var})")]
    MissingApiKey { var: String },
    #[error("missing [explorer] section in manifest")]
    MissingExplorer,
    #[error("no source file configured for verification")]
    MissingSource,
    #[error("could not read {what}: {source}")]
    Unreadable {
        what: String,
        source: std::io::Error,
    },
}

/// One network's connection and signing configuration.
#[derive(Debug, Clone)]
pub struct NetworkProfile {
    pub name: String,
    pub endpoint: String,
    pub chain_id: u64,
    pub gas_price_wei: Option<u128>,
    private_keys: Vec<String>,
}

impl NetworkProfile {
    pub fn new(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        chain_id: u64,
        gas_price_wei: Option<u128>,
        private_keys: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            endpoint: endpoint.into(),
            chain_id,
            gas_price_wei,
            private_keys,
        }
    }

    /// Builds a profile from a manifest section, pulling keys from the
    /// environment variables it names. Unset variables are skipped.
    pub fn from_manifest(name: &str, section: &NetworkSection) -> Self {
        let private_keys = section
            .accounts
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .collect();
        Self::new(
            name,
            &section.endpoint,
            section.chain_id,
            section.gas_price_gwei.map(|gwei| gwei as u128 * 1_000_000_000),
            private_keys,
        )
    }

    /// Replaces configured keys with a single caller-supplied one.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.private_keys = vec![key.into()];
        self
    }

    pub fn has_credentials(&self) -> bool {
        !self.private_keys.is_empty()
    }

    pub fn signers(&self) -> Result<Vec<PrivateKeySigner>, ConfigError> {
        self.private_keys
            .iter()
            .map(|key| {
                let raw = decode0x(key)?;
                if raw.len() != 32 {
                    return Err(ConfigError::KeyLength(raw.len()));
                }
                let bytes: FixedBytes<32> = FixedBytes::from_slice(&raw);
                let signer = PrivateKeySigner::from_bytes(&bytes)
                    .map_err(LocalSignerError::from)?
                    .with_chain_id(Some(self.chain_id));
                Ok(signer)
            })
            .collect()
    }

    /// Wallet over the first configured key. Absent credentials are a
    /// configuration error surfaced before any network traffic.
    pub fn wallet(&self) -> Result<EthereumWallet, ConfigError> {
        let mut signers = self.signers()?.into_iter();
        let Some(default) = signers.next() else {
            return Err(ConfigError::MissingCredentials {
                network: self.name.clone(),
            });
        };
        let mut wallet = EthereumWallet::new(default);
        for signer in signers {
            wallet.register_signer(signer);
        }
        Ok(wallet)
    }
}
