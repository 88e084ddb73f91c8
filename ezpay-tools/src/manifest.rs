// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Release manifest.
//!
//! A `Release.toml` file describes the contract being released, the network
//! profiles it may be released to, and the explorer used for source
//! verification. Secrets (private keys, the explorer API key) are never stored
//! in the manifest; it only names the environment variables that hold them.
//!
//! ```toml
//! [contract]
//! name = "EzPay"
//! artifacts-dir = "artifacts"
//! source = "flattened/EzPay.sol"
//! compiler-version = "v0.8.22+commit.87f61d96"
//! optimizer-runs = 200
//!
//! [networks.mainnet]
//! endpoint = "https://mainnet.example.org/rpc"
//! chain-id = 1
//! gas-price-gwei = 30
//! accounts = ["PRIVATE_KEY"]
//!
//! [explorer]
//! api-url = "https://api.etherscan.io/api"
//! api-key-env = "ETHERSCAN_API_KEY"
//! ```

use std::{collections::BTreeMap, fs, path::Path, path::PathBuf};

use serde::{de::DeserializeOwned, Deserialize};

use crate::core::network::ConfigError;

/// Filename for release manifests.
pub const FILENAME: &str = "Release.toml";

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml read error: {0}")]
    TomlRead(#[from] toml::de::Error),

    #[error("missing Release.toml")]
    Missing,
}

pub fn load<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ManifestError> {
    if !path.as_ref().exists() {
        return Err(ManifestError::Missing);
    }

    let contents = fs::read_to_string(path)?;
    let manifest = toml::from_str(&contents)?;
    Ok(manifest)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Manifest {
    pub contract: ContractSection,
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkSection>,
    pub explorer: Option<ExplorerSection>,
}

impl Manifest {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        load(path)
    }

    pub fn network(&self, name: &str) -> Result<&NetworkSection, ConfigError> {
        self.networks
            .get(name)
            .ok_or_else(|| ConfigError::UnknownNetwork(name.to_owned()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ContractSection {
    /// Contract name, matching the artifact produced by the build toolchain.
    pub name: String,
    /// Build output directory searched for `<name>.json` artifacts.
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: PathBuf,
    /// Flattened source file submitted to the explorer.
    pub source: Option<PathBuf>,
    /// Full solc version string, e.g. `v0.8.22+commit.87f61d96`.
    pub compiler_version: Option<String>,
    /// Optimizer runs the contract was compiled with, if the optimizer was on.
    pub optimizer_runs: Option<u32>,
}

fn default_artifacts_dir() -> PathBuf {
    PathBuf::from("artifacts")
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NetworkSection {
    /// RPC endpoint URL.
    pub endpoint: String,
    pub chain_id: u64,
    /// Fixed gas price for this network. Queried from the node when unset.
    pub gas_price_gwei: Option<u64>,
    /// Environment variables holding hex-encoded private keys. Unset variables
    /// are skipped, so a profile with no keys in the environment deploys
    /// nothing and fails fast instead.
    #[serde(default)]
    pub accounts: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ExplorerSection {
    /// Explorer API endpoint, e.g. `https://api.etherscan.io/api`.
    pub api_url: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
}
