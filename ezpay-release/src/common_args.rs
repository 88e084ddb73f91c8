// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{fs, path::PathBuf};

use eyre::Context;
use ezpay_tools::{
    core::{
        artifact::Artifact,
        deployment::DeploymentConfig,
        network::NetworkProfile,
        verification::Etherscan,
    },
    manifest::{self, Manifest},
};

use crate::{constants::DEFAULT_NETWORK, utils::convert_gwei_to_wei};

#[derive(Debug, clap::Args)]
pub struct ManifestArgs {
    /// Path to the release manifest.
    #[arg(long, default_value = manifest::FILENAME)]
    pub manifest: PathBuf,
}

impl ManifestArgs {
    pub fn load(&self) -> eyre::Result<Manifest> {
        Manifest::load(&self.manifest)
            .wrap_err_with(|| format!("could not load {}", self.manifest.display()))
    }
}

#[derive(Debug, clap::Args)]
pub struct NetworkArgs {
    /// Network profile from the manifest.
    #[arg(short, long, default_value = DEFAULT_NETWORK)]
    pub network: String,
    /// Private key as a hex string, overriding keys from the environment.
    /// Warning: this exposes your key to shell history
    #[arg(long)]
    private_key: Option<String>,
    /// File path to a text file containing a hex-encoded private key
    #[arg(long)]
    private_key_path: Option<PathBuf>,
    /// Optional max fee per gas in gwei units.
    #[arg(long)]
    max_fee_per_gas_gwei: Option<String>,
}

impl NetworkArgs {
    pub fn profile(&self, manifest: &Manifest) -> eyre::Result<NetworkProfile> {
        let section = manifest.network(&self.network)?;
        let mut profile = NetworkProfile::from_manifest(&self.network, section);
        if let Some(key) = &self.private_key {
            profile = profile.with_key(key);
        } else if let Some(path) = &self.private_key_path {
            let key = fs::read_to_string(path).wrap_err("could not open private key file")?;
            profile = profile.with_key(key.trim());
        }
        Ok(profile)
    }

    pub fn deployment_config(&self) -> eyre::Result<DeploymentConfig> {
        let max_fee_per_gas_wei = self
            .max_fee_per_gas_gwei
            .as_ref()
            .map(|fee_str| convert_gwei_to_wei(fee_str))
            .transpose()?;
        Ok(DeploymentConfig {
            max_fee_per_gas_wei,
            ..Default::default()
        })
    }
}

#[derive(Debug, clap::Args)]
pub struct ConstructorArgs {
    /// The constructor arguments.
    #[arg(
        long,
        num_args(0..),
        value_name = "ARGS",
        allow_hyphen_values = true,
    )]
    pub constructor_args: Vec<String>,
}

#[derive(Debug, clap::Args)]
pub struct ContractArgs {
    /// Contract name. Defaults to the contract named in the manifest.
    #[arg(long)]
    contract: Option<String>,
}

impl ContractArgs {
    pub fn artifact(&self, manifest: &Manifest) -> eyre::Result<Artifact> {
        let name = self.contract.as_deref().unwrap_or(&manifest.contract.name);
        Ok(Artifact::resolve(&manifest.contract.artifacts_dir, name)?)
    }
}

pub fn build_explorer(manifest: &Manifest) -> eyre::Result<Etherscan> {
    let section = manifest
        .explorer
        .as_ref()
        .ok_or(ezpay_tools::core::network::ConfigError::MissingExplorer)?;
    Ok(Etherscan::from_manifest(section, &manifest.contract)?)
}
