// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use ezpay_tools::core::{
    release::{self, ReleaseConfig},
    verification::VerificationOutcome,
};

use crate::{
    common_args::{build_explorer, ConstructorArgs, ContractArgs, ManifestArgs, NetworkArgs},
    error::CliResult,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[command(flatten)]
    manifest: ManifestArgs,
    #[command(flatten)]
    contract: ContractArgs,
    #[command(flatten)]
    network: NetworkArgs,
    #[command(flatten)]
    constructor: ConstructorArgs,
}

pub async fn exec(args: Args) -> CliResult {
    let manifest = args.manifest.load()?;
    let artifact = args.contract.artifact(&manifest)?;
    let profile = args.network.profile(&manifest)?;
    let explorer = build_explorer(&manifest)?;
    let config = ReleaseConfig {
        deployment: args.network.deployment_config()?,
        ..Default::default()
    };

    let result = release::release(
        &artifact,
        &args.constructor.constructor_args,
        &config,
        &profile,
        &explorer,
    )
    .await?;

    println!("{} deployed at {}", result.record.contract_name, result.address());

    // deployment succeeded, so every outcome below exits 0; verification can
    // be re-run standalone without redeploying
    match &result.verification {
        Ok(VerificationOutcome::Verified) | Ok(VerificationOutcome::AlreadyVerified) => {
            println!("{} verified successfully", result.record.contract_name);
        }
        Ok(VerificationOutcome::Pending { .. }) => {
            println!("verification still pending; re-run later with:");
            println!("    ezpay-release verify --address {}", result.address());
        }
        Ok(VerificationOutcome::Rejected { reason }) => {
            log::error!("verification rejected: {reason}");
            log::error!("check constructor arguments and compiler settings, then re-run verify");
        }
        Err(err) => {
            log::error!("verification stage failed: {err}");
            log::error!(
                "re-run with: ezpay-release verify --address {}",
                result.address()
            );
        }
    }

    Ok(())
}
