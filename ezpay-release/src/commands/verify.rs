// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::primitives::Address;
use eyre::eyre;
use ezpay_tools::core::verification::{self, PollConfig, VerificationOutcome, VerificationRequest};

use crate::{
    common_args::{build_explorer, ConstructorArgs, ContractArgs, ManifestArgs},
    error::CliResult,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Address of the deployed contract.
    #[arg(long)]
    address: Address,

    #[command(flatten)]
    manifest: ManifestArgs,
    #[command(flatten)]
    contract: ContractArgs,
    #[command(flatten)]
    constructor: ConstructorArgs,
}

pub async fn exec(args: Args) -> CliResult {
    let manifest = args.manifest.load()?;
    let artifact = args.contract.artifact(&manifest)?;
    let explorer = build_explorer(&manifest)?;

    let request =
        VerificationRequest::new(&artifact, args.address, &args.constructor.constructor_args)?;
    let outcome = verification::verify(&request, &PollConfig::default(), &explorer).await?;

    match outcome {
        VerificationOutcome::Verified | VerificationOutcome::AlreadyVerified => {
            println!("{} verified successfully at {}", artifact.contract_name, args.address);
            Ok(())
        }
        VerificationOutcome::Pending { guid } => {
            println!("verification still pending; re-run this command later");
            if let Some(guid) = guid {
                println!("explorer receipt: {guid}");
            }
            Ok(())
        }
        VerificationOutcome::Rejected { reason } => Err(eyre!(
            "verification rejected: {reason}\n\
             the deployed bytecode did not match; check constructor arguments, \
             compiler settings, and the artifact"
        )
        .into()),
    }
}
