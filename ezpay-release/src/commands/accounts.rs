// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use crate::{
    common_args::{ManifestArgs, NetworkArgs},
    error::CliResult,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[command(flatten)]
    manifest: ManifestArgs,
    #[command(flatten)]
    network: NetworkArgs,
}

pub fn exec(args: Args) -> CliResult {
    let manifest = args.manifest.load()?;
    let profile = args.network.profile(&manifest)?;

    let signers = profile.signers()?;
    if signers.is_empty() {
        println!("no accounts configured for network {}", profile.name);
        return Ok(());
    }
    for signer in signers {
        println!("{}", signer.address());
    }
    Ok(())
}
