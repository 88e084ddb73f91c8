// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use ezpay_tools::core::deployment;

use crate::{
    common_args::{ConstructorArgs, ContractArgs, ManifestArgs, NetworkArgs},
    error::CliResult,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Print the deployment record as JSON.
    #[arg(long)]
    json: bool,

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
    let config = args.network.deployment_config()?;

    let record = deployment::deploy(
        &artifact,
        &args.constructor.constructor_args,
        &config,
        &profile,
    )
    .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record).map_err(eyre::Report::from)?);
    } else {
        println!("{} deployed at {}", record.contract_name, record.address);
        println!("deployment tx hash: {}", record.tx_hash);
    }
    Ok(())
}
