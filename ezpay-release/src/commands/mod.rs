// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use crate::error::CliResult;

mod accounts;
mod deploy;
mod release;
mod verify;

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Print the signer accounts configured for a network
    Accounts(accounts::Args),
    /// Deploy the contract without verifying its source
    #[clap(visible_alias = "d")]
    Deploy(deploy::Args),
    /// Deploy the contract, then verify its source with the explorer
    #[clap(visible_alias = "r")]
    Release(release::Args),
    /// Verify the source of an already deployed contract
    #[clap(visible_alias = "v")]
    Verify(verify::Args),
}

pub async fn exec(cmd: Command) -> CliResult {
    match cmd {
        Command::Accounts(args) => accounts::exec(args),
        Command::Deploy(args) => deploy::exec(args).await,
        Command::Release(args) => release::exec(args).await,
        Command::Verify(args) => verify::exec(args).await,
    }
}
