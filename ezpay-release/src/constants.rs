// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

/// Network profile used when none is selected.
pub const DEFAULT_NETWORK: &str = "localhost";
