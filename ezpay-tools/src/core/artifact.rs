// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Compiled contract artifacts.
//!
//! The build toolchain is external. It leaves one JSON file per contract under
//! the artifacts directory, carrying the creation bytecode and the ABI. This
//! module only resolves and parses those files, it never compiles anything.

use std::path::{Path, PathBuf};

use alloy::{
    dyn_abi::{DynSolValue, JsonAbiExt, Specifier},
    json_abi::JsonAbi,
};
use serde::Deserialize;

use crate::utils::decode0x;

/// A contract compiled by the external build step.
///
/// Identity is the contract name. The bytecode and ABI are opaque to the
/// release pipeline beyond constructor-argument encoding.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub contract_name: String,
    pub bytecode: Vec<u8>,
    pub abi: JsonAbi,
}

#[derive(Debug, Deserialize)]
struct ArtifactFile {
    #[serde(rename = "contractName")]
    contract_name: String,
    abi: JsonAbi,
    bytecode: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("glob error: {0}")]
    Glob(#[from] glob::PatternError),

    #[error("no artifact for {name} under {dir}; run the build toolchain first")]
    NotFound { name: String, dir: PathBuf },
    #[error("multiple artifacts for {name}: {paths:?}")]
    Ambiguous { name: String, paths: Vec<PathBuf> },
    #[error("artifact bytecode is not valid hex: {0}")]
    InvalidBytecode(#[from] hex::FromHexError),
}

impl Artifact {
    /// Resolves a contract name to its artifact under a build output
    /// directory, searching `<dir>/**/<name>.json` the way hardhat lays
    /// artifacts out. Debug artifacts (`.dbg.json`) are ignored.
    pub fn resolve(artifacts_dir: &Path, name: &str) -> Result<Self, ArtifactError> {
        let pattern = format!("{}/**/{name}.json", artifacts_dir.display());
        let mut paths: Vec<PathBuf> = glob::glob(&pattern)?
            .filter_map(Result::ok)
            .filter(|path| !path.to_string_lossy().ends_with(".dbg.json"))
            .collect();

        match paths.len() {
            0 => Err(ArtifactError::NotFound {
                name: name.to_owned(),
                dir: artifacts_dir.to_owned(),
            }),
            1 => Self::load(&paths.remove(0)),
            _ => Err(ArtifactError::Ambiguous {
                name: name.to_owned(),
                paths,
            }),
        }
    }

    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let contents = std::fs::read_to_string(path)?;
        let file: ArtifactFile = serde_json::from_str(&contents)?;
        Ok(Self {
            contract_name: file.contract_name,
            bytecode: decode0x(&file.bytecode)?,
            abi: file.abi,
        })
    }

    /// ABI-encodes constructor arguments against this artifact's constructor
    /// signature. Both the deploy and verify stages encode through here, so
    /// the two cannot diverge for a given artifact and argument list.
    pub fn encode_constructor_args(&self, args: &[String]) -> Result<Vec<u8>, ConstructorError> {
        let Some(constructor) = self.abi.constructor() else {
            if args.is_empty() {
                return Ok(Vec::new());
            }
            return Err(ConstructorError(format!(
                "{} has no constructor but {} argument(s) were given",
                self.contract_name,
                args.len(),
            )));
        };

        if args.len() != constructor.inputs.len() {
            return Err(ConstructorError(format!(
                "mismatch number of constructor arguments (want {:?} ({}); got {})",
                constructor.inputs,
                constructor.inputs.len(),
                args.len(),
            )));
        }

        let mut values = Vec::<DynSolValue>::with_capacity(args.len());
        for (arg, param) in args.iter().zip(constructor.inputs.iter()) {
            let ty = param
                .resolve()
                .map_err(|e| ConstructorError(format!("could not resolve {param}: {e}")))?;
            let value = ty
                .coerce_str(arg)
                .map_err(|e| ConstructorError(format!("could not parse {param}: {e}")))?;
            values.push(value);
        }

        constructor
            .abi_encode_input_raw(&values)
            .map_err(|e| ConstructorError(e.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid constructor arguments: {0}")]
pub struct ConstructorError(String);

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const EZPAY_ARTIFACT: &str = r#"{
        "contractName": "EzPay",
        "abi": [],
        "bytecode": "0x6080604052"
    }"#;

    const TOKEN_ARTIFACT: &str = r#"{
        "contractName": "Token",
        "abi": [{
            "type": "constructor",
            "stateMutability": "nonpayable",
            "inputs": [
                {"name": "supply", "type": "uint256", "internalType": "uint256"},
                {"name": "owner", "type": "address", "internalType": "address"}
            ]
        }],
        "bytecode": "0x60806040"
    }"#;

    fn write_artifact(dir: &Path, name: &str, contents: &str) {
        let sol_dir = dir.join("contracts").join(format!("{name}.sol"));
        fs::create_dir_all(&sol_dir).unwrap();
        fs::write(sol_dir.join(format!("{name}.json")), contents).unwrap();
        fs::write(sol_dir.join(format!("{name}.dbg.json")), "{}").unwrap();
    }

    #[test]
    fn resolve_skips_debug_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), "EzPay", EZPAY_ARTIFACT);

        let artifact = Artifact::resolve(dir.path(), "EzPay").unwrap();
        assert_eq!(artifact.contract_name, "EzPay");
        assert_eq!(artifact.bytecode, vec![0x60, 0x80, 0x60, 0x40, 0x52]);
        assert!(artifact.abi.constructor().is_none());
    }

    #[test]
    fn resolve_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let err = Artifact::resolve(dir.path(), "EzPay").unwrap_err();
        assert!(matches!(err, ArtifactError::NotFound { .. }));
    }

    #[test]
    fn encode_no_constructor() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), "EzPay", EZPAY_ARTIFACT);
        let artifact = Artifact::resolve(dir.path(), "EzPay").unwrap();

        assert!(artifact.encode_constructor_args(&[]).unwrap().is_empty());
        assert!(artifact
            .encode_constructor_args(&["42".to_owned()])
            .is_err());
    }

    #[test]
    fn encode_constructor_args() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), "Token", TOKEN_ARTIFACT);
        let artifact = Artifact::resolve(dir.path(), "Token").unwrap();

        let encoded = artifact
            .encode_constructor_args(&[
                "1000".to_owned(),
                "0x41f1f9Fa9fDF6a00371AC9b12Ff2f8BC4134aD78".to_owned(),
            ])
            .unwrap();
        // two head words, no dynamic tail
        assert_eq!(encoded.len(), 64);
        assert_eq!(encoded[30..32], [0x03, 0xe8]);
        assert_eq!(&encoded[44..64], &hex::decode("41f1f9fa9fdf6a00371ac9b12ff2f8bc4134ad78").unwrap()[..]);

        // arity mismatch is a fatal input error
        assert!(artifact.encode_constructor_args(&["1000".to_owned()]).is_err());
    }
}
