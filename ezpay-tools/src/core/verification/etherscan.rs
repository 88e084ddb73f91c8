// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Etherscan-style verification API client.
//!
//! Submission goes through `module=contract&action=verifysourcecode`, which
//! acknowledges with a receipt guid; the terminal status is reached by polling
//! `action=checkverifystatus`. Every response uses the same JSON envelope.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::core::network::ConfigError;
use crate::core::verification::{
    Explorer, SubmitOutcome, VerificationError, VerificationOutcome, VerificationRequest,
};
use crate::manifest::{ContractSection, ExplorerSection};

/// Defines the configuration for verifying a contract with an Etherscan-style
/// explorer. After setting the parameters, use it as the [`Explorer`] for a
/// verification run.
#[derive(Debug, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct Etherscan {
    api_url: String,
    api_key: String,
    /// Flattened source, recompiled by the explorer.
    source: String,
    /// Full solc version string, e.g. `v0.8.22+commit.87f61d96`.
    compiler_version: String,
    #[builder(default)]
    optimizer_runs: Option<u32>,
    #[builder(default = reqwest::Client::new())]
    client: reqwest::Client,
}

/// Response envelope shared by all Etherscan API calls.
#[derive(Debug, Serialize, Deserialize)]
pub struct EtherscanResponse<T> {
    pub status: String,
    pub message: String,
    pub result: T,
}

impl Etherscan {
    /// Builds a client from the manifest, reading the API key from the
    /// environment and the flattened source from disk. Both are configuration
    /// inputs: absence is fatal before any explorer traffic.
    pub fn from_manifest(
        explorer: &ExplorerSection,
        contract: &ContractSection,
    ) -> Result<Self, ConfigError> {
        let api_key = std::env::var(&explorer.api_key_env).map_err(|_| {
            ConfigError::MissingApiKey {
                var: explorer.api_key_env.clone(),
            }
        })?;
        let source_path = contract.source.as_ref().ok_or(ConfigError::MissingSource)?;
        let source =
            std::fs::read_to_string(source_path).map_err(|source| ConfigError::Unreadable {
                what: format!("source file {}", source_path.display()),
                source,
            })?;

        Ok(Self::builder()
            .api_url(&explorer.api_url)
            .api_key(api_key)
            .source(source)
            .compiler_version(contract.compiler_version.clone().unwrap_or_default())
            .optimizer_runs(contract.optimizer_runs)
            .build())
    }
}

impl Explorer for Etherscan {
    async fn submit(
        &self,
        request: &VerificationRequest,
    ) -> Result<SubmitOutcome, VerificationError> {
        let optimization_used = if self.optimizer_runs.is_some() { "1" } else { "0" };
        let runs = self.optimizer_runs.unwrap_or(0).to_string();
        let contract_address = request.address.to_string();
        let form: &[(&str, &str)] = &[
            ("apikey", &self.api_key),
            ("module", "contract"),
            ("action", "verifysourcecode"),
            ("contractaddress", &contract_address),
            ("sourceCode", &self.source),
            ("codeformat", "solidity-single-file"),
            ("contractname", &request.contract_name),
            ("compilerversion", &self.compiler_version),
            ("optimizationUsed", optimization_used),
            ("runs", &runs),
            // the misspelling is the API's, not ours
            ("constructorArguements", &request.constructor_args_hex),
        ];

        let body = self
            .client
            .post(&self.api_url)
            .form(form)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(classify_submission(&parse_envelope(&body)?))
    }

    async fn check(&self, guid: &str) -> Result<VerificationOutcome, VerificationError> {
        let query: &[(&str, &str)] = &[
            ("apikey", &self.api_key),
            ("module", "contract"),
            ("action", "checkverifystatus"),
            ("guid", guid),
        ];

        let body = self
            .client
            .get(&self.api_url)
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(classify_check(&parse_envelope(&body)?.result))
    }
}

/// Gateways in front of the API answer errors with HTML; surface the body
/// instead of a bare decode error.
fn parse_envelope(body: &str) -> Result<EtherscanResponse<String>, VerificationError> {
    serde_json::from_str(body).map_err(|_| {
        VerificationError::UnexpectedResponse(body.chars().take(200).collect())
    })
}

fn already_verified(text: &str) -> bool {
    text.to_ascii_lowercase().contains("already verified")
}

fn classify_submission(response: &EtherscanResponse<String>) -> SubmitOutcome {
    if response.status == "1" {
        SubmitOutcome::Accepted {
            guid: response.result.clone(),
        }
    } else if already_verified(&response.result) {
        SubmitOutcome::AlreadyVerified
    } else {
        SubmitOutcome::Rejected {
            reason: response.result.clone(),
        }
    }
}

fn classify_check(result: &str) -> VerificationOutcome {
    if result.starts_with("Pass") {
        VerificationOutcome::Verified
    } else if already_verified(result) {
        VerificationOutcome::AlreadyVerified
    } else if result.contains("Pending") {
        VerificationOutcome::Pending { guid: None }
    } else {
        // e.g. "Fail - Unable to verify": recompiled bytecode did not match
        VerificationOutcome::Rejected {
            reason: result.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: &str, result: &str) -> EtherscanResponse<String> {
        EtherscanResponse {
            status: status.to_owned(),
            message: if status == "1" { "OK" } else { "NOTOK" }.to_owned(),
            result: result.to_owned(),
        }
    }

    #[test]
    fn parses_envelope() {
        let json = r#"{"status":"1","message":"OK","result":"ezq588met8abc"}"#;
        let response: EtherscanResponse<String> = serde_json::from_str(json).unwrap();
        assert_eq!(response.status, "1");
        assert_eq!(response.result, "ezq588met8abc");
    }

    #[test]
    fn html_body_is_unexpected_response() {
        let err = parse_envelope("<html>504 Gateway Time-out</html>").unwrap_err();
        assert!(matches!(
            err,
            VerificationError::UnexpectedResponse(body) if body.contains("504")
        ));
    }

    #[test]
    fn classify_submissions() {
        assert_eq!(
            classify_submission(&response("1", "ezq588met8abc")),
            SubmitOutcome::Accepted { guid: "ezq588met8abc".to_owned() }
        );
        assert_eq!(
            classify_submission(&response("0", "Contract source code already verified")),
            SubmitOutcome::AlreadyVerified
        );
        assert_eq!(
            classify_submission(&response("0", "Invalid API Key")),
            SubmitOutcome::Rejected { reason: "Invalid API Key".to_owned() }
        );
    }

    #[test]
    fn classify_checks() {
        assert_eq!(classify_check("Pass - Verified"), VerificationOutcome::Verified);
        assert_eq!(
            classify_check("Already Verified"),
            VerificationOutcome::AlreadyVerified
        );
        assert_eq!(
            classify_check("Pending in queue"),
            VerificationOutcome::Pending { guid: None }
        );
        assert_eq!(
            classify_check("Fail - Unable to verify"),
            VerificationOutcome::Rejected { reason: "Fail - Unable to verify".to_owned() }
        );
    }
}
