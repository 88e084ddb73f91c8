// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Source verification against an explorer.
//!
//! The explorer is authoritative: it recompiles the submitted source and
//! compares the result against the bytecode deployed at the address. No
//! verification state is held locally. A single attempt walks
//! `Submitted -> {Pending, Rejected, Verified, AlreadyVerified}`, with
//! `Pending` resolved by bounded polling.

use std::time::Duration;

use alloy::primitives::Address;

use crate::core::{
    artifact::{Artifact, ConstructorError},
    network::ConfigError,
};
use crate::utils::color::DebugColor;

pub mod etherscan;

pub use etherscan::Etherscan;

/// One verification submission, consumed by a single explorer request.
#[derive(Debug, Clone)]
pub struct VerificationRequest {
    pub contract_name: String,
    pub address: Address,
    /// ABI-encoded constructor arguments, hex without a `0x` prefix. Must
    /// match what the deployment encoded or the explorer rejects the source.
    pub constructor_args_hex: String,
}

impl VerificationRequest {
    pub fn new(
        artifact: &Artifact,
        address: Address,
        constructor_args: &[String],
    ) -> Result<Self, ConstructorError> {
        let encoded = artifact.encode_constructor_args(constructor_args)?;
        Ok(Self {
            contract_name: artifact.contract_name.clone(),
            address,
            constructor_args_hex: hex::encode(encoded),
        })
    }
}

/// Terminal and non-terminal outcomes of a verification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    Verified,
    /// The explorer already holds matching source for this address. A
    /// duplicate submission, not a failure.
    AlreadyVerified,
    /// Accepted but still processing after the poll budget ran out. Re-run
    /// the standalone verify path later; nothing needs redeploying.
    Pending { guid: Option<String> },
    /// Recompiled bytecode does not match what is deployed. Retrying without
    /// changing the inputs will fail the same way.
    Rejected { reason: String },
}

impl VerificationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Verified | Self::AlreadyVerified)
    }
}

/// Explorer acknowledgment of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Accepted for asynchronous processing; poll with the receipt guid.
    Accepted { guid: String },
    AlreadyVerified,
    Rejected { reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Constructor(#[from] ConstructorError),

    #[error("explorer request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected explorer response: {0}")]
    UnexpectedResponse(String),
}

/// Seam for the explorer's out-of-band API.
pub trait Explorer {
    fn submit(
        &self,
        request: &VerificationRequest,
    ) -> impl std::future::Future<Output = Result<SubmitOutcome, VerificationError>>;

    fn check(
        &self,
        guid: &str,
    ) -> impl std::future::Future<Output = Result<VerificationOutcome, VerificationError>>;
}

#[derive(Debug, Clone)]
pub struct PollConfig {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: 24,
        }
    }
}

/// Submits a verification request and polls until a terminal status or the
/// poll budget is exhausted. Budget exhaustion yields
/// [`VerificationOutcome::Pending`], not an error.
pub async fn verify(
    request: &VerificationRequest,
    poll: &PollConfig,
    explorer: &impl Explorer,
) -> Result<VerificationOutcome, VerificationError> {
    info!(@grey, "verifying {} at {}", request.contract_name, request.address.debug_lavender());

    let guid = match explorer.submit(request).await? {
        SubmitOutcome::AlreadyVerified => return Ok(VerificationOutcome::AlreadyVerified),
        SubmitOutcome::Rejected { reason } => {
            return Ok(VerificationOutcome::Rejected { reason })
        }
        SubmitOutcome::Accepted { guid } => guid,
    };
    debug!(@grey, "verification receipt: {guid}");

    for _ in 0..poll.max_attempts {
        tokio::time::sleep(poll.interval).await;
        match explorer.check(&guid).await? {
            VerificationOutcome::Pending { .. } => continue,
            outcome => return Ok(outcome),
        }
    }

    warn!(@yellow, "verification still pending after {} attempts", poll.max_attempts);
    Ok(VerificationOutcome::Pending { guid: Some(guid) })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    };

    use alloy::primitives::address;

    /// Scripted explorer: one submit outcome, then check outcomes in order.
    pub(crate) struct ScriptedExplorer {
        submit_outcome: SubmitOutcome,
        checks: Mutex<Vec<VerificationOutcome>>,
        pub submits: AtomicUsize,
    }

    impl ScriptedExplorer {
        pub fn new(submit: SubmitOutcome, checks: Vec<VerificationOutcome>) -> Self {
            Self {
                submit_outcome: submit,
                checks: Mutex::new(checks),
                submits: AtomicUsize::new(0),
            }
        }
    }

    impl Explorer for ScriptedExplorer {
        async fn submit(
            &self,
            _request: &VerificationRequest,
        ) -> Result<SubmitOutcome, VerificationError> {
            self.submits.fetch_add(1, Ordering::SeqCst);
            Ok(self.submit_outcome.clone())
        }

        async fn check(&self, _guid: &str) -> Result<VerificationOutcome, VerificationError> {
            let mut checks = self.checks.lock().unwrap();
            if checks.is_empty() {
                Ok(VerificationOutcome::Pending { guid: None })
            } else {
                Ok(checks.remove(0))
            }
        }
    }

    /// Explorer whose endpoint never answers with a usable envelope.
    pub(crate) struct UnreachableExplorer;

    impl Explorer for UnreachableExplorer {
        async fn submit(
            &self,
            _request: &VerificationRequest,
        ) -> Result<SubmitOutcome, VerificationError> {
            Err(VerificationError::UnexpectedResponse(
                "<html>504 Gateway Time-out</html>".to_owned(),
            ))
        }

        async fn check(&self, _guid: &str) -> Result<VerificationOutcome, VerificationError> {
            Err(VerificationError::UnexpectedResponse(
                "<html>504 Gateway Time-out</html>".to_owned(),
            ))
        }
    }

    pub(crate) fn request() -> VerificationRequest {
        VerificationRequest {
            contract_name: "EzPay".to_owned(),
            address: address!("41f1f9Fa9fDF6a00371AC9b12Ff2f8BC4134aD78"),
            constructor_args_hex: String::new(),
        }
    }

    fn fast_poll(max_attempts: u32) -> PollConfig {
        PollConfig {
            interval: Duration::ZERO,
            max_attempts,
        }
    }

    #[tokio::test]
    async fn verified_after_pending() {
        let explorer = ScriptedExplorer::new(
            SubmitOutcome::Accepted { guid: "guid-1".to_owned() },
            vec![
                VerificationOutcome::Pending { guid: None },
                VerificationOutcome::Verified,
            ],
        );
        let outcome = verify(&request(), &fast_poll(5), &explorer).await.unwrap();
        assert_eq!(outcome, VerificationOutcome::Verified);
    }

    #[tokio::test]
    async fn duplicate_submission_is_success() {
        let explorer = ScriptedExplorer::new(SubmitOutcome::AlreadyVerified, vec![]);
        let outcome = verify(&request(), &fast_poll(5), &explorer).await.unwrap();
        assert_eq!(outcome, VerificationOutcome::AlreadyVerified);
        assert!(outcome.is_success());
        // terminal at submission, no polling
        assert_eq!(explorer.submits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn mismatch_is_terminal_failure() {
        let explorer = ScriptedExplorer::new(
            SubmitOutcome::Accepted { guid: "guid-2".to_owned() },
            vec![VerificationOutcome::Rejected {
                reason: "Fail - Unable to verify".to_owned(),
            }],
        );
        let outcome = verify(&request(), &fast_poll(5), &explorer).await.unwrap();
        assert!(matches!(outcome, VerificationOutcome::Rejected { .. }));
        assert!(!outcome.is_success());
    }

    #[tokio::test]
    async fn poll_budget_exhaustion_reports_pending() {
        let explorer =
            ScriptedExplorer::new(SubmitOutcome::Accepted { guid: "guid-3".to_owned() }, vec![]);
        let outcome = verify(&request(), &fast_poll(3), &explorer).await.unwrap();
        assert_eq!(
            outcome,
            VerificationOutcome::Pending { guid: Some("guid-3".to_owned()) }
        );
    }
}
