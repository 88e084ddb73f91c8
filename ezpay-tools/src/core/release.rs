// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Release orchestration: deploy, then verify.
//!
//! The two stages share one artifact and one constructor-argument list, so
//! the encoding submitted to the explorer is the encoding that was deployed.
//! A deployment failure aborts the run before any explorer traffic. A
//! verification failure after a successful deployment is a partial success:
//! the deployment record is reported either way, and verification can be
//! re-run standalone with [`verify_release`] without redeploying.

use std::future::Future;

use alloy::primitives::Address;

use crate::core::{
    artifact::Artifact,
    deployment::{self, DeploymentConfig, DeploymentError, DeploymentRecord},
    network::NetworkProfile,
    verification::{self, Explorer, PollConfig, VerificationError, VerificationOutcome,
        VerificationRequest},
};
use crate::utils::color::DebugColor;

#[derive(Debug, Clone, Default)]
pub struct ReleaseConfig {
    pub deployment: DeploymentConfig,
    pub poll: PollConfig,
}

/// What a release run produced. The record is present whenever deployment
/// confirmed, even if verification then failed.
#[derive(Debug)]
pub struct ReleaseResult {
    pub record: DeploymentRecord,
    pub verification: Result<VerificationOutcome, VerificationError>,
}

impl ReleaseResult {
    pub fn address(&self) -> Address {
        self.record.address
    }

    pub fn fully_verified(&self) -> bool {
        matches!(&self.verification, Ok(outcome) if outcome.is_success())
    }
}

/// Errors that abort a release. Only the deployment stage can abort; see
/// [`ReleaseResult::verification`] for the second stage.
#[derive(Debug, thiserror::Error)]
pub enum ReleaseError {
    #[error("{0}")]
    Deployment(#[from] DeploymentError),
}

/// Deploys the contract and registers its source with the explorer.
///
/// Not atomic: if the calling process dies while awaiting confirmation, the
/// creation tx may still land and the contract may exist on chain with no
/// record returned. Re-running then deploys a second instance; check the
/// network before retrying a cancelled run.
pub async fn release(
    artifact: &Artifact,
    constructor_args: &[String],
    config: &ReleaseConfig,
    profile: &NetworkProfile,
    explorer: &impl Explorer,
) -> Result<ReleaseResult, ReleaseError> {
    let deployment = deployment::deploy(artifact, constructor_args, &config.deployment, profile);
    run(deployment, artifact, &config.poll, explorer).await
}

/// The pipeline body. Deployment is handed in as a pending future, so the
/// sequencing below holds no matter how the record is produced: the explorer
/// is only reached once the future resolves to a confirmed record.
async fn run(
    deployment: impl Future<Output = Result<DeploymentRecord, DeploymentError>>,
    artifact: &Artifact,
    poll: &PollConfig,
    explorer: &impl Explorer,
) -> Result<ReleaseResult, ReleaseError> {
    let record = deployment.await?;

    let verification = verify_release(artifact, &record, poll, explorer).await;
    if let Err(err) = &verification {
        warn!(@yellow, "verification failed for {} at {}: {err}",
            record.contract_name, record.address.debug_lavender());
    }

    Ok(ReleaseResult {
        record,
        verification,
    })
}

/// Standalone verification of an existing deployment. The recovery path for
/// partial releases; safe to re-run, duplicates classify as success.
pub async fn verify_release(
    artifact: &Artifact,
    record: &DeploymentRecord,
    poll: &PollConfig,
    explorer: &impl Explorer,
) -> Result<VerificationOutcome, VerificationError> {
    let request =
        VerificationRequest::new(artifact, record.address, &record.constructor_args)?;
    verification::verify(&request, poll, explorer).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        sync::atomic::Ordering,
        time::{Duration, SystemTime},
    };

    use alloy::primitives::{address, b256};

    use crate::core::{
        deployment::DeploymentError,
        network::ConfigError,
        verification::tests::{ScriptedExplorer, UnreachableExplorer},
        verification::SubmitOutcome,
    };

    const EZPAY_ADDRESS: Address = address!("41f1f9Fa9fDF6a00371AC9b12Ff2f8BC4134aD78");

    fn ezpay_artifact() -> Artifact {
        Artifact {
            contract_name: "EzPay".to_owned(),
            bytecode: vec![0x60, 0x80, 0x60, 0x40],
            abi: serde_json::from_str("[]").unwrap(),
        }
    }

    fn record() -> DeploymentRecord {
        DeploymentRecord {
            contract_name: "EzPay".to_owned(),
            address: EZPAY_ADDRESS,
            network: "localhost".to_owned(),
            chain_id: 1337,
            constructor_args: vec![],
            tx_hash: b256!("1111111111111111111111111111111111111111111111111111111111111111"),
            submitted_at: SystemTime::now(),
        }
    }

    fn fast_poll() -> PollConfig {
        PollConfig {
            interval: Duration::ZERO,
            max_attempts: 3,
        }
    }

    #[tokio::test]
    async fn deployment_config_failure_skips_verification() {
        let profile = NetworkProfile::new("localhost", "http://127.0.0.1:1", 1337, None, vec![]);
        let explorer = ScriptedExplorer::new(
            SubmitOutcome::Accepted { guid: "guid".to_owned() },
            vec![VerificationOutcome::Verified],
        );

        let err = release(
            &ezpay_artifact(),
            &[],
            &ReleaseConfig::default(),
            &profile,
            &explorer,
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            ReleaseError::Deployment(DeploymentError::Config(
                ConfigError::MissingCredentials { .. }
            ))
        ));
        // no address exists, so the explorer must never have been contacted
        assert_eq!(explorer.submits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn standalone_verify_of_verified_contract() {
        let explorer = ScriptedExplorer::new(SubmitOutcome::AlreadyVerified, vec![]);
        let outcome = verify_release(&ezpay_artifact(), &record(), &fast_poll(), &explorer)
            .await
            .unwrap();
        assert_eq!(outcome, VerificationOutcome::AlreadyVerified);
        assert!(outcome.is_success());
        assert_eq!(explorer.submits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn standalone_verify_reports_mismatch() {
        let explorer = ScriptedExplorer::new(
            SubmitOutcome::Accepted { guid: "guid".to_owned() },
            vec![VerificationOutcome::Rejected {
                reason: "Fail - Unable to verify".to_owned(),
            }],
        );
        let outcome = verify_release(&ezpay_artifact(), &record(), &fast_poll(), &explorer)
            .await
            .unwrap();
        assert!(matches!(outcome, VerificationOutcome::Rejected { .. }));
    }

    #[tokio::test]
    async fn verified_release_reports_address_and_outcome() {
        let explorer = ScriptedExplorer::new(
            SubmitOutcome::Accepted { guid: "guid".to_owned() },
            vec![VerificationOutcome::Verified],
        );

        let result = run(async { Ok(record()) }, &ezpay_artifact(), &fast_poll(), &explorer)
            .await
            .unwrap();

        assert_eq!(result.address(), EZPAY_ADDRESS);
        assert!(result.fully_verified());
        assert_eq!(explorer.submits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn explorer_failure_after_deployment_is_partial_success() {
        let result = run(
            async { Ok(record()) },
            &ezpay_artifact(),
            &fast_poll(),
            &UnreachableExplorer,
        )
        .await
        .unwrap();

        // the failure is reported by reference; the record stays usable
        if let Err(err) = &result.verification {
            assert!(matches!(err, VerificationError::UnexpectedResponse(_)));
        } else {
            panic!("expected a verification error");
        }
        assert_eq!(result.address(), EZPAY_ADDRESS);
        assert!(!result.fully_verified());
    }

    #[tokio::test]
    async fn deployment_failure_aborts_before_verification() {
        let explorer = ScriptedExplorer::new(SubmitOutcome::AlreadyVerified, vec![]);

        let err = run(
            async { Err(DeploymentError::FailedToComplete) },
            &ezpay_artifact(),
            &fast_poll(),
            &explorer,
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            ReleaseError::Deployment(DeploymentError::FailedToComplete)
        ));
        assert_eq!(explorer.submits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn partial_success_keeps_the_address() {
        let result = ReleaseResult {
            record: record(),
            verification: Err(VerificationError::UnexpectedResponse(
                "explorer unreachable".to_owned(),
            )),
        };
        assert_eq!(result.address(), EZPAY_ADDRESS);
        assert!(!result.fully_verified());
    }

    #[test]
    fn full_success() {
        let result = ReleaseResult {
            record: record(),
            verification: Ok(VerificationOutcome::Verified),
        };
        assert_eq!(result.address(), EZPAY_ADDRESS);
        assert!(result.fully_verified());
    }
}
