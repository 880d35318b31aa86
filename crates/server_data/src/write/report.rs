use database::current::write::{
    CurrentWriteCommands, ledger::NewTransaction, report::NewReport,
};
use model::{
    ClassificationRecord, CollectedWasteStatus, ImageData, NotificationKind, Report, ReportId,
    ReportStatus, SubmissionClassification, SubmitReport, SubmitReportResult, TransactionKind,
    UnixTime, User, UserId, VerificationOutcome,
};
use server_common::result::{Result, WrappedContextExt, WrappedResultExt};
use tracing::info;

use crate::{
    DataError, IntoDataError,
    access::{require_admin, required_text},
    db_transaction, define_cmd_wrapper_write,
    reward_policy::RewardEvent,
    verification::run_classifier,
};

pub const REPORT_POINTS_DESCRIPTION: &str = "Points earned for reporting waste";
pub const COLLECT_POINTS_DESCRIPTION: &str = "Points earned for collecting waste";

define_cmd_wrapper_write!(WriteCommandsReport);

impl WriteCommandsReport<'_> {
    /// Create a pending report and credit the report points. The report,
    /// the transaction and the notification are written together.
    pub async fn submit_report(
        &self,
        owner: UserId,
        info: SubmitReport,
    ) -> Result<SubmitReportResult, DataError> {
        let location = required_text(&info.location, "Location is required")?;
        let waste_type = required_text(&info.waste_type, "Waste type is required")?;
        let amount = required_text(&info.amount, "Amount is required")?;
        let image_reference = info
            .image_reference
            .as_deref()
            .and_then(simple_backend_utils::text::trimmed_non_empty);
        let classification = match info.classification {
            Some(c) if !(0.0..=1.0).contains(&c.confidence) => {
                return Err(
                    DataError::Validation("Classification confidence must be in range [0, 1]")
                        .report(),
                );
            }
            Some(c) => Some(
                ClassificationRecord::Submission(c)
                    .to_json()
                    .change_context(DataError::Serde)?,
            ),
            None => None,
        };
        let points = self.reward_policy().points(RewardEvent::ReportSubmitted);

        db_transaction!(self, move |mut cmds| {
            let time = UnixTime::current_time();
            let report = cmds.report().insert_report(NewReport {
                owner,
                location: &location,
                waste_type: &waste_type,
                amount: &amount,
                image_reference: image_reference.as_deref(),
                verification_result: classification,
                time,
            })?;
            cmds.ledger().insert_transaction(NewTransaction {
                user: owner,
                kind: TransactionKind::EarnedReport,
                amount: points,
                description: REPORT_POINTS_DESCRIPTION,
                report: Some(report.id),
                time,
            })?;
            cmds.notification().insert_notification(
                owner,
                &format!("You've earned {points} points for reporting waste!"),
                NotificationKind::Reward,
                time,
            )?;
            Ok(SubmitReportResult {
                report,
                points_awarded: points,
            })
        })
    }

    /// Estimate waste type and quantity from a photo. Nothing is stored.
    pub async fn classify_submission(
        &self,
        image: ImageData,
    ) -> Result<SubmissionClassification, DataError> {
        run_classifier(
            self.config().verification_timeout(),
            self.classifier().classify_submission(&image),
        )
        .await
    }

    /// Pending report moves to in progress state and `collector` becomes
    /// the only user who can verify the collection.
    pub async fn begin_collection(
        &self,
        id: ReportId,
        collector: UserId,
    ) -> Result<Report, DataError> {
        db_transaction!(self, move |mut cmds| {
            if let Some(report) = cmds.report().begin_collection_if_pending(id, collector)? {
                info!("Collection of report {} started", id);
                return Ok(report);
            }
            let current = current_report(&mut cmds, id)?;
            Err(begin_collection_error(current.status).report())
        })
    }

    /// Check a collection photo against the declared waste type and
    /// amount. The report state is not changed if the classifier fails.
    pub async fn submit_verification(
        &self,
        id: ReportId,
        collector: UserId,
        image: ImageData,
    ) -> Result<VerificationOutcome, DataError> {
        let report = self
            .db_read(move |mut cmds| cmds.report().report(id))
            .await
            .into_error()?
            .ok_or_else(|| DataError::NotFound.report())?;
        verification_precondition(&report, collector)?;

        let verification = run_classifier(
            self.config().verification_timeout(),
            self.classifier().verify_collection(
                &image,
                &report.waste_type,
                &report.amount,
            ),
        )
        .await?;

        let accepted = verification.is_accepted(self.config().verification_confidence_threshold());
        let points = if accepted {
            self.reward_policy().points(RewardEvent::WasteCollected)
        } else {
            0
        };
        let verification_json = ClassificationRecord::Collection(verification)
            .to_json()
            .change_context(DataError::Serde)?;

        db_transaction!(self, move |mut cmds| {
            let time = UnixTime::current_time();
            let updated = if accepted {
                cmds.report().mark_verified_if_collector(id, collector)?
            } else {
                cmds.report().mark_rejected_if_collector(id, collector)?
            };
            let Some(report) = updated else {
                // State changed while the classifier was running.
                let current = current_report(&mut cmds, id)?;
                verification_precondition(&current, collector)?;
                return Err(DataError::Conflict("Report state changed").report());
            };

            let status = if accepted {
                cmds.ledger().insert_transaction(NewTransaction {
                    user: collector,
                    kind: TransactionKind::EarnedCollect,
                    amount: points,
                    description: COLLECT_POINTS_DESCRIPTION,
                    report: Some(id),
                    time,
                })?;
                cmds.notification().insert_notification(
                    collector,
                    &format!("You've earned {points} points for collecting waste!"),
                    NotificationKind::Reward,
                    time,
                )?;
                CollectedWasteStatus::Verified
            } else {
                cmds.notification().insert_notification(
                    collector,
                    &format!(
                        "Verification of the collected waste for report {id} failed. The collected waste does not match the report."
                    ),
                    NotificationKind::Collection,
                    time,
                )?;
                CollectedWasteStatus::Rejected
            };
            cmds.collected_waste()
                .insert_collected_waste(id, collector, status, &verification_json, time)?;

            info!("Report {} verification accepted: {}", id, accepted);

            Ok(VerificationOutcome {
                report,
                verification,
                accepted,
                points_awarded: points,
            })
        })
    }

    /// Move a rejected report back to pending state.
    pub async fn reopen_rejected(&self, caller: &User, id: ReportId) -> Result<Report, DataError> {
        require_admin(caller)?;
        if !self.config().lifecycle().allow_reopen_rejected {
            return Err(DataError::FeatureDisabled.report());
        }

        db_transaction!(self, move |mut cmds| {
            if cmds
                .read()
                .assignment()
                .active_assignment_for_report(id)?
                .is_some()
            {
                return Err(DataError::Conflict("Report has an active assignment").report());
            }
            if let Some(report) = cmds.report().reopen_if_rejected(id)? {
                return Ok(report);
            }
            current_report(&mut cmds, id)?;
            Err(DataError::Conflict("Only rejected reports can be reopened").report())
        })
    }
}

fn current_report(cmds: &mut CurrentWriteCommands<'_>, id: ReportId) -> Result<Report, DataError> {
    cmds.read()
        .report()
        .report(id)?
        .ok_or_else(|| DataError::NotFound.report())
}

fn begin_collection_error(status: ReportStatus) -> DataError {
    match status {
        ReportStatus::InProgress => DataError::ReportBeingCollected,
        ReportStatus::Verified => DataError::ReportAlreadyVerified,
        ReportStatus::Rejected => DataError::ReportRejected,
        ReportStatus::Pending => DataError::Conflict("Report state changed"),
    }
}

fn verification_precondition(report: &Report, collector: UserId) -> Result<(), DataError> {
    match report.status {
        ReportStatus::InProgress if report.collector_user_id == Some(collector) => Ok(()),
        ReportStatus::InProgress => Err(DataError::NotCollector.report()),
        ReportStatus::Verified => Err(DataError::ReportAlreadyVerified.report()),
        ReportStatus::Rejected => Err(DataError::ReportRejected.report()),
        ReportStatus::Pending => Err(DataError::ReportNotInProgress.report()),
    }
}
