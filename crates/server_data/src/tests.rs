use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use classifier::{ClassifierError, WasteClassifier};
use config::{
    Config,
    file::{ConfigFile, GrantAdminAccessConfig},
};
use error_stack::Result;
use model::{
    AssignToStaff, AssignmentStatus, CollectedWasteStatus, CollectionVerification, Identity,
    ImageData, NewReward, NewStaff, RegisterVendor, ReportId, ReportStatus, Staff,
    SubmissionClassification, SubmitReport, TransactionKind, User, Vendor, VendorStatus,
};
use simple_backend_config::SimpleBackendConfig;

use crate::{
    DataError,
    db_manager::{DatabaseManager, RouterDatabaseReadHandle},
    reward_policy::reward_policy_from_config,
    write::WriteCmds,
};

#[derive(Clone, Copy)]
enum FakeResult {
    Verification(CollectionVerification),
    Unavailable,
    Delay(Duration),
}

struct FakeClassifier(FakeResult);

#[async_trait]
impl WasteClassifier for FakeClassifier {
    async fn classify_submission(
        &self,
        _image: &ImageData,
    ) -> Result<SubmissionClassification, ClassifierError> {
        Ok(SubmissionClassification {
            waste_type: "plastic".into(),
            quantity: "3 kg".into(),
            confidence: 0.8,
        })
    }

    async fn verify_collection(
        &self,
        _image: &ImageData,
        _expected_waste_type: &str,
        _expected_amount: &str,
    ) -> Result<CollectionVerification, ClassifierError> {
        match self.0 {
            FakeResult::Verification(v) => Ok(v),
            FakeResult::Unavailable => Err(error_stack::report!(ClassifierError::Request)),
            FakeResult::Delay(d) => {
                tokio::time::sleep(d).await;
                Err(error_stack::report!(ClassifierError::Request))
            }
        }
    }
}

fn matching() -> FakeResult {
    FakeResult::Verification(CollectionVerification {
        waste_type_match: true,
        quantity_match: true,
        confidence: 0.85,
    })
}

struct TestContext {
    _manager: DatabaseManager,
    read: RouterDatabaseReadHandle,
    write: WriteCmds,
}

impl TestContext {
    async fn new(result: FakeResult) -> Self {
        Self::with_file(result, ConfigFile::default()).await
    }

    async fn with_file(result: FakeResult, mut file: ConfigFile) -> Self {
        file.grant_admin_access = Some(GrantAdminAccessConfig {
            email: "admin@example.com".to_string(),
        });
        let simple = SimpleBackendConfig::in_ram_debug_config(format!(
            "test_{}",
            uuid::Uuid::new_v4().simple()
        ));
        let config = Arc::new(Config::new(file, Arc::new(simple)).unwrap());
        let policy = reward_policy_from_config(config.reward_policy());
        let (manager, read, write) =
            DatabaseManager::new(config, Arc::new(FakeClassifier(result)), policy)
                .await
                .unwrap();
        Self {
            _manager: manager,
            read,
            write: WriteCmds::new(write),
        }
    }

    async fn user(&self, email: &str) -> User {
        self.write
            .user()
            .get_or_create(Identity {
                email: email.to_string(),
                name: None,
            })
            .await
            .unwrap()
    }

    async fn report(&self, owner: &User) -> ReportId {
        self.write
            .report()
            .submit_report(
                owner.id,
                SubmitReport {
                    location: "Central park".into(),
                    waste_type: "plastic".into(),
                    amount: "3 kg".into(),
                    image_reference: None,
                    classification: None,
                },
            )
            .await
            .unwrap()
            .report
            .id
    }

    async fn points(&self, user: &User) -> i64 {
        self.read.ledger().balance(user.id).await.unwrap().points
    }
}

fn image() -> ImageData {
    ImageData {
        mime_type: "image/jpeg".into(),
        data: "AAAA".into(),
    }
}

fn error<T: std::fmt::Debug>(r: crate::result::Result<T, DataError>) -> DataError {
    *r.unwrap_err().current_context()
}

#[tokio::test]
async fn report_is_verified_and_both_users_are_credited() {
    let c = TestContext::new(matching()).await;
    let citizen = c.user("citizen@example.com").await;
    let collector = c.user("collector@example.com").await;

    let id = c.report(&citizen).await;
    assert_eq!(c.points(&citizen).await, 10);

    let report = c.write.report().begin_collection(id, collector.id).await.unwrap();
    assert_eq!(report.status, ReportStatus::InProgress);
    assert_eq!(report.collector_user_id, Some(collector.id));

    let outcome = c
        .write
        .report()
        .submit_verification(id, collector.id, image())
        .await
        .unwrap();
    assert!(outcome.accepted);
    assert_eq!(outcome.report.status, ReportStatus::Verified);
    assert_eq!(outcome.points_awarded, 30);
    assert_eq!(c.points(&collector).await, 30);
    assert_eq!(c.points(&citizen).await, 10);

    let again = c
        .write
        .report()
        .submit_verification(id, collector.id, image())
        .await;
    assert_eq!(error(again), DataError::ReportAlreadyVerified);

    let collected = c
        .read
        .report()
        .collected_by_collector(collector.id)
        .await
        .unwrap()
        .collected;
    assert_eq!(collected.len(), 1);
    assert_eq!(collected[0].status, CollectedWasteStatus::Verified);

    let history = c
        .read
        .ledger()
        .transaction_history(collector.id)
        .await
        .unwrap()
        .transactions;
    let collect_rows = history
        .iter()
        .filter(|t| t.kind == TransactionKind::EarnedCollect && t.report_id == Some(id))
        .count();
    assert_eq!(collect_rows, 1);

    let notifications = c
        .read
        .notification()
        .unread_notifications(citizen.id)
        .await
        .unwrap()
        .notifications;
    assert_eq!(
        notifications[0].message,
        "You've earned 10 points for reporting waste!"
    );
}

#[tokio::test]
async fn mismatch_rejects_without_collect_points() {
    let c = TestContext::new(FakeResult::Verification(CollectionVerification {
        waste_type_match: false,
        quantity_match: true,
        confidence: 0.9,
    }))
    .await;
    let citizen = c.user("citizen@example.com").await;
    let collector = c.user("collector@example.com").await;
    let id = c.report(&citizen).await;
    c.write.report().begin_collection(id, collector.id).await.unwrap();

    let outcome = c
        .write
        .report()
        .submit_verification(id, collector.id, image())
        .await
        .unwrap();
    assert!(!outcome.accepted);
    assert_eq!(outcome.points_awarded, 0);
    assert_eq!(outcome.report.status, ReportStatus::Rejected);
    assert_eq!(outcome.report.collector_user_id, None);
    assert_eq!(c.points(&collector).await, 0);

    let collected = c
        .read
        .report()
        .collected_by_collector(collector.id)
        .await
        .unwrap()
        .collected;
    assert_eq!(collected[0].status, CollectedWasteStatus::Rejected);
}

#[tokio::test]
async fn classifier_failure_keeps_report_in_progress() {
    let c = TestContext::new(FakeResult::Unavailable).await;
    let citizen = c.user("citizen@example.com").await;
    let collector = c.user("collector@example.com").await;
    let id = c.report(&citizen).await;
    c.write.report().begin_collection(id, collector.id).await.unwrap();

    let result = c
        .write
        .report()
        .submit_verification(id, collector.id, image())
        .await;
    assert_eq!(error(result), DataError::VerificationUnavailable);

    let report = c.read.report().report(id).await.unwrap();
    assert_eq!(report.status, ReportStatus::InProgress);
    assert_eq!(report.collector_user_id, Some(collector.id));
}

#[tokio::test]
async fn classifier_timeout_keeps_report_in_progress() {
    let mut file = ConfigFile::default();
    file.verification.timeout_seconds = 1;
    let c = TestContext::with_file(FakeResult::Delay(Duration::from_secs(10)), file).await;
    let citizen = c.user("citizen@example.com").await;
    let collector = c.user("collector@example.com").await;
    let id = c.report(&citizen).await;
    c.write.report().begin_collection(id, collector.id).await.unwrap();

    let result = c
        .write
        .report()
        .submit_verification(id, collector.id, image())
        .await;
    assert_eq!(error(result), DataError::VerificationUnavailable);

    let report = c.read.report().report(id).await.unwrap();
    assert_eq!(report.status, ReportStatus::InProgress);
    assert_eq!(report.collector_user_id, Some(collector.id));
}

#[tokio::test]
async fn only_one_concurrent_collector_wins() {
    let c = TestContext::new(matching()).await;
    let citizen = c.user("citizen@example.com").await;
    let a = c.user("a@example.com").await;
    let b = c.user("b@example.com").await;
    let id = c.report(&citizen).await;

    let cmds_a = c.write.clone();
    let cmds_b = c.write.clone();
    let (first, second) = tokio::join!(
        async move { cmds_a.report().begin_collection(id, a.id).await },
        async move { cmds_b.report().begin_collection(id, b.id).await },
    );

    let results = [first, second];
    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);
    let loser = results.into_iter().find(|r| r.is_err()).unwrap();
    assert_eq!(error(loser), DataError::ReportBeingCollected);
}

#[tokio::test]
async fn only_collector_can_verify() {
    let c = TestContext::new(matching()).await;
    let citizen = c.user("citizen@example.com").await;
    let collector = c.user("collector@example.com").await;
    let id = c.report(&citizen).await;

    let not_started = c
        .write
        .report()
        .submit_verification(id, collector.id, image())
        .await;
    assert_eq!(error(not_started), DataError::ReportNotInProgress);

    c.write.report().begin_collection(id, collector.id).await.unwrap();
    let other = c
        .write
        .report()
        .submit_verification(id, citizen.id, image())
        .await;
    assert_eq!(error(other), DataError::NotCollector);
}

#[tokio::test]
async fn empty_fields_are_rejected() {
    let c = TestContext::new(matching()).await;
    let citizen = c.user("citizen@example.com").await;
    let result = c
        .write
        .report()
        .submit_report(
            citizen.id,
            SubmitReport {
                location: " ".into(),
                waste_type: "plastic".into(),
                amount: "3 kg".into(),
                image_reference: None,
                classification: None,
            },
        )
        .await;
    assert_eq!(error(result), DataError::Validation("Location is required"));
    assert_eq!(c.points(&citizen).await, 0);
}

#[tokio::test]
async fn redeem_requires_points_and_availability() {
    let c = TestContext::new(matching()).await;
    let admin = c.user("admin@example.com").await;
    assert!(admin.role.is_admin());
    let a = c.user("a@example.com").await;
    let b = c.user("b@example.com").await;
    for _ in 0..2 {
        c.report(&a).await;
        c.report(&b).await;
    }

    let reward = c
        .write
        .ledger()
        .create_reward(
            &admin,
            NewReward {
                name: "Coffee".into(),
                cost: 15,
                description: "Cup of coffee".into(),
                collection_info: "Cafe".into(),
            },
        )
        .await
        .unwrap();
    let expensive = c
        .write
        .ledger()
        .create_reward(
            &admin,
            NewReward {
                name: "Bike".into(),
                cost: 1000,
                description: "Bike".into(),
                collection_info: "Shop".into(),
            },
        )
        .await
        .unwrap();

    let rewards = c.read.ledger().available_rewards(a.id).await.unwrap().rewards;
    assert_eq!(rewards.len(), 3);
    assert_eq!(rewards[0].name, "Your Points");
    assert_eq!(rewards[0].cost, 20);

    let too_expensive = c.write.ledger().redeem(a.id, expensive.id).await;
    assert_eq!(error(too_expensive), DataError::InsufficientPoints);
    assert_eq!(c.points(&a).await, 20);

    let redeemed = c.write.ledger().redeem(a.id, reward.id).await.unwrap();
    assert_eq!(redeemed.balance.points, 5);
    assert_eq!(c.points(&a).await, 5);

    let second = c.write.ledger().redeem(b.id, reward.id).await;
    assert!(matches!(error(second), DataError::Conflict(_)));
    assert_eq!(c.points(&b).await, 20);

    let non_admin = c
        .write
        .ledger()
        .create_reward(
            &a,
            NewReward {
                name: "x".into(),
                cost: 1,
                description: String::new(),
                collection_info: String::new(),
            },
        )
        .await;
    assert_eq!(error(non_admin), DataError::NotAllowed);
}

#[tokio::test]
async fn assignment_binds_staff_as_collector() {
    let c = TestContext::new(matching()).await;
    let admin = c.user("admin@example.com").await;
    let citizen = c.user("citizen@example.com").await;
    let owner = c.user("owner@example.com").await;
    let id = c.report(&citizen).await;

    let vendor = c
        .write
        .vendor()
        .register(
            owner.id,
            RegisterVendor {
                name: "Owner".into(),
                email: "owner@example.com".into(),
                company: "Clean Oy".into(),
                id_number: "123".into(),
                license_number: "456".into(),
                address: "Street 1".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(vendor.status, VendorStatus::Inactive);

    let staff = c
        .write
        .vendor()
        .create_staff(
            owner.id,
            NewStaff {
                name: "Staff".into(),
                email: "staff@example.com".into(),
                phone: "000".into(),
                role: "collector".into(),
            },
        )
        .await
        .unwrap();
    let assign = AssignToStaff {
        report_id: id,
        staff_id: staff.id,
        vendor_id: vendor.id,
    };

    let inactive = c
        .write
        .assignment()
        .assign_to_staff(owner.id, assign.clone())
        .await;
    assert_eq!(error(inactive), DataError::NotAllowed);

    c.write
        .vendor()
        .update_status(&admin, vendor.id, VendorStatus::Active)
        .await
        .unwrap();

    let complaints = c
        .read
        .report()
        .pending_complaints(&owner, Some(vendor.id))
        .await
        .unwrap();
    assert_eq!(complaints.reports.len(), 1);
    let citizen_listing = c
        .read
        .report()
        .pending_complaints(&citizen, Some(vendor.id))
        .await;
    assert_eq!(error(citizen_listing), DataError::NotAllowed);

    let assignment = c
        .write
        .assignment()
        .assign_to_staff(owner.id, assign.clone())
        .await
        .unwrap();
    let report = c.read.report().report(id).await.unwrap();
    assert_eq!(report.status, ReportStatus::InProgress);
    assert_eq!(report.collector_user_id, Some(staff.user_id));
    assert!(
        c.read
            .report()
            .pending_complaints(&admin, None)
            .await
            .unwrap()
            .reports
            .is_empty()
    );

    let duplicate = c
        .write
        .assignment()
        .assign_to_staff(owner.id, assign)
        .await;
    assert!(matches!(error(duplicate), DataError::Conflict(_)));

    let staff_assignments = c
        .read
        .assignment()
        .assignments_for_staff_user(staff.user_id)
        .await
        .unwrap();
    assert_eq!(staff_assignments.assignments.len(), 1);

    let not_removable = c.write.vendor().delete_staff(owner.id, staff.id).await;
    assert!(matches!(error(not_removable), DataError::Conflict(_)));

    c.write
        .assignment()
        .complete_assignment(owner.id, assignment.id)
        .await
        .unwrap();
    let completed_twice = c
        .write
        .assignment()
        .complete_assignment(owner.id, assignment.id)
        .await;
    assert!(matches!(error(completed_twice), DataError::Conflict(_)));

    let report = c.read.report().report(id).await.unwrap();
    assert_eq!(report.status, ReportStatus::InProgress);
}

#[tokio::test]
async fn reopen_requires_config() {
    let rejecting = FakeResult::Verification(CollectionVerification {
        waste_type_match: true,
        quantity_match: true,
        confidence: 0.5,
    });

    let c = TestContext::new(rejecting).await;
    let admin = c.user("admin@example.com").await;
    let collector = c.user("collector@example.com").await;
    let id = c.report(&admin).await;
    c.write.report().begin_collection(id, collector.id).await.unwrap();
    c.write
        .report()
        .submit_verification(id, collector.id, image())
        .await
        .unwrap();
    let disabled = c.write.report().reopen_rejected(&admin, id).await;
    assert_eq!(error(disabled), DataError::FeatureDisabled);

    let mut file = ConfigFile::default();
    file.lifecycle.allow_reopen_rejected = true;
    let c = TestContext::with_file(rejecting, file).await;
    let admin = c.user("admin@example.com").await;
    let collector = c.user("collector@example.com").await;
    let id = c.report(&admin).await;
    c.write.report().begin_collection(id, collector.id).await.unwrap();
    c.write
        .report()
        .submit_verification(id, collector.id, image())
        .await
        .unwrap();

    let not_admin = c.write.report().reopen_rejected(&collector, id).await;
    assert_eq!(error(not_admin), DataError::NotAllowed);

    let report = c.write.report().reopen_rejected(&admin, id).await.unwrap();
    assert_eq!(report.status, ReportStatus::Pending);
    assert_eq!(report.collector_user_id, None);

    let again = c.write.report().reopen_rejected(&admin, id).await;
    assert!(matches!(error(again), DataError::Conflict(_)));
}

#[tokio::test]
async fn leaderboard_orders_users_by_balance() {
    let c = TestContext::new(matching()).await;
    let a = c.user("a@example.com").await;
    let b = c.user("b@example.com").await;
    c.report(&b).await;
    c.report(&b).await;
    c.report(&a).await;

    let board = c.read.ledger().leaderboard(10).await.unwrap().entries;
    assert_eq!(board[0].user_id, b.id);
    assert_eq!(board[0].points, 20);
    assert_eq!(board[1].user_id, a.id);
}

async fn active_vendor_with_staff(
    c: &TestContext,
    owner: &User,
    staff_emails: &[&str],
) -> (Vendor, Vec<Staff>) {
    let admin = c.user("admin@example.com").await;
    let vendor = c
        .write
        .vendor()
        .register(
            owner.id,
            RegisterVendor {
                name: "Owner".into(),
                email: "owner@example.com".into(),
                company: "Clean Oy".into(),
                id_number: "123".into(),
                license_number: "456".into(),
                address: "Street 1".into(),
            },
        )
        .await
        .unwrap();
    c.write
        .vendor()
        .update_status(&admin, vendor.id, VendorStatus::Active)
        .await
        .unwrap();

    let mut staff = vec![];
    for email in staff_emails {
        let created = c
            .write
            .vendor()
            .create_staff(
                owner.id,
                NewStaff {
                    name: "Staff".into(),
                    email: email.to_string(),
                    phone: "000".into(),
                    role: "collector".into(),
                },
            )
            .await
            .unwrap();
        staff.push(created);
    }
    (vendor, staff)
}

#[tokio::test]
async fn only_one_concurrent_assignment_wins() {
    let c = TestContext::new(matching()).await;
    let citizen = c.user("citizen@example.com").await;
    let owner = c.user("owner@example.com").await;
    let id = c.report(&citizen).await;
    let (vendor, staff) =
        active_vendor_with_staff(&c, &owner, &["s1@example.com", "s2@example.com"]).await;

    let first_assign = AssignToStaff {
        report_id: id,
        staff_id: staff[0].id,
        vendor_id: vendor.id,
    };
    let second_assign = AssignToStaff {
        report_id: id,
        staff_id: staff[1].id,
        vendor_id: vendor.id,
    };
    let cmds_a = c.write.clone();
    let cmds_b = c.write.clone();
    let owner_id = owner.id;
    let (first, second) = tokio::join!(
        async move { cmds_a.assignment().assign_to_staff(owner_id, first_assign).await },
        async move { cmds_b.assignment().assign_to_staff(owner_id, second_assign).await },
    );

    let results = [first, second];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    let loser = results.into_iter().find(|r| r.is_err()).unwrap();
    assert!(matches!(error(loser), DataError::Conflict(_)));

    let active = c
        .read
        .assignment()
        .assignments_by_vendor(owner.id)
        .await
        .unwrap()
        .assignments
        .into_iter()
        .filter(|a| a.report_id == id && a.status == AssignmentStatus::Assigned)
        .count();
    assert_eq!(active, 1);
}

#[tokio::test]
async fn only_one_concurrent_redeem_wins() {
    let c = TestContext::new(matching()).await;
    let admin = c.user("admin@example.com").await;
    let a = c.user("a@example.com").await;
    let b = c.user("b@example.com").await;
    c.report(&a).await;
    c.report(&b).await;
    let reward = c
        .write
        .ledger()
        .create_reward(
            &admin,
            NewReward {
                name: "Coffee".into(),
                cost: 5,
                description: "Cup of coffee".into(),
                collection_info: "Cafe".into(),
            },
        )
        .await
        .unwrap();

    let cmds_a = c.write.clone();
    let cmds_b = c.write.clone();
    let (a_id, b_id, reward_id) = (a.id, b.id, reward.id);
    let (first, second) = tokio::join!(
        async move { cmds_a.ledger().redeem(a_id, reward_id).await },
        async move { cmds_b.ledger().redeem(b_id, reward_id).await },
    );

    let results = [first, second];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    let loser = results.into_iter().find(|r| r.is_err()).unwrap();
    assert!(matches!(error(loser), DataError::Conflict(_)));
    assert_eq!(c.points(&a).await + c.points(&b).await, 15);
}

#[tokio::test]
async fn existing_user_is_found_from_read_pool() {
    let c = TestContext::new(matching()).await;
    let missing = c.read.user().user_by_email("a@example.com").await.unwrap();
    assert!(missing.is_none());
    assert!(c.read.user().user_by_email("  ").await.unwrap().is_none());

    let created = c.user("a@example.com").await;
    let found = c
        .read
        .user()
        .user_by_email(" a@example.com ")
        .await
        .unwrap();
    assert_eq!(found.map(|u| u.id), Some(created.id));
}
