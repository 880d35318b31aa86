use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::MigrationHarness;
use model::{
    AssignmentStatus, CollectedWasteStatus, NewReward, NewStaff, NotificationKind, RegisterVendor,
    ReportStatus, TransactionKind, UnixTime, User, UserRole, VendorStatus,
};

use crate::{
    DIESEL_MIGRATIONS,
    current::write::{
        CurrentWriteCommands, ledger::NewTransaction, report::NewReport,
    },
};

fn connection() -> SqliteConnection {
    let mut conn = SqliteConnection::establish(":memory:").unwrap();
    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .unwrap();
    conn.run_pending_migrations(DIESEL_MIGRATIONS).unwrap();
    conn
}

fn time() -> UnixTime {
    UnixTime::new(1_700_000_000)
}

fn user(cmds: &mut CurrentWriteCommands<'_>, email: &str) -> User {
    cmds.user()
        .insert_user(email, "Test", UserRole::User, time())
        .unwrap()
}

fn new_report(owner: &User) -> NewReport<'static> {
    NewReport {
        owner: owner.id,
        location: "Main street 1",
        waste_type: "plastic",
        amount: "5 kg",
        image_reference: None,
        verification_result: None,
        time: time(),
    }
}

#[test]
fn begin_collection_only_succeeds_once() {
    let mut conn = connection();
    let mut cmds = CurrentWriteCommands::new(&mut conn);
    let owner = user(&mut cmds, "owner@example.com");
    let a = user(&mut cmds, "a@example.com");
    let b = user(&mut cmds, "b@example.com");
    let report = cmds.report().insert_report(new_report(&owner)).unwrap();
    assert_eq!(report.status, ReportStatus::Pending);
    assert_eq!(report.collector_user_id, None);

    let first = cmds
        .report()
        .begin_collection_if_pending(report.id, a.id)
        .unwrap()
        .unwrap();
    assert_eq!(first.status, ReportStatus::InProgress);
    assert_eq!(first.collector_user_id, Some(a.id));

    let second = cmds
        .report()
        .begin_collection_if_pending(report.id, b.id)
        .unwrap();
    assert!(second.is_none());
}

#[test]
fn verification_requires_matching_collector() {
    let mut conn = connection();
    let mut cmds = CurrentWriteCommands::new(&mut conn);
    let owner = user(&mut cmds, "owner@example.com");
    let a = user(&mut cmds, "a@example.com");
    let report = cmds.report().insert_report(new_report(&owner)).unwrap();
    cmds.report()
        .begin_collection_if_pending(report.id, a.id)
        .unwrap();

    assert!(
        cmds.report()
            .mark_verified_if_collector(report.id, owner.id)
            .unwrap()
            .is_none()
    );
    let verified = cmds
        .report()
        .mark_verified_if_collector(report.id, a.id)
        .unwrap()
        .unwrap();
    assert_eq!(verified.status, ReportStatus::Verified);
    assert_eq!(verified.collector_user_id, Some(a.id));
}

#[test]
fn rejection_clears_collector_and_report_can_be_reopened() {
    let mut conn = connection();
    let mut cmds = CurrentWriteCommands::new(&mut conn);
    let owner = user(&mut cmds, "owner@example.com");
    let a = user(&mut cmds, "a@example.com");
    let report = cmds.report().insert_report(new_report(&owner)).unwrap();
    cmds.report()
        .begin_collection_if_pending(report.id, a.id)
        .unwrap();

    let rejected = cmds
        .report()
        .mark_rejected_if_collector(report.id, a.id)
        .unwrap()
        .unwrap();
    assert_eq!(rejected.status, ReportStatus::Rejected);
    assert_eq!(rejected.collector_user_id, None);

    let reopened = cmds.report().reopen_if_rejected(report.id).unwrap().unwrap();
    assert_eq!(reopened.status, ReportStatus::Pending);
    assert!(cmds.report().reopen_if_rejected(report.id).unwrap().is_none());
}

#[test]
fn pending_reports_exclude_actively_assigned() {
    let mut conn = connection();
    let mut cmds = CurrentWriteCommands::new(&mut conn);
    let owner = user(&mut cmds, "owner@example.com");
    let staff_user = user(&mut cmds, "staff@example.com");
    let r1 = cmds.report().insert_report(new_report(&owner)).unwrap();
    let r2 = cmds.report().insert_report(new_report(&owner)).unwrap();

    let vendor = cmds
        .vendor()
        .insert_vendor(
            owner.id,
            &RegisterVendor {
                name: "Vendor".to_string(),
                email: "vendor@example.com".to_string(),
                company: "Company".to_string(),
                id_number: "1".to_string(),
                license_number: "2".to_string(),
                address: "Street".to_string(),
            },
            time(),
        )
        .unwrap();
    assert_eq!(vendor.status, VendorStatus::Inactive);
    let staff = cmds
        .vendor()
        .insert_staff(
            vendor.id,
            staff_user.id,
            &NewStaff {
                name: "Staff".to_string(),
                email: "staff@example.com".to_string(),
                phone: "123".to_string(),
                role: "driver".to_string(),
            },
            time(),
        )
        .unwrap();

    let assignment = cmds
        .assignment()
        .insert_assignment(r1.id, vendor.id, staff.id, time())
        .unwrap();
    assert_eq!(assignment.status, AssignmentStatus::Assigned);

    let pending = cmds
        .read()
        .report()
        .pending_without_active_assignment()
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, r2.id);

    // Second active assignment for the same report is rejected
    assert!(
        cmds.assignment()
            .insert_assignment(r1.id, vendor.id, staff.id, time())
            .is_err()
    );

    let completed = cmds
        .assignment()
        .complete_if_assigned(assignment.id, vendor.id, time())
        .unwrap()
        .unwrap();
    assert_eq!(completed.status, AssignmentStatus::Completed);
    assert!(
        cmds.assignment()
            .complete_if_assigned(assignment.id, vendor.id, time())
            .unwrap()
            .is_none()
    );

    assert!(cmds.read().assignment().staff_has_assignments(staff.id).unwrap());
    assert_eq!(
        cmds.read()
            .assignment()
            .assignments_for_staff_user(staff_user.id)
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn collect_reward_is_unique_per_report() {
    let mut conn = connection();
    let mut cmds = CurrentWriteCommands::new(&mut conn);
    let owner = user(&mut cmds, "owner@example.com");
    let report = cmds.report().insert_report(new_report(&owner)).unwrap();

    let collect = |report| NewTransaction {
        user: owner.id,
        kind: TransactionKind::EarnedCollect,
        amount: 30,
        description: "Points earned for collecting waste",
        report: Some(report),
        time: time(),
    };

    cmds.ledger().insert_transaction(collect(report.id)).unwrap();
    assert!(cmds.ledger().insert_transaction(collect(report.id)).is_err());
    assert_eq!(
        cmds.read()
            .ledger()
            .collect_transaction_count(report.id)
            .unwrap(),
        1
    );
}

#[test]
fn reward_can_be_claimed_once() {
    let mut conn = connection();
    let mut cmds = CurrentWriteCommands::new(&mut conn);
    let reward = cmds
        .ledger()
        .insert_reward(
            &NewReward {
                name: "Bag".to_string(),
                cost: 20,
                description: "Reusable bag".to_string(),
                collection_info: "Pick up at the office".to_string(),
            },
            time(),
        )
        .unwrap();

    assert_eq!(cmds.read().ledger().available_rewards().unwrap().len(), 1);
    assert!(
        cmds.ledger()
            .mark_reward_unavailable_if_available(reward.id)
            .unwrap()
    );
    assert!(
        !cmds
            .ledger()
            .mark_reward_unavailable_if_available(reward.id)
            .unwrap()
    );
    assert!(cmds.read().ledger().available_rewards().unwrap().is_empty());
}

#[test]
fn notifications_are_marked_read_only_by_owner() {
    let mut conn = connection();
    let mut cmds = CurrentWriteCommands::new(&mut conn);
    let a = user(&mut cmds, "a@example.com");
    let b = user(&mut cmds, "b@example.com");
    let n = cmds
        .notification()
        .insert_notification(a.id, "Hello", NotificationKind::System, time())
        .unwrap();

    assert!(!cmds.notification().mark_read(b.id, n.id).unwrap());
    assert!(cmds.notification().mark_read(a.id, n.id).unwrap());
    assert!(cmds.notification().mark_read(a.id, n.id).unwrap());
    assert!(
        cmds.read()
            .notification()
            .unread_notifications(a.id)
            .unwrap()
            .is_empty()
    );
}

#[test]
fn collected_waste_rows_are_listed_by_collector() {
    let mut conn = connection();
    let mut cmds = CurrentWriteCommands::new(&mut conn);
    let owner = user(&mut cmds, "owner@example.com");
    let a = user(&mut cmds, "a@example.com");
    let report = cmds.report().insert_report(new_report(&owner)).unwrap();

    cmds.collected_waste()
        .insert_collected_waste(
            report.id,
            a.id,
            CollectedWasteStatus::Rejected,
            "{}",
            time(),
        )
        .unwrap();

    let rows = cmds.read().collected_waste().collected_by_user(a.id).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, CollectedWasteStatus::Rejected);
}
