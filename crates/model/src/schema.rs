// Keep in sync with the database crate migrations.

diesel::table! {
    use diesel::sql_types::*;

    user_account (id) {
        id -> BigInt,
        email -> Text,
        name -> Text,
        role -> BigInt,
        created_unix_time -> BigInt,
    }
}

diesel::table! {
    use diesel::sql_types::*;

    report (id) {
        id -> BigInt,
        owner_user_id -> BigInt,
        location -> Text,
        waste_type -> Text,
        amount -> Text,
        image_reference -> Nullable<Text>,
        verification_result -> Nullable<Text>,
        status -> BigInt,
        created_unix_time -> BigInt,
        collector_user_id -> Nullable<BigInt>,
    }
}

diesel::table! {
    use diesel::sql_types::*;

    vendor (id) {
        id -> BigInt,
        owner_user_id -> BigInt,
        name -> Text,
        email -> Text,
        company -> Text,
        id_number -> Text,
        license_number -> Text,
        address -> Text,
        status -> BigInt,
        created_unix_time -> BigInt,
    }
}

diesel::table! {
    use diesel::sql_types::*;

    staff (id) {
        id -> BigInt,
        vendor_id -> BigInt,
        user_id -> BigInt,
        name -> Text,
        email -> Text,
        phone -> Text,
        role -> Text,
        created_unix_time -> BigInt,
    }
}

diesel::table! {
    use diesel::sql_types::*;

    assignment (id) {
        id -> BigInt,
        report_id -> BigInt,
        vendor_id -> BigInt,
        staff_id -> BigInt,
        status -> BigInt,
        assigned_unix_time -> BigInt,
        completed_unix_time -> Nullable<BigInt>,
    }
}

diesel::table! {
    use diesel::sql_types::*;

    collected_waste (id) {
        id -> BigInt,
        report_id -> BigInt,
        collector_user_id -> BigInt,
        collected_unix_time -> BigInt,
        status -> BigInt,
        verification_result -> Text,
    }
}

diesel::table! {
    use diesel::sql_types::*;

    notification (id) {
        id -> BigInt,
        user_id -> BigInt,
        message -> Text,
        kind -> BigInt,
        is_read -> Bool,
        created_unix_time -> BigInt,
    }
}

diesel::table! {
    use diesel::sql_types::*;

    ledger_transaction (id) {
        id -> BigInt,
        user_id -> BigInt,
        kind -> BigInt,
        amount -> BigInt,
        description -> Text,
        report_id -> Nullable<BigInt>,
        created_unix_time -> BigInt,
    }
}

diesel::table! {
    use diesel::sql_types::*;

    reward (id) {
        id -> BigInt,
        name -> Text,
        cost -> BigInt,
        description -> Text,
        collection_info -> Text,
        is_available -> Bool,
        created_unix_time -> BigInt,
    }
}

diesel::joinable!(assignment -> report (report_id));
diesel::joinable!(assignment -> staff (staff_id));
diesel::joinable!(assignment -> vendor (vendor_id));
diesel::joinable!(collected_waste -> report (report_id));
diesel::joinable!(ledger_transaction -> user_account (user_id));
diesel::joinable!(notification -> user_account (user_id));
diesel::joinable!(staff -> user_account (user_id));
diesel::joinable!(staff -> vendor (vendor_id));

diesel::allow_tables_to_appear_in_same_query!(
    assignment,
    collected_waste,
    ledger_transaction,
    notification,
    report,
    reward,
    staff,
    user_account,
    vendor,
);
