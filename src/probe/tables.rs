//! Static expectations about the event app's schema.

/// Tables created by the initial migration, in report order.
pub const EXPECTED_TABLES: &[&str] = &[
    "users",
    "organizers",
    "categories",
    "events",
    "event_interests",
    "event_check_ins",
    "badges",
    "user_badges",
    "waiting_list",
];

/// Table whose rows show that seed data was loaded.
pub const SEED_TABLE: &str = "categories";

/// Column displayed for each seed row.
pub const SEED_DISPLAY_FIELD: &str = "name";

pub const MIGRATION_FILE: &str = "supabase/migrations/20250101000000_initial_schema.sql";

pub const DASHBOARD_URL: &str =
    "https://supabase.com/dashboard/project/mqcufztknioapxuzsevn/editor/sql";
