//! Console rendering. Pure functions over the probe results, so the same
//! report always renders to the same text.

use super::prober::{Outcome, ProbeReport, SeedData, TableStatus};
use super::tables::{DASHBOARD_URL, MIGRATION_FILE};
use crate::config::Credentials;
use crate::error::ProbeError;
use std::fmt::{self, Write};

const RULE_WIDTH: usize = 50;
const NAME_WIDTH: usize = 20;

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableStatus::Exists => f.write_str("✅ Exists"),
            TableStatus::Missing(_) => f.write_str("❌ Not found or no access"),
            TableStatus::Error(msg) => write!(f, "❌ Error: {msg}"),
        }
    }
}

/// Lines printed before any request goes out.
pub fn render_header(creds: &Credentials) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "🔍 Testing Supabase connection...\n");
    let _ = writeln!(out, "URL: {}", creds.url);
    let _ = writeln!(out, "Key: {}\n", creds.masked_key());
    let _ = writeln!(out, "✓ Testing basic connection...");
    let _ = writeln!(out, "✓ Checking for database tables...\n");
    out
}

pub fn render_report(report: &ProbeReport) -> String {
    let rule = "─".repeat(RULE_WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "📊 Table Status:");
    let _ = writeln!(out, "{rule}");
    for (name, status) in &report.tables {
        let _ = writeln!(out, "{name:<NAME_WIDTH$} {status}");
    }
    let _ = writeln!(out, "{rule}");

    match report.outcome() {
        Outcome::Success => {
            let _ = writeln!(
                out,
                "\n✅ SUCCESS: All tables exist! Migration has been applied.\n"
            );
            match &report.seed {
                Some(SeedData::Loaded(names)) => {
                    let _ = writeln!(
                        out,
                        "✅ Found {} categories (seed data loaded)",
                        names.len()
                    );
                    let _ = writeln!(out, "Categories: {}", names.join(", "));
                }
                Some(SeedData::Empty) | None => {
                    let _ = writeln!(
                        out,
                        "⚠️  No categories found - seed data may not be loaded"
                    );
                }
            }
        }
        Outcome::Incomplete => {
            let _ = writeln!(out, "\n❌ MIGRATION NEEDED: Some tables are missing.\n");
            let _ = writeln!(out, "📝 Next steps:");
            let _ = writeln!(out, "1. Go to: {DASHBOARD_URL}");
            let _ = writeln!(out, "2. Copy the contents of: {MIGRATION_FILE}");
            let _ = writeln!(out, "3. Paste and execute in the SQL editor\n");
        }
    }
    out
}

/// Fatal diagnostic, meant for stderr.
pub fn render_fatal(err: &ProbeError) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n❌ Connection Error: {err}");
    let _ = writeln!(out, "\nPlease check:");
    let _ = writeln!(out, "- Your internet connection");
    let _ = writeln!(out, "- The Supabase URL and key are correct");
    let _ = writeln!(out, "- The Supabase project is active");
    out
}
