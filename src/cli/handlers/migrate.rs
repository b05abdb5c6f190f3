//! Migrate command handler
//!
//! Handles database migration operations including dry-run and rollback.

use crate::config::DatabaseConfig;
use crate::db::{pending_migrations, revert_migrations, run_pending_migrations};

/// What a `migrate` invocation should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Apply,
    DryRun,
    Rollback(u32),
}

impl MigrateAction {
    pub fn from_flags(dry_run: bool, rollback: Option<u32>) -> Self {
        match (dry_run, rollback) {
            (true, _) => MigrateAction::DryRun,
            (false, Some(steps)) => MigrateAction::Rollback(steps),
            (false, None) => MigrateAction::Apply,
        }
    }
}

/// Handler for the migrate command
pub struct MigrateCommandHandler {
    database: DatabaseConfig,
}

impl MigrateCommandHandler {
    /// Create a new migrate command handler
    pub fn new(database: DatabaseConfig) -> Self {
        Self { database }
    }

    /// Execute the migrate command
    ///
    /// # Errors
    /// - Database configuration validation errors
    /// - Connection and migration errors
    /// - Rolling back more migrations than are applied
    pub async fn execute(&self, action: MigrateAction) -> anyhow::Result<()> {
        self.database.validate()?;

        match action {
            MigrateAction::DryRun => self.show_pending_migrations().await,
            MigrateAction::Apply => self.run_migrations().await,
            MigrateAction::Rollback(steps) => self.rollback_migrations(steps).await,
        }
    }

    async fn show_pending_migrations(&self) -> anyhow::Result<()> {
        println!("Checking for pending migrations...");
        let pending = pending_migrations(&self.database.url).await?;

        if pending.is_empty() {
            println!("✓ No pending migrations found - database is up to date");
        } else {
            println!("Found {} pending migration(s):", pending.len());
            for migration in &pending {
                println!("  - {}", migration);
            }
            println!("\nRun without --dry-run to apply these migrations");
        }
        Ok(())
    }

    async fn run_migrations(&self) -> anyhow::Result<()> {
        println!("Running database migrations...");
        let applied = run_pending_migrations(&self.database.url).await?;

        if applied.is_empty() {
            println!("✓ No migrations to apply - database is already up to date");
        } else {
            println!("✓ Applied {} migration(s):", applied.len());
            for migration in &applied {
                println!("  - {}", migration);
            }
        }
        tracing::info!(count = applied.len(), "Database migration completed");
        Ok(())
    }

    async fn rollback_migrations(&self, steps: u32) -> anyhow::Result<()> {
        println!("Rolling back {} migration(s)...", steps);
        let reverted = revert_migrations(&self.database.url, steps).await?;

        println!("✓ Rolled back {} migration(s):", reverted.len());
        for migration in &reverted {
            println!("  - {}", migration);
        }
        tracing::warn!(count = reverted.len(), "Migrations rolled back");
        Ok(())
    }
}
