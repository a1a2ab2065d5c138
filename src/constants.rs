//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default JWT token expiry in hours
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: u64 = 128;

/// Username minimum length
pub const MIN_USERNAME_LENGTH: u64 = 3;

/// Username maximum length
pub const MAX_USERNAME_LENGTH: u64 = 32;

/// Matches `users.email`
pub const MAX_EMAIL_LENGTH: u64 = 255;

/// Matches `users.display_name`
pub const MAX_DISPLAY_NAME_LENGTH: u64 = 64;

// =============================================================================
// DRAFT DEFAULTS
// =============================================================================

/// Default number of castaways each league member drafts
pub const DEFAULT_PICKS_PER_MEMBER: u32 = 2;

/// Upper bound for a league's per-member quota
pub const MAX_PICKS_PER_MEMBER: u32 = 10;

/// Hours between draft start and the auto-draft deadline when none is given
pub const DEFAULT_DRAFT_DEADLINE_HOURS: i64 = 48;

/// Attempts made to commit a pick when the league changes underneath us
pub const DEFAULT_MAX_COMMIT_RETRIES: u32 = 3;

/// Cron expression (with seconds) for the expired draft sweep
pub const DEFAULT_FINALIZE_CRON: &str = "0 */5 * * * *";

/// Buffered notification events before emitters start dropping
pub const DEFAULT_NOTIFICATION_QUEUE_CAPACITY: usize = 256;

/// Length of generated league invite codes
pub const INVITE_CODE_LENGTH: usize = 8;

/// Maximum league name length
pub const MAX_LEAGUE_NAME_LENGTH: u64 = 100;

/// Maximum castaway name length
pub const MAX_CASTAWAY_NAME_LENGTH: u64 = 100;

// =============================================================================
// DRAFT STATUSES
// =============================================================================

/// League draft status identifiers (stored in `leagues.draft_status`)
pub mod draft_status {
    pub const PENDING: &str = "pending";
    pub const IN_PROGRESS: &str = "in_progress";
    pub const COMPLETED: &str = "completed";
}

/// How a pick was acquired (stored in `draft_picks.acquired_via`)
pub mod acquired_via {
    pub const DRAFT: &str = "draft";
    pub const AUTO_DRAFT: &str = "auto_draft";
}

/// Castaway status identifiers
pub mod castaway_status {
    pub const ACTIVE: &str = "active";
    pub const ELIMINATED: &str = "eliminated";
}

// =============================================================================
// USER ROLES
// =============================================================================

/// User role identifiers
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const PLAYER: &str = "player";
}

// =============================================================================
// API VERSIONING
// =============================================================================

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";

/// Largest accepted request body
pub const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

// =============================================================================
// RATE LIMITING
// =============================================================================

/// Rate limiting configuration
pub mod rate_limits {
    /// Auth endpoint - max requests
    pub const AUTH_MAX_REQUESTS: i64 = 5;
    /// Auth endpoint - window in seconds
    pub const AUTH_WINDOW_SECS: i64 = 60;

    /// Draft pick endpoint - max requests
    pub const PICK_MAX_REQUESTS: i64 = 20;
    /// Draft pick endpoint - window in seconds
    pub const PICK_WINDOW_SECS: i64 = 60;

    /// General API - max requests
    pub const GENERAL_MAX_REQUESTS: i64 = 100;
    /// General API - window in seconds
    pub const GENERAL_WINDOW_SECS: i64 = 60;
}
