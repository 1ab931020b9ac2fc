// =============================================================================
// COLLECTIONS
// =============================================================================

/// Collection holding report documents
pub const REPORTS_COLLECTION: &str = "reports";

/// Collection holding project documents (owns the `reports` back-reference list)
pub const PROJECTS_COLLECTION: &str = "projects";

/// Collection holding user documents
pub const USERS_COLLECTION: &str = "users";

// =============================================================================
// STATUS CONSTANTS
// =============================================================================

/// Allowed status values for projects and tasks
#[allow(dead_code)]
pub const WORK_STATUSES: [&str; 3] = ["Pending", "In Progress", "Completed"];
