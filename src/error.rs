use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Serialize)]
pub enum DivvyError {
    /// Email field is empty
    #[error("Email is required")]
    MissingEmail,

    /// Email format is invalid
    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    /// Email is already registered
    #[error("Email {0} already registered")]
    EmailAlreadyRegistered(String),

    /// User with given ID not found
    #[error("User {0} not found")]
    UserNotFound(String),

    /// Group with given ID not found
    #[error("Group {0} not found")]
    GroupNotFound(String),

    /// User is already a member of the group
    #[error("User {0} is already a group member")]
    AlreadyGroupMember(String),

    /// User is not a member of the scope they are acting on
    #[error("User {0} is not a member of the requested scope")]
    UnauthorizedScope(String),

    /// A share names a user outside the group
    #[error("Invalid share user: {0}")]
    InvalidShareUser(String),

    /// A share carries a negative lent or owed amount
    #[error("Negative share amount for user {0}")]
    NegativeShare(String),

    /// Total lent and total owed differ beyond tolerance
    #[error("Expense is unbalanced: lent {lent}, owed {owed}")]
    UnbalancedExpense { lent: Decimal, owed: Decimal },

    /// Generic input validation error
    #[error("Invalid input for field `{field}`: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),

    #[error("Cache error: {0}")]
    CacheError(String),
}
