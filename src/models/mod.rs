pub mod audit;
pub mod expense;
pub mod group;
pub mod settlement;
pub mod user;

pub use audit::AppLog;
pub use expense::{Expense, ParticipantShare};
pub use group::Group;
pub use settlement::{BalanceRow, Transaction};
pub use user::User;
