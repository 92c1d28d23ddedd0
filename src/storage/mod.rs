use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DivvyError;
use crate::models::{Expense, Group, User};

#[async_trait]
pub trait Storage: Send + Sync {
    async fn save_user(&self, user: User) -> Result<(), DivvyError>;
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, DivvyError>;

    async fn save_group(&self, group: Group) -> Result<(), DivvyError>;
    async fn get_group(&self, id: Uuid) -> Result<Option<Group>, DivvyError>;

    async fn save_expense(&self, expense: Expense) -> Result<(), DivvyError>;

    /// Expenses belonging to a group, in ledger (insertion) order.
    async fn expenses_by_group(&self, group_id: Uuid) -> Result<Vec<Expense>, DivvyError>;

    /// Expenses the user holds a share in, in ledger (insertion) order.
    async fn expenses_for_user(&self, user_id: Uuid) -> Result<Vec<Expense>, DivvyError>;
}

pub mod in_memory;
