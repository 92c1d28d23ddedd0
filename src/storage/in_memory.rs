use crate::error::DivvyError;
use crate::models::{Expense, Group, User};
use crate::storage::Storage;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

pub struct InMemoryStorage {
    users: Mutex<HashMap<Uuid, User>>,
    emails: Mutex<HashMap<String, Uuid>>, // email -> user_id
    groups: Mutex<HashMap<Uuid, Group>>,
    expenses: Mutex<Vec<Expense>>, // append-only ledger
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            users: Mutex::new(HashMap::new()),
            emails: Mutex::new(HashMap::new()),
            groups: Mutex::new(HashMap::new()),
            expenses: Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn save_user(&self, user: User) -> Result<(), DivvyError> {
        let mut emails = self.emails.lock().await;
        if emails.contains_key(&user.email) {
            return Err(DivvyError::EmailAlreadyRegistered(user.email));
        }
        emails.insert(user.email.clone(), user.id);
        let mut users = self.users.lock().await;
        users.insert(user.id, user);
        Ok(())
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>, DivvyError> {
        Ok(self.users.lock().await.get(&id).cloned())
    }

    async fn save_group(&self, group: Group) -> Result<(), DivvyError> {
        // For production: Use database transactions
        self.groups.lock().await.insert(group.id, group);
        Ok(())
    }

    async fn get_group(&self, id: Uuid) -> Result<Option<Group>, DivvyError> {
        Ok(self.groups.lock().await.get(&id).cloned())
    }

    async fn save_expense(&self, expense: Expense) -> Result<(), DivvyError> {
        self.expenses.lock().await.push(expense);
        Ok(())
    }

    async fn expenses_by_group(&self, group_id: Uuid) -> Result<Vec<Expense>, DivvyError> {
        // For production: Use database query with index
        Ok(self
            .expenses
            .lock()
            .await
            .iter()
            .filter(|expense| expense.group_id == group_id)
            .cloned()
            .collect())
    }

    async fn expenses_for_user(&self, user_id: Uuid) -> Result<Vec<Expense>, DivvyError> {
        Ok(self
            .expenses
            .lock()
            .await
            .iter()
            .filter(|expense| expense.shares.iter().any(|share| share.user_id == user_id))
            .cloned()
            .collect())
    }
}
