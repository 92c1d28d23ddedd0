use crate::cache::{Cache, user_balance_key};
use crate::config::CONFIG;
use crate::constants::{
    BALANCE_QUERIED, BALANCE_TOLERANCE, EXPENSE_RECORDED, GROUP_CREATED, GROUP_SETTLED,
    MEMBER_ADDED, USER_CREATED,
};
use crate::engine::{self, Rounding};
use crate::error::DivvyError;
use crate::logger::LoggingService;
use crate::models::{BalanceRow, Expense, Group, ParticipantShare, Transaction, User};
use crate::storage::Storage;
use chrono::Utc;
use log::{debug, info, warn};
use rust_decimal::Decimal;
use serde_json::json;
use uuid::Uuid;

pub struct DivvyService<L: LoggingService, S: Storage, C: Cache> {
    storage: S,
    logging: L,
    cache: C,
}

impl<L: LoggingService, S: Storage, C: Cache> DivvyService<L, S, C> {
    pub fn new(storage: S, logging: L, cache: C) -> Self {
        DivvyService {
            storage,
            logging,
            cache,
        }
    }

    // VALIDATION HELPERS

    async fn validate_user_exists(&self, user_id: Uuid) -> Result<User, DivvyError> {
        self.storage
            .get_user(user_id)
            .await?
            .ok_or_else(|| DivvyError::UserNotFound(user_id.to_string()))
    }

    async fn validate_group_membership(
        &self,
        group_id: Uuid,
        user_id: Uuid,
    ) -> Result<Group, DivvyError> {
        let group = self
            .storage
            .get_group(group_id)
            .await?
            .ok_or_else(|| DivvyError::GroupNotFound(group_id.to_string()))?;
        if !group.is_member(user_id) {
            warn!("User {} is not a member of group {}", user_id, group_id);
            return Err(DivvyError::UnauthorizedScope(user_id.to_string()));
        }
        Ok(group)
    }

    fn validate_string_input(
        &self,
        field: &str,
        value: &str,
        max_length: usize,
    ) -> Result<(), DivvyError> {
        if value.trim().is_empty() {
            return Err(DivvyError::InvalidInput {
                field: field.to_string(),
                reason: format!("{} cannot be empty", field),
            });
        }
        if value.len() > max_length {
            return Err(DivvyError::InvalidInput {
                field: field.to_string(),
                reason: format!("{} cannot exceed {} characters", field, max_length),
            });
        }
        Ok(())
    }

    fn validate_shares(&self, group: &Group, shares: &[ParticipantShare]) -> Result<(), DivvyError> {
        if shares.is_empty() {
            return Err(DivvyError::InvalidInput {
                field: "shares".to_string(),
                reason: "at least one participant share is required".to_string(),
            });
        }

        for share in shares {
            if !group.is_member(share.user_id) {
                warn!(
                    "Share user {} is not in group {}",
                    share.user_id, group.id
                );
                return Err(DivvyError::InvalidShareUser(share.user_id.to_string()));
            }
            if share.amount_lent.is_sign_negative() || share.amount_owed.is_sign_negative() {
                return Err(DivvyError::NegativeShare(share.user_id.to_string()));
            }
        }

        let lent: Decimal = shares.iter().map(|s| s.amount_lent).sum();
        let owed: Decimal = shares.iter().map(|s| s.amount_owed).sum();
        if (lent - owed).abs() > BALANCE_TOLERANCE {
            warn!("Unbalanced expense: lent {} vs owed {}", lent, owed);
            return Err(DivvyError::UnbalancedExpense { lent, owed });
        }
        Ok(())
    }

    // USER MANAGEMENT

    pub async fn add_user(&self, name: String, email: String) -> Result<User, DivvyError> {
        info!("Creating user with email: {}", email);
        if email.is_empty() {
            return Err(DivvyError::MissingEmail);
        }
        if !email.contains('@') || !email.contains('.') || email.len() < 5 {
            return Err(DivvyError::InvalidEmail(email));
        }
        self.validate_string_input("name", &name, 100)?;

        let user = User {
            id: Uuid::new_v4(),
            name,
            email,
            created_at: Utc::now(),
        };
        self.storage.save_user(user.clone()).await?;
        debug!("User created with ID: {}", user.id);

        self.logging
            .log_action(
                USER_CREATED,
                json!({ "user_id": user.id, "name": user.name, "email": user.email }),
                Some(user.id),
            )
            .await?;

        Ok(user)
    }

    pub async fn get_user(&self, user_id: Uuid) -> Result<Option<User>, DivvyError> {
        self.storage.get_user(user_id).await
    }

    // GROUP MANAGEMENT

    pub async fn create_group(&self, name: String, created_by: &User) -> Result<Group, DivvyError> {
        info!("Creating group '{}' for user {}", name, created_by.id);
        self.validate_user_exists(created_by.id).await?;
        self.validate_string_input("name", &name, 100)?;

        let group = Group {
            id: Uuid::new_v4(),
            name,
            member_ids: vec![created_by.id],
            created_at: Utc::now(),
        };
        self.storage.save_group(group.clone()).await?;
        debug!("Group created with ID: {}", group.id);

        self.logging
            .log_action(
                GROUP_CREATED,
                json!({ "group_id": group.id, "name": group.name }),
                Some(created_by.id),
            )
            .await?;

        Ok(group)
    }

    pub async fn add_member(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        added_by: &User,
    ) -> Result<Group, DivvyError> {
        info!(
            "User {} adding user {} to group {}",
            added_by.id, user_id, group_id
        );
        let mut group = self.validate_group_membership(group_id, added_by.id).await?;
        self.validate_user_exists(user_id).await?;

        if group.is_member(user_id) {
            return Err(DivvyError::AlreadyGroupMember(user_id.to_string()));
        }

        group.member_ids.push(user_id);
        self.storage.save_group(group.clone()).await?;

        self.logging
            .log_action(
                MEMBER_ADDED,
                json!({ "group_id": group_id, "user_id": user_id }),
                Some(added_by.id),
            )
            .await?;

        Ok(group)
    }

    pub async fn get_group(&self, group_id: Uuid) -> Result<Option<Group>, DivvyError> {
        self.storage.get_group(group_id).await
    }

    // EXPENSE MANAGEMENT

    pub async fn record_expense(
        &self,
        group_id: Uuid,
        description: String,
        category: Option<String>,
        shares: Vec<ParticipantShare>,
        recorded_by: &User,
    ) -> Result<Expense, DivvyError> {
        info!(
            "Recording expense in group {} by user {}",
            group_id, recorded_by.id
        );
        let group = self
            .validate_group_membership(group_id, recorded_by.id)
            .await?;
        self.validate_string_input("description", &description, 255)?;
        self.validate_shares(&group, &shares)?;

        let expense = Expense {
            id: Uuid::new_v4(),
            group_id,
            description,
            category,
            shares,
            created_at: Utc::now(),
        };
        self.storage.save_expense(expense.clone()).await?;
        debug!("Expense recorded with ID: {}", expense.id);

        // Cached balance views of every participant are now stale.
        for share in &expense.shares {
            self.cache.del(&user_balance_key(share.user_id)).await?;
        }

        self.logging
            .log_action(
                EXPENSE_RECORDED,
                json!({
                    "expense_id": expense.id,
                    "group_id": group_id,
                    "description": expense.description,
                    "participants": expense.shares.len()
                }),
                Some(recorded_by.id),
            )
            .await?;

        Ok(expense)
    }

    // BALANCES & SETTLEMENT

    pub async fn user_balance(&self, user: &User) -> Result<Vec<BalanceRow>, DivvyError> {
        self.validate_user_exists(user.id).await?;

        let key = user_balance_key(user.id);
        if let Some(rows) = self.cache.get::<Vec<BalanceRow>>(&key).await? {
            debug!("Balance cache hit for user {}", user.id);
            return Ok(rows);
        }

        let expenses = self.storage.expenses_for_user(user.id).await?;
        let rows = engine::aggregate_for_user(user.id, &expenses);

        self.cache
            .set(&key, &rows, Some(CONFIG.balance_cache_ttl_secs))
            .await?;

        self.logging
            .log_action(
                BALANCE_QUERIED,
                json!({ "user_id": user.id, "rows": rows.len() }),
                Some(user.id),
            )
            .await?;

        Ok(rows)
    }

    pub async fn settle_group(
        &self,
        group_id: Uuid,
        requested_by: &User,
    ) -> Result<Vec<Transaction>, DivvyError> {
        info!(
            "Settling group {} for user {}",
            group_id, requested_by.id
        );
        self.validate_group_membership(group_id, requested_by.id)
            .await?;

        let expenses = self.storage.expenses_by_group(group_id).await?;
        let combined: Vec<ParticipantShare> = expenses
            .iter()
            .flat_map(|expense| expense.shares.iter().cloned())
            .collect();
        let transactions = engine::settle(&combined, Rounding::Currency);

        self.logging
            .log_action(
                GROUP_SETTLED,
                json!({
                    "group_id": group_id,
                    "expenses": expenses.len(),
                    "transactions": transactions.len()
                }),
                Some(requested_by.id),
            )
            .await?;

        Ok(transactions)
    }

    // AUDIT

    pub async fn get_app_logs(&self) -> Result<Vec<crate::models::AppLog>, DivvyError> {
        self.logging.get_logs().await
    }
}
