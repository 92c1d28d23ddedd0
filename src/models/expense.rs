use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One user's lent/owed contribution within an expense.
///
/// `amount_lent` is what the user paid on behalf of the group,
/// `amount_owed` is what the user consumed. Both are non-negative.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParticipantShare {
    pub user_id: Uuid,
    pub amount_lent: Decimal,
    pub amount_owed: Decimal,
}

impl ParticipantShare {
    pub fn new(user_id: Uuid, amount_lent: Decimal, amount_owed: Decimal) -> Self {
        ParticipantShare {
            user_id,
            amount_lent,
            amount_owed,
        }
    }

    /// Net balance contribution: positive means the user is owed money.
    pub fn net(&self) -> Decimal {
        self.amount_lent - self.amount_owed
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub group_id: Uuid,
    pub description: String,
    pub category: Option<String>,
    pub shares: Vec<ParticipantShare>,
    pub created_at: DateTime<Utc>,
}
