use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

/// A directed payment instruction: `from_user` must pay `to_user`.
///
/// `amount` is strictly positive and serializes as text with exactly
/// two fractional digits, e.g. `"33.33"`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Transaction {
    pub from_user: Uuid,
    pub to_user: Uuid,
    #[serde(serialize_with = "serialize_currency")]
    pub amount: Decimal,
}

/// One consolidated row of a user's balance view.
///
/// Positive `amount` means the counter-party owes the requesting user,
/// negative means the requesting user owes the counter-party.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BalanceRow {
    pub user: Uuid,
    pub amount: Decimal,
}

fn serialize_currency<S>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format!("{amount:.2}"))
}
