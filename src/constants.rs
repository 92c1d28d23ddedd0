use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// Audit action names
pub const USER_CREATED: &str = "USER_CREATED";
pub const GROUP_CREATED: &str = "GROUP_CREATED";
pub const MEMBER_ADDED: &str = "MEMBER_ADDED";
pub const EXPENSE_RECORDED: &str = "EXPENSE_RECORDED";
pub const BALANCE_QUERIED: &str = "BALANCE_QUERIED";
pub const GROUP_SETTLED: &str = "GROUP_SETTLED";

/// Fractional digits of emitted monetary amounts.
pub const CURRENCY_SCALE: u32 = 2;

/// Maximum allowed difference between total lent and total owed
/// when recording an expense.
pub const BALANCE_TOLERANCE: Decimal = dec!(0.01);
