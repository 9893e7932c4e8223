pub const TRANSACTION_CREATED: &str = "TRANSACTION_CREATED";
pub const TRANSACTION_REWARDED: &str = "TRANSACTION_REWARDED";

pub const ADMIN_ROLE: &str = "admin";
pub const USER_ROLE: &str = "user";

pub const TOKEN_TTL_SECS: usize = 3600;
