// Token configuration constants
pub const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 604_800; // 7 days
pub const BEARER_PREFIX: &str = "Bearer ";

// Secret requirements
pub const MIN_SECRET_LENGTH: usize = 32;

// Argon2 work factor defaults (roughly bcrypt cost 10 territory)
pub const DEFAULT_HASH_MEMORY_KIB: u32 = 19_456;
pub const DEFAULT_HASH_ITERATIONS: u32 = 2;
pub const DEFAULT_HASH_PARALLELISM: u32 = 1;
