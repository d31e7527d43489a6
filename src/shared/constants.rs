/// Maximum length of a complaint title
pub const MAX_TITLE_LENGTH: usize = 255;

/// Maximum length of a complaint description
pub const MAX_DESCRIPTION_LENGTH: usize = 5000;

/// Maximum length of the free-form location text
pub const MAX_LOCATION_LENGTH: usize = 500;

/// Maximum length of the filer's display name
pub const MAX_CITIZEN_NAME_LENGTH: usize = 255;

/// Maximum length of a staff remark
pub const MAX_REMARK_LENGTH: usize = 2000;

/// Maximum length of a client-supplied idempotency key
pub const MAX_IDEMPOTENCY_KEY_LENGTH: usize = 255;

/// Header carrying the client idempotency key on create
pub const IDEMPOTENCY_KEY_HEADER: &str = "idempotency-key";
