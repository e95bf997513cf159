// -
// Keyspace routing

/// Keyspace every request belongs to unless it names one explicitly.
pub const DEFAULT_KEYSPACE_ID: u32 = 0;

/// Keyspace group a keyspace is served by until it is reassigned.
pub const DEFAULT_KEYSPACE_GROUP_ID: u32 = 0;
