/// Storage key holding the serialized conference list.
pub const CONFERENCES_KEY: &str = "conferences";
/// Storage key holding the serialized registration log.
pub const REGISTRATIONS_KEY: &str = "registrations";
