//! Common type definitions.
//!
//! All generated entity IDs are UUIDs wrapped in type aliases for better type
//! safety. The role and registration-method resources are addressed by their
//! natural key (the name itself) and have no alias here.

use uuid::Uuid;

pub type UserId = Uuid;
pub type PostId = Uuid;
pub type DonationId = Uuid;
pub type BanRecordId = Uuid;
pub type AttachmentId = Uuid;
pub type MessageId = Uuid;

/// Abbreviate a UUID to its first 8 characters for more readable logs and traces
/// Example: "550e8400-e29b-41d4-a716-446655440000" -> "550e8400"
pub fn abbrev_uuid(uuid: &Uuid) -> String {
    uuid.to_string().chars().take(8).collect()
}
