use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Row of the `groups` table. Groups are owned by another system, this service only reads them.
#[derive(Debug, Clone, Deserialize, Serialize, sqlx::FromRow)]
pub struct Group {
    pub leader_user_id: Uuid,
    pub group_code: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, sqlx::FromRow)]
pub struct ReferralLink {
    pub group_code: String,
    pub owner_user_id: Uuid,
    pub referral_code: String,
}
