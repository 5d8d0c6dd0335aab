use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct GenerateReferralDto {
    // null and absent both mean missing
    #[validate(length(min = 1, message = "leaderUserId is required"))]
    #[serde(rename = "leaderUserId", default)]
    pub leader_user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferralLinkResponseDto {
    pub group_code: String,
    pub referral_code: String,
    pub referral_link: String,
}
