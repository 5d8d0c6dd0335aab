use uuid::Uuid;

use crate::{
    db::ReferralExt,
    dtos::ReferralLinkResponseDto,
    models::referralmodel::ReferralLink,
    service::error::ServiceError,
};

pub const REFERRAL_CODE_LENGTH: usize = 8;

/// Source of the random identifiers referral codes are cut from.
pub trait ReferralCodeSource: Send + Sync {
    fn next_uuid(&self) -> Uuid;
}

/// Random v4 UUIDs from the operating system generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidCodeSource;

impl ReferralCodeSource for UuidCodeSource {
    fn next_uuid(&self) -> Uuid {
        Uuid::new_v4()
    }
}

pub fn generate_referral_code(source: &dyn ReferralCodeSource) -> String {
    source
        .next_uuid()
        .hyphenated()
        .to_string()
        .chars()
        .take(REFERRAL_CODE_LENGTH)
        .collect()
}

pub fn generate_referral_link(base_url: &str, group_code: &str, referral_code: &str) -> String {
    format!(
        "{}?group_code={}&referral_code={}",
        base_url, group_code, referral_code
    )
}

/// Mints a referral code for the leader's group and records it.
///
/// No uniqueness check is made against codes already stored.
pub async fn issue_referral_link(
    store: &dyn ReferralExt,
    source: &dyn ReferralCodeSource,
    base_url: &str,
    leader_user_id: Uuid,
) -> Result<ReferralLinkResponseDto, ServiceError> {
    let group = store
        .get_group_by_leader(leader_user_id)
        .await?
        .ok_or(ServiceError::GroupNotFound(leader_user_id))?;

    let referral_code = generate_referral_code(source);

    let link = ReferralLink {
        group_code: group.group_code,
        owner_user_id: leader_user_id,
        referral_code,
    };
    store.save_referral_link(&link).await?;

    let referral_link = generate_referral_link(base_url, &link.group_code, &link.referral_code);

    Ok(ReferralLinkResponseDto {
        group_code: link.group_code,
        referral_code: link.referral_code,
        referral_link,
    })
}
