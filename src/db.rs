use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::referralmodel::{Group, ReferralLink};

#[derive(Debug, Clone)]
pub struct DBClient {
    pool: Pool<Postgres>,
}

impl DBClient {
    pub fn new(pool: Pool<Postgres>) -> Self {
        DBClient { pool }
    }
}

#[async_trait]
pub trait ReferralExt: Send + Sync {
    async fn get_group_by_leader(
        &self,
        leader_user_id: Uuid,
    ) -> Result<Option<Group>, sqlx::Error>;

    async fn save_referral_link(
        &self,
        link: &ReferralLink,
    ) -> Result<(), sqlx::Error>;
}

#[async_trait]
impl ReferralExt for DBClient {
    async fn get_group_by_leader(
        &self,
        leader_user_id: Uuid,
    ) -> Result<Option<Group>, sqlx::Error> {
        // A leader is expected to own a single group; extra rows are ignored
        let group = sqlx::query_as::<_, Group>(
            r#"
            SELECT leader_user_id, group_code
            FROM groups
            WHERE leader_user_id = $1
            LIMIT 1
            "#,
        )
        .bind(leader_user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(group)
    }

    async fn save_referral_link(
        &self,
        link: &ReferralLink,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO referral_links (group_code, owner_user_id, referral_code)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&link.group_code)
        .bind(link.owner_user_id)
        .bind(&link.referral_code)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
