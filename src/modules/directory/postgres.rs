use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::{DirectoryTx, MembershipDirectory};
use crate::core::error::{AppError, Result};
use crate::features::coaches::models::{Coach, CoachTier, NewCoach};
use crate::features::provinces::models::{MembershipStatus, Officers, ProvincialBody};

/// Postgres-backed membership directory
pub struct PgMembershipDirectory {
    pool: PgPool,
}

impl PgMembershipDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// An open Postgres transaction; rolled back by sqlx when dropped uncommitted
pub struct PgDirectoryTx {
    tx: Transaction<'static, Postgres>,
}

// ==================== Row loading ====================

/// Fill `national_requests` for each coach, oldest request first
async fn attach_national_requests(
    conn: &mut PgConnection,
    mut coaches: Vec<Coach>,
) -> Result<Vec<Coach>> {
    if coaches.is_empty() {
        return Ok(coaches);
    }

    let ids: Vec<Uuid> = coaches.iter().map(|c| c.id).collect();
    let rows: Vec<(Uuid, Uuid)> = sqlx::query_as(
        r#"
        SELECT coach_id, body_id
        FROM coach_national_requests
        WHERE coach_id = ANY($1)
        ORDER BY requested_at ASC, body_id ASC
        "#,
    )
    .bind(&ids)
    .fetch_all(&mut *conn)
    .await?;

    let mut by_coach: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for (coach_id, body_id) in rows {
        by_coach.entry(coach_id).or_default().push(body_id);
    }

    for coach in &mut coaches {
        coach.national_requests = by_coach.remove(&coach.id).unwrap_or_default();
    }

    Ok(coaches)
}

/// Fill `requests` and `approvals` for each body, in join order
async fn attach_members(
    conn: &mut PgConnection,
    bodies: Vec<ProvincialBody>,
) -> Result<Vec<ProvincialBody>> {
    if bodies.is_empty() {
        return Ok(bodies);
    }

    let ids: Vec<Uuid> = bodies.iter().map(|b| b.id).collect();
    let rows: Vec<(Uuid, Uuid, MembershipStatus)> = sqlx::query_as(
        r#"
        SELECT body_id, coach_id, status
        FROM provincial_body_members
        WHERE body_id = ANY($1)
        ORDER BY created_at ASC, coach_id ASC
        "#,
    )
    .bind(&ids)
    .fetch_all(&mut *conn)
    .await?;

    let mut by_body: HashMap<Uuid, Vec<(Uuid, MembershipStatus)>> = HashMap::new();
    for (body_id, coach_id, status) in rows {
        by_body.entry(body_id).or_default().push((coach_id, status));
    }

    Ok(bodies
        .into_iter()
        .map(|body| {
            let members = by_body.remove(&body.id).unwrap_or_default();
            body.with_members(&members)
        })
        .collect())
}

// Row locks are NO KEY UPDATE: foreign-key checks from other transactions
// take KEY SHARE on the same rows and must not queue behind them.
fn lock_clause(for_update: bool) -> &'static str {
    if for_update {
        "FOR NO KEY UPDATE"
    } else {
        ""
    }
}

async fn load_coach(conn: &mut PgConnection, id: Uuid, for_update: bool) -> Result<Option<Coach>> {
    let sql = format!(
        r#"
        SELECT id, name, other_name, admission, belt, tier, country, province, created_at, updated_at
        FROM coaches
        WHERE id = $1
        {}
        "#,
        lock_clause(for_update)
    );

    let coach: Option<Coach> = sqlx::query_as(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    match coach {
        Some(coach) => Ok(attach_national_requests(conn, vec![coach]).await?.pop()),
        None => Ok(None),
    }
}

async fn load_body(
    conn: &mut PgConnection,
    column: BodyKey,
    key: Uuid,
    for_update: bool,
) -> Result<Option<ProvincialBody>> {
    let sql = format!(
        r#"
        SELECT id, national_coach_id, country, province, chairman, secretary, vice_chairman,
               registered, created_at, updated_at
        FROM provincial_bodies
        WHERE {} = $1
        {}
        "#,
        column.as_sql(),
        lock_clause(for_update)
    );

    let body: Option<ProvincialBody> = sqlx::query_as(&sql)
        .bind(key)
        .fetch_optional(&mut *conn)
        .await?;

    match body {
        Some(body) => Ok(attach_members(conn, vec![body]).await?.pop()),
        None => Ok(None),
    }
}

#[derive(Clone, Copy)]
enum BodyKey {
    Id,
    Owner,
}

impl BodyKey {
    fn as_sql(self) -> &'static str {
        match self {
            BodyKey::Id => "id",
            BodyKey::Owner => "national_coach_id",
        }
    }
}

// ==================== Directory ====================

#[async_trait]
impl MembershipDirectory for PgMembershipDirectory {
    async fn begin(&self) -> Result<Box<dyn DirectoryTx>> {
        let tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to open directory transaction: {:?}", e);
            AppError::from(e)
        })?;
        Ok(Box::new(PgDirectoryTx { tx }))
    }

    async fn create_coach(&self, coach: NewCoach) -> Result<Coach> {
        let created: Coach = sqlx::query_as(
            r#"
            INSERT INTO coaches (id, name, other_name, admission, belt, tier, country, province)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, other_name, admission, belt, tier, country, province,
                      created_at, updated_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(&coach.name)
        .bind(&coach.other_name)
        .bind(&coach.admission)
        .bind(&coach.belt)
        .bind(coach.tier)
        .bind(&coach.country)
        .bind(&coach.province)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert coach: {:?}", e);
            AppError::from(e)
        })?;

        Ok(created)
    }

    async fn find_coach(&self, id: Uuid) -> Result<Option<Coach>> {
        let mut conn = self.pool.acquire().await?;
        load_coach(&mut conn, id, false).await
    }

    async fn find_coaches(&self, ids: &[Uuid]) -> Result<Vec<Coach>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.pool.acquire().await?;
        let coaches: Vec<Coach> = sqlx::query_as(
            r#"
            SELECT id, name, other_name, admission, belt, tier, country, province,
                   created_at, updated_at
            FROM coaches
            WHERE id = ANY($1)
            ORDER BY name ASC
            "#,
        )
        .bind(ids)
        .fetch_all(&mut *conn)
        .await?;

        attach_national_requests(&mut conn, coaches).await
    }

    async fn list_coaches(
        &self,
        country: &str,
        province: &str,
        tier: Option<CoachTier>,
    ) -> Result<Vec<Coach>> {
        let mut conn = self.pool.acquire().await?;
        let coaches: Vec<Coach> = sqlx::query_as(
            r#"
            SELECT id, name, other_name, admission, belt, tier, country, province,
                   created_at, updated_at
            FROM coaches
            WHERE country = $1 AND province = $2 AND ($3::coach_tier IS NULL OR tier = $3)
            ORDER BY name ASC
            "#,
        )
        .bind(country)
        .bind(province)
        .bind(tier)
        .fetch_all(&mut *conn)
        .await?;

        attach_national_requests(&mut conn, coaches).await
    }

    async fn find_body_by_owner(&self, owner_id: Uuid) -> Result<Option<ProvincialBody>> {
        let mut conn = self.pool.acquire().await?;
        load_body(&mut conn, BodyKey::Owner, owner_id, false).await
    }

    async fn find_bodies(&self, ids: &[Uuid]) -> Result<Vec<ProvincialBody>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.pool.acquire().await?;
        let bodies: Vec<ProvincialBody> = sqlx::query_as(
            r#"
            SELECT id, national_coach_id, country, province, chairman, secretary, vice_chairman,
                   registered, created_at, updated_at
            FROM provincial_bodies
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&mut *conn)
        .await?;

        let mut by_id: HashMap<Uuid, ProvincialBody> = attach_members(&mut conn, bodies)
            .await?
            .into_iter()
            .map(|b| (b.id, b))
            .collect();

        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    async fn find_registered_bodies(
        &self,
        country: &str,
        province: &str,
    ) -> Result<Vec<ProvincialBody>> {
        let mut conn = self.pool.acquire().await?;
        let bodies: Vec<ProvincialBody> = sqlx::query_as(
            r#"
            SELECT id, national_coach_id, country, province, chairman, secretary, vice_chairman,
                   registered, created_at, updated_at
            FROM provincial_bodies
            WHERE country = $1 AND province = $2 AND registered = TRUE
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(country)
        .bind(province)
        .fetch_all(&mut *conn)
        .await?;

        attach_members(&mut conn, bodies).await
    }
}

// ==================== Transaction ====================

#[async_trait]
impl DirectoryTx for PgDirectoryTx {
    async fn lock_coach(&mut self, id: Uuid) -> Result<Option<Coach>> {
        load_coach(&mut self.tx, id, true).await
    }

    async fn lock_body(&mut self, id: Uuid) -> Result<Option<ProvincialBody>> {
        load_body(&mut self.tx, BodyKey::Id, id, true).await
    }

    async fn lock_body_by_owner(&mut self, owner_id: Uuid) -> Result<Option<ProvincialBody>> {
        load_body(&mut self.tx, BodyKey::Owner, owner_id, true).await
    }

    async fn find_or_create_body(
        &mut self,
        owner_id: Uuid,
        country: &str,
        province: &str,
    ) -> Result<ProvincialBody> {
        // The no-op update makes the upsert return (and lock) an existing row
        let body: ProvincialBody = sqlx::query_as(
            r#"
            INSERT INTO provincial_bodies (id, national_coach_id, country, province)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (national_coach_id)
            DO UPDATE SET updated_at = NOW()
            RETURNING id, national_coach_id, country, province, chairman, secretary,
                      vice_chairman, registered, created_at, updated_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(owner_id)
        .bind(country)
        .bind(province)
        .fetch_one(&mut *self.tx)
        .await?;

        attach_members(&mut self.tx, vec![body])
            .await?
            .pop()
            .ok_or_else(|| AppError::Internal("upserted body vanished".to_string()))
    }

    async fn add_request(&mut self, body_id: Uuid, coach_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO provincial_body_members (body_id, coach_id, status)
            VALUES ($1, $2, $3)
            ON CONFLICT (body_id, coach_id) DO NOTHING
            "#,
        )
        .bind(body_id)
        .bind(coach_id)
        .bind(MembershipStatus::Pending)
        .execute(&mut *self.tx)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn remove_request(&mut self, body_id: Uuid, coach_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM provincial_body_members
            WHERE body_id = $1 AND coach_id = $2 AND status = $3
            "#,
        )
        .bind(body_id)
        .bind(coach_id)
        .bind(MembershipStatus::Pending)
        .execute(&mut *self.tx)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn add_approval(&mut self, body_id: Uuid, coach_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO provincial_body_members (body_id, coach_id, status)
            VALUES ($1, $2, $3)
            ON CONFLICT (body_id, coach_id)
            DO UPDATE SET status = EXCLUDED.status, updated_at = NOW()
            WHERE provincial_body_members.status <> EXCLUDED.status
            "#,
        )
        .bind(body_id)
        .bind(coach_id)
        .bind(MembershipStatus::Approved)
        .execute(&mut *self.tx)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn push_national_request(&mut self, coach_id: Uuid, body_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO coach_national_requests (coach_id, body_id)
            VALUES ($1, $2)
            ON CONFLICT (coach_id, body_id) DO NOTHING
            "#,
        )
        .bind(coach_id)
        .bind(body_id)
        .execute(&mut *self.tx)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn remove_national_request(&mut self, coach_id: Uuid, body_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM coach_national_requests
            WHERE coach_id = $1 AND body_id = $2
            "#,
        )
        .bind(coach_id)
        .bind(body_id)
        .execute(&mut *self.tx)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn set_officers(&mut self, body_id: Uuid, officers: &Officers) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE provincial_bodies
            SET chairman = $2, secretary = $3, vice_chairman = $4,
                registered = TRUE, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(body_id)
        .bind(&officers.chairman)
        .bind(&officers.secretary)
        .bind(&officers.vice_chairman)
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit directory transaction: {:?}", e);
            AppError::from(e)
        })
    }
}
