use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::core::config::WorkflowConfig;
use crate::core::database::with_deadline;
use crate::core::error::{AppError, Result};
use crate::features::coaches::dtos::CoachSummaryDto;
use crate::features::coaches::models::Coach;
use crate::features::provinces::dtos::{
    ProvincialBodyResponseDto, RegisterOfficersDto, SubmitRequestDto,
};
use crate::features::provinces::models::{MembershipStatus, Officers, ProvincialBody};
use crate::modules::directory::MembershipDirectory;
use crate::modules::notifications::{push_best_effort, NotificationPort};
use crate::shared::constants::NATIONAL_REQUEST_EVENT;

/// Approval workflow between national coaches' provincial bodies and coaches.
///
/// A (body, coach) pair moves `absent -> pending -> {approved | absent}`.
/// Pending lives on both records (the body's `requests`, the coach's
/// `national_requests`) and both sides change in one directory transaction.
/// Inside a transaction the body row is always locked before the coach row.
pub struct ApprovalService {
    directory: Arc<dyn MembershipDirectory>,
    notifier: Arc<dyn NotificationPort>,
    deadline: Duration,
}

impl ApprovalService {
    pub fn new(
        directory: Arc<dyn MembershipDirectory>,
        notifier: Arc<dyn NotificationPort>,
        config: &WorkflowConfig,
    ) -> Self {
        Self {
            directory,
            notifier,
            deadline: config.operation_timeout,
        }
    }

    /// National coach `owner_id` asks `coach_id` to join their body.
    ///
    /// Creates the body on first use, which needs the region. Repeating a
    /// pending request changes nothing. The coach is notified after commit if
    /// connected; delivery never affects the outcome.
    pub async fn submit_request(
        &self,
        owner_id: Uuid,
        coach_id: Uuid,
        dto: SubmitRequestDto,
    ) -> Result<ProvincialBodyResponseDto> {
        let response = with_deadline(self.deadline, "submit request", async {
            let body = self.apply_request(owner_id, coach_id, &dto).await?;
            self.expand(body).await
        })
        .await?;

        match serde_json::to_value(&response) {
            Ok(payload) => {
                push_best_effort(
                    self.notifier.as_ref(),
                    coach_id,
                    NATIONAL_REQUEST_EVENT,
                    payload,
                )
                .await;
            }
            Err(e) => tracing::warn!("Skipping notification for coach {}: {}", coach_id, e),
        }

        Ok(response)
    }

    async fn apply_request(
        &self,
        owner_id: Uuid,
        coach_id: Uuid,
        dto: &SubmitRequestDto,
    ) -> Result<ProvincialBody> {
        // Coaches are never deleted, so existence can be checked outside the transaction
        self.require_coach(owner_id).await?;
        self.require_coach(coach_id).await?;

        let mut tx = self.directory.begin().await?;

        let body = match tx.lock_body_by_owner(owner_id).await? {
            Some(body) => body,
            None => {
                let (country, province) = dto.region().ok_or_else(|| {
                    AppError::Validation(
                        "country and province are required to open a provincial body".to_string(),
                    )
                })?;
                tx.find_or_create_body(owner_id, country, province).await?
            }
        };

        if body.status_of(coach_id) == Some(MembershipStatus::Approved) {
            return Err(AppError::Conflict(format!(
                "Coach {} already belongs to provincial body {}",
                coach_id, body.id
            )));
        }

        tx.lock_coach(coach_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Coach {} not found", coach_id)))?;

        let added = tx.add_request(body.id, coach_id).await?;
        tx.push_national_request(coach_id, body.id).await?;

        let body = tx
            .lock_body(body.id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Provincial body {} vanished", body.id)))?;
        tx.commit().await?;

        if added {
            tracing::info!(
                "Provincial body {} requested coach {}",
                body.id,
                coach_id
            );
        } else {
            tracing::debug!(
                "Coach {} already pending on provincial body {}",
                coach_id,
                body.id
            );
        }

        Ok(body)
    }

    /// Coach `coach_id` accepts or declines the pending request from `body_id`.
    ///
    /// Fails with `NotFound` and changes nothing when there is no such request.
    pub async fn decide(
        &self,
        coach_id: Uuid,
        body_id: Uuid,
        accept: bool,
    ) -> Result<ProvincialBodyResponseDto> {
        with_deadline(self.deadline, "decide request", async {
            let body = self.apply_decision(coach_id, body_id, accept).await?;
            self.expand(body).await
        })
        .await
    }

    async fn apply_decision(
        &self,
        coach_id: Uuid,
        body_id: Uuid,
        accept: bool,
    ) -> Result<ProvincialBody> {
        let mut tx = self.directory.begin().await?;

        tx.lock_body(body_id).await?.ok_or_else(|| {
            AppError::NotFound(format!("Provincial body {} not found", body_id))
        })?;
        let coach = tx
            .lock_coach(coach_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Coach {} not found", coach_id)))?;

        if !coach.has_pending_request(body_id) {
            return Err(AppError::NotFound(format!(
                "No pending request from provincial body {} for coach {}",
                body_id, coach_id
            )));
        }

        tx.remove_national_request(coach_id, body_id).await?;
        tx.remove_request(body_id, coach_id).await?;
        if accept {
            tx.add_approval(body_id, coach_id).await?;
        }

        let body = tx
            .lock_body(body_id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Provincial body {} vanished", body_id)))?;
        tx.commit().await?;

        tracing::info!(
            "Coach {} {} provincial body {}",
            coach_id,
            if accept { "joined" } else { "declined" },
            body_id
        );

        Ok(body)
    }

    /// Record officers on the caller's body and mark it registered
    pub async fn register_officers(
        &self,
        owner_id: Uuid,
        dto: RegisterOfficersDto,
    ) -> Result<ProvincialBodyResponseDto> {
        let officers: Officers = dto.into();

        with_deadline(self.deadline, "register officers", async {
            let mut tx = self.directory.begin().await?;

            let body = tx.lock_body_by_owner(owner_id).await?.ok_or_else(|| {
                AppError::NotFound(format!(
                    "No provincial body owned by coach {}",
                    owner_id
                ))
            })?;
            tx.set_officers(body.id, &officers).await?;

            let body = tx.lock_body(body.id).await?.ok_or_else(|| {
                AppError::Internal(format!("Provincial body {} vanished", body.id))
            })?;
            tx.commit().await?;

            tracing::info!("Provincial body {} registered officers", body.id);
            self.expand(body).await
        })
        .await
    }

    /// Registered bodies in a region, oldest first
    pub async fn query(
        &self,
        country: &str,
        province: &str,
    ) -> Result<Vec<ProvincialBodyResponseDto>> {
        with_deadline(self.deadline, "query provincial bodies", async {
            let bodies = self
                .directory
                .find_registered_bodies(country, province)
                .await?;
            self.expand_many(bodies).await
        })
        .await
    }

    /// The caller's own body, with approved coaches expanded
    pub async fn get_my_province(&self, owner_id: Uuid) -> Result<ProvincialBodyResponseDto> {
        with_deadline(self.deadline, "get own provincial body", async {
            let body = self
                .directory
                .find_body_by_owner(owner_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!(
                        "No provincial body owned by coach {}",
                        owner_id
                    ))
                })?;

            let approved: Vec<CoachSummaryDto> = self
                .directory
                .find_coaches(&body.approvals)
                .await?
                .into_iter()
                .map(Into::into)
                .collect();

            Ok(self.expand(body).await?.with_approved_coaches(approved))
        })
        .await
    }

    /// Bodies still waiting on the caller's decision, oldest request first
    pub async fn list_my_national_requests(
        &self,
        coach_id: Uuid,
    ) -> Result<Vec<ProvincialBodyResponseDto>> {
        with_deadline(self.deadline, "list national requests", async {
            let coach = self.require_coach(coach_id).await?;
            let bodies = self.directory.find_bodies(&coach.national_requests).await?;
            self.expand_many(bodies).await
        })
        .await
    }

    async fn require_coach(&self, coach_id: Uuid) -> Result<Coach> {
        self.directory
            .find_coach(coach_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Coach {} not found", coach_id)))
    }

    async fn expand(&self, body: ProvincialBody) -> Result<ProvincialBodyResponseDto> {
        let body_id = body.id;
        self.expand_many(vec![body])
            .await?
            .pop()
            .ok_or_else(|| AppError::Internal(format!("Provincial body {} lost in expansion", body_id)))
    }

    /// Attach each body's national coach, loading all owners in one read
    async fn expand_many(
        &self,
        bodies: Vec<ProvincialBody>,
    ) -> Result<Vec<ProvincialBodyResponseDto>> {
        let mut owner_ids: Vec<Uuid> = bodies.iter().map(|b| b.national_coach_id).collect();
        owner_ids.sort();
        owner_ids.dedup();

        let owners: HashMap<Uuid, CoachSummaryDto> = self
            .directory
            .find_coaches(&owner_ids)
            .await?
            .into_iter()
            .map(|c| (c.id, c.into()))
            .collect();

        bodies
            .into_iter()
            .map(|body| {
                let owner = owners.get(&body.national_coach_id).cloned().ok_or_else(|| {
                    AppError::Internal(format!(
                        "National coach {} of provincial body {} missing",
                        body.national_coach_id, body.id
                    ))
                })?;
                Ok(ProvincialBodyResponseDto::new(body, owner))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::coaches::models::{CoachTier, NewCoach};
    use crate::modules::directory::InMemoryDirectory;
    use crate::modules::notifications::ConnectionRegistry;
    use crate::shared::test_helpers::fake_name;

    struct Fixture {
        directory: Arc<InMemoryDirectory>,
        registry: ConnectionRegistry,
        service: ApprovalService,
    }

    fn fixture() -> Fixture {
        fixture_with_deadline(Duration::from_secs(2))
    }

    fn fixture_with_deadline(deadline: Duration) -> Fixture {
        let directory = Arc::new(InMemoryDirectory::new());
        let registry = ConnectionRegistry::new(8);
        let config = WorkflowConfig {
            operation_timeout: deadline,
            ..WorkflowConfig::default()
        };
        let service = ApprovalService::new(directory.clone(), Arc::new(registry.clone()), &config);
        Fixture {
            directory,
            registry,
            service,
        }
    }

    async fn coach(directory: &InMemoryDirectory, tier: CoachTier) -> Coach {
        directory
            .create_coach(NewCoach {
                name: fake_name(),
                other_name: None,
                admission: None,
                belt: None,
                tier,
                country: Some("Kenya".to_string()),
                province: Some("Nairobi".to_string()),
            })
            .await
            .unwrap()
    }

    fn region() -> SubmitRequestDto {
        SubmitRequestDto {
            country: Some("Kenya".to_string()),
            province: Some("Nairobi".to_string()),
        }
    }

    fn officers() -> RegisterOfficersDto {
        RegisterOfficersDto {
            chairman: "Achieng".to_string(),
            secretary: "Mutua".to_string(),
            vice_chairman: "Njeri".to_string(),
        }
    }

    async fn stored_coach(f: &Fixture, id: Uuid) -> Coach {
        f.directory.find_coach(id).await.unwrap().unwrap()
    }

    async fn stored_body(f: &Fixture, owner_id: Uuid) -> ProvincialBody {
        f.directory.find_body_by_owner(owner_id).await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn test_submit_creates_body_and_pending_on_both_sides() {
        let f = fixture();
        let owner = coach(&f.directory, CoachTier::National).await;
        let target = coach(&f.directory, CoachTier::Provincial).await;

        let body = f.service.submit_request(owner.id, target.id, region()).await.unwrap();

        assert_eq!(body.national_coach.id, owner.id);
        assert_eq!(body.national_coach.name, owner.name);
        assert_eq!(body.country, "Kenya");
        assert!(!body.registered);
        assert_eq!(body.requests, vec![target.id]);
        assert!(body.approvals.is_empty());
        assert_eq!(stored_coach(&f, target.id).await.national_requests, vec![body.id]);
    }

    #[tokio::test]
    async fn test_submit_is_idempotent() {
        let f = fixture();
        let owner = coach(&f.directory, CoachTier::National).await;
        let target = coach(&f.directory, CoachTier::Provincial).await;

        let first = f.service.submit_request(owner.id, target.id, region()).await.unwrap();
        let second = f
            .service
            .submit_request(owner.id, target.id, SubmitRequestDto::default())
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.requests, vec![target.id]);
        assert_eq!(stored_coach(&f, target.id).await.national_requests, vec![first.id]);
    }

    #[tokio::test]
    async fn test_submit_without_region_and_no_body_fails() {
        let f = fixture();
        let owner = coach(&f.directory, CoachTier::National).await;
        let target = coach(&f.directory, CoachTier::Provincial).await;

        let result = f
            .service
            .submit_request(owner.id, target.id, SubmitRequestDto::default())
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(f.directory.find_body_by_owner(owner.id).await.unwrap().is_none());
        assert!(stored_coach(&f, target.id).await.national_requests.is_empty());
    }

    #[tokio::test]
    async fn test_submit_unknown_coach_is_not_found() {
        let f = fixture();
        let owner = coach(&f.directory, CoachTier::National).await;

        let result = f.service.submit_request(owner.id, Uuid::now_v7(), region()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(f.directory.find_body_by_owner(owner.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_submit_for_approved_coach_conflicts() {
        let f = fixture();
        let owner = coach(&f.directory, CoachTier::National).await;
        let target = coach(&f.directory, CoachTier::Provincial).await;

        let body = f.service.submit_request(owner.id, target.id, region()).await.unwrap();
        f.service.decide(target.id, body.id, true).await.unwrap();

        let result = f.service.submit_request(owner.id, target.id, region()).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));

        let stored = stored_body(&f, owner.id).await;
        assert!(stored.requests.is_empty());
        assert_eq!(stored.approvals, vec![target.id]);
        assert!(stored_coach(&f, target.id).await.national_requests.is_empty());
    }

    #[tokio::test]
    async fn test_one_body_across_several_coaches() {
        let f = fixture();
        let owner = coach(&f.directory, CoachTier::National).await;
        let first = coach(&f.directory, CoachTier::Provincial).await;
        let second = coach(&f.directory, CoachTier::Provincial).await;

        let a = f.service.submit_request(owner.id, first.id, region()).await.unwrap();
        let b = f.service.submit_request(owner.id, second.id, region()).await.unwrap();

        assert_eq!(a.id, b.id);
        assert_eq!(b.requests, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn test_concurrent_first_requests_share_one_body() {
        let f = fixture();
        let owner = coach(&f.directory, CoachTier::National).await;
        let mut targets = Vec::new();
        for _ in 0..8 {
            targets.push(coach(&f.directory, CoachTier::Provincial).await);
        }

        let service = Arc::new(f.service);
        let handles: Vec<_> = targets
            .iter()
            .map(|t| {
                let service = service.clone();
                let (owner_id, coach_id) = (owner.id, t.id);
                tokio::spawn(async move { service.submit_request(owner_id, coach_id, region()).await })
            })
            .collect();

        let mut body_ids = Vec::new();
        for handle in handles {
            body_ids.push(handle.await.unwrap().unwrap().id);
        }
        body_ids.dedup();
        assert_eq!(body_ids.len(), 1);

        let stored = f.directory.find_body_by_owner(owner.id).await.unwrap().unwrap();
        assert_eq!(stored.requests.len(), 8);
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_requests_leave_one_entry() {
        let f = fixture();
        let owner = coach(&f.directory, CoachTier::National).await;
        let target = coach(&f.directory, CoachTier::Provincial).await;

        let service = Arc::new(f.service);
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = service.clone();
                let (owner_id, coach_id) = (owner.id, target.id);
                tokio::spawn(async move { service.submit_request(owner_id, coach_id, region()).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stored = f.directory.find_body_by_owner(owner.id).await.unwrap().unwrap();
        assert_eq!(stored.requests, vec![target.id]);
        let coach = f.directory.find_coach(target.id).await.unwrap().unwrap();
        assert_eq!(coach.national_requests, vec![stored.id]);
    }

    #[tokio::test]
    async fn test_decide_accept_moves_to_approvals() {
        let f = fixture();
        let owner = coach(&f.directory, CoachTier::National).await;
        let target = coach(&f.directory, CoachTier::Provincial).await;
        let body = f.service.submit_request(owner.id, target.id, region()).await.unwrap();

        let decided = f.service.decide(target.id, body.id, true).await.unwrap();

        assert!(decided.requests.is_empty());
        assert_eq!(decided.approvals, vec![target.id]);
        assert!(stored_coach(&f, target.id).await.national_requests.is_empty());
    }

    #[tokio::test]
    async fn test_decide_decline_clears_relation() {
        let f = fixture();
        let owner = coach(&f.directory, CoachTier::National).await;
        let target = coach(&f.directory, CoachTier::Provincial).await;
        let body = f.service.submit_request(owner.id, target.id, region()).await.unwrap();

        let decided = f.service.decide(target.id, body.id, false).await.unwrap();

        assert!(decided.requests.is_empty());
        assert!(decided.approvals.is_empty());
        assert!(stored_coach(&f, target.id).await.national_requests.is_empty());

        // A declined coach can be asked again
        let again = f.service.submit_request(owner.id, target.id, region()).await.unwrap();
        assert_eq!(again.requests, vec![target.id]);
    }

    #[tokio::test]
    async fn test_second_decision_is_not_found() {
        let f = fixture();
        let owner = coach(&f.directory, CoachTier::National).await;
        let target = coach(&f.directory, CoachTier::Provincial).await;
        let body = f.service.submit_request(owner.id, target.id, region()).await.unwrap();

        f.service.decide(target.id, body.id, true).await.unwrap();
        let result = f.service.decide(target.id, body.id, false).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(stored_body(&f, owner.id).await.approvals, vec![target.id]);
    }

    #[tokio::test]
    async fn test_decide_without_request_changes_nothing() {
        let f = fixture();
        let owner = coach(&f.directory, CoachTier::National).await;
        let requested = coach(&f.directory, CoachTier::Provincial).await;
        let stranger = coach(&f.directory, CoachTier::Provincial).await;
        let body = f.service.submit_request(owner.id, requested.id, region()).await.unwrap();

        let result = f.service.decide(stranger.id, body.id, true).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        let stored = stored_body(&f, owner.id).await;
        assert_eq!(stored.requests, vec![requested.id]);
        assert!(stored.approvals.is_empty());
        assert!(stored_coach(&f, stranger.id).await.national_requests.is_empty());
    }

    #[tokio::test]
    async fn test_decide_unknown_body_or_coach_is_not_found() {
        let f = fixture();
        let target = coach(&f.directory, CoachTier::Provincial).await;

        let result = f.service.decide(target.id, Uuid::now_v7(), true).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        let owner = coach(&f.directory, CoachTier::National).await;
        let body = f.service.submit_request(owner.id, target.id, region()).await.unwrap();
        let result = f.service.decide(Uuid::now_v7(), body.id, true).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_failed_commit_leaves_no_partial_decision() {
        let f = fixture();
        let owner = coach(&f.directory, CoachTier::National).await;
        let target = coach(&f.directory, CoachTier::Provincial).await;
        let body = f.service.submit_request(owner.id, target.id, region()).await.unwrap();

        f.directory.set_fail_commits(true);
        let result = f.service.decide(target.id, body.id, true).await;
        assert!(matches!(result, Err(AppError::StoreUnavailable(_))));

        let stored = stored_body(&f, owner.id).await;
        assert_eq!(stored.requests, vec![target.id]);
        assert!(stored.approvals.is_empty());
        assert_eq!(stored_coach(&f, target.id).await.national_requests, vec![body.id]);

        // The request is still there to decide once the store recovers
        f.directory.set_fail_commits(false);
        let decided = f.service.decide(target.id, body.id, true).await.unwrap();
        assert_eq!(decided.approvals, vec![target.id]);
    }

    #[tokio::test]
    async fn test_failed_commit_leaves_no_partial_request() {
        let f = fixture();
        let owner = coach(&f.directory, CoachTier::National).await;
        let target = coach(&f.directory, CoachTier::Provincial).await;

        f.directory.set_fail_commits(true);
        let result = f.service.submit_request(owner.id, target.id, region()).await;
        assert!(matches!(result, Err(AppError::StoreUnavailable(_))));

        assert!(f.directory.find_body_by_owner(owner.id).await.unwrap().is_none());
        assert!(stored_coach(&f, target.id).await.national_requests.is_empty());
    }

    #[tokio::test]
    async fn test_store_deadline_reports_unavailable() {
        let f = fixture_with_deadline(Duration::from_millis(50));
        let owner = coach(&f.directory, CoachTier::National).await;
        let target = coach(&f.directory, CoachTier::Provincial).await;

        // Holding a transaction keeps the directory busy past the deadline
        let held = f.directory.begin().await.unwrap();
        let result = f.service.submit_request(owner.id, target.id, region()).await;
        assert!(matches!(result, Err(AppError::StoreUnavailable(_))));
        drop(held);

        assert!(f.directory.find_body_by_owner(owner.id).await.unwrap().is_none());
        f.service.submit_request(owner.id, target.id, region()).await.unwrap();
    }

    #[tokio::test]
    async fn test_submit_succeeds_without_connection() {
        let f = fixture();
        let owner = coach(&f.directory, CoachTier::National).await;
        let target = coach(&f.directory, CoachTier::Provincial).await;

        // Connection opened and closed before the request: nobody is listening
        drop(f.registry.connect(target.id).await);

        let body = f.service.submit_request(owner.id, target.id, region()).await.unwrap();
        assert_eq!(body.requests, vec![target.id]);
    }

    #[tokio::test]
    async fn test_connected_coach_receives_national_request() {
        let f = fixture();
        let owner = coach(&f.directory, CoachTier::National).await;
        let target = coach(&f.directory, CoachTier::Provincial).await;
        let mut rx = f.registry.connect(target.id).await;

        let body = f.service.submit_request(owner.id, target.id, region()).await.unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event, NATIONAL_REQUEST_EVENT);
        assert_eq!(event.payload["id"], serde_json::json!(body.id));
        assert_eq!(event.payload["nationalCoach"]["name"], serde_json::json!(owner.name));
    }

    #[tokio::test]
    async fn test_register_officers_requires_body() {
        let f = fixture();
        let owner = coach(&f.directory, CoachTier::National).await;

        let result = f.service.register_officers(owner.id, officers()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_register_officers_marks_registered() {
        let f = fixture();
        let owner = coach(&f.directory, CoachTier::National).await;
        let target = coach(&f.directory, CoachTier::Provincial).await;
        f.service.submit_request(owner.id, target.id, region()).await.unwrap();

        let body = f.service.register_officers(owner.id, officers()).await.unwrap();

        assert!(body.registered);
        assert_eq!(body.chairman.as_deref(), Some("Achieng"));
        assert_eq!(body.vice_chairman.as_deref(), Some("Njeri"));
        assert_eq!(body.requests, vec![target.id]);
    }

    #[tokio::test]
    async fn test_query_lists_only_registered_bodies_in_region() {
        let f = fixture();
        let owner = coach(&f.directory, CoachTier::National).await;
        let target = coach(&f.directory, CoachTier::Provincial).await;
        let body = f.service.submit_request(owner.id, target.id, region()).await.unwrap();

        assert!(f.service.query("Kenya", "Nairobi").await.unwrap().is_empty());

        f.service.decide(target.id, body.id, true).await.unwrap();
        f.service.register_officers(owner.id, officers()).await.unwrap();

        let found = f.service.query("Kenya", "Nairobi").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, body.id);
        assert_eq!(found[0].national_coach.id, owner.id);
        assert_eq!(found[0].approvals, vec![target.id]);
        assert!(found[0].requests.is_empty());

        assert!(f.service.query("Kenya", "Mombasa").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_my_province_expands_approved_coaches() {
        let f = fixture();
        let owner = coach(&f.directory, CoachTier::National).await;
        let accepted = coach(&f.directory, CoachTier::Provincial).await;
        let pending = coach(&f.directory, CoachTier::Provincial).await;
        let body = f.service.submit_request(owner.id, accepted.id, region()).await.unwrap();
        f.service.submit_request(owner.id, pending.id, region()).await.unwrap();
        f.service.decide(accepted.id, body.id, true).await.unwrap();

        let mine = f.service.get_my_province(owner.id).await.unwrap();

        let approved = mine.approved_coaches.unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].id, accepted.id);
        assert_eq!(mine.requests, vec![pending.id]);
    }

    #[tokio::test]
    async fn test_get_my_province_without_body_is_not_found() {
        let f = fixture();
        let owner = coach(&f.directory, CoachTier::National).await;
        let result = f.service.get_my_province(owner.id).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_my_national_requests_in_request_order() {
        let f = fixture();
        let first_owner = coach(&f.directory, CoachTier::National).await;
        let second_owner = coach(&f.directory, CoachTier::National).await;
        let target = coach(&f.directory, CoachTier::Provincial).await;

        let first = f.service.submit_request(first_owner.id, target.id, region()).await.unwrap();
        let second = f
            .service
            .submit_request(second_owner.id, target.id, region())
            .await
            .unwrap();

        let pending = f.service.list_my_national_requests(target.id).await.unwrap();
        let ids: Vec<Uuid> = pending.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
        assert_eq!(pending[1].national_coach.id, second_owner.id);

        f.service.decide(target.id, first.id, false).await.unwrap();
        let pending = f.service.list_my_national_requests(target.id).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, second.id);
    }
}
