use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use super::{DirectoryTx, MembershipDirectory};
use crate::core::error::{AppError, Result};
use crate::features::coaches::models::{Coach, CoachTier, NewCoach};
use crate::features::provinces::models::{Officers, ProvincialBody};

#[derive(Debug, Clone, Default)]
struct DirectoryState {
    coaches: HashMap<Uuid, Coach>,
    bodies: HashMap<Uuid, ProvincialBody>,
}

impl DirectoryState {
    fn body_by_owner(&self, owner_id: Uuid) -> Option<&ProvincialBody> {
        self.bodies
            .values()
            .find(|b| b.national_coach_id == owner_id)
    }
}

/// Directory held in memory, for tests.
///
/// A transaction takes the whole-directory lock and works on a copy that is
/// swapped in on commit, so transactions are fully serialized and dropping
/// one discards its writes.
#[derive(Default)]
pub struct InMemoryDirectory {
    state: Arc<Mutex<DirectoryState>>,
    fail_commits: AtomicBool,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every commit fail, as if the store went away mid-operation
    pub fn set_fail_commits(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::SeqCst);
    }
}

pub struct InMemoryTx {
    guard: OwnedMutexGuard<DirectoryState>,
    working: DirectoryState,
    fail_commit: bool,
}

impl InMemoryTx {
    fn body_mut(&mut self, body_id: Uuid) -> Result<&mut ProvincialBody> {
        self.working
            .bodies
            .get_mut(&body_id)
            .ok_or_else(|| AppError::NotFound(format!("Provincial body {} not found", body_id)))
    }

    fn coach_mut(&mut self, coach_id: Uuid) -> Result<&mut Coach> {
        self.working
            .coaches
            .get_mut(&coach_id)
            .ok_or_else(|| AppError::NotFound(format!("Coach {} not found", coach_id)))
    }
}

fn remove_from(list: &mut Vec<Uuid>, id: Uuid) -> bool {
    let before = list.len();
    list.retain(|x| *x != id);
    list.len() != before
}

#[async_trait]
impl MembershipDirectory for InMemoryDirectory {
    async fn begin(&self) -> Result<Box<dyn DirectoryTx>> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(InMemoryTx {
            guard,
            working,
            fail_commit: self.fail_commits.load(Ordering::SeqCst),
        }))
    }

    async fn create_coach(&self, coach: NewCoach) -> Result<Coach> {
        let now = Utc::now();
        let created = Coach {
            id: Uuid::now_v7(),
            name: coach.name,
            other_name: coach.other_name,
            admission: coach.admission,
            belt: coach.belt,
            tier: coach.tier,
            country: coach.country,
            province: coach.province,
            national_requests: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.state
            .lock()
            .await
            .coaches
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_coach(&self, id: Uuid) -> Result<Option<Coach>> {
        Ok(self.state.lock().await.coaches.get(&id).cloned())
    }

    async fn find_coaches(&self, ids: &[Uuid]) -> Result<Vec<Coach>> {
        let state = self.state.lock().await;
        let mut coaches: Vec<Coach> = ids
            .iter()
            .filter_map(|id| state.coaches.get(id).cloned())
            .collect();
        coaches.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(coaches)
    }

    async fn list_coaches(
        &self,
        country: &str,
        province: &str,
        tier: Option<CoachTier>,
    ) -> Result<Vec<Coach>> {
        let state = self.state.lock().await;
        let mut coaches: Vec<Coach> = state
            .coaches
            .values()
            .filter(|c| c.country.as_deref() == Some(country))
            .filter(|c| c.province.as_deref() == Some(province))
            .filter(|c| tier.map_or(true, |t| c.tier == t))
            .cloned()
            .collect();
        coaches.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(coaches)
    }

    async fn find_body_by_owner(&self, owner_id: Uuid) -> Result<Option<ProvincialBody>> {
        Ok(self.state.lock().await.body_by_owner(owner_id).cloned())
    }

    async fn find_bodies(&self, ids: &[Uuid]) -> Result<Vec<ProvincialBody>> {
        let state = self.state.lock().await;
        Ok(ids
            .iter()
            .filter_map(|id| state.bodies.get(id).cloned())
            .collect())
    }

    async fn find_registered_bodies(
        &self,
        country: &str,
        province: &str,
    ) -> Result<Vec<ProvincialBody>> {
        let state = self.state.lock().await;
        let mut bodies: Vec<ProvincialBody> = state
            .bodies
            .values()
            .filter(|b| b.registered && b.country == country && b.province == province)
            .cloned()
            .collect();
        bodies.sort_by_key(|b| (b.created_at, b.id));
        Ok(bodies)
    }
}

#[async_trait]
impl DirectoryTx for InMemoryTx {
    async fn lock_coach(&mut self, id: Uuid) -> Result<Option<Coach>> {
        Ok(self.working.coaches.get(&id).cloned())
    }

    async fn lock_body(&mut self, id: Uuid) -> Result<Option<ProvincialBody>> {
        Ok(self.working.bodies.get(&id).cloned())
    }

    async fn lock_body_by_owner(&mut self, owner_id: Uuid) -> Result<Option<ProvincialBody>> {
        Ok(self.working.body_by_owner(owner_id).cloned())
    }

    async fn find_or_create_body(
        &mut self,
        owner_id: Uuid,
        country: &str,
        province: &str,
    ) -> Result<ProvincialBody> {
        if let Some(body) = self.working.body_by_owner(owner_id) {
            return Ok(body.clone());
        }

        let now = Utc::now();
        let body = ProvincialBody {
            id: Uuid::now_v7(),
            national_coach_id: owner_id,
            country: country.to_string(),
            province: province.to_string(),
            chairman: None,
            secretary: None,
            vice_chairman: None,
            registered: false,
            requests: Vec::new(),
            approvals: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.working.bodies.insert(body.id, body.clone());
        Ok(body)
    }

    async fn add_request(&mut self, body_id: Uuid, coach_id: Uuid) -> Result<bool> {
        let body = self.body_mut(body_id)?;
        if body.requests.contains(&coach_id) || body.approvals.contains(&coach_id) {
            return Ok(false);
        }
        body.requests.push(coach_id);
        Ok(true)
    }

    async fn remove_request(&mut self, body_id: Uuid, coach_id: Uuid) -> Result<bool> {
        let body = self.body_mut(body_id)?;
        Ok(remove_from(&mut body.requests, coach_id))
    }

    async fn add_approval(&mut self, body_id: Uuid, coach_id: Uuid) -> Result<bool> {
        let body = self.body_mut(body_id)?;
        remove_from(&mut body.requests, coach_id);
        if body.approvals.contains(&coach_id) {
            return Ok(false);
        }
        body.approvals.push(coach_id);
        Ok(true)
    }

    async fn push_national_request(&mut self, coach_id: Uuid, body_id: Uuid) -> Result<bool> {
        let coach = self.coach_mut(coach_id)?;
        if coach.national_requests.contains(&body_id) {
            return Ok(false);
        }
        coach.national_requests.push(body_id);
        Ok(true)
    }

    async fn remove_national_request(&mut self, coach_id: Uuid, body_id: Uuid) -> Result<bool> {
        let coach = self.coach_mut(coach_id)?;
        Ok(remove_from(&mut coach.national_requests, body_id))
    }

    async fn set_officers(&mut self, body_id: Uuid, officers: &Officers) -> Result<()> {
        let body = self.body_mut(body_id)?;
        body.chairman = Some(officers.chairman.clone());
        body.secretary = Some(officers.secretary.clone());
        body.vice_chairman = Some(officers.vice_chairman.clone());
        body.registered = true;
        body.updated_at = Utc::now();
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let InMemoryTx {
            mut guard,
            working,
            fail_commit,
        } = *self;

        if fail_commit {
            return Err(AppError::StoreUnavailable(
                "directory connection lost during commit".to_string(),
            ));
        }

        *guard = working;
        Ok(())
    }
}
