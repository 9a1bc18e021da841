//! Membership directory: coaches, provincial bodies and the edges between them.
//!
//! Every write goes through a [`DirectoryTx`]. Nothing written through a
//! transaction is visible to other readers until [`DirectoryTx::commit`];
//! dropping the transaction discards its writes. Rows returned by the
//! `lock_*` and `find_or_create_*` methods stay locked until the transaction
//! ends, which is what serializes concurrent operations on the same
//! (coach, body) pair.

#[cfg(test)]
mod memory;
mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::coaches::models::{Coach, CoachTier, NewCoach};
use crate::features::provinces::models::{Officers, ProvincialBody};

#[cfg(test)]
pub use memory::InMemoryDirectory;
pub use postgres::PgMembershipDirectory;

#[async_trait]
pub trait MembershipDirectory: Send + Sync {
    /// Open a transaction for a multi-record update
    async fn begin(&self) -> Result<Box<dyn DirectoryTx>>;

    async fn create_coach(&self, coach: NewCoach) -> Result<Coach>;

    async fn find_coach(&self, id: Uuid) -> Result<Option<Coach>>;

    /// Coaches for the given ids; unknown ids are skipped
    async fn find_coaches(&self, ids: &[Uuid]) -> Result<Vec<Coach>>;

    async fn list_coaches(
        &self,
        country: &str,
        province: &str,
        tier: Option<CoachTier>,
    ) -> Result<Vec<Coach>>;

    async fn find_body_by_owner(&self, owner_id: Uuid) -> Result<Option<ProvincialBody>>;

    /// Bodies for the given ids, in the order requested; unknown ids are skipped
    async fn find_bodies(&self, ids: &[Uuid]) -> Result<Vec<ProvincialBody>>;

    /// Registered bodies in a region, oldest first
    async fn find_registered_bodies(
        &self,
        country: &str,
        province: &str,
    ) -> Result<Vec<ProvincialBody>>;
}

#[async_trait]
pub trait DirectoryTx: Send {
    async fn lock_coach(&mut self, id: Uuid) -> Result<Option<Coach>>;

    async fn lock_body(&mut self, id: Uuid) -> Result<Option<ProvincialBody>>;

    async fn lock_body_by_owner(&mut self, owner_id: Uuid) -> Result<Option<ProvincialBody>>;

    /// The body owned by `owner_id`, created with the given region if absent.
    /// Ownership is unique in the store, so concurrent callers share one body.
    async fn find_or_create_body(
        &mut self,
        owner_id: Uuid,
        country: &str,
        province: &str,
    ) -> Result<ProvincialBody>;

    /// Set-add to the body's pending requests. Returns `false` if already present.
    async fn add_request(&mut self, body_id: Uuid, coach_id: Uuid) -> Result<bool>;

    /// Set-remove from the body's pending requests. Returns `false` if absent.
    async fn remove_request(&mut self, body_id: Uuid, coach_id: Uuid) -> Result<bool>;

    /// Set-add to the body's approvals. Returns `false` if already approved.
    async fn add_approval(&mut self, body_id: Uuid, coach_id: Uuid) -> Result<bool>;

    /// Append the body to the coach's outstanding national requests (set semantics)
    async fn push_national_request(&mut self, coach_id: Uuid, body_id: Uuid) -> Result<bool>;

    async fn remove_national_request(&mut self, coach_id: Uuid, body_id: Uuid) -> Result<bool>;

    /// Record officers and mark the body registered
    async fn set_officers(&mut self, body_id: Uuid, officers: &Officers) -> Result<()>;

    async fn commit(self: Box<Self>) -> Result<()>;
}
