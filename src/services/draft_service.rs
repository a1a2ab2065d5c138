//! Draft service
//!
//! Loads a league snapshot, runs the pure engine over it and commits the
//! result through the [`DraftStore`]. A stale commit means another writer
//! got to the league first; the service reloads and re-validates so the
//! caller sees the error that is true for the new state.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::{
    config::DraftConfig,
    constants::roles,
    db::{Commit, DraftStore},
    draft::{self, DraftSnapshot, OrderRequest, pick::next_pick},
    error::{AppError, AppResult},
    handlers::{
        castaways::CastawayResponse,
        draft::{
            CurrentTurnResponse, DraftOrderEntry, DraftOrderResponse, DraftStartedResponse,
            DraftStateResponse, PickOutcome, PickResponse,
        },
    },
    models::{DraftPick, DraftStatus},
    notifications::{DraftEvent, EventSink, RosterSummary},
};

/// Outcome of one finalize sweep
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FinalizeSummary {
    pub leagues_finalized: usize,
    pub picks_auto_assigned: usize,
    /// Leagues closed before every member reached the quota
    pub short_pool_leagues: Vec<Uuid>,
    /// Leagues the sweep could not close; they are retried on the next run
    pub failed_leagues: Vec<Uuid>,
}

/// What finalizing one league did
struct LeagueFinalized {
    picks_assigned: usize,
    short_pool: bool,
}

/// Draft engine entry point shared by handlers and the scheduler
pub struct DraftService {
    store: Arc<dyn DraftStore>,
    events: EventSink,
    settings: DraftConfig,
}

impl DraftService {
    pub fn new(store: Arc<dyn DraftStore>, events: EventSink, settings: DraftConfig) -> Self {
        Self {
            store,
            events,
            settings,
        }
    }

    /// Draft board for a member (or admin)
    pub async fn draft_state(
        &self,
        league_id: &Uuid,
        viewer_id: &Uuid,
        viewer_role: &str,
    ) -> AppResult<DraftStateResponse> {
        let snapshot = self.load(league_id).await?;
        Self::require_viewer(&snapshot, viewer_id, viewer_role)?;

        let current_turn = match snapshot.status() {
            DraftStatus::InProgress => {
                snapshot
                    .current_turn()
                    .map(|(turn, user_id)| CurrentTurnResponse {
                        round: turn.round,
                        pick_number: turn.pick_number(),
                        user_id,
                        user_name: Self::member_name(&snapshot, &user_id),
                    })
            }
            _ => None,
        };
        let is_my_turn = current_turn
            .as_ref()
            .is_some_and(|turn| turn.user_id == *viewer_id);

        let picks: Vec<PickResponse> = snapshot
            .picks
            .iter()
            .map(|p| Self::pick_response(&snapshot, p))
            .collect();
        let my_picks = picks
            .iter()
            .filter(|p| p.user_id == *viewer_id)
            .cloned()
            .collect();

        Ok(DraftStateResponse {
            league_id: snapshot.league.id,
            league_name: snapshot.league.name.clone(),
            status: snapshot.status(),
            picks_per_member: snapshot.league.picks_per_member,
            total_picks: snapshot.total_picks(),
            picks_made: snapshot.pick_count(),
            draft_deadline: snapshot.league.draft_deadline,
            current_turn,
            is_my_turn,
            picks,
            my_picks,
            available_castaways: snapshot
                .available_castaways()
                .into_iter()
                .map(CastawayResponse::from)
                .collect(),
        })
    }

    /// Resolved draft order with member names
    pub async fn draft_order(
        &self,
        league_id: &Uuid,
        viewer_id: &Uuid,
        viewer_role: &str,
    ) -> AppResult<DraftOrderResponse> {
        let snapshot = self.load(league_id).await?;
        Self::require_viewer(&snapshot, viewer_id, viewer_role)?;

        Ok(Self::order_response(&snapshot, &snapshot.league.draft_order))
    }

    /// Set or shuffle the draft order of a pending league
    pub async fn set_draft_order(
        &self,
        league_id: &Uuid,
        requester_id: &Uuid,
        requester_role: &str,
        request: OrderRequest,
    ) -> AppResult<DraftOrderResponse> {
        for attempt in 0..=self.settings.max_commit_retries {
            let snapshot = self.load(league_id).await?;
            Self::require_commissioner(&snapshot, requester_id, requester_role)?;

            if snapshot.status() != DraftStatus::Pending {
                return Err(AppError::InvalidState(
                    "draft order is fixed once the draft starts".to_string(),
                ));
            }

            let members: Vec<Uuid> = snapshot.members.iter().map(|m| m.user_id).collect();
            let order = {
                let mut rng = rand::rng();
                draft::resolve_order(&members, request.clone(), &mut rng)?
            };

            match self.store.save_order(*league_id, &order).await? {
                Commit::Applied(()) => {
                    info!(
                        league_id = %league_id,
                        members = order.len(),
                        randomized = request.randomize,
                        "Draft order set"
                    );
                    return Ok(Self::order_response(&snapshot, &order));
                }
                Commit::Stale => {
                    warn!(league_id = %league_id, attempt, "Draft order commit was stale, retrying");
                }
            }
        }

        Err(Self::concurrent_change())
    }

    /// Open a pending league's draft
    pub async fn start_draft(
        &self,
        league_id: &Uuid,
        requester_id: &Uuid,
        requester_role: &str,
        deadline: Option<DateTime<Utc>>,
    ) -> AppResult<DraftStartedResponse> {
        for attempt in 0..=self.settings.max_commit_retries {
            let snapshot = self.load(league_id).await?;
            Self::require_commissioner(&snapshot, requester_id, requester_role)?;

            if snapshot.status() != DraftStatus::Pending {
                return Err(AppError::InvalidState("draft already started".to_string()));
            }
            if snapshot.members.is_empty() || !snapshot.order_matches_members() {
                return Err(AppError::InvalidState("draft order not set".to_string()));
            }

            let now = Utc::now();
            let deadline = match deadline {
                Some(d) if d <= now => {
                    return Err(AppError::Validation(
                        "Draft deadline must be in the future".to_string(),
                    ));
                }
                Some(d) => d,
                None => now + Duration::hours(self.settings.default_deadline_hours),
            };

            let order = snapshot.league.draft_order.clone();
            match self
                .store
                .start_draft(*league_id, &order, deadline, now)
                .await?
            {
                Commit::Applied(league) => {
                    info!(
                        league_id = %league_id,
                        deadline = %deadline,
                        members = order.len(),
                        "Draft started"
                    );
                    self.events.emit(DraftEvent::DraftStarted {
                        league_id: league.id,
                        league_name: league.name.clone(),
                        deadline,
                        members: order.clone(),
                        first_picker: order.first().copied(),
                    });
                    return Ok(DraftStartedResponse {
                        league_id: league.id,
                        status: league.status(),
                        draft_order: league.draft_order,
                        draft_started_at: league.draft_started_at,
                        draft_deadline: league.draft_deadline,
                    });
                }
                Commit::Stale => {
                    warn!(league_id = %league_id, attempt, "Draft start commit was stale, retrying");
                }
            }
        }

        Err(Self::concurrent_change())
    }

    /// Submit a pick for the member on the clock
    pub async fn submit_pick(
        &self,
        league_id: &Uuid,
        user_id: &Uuid,
        castaway_id: &Uuid,
    ) -> AppResult<PickOutcome> {
        for attempt in 0..=self.settings.max_commit_retries {
            let snapshot = self.load(league_id).await?;

            let plan = match draft::plan_pick(&snapshot, *user_id, *castaway_id) {
                Ok(plan) => plan,
                Err(e) => {
                    debug!(
                        league_id = %league_id,
                        user_id = %user_id,
                        castaway_id = %castaway_id,
                        error = %e,
                        "Pick rejected"
                    );
                    return Err(e);
                }
            };

            let committed = self
                .store
                .commit_picks(
                    *league_id,
                    plan.expected_pick_count(),
                    std::slice::from_ref(&plan),
                    plan.completes_draft,
                    Utc::now(),
                )
                .await?;

            let pick = match committed {
                Commit::Applied(mut rows) => match rows.pop() {
                    Some(pick) => pick,
                    None => {
                        return Err(AppError::Internal(anyhow::anyhow!(
                            "pick commit returned no rows"
                        )));
                    }
                },
                Commit::Stale => {
                    warn!(
                        league_id = %league_id,
                        user_id = %user_id,
                        pick_number = plan.pick_number,
                        attempt,
                        "Pick commit was stale, retrying"
                    );
                    continue;
                }
            };

            info!(
                league_id = %league_id,
                user_id = %user_id,
                castaway_id = %castaway_id,
                round = plan.round,
                pick_number = plan.pick_number,
                "Pick committed"
            );

            let next = next_pick(&snapshot, plan.pick_number);
            let response = Self::pick_response(&snapshot, &pick);

            self.events.emit(DraftEvent::PickMade {
                league_id: *league_id,
                league_name: snapshot.league.name.clone(),
                user_id: *user_id,
                castaway_name: response.castaway_name.clone(),
                round: plan.round,
                pick_number: plan.pick_number,
                next_picker: next.map(|n| n.user_id),
            });

            if plan.completes_draft {
                info!(league_id = %league_id, "Draft completed");
                self.events.emit(DraftEvent::DraftCompleted {
                    league_id: *league_id,
                    league_name: snapshot.league.name.clone(),
                    auto_drafted: false,
                    rosters: Self::rosters(&snapshot, std::slice::from_ref(&pick)),
                });
            }

            return Ok(PickOutcome {
                pick: response,
                draft_complete: plan.completes_draft,
                next_pick: next,
            });
        }

        Err(Self::concurrent_change())
    }

    /// Auto-complete every draft whose deadline has passed
    pub async fn finalize_expired_drafts(&self) -> AppResult<FinalizeSummary> {
        self.finalize_expired_drafts_at(Utc::now()).await
    }

    /// Sweep as of `now`. A league that fails is logged and left for the next sweep.
    pub async fn finalize_expired_drafts_at(&self, now: DateTime<Utc>) -> AppResult<FinalizeSummary> {
        let expired = self.store.expired_drafts(now).await?;
        let mut summary = FinalizeSummary::default();

        for league_id in expired {
            match self.finalize_league(&league_id, now).await {
                Ok(Some(done)) => {
                    summary.leagues_finalized += 1;
                    summary.picks_auto_assigned += done.picks_assigned;
                    if done.short_pool {
                        summary.short_pool_leagues.push(league_id);
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    error!(league_id = %league_id, error = %e, "Failed to finalize draft");
                    summary.failed_leagues.push(league_id);
                }
            }
        }

        if summary.leagues_finalized > 0 || !summary.failed_leagues.is_empty() {
            info!(
                leagues_finalized = summary.leagues_finalized,
                picks_auto_assigned = summary.picks_auto_assigned,
                short_pool_leagues = summary.short_pool_leagues.len(),
                failed_leagues = summary.failed_leagues.len(),
                "Finalize sweep finished"
            );
        }

        Ok(summary)
    }

    /// Fill and close one expired league. `None` when it no longer needs finalizing.
    async fn finalize_league(
        &self,
        league_id: &Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Option<LeagueFinalized>> {
        for attempt in 0..=self.settings.max_commit_retries {
            let Some(snapshot) = self.store.snapshot(*league_id).await? else {
                return Ok(None);
            };
            if snapshot.status() != DraftStatus::InProgress || !snapshot.is_past_deadline(now) {
                return Ok(None);
            }

            let plan = draft::plan_auto_draft(&snapshot);
            if plan.short_pool {
                warn!(
                    league_id = %league_id,
                    unfilled_slots = plan.unfilled_slots,
                    "Castaway pool ran out before every roster was full"
                );
            }

            match self
                .store
                .commit_picks(*league_id, snapshot.pick_count(), &plan.picks, true, now)
                .await?
            {
                Commit::Applied(rows) => {
                    info!(
                        league_id = %league_id,
                        picks_auto_assigned = rows.len(),
                        members_affected = draft::auto::affected_members(&plan).len(),
                        "Draft finalized after deadline"
                    );
                    self.events.emit(DraftEvent::DraftCompleted {
                        league_id: *league_id,
                        league_name: snapshot.league.name.clone(),
                        auto_drafted: !rows.is_empty(),
                        rosters: Self::rosters(&snapshot, &rows),
                    });
                    return Ok(Some(LeagueFinalized {
                        picks_assigned: rows.len(),
                        short_pool: plan.short_pool,
                    }));
                }
                Commit::Stale => {
                    warn!(league_id = %league_id, attempt, "Finalize commit was stale, retrying");
                }
            }
        }

        Err(Self::concurrent_change())
    }

    async fn load(&self, league_id: &Uuid) -> AppResult<DraftSnapshot> {
        self.store
            .snapshot(*league_id)
            .await?
            .ok_or_else(|| AppError::NotFound("League not found".to_string()))
    }

    fn require_viewer(snapshot: &DraftSnapshot, viewer_id: &Uuid, viewer_role: &str) -> AppResult<()> {
        if snapshot.is_member(viewer_id) || viewer_role == roles::ADMIN {
            Ok(())
        } else {
            Err(AppError::Forbidden("Not a member of this league".to_string()))
        }
    }

    fn require_commissioner(
        snapshot: &DraftSnapshot,
        requester_id: &Uuid,
        requester_role: &str,
    ) -> AppResult<()> {
        if snapshot.league.is_commissioner(requester_id) || requester_role == roles::ADMIN {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Only the commissioner can manage the draft".to_string(),
            ))
        }
    }

    fn concurrent_change() -> AppError {
        AppError::Conflict("draft changed concurrently, please retry".to_string())
    }

    fn member_name(snapshot: &DraftSnapshot, user_id: &Uuid) -> String {
        snapshot
            .member(user_id)
            .map(|m| m.public_name().to_string())
            .unwrap_or_default()
    }

    fn pick_response(snapshot: &DraftSnapshot, pick: &DraftPick) -> PickResponse {
        PickResponse {
            id: pick.id,
            round: pick.round,
            pick_number: pick.pick_number,
            user_id: pick.user_id,
            user_name: Self::member_name(snapshot, &pick.user_id),
            castaway_id: pick.castaway_id,
            castaway_name: snapshot
                .castaway(&pick.castaway_id)
                .map(|c| c.name.clone())
                .unwrap_or_default(),
            acquired_via: pick.acquired_via.clone(),
            created_at: pick.created_at,
        }
    }

    fn order_response(snapshot: &DraftSnapshot, order: &[Uuid]) -> DraftOrderResponse {
        let entries = order
            .iter()
            .enumerate()
            .filter_map(|(index, user_id)| {
                snapshot.member(user_id).map(|m| DraftOrderEntry {
                    position: index as i32 + 1,
                    user_id: m.user_id,
                    username: m.username.clone(),
                    display_name: m.display_name.clone(),
                })
            })
            .collect();

        DraftOrderResponse {
            league_id: snapshot.league.id,
            status: snapshot.status(),
            order: entries,
        }
    }

    /// Final rosters in draft order, combining `snapshot` picks with freshly committed ones
    fn rosters(snapshot: &DraftSnapshot, committed: &[DraftPick]) -> Vec<RosterSummary> {
        snapshot
            .league
            .draft_order
            .iter()
            .map(|user_id| RosterSummary {
                user_id: *user_id,
                castaways: snapshot
                    .picks
                    .iter()
                    .chain(committed)
                    .filter(|p| p.user_id == *user_id)
                    .filter_map(|p| snapshot.castaway(&p.castaway_id))
                    .map(|c| c.name.clone())
                    .collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        constants::{castaway_status, draft_status},
        draft::fixtures,
        test_utils::MemoryDraftStore,
    };
    use std::collections::HashSet;
    use tokio::sync::mpsc;

    const POOL: &[&str] = &[
        "Kyle", "Rachel", "Sam", "Sue", "Genevieve", "Teeny", "Andy", "Caroline", "Sol", "Rome",
    ];

    struct Harness {
        service: Arc<DraftService>,
        store: Arc<MemoryDraftStore>,
        events: mpsc::Receiver<DraftEvent>,
        league_id: Uuid,
        order: Vec<Uuid>,
    }

    fn harness(snapshot: DraftSnapshot) -> Harness {
        let league_id = snapshot.league.id;
        let order = snapshot.league.draft_order.clone();
        let store = Arc::new(MemoryDraftStore::with_league(snapshot));
        let (sink, events) = EventSink::channel(64);
        let service = Arc::new(DraftService::new(
            store.clone(),
            sink,
            DraftConfig::default(),
        ));
        Harness {
            service,
            store,
            events,
            league_id,
            order,
        }
    }

    fn castaway_id(h: &Harness, name: &str) -> Uuid {
        let snapshot = h.store.league(&h.league_id).unwrap();
        snapshot.castaways.iter().find(|c| c.name == name).unwrap().id
    }

    fn drain(events: &mut mpsc::Receiver<DraftEvent>) -> Vec<&'static str> {
        let mut kinds = Vec::new();
        while let Ok(event) = events.try_recv() {
            kinds.push(event.kind());
        }
        kinds
    }

    /// Pending league with an order already saved
    fn pending(members: usize, quota: i32) -> DraftSnapshot {
        let mut snapshot = fixtures::in_progress(members, quota, POOL);
        snapshot.league.draft_status = draft_status::PENDING.to_string();
        snapshot.league.draft_deadline = None;
        snapshot
    }

    #[tokio::test]
    async fn test_four_member_snake_draft_end_to_end() {
        let mut h = harness(fixtures::in_progress(4, 2, POOL));
        let picks = [
            (0, "Kyle"),
            (1, "Rachel"),
            (2, "Sam"),
            (3, "Sue"),
            (3, "Genevieve"),
            (2, "Teeny"),
            (1, "Andy"),
            (0, "Caroline"),
        ];

        for (i, (member, name)) in picks.iter().enumerate() {
            let user = h.order[*member];
            let outcome = h
                .service
                .submit_pick(&h.league_id, &user, &castaway_id(&h, name))
                .await
                .unwrap();
            assert_eq!(outcome.pick.pick_number, i as i32 + 1);
            assert_eq!(outcome.pick.round, if i < 4 { 1 } else { 2 });
            assert_eq!(outcome.pick.castaway_name, *name);
            assert_eq!(outcome.draft_complete, i == 7);
        }

        let snapshot = h.store.league(&h.league_id).unwrap();
        assert_eq!(snapshot.status(), DraftStatus::Completed);
        assert!(snapshot.league.draft_completed_at.is_some());
        for user in &h.order {
            assert_eq!(snapshot.picks_for(user).len(), 2);
        }

        let ninth = h
            .service
            .submit_pick(&h.league_id, &h.order[0], &castaway_id(&h, "Sol"))
            .await
            .unwrap_err();
        assert!(matches!(ninth, AppError::InvalidState(ref m) if m == "draft not in progress"));

        let kinds = drain(&mut h.events);
        assert_eq!(kinds.len(), 9);
        assert_eq!(kinds.last(), Some(&"draft_completed"));
    }

    #[tokio::test]
    async fn test_next_pick_reported_after_each_pick() {
        let h = harness(fixtures::in_progress(3, 2, POOL));

        let outcome = h
            .service
            .submit_pick(&h.league_id, &h.order[0], &castaway_id(&h, "Kyle"))
            .await
            .unwrap();
        let next = outcome.next_pick.unwrap();
        assert_eq!((next.round, next.pick_number, next.user_id), (1, 2, h.order[1]));
    }

    #[tokio::test]
    async fn test_wrong_turn_is_forbidden() {
        let h = harness(fixtures::in_progress(4, 2, POOL));

        let err = h
            .service
            .submit_pick(&h.league_id, &h.order[1], &Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(ref m) if m == "not your turn"));
        assert_eq!(h.store.league(&h.league_id).unwrap().pick_count(), 0);
    }

    #[tokio::test]
    async fn test_already_drafted_castaway_conflicts() {
        let h = harness(fixtures::in_progress(2, 2, POOL));
        let kyle = castaway_id(&h, "Kyle");

        h.service
            .submit_pick(&h.league_id, &h.order[0], &kyle)
            .await
            .unwrap();
        let err = h
            .service
            .submit_pick(&h.league_id, &h.order[1], &kyle)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref m) if m == "already drafted"));
    }

    #[tokio::test]
    async fn test_eliminated_castaway_conflicts() {
        let mut snapshot = fixtures::in_progress(2, 2, POOL);
        snapshot.castaways[0].status = castaway_status::ELIMINATED.to_string();
        let eliminated = snapshot.castaways[0].id;
        let h = harness(snapshot);

        let err = h
            .service
            .submit_pick(&h.league_id, &h.order[0], &eliminated)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref m) if m == "castaway eliminated"));
    }

    /// Eliminates a castaway right before the first pick commit lands
    struct EliminatedMidPick {
        inner: Arc<MemoryDraftStore>,
        castaway_id: Uuid,
    }

    #[async_trait::async_trait]
    impl DraftStore for EliminatedMidPick {
        async fn snapshot(&self, league_id: Uuid) -> AppResult<Option<DraftSnapshot>> {
            self.inner.snapshot(league_id).await
        }

        async fn save_order(&self, league_id: Uuid, order: &[Uuid]) -> AppResult<Commit<()>> {
            self.inner.save_order(league_id, order).await
        }

        async fn start_draft(
            &self,
            league_id: Uuid,
            expected_order: &[Uuid],
            deadline: DateTime<Utc>,
            now: DateTime<Utc>,
        ) -> AppResult<Commit<crate::models::League>> {
            self.inner
                .start_draft(league_id, expected_order, deadline, now)
                .await
        }

        async fn commit_picks(
            &self,
            league_id: Uuid,
            expected_pick_count: usize,
            picks: &[draft::PlannedPick],
            complete: bool,
            now: DateTime<Utc>,
        ) -> AppResult<Commit<Vec<DraftPick>>> {
            self.inner.eliminate(&league_id, &self.castaway_id);
            self.inner
                .commit_picks(league_id, expected_pick_count, picks, complete, now)
                .await
        }

        async fn expired_drafts(&self, now: DateTime<Utc>) -> AppResult<Vec<Uuid>> {
            self.inner.expired_drafts(now).await
        }
    }

    #[tokio::test]
    async fn test_castaway_eliminated_during_pick_is_not_drafted() {
        let h = harness(fixtures::in_progress(2, 2, POOL));
        let kyle = castaway_id(&h, "Kyle");
        let (sink, _events) = EventSink::channel(8);
        let service = DraftService::new(
            Arc::new(EliminatedMidPick {
                inner: h.store.clone(),
                castaway_id: kyle,
            }),
            sink,
            DraftConfig::default(),
        );

        let err = service
            .submit_pick(&h.league_id, &h.order[0], &kyle)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref m) if m == "castaway eliminated"));
        assert_eq!(h.store.league(&h.league_id).unwrap().pick_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_league_is_not_found() {
        let h = harness(fixtures::in_progress(2, 2, POOL));

        let err = h
            .service
            .submit_pick(&Uuid::new_v4(), &h.order[0], &Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_submissions_for_one_slot() {
        let h = harness(fixtures::in_progress(2, 2, POOL));
        let user = h.order[0];
        let castaways: Vec<Uuid> = POOL.iter().take(6).map(|n| castaway_id(&h, n)).collect();

        let handles: Vec<_> = castaways
            .into_iter()
            .map(|castaway| {
                let service = h.service.clone();
                let league_id = h.league_id;
                tokio::spawn(async move { service.submit_pick(&league_id, &user, &castaway).await })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(outcome) => {
                    successes += 1;
                    assert_eq!(outcome.pick.pick_number, 1);
                }
                Err(e) => assert!(matches!(e, AppError::Forbidden(_) | AppError::Conflict(_))),
            }
        }
        assert_eq!(successes, 1);
        assert_eq!(h.store.league(&h.league_id).unwrap().pick_count(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_members_fill_draft_without_duplicate_pick_numbers() {
        let h = harness(fixtures::in_progress(4, 2, POOL));

        let handles: Vec<_> = h
            .order
            .iter()
            .map(|user| {
                let service = h.service.clone();
                let league_id = h.league_id;
                let user = *user;
                tokio::spawn(async move {
                    for _ in 0..10_000 {
                        let state = service.draft_state(&league_id, &user, "player").await.unwrap();
                        if state.status == DraftStatus::Completed {
                            break;
                        }
                        let Some(castaway) = state.available_castaways.first() else {
                            break;
                        };
                        let _ = service.submit_pick(&league_id, &user, &castaway.id).await;
                        tokio::task::yield_now().await;
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let snapshot = h.store.league(&h.league_id).unwrap();
        assert_eq!(snapshot.status(), DraftStatus::Completed);
        let numbers: HashSet<i32> = snapshot.picks.iter().map(|p| p.pick_number).collect();
        assert_eq!(numbers, (1..=8).collect());
        let castaways: HashSet<Uuid> = snapshot.picks.iter().map(|p| p.castaway_id).collect();
        assert_eq!(castaways.len(), 8);
        for user in &h.order {
            assert_eq!(snapshot.picks_for(user).len(), 2);
        }
    }

    #[tokio::test]
    async fn test_finalize_fills_remaining_slots_and_is_idempotent() {
        let mut snapshot = fixtures::in_progress(3, 2, POOL);
        snapshot.league.draft_deadline = Some(Utc::now() - Duration::hours(1));
        let mut h = harness(snapshot);

        let summary = h.service.finalize_expired_drafts().await.unwrap();
        assert_eq!(summary.leagues_finalized, 1);
        assert_eq!(summary.picks_auto_assigned, 6);
        assert!(summary.short_pool_leagues.is_empty());

        let snapshot = h.store.league(&h.league_id).unwrap();
        assert_eq!(snapshot.status(), DraftStatus::Completed);
        assert!(snapshot.picks.iter().all(|p| p.is_auto_drafted()));
        let names: Vec<&str> = snapshot
            .picks
            .iter()
            .map(|p| snapshot.castaway(&p.castaway_id).unwrap().name.as_str())
            .collect();
        assert_eq!(names, vec!["Andy", "Caroline", "Genevieve", "Kyle", "Rachel", "Rome"]);
        assert_eq!(drain(&mut h.events), vec!["draft_completed"]);

        let again = h.service.finalize_expired_drafts().await.unwrap();
        assert_eq!(again, FinalizeSummary::default());
        assert_eq!(h.store.league(&h.league_id).unwrap().pick_count(), 6);
    }

    #[tokio::test]
    async fn test_finalize_short_pool_still_completes() {
        let mut snapshot = fixtures::in_progress(4, 2, &["Adam", "Bella", "Cody"]);
        snapshot.league.draft_deadline = Some(Utc::now() - Duration::minutes(5));
        let h = harness(snapshot);

        let summary = h.service.finalize_expired_drafts().await.unwrap();
        assert_eq!(summary.picks_auto_assigned, 3);
        assert_eq!(summary.short_pool_leagues, vec![h.league_id]);

        let snapshot = h.store.league(&h.league_id).unwrap();
        assert_eq!(snapshot.status(), DraftStatus::Completed);
        assert_eq!(snapshot.pick_count(), 3);
    }

    #[tokio::test]
    async fn test_finalize_skips_drafts_before_deadline() {
        let h = harness(fixtures::in_progress(2, 2, POOL));

        let summary = h.service.finalize_expired_drafts().await.unwrap();
        assert_eq!(summary, FinalizeSummary::default());
        assert_eq!(
            h.store.league(&h.league_id).unwrap().status(),
            DraftStatus::InProgress
        );
    }

    #[tokio::test]
    async fn test_set_order_then_start_draft() {
        let mut snapshot = pending(3, 2);
        snapshot.league.draft_order.clear();
        let commissioner = snapshot.league.commissioner_id;
        let members: Vec<Uuid> = snapshot.members.iter().map(|m| m.user_id).collect();
        let mut h = harness(snapshot);

        let err = h
            .service
            .start_draft(&h.league_id, &commissioner, "player", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidState(ref m) if m == "draft order not set"));

        let reversed: Vec<Uuid> = members.iter().rev().copied().collect();
        let order = h
            .service
            .set_draft_order(
                &h.league_id,
                &commissioner,
                "player",
                OrderRequest {
                    order: Some(reversed.clone()),
                    randomize: false,
                },
            )
            .await
            .unwrap();
        let positions: Vec<(i32, Uuid)> = order.order.iter().map(|e| (e.position, e.user_id)).collect();
        assert_eq!(positions, vec![(1, reversed[0]), (2, reversed[1]), (3, reversed[2])]);

        let started = h
            .service
            .start_draft(&h.league_id, &commissioner, "player", None)
            .await
            .unwrap();
        assert_eq!(started.status, DraftStatus::InProgress);
        assert_eq!(started.draft_order, reversed);
        assert!(started.draft_deadline.is_some());
        assert_eq!(drain(&mut h.events), vec!["draft_started"]);

        let err = h
            .service
            .set_draft_order(
                &h.league_id,
                &commissioner,
                "player",
                OrderRequest {
                    order: None,
                    randomize: true,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_randomized_order_covers_members() {
        let snapshot = pending(5, 2);
        let commissioner = snapshot.league.commissioner_id;
        let members: HashSet<Uuid> = snapshot.members.iter().map(|m| m.user_id).collect();
        let h = harness(snapshot);

        let order = h
            .service
            .set_draft_order(
                &h.league_id,
                &commissioner,
                "player",
                OrderRequest {
                    order: None,
                    randomize: true,
                },
            )
            .await
            .unwrap();
        let ids: HashSet<Uuid> = order.order.iter().map(|e| e.user_id).collect();
        assert_eq!(ids, members);

        let stored = h.store.league(&h.league_id).unwrap();
        let stored_set: HashSet<Uuid> = stored.league.draft_order.iter().copied().collect();
        assert_eq!(stored_set, members);
        assert!(stored.members.iter().all(|m| m.draft_position.is_some()));
    }

    #[tokio::test]
    async fn test_only_commissioner_or_admin_manages_draft() {
        let snapshot = pending(3, 2);
        let other = snapshot.league.draft_order[1];
        let h = harness(snapshot);

        let err = h
            .service
            .start_draft(&h.league_id, &other, "player", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let admin = Uuid::new_v4();
        tokio_test::assert_ok!(
            h.service
                .start_draft(&h.league_id, &admin, roles::ADMIN, None)
                .await
        );
    }

    #[tokio::test]
    async fn test_start_rejects_past_deadline() {
        let snapshot = pending(2, 2);
        let commissioner = snapshot.league.commissioner_id;
        let h = harness(snapshot);

        let err = h
            .service
            .start_draft(
                &h.league_id,
                &commissioner,
                "player",
                Some(Utc::now() - Duration::hours(1)),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_draft_state_for_members_only() {
        let h = harness(fixtures::in_progress(2, 2, POOL));

        let err = h
            .service
            .draft_state(&h.league_id, &Uuid::new_v4(), "player")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        h.service
            .submit_pick(&h.league_id, &h.order[0], &castaway_id(&h, "Sue"))
            .await
            .unwrap();

        let state = h
            .service
            .draft_state(&h.league_id, &h.order[1], "player")
            .await
            .unwrap();
        assert!(state.is_my_turn);
        assert_eq!(state.picks_made, 1);
        assert_eq!(state.total_picks, 4);
        assert!(state.my_picks.is_empty());
        assert_eq!(state.available_castaways.len(), POOL.len() - 1);
        assert_eq!(state.available_castaways[0].name, "Andy");
        assert_eq!(state.current_turn.unwrap().pick_number, 2);
    }
}
