//! League service

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    config::DraftConfig,
    constants::roles,
    db::repositories::LeagueRepository,
    error::{AppError, AppResult},
    handlers::leagues::{CreateLeagueRequest, LeagueDetailResponse, LeagueResponse},
    models::DraftStatus,
    utils::{generate_invite_code, normalize_invite_code},
};

/// Attempts at drawing an unused invite code
const INVITE_CODE_ATTEMPTS: usize = 5;

/// League service for business logic
pub struct LeagueService;

impl LeagueService {
    /// Create a league; the creator becomes commissioner and first member
    pub async fn create_league(
        pool: &PgPool,
        commissioner_id: &Uuid,
        settings: &DraftConfig,
        payload: CreateLeagueRequest,
    ) -> AppResult<LeagueResponse> {
        let quota = payload.picks_per_member.unwrap_or(settings.picks_per_member) as i32;

        for _ in 0..INVITE_CODE_ATTEMPTS {
            let code = generate_invite_code();
            match LeagueRepository::create(
                pool,
                payload.name.trim(),
                payload.season,
                commissioner_id,
                &code,
                quota,
            )
            .await
            {
                Ok(league) => {
                    tracing::info!(
                        league_id = %league.id,
                        commissioner_id = %commissioner_id,
                        season = league.season,
                        picks_per_member = quota,
                        "League created"
                    );
                    return Ok(league.into());
                }
                Err(AppError::AlreadyExists(_)) => continue,
                Err(e) => return Err(e),
            }
        }

        Err(AppError::Internal(anyhow::anyhow!(
            "could not allocate a unique invite code"
        )))
    }

    /// Join a league by invite code while its draft is still pending
    pub async fn join_league(
        pool: &PgPool,
        user_id: &Uuid,
        invite_code: &str,
    ) -> AppResult<LeagueResponse> {
        let code = normalize_invite_code(invite_code);
        let league = LeagueRepository::find_by_invite_code(pool, &code)
            .await?
            .ok_or_else(|| AppError::NotFound("League not found".to_string()))?;

        // Lock the league so a join cannot slip in after the draft starts
        let mut tx = pool.begin().await?;
        let league = LeagueRepository::lock_for_update(&mut tx, &league.id)
            .await?
            .ok_or_else(|| AppError::NotFound("League not found".to_string()))?;

        if league.status() != DraftStatus::Pending {
            return Err(AppError::InvalidState(
                "League draft has already started".to_string(),
            ));
        }

        match LeagueRepository::add_member(&mut *tx, &league.id, user_id).await {
            Ok(()) => {}
            Err(AppError::AlreadyExists(_)) => {
                return Err(AppError::Conflict(
                    "Already a member of this league".to_string(),
                ));
            }
            Err(e) => return Err(e),
        }

        tx.commit().await?;

        tracing::info!(league_id = %league.id, user_id = %user_id, "Member joined league");
        Ok(league.into())
    }

    /// League detail for members and admins
    pub async fn get_league(
        pool: &PgPool,
        league_id: &Uuid,
        requester_id: &Uuid,
        requester_role: &str,
    ) -> AppResult<LeagueDetailResponse> {
        let league = LeagueRepository::find_by_id(pool, league_id)
            .await?
            .ok_or_else(|| AppError::NotFound("League not found".to_string()))?;

        let members = LeagueRepository::list_members(pool, league_id).await?;
        if requester_role != roles::ADMIN && !members.iter().any(|m| m.user_id == *requester_id) {
            return Err(AppError::Forbidden(
                "Not a member of this league".to_string(),
            ));
        }

        Ok(LeagueDetailResponse {
            league: league.into(),
            members: members.into_iter().map(Into::into).collect(),
        })
    }

    /// Leagues the user belongs to
    pub async fn list_leagues(pool: &PgPool, user_id: &Uuid) -> AppResult<Vec<LeagueResponse>> {
        let leagues = LeagueRepository::list_for_user(pool, user_id).await?;
        Ok(leagues.into_iter().map(Into::into).collect())
    }
}
