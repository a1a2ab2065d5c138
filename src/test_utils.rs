//! Test utilities
//!
//! [`MemoryDraftStore`] applies the same guards as the Postgres store under a
//! single mutex and yields to the runtime before every operation so
//! concurrent callers interleave. The container modules start Postgres and
//! Redis lazily on first use and share them across tests.

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    constants::{castaway_status, draft_status},
    db::{Commit, DraftStore},
    draft::{DraftSnapshot, PlannedPick, order},
    error::AppResult,
    models::{DraftPick, DraftStatus, League},
};

#[derive(Default)]
pub struct MemoryDraftStore {
    leagues: Mutex<HashMap<Uuid, DraftSnapshot>>,
}

impl MemoryDraftStore {
    pub fn with_league(snapshot: DraftSnapshot) -> Self {
        let store = Self::default();
        store.insert(snapshot);
        store
    }

    pub fn insert(&self, snapshot: DraftSnapshot) {
        self.leagues
            .lock()
            .unwrap()
            .insert(snapshot.league.id, snapshot);
    }

    /// Current state of a league
    pub fn league(&self, league_id: &Uuid) -> Option<DraftSnapshot> {
        self.leagues.lock().unwrap().get(league_id).cloned()
    }

    /// Vote a castaway out of one league's season
    pub fn eliminate(&self, league_id: &Uuid, castaway_id: &Uuid) {
        let mut leagues = self.leagues.lock().unwrap();
        if let Some(castaway) = leagues
            .get_mut(league_id)
            .and_then(|s| s.castaways.iter_mut().find(|c| c.id == *castaway_id))
        {
            castaway.status = castaway_status::ELIMINATED.to_string();
        }
    }
}

#[async_trait]
impl DraftStore for MemoryDraftStore {
    async fn snapshot(&self, league_id: Uuid) -> AppResult<Option<DraftSnapshot>> {
        tokio::task::yield_now().await;
        Ok(self.league(&league_id))
    }

    async fn save_order(&self, league_id: Uuid, new_order: &[Uuid]) -> AppResult<Commit<()>> {
        tokio::task::yield_now().await;
        let mut leagues = self.leagues.lock().unwrap();
        let Some(snapshot) = leagues.get_mut(&league_id) else {
            return Ok(Commit::Stale);
        };

        let members: Vec<Uuid> = snapshot.members.iter().map(|m| m.user_id).collect();
        if snapshot.status() != DraftStatus::Pending || !order::is_permutation(new_order, &members) {
            return Ok(Commit::Stale);
        }

        snapshot.league.draft_order = new_order.to_vec();
        for (user_id, position) in order::draft_positions(new_order) {
            if let Some(member) = snapshot.members.iter_mut().find(|m| m.user_id == user_id) {
                member.draft_position = Some(position);
            }
        }
        Ok(Commit::Applied(()))
    }

    async fn start_draft(
        &self,
        league_id: Uuid,
        expected_order: &[Uuid],
        deadline: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> AppResult<Commit<League>> {
        tokio::task::yield_now().await;
        let mut leagues = self.leagues.lock().unwrap();
        let Some(snapshot) = leagues.get_mut(&league_id) else {
            return Ok(Commit::Stale);
        };

        if snapshot.status() != DraftStatus::Pending
            || snapshot.league.draft_order != expected_order
            || !snapshot.order_matches_members()
        {
            return Ok(Commit::Stale);
        }

        snapshot.league.draft_status = draft_status::IN_PROGRESS.to_string();
        snapshot.league.draft_started_at = Some(now);
        snapshot.league.draft_deadline = Some(deadline);
        snapshot.league.updated_at = now;
        Ok(Commit::Applied(snapshot.league.clone()))
    }

    async fn commit_picks(
        &self,
        league_id: Uuid,
        expected_pick_count: usize,
        picks: &[PlannedPick],
        complete: bool,
        now: DateTime<Utc>,
    ) -> AppResult<Commit<Vec<DraftPick>>> {
        tokio::task::yield_now().await;
        let mut leagues = self.leagues.lock().unwrap();
        let Some(snapshot) = leagues.get_mut(&league_id) else {
            return Ok(Commit::Stale);
        };

        if snapshot.status() != DraftStatus::InProgress || snapshot.pick_count() != expected_pick_count {
            return Ok(Commit::Stale);
        }

        // Unique (league, pick_number) and (league, castaway)
        for (i, pick) in picks.iter().enumerate() {
            let clashes_stored = snapshot.picks.iter().any(|p| {
                p.pick_number as usize == pick.pick_number || p.castaway_id == pick.castaway_id
            });
            let clashes_batch = picks[..i].iter().any(|p| {
                p.pick_number == pick.pick_number || p.castaway_id == pick.castaway_id
            });
            let draftable = snapshot
                .castaway(&pick.castaway_id)
                .is_some_and(|c| c.is_active());
            if clashes_stored || clashes_batch || !draftable {
                return Ok(Commit::Stale);
            }
        }

        let rows: Vec<DraftPick> = picks
            .iter()
            .map(|pick| DraftPick {
                id: Uuid::new_v4(),
                league_id,
                user_id: pick.user_id,
                castaway_id: pick.castaway_id,
                round: pick.round as i32,
                pick_number: pick.pick_number as i32,
                acquired_via: pick.acquired_via.as_str().to_string(),
                created_at: now,
            })
            .collect();
        snapshot.picks.extend(rows.iter().cloned());

        if complete {
            snapshot.league.draft_status = draft_status::COMPLETED.to_string();
            snapshot.league.draft_completed_at = Some(now);
            snapshot.league.updated_at = now;
        }

        Ok(Commit::Applied(rows))
    }

    async fn expired_drafts(&self, now: DateTime<Utc>) -> AppResult<Vec<Uuid>> {
        tokio::task::yield_now().await;
        let leagues = self.leagues.lock().unwrap();
        Ok(leagues
            .values()
            .filter(|s| s.status() == DraftStatus::InProgress && s.is_past_deadline(now))
            .map(|s| s.league.id)
            .collect())
    }
}

pub mod containers {
    use testcontainers::{ContainerAsync, runners::AsyncRunner};
    use testcontainers_modules::{postgres::Postgres, redis::Redis};
    use tokio::sync::OnceCell;

    static POSTGRES: OnceCell<(ContainerAsync<Postgres>, String)> = OnceCell::const_new();
    static REDIS: OnceCell<(ContainerAsync<Redis>, String)> = OnceCell::const_new();

    /// Connection URL of the shared PostgreSQL container
    pub async fn postgres_url() -> String {
        let (_, url) = POSTGRES
            .get_or_init(|| async {
                let container = Postgres::default()
                    .with_user("castaway")
                    .with_password("castaway_test")
                    .with_db_name("castaway_test")
                    .start()
                    .await
                    .expect("Failed to start PostgreSQL container");
                let host = container.get_host().await.unwrap();
                let port = container.get_host_port_ipv4(5432).await.unwrap();
                let url = format!("postgres://castaway:castaway_test@{}:{}/castaway_test", host, port);
                (container, url)
            })
            .await;
        url.clone()
    }

    /// Connection URL of the shared Redis container
    pub async fn redis_url() -> String {
        let (_, url) = REDIS
            .get_or_init(|| async {
                let container = Redis::default()
                    .start()
                    .await
                    .expect("Failed to start Redis container");
                let host = container.get_host().await.unwrap();
                let port = container.get_host_port_ipv4(6379).await.unwrap();
                (container, format!("redis://{}:{}", host, port))
            })
            .await;
        url.clone()
    }
}

/// Rows for Postgres-backed tests. Every call uses fresh names and a random
/// season so tests can share one database without cleanup.
pub mod seed {
    use sqlx::PgPool;
    use uuid::Uuid;

    use crate::{
        db::repositories::{CastawayRepository, LeagueRepository, UserRepository},
        models::{Castaway, League, User},
        utils::generate_invite_code,
    };

    /// Connect to the shared container and bring the schema up to date
    pub async fn pool() -> PgPool {
        let url = super::containers::postgres_url().await;
        let pool = PgPool::connect(&url)
            .await
            .expect("Failed to connect to test database");
        crate::db::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        pool
    }

    pub async fn player(pool: &PgPool) -> User {
        let tag = &Uuid::new_v4().simple().to_string()[..12];
        UserRepository::create_player(
            pool,
            &format!("p{}", tag),
            &format!("{}@example.com", tag),
            "not-a-real-hash",
            None,
        )
        .await
        .unwrap()
    }

    /// Pending league whose first user is the commissioner
    pub struct PendingLeague {
        pub league: League,
        pub users: Vec<User>,
        pub castaways: Vec<Castaway>,
    }

    pub async fn pending_league(pool: &PgPool, members: usize, quota: i32, names: &[&str]) -> PendingLeague {
        let season = rand::random_range(1_000..1_000_000);

        let mut users = Vec::with_capacity(members);
        for _ in 0..members {
            users.push(player(pool).await);
        }

        let league = LeagueRepository::create(
            pool,
            "Tribal Council",
            season,
            &users[0].id,
            &generate_invite_code(),
            quota,
        )
        .await
        .unwrap();
        for user in &users[1..] {
            LeagueRepository::add_member(pool, &league.id, &user.id)
                .await
                .unwrap();
        }

        let mut castaways = Vec::with_capacity(names.len());
        for name in names {
            castaways.push(CastawayRepository::create(pool, season, name, None).await.unwrap());
        }

        PendingLeague {
            league,
            users,
            castaways,
        }
    }
}

pub mod test_app {
    use std::{net::SocketAddr, sync::Arc};

    use axum::{Router, extract::connect_info::MockConnectInfo};
    use sqlx::PgPool;

    use crate::{
        config::{
            Config, DatabaseConfig, DraftConfig, JwtConfig, NotificationConfig, RedisConfig,
            ServerConfig,
        },
        db::PgDraftStore,
        notifications::{EventSink, LogNotificationSender, NotificationWorker},
        services::DraftService,
        state::AppState,
    };

    /// Full router over the Postgres and Redis containers
    pub async fn create_test_app() -> (Router, AppState) {
        let pool: PgPool = super::seed::pool().await;
        let redis_url = super::containers::redis_url().await;

        let redis_client = redis::Client::open(redis_url.as_str()).unwrap();
        let redis_conn = redis::aio::ConnectionManager::new(redis_client)
            .await
            .expect("Failed to connect to test Redis");

        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                rust_log: "info".to_string(),
                log_format: "pretty".to_string(),
            },
            database: DatabaseConfig {
                url: super::containers::postgres_url().await,
                max_connections: 5,
            },
            redis: RedisConfig { url: redis_url },
            jwt: JwtConfig {
                secret: "test_secret_key_for_testing_only".to_string(),
                expiry_hours: 1,
            },
            draft: DraftConfig {
                finalize_enabled: false,
                ..DraftConfig::default()
            },
            notifications: NotificationConfig { queue_capacity: 16 },
        };

        let (events, event_rx) = EventSink::channel(config.notifications.queue_capacity);
        tokio::spawn(NotificationWorker::new(event_rx, Arc::new(LogNotificationSender)).run());

        let draft_service = Arc::new(DraftService::new(
            Arc::new(PgDraftStore::new(pool.clone())),
            events,
            config.draft.clone(),
        ));
        let state = AppState::new(pool, redis_conn, draft_service, config);

        let app = crate::create_router(state.clone())
            .layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 40_000))));

        (app, state)
    }
}
