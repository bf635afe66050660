//! Application state and composition.

use std::sync::Arc;

use gangnpc_domain::FactionCatalog;

use crate::infrastructure::{
    clock::{SystemClock, SystemRandom},
    ports::{AdvancedGroupRepo, ClockPort, NpcRepo, RandomPort},
    sqlite::{SqliteAdvancedGroupRepo, SqliteDatabase, SqliteNpcRepo},
};
use crate::use_cases;

/// Main application state.
///
/// Immutable once built; shared with HTTP handlers via Axum state.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
    pub catalog: Arc<FactionCatalog>,
}

/// Repository ports, injected directly.
pub struct Repositories {
    pub npc: Arc<dyn NpcRepo>,
    pub advanced_group: Arc<dyn AdvancedGroupRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub npc: use_cases::NpcUseCases,
    pub command: use_cases::CommandUseCases,
    pub advanced_group: Arc<use_cases::AdvancedGroupOps>,
    pub stats: Arc<use_cases::StatsOps>,
}

impl App {
    /// Wire the application over SQLite storage with the system clock and RNG.
    pub fn new(db: &SqliteDatabase, catalog: FactionCatalog) -> Self {
        let repositories = Repositories {
            npc: Arc::new(SqliteNpcRepo::new(db.pool().clone())),
            advanced_group: Arc::new(SqliteAdvancedGroupRepo::new(db.pool().clone())),
        };
        Self::with_ports(
            repositories,
            catalog,
            Arc::new(SystemClock::new()),
            Arc::new(SystemRandom::new()),
        )
    }

    /// Wire the application over arbitrary port implementations.
    pub fn with_ports(
        repositories: Repositories,
        catalog: FactionCatalog,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        let catalog = Arc::new(catalog);
        let npc_repo = repositories.npc.clone();
        let group_repo = repositories.advanced_group.clone();

        let npc = use_cases::NpcUseCases::new(
            Arc::new(use_cases::npc::SpawnNpcs::new(
                npc_repo.clone(),
                group_repo.clone(),
                catalog.clone(),
                clock.clone(),
                random,
            )),
            Arc::new(use_cases::npc::NpcOps::new(
                npc_repo.clone(),
                group_repo.clone(),
                catalog.clone(),
                clock.clone(),
            )),
        );

        let command = use_cases::CommandUseCases::new(
            Arc::new(use_cases::command::CommandNpc::new(
                npc_repo.clone(),
                group_repo.clone(),
                clock.clone(),
            )),
            Arc::new(use_cases::command::CommandGroup::new(
                npc_repo.clone(),
                group_repo.clone(),
                clock.clone(),
            )),
            Arc::new(use_cases::command::ActorAccess::new(
                npc_repo.clone(),
                group_repo.clone(),
            )),
        );

        let advanced_group = Arc::new(use_cases::AdvancedGroupOps::new(
            group_repo.clone(),
            npc_repo.clone(),
            clock,
        ));
        let stats = Arc::new(use_cases::StatsOps::new(npc_repo, group_repo));

        Self {
            repositories,
            use_cases: UseCases {
                npc,
                command,
                advanced_group,
                stats,
            },
            catalog,
        }
    }
}
