use std::sync::Arc;

use crate::domain::entities::PlatformStats;
use crate::domain::repository::StatsRepository;
use crate::error::WalletResult;

pub struct AdminStatsUseCase<R: StatsRepository> {
    repo: Arc<R>,
}

impl<R: StatsRepository> AdminStatsUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> WalletResult<PlatformStats> {
        self.repo.platform_stats().await
    }
}
