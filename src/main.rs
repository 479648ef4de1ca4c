// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use relationrs::config::settings::Settings;
use relationrs::domain::services::relation_service::{RelationService, ServiceOptions};
use relationrs::infrastructure::cache::{self, entity_cache::CachePolicy};
use relationrs::infrastructure::database::connection;
use relationrs::infrastructure::metrics;
use relationrs::infrastructure::repositories::follower_repo_impl::FollowerRepositoryImpl;
use relationrs::infrastructure::repositories::following_repo_impl::FollowingRepositoryImpl;
use relationrs::presentation::routes;
use relationrs::utils::telemetry;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting relationrs...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    if settings.metrics.enabled {
        metrics::init_metrics(&settings.metrics.listen_addr)?;
    }

    // 3. Connect to database
    let db = Arc::new(connection::create_pool(&settings.database).await?);
    info!("Database connection established");

    if settings.database.run_migrations {
        connection::migrate(db.as_ref()).await?;
    }

    // 4. Cache backend
    let backend = cache::build_backend(&settings).await?;
    let policy = CachePolicy::from(&settings.cache);
    info!(backend = ?settings.cache.backend, "Cache backend initialized");

    // 5. Repositories and service
    let following = Arc::new(FollowingRepositoryImpl::new(
        db.clone(),
        backend.clone(),
        policy,
    ));
    let follower = Arc::new(FollowerRepositoryImpl::new(db.clone(), backend, policy));
    let service = Arc::new(RelationService::new(
        db,
        following,
        follower,
        ServiceOptions::from(&settings),
    ));

    // 6. Start HTTP server
    let app = routes::routes(service);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
