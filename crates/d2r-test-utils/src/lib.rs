//! Test harness for the d2r integration suites.
//!
//! One PostgreSQL server backs all tests in a binary; every test carves out
//! its own uniquely-named database inside it, so tests stay isolated while
//! paying the container startup cost once. Set `D2R_TEST_PG_URL` to an
//! existing server's root URL (no database path) to skip the container and
//! run against that server instead.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};
use testcontainers::ContainerAsync;
use testcontainers::ImageExt;
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;
use uuid::Uuid;

use d2r_db::pool;

static SERVER: OnceCell<PgServer> = OnceCell::const_new();

struct PgServer {
    root_url: String,
    // Dropping the container kills the server; hold it for the binary's
    // lifetime. `None` when `D2R_TEST_PG_URL` supplied the server.
    _container: Option<ContainerAsync<Postgres>>,
}

impl PgServer {
    async fn start() -> Self {
        if let Ok(url) = std::env::var("D2R_TEST_PG_URL") {
            return Self {
                root_url: url,
                _container: None,
            };
        }

        // The schema relies on NULLS NOT DISTINCT, so anything below
        // PostgreSQL 15 will not do.
        let container = Postgres::default()
            .with_tag("17")
            .start()
            .await
            .expect("failed to start PostgreSQL container");
        let host = container.get_host().await.expect("container has no host");
        let port = container
            .get_host_port_ipv4(5432)
            .await
            .expect("container exposes no port 5432");

        Self {
            root_url: format!("postgresql://postgres:postgres@{host}:{port}"),
            _container: Some(container),
        }
    }

    async fn maintenance_pool(&self) -> PgPool {
        PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&format!("{}/postgres", self.root_url))
            .await
            .expect("failed to connect to maintenance database")
    }
}

/// One test's private database, migrated and ready.
///
/// Call [`TestDb::teardown`] at the end of the test; a leaked database only
/// costs disk in the throwaway container, so panicking tests need no
/// special handling.
pub struct TestDb {
    pub pool: PgPool,
    name: String,
}

impl TestDb {
    /// Create a fresh database on the shared server and apply migrations.
    pub async fn new() -> Self {
        let server = SERVER.get_or_init(PgServer::start).await;
        let name = format!("d2r_test_{}", Uuid::new_v4().simple());

        let maint = server.maintenance_pool().await;
        maint
            .execute(format!("CREATE DATABASE {name}").as_str())
            .await
            .unwrap_or_else(|e| panic!("failed to create test database {name}: {e}"));
        maint.close().await;

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&format!("{}/{name}", server.root_url))
            .await
            .unwrap_or_else(|e| panic!("failed to connect to test database {name}: {e}"));

        pool::run_migrations(&pool)
            .await
            .expect("migrations should apply to an empty test database");

        Self { pool, name }
    }

    /// Close the pool and drop the database.
    pub async fn teardown(self) {
        self.pool.close().await;

        let server = SERVER.get_or_init(PgServer::start).await;
        let maint = server.maintenance_pool().await;

        // Evict any connection a failed test body left behind.
        let _ = maint
            .execute(
                format!(
                    "SELECT pg_terminate_backend(pid) FROM pg_stat_activity \
                     WHERE datname = '{}' AND pid <> pg_backend_pid()",
                    self.name
                )
                .as_str(),
            )
            .await;
        let _ = maint
            .execute(format!("DROP DATABASE IF EXISTS {}", self.name).as_str())
            .await;
        maint.close().await;
    }
}
