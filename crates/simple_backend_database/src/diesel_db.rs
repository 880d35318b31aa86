use std::{fmt, path::Path};

use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness};
use error_stack::{Result, ResultExt};
use simple_backend_config::{SimpleBackendConfig, file::SqliteDatabase};
use simple_backend_utils::{ContextExt, IntoReportFromString};
use tracing::{error, info};

pub type DieselConnection = diesel::SqliteConnection;
pub type DieselPool = deadpool::unmanaged::Pool<DieselConnection>;
pub type PoolObject = deadpool::unmanaged::Object<DieselConnection>;

/// Connection settings which every pooled connection gets.
const CONNECTION_PRAGMAS: &[&str] = &[
    "PRAGMA journal_mode=WAL;",
    "PRAGMA synchronous=NORMAL;",
    "PRAGMA foreign_keys=ON;",
    "PRAGMA busy_timeout=5000;",
];

mod sqlite_version {
    use diesel::define_sql_function;
    define_sql_function! { fn sqlite_version() -> Text }
}

#[derive(thiserror::Error, Debug)]
pub enum DieselDatabaseError {
    #[error("Connecting to SQLite database failed")]
    Connect,
    #[error("SQLite connection setup failed")]
    Setup,
    #[error("Executing SQL query failed")]
    Execute,
    #[error("Running diesel database migrations failed")]
    Migrate,

    #[error("Running an action failed")]
    RunAction,
    #[error("Add connection to pool failed")]
    AddConnection,
    #[error("Connection get failed from connection pool")]
    GetConnection,

    #[error("SQLite version query failed")]
    SqliteVersionQuery,

    #[error("Deserializing failed")]
    SerdeDeserialize,
}

/// Run blocking Diesel code on a pooled connection.
pub trait ObjectExtensions: Sized {
    fn interact<F: FnOnce(&mut SqliteConnection) -> R + Send + 'static, R: Send + 'static>(
        self,
        action: F,
    ) -> impl std::future::Future<Output = Result<R, DieselDatabaseError>> + Send;
}

impl ObjectExtensions for PoolObject {
    async fn interact<F: FnOnce(&mut SqliteConnection) -> R + Send + 'static, R: Send + 'static>(
        mut self,
        action: F,
    ) -> Result<R, DieselDatabaseError> {
        tokio::task::spawn_blocking(move || action(self.as_mut()))
            .await
            .change_context(DieselDatabaseError::RunAction)
    }
}

/// Database URL for Diesel. In RAM databases use shared cache, so
/// all connections in the process see the same data.
fn database_url(config: &SimpleBackendConfig, database: &SqliteDatabase, file: &Path) -> String {
    if config.sqlite_in_ram() {
        format!("file:{}?mode=memory&cache=shared", database.name)
    } else {
        file.to_string_lossy().to_string()
    }
}

fn setup_connection(conn: &mut SqliteConnection) -> Result<(), DieselDatabaseError> {
    for pragma in CONNECTION_PRAGMAS {
        diesel::sql_query(*pragma)
            .execute(conn)
            .change_context(DieselDatabaseError::Setup)?;
    }
    Ok(())
}

async fn open_pool(url: &str, size: usize) -> Result<DieselPool, DieselDatabaseError> {
    let pool = DieselPool::new(size);
    for _ in 0..size {
        let mut conn = SqliteConnection::establish(url).change_context(DieselDatabaseError::Connect)?;
        setup_connection(&mut conn)?;
        pool.add(conn)
            .await
            .map_err(|(_, e)| e)
            .change_context(DieselDatabaseError::AddConnection)?;
    }
    Ok(pool)
}

/// Closes pooled connections. Connections which are in use when
/// closing starts are waited.
pub struct PoolCloseHandle {
    pool: DieselPool,
    size: usize,
}

impl PoolCloseHandle {
    /// Call this before closing the server.
    pub async fn close(self) {
        for _ in 0..self.size {
            if self.pool.remove().await.is_err() {
                error!("Failed to remove connection from pool");
            }
        }
        self.pool.close()
    }
}

/// Pool with a single connection. Only this handle runs migrations.
#[derive(Clone)]
pub struct DieselWriteHandle {
    pool: DieselPool,
}

impl fmt::Debug for DieselWriteHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DieselWriteHandle").finish()
    }
}

impl DieselWriteHandle {
    pub async fn new(
        config: &SimpleBackendConfig,
        database: &SqliteDatabase,
        file: &Path,
        migrations: EmbeddedMigrations,
    ) -> Result<(Self, PoolCloseHandle), DieselDatabaseError> {
        let pool = open_pool(&database_url(config, database, file), 1).await?;

        let applied = pool
            .get()
            .await
            .change_context(DieselDatabaseError::GetConnection)?
            .interact(move |conn| {
                conn.run_pending_migrations(migrations)
                    .map(|versions| versions.len())
            })
            .await?
            .into_error_string(DieselDatabaseError::Migrate)?;
        if applied > 0 {
            info!("Database {}: {} migrations applied", database.name, applied);
        }

        let close = PoolCloseHandle {
            pool: pool.clone(),
            size: 1,
        };
        Ok((Self { pool }, close))
    }

    pub fn pool(&self) -> &DieselPool {
        &self.pool
    }

    pub async fn sqlite_version(&self) -> Result<String, DieselDatabaseError> {
        let versions: Vec<String> = self
            .pool
            .get()
            .await
            .change_context(DieselDatabaseError::GetConnection)?
            .interact(|conn| diesel::select(sqlite_version::sqlite_version()).load(conn))
            .await?
            .change_context(DieselDatabaseError::Execute)?;

        versions
            .into_iter()
            .next()
            .ok_or(DieselDatabaseError::SqliteVersionQuery.report())
    }

    /// Reads which must see the latest writes use the write connection.
    pub fn to_read_handle(&self) -> DieselReadHandle {
        DieselReadHandle {
            pool: self.pool.clone(),
        }
    }
}

/// Pool with a connection for each CPU.
#[derive(Clone)]
pub struct DieselReadHandle {
    pool: DieselPool,
}

impl fmt::Debug for DieselReadHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DieselReadHandle").finish()
    }
}

impl DieselReadHandle {
    pub async fn new(
        config: &SimpleBackendConfig,
        database: &SqliteDatabase,
        file: &Path,
    ) -> Result<(Self, PoolCloseHandle), DieselDatabaseError> {
        let size = num_cpus::get();
        let pool = open_pool(&database_url(config, database, file), size).await?;
        let close = PoolCloseHandle {
            pool: pool.clone(),
            size,
        };
        Ok((Self { pool }, close))
    }

    pub fn pool(&self) -> &DieselPool {
        &self.pool
    }
}
