use anyhow::Result;
use sea_orm::sea_query::{LockType, OnConflict};
use sea_orm::{
    ActiveValue::NotSet, ConnectionTrait, DatabaseConnection, EntityTrait, QuerySelect, Set,
    SqlxPostgresConnector, Statement,
};
use sqlx::postgres::PgPoolOptions;
use std::path::PathBuf;
use tokio::fs;
use uuid::Uuid;

use crate::entity::users::{ActiveModel as UserActive, Column as UserCol, Entity as Users};

pub type DbPool = sqlx::PgPool;
pub type OrmConn = DatabaseConnection;

/// Create the shared Postgres pool.
pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Wrap an existing pool in a SeaORM connection so both layers share connections.
pub fn orm_from_pool(pool: &DbPool) -> OrmConn {
    SqlxPostgresConnector::from_sqlx_postgres_pool(pool.clone())
}

/// Minimal migration runner that executes SQL files in `migrations/` in filename order.
///
/// Every statement in `migrations/` is idempotent, so this can run on a schema that
/// `sqlx::migrate!` already brought up to date.
pub async fn run_migrations(conn: &DatabaseConnection) -> Result<()> {
    let mut entries = fs::read_dir("migrations").await?;
    let mut files: Vec<PathBuf> = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "sql") {
            files.push(path);
        }
    }
    files.sort();

    let backend = conn.get_database_backend();
    for file in files {
        let sql = fs::read_to_string(&file).await?;
        // Postgres prepared statements cannot contain multiple commands,
        // so split the migration file and run each statement individually.
        for stmt in sql.split(';') {
            let stmt = strip_comments(stmt);
            if stmt.is_empty() {
                continue;
            }
            let statement = format!("{stmt};");
            conn.execute(Statement::from_string(backend, statement))
                .await?;
        }
    }

    tracing::info!("migrations applied");
    Ok(())
}

fn strip_comments(stmt: &str) -> String {
    stmt.lines()
        .filter(|line| !line.trim_start().starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Upsert the caller's shadow row and hold a row lock on it until the
/// surrounding transaction ends. All cart and order mutations for one user
/// go through this lock, so they run one at a time.
pub async fn lock_user<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> Result<(), sea_orm::DbErr> {
    Users::insert(UserActive {
        id: Set(user_id),
        created_at: NotSet,
    })
    .on_conflict(OnConflict::column(UserCol::Id).do_nothing().to_owned())
    .exec_without_returning(conn)
    .await?;

    Users::find_by_id(user_id)
        .lock(LockType::Update)
        .one(conn)
        .await?;
    Ok(())
}
