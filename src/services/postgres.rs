use sqlx::postgres::{PgArguments, PgPoolOptions, PgRow};
use sqlx::query::Query;
use sqlx::{PgPool, Postgres, Row};
use std::time::Duration;
use thiserror::Error;

use crate::models::{CandidateQuery, Gender, LookingFor, UserProfile, UserType};

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

const PROFILE_COLUMNS: &str = r#"
    id, display_name, user_type, gender, looking_for, age, location, bio,
    photo_urls, is_active, created_at
"#;

// Categorical columns hold canonical tags only (see the normalize migration),
// so plain equality lines up with the in-memory parser.
const EXPLORE_FILTER: &str = r#"
    is_active = TRUE
    AND id <> $1
    AND (gender = ANY($2::TEXT[]) OR ($3 AND gender IS NULL))
    AND ($4::TEXT[] IS NULL OR user_type = ANY($4::TEXT[]) OR ($5 AND user_type IS NULL))
    AND ($6::SMALLINT IS NULL OR age >= $6)
    AND ($7::SMALLINT IS NULL OR age <= $7)
    AND ($8::TEXT IS NULL OR strpos(lower(location), $8) > 0)
"#;

/// Bind `$1..$8` of `EXPLORE_FILTER`
fn bind_candidate_filter<'q>(
    sql: Query<'q, Postgres, PgArguments>,
    query: &CandidateQuery,
) -> Query<'q, Postgres, PgArguments> {
    let genders: Vec<String> = query
        .genders
        .iter()
        .filter_map(|g| g.as_str())
        .map(str::to_string)
        .collect();
    let allow_unset_gender = query.genders.contains(&Gender::Unspecified);

    let (user_types, allow_unset_type) = match &query.user_types {
        Some(types) => (
            Some(types.iter().filter_map(|t| t.as_str()).map(str::to_string).collect::<Vec<String>>()),
            types.contains(&UserType::Unspecified),
        ),
        None => (None, false),
    };

    sql.bind(query.exclude_id.clone())
        .bind(genders)
        .bind(allow_unset_gender)
        .bind(user_types)
        .bind(allow_unset_type)
        .bind(query.min_age.map(i16::from))
        .bind(query.max_age.map(i16::from))
        .bind(query.location.clone())
}

/// PostgreSQL client for the `profiles` table
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Fetch a single profile, active or not
    pub async fn get_profile(&self, id: &str) -> Result<Option<UserProfile>, PostgresError> {
        let query = format!("SELECT {} FROM profiles WHERE id = $1", PROFILE_COLUMNS);

        let row = sqlx::query(&query).bind(id).fetch_optional(&self.pool).await?;

        Ok(row.as_ref().map(profile_from_row))
    }

    /// One explore page plus the number of matching profiles
    ///
    /// The viewer's side of the visibility rule and the search form are both
    /// part of the `WHERE` clause, so `total` counts every visible profile.
    pub async fn explore_page(
        &self,
        query: &CandidateQuery,
    ) -> Result<(Vec<UserProfile>, usize), PostgresError> {
        let count_sql = format!("SELECT COUNT(*) FROM profiles WHERE {}", EXPLORE_FILTER);
        let total: i64 = bind_candidate_filter(sqlx::query(&count_sql), query)
            .fetch_one(&self.pool)
            .await?
            .get(0);

        let page_sql = format!(
            r#"
            SELECT {}
            FROM profiles
            WHERE {}
            ORDER BY created_at DESC NULLS LAST, id COLLATE "C"
            LIMIT $9 OFFSET $10
            "#,
            PROFILE_COLUMNS, EXPLORE_FILTER
        );

        let rows = bind_candidate_filter(sqlx::query(&page_sql), query)
            .bind(query.limit as i64)
            .bind(query.offset as i64)
            .fetch_all(&self.pool)
            .await?;

        let profiles: Vec<UserProfile> = rows.iter().map(profile_from_row).collect();

        tracing::debug!(
            "Explore page for {}: {} of {} (offset {})",
            query.exclude_id,
            profiles.len(),
            total,
            query.offset
        );

        Ok((profiles, total.max(0) as usize))
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

/// Map a row to a profile. Categorical columns are free text and go through
/// the same lenient parsing as JSON input.
fn profile_from_row(row: &PgRow) -> UserProfile {
    let user_type: Option<String> = row.get("user_type");
    let gender: Option<String> = row.get("gender");
    let looking_for: Option<String> = row.get("looking_for");
    let age: Option<i16> = row.get("age");

    UserProfile {
        id: row.get("id"),
        display_name: row.get("display_name"),
        user_type: UserType::from(user_type),
        gender: Gender::from(gender),
        looking_for: LookingFor::from(looking_for),
        age: age.and_then(|a| u8::try_from(a).ok()),
        location: row.get("location"),
        bio: row.get("bio"),
        photo_urls: row.get("photo_urls"),
        is_active: row.get("is_active"),
        created_at: row.get("created_at"),
    }
}
