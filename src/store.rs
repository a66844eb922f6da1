//! Persistence for albums.
//!
//! The store owns every read and write against the `albums` collection. Rows carry the
//! internal `_id` and `__v` columns; callers only ever get [`Album`] values back.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::schema::{format_date, Album, AlbumDraft, AlbumFields, ValidationErrors};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no album with id {id}")]
    NotFound { id: String },
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, sqlx::FromRow)]
struct AlbumRow {
    #[sqlx(rename = "_id")]
    object_id: String,
    #[sqlx(rename = "__v")]
    revision: i64,
    title: String,
    artist: String,
    image_url: Option<String>,
    release_date: Option<String>,
}

impl TryFrom<AlbumRow> for Album {
    type Error = StoreError;

    fn try_from(row: AlbumRow) -> Result<Self, Self::Error> {
        let object_id =
            Uuid::parse_str(&row.object_id).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        let release_date = row
            .release_date
            .as_deref()
            .map(DateTime::parse_from_rfc3339)
            .transpose()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?
            .map(|dt| dt.with_timezone(&Utc));
        Ok(Album {
            object_id,
            revision: row.revision,
            title: row.title,
            artist: row.artist,
            image_url: row.image_url,
            release_date,
        })
    }
}

/// Album collection backed by SQLite.
#[derive(Clone)]
pub struct AlbumStore {
    pool: SqlitePool,
}

impl AlbumStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Round-trips a trivial query; used by the readiness probe.
    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Validates `fields` and inserts a new album with a fresh `_id` and `__v = 0`.
    pub async fn create(&self, fields: AlbumFields) -> Result<Album, StoreError> {
        let valid = AlbumDraft::default().apply(fields).validate()?;
        let album = Album {
            object_id: Uuid::new_v4(),
            revision: 0,
            title: valid.title,
            artist: valid.artist,
            image_url: valid.image_url,
            release_date: valid.release_date,
        };

        sqlx::query(
            r#"INSERT INTO albums (_id, __v, title, artist, image_url, release_date)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6)"#,
        )
        .bind(album.id())
        .bind(album.revision)
        .bind(&album.title)
        .bind(&album.artist)
        .bind(album.image_url.as_deref())
        .bind(album.release_date.map(format_date))
        .execute(&self.pool)
        .await?;

        Ok(album)
    }

    /// All albums in insertion order.
    pub async fn list(&self) -> Result<Vec<Album>, StoreError> {
        let rows: Vec<AlbumRow> = sqlx::query_as(
            r#"SELECT _id, __v, title, artist, image_url, release_date
               FROM albums ORDER BY rowid"#,
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Album::try_from).collect()
    }

    /// Looks an album up by its public id. Hex digits match in either case.
    pub async fn find_by_id(&self, id: &str) -> Result<Album, StoreError> {
        let row: Option<AlbumRow> = sqlx::query_as(
            r#"SELECT _id, __v, title, artist, image_url, release_date
               FROM albums WHERE _id = ?1"#,
        )
        .bind(id.to_ascii_lowercase())
        .fetch_optional(&self.pool)
        .await?;
        match row {
            Some(row) => Album::try_from(row),
            None => Err(StoreError::NotFound { id: id.to_string() }),
        }
    }

    /// Applies the present `fields` onto `album`, validates the merge and persists it.
    ///
    /// No revision check is made: a concurrent writer between resolve and update loses.
    pub async fn update(&self, album: &Album, fields: AlbumFields) -> Result<Album, StoreError> {
        let valid = AlbumDraft::from(album).apply(fields).validate()?;

        let row: Option<AlbumRow> = sqlx::query_as(
            r#"UPDATE albums
               SET __v = __v + 1, title = ?1, artist = ?2, image_url = ?3, release_date = ?4
               WHERE _id = ?5
               RETURNING _id, __v, title, artist, image_url, release_date"#,
        )
        .bind(&valid.title)
        .bind(&valid.artist)
        .bind(valid.image_url.as_deref())
        .bind(valid.release_date.map(format_date))
        .bind(album.id())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Album::try_from(row),
            // removed between resolve and write
            None => Err(StoreError::NotFound { id: album.id() }),
        }
    }

    pub async fn remove(&self, album: &Album) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM albums WHERE _id = ?1")
            .bind(album.id())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
