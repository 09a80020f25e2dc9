use rusqlite::{Connection, OptionalExtension, Row, params};

use nagari_core::ids::{NEWS_PREFIX, generate_id, now_iso};
use nagari_core::{News, NewsCreateParams, NewsUpdateParams, Visibility};

use super::{Changes, Repository, blank_to_none};
use crate::errors::Result;

/// Author recorded when none is given.
pub const DEFAULT_AUTHOR: &str = "Admin Nagari";

const EXCERPT_CHARS: usize = 200;

/// Teaser derived from the article body: the first 200 characters plus `...`.
pub fn derive_excerpt(content: &str) -> String {
    let head: String = content.chars().take(EXCERPT_CHARS).collect();
    format!("{head}...")
}

fn visibility_clause(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Public => "published = 1",
        Visibility::All => "1 = 1",
    }
}

impl Repository {
    /// News articles visible under `visibility`, newest first.
    pub fn list_news(conn: &Connection, visibility: Visibility) -> Result<Vec<News>> {
        let sql = format!(
            "SELECT * FROM news WHERE {} ORDER BY created_at DESC, id DESC",
            visibility_clause(visibility)
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], news_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Get a news article by ID, if visible under `visibility`.
    pub fn get_news(conn: &Connection, id: &str, visibility: Visibility) -> Result<Option<News>> {
        let sql = format!(
            "SELECT * FROM news WHERE id = ?1 AND {}",
            visibility_clause(visibility)
        );
        let news = conn
            .query_row(&sql, params![id], news_from_row)
            .optional()?;
        Ok(news)
    }

    /// Insert a news article.
    ///
    /// The excerpt is derived from the body when absent, the author defaults
    /// to [`DEFAULT_AUTHOR`], and the article is published immediately unless
    /// `published` is `false`.
    pub fn create_news(conn: &Connection, params: &NewsCreateParams) -> Result<News> {
        let now = now_iso();
        let published = params.published.unwrap_or(true);
        let news = News {
            id: generate_id(NEWS_PREFIX),
            title: params.title.trim().to_string(),
            excerpt: blank_to_none(params.excerpt.as_deref())
                .unwrap_or_else(|| derive_excerpt(&params.content)),
            content: params.content.clone(),
            cover_image: blank_to_none(params.cover_image.as_deref()),
            tags: blank_to_none(params.tags.as_deref()),
            author: blank_to_none(params.author.as_deref())
                .unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            published,
            published_at: published.then(|| now.clone()),
            created_at: now.clone(),
            updated_at: now,
        };

        let _ = conn.execute(
            "INSERT INTO news (id, title, content, excerpt, cover_image, tags, author,
             published, published_at, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                news.id,
                news.title,
                news.content,
                news.excerpt,
                news.cover_image,
                news.tags,
                news.author,
                news.published,
                news.published_at,
                news.created_at,
                news.updated_at,
            ],
        )?;
        Ok(news)
    }

    /// Update a news article. Returns `None` if not found.
    ///
    /// Setting `published` to `true` stamps `published_at` with the current
    /// time; setting it to `false` clears it.
    pub fn update_news(
        conn: &Connection,
        id: &str,
        updates: &NewsUpdateParams,
    ) -> Result<Option<News>> {
        let mut changes = Changes::new();
        changes.set("title", updates.title.as_deref().map(str::trim).map(String::from));
        changes.set("content", updates.content.clone());
        changes.set("excerpt", updates.excerpt.clone());
        changes.set_nullable("cover_image", updates.cover_image.as_ref());
        changes.set_nullable("tags", updates.tags.as_ref());
        changes.set("author", updates.author.clone());
        if let Some(published) = updates.published {
            changes.always("published", published);
            changes.always("published_at", published.then(now_iso));
        }

        if !changes.apply(conn, "news", id)? {
            return Ok(None);
        }
        Self::get_news(conn, id, Visibility::All)
    }

    /// Delete a news article. Returns true if a row was deleted.
    pub fn delete_news(conn: &Connection, id: &str) -> Result<bool> {
        let changed = conn.execute("DELETE FROM news WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }
}

fn news_from_row(row: &Row<'_>) -> rusqlite::Result<News> {
    Ok(News {
        id: row.get("id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        excerpt: row.get("excerpt")?,
        cover_image: row.get("cover_image")?,
        tags: row.get("tags")?,
        author: row.get("author")?,
        published: row.get("published")?,
        published_at: row.get("published_at")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
