use rusqlite::{Connection, OptionalExtension, Row, params};

use nagari_core::ids::{FAQ_PREFIX, generate_id, now_iso};
use nagari_core::{Faq, FaqCreateParams, FaqUpdateParams, Visibility};

use super::{Changes, Repository, blank_to_none};
use crate::errors::Result;

impl Repository {
    /// FAQ entries visible under `visibility`, by `order` then newest first.
    pub fn list_faqs(
        conn: &Connection,
        visibility: Visibility,
        category: Option<&str>,
    ) -> Result<Vec<Faq>> {
        let published_only = visibility == Visibility::Public;
        let mut stmt = conn.prepare(
            "SELECT * FROM faqs
             WHERE (?1 = 0 OR published = 1)
               AND (?2 IS NULL OR category = ?2)
             ORDER BY sort_order ASC, created_at DESC, id DESC",
        )?;
        let rows = stmt.query_map(params![published_only, category], faq_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Get an FAQ entry by ID.
    pub fn get_faq(conn: &Connection, id: &str) -> Result<Option<Faq>> {
        let faq = conn
            .query_row("SELECT * FROM faqs WHERE id = ?1", params![id], faq_from_row)
            .optional()?;
        Ok(faq)
    }

    /// Insert an FAQ entry. Order defaults to 0, visibility to published.
    pub fn create_faq(conn: &Connection, params: &FaqCreateParams) -> Result<Faq> {
        let now = now_iso();
        let faq = Faq {
            id: generate_id(FAQ_PREFIX),
            question: params.question.trim().to_string(),
            answer: params.answer.trim().to_string(),
            category: blank_to_none(params.category.as_deref()),
            order: params.order.unwrap_or(0),
            published: params.published.unwrap_or(true),
            created_at: now.clone(),
            updated_at: now,
        };

        let _ = conn.execute(
            "INSERT INTO faqs (id, question, answer, category, sort_order, published,
             created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                faq.id,
                faq.question,
                faq.answer,
                faq.category,
                faq.order,
                faq.published,
                faq.created_at,
                faq.updated_at,
            ],
        )?;
        Ok(faq)
    }

    /// Update an FAQ entry. Returns `None` if not found.
    pub fn update_faq(conn: &Connection, id: &str, updates: &FaqUpdateParams) -> Result<Option<Faq>> {
        let mut changes = Changes::new();
        changes.set("question", updates.question.as_deref().map(str::trim).map(String::from));
        changes.set("answer", updates.answer.as_deref().map(str::trim).map(String::from));
        changes.set_nullable("category", updates.category.as_ref());
        changes.set("sort_order", updates.order);
        changes.set("published", updates.published);

        if !changes.apply(conn, "faqs", id)? {
            return Ok(None);
        }
        Self::get_faq(conn, id)
    }

    /// Delete an FAQ entry. Returns true if a row was deleted.
    pub fn delete_faq(conn: &Connection, id: &str) -> Result<bool> {
        let changed = conn.execute("DELETE FROM faqs WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }
}

fn faq_from_row(row: &Row<'_>) -> rusqlite::Result<Faq> {
    Ok(Faq {
        id: row.get("id")?,
        question: row.get("question")?,
        answer: row.get("answer")?,
        category: row.get("category")?,
        order: row.get("sort_order")?,
        published: row.get("published")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::setup_db;

    fn create(conn: &Connection, question: &str, order: Option<i64>, published: Option<bool>) -> Faq {
        Repository::create_faq(
            conn,
            &FaqCreateParams {
                question: question.into(),
                answer: "Jawaban".into(),
                category: Some("pelayanan".into()),
                order,
                published,
            },
        )
        .unwrap()
    }

    #[test]
    fn defaults_applied() {
        let conn = setup_db();
        let faq = create(&conn, "Jam buka?", None, None);
        assert!(faq.id.starts_with("faq-"));
        assert_eq!(faq.order, 0);
        assert!(faq.published);
    }

    #[test]
    fn ordered_by_order_then_newest() {
        let conn = setup_db();
        let _ = create(&conn, "third", Some(2), None);
        let older = create(&conn, "older", Some(1), None);
        conn.execute(
            "UPDATE faqs SET created_at = '2020-01-01T00:00:00Z' WHERE id = ?1",
            params![older.id],
        )
        .unwrap();
        let newer = create(&conn, "newer", Some(1), None);
        let list = Repository::list_faqs(&conn, Visibility::All, None).unwrap();
        let ids: Vec<&str> = list.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids[0], newer.id);
        assert_eq!(ids[1], older.id);
        assert_eq!(list[2].question, "third");
    }

    #[test]
    fn public_visibility_hides_unpublished() {
        let conn = setup_db();
        let _ = create(&conn, "shown", None, None);
        let _ = create(&conn, "hidden", None, Some(false));
        let public = Repository::list_faqs(&conn, Visibility::Public, None).unwrap();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].question, "shown");
        assert_eq!(Repository::list_faqs(&conn, Visibility::All, None).unwrap().len(), 2);
    }

    #[test]
    fn category_filter() {
        let conn = setup_db();
        let _ = create(&conn, "a", None, None);
        assert_eq!(
            Repository::list_faqs(&conn, Visibility::Public, Some("pelayanan"))
                .unwrap()
                .len(),
            1
        );
        assert!(Repository::list_faqs(&conn, Visibility::Public, Some("umum"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn update_and_delete() {
        let conn = setup_db();
        let faq = create(&conn, "a", None, None);
        let updated = Repository::update_faq(
            &conn,
            &faq.id,
            &FaqUpdateParams {
                published: Some(false),
                order: Some(5),
                ..Default::default()
            },
        )
        .unwrap()
        .unwrap();
        assert!(!updated.published);
        assert_eq!(updated.order, 5);
        assert!(Repository::delete_faq(&conn, &faq.id).unwrap());
    }
}
