use rusqlite::{Connection, OptionalExtension, Row, params};
use rusqlite::types::ToSql;

use nagari_core::ids::{STATISTIC_PREFIX, generate_id, now_iso};
use nagari_core::{JorongStatistic, StatisticCreateParams, StatisticFilter, StatisticUpdateParams};

use super::{Changes, Repository};
use crate::errors::{Result, StoreError};

const SELECT_STATISTICS: &str = "SELECT s.*, j.name AS jorong_name
     FROM jorong_statistics s
     JOIN jorongs j ON j.id = s.jorong_id";

impl Repository {
    /// Statistics records, newest year first, then by jorong name.
    pub fn list_statistics(
        conn: &Connection,
        filter: &StatisticFilter,
    ) -> Result<Vec<JorongStatistic>> {
        let mut conditions: Vec<&str> = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(year) = filter.year {
            conditions.push("s.year = ?");
            values.push(Box::new(year));
        }
        if let Some(ref jorong_id) = filter.jorong_id {
            conditions.push("s.jorong_id = ?");
            values.push(Box::new(jorong_id.clone()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };
        let sql = format!("{SELECT_STATISTICS}{where_clause} ORDER BY s.year DESC, j.name ASC, s.id ASC");

        let params: Vec<&dyn ToSql> = values.iter().map(AsRef::as_ref).collect();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params.as_slice(), statistic_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Get a statistics record by ID.
    pub fn get_statistic(conn: &Connection, id: &str) -> Result<Option<JorongStatistic>> {
        let record = conn
            .query_row(
                &format!("{SELECT_STATISTICS} WHERE s.id = ?1"),
                params![id],
                statistic_from_row,
            )
            .optional()?;
        Ok(record)
    }

    /// The record for a `(jorong, year)` pair, if any.
    pub fn find_statistic(
        conn: &Connection,
        jorong_id: &str,
        year: i32,
    ) -> Result<Option<JorongStatistic>> {
        let record = conn
            .query_row(
                &format!("{SELECT_STATISTICS} WHERE s.jorong_id = ?1 AND s.year = ?2"),
                params![jorong_id, year],
                statistic_from_row,
            )
            .optional()?;
        Ok(record)
    }

    /// Insert a statistics record. Optional counts default to 0.
    pub fn create_statistic(
        conn: &Connection,
        params: &StatisticCreateParams,
    ) -> Result<JorongStatistic> {
        let id = generate_id(STATISTIC_PREFIX);
        let now = now_iso();
        let _ = conn.execute(
            "INSERT INTO jorong_statistics (id, jorong_id, year, population, male_count,
             female_count, child_count, adult_count, elderly_count, households,
             created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)",
            params![
                id,
                params.jorong_id,
                params.year,
                params.population,
                params.male_count,
                params.female_count,
                params.child_count.unwrap_or(0),
                params.adult_count.unwrap_or(0),
                params.elderly_count.unwrap_or(0),
                params.households.unwrap_or(0),
                now,
            ],
        )?;

        Self::get_statistic(conn, &id)?
            .ok_or_else(|| StoreError::not_found("Statistic", &id))
    }

    /// Update a statistics record. Returns `None` if not found.
    pub fn update_statistic(
        conn: &Connection,
        id: &str,
        updates: &StatisticUpdateParams,
    ) -> Result<Option<JorongStatistic>> {
        let mut changes = Changes::new();
        changes.set("jorong_id", updates.jorong_id.clone());
        changes.set("year", updates.year);
        changes.set("population", updates.population);
        changes.set("male_count", updates.male_count);
        changes.set("female_count", updates.female_count);
        changes.set("child_count", updates.child_count);
        changes.set("adult_count", updates.adult_count);
        changes.set("elderly_count", updates.elderly_count);
        changes.set("households", updates.households);

        if !changes.apply(conn, "jorong_statistics", id)? {
            return Ok(None);
        }
        Self::get_statistic(conn, id)
    }

    /// Delete a statistics record. Returns true if a row was deleted.
    pub fn delete_statistic(conn: &Connection, id: &str) -> Result<bool> {
        let changed = conn.execute("DELETE FROM jorong_statistics WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }
}

fn statistic_from_row(row: &Row<'_>) -> rusqlite::Result<JorongStatistic> {
    Ok(JorongStatistic {
        id: row.get("id")?,
        jorong_id: row.get("jorong_id")?,
        jorong_name: row.get("jorong_name")?,
        year: row.get("year")?,
        population: row.get("population")?,
        male_count: row.get("male_count")?,
        female_count: row.get("female_count")?,
        child_count: row.get("child_count")?,
        adult_count: row.get("adult_count")?,
        elderly_count: row.get("elderly_count")?,
        households: row.get("households")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
