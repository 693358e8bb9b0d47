//! Row-level SQL for shopping lists and items.
//!
//! # Responsibility
//! - Keep every statement against `shopping_lists` / `items` in one place.
//! - Parse rows strictly, rejecting values that break domain invariants.
//!
//! # Invariants
//! - Lists are returned ordered by `name ASC, id ASC`.
//! - Items are returned ordered by `id ASC`.
//! - An entity id of `0` maps to `NULL` on insert so SQLite assigns one.

use crate::model::shopping::EntityId;
use crate::repo::{RepoError, RepoResult};
use crate::store::entity::{ItemEntity, ShoppingListEntity};
use rusqlite::{params, Connection, Row};

const LIST_SELECT_SQL: &str = "SELECT id, name FROM shopping_lists";
const ITEM_SELECT_SQL: &str = "SELECT id, listId, name, isChecked FROM items";

/// Loads all lists ordered by name.
pub fn select_shopping_lists(conn: &Connection) -> RepoResult<Vec<ShoppingListEntity>> {
    let mut stmt = conn.prepare(&format!("{LIST_SELECT_SQL} ORDER BY name ASC, id ASC;"))?;
    let mut rows = stmt.query([])?;
    let mut lists = Vec::new();
    while let Some(row) = rows.next()? {
        lists.push(parse_list_row(row)?);
    }
    Ok(lists)
}

/// Loads one list row, or `None` when it does not exist.
pub fn select_shopping_list_by_id(
    conn: &Connection,
    list_id: EntityId,
) -> RepoResult<Option<ShoppingListEntity>> {
    let mut stmt = conn.prepare(&format!("{LIST_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([list_id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_list_row(row)?));
    }
    Ok(None)
}

/// Loads the items of one list ordered by id.
pub fn select_items_for_list(conn: &Connection, list_id: EntityId) -> RepoResult<Vec<ItemEntity>> {
    let mut stmt = conn.prepare(&format!("{ITEM_SELECT_SQL} WHERE listId = ?1 ORDER BY id ASC;"))?;
    let mut rows = stmt.query([list_id])?;
    let mut items = Vec::new();
    while let Some(row) = rows.next()? {
        items.push(parse_item_row(row)?);
    }
    Ok(items)
}

/// Loads one item row, or `None` when it does not exist.
pub fn select_item_by_id(conn: &Connection, item_id: EntityId) -> RepoResult<Option<ItemEntity>> {
    let mut stmt = conn.prepare(&format!("{ITEM_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([item_id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_item_row(row)?));
    }
    Ok(None)
}

/// Inserts a new list and returns its assigned id.
///
/// A non-zero `id` that already exists fails with a constraint error; lists
/// are never replaced in place because that would cascade-delete their items.
pub fn insert_shopping_list(conn: &Connection, list: &ShoppingListEntity) -> RepoResult<EntityId> {
    conn.execute(
        "INSERT INTO shopping_lists (id, name) VALUES (NULLIF(?1, 0), ?2);",
        params![list.id, list.name.as_str()],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Inserts a new item or overwrites the row with the same id.
pub fn upsert_item(conn: &Connection, item: &ItemEntity) -> RepoResult<EntityId> {
    conn.execute(
        "INSERT INTO items (id, listId, name, isChecked)
         VALUES (NULLIF(?1, 0), ?2, ?3, ?4)
         ON CONFLICT(id) DO UPDATE SET
            listId = excluded.listId,
            name = excluded.name,
            isChecked = excluded.isChecked;",
        params![
            item.id,
            item.list_id,
            item.name.as_str(),
            bool_to_int(item.is_checked),
        ],
    )?;

    if item.id > 0 {
        return Ok(item.id);
    }
    Ok(conn.last_insert_rowid())
}

/// Deletes one item; returns the number of removed rows.
pub fn delete_item_by_id(conn: &Connection, item_id: EntityId) -> RepoResult<usize> {
    Ok(conn.execute("DELETE FROM items WHERE id = ?1;", [item_id])?)
}

/// Deletes one list (items follow via `ON DELETE CASCADE`).
pub fn delete_shopping_list_by_id(conn: &Connection, list_id: EntityId) -> RepoResult<usize> {
    Ok(conn.execute("DELETE FROM shopping_lists WHERE id = ?1;", [list_id])?)
}

fn parse_list_row(row: &Row<'_>) -> RepoResult<ShoppingListEntity> {
    Ok(ShoppingListEntity {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<ItemEntity> {
    Ok(ItemEntity {
        id: row.get("id")?,
        list_id: row.get("listId")?,
        name: row.get("name")?,
        is_checked: int_to_bool(row.get("isChecked")?, "items.isChecked")?,
    })
}

fn int_to_bool(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
