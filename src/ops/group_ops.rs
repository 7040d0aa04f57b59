use rusqlite::Connection;
use tracing::info;

use crate::db::group_repo;
use crate::error::{SantaError, SantaResult};
use crate::model::{Group, Id, DEFAULT_ADMIN};
use crate::validation;

pub fn create_group(conn: &Connection, name: &str, admin_id: Option<&str>) -> SantaResult<Group> {
    let valid_name = validation::non_blank(name, "group name")?;
    let admin = admin_id
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .unwrap_or(DEFAULT_ADMIN);

    let group = Group::create(valid_name, admin.to_string());
    group_repo::insert(conn, &group)?;

    info!(group = %group.id, name = %group.name, "group created");
    Ok(group)
}

pub fn rename_group(conn: &Connection, group_id: Id<Group>, name: &str) -> SantaResult<Group> {
    let mut group = find_group(conn, group_id)?;
    group.name = validation::non_blank(name, "group name")?;
    group_repo::update(conn, &group)?;
    Ok(group)
}

pub fn delete_group(conn: &Connection, group_id: Id<Group>) -> SantaResult<()> {
    find_group(conn, group_id)?;
    group_repo::delete(conn, group_id)?;
    info!(group = %group_id, "group deleted");
    Ok(())
}

pub(crate) fn find_group(conn: &Connection, group_id: Id<Group>) -> SantaResult<Group> {
    group_repo::find_by_id(conn, group_id)?.ok_or_else(|| SantaError::NotFound {
        entity_type: "Group".into(),
        id: group_id.to_string(),
    })
}
