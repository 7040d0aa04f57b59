use rusqlite::Connection;
use url::Url;

use crate::error::SantaResult;
use crate::invite::LinkAction;
use crate::model::{Group, Id, Participant};
use crate::queries::group_queries::{self, GroupView};

/// Query parameters of an entry link. Malformed ids count as absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryParams {
    pub group_id: Option<Id<Group>>,
    pub participant_id: Option<Id<Participant>>,
    pub action: Option<LinkAction>,
}

impl EntryParams {
    pub fn from_url(url: &Url) -> Self {
        let mut params = EntryParams::default();
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "gid" => params.group_id = Id::parse(&value).ok(),
                "uid" => params.participant_id = Id::parse(&value).ok(),
                "action" => params.action = LinkAction::parse(&value),
                _ => {}
            }
        }
        params
    }
}

/// Screen an entry link lands on.
#[derive(Debug, Clone)]
pub enum Route {
    /// No group (or an unknown one): offer to create a group.
    Landing,
    /// Group not drawn yet and nobody identified: roster editing and the draw.
    Setup(GroupView),
    /// Group drawn but no participant in the link: pick who you are.
    Login(GroupView),
    /// A known participant. `reveal` shows their secret friend first.
    Social {
        group: GroupView,
        participant: Participant,
        reveal: bool,
    },
}

/// Picks the screen for already-loaded data.
pub fn resolve(params: &EntryParams, group: Option<GroupView>) -> Route {
    let group = match (params.group_id, group) {
        (Some(_), Some(g)) => g,
        _ => return Route::Landing,
    };

    if let Some(uid) = params.participant_id {
        if let Some(participant) = group.participant(uid).cloned() {
            return Route::Social {
                group,
                participant,
                reveal: params.action == Some(LinkAction::Reveal),
            };
        }
    }

    if group.group.is_drawn {
        Route::Login(group)
    } else {
        Route::Setup(group)
    }
}

pub fn resolve_entry(conn: &Connection, url: &Url) -> SantaResult<Route> {
    let params = EntryParams::from_url(url);
    let group = match params.group_id {
        Some(gid) => group_queries::get_group(conn, gid)?,
        None => None,
    };
    Ok(resolve(&params, group))
}
