use rusqlite::Connection;
use std::io::{self, Write};

use crate::config::Config;
use crate::db::group_repo;
use crate::error::SantaError;
use crate::invite::DEFAULT_TEMPLATE;
use crate::model::*;
use crate::queries::group_queries::{self, GroupView};

pub struct CLIContext {
    pub conn: Connection,
    pub config: Config,
    /// Group currently being worked on.
    pub group_id: Option<Id<Group>>,
    /// Participant acting on the feed.
    pub user_id: Option<Id<Participant>>,
    /// Invitation template, edited per session.
    pub template: String,
}

impl CLIContext {
    pub fn new(conn: Connection, config: Config) -> Self {
        Self {
            conn,
            config,
            group_id: None,
            user_id: None,
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }

    /// Prompt and read a line from stdin. Returns None on EOF.
    pub fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{}", prompt);
        io::stdout().flush().ok();
        let mut buf = String::new();
        match io::stdin().read_line(&mut buf) {
            Ok(0) => None,
            Ok(_) => Some(buf.trim_end_matches('\n').trim_end_matches('\r').to_string()),
            Err(_) => None,
        }
    }

    /// Read a line, trimmed.
    pub fn prompt(&self, prompt: &str) -> Option<String> {
        self.read_line(prompt).map(|s| s.trim().to_string())
    }

    pub fn confirm(&self, question: &str) -> bool {
        matches!(
            self.prompt(&format!("{} (y/N): ", question)).as_deref(),
            Some("y") | Some("Y") | Some("yes") | Some("s") | Some("sim")
        )
    }

    pub fn select_group(&mut self, group_id: Id<Group>) {
        if self.group_id != Some(group_id) {
            self.user_id = None;
        }
        self.group_id = Some(group_id);
    }

    /// Name shown in the prompt. Silent when nothing is open.
    pub fn current_group_name(&self) -> Option<String> {
        let id = self.group_id?;
        group_repo::find_by_id(&self.conn, id).ok().flatten().map(|g| g.name)
    }

    /// Reloads the current group. Prints a hint when none is open.
    pub fn current_group(&self) -> Option<GroupView> {
        let group_id = match self.group_id {
            Some(id) => id,
            None => {
                println!("No group open. Use 'new-group <name>' or 'open <name>'.");
                return None;
            }
        };

        match group_queries::get_group(&self.conn, group_id) {
            Ok(Some(view)) => Some(view),
            Ok(None) => {
                println!("The current group no longer exists.");
                None
            }
            Err(e) => {
                self.print_error(&e);
                None
            }
        }
    }

    /// The current group together with the logged-in participant.
    pub fn current_user(&self) -> Option<(GroupView, Participant)> {
        let view = self.current_group()?;
        let user = match self.user_id.and_then(|id| view.participant(id).cloned()) {
            Some(u) => u,
            None => {
                println!("Nobody is logged in. Use 'login <name>' first.");
                return None;
            }
        };
        Some((view, user))
    }

    /// Find a participant of `view` by name query. Prints error if not found or ambiguous.
    pub fn find_participant<'a>(&self, view: &'a GroupView, args: &str) -> Option<&'a Participant> {
        let query = args.trim();
        if query.is_empty() {
            return None;
        }

        let lower = query.to_lowercase();
        let matches: Vec<&Participant> = view
            .participants
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&lower))
            .collect();

        match matches.len() {
            0 => {
                println!("No participant found matching '{}'", query);
                None
            }
            1 => Some(matches[0]),
            _ => {
                if let Some(exact) = matches.iter().find(|p| p.name.eq_ignore_ascii_case(query)) {
                    return Some(*exact);
                }
                println!("Multiple matches found:");
                for p in &matches {
                    println!("  {}", p.name);
                }
                println!("Please be more specific.");
                None
            }
        }
    }

    pub fn print_error(&self, e: &SantaError) {
        println!("Error: {}", e);
    }
}
