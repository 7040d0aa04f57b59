use url::Url;

use crate::cli::context::CLIContext;
use crate::cli::feed_commands;
use crate::model::*;
use crate::ops::*;
use crate::queries::group_queries;
use crate::routing::{self, Route};

pub fn list(ctx: &CLIContext) {
    let groups = group_queries::all_groups(&ctx.conn).unwrap_or_default();
    if groups.is_empty() {
        println!("No groups yet. Use 'new-group <name>' to create one.");
        return;
    }

    println!("Groups ({}):", groups.len());
    for group in &groups {
        let marker = if ctx.group_id == Some(group.id) { "*" } else { " " };
        let status = if group.is_drawn { "drawn" } else { "open" };
        println!(
            " {} {} ({}, created {})",
            marker,
            group.name,
            status,
            group.created_at.format("%Y-%m-%d")
        );
    }
}

pub fn new_group(ctx: &mut CLIContext, args: &str) {
    let name = if !args.is_empty() {
        args.to_string()
    } else {
        match ctx.prompt("Group name (e.g. Natal da Família): ") {
            Some(s) if !s.is_empty() => s,
            _ => {
                println!("Name cannot be empty.");
                return;
            }
        }
    };

    match group_ops::create_group(&ctx.conn, &name, None) {
        Ok(group) => {
            println!("Created group: {}", group.name);
            println!("Add at least 3 participants with 'add <name>', then run 'draw'.");
            ctx.select_group(group.id);
        }
        Err(e) => ctx.print_error(&e),
    }
}

/// Opens a group by name, id or entry link.
pub fn open(ctx: &mut CLIContext, args: &str) {
    let query = args.trim();
    if query.is_empty() {
        println!("Usage: open <name | id | link>");
        return;
    }

    if let Ok(url) = Url::parse(query) {
        if matches!(url.scheme(), "http" | "https") {
            follow_link(ctx, &url);
            return;
        }
    }

    if let Ok(id) = Id::<Group>::parse(query) {
        match group_queries::get_group(&ctx.conn, id) {
            Ok(Some(view)) => {
                ctx.select_group(view.group.id);
                println!("Opened group: {}", view.group.name);
            }
            Ok(None) => println!("No group with id {}", id),
            Err(e) => ctx.print_error(&e),
        }
        return;
    }

    let groups = group_queries::all_groups(&ctx.conn).unwrap_or_default();
    let lower = query.to_lowercase();
    let matches: Vec<&Group> = groups
        .iter()
        .filter(|g| g.name.to_lowercase().contains(&lower))
        .collect();

    let group = match matches.len() {
        0 => {
            println!("No group found matching '{}'", query);
            return;
        }
        1 => matches[0],
        _ => match matches.iter().find(|g| g.name.eq_ignore_ascii_case(query)) {
            Some(exact) => *exact,
            None => {
                println!("Multiple matches found:");
                for g in &matches {
                    println!("  {}", g.name);
                }
                println!("Please be more specific.");
                return;
            }
        },
    };

    ctx.select_group(group.id);
    println!("Opened group: {}", group.name);
}

/// Lands where an invitation link would land.
pub fn follow_link(ctx: &mut CLIContext, url: &Url) {
    match routing::resolve_entry(&ctx.conn, url) {
        Ok(Route::Landing) => println!("That link does not point to a known group."),
        Ok(Route::Setup(view)) => {
            ctx.select_group(view.group.id);
            println!("Opened group: {} (not drawn yet)", view.group.name);
        }
        Ok(Route::Login(view)) => {
            ctx.select_group(view.group.id);
            println!("Opened group: {}. Use 'login <name>' to enter the feed.", view.group.name);
        }
        Ok(Route::Social {
            group,
            participant,
            reveal,
        }) => {
            ctx.select_group(group.group.id);
            ctx.user_id = Some(participant.id);
            println!("Welcome, {}!", participant.name);
            if reveal {
                feed_commands::print_reveal(&participant);
            } else {
                feed_commands::print_feed(&group, &participant);
            }
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn show(ctx: &CLIContext) {
    let view = match ctx.current_group() {
        Some(v) => v,
        None => return,
    };

    println!();
    println!("Group: {}", view.group.name);
    println!("Status: {}", if view.group.is_drawn { "drawn" } else { "open for changes" });
    println!("Posts: {}", view.posts.len());

    if view.participants.is_empty() {
        println!("Participants: (none)");
    } else {
        println!("Participants ({}):", view.participants.len());
        for p in &view.participants {
            println!("  [{}] {} (+{})", p.initial(), p.name, p.phone);
        }
    }
    if !view.group.is_drawn && !view.can_draw() {
        println!("At least 3 participants are needed for the draw.");
    }
    println!();
}

pub fn rename(ctx: &CLIContext, args: &str) {
    let group_id = match ctx.group_id {
        Some(id) => id,
        None => {
            println!("No group open.");
            return;
        }
    };
    if args.is_empty() {
        println!("Usage: rename <new name>");
        return;
    }

    match group_ops::rename_group(&ctx.conn, group_id, args) {
        Ok(group) => println!("Group renamed to {}", group.name),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn delete(ctx: &mut CLIContext) {
    let view = match ctx.current_group() {
        Some(v) => v,
        None => return,
    };
    if !ctx.confirm(&format!("Delete group '{}' with all its posts?", view.group.name)) {
        return;
    }

    match group_ops::delete_group(&ctx.conn, view.group.id) {
        Ok(()) => {
            println!("Deleted group: {}", view.group.name);
            ctx.group_id = None;
            ctx.user_id = None;
        }
        Err(e) => ctx.print_error(&e),
    }
}
