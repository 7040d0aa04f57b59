use crate::cli::context::CLIContext;
use crate::ops::*;

const DEFAULT_COUNTRY_CODE: &str = "+55";

pub fn add(ctx: &CLIContext, args: &str) {
    let view = match ctx.current_group() {
        Some(v) => v,
        None => return,
    };

    let name = if !args.is_empty() {
        args.to_string()
    } else {
        match ctx.prompt("Name: ") {
            Some(s) if !s.is_empty() => s,
            _ => {
                println!("Name cannot be empty.");
                return;
            }
        }
    };

    let country = ctx
        .prompt(&format!("Country code [{}]: ", DEFAULT_COUNTRY_CODE))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_COUNTRY_CODE.to_string());
    let number = match ctx.prompt("WhatsApp number: ") {
        Some(s) if !s.is_empty() => s,
        _ => {
            println!("A phone number is required.");
            return;
        }
    };

    let phone = format!("{}{}", country, number);
    match participant_ops::add_participant(&ctx.conn, view.group.id, &name, &phone) {
        Ok(p) => println!("Added {} (+{})", p.name, p.phone),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn remove(ctx: &mut CLIContext, args: &str) {
    let view = match ctx.current_group() {
        Some(v) => v,
        None => return,
    };
    if args.is_empty() {
        println!("Usage: remove <name>");
        return;
    }
    let participant = match ctx.find_participant(&view, args) {
        Some(p) => p.clone(),
        None => return,
    };
    if !ctx.confirm(&format!("Remove {} from the group?", participant.name)) {
        return;
    }

    match participant_ops::remove_participant(&ctx.conn, participant.id) {
        Ok(()) => {
            println!("Removed {}", participant.name);
            if ctx.user_id == Some(participant.id) {
                ctx.user_id = None;
            }
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn edit(ctx: &CLIContext, args: &str) {
    let view = match ctx.current_group() {
        Some(v) => v,
        None => return,
    };
    if args.is_empty() {
        println!("Usage: edit <name>");
        return;
    }
    let participant = match ctx.find_participant(&view, args) {
        Some(p) => p.clone(),
        None => return,
    };

    let name = ctx
        .prompt(&format!("Name [{}]: ", participant.name))
        .filter(|s| !s.is_empty());
    let phone = ctx
        .prompt(&format!("Phone [+{}]: ", participant.phone))
        .filter(|s| !s.is_empty());

    match participant_ops::update_participant(&ctx.conn, participant.id, name.as_deref(), phone.as_deref()) {
        Ok(p) => println!("Updated {} (+{})", p.name, p.phone),
        Err(e) => ctx.print_error(&e),
    }
}
