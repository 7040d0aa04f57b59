use crate::ai::message_service::{self, TONES};
use crate::cli::context::CLIContext;
use crate::error::SantaError;
use crate::invite::{self, DEFAULT_TEMPLATE};
use crate::ops::*;

pub fn draw(ctx: &CLIContext) {
    let view = match ctx.current_group() {
        Some(v) => v,
        None => return,
    };

    if view.group.is_drawn
        && !ctx.confirm("This group was already drawn. Draw again and replace every pairing?")
    {
        return;
    }

    match draw_ops::perform_draw(&ctx.conn, view.group.id) {
        Ok(pairings) => {
            println!("Draw complete: {} secret friends assigned.", pairings.len());
            println!("Use 'invites' to get the WhatsApp links.");
        }
        Err(SantaError::InsufficientParticipants { required, actual }) => {
            println!("Add at least {} participants! (currently {})", required, actual);
        }
        Err(e @ SantaError::DrawFailed { .. }) => {
            println!("{}", e);
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn reset(ctx: &CLIContext) {
    let view = match ctx.current_group() {
        Some(v) => v,
        None => return,
    };
    if !view.group.is_drawn {
        println!("This group has not been drawn yet.");
        return;
    }
    if !ctx.confirm("Discard the draw and reopen the roster?") {
        return;
    }

    match draw_ops::reset_draw(&ctx.conn, view.group.id) {
        Ok(group) => println!("Draw discarded; {} is open for changes again.", group.name),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn verify(ctx: &CLIContext) {
    let view = match ctx.current_group() {
        Some(v) => v,
        None => return,
    };

    match draw_ops::verify_stored_draw(&ctx.conn, view.group.id) {
        Ok(()) => println!("Draw is valid: everyone gives once, receives once, and nobody drew themselves."),
        Err(e) => ctx.print_error(&e),
    }
}

/// Prints one message + WhatsApp link per participant.
pub fn invites(ctx: &CLIContext, args: &str) {
    let view = match ctx.current_group() {
        Some(v) => v,
        None => return,
    };
    if !view.group.is_drawn {
        println!("Run 'draw' first.");
        return;
    }

    let participants: Vec<_> = if args.is_empty() {
        view.participants.clone()
    } else {
        match ctx.find_participant(&view, args) {
            Some(p) => vec![p.clone()],
            None => return,
        }
    };

    match invite::invitations(&ctx.config.base_url, &view.group, &participants, &ctx.template) {
        Ok(list) => {
            for (i, inv) in list.iter().enumerate() {
                println!();
                println!("{}. {}", i + 1, inv.participant_name);
                println!("   {}", inv.whatsapp_link);
            }
            println!();
            println!("Send each link to its participant. Only they should open it.");
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn show_template(ctx: &CLIContext) {
    println!();
    println!("{}", ctx.template);
    println!();
    println!(
        "Placeholders: {} {} {} {}",
        invite::NAME_TOKEN,
        invite::GROUP_TOKEN,
        invite::REVEAL_LINK_TOKEN,
        invite::GROUP_LINK_TOKEN
    );
}

/// Reads a multi-line template, ended by a line with a single '.'.
pub fn set_template(ctx: &mut CLIContext) {
    println!("Enter the new template. Finish with a line containing only '.'");
    let mut lines = Vec::new();
    loop {
        match ctx.read_line("") {
            Some(line) if line.trim() == "." => break,
            Some(line) => lines.push(line),
            None => break,
        }
    }

    let text = lines.join("\n");
    if text.trim().is_empty() {
        println!("Template unchanged.");
        return;
    }
    ctx.template = text;
    println!("Template updated.");
}

pub fn reset_template(ctx: &mut CLIContext) {
    ctx.template = DEFAULT_TEMPLATE.to_string();
    println!("Template reset to the default.");
}

pub fn generate_template(ctx: &mut CLIContext, args: &str) {
    let tone = match message_service::find_tone(args) {
        Some(t) => t.instruction.to_string(),
        None if !args.is_empty() => args.to_string(),
        None => {
            println!("Usage: generate <tone>");
            println!("Presets:");
            for t in TONES {
                println!("  {:<12} {}", t.label, t.instruction);
            }
            return;
        }
    };

    if let Some(host) = &ctx.config.ollama_host {
        if let Err(err) = message_service::check_service(host) {
            println!("{}", err);
            println!("Using the default template.");
            ctx.template = DEFAULT_TEMPLATE.to_string();
            return;
        }
    }

    println!("Writing a message ({})...", tone);
    ctx.template = message_service::generate_template(&ctx.config, &tone);
    show_template(ctx);
}
