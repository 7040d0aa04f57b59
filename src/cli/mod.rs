pub mod context;
pub mod group_commands;
pub mod participant_commands;
pub mod draw_commands;
pub mod feed_commands;

use rusqlite::Connection;
use url::Url;

use crate::config::Config;
use crate::db::schema;
use context::CLIContext;

/// Run the interactive REPL. `entry_link`, when given, is followed before
/// the first prompt, the same way opening an invitation would.
pub fn run(config: Config, entry_link: Option<Url>) {
    println!("Amigo Invisível - Secret Santa organizer");
    println!("Type 'help' for commands, 'exit' to quit.");
    println!();

    let conn = match Connection::open(&config.db_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error opening database: {}", e);
            return;
        }
    };

    if let Err(e) = schema::initialize(&conn) {
        eprintln!("Error initializing database: {}", e);
        return;
    }
    tracing::debug!(path = %config.db_path.display(), "database ready");

    let mut ctx = CLIContext::new(conn, config);
    if let Some(url) = entry_link {
        group_commands::follow_link(&mut ctx, &url);
    }

    repl_loop(&mut ctx);
}

fn repl_loop(ctx: &mut CLIContext) {
    loop {
        let prompt = match ctx.current_group_name() {
            Some(name) => format!("[{}]> ", name),
            None => "> ".to_string(),
        };
        let input = match ctx.read_line(&prompt) {
            Some(s) => s,
            None => break,
        };

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let (command, args) = parse_command(input);

        match command {
            "help" | "?" => print_help(),
            "quit" | "exit" | "q" => break,

            // Groups
            "groups" => group_commands::list(ctx),
            "new-group" => group_commands::new_group(ctx, args),
            "open" => group_commands::open(ctx, args),
            "show" | "status" => group_commands::show(ctx),
            "rename" => group_commands::rename(ctx, args),
            "delete-group" => group_commands::delete(ctx),

            // Roster
            "add" => participant_commands::add(ctx, args),
            "edit" => participant_commands::edit(ctx, args),
            "remove" => participant_commands::remove(ctx, args),

            // Draw and invitations
            "draw" => draw_commands::draw(ctx),
            "reset-draw" => draw_commands::reset(ctx),
            "verify" => draw_commands::verify(ctx),
            "invites" => draw_commands::invites(ctx, args),
            "template" => draw_commands::show_template(ctx),
            "set-template" => draw_commands::set_template(ctx),
            "reset-template" => draw_commands::reset_template(ctx),
            "generate" => draw_commands::generate_template(ctx, args),

            // Feed
            "login" => feed_commands::login(ctx, args),
            "logout" => feed_commands::logout(ctx),
            "reveal" => feed_commands::reveal(ctx),
            "feed" => feed_commands::feed(ctx),
            "post" => feed_commands::post(ctx, args),
            "like" => feed_commands::like(ctx, args),
            "comment" => feed_commands::comment(ctx, args),
            "delete-post" => feed_commands::delete_post(ctx, args),

            _ => println!("Unknown command: {}. Type 'help' for commands.", command),
        }
    }
}

/// Split input into command and the rest of the line.
fn parse_command(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.find(|c: char| c == ' ' || c == '\t') {
        Some(pos) => (&input[..pos], input[pos..].trim()),
        None => (input, ""),
    }
}

fn print_help() {
    println!(r#"
COMMANDS:

  Groups:
    groups                  List all groups
    new-group [name]        Create a group and open it
    open <name|id|link>     Open a group (an invitation link works too)
    show                    Show the open group and its roster
    rename <name>           Rename the open group
    delete-group            Delete the open group

  Roster (before the draw):
    add [name]              Add a participant (asks for WhatsApp number)
    edit <name>             Change a participant's name or number
    remove <name>           Remove a participant

  Draw & invitations:
    draw                    Draw secret friends (needs 3+ participants)
    reset-draw              Discard the draw and reopen the roster
    verify                  Check the stored draw is a valid assignment
    invites [name]          Print WhatsApp invitation links
    template                Show the invitation template
    set-template            Replace the template (multi-line)
    reset-template          Go back to the default template
    generate <tone>         Draft a template (Divertido, Natalino, Misterioso, Formal)

  Feed:
    login [name]            Enter the feed as a participant
    logout                  Leave the feed
    reveal                  Show your secret friend
    feed                    Show wish-list posts
    post <text>             Post what you'd like to get
    like <n>                Like / unlike post n
    comment <n> <text>      Comment on post n
    delete-post <n>         Delete your own post n

  Other:
    help                    Show this help
    exit / quit / q         Exit

TIPS:
  - Names are case-insensitive and partial matches work
  - Phone numbers are stored digits-only, country code first"#);
}
