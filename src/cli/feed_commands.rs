use crate::cli::context::CLIContext;
use crate::model::*;
use crate::ops::*;
use crate::queries::feed_queries;
use crate::queries::group_queries::GroupView;

/// Picks who is using the feed. Without a name, lists the roster to choose from.
pub fn login(ctx: &mut CLIContext, args: &str) {
    let view = match ctx.current_group() {
        Some(v) => v,
        None => return,
    };
    if view.participants.is_empty() {
        println!("This group has no participants yet.");
        return;
    }

    let chosen = if !args.is_empty() {
        ctx.find_participant(&view, args).cloned()
    } else {
        println!("Who are you?");
        for (i, p) in view.participants.iter().enumerate() {
            println!("  {}. {}", i + 1, p.name);
        }
        ctx.prompt("Number: ")
            .and_then(|s| s.parse::<usize>().ok())
            .and_then(|i| view.participants.get(i.wrapping_sub(1)).cloned())
    };

    match chosen {
        Some(p) => {
            println!("Welcome, {}!", p.name);
            ctx.user_id = Some(p.id);
        }
        None => println!("Nobody selected."),
    }
}

pub fn logout(ctx: &mut CLIContext) {
    if ctx.user_id.take().is_some() {
        println!("Logged out.");
    }
}

pub fn reveal(ctx: &CLIContext) {
    if let Some((_, user)) = ctx.current_user() {
        print_reveal(&user);
    }
}

pub fn print_reveal(participant: &Participant) {
    println!();
    println!("Hi, {}! Your secret friend is...", participant.name);
    println!();
    println!(
        "    {}",
        participant
            .secret_friend_name
            .as_deref()
            .unwrap_or("(draw pending)")
    );
    println!();
    println!("Shhh! Don't tell anyone!");
    println!();
}

pub fn feed(ctx: &CLIContext) {
    if let Some((view, user)) = ctx.current_user() {
        print_feed(&view, &user);
    }
}

pub fn print_feed(view: &GroupView, user: &Participant) {
    println!();
    println!("{} | signed in as {}", view.group.name, user.name);
    if view.posts.is_empty() {
        println!("No wishes posted yet. Use 'post <what you'd like to get>'.");
        println!();
        return;
    }

    for (i, post) in view.posts.iter().enumerate() {
        let heart = if post.is_liked_by(user.id) { "♥" } else { "♡" };
        println!();
        println!(
            "{}. {} ({})",
            i + 1,
            feed_queries::author_name(&view.participants, post.author_id),
            post.created_at.format("%d/%m %H:%M")
        );
        println!("   {}", post.content);
        println!("   {} {}  💬 {}", heart, post.likes.len(), post.comments.len());
        for comment in &post.comments {
            println!(
                "     - {}: {}",
                feed_queries::author_name(&view.participants, comment.author_id),
                comment.content
            );
        }
    }
    println!();
}

pub fn post(ctx: &CLIContext, args: &str) {
    let (view, user) = match ctx.current_user() {
        Some(v) => v,
        None => return,
    };
    let content = if !args.is_empty() {
        args.to_string()
    } else {
        match ctx.prompt("What would you like to get? ") {
            Some(s) if !s.is_empty() => s,
            _ => return,
        }
    };

    match feed_ops::add_post(&ctx.conn, view.group.id, user.id, &content) {
        Ok(_) => println!("Posted."),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn like(ctx: &CLIContext, args: &str) {
    let (view, user) = match ctx.current_user() {
        Some(v) => v,
        None => return,
    };
    let post = match pick_post(&view, args) {
        Some(p) => p,
        None => {
            println!("Usage: like <post number>");
            return;
        }
    };

    match feed_ops::toggle_like(&ctx.conn, post.id, user.id) {
        Ok(true) => println!("Liked."),
        Ok(false) => println!("Like removed."),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn comment(ctx: &CLIContext, args: &str) {
    let (view, user) = match ctx.current_user() {
        Some(v) => v,
        None => return,
    };
    let (number, text) = match args.split_once(char::is_whitespace) {
        Some((n, t)) => (n, t.trim().to_string()),
        None => (args, String::new()),
    };
    let post = match pick_post(&view, number) {
        Some(p) => p,
        None => {
            println!("Usage: comment <post number> <text>");
            return;
        }
    };
    let text = if !text.is_empty() {
        text
    } else {
        match ctx.prompt("Comment: ") {
            Some(s) if !s.is_empty() => s,
            _ => return,
        }
    };

    match feed_ops::add_comment(&ctx.conn, post.id, user.id, &text) {
        Ok(_) => println!("Comment added."),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn delete_post(ctx: &CLIContext, args: &str) {
    let (view, user) = match ctx.current_user() {
        Some(v) => v,
        None => return,
    };
    let post = match pick_post(&view, args) {
        Some(p) => p,
        None => {
            println!("Usage: delete-post <post number>");
            return;
        }
    };

    match feed_ops::delete_post(&ctx.conn, post.id, user.id) {
        Ok(()) => println!("Post deleted."),
        Err(e) => ctx.print_error(&e),
    }
}

/// Posts are numbered as printed by `feed`, starting at 1.
fn pick_post<'a>(view: &'a GroupView, args: &str) -> Option<&'a Post> {
    args.trim()
        .parse::<usize>()
        .ok()
        .and_then(|i| view.posts.get(i.wrapping_sub(1)))
}
