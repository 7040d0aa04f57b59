use santa::db::*;
use santa::model::*;
use santa::ops::*;
use santa::queries::*;

fn setup() -> (rusqlite::Connection, Group, Vec<Participant>) {
    let conn = schema::test_connection();
    let group = group_ops::create_group(&conn, "Amigos do Trabalho", None).unwrap();
    let people = ["Ana", "Bia", "Caio", "Duda"]
        .iter()
        .map(|name| participant_ops::add_participant(&conn, group.id, name, "5511999990000").unwrap())
        .collect();
    (conn, group, people)
}

// ==========================================================================
// GROUP QUERIES TESTS
// ==========================================================================

#[test]
fn get_group_before_draw_has_no_secret_friends() {
    let (conn, group, _) = setup();

    let view = group_queries::get_group(&conn, group.id).unwrap().unwrap();
    assert_eq!(view.participants.len(), 4);
    assert!(view.can_draw());
    assert!(view.participants.iter().all(|p| !p.has_secret_friend()));
}

#[test]
fn get_group_missing_returns_none() {
    let conn = schema::test_connection();
    assert!(group_queries::get_group(&conn, Id::generate()).unwrap().is_none());
}

#[test]
fn get_group_resolves_secret_friends_after_draw() {
    let (conn, group, people) = setup();
    let pairings = draw_ops::perform_draw(&conn, group.id).unwrap();

    let view = group_queries::get_group(&conn, group.id).unwrap().unwrap();
    assert!(view.group.is_drawn);
    for pairing in &pairings {
        let giver = view.participant(pairing.giver).unwrap();
        assert_eq!(giver.secret_friend_id, Some(pairing.receiver));
        let receiver = people.iter().find(|p| p.id == pairing.receiver).unwrap();
        assert_eq!(giver.secret_friend_name.as_deref(), Some(receiver.name.as_str()));
        assert_ne!(giver.secret_friend_id, Some(giver.id));
    }
}

#[test]
fn get_group_after_reset_clears_secret_friends() {
    let (conn, group, _) = setup();
    draw_ops::perform_draw(&conn, group.id).unwrap();
    draw_ops::reset_draw(&conn, group.id).unwrap();

    let view = group_queries::get_group(&conn, group.id).unwrap().unwrap();
    assert!(view.participants.iter().all(|p| p.secret_friend_name.is_none()));
}

#[test]
fn get_group_by_slug() {
    let (conn, group, _) = setup();
    let view = group_queries::get_group_by_slug(&conn, &group.slug).unwrap().unwrap();
    assert_eq!(view.group.id, group.id);
    assert!(group_queries::get_group_by_slug(&conn, "missing").unwrap().is_none());
}

#[test]
fn can_draw_needs_three() {
    let conn = schema::test_connection();
    let group = group_ops::create_group(&conn, "Casal", None).unwrap();
    participant_ops::add_participant(&conn, group.id, "Ana", "5511").unwrap();
    participant_ops::add_participant(&conn, group.id, "Bia", "5511").unwrap();

    let view = group_queries::get_group(&conn, group.id).unwrap().unwrap();
    assert!(!view.can_draw());
}

#[test]
fn group_view_serializes_to_json() {
    let (conn, group, _) = setup();
    let view = group_queries::get_group(&conn, group.id).unwrap().unwrap();
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["group"]["name"], "Amigos do Trabalho");
    assert_eq!(json["participants"].as_array().unwrap().len(), 4);
}

// ==========================================================================
// FEED QUERIES TESTS
// ==========================================================================

#[test]
fn feed_is_newest_first_with_likes_and_comments() {
    let (conn, group, people) = setup();
    let older = feed_ops::add_post(&conn, group.id, people[0].id, "Um livro").unwrap();
    let newer = feed_ops::add_post(&conn, group.id, people[1].id, "Uma planta").unwrap();

    feed_ops::toggle_like(&conn, older.id, people[2].id).unwrap();
    feed_ops::add_comment(&conn, older.id, people[3].id, "Qual autor?").unwrap();
    feed_ops::add_comment(&conn, older.id, people[0].id, "Qualquer um!").unwrap();

    let posts = feed_queries::feed(&conn, group.id).unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].id, newer.id);
    assert_eq!(posts[1].id, older.id);
    assert!(posts[1].is_liked_by(people[2].id));
    assert!(!posts[1].is_liked_by(people[0].id));
    assert_eq!(posts[1].comments[0].content, "Qual autor?");
    assert_eq!(posts[1].comments[1].content, "Qualquer um!");
}

#[test]
fn group_view_includes_feed() {
    let (conn, group, people) = setup();
    feed_ops::add_post(&conn, group.id, people[0].id, "Meias").unwrap();

    let view = group_queries::get_group(&conn, group.id).unwrap().unwrap();
    assert_eq!(view.posts.len(), 1);
}

#[test]
fn author_name_falls_back_for_unknown_ids() {
    let (_, _, people) = setup();
    assert_eq!(feed_queries::author_name(&people, people[1].id), "Bia");
    assert_eq!(
        feed_queries::author_name(&people, Id::generate()),
        feed_queries::UNKNOWN_AUTHOR
    );
}
