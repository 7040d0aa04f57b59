use santa::db::*;
use santa::draw::Pairing;
use santa::model::*;

fn setup() -> (rusqlite::Connection, Group) {
    let conn = schema::test_connection();
    let group = Group::create("Natal da Família".into(), DEFAULT_ADMIN.into());
    group_repo::insert(&conn, &group).unwrap();
    (conn, group)
}

fn add(conn: &rusqlite::Connection, group: &Group, name: &str) -> Participant {
    let p = Participant::create(group.id, name.into(), "5511999990000".into());
    participant_repo::insert(conn, &p).unwrap();
    p
}

fn pairing(giver: &Participant, receiver: &Participant) -> Pairing<Id<Participant>> {
    Pairing {
        giver: giver.id,
        receiver: receiver.id,
        receiver_name: receiver.name.clone(),
    }
}

// ==========================================================================
// GROUP REPO TESTS
// ==========================================================================

#[test]
fn group_insert_and_find() {
    let (conn, group) = setup();

    let found = group_repo::find_by_id(&conn, group.id).unwrap().unwrap();
    assert_eq!(found.name, "Natal da Família");
    assert_eq!(found.admin_id, DEFAULT_ADMIN);
    assert_eq!(found.slug, group.slug);
    assert!(!found.is_drawn);
}

#[test]
fn group_find_missing_returns_none() {
    let (conn, _) = setup();
    assert!(group_repo::find_by_id(&conn, Id::generate()).unwrap().is_none());
}

#[test]
fn group_find_by_slug() {
    let (conn, group) = setup();
    let found = group_repo::find_by_slug(&conn, &group.slug).unwrap().unwrap();
    assert_eq!(found.id, group.id);
    assert!(group_repo::find_by_slug(&conn, "nope").unwrap().is_none());
}

#[test]
fn group_update_and_set_drawn() {
    let (conn, mut group) = setup();

    group.name = "Amigos do Trabalho".into();
    group_repo::update(&conn, &group).unwrap();
    group_repo::set_drawn(&conn, group.id, true).unwrap();

    let found = group_repo::find_by_id(&conn, group.id).unwrap().unwrap();
    assert_eq!(found.name, "Amigos do Trabalho");
    assert!(found.is_drawn);
}

#[test]
fn group_find_all_newest_first() {
    let (conn, first) = setup();
    let second = Group::create("Segundo".into(), DEFAULT_ADMIN.into());
    group_repo::insert(&conn, &second).unwrap();

    let all = group_repo::find_all(&conn).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, second.id);
    assert_eq!(all[1].id, first.id);
}

#[test]
fn group_delete_cascades_to_roster() {
    let (conn, group) = setup();
    let ana = add(&conn, &group, "Ana");

    group_repo::delete(&conn, group.id).unwrap();

    assert!(group_repo::find_by_id(&conn, group.id).unwrap().is_none());
    assert!(participant_repo::find_by_id(&conn, ana.id).unwrap().is_none());
}

// ==========================================================================
// PARTICIPANT REPO TESTS
// ==========================================================================

#[test]
fn participant_insert_and_find() {
    let (conn, group) = setup();
    let mut ana = Participant::create(group.id, "Ana".into(), "5511988887777".into());
    ana.avatar_color = Some(AvatarColor::Green);
    participant_repo::insert(&conn, &ana).unwrap();

    let found = participant_repo::find_by_id(&conn, ana.id).unwrap().unwrap();
    assert_eq!(found.name, "Ana");
    assert_eq!(found.phone, "5511988887777");
    assert_eq!(found.group_id, group.id);
    assert_eq!(found.avatar_color, Some(AvatarColor::Green));
    assert!(found.secret_friend_id.is_none());
}

#[test]
fn participants_keep_join_order() {
    let (conn, group) = setup();
    for name in ["Caio", "Ana", "Bia", "Duda"] {
        add(&conn, &group, name);
    }

    let names: Vec<String> = participant_repo::find_by_group(&conn, group.id)
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Caio", "Ana", "Bia", "Duda"]);
}

#[test]
fn participant_update_and_delete() {
    let (conn, group) = setup();
    let mut ana = add(&conn, &group, "Ana");

    ana.name = "Ana Paula".into();
    ana.phone = "351912345678".into();
    participant_repo::update(&conn, &ana).unwrap();
    let found = participant_repo::find_by_id(&conn, ana.id).unwrap().unwrap();
    assert_eq!(found.name, "Ana Paula");
    assert_eq!(found.phone, "351912345678");

    participant_repo::delete(&conn, ana.id).unwrap();
    assert_eq!(participant_repo::count_by_group(&conn, group.id).unwrap(), 0);
}

#[test]
fn participant_count_is_per_group() {
    let (conn, group) = setup();
    let other = Group::create("Outro".into(), DEFAULT_ADMIN.into());
    group_repo::insert(&conn, &other).unwrap();

    add(&conn, &group, "Ana");
    add(&conn, &group, "Bia");
    add(&conn, &other, "Caio");

    assert_eq!(participant_repo::count_by_group(&conn, group.id).unwrap(), 2);
    assert_eq!(participant_repo::count_by_group(&conn, other.id).unwrap(), 1);
}

// ==========================================================================
// DRAW REPO TESTS
// ==========================================================================

#[test]
fn draw_replace_and_find() {
    let (conn, group) = setup();
    let ana = add(&conn, &group, "Ana");
    let bia = add(&conn, &group, "Bia");
    let caio = add(&conn, &group, "Caio");

    draw_repo::replace(
        &conn,
        group.id,
        &[pairing(&ana, &bia), pairing(&bia, &caio), pairing(&caio, &ana)],
    )
    .unwrap();

    let records = draw_repo::find_by_group(&conn, group.id).unwrap();
    assert_eq!(records.len(), 3);
    let ana_record = records.iter().find(|r| r.giver_id == ana.id).unwrap();
    assert_eq!(ana_record.receiver_id, bia.id);
}

#[test]
fn draw_replace_discards_previous_rows() {
    let (conn, group) = setup();
    let ana = add(&conn, &group, "Ana");
    let bia = add(&conn, &group, "Bia");
    let caio = add(&conn, &group, "Caio");

    draw_repo::replace(
        &conn,
        group.id,
        &[pairing(&ana, &bia), pairing(&bia, &caio), pairing(&caio, &ana)],
    )
    .unwrap();
    draw_repo::replace(
        &conn,
        group.id,
        &[pairing(&ana, &caio), pairing(&caio, &bia), pairing(&bia, &ana)],
    )
    .unwrap();

    let records = draw_repo::find_by_group(&conn, group.id).unwrap();
    assert_eq!(records.len(), 3);
    let ana_record = records.iter().find(|r| r.giver_id == ana.id).unwrap();
    assert_eq!(ana_record.receiver_id, caio.id);
}

#[test]
fn draw_rejects_two_givers_for_one_receiver() {
    let (conn, group) = setup();
    let ana = add(&conn, &group, "Ana");
    let bia = add(&conn, &group, "Bia");
    let caio = add(&conn, &group, "Caio");

    let result = draw_repo::replace(
        &conn,
        group.id,
        &[pairing(&ana, &caio), pairing(&bia, &caio)],
    );
    assert!(result.is_err());
}

#[test]
fn draw_delete_for_group() {
    let (conn, group) = setup();
    let ana = add(&conn, &group, "Ana");
    let bia = add(&conn, &group, "Bia");

    draw_repo::replace(&conn, group.id, &[pairing(&ana, &bia), pairing(&bia, &ana)]).unwrap();
    draw_repo::delete_for_group(&conn, group.id).unwrap();

    assert!(draw_repo::find_by_group(&conn, group.id).unwrap().is_empty());
}

// ==========================================================================
// FEED REPO TESTS
// ==========================================================================

#[test]
fn post_insert_and_find() {
    let (conn, group) = setup();
    let ana = add(&conn, &group, "Ana");

    let post = Post::create(group.id, ana.id, "Um livro de receitas".into());
    post_repo::insert(&conn, &post).unwrap();

    let found = post_repo::find_by_id(&conn, post.id).unwrap().unwrap();
    assert_eq!(found.content, "Um livro de receitas");
    assert_eq!(found.author_id, ana.id);
    assert!(found.likes.is_empty());
}

#[test]
fn posts_newest_first() {
    let (conn, group) = setup();
    let ana = add(&conn, &group, "Ana");

    let first = Post::create(group.id, ana.id, "primeiro".into());
    post_repo::insert(&conn, &first).unwrap();
    let second = Post::create(group.id, ana.id, "segundo".into());
    post_repo::insert(&conn, &second).unwrap();

    let posts = post_repo::find_by_group(&conn, group.id).unwrap();
    assert_eq!(posts[0].id, second.id);
    assert_eq!(posts[1].id, first.id);
}

#[test]
fn comments_oldest_first() {
    let (conn, group) = setup();
    let ana = add(&conn, &group, "Ana");
    let bia = add(&conn, &group, "Bia");
    let post = Post::create(group.id, ana.id, "Meias".into());
    post_repo::insert(&conn, &post).unwrap();

    let c1 = Comment::create(post.id, bia.id, "Que cor?".into());
    comment_repo::insert(&conn, &c1).unwrap();
    let c2 = Comment::create(post.id, ana.id, "Vermelhas!".into());
    comment_repo::insert(&conn, &c2).unwrap();

    let comments = comment_repo::find_by_post(&conn, post.id).unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].id, c1.id);
    assert_eq!(comments[1].id, c2.id);

    comment_repo::delete(&conn, c1.id).unwrap();
    assert_eq!(comment_repo::find_by_post(&conn, post.id).unwrap().len(), 1);
}

#[test]
fn like_insert_is_idempotent() {
    let (conn, group) = setup();
    let ana = add(&conn, &group, "Ana");
    let post = Post::create(group.id, ana.id, "Chocolate".into());
    post_repo::insert(&conn, &post).unwrap();

    let like = Like {
        post_id: post.id,
        participant_id: ana.id,
    };
    like_repo::insert(&conn, &like).unwrap();
    like_repo::insert(&conn, &like).unwrap();

    assert!(like_repo::exists(&conn, &like).unwrap());
    assert_eq!(like_repo::find_by_post(&conn, post.id).unwrap(), vec![ana.id]);

    like_repo::delete(&conn, &like).unwrap();
    assert!(!like_repo::exists(&conn, &like).unwrap());
}

#[test]
fn post_delete_cascades_to_comments_and_likes() {
    let (conn, group) = setup();
    let ana = add(&conn, &group, "Ana");
    let post = Post::create(group.id, ana.id, "Vinho".into());
    post_repo::insert(&conn, &post).unwrap();
    comment_repo::insert(&conn, &Comment::create(post.id, ana.id, "tinto".into())).unwrap();
    like_repo::insert(
        &conn,
        &Like {
            post_id: post.id,
            participant_id: ana.id,
        },
    )
    .unwrap();

    post_repo::delete(&conn, post.id).unwrap();

    assert!(post_repo::find_by_id(&conn, post.id).unwrap().is_none());
    assert!(comment_repo::find_by_post(&conn, post.id).unwrap().is_empty());
    assert!(like_repo::find_by_post(&conn, post.id).unwrap().is_empty());
}

#[test]
fn draw_replace_rolls_back_with_caller_transaction() {
    let (conn, group) = setup();
    let ana = add(&conn, &group, "Ana");
    let bia = add(&conn, &group, "Bia");
    let caio = add(&conn, &group, "Caio");
    draw_repo::replace(
        &conn,
        group.id,
        &[pairing(&ana, &bia), pairing(&bia, &caio), pairing(&caio, &ana)],
    )
    .unwrap();

    {
        let tx = conn.unchecked_transaction().unwrap();
        // Caio receives twice: the insert fails after the old rows were deleted
        let result = draw_repo::replace(
            &tx,
            group.id,
            &[pairing(&ana, &caio), pairing(&bia, &caio)],
        );
        assert!(result.is_err());
    }

    let records = draw_repo::find_by_group(&conn, group.id).unwrap();
    assert_eq!(records.len(), 3);
    let ana_record = records.iter().find(|r| r.giver_id == ana.id).unwrap();
    assert_eq!(ana_record.receiver_id, bia.id);
}
