use noteful_core::db::open_db_in_memory;
use noteful_core::{
    build_note_query, DocId, NamedRecordRepository, NoteInput, NoteListParams, NoteQuery,
    NoteRepository, RepoError, SqliteNamedRecordRepository, SqliteNoteRepository,
};
use rusqlite::Connection;

fn input(title: &str, content: Option<&str>) -> NoteInput {
    NoteInput {
        title: title.to_string(),
        content: content.map(str::to_string),
        folder_id: None,
        tags: Vec::new(),
    }
}

fn search(term: &str) -> NoteQuery {
    build_note_query(&NoteListParams {
        search_term: Some(term.to_string()),
        ..NoteListParams::default()
    })
}

fn create_tag(conn: &Connection, name: &str) -> DocId {
    SqliteNamedRecordRepository::tags(conn)
        .create(name)
        .unwrap()
        .id
}

#[test]
fn created_note_is_readable_with_generated_id_and_timestamp() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    let created = repo
        .create_note(&input("Cats", Some("Why cats nap")))
        .unwrap();
    assert!(noteful_core::is_valid_id(created.id.as_str()));
    assert_eq!(created.title, "Cats");
    assert_eq!(created.content.as_deref(), Some("Why cats nap"));
    assert!(created.tags.is_empty());
    assert_eq!(created.score, None);

    let fetched = repo.get_note(&created.id).unwrap().unwrap();
    assert_eq!(fetched, created);
}

#[test]
fn list_without_filters_returns_every_note_in_creation_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    let ids = ["first", "second", "third"]
        .into_iter()
        .map(|title| repo.create_note(&input(title, None)).unwrap().id)
        .collect::<Vec<_>>();

    let listed = repo.list_notes(&NoteQuery::default()).unwrap();
    let listed_ids = listed.iter().map(|note| note.id.clone()).collect::<Vec<_>>();
    assert_eq!(listed_ids, ids);
    assert!(listed.iter().all(|note| note.score.is_none()));
}

#[test]
fn creation_time_decides_order_before_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    let older = repo.create_note(&input("older", None)).unwrap();
    let newer = repo.create_note(&input("newer", None)).unwrap();

    conn.execute(
        "UPDATE notes SET created_at = 2000 WHERE id = ?1;",
        [older.id.as_str()],
    )
    .unwrap();
    conn.execute(
        "UPDATE notes SET created_at = 1000 WHERE id = ?1;",
        [newer.id.as_str()],
    )
    .unwrap();

    let listed = repo.list_notes(&NoteQuery::default()).unwrap();
    assert_eq!(listed[0].id, newer.id);
    assert_eq!(listed[1].id, older.id);
}

#[test]
fn search_returns_only_matching_notes_by_descending_relevance() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    let weak = repo
        .create_note(&input(
            "Pets",
            Some("a short story about dogs and one of the cats next door barking all night"),
        ))
        .unwrap();
    let strong = repo
        .create_note(&input("Cats", Some("cats cats cats")))
        .unwrap();
    for title in ["Groceries", "Taxes", "Garden"] {
        repo.create_note(&input(title, Some("nothing relevant here")))
            .unwrap();
    }

    let hits = repo.list_notes(&search("cats")).unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].id, strong.id);
    assert_eq!(hits[1].id, weak.id);

    let first_score = hits[0].score.expect("search results carry a score");
    let second_score = hits[1].score.expect("search results carry a score");
    assert!(first_score > second_score);
}

#[test]
fn search_sees_updated_text_and_ignores_deleted_notes() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    let note = repo
        .create_note(&input("alpha", Some("alpha body")))
        .unwrap();
    let doomed = repo
        .create_note(&input("gamma", Some("gamma body")))
        .unwrap();

    repo.update_note(&note.id, &input("beta", Some("beta body")))
        .unwrap()
        .unwrap();
    repo.delete_note(&doomed.id).unwrap();

    assert!(repo.list_notes(&search("alpha")).unwrap().is_empty());
    assert!(repo.list_notes(&search("gamma")).unwrap().is_empty());
    let hits = repo.list_notes(&search("beta")).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, note.id);
}

#[test]
fn search_text_with_fts_syntax_is_treated_literally() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    repo.create_note(&input("quotes", Some("he said \"hi\"")))
        .unwrap();

    let hits = repo.list_notes(&search("\"hi\" AND (")).unwrap();
    assert_eq!(hits.len(), 1);
    let hits = repo.list_notes(&search("said NOT")).unwrap();
    assert_eq!(hits.len(), 1);
}

#[test]
fn search_matches_word_stems() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    let cats = repo
        .create_note(&input("Cats of the world", None))
        .unwrap();
    repo.create_note(&input("Dogs", Some("barking all night")))
        .unwrap();

    let hits = repo.list_notes(&search("cat")).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, cats.id);

    let hits = repo.list_notes(&search("barked")).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Dogs");
}

#[test]
fn search_term_without_words_matches_no_notes() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    for title in ["Groceries", "Taxes"] {
        repo.create_note(&input(title, None)).unwrap();
    }

    for term in ["!!!", "  ", " ( - ) "] {
        assert!(repo.list_notes(&search(term)).unwrap().is_empty(), "{term:?}");
    }
    assert_eq!(repo.list_notes(&search("")).unwrap().len(), 2);
}

#[test]
fn folder_filter_matches_exactly_and_tolerates_malformed_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    let folder = SqliteNamedRecordRepository::folders(&conn)
        .create("Work")
        .unwrap();
    let mut filed = input("filed", None);
    filed.folder_id = Some(folder.id.clone());
    let filed = repo.create_note(&filed).unwrap();
    repo.create_note(&input("loose", None)).unwrap();

    let by_folder = |folder_id: &str| {
        repo.list_notes(&build_note_query(&NoteListParams {
            folder_id: Some(folder_id.to_string()),
            ..NoteListParams::default()
        }))
        .unwrap()
    };

    let listed = by_folder(folder.id.as_str());
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, filed.id);
    assert_eq!(listed[0].folder_id.as_ref(), Some(&folder.id));

    assert!(by_folder("99-99-99").is_empty());
    assert!(by_folder("bbbbbbbbbbbbbbbbbbbbbbbb").is_empty());
}

#[test]
fn tag_filter_and_search_combine_conjunctively() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    let work = create_tag(&conn, "work");

    let mut tagged_match = input("cats at work", None);
    tagged_match.tags = vec![work.clone()];
    let tagged_match = repo.create_note(&tagged_match).unwrap();
    let mut tagged_other = input("dogs at work", None);
    tagged_other.tags = vec![work.clone()];
    repo.create_note(&tagged_other).unwrap();
    repo.create_note(&input("cats at home", None)).unwrap();

    let query = build_note_query(&NoteListParams {
        search_term: Some("cats".to_string()),
        tag_id: Some(work.to_string()),
        folder_id: None,
    });
    let hits = repo.list_notes(&query).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, tagged_match.id);
}

#[test]
fn tags_are_populated_deduplicated_and_dangling_ones_skipped() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    let tags_repo = SqliteNamedRecordRepository::tags(&conn);
    let work = create_tag(&conn, "work");
    let urgent = create_tag(&conn, "urgent");

    let mut tagged = input("tagged", None);
    tagged.tags = vec![work.clone(), urgent.clone(), work.clone()];
    let created = repo.create_note(&tagged).unwrap();
    let names = created
        .tags
        .iter()
        .map(|tag| tag.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["urgent", "work"]);

    assert!(tags_repo.delete(&urgent).unwrap());
    let fetched = repo.get_note(&created.id).unwrap().unwrap();
    assert_eq!(fetched.tags.len(), 1);
    assert_eq!(fetched.tags[0].id, work);

    let dangling: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM note_tags WHERE tag_id = ?1;",
            [urgent.as_str()],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(dangling, 1);
}

#[test]
fn update_replaces_fields_and_keeps_folder_when_none_given() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    let folder = SqliteNamedRecordRepository::folders(&conn)
        .create("Archive")
        .unwrap();
    let work = create_tag(&conn, "work");

    let mut original = input("draft", Some("first body"));
    original.folder_id = Some(folder.id.clone());
    original.tags = vec![work];
    let created = repo.create_note(&original).unwrap();

    let updated = repo
        .update_note(&created.id, &input("final", None))
        .unwrap()
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "final");
    assert_eq!(updated.content, None);
    assert!(updated.tags.is_empty());
    assert_eq!(updated.folder_id, Some(folder.id));
    assert_eq!(updated.created, created.created);
}

#[test]
fn update_and_delete_report_absent_notes() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    let missing = DocId::parse("aaaaaaaaaaaaaaaaaaaaaaaa").unwrap();

    assert_eq!(repo.get_note(&missing).unwrap(), None);
    assert_eq!(repo.update_note(&missing, &input("x", None)).unwrap(), None);
    assert!(!repo.delete_note(&missing).unwrap());
}

#[test]
fn delete_removes_note_and_its_tag_links() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);
    let work = create_tag(&conn, "work");
    let mut tagged = input("bye", None);
    tagged.tags = vec![work];
    let created = repo.create_note(&tagged).unwrap();

    assert!(repo.delete_note(&created.id).unwrap());
    assert!(!repo.delete_note(&created.id).unwrap());
    assert_eq!(repo.get_note(&created.id).unwrap(), None);

    let links: i64 = conn
        .query_row("SELECT COUNT(*) FROM note_tags;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(links, 0);
}

#[test]
fn empty_title_is_rejected_by_storage() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNoteRepository::new(&conn);

    let err = repo.create_note(&input("", None)).unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
    assert!(repo.list_notes(&NoteQuery::default()).unwrap().is_empty());
}
