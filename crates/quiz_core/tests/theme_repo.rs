use quiz_core::db::open_db_in_memory;
use quiz_core::{
    EntityKind, ErrorKind, RepoError, SqliteThemeRepository, Theme, ThemeRepository,
    ValidationError,
};

#[test]
fn create_theme_assigns_id_and_is_readable_both_ways() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteThemeRepository::try_new(&conn).unwrap();

    let created = repo.create_theme("Sports").unwrap();
    assert_eq!(created.title, "Sports");

    let by_title = repo.get_theme_by_title("Sports").unwrap();
    assert_eq!(by_title, Some(created.clone()));

    let by_id = repo.get_theme_by_id(created.id).unwrap();
    assert_eq!(by_id, Some(created));
}

#[test]
fn duplicate_title_is_conflict() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteThemeRepository::try_new(&conn).unwrap();

    repo.create_theme("Sports").unwrap();
    let err = repo.create_theme("Sports").unwrap_err();

    assert!(matches!(
        &err,
        RepoError::Conflict { entity: EntityKind::Theme, key } if key == "Sports"
    ));
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(repo.list_themes().unwrap().len(), 1);
}

#[test]
fn blank_title_is_rejected_before_write() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteThemeRepository::try_new(&conn).unwrap();

    let err = repo.create_theme("   ").unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::EmptyTitle { .. })
    ));
    assert!(repo.list_themes().unwrap().is_empty());
}

#[test]
fn lookups_for_missing_themes_are_empty_not_errors() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteThemeRepository::try_new(&conn).unwrap();

    assert_eq!(repo.get_theme_by_title("Nope").unwrap(), None);
    assert_eq!(repo.get_theme_by_id(999).unwrap(), None);
}

#[test]
fn list_themes_keeps_insertion_order_and_is_repeatable() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteThemeRepository::try_new(&conn).unwrap();

    let history = repo.create_theme("History").unwrap();
    let art = repo.create_theme("Art").unwrap();
    let science = repo.create_theme("Science").unwrap();

    let expected: Vec<Theme> = vec![history, art, science];
    assert_eq!(repo.list_themes().unwrap(), expected);
    assert_eq!(repo.list_themes().unwrap(), expected);
}
