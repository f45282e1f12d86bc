use quiz_core::db::open_db;
use quiz_core::{
    Answer, ErrorKind, QuestionRepository, RepoResult, SqliteQuestionRepository,
    SqliteThemeRepository, ThemeRepository,
};
use std::path::Path;
use std::sync::{Arc, Barrier};
use std::thread;

fn race<T, F>(path: &Path, contenders: usize, op: F) -> Vec<RepoResult<T>>
where
    T: Send + 'static,
    F: Fn(&rusqlite::Connection) -> RepoResult<T> + Send + Sync + 'static,
{
    let barrier = Arc::new(Barrier::new(contenders));
    let op = Arc::new(op);
    let handles: Vec<_> = (0..contenders)
        .map(|_| {
            let path = path.to_path_buf();
            let barrier = Arc::clone(&barrier);
            let op = Arc::clone(&op);
            thread::spawn(move || {
                let conn = open_db(&path).unwrap();
                barrier.wait();
                op(&conn)
            })
        })
        .collect();

    handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect()
}

#[test]
fn concurrent_theme_creation_with_same_title_has_one_winner() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quiz.db");
    drop(open_db(&path).unwrap());

    let results = race(&path, 4, |conn| {
        SqliteThemeRepository::try_new(conn)?.create_theme("Sports")
    });

    let winners = results.iter().filter(|result| result.is_ok()).count();
    assert_eq!(winners, 1);
    assert!(results
        .iter()
        .filter_map(|result| result.as_ref().err())
        .all(|err| err.kind() == ErrorKind::Conflict));

    let conn = open_db(&path).unwrap();
    let themes = SqliteThemeRepository::try_new(&conn)
        .unwrap()
        .list_themes()
        .unwrap();
    assert_eq!(themes.len(), 1);
}

#[test]
fn concurrent_question_creation_with_same_title_has_one_winner() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quiz.db");
    let theme_id = {
        let conn = open_db(&path).unwrap();
        let repo = SqliteThemeRepository::try_new(&conn).unwrap();
        repo.create_theme("Sports").unwrap().id
    };

    let results = race(&path, 4, move |conn| {
        SqliteQuestionRepository::try_new(conn)?.create_question(
            "Who won?",
            theme_id,
            &[Answer::correct("Us"), Answer::incorrect("Them")],
        )
    });

    assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);

    let conn = open_db(&path).unwrap();
    let questions = SqliteQuestionRepository::try_new(&conn)
        .unwrap()
        .list_questions(Some(theme_id))
        .unwrap();
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].answers.len(), 2);
}
