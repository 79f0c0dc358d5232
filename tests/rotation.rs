use seo_blog_generator::scheduler::rotation::{
    KeywordRotation, RotationError, RotationState, DEFAULT_KEYWORDS,
};

fn read_json(path: &std::path::Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn advance_returns_pre_increment_keyword_and_wraps() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("keywords.json");
    let mut rot = KeywordRotation::create(&path, vec!["a".into(), "b".into()], 1).unwrap();

    assert_eq!(rot.advance(), "b");
    assert_eq!(rot.current_index(), 0);
    assert_eq!(read_json(&path)["current_index"], 0);
}

#[test]
fn round_robin_over_many_calls() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("keywords.json");
    let words: Vec<String> = ["x", "y", "z"].iter().map(|s| s.to_string()).collect();
    let mut rot = KeywordRotation::create(&path, words.clone(), 0).unwrap();

    let n = 11;
    let seen: Vec<String> = (0..n).map(|_| rot.advance()).collect();
    for (i, kw) in seen.iter().enumerate() {
        assert_eq!(kw, &words[i % words.len()]);
    }
    for w in &words {
        let count = seen.iter().filter(|s| *s == w).count();
        assert!(count == n / words.len() || count == n / words.len() + 1);
    }
    assert_eq!(rot.current_index(), n % words.len());
}

#[test]
fn cursor_survives_reload() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("keywords.json");
    {
        let mut rot = KeywordRotation::load_or_init(&path);
        assert_eq!(rot.advance(), DEFAULT_KEYWORDS[0]);
        assert_eq!(rot.advance(), DEFAULT_KEYWORDS[1]);
    }
    let mut rot = KeywordRotation::load_or_init(&path);
    assert_eq!(rot.current_index(), 2);
    assert_eq!(rot.advance(), DEFAULT_KEYWORDS[2]);
}

#[test]
fn missing_file_writes_builtin_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("state").join("keywords.json");
    let rot = KeywordRotation::load_or_init(&path);

    assert_eq!(rot.keywords().len(), DEFAULT_KEYWORDS.len());
    assert_eq!(rot.current_index(), 0);
    let on_disk = read_json(&path);
    assert_eq!(on_disk["keywords"][0], "wireless earbuds");
    assert_eq!(on_disk["current_index"], 0);
}

#[test]
fn corrupt_or_empty_file_is_replaced_by_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    for contents in ["{ not json", r#"{"keywords": [], "current_index": 3}"#, "{}"] {
        let path = tmp.path().join("keywords.json");
        std::fs::write(&path, contents).unwrap();
        let rot = KeywordRotation::load_or_init(&path);
        assert_eq!(rot.state(), &RotationState::builtin(), "{contents}");
        assert_eq!(read_json(&path)["keywords"][4], "digital marketing strategies");
    }
}

#[test]
fn out_of_range_cursor_is_wrapped_on_load() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("keywords.json");
    std::fs::write(&path, r#"{"keywords": ["a", "b", "c"], "current_index": 7}"#).unwrap();
    let mut rot = KeywordRotation::load_or_init(&path);
    assert_eq!(rot.current_index(), 1);
    assert_eq!(rot.advance(), "b");
}

#[test]
fn out_of_range_cursor_is_wrapped_on_create() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("keywords.json");
    let mut rot = KeywordRotation::create(&path, vec!["a".into(), "b".into()], 5).unwrap();

    assert_eq!(rot.current_index(), 1);
    assert_eq!(read_json(&path)["current_index"], 1);
    assert_eq!(rot.advance(), "b");
    assert_eq!(rot.advance(), "a");
}

#[test]
fn empty_list_is_rejected() {
    assert!(matches!(RotationState::new(vec![], 0), Err(RotationError::Empty)));

    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("keywords.json");
    let err = KeywordRotation::create(&path, vec![], 3).unwrap_err();
    assert!(matches!(err, RotationError::Empty), "{err:?}");
    assert!(!path.exists());
}
