use clap::Parser;
use levelbook_catalog::DEFAULT_SHARE_BASE_URL;
use levelbook_cli::{error_notice, run, Args, Console, EditArgs};
use levelbook_types::{Category, LevelFields};
use pretty_assertions::assert_eq;
use std::io::Cursor;
use std::path::Path;

struct Output {
    out: String,
    err: String,
    result: anyhow::Result<()>,
}

fn levelbook(dir: &Path, argv: &[&str], stdin: &str) -> Output {
    let dir = dir.to_str().unwrap();
    let mut full = vec!["levelbook", "--data-dir", dir];
    full.extend_from_slice(argv);
    let args = Args::try_parse_from(full).unwrap();

    let mut input = Cursor::new(stdin.as_bytes().to_vec());
    let mut out = Vec::new();
    let mut err = Vec::new();
    let result = {
        let mut console = Console {
            input: &mut input,
            out: &mut out,
            err: &mut err,
        };
        run(args, &mut console)
    };
    Output {
        out: String::from_utf8(out).unwrap(),
        err: String::from_utf8(err).unwrap(),
        result,
    }
}

fn add_bloodbath(dir: &Path) {
    levelbook(
        dir,
        &[
            "add", "--name", "Bloodbath", "--creator", "Riot", "--category", "demon",
            "--difficulty", "extreme", "--tags", "nine circles, old",
        ],
        "",
    )
    .result
    .unwrap();
}

fn listed(dir: &Path) -> serde_json::Value {
    let output = levelbook(dir, &["list", "--json"], "");
    output.result.unwrap();
    serde_json::from_str(&output.out).unwrap()
}

// ── Parsing ──────────────────────────────────────────────────────

#[test]
fn unknown_filter_code_is_a_usage_error() {
    let parsed = Args::try_parse_from(["levelbook", "list", "--difficulty", "extreme-demon"]);
    assert!(parsed.is_err());
}

#[test]
fn unknown_category_is_a_usage_error() {
    let parsed = Args::try_parse_from([
        "levelbook", "add", "--name", "a", "--creator", "b", "--category", "platformer",
    ]);
    assert!(parsed.is_err());
}

#[test]
fn edit_args_overlay_only_given_fields() {
    let base = LevelFields::new("Bloodbath", "Riot", Category::Demon, "extreme").with_tags("old");
    let edit = EditArgs {
        creator: Some("Riot & co".into()),
        tags: Some(String::new()),
        ..EditArgs::default()
    };
    let fields = edit.apply(base);
    assert_eq!(fields.name, "Bloodbath");
    assert_eq!(fields.creator, "Riot & co");
    assert_eq!(fields.difficulty, "extreme");
    assert_eq!(fields.tags, "");
}

#[test]
fn edit_args_drop_stars_when_difficulty_changes() {
    let base = LevelFields::new("Toe 2", "Etzer", Category::Rated, "insane").with_star_rating("9");
    let edit = EditArgs {
        difficulty: Some("harder".into()),
        ..EditArgs::default()
    };
    assert_eq!(edit.apply(base.clone()).star_rating, None);

    let edit = EditArgs {
        difficulty: Some("harder".into()),
        stars: Some("7".into()),
        ..EditArgs::default()
    };
    assert_eq!(edit.apply(base.clone()).star_rating.as_deref(), Some("7"));

    let edit = EditArgs {
        name: Some("Toe 3".into()),
        ..EditArgs::default()
    };
    assert_eq!(edit.apply(base).star_rating.as_deref(), Some("9"));
}

// ── Mutations ────────────────────────────────────────────────────

#[test]
fn add_then_list_shows_level_in_its_bucket() {
    let dir = tempfile::tempdir().unwrap();
    add_bloodbath(dir.path());

    let output = levelbook(dir.path(), &["list"], "");
    output.result.unwrap();
    assert!(output.out.contains("Demon Levels (1)"));
    assert!(output.out.contains("Bloodbath by Riot  [Extreme Demon]"));
    assert!(output.out.contains("(nine circles, old)"));
    assert!(output.out.contains("Rated Levels (0)"));
}

#[test]
fn empty_list_shows_empty_state_per_bucket() {
    let dir = tempfile::tempdir().unwrap();
    let output = levelbook(dir.path(), &["list"], "");
    output.result.unwrap();
    assert_eq!(output.out.matches("No levels found").count(), 3);
}

#[test]
fn invalid_add_fails_and_stores_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = levelbook(
        dir.path(),
        &["add", "--name", "x", "--creator", "y", "--category", "demon", "--difficulty", "auto"],
        "",
    );
    assert!(output.result.is_err());
    assert_eq!(listed(dir.path())["demon"], serde_json::json!([]));
}

#[test]
fn edit_keeps_unspecified_fields() {
    let dir = tempfile::tempdir().unwrap();
    add_bloodbath(dir.path());
    let id = listed(dir.path())["demon"][0]["id"].as_u64().unwrap().to_string();

    levelbook(dir.path(), &["edit", &id, "--difficulty", "insane"], "")
        .result
        .unwrap();

    let card = &listed(dir.path())["demon"][0];
    assert_eq!(card["name"], "Bloodbath");
    assert_eq!(card["label"], "Insane Demon");
    assert_eq!(card["tags"], serde_json::json!(["nine circles", "old"]));
}

#[test]
fn edit_to_another_tier_clears_old_stars() {
    let dir = tempfile::tempdir().unwrap();
    levelbook(
        dir.path(),
        &[
            "add", "--name", "Toe 2", "--creator", "Etzer", "--category", "rated",
            "--difficulty", "insane", "--stars", "9",
        ],
        "",
    )
    .result
    .unwrap();
    let id = listed(dir.path())["rated"][0]["id"].as_u64().unwrap().to_string();
    assert_eq!(listed(dir.path())["rated"][0]["label"], "9★");

    levelbook(dir.path(), &["edit", &id, "--difficulty", "harder"], "")
        .result
        .unwrap();
    assert_eq!(listed(dir.path())["rated"][0]["label"], "Harder (6*-7*)");

    levelbook(dir.path(), &["edit", &id, "--stars", "7"], "")
        .result
        .unwrap();
    assert_eq!(listed(dir.path())["rated"][0]["label"], "7★");
}

#[test]
fn edit_unknown_id_fails() {
    let dir = tempfile::tempdir().unwrap();
    add_bloodbath(dir.path());
    let output = levelbook(dir.path(), &["edit", "999", "--name", "x"], "");
    let err = output.result.unwrap_err();
    assert!(err.to_string().contains("999"));
}

#[test]
fn remove_twice_reports_missing_level() {
    let dir = tempfile::tempdir().unwrap();
    add_bloodbath(dir.path());
    let id = listed(dir.path())["demon"][0]["id"].as_u64().unwrap().to_string();

    let first = levelbook(dir.path(), &["remove", &id], "");
    first.result.unwrap();
    assert!(first.out.contains("Removed level"));

    let second = levelbook(dir.path(), &["remove", &id], "");
    second.result.unwrap();
    assert!(second.err.contains("No level with id"));
}

// ── Listing ──────────────────────────────────────────────────────

#[test]
fn list_filters_and_prints_chips() {
    let dir = tempfile::tempdir().unwrap();
    add_bloodbath(dir.path());
    levelbook(
        dir.path(),
        &["add", "--name", "Acu", "--creator", "neigefeu", "--category", "demon", "--difficulty", "hard"],
        "",
    )
    .result
    .unwrap();

    let output = levelbook(dir.path(), &["list", "--search", "RIOT", "--sort", "name"], "");
    output.result.unwrap();
    assert!(output.out.contains("Search: \"RIOT\""));
    assert!(output.out.contains("Sort: Name (A-Z)"));
    assert!(output.out.contains("Bloodbath"));
    assert!(!output.out.contains("Acu"));
}

// ── Sharing ──────────────────────────────────────────────────────

#[test]
fn share_then_import_into_another_directory() {
    let source = tempfile::tempdir().unwrap();
    add_bloodbath(source.path());
    let shared = levelbook(source.path(), &["share"], "");
    shared.result.unwrap();
    let url = shared.out.trim().to_string();
    assert!(url.starts_with(DEFAULT_SHARE_BASE_URL));
    assert!(shared.err.contains("Share link copied to clipboard!"));

    let target = tempfile::tempdir().unwrap();
    let imported = levelbook(target.path(), &["import", &url, "--yes"], "");
    imported.result.unwrap();
    assert!(imported.err.contains("Levels imported successfully!"));
    assert_eq!(listed(target.path()), listed(source.path()));
}

#[test]
fn declined_import_keeps_current_list() {
    let source = tempfile::tempdir().unwrap();
    add_bloodbath(source.path());
    let url = levelbook(source.path(), &["share"], "").out.trim().to_string();

    let target = tempfile::tempdir().unwrap();
    let output = levelbook(target.path(), &["import", &url], "n\n");
    output.result.unwrap();
    assert!(output.err.contains("Import 1 shared levels?"));
    assert_eq!(listed(target.path())["demon"], serde_json::json!([]));
}

#[test]
fn confirmed_import_accepts_bare_token() {
    let source = tempfile::tempdir().unwrap();
    add_bloodbath(source.path());
    let url = levelbook(source.path(), &["share"], "").out.trim().to_string();
    let token = url.split_once('#').unwrap().1.to_string();

    let target = tempfile::tempdir().unwrap();
    levelbook(target.path(), &["import", &token], "y\n")
        .result
        .unwrap();
    assert_eq!(listed(target.path())["demon"][0]["name"], "Bloodbath");
}

#[test]
fn garbage_import_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    add_bloodbath(dir.path());
    let output = levelbook(dir.path(), &["import", "https://levelbook.local/#@@@", "--yes"], "");
    let err = output.result.unwrap_err();
    assert_eq!(err.to_string(), "Invalid shared data");
    assert_eq!(listed(dir.path())["demon"][0]["name"], "Bloodbath");
}

#[test]
fn rejected_interactive_import_writes_nothing_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let output = levelbook(dir.path(), &["import", "@@@"], "y\n");
    assert!(output.result.is_err());
    assert_eq!(output.err, "");
}

#[test]
fn failure_notice_is_one_line() {
    let dir = tempfile::tempdir().unwrap();
    let output = levelbook(dir.path(), &["import", "W10", "--yes"], "");
    let notice = error_notice(&output.result.unwrap_err());
    assert!(!notice.contains('\n'));
    assert_eq!(notice, "Invalid shared data: share payload contains no levels");
}

#[test]
fn sharing_empty_list_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = levelbook(dir.path(), &["share"], "");
    let err = output.result.unwrap_err();
    assert_eq!(err.to_string(), "No levels to share!");
    assert!(output.out.is_empty());
}

// ── Configuration ────────────────────────────────────────────────

#[test]
fn config_file_overrides_key_and_base_url() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"storage_key":"mine","share_base_url":"https://example.org/levels"}"#,
    )
    .unwrap();
    add_bloodbath(dir.path());
    assert!(dir.path().join("mine.json").exists());

    let output = levelbook(dir.path(), &["share"], "");
    output.result.unwrap();
    assert!(output.out.starts_with("https://example.org/levels#"));
}

#[test]
fn invalid_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.json"), "{").unwrap();
    let output = levelbook(dir.path(), &["list"], "");
    let err = output.result.unwrap_err();
    assert!(err.to_string().contains("invalid config"));
}

// ── Options ──────────────────────────────────────────────────────

#[test]
fn options_overview_lists_filter_codes() {
    let dir = tempfile::tempdir().unwrap();
    let output = levelbook(dir.path(), &["options"], "");
    output.result.unwrap();
    assert!(output.out.contains("insane-demon"));
    assert!(output.out.contains("Creator (A-Z)"));
}

#[test]
fn options_for_rated_difficulty_lists_stars() {
    let dir = tempfile::tempdir().unwrap();
    let output = levelbook(
        dir.path(),
        &["options", "--category", "rated", "--difficulty", "harder"],
        "",
    );
    output.result.unwrap();
    assert_eq!(output.out.trim(), "Stars: 6, 7");
}
