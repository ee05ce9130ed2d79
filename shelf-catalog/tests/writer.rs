use std::fs::{self, OpenOptions};
use std::path::Path;

use shelf_catalog::{AppendOutcome, CatalogError, CatalogWriter, HEADER};
use shelf_core::Record;
use tempfile::TempDir;

fn tf2() -> Record {
    Record::new("440", "Team Fortress 2")
        .with_tags(["Free to Play", "Action"])
        .with_image("http://x/img.jpg")
}

fn data_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .skip(1)
        .map(str::to_string)
        .collect()
}

#[test]
fn missing_catalog_has_no_ids() {
    let tmp = TempDir::new().unwrap();
    let writer = CatalogWriter::new(tmp.path().join("games.csv"));
    assert!(writer.existing_ids().unwrap().is_empty());
}

#[test]
fn first_append_creates_header_and_one_row() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("games.csv");
    let mut writer = CatalogWriter::new(&path);

    assert_eq!(writer.append(&tf2()).unwrap(), AppendOutcome::Appended);

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        format!(
            "{HEADER}\n440,\"Team Fortress 2\",backlog,Free to Play;Action,http://x/img.jpg\n"
        )
    );
}

#[test]
fn empty_existing_file_gets_header() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("games.csv");
    fs::write(&path, "").unwrap();

    let mut writer = CatalogWriter::new(&path);
    writer.append(&tf2()).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with(HEADER));
    assert_eq!(data_lines(&path).len(), 1);
}

#[test]
fn duplicate_append_is_a_no_op() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("games.csv");
    let mut writer = CatalogWriter::new(&path);
    writer.append(&tf2()).unwrap();
    let before = fs::read(&path).unwrap();

    let renamed = Record::new("440", "Something Else");
    assert_eq!(
        writer.append(&renamed).unwrap(),
        AppendOutcome::SkippedDuplicate
    );
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn new_ids_add_exactly_one_row_each() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("games.csv");
    let mut writer = CatalogWriter::new(&path);

    for (i, id) in ["10", "20", "30"].iter().enumerate() {
        writer.append(&Record::new(*id, format!("Game {id}"))).unwrap();
        let lines = data_lines(&path);
        assert_eq!(lines.len(), i + 1);
        assert!(lines.last().unwrap().starts_with(&format!("{id},")));
    }
}

#[test]
fn appended_id_is_reported_present() {
    let tmp = TempDir::new().unwrap();
    let mut writer = CatalogWriter::new(tmp.path().join("games.csv"));
    assert!(!writer.contains("440").unwrap());
    writer.append(&tf2()).unwrap();
    assert!(writer.contains("440").unwrap());
    assert!(writer.existing_ids().unwrap().contains("440"));
}

#[test]
fn quoted_title_round_trips_as_single_row() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("games.csv");
    let mut writer = CatalogWriter::new(&path);
    writer
        .append(&Record::new("7", r#"He said "Go""#).with_image("i"))
        .unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].len(), 5);
    assert_eq!(&rows[0][1], "He said 'Go'");
}

#[test]
fn missing_trailing_newline_is_repaired() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("games.csv");
    fs::write(&path, format!("{HEADER}\n10,\"Old\",backlog,,img")).unwrap();

    let mut writer = CatalogWriter::new(&path);
    writer.append(&tf2()).unwrap();

    let lines = data_lines(&path);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "10,\"Old\",backlog,,img");
    assert!(lines[1].starts_with("440,"));
}

#[test]
fn legacy_crlf_catalog_is_deduplicated() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("games.csv");
    fs::write(
        &path,
        "appid,title,status,tags,image\r\n440,Team Fortress 2,backlog,Action,http://x/img.jpg\r\n",
    )
    .unwrap();

    let mut writer = CatalogWriter::new(&path);
    assert_eq!(
        writer.append(&tf2()).unwrap(),
        AppendOutcome::SkippedDuplicate
    );
}

#[test]
fn parent_directories_are_created() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("nested").join("dir").join("games.csv");
    let mut writer = CatalogWriter::new(&path);
    writer.append(&tf2()).unwrap();
    assert!(path.exists());
}

#[test]
fn whitespace_only_file_is_restarted_with_header() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("games.csv");
    fs::write(&path, "\n").unwrap();

    let mut writer = CatalogWriter::new(&path);
    assert_eq!(writer.append(&tf2()).unwrap(), AppendOutcome::Appended);
    assert_eq!(
        writer.append(&tf2()).unwrap(),
        AppendOutcome::SkippedDuplicate
    );

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with(&format!("{HEADER}\n440,")));
    assert_eq!(data_lines(&path).len(), 1);
}

#[test]
fn unbalanced_quote_does_not_hide_later_ids() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("games.csv");
    fs::write(
        &path,
        format!("{HEADER}\n1,\"Broken,backlog,,i\n440,\"TF2\",backlog,,i\n"),
    )
    .unwrap();
    let before = fs::read(&path).unwrap();

    let mut writer = CatalogWriter::new(&path);
    assert!(writer.contains("440").unwrap());
    assert!(writer.contains("1").unwrap());
    assert_eq!(
        writer.append(&tf2()).unwrap(),
        AppendOutcome::SkippedDuplicate
    );
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn catalog_below_a_regular_file_is_an_io_error() {
    let tmp = TempDir::new().unwrap();
    let blocker = tmp.path().join("not-a-dir");
    fs::write(&blocker, "x").unwrap();

    let mut writer = CatalogWriter::new(blocker.join("games.csv"));
    assert!(matches!(writer.append(&tf2()), Err(CatalogError::Io(_))));
    assert_eq!(fs::read(&blocker).unwrap(), b"x");
}

#[test]
fn read_only_catalog_is_an_io_error_and_unchanged() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("games.csv");
    let mut writer = CatalogWriter::new(&path);
    writer.append(&tf2()).unwrap();
    let before = fs::read(&path).unwrap();

    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_readonly(true);
    fs::set_permissions(&path, perms.clone()).unwrap();

    // Privileged users ignore the read-only bit.
    let writable = OpenOptions::new().append(true).open(&path).is_ok();
    if !writable {
        let result = writer.append(&Record::new("570", "Dota 2"));
        assert!(matches!(result, Err(CatalogError::Io(_))));
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[allow(clippy::permissions_set_readonly_false)]
    perms.set_readonly(false);
    fs::set_permissions(&path, perms).unwrap();
}
