//! End-to-end sync passes over real files in a temp dir.

mod common;

use std::fs;

use rhythmsync::core::{
    FileRecord, LibraryStore, NoopReporter, RatingSource, SONG_KIND, SyncConfig, SyncError,
    SyncMode, SyncReporter, SyncSummary, sync,
};

use common::{popms, tagged_mp3, untagged_mp3, write_database};

fn config(mode: SyncMode, db: &std::path::Path) -> SyncConfig {
    SyncConfig::new(mode, db)
}

/// (title, rating, play count) of every song entry in the saved database.
fn songs(path: &std::path::Path) -> Vec<(String, i64, u64)> {
    let mut store = LibraryStore::load(path).unwrap();
    store
        .entries(SONG_KIND)
        .map(|e| (e.title().unwrap_or_default(), e.rating(), e.play_count()))
        .collect()
}

#[test]
fn import_fills_missing_rating_from_own_frame() {
    let dir = tempfile::tempdir().unwrap();
    let mp3 = tagged_mp3(dir.path(), "Heroes.mp3", &[("Rhythmbox", 128, 5)]);
    let db = write_database(dir.path(), &[(mp3.as_path(), "")]);

    let mut store = LibraryStore::load(&db).unwrap();
    let summary = sync::run(&mut store, &config(SyncMode::Import, &db), &mut NoopReporter).unwrap();

    assert_eq!(
        summary,
        SyncSummary {
            items: 1,
            changed: 1,
            skipped: 0
        }
    );
    assert_eq!(songs(&db), vec![("Heroes".to_string(), 128, 5)]);

    let saved = fs::read_to_string(&db).unwrap();
    assert!(saved.contains("<rating>128</rating>"), "{saved}");
    assert!(saved.contains("<play-count>5</play-count>"), "{saved}");
}

#[test]
fn import_snaps_foreign_rating_onto_star_value() {
    let dir = tempfile::tempdir().unwrap();
    let mp3 = tagged_mp3(
        dir.path(),
        "Low.mp3",
        &[("Windows Media Player 9 Series", 100, 0), ("MusicBee", 255, 3)],
    );
    let db = write_database(dir.path(), &[(mp3.as_path(), "")]);
    let out = dir.path().join("out.xml");

    let mut cfg = config(SyncMode::Import, &db);
    cfg.output = Some(out.clone());
    let mut store = LibraryStore::load(&db).unwrap();
    sync::run(&mut store, &cfg, &mut NoopReporter).unwrap();

    // 100 is a 3-star rating; the first frame wins.
    assert_eq!(songs(&out), vec![("Low".to_string(), 128, 0)]);
    // Input untouched when an output is given.
    assert_eq!(songs(&db), vec![("Low".to_string(), 0, 0)]);
}

#[test]
fn import_keeps_existing_rating_unless_forced() {
    let dir = tempfile::tempdir().unwrap();
    let mp3 = tagged_mp3(dir.path(), "Fame.mp3", &[("Rhythmbox", 255, 9)]);
    let db = write_database(
        dir.path(),
        &[(mp3.as_path(), "    <rating>64</rating>\n    <play-count>2</play-count>\n")],
    );

    let mut store = LibraryStore::load(&db).unwrap();
    let summary = sync::run(&mut store, &config(SyncMode::Import, &db), &mut NoopReporter).unwrap();
    assert_eq!(summary.changed, 0);
    assert_eq!(songs(&db), vec![("Fame".to_string(), 64, 2)]);

    let mut forced = config(SyncMode::Import, &db);
    forced.force = true;
    let mut store = LibraryStore::load(&db).unwrap();
    let summary = sync::run(&mut store, &forced, &mut NoopReporter).unwrap();
    assert_eq!(summary.changed, 1);
    assert_eq!(songs(&db), vec![("Fame".to_string(), 255, 9)]);
}

#[test]
fn forced_import_of_unrated_file_clears_rating() {
    let dir = tempfile::tempdir().unwrap();
    let mp3 = tagged_mp3(dir.path(), "Blank.mp3", &[]);
    let db = write_database(dir.path(), &[(mp3.as_path(), "    <rating>196</rating>\n")]);

    let mut cfg = config(SyncMode::Import, &db);
    cfg.force = true;
    let mut store = LibraryStore::load(&db).unwrap();
    sync::run(&mut store, &cfg, &mut NoopReporter).unwrap();

    let saved = fs::read_to_string(&db).unwrap();
    assert!(!saved.contains("<rating>"), "{saved}");
}

#[test]
fn dry_import_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mp3 = tagged_mp3(dir.path(), "Heroes.mp3", &[("Rhythmbox", 196, 1)]);
    let db = write_database(dir.path(), &[(mp3.as_path(), "")]);
    let before = fs::read(&db).unwrap();

    let mut cfg = config(SyncMode::Import, &db);
    cfg.dry = true;
    let mut store = LibraryStore::load(&db).unwrap();
    let summary = sync::run(&mut store, &cfg, &mut NoopReporter).unwrap();

    assert_eq!(summary.changed, 1);
    assert_eq!(fs::read(&db).unwrap(), before);
}

#[test]
fn export_adds_own_frame_to_file_without_ratings() {
    let dir = tempfile::tempdir().unwrap();
    let mp3 = tagged_mp3(dir.path(), "Starman.mp3", &[]);
    let db = write_database(dir.path(), &[(mp3.as_path(), "    <rating>255</rating>\n")]);
    let db_before = fs::read(&db).unwrap();

    let mut store = LibraryStore::load(&db).unwrap();
    let summary = sync::run(&mut store, &config(SyncMode::Export, &db), &mut NoopReporter).unwrap();

    assert_eq!(summary.changed, 1);
    assert_eq!(popms(&mp3), vec![("Rhythmbox".to_string(), 255, 0)]);
    // Export never rewrites the database.
    assert_eq!(fs::read(&db).unwrap(), db_before);
}

#[test]
fn export_leaves_foreign_frames_alone() {
    let dir = tempfile::tempdir().unwrap();
    let mp3 = tagged_mp3(dir.path(), "Changes.mp3", &[("MusicBee", 64, 4)]);
    let db = write_database(
        dir.path(),
        &[(mp3.as_path(), "    <rating>196</rating>\n    <play-count>8</play-count>\n")],
    );

    let mut cfg = config(SyncMode::Export, &db);
    cfg.force = true;
    let mut store = LibraryStore::load(&db).unwrap();
    sync::run(&mut store, &cfg, &mut NoopReporter).unwrap();

    let frames = popms(&mp3);
    assert!(frames.contains(&("MusicBee".to_string(), 64, 4)), "{frames:?}");
    assert!(frames.contains(&("Rhythmbox".to_string(), 196, 8)), "{frames:?}");
}

#[test]
fn dry_export_counts_like_a_real_one() {
    let dir = tempfile::tempdir().unwrap();
    let rated = tagged_mp3(dir.path(), "Rated.mp3", &[("Rhythmbox", 128, 1)]);
    let unrated = tagged_mp3(dir.path(), "Unrated.mp3", &[]);
    let nothing = tagged_mp3(dir.path(), "Nothing.mp3", &[]);
    let db = write_database(
        dir.path(),
        &[
            // owned frame already set, not forced: no change
            (rated.as_path(), "    <rating>255</rating>\n"),
            // gains a frame
            (unrated.as_path(), "    <rating>64</rating>\n"),
            // nothing to write on either side
            (nothing.as_path(), ""),
        ],
    );

    let mut dry = config(SyncMode::Export, &db);
    dry.dry = true;
    let mut store = LibraryStore::load(&db).unwrap();
    let dry_summary = sync::run(&mut store, &dry, &mut NoopReporter).unwrap();

    assert!(popms(&unrated).is_empty());
    assert_eq!(popms(&rated), vec![("Rhythmbox".to_string(), 128, 1)]);

    let mut store = LibraryStore::load(&db).unwrap();
    let real_summary = sync::run(&mut store, &config(SyncMode::Export, &db), &mut NoopReporter).unwrap();

    assert_eq!(dry_summary, real_summary);
    assert_eq!(real_summary.items, 3);
    assert_eq!(real_summary.changed, 1);
    assert_eq!(popms(&unrated), vec![("Rhythmbox".to_string(), 64, 0)]);
}

#[test]
fn export_passes_over_bad_entries() {
    let dir = tempfile::tempdir().unwrap();
    let too_high = tagged_mp3(dir.path(), "TooHigh.mp3", &[]);
    let good = tagged_mp3(dir.path(), "Good.mp3", &[]);

    let xml = common::database(&[
        (too_high.as_path(), "    <rating>300</rating>\n"),
        (good.as_path(), "    <rating>255</rating>\n"),
    ])
    .replace(
        "</rhythmdb>",
        "  <entry type=\"song\">\n    <title>Nowhere</title>\n    <rating>128</rating>\n  </entry>\n</rhythmdb>",
    );
    let db = dir.path().join("rhythmdb.xml");
    fs::write(&db, xml).unwrap();

    let mut store = LibraryStore::load(&db).unwrap();
    let summary = sync::run(&mut store, &config(SyncMode::Export, &db), &mut NoopReporter).unwrap();

    // 300 is opened but rejected; the entry without a location never gets a file.
    assert_eq!(
        summary,
        SyncSummary {
            items: 2,
            changed: 1,
            skipped: 1
        }
    );
    assert!(popms(&too_high).is_empty());
    assert_eq!(popms(&good), vec![("Rhythmbox".to_string(), 255, 0)]);
}

#[test]
fn missing_and_untagged_files_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("Gone.mp3");
    let plain = untagged_mp3(dir.path(), "Plain.mp3");
    let good = tagged_mp3(dir.path(), "Good.mp3", &[("Rhythmbox", 255, 2)]);
    let db = write_database(dir.path(), &[(missing.as_path(), ""), (plain.as_path(), ""), (good.as_path(), "")]);

    let mut store = LibraryStore::load(&db).unwrap();
    let summary = sync::run(&mut store, &config(SyncMode::Import, &db), &mut NoopReporter).unwrap();

    assert_eq!(
        summary,
        SyncSummary {
            items: 1,
            changed: 1,
            skipped: 2
        }
    );
    assert_eq!(
        songs(&db),
        vec![
            ("Gone".to_string(), 0, 0),
            ("Plain".to_string(), 0, 0),
            ("Good".to_string(), 255, 2),
        ]
    );
}

#[test]
fn reporter_sees_every_counted_item() {
    #[derive(Default)]
    struct Recorder(Vec<SyncSummary>);

    impl SyncReporter for Recorder {
        fn on_progress(&mut self, mode: SyncMode, summary: &SyncSummary) {
            assert_eq!(mode, SyncMode::Import);
            self.0.push(*summary);
        }
    }

    let dir = tempfile::tempdir().unwrap();
    let a = tagged_mp3(dir.path(), "A.mp3", &[("Rhythmbox", 1, 0)]);
    let b = tagged_mp3(dir.path(), "B.mp3", &[]);
    let gone = dir.path().join("Gone.mp3");
    let db = write_database(dir.path(), &[(a.as_path(), ""), (gone.as_path(), ""), (b.as_path(), "")]);

    let mut cfg = config(SyncMode::Import, &db);
    cfg.dry = true;
    let mut store = LibraryStore::load(&db).unwrap();
    let mut recorder = Recorder::default();
    sync::run(&mut store, &cfg, &mut recorder).unwrap();

    let seen: Vec<_> = recorder.0.iter().map(|s| (s.items, s.changed)).collect();
    assert_eq!(seen, vec![(1, 1), (2, 1)]);
}

#[test]
fn file_record_open_errors() {
    let dir = tempfile::tempdir().unwrap();

    let err = FileRecord::open(dir.path().join("nope.mp3")).unwrap_err();
    assert!(matches!(err, SyncError::NotFound(_)));

    let plain = untagged_mp3(dir.path(), "plain.mp3");
    let err = FileRecord::open(&plain).unwrap_err();
    assert!(matches!(err, SyncError::UnsupportedFormat(_)));
}

#[test]
fn file_record_save_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mp3 = tagged_mp3(dir.path(), "Song.mp3", &[]);

    let mut file = FileRecord::open(&mp3).unwrap();
    assert_eq!(file.source(), &RatingSource::None);
    file.set_stars(5, false).unwrap();
    assert!(file.save().unwrap());

    let mut file = FileRecord::open(&mp3).unwrap();
    assert_eq!(file.source(), &RatingSource::Owned);
    assert_eq!(file.rating(), 255);
    assert_eq!(file.stars(), 5);

    file.set_rating(0, true);
    assert!(file.save().unwrap());
    assert!(popms(&mp3).is_empty());
}
