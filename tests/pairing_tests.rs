use batch_patch::pairing::{
    FilenameRecord, build_index, decompose, index_listing, neutralize, resolve, resolve_patch_jobs,
};
use std::path::PathBuf;

fn record(path: &str) -> FilenameRecord {
    FilenameRecord::from_path(&PathBuf::from(path)).unwrap()
}

#[test]
fn decompose_minimal_name_and_extension() {
    let r = decompose("file.txt").unwrap();

    assert_eq!(r.group, None);
    assert_eq!(r.main_name, "file");
    assert_eq!(r.episode, None);
    assert_eq!(r.version, 1);
    assert_eq!(r.qualifiers, None);
    assert_eq!(r.hash, None);
    assert_eq!(r.extension, "txt");
}

#[test]
fn decompose_version_without_episode() {
    let r = decompose("file v2.txt").unwrap();

    assert_eq!(r.main_name, "file");
    assert_eq!(r.episode, None);
    assert_eq!(r.version, 2);
    assert_eq!(r.extension, "txt");
    assert_eq!(r.identity_key(), decompose("file.txt").unwrap().identity_key());
}

#[test]
fn decompose_all_fields() {
    let r = decompose("[Grp] Show - 01v3 (720p) [ABCD1234].mkv").unwrap();

    assert_eq!(r.group.as_deref(), Some("Grp"));
    assert_eq!(r.main_name, "Show");
    assert_eq!(r.episode.as_deref(), Some("01"));
    assert_eq!(r.version, 3);
    assert_eq!(r.qualifiers.as_deref(), Some("720p"));
    assert_eq!(r.hash.as_deref(), Some("ABCD1234"));
    assert_eq!(r.extension, "mkv");
}

#[test]
fn decompose_keeps_letters_in_episode() {
    let op = decompose("[Grp] Show - NCOP2 (1080p).mkv").unwrap();
    assert_eq!(op.episode.as_deref(), Some("NCOP2"));
    assert_eq!(op.version, 1);

    let special = decompose("Show - S1v2.mkv").unwrap();
    assert_eq!(special.episode.as_deref(), Some("S1"));
    assert_eq!(special.version, 2);

    let spaced = decompose("[Grp] Show - 01 v2 (720p).mkv").unwrap();
    assert_eq!(spaced.episode.as_deref(), Some("01"));
    assert_eq!(spaced.version, 2);
}

#[test]
fn decompose_multi_word_title_with_separator_inside() {
    let r = decompose("[Grp] Show - The Movie - 02.mkv").unwrap();

    assert_eq!(r.main_name, "Show - The Movie");
    assert_eq!(r.episode.as_deref(), Some("02"));
}

#[test]
fn decompose_uses_last_extension() {
    let r = decompose("[Grp] Show - 01 [0123ABCD].en.ass").unwrap();

    assert_eq!(r.episode.as_deref(), Some("01"));
    assert_eq!(r.hash.as_deref(), Some("0123ABCD"));
    assert_eq!(r.extension, "ass");
}

#[test]
fn decompose_rejects_non_matching_names() {
    assert_eq!(decompose("README"), None);
    assert_eq!(decompose(".bashrc"), None);
    assert_eq!(decompose("[Grp] Show - 01 (720p).torrent"), None);
    assert_eq!(decompose("[Grp] Show - 01.TORRENT"), None);
    assert_eq!(decompose("Show - 01v0.mkv"), None);
    assert_eq!(decompose("   .mkv"), None);
}

#[test]
fn decompose_is_total() {
    let inputs = [
        "",
        ".",
        "..",
        "[",
        "[]",
        "[].x",
        " - ",
        " - .mkv",
        "v2",
        " v2.mkv",
        "Show v99999999999999999999.mkv",
        "Ünïcödé - 01.mkv",
        "a\u{0}b.c",
        "((((.)))",
        "[Grp] [Grp] [Grp]",
    ];

    for input in inputs {
        let _ = decompose(input);
    }

    let long = "x - ".repeat(500) + ".mkv";
    let _ = decompose(&long);
}

#[test]
fn compose_then_decompose_returns_same_record() {
    let composed = "[Grp] Some Show - 12v4 (BD 1080p) [DEADBEEF].mkv";
    let original = FilenameRecord {
        group: Some("Grp".to_string()),
        main_name: "Some Show".to_string(),
        episode: Some("12".to_string()),
        version: 4,
        qualifiers: Some("BD 1080p".to_string()),
        hash: Some("DEADBEEF".to_string()),
        extension: "mkv".to_string(),
        source_path: PathBuf::from(composed),
    };

    assert_eq!(original.compose(), composed);
    assert_eq!(decompose(&original.compose()), Some(original));
}

#[test]
fn absent_field_never_matches_present_field() {
    let plain = decompose("Show.mkv").unwrap();
    let grouped = decompose("[Grp] Show.mkv").unwrap();
    let empty_qualifiers = decompose("Show ().mkv").unwrap();

    assert_eq!(empty_qualifiers.qualifiers.as_deref(), Some(""));
    assert_ne!(plain.identity_key(), grouped.identity_key());
    assert_ne!(plain.identity_key(), empty_qualifiers.identity_key());
}

#[test]
fn extension_is_compared_case_insensitively() {
    let upper = decompose("Show - 01.MKV").unwrap();
    let lower = decompose("Show - 01v2.mkv").unwrap();

    assert_eq!(upper.extension, "MKV");
    assert_eq!(upper.identity_key(), lower.identity_key());
}

#[test]
fn from_path_keeps_full_source_path() {
    let r = record("/media/old/[Grp] Show - 01.mkv");

    assert_eq!(r.source_path, PathBuf::from("/media/old/[Grp] Show - 01.mkv"));
    assert_eq!(r.file_name(), "[Grp] Show - 01.mkv");
}

#[test]
fn index_preserves_insertion_order_without_dedup() {
    let index = build_index([
        record("a/Show - 01v2 [AAAAAAAA].mkv"),
        record("a/Show - 01.mkv"),
        record("a/Show - 01v2 [BBBBBBBB].mkv"),
        record("a/Show - 02.mkv"),
    ]);

    assert_eq!(index.len(), 2);
    assert_eq!(index.record_count(), 4);

    let key = decompose("Show - 01.mkv").unwrap().identity_key();
    let bucket = index.get(&key).unwrap();
    let hashes: Vec<_> = bucket.iter().map(|r| r.hash.as_deref()).collect();
    assert_eq!(hashes, vec![Some("AAAAAAAA"), None, Some("BBBBBBBB")]);
}

#[test]
fn index_listing_reports_skipped_names() {
    let listing = index_listing(["dir/Show - 01.mkv", "dir/README", "dir/Show.torrent"]);

    assert_eq!(listing.index.record_count(), 1);
    assert_eq!(
        listing.skipped,
        vec![PathBuf::from("dir/README"), PathBuf::from("dir/Show.torrent")]
    );
}

#[test]
fn minimal_names_pair_into_one_job() {
    let plan = resolve_patch_jobs(["old/file.txt"], ["new/file v2.txt"]);

    assert_eq!(plan.jobs().len(), 1);
    let job = &plan.jobs()[0];
    assert_eq!(job.source().source_path, PathBuf::from("old/file.txt"));
    assert_eq!(job.target().source_path, PathBuf::from("new/file v2.txt"));
    assert_eq!(job.patch_name(), "file_v1v2.vcdiff");
    assert!(plan.resolution.unmatched_old.is_empty());
    assert!(plan.resolution.unmatched_new.is_empty());
}

#[test]
fn duplicate_versions_are_ambiguous() {
    let old = build_index([
        record("old/Show - 01v2 [AAAAAAAA].mkv"),
        record("old/Show - 01v2 [BBBBBBBB].mkv"),
    ]);
    let new = build_index([
        record("new/Show - 01v2 [CCCCCCCC].mkv"),
        record("new/Show - 01v2 [DDDDDDDD].mkv"),
    ]);

    let resolution = resolve(&old, &new);
    let key = decompose("Show - 01.mkv").unwrap().identity_key();

    assert!(resolution.jobs.is_empty());
    assert!(resolution.ambiguous.contains(&key));
    assert!(resolution.unchanged.is_empty());
}

#[test]
fn duplicate_versions_on_one_side_are_ambiguous() {
    let old = build_index([record("old/Show - 01.mkv")]);
    let new = build_index([
        record("new/Show - 01v2 [CCCCCCCC].mkv"),
        record("new/Show - 01v2 [DDDDDDDD].mkv"),
    ]);

    let resolution = resolve(&old, &new);

    assert!(resolution.jobs.is_empty());
    assert_eq!(resolution.ambiguous.len(), 1);
}

#[test]
fn duplicate_lower_version_is_ambiguous_despite_unique_maximum() {
    let old = build_index([
        record("old/Show - 01.mkv"),
        record("old/Show - 01 [AAAAAAAA].mkv"),
        record("old/Show - 01v3.mkv"),
    ]);
    let new = build_index([record("new/Show - 01v4.mkv")]);

    let resolution = resolve(&old, &new);
    let key = decompose("Show - 01.mkv").unwrap().identity_key();

    assert!(resolution.jobs.is_empty());
    assert!(resolution.ambiguous.contains(&key));
    assert!(resolution.unchanged.is_empty());
}

#[test]
fn empty_listing_builds_empty_index() {
    let listing = index_listing(["dir/README"]);

    assert!(listing.index.is_empty());
    assert_eq!(listing.index.len(), 0);
}

#[test]
fn equal_versions_need_no_patch() {
    let plan = resolve_patch_jobs(["old/Show - 01v5.mkv"], ["new/Show - 01v5.mkv"]);
    let resolution = &plan.resolution;

    assert!(resolution.jobs.is_empty());
    assert!(resolution.unmatched_old.is_empty());
    assert!(resolution.unmatched_new.is_empty());
    assert!(resolution.ambiguous.is_empty());
    assert_eq!(resolution.unchanged.len(), 1);
}

#[test]
fn one_sided_keys_are_unmatched() {
    let plan = resolve_patch_jobs(["old/Show - 01.mkv"], ["new/Show - 02.mkv"]);
    let resolution = &plan.resolution;

    assert!(resolution.jobs.is_empty());
    assert!(
        resolution
            .unmatched_old
            .contains(&decompose("Show - 01.mkv").unwrap().identity_key())
    );
    assert!(
        resolution
            .unmatched_new
            .contains(&decompose("Show - 02.mkv").unwrap().identity_key())
    );
}

#[test]
fn highest_version_on_each_side_is_selected() {
    let plan = resolve_patch_jobs(
        ["old/Show - 01.mkv", "old/Show - 01v2.mkv"],
        ["new/Show - 01v4.mkv", "new/Show - 01v3.mkv"],
    );

    assert_eq!(plan.jobs().len(), 1);
    assert_eq!(plan.jobs()[0].source().version, 2);
    assert_eq!(plan.jobs()[0].target().version, 4);
    assert_eq!(plan.jobs()[0].patch_name(), "show_01_v2v4.vcdiff");
}

#[test]
fn downgrade_produces_a_job() {
    let plan = resolve_patch_jobs(["old/Show - 01v3.mkv"], ["new/Show - 01v2.mkv"]);

    assert_eq!(plan.jobs().len(), 1);
    assert_eq!(plan.jobs()[0].patch_name(), "show_01_v3v2.vcdiff");
}

#[test]
fn patch_names_are_unique() {
    let plan = resolve_patch_jobs(
        ["old/[A] Show - 01.mkv", "old/[B] Show - 01.mkv"],
        ["new/[A] Show - 01v2.mkv", "new/[B] Show - 01v2.mkv"],
    );

    let names: Vec<_> = plan.jobs().iter().map(|job| job.patch_name()).collect();
    assert_eq!(names, vec!["show_01_v1v2.vcdiff", "show_01_v1v2_2.vcdiff"]);
}

#[test]
fn jobs_are_deterministic_and_sorted_by_source() {
    let old = ["old/Show - 02.mkv", "old/Show - 01.mkv", "old/Other - 01.mkv"];
    let new = ["new/Other - 01v2.mkv", "new/Show - 01v2.mkv", "new/Show - 02v2.mkv"];

    let first = resolve_patch_jobs(old, new);
    let second = resolve_patch_jobs(old.iter().rev(), new.iter().rev());

    let sources: Vec<_> = first
        .jobs()
        .iter()
        .map(|job| job.source().file_name())
        .collect();
    assert_eq!(
        sources,
        vec!["Other - 01.mkv", "Show - 01.mkv", "Show - 02.mkv"]
    );
    assert_eq!(first.jobs(), second.jobs());
}

#[test]
fn neutralize_strips_accents_and_symbols() {
    assert_eq!(neutralize("Café Au Lait!"), "cafe_au_lait_");
    assert_eq!(neutralize("Show-2_X"), "show-2_x");
}

#[test]
fn patch_name_uses_first_qualifier_word() {
    let plan = resolve_patch_jobs(
        ["old/[Grp] Café - 01 (BD 1080p).mkv"],
        ["new/[Grp] Café - 01v2 (BD 1080p).mkv"],
    );

    assert_eq!(plan.jobs()[0].patch_name(), "cafe_bd_01_v1v2.vcdiff");
}
