#![allow(missing_docs, unused_results)]

use std::path::PathBuf;

use morpho_core::response::{FAMILY, JOIN, MATRIX_WORD_SUM, MEANING, STRUCTURE};
use morpho_guidance::GuidanceRules;
use morpho_lab::{Advance, Content, LabSession, SessionState};
use morpho_scoring::ScoringRules;

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

fn session_from_files() -> LabSession {
    let dir = data_dir();
    let content = Content::load_paths(&dir.join("tasks.json"), &dir.join("routes.json")).unwrap();
    let start = content.start_task_id(None).unwrap();
    LabSession::new(content, &start, GuidanceRules::V2, ScoringRules::V1).unwrap()
}

fn moved_to(advance: Advance) -> String {
    match advance {
        Advance::Moved { to, .. } => to.into_inner(),
        other => panic!("expected a move, got {other:?}"),
    }
}

fn answer_fields(session: &mut LabSession, answers: &[(&str, &str)]) {
    for (field, text) in answers {
        session.set_response(field, text).unwrap();
    }
    assert!(session.check().supported, "{:?}", session.mediator());
}

fn prove(session: &mut LabSession, word: &str, sum: &str) {
    session.toggle_word(word).unwrap();
    session.set_response(MATRIX_WORD_SUM, sum).unwrap();
    assert!(session.check().supported, "{:?}", session.mediator());
}

#[test]
fn walks_every_sample_task_in_order() {
    let mut s = session_from_files();
    assert_eq!(s.task_id().as_str(), "t1_jump_ing_join");

    answer_fields(
        &mut s,
        &[
            (MEANING, "it is happening right now"),
            (STRUCTURE, "jump + ing → jumping"),
            (JOIN, "no change: the base stays the same"),
            (FAMILY, "jumped"),
        ],
    );
    assert_eq!(moved_to(s.advance().unwrap()), "t2_make_ing_join");

    answer_fields(
        &mut s,
        &[
            (MEANING, "in the middle of making it"),
            (STRUCTURE, "make + ing → making"),
            (JOIN, "drop the final e at the join"),
            (FAMILY, "maker"),
        ],
    );
    assert_eq!(moved_to(s.advance().unwrap()), "t3_transfer_bake_ing");

    answer_fields(
        &mut s,
        &[
            (STRUCTURE, "bake + ing → baking"),
            (JOIN, "the e is removed, compare the letters"),
        ],
    );
    assert_eq!(moved_to(s.advance().unwrap()), "t4_matrix_jump");

    prove(&mut s, "jumps", "jumps = jump + s");
    assert_eq!(moved_to(s.advance().unwrap()), "t5_matrix_make");

    prove(&mut s, "remakes", "remakes = re + make + s");
    assert_eq!(moved_to(s.advance().unwrap()), "t6_matrix_try");

    prove(&mut s, "trying", "trying = try + ing");
    assert_eq!(moved_to(s.advance().unwrap()), "t7_matrix_run");

    prove(&mut s, "runs", "runs = run + s");
    assert_eq!(s.advance().unwrap(), Advance::Finished);
    assert_eq!(*s.state(), SessionState::Finished);
    assert_eq!(s.completed().len(), 7);
}

#[test]
fn unsupported_work_never_routes() {
    let mut s = session_from_files();
    s.set_response(STRUCTURE, "jump + ing").unwrap();
    for _ in 0..3 {
        assert_eq!(s.advance().unwrap(), Advance::Blocked);
    }
    assert_eq!(s.task_id().as_str(), "t1_jump_ing_join");
    assert!(s.completed().is_empty());
}

#[test]
fn legacy_score_flags_kept_e_while_validator_accepts() {
    let mut s = session_from_files();
    answer_fields(
        &mut s,
        &[
            (MEANING, "it is happening right now"),
            (STRUCTURE, "jump + ing → jumping"),
            (JOIN, "no change: the base stays the same"),
            (FAMILY, "jumped"),
        ],
    );
    let _ = s.advance().unwrap();

    s.set_response(MEANING, "in the middle of making it").unwrap();
    s.set_response(STRUCTURE, "make + ing").unwrap();
    s.set_response(JOIN, "no change at the join").unwrap();
    s.set_response(FAMILY, "maker").unwrap();

    assert!(s.check().supported);
    let summary = s.score();
    assert!(!summary.mastered);
    assert_eq!(summary.error_tags, vec![morpho_core::ErrorTag::JoinError]);
}

#[test]
fn files_and_embedded_sample_agree() {
    let from_files = session_from_files();
    let sample = Content::sample().unwrap();
    assert_eq!(from_files.content().catalog.ids(), sample.catalog.ids());
    assert_eq!(from_files.content().routes, sample.routes);
}
