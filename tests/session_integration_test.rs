//! Configuration activation through `AssessmentSession`.

use indoc::indoc;
use pretty_assertions::assert_eq;
use riskmap::config::{parse_and_validate_config, ConfigFile};
use riskmap::{AssessmentSession, RiskAssessmentConfig, RiskError, ScaleKind, ScoredRow};

fn rows() -> Vec<ScoredRow> {
    vec![
        ScoredRow::from_factors(3, 4),
        ScoredRow::new(3.0),
        ScoredRow {
            score: None,
            label: "not assessed".into(),
            ..ScoredRow::default()
        },
    ]
}

fn default_session() -> AssessmentSession {
    AssessmentSession::with_rows(RiskAssessmentConfig::default(), rows()).unwrap()
}

fn labels(session: &AssessmentSession) -> Vec<&str> {
    session.rows().iter().map(|r| r.label.as_str()).collect()
}

#[test]
fn loaded_config_relabels_every_row_on_apply() {
    let mut session = default_session();
    assert_eq!(
        labels(&session),
        vec!["Immediate improvement", "Acceptable", "not assessed"]
    );

    let korean = parse_and_validate_config(indoc! {r#"
        [[risk_ranges]]
        min = 1
        max = 4
        label = "허용 가능"

        [[risk_ranges]]
        min = 5
        max = 8
        label = "관리 필요"

        [[risk_ranges]]
        min = 9
        max = 16
        label = "즉시 개선"
    "#})
    .unwrap();

    let outcome = session.apply_config(korean).unwrap();

    assert_eq!(outcome.version, 2);
    assert_eq!(outcome.summary.examined, 3);
    assert_eq!(outcome.summary.changed, 2);
    assert_eq!(outcome.summary.skipped, 1);
    assert_eq!(labels(&session), vec!["즉시 개선", "허용 가능", "not assessed"]);
    assert_eq!(session.rows()[0].score, Some(12.0));
}

#[test]
fn rejected_apply_changes_nothing() {
    let mut session = default_session();
    let before = session.rows().to_vec();

    let (mut draft, version) = session.draft();
    draft.set_scale_bounds(ScaleKind::Severity, 4, 1);
    draft.risk_ranges.set_max(0, f64::INFINITY).unwrap();
    draft.risk_ranges.set_label(0, "everything").unwrap();

    let err = session.apply_config_if(version, draft).unwrap_err();

    assert_eq!(err.issues().len(), 2);
    assert_eq!(session.version(), version);
    assert_eq!(session.rows(), before.as_slice());
    assert_eq!(session.config(), &RiskAssessmentConfig::default());
}

#[test]
fn concurrent_drafts_only_first_save_wins() {
    let mut session = default_session();
    let (mut alice, alice_version) = session.draft();
    let (mut bob, bob_version) = session.draft();

    alice.risk_ranges.set_label(2, "Stop work").unwrap();
    bob.risk_ranges.set_enabled(2, false).unwrap();

    session.apply_config_if(alice_version, alice).unwrap();
    let err = session.apply_config_if(bob_version, bob).unwrap_err();

    assert!(matches!(err, RiskError::StaleConfig { .. }));
    assert_eq!(err.code().as_str(), "E063");
    assert_eq!(labels(&session)[0], "Stop work");
}

#[test]
fn widening_scales_extends_the_score_domain() {
    let mut session = AssessmentSession::new(RiskAssessmentConfig::default()).unwrap();
    let (mut draft, _) = session.draft();
    draft.set_scale_bounds(ScaleKind::Frequency, 1, 5);
    draft.risk_ranges.set_max(2, 20.0).unwrap();
    session.apply_config(draft).unwrap();

    let position = session.push_row(ScoredRow::default());
    let score = session.set_row_factors(position, 5, 4).unwrap();

    assert_eq!(score, 20.0);
    assert_eq!(session.rows()[position].label, "Immediate improvement");
}

#[test]
fn active_config_survives_a_file_round_trip() {
    let mut session = AssessmentSession::new(RiskAssessmentConfig::default()).unwrap();
    let (mut draft, _) = session.draft();
    draft.frequency.set_label(3, "Weekly").unwrap();
    draft.risk_ranges.set_enabled(0, false).unwrap();
    session.apply_config(draft).unwrap();

    let text = ConfigFile::from_config(session.config())
        .to_toml_string()
        .unwrap();
    let reloaded = parse_and_validate_config(&text).unwrap();

    assert_eq!(&reloaded, session.config());
}
