//! Cascade deletes and dataset write-back against the sample term.

use std::path::PathBuf;

use obe_core::dataset::Dataset;
use obe_core::enums::{OutcomeKind, SurveyKind};
use obe_core::values::Correlation;
use obe_store::{ArticulationState, ArticulationStore, Mutation, MutationOutcome};
use pretty_assertions::assert_eq;

fn dataset() -> Dataset {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../obe-core/tests/fixtures/term.toml");
    Dataset::load(&path).expect("fixture should load")
}

#[test]
fn deleting_outcome_removes_exactly_its_entries() {
    let dataset = dataset();
    let mut store = ArticulationStore::from_dataset(&dataset).unwrap();

    let others: Vec<(String, String, String, Correlation)> = store
        .matrix()
        .cells()
        .filter(|(_, _, outcome, _)| *outcome != "PO1")
        .map(|(course, co, outcome, value)| (course.into(), co.into(), outcome.into(), value))
        .collect();

    // PO1 is mapped from C001.1, C001.2 and C002.1.
    assert_eq!(store.delete_outcome("PO1").unwrap(), 3);

    let remaining: Vec<(String, String, String, Correlation)> = store
        .matrix()
        .cells()
        .map(|(course, co, outcome, value)| (course.into(), co.into(), outcome.into(), value))
        .collect();
    assert_eq!(remaining, others);
}

#[test]
fn write_back_drops_deleted_outcome_surveys() {
    let mut dataset = dataset();
    let mut store = ArticulationStore::from_dataset(&dataset).unwrap();
    store
        .apply_all([
            Mutation::DeleteOutcome {
                outcome_id: "PSO1".into(),
            },
            Mutation::DeleteCo {
                course_id: "C002".into(),
                co_id: "C002.1".into(),
            },
        ])
        .unwrap();
    store.commit();

    store.state().write_into(&mut dataset);
    assert!(dataset.psos.is_empty());
    assert_eq!(dataset.surveys.rating(SurveyKind::ProgramExit, "PSO1"), None);
    assert_eq!(dataset.surveys.rating(SurveyKind::ProgramExit, "PO3"), Some(2.6));
    assert!(dataset.matrix.course("C002").is_none());
    dataset.check_integrity().unwrap();

    let reloaded = ArticulationState::from_dataset(&dataset);
    assert_eq!(reloaded.psos, store.state().psos);
    assert_eq!(reloaded.courses, store.state().courses);
    assert_eq!(reloaded.matrix, store.state().matrix);
    assert!(store.state().retired.contains("PSO1"));
}

#[test]
fn reused_outcome_id_starts_without_survey_ratings() {
    let mut dataset = dataset();
    assert_eq!(dataset.surveys.rating(SurveyKind::ProgramExit, "PSO1"), Some(2.7));

    let mut store = ArticulationStore::from_dataset(&dataset).unwrap();
    let results = store
        .apply_all([
            Mutation::DeleteOutcome {
                outcome_id: "PSO1".into(),
            },
            Mutation::AddOutcome {
                kind: OutcomeKind::Pso,
                description: Some("Cloud platforms".into()),
            },
        ])
        .unwrap();
    assert_eq!(
        results,
        vec![
            MutationOutcome::Removed { entries: 1 },
            MutationOutcome::Saved { id: "PSO1".into() },
        ]
    );
    store.commit();
    store.state().write_into(&mut dataset);

    assert_eq!(dataset.psos[0].description, "Cloud platforms");
    for kind in SurveyKind::ALL {
        assert_eq!(dataset.surveys.rating(kind, "PSO1"), None, "{kind} rating");
    }
    assert_eq!(dataset.surveys.rating(SurveyKind::Employer, "PO2"), Some(2.5));
}

#[test]
fn dirty_tracking_follows_commit() {
    let dataset = dataset();
    let mut store = ArticulationStore::from_dataset(&dataset).unwrap();
    assert!(!store.has_unsaved_changes());

    store.set_correlation("C002", "C002.1", "PO2", 1).unwrap();
    assert!(store.has_unsaved_changes());
    store.set_correlation("C002", "C002.1", "PO2", 0).unwrap();
    assert!(!store.has_unsaved_changes());

    store.add_co("C001").unwrap();
    store.commit();
    assert!(!store.has_unsaved_changes());
    assert_eq!(store.baseline().state.courses[0].cos.len(), 3);
}
