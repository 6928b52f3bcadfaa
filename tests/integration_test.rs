use parking_lot::RwLock;
use std::sync::Arc;
use std::thread;
use vibera::command::StoreCommand;
use vibera::error::AlgebraError;
use vibera::export::{to_csv, to_json};
use vibera::samples::load_samples;
use vibera::predicate::PredicateError;
use vibera::schema::{BinaryKind, SchemaError};
use vibera::{evaluate, EngineConfig, Relation, RelationStore, Session, Tuple, Value};

fn sample_store() -> RelationStore {
    let mut store = RelationStore::new();
    load_samples(&mut store).unwrap();
    store
}

fn column(relation: &Relation, name: &str) -> Vec<String> {
    relation
        .iter()
        .map(|t| t.get(name).map(|v| v.to_string()).unwrap_or_default())
        .collect()
}

#[test]
fn test_selection_by_city() {
    let store = sample_store();
    let result = evaluate("σ[Ville = 'Fès'](ETUDIANT)", &store).unwrap();
    assert_eq!(column(&result, "NumEtudiant"), vec!["E001", "E003"]);
    assert_eq!(result.arity(), 5);
}

#[test]
fn test_projection_first_seen_order() {
    let store = sample_store();
    let result = evaluate("π[Nom, Ville](ETUDIANT)", &store).unwrap();
    assert_eq!(result.len(), 4);
    assert_eq!(
        result.schema(),
        Some(vec!["Nom".to_string(), "Ville".to_string()])
    );
    assert_eq!(column(&result, "Nom"), vec!["Alami", "Benna", "Chakir", "Darif"]);
}

#[test]
fn test_natural_join() {
    let store = sample_store();
    let result = evaluate("ETUDIANT ⨝ COURS", &store).unwrap();
    assert_eq!(result.len(), 4);
    assert_eq!(column(&result, "CodeCours"), vec!["C101", "C102", "C103", "C104"]);
    assert_eq!(column(&result, "Nom"), vec!["Alami", "Alami", "Benna", "Chakir"]);
    // NumEtudiant appears once, in the student's position
    assert_eq!(
        result.schema(),
        Some(
            [
                "NumEtudiant",
                "Nom",
                "Prenom",
                "Age",
                "Ville",
                "CodeCours",
                "Intitule",
                "NbHeures"
            ]
            .iter()
            .map(|s| s.to_string())
            .collect()
        )
    );
}

#[test]
fn test_difference_of_selections() {
    let store = sample_store();
    let result = evaluate(
        "σ[Age > 21](ETUDIANT) - σ[Ville = 'Casablanca'](ETUDIANT)",
        &store,
    )
    .unwrap();
    assert_eq!(column(&result, "NumEtudiant"), vec!["E001", "E003"]);
}

#[test]
fn test_projection_of_unknown_attribute() {
    let store = sample_store();
    let err = evaluate("π[NonExistentCol](ETUDIANT)", &store).unwrap_err();
    match &err {
        AlgebraError::Schema(SchemaError::InvalidAttributes { invalid, available }) => {
            assert_eq!(invalid, &vec!["NonExistentCol".to_string()]);
            assert_eq!(available.len(), 5);
        }
        other => panic!("expected invalid attributes, got {:?}", other),
    }
    assert!(err.to_string().contains("NonExistentCol"));
}

#[test]
fn test_conjunction_with_no_match() {
    let store = sample_store();
    let result = evaluate("σ[Ville = 'Fès' AND Age < 22](ETUDIANT)", &store).unwrap();
    assert!(result.is_empty());

    let result = evaluate("σ[Ville = 'Fès' AND Age <= 22](ETUDIANT)", &store).unwrap();
    assert_eq!(column(&result, "NumEtudiant"), vec!["E001"]);
}

#[test]
fn test_selection_aborts_on_unknown_attribute() {
    let store = sample_store();
    let err = evaluate("σ[Vile = 'Fès'](ETUDIANT)", &store).unwrap_err();
    assert!(matches!(err, AlgebraError::Predicate { .. }));
    assert_eq!(
        err.to_string(),
        "Invalid condition `Vile = 'Fès'`: unknown attribute: Vile"
    );
}

#[test]
fn test_join_without_common_attributes() {
    let store = sample_store();
    let err = evaluate("π[Nom](ETUDIANT) ⨝ π[Intitule](COURS)", &store).unwrap_err();
    assert_eq!(err, AlgebraError::Schema(SchemaError::NoCommonAttributes));
}

#[test]
fn test_union_arity_mismatch() {
    let store = sample_store();
    let err = evaluate("π[Nom](ETUDIANT) ∪ π[Nom, Ville](ETUDIANT)", &store).unwrap_err();
    assert_eq!(
        err,
        AlgebraError::Schema(SchemaError::ArityMismatch {
            kind: BinaryKind::Union,
            left: 1,
            right: 2
        })
    );
}

#[test]
fn test_word_operators() {
    let store = sample_store();
    let symbols = evaluate("π[NumEtudiant](ETUDIANT) - π[NumEtudiant](COURS)", &store).unwrap();
    let words = evaluate(
        "Project[NumEtudiant](ETUDIANT) MINUS Project[NumEtudiant](COURS)",
        &store,
    )
    .unwrap();
    assert_eq!(symbols, words);
    assert_eq!(column(&words, "NumEtudiant"), vec!["E004"]);
}

#[test]
fn test_leftmost_split_chaining() {
    let store = sample_store();
    // A - B ∪ C reads as A - (B ∪ C)
    let chained = evaluate(
        "π[NumEtudiant](ETUDIANT) - π[NumEtudiant](COURS) ∪ π[NumEtudiant](COURS)",
        &store,
    )
    .unwrap();
    assert_eq!(column(&chained, "NumEtudiant"), vec!["E004"]);

    let grouped = evaluate(
        "(π[NumEtudiant](ETUDIANT) - π[NumEtudiant](COURS)) ∪ π[NumEtudiant](COURS)",
        &store,
    )
    .unwrap();
    assert_eq!(
        column(&grouped, "NumEtudiant"),
        vec!["E004", "E001", "E002", "E003"]
    );
}

#[test]
fn test_empty_operand_is_rejected() {
    let store = sample_store();
    let err = evaluate("ETUDIANT ∪ σ[Age > 99](ETUDIANT)", &store).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Schema error: the right relation of the union is empty"
    );
}

#[test]
fn test_store_is_not_modified() {
    let store = sample_store();
    let before = store.to_json_string().unwrap();
    evaluate("ρ[E](σ[Age > 20](ETUDIANT)) ⨝ COURS", &store).unwrap();
    evaluate("ETUDIANT - σ[Ville = 'Rabat'](ETUDIANT)", &store).unwrap();
    assert_eq!(store.to_json_string().unwrap(), before);
}

#[test]
fn test_join_commutative_on_content() {
    let store = sample_store();
    let ec = evaluate("ETUDIANT ⨝ COURS", &store).unwrap();
    let ce = evaluate("COURS ⨝ ETUDIANT", &store).unwrap();
    assert_eq!(ec.content_set(), ce.content_set());
}

#[test]
fn test_select_everything() {
    let store = sample_store();
    let result = evaluate("σ[true](ETUDIANT)", &store).unwrap();
    assert_eq!(Some(&result), store.get("ETUDIANT"));
}

#[test]
fn test_export_result() {
    let store = sample_store();
    let result = evaluate("π[CodeCours, Intitule](σ[NbHeures >= 35](COURS))", &store).unwrap();
    assert_eq!(
        to_csv(&result),
        "CodeCours,Intitule\n\"C101\",\"Bases de données\"\n\"C102\",\"Algorithmes\"\n"
    );
    let json = to_json(&result).unwrap();
    let parsed: Relation = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, result);
}

#[test]
fn test_session_over_shared_store() {
    let store = Arc::new(RwLock::new(sample_store()));
    let mut session = Session::with_shared_store(Arc::clone(&store), EngineConfig::default());

    let writers: Vec<_> = (0..4)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let tuple = Tuple::from_pairs([
                    ("NumEtudiant", Value::from(format!("E1{:02}", i))),
                    ("Nom", Value::from("Test")),
                    ("Prenom", Value::from("Thread")),
                    ("Age", Value::from(30)),
                    ("Ville", Value::from("Tanger")),
                ]);
                store.write().insert_tuple("ETUDIANT", tuple).unwrap();
            })
        })
        .collect();

    for writer in writers {
        writer.join().unwrap();
    }

    let outcome = session.execute("σ[Ville = 'Tanger'](ETUDIANT)").unwrap();
    assert_eq!(outcome.relation.len(), 4);
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_deeply_nested_condition_is_rejected() {
    let store = sample_store();
    let text = format!(
        "σ[{}Age > 1{}](ETUDIANT)",
        "(".repeat(5_000),
        ")".repeat(5_000)
    );
    let err = evaluate(&text, &store).unwrap_err();
    assert!(matches!(
        err,
        AlgebraError::Predicate {
            source: PredicateError::NestingTooDeep { limit: 100 },
            ..
        }
    ));
}

#[test]
fn test_long_condition_chain() {
    let store = sample_store();
    let chain = vec!["Age > 1"; 200_000].join(" AND ");
    let result = evaluate(&format!("σ[{}](ETUDIANT)", chain), &store).unwrap();
    assert_eq!(result.len(), 4);
}

#[test]
fn test_unterminated_literal_is_reported() {
    let store = sample_store();
    let err = evaluate("σ[Nom = 'Alami](ETUDIANT)", &store).unwrap_err();
    assert!(matches!(
        err,
        AlgebraError::Predicate {
            source: PredicateError::UnterminatedString { .. },
            ..
        }
    ));
}

#[test]
fn test_edit_commands_then_query() {
    let mut session = Session::new(sample_store(), EngineConfig::default());
    let store = session.store();
    for line in [
        ":create VILLE Ville, Region",
        ":insert VILLE Fès, Fès-Meknès",
        ":insert VILLE Rabat, Rabat-Salé-Kénitra",
        ":insert VILLE Casablanca, Casablanca-Settat",
        ":update VILLE 2 Casablanca, Grand Casablanca",
        ":delete VILLE 1",
    ] {
        let command = StoreCommand::parse(line).unwrap().unwrap();
        command.apply(&mut store.write()).unwrap();
    }

    let outcome = session.execute("π[Nom, Region](ETUDIANT ⨝ VILLE)").unwrap();
    assert_eq!(column(&outcome.relation, "Nom"), vec!["Alami", "Benna", "Chakir"]);
    assert_eq!(
        column(&outcome.relation, "Region"),
        vec!["Fès-Meknès", "Grand Casablanca", "Fès-Meknès"]
    );

    let drop_ville = StoreCommand::parse(":drop VILLE").unwrap().unwrap();
    drop_ville.apply(&mut store.write()).unwrap();
    assert!(session.execute("VILLE").is_err());
}
