//! Sample relations for trying out queries.

use crate::relation::{Relation, Tuple, Value};
use crate::store::{RelationStore, StoreError, StoreResult};

/// Names of the available sample relations
pub const SAMPLE_NAMES: &[&str] = &["ETUDIANT", "COURS"];

fn rows<const N: usize>(columns: [&str; N], rows: Vec<[Value; N]>) -> Relation {
    rows.into_iter()
        .map(|row| Tuple::from_pairs(columns.iter().copied().zip(row)))
        .collect()
}

/// Students: NumEtudiant, Nom, Prenom, Age, Ville
pub fn etudiant() -> Relation {
    rows(
        ["NumEtudiant", "Nom", "Prenom", "Age", "Ville"],
        vec![
            ["E001".into(), "Alami".into(), "Fatima".into(), 22.into(), "Fès".into()],
            ["E002".into(), "Benna".into(), "Mohammed".into(), 21.into(), "Casablanca".into()],
            ["E003".into(), "Chakir".into(), "Sara".into(), 23.into(), "Fès".into()],
            ["E004".into(), "Darif".into(), "Ahmed".into(), 20.into(), "Rabat".into()],
        ],
    )
}

/// Course enrolments: CodeCours, Intitule, NbHeures, NumEtudiant
pub fn cours() -> Relation {
    rows(
        ["CodeCours", "Intitule", "NbHeures", "NumEtudiant"],
        vec![
            ["C101".into(), "Bases de données".into(), 40.into(), "E001".into()],
            ["C102".into(), "Algorithmes".into(), 35.into(), "E001".into()],
            ["C103".into(), "Réseaux".into(), 30.into(), "E002".into()],
            ["C104".into(), "Web".into(), 25.into(), "E003".into()],
        ],
    )
}

/// Build a sample relation by name
pub fn sample(name: &str) -> Option<Relation> {
    match name {
        "ETUDIANT" => Some(etudiant()),
        "COURS" => Some(cours()),
        _ => None,
    }
}

/// Add one sample relation to the store. Fails if a relation with that name
/// is already present.
pub fn load_sample(store: &mut RelationStore, name: &str) -> StoreResult<()> {
    let relation = sample(name).ok_or_else(|| StoreError::UnknownSample {
        name: name.to_string(),
    })?;
    store.insert_relation(name, relation)
}

/// Add every sample relation to the store
pub fn load_samples(store: &mut RelationStore) -> StoreResult<()> {
    for name in SAMPLE_NAMES {
        load_sample(store, name)?;
    }
    Ok(())
}
