//! Behavioral guarantees of the matcher and reconciler, checked over
//! hand-picked input families.

use icd_catalog::catalog::get_active_version;
use icd_catalog::matcher::{expand_range, matches};
use icd_catalog::{
    get_linked_artifacts, get_linked_artifacts_with_variants, get_orphans, group_by_identity,
    link, unlink, ArtifactRecord, EquipmentPattern,
};
use std::collections::HashSet;

const CANDIDATES: &[&str] = &[
    "",
    "X",
    "Y",
    "PDIS1",
    "POSTE_BCU1",
    "ld0/LLN0",
    "  spaced  ",
    "*",
    "ünïcödé",
    "X\n",
    "A\nB",
];

fn sample_records() -> Vec<ArtifactRecord> {
    vec![
        ArtifactRecord::new("BCU", "Efacec", "V1").with_artifact_id("A1"),
        ArtifactRecord::new("BCU", "Efacec", "V2").with_artifact_id("A1"),
        ArtifactRecord::new("PIU", "ABB", "1").with_artifact_id("A2"),
        ArtifactRecord::new("SCU", "GE", "1").with_artifact_id("A3"),
        ArtifactRecord::new("BCU", "Siemens", "4").with_artifact_id("A4"),
        ArtifactRecord::new("PIU", "ABB", "2").with_artifact_id("A2"),
    ]
}

fn pattern_families() -> Vec<Vec<EquipmentPattern>> {
    vec![
        vec![],
        vec![EquipmentPattern::new("p1", "*").with_icd_refs(["A1"])],
        vec![
            EquipmentPattern::new("p1", "*BCU*").with_icd_refs(["A1", "missing"]),
            EquipmentPattern::new("p2", "*BCU2*")
                .with_parent("p1")
                .with_icd_refs(["A4"]),
        ],
        vec![
            EquipmentPattern::new("p1", "*").with_icd_refs(["A1", "A2"]),
            EquipmentPattern::new("p2", "*").with_icd_refs(["A2", "A3", "A4"]),
        ],
    ]
}

#[test]
fn test_empty_and_star_expressions_match_everything() {
    for expression in ["", "*", "  ", " * "] {
        for candidate in CANDIDATES {
            assert!(
                matches(candidate, expression),
                "{candidate:?} rejected by {expression:?}"
            );
        }
    }
}

#[test]
fn test_range_expansion_is_exact() {
    let shapes = [("", ""), ("LN", ""), ("BAY_", "_A"), ("x", "y")];
    for (prefix, suffix) in shapes {
        for (a, b) in [(0u32, 0u32), (1, 4), (7, 12), (98, 103)] {
            let expanded = expand_range(&format!("{prefix}{a}-{b}{suffix}"));
            let expected: Vec<String> = (a..=b).map(|i| format!("{prefix}{i}{suffix}")).collect();

            assert_eq!(expanded.len() as u32, b - a + 1);
            assert_eq!(expanded, expected);
            assert_eq!(expanded.iter().collect::<HashSet<_>>().len(), expanded.len());
        }
    }
}

#[test]
fn test_range_expansion_is_deterministic() {
    for token in ["LN1-3", "LN3-1", "BAY_2-5_A", "PDIS*", "A-B"] {
        assert_eq!(expand_range(token), expand_range(token));
    }
}

#[test]
fn test_exclusion_precedence() {
    let expression = "*,!X";
    assert!(!matches("X", expression));
    assert!(!matches("x", expression));
    for candidate in CANDIDATES.iter().filter(|c| !c.eq_ignore_ascii_case("X")) {
        assert!(matches(candidate, expression), "{candidate:?} rejected");
    }
}

#[test]
fn test_case_insensitive_matching() {
    assert!(matches("PDIS1", "pdis*"));
    assert!(matches("pdis1", "PDIS*"));
    assert!(matches("PdIs1", "pDiS?"));
}

#[test]
fn test_regrouping_is_idempotent() {
    let records = sample_records();
    let cards = group_by_identity(&records);
    let flattened: Vec<ArtifactRecord> = cards
        .iter()
        .flat_map(|c| c.versions().iter().cloned())
        .collect();

    assert_eq!(group_by_identity(&flattened), cards);
    assert_eq!(group_by_identity(&records), cards);
}

#[test]
fn test_grouping_keeps_every_record_once() {
    let records = sample_records();
    let cards = group_by_identity(&records);
    let mut seen: Vec<&ArtifactRecord> = cards.iter().flat_map(|c| c.versions()).collect();
    assert_eq!(seen.len(), records.len());
    for record in &records {
        let position = seen.iter().position(|r| *r == record).unwrap();
        seen.remove(position);
    }
    assert!(seen.is_empty());
}

#[test]
fn test_orphans_and_linked_partition_records() {
    let records = sample_records();
    for patterns in pattern_families() {
        let orphans: HashSet<*const ArtifactRecord> = get_orphans(&patterns, &records)
            .into_iter()
            .map(|r| r as *const _)
            .collect();
        let linked: HashSet<*const ArtifactRecord> = patterns
            .iter()
            .flat_map(|p| get_linked_artifacts(p, &records))
            .map(|r| r as *const _)
            .collect();

        assert!(orphans.is_disjoint(&linked));
        assert_eq!(orphans.len() + linked.len(), records.len());
    }
}

#[test]
fn test_reconciliation_is_repeatable() {
    let records = sample_records();
    for patterns in pattern_families() {
        assert_eq!(get_orphans(&patterns, &records), get_orphans(&patterns, &records));
    }
}

#[test]
fn test_variant_links_roll_up_to_parent() {
    let records = vec![
        ArtifactRecord::new("IED_A", "Efacec", "1").with_artifact_id("x"),
        ArtifactRecord::new("IED_A_V1", "Efacec", "1").with_artifact_id("y"),
    ];
    let patterns = vec![
        EquipmentPattern::new("IED_A", "IED_A*").with_icd_refs(["x"]),
        EquipmentPattern::new("IED_A_V1", "IED_A_V1*")
            .with_parent("IED_A")
            .with_icd_refs(["y"]),
    ];

    let linked: Vec<&str> = get_linked_artifacts_with_variants(&patterns[0], &patterns, &records)
        .iter()
        .map(|r| r.artifact_id.as_str())
        .collect();
    assert_eq!(linked, ["x", "y"]);
    assert!(get_orphans(&patterns, &records).is_empty());
}

#[test]
fn test_link_unlink_round_trip() {
    for family in pattern_families().into_iter().filter(|f| !f.is_empty()) {
        for artifact_id in ["A1", "A3", "new"] {
            let mut patterns = family.clone();
            let before: HashSet<String> = patterns[0].icd_refs().iter().cloned().collect();
            let was_linked = before.contains(artifact_id);

            link(&mut patterns, "p1", artifact_id).unwrap();
            unlink(&mut patterns, "p1", artifact_id).unwrap();
            if was_linked {
                link(&mut patterns, "p1", artifact_id).unwrap();
            }

            let after: HashSet<String> = patterns[0].icd_refs().iter().cloned().collect();
            assert_eq!(before, after);
            assert_eq!(&patterns[1..], &family[1..]);
        }
    }
}

#[test]
fn test_bcu_versions_share_one_card() {
    let records = vec![
        ArtifactRecord::new("BCU", "Efacec", "V11.6.8").with_artifact_id("A1"),
        ArtifactRecord::new("BCU", "Efacec", "V11.7.9").with_artifact_id("A2"),
    ];
    let cards = group_by_identity(&records);

    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].versions().len(), 2);
    assert_eq!(cards[0].active_version(), "V11.7.9");
    assert_eq!(get_active_version(&cards[0]).unwrap().artifact_id, "A2");
}

#[test]
fn test_unlinked_artifact_is_the_only_orphan() {
    let records = vec![
        ArtifactRecord::new("BCU", "Efacec", "1").with_artifact_id("A1"),
        ArtifactRecord::new("BCU", "Efacec", "2").with_artifact_id("A2"),
    ];
    let patterns = vec![EquipmentPattern::new("p1", "").with_icd_refs(["A1"])];

    let orphans = get_orphans(&patterns, &records);
    assert_eq!(orphans, [&records[1]]);
}
