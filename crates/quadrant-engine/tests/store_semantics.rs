//! Integration tests for store behavior through the dataset facade.
//!
//! Every scenario runs against both lookup strategies.

use quadrant_common::Error;
use quadrant_common::types::{Quad, Term};
use quadrant_engine::{Dataset, StoreConfig};

fn iri(name: &str) -> Term {
    Term::iri(format!("http://example.org/{name}"))
}

fn datasets() -> Vec<Dataset> {
    vec![
        Dataset::with_config(StoreConfig::hash()).unwrap(),
        Dataset::with_config(StoreConfig::sorted()).unwrap(),
        Dataset::with_config(StoreConfig::sorted().with_max_sorted_indexes(1)).unwrap(),
    ]
}

fn sorted_terms(mut terms: Vec<Term>) -> Vec<Term> {
    terms.sort();
    terms
}

fn sorted_quads(mut quads: Vec<Quad>) -> Vec<Quad> {
    quads.sort_by_key(ToString::to_string);
    quads
}

// --- Basic semantics ---

#[test]
fn walkthrough_scenario() {
    for mut dataset in datasets() {
        assert!(dataset.is_empty());

        dataset.add(&iri("a"), &iri("knows"), &iri("b"), &[]).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(
            dataset.iter_matching(Some(&iri("a")), None, None, &[]).collect::<Vec<_>>(),
            vec![Quad::triple(iri("a"), iri("knows"), iri("b"))]
        );
        assert_eq!(
            dataset.iter_matching(None, None, None, &[iri("g1")]).count(),
            0
        );

        dataset
            .add(&iri("a"), &iri("knows"), &iri("b"), &[iri("g1"), iri("g2")])
            .unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(
            sorted_terms(dataset.contexts().iter(dataset.store()).collect()),
            vec![Term::DefaultGraph, iri("g1"), iri("g2")]
        );
    }
}

#[test]
fn duplicate_insert_is_ignored() {
    for mut dataset in datasets() {
        assert_eq!(dataset.add(&iri("a"), &iri("p"), &iri("b"), &[iri("g")]), Ok(true));
        assert_eq!(dataset.add(&iri("a"), &iri("p"), &iri("b"), &[iri("g")]), Ok(false));
        assert_eq!(dataset.len(), 1);
    }
}

#[test]
fn quad_round_trips_through_matching() {
    for mut dataset in datasets() {
        let quad = Quad::new(iri("s"), iri("p"), Term::literal("o"), iri("g"));
        dataset.add_quad(&quad).unwrap();
        dataset.add(&iri("s"), &iri("p"), &Term::literal("other"), &[]).unwrap();

        let exact: Vec<_> = dataset
            .iter_matching(
                Some(&quad.subject),
                Some(&quad.predicate),
                Some(&quad.object),
                std::slice::from_ref(&quad.context),
            )
            .collect();
        assert_eq!(exact, vec![quad.clone()]);

        let any_context: Vec<_> = dataset
            .iter_matching(Some(&quad.subject), Some(&quad.predicate), Some(&quad.object), &[])
            .collect();
        assert_eq!(any_context, vec![quad]);
    }
}

#[test]
fn literal_subject_is_rejected_without_side_effects() {
    for mut dataset in datasets() {
        let err = dataset.add(&Term::literal("x"), &iri("p"), &iri("o"), &[iri("g")]);
        assert!(matches!(err, Err(Error::InvalidTerm { .. })));
        assert!(dataset.is_empty());
        assert_eq!(dataset.stats().term_count, 0);

        assert!(!dataset.contains(Some(&Term::literal("x")), None, None, &[]));
        assert_eq!(dataset.iter_matching(None, Some(&Term::literal("p")), None, &[]).count(), 0);
    }
}

// --- Cursors ---

#[test]
fn removing_every_match_through_a_cursor() {
    for mut dataset in datasets() {
        for object in ["b", "c", "d"] {
            dataset.add(&iri("a"), &iri("p"), &iri(object), &[]).unwrap();
        }
        dataset.add(&iri("z"), &iri("p"), &iri("b"), &[]).unwrap();

        let mut cursor = dataset.matching(Some(&iri("a")), None, None, &[]);
        let mut removed = 0;
        while cursor.advance(dataset.store()).unwrap().is_some() {
            cursor.remove_current(dataset.store_mut()).unwrap();
            removed += 1;
        }
        assert_eq!(removed, 3);
        assert_eq!(dataset.len(), 1);
    }
}

#[test]
fn cursors_do_not_disturb_each_other() {
    for mut dataset in datasets() {
        for subject in ["a", "b", "c"] {
            for object in ["x", "y"] {
                dataset.add(&iri(subject), &iri("p"), &iri(object), &[]).unwrap();
            }
        }

        let mut by_object = dataset.matching(None, None, Some(&iri("x")), &[]);
        let mut by_predicate = dataset.matching(None, Some(&iri("p")), None, &[]);

        let removed = by_object.advance(dataset.store()).unwrap().unwrap();
        by_object.remove_current(dataset.store_mut()).unwrap();

        let mut seen = Vec::new();
        while let Some(quad) = by_predicate.advance(dataset.store()).unwrap() {
            seen.push(quad);
        }
        assert_eq!(seen.len(), 5);
        assert!(!seen.contains(&removed));
        let mut unique = sorted_quads(seen.clone());
        unique.dedup();
        assert_eq!(unique.len(), seen.len());

        let mut rest = 0;
        while by_object.advance(dataset.store()).unwrap().is_some() {
            rest += 1;
        }
        assert_eq!(rest, 2);
    }
}

#[test]
fn removing_twice_is_an_error() {
    for mut dataset in datasets() {
        dataset.add(&iri("a"), &iri("p"), &iri("b"), &[]).unwrap();
        let mut cursor = dataset.matching(None, None, None, &[]);
        assert!(cursor.advance(dataset.store()).unwrap().is_some());
        cursor.remove_current(dataset.store_mut()).unwrap();
        assert!(matches!(
            cursor.remove_current(dataset.store_mut()),
            Err(Error::Cursor(_))
        ));
    }
}

#[test]
fn cursor_rejects_other_store() {
    let mut first = Dataset::new();
    let mut second = Dataset::new();
    first.add(&iri("a"), &iri("p"), &iri("b"), &[]).unwrap();
    second.add(&iri("a"), &iri("p"), &iri("b"), &[]).unwrap();

    let mut cursor = first.matching(None, None, None, &[]);
    assert!(cursor.advance(second.store()).is_err());
    assert!(cursor.advance(first.store()).unwrap().is_some());
    assert!(cursor.remove_current(second.store_mut()).is_err());
    assert_eq!(second.len(), 1);
}

// --- Index choice ---

#[test]
fn result_sets_are_independent_of_index_history() {
    let quads: Vec<Quad> = (0..30)
        .map(|i| {
            Quad::new(
                iri(&format!("s{}", i % 5)),
                iri(&format!("p{}", i % 3)),
                Term::literal(format!("{}", i % 7)),
                if i % 2 == 0 { Term::DefaultGraph } else { iri(&format!("g{}", i % 4)) },
            )
        })
        .collect();

    let mut baseline = Dataset::new();
    baseline.extend(quads.clone()).unwrap();

    let mut dataset = Dataset::with_config(StoreConfig::sorted().with_max_sorted_indexes(2)).unwrap();
    dataset.extend(quads).unwrap();

    let lookups: Vec<(Option<Term>, Option<Term>, Option<Term>, Vec<Term>)> = vec![
        (None, Some(iri("p1")), None, vec![]),
        (None, None, Some(Term::literal("3")), vec![]),
        (None, None, None, vec![iri("g1")]),
        (Some(iri("s2")), None, Some(Term::literal("2")), vec![]),
        (None, Some(iri("p0")), None, vec![Term::DefaultGraph]),
        (None, None, Some(Term::literal("4")), vec![iri("g1"), iri("g3")]),
    ];

    // Twice: the second round runs after the first one built (and evicted) orders.
    for _ in 0..2 {
        for (s, p, o, c) in &lookups {
            let expected = sorted_quads(
                baseline
                    .iter_matching(s.as_ref(), p.as_ref(), o.as_ref(), c)
                    .collect(),
            );
            let actual = sorted_quads(
                dataset
                    .iter_matching(s.as_ref(), p.as_ref(), o.as_ref(), c)
                    .collect(),
            );
            assert_eq!(actual, expected);
        }
    }
    assert!(dataset.stats().sorted_orders.len() <= 3);
}

// --- Views ---

#[test]
fn views_deduplicate() {
    for mut dataset in datasets() {
        dataset.add(&iri("a"), &iri("knows"), &iri("b"), &[iri("g1")]).unwrap();
        dataset.add(&iri("a"), &iri("knows"), &iri("c"), &[iri("g2")]).unwrap();

        let store = dataset.store();
        assert_eq!(dataset.subjects().iter(store).collect::<Vec<_>>(), vec![iri("a")]);
        assert_eq!(
            sorted_terms(dataset.contexts().iter(store).collect()),
            vec![iri("g1"), iri("g2")]
        );
    }
}

#[test]
fn filtered_view_writes_through() {
    for mut dataset in datasets() {
        let work = dataset.filter(None, None, None, &[iri("work")]);
        work.add(dataset.store_mut(), Some(&iri("a")), Some(&iri("p")), Some(&iri("b")), &[])
            .unwrap();

        assert!(dataset.contains(None, None, None, &[iri("work")]));
        assert!(!dataset.contains(None, None, None, &[Term::DefaultGraph]));
        assert_eq!(
            work.add(dataset.store_mut(), Some(&iri("a")), Some(&iri("p")), Some(&iri("b")), &[iri("home")]),
            Err(Error::FilteredOut)
        );

        assert!(work.clear(dataset.store_mut()));
        assert!(dataset.is_empty());
    }
}

#[test]
fn term_views_of_a_filter_stay_inside_it() {
    for mut dataset in datasets() {
        dataset.add(&iri("a"), &iri("p"), &iri("b"), &[iri("g1")]).unwrap();
        dataset.add(&iri("a"), &iri("p"), &iri("c"), &[iri("g2")]).unwrap();

        let objects = dataset.filter(None, None, Some(&iri("b")), &[]).objects();
        assert_eq!(objects.iter(dataset.store()).collect::<Vec<_>>(), vec![iri("b")]);
        assert!(!objects.contains(dataset.store(), &iri("c")));
        assert!(!objects.remove(dataset.store_mut(), &iri("c")));
        assert_eq!(objects.add(dataset.store_mut(), &iri("c")), Err(Error::FilteredOut));
        assert_eq!(dataset.len(), 2);

        let contexts = dataset.filter(None, None, None, &[iri("g1")]).contexts();
        assert_eq!(contexts.iter(dataset.store()).collect::<Vec<_>>(), vec![iri("g1")]);
        assert!(!contexts.remove(dataset.store_mut(), &iri("g2")));
        assert_eq!(dataset.len(), 2);
    }
}

#[test]
fn clear_contexts_only_touches_listed_contexts() {
    for mut dataset in datasets() {
        dataset
            .add(&iri("a"), &iri("p"), &iri("b"), &[Term::DefaultGraph, iri("g1"), iri("g2")])
            .unwrap();
        assert!(dataset.clear_contexts(&[iri("g1"), Term::DefaultGraph]));
        assert_eq!(
            dataset.iter().collect::<Vec<_>>(),
            vec![Quad::new(iri("a"), iri("p"), iri("b"), iri("g2"))]
        );
    }
}
