//! Helpers for reading and writing single-valued properties.
//!
//! Every helper takes a `contexts` slice read the way the store reads it: an
//! empty slice means any context, otherwise only the listed contexts count,
//! [`Term::DefaultGraph`] included. Writes with an empty slice go to the
//! default graph.

use quadrant_common::types::{Literal, Position, Term};
use quadrant_common::utils::error::{Error, Result};
use quadrant_core::{FilteredView, QuadStore};

fn about(store: &QuadStore, subject: &Term, predicate: &Term, contexts: &[Term]) -> FilteredView {
    store.filter(Some(subject), Some(predicate), None, contexts)
}

fn missing(position: Position) -> Error {
    Error::MissingValue { position }
}

/// Distinct objects of (subject, predicate, ?).
#[must_use]
pub fn objects(
    store: &QuadStore,
    subject: &Term,
    predicate: &Term,
    contexts: &[Term],
) -> Vec<Term> {
    about(store, subject, predicate, contexts)
        .objects()
        .iter(store)
        .collect()
}

/// Distinct subjects of (?, predicate, object).
#[must_use]
pub fn subjects(
    store: &QuadStore,
    predicate: &Term,
    object: &Term,
    contexts: &[Term],
) -> Vec<Term> {
    store
        .filter(None, Some(predicate), Some(object), contexts)
        .subjects()
        .iter(store)
        .collect()
}

// === Objects ===

/// The object of (subject, predicate, ?), when there is at most one.
///
/// # Errors
///
/// [`Error::Multiplicity`] for two or more distinct objects.
pub fn optional_object(
    store: &QuadStore,
    subject: &Term,
    predicate: &Term,
    contexts: &[Term],
) -> Result<Option<Term>> {
    about(store, subject, predicate, contexts).object_value(store)
}

/// The one object of (subject, predicate, ?).
///
/// # Errors
///
/// [`Error::MissingValue`] when there is none, [`Error::Multiplicity`] when
/// there are several.
pub fn unique_object(
    store: &QuadStore,
    subject: &Term,
    predicate: &Term,
    contexts: &[Term],
) -> Result<Term> {
    optional_object(store, subject, predicate, contexts)?
        .ok_or_else(|| missing(Position::Object))
}

/// Like [`optional_object`], requiring an IRI or blank node.
///
/// # Errors
///
/// [`Error::Multiplicity`], or [`Error::UnexpectedKind`] for a literal.
pub fn optional_object_resource(
    store: &QuadStore,
    subject: &Term,
    predicate: &Term,
    contexts: &[Term],
) -> Result<Option<Term>> {
    about(store, subject, predicate, contexts).object_resource(store)
}

/// Like [`unique_object`], requiring an IRI or blank node.
///
/// # Errors
///
/// [`Error::MissingValue`], [`Error::Multiplicity`], or
/// [`Error::UnexpectedKind`] for a literal.
pub fn unique_object_resource(
    store: &QuadStore,
    subject: &Term,
    predicate: &Term,
    contexts: &[Term],
) -> Result<Term> {
    optional_object_resource(store, subject, predicate, contexts)?
        .ok_or_else(|| missing(Position::Object))
}

/// Like [`optional_object`], requiring an IRI.
///
/// # Errors
///
/// [`Error::Multiplicity`], or [`Error::UnexpectedKind`] for anything but
/// an IRI.
pub fn optional_object_iri(
    store: &QuadStore,
    subject: &Term,
    predicate: &Term,
    contexts: &[Term],
) -> Result<Option<Term>> {
    about(store, subject, predicate, contexts).object_iri(store)
}

/// Like [`unique_object`], requiring an IRI.
///
/// # Errors
///
/// [`Error::MissingValue`], [`Error::Multiplicity`], or
/// [`Error::UnexpectedKind`] for anything but an IRI.
pub fn unique_object_iri(
    store: &QuadStore,
    subject: &Term,
    predicate: &Term,
    contexts: &[Term],
) -> Result<Term> {
    optional_object_iri(store, subject, predicate, contexts)?
        .ok_or_else(|| missing(Position::Object))
}

/// Like [`optional_object`], requiring a literal.
///
/// # Errors
///
/// [`Error::Multiplicity`], or [`Error::UnexpectedKind`] for a resource.
pub fn optional_object_literal(
    store: &QuadStore,
    subject: &Term,
    predicate: &Term,
    contexts: &[Term],
) -> Result<Option<Literal>> {
    about(store, subject, predicate, contexts).object_literal(store)
}

/// Like [`unique_object`], requiring a literal.
///
/// # Errors
///
/// [`Error::MissingValue`], [`Error::Multiplicity`], or
/// [`Error::UnexpectedKind`] for a resource.
pub fn unique_object_literal(
    store: &QuadStore,
    subject: &Term,
    predicate: &Term,
    contexts: &[Term],
) -> Result<Literal> {
    optional_object_literal(store, subject, predicate, contexts)?
        .ok_or_else(|| missing(Position::Object))
}

// === Subjects ===

/// The subject of (?, predicate, object), when there is at most one.
///
/// # Errors
///
/// [`Error::Multiplicity`] for two or more distinct subjects.
pub fn optional_subject(
    store: &QuadStore,
    predicate: &Term,
    object: &Term,
    contexts: &[Term],
) -> Result<Option<Term>> {
    let mut subjects = store
        .filter(None, Some(predicate), Some(object), contexts)
        .subjects()
        .iter(store);
    let Some(first) = subjects.next() else {
        return Ok(None);
    };
    match subjects.next() {
        Some(second) => Err(Error::Multiplicity { first, second }),
        None => Ok(Some(first)),
    }
}

/// The one subject of (?, predicate, object).
///
/// # Errors
///
/// [`Error::MissingValue`] when there is none, [`Error::Multiplicity`] when
/// there are several.
pub fn unique_subject(
    store: &QuadStore,
    predicate: &Term,
    object: &Term,
    contexts: &[Term],
) -> Result<Term> {
    optional_subject(store, predicate, object, contexts)?
        .ok_or_else(|| missing(Position::Subject))
}

/// Like [`optional_subject`], requiring an IRI.
///
/// # Errors
///
/// [`Error::Multiplicity`], or [`Error::UnexpectedKind`] for a blank node.
pub fn optional_subject_iri(
    store: &QuadStore,
    predicate: &Term,
    object: &Term,
    contexts: &[Term],
) -> Result<Option<Term>> {
    match optional_subject(store, predicate, object, contexts)? {
        Some(found) if !found.is_iri() => Err(Error::UnexpectedKind {
            expected: "IRI",
            found,
        }),
        subject => Ok(subject),
    }
}

/// Like [`unique_subject`], requiring an IRI.
///
/// # Errors
///
/// [`Error::MissingValue`], [`Error::Multiplicity`], or
/// [`Error::UnexpectedKind`] for a blank node.
pub fn unique_subject_iri(
    store: &QuadStore,
    predicate: &Term,
    object: &Term,
    contexts: &[Term],
) -> Result<Term> {
    optional_subject_iri(store, predicate, object, contexts)?
        .ok_or_else(|| missing(Position::Subject))
}

// === Writes ===

/// Makes `object` the only object of (subject, predicate, ?) in `contexts`:
/// every existing object there is removed, then `object` is added to each
/// listed context. With no contexts, objects are removed from every context
/// and `object` goes to the default graph.
///
/// # Errors
///
/// [`Error::InvalidTerm`] when a term cannot occupy its position. The store
/// is left untouched in that case.
pub fn set_unique_object(
    store: &mut QuadStore,
    subject: &Term,
    predicate: &Term,
    object: &Term,
    contexts: &[Term],
) -> Result<()> {
    let terms = [
        (Position::Subject, subject),
        (Position::Predicate, predicate),
        (Position::Object, object),
    ];
    let contexts_checked = contexts.iter().map(|context| (Position::Context, context));
    for (position, term) in terms.into_iter().chain(contexts_checked) {
        if !position.accepts(term) {
            return Err(Error::InvalidTerm {
                position,
                term: term.clone(),
            });
        }
    }

    store.remove(Some(subject), Some(predicate), None, contexts);
    store.add(subject, predicate, object, contexts)?;
    Ok(())
}
