//! Full-replace reconciliation of a profile's field values.
//!
//! Planning is pure: given a schema snapshot, the rows currently stored for a
//! profile and a submission, [`plan_reconciliation`] either rejects the
//! submission with every violation found or returns the minimal set of
//! upserts and deletes that makes the stored rows match the submission.
//! Applying the plan atomically is the persistence layer's job.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::error::{FieldSchemaError, FieldViolation};
use crate::models::field_definition::FieldDefinition;
use crate::models::field_value::{ChangeSummary, FieldSubmission, FieldValue, StoredValue};
use crate::services::field_validation::{validate_submitted_value, SubmissionLimits};

/// The active schema of one category, read once per reconciliation.
#[derive(Debug, Clone)]
pub struct SchemaSnapshot {
    artist_category_id: Uuid,
    fields: Vec<FieldDefinition>,
    index: HashMap<Uuid, usize>,
}

impl SchemaSnapshot {
    /// Builds a snapshot from loaded definitions.
    ///
    /// Inactive definitions and definitions of other categories are dropped;
    /// the rest are ordered by `sort_order`, then `field_name`.
    pub fn new(artist_category_id: Uuid, definitions: Vec<FieldDefinition>) -> Self {
        let mut fields: Vec<FieldDefinition> = definitions
            .into_iter()
            .filter(|d| d.is_active && d.artist_category_id == artist_category_id)
            .collect();
        fields.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then_with(|| a.field_name.cmp(&b.field_name))
        });
        let index = fields.iter().enumerate().map(|(i, d)| (d.id, i)).collect();

        Self {
            artist_category_id,
            fields,
            index,
        }
    }

    pub fn artist_category_id(&self) -> Uuid {
        self.artist_category_id
    }

    /// Active definitions in validation order.
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn get(&self, field_definition_id: &Uuid) -> Option<&FieldDefinition> {
        self.index.get(field_definition_id).map(|&i| &self.fields[i])
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter().filter(|d| d.is_required)
    }
}

/// A value row currently stored for the profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ExistingValue {
    pub field_definition_id: Uuid,
    pub stored: StoredValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertKind {
    Insert,
    Update,
}

/// A validated value that must be written.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedUpsert {
    pub field_definition_id: Uuid,
    pub field_name: String,
    pub value: FieldValue,
    pub stored: StoredValue,
    pub kind: UpsertKind,
}

/// Mutations needed to bring a profile's stored values in line with a submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconciliationPlan {
    pub upserts: Vec<StagedUpsert>,
    /// Definition ids whose rows must be removed.
    pub deletes: Vec<Uuid>,
    /// Definition ids whose stored rows already match the submission.
    pub unchanged: Vec<Uuid>,
}

impl ReconciliationPlan {
    pub fn change_summary(&self) -> ChangeSummary {
        let inserted = self
            .upserts
            .iter()
            .filter(|u| u.kind == UpsertKind::Insert)
            .count();
        ChangeSummary {
            inserted,
            updated: self.upserts.len() - inserted,
            deleted: self.deletes.len(),
            unchanged: self.unchanged.len(),
        }
    }

    pub fn is_noop(&self) -> bool {
        self.upserts.is_empty() && self.deletes.is_empty()
    }
}

/// Validates a submission against the snapshot and plans the mutations.
///
/// Violations are reported in a fixed order: unknown fields in submission
/// order, then per-field violations in schema order, then one entry listing
/// every missing required field. A required field whose value was submitted
/// but rejected is not reported again as missing.
pub fn plan_reconciliation(
    snapshot: &SchemaSnapshot,
    existing: &[ExistingValue],
    submissions: &[FieldSubmission],
    limits: &SubmissionLimits,
) -> Result<ReconciliationPlan, FieldSchemaError> {
    let mut violations = Vec::new();

    let mut submitted = HashMap::new();
    let mut duplicated = HashSet::new();
    let mut reported_unknown = HashSet::new();
    for submission in submissions {
        let id = submission.field_definition_id;
        if snapshot.get(&id).is_none() {
            if reported_unknown.insert(id) {
                violations.push(FieldViolation::UnknownField {
                    field_definition_id: id,
                });
            }
            continue;
        }
        if submitted.insert(id, submission.value.as_ref()).is_some() {
            duplicated.insert(id);
        }
    }

    let mut validated: Vec<(&FieldDefinition, FieldValue)> = Vec::new();
    let mut rejected = HashSet::new();
    for def in snapshot.fields() {
        let Some(value) = submitted.get(&def.id) else {
            continue;
        };
        if duplicated.contains(&def.id) {
            violations.push(FieldViolation::InvalidValue {
                field_name: def.field_name.clone(),
                expected: "a single value (field submitted more than once)".to_string(),
            });
            rejected.insert(def.id);
            continue;
        }
        match validate_submitted_value(def, *value, limits) {
            Ok(Some(field_value)) => validated.push((def, field_value)),
            Ok(None) => {}
            Err(violation) => {
                violations.push(violation);
                rejected.insert(def.id);
            }
        }
    }

    let present: HashSet<Uuid> = validated.iter().map(|(def, _)| def.id).collect();
    let missing: Vec<String> = snapshot
        .required_fields()
        .filter(|d| !present.contains(&d.id) && !rejected.contains(&d.id))
        .map(|d| d.field_name.clone())
        .collect();
    if !missing.is_empty() {
        violations.push(FieldViolation::MissingRequiredFields {
            field_names: missing,
        });
    }

    if !violations.is_empty() {
        return Err(FieldSchemaError::Rejected(violations));
    }

    let stored_by_id: HashMap<Uuid, &StoredValue> = existing
        .iter()
        .map(|e| (e.field_definition_id, &e.stored))
        .collect();

    let mut plan = ReconciliationPlan::default();
    for (def, value) in validated {
        let stored = value.to_stored();
        let kind = match stored_by_id.get(&def.id) {
            Some(current) if **current == stored => {
                plan.unchanged.push(def.id);
                continue;
            }
            Some(_) => UpsertKind::Update,
            None => UpsertKind::Insert,
        };
        plan.upserts.push(StagedUpsert {
            field_definition_id: def.id,
            field_name: def.field_name.clone(),
            value,
            stored,
            kind,
        });
    }

    let mut seen = HashSet::new();
    plan.deletes = existing
        .iter()
        .map(|e| e.field_definition_id)
        .filter(|id| !present.contains(id) && seen.insert(*id))
        .collect();

    Ok(plan)
}
