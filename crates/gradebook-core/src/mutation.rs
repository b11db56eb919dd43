//! Validated create/update/delete operations on a user's collections.
//!
//! Each operation borrows the current collection and returns a new one; the
//! input is never modified. Numeric fields arrive as the raw text a form would
//! submit and are parsed here.

use chrono::NaiveDate;

use crate::{
  Error, Result,
  grade::{self, Grade, GradeForm, GradeId},
  subject::{Subject, SubjectId},
  weight::{Weight, WeightId},
};

/// Parse a form number: trimmed, a valid `f64`, and finite.
fn parse_number(raw: &str) -> Option<f64> {
  raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

// ─── Weights ─────────────────────────────────────────────────────────────────

fn validate_weight(name: &str, value: &str) -> Result<(String, f64)> {
  let name = name.trim();
  if name.is_empty() {
    return Err(Error::EmptyWeightName);
  }
  let value = parse_number(value)
    .filter(|v| *v > 0.0)
    .ok_or_else(|| Error::InvalidWeightValue(value.to_owned()))?;
  Ok((name.to_owned(), value))
}

/// Append a new weight with a freshly minted id.
pub fn add_weight(weights: &[Weight], name: &str, value: &str) -> Result<Vec<Weight>> {
  let (name, value) = validate_weight(name, value)?;
  let mut next = weights.to_vec();
  next.push(Weight { id: WeightId::generate(), name, value });
  Ok(next)
}

/// Rewrite the name and value of weight `id` in place; its id and position
/// are preserved and every other weight is left as is.
pub fn edit_weight(
  weights: &[Weight],
  id: &WeightId,
  name: &str,
  value: &str,
) -> Result<Vec<Weight>> {
  let (name, value) = validate_weight(name, value)?;
  if !weights.iter().any(|w| &w.id == id) {
    return Err(Error::WeightNotFound(id.clone()));
  }
  Ok(
    weights
      .iter()
      .map(|w| {
        if &w.id == id {
          Weight { id: w.id.clone(), name: name.clone(), value }
        } else {
          w.clone()
        }
      })
      .collect(),
  )
}

/// Remove weight `id`. Grades that reference it are left dangling.
pub fn delete_weight(weights: &[Weight], id: &WeightId) -> Vec<Weight> {
  weights.iter().filter(|w| &w.id != id).cloned().collect()
}

// ─── Subjects ────────────────────────────────────────────────────────────────

/// Trim `name` and check it against every subject except `exclude`.
fn validate_subject_name(
  subjects: &[Subject],
  name: &str,
  exclude: Option<&SubjectId>,
) -> Result<String> {
  let name = name.trim();
  if name.is_empty() {
    return Err(Error::EmptySubjectName);
  }
  let clash = subjects
    .iter()
    .filter(|s| Some(&s.id) != exclude)
    .any(|s| s.has_name(name));
  if clash {
    return Err(Error::DuplicateSubject(name.to_owned()));
  }
  Ok(name.to_owned())
}

pub fn add_subject(subjects: &[Subject], name: &str) -> Result<Vec<Subject>> {
  let name = validate_subject_name(subjects, name, None)?;
  let mut next = subjects.to_vec();
  next.push(Subject { id: SubjectId::generate(), name });
  Ok(next)
}

/// Rename subject `id`. Grades filed under the old name are not touched.
pub fn rename_subject(subjects: &[Subject], id: &SubjectId, name: &str) -> Result<Vec<Subject>> {
  let name = validate_subject_name(subjects, name, Some(id))?;
  if !subjects.iter().any(|s| &s.id == id) {
    return Err(Error::SubjectNotFound(id.clone()));
  }
  Ok(
    subjects
      .iter()
      .map(|s| {
        if &s.id == id {
          Subject { id: s.id.clone(), name: name.clone() }
        } else {
          s.clone()
        }
      })
      .collect(),
  )
}

/// Remove subject `id`. Its grades stay, still carrying the subject's name.
pub fn delete_subject(subjects: &[Subject], id: &SubjectId) -> Vec<Subject> {
  subjects.iter().filter(|s| &s.id != id).cloned().collect()
}

// ─── Grades ──────────────────────────────────────────────────────────────────

/// Validate `form` and append the resulting grade, dated `today`.
///
/// Checked in order: a subject is selected, the value is a number in
/// `[1, 6]`, a weight is selected. Neither the subject nor the weight has to
/// exist in the user's catalogs.
pub fn add_grade(grades: &[Grade], form: &GradeForm, today: NaiveDate) -> Result<Vec<Grade>> {
  if form.subject.is_empty() {
    return Err(Error::SubjectNotSelected);
  }
  let value = parse_number(&form.value)
    .filter(|v| (grade::MIN_GRADE..=grade::MAX_GRADE).contains(v))
    .ok_or_else(|| Error::InvalidGradeValue(form.value.clone()))?;
  if form.weight_id.is_empty() {
    return Err(Error::WeightNotSelected);
  }

  let mut next = grades.to_vec();
  next.push(Grade {
    id: GradeId::generate(),
    subject: form.subject.clone(),
    value,
    weight_id: WeightId::from(form.weight_id.as_str()),
    date: grade::format_date(today),
    is_predicted: form.is_predicted,
  });
  Ok(next)
}

pub fn delete_grade(grades: &[Grade], id: &GradeId) -> Vec<Grade> {
  grades.iter().filter(|g| &g.id != id).cloned().collect()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
