//! Weighted averages and per-subject grouping.
//!
//! Everything here is a pure function of its inputs. Grades whose `weight_id`
//! does not resolve to a known weight are left out of both the numerator and
//! the denominator; an average with nothing to divide by is `0.0`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
  grade::Grade,
  weight::{self, Weight},
};

// ─── Averages ────────────────────────────────────────────────────────────────

/// `Σ value·weight / Σ weight` over grades with a resolvable weight, rounded
/// to two decimal places. `0.0` when no grade resolves.
///
/// Weights are divided by the largest resolved weight before summing, so any
/// finite weight the validator accepts keeps both sums finite.
pub fn weighted_average<'a, I>(grades: I, weights: &[Weight]) -> f64
where
  I: IntoIterator<Item = &'a Grade>,
{
  let resolved: Vec<(f64, f64)> = grades
    .into_iter()
    .filter_map(|g| weight::find(weights, &g.weight_id).map(|w| (g.value, w.value)))
    .collect();

  let scale = resolved.iter().map(|&(_, w)| w).fold(0.0, f64::max);
  if scale <= 0.0 {
    return 0.0;
  }

  let (sum, total) = resolved
    .into_iter()
    .fold((0.0, 0.0), |(sum, total), (value, weight)| {
      let weight = weight / scale;
      (sum + value * weight, total + weight)
    });

  if total > 0.0 { round2(sum / total) } else { 0.0 }
}

/// The average of one subject's grades. Same computation as
/// [`weighted_average`], so per-subject and overall figures always agree.
pub fn subject_average<'a, I>(subject_grades: I, weights: &[Weight]) -> f64
where
  I: IntoIterator<Item = &'a Grade>,
{
  weighted_average(subject_grades, weights)
}

/// The weighted average of real grades only, ignoring predicted ones.
pub fn actual_average<'a, I>(grades: I, weights: &[Weight]) -> f64
where
  I: IntoIterator<Item = &'a Grade>,
{
  weighted_average(grades.into_iter().filter(|g| !g.is_predicted), weights)
}

fn round2(x: f64) -> f64 { (x * 100.0).round() / 100.0 }

// ─── Grouping ────────────────────────────────────────────────────────────────

/// Group grades by their subject string.
///
/// Keys appear in order of first occurrence and each bucket keeps insertion
/// order. Keys are compared verbatim: `"Math"` and `"math"` are two groups.
pub fn group_by_subject(grades: &[Grade]) -> IndexMap<&str, Vec<&Grade>> {
  let mut groups: IndexMap<&str, Vec<&Grade>> = IndexMap::new();
  for grade in grades {
    groups.entry(grade.subject.as_str()).or_default().push(grade);
  }
  groups
}

// ─── Overview read model ─────────────────────────────────────────────────────

/// A grade with its weight resolved for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeLine {
  pub grade:        Grade,
  /// `None` when the grade's weight has been deleted.
  pub weight_name:  Option<String>,
  pub weight_value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectSummary {
  pub subject: String,
  pub average: f64,
  pub grades:  Vec<GradeLine>,
}

/// Computed read model for a user's grades — never stored, always derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
  /// Weighted average over every grade, predicted ones included.
  pub average:        f64,
  /// Weighted average over real (non-predicted) grades.
  pub actual_average: f64,
  pub grade_count:    usize,
  /// One entry per subject string, in order of first appearance.
  pub subjects:       Vec<SubjectSummary>,
}

impl Overview {
  pub fn compute(grades: &[Grade], weights: &[Weight]) -> Self {
    let subjects = group_by_subject(grades)
      .into_iter()
      .map(|(subject, bucket)| SubjectSummary {
        subject: subject.to_owned(),
        average: subject_average(bucket.iter().copied(), weights),
        grades:  bucket
          .into_iter()
          .map(|g| {
            let w = weight::find(weights, &g.weight_id);
            GradeLine {
              grade:        g.clone(),
              weight_name:  w.map(|w| w.name.clone()),
              weight_value: w.map(|w| w.value),
            }
          })
          .collect(),
      })
      .collect();

    Self {
      average: weighted_average(grades, weights),
      actual_average: actual_average(grades, weights),
      grade_count: grades.len(),
      subjects,
    }
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
