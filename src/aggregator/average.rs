use crate::model::Grade;

/// Running weighted sums over a set of grades.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct WeightedTotals {
    /// Σ(value × weight)
    pub points: f64,
    /// Σweight
    pub weight: f64,
}

impl WeightedTotals {
    pub fn from_grades<'a>(grades: impl IntoIterator<Item = &'a Grade>) -> Self {
        grades.into_iter().fold(Self::default(), |mut t, g| {
            t.add(g.grade, g.weight);
            t
        })
    }

    pub fn add(&mut self, value: f64, weight: f64) {
        self.points += value * weight;
        self.weight += weight;
    }

    /// `points / weight`, or `None` when nothing has been added.
    pub fn average(&self) -> Option<f64> {
        if self.weight == 0.0 {
            None
        } else {
            Some(self.points / self.weight)
        }
    }
}

/// Weighted mean of `grades`. Returns `None` for an empty list.
///
/// The caller filters by subject beforehand. No rounding is applied.
pub fn weighted_average(grades: &[Grade]) -> Option<f64> {
    if grades.is_empty() {
        return None;
    }
    WeightedTotals::from_grades(grades).average()
}

/// Solves `(S + x·w) / (W + w) = target` for the next grade `x`.
///
/// With no current grades the answer is the target itself. The result is
/// not clamped: values above 10 mean the target is out of reach and values
/// below 1 mean it is already secured. `next_weight` must be positive; see
/// [`crate::validate::RequiredGradeQuery`].
pub fn required_grade(current: &[Grade], target: f64, next_weight: f64) -> f64 {
    if current.is_empty() {
        return target;
    }
    let totals = WeightedTotals::from_grades(current);
    (target * (totals.weight + next_weight) - totals.points) / next_weight
}
