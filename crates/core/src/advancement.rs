use crate::progress::Progress;

//
// ─── OUTCOME ───────────────────────────────────────────────────────────────────
//

/// Result of advancing through a subchapter visit.
///
/// `should_persist` is false for idempotent re-visits: a position the stored
/// percentage already accounts for produces no write-back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advancement {
    pub new_progress: Progress,
    pub should_persist: bool,
}

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

/// Computes the module percentage after visiting the subchapter at
/// `current_index` (0-based) in a sequence of `sequence_len` subchapters.
///
/// Progress is stored only as a single module-level percentage, so the number
/// of subchapters already accounted for has to be inferred by inverting
/// `completed / sequence_len * 100`. Both directions round half up, which makes
/// the inversion the best available approximation rather than exact; that loss
/// is inherent to storing an aggregate percentage and the `max` floor below
/// keeps it from ever surfacing as a regression.
///
/// The divisor is floored at 1 so an unexpectedly empty sequence cannot divide
/// by zero; callers suppress advancement entirely for modules with no content.
///
/// # Examples
///
/// ```
/// # use course_core::progress::Progress;
/// # use course_core::advancement::advance;
/// let first = advance(Progress::ZERO, 4, 0);
/// assert_eq!(first.new_progress.value(), 25);
/// assert!(first.should_persist);
///
/// // Re-visiting an already-counted position writes nothing.
/// let revisit = advance(first.new_progress, 4, 0);
/// assert!(!revisit.should_persist);
/// ```
#[must_use]
pub fn advance(existing: Progress, sequence_len: usize, current_index: usize) -> Advancement {
    let total = sequence_len.max(1);

    // How many subchapters the stored percentage already implies as completed.
    let completed = percent_to_count(existing, total);

    // Count this visit only if its position lies beyond the implied prefix;
    // counting it again would double count.
    let should_count = current_index + 1 > completed;
    let new_completed = if should_count { completed + 1 } else { completed };

    let computed = count_to_percent(new_completed, total);

    // Non-regression: rounding may compute a lower value than what is stored.
    let new_progress = existing.max(computed);

    Advancement {
        new_progress,
        should_persist: new_progress > existing,
    }
}

fn percent_to_count(progress: Progress, total: usize) -> usize {
    let raw = (f64::from(progress.value()) * total as f64) / 100.0;
    raw.round() as usize
}

fn count_to_percent(count: usize, total: usize) -> Progress {
    let raw = (count as f64 / total as f64) * 100.0;
    Progress::clamped(raw.round() as i64)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
