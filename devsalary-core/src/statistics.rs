use crate::contract::LanguageSummary;

/// Folds salary estimates for one language into a [`LanguageSummary`].
///
/// `reported_total` is passed through untouched; vacancies without an estimate
/// count as found but not processed.
pub fn summarize(reported_total: u64, estimates: &[Option<u64>]) -> LanguageSummary {
    // u128 so that no realistic number of u64 salaries can overflow the sum.
    let (count, sum) = estimates
        .iter()
        .flatten()
        .fold((0u64, 0u128), |(count, sum), salary| {
            (count + 1, sum + u128::from(*salary))
        });

    // The mean never exceeds the largest salary, so it fits back into u64.
    let average_salary = if count > 0 {
        (sum / u128::from(count)) as u64
    } else {
        0
    };

    LanguageSummary {
        vacancies_found: reported_total,
        vacancies_processed: count,
        average_salary,
    }
}
