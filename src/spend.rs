use crate::models::{SpendRow, SpendSeries};

/// Shapes store-aggregated rows into the two parallel series the chart
/// consumes. Labels get a leading capital; totals pass through untouched.
pub fn build_spend_series(rows: &[SpendRow]) -> SpendSeries {
    let mut labels = Vec::with_capacity(rows.len());
    let mut totals = Vec::with_capacity(rows.len());
    for row in rows {
        labels.push(capitalize(&row.cylinder_type));
        totals.push(row.total);
    }

    SpendSeries { labels, totals }
}

pub fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cylinder_type: &str, total: f64) -> SpendRow {
        SpendRow {
            cylinder_type: cylinder_type.to_string(),
            total,
        }
    }

    #[test]
    fn series_keeps_row_order_and_capitalizes_labels() {
        let rows = vec![row("lpg", 150.0), row("cng", 30.0)];
        let series = build_spend_series(&rows);
        assert_eq!(series.labels, vec!["Lpg", "Cng"]);
        assert_eq!(series.totals, vec![150.0, 30.0]);
    }

    #[test]
    fn empty_rows_yield_empty_series() {
        let series = build_spend_series(&[]);
        assert!(series.labels.is_empty());
        assert!(series.totals.is_empty());
    }

    #[test]
    fn capitalize_only_touches_the_first_letter() {
        assert_eq!(capitalize("lpg"), "Lpg");
        assert_eq!(capitalize("propane mix"), "Propane mix");
        assert_eq!(capitalize(""), "");
    }
}
