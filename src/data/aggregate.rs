use std::collections::BTreeMap;

use serde::Serialize;

use super::model::{LaunchDataset, LaunchRecord, Outcome, PayloadRange, SiteSelector};

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Number of launches with a given outcome at a given site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeCount {
    pub site: String,
    pub outcome: Outcome,
    pub count: usize,
}

/// Pie-chart input: outcome counts per (site, outcome).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeAggregate {
    pub entries: Vec<OutcomeCount>,
}

impl OutcomeAggregate {
    /// Sum of every count.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Count for one (site, outcome) pair; 0 when the pair was not emitted.
    pub fn count(&self, site: &str, outcome: Outcome) -> usize {
        self.get(site, outcome).unwrap_or(0)
    }

    pub fn get(&self, site: &str, outcome: Outcome) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.site == site && e.outcome == outcome)
            .map(|e| e.count)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Scatter-chart input: records whose payload lies in the selected range.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilteredRows<'a> {
    pub rows: Vec<&'a LaunchRecord>,
}

impl FilteredRows<'_> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Both chart inputs for one control state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregation<'a> {
    pub outcomes: OutcomeAggregate,
    pub filtered: FilteredRows<'a>,
}

// ---------------------------------------------------------------------------
// Aggregator
// ---------------------------------------------------------------------------

/// Compute the pie and scatter inputs for a (site, payload range) selection.
///
/// The site only scopes the outcome counts; the filtered rows are taken from
/// every site.
pub fn compute<'a>(
    dataset: &'a LaunchDataset,
    site: &SiteSelector,
    range: &PayloadRange,
) -> Aggregation<'a> {
    Aggregation {
        outcomes: count_outcomes(dataset, site),
        filtered: filter_payload(dataset, range),
    }
}

/// Outcome counts for the selected scope.
///
/// * `All` groups by site and reports the (site, outcome) pairs that occur.
/// * A known site reports Success and Failure, zero included.
/// * An unknown site yields an empty aggregate.
pub fn count_outcomes(dataset: &LaunchDataset, site: &SiteSelector) -> OutcomeAggregate {
    match site {
        SiteSelector::All => {
            let mut groups: BTreeMap<(&str, Outcome), usize> = BTreeMap::new();
            for rec in dataset.records() {
                *groups.entry((rec.site.as_str(), rec.outcome)).or_default() += 1;
            }
            OutcomeAggregate {
                entries: groups
                    .into_iter()
                    .map(|((site, outcome), count)| OutcomeCount {
                        site: site.to_string(),
                        outcome,
                        count,
                    })
                    .collect(),
            }
        }
        SiteSelector::Site(name) => {
            if !dataset.has_site(name) {
                log::warn!("Unknown launch site {name:?}; reporting no outcomes");
                return OutcomeAggregate::default();
            }
            let count_of = |outcome: Outcome| {
                dataset
                    .records()
                    .iter()
                    .filter(|r| r.site == *name && r.outcome == outcome)
                    .count()
            };
            OutcomeAggregate {
                entries: [Outcome::Success, Outcome::Failure]
                    .into_iter()
                    .map(|outcome| OutcomeCount {
                        site: name.clone(),
                        outcome,
                        count: count_of(outcome),
                    })
                    .collect(),
            }
        }
    }
}

/// Records of every site with `low <= payload <= high`, in dataset order.
pub fn filter_payload<'a>(dataset: &'a LaunchDataset, range: &PayloadRange) -> FilteredRows<'a> {
    FilteredRows {
        rows: dataset
            .records()
            .iter()
            .filter(|r| range.contains(r.payload_mass_kg))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_launches() -> LaunchDataset {
        LaunchDataset::new(vec![
            LaunchRecord::new("siteA", 500.0, Outcome::Success),
            LaunchRecord::new("siteA", 1500.0, Outcome::Failure),
            LaunchRecord::new("siteB", 1000.0, Outcome::Success),
        ])
        .unwrap()
    }

    fn mixed() -> LaunchDataset {
        let sites = ["CCAFS LC-40", "KSC LC-39A", "VAFB SLC-4E", "CCAFS SLC-40"];
        let records = (0..40)
            .map(|i| {
                let outcome = if i % 3 == 0 {
                    Outcome::Success
                } else {
                    Outcome::Failure
                };
                LaunchRecord::new(sites[i % sites.len()], (i * 250) as f64, outcome)
            })
            .collect();
        LaunchDataset::new(records).unwrap()
    }

    #[test]
    fn all_sites_reports_only_observed_pairs() {
        let ds = three_launches();
        let agg = count_outcomes(&ds, &SiteSelector::All);

        assert_eq!(agg.entries.len(), 3);
        assert_eq!(agg.get("siteA", Outcome::Success), Some(1));
        assert_eq!(agg.get("siteA", Outcome::Failure), Some(1));
        assert_eq!(agg.get("siteB", Outcome::Success), Some(1));
        assert_eq!(agg.get("siteB", Outcome::Failure), None);
    }

    #[test]
    fn single_site_reports_both_outcomes() {
        let ds = three_launches();
        let agg = count_outcomes(&ds, &SiteSelector::parse("siteA"));
        assert_eq!(agg.count("siteA", Outcome::Success), 1);
        assert_eq!(agg.count("siteA", Outcome::Failure), 1);

        let agg = count_outcomes(&ds, &SiteSelector::parse("siteB"));
        assert_eq!(agg.entries.len(), 2);
        assert_eq!(agg.get("siteB", Outcome::Failure), Some(0));
        assert_eq!(agg.entries[0].outcome, Outcome::Success);
    }

    #[test]
    fn unknown_site_gives_empty_aggregate() {
        let agg = count_outcomes(&three_launches(), &SiteSelector::parse("siteZ"));
        assert!(agg.is_empty());
        assert_eq!(agg.total(), 0);
    }

    #[test]
    fn all_sites_total_matches_record_count() {
        let ds = mixed();
        assert_eq!(count_outcomes(&ds, &SiteSelector::All).total(), ds.len());
    }

    #[test]
    fn site_counts_match_site_rows() {
        let ds = mixed();
        for site in ds.sites() {
            let agg = count_outcomes(&ds, &SiteSelector::Site(site.clone()));
            let rows = ds.records().iter().filter(|r| &r.site == site).count();
            assert_eq!(
                agg.count(site, Outcome::Success) + agg.count(site, Outcome::Failure),
                rows
            );
        }
    }

    #[test]
    fn filtered_rows_ignore_site_selection() {
        let ds = three_launches();
        let agg = compute(
            &ds,
            &SiteSelector::parse("siteB"),
            &PayloadRange::new(0.0, 1000.0),
        );
        let got: Vec<(&str, f64)> = agg
            .filtered
            .rows
            .iter()
            .map(|r| (r.site.as_str(), r.payload_mass_kg))
            .collect();
        assert_eq!(got, vec![("siteA", 500.0), ("siteB", 1000.0)]);
    }

    #[test]
    fn filtered_rows_are_exactly_the_rows_in_range() {
        let ds = mixed();
        let range = PayloadRange::new(1200.0, 5100.0);
        let filtered = filter_payload(&ds, &range);
        let expected = ds
            .records()
            .iter()
            .filter(|r| r.payload_mass_kg >= 1200.0 && r.payload_mass_kg <= 5100.0)
            .count();
        assert_eq!(filtered.len(), expected);
        assert!(filtered.rows.iter().all(|r| range.contains(r.payload_mass_kg)));
    }

    #[test]
    fn widening_the_range_never_drops_rows() {
        let ds = mixed();
        let narrow = filter_payload(&ds, &PayloadRange::new(2000.0, 4000.0));
        let wide = filter_payload(&ds, &PayloadRange::new(1000.0, 6000.0));
        assert!(wide.len() >= narrow.len());
        for row in &narrow.rows {
            assert!(wide.rows.iter().any(|w| std::ptr::eq(*w, *row)));
        }
    }

    #[test]
    fn degenerate_range_includes_exact_payload_once() {
        let ds = three_launches();
        let filtered = filter_payload(&ds, &PayloadRange::new(1000.0, 1000.0));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.rows[0].site, "siteB");
    }

    #[test]
    fn inverted_range_gives_no_rows() {
        let ds = three_launches();
        assert!(filter_payload(&ds, &PayloadRange::new(1500.0, 500.0)).is_empty());
    }

    #[test]
    fn compute_is_idempotent() {
        let ds = mixed();
        let site = SiteSelector::parse("KSC LC-39A");
        let range = PayloadRange::new(0.0, 3000.0);
        assert_eq!(compute(&ds, &site, &range), compute(&ds, &site, &range));
    }
}
