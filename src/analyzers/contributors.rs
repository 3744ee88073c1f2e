use std::collections::HashMap;

use crate::analyzers::types::{ContributorBreakdown, Party, PartyContributors, PersonClassification};
use crate::analyzers::utility::pct;

/// Groups classified people by label.
///
/// Rows are sorted by descending people count, ties by party code.
pub fn breakdown(people: &[PersonClassification]) -> ContributorBreakdown {
    let mut groups: HashMap<&Party, (usize, f64)> = HashMap::new();

    for person in people {
        let entry = groups.entry(&person.label).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += person.total;
    }

    let total_people = people.len();
    let total_dollars: f64 = people.iter().map(|p| p.total).sum();

    let mut rows: Vec<PartyContributors> = groups
        .into_iter()
        .map(|(label, (count, dollars))| PartyContributors {
            label: label.clone(),
            people: count,
            dollars,
            pct: pct(count as f64, total_people as f64),
        })
        .collect();

    rows.sort_by(|a, b| {
        b.people
            .cmp(&a.people)
            .then_with(|| a.label.code().cmp(b.label.code()))
    });

    ContributorBreakdown {
        rows,
        total_people,
        total_dollars,
    }
}

impl ContributorBreakdown {
    pub fn get(&self, label: &Party) -> Option<&PartyContributors> {
        self.rows.iter().find(|r| &r.label == label)
    }

    /// Share of all contributor dollars given by people with `label`.
    pub fn dollars_pct(&self, label: &Party) -> f64 {
        self.get(label)
            .map(|r| pct(r.dollars, self.total_dollars))
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(key: &str, label: Party, total: f64) -> PersonClassification {
        PersonClassification {
            person_key: key.into(),
            label,
            total,
        }
    }

    #[test]
    fn test_breakdown_empty() {
        let b = breakdown(&[]);

        assert!(b.rows.is_empty());
        assert_eq!(b.total_people, 0);
        assert_eq!(b.total_dollars, 0.0);
        assert_eq!(b.dollars_pct(&Party::Democrat), 0.0);
    }

    #[test]
    fn test_breakdown_single_person() {
        let b = breakdown(&[person("A", Party::Democrat, 100.0)]);

        assert_eq!(b.rows.len(), 1);
        assert_eq!(b.rows[0].label, Party::Democrat);
        assert_eq!(b.rows[0].people, 1);
        assert_eq!(b.rows[0].pct, 100.0);
        assert_eq!(b.rows[0].dollars, 100.0);
        assert_eq!(b.total_dollars, 100.0);
    }

    #[test]
    fn test_breakdown_counts_sum_to_people() {
        let people = vec![
            person("A", Party::Democrat, 10.0),
            person("B", Party::Republican, 20.0),
            person("C", Party::Republican, 30.0),
            person("D", Party::NoParty, 40.0),
            person("E", Party::Green, 5.0),
        ];

        let b = breakdown(&people);

        let counted: usize = b.rows.iter().map(|r| r.people).sum();
        assert_eq!(counted, people.len());
        assert_eq!(b.total_people, 5);
        assert_eq!(b.total_dollars, 105.0);
        assert_eq!(b.get(&Party::Republican).map(|r| r.dollars), Some(50.0));
    }

    #[test]
    fn test_breakdown_order_and_ties() {
        let people = vec![
            person("A", Party::Republican, 1.0),
            person("B", Party::NoParty, 1.0),
            person("C", Party::Democrat, 1.0),
            person("D", Party::NoParty, 1.0),
        ];

        let b = breakdown(&people);
        let codes: Vec<&str> = b.rows.iter().map(|r| r.label.code()).collect();

        assert_eq!(codes, vec!["N", "D", "R"]);
    }
}
