//! Deterministic chart data for the GitHub profile feature.
//!
//! Charts must be exact and reproducible, so they are computed here from the
//! fetched repository metadata and never trusted to the model — whatever the
//! model echoes back for the chart fields is overwritten with these values.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::github::Repo;

/// One pie-chart slice, mirrored into the response as `{name, value}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDatum {
    pub name: String,
    pub value: u64,
}

/// A chart as both structured slices and rendered pie-chart DSL text.
#[derive(Debug, Clone)]
pub struct ChartData {
    pub entries: Vec<ChartDatum>,
    pub chart: String,
}

/// Language frequency across repositories, capped at the top 5 by count.
/// Quote characters are stripped from language names so they cannot break the
/// chart DSL. No detected languages yields a single placeholder slice.
pub fn language_distribution(repos: &[Repo]) -> ChartData {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for repo in repos {
        if let Some(language) = repo.language.as_deref() {
            *counts.entry(language).or_default() += 1;
        }
    }

    let mut ranked: Vec<(&str, u64)> = counts.into_iter().collect();
    // Count descending, name ascending for a stable ordering on ties.
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let entries: Vec<ChartDatum> = ranked
        .into_iter()
        .take(5)
        .map(|(language, count)| ChartDatum {
            name: language.replace(['"', '\''], ""),
            value: count,
        })
        .collect();

    if entries.is_empty() {
        return placeholder("No languages detected");
    }
    render(entries)
}

/// Repositories created per year, over the most recent 5 years with any
/// activity, in ascending year order.
pub fn creation_activity(repos: &[Repo]) -> ChartData {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for repo in repos {
        // get() keeps this total: too-short or non-ASCII prefixes are skipped
        // instead of panicking on a char boundary.
        if let Some(year) = repo.created_at.get(..4) {
            *counts.entry(year).or_default() += 1;
        }
    }

    let mut years: Vec<(&str, u64)> = counts.into_iter().collect();
    years.sort_by(|a, b| a.0.cmp(b.0));

    let recent = years.len().saturating_sub(5);
    let entries: Vec<ChartDatum> = years
        .into_iter()
        .skip(recent)
        .map(|(year, count)| ChartDatum {
            name: year.to_string(),
            value: count,
        })
        .collect();

    if entries.is_empty() {
        return placeholder("No activity data");
    }
    render(entries)
}

fn placeholder(label: &str) -> ChartData {
    render(vec![ChartDatum {
        name: label.to_string(),
        value: 1,
    }])
}

/// Renders slices as pie-chart DSL text:
/// `pie` header, then one `    "name" : value` line per slice.
fn render(entries: Vec<ChartDatum>) -> ChartData {
    let mut chart = String::from("pie");
    for entry in &entries {
        chart.push_str(&format!("\n    \"{}\" : {}", entry.name, entry.value));
    }
    ChartData { entries, chart }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str, language: Option<&str>, created_at: &str) -> Repo {
        Repo {
            name: name.to_string(),
            description: None,
            language: language.map(str::to_string),
            created_at: created_at.to_string(),
            updated_at: String::new(),
            stargazers_count: 0,
            forks_count: 0,
        }
    }

    #[test]
    fn test_language_distribution_counts_and_orders() {
        let repos = vec![
            repo("a", Some("Rust"), "2024-01-01T00:00:00Z"),
            repo("b", Some("Rust"), "2024-02-01T00:00:00Z"),
            repo("c", Some("Python"), "2023-01-01T00:00:00Z"),
            repo("d", None, "2023-01-01T00:00:00Z"),
        ];
        let data = language_distribution(&repos);
        assert_eq!(
            data.entries,
            vec![
                ChartDatum {
                    name: "Rust".to_string(),
                    value: 2
                },
                ChartDatum {
                    name: "Python".to_string(),
                    value: 1
                },
            ]
        );
        assert_eq!(data.chart, "pie\n    \"Rust\" : 2\n    \"Python\" : 1");
    }

    #[test]
    fn test_language_distribution_caps_at_top_five() {
        let mut repos = Vec::new();
        for (i, lang) in ["A", "B", "C", "D", "E", "F", "G"].into_iter().enumerate() {
            for _ in 0..=i {
                repos.push(repo("r", Some(lang), "2024-01-01T00:00:00Z"));
            }
        }
        let data = language_distribution(&repos);
        assert_eq!(data.entries.len(), 5);
        // Highest counts survive the cap.
        assert_eq!(data.entries[0].name, "G");
        assert_eq!(data.entries[4].name, "C");
    }

    #[test]
    fn test_language_names_are_quote_stripped() {
        let repos = vec![repo("a", Some(r#"C"sharp'ish"#), "2024-01-01T00:00:00Z")];
        let data = language_distribution(&repos);
        assert_eq!(data.entries[0].name, "Csharpish");
    }

    #[test]
    fn test_language_distribution_empty_fallback() {
        let data = language_distribution(&[repo("a", None, "2024-01-01T00:00:00Z")]);
        assert_eq!(data.entries.len(), 1);
        assert_eq!(data.entries[0].name, "No languages detected");
        assert_eq!(data.chart, "pie\n    \"No languages detected\" : 1");
    }

    #[test]
    fn test_creation_activity_keeps_most_recent_five_years_ascending() {
        let repos: Vec<Repo> = (2018..=2024)
            .map(|year| repo("r", None, &format!("{year}-06-01T00:00:00Z")))
            .collect();
        let data = creation_activity(&repos);
        let years: Vec<&str> = data.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(years, vec!["2020", "2021", "2022", "2023", "2024"]);
    }

    #[test]
    fn test_creation_activity_counts_per_year() {
        let repos = vec![
            repo("a", None, "2023-01-01T00:00:00Z"),
            repo("b", None, "2023-09-01T00:00:00Z"),
            repo("c", None, "2024-01-01T00:00:00Z"),
        ];
        let data = creation_activity(&repos);
        assert_eq!(
            data.entries,
            vec![
                ChartDatum {
                    name: "2023".to_string(),
                    value: 2
                },
                ChartDatum {
                    name: "2024".to_string(),
                    value: 1
                },
            ]
        );
    }

    #[test]
    fn test_creation_activity_skips_malformed_dates_without_panicking() {
        let repos = vec![
            repo("a", None, "202\u{2713}-01-01T00:00:00Z"),
            repo("b", None, "20"),
            repo("c", None, "2024-01-01T00:00:00Z"),
        ];
        let data = creation_activity(&repos);
        assert_eq!(
            data.entries,
            vec![ChartDatum {
                name: "2024".to_string(),
                value: 1
            }]
        );
    }

    #[test]
    fn test_creation_activity_empty_fallback() {
        let data = creation_activity(&[]);
        assert_eq!(data.entries[0].name, "No activity data");
        assert_eq!(data.chart, "pie\n    \"No activity data\" : 1");
    }

    #[test]
    fn test_charts_are_deterministic() {
        let repos = vec![
            repo("a", Some("Go"), "2022-01-01T00:00:00Z"),
            repo("b", Some("Rust"), "2023-01-01T00:00:00Z"),
            repo("c", Some("Go"), "2021-01-01T00:00:00Z"),
        ];
        let first = language_distribution(&repos);
        let second = language_distribution(&repos);
        assert_eq!(first.entries, second.entries);
        assert_eq!(first.chart, second.chart);
    }
}
