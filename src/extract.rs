use lazy_static::lazy_static;
use regex::Regex;

use crate::models::DiagnoseResponse;

const MARKERS: [&str; 3] = ["**Diagnosis:**", "**Cause:**", "**Solution:**"];

#[derive(Debug, Clone, Copy)]
enum Target {
    Issue,
    Cause,
    NextSteps,
}

struct Rule {
    pattern: Regex,
    target: Target,
}

impl Rule {
    // case-insensitive, `.` spans lines, lazy capture up to another marker or end of text
    fn new(marker: &str, target: Target) -> Self {
        let terminators = MARKERS
            .iter()
            .map(|m| regex::escape(m))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(r"(?is){}(.*?)(?:{}|\z)", regex::escape(marker), terminators);

        Self {
            pattern: Regex::new(&pattern).expect("extraction pattern is valid"),
            target,
        }
    }
}

lazy_static! {
    static ref RULES: Vec<Rule> = vec![
        Rule::new(MARKERS[0], Target::Issue),
        Rule::new(MARKERS[1], Target::Cause),
        Rule::new(MARKERS[2], Target::NextSteps),
    ];
}

// reply text -> structured response, first occurrence of each marker wins
pub fn extract_sections(text: &str) -> DiagnoseResponse {
    let mut response = DiagnoseResponse::default();

    for rule in RULES.iter() {
        let Some(section) = rule.pattern.captures(text).and_then(|c| c.get(1)) else {
            continue;
        };
        let section = section.as_str().trim();

        match rule.target {
            Target::Issue => response.likely_issues.push(section.to_string()),
            Target::Cause => response.likely_issues.push(format!("Cause: {section}")),
            Target::NextSteps => response.next_steps = section.to_string(),
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DEFAULT_CONFIDENCE, DEFAULT_NEXT_STEPS, DEFAULT_PREVENTION};

    #[test]
    fn all_three_sections() {
        let out = extract_sections(
            "**Diagnosis:** Leaky valve\n**Cause:** worn gasket\n**Solution:** replace gasket",
        );

        assert_eq!(out.likely_issues, vec!["Leaky valve", "Cause: worn gasket"]);
        assert_eq!(out.next_steps, "replace gasket");
        assert_eq!(out.confidence, DEFAULT_CONFIDENCE);
        assert_eq!(out.prevention, DEFAULT_PREVENTION);
    }

    #[test]
    fn no_markers_gives_defaults() {
        let out = extract_sections("The valve looks fine to me.");

        assert_eq!(out, DiagnoseResponse::default());
        assert!(out.likely_issues.is_empty());
    }

    #[test]
    fn markers_are_case_insensitive() {
        let out = extract_sections("**DIAGNOSIS:** rust\n**solution:** sand it");

        assert_eq!(out.likely_issues, vec!["rust"]);
        assert_eq!(out.next_steps, "sand it");
    }

    #[test]
    fn section_spans_multiple_lines() {
        let out = extract_sections("**Solution:**\n1. drain\n2. replace\n\n**Cause:** age");

        assert_eq!(out.next_steps, "1. drain\n2. replace");
        assert_eq!(out.likely_issues, vec!["Cause: age"]);
    }

    #[test]
    fn out_of_order_markers_stop_at_next_known_marker() {
        let out = extract_sections("**Solution:** tighten **Diagnosis:** loose nut **Cause:** vibration");

        assert_eq!(out.likely_issues, vec!["loose nut", "Cause: vibration"]);
        assert_eq!(out.next_steps, "tighten");
    }

    #[test]
    fn empty_section_still_counts() {
        let out = extract_sections("**Diagnosis:**   **Cause:** heat");

        assert_eq!(out.likely_issues, vec!["", "Cause: heat"]);
        assert_eq!(out.next_steps, DEFAULT_NEXT_STEPS);
    }

    #[test]
    fn only_first_occurrence_is_used() {
        let out = extract_sections("**Diagnosis:** one\n**Diagnosis:** two");

        assert_eq!(out.likely_issues, vec!["one"]);
    }

    #[test]
    fn unknown_labels_do_not_terminate() {
        let out = extract_sections("**Diagnosis:** clog **Prevention:** flush monthly");

        assert_eq!(out.likely_issues, vec!["clog **Prevention:** flush monthly"]);
        assert_eq!(out.prevention, DEFAULT_PREVENTION);
    }
}
