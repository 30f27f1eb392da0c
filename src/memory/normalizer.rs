//! Speaker attribution for first-person commitments
//!
//! "I'll send the report" means nothing once it sits in a vector store next
//! to other meetings. Before a note is stored, every "I'll" / "I will" is
//! rewritten to "<speaker> will", where the speaker is the label of the most
//! recent `Name:` or `Name →` line.

use regex::{NoExpand, Regex};
use std::sync::OnceLock;

fn first_person_future() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bI(?:['’]ll| will)\b").expect("static regex is valid"))
}

/// Rewrite first-person future statements to third person, line by line.
///
/// Lines without a speaker in effect pass through unchanged; line order and
/// count are preserved.
pub fn normalize(text: &str) -> String {
    let mut last_speaker: Option<String> = None;

    text.split('\n')
        .map(|line| {
            if let Some(label) = speaker_label(line) {
                last_speaker = (!label.is_empty()).then(|| label.to_string());
            }

            match &last_speaker {
                Some(speaker) if first_person_future().is_match(line) => {
                    let replacement = format!("{} will", speaker);
                    first_person_future()
                        .replace_all(line, NoExpand(&replacement))
                        .into_owned()
                }
                _ => line.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Text before the first colon, or else before the first arrow
fn speaker_label(line: &str) -> Option<&str> {
    let head = if let Some((head, _)) = line.split_once(':') {
        head
    } else if let Some((head, _)) = line.split_once('→') {
        head
    } else if let Some((head, _)) = line.split_once("->") {
        head
    } else {
        return None;
    };
    Some(head.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speaker_carries_to_following_lines() {
        let normalized = normalize("Riya: I'll send the report.\nI'll also call the vendor.");
        let lines: Vec<&str> = normalized.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Riya will send the report."));
        assert!(!lines[0].contains("I'll"));
        assert_eq!(lines[1], "Riya will also call the vendor.");
    }

    #[test]
    fn test_variants_are_case_insensitive() {
        let normalized = normalize("Arjun: i will draft it. I’ll review it. I WILL ship it.");
        assert_eq!(
            normalized,
            "Arjun: Arjun will draft it. Arjun will review it. Arjun will ship it."
        );
    }

    #[test]
    fn test_arrow_sets_speaker() {
        assert_eq!(
            normalize("Meera → I'll book the venue"),
            "Meera → Meera will book the venue"
        );
        assert_eq!(normalize("Sam -> I will invite Ana"), "Sam -> Sam will invite Ana");
    }

    #[test]
    fn test_no_speaker_leaves_text_alone() {
        let text = "I'll send the report.\nNothing else.";
        assert_eq!(normalize(text), text);
    }

    #[test]
    fn test_empty_label_clears_speaker() {
        let text = "Riya: notes\n: I'll do it";
        assert_eq!(normalize(text), text);
    }

    #[test]
    fn test_latest_speaker_wins() {
        let normalized = normalize("Riya: hello\nArjun: I'll handle QA");
        assert_eq!(normalized, "Riya: hello\nArjun: Arjun will handle QA");
    }

    #[test]
    fn test_words_containing_will_are_untouched() {
        let text = "Riya: I willingly accept. Hi willow.";
        assert_eq!(normalize(text), text);
    }

    #[test]
    fn test_replacement_is_literal() {
        assert_eq!(normalize("$1: I'll pay"), "$1: $1 will pay");
    }

    #[test]
    fn test_line_structure_preserved() {
        let text = "Meeting Summary: Launch\n\nTasks:\nRiya → Finalize campaign (Deadline: Friday)\n";
        let normalized = normalize(text);
        assert_eq!(normalized.split('\n').count(), text.split('\n').count());
        assert_eq!(normalized, text);
    }
}
