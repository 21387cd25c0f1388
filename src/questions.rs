use serde::Serialize;

/// Line prefixes that introduce the answer portion of a recognized page.
const ANSWER_MARKERS: &[&str] = &["answer:", "ans:", "a:"];

/// Line prefixes shed from a question line when no answer marker exists.
const QUESTION_MARKERS: &[&str] = &["question:", "q:", "q."];

/// One question/answer pair extracted from a single page image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub question: String,
    pub answer: String,
}

/// Splits raw OCR text into a question part and an answer part.
///
/// Lines are trimmed and blank lines discarded. The first line starting
/// (case-insensitively) with an answer marker divides the page: everything
/// before it is the question, the marker line's remainder plus all
/// following lines are the answer. Without a marker, the first line is the
/// question and the rest the answer; a lone line is a question with no
/// answer.
pub fn split_question_answer(text: &str) -> (String, String) {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let Some((&first, rest)) = lines.split_first() else {
        return (String::new(), String::new());
    };

    for (idx, line) in lines.iter().enumerate() {
        for marker in ANSWER_MARKERS {
            if let Some(remainder) = strip_marker(line, marker) {
                let mut answer_parts = Vec::new();
                let remainder = remainder.trim();
                if !remainder.is_empty() {
                    answer_parts.push(remainder);
                }
                answer_parts.extend_from_slice(&lines[idx + 1..]);

                return (lines[..idx].join(" "), answer_parts.join(" "));
            }
        }
    }

    if rest.is_empty() {
        return (first.to_string(), String::new());
    }

    let mut question_line = first;
    for marker in QUESTION_MARKERS {
        if let Some(remainder) = strip_marker(question_line, marker) {
            let remainder = remainder.trim();
            if !remainder.is_empty() {
                question_line = remainder;
            }
            break;
        }
    }

    (question_line.to_string(), rest.join(" "))
}

/// Returns the text after `marker` when `line` starts with it,
/// ASCII-case-insensitively. `None` when the prefix is absent or the line
/// opens with a multi-byte character.
fn strip_marker<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let head = line.get(..marker.len())?;
    head.eq_ignore_ascii_case(marker)
        .then(|| &line[marker.len()..])
}
