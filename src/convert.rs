use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{Context, Result};
use crossbeam_channel::bounded;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::ocr;
use crate::questions::{split_question_answer, Question};

/// The converter's whole output: one record per image, in input order.
#[derive(Debug, Serialize)]
pub struct Payload {
    pub questions: Vec<Question>,
}

/// OCRs every image and splits the text into question records.
///
/// Recognition fans out over `jobs` worker threads, but the payload order
/// always equals the input order, and a failure is always reported for
/// the first failing image in input order. The whole run aborts on the
/// first failure; there is no partial payload.
pub fn build_questions(paths: &[PathBuf], lang: &str, jobs: usize) -> Result<Payload> {
    eprintln!(
        "Running OCR over {} image(s) with {} worker(s)",
        paths.len(),
        jobs.max(1)
    );
    questions_from(paths, jobs, |path| ocr::recognize(path, lang))
}

fn questions_from<F>(paths: &[PathBuf], jobs: usize, recognize: F) -> Result<Payload>
where
    F: Fn(&Path) -> Result<String> + Sync,
{
    let texts: Vec<String> = if jobs <= 1 || paths.len() <= 1 {
        // Sequential runs stop at the first failing page; later pages
        // are never handed to the engine.
        paths
            .iter()
            .map(|path| recognize(path))
            .collect::<Result<_>>()?
    } else {
        // Workers run every page, but the error surfaced is still the
        // first in input order.
        map_ordered(paths, jobs, |path| recognize(path))
            .into_iter()
            .collect::<Result<_>>()?
    };

    let mut questions = Vec::with_capacity(paths.len());
    for text in texts {
        let (question, answer) = split_question_answer(&text);
        questions.push(Question { question, answer });
    }
    Ok(Payload { questions })
}

/// Fans `work` out over `workers` threads and reassembles the results in
/// item order, whatever order the workers finish in.
fn map_ordered<T, R, F>(items: &[T], workers: usize, work: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync,
{
    let workers = workers.min(items.len()).max(1);

    let (index_tx, index_rx) = bounded::<usize>(workers * 2);
    let (result_tx, result_rx) = bounded::<(usize, R)>(workers * 2);

    let mut slots: Vec<Option<R>> = Vec::new();
    slots.resize_with(items.len(), || None);

    thread::scope(|scope| {
        for _ in 0..workers {
            let index_rx = index_rx.clone();
            let result_tx = result_tx.clone();
            let work = &work;
            scope.spawn(move || {
                for idx in index_rx {
                    if result_tx.send((idx, work(&items[idx]))).is_err() {
                        break;
                    }
                }
            });
        }
        // Drop our copies so the channels close once the feeder and
        // workers are done.
        drop(index_rx);
        drop(result_tx);

        scope.spawn(move || {
            for idx in 0..items.len() {
                if index_tx.send(idx).is_err() {
                    break;
                }
            }
        });

        for (idx, result) in result_rx {
            slots[idx] = Some(result);
        }
    });

    slots
        .into_iter()
        .map(|slot| slot.expect("every index was dispatched exactly once"))
        .collect()
}

/// Renders the payload: compact when `indent` is zero, pretty-printed
/// with `indent` spaces per level otherwise. Non-ASCII text passes
/// through unescaped.
pub fn render_json(payload: &Payload, indent: usize) -> Result<String> {
    if indent == 0 {
        return serde_json::to_string(payload).context("failed to serialize the payload");
    }

    let step = vec![b' '; indent];
    let mut out = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(&step));
    payload
        .serialize(&mut ser)
        .context("failed to serialize the payload")?;
    Ok(String::from_utf8(out)?)
}

/// Writes the rendered payload where the caller asked: a file, or stdout
/// with a trailing newline.
pub fn write_output(json: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn map_ordered_preserves_item_order() {
        let items: Vec<usize> = (0..32).collect();
        let doubled = map_ordered(&items, 4, |n| n * 2);
        assert_eq!(doubled, (0..32).map(|n| n * 2).collect::<Vec<_>>());
    }

    #[test]
    fn map_ordered_reassembles_out_of_order_completions() {
        // Earlier items sleep longer, so later items finish first.
        let items: Vec<u64> = (0..8).collect();
        let copied = map_ordered(&items, 8, |n| {
            thread::sleep(Duration::from_millis(10 * (8 - n)));
            *n
        });
        assert_eq!(copied, items);
    }

    #[test]
    fn map_ordered_tolerates_more_workers_than_items() {
        let items = vec![1, 2];
        assert_eq!(map_ordered(&items, 16, |n| n + 1), vec![2, 3]);
    }

    #[test]
    fn questions_are_built_in_input_order() {
        let paths: Vec<PathBuf> = ["c.png", "a.png", "b.png"]
            .iter()
            .map(PathBuf::from)
            .collect();
        let payload = questions_from(&paths, 4, |path| {
            Ok(format!("From {}?\nAnswer: yes", path.display()))
        })
        .unwrap();

        let questions: Vec<&str> = payload
            .questions
            .iter()
            .map(|q| q.question.as_str())
            .collect();
        assert_eq!(questions, vec!["From c.png?", "From a.png?", "From b.png?"]);
    }

    #[test]
    fn worker_count_does_not_change_the_payload() {
        let paths: Vec<PathBuf> = (0..9).map(|n| PathBuf::from(format!("{n}.png"))).collect();
        let recognize = |path: &Path| Ok(format!("Page {}?", path.display()));

        let sequential = questions_from(&paths, 1, recognize).unwrap();
        let parallel = questions_from(&paths, 4, recognize).unwrap();
        assert_eq!(sequential.questions, parallel.questions);
    }

    #[test]
    fn sequential_run_stops_at_the_first_failure() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let paths: Vec<PathBuf> = ["a.png", "b.png", "c.png"]
            .iter()
            .map(PathBuf::from)
            .collect();
        let calls = AtomicUsize::new(0);

        let err = questions_from(&paths, 1, |path| {
            calls.fetch_add(1, Ordering::SeqCst);
            if path == Path::new("b.png") {
                anyhow::bail!("cannot read {}", path.display());
            }
            Ok(String::new())
        })
        .unwrap_err();

        assert!(err.to_string().contains("b.png"));
        // c.png is never recognized once b.png fails.
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn first_failing_image_wins_in_input_order() {
        let paths: Vec<PathBuf> = ["a.png", "b.png", "c.png"]
            .iter()
            .map(PathBuf::from)
            .collect();
        let err = questions_from(&paths, 4, |path| {
            if path == Path::new("a.png") {
                Ok("fine".to_string())
            } else {
                Err(anyhow::anyhow!("cannot read {}", path.display()))
            }
        })
        .unwrap_err();

        // b.png fails before c.png regardless of completion order.
        assert!(err.to_string().contains("b.png"));
    }

    #[test]
    fn render_json_pretty_uses_the_requested_indent() {
        let payload = Payload {
            questions: vec![Question {
                question: "Q?".to_string(),
                answer: "A".to_string(),
            }],
        };

        let rendered = render_json(&payload, 2).unwrap();
        let expected = "{\n  \"questions\": [\n    {\n      \"question\": \"Q?\",\n      \"answer\": \"A\"\n    }\n  ]\n}";
        assert_eq!(rendered, expected);

        let wide = render_json(&payload, 4).unwrap();
        assert!(wide.contains("\n    \"questions\""));
    }

    #[test]
    fn render_json_zero_indent_is_compact() {
        let payload = Payload {
            questions: vec![Question {
                question: "Q?".to_string(),
                answer: "A".to_string(),
            }],
        };
        assert_eq!(
            render_json(&payload, 0).unwrap(),
            r#"{"questions":[{"question":"Q?","answer":"A"}]}"#
        );
    }

    #[test]
    fn render_json_keeps_non_ascii_text_unescaped() {
        let payload = Payload {
            questions: vec![Question {
                question: "首都は？".to_string(),
                answer: "東京".to_string(),
            }],
        };
        let rendered = render_json(&payload, 2).unwrap();
        assert!(rendered.contains("首都は？"));
        assert!(rendered.contains("東京"));
        assert!(!rendered.contains("\\u"));
    }

    #[test]
    fn empty_payload_still_renders() {
        let payload = Payload {
            questions: Vec::new(),
        };
        assert_eq!(render_json(&payload, 2).unwrap(), "{\n  \"questions\": []\n}");
        assert_eq!(render_json(&payload, 0).unwrap(), r#"{"questions":[]}"#);
    }

    #[test]
    fn write_output_to_file_matches_the_rendered_text() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("questions.json");

        write_output("{\"questions\":[]}", Some(&target)).unwrap();
        assert_eq!(
            std::fs::read_to_string(&target).unwrap(),
            "{\"questions\":[]}"
        );
    }
}
