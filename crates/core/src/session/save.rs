//! Writing the results file when another program holds it open.

use std::io::ErrorKind;
use std::path::Path;

use quizzer_traits::RetryPrompt;
use quizzer_xml::XmlError;

use crate::error::QuizError;

/// Failures that usually clear once the user closes the file elsewhere.
pub fn is_transient(err: &XmlError) -> bool {
    match err {
        XmlError::Io(e) => matches!(e.kind(), ErrorKind::PermissionDenied | ErrorKind::WouldBlock),
        _ => false,
    }
}

/// Runs `write` until it succeeds, fails for a non-transient reason, runs
/// out of attempts, or the user declines to retry.
pub fn write_with_retry<F>(
    path: &Path,
    max_attempts: usize,
    prompt: &dyn RetryPrompt,
    mut write: F,
) -> Result<(), QuizError>
where
    F: FnMut() -> Result<(), XmlError>,
{
    let display = path.display().to_string();
    let mut attempt = 1;
    loop {
        match write() {
            Ok(()) => return Ok(()),
            Err(e) if is_transient(&e) => {
                log::warn!("Attempt {} to write '{}' failed: {}", attempt, display, e);
                if attempt >= max_attempts || !prompt.retry(&display, attempt) {
                    return Err(QuizError::ResultsLocked {
                        path: display,
                        attempts: attempt,
                    });
                }
                attempt += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizzer_traits::FixedRetryPrompt;
    use std::cell::Cell;
    use std::io;

    fn locked() -> XmlError {
        XmlError::Io(io::Error::new(ErrorKind::PermissionDenied, "locked"))
    }

    #[test]
    fn test_succeeds_after_transient_failures() {
        let calls = Cell::new(0);
        let prompt = FixedRetryPrompt::new(10);
        let result = write_with_retry(Path::new("results.xml"), 5, &prompt, || {
            calls.set(calls.get() + 1);
            if calls.get() < 3 { Err(locked()) } else { Ok(()) }
        });
        assert!(result.is_ok());
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_stops_after_max_attempts() {
        let calls = Cell::new(0);
        let prompt = FixedRetryPrompt::new(10);
        let result = write_with_retry(Path::new("results.xml"), 3, &prompt, || {
            calls.set(calls.get() + 1);
            Err(locked())
        });
        assert!(matches!(result, Err(QuizError::ResultsLocked { attempts: 3, .. })));
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_declined_prompt_stops_immediately() {
        let calls = Cell::new(0);
        let prompt = FixedRetryPrompt::new(0);
        let result = write_with_retry(Path::new("results.xml"), 5, &prompt, || {
            calls.set(calls.get() + 1);
            Err(locked())
        });
        assert!(matches!(result, Err(QuizError::ResultsLocked { attempts: 1, .. })));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_other_errors_are_not_retried() {
        let calls = Cell::new(0);
        let prompt = FixedRetryPrompt::new(10);
        let result = write_with_retry(Path::new("results.xml"), 5, &prompt, || {
            calls.set(calls.get() + 1);
            Err(XmlError::Io(io::Error::new(ErrorKind::NotFound, "no dir")))
        });
        assert!(matches!(result, Err(QuizError::Document(_))));
        assert_eq!(calls.get(), 1);
    }
}
