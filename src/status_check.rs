use log::info;
use url::Url;

use crate::config::ExpectedStatusMap;

/// A PEP whose page disagrees with the status letter in the PEP index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMismatch {
    pub pep_url: Url,
    pub status: String,
    pub expected: Vec<String>,
}

/// Where mismatches go. Reporting never affects the scraped table.
pub trait MismatchReporter {
    fn report(&mut self, mismatch: StatusMismatch);
}

/// Logs every mismatch at info level.
#[derive(Debug, Default)]
pub struct LogReporter;

impl MismatchReporter for LogReporter {
    fn report(&mut self, mismatch: StatusMismatch) {
        info!(
            "Mismatched statuses:\n{}\nStatus on PEP page: {}\nExpected statuses: {:?}",
            mismatch.pep_url, mismatch.status, mismatch.expected
        );
    }
}

impl MismatchReporter for Vec<StatusMismatch> {
    fn report(&mut self, mismatch: StatusMismatch) {
        self.push(mismatch);
    }
}

/// Compares the status found on a PEP page with what its index code allows.
/// Codes the map doesn't know are not checked.
pub fn check_status(
    expected: &ExpectedStatusMap,
    code: &str,
    pep_url: &Url,
    status: &str,
    reporter: &mut dyn MismatchReporter,
) {
    let Some(allowed) = expected.allowed(code) else {
        return;
    };
    if !allowed.iter().any(|candidate| candidate == status) {
        reporter.report(StatusMismatch {
            pep_url: pep_url.clone(),
            status: status.to_string(),
            expected: allowed.to_vec(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pep_url() -> Url {
        Url::parse("https://peps.python.org/pep-0008/").unwrap()
    }

    #[test]
    fn test_matching_status_is_not_reported() {
        let mut mismatches: Vec<StatusMismatch> = Vec::new();
        check_status(
            &ExpectedStatusMap::python_defaults(),
            "A",
            &pep_url(),
            "Accepted",
            &mut mismatches,
        );
        assert!(mismatches.is_empty());
    }

    #[test]
    fn test_mismatch_is_reported() {
        let mut mismatches: Vec<StatusMismatch> = Vec::new();
        check_status(
            &ExpectedStatusMap::python_defaults(),
            "F",
            &pep_url(),
            "Draft",
            &mut mismatches,
        );
        assert_eq!(
            mismatches,
            vec![StatusMismatch {
                pep_url: pep_url(),
                status: "Draft".to_string(),
                expected: vec!["Final".to_string()],
            }]
        );
    }

    #[test]
    fn test_unknown_code_is_not_checked() {
        let mut mismatches: Vec<StatusMismatch> = Vec::new();
        check_status(
            &ExpectedStatusMap::python_defaults(),
            "Z",
            &pep_url(),
            "Final",
            &mut mismatches,
        );
        assert!(mismatches.is_empty());
    }
}
