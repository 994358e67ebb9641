use thiserror::Error;

/// Errors reported to callers of the library.
///
/// The scan itself never fails; everything here is either a usage error
/// (inputs of different lengths) or an I/O problem in the CSV layer.
#[derive(Debug, Error)]
pub enum StopFinderError {
    #[error("{what} has {found} elements, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StopFinderError>;

/// Fails with [`StopFinderError::LengthMismatch`] unless `found == expected`.
pub(crate) fn check_len(what: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(StopFinderError::LengthMismatch {
            what,
            expected,
            found,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_mismatch_message() {
        let err = check_len("lon", 3, 2).unwrap_err();
        assert_eq!(err.to_string(), "lon has 2 elements, expected 3");
    }

    #[test]
    fn equal_lengths_pass() {
        assert!(check_len("time", 4, 4).is_ok());
    }
}
