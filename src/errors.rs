use thiserror::Error;

/// Malformed input detected at object-creation time.  These are fatal and
/// raised immediately; nothing downstream ever sees a half-built guardian or
/// polynomial.
///
/// Protocol-level disagreement (a wrong proof, a mismatched id) is *not* an
/// error: it is reported through boolean verification results so that batch
/// verification can continue past individual failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("expected {expected} polynomial coefficients, found {found}")]
    CoefficientCount { expected: usize, found: usize },

    #[error("a polynomial must have at least one coefficient")]
    EmptyPolynomial,

    #[error("{commitments} coefficient commitments but {proofs} proofs")]
    CommitmentCount { commitments: usize, proofs: usize },

    #[error("secret key does not match the polynomial's constant coefficient")]
    KeyPairPolynomialMismatch,

    #[error("public key is not the generator raised to the secret key")]
    KeyPairInconsistent,

    #[error("guardian sequence orders are 1-based; 0 is not a valid interpolation coordinate")]
    SequenceOrderZero,
}

/// Collects verification failures with a human-readable path to the object
/// that failed, so a batch run over many guardians and ballots can report
/// every bad selection instead of stopping at the first.
pub struct ErrorContext<'a> {
    errs: &'a mut Vec<String>,
    prefix: String,
}

impl<'a> ErrorContext<'a> {
    pub fn new(errs: &'a mut Vec<String>) -> ErrorContext<'a> {
        ErrorContext {
            errs,
            prefix: String::new(),
        }
    }

    pub fn check(&mut self, cond: bool, msg: &str) {
        if !cond {
            self.errs.push(format!("{}{}", self.prefix, msg));
        }
    }

    pub fn scope<'b>(&'b mut self, desc: &str) -> ErrorContext<'b> {
        ErrorContext {
            errs: &mut *self.errs,
            prefix: format!("{}in {}: ", self.prefix, desc),
        }
    }
}

#[cfg(test)]
mod test {
    use super::ErrorContext;

    #[test]
    fn scoped_prefixes_nest() {
        let mut errs = Vec::new();
        let mut ctx = ErrorContext::new(&mut errs);
        ctx.check(true, "never recorded");
        {
            let mut contest = ctx.scope("contest alpha");
            let mut selection = contest.scope("selection beta");
            selection.check(false, "proof is invalid");
        }
        ctx.check(false, "top-level failure");

        assert_eq!(
            errs,
            vec![
                "in contest alpha: in selection beta: proof is invalid".to_owned(),
                "top-level failure".to_owned(),
            ]
        );
    }
}
