use thiserror::Error;

/// Malformed annotation usage. Aborts the whole scan.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("@{annotation} without `targets` must annotate a class, found {target}")]
    NonClassTarget { annotation: String, target: String },

    #[error("@{annotation} on {target}: parameter `{parameter}` expects {expected}, found {found}")]
    InvalidParameter {
        annotation: String,
        target: String,
        parameter: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

/// Failure to look up the nested classes of one class. Only stops that branch.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("class not found: {0}")]
    NotFound(String),

    #[error("failed to read class {class}")]
    Io {
        class: String,
        #[source]
        source: std::io::Error,
    },
}

impl ResolveError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResolveError::NotFound(_))
    }
}

/// `error` followed by each of its sources, joined with `: `.
pub fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_includes_io_cause() {
        let error = ResolveError::Io {
            class: "a.Outer".to_string(),
            source: std::io::Error::other("permission denied"),
        };
        assert_eq!(
            error_chain(&error),
            "failed to read class a.Outer: permission denied"
        );
        assert_eq!(
            error_chain(&ResolveError::NotFound("a.B".to_string())),
            "class not found: a.B"
        );
    }
}
