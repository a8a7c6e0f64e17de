//! Path parameter validation.
//!
//! Only path-template parameters are inspected. Query strings and bodies
//! are never looked at, and parameters that were not part of the matched
//! route pattern simply do not exist here.

use crate::error::AdmissionError;

/// Path parameters resolved for a request, in declaration order.
///
/// Attach this as a request extension to have the parameter guard inspect
/// it instead of the parameters captured by axum's router.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(Vec<(String, String)>);

impl PathParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PathParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Fail on the first parameter, in declaration order, whose value is empty.
pub fn check_params<'a, I>(params: I, path: &str) -> Result<(), AdmissionError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    match params.into_iter().find(|(_, value)| value.is_empty()) {
        Some((name, _)) => Err(AdmissionError::MissingParam {
            name: name.to_string(),
            path: path.to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_params_pass() {
        assert_eq!(check_params(PathParams::new().iter(), "/api/issues"), Ok(()));
    }

    #[test]
    fn test_non_empty_params_pass() {
        let params = PathParams::new().with("id", "5").with("commentId", "7");
        assert_eq!(check_params(params.iter(), "/api/issues/5/comments/7"), Ok(()));
    }

    #[test]
    fn test_empty_param_fails() {
        let params = PathParams::new().with("id", "");
        assert_eq!(
            check_params(params.iter(), "/api/citizen/"),
            Err(AdmissionError::MissingParam {
                name: "id".into(),
                path: "/api/citizen/".into(),
            })
        );
    }

    #[test]
    fn test_first_empty_in_declaration_order_is_reported() {
        let params: PathParams = [("sector", "north"), ("issueId", ""), ("id", "")]
            .into_iter()
            .collect();

        let err = check_params(params.iter(), "/x").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing value for URL parameter \"issueId\" in /x"
        );
    }

    #[test]
    fn test_whitespace_is_not_empty() {
        let params = PathParams::new().with("id", " ");
        assert_eq!(check_params(params.iter(), "/x"), Ok(()));
    }
}
