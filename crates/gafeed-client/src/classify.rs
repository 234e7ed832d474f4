//! Maps completed HTTP exchanges onto [`TransportError`].

use crate::error::TransportError;

/// Passes 200 bodies through and turns every other status into a typed
/// [`TransportError`]. Runs before any XML is parsed.
///
/// | status | result |
/// |--------|--------|
/// | 200 | `Ok(body)` |
/// | 400 | [`TransportError::AnalyticsError`] |
/// | 401 | [`TransportError::InvalidToken`] |
/// | other | [`TransportError::UnknownAnalyticsError`] |
///
/// # Errors
///
/// Returns the [`TransportError`] for any status other than 200.
pub fn classify(status: u16, body: String) -> Result<String, TransportError> {
    match status {
        200 => Ok(body),
        400 => Err(TransportError::AnalyticsError { status, body }),
        401 => Err(TransportError::InvalidToken { status, body }),
        _ => Err(TransportError::UnknownAnalyticsError { status, body }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_passes_body_through() {
        assert_eq!(classify(200, "<feed/>".to_owned()), Ok("<feed/>".to_owned()));
    }

    #[test]
    fn bad_request_embeds_body_and_code() {
        let err = classify(400, "Invalid dimension ga:nope".to_owned()).unwrap_err();
        assert!(matches!(err, TransportError::AnalyticsError { status: 400, .. }));
        assert_eq!(
            err.to_string(),
            "Invalid dimension ga:nope (status code: 400)"
        );
    }

    #[test]
    fn unauthorized_is_invalid_token_whatever_the_body() {
        for body in ["", "Token expired", "<errors/>"] {
            let err = classify(401, body.to_owned()).unwrap_err();
            assert!(matches!(err, TransportError::InvalidToken { status: 401, .. }));
            assert_eq!(err.body(), body);
            assert!(err.to_string().contains("status code: 401"));
        }
    }

    #[test]
    fn other_statuses_are_unknown() {
        for status in [201, 403, 404, 500, 503] {
            let err = classify(status, "oops".to_owned()).unwrap_err();
            assert!(
                matches!(err, TransportError::UnknownAnalyticsError { .. }),
                "status {status} gave {err:?}"
            );
            assert_eq!(err.status(), status);
            assert_eq!(err.to_string(), format!("oops (status code: {status})"));
        }
    }
}
