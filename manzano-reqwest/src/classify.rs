//! Translation of engine failures into contract error kinds.

use manzano_http_client::{BoxError, CancelError, HttpClientError, HttpError};
use tracing::debug;

use crate::{Cancelled, EngineError};

/// Message carried by every [`CancelError`] produced here.
pub const CANCEL_MESSAGE: &str = "Request cancelled";

/// Classify a raw failure.
///
/// - [`Cancelled`] becomes [`HttpClientError::Cancel`].
/// - [`EngineError`] becomes [`HttpClientError::Http`] with its config,
///   response, code and request moved over.
/// - Values that already are contract errors are returned as they are.
/// - Anything else becomes [`HttpClientError::Other`] holding the original box.
pub fn classify(error: BoxError) -> HttpClientError {
    let error = match error.downcast::<Cancelled>() {
        Ok(cancelled) => {
            debug!(reason = %cancelled.reason(), "Classified failure as cancellation");
            return HttpClientError::Cancel(CancelError::new(CANCEL_MESSAGE));
        }
        Err(error) => error,
    };

    let error = match error.downcast::<EngineError>() {
        Ok(native) => {
            debug!(code = %native.code(), "Classified failure as HTTP error");
            return HttpClientError::from(native.into_http_error());
        }
        Err(error) => error,
    };

    let error = match error.downcast::<HttpClientError>() {
        Ok(classified) => return *classified,
        Err(error) => error,
    };

    let error = match error.downcast::<CancelError>() {
        Ok(cancel) => return HttpClientError::Cancel(*cancel),
        Err(error) => error,
    };

    match error.downcast::<HttpError>() {
        Ok(http) => HttpClientError::Http(http),
        Err(other) => HttpClientError::Other(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes;
    use bytes::Bytes;
    use http::{HeaderMap, StatusCode};
    use manzano_http_client::{RequestConfig, Response};

    #[test]
    fn test_cancelled_becomes_cancel_error() {
        let err = classify(Box::new(Cancelled::new("user aborted")));
        match err {
            HttpClientError::Cancel(cancel) => assert_eq!(cancel.message(), CANCEL_MESSAGE),
            other => panic!("expected cancel, got {:?}", other),
        }
    }

    #[test]
    fn test_engine_error_fields_are_preserved() {
        let config = RequestConfig::get("/missing").header("x-id", "7");
        let response = Response::new(
            StatusCode::NOT_FOUND,
            HeaderMap::new(),
            Bytes::from_static(b"nope"),
            config.clone(),
        );
        let err = classify(Box::new(EngineError::bad_status(response.clone())));

        let http = err.as_http().unwrap();
        assert_eq!(http.config, config);
        assert_eq!(http.response.as_ref(), Some(&response));
        assert_eq!(http.code.as_deref(), Some(codes::BAD_REQUEST));
        assert_eq!(http.request, None);
    }

    #[test]
    fn test_unknown_error_keeps_identity() {
        let original: BoxError = Box::new(std::io::Error::other("socket closed"));
        let address = &*original as *const _ as *const ();

        let err = classify(original);
        let HttpClientError::Other(inner) = err else {
            panic!("expected passthrough");
        };
        assert_eq!(&*inner as *const _ as *const (), address);
        assert_eq!(inner.to_string(), "socket closed");
    }

    #[test]
    fn test_classified_error_is_returned_as_is() {
        let first = classify(Box::new(Cancelled::new("x")));
        let again = classify(Box::new(first));
        assert!(again.is_cancel());

        let bare = classify(Box::new(CancelError::new("custom")));
        match bare {
            HttpClientError::Cancel(cancel) => assert_eq!(cancel.message(), "custom"),
            other => panic!("expected cancel, got {:?}", other),
        }

        let http = classify(Box::new(HttpError::new("gateway", RequestConfig::get("/"))));
        assert!(http.is_http());
        assert_eq!(http.to_string(), "gateway");
    }
}
