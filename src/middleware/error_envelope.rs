//! Error envelope rendering.
//!
//! `AppError::into_response` only sets the status and parks the error in the
//! response extensions. This layer is the one place that turns it into the
//! JSON envelope, using the `ErrorResponder` built from the process mode.
//!
//! Headers added by inner layers (request id, etc.) are kept; the body, status
//! and content headers are replaced.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::error::{ErrorResponder, PendingError};

pub fn apply<S>(router: Router<S>, responder: ErrorResponder) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(responder, render_errors))
}

async fn render_errors(
    State(responder): State<ErrorResponder>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let res = next.run(req).await;
    render_pending(&responder, res)
}

/// Replace a response carrying a `PendingError` with the rendered envelope.
pub fn render_pending(responder: &ErrorResponder, mut res: Response) -> Response {
    let Some(PendingError(err)) = res.extensions_mut().remove::<PendingError>() else {
        return res;
    };

    let (mut parts, _) = res.into_parts();
    let (rendered, body) = responder.respond(&err).into_parts();

    parts.status = rendered.status;
    parts.headers.remove(header::CONTENT_TYPE);
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.extend(rendered.headers);

    Response::from_parts(parts, body)
}
