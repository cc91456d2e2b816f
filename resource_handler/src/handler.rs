use std::str::FromStr;
use lambda_http::{Body, Error, Request, Response};
use tracing::{error, info, warn};
use crate::engine::{Outcome, ResourceEngine};
use crate::error::{ResourceError, ResourceResult, INSUFFICIENT_PARAMETERS};
use crate::resource::{Operation, RequestEnvelope, Resource};
use crate::store::RecordStore;

/// Lambda entry point: one resource operation per request.
pub async fn function_handler<S: RecordStore>(engine: &ResourceEngine<S>, event: Request) -> Result<Response<Body>, Error> {
    let envelope: serde_json::Result<RequestEnvelope> = match event.body() {
        Body::Text(s) if !s.trim().is_empty() => serde_json::from_str(s),
        Body::Binary(b) if !b.iter().all(u8::is_ascii_whitespace) => serde_json::from_slice(b),
        _ => return error_response(&ResourceError::bad_request(INSUFFICIENT_PARAMETERS))
    };

    let result = match envelope {
        Ok(envelope) => handle_envelope(engine, envelope).await,
        Err(e) => {
            warn!("error parsing body: {}", e);
            Err(ResourceError::bad_request(format!("Invalid request body: {}", e)))
        }
    };

    match result {
        Ok((status, resource)) => Ok(
            Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(serde_json::to_string(&resource)?.into())
                .map_err(Box::new)?
        ),
        Err(e) => error_response(&e)
    }
}

async fn handle_envelope<S: RecordStore>(engine: &ResourceEngine<S>, envelope: RequestEnvelope) -> ResourceResult<(u16, Resource)> {
    let (operation, resource) = match (envelope.operation, envelope.resource) {
        (Some(operation), Some(resource)) => (Operation::from_str(&operation)?, resource),
        _ => return Err(ResourceError::bad_request(INSUFFICIENT_PARAMETERS))
    };
    info!("Operation - {}", operation);
    let identifier = resource.resource_identifier.clone().unwrap_or_default();

    match engine.execute(operation, resource).await? {
        Outcome::Inserted(r) => Ok((201, r)),
        Outcome::Modified(r) | Outcome::Removed(r) => Ok((200, r)),
        Outcome::Retrieved(Some(r)) => Ok((200, r)),
        Outcome::Retrieved(None) => Err(ResourceError::not_found(&identifier))
    }
}

fn error_response(e: &ResourceError) -> Result<Response<Body>, Error> {
    let body = match e {
        ResourceError::Store(detail) => {
            error!("store failure: {}", detail);
            String::from("Internal Server Error")
        }
        _ => {
            info!("rejected request: {}", e);
            e.to_string()
        }
    };
    Ok(Response::builder()
        .status(e.status_code())
        .header("content-type", "text/plain")
        .body(body.into())
        .map_err(Box::new)?)
}
