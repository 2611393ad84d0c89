use http::{Method, StatusCode};
use lambda_http::{Request, RequestExt};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::json;
use tracing::{error, info, instrument, warn};

use crate::errors::Error;
use crate::model::HealthLog;
use crate::router::{HandlerResponse, MethodRouter};
use crate::store::HealthLogRepository;
use crate::utils::response;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CreateHealthLogRequest {
    #[serde(rename = "userId", deserialize_with = "null_as_empty")]
    user_id: String,
    #[serde(rename = "type", deserialize_with = "null_as_empty")]
    log_type: String,
    #[serde(deserialize_with = "null_as_empty")]
    value: String,
}

/// `null` is reported the same way as a missing field.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl CreateHealthLogRequest {
    fn validate(&self) -> Result<(), Error> {
        for (field, value) in [
            ("userId", &self.user_id),
            ("type", &self.log_type),
            ("value", &self.value),
        ] {
            if value.is_empty() {
                return Err(Error::Validation(format!("{} is required", field)));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct SuccessResponse<T: Serialize> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

fn success<T: Serialize>(
    status_code: StatusCode,
    data: Option<T>,
    message: Option<&'static str>,
) -> HandlerResponse {
    let body = serde_json::to_string(&SuccessResponse {
        success: true,
        data,
        message,
    })?;
    Ok(response(status_code, body))
}

fn failure(status_code: StatusCode, error: &str, message: impl Into<String>) -> HandlerResponse {
    let body = json!({
        "error": error,
        "message": message.into(),
    })
    .to_string();
    Ok(response(status_code, body))
}

fn query_param(event: &Request, name: &str) -> Option<String> {
    event
        .query_string_parameters()
        .first(name)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// Builds the dispatcher used by the lambda: one handler per supported verb, 405 otherwise.
pub fn router(store: &dyn HealthLogRepository) -> MethodRouter<'_> {
    let mut router = MethodRouter::new(method_not_allowed);
    router
        .insert(Method::OPTIONS, preflight)
        .insert(Method::POST, move |r| create_health_log(store, r))
        .insert(Method::GET, move |r| get_health_logs(store, r))
        .insert(Method::DELETE, move |r| delete_health_log(store, r));
    router
}

pub async fn preflight(_: Request) -> HandlerResponse {
    Ok(response(StatusCode::OK, String::new()))
}

pub fn method_not_allowed(event: Request) -> HandlerResponse {
    let err = Error::MethodNotAllowed(event.method().to_string());
    warn!("{}", err);
    failure(err.status_code(), "Method not allowed", err.to_string())
}

#[instrument(skip_all)]
pub async fn create_health_log(store: &dyn HealthLogRepository, event: Request) -> HandlerResponse {
    let req = match serde_json::from_slice::<Option<CreateHealthLogRequest>>(event.body()) {
        Ok(payload) => payload.unwrap_or_default(),
        Err(err) => {
            warn!("{}", err.to_string());
            return failure(StatusCode::BAD_REQUEST, "Invalid request body", err.to_string());
        }
    };

    if let Err(err) = req.validate() {
        return failure(err.status_code(), "Missing required field", err.to_string());
    }

    let log = HealthLog::new(req.user_id, req.log_type, req.value);

    if let Err(err) = store.create(&log).await {
        error!("{}", err);
        return failure(
            err.status_code(),
            "Failed to create health log",
            err.to_string(),
        );
    }

    info!(user_id = %log.user_id, timestamp = %log.timestamp, "health log created");
    success(
        StatusCode::CREATED,
        Some(log),
        Some("Health log created successfully"),
    )
}

#[instrument(skip_all)]
pub async fn get_health_logs(store: &dyn HealthLogRepository, event: Request) -> HandlerResponse {
    let user_id = match query_param(&event, "userId") {
        Some(user_id) => user_id,
        None => {
            return failure(
                StatusCode::BAD_REQUEST,
                "Missing required parameter",
                "userId is required",
            )
        }
    };

    if let Some(timestamp) = query_param(&event, "timestamp") {
        return match store.get(&user_id, &timestamp).await {
            Ok(log) => success(StatusCode::OK, Some(log), None),
            Err(err @ Error::NotFound { .. }) => {
                info!("{}", err);
                failure(err.status_code(), "Health log not found", err.to_string())
            }
            Err(err) => {
                error!("{}", err);
                failure(err.status_code(), "Failed to get health log", err.to_string())
            }
        };
    }

    let logs = match query_param(&event, "type") {
        Some(log_type) => store.list_by_user_and_type(&user_id, &log_type).await,
        None => store.list_by_user(&user_id).await,
    };

    match logs {
        Ok(logs) => success(StatusCode::OK, Some(logs), None),
        Err(err) => {
            error!("{}", err);
            failure(err.status_code(), "Failed to get health logs", err.to_string())
        }
    }
}

#[instrument(skip_all)]
pub async fn delete_health_log(store: &dyn HealthLogRepository, event: Request) -> HandlerResponse {
    let (user_id, timestamp) = match (
        query_param(&event, "userId"),
        query_param(&event, "timestamp"),
    ) {
        (Some(user_id), Some(timestamp)) => (user_id, timestamp),
        _ => {
            return failure(
                StatusCode::BAD_REQUEST,
                "Missing required parameters",
                "userId and timestamp are required",
            )
        }
    };

    if let Err(err) = store.delete(&user_id, &timestamp).await {
        error!("{}", err);
        return failure(
            err.status_code(),
            "Failed to delete health log",
            err.to_string(),
        );
    }

    success::<()>(
        StatusCode::OK,
        None,
        Some("Health log deleted successfully"),
    )
}
