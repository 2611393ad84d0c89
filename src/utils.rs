use aws_config::{
    meta::region::RegionProviderChain, timeout::TimeoutConfig, BehaviorVersion, SdkConfig,
};
use http::{header, HeaderValue};
use lambda_http::{http::StatusCode, Response};

use crate::config::Config;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_HEADERS: &str = "Content-Type,Authorization";
pub const ALLOW_METHODS: &str = "GET,POST,PUT,DELETE,OPTIONS";

pub fn setup_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .json()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("failed to set tracing subscriber");
}

pub async fn setup_sdk_config(config: &Config) -> SdkConfig {
    let region_provider = RegionProviderChain::default_provider().or_else("eu-west-1");
    let timeout_config = TimeoutConfig::builder()
        .operation_timeout(config.call_timeout)
        .operation_attempt_timeout(config.call_timeout)
        .read_timeout(config.call_timeout)
        .connect_timeout(config.call_timeout)
        .build();

    aws_config::defaults(BehaviorVersion::latest())
        .region(region_provider)
        .timeout_config(timeout_config)
        .load()
        .await
}

/// JSON response with the CORS headers every endpoint returns.
pub fn response(status_code: StatusCode, body: String) -> Response<String> {
    let mut resp = Response::new(body);
    *resp.status_mut() = status_code;

    let headers = resp.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    resp
}
