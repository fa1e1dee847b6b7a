use crate::config::EndpointMap;
use crate::error::{ApiError, ApiResult};
use crate::http::{HttpClient, HttpReply};
use crate::models::{Credentials, ErrorBody, LoginBody, LoginSuccess};

/// `POST {apiBase}/api/auth/login` with `{email, password}`.
///
/// Succeeds only on a 2xx reply carrying both `user` and `token`. A non-2xx
/// reply becomes [`ApiError::Status`] with the body's `message`.
pub async fn login<C: HttpClient>(
    client: &C,
    endpoints: &EndpointMap,
    credentials: &Credentials,
) -> ApiResult<LoginSuccess> {
    let body = serde_json::to_string(credentials).map_err(ApiError::decode)?;
    tracing::debug!(url = %endpoints.login, "login request");

    let reply = client.post_json(&endpoints.login, body).await?;
    let result = parse_login_reply(&reply);
    if let Err(e) = &result {
        tracing::info!(status = reply.status, "login failed: {e}");
    }
    result
}

fn parse_login_reply(reply: &HttpReply) -> ApiResult<LoginSuccess> {
    if !reply.is_success() {
        return Err(ApiError::Status {
            status: reply.status,
            message: ErrorBody::message_from(&reply.body),
        });
    }

    let body: LoginBody = serde_json::from_str(&reply.body).map_err(ApiError::decode)?;
    if body.success == Some(false) {
        return Err(ApiError::Rejected {
            message: body.message,
        });
    }

    match (body.user, body.token) {
        (Some(user), Some(token)) if !user.is_null() && !token.is_empty() => {
            Ok(LoginSuccess { user, token })
        }
        _ => Err(ApiError::decode("login response is missing user or token")),
    }
}
