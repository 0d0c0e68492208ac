//! Client address and device name for new sessions

use std::net::SocketAddr;

use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequestParts},
    http::{header, request::Parts},
};
use blog_service::services::ClientInfo;

/// Proxy header consulted before the socket address
const FORWARDED_FOR: &str = "x-forwarded-for";

const UNKNOWN: &str = "unknown";

/// Where the request came from
#[derive(Debug, Clone)]
pub struct Client(pub ClientInfo);

fn ip_of(parts: &Parts) -> String {
    let forwarded = parts
        .headers
        .get(FORWARDED_FOR)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    if let Some(ip) = forwarded {
        return ip.to_string();
    }

    parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map_or_else(|| UNKNOWN.to_string(), |ConnectInfo(addr)| addr.ip().to_string())
}

#[async_trait]
impl<S> FromRequestParts<S> for Client
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let device_name = parts
            .headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .unwrap_or(UNKNOWN)
            .to_string();

        Ok(Self(ClientInfo {
            ip: ip_of(parts),
            device_name,
        }))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    fn parts(builder: axum::http::request::Builder) -> Parts {
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_forwarded_for_wins() {
        let mut parts = parts(
            Request::builder()
                .header(FORWARDED_FOR, "10.0.0.7, 172.16.0.1")
                .header(header::USER_AGENT, "curl/8.0"),
        );
        parts
            .extensions
            .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000))));

        let Client(info) = Client::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(info.ip, "10.0.0.7");
        assert_eq!(info.device_name, "curl/8.0");
    }

    #[tokio::test]
    async fn test_falls_back_to_socket_then_unknown() {
        let mut parts = parts(Request::builder());
        let Client(info) = Client::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(info.ip, UNKNOWN);
        assert_eq!(info.device_name, UNKNOWN);

        parts
            .extensions
            .insert(ConnectInfo(SocketAddr::from(([192, 168, 1, 2], 4000))));
        let Client(info) = Client::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(info.ip, "192.168.1.2");
    }
}
