use axum::{Router, extract::ConnectInfo, response::Json, routing::get};
use ipnum::{ClientIp, ClientIpLayer, IpVersion, in_net_num, ipv6};
use serde_json::json;
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const PRIVATE_NETWORKS: [&str; 4] = ["10.0.0.0/8", "172.16.0.0/12", "192.168.0.0/16", "fc00::/7"];

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    let app = create_app();
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();

    println!("Server starting on http://localhost:3000");
    println!("Test endpoints:");
    println!("  • GET /ip     - JSON response with the discovered client address");
    println!("  • GET /debug  - Connection address next to the discovered one");
    println!();
    println!("Test with headers:");
    println!("  curl -H 'X-Forwarded-For: 198.51.100.1, 192.168.1.1' http://localhost:3000/ip");
    println!("  curl -H 'Client-IP: 2001:db8::42' http://localhost:3000/ip");
    println!();

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}

fn create_app() -> Router {
    Router::new()
        .route("/ip", get(ip_handler))
        .route("/debug", get(debug_handler))
        .layer(ClientIpLayer::default())
}

/// Handler that describes the client address in JSON
async fn ip_handler(client_ip: ClientIp) -> Json<serde_json::Value> {
    let ip = client_ip.as_str();
    let (version, canonical) = match client_ip.version() {
        IpVersion::V6 => ("IPv6", ipv6::to_abbreviation(ip).ok()),
        IpVersion::V4 => ("IPv4", Some(ip.to_string())),
    };

    // Each probe is sent with its own host-length prefix
    let probe = match client_ip.version() {
        IpVersion::V4 => format!("{ip}/32"),
        IpVersion::V6 => format!("{ip}/128"),
    };

    Json(json!({
        "client_ip": ip,
        "ip_version": version,
        "canonical": canonical,
        "is_unknown": client_ip.is_unknown(),
        "is_private": PRIVATE_NETWORKS.iter().any(|net| in_net_num(*net, [probe.as_str()])),
    }))
}

/// Debug handler showing connection information
async fn debug_handler(
    client_ip: ClientIp,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Json<serde_json::Value> {
    Json(json!({
        "discovered_ip": client_ip.as_str(),
        "connection_info": {
            "remote_addr": addr.to_string(),
            "remote_ip": addr.ip().to_string(),
            "remote_port": addr.port(),
        },
        "ip_matches_connection": client_ip.as_str() == addr.ip().to_string(),
    }))
}
