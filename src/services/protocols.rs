// src/services/protocols.rs

//! Per-protocol liveness checks.
//!
//! Each checker answers one question: does this stream URL respond the way
//! its protocol says an alive stream should, within the time limit? Checkers
//! never error; any fault (bad URL, refused connection, wrong answer,
//! timeout) is simply "not alive".

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, UdpSocket};
use tokio::process::Command;

use crate::error::Result;
use crate::models::ProbeConfig;
use crate::utils::url::socket_target;

/// A liveness check for one family of stream URLs.
#[async_trait]
pub trait ProtocolProbe: Send + Sync {
    /// True when the URL answers correctly within `limit`.
    async fn check(&self, url: &str, limit: Duration) -> bool;
}

/// HTTP(S) streams: a GET must come back with status 200.
pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }

    async fn attempt(&self, url: &str) -> bool {
        match self.client.get(url).send().await {
            Ok(response) => response.status() == reqwest::StatusCode::OK,
            Err(_) => false,
        }
    }
}

#[async_trait]
impl ProtocolProbe for HttpProbe {
    async fn check(&self, url: &str, limit: Duration) -> bool {
        tokio::time::timeout(limit, self.attempt(url))
            .await
            .unwrap_or(false)
    }
}

/// `p3p://` streams: speak the HTTP-like P3P handshake over TCP and expect
/// a "P3P" marker in the first response chunk.
pub struct P3pProbe {
    user_agent: String,
}

impl P3pProbe {
    pub fn new(user_agent: &str) -> Self {
        Self {
            user_agent: user_agent.to_string(),
        }
    }

    async fn attempt(&self, url: &str) -> bool {
        let Some(target) = socket_target(url, 80) else {
            return false;
        };
        let path = if target.path.is_empty() { "/" } else { target.path.as_str() };
        let Ok(mut stream) = TcpStream::connect((target.host.as_str(), target.port)).await else {
            return false;
        };
        let request = format!(
            "GET {} P3P/1.0\r\nHost: {}\r\nUser-Agent: {}\r\nConnection: close\r\n\r\n",
            path, target.host, self.user_agent
        );
        if stream.write_all(request.as_bytes()).await.is_err() {
            return false;
        }
        let mut buf = [0u8; 1024];
        match stream.read(&mut buf).await {
            Ok(n) => String::from_utf8_lossy(&buf[..n]).contains("P3P"),
            Err(_) => false,
        }
    }
}

#[async_trait]
impl ProtocolProbe for P3pProbe {
    async fn check(&self, url: &str, limit: Duration) -> bool {
        tokio::time::timeout(limit, self.attempt(url))
            .await
            .unwrap_or(false)
    }
}

/// `p2p://` streams: a proprietary TCP handshake. The request template and
/// expected response fragment come from configuration; host, port, and a
/// non-empty path are all required.
pub struct P2pProbe {
    request_template: String,
    expect: String,
}

impl P2pProbe {
    pub fn new(request_template: &str, expect: &str) -> Self {
        Self {
            request_template: request_template.to_string(),
            expect: expect.to_string(),
        }
    }

    async fn attempt(&self, url: &str) -> bool {
        let Some(target) = socket_target(url, 0) else {
            return false;
        };
        if target.port == 0 || target.path.is_empty() {
            return false;
        }
        let Ok(mut stream) = TcpStream::connect((target.host.as_str(), target.port)).await else {
            return false;
        };
        let request = self
            .request_template
            .replace("{path}", &target.path)
            .replace("{host}", &target.host);
        if stream.write_all(request.as_bytes()).await.is_err() {
            return false;
        }
        let mut buf = [0u8; 1024];
        match stream.read(&mut buf).await {
            Ok(n) => String::from_utf8_lossy(&buf[..n]).contains(self.expect.as_str()),
            Err(_) => false,
        }
    }
}

#[async_trait]
impl ProtocolProbe for P2pProbe {
    async fn check(&self, url: &str, limit: Duration) -> bool {
        tokio::time::timeout(limit, self.attempt(url))
            .await
            .unwrap_or(false)
    }
}

/// rtmp/rtsp streams: delegate to ffprobe, which exits zero only when it can
/// open the stream. The child is killed if the timeout cancels the wait.
pub struct FfprobeProbe {
    command: String,
}

impl FfprobeProbe {
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
        }
    }

    async fn attempt(&self, url: &str) -> bool {
        let status = Command::new(&self.command)
            .args(["-v", "quiet"])
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await;
        match status {
            Ok(status) => status.success(),
            Err(_) => false,
        }
    }
}

#[async_trait]
impl ProtocolProbe for FfprobeProbe {
    async fn check(&self, url: &str, limit: Duration) -> bool {
        tokio::time::timeout(limit, self.attempt(url))
            .await
            .unwrap_or(false)
    }
}

/// `rtp://` streams: bind a UDP socket, poke the target, and require any
/// response datagram. Needs an explicit port.
pub struct RtpProbe;

impl RtpProbe {
    async fn attempt(&self, url: &str) -> bool {
        let Some(target) = socket_target(url, 0) else {
            return false;
        };
        if target.port == 0 {
            return false;
        }
        let Ok(socket) = UdpSocket::bind("0.0.0.0:0").await else {
            return false;
        };
        if socket
            .connect((target.host.as_str(), target.port))
            .await
            .is_err()
        {
            return false;
        }
        if socket.send(&[]).await.is_err() {
            return false;
        }
        let mut buf = [0u8; 1];
        socket.recv(&mut buf).await.is_ok()
    }
}

#[async_trait]
impl ProtocolProbe for RtpProbe {
    async fn check(&self, url: &str, limit: Duration) -> bool {
        tokio::time::timeout(limit, self.attempt(url))
            .await
            .unwrap_or(false)
    }
}

/// Routes a URL to the checker for its scheme. Unknown schemes are not
/// alive by definition.
pub struct ProbeDispatch {
    http: HttpProbe,
    p3p: P3pProbe,
    p2p: P2pProbe,
    ffprobe: FfprobeProbe,
    rtp: RtpProbe,
}

impl ProbeDispatch {
    pub fn new(probe: &ProbeConfig, user_agent: &str) -> Result<Self> {
        Ok(Self {
            http: HttpProbe::new(user_agent)?,
            p3p: P3pProbe::new(user_agent),
            p2p: P2pProbe::new(&probe.p2p_request, &probe.p2p_expect),
            ffprobe: FfprobeProbe::new(&probe.ffprobe_command),
            rtp: RtpProbe,
        })
    }
}

#[async_trait]
impl ProtocolProbe for ProbeDispatch {
    async fn check(&self, url: &str, limit: Duration) -> bool {
        if url.starts_with("http") {
            self.http.check(url, limit).await
        } else if url.starts_with("p3p") {
            self.p3p.check(url, limit).await
        } else if url.starts_with("p2p") {
            self.p2p.check(url, limit).await
        } else if url.starts_with("rtmp") || url.starts_with("rtsp") {
            self.ffprobe.check(url, limit).await
        } else if url.starts_with("rtp") {
            self.rtp.check(url, limit).await
        } else {
            false
        }
    }
}
