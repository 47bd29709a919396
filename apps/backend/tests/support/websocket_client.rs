// WebSocket client utilities for testing

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

const RECV_TIMEOUT: Duration = Duration::from_secs(2);

pub struct WebSocketClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WebSocketClient {
    pub async fn connect(url: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let (stream, _) = connect_async(url).await?;
        Ok(Self { stream })
    }

    /// Connect and complete the hello handshake; returns the connection id.
    pub async fn connect_hello(url: &str) -> Result<(Self, String), Box<dyn std::error::Error>> {
        let mut client = Self::connect(url).await?;
        client.send_json(&serde_json::json!({"type": "hello", "protocol": 1})).await?;
        let ack = client.recv_type("hello_ack").await?;
        let conn_id = ack["connection_id"]
            .as_str()
            .ok_or("hello_ack without connection_id")?
            .to_string();
        Ok((client, conn_id))
    }

    pub async fn send_json(&mut self, value: &Value) -> Result<(), Box<dyn std::error::Error>> {
        self.stream.send(Message::Text(value.to_string().into())).await?;
        Ok(())
    }

    pub async fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.stream.close(None).await?;
        Ok(())
    }

    /// Next text frame as JSON, skipping control frames.
    pub async fn recv_json(&mut self) -> Result<Value, Box<dyn std::error::Error>> {
        loop {
            let next = tokio::time::timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .map_err(|_| "timeout waiting for message")?;
            match next {
                Some(Ok(Message::Text(text))) => return Ok(serde_json::from_str(text.as_str())?),
                Some(Ok(Message::Close(_))) | None => return Err("connection closed".into()),
                Some(Ok(_)) => continue,
                Some(Err(err)) => return Err(err.into()),
            }
        }
    }

    /// Next message, which must have the given `type`.
    pub async fn recv_type(&mut self, ty: &str) -> Result<Value, Box<dyn std::error::Error>> {
        let msg = self.recv_json().await?;
        if msg["type"] != ty {
            return Err(format!("expected {ty}, got {msg}").into());
        }
        Ok(msg)
    }

    /// Fails if any text frame arrives within `window`.
    pub async fn expect_silence(&mut self, window: Duration) -> Result<(), Box<dyn std::error::Error>> {
        match tokio::time::timeout(window, self.stream.next()).await {
            Err(_) => Ok(()),
            Ok(Some(Ok(Message::Text(text)))) => Err(format!("unexpected message: {text}").into()),
            Ok(_) => Ok(()),
        }
    }
}
