#![allow(dead_code)]
use hickory_proto::op::Message;
use hickory_proto::serialize::binary::BinEncodable;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::{oneshot, Mutex};

/// What the mock does with one request.
pub enum Reply {
    Message(Message),
    Raw(Vec<u8>),
    /// Several datagrams, sent in order. Over TCP only the first is written.
    Many(Vec<Message>),
    Silent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wire {
    Udp,
    Tcp,
}

pub type Handler = Arc<dyn Fn(&Message, Wire) -> Reply + Send + Sync>;

/// Local DNS server answering through a scripted handler.
///
/// Every parsed request is kept so tests can inspect flags and names.
pub struct MockDnsServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<Message>>>,
    udp_count: Arc<AtomicU64>,
    tcp_count: Arc<AtomicU64>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    /// UDP only, on an ephemeral loopback port.
    pub async fn start(handler: Handler) -> Result<Self, std::io::Error> {
        Self::spawn(handler, false).await
    }

    /// UDP plus a TCP listener on the same port.
    pub async fn start_with_tcp(handler: Handler) -> Result<Self, std::io::Error> {
        Self::spawn(handler, true).await
    }

    async fn spawn(handler: Handler, with_tcp: bool) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;
        let tcp = if with_tcp {
            Some(TcpListener::bind(addr).await?)
        } else {
            None
        };

        let requests = Arc::new(Mutex::new(Vec::new()));
        let udp_count = Arc::new(AtomicU64::new(0));
        let tcp_count = Arc::new(AtomicU64::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        {
            let requests = Arc::clone(&requests);
            let udp_count = Arc::clone(&udp_count);
            let tcp_count = Arc::clone(&tcp_count);
            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                loop {
                    tokio::select! {
                        _ = &mut shutdown_rx => break,
                        result = socket.recv_from(&mut buf) => {
                            let Ok((len, peer)) = result else { continue };
                            let Ok(request) = Message::from_vec(&buf[..len]) else { continue };
                            udp_count.fetch_add(1, Ordering::Relaxed);
                            requests.lock().await.push(request.clone());
                            for bytes in encode(handler(&request, Wire::Udp)) {
                                let _ = socket.send_to(&bytes, peer).await;
                            }
                        }
                        accepted = accept(&tcp) => {
                            let Ok((mut stream, _)) = accepted else { continue };
                            let handler = Arc::clone(&handler);
                            let requests = Arc::clone(&requests);
                            let tcp_count = Arc::clone(&tcp_count);
                            tokio::spawn(async move {
                                let mut len_buf = [0u8; 2];
                                if stream.read_exact(&mut len_buf).await.is_err() {
                                    return;
                                }
                                let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                                if stream.read_exact(&mut query).await.is_err() {
                                    return;
                                }
                                let Ok(request) = Message::from_vec(&query) else { return };
                                tcp_count.fetch_add(1, Ordering::Relaxed);
                                requests.lock().await.push(request.clone());
                                if let Some(bytes) = encode(handler(&request, Wire::Tcp)).into_iter().next() {
                                    let mut framed = (bytes.len() as u16).to_be_bytes().to_vec();
                                    framed.extend_from_slice(&bytes);
                                    let _ = stream.write_all(&framed).await;
                                }
                            });
                        }
                    }
                }
            });
        }

        Ok(Self {
            addr,
            requests,
            udp_count,
            tcp_count,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub async fn requests(&self) -> Vec<Message> {
        self.requests.lock().await.clone()
    }

    pub fn udp_count(&self) -> u64 {
        self.udp_count.load(Ordering::Relaxed)
    }

    pub fn tcp_count(&self) -> u64 {
        self.tcp_count.load(Ordering::Relaxed)
    }
}

async fn accept(
    listener: &Option<TcpListener>,
) -> std::io::Result<(tokio::net::TcpStream, SocketAddr)> {
    match listener {
        Some(l) => l.accept().await,
        None => std::future::pending().await,
    }
}

fn encode(reply: Reply) -> Vec<Vec<u8>> {
    match reply {
        Reply::Message(message) => message.to_vec().into_iter().collect(),
        Reply::Raw(bytes) => vec![bytes],
        Reply::Many(messages) => messages.iter().filter_map(|m| m.to_vec().ok()).collect(),
        Reply::Silent => Vec::new(),
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Wraps a closure as a [`Handler`], giving it the request signature.
pub fn respond_with<F>(f: F) -> Handler
where
    F: Fn(&Message, Wire) -> Reply + Send + Sync + 'static,
{
    Arc::new(f)
}
