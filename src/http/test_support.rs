//! Raw TCP servers for exercising timeout and connection failures.

use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

/// A listener on a background thread that counts accepted connections.
pub(crate) struct CountingServer {
    addr: SocketAddr,
    accepted: Arc<AtomicUsize>,
}

impl CountingServer {
    /// Accepts connections and never answers, so every request times out.
    pub(crate) fn silent() -> Self {
        Self::spawn(true)
    }

    /// Accepts connections and closes them at once, so every request fails
    /// with a connection error.
    pub(crate) fn dropping() -> Self {
        Self::spawn(false)
    }

    fn spawn(hold: bool) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let accepted = Arc::new(AtomicUsize::new(0));
        let counter = accepted.clone();

        thread::spawn(move || {
            let mut held: Vec<TcpStream> = Vec::new();
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                counter.fetch_add(1, Ordering::SeqCst);
                if hold {
                    held.push(stream);
                } else {
                    drop(stream);
                }
            }
        });

        Self { addr, accepted }
    }

    pub(crate) fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub(crate) fn accepted(&self) -> usize {
        self.accepted.load(Ordering::SeqCst)
    }
}

/// A base URL nothing is listening on.
pub(crate) fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
