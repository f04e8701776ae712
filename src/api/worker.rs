//! Background threads that perform backend calls for the UI.
//!
//! Requests run on two lanes. Long calls (finetune) get their own thread so
//! that plot, overlay and model-file calls keep flowing while one is in
//! flight. Within a lane requests run one at a time in submission order.
//! Each finished call is sent back over a shared channel and the UI is woken
//! so it can apply the result on the next frame.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use super::{dispatch, ApiRequest, ApiResponse, Backend};

pub struct RequestWorker {
    quick_tx: Sender<ApiRequest>,
    long_tx: Sender<ApiRequest>,
    rx: Receiver<ApiResponse>,
    _handles: [JoinHandle<()>; 2],
}

impl RequestWorker {
    /// Spawn the worker threads. `wake` is called after every finished request.
    pub fn spawn<B, W>(backend: B, wake: W) -> Self
    where
        B: Backend + 'static,
        W: Fn() + Send + Sync + 'static,
    {
        let backend = Arc::new(backend);
        let wake = Arc::new(wake);
        let (resp_tx, resp_rx) = mpsc::channel::<ApiResponse>();
        let (quick_tx, quick) = spawn_lane("quick", backend.clone(), wake.clone(), resp_tx.clone());
        let (long_tx, long) = spawn_lane("long", backend, wake, resp_tx);
        Self {
            quick_tx,
            long_tx,
            rx: resp_rx,
            _handles: [quick, long],
        }
    }

    /// Queue a request. Returns `false` if the worker is gone.
    pub fn submit(&self, request: ApiRequest) -> bool {
        let lane = if request.is_long_running() {
            &self.long_tx
        } else {
            &self.quick_tx
        };
        lane.send(request).is_ok()
    }

    /// Queue several requests in order.
    pub fn submit_all(&self, requests: impl IntoIterator<Item = ApiRequest>) {
        for request in requests {
            if !self.submit(request) {
                tracing::error!("request worker is not running; dropping request");
            }
        }
    }

    /// Finished responses, without blocking.
    pub fn drain(&self) -> Vec<ApiResponse> {
        self.rx.try_iter().collect()
    }

    /// Wait up to `timeout` for the next response.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<ApiResponse> {
        self.rx.recv_timeout(timeout).ok()
    }
}

fn spawn_lane<B, W>(
    lane: &'static str,
    backend: Arc<B>,
    wake: Arc<W>,
    resp_tx: Sender<ApiResponse>,
) -> (Sender<ApiRequest>, JoinHandle<()>)
where
    B: Backend + 'static,
    W: Fn() + Send + Sync + 'static,
{
    let (req_tx, req_rx) = mpsc::channel::<ApiRequest>();
    let handle = std::thread::spawn(move || {
        while let Ok(request) = req_rx.recv() {
            let label = request.label();
            tracing::debug!(lane, request = label, "dispatching");
            let response = dispatch(backend.as_ref(), request);
            if let Some(err) = response.error() {
                tracing::warn!(lane, request = label, error = %err, "backend call failed");
            }
            if resp_tx.send(response).is_err() {
                break;
            }
            wake();
        }
        tracing::debug!(lane, "request worker lane stopped");
    });
    (req_tx, handle)
}
