//! A page controlled by the worker: its requests go through `handle_fetch`.

use std::sync::Arc;

use tokio::sync::Mutex;

use super::service::ServiceWorker;
use super::WorkerError;
use crate::net::{Network, NetworkError, Request, Response};

/// `Network` view of a shared worker, so the data loader can run through it.
pub struct WorkerClient<N> {
    worker: Arc<Mutex<ServiceWorker<N>>>,
}

impl<N> Clone for WorkerClient<N> {
    fn clone(&self) -> Self {
        Self {
            worker: Arc::clone(&self.worker),
        }
    }
}

impl<N: Network> WorkerClient<N> {
    pub fn new(worker: ServiceWorker<N>) -> Self {
        Self {
            worker: Arc::new(Mutex::new(worker)),
        }
    }

    pub fn worker(&self) -> &Arc<Mutex<ServiceWorker<N>>> {
        &self.worker
    }
}

impl<N: Network> Network for WorkerClient<N> {
    async fn fetch(&self, request: &Request) -> Result<Response, NetworkError> {
        let mut worker = self.worker.lock().await;
        match worker.fetch(request).await {
            Ok(response) => Ok(response),
            Err(WorkerError::Network(e)) => Err(e),
            Err(e) => Err(NetworkError::Rejected(e.to_string())),
        }
    }
}
