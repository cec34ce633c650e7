//! Asynchronous load service
//!
//! Requests are queued with [`Fetch::send`] and complete during
//! [`Fetch::do_work`], which the lifecycle controller calls once at the start
//! of every frame. A response completed there can be taken with
//! [`Fetch::take`] in the same frame's `frame` hook.
//!
//! Every handle holds a slot of the service until its response is taken,
//! including requests that were rejected on `send`.

use std::collections::VecDeque;
use slotmap::{new_key_type, SlotMap};

use crate::error::{Error, Result};
use crate::{falcon_err, falcon_trace};

const SOURCE: &str = "falcon::fetch";

new_key_type! {
    /// Handle of an in-flight or completed fetch request
    pub struct FetchHandle;
}

/// Fetch service setup parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchDesc {
    /// Maximum number of requests held at once, pending or completed but
    /// not yet taken
    pub max_requests: usize,
    /// Maximum number of requests completed by one `do_work` call
    pub max_completions_per_frame: usize,
}

impl Default for FetchDesc {
    fn default() -> Self {
        Self {
            max_requests: 128,
            max_completions_per_frame: 8,
        }
    }
}

/// Outcome of a completed request
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub path: String,
    pub result: Result<Vec<u8>>,
}

/// Host async-fetch service
pub trait Fetch {
    fn setup(&mut self, desc: &FetchDesc) -> Result<()>;

    /// Drop every pending and completed request
    fn shutdown(&mut self);

    /// Queue a load of `path`
    fn send(&mut self, path: &str) -> FetchHandle;

    /// Advance pending requests
    ///
    /// Called once per frame. Implementations keep the work done here bounded
    /// so a long queue never stalls a frame.
    fn do_work(&mut self);

    /// Take the response of a completed request
    ///
    /// Returns `None` while the request is still pending, and after the
    /// response has been taken once.
    fn take(&mut self, handle: FetchHandle) -> Option<FetchResponse>;
}

struct Request {
    path: String,
    response: Option<FetchResponse>,
}

/// Default [`Fetch`] implementation reading from the local file system
///
/// Files are read synchronously inside `do_work`, at most
/// `max_completions_per_frame` of them per call. The remaining requests wait
/// for the following frames.
#[derive(Default)]
pub struct FileFetch {
    desc: FetchDesc,
    active: bool,
    requests: SlotMap<FetchHandle, Request>,
    pending: VecDeque<FetchHandle>,
}

impl FileFetch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of requests waiting for `do_work`
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Number of requests holding a slot (pending, or completed and not taken)
    pub fn held_count(&self) -> usize {
        self.requests.len()
    }

    fn resolve_now(&mut self, path: &str, error: Error) -> FetchHandle {
        self.requests.insert(Request {
            path: path.to_string(),
            response: Some(FetchResponse {
                path: path.to_string(),
                result: Err(error),
            }),
        })
    }
}

impl Fetch for FileFetch {
    fn setup(&mut self, desc: &FetchDesc) -> Result<()> {
        if desc.max_requests == 0 || desc.max_completions_per_frame == 0 {
            return Err(falcon_err!(InitializationFailed, SOURCE,
                "fetch limits must be positive ({:?})", desc));
        }
        self.desc = *desc;
        self.active = true;
        Ok(())
    }

    fn shutdown(&mut self) {
        self.requests.clear();
        self.pending.clear();
        self.active = false;
    }

    fn send(&mut self, path: &str) -> FetchHandle {
        if !self.active {
            let error = falcon_err!(Fetch, SOURCE, "'{}' requested while the service is down", path);
            return self.resolve_now(path, error);
        }
        if self.requests.len() >= self.desc.max_requests {
            let error = falcon_err!(Fetch, SOURCE,
                "'{}' rejected, {} requests not taken yet", path, self.requests.len());
            return self.resolve_now(path, error);
        }

        let handle = self.requests.insert(Request {
            path: path.to_string(),
            response: None,
        });
        self.pending.push_back(handle);
        falcon_trace!(SOURCE, "queued '{}'", path);
        handle
    }

    fn do_work(&mut self) {
        for _ in 0..self.desc.max_completions_per_frame {
            let Some(handle) = self.pending.pop_front() else {
                break;
            };
            let Some(request) = self.requests.get_mut(handle) else {
                continue;
            };

            let result = std::fs::read(&request.path).map_err(|e| {
                falcon_err!(Fetch, SOURCE, "failed to read '{}': {}", request.path, e)
            });
            if let Ok(bytes) = &result {
                falcon_trace!(SOURCE, "loaded '{}' ({} bytes)", request.path, bytes.len());
            }
            request.response = Some(FetchResponse {
                path: request.path.clone(),
                result,
            });
        }
    }

    fn take(&mut self, handle: FetchHandle) -> Option<FetchResponse> {
        let completed = self
            .requests
            .get(handle)
            .is_some_and(|request| request.response.is_some());
        if !completed {
            return None;
        }
        self.requests.remove(handle).and_then(|request| request.response)
    }
}

#[cfg(test)]
#[path = "fetch_tests.rs"]
mod tests;
