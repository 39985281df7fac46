//! Tracks calls outstanding on the shared call-id namespace between the
//! in-channel and out-channel legs.

use std::collections::BTreeMap;
use std::time::Instant;

use crate::error::{BindError, BindErrorExt as _, BindResult};

/// A call registered against a `call_id`, pending completion.
#[derive(Debug, Clone)]
pub struct RpcCall {
    pub call_id: u32,
    pub opnum: u16,
    pub created_at: Instant,
}

/// Outstanding-call bookkeeping for one bind session.
///
/// Backed by a [`BTreeMap`] keyed by `call_id`: ids are assigned
/// monotonically, so iteration order falls out of the key order for free.
#[derive(Debug, Default)]
pub struct CallRegistry {
    calls: BTreeMap<u32, RpcCall>,
}

impl CallRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self { calls: BTreeMap::new() }
    }

    /// Registers a new call against `opnum`, stamping it with the current
    /// time for diagnostic logs. Returns
    /// [`BindErrorKind::DuplicateCall`](crate::BindErrorKind::DuplicateCall)
    /// if `call_id` is already registered, except for `call_id == 2`
    /// (`RPC_AUTH_3`'s fixed id), where re-registering an already-present
    /// entry succeeds silently and returns the existing entry unchanged.
    pub fn new_call(&mut self, call_id: u32, opnum: u16) -> BindResult<RpcCall> {
        if let Some(existing) = self.calls.get(&call_id) {
            if call_id == 2 {
                return Ok(existing.clone());
            }

            return Err(BindError::duplicate_call(call_id));
        }

        let call = RpcCall {
            call_id,
            opnum,
            created_at: Instant::now(),
        };
        self.calls.insert(call_id, call.clone());
        Ok(call)
    }

    /// Completes and removes a call. Returns
    /// [`BindErrorKind::UnknownCall`](crate::BindErrorKind::UnknownCall) if
    /// `call_id` was never registered.
    pub fn complete(&mut self, call_id: u32) -> BindResult<RpcCall> {
        self.calls.remove(&call_id).ok_or_else(|| BindError::unknown_call(call_id))
    }

    /// Drops every outstanding call, releasing their buffers.
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.calls.len()
    }
}
