//! Hooks that log backend calls with `tracing`.

use tracing::debug;

use dynastore_core::{Key, OperationContext, Request, Response, StoreHooks};

/// Logs every request and response at `debug` level.
///
/// Install with `StoreOption::hooks(TracingHooks)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHooks;

impl<P: Key, S: Key> StoreHooks<P, S> for TracingHooks {
    fn request_built(
        &self,
        ctx: OperationContext,
        partition_key: &P,
        sort_key: &S,
        request: Request<'_>,
    ) -> OperationContext {
        let operation = ctx
            .operation_details()
            .map(|details| details.name.as_str())
            .unwrap_or_default();
        debug!(
            operation,
            table = request.table_name(),
            partition_key = %partition_key.to_key_string(),
            sort_key = %sort_key.to_key_string(),
            "request built"
        );
        ctx
    }

    fn response_received(
        &self,
        ctx: OperationContext,
        partition_key: &P,
        sort_key: &S,
        response: Response<'_>,
    ) -> OperationContext {
        let operation = ctx
            .operation_details()
            .map(|details| details.name.as_str())
            .unwrap_or_default();
        let capacity = response
            .consumed_capacity()
            .and_then(|capacity| capacity.capacity_units);
        debug!(
            operation,
            partition_key = %partition_key.to_key_string(),
            sort_key = %sort_key.to_key_string(),
            consumed_capacity = ?capacity,
            "response received"
        );
        ctx
    }
}
