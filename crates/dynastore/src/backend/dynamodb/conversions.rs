//! Conversions from SDK response metadata to core types.

use aws_sdk_dynamodb::types::ConsumedCapacity as SdkConsumedCapacity;

use dynastore_core::ConsumedCapacity;

/// Convert SDK capacity accounting to ConsumedCapacity.
pub fn consumed_capacity(capacity: Option<&SdkConsumedCapacity>) -> Option<ConsumedCapacity> {
    capacity.map(|capacity| ConsumedCapacity {
        table_name: capacity.table_name().map(str::to_string),
        capacity_units: capacity.capacity_units(),
        read_capacity_units: capacity.read_capacity_units(),
        write_capacity_units: capacity.write_capacity_units(),
    })
}
