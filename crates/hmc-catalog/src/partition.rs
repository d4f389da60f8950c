//! Client partitions and Virtual I/O Servers.
//!
//! Both schemas start from the shared partition table and add their own
//! fields. The partition name is the one field that can be renamed in place.

use hmc_core::{DecodeError, EntryRecord, LAST_SEGMENT};
use tracing::debug;

use crate::tables::PARTITION_EDITABLE;

record_type! {
    /// A client logical partition (LPAR).
    pub struct LogicalPartition(EntryRecord) = "LogicalPartition" {
        name,
        partition_id,
        /// Lifecycle state, e.g. `running` or `not activated`.
        state,
        /// `AIX/Linux`, `OS400` or `Virtual IO Server`.
        partition_type,
        partition_uuid,
        os_version,
        rmc_state,
        desired_memory,
        current_memory,
        dedicated_processors,
        remote_restart_capable,
        restricted_io,
    }
}

impl LogicalPartition {
    /// Identifier of the managed system hosting the partition.
    pub fn associated_system_id(&self) -> Option<String> {
        self.inner.link_id("AssociatedManagedSystem", LAST_SEGMENT)
    }

    /// Identifiers of the partition's virtual ethernet adapters.
    pub fn client_network_adapter_ids(&self) -> Vec<String> {
        self.inner.link_ids("ClientNetworkAdapters", LAST_SEGMENT)
    }

    /// Rename the partition, updating the member, the record, and the owned
    /// subtree so [`hmc_core::Record::to_xml`] reflects the new name.
    pub fn rename(&mut self, new_name: &str) -> Result<(), DecodeError> {
        rename(&mut self.inner, &mut self.name, new_name)
    }
}

record_type! {
    /// A Virtual I/O Server partition.
    pub struct VirtualIoServer(EntryRecord) = "VirtualIOServer" {
        name,
        partition_id,
        state,
        partition_type,
        partition_uuid,
        os_version,
        rmc_state,
        desired_memory,
        current_memory,
        dedicated_processors,
        license_accepted,
        mover_service_partition,
    }
}

impl VirtualIoServer {
    pub fn associated_system_id(&self) -> Option<String> {
        self.inner.link_id("AssociatedManagedSystem", LAST_SEGMENT)
    }

    pub fn rename(&mut self, new_name: &str) -> Result<(), DecodeError> {
        rename(&mut self.inner, &mut self.name, new_name)
    }
}

fn rename(
    entry: &mut EntryRecord,
    member: &mut Option<String>,
    new_name: &str,
) -> Result<(), DecodeError> {
    entry.set_field(PARTITION_EDITABLE, new_name)?;
    *member = entry.field(PARTITION_EDITABLE).map(str::to_string);
    debug!(uuid = ?entry.uuid(), name = new_name, "renamed partition");
    Ok(())
}
