//! Shared storage pools, their physical volumes, and SSP clusters.

use hmc_core::{EntryRecord, Record, LAST_SEGMENT};

record_type! {
    pub struct SharedStoragePool(EntryRecord) = "SharedStoragePool" {
        name,
        /// Capacity in GB.
        capacity,
        free_space,
        over_commit_space,
        total_lu_size,
        unique_device_id,
    }
    nested {
        physical_volumes: PhysicalVolume = "PhysicalVolumes/PhysicalVolume",
    }
}

record_type! {
    pub struct PhysicalVolume(Record) = "PhysicalVolume" {
        name,
        /// Capacity in MB.
        capacity,
        unique_device_id,
        description,
        state,
    }
}

record_type! {
    /// A Shared Storage Pool cluster.
    pub struct Cluster(EntryRecord) = "Cluster" {
        name,
        cluster_id,
        repository_disk,
    }
}

impl Cluster {
    /// Identifier of the cluster's shared storage pool.
    pub fn ssp_id(&self) -> Option<String> {
        self.inner.link_id("ClusterSharedStoragePool", LAST_SEGMENT)
    }
}
