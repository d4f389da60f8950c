//! Virtual switches, virtual networks, and client network adapters.

use hmc_core::{id_from_link, EntryRecord, LAST_SEGMENT};

record_type! {
    pub struct VirtualSwitch(EntryRecord) = "VirtualSwitch" {
        name,
        switch_id,
        /// `Veb` or `Vepa`.
        mode,
    }
}

impl VirtualSwitch {
    /// Identifiers of the virtual networks attached to the switch.
    pub fn network_ids(&self) -> Vec<String> {
        self.inner.link_ids("VirtualNetworks", LAST_SEGMENT)
    }
}

record_type! {
    pub struct VirtualNetwork(EntryRecord) = "VirtualNetwork" {
        name,
        vlan_id,
        switch_id,
        tagged,
    }
}

impl VirtualNetwork {
    /// Identifier of the switch carrying the network.
    pub fn associated_switch_id(&self) -> Option<String> {
        self.inner.link_id("AssociatedSwitch", LAST_SEGMENT)
    }

    /// Identifier of the managed system owning the switch
    /// (`.../ManagedSystem/<id>/VirtualSwitch/<switch>`).
    pub fn managed_system_id(&self) -> Option<String> {
        self.inner.link_id("AssociatedSwitch", 3)
    }
}

record_type! {
    /// Virtual ethernet adapter of a client partition.
    pub struct ClientNetworkAdapter(EntryRecord) = "ClientNetworkAdapter" {
        slot,
        mac_address,
        port_vlan_id,
        switch_id,
        location_code,
    }
}

impl ClientNetworkAdapter {
    pub fn network_ids(&self) -> Vec<String> {
        self.inner.link_ids("AssociatedVirtualNetworks", LAST_SEGMENT)
    }

    /// Identifier of the owning partition, taken from the self link
    /// (`.../LogicalPartition/<id>/ClientNetworkAdapter/<adapter>`).
    pub fn partition_id(&self) -> Option<String> {
        id_from_link(self.inner.self_link()?, 3)
    }
}
