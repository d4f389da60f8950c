//! Field tables: `(field, path)` pairs relative to each entity's root element.

/// Managed system (CEC) fields.
pub const MANAGED_SYSTEM: &[(&str, &str)] = &[
    ("name", "SystemName"),
    ("state", "State"),
    ("machine_type", "MachineTypeModelAndSerialNumber/MachineType"),
    ("model", "MachineTypeModelAndSerialNumber/Model"),
    ("serial_number", "MachineTypeModelAndSerialNumber/SerialNumber"),
    ("primary_ip_address", "PrimaryIPAddress"),
    ("firmware_level", "SystemFirmware"),
    (
        "installed_memory",
        "AssociatedSystemMemoryConfiguration/InstalledSystemMemory",
    ),
    (
        "available_memory",
        "AssociatedSystemMemoryConfiguration/CurrentAvailableSystemMemory",
    ),
    (
        "installed_processors",
        "AssociatedSystemProcessorConfiguration/InstalledSystemProcessorUnits",
    ),
    (
        "available_processors",
        "AssociatedSystemProcessorConfiguration/CurrentAvailableSystemProcessorUnits",
    ),
];

/// Physical I/O adapter nested in a managed system's I/O configuration.
pub const IO_ADAPTER: &[(&str, &str)] = &[
    ("adapter_id", "AdapterID"),
    ("description", "Description"),
    ("device_name", "DeviceName"),
    ("drc_name", "DynamicReconfigurationConnectorName"),
    ("location_code", "PhysicalLocation"),
];

/// Management console fields.
pub const MANAGEMENT_CONSOLE: &[(&str, &str)] = &[
    ("name", "ManagementConsoleName"),
    ("machine_type", "MachineTypeModelAndSerialNumber/MachineType"),
    ("model", "MachineTypeModelAndSerialNumber/Model"),
    ("serial_number", "MachineTypeModelAndSerialNumber/SerialNumber"),
    ("version", "VersionInfo/Version"),
    ("build_level", "VersionInfo/BuildLevel"),
];

/// Fields shared by client partitions and Virtual I/O Servers.
pub const BASE_PARTITION: &[(&str, &str)] = &[
    ("name", "PartitionName"),
    ("partition_id", "PartitionID"),
    ("state", "PartitionState"),
    ("partition_type", "PartitionType"),
    ("partition_uuid", "PartitionUUID"),
    ("os_version", "OperatingSystemVersion"),
    ("rmc_state", "ResourceMonitoringControlState"),
    ("desired_memory", "PartitionMemoryConfiguration/DesiredMemory"),
    ("current_memory", "PartitionMemoryConfiguration/CurrentMemory"),
    (
        "dedicated_processors",
        "PartitionProcessorConfiguration/HasDedicatedProcessors",
    ),
];

/// Partition field accepting in-place updates (rename).
pub const PARTITION_EDITABLE: &str = "name";

/// Client partition fields on top of [`BASE_PARTITION`].
pub const LOGICAL_PARTITION: &[(&str, &str)] = &[
    ("remote_restart_capable", "RemoteRestartCapable"),
    ("restricted_io", "IsRestrictedIOPartition"),
];

/// Virtual I/O Server fields on top of [`BASE_PARTITION`].
pub const VIRTUAL_IO_SERVER: &[(&str, &str)] = &[
    ("license_accepted", "VirtualIOServerLicenseAccepted"),
    ("mover_service_partition", "MoverServicePartition"),
];

pub const VIRTUAL_SWITCH: &[(&str, &str)] = &[
    ("name", "SwitchName"),
    ("switch_id", "SwitchID"),
    ("mode", "SwitchMode"),
];

pub const VIRTUAL_NETWORK: &[(&str, &str)] = &[
    ("name", "NetworkName"),
    ("vlan_id", "NetworkVLANID"),
    ("switch_id", "VswitchID"),
    ("tagged", "TaggedNetwork"),
];

pub const CLIENT_NETWORK_ADAPTER: &[(&str, &str)] = &[
    ("slot", "VirtualSlotNumber"),
    ("mac_address", "MACAddress"),
    ("port_vlan_id", "PortVLANID"),
    ("switch_id", "VirtualSwitchID"),
    ("location_code", "LocationCode"),
];

pub const SHARED_STORAGE_POOL: &[(&str, &str)] = &[
    ("name", "StoragePoolName"),
    ("capacity", "Capacity"),
    ("free_space", "FreeSpace"),
    ("over_commit_space", "OverCommitSpace"),
    ("total_lu_size", "TotalLogicalUnitSize"),
    ("unique_device_id", "UniqueDeviceID"),
];

/// Physical volume nested in a storage pool or cluster repository.
pub const PHYSICAL_VOLUME: &[(&str, &str)] = &[
    ("name", "VolumeName"),
    ("capacity", "VolumeCapacity"),
    ("unique_device_id", "VolumeUniqueID"),
    ("description", "Description"),
    ("state", "VolumeState"),
];

pub const CLUSTER: &[(&str, &str)] = &[
    ("name", "ClusterName"),
    ("cluster_id", "ClusterID"),
    ("repository_disk", "RepositoryDisk/PhysicalVolume/VolumeName"),
];

/// Asynchronous job status document.
pub const JOB_RESPONSE: &[(&str, &str)] = &[
    ("job_id", "JobID"),
    ("status", "Status"),
    ("operation", "JobRequestInstance/RequestedOperation/OperationName"),
    ("group", "JobRequestInstance/RequestedOperation/GroupName"),
    ("time_started", "TimeStarted"),
    ("time_completed", "TimeCompleted"),
    ("message", "ResponseException/Message"),
];

/// Name/value pair inside a job request or its results.
pub const JOB_PARAMETER: &[(&str, &str)] = &[
    ("name", "ParameterName"),
    ("value", "ParameterValue"),
];

/// Error body returned for failed requests.
pub const HTTP_ERROR_RESPONSE: &[(&str, &str)] = &[
    ("status", "HTTPStatus"),
    ("reason_code", "ReasonCode"),
    ("message", "Message"),
];
