//! Managed systems, their physical adapters, and the management console.

use hmc_core::{EntryRecord, Record, LAST_SEGMENT};

record_type! {
    /// A managed system (physical server).
    pub struct ManagedSystem(EntryRecord) = "ManagedSystem" {
        name,
        /// Power state, e.g. `operating` or `power off`.
        state,
        machine_type,
        model,
        serial_number,
        primary_ip_address,
        firmware_level,
        /// Installed memory in MB.
        installed_memory,
        available_memory,
        installed_processors,
        available_processors,
    }
    nested {
        /// Physical I/O adapters, in document order.
        io_adapters: IoAdapter = "AssociatedSystemIOConfiguration/IOAdapters/*/IOAdapter",
    }
}

impl ManagedSystem {
    /// `<type>-<model>*<serial>` as shown on the HMC, when all three are present.
    pub fn mtms(&self) -> Option<String> {
        Some(format!(
            "{}-{}*{}",
            self.machine_type()?,
            self.model()?,
            self.serial_number()?
        ))
    }

    /// Identifiers of the client partitions hosted on this system.
    pub fn partition_ids(&self) -> Vec<String> {
        self.inner.link_ids("AssociatedLogicalPartitions", LAST_SEGMENT)
    }

    /// Identifiers of the Virtual I/O Servers hosted on this system.
    pub fn vios_ids(&self) -> Vec<String> {
        self.inner.link_ids("AssociatedVirtualIOServers", LAST_SEGMENT)
    }
}

record_type! {
    /// Physical I/O adapter inside a managed system.
    pub struct IoAdapter(Record) = "IOAdapter" {
        adapter_id,
        description,
        device_name,
        drc_name,
        location_code,
    }
}

record_type! {
    pub struct ManagementConsole(EntryRecord) = "ManagementConsole" {
        name,
        machine_type,
        model,
        serial_number,
        version,
        build_level,
    }
}

impl ManagementConsole {
    /// Identifiers of the systems this console manages.
    pub fn managed_system_ids(&self) -> Vec<String> {
        self.inner.link_ids("ManagedSystems", LAST_SEGMENT)
    }
}

#[cfg(test)]
mod tests {
    use crate::{standard_registry, Entity};

    const SYSTEM: &str = r#"
        <entry xmlns="http://www.w3.org/2005/Atom" xmlns:ns2="http://a9.com/-/spec/opensearch/1.1/">
            <id>caae9209-25e5-35cd-a71a-ed55c03f294d</id>
            <title>ManagedSystem</title>
            <published>2015-01-28T14:26:13.000-05:00</published>
            <link rel="SELF" href="https://hmc:12443/rest/api/uom/ManagedSystem/caae9209-25e5-35cd-a71a-ed55c03f294d"/>
            <etag:etag xmlns:etag="http://www.ibm.com/xmlns/systems/power/firmware/cluster/default">-1571137786</etag:etag>
            <content type="application/vnd.ibm.powervm.uom+xml; type=ManagedSystem">
                <ManagedSystem:ManagedSystem xmlns:ManagedSystem="http://www.ibm.com/xmlns/systems/power/firmware/uom/mc/2012_10/" schemaVersion="V1_2_0">
                    <Metadata><Atom><AtomID>caae9209-25e5-35cd-a71a-ed55c03f294d</AtomID></Atom></Metadata>
                    <AssociatedLogicalPartitions kb="CUD" kxe="false">
                        <link href="https://hmc:12443/rest/api/uom/ManagedSystem/caae9209/LogicalPartition/089FFB20-5D19-4A8C-BB80-13650627D985" rel="related"/>
                        <link href="https://hmc:12443/rest/api/uom/ManagedSystem/caae9209/LogicalPartition/2545BCC5-BAE8-4414-AD49-EAFC2DEE2546" rel="related"/>
                    </AssociatedLogicalPartitions>
                    <AssociatedSystemIOConfiguration kb="ROR" kxe="false">
                        <IOAdapters kb="ROR" kxe="false">
                            <IOAdapterChoice>
                                <IOAdapter schemaVersion="V1_2_0">
                                    <AdapterID>553713680</AdapterID>
                                    <Description>PCIe2 4-Port (10Gb FCoE &amp; 1GbE) SR&amp;RJ45 Adapter</Description>
                                    <DeviceName>PCIe2 4-Port (10Gb FCoE &amp; 1GbE) SR&amp;RJ45 Adapter</DeviceName>
                                    <DynamicReconfigurationConnectorName>U78C7.001.RCH0004-P1-C2</DynamicReconfigurationConnectorName>
                                    <PhysicalLocation>U78C7.001.RCH0004-P1-C2</PhysicalLocation>
                                </IOAdapter>
                            </IOAdapterChoice>
                            <IOAdapterChoice>
                                <IOAdapter schemaVersion="V1_2_0">
                                    <AdapterID>553714177</AdapterID>
                                    <Description>Quad 8 Gigabit Fibre Channel LP Adapter</Description>
                                </IOAdapter>
                            </IOAdapterChoice>
                        </IOAdapters>
                    </AssociatedSystemIOConfiguration>
                    <AssociatedSystemMemoryConfiguration kb="CUD" kxe="false">
                        <CurrentAvailableSystemMemory>40960</CurrentAvailableSystemMemory>
                        <InstalledSystemMemory>262144</InstalledSystemMemory>
                    </AssociatedSystemMemoryConfiguration>
                    <AssociatedSystemProcessorConfiguration kb="CUD" kxe="false">
                        <CurrentAvailableSystemProcessorUnits>4.5</CurrentAvailableSystemProcessorUnits>
                        <InstalledSystemProcessorUnits>16</InstalledSystemProcessorUnits>
                    </AssociatedSystemProcessorConfiguration>
                    <MachineTypeModelAndSerialNumber kxe="false" kb="ROR">
                        <MachineType>8247</MachineType>
                        <Model>22L</Model>
                        <SerialNumber>2125D4A</SerialNumber>
                    </MachineTypeModelAndSerialNumber>
                    <PrimaryIPAddress>10.32.0.12</PrimaryIPAddress>
                    <State>operating</State>
                    <SystemName>Server-8247-22L-SN2125D4A</SystemName>
                    <SystemFirmware>FW830.00 (23)</SystemFirmware>
                </ManagedSystem:ManagedSystem>
            </content>
        </entry>
    "#;

    #[test]
    fn managed_system_fields_and_adapters() {
        let registry = standard_registry().expect("registry");
        let root = hmc_xml::parse(SYSTEM).expect("parse");
        let Some(Entity::ManagedSystem(system)) =
            registry.decode_entry(&root, None).expect("decode")
        else {
            panic!("expected a managed system");
        };
        assert_eq!(system.name(), Some("Server-8247-22L-SN2125D4A"));
        assert_eq!(system.state(), Some("operating"));
        assert_eq!(system.mtms().as_deref(), Some("8247-22L*2125D4A"));
        assert_eq!(system.installed_memory(), Some("262144"));
        assert_eq!(
            system.record().parse_field::<f64>("available_processors"),
            Some(4.5)
        );
        assert_eq!(system.firmware_level(), Some("FW830.00 (23)"));

        let adapters = system.io_adapters();
        assert_eq!(adapters.len(), 2);
        assert_eq!(adapters[0].adapter_id(), Some("553713680"));
        assert_eq!(
            adapters[0].description(),
            Some("PCIe2 4-Port (10Gb FCoE & 1GbE) SR&RJ45 Adapter")
        );
        assert_eq!(adapters[1].location_code(), None);

        assert_eq!(
            system.partition_ids(),
            vec![
                "089FFB20-5D19-4A8C-BB80-13650627D985",
                "2545BCC5-BAE8-4414-AD49-EAFC2DEE2546"
            ]
        );
        assert!(system.vios_ids().is_empty());
        assert_eq!(
            system.record().uuid().as_deref(),
            Some("caae9209-25e5-35cd-a71a-ed55c03f294d")
        );
    }

    #[test]
    fn management_console_links() {
        let registry = standard_registry().expect("registry");
        let root = hmc_xml::parse(
            r#"<entry>
                <id>hmc1</id>
                <content type="application/vnd.ibm.powervm.uom+xml; type=ManagementConsole">
                    <ManagementConsole:ManagementConsole xmlns:ManagementConsole="urn:mc">
                        <ManagedSystems>
                            <link href="https://hmc/rest/api/uom/ManagedSystem/ms1" rel="related"/>
                        </ManagedSystems>
                        <ManagementConsoleName>hmc7</ManagementConsoleName>
                        <VersionInfo><BuildLevel>1501</BuildLevel><Version>V8R8.2.0</Version></VersionInfo>
                    </ManagementConsole:ManagementConsole>
                </content>
            </entry>"#,
        )
        .expect("parse");
        let Some(Entity::ManagementConsole(console)) =
            registry.decode_entry(&root, None).expect("decode")
        else {
            panic!("expected a management console");
        };
        assert_eq!(console.name(), Some("hmc7"));
        assert_eq!(console.version(), Some("V8R8.2.0"));
        assert_eq!(console.build_level(), Some("1501"));
        assert_eq!(console.managed_system_ids(), vec!["ms1"]);
    }
}
