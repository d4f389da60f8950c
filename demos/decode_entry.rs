use hmc::{Decoder, Entity};
use tracing::info;

const ENTRY: &str = r#"
<entry xmlns="http://www.w3.org/2005/Atom">
    <id>caae9209-25e5-35cd-a71a-ed55c03f294d</id>
    <published>2015-02-03T10:11:12.000-06:00</published>
    <link rel="SELF" href="https://hmc:12443/rest/api/uom/ManagedSystem/caae9209-25e5-35cd-a71a-ed55c03f294d"/>
    <etag:etag xmlns:etag="http://www.ibm.com/xmlns/systems/power/firmware/cluster/default">-1913539093</etag:etag>
    <content type="application/vnd.ibm.powervm.uom+xml; type=ManagedSystem">
        <ManagedSystem:ManagedSystem xmlns:ManagedSystem="http://www.ibm.com/xmlns/systems/power/firmware/uom/mc/2012_10/">
            <AssociatedLogicalPartitions>
                <link href="https://hmc:12443/rest/api/uom/ManagedSystem/caae9209/LogicalPartition/089FFB20-5D19-4A8C-BB80-13650627D985" rel="related"/>
                <link href="https://hmc:12443/rest/api/uom/ManagedSystem/caae9209/LogicalPartition/1DB7A4DC-B4E3-4D6A-9C33-5B1B0E7A2F1A" rel="related"/>
            </AssociatedLogicalPartitions>
            <MachineTypeModelAndSerialNumber>
                <MachineType>8247</MachineType>
                <Model>22L</Model>
                <SerialNumber>2125D4A</SerialNumber>
            </MachineTypeModelAndSerialNumber>
            <State>operating</State>
            <SystemName>Server-8247-22L-SN2125D4A</SystemName>
        </ManagedSystem:ManagedSystem>
    </content>
</entry>
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let decoder = Decoder::standard()?;
    let Some(Entity::ManagedSystem(system)) = decoder.object(ENTRY, None)? else {
        println!("No managed system in document.");
        return Ok(());
    };
    info!(uuid = ?system.record().uuid(), "decoded managed system");
    print!("{system}");
    println!("mtms: {}", system.mtms().unwrap_or_default());
    for id in system.partition_ids() {
        println!("partition: {id}");
    }
    Ok(())
}
