use std::env;

use hmc::{Decoder, Entity};

const FEED: &str = r#"
<feed xmlns="http://www.w3.org/2005/Atom">
    <id>b3c8a4cc-6b5c-3b3e-9a1d-1f3f2c6f6a10</id>
    <entry>
        <id>089FFB20-5D19-4A8C-BB80-13650627D985</id>
        <content type="application/vnd.ibm.powervm.uom+xml; type=LogicalPartition">
            <LogicalPartition:LogicalPartition xmlns:LogicalPartition="http://www.ibm.com/xmlns/systems/power/firmware/uom/mc/2012_10/">
                <PartitionID>3</PartitionID>
                <PartitionName>aix71-db</PartitionName>
                <PartitionState>running</PartitionState>
            </LogicalPartition:LogicalPartition>
        </content>
    </entry>
    <entry>
        <id>3443DB77-AED1-47ED-9AA5-3DB9C6CF7089</id>
        <content type="application/vnd.ibm.powervm.uom+xml; type=VirtualIOServer">
            <VirtualIOServer:VirtualIOServer xmlns:VirtualIOServer="http://www.ibm.com/xmlns/systems/power/firmware/uom/mc/2012_10/">
                <PartitionID>1</PartitionID>
                <PartitionName>vios1</PartitionName>
                <PartitionState>running</PartitionState>
            </VirtualIOServer:VirtualIOServer>
        </content>
    </entry>
    <entry>
        <id>no-content</id>
    </entry>
</feed>
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    // Optional type filter, e.g. `VirtualIOServer`.
    let filter = env::args().nth(1);
    let decoder = Decoder::standard()?;
    let feed = decoder.objects(FEED, filter.as_deref())?;
    if feed.is_empty() {
        println!("No records matched.");
        return Ok(());
    }
    println!("{:<14} {:<4} {:<12} {}", "TYPE", "ID", "STATE", "NAME");
    for entity in &feed {
        let (id, state, name) = match entity {
            Entity::LogicalPartition(p) => (p.partition_id(), p.state(), p.name()),
            Entity::VirtualIoServer(v) => (v.partition_id(), v.state(), v.name()),
            _ => continue,
        };
        println!(
            "{:<14} {:<4} {:<12} {}",
            entity.type_name(),
            id.unwrap_or("-"),
            state.unwrap_or("-"),
            name.unwrap_or("-"),
        );
    }
    Ok(())
}
