use hmc::{Decoder, Entity};

const ENTRY: &str = r#"
<entry xmlns="http://www.w3.org/2005/Atom">
    <id>089FFB20-5D19-4A8C-BB80-13650627D985</id>
    <content type="application/vnd.ibm.powervm.uom+xml; type=LogicalPartition">
        <LogicalPartition:LogicalPartition xmlns:LogicalPartition="http://www.ibm.com/xmlns/systems/power/firmware/uom/mc/2012_10/" schemaVersion="V1_2_0">
            <PartitionID kb="COD" kxe="false">3</PartitionID>
            <PartitionName kb="CUR" kxe="false">aix71-db</PartitionName>
        </LogicalPartition:LogicalPartition>
    </content>
</entry>
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let new_name = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "aix71-db-renamed".to_string());
    let decoder = Decoder::standard()?;
    let Some(Entity::LogicalPartition(mut lpar)) = decoder.object(ENTRY, None)? else {
        println!("No partition in document.");
        return Ok(());
    };
    println!("before: {}", lpar.name().unwrap_or("-"));
    lpar.rename(&new_name)?;
    println!("after:  {}", lpar.name().unwrap_or("-"));
    // Body to send back with the update request.
    println!("{}", lpar.record().to_xml()?);
    Ok(())
}
