//! PowerVM entity catalog for the HMC REST API.
//!
//! Each entity is a fixed struct with one member per field of its table in
//! [`tables`]; [`standard_registry`] turns the tables into schemas and wires
//! every entity type to its discriminant.

use std::fmt;

use hmc_core::{DecodeError, EntryRecord, Record, Schema, TypeRegistry};

/// Declare a record type: one `Option<String>` member per schema field plus
/// optional nested record collections, populated from an already-built
/// [`Record`] or [`EntryRecord`].
macro_rules! record_type {
    (
        $(#[$meta:meta])*
        pub struct $ty:ident($inner:ident) = $type_name:literal {
            $( $(#[$fmeta:meta])* $field:ident, )*
        }
        $( nested {
            $( $(#[$nmeta:meta])* $nfield:ident: $nty:ident = $npath:literal, )*
        } )?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $ty {
            inner: $inner,
            $( $field: Option<String>, )*
            $( $( $nfield: Vec<$nty>, )* )?
        }

        impl $ty {
            /// Type name carried by the content-type discriminant.
            pub const TYPE_NAME: &'static str = $type_name;
            /// Member names, in schema order.
            pub const FIELDS: &'static [&'static str] = &[$(stringify!($field)),*];

            /// Underlying record, with the owned subtree.
            pub fn record(&self) -> &$inner {
                &self.inner
            }

            $(
                $(#[$fmeta])*
                pub fn $field(&self) -> Option<&str> {
                    self.$field.as_deref()
                }
            )*

            $( $(
                $(#[$nmeta])*
                pub fn $nfield(&self) -> &[$nty] {
                    &self.$nfield
                }
            )* )?
        }

        impl crate::Assemble for $ty {
            type Inner = $inner;
            const TYPE_NAME: &'static str = $type_name;

            // Types without nested members never read the registry.
            #[allow(unused_variables)]
            fn assemble<T>(
                inner: $inner,
                registry: &hmc_core::TypeRegistry<T>,
            ) -> Result<Self, hmc_core::DecodeError> {
                Ok($ty {
                    $( $field: inner.field(stringify!($field)).map(str::to_string), )*
                    $( $( $nfield: crate::nested::<$nty, T>(&inner, $npath, registry)?, )* )?
                    inner,
                })
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let record: &hmc_core::Record = &self.inner;
                std::fmt::Display::fmt(record, f)
            }
        }
    };
}

pub mod job;
pub mod network;
pub mod partition;
pub mod storage;
pub mod system;
pub mod tables;

pub use job::{HttpErrorResponse, JobParameter, JobResponse, JobStatus};
pub use network::{ClientNetworkAdapter, VirtualNetwork, VirtualSwitch};
pub use partition::{LogicalPartition, VirtualIoServer};
pub use storage::{Cluster, PhysicalVolume, SharedStoragePool};
pub use system::{IoAdapter, ManagedSystem, ManagementConsole};

/// Member assignment from a populated record.
pub(crate) trait Assemble: Sized {
    type Inner;
    const TYPE_NAME: &'static str;

    fn assemble<T>(inner: Self::Inner, registry: &TypeRegistry<T>) -> Result<Self, DecodeError>;
}

/// Build every nested record `expr` reaches inside `parent`.
pub(crate) fn nested<N, T>(
    parent: &Record,
    expr: &str,
    registry: &TypeRegistry<T>,
) -> Result<Vec<N>, DecodeError>
where
    N: Assemble<Inner = Record>,
{
    let schema = registry.subtree_schema(N::TYPE_NAME)?;
    parent
        .children(expr, &schema)
        .into_iter()
        .map(|record| N::assemble(record, registry))
        .collect()
}

fn build<E>(entry: EntryRecord, registry: &TypeRegistry<Entity>) -> Result<Entity, DecodeError>
where
    E: Assemble<Inner = EntryRecord> + Into<Entity>,
{
    E::assemble(entry, registry).map(Into::into)
}

macro_rules! entities {
    ( $( $(#[$vmeta:meta])* $variant:ident, )* ) => {
        /// Any top-level entity the standard registry decodes.
        #[derive(Debug, Clone)]
        pub enum Entity {
            $( $(#[$vmeta])* $variant($variant), )*
        }

        impl Entity {
            /// Envelope and content record of the entity.
            pub fn entry(&self) -> &EntryRecord {
                match self {
                    $( Entity::$variant(inner) => inner.record(), )*
                }
            }

            pub fn type_name(&self) -> &'static str {
                match self {
                    $( Entity::$variant(_) => $variant::TYPE_NAME, )*
                }
            }
        }

        $(
            impl From<$variant> for Entity {
                fn from(value: $variant) -> Self {
                    Entity::$variant(value)
                }
            }
        )*
    };
}

entities! {
    ManagedSystem,
    ManagementConsole,
    LogicalPartition,
    VirtualIoServer,
    VirtualSwitch,
    VirtualNetwork,
    ClientNetworkAdapter,
    SharedStoragePool,
    Cluster,
    JobResponse,
    HttpErrorResponse,
}

impl Entity {
    /// Entity identifier from the envelope (`<id>` or self link).
    pub fn uuid(&self) -> Option<String> {
        self.entry().uuid()
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record: &Record = self.entry();
        fmt::Display::fmt(record, f)
    }
}

/// Build the registry for every entity in this catalog.
///
/// Call once at startup and share the result; it is read-only afterwards.
pub fn standard_registry() -> Result<TypeRegistry<Entity>, DecodeError> {
    let mut registry = TypeRegistry::new();

    registry.register(
        Schema::from_table(ManagedSystem::TYPE_NAME, tables::MANAGED_SYSTEM)?,
        build::<ManagedSystem>,
    )?;
    registry.register(
        Schema::from_table(ManagementConsole::TYPE_NAME, tables::MANAGEMENT_CONSOLE)?,
        build::<ManagementConsole>,
    )?;

    let partition = Schema::from_table("BasePartition", tables::BASE_PARTITION)?;
    registry.register(
        partition
            .extend(LogicalPartition::TYPE_NAME, tables::LOGICAL_PARTITION)?
            .with_editable(tables::PARTITION_EDITABLE)?,
        build::<LogicalPartition>,
    )?;
    registry.register(
        partition
            .extend(VirtualIoServer::TYPE_NAME, tables::VIRTUAL_IO_SERVER)?
            .with_editable(tables::PARTITION_EDITABLE)?,
        build::<VirtualIoServer>,
    )?;

    registry.register(
        Schema::from_table(VirtualSwitch::TYPE_NAME, tables::VIRTUAL_SWITCH)?,
        build::<VirtualSwitch>,
    )?;
    registry.register(
        Schema::from_table(VirtualNetwork::TYPE_NAME, tables::VIRTUAL_NETWORK)?,
        build::<VirtualNetwork>,
    )?;
    registry.register(
        Schema::from_table(ClientNetworkAdapter::TYPE_NAME, tables::CLIENT_NETWORK_ADAPTER)?,
        build::<ClientNetworkAdapter>,
    )?;
    registry.register(
        Schema::from_table(SharedStoragePool::TYPE_NAME, tables::SHARED_STORAGE_POOL)?,
        build::<SharedStoragePool>,
    )?;
    registry.register(
        Schema::from_table(Cluster::TYPE_NAME, tables::CLUSTER)?,
        build::<Cluster>,
    )?;
    registry.register(
        Schema::from_table(JobResponse::TYPE_NAME, tables::JOB_RESPONSE)?,
        build::<JobResponse>,
    )?;
    registry.register(
        Schema::from_table(HttpErrorResponse::TYPE_NAME, tables::HTTP_ERROR_RESPONSE)?,
        build::<HttpErrorResponse>,
    )?;

    registry.register_subtree(Schema::from_table(IoAdapter::TYPE_NAME, tables::IO_ADAPTER)?)?;
    registry.register_subtree(Schema::from_table(
        PhysicalVolume::TYPE_NAME,
        tables::PHYSICAL_VOLUME,
    )?)?;
    registry.register_subtree(Schema::from_table(JobParameter::TYPE_NAME, tables::JOB_PARAMETER)?)?;

    tracing::debug!(types = registry.type_names().len(), "standard registry ready");
    Ok(registry)
}
