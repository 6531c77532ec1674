pub mod error;
pub mod fanout;
pub mod fs;
pub mod index;
pub mod memory;
pub mod payload;
pub mod ports;
pub mod rdf;

pub use error::{RepositoryError, StoreError};
pub use fanout::{BatchSerializer, FanOut};
pub use fs::FsSink;
pub use index::{IndexMapped, IndexSerializer};
pub use memory::{MemoryPrimary, MemorySink};
pub use payload::{PayloadFormat, SerializedPayload};
pub use ports::{PayloadSink, PrimaryStore};
pub use rdf::{RdfMapped, RdfSerializer, COMBINED_BASE_URI};
