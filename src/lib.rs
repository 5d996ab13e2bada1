pub mod codec;
pub mod compose;
pub mod error;
pub mod field;
pub mod handle;
pub mod header;
pub mod skills;
pub mod trace;
pub mod types;

pub use compose::{Caps, Skill};
pub use error::{Error, Result};
pub use field::Field;
pub use handle::{
    BasicFile, BasicUnstructured, Cube, HandleCore, Meta, TraceFile, Unstructured,
    UnstructuredReadOnly, UnstructuredWriter, Volume,
};
pub use header::TraceHeader;
pub use trace::Samples;
pub use types::{Config, Format, IlByte, Mode, Sorting, XlByte};
