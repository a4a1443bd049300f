mod codec;
mod collection;
mod college;
mod error;
mod record;
mod session;
mod storage;
mod student;

pub use codec::{decode, encode, encode_models, parse, parse_models};
pub use codec::{FIELD_SEPARATOR, KEY_VALUE_SEPARATOR, RECORD_SEPARATOR};
pub use collection::Collection;
pub use college::{
    College, CollegeInput, CollegeStore, CollegeUpdate, CollegeWithDepartments, Department,
    DepartmentInput, DepartmentUpdate,
};
pub use error::{CodecError, StoreError};
pub use record::{Model, Record};
pub use session::EditContext;
pub use storage::{DirStorage, MemoryStorage, StorageBackend};
pub use student::{
    age, age_on, full_name, year_level, Student, StudentStore, StudentUpdate, StudentWithJoins,
};
