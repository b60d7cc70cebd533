mod value;
pub use value::Value;

mod value_chrono;
pub use value_chrono::{parse_datetime, DATETIME_FORMAT, STORAGE_DATETIME_FORMAT};

mod value_json;

mod value_record;
pub use value_record::ValueRecord;
