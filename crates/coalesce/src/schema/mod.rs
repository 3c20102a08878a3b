//! Table-driven column schema: which rule applies to which column.

mod column;
mod table;

pub use column::FieldKind;
pub use table::{
    ContactSchema, EMAIL_COLUMN, FULLNAME_COLUMN, LAST_UPDATED_COLUMN, MOBILE_COLUMN, SEQNO_COLUMN,
};
