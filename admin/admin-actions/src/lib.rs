//! Data shaping behind the admin panel: form values coerced into mutation
//! payloads, column filters into `where` conditions, and table paging.

mod error;
mod filter;
mod mutation;
mod settings;
mod table;
mod value;

pub use error::AdminError;
pub use filter::filter_value;
pub use mutation::{Record, create_data, delete_variables, record_variables, update_data};
pub use settings::AdminSettings;
pub use table::{Page, connected_rows, page_count, parent_field, relation_tabs, table_queries};
pub use value::{ValueContext, value_by_type};
