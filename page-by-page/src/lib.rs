#![warn(missing_docs)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]
// When docs auto created for docs.rs, will include features, given docs.rs uses nightly by default:
#![cfg_attr(all(doc, CHANNEL_NIGHTLY), feature(doc_auto_cfg))]

mod error;
mod filters;
mod message;
mod navigation;
mod options;
mod paginator;
mod reducers;
mod selectors;
mod state;

pub use error::*;
pub use filters::*;
pub use message::*;
pub use navigation::*;
pub use options::*;
pub use paginator::Paginator;
pub use reducers::*;
pub use selectors::*;
pub use state::*;
