pub mod codec;
pub mod effects;
pub mod error;
pub mod event;
pub mod owner;
pub mod page;
pub mod response;
pub mod rpc;
mod tagged;
#[cfg(test)]
pub(crate) mod test_util;
pub mod types;

pub use effects::TransactionEffects;
pub use error::{CoreError, RpcError};
pub use event::Event;
pub use owner::Owner;
pub use page::{CoinPage, EventPage, Page, TransactionsPage};
pub use types::{
    Digest, EventId, GasCostSummary, ObjectId, ObjectRef, OwnedObjectRef, SuiAddress,
    TransactionStatus,
};
