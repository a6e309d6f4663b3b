//! Message trait for event payloads.

/// A marker trait for payloads carried through the registry.
///
/// Payloads are handed to subscribers by reference and may be buffered and
/// drained on a different thread than the one that published them, so they
/// must be `Send + Sync + 'static`.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone)]
/// struct Delivered { id: u64 }
///
/// impl Message for Delivered {}
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Message",
    label = "must be `Send + Sync + 'static`",
    note = "Payloads published through Herald must be thread-safe and static."
)]
pub trait Message: Send + Sync + 'static {}

impl Message for () {}
impl Message for String {}
impl Message for &'static str {}
impl Message for u64 {}
impl<T: Message> Message for Box<T> {}
impl<T: Message> Message for std::sync::Arc<T> {}
impl<T: Message> Message for Vec<T> {}
impl<T: Message> Message for Option<T> {}
