use crate::error::SerializeError;
use crate::value::{ErrorValue, ObjectRef};

/// Output of every serializer: plain JSON-safe data.
///
/// `Null` returned from [`Recurse::serialize`] means "absent": object
/// fields holding it are left out of generic output.
pub type PlainValue = serde_json::Value;

/// Recursion handle passed to plugins for the duration of one top-level call.
///
/// - `serialize()`: re-enters the resolution chain for a nested value.
/// - `enter()` / `leave()`: the visiting set used to break cycles. Prefer
///   [`visit`], which always leaves on return.
pub trait Recurse {
    fn serialize(&mut self, value: &ErrorValue) -> Result<PlainValue, SerializeError>;

    fn is_visiting(&self, obj: &ObjectRef) -> bool;

    /// Mark `obj` as being visited. Returns `false` if it already was.
    fn enter(&mut self, obj: &ObjectRef) -> bool;

    fn leave(&mut self, obj: &ObjectRef);

    /// `true` if `value` is an object currently mid-traversal.
    fn is_back_edge(&self, value: &ErrorValue) -> bool {
        value.as_object().is_some_and(|obj| self.is_visiting(obj))
    }
}

/// Run `f` with `obj` in the visiting set.
///
/// `obj` is removed again before returning, on success and on error. An
/// object that was already being visited stays marked for its outer owner.
pub fn visit<T>(
    rec: &mut dyn Recurse,
    obj: &ObjectRef,
    f: impl FnOnce(&mut dyn Recurse) -> Result<T, SerializeError>,
) -> Result<T, SerializeError> {
    let entered = rec.enter(obj);
    let result = f(rec);
    if entered {
        rec.leave(obj);
    }
    result
}

/// Serializer plugin, one link of the resolution chain.
///
/// - `can_handle()`: capability test, must be side-effect free.
/// - `serialize()`: converts a value it accepted, recursing through `rec`
///   for nested values.
/// - `is_catch_all()`: accepts every value; exactly such a plugin must end
///   the chain.
pub trait SerializerPlugin: Send + Sync {
    /// Name used by include/exclude options.
    fn name(&self) -> &'static str;

    fn can_handle(&self, value: &ErrorValue) -> bool;

    fn serialize(
        &self,
        value: &ErrorValue,
        rec: &mut dyn Recurse,
    ) -> Result<PlainValue, SerializeError>;

    fn is_catch_all(&self) -> bool {
        false
    }
}
