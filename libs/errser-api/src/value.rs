use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::{AccessError, SerializeError};

/// Callable stored on an object: accessors and methods such as `cause()`.
///
/// Always invoked with the object it was read from as the receiver.
pub type NativeFn = Rc<dyn Fn(&ObjectRef) -> Result<ErrorValue, AccessError>>;

/// Identity of an object for the duration of its lifetime.
pub type ObjectId = usize;

/// Any value submitted for serialization.
///
/// Strategy by type:
/// - Scalars (Bool, Int, UInt, Float, String): terminal, copied as-is
/// - Undefined, Null, Function: no plain form, serialize to absent
/// - Array: owned, elements serialized individually
/// - Object: shared handle with identity, graphs may be cyclic
#[derive(Clone, Default)]
pub enum ErrorValue {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Int(i64),
    /// Integers above `i64::MAX`.
    UInt(u64),
    Float(f64),
    String(String),
    Array(Vec<ErrorValue>),
    Function(NativeFn),
    Object(ObjectRef),
}

impl ErrorValue {
    /// Callable value, e.g. a `cause()` method.
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&ObjectRef) -> Result<ErrorValue, AccessError> + 'static,
    {
        ErrorValue::Function(Rc::new(f))
    }

    /// Short name of the value's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ErrorValue::Undefined => "undefined",
            ErrorValue::Null => "null",
            ErrorValue::Bool(_) => "boolean",
            ErrorValue::Int(_) | ErrorValue::UInt(_) | ErrorValue::Float(_) => "number",
            ErrorValue::String(_) => "string",
            ErrorValue::Array(_) => "array",
            ErrorValue::Function(_) => "function",
            ErrorValue::Object(_) => "object",
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            ErrorValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ErrorValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, ErrorValue::Undefined | ErrorValue::Null)
    }

    /// Truthiness: nullish, `false`, zero, NaN and `""` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            ErrorValue::Undefined | ErrorValue::Null => false,
            ErrorValue::Bool(b) => *b,
            ErrorValue::Int(i) => *i != 0,
            ErrorValue::UInt(u) => *u != 0,
            ErrorValue::Float(f) => *f != 0.0 && !f.is_nan(),
            ErrorValue::String(s) => !s.is_empty(),
            ErrorValue::Array(_) | ErrorValue::Function(_) | ErrorValue::Object(_) => true,
        }
    }

    /// Plain form of a terminal value; `None` for arrays and objects.
    ///
    /// Non-finite floats have no JSON form and map to `Null`, as do
    /// undefined and function values.
    pub fn as_plain_scalar(&self) -> Option<serde_json::Value> {
        use serde_json::Value;

        match self {
            ErrorValue::Undefined | ErrorValue::Null | ErrorValue::Function(_) => Some(Value::Null),
            ErrorValue::Bool(b) => Some(Value::Bool(*b)),
            ErrorValue::Int(i) => Some(Value::from(*i)),
            ErrorValue::UInt(u) => Some(Value::from(*u)),
            ErrorValue::Float(f) => Some(
                serde_json::Number::from_f64(*f)
                    .map(Value::Number)
                    .unwrap_or(Value::Null),
            ),
            ErrorValue::String(s) => Some(Value::String(s.clone())),
            ErrorValue::Array(_) | ErrorValue::Object(_) => None,
        }
    }

    /// Convert a Rust error and its `source()` chain into an object chain.
    ///
    /// The outermost object is classified by the concrete type name; sources
    /// are only known as `dyn Error` and are classified as `Error`.
    pub fn from_error<E: std::error::Error + 'static>(err: &E) -> Self {
        let class = short_type_name(std::any::type_name::<E>());
        let mut obj = ErrorObject::error(class, err.to_string());
        if let Some(source) = err.source() {
            obj.set("cause", Self::from_dyn_error(source));
        }
        ErrorValue::Object(obj.into_ref())
    }

    fn from_dyn_error(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut obj = ErrorObject::error("Error", err.to_string());
        if let Some(source) = err.source() {
            obj.set("cause", Self::from_dyn_error(source));
        }
        ErrorValue::Object(obj.into_ref())
    }
}

fn short_type_name(full: &str) -> &str {
    let path = full.split('<').next().unwrap_or(full);
    path.rsplit("::").next().unwrap_or(path)
}

impl fmt::Debug for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorValue::Undefined => f.write_str("Undefined"),
            ErrorValue::Null => f.write_str("Null"),
            ErrorValue::Bool(b) => write!(f, "Bool({b})"),
            ErrorValue::Int(i) => write!(f, "Int({i})"),
            ErrorValue::UInt(u) => write!(f, "UInt({u})"),
            ErrorValue::Float(x) => write!(f, "Float({x})"),
            ErrorValue::String(s) => write!(f, "String({s:?})"),
            ErrorValue::Array(items) => f.debug_tuple("Array").field(items).finish(),
            ErrorValue::Function(_) => f.write_str("Function"),
            ErrorValue::Object(obj) => obj.fmt(f),
        }
    }
}

impl From<bool> for ErrorValue {
    fn from(b: bool) -> Self {
        ErrorValue::Bool(b)
    }
}

impl From<i32> for ErrorValue {
    fn from(i: i32) -> Self {
        ErrorValue::Int(i.into())
    }
}

impl From<i64> for ErrorValue {
    fn from(i: i64) -> Self {
        ErrorValue::Int(i)
    }
}

impl From<u32> for ErrorValue {
    fn from(i: u32) -> Self {
        ErrorValue::Int(i.into())
    }
}

impl From<u64> for ErrorValue {
    fn from(u: u64) -> Self {
        match i64::try_from(u) {
            Ok(i) => ErrorValue::Int(i),
            Err(_) => ErrorValue::UInt(u),
        }
    }
}

impl From<f64> for ErrorValue {
    fn from(x: f64) -> Self {
        ErrorValue::Float(x)
    }
}

impl From<&str> for ErrorValue {
    fn from(s: &str) -> Self {
        ErrorValue::String(s.to_string())
    }
}

impl From<String> for ErrorValue {
    fn from(s: String) -> Self {
        ErrorValue::String(s)
    }
}

impl From<Vec<ErrorValue>> for ErrorValue {
    fn from(items: Vec<ErrorValue>) -> Self {
        ErrorValue::Array(items)
    }
}

impl From<ObjectRef> for ErrorValue {
    fn from(obj: ObjectRef) -> Self {
        ErrorValue::Object(obj)
    }
}

impl From<&ObjectRef> for ErrorValue {
    fn from(obj: &ObjectRef) -> Self {
        ErrorValue::Object(obj.clone())
    }
}

impl From<ErrorObject> for ErrorValue {
    fn from(obj: ErrorObject) -> Self {
        ErrorValue::Object(obj.into_ref())
    }
}

impl<T: Into<ErrorValue>> From<Option<T>> for ErrorValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(ErrorValue::Undefined)
    }
}

/// JSON documents become unclassified object graphs.
impl From<serde_json::Value> for ErrorValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => ErrorValue::Null,
            Value::Bool(b) => ErrorValue::Bool(b),
            Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(i), _) => ErrorValue::Int(i),
                (None, Some(u)) => ErrorValue::UInt(u),
                (None, None) => ErrorValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => ErrorValue::String(s),
            Value::Array(items) => ErrorValue::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                let mut obj = ErrorObject::new();
                for (key, value) in map {
                    obj.set(key, Self::from(value));
                }
                ErrorValue::Object(obj.into_ref())
            }
        }
    }
}

/// A single own property.
#[derive(Clone)]
pub enum Slot {
    Data(ErrorValue),
    /// Accessor, evaluated on every read; may fail.
    Getter(NativeFn),
}

/// Object contents: optional runtime classification plus own properties
/// in insertion order.
#[derive(Clone, Default)]
pub struct ErrorObject {
    class: Option<String>,
    props: Vec<(String, Slot)>,
}

impl ErrorObject {
    /// Unclassified object with no properties.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(class: impl Into<String>) -> Self {
        Self {
            class: Some(class.into()),
            props: Vec::new(),
        }
    }

    /// Error-shaped object: `class` plus an own `message` property.
    pub fn error(class: impl Into<String>, message: impl Into<String>) -> Self {
        let mut obj = Self::with_class(class);
        obj.set("message", ErrorValue::String(message.into()));
        obj
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<ErrorValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn with_getter<F>(mut self, key: impl Into<String>, getter: F) -> Self
    where
        F: Fn(&ObjectRef) -> Result<ErrorValue, AccessError> + 'static,
    {
        self.define_getter(key, getter);
        self
    }

    /// Set a data property. An existing key keeps its enumeration position.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ErrorValue>) {
        self.put(key.into(), Slot::Data(value.into()));
    }

    pub fn define_getter<F>(&mut self, key: impl Into<String>, getter: F)
    where
        F: Fn(&ObjectRef) -> Result<ErrorValue, AccessError> + 'static,
    {
        self.put(key.into(), Slot::Getter(Rc::new(getter)));
    }

    pub fn remove(&mut self, key: &str) -> Option<Slot> {
        let pos = self.props.iter().position(|(k, _)| k == key)?;
        Some(self.props.remove(pos).1)
    }

    pub fn into_ref(self) -> ObjectRef {
        ObjectRef(Rc::new(RefCell::new(self)))
    }

    fn put(&mut self, key: String, slot: Slot) {
        if let Some(entry) = self.props.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = slot;
        } else {
            self.props.push((key, slot));
        }
    }

    fn slot(&self, key: &str) -> Option<&Slot> {
        self.props.iter().find(|(k, _)| k == key).map(|(_, s)| s)
    }
}

impl fmt::Debug for ErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorObject")
            .field("class", &self.class)
            .field("keys", &self.props.iter().map(|(k, _)| k).collect::<Vec<_>>())
            .finish()
    }
}

/// Shared handle to an object. Clones alias the same object.
///
/// No borrow is held across accessor calls, so getters may read the
/// object they are defined on.
#[derive(Clone)]
pub struct ObjectRef(Rc<RefCell<ErrorObject>>);

impl ObjectRef {
    pub fn new(obj: ErrorObject) -> Self {
        obj.into_ref()
    }

    pub fn id(&self) -> ObjectId {
        Rc::as_ptr(&self.0) as ObjectId
    }

    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn class(&self) -> Option<String> {
        self.0.borrow().class.clone()
    }

    /// Own property names in enumeration order.
    pub fn keys(&self) -> Vec<String> {
        self.0.borrow().props.iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn has(&self, key: &str) -> bool {
        self.0.borrow().slot(key).is_some()
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<ErrorValue>) {
        self.0.borrow_mut().set(key, value);
    }

    pub fn define_getter<F>(&self, key: impl Into<String>, getter: F)
    where
        F: Fn(&ObjectRef) -> Result<ErrorValue, AccessError> + 'static,
    {
        self.0.borrow_mut().define_getter(key, getter);
    }

    pub fn remove(&self, key: &str) -> Option<Slot> {
        self.0.borrow_mut().remove(key)
    }

    /// Data property value without running accessors.
    pub fn data(&self, key: &str) -> Option<ErrorValue> {
        match self.0.borrow().slot(key) {
            Some(Slot::Data(value)) => Some(value.clone()),
            _ => None,
        }
    }

    /// Property value, running the accessor if the slot has one.
    ///
    /// `Ok(None)`: no own property with that name.
    pub fn get(&self, key: &str) -> Result<Option<ErrorValue>, AccessError> {
        let slot = self.0.borrow().slot(key).cloned();
        match slot {
            None => Ok(None),
            Some(Slot::Data(value)) => Ok(Some(value)),
            Some(Slot::Getter(getter)) => getter(self).map(Some),
        }
    }

    /// Like [`get`](Self::get), with the failure tagged by property name.
    pub fn read(&self, key: &str) -> Result<Option<ErrorValue>, SerializeError> {
        self.get(key).map_err(|source| SerializeError::access(key, source))
    }

    /// Call a method stored on this object with `self` as receiver.
    pub fn call(&self, method: &NativeFn) -> Result<ErrorValue, AccessError> {
        method(self)
    }

    /// New object of the same class holding the current values of the own
    /// properties accepted by `filter`. Accessors are read once.
    pub fn shallow_clone(
        &self,
        filter: impl Fn(&str) -> bool,
    ) -> Result<ObjectRef, SerializeError> {
        let mut clone = match self.class() {
            Some(class) => ErrorObject::with_class(class),
            None => ErrorObject::new(),
        };
        for key in self.keys() {
            if !filter(&key) {
                continue;
            }
            if let Some(value) = self.read(&key)? {
                clone.set(key, value);
            }
        }
        Ok(clone.into_ref())
    }
}

impl fmt::Debug for ObjectRef {
    // Cycles are common; never descend into properties.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(obj) => write!(f, "Object({}#{:x})", obj.class().unwrap_or("?"), self.id()),
            Err(_) => write!(f, "Object(#{:x})", self.id()),
        }
    }
}
